//! Credencial de acceso y petición de minteo.
//!
//! La credencial es un value type serializable: puede persistirse y volver a
//! usarse más tarde; `validate` es la puerta estructural previa a cualquier
//! uso. El core no re-implementa la criptografía de sesión: las entradas por
//! nodo son opacas y vienen del colaborador de red.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::constants::DEFAULT_ACCESS_TOKEN_TTL_SECS;
use crate::errors::CoreError;
use crate::hashing;
use crate::model::code::{CodeRef, CodeSource};
use crate::model::grants::{self, AbilityRequest, ResourceGrant};
use crate::model::outputs::OutputSpec;
use crate::model::records::DelegationToken;
use crate::model::Op;

/// Clase de credencial a mintear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// Autosuficiente: el caller paga su propia cuota.
    Standalone,
    /// Consume cuota delegada; exige un token de delegación previo.
    Delegated,
}

/// Entrada de credencial emitida por un nodo concreto. Opaca para el core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub node: String,
    pub signature: String,
    pub signed_message: String,
    pub address: String,
}

/// Credencial de acceso acotada en tiempo y capacidades.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessCredential {
    pub credential_id: String,
    pub kind: CredentialKind,
    pub identity_public_key: String,
    pub abilities: Vec<AbilityRequest>,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub delegation: Option<DelegationToken>,
    /// Firma por nodo, ordenada por URL de nodo para estabilidad.
    pub entries: BTreeMap<String, CredentialEntry>,
}

impl OutputSpec for AccessCredential {
    const OP: Op = Op::CreateAccessToken;
}

impl AccessCredential {
    /// Validación estructural previa al uso. No verifica criptografía (eso
    /// es del colaborador); sí detecta bundles vacíos, firmas huecas y
    /// ventanas temporales incoherentes o vencidas.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.entries.is_empty() {
            return Err(CoreError::invalid_credential("no per-node entries"));
        }
        for (node, entry) in &self.entries {
            if entry.signature.is_empty() || entry.signed_message.is_empty() {
                return Err(CoreError::invalid_credential(format!("empty entry for node `{node}`")));
            }
        }
        if self.abilities.is_empty() {
            return Err(CoreError::invalid_credential("no abilities"));
        }
        if self.expires_at <= self.issued_at {
            return Err(CoreError::invalid_credential("expiry precedes issuance"));
        }
        if self.expires_at <= Utc::now() {
            return Err(CoreError::invalid_credential("credential expired"));
        }
        Ok(())
    }

    /// Identidad de contenido de la credencial (no incluye las firmas por
    /// nodo, que varían entre minteos equivalentes).
    pub fn fingerprint(&self) -> String {
        hashing::hash_value(&serde_json::json!({
            "identity_public_key": self.identity_public_key,
            "abilities": self.abilities.iter().map(|a| a.resource.uri()).collect::<Vec<_>>(),
            "expires_at": self.expires_at.to_rfc3339(),
            "kind": self.kind,
        }))
    }

    /// Reformateo legible por humanos, una línea por nodo.
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("credential {} for {} (expires {})",
                                     self.credential_id, self.identity_public_key, self.expires_at.to_rfc3339())];
        for (node, entry) in &self.entries {
            // Truncado por chars: la firma viene del colaborador y podría no
            // ser ASCII puro.
            let prefix: String = entry.signature.chars().take(16).collect();
            lines.push(format!("  {} -> sig {prefix}…", node));
        }
        lines.join("\n")
    }
}

/// Petición de minteo de un access token.
#[derive(Debug, Clone)]
pub struct AccessTokenRequest {
    pub kind: CredentialKind,
    pub identity_public_key: String,
    pub grants: Vec<ResourceGrant>,
    pub code: Option<String>,
    pub code_ref: Option<CodeRef>,
    pub js_params: Value,
    pub delegation_token: Option<DelegationToken>,
    /// Si falta, se aplica la ventana corta por defecto desde el minteo.
    pub expiry: Option<DateTime<Utc>>,
}

impl AccessTokenRequest {
    /// Comprueba la coherencia estructural de la petición y la reduce a los
    /// insumos que el colaborador de red necesita.
    pub(crate) fn into_mint_request(self) -> Result<MintSessionRequest, CoreError> {
        if self.identity_public_key.is_empty() {
            return Err(CoreError::validation("identity public key is required"));
        }
        let abilities = grants::compose(&self.grants)?;
        let code = CodeSource::resolve(self.code, self.code_ref)?;
        if self.kind == CredentialKind::Delegated && self.delegation_token.is_none() {
            return Err(CoreError::validation("a delegation token is required for delegated credentials"));
        }
        let expires_at = self.expiry
                             .unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS));

        // La clave pública viaja sin el prefijo `0x`.
        let identity_public_key = self.identity_public_key
                                      .strip_prefix("0x")
                                      .unwrap_or(&self.identity_public_key)
                                      .to_string();

        Ok(MintSessionRequest { kind: self.kind,
                                identity_public_key,
                                abilities,
                                code,
                                js_params: self.js_params,
                                delegation_token: self.delegation_token,
                                expires_at })
    }
}

/// Insumos ya validados para `NetworkHandle::mint_session_credential`.
#[derive(Debug, Clone)]
pub struct MintSessionRequest {
    pub kind: CredentialKind,
    pub identity_public_key: String,
    pub abilities: Vec<AbilityRequest>,
    pub code: CodeSource,
    pub js_params: Value,
    pub delegation_token: Option<DelegationToken>,
    pub expires_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::grants::ResourceKind;
    use serde_json::json;

    fn base_request() -> AccessTokenRequest {
        AccessTokenRequest { kind: CredentialKind::Delegated,
                             identity_public_key: "0xabc123".into(),
                             grants: vec![ResourceGrant::wildcard(ResourceKind::Signing)],
                             code: Some("(async () => {})()".into()),
                             code_ref: None,
                             js_params: json!({}),
                             delegation_token: Some(DelegationToken { signed_message: "m".into(),
                                                                      signature: "s".into(),
                                                                      address: "0xowner".into() }),
                             expiry: None }
    }

    #[test]
    fn delegated_without_delegation_token_is_rejected() {
        let mut req = base_request();
        req.delegation_token = None;
        assert!(matches!(req.into_mint_request(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn both_code_and_reference_are_rejected() {
        let mut req = base_request();
        req.code_ref = Some(CodeRef::derive_from_source("x"));
        assert!(matches!(req.into_mint_request(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn neither_code_nor_reference_is_rejected() {
        let mut req = base_request();
        req.code = None;
        assert!(matches!(req.into_mint_request(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn empty_grant_list_is_rejected() {
        let mut req = base_request();
        req.grants.clear();
        assert!(matches!(req.into_mint_request(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn summary_truncates_signatures_by_chars() {
        let mut entries = BTreeMap::new();
        entries.insert("https://node-a".to_string(),
                       CredentialEntry { node: "https://node-a".into(),
                                         // multibyte: un slicing por bytes en 16 caería a mitad de char
                                         signature: "ñ".repeat(20),
                                         signed_message: "m".into(),
                                         address: "0xnode".into() });
        let credential = AccessCredential { credential_id: "c-1".into(),
                                            kind: CredentialKind::Standalone,
                                            identity_public_key: "abc".into(),
                                            abilities: grants::compose(&[ResourceGrant::wildcard(ResourceKind::Signing)]).unwrap(),
                                            issued_at: Utc::now(),
                                            expires_at: Utc::now() + Duration::minutes(10),
                                            delegation: None,
                                            entries };

        let summary = credential.summary();
        assert!(summary.contains(&"ñ".repeat(16)));
        assert!(!summary.contains(&"ñ".repeat(17)));
    }

    #[test]
    fn default_expiry_is_a_short_window_from_mint_time() {
        let before = Utc::now();
        let mint = base_request().into_mint_request().unwrap();
        let ttl = mint.expires_at - before;
        assert!(ttl <= Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS + 5));
        assert!(ttl >= Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS - 5));
        // y el prefijo 0x se normaliza
        assert_eq!(mint.identity_public_key, "abc123");
    }
}
