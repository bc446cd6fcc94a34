//! Cliente de contratos in-memory.
//!
//! El registro es compartido entre todas las conexiones creadas por el mismo
//! `InMemoryContracts`: lo minteado por una conexión es visible para las
//! demás, como en una cadena real. Los ids de token son secuenciales y los
//! hashes de transacción deterministas.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

use bulkie_core::clients::{ContractsClient, ContractsHandle, SigningIdentity};
use bulkie_core::config::NetworkId;
use bulkie_core::errors::CollaboratorError;
use bulkie_core::model::{AuthMethodScope, CodeRef, DelegationToken, IdentitySummary, MintedIdentity, TokenId,
                         TxReceipt};

use crate::signer::derive_address;

/// Grant de auth method registrado, consultable desde tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedAuthGrant {
    pub token_hex: String,
    pub method_id: String,
    pub method_type: u32,
    pub scopes: Vec<u8>,
}

/// Grant de referencia de código registrado, consultable desde tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCodeGrant {
    pub token_hex: String,
    pub code_ref: String,
    pub scopes: Vec<u8>,
}

#[derive(Debug, Default)]
struct Registry {
    next_token: u64,
    next_quota: u64,
    /// Identidades por dirección de dueño.
    identities: HashMap<String, Vec<IdentitySummary>>,
    auth_grants: Vec<RecordedAuthGrant>,
    code_grants: Vec<RecordedCodeGrant>,
}

/// Fábrica de conexiones; todas comparten el mismo registro.
#[derive(Default)]
pub struct InMemoryContracts {
    registry: Arc<Mutex<Registry>>,
}

impl InMemoryContracts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants de auth method registrados hasta ahora.
    pub fn auth_grants(&self) -> Vec<RecordedAuthGrant> {
        self.registry.lock().map(|r| r.auth_grants.clone()).unwrap_or_default()
    }

    /// Grants de referencia de código registrados hasta ahora.
    pub fn code_grants(&self) -> Vec<RecordedCodeGrant> {
        self.registry.lock().map(|r| r.code_grants.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ContractsClient for InMemoryContracts {
    async fn connect(&self,
                     _network: NetworkId,
                     _rpc_url: &str,
                     signer: Option<Arc<dyn SigningIdentity>>)
                     -> Result<Arc<dyn ContractsHandle>, CollaboratorError> {
        Ok(Arc::new(InMemoryContractsHandle { registry: Arc::clone(&self.registry),
                                              signer }))
    }
}

struct InMemoryContractsHandle {
    registry: Arc<Mutex<Registry>>,
    signer: Option<Arc<dyn SigningIdentity>>,
}

impl InMemoryContractsHandle {
    fn lock(&self) -> Result<MutexGuard<'_, Registry>, CollaboratorError> {
        self.registry.lock().map_err(|_| CollaboratorError::from("contracts registry lock poisoned"))
    }

    fn require_signer(&self) -> Result<&Arc<dyn SigningIdentity>, CollaboratorError> {
        self.signer.as_ref().ok_or_else(|| CollaboratorError::from("no signer attached to contracts connection"))
    }

    fn tx_receipt(seed: &str) -> TxReceipt {
        let hash = blake3::hash(seed.as_bytes()).to_hex().to_string();
        TxReceipt { hash: format!("0x{hash}"),
                    explorer_url: Some(format!("https://explorer.example.org/tx/0x{hash}")) }
    }
}

#[async_trait]
impl ContractsHandle for InMemoryContractsHandle {
    async fn mint_identity_token(&self) -> Result<MintedIdentity, CollaboratorError> {
        let owner = self.require_signer()?.address().await?;

        let (n, summary) = {
            let mut reg = self.lock()?;
            reg.next_token += 1;
            let n = reg.next_token;

            let public_key = format!("0x{}", blake3::hash(format!("identity-pk:{owner}:{n}").as_bytes()).to_hex());
            let summary = IdentitySummary { token_id: TokenId { hex: format!("0x{n:x}"),
                                                                decimal: n.to_string() },
                                            address: derive_address(&public_key),
                                            public_key };
            reg.identities.entry(owner.clone()).or_default().push(summary.clone());
            (n, summary)
        };

        Ok(MintedIdentity { token_id: summary.token_id,
                            public_key: summary.public_key,
                            address: summary.address,
                            tx: Self::tx_receipt(&format!("mint-identity:{owner}:{n}")) })
    }

    async fn identities_of(&self, owner: &str) -> Result<Vec<IdentitySummary>, CollaboratorError> {
        Ok(self.lock()?.identities.get(owner).cloned().unwrap_or_default())
    }

    async fn grant_auth_method(&self,
                               token_id: &TokenId,
                               method_id: &str,
                               method_type: u32,
                               scopes: &[AuthMethodScope])
                               -> Result<TxReceipt, CollaboratorError> {
        let mut reg = self.lock()?;
        reg.auth_grants.push(RecordedAuthGrant { token_hex: token_id.hex.clone(),
                                                 method_id: method_id.to_string(),
                                                 method_type,
                                                 scopes: scopes.iter().map(AuthMethodScope::as_u8).collect() });
        Ok(Self::tx_receipt(&format!("grant-auth:{}:{method_id}", token_id.hex)))
    }

    async fn grant_code_reference(&self,
                                  token_id: &TokenId,
                                  code_ref: &CodeRef,
                                  scopes: &[AuthMethodScope])
                                  -> Result<TxReceipt, CollaboratorError> {
        let mut reg = self.lock()?;
        reg.code_grants.push(RecordedCodeGrant { token_hex: token_id.hex.clone(),
                                                 code_ref: code_ref.as_str().to_string(),
                                                 scopes: scopes.iter().map(AuthMethodScope::as_u8).collect() });
        Ok(Self::tx_receipt(&format!("grant-code:{}:{code_ref}", token_id.hex)))
    }

    async fn mint_quota_token(&self,
                              requests_per_kilosecond: u64,
                              days_until_expiry: u32)
                              -> Result<String, CollaboratorError> {
        let mut reg = self.lock()?;
        reg.next_quota += 1;
        Ok(format!("quota-{}-{requests_per_kilosecond}rps-{days_until_expiry}d", reg.next_quota))
    }

    async fn delegate_quota(&self,
                            quota_token_id: &str,
                            expires_at: Option<DateTime<Utc>>,
                            delegates: &[String])
                            -> Result<DelegationToken, CollaboratorError> {
        let signer = self.require_signer()?;
        let address = signer.address().await?;
        let expires_at = expires_at.unwrap_or_else(|| Utc::now() + Duration::days(7));

        let signed_message = format!("delegate {quota_token_id} until {} to [{}]",
                                     expires_at.to_rfc3339(),
                                     delegates.join(","));
        let signature = signer.sign_message(&signed_message).await?;
        Ok(DelegationToken { signed_message,
                             signature,
                             address })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::StaticSigner;

    async fn connected() -> (InMemoryContracts, Arc<dyn ContractsHandle>, Arc<dyn SigningIdentity>) {
        let client = InMemoryContracts::new();
        let signer: Arc<dyn SigningIdentity> = Arc::new(StaticSigner::new("owner", 0));
        let handle = client.connect(NetworkId::Testnet, "http://rpc", Some(Arc::clone(&signer)))
                           .await
                           .unwrap();
        (client, handle, signer)
    }

    #[tokio::test]
    async fn minted_identities_are_sequential_and_listed_per_owner() {
        let (_client, handle, signer) = connected().await;
        let first = handle.mint_identity_token().await.unwrap();
        let second = handle.mint_identity_token().await.unwrap();
        assert_eq!(first.token_id.decimal, "1");
        assert_eq!(second.token_id.decimal, "2");

        let owner = signer.address().await.unwrap();
        let owned = handle.identities_of(&owner).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(handle.identities_of("0xnobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn registry_is_shared_across_connections() {
        let (client, handle, signer) = connected().await;
        handle.mint_identity_token().await.unwrap();

        let other = client.connect(NetworkId::Testnet, "http://rpc", Some(signer.clone())).await.unwrap();
        let owner = signer.address().await.unwrap();
        assert_eq!(other.identities_of(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn grants_are_recorded_with_numeric_scopes() {
        let (client, handle, _signer) = connected().await;
        let minted = handle.mint_identity_token().await.unwrap();
        handle.grant_auth_method(&minted.token_id, "app:google", 2, &[AuthMethodScope::SignAnything])
              .await
              .unwrap();

        let grants = client.auth_grants();
        assert_eq!(grants.len(), 1);
        assert_eq!(grants[0].scopes, vec![1]);
    }

    #[tokio::test]
    async fn minting_without_signer_fails() {
        let client = InMemoryContracts::new();
        let handle = client.connect(NetworkId::Testnet, "http://rpc", None).await.unwrap();
        assert!(handle.mint_identity_token().await.is_err());
    }
}
