//! Colaborador de contratos: minteo de tokens y concesión de permisos.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::clients::SigningIdentity;
use crate::config::NetworkId;
use crate::errors::CollaboratorError;
use crate::model::{AuthMethodScope, CodeRef, DelegationToken, IdentitySummary, MintedIdentity, TokenId, TxReceipt};

/// Fábrica de conexiones al cliente de contratos.
#[async_trait]
pub trait ContractsClient: Send + Sync {
    async fn connect(&self,
                     network: NetworkId,
                     rpc_url: &str,
                     signer: Option<Arc<dyn SigningIdentity>>)
                     -> Result<Arc<dyn ContractsHandle>, CollaboratorError>;
}

/// Conexión viva al cliente de contratos. El ABI concreto es asunto del
/// colaborador; aquí sólo viajan valores del modelo.
#[async_trait]
pub trait ContractsHandle: Send + Sync {
    async fn mint_identity_token(&self) -> Result<MintedIdentity, CollaboratorError>;

    /// Identidades ya minteadas propiedad de `owner`.
    async fn identities_of(&self, owner: &str) -> Result<Vec<IdentitySummary>, CollaboratorError>;

    async fn grant_auth_method(&self,
                               token_id: &TokenId,
                               method_id: &str,
                               method_type: u32,
                               scopes: &[AuthMethodScope])
                               -> Result<TxReceipt, CollaboratorError>;

    async fn grant_code_reference(&self,
                                  token_id: &TokenId,
                                  code_ref: &CodeRef,
                                  scopes: &[AuthMethodScope])
                                  -> Result<TxReceipt, CollaboratorError>;

    /// Mintea un token de cuota; devuelve su id.
    async fn mint_quota_token(&self,
                              requests_per_kilosecond: u64,
                              days_until_expiry: u32)
                              -> Result<String, CollaboratorError>;

    /// Emite un token de delegación contra un token de cuota existente.
    async fn delegate_quota(&self,
                            quota_token_id: &str,
                            expires_at: Option<DateTime<Utc>>,
                            delegates: &[String])
                            -> Result<DelegationToken, CollaboratorError>;
}
