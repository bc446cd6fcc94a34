//! Identidad firmante local.

use async_trait::async_trait;

use crate::errors::CollaboratorError;
use crate::model::TxReceipt;

#[async_trait]
pub trait SigningIdentity: Send + Sync {
    async fn address(&self) -> Result<String, CollaboratorError>;

    /// Saldo en la unidad mínima nativa.
    async fn balance(&self) -> Result<u128, CollaboratorError>;

    async fn send_value(&self, to: &str, amount: u128) -> Result<TxReceipt, CollaboratorError>;

    async fn sign_message(&self, message: &str) -> Result<String, CollaboratorError>;
}
