//! Tipos de resultado de cada operación.
//!
//! Cada struct implementa `OutputSpec` para quedar asociada en compilación a
//! la operación que la produce; el `OutputStore` guarda su forma JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::NetworkId;
use crate::hashing;
use crate::model::outputs::OutputSpec;
use crate::model::Op;

/// Identificador de token on-chain en sus dos representaciones usuales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenId {
    pub hex: String,
    pub decimal: String,
}

/// Recibo mínimo de una transacción confirmada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    pub hash: String,
    /// URL al explorador de bloques, si el colaborador la conoce.
    pub explorer_url: Option<String>,
}

/// Resumen serializable de la conexión a la red de nodos. El handle vivo no
/// es serializable; queda en el `ExecutionContext`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConnection {
    pub network: NetworkId,
    pub rpc_url: String,
    pub connected_at: DateTime<Utc>,
}

impl OutputSpec for NetworkConnection {
    const OP: Op = Op::ConnectToNetwork;
}

/// Resumen serializable de la conexión al cliente de contratos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractsConnection {
    pub network: NetworkId,
    pub rpc_url: String,
    pub signer_address: Option<String>,
    pub connected_at: DateTime<Utc>,
}

impl OutputSpec for ContractsConnection {
    const OP: Op = Op::ConnectToContracts;
}

/// Identidad on-chain recién minteada.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintedIdentity {
    pub token_id: TokenId,
    pub public_key: String,
    pub address: String,
    pub tx: TxReceipt,
}

impl OutputSpec for MintedIdentity {
    const OP: Op = Op::MintIdentity;
}

/// Identidad ya existente propiedad del firmante.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySummary {
    pub token_id: TokenId,
    pub public_key: String,
    pub address: String,
}

/// Output de `GetIdentities`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnedIdentities {
    pub identities: Vec<IdentitySummary>,
}

impl OutputSpec for OwnedIdentities {
    const OP: Op = Op::GetIdentities;
}

/// Output de `MintQuotaToken`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintedQuota {
    pub quota_token_id: String,
}

impl OutputSpec for MintedQuota {
    const OP: Op = Op::MintQuotaToken;
}

/// Token de delegación: permite a terceros consumir la cuota del emisor.
/// Es un valor opaco firmado; el core sólo lo transporta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegationToken {
    pub signed_message: String,
    pub signature: String,
    pub address: String,
}

impl OutputSpec for DelegationToken {
    const OP: Op = Op::DelegateQuota;
}

/// Recibo de `GrantAuthMethod`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthMethodGrant {
    pub tx: TxReceipt,
}

impl OutputSpec for AuthMethodGrant {
    const OP: Op = Op::GrantAuthMethod;
}

/// Recibo de `GrantCodeReference`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeReferenceGrant {
    pub tx: TxReceipt,
}

impl OutputSpec for CodeReferenceGrant {
    const OP: Op = Op::GrantCodeReference;
}

/// Respuesta cruda de una ejecución remota de código.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionOutput {
    pub response: Value,
}

impl OutputSpec for ExecutionOutput {
    const OP: Op = Op::ExecuteRemoteCode;
}

/// Firma devuelta por la red junto con el digest efectivamente firmado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureOutput {
    pub signature: String,
    /// Hex del digest sometido a firma.
    pub digest: String,
    pub public_key: String,
}

impl OutputSpec for SignatureOutput {
    const OP: Op = Op::RequestSignature;
}

/// Clave generada dentro del entorno de ejecución remoto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedKey {
    pub key_id: String,
    pub generated_public_key: String,
    pub identity_address: String,
}

impl OutputSpec for GeneratedKey {
    const OP: Op = Op::GenerateKey;
}

/// Mensaje a firmar. Los textos se reducen a digest SHA-256 antes de
/// someterse; los payloads binarios se envían tal cual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignableMessage {
    Text(String),
    Bytes(Vec<u8>),
}

impl SignableMessage {
    pub fn text(s: impl Into<String>) -> Self {
        SignableMessage::Text(s.into())
    }

    /// Bytes que efectivamente se someten a firma.
    pub fn digest(&self) -> Vec<u8> {
        match self {
            SignableMessage::Text(t) => hashing::sha256_digest(t),
            SignableMessage::Bytes(b) => b.clone(),
        }
    }
}
