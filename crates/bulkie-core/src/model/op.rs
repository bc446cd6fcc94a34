//! Operaciones soportadas por el orquestador.
//!
//! Enumeración cerrada, definida estáticamente al construir el sistema y
//! nunca mutada en runtime. Cada operación tiene:
//! - una clave estable bajo la que se registran sus outputs;
//! - una etiqueta humana usada en guías y al envolver errores.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    ConnectToNetwork,
    ConnectToContracts,
    MintIdentity,
    GetIdentities,
    MintQuotaToken,
    DelegateQuota,
    GrantAuthMethod,
    GrantCodeReference,
    CreateAccessToken,
    ExecuteRemoteCode,
    RequestSignature,
    GenerateKey,
}

impl Op {
    /// Todas las operaciones; útil para verificar que las tablas estáticas
    /// (dependencias, precondiciones) son totales.
    pub const ALL: [Op; 12] = [Op::ConnectToNetwork,
                               Op::ConnectToContracts,
                               Op::MintIdentity,
                               Op::GetIdentities,
                               Op::MintQuotaToken,
                               Op::DelegateQuota,
                               Op::GrantAuthMethod,
                               Op::GrantCodeReference,
                               Op::CreateAccessToken,
                               Op::ExecuteRemoteCode,
                               Op::RequestSignature,
                               Op::GenerateKey];

    /// Clave estable bajo la que se registra el output de la operación.
    pub fn key(&self) -> &'static str {
        match self {
            Op::ConnectToNetwork => "connect_to_network",
            Op::ConnectToContracts => "connect_to_contracts",
            Op::MintIdentity => "mint_identity",
            Op::GetIdentities => "get_identities",
            Op::MintQuotaToken => "mint_quota_token",
            Op::DelegateQuota => "delegate_quota",
            Op::GrantAuthMethod => "grant_auth_method",
            Op::GrantCodeReference => "grant_code_reference",
            Op::CreateAccessToken => "create_access_token",
            Op::ExecuteRemoteCode => "execute_remote_code",
            Op::RequestSignature => "request_signature",
            Op::GenerateKey => "generate_key",
        }
    }

    /// Etiqueta humana de la operación.
    pub fn label(&self) -> &'static str {
        match self {
            Op::ConnectToNetwork => "Network connection",
            Op::ConnectToContracts => "Contracts connection",
            Op::MintIdentity => "Mint identity token",
            Op::GetIdentities => "List identity tokens",
            Op::MintQuotaToken => "Mint quota token",
            Op::DelegateQuota => "Create quota delegation token",
            Op::GrantAuthMethod => "Grant auth method",
            Op::GrantCodeReference => "Grant code reference",
            Op::CreateAccessToken => "Create access token",
            Op::ExecuteRemoteCode => "Execute remote code",
            Op::RequestSignature => "Request signature",
            Op::GenerateKey => "Generate key",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
