//! Comprobación de precondiciones previa a cada operación.
//!
//! Función total y explícita de operación a su conjunción de requisitos:
//! una tabla, no condicionales encadenados, para que ninguna guarda pueda
//! omitirse por accidente. Se evalúa de forma síncrona antes de cualquier
//! trabajo asíncrono, de modo que el fallo sea barato e inmediato y no deje
//! efectos colaterales (el `OutputStore` no se toca).

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::model::{ExecutionContext, Op};

/// Requisitos que una operación puede exigir.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// Hay red objetivo con RPC resuelto.
    NetworkConfigured,
    /// `ConnectToNetwork` ya estableció su handle.
    NetworkConnected,
    /// `ConnectToContracts` ya estableció su handle.
    ContractsConnected,
    /// Hay identidad firmante configurada.
    SignerPresent,
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Requirement::NetworkConfigured => "a configured network endpoint",
            Requirement::NetworkConnected => "an established network connection",
            Requirement::ContractsConnected => "an established contracts connection",
            Requirement::SignerPresent => "a signing identity",
        };
        f.write_str(s)
    }
}

/// Conjunción de requisitos de cada operación. Total: las operaciones sin
/// requisitos explícitos pasan trivialmente.
pub fn requirements_of(op: Op) -> &'static [Requirement] {
    match op {
        Op::ConnectToNetwork => &[Requirement::NetworkConfigured],
        Op::ConnectToContracts => &[Requirement::NetworkConfigured],
        Op::MintIdentity => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::GetIdentities => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::MintQuotaToken => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::DelegateQuota => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::GrantAuthMethod => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::GrantCodeReference => &[Requirement::ContractsConnected, Requirement::SignerPresent],
        Op::CreateAccessToken => &[Requirement::NetworkConnected],
        Op::ExecuteRemoteCode => &[Requirement::NetworkConnected],
        Op::RequestSignature => &[Requirement::NetworkConnected],
        Op::GenerateKey => &[Requirement::NetworkConnected],
    }
}

/// Devuelve error nombrando el primer requisito ausente, o pasa.
pub fn check(op: Op, ctx: &ExecutionContext) -> Result<(), CoreError> {
    for requirement in requirements_of(op) {
        let satisfied = match requirement {
            Requirement::NetworkConfigured => ctx.rpc_url().is_some(),
            Requirement::NetworkConnected => ctx.is_network_connected(),
            Requirement::ContractsConnected => ctx.is_contracts_connected(),
            Requirement::SignerPresent => ctx.has_signer(),
        };
        if !satisfied {
            return Err(CoreError::Precondition { op,
                                                 requirement: *requirement });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkId;

    fn bare_ctx() -> ExecutionContext {
        ExecutionContext::new(NetworkId::Testnet, Some("http://rpc".into()), None)
    }

    #[test]
    fn requirement_table_is_total() {
        for op in Op::ALL {
            let _ = requirements_of(op);
        }
    }

    #[test]
    fn connect_passes_with_configured_rpc_only() {
        assert!(check(Op::ConnectToNetwork, &bare_ctx()).is_ok());
    }

    #[test]
    fn missing_rpc_fails_network_configuration() {
        let ctx = ExecutionContext::new(NetworkId::Local, None, None);
        let err = check(Op::ConnectToNetwork, &ctx).unwrap_err();
        assert!(matches!(err,
                         CoreError::Precondition { requirement: Requirement::NetworkConfigured, .. }));
    }

    #[test]
    fn mint_identity_names_the_contracts_requirement_first() {
        let err = check(Op::MintIdentity, &bare_ctx()).unwrap_err();
        assert!(matches!(err,
                         CoreError::Precondition { op: Op::MintIdentity,
                                                   requirement: Requirement::ContractsConnected }));
    }

    #[test]
    fn access_token_requires_network_connection() {
        let err = check(Op::CreateAccessToken, &bare_ctx()).unwrap_err();
        assert!(matches!(err,
                         CoreError::Precondition { requirement: Requirement::NetworkConnected, .. }));
    }
}
