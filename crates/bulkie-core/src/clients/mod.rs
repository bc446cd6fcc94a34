//! Interfaces de los colaboradores externos.
//!
//! El core nunca habla un protocolo de bajo nivel: consume estas tres
//! interfaces estrechas y opacas. Cada una es usada por exactamente un grupo
//! de operaciones:
//! - `NetworkClient`/`NetworkHandle`: emisión de credenciales de sesión,
//!   ejecución remota de código y firma.
//! - `ContractsClient`/`ContractsHandle`: minteo de tokens on-chain y
//!   concesión de permisos.
//! - `SigningIdentity`: identidad firmante local (address, saldo, envío de
//!   valor, firma de mensajes).

mod contracts;
mod network;
mod signer;

pub use contracts::{ContractsClient, ContractsHandle};
pub use network::{NetworkClient, NetworkHandle};
pub use signer::SigningIdentity;
