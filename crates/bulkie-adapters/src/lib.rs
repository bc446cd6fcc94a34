//! bulkie-adapters: Colaboradores in-memory para el core de orquestación
//!
//! Este crate provee:
//! - `StaticSigner`: identidad firmante local con saldo simulado.
//! - `InMemoryContracts`: cliente de contratos con registro compartido entre
//!   conexiones (tokens secuenciales, grants consultables).
//! - `InMemoryNetwork`: red de nodos simulada con firmas deterministas
//!   verificables.
//!
//! Nada aquí toca red real: todo es determinista a partir de blake3, lo que
//! permite tests de flujo completos sin infraestructura.

pub mod contracts;
pub mod network;
pub mod signer;

pub use contracts::{InMemoryContracts, RecordedAuthGrant, RecordedCodeGrant};
pub use network::{verify_signature, InMemoryNetwork};
pub use signer::{derive_address, StaticSigner};
