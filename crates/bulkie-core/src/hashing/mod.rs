//! Helpers de hashing – abstracción para poder cambiar de algoritmo sin tocar
//! el resto del core.
//!
//! - `blake3` para identidades de contenido internas (fingerprints de
//!   credenciales, referencias de código derivadas).
//! - SHA-256 para el digest de mensajes textuales previo a la firma remota
//!   (es el digest que el protocolo de firma espera).

mod canonical_json;

pub use canonical_json::to_canonical_json;

use blake3::Hasher;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Hashea un string con blake3 y devuelve hex.
pub fn hash_str(input: &str) -> String {
    let mut h = Hasher::new();
    h.update(input.as_bytes());
    h.finalize().to_hex().to_string()
}

/// Hashea un `Value` JSON sobre su forma canónica (claves ordenadas).
pub fn hash_value(value: &Value) -> String {
    hash_str(&to_canonical_json(value))
}

/// Digest SHA-256 de un texto. Se usa antes de someter un mensaje textual a
/// firma remota; los payloads binarios se envían tal cual.
pub fn sha256_digest(text: &str) -> Vec<u8> {
    Sha256::digest(text.as_bytes()).to_vec()
}

/// Hex minúscula de un slice de bytes.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
