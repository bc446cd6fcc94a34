//! Capacidades empaquetadas: rutinas remotas predefinidas invocables por id.
//!
//! Unión cerrada y discriminada: cada variante lleva sus parámetros con tipo
//! fuerte (nada de bolsas de parámetros dinámicas). Un id textual se resuelve
//! con `from_id`, que además reconoce el patrón de referencias de código.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::CoreError;
use crate::model::code::CodeRef;

/// Id estable de la rutina de generación de claves.
pub const GENERATE_KEY_ID: &str = "keys/generate";

/// Cadenas para las que la rutina de generación de claves sabe derivar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyChain {
    Evm,
    Solana,
}

impl KeyChain {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyChain::Evm => "evm",
            KeyChain::Solana => "solana",
        }
    }
}

/// Parámetros tipados de `keys/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateKeyParams {
    pub chain: KeyChain,
    pub memo: String,
}

/// Petición empaquetada: registro cerrado de rutinas conocidas, más la vía
/// de escape de ejecutar una referencia de código directamente.
#[derive(Debug, Clone)]
pub enum PackagedRequest {
    GenerateKey(GenerateKeyParams),
    CodeReference { reference: CodeRef, js_params: Value },
}

impl PackagedRequest {
    /// Resuelve un id textual a una petición tipada. Ids desconocidos que
    /// tampoco son referencias de código se rechazan.
    pub fn from_id(id: &str, params: Value) -> Result<Self, CoreError> {
        if id == GENERATE_KEY_ID {
            let parsed: GenerateKeyParams =
                serde_json::from_value(params).map_err(|e| CoreError::validation(format!("{GENERATE_KEY_ID}: {e}")))?;
            return Ok(PackagedRequest::GenerateKey(parsed));
        }
        if CodeRef::matches(id) {
            return Ok(PackagedRequest::CodeReference { reference: CodeRef::new(id)?,
                                                       js_params: params });
        }
        Err(CoreError::UnsupportedResource(id.to_string()))
    }
}
