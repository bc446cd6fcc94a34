//! Registro de outputs por operación.
//!
//! Mapa de `(clave de operación, discriminador de instancia opcional)` a un
//! resultado JSON neutral. Reglas:
//! - sólo el runner escribe, y únicamente al completar con éxito;
//! - la última escritura exitosa gana (no se conserva historial);
//! - leer una clave ausente devuelve `None`, nunca un error;
//! - instancias distintas de la misma operación conviven bajo claves
//!   compuestas `clave:instancia`.
//!
//! El acceso tipado (`get_as`) replica el patrón de artifacts tipados del
//! resto del workspace: cada tipo de resultado declara la operación que lo
//! produce y se decodifica vía serde.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::model::Op;

/// Resultado registrado de una operación completada.
#[derive(Debug, Clone)]
pub struct OutputRecord {
    pub payload: Value,
    /// Metadato; no participa en ninguna identidad de contenido.
    pub recorded_at: DateTime<Utc>,
}

/// Especificación de un output tipado: asocia el tipo concreto con la
/// operación que lo produce (mapeo identificador → tipo en compilación).
pub trait OutputSpec: Serialize + DeserializeOwned {
    const OP: Op;
}

#[derive(Debug, Default)]
pub struct OutputStore {
    inner: HashMap<String, OutputRecord>,
}

impl OutputStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clave efectiva: `clave` o `clave:instancia`.
    fn compose_key(key: &str, instance: Option<&str>) -> String {
        match instance {
            Some(id) => format!("{key}:{id}"),
            None => key.to_string(),
        }
    }

    /// Registra (o sobreescribe) el output bajo la clave compuesta.
    pub fn set(&mut self, key: &str, payload: Value, instance: Option<&str>) {
        self.inner.insert(Self::compose_key(key, instance),
                          OutputRecord { payload,
                                         recorded_at: Utc::now() });
    }

    pub fn get(&self, key: &str, instance: Option<&str>) -> Option<&OutputRecord> {
        self.inner.get(&Self::compose_key(key, instance))
    }

    pub fn get_value(&self, key: &str, instance: Option<&str>) -> Option<&Value> {
        self.get(key, instance).map(|r| &r.payload)
    }

    /// Decodifica el output de `T::OP` (si existe) al tipo fuerte `T`.
    pub fn get_as<T: OutputSpec>(&self, instance: Option<&str>) -> Result<Option<T>, CoreError> {
        match self.get_value(T::OP.key(), instance) {
            None => Ok(None),
            Some(value) => {
                let decoded = serde_json::from_value(value.clone())
                    .map_err(|e| CoreError::Internal(format!("output decode for `{}`: {e}", T::OP)))?;
                Ok(Some(decoded))
            }
        }
    }

    pub fn contains(&self, key: &str, instance: Option<&str>) -> bool {
        self.inner.contains_key(&Self::compose_key(key, instance))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Claves registradas (orden no determinista).
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}
