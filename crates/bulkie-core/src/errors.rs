//! Errores del núcleo de orquestación.
//!
//! Taxonomía:
//! - `Precondition`: falta un handle/colaborador requerido antes de ejecutar.
//! - `Validation`: parámetros estructuralmente inválidos o contradictorios.
//! - `UnsupportedResource`: kind de recurso o capability id desconocido.
//! - `InvalidCredential`: una credencial de acceso no pasa la validación
//!   estructural previa a su uso.
//! - `Step`: la acción de una operación falló; se envuelve con la etiqueta
//!   humana del paso preservando la causa original.
//!
//! Nada se reintenta dentro del core: todo fallo sube al caller inmediato.

use thiserror::Error;

use crate::model::Op;
use crate::preconditions::Requirement;

/// Fallo reportado por un colaborador externo (red, contratos, identidad
/// firmante). Los colaboradores son opacos; sólo conservamos la causa.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Un requisito previo no se cumple. Nunca se reintenta automáticamente.
    #[error("precondition not met for `{op}`: {requirement} is required")]
    Precondition { op: Op, requirement: Requirement },

    #[error("invalid parameters: {0}")]
    Validation(String),

    #[error("unsupported resource or capability: {0}")]
    UnsupportedResource(String),

    #[error("invalid access credential: {0}")]
    InvalidCredential(String),

    /// Llamada a un colaborador que falló; la envuelve `Step` con la etiqueta
    /// de la operación en curso.
    #[error("collaborator call failed: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Fallo de la acción de un paso, etiquetado con el nombre humano de la
    /// operación. La causa original queda encadenada vía `source`.
    #[error("{label} failed: {source}")]
    Step {
        label: String,
        #[source]
        source: Box<CoreError>,
    },

    #[error("internal: {0}")]
    Internal(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::Validation(msg.into())
    }

    pub fn invalid_credential(msg: impl Into<String>) -> Self {
        CoreError::InvalidCredential(msg.into())
    }

    /// Envuelve un fallo de acción con la etiqueta humana del paso.
    pub(crate) fn in_step(label: &str, source: CoreError) -> Self {
        CoreError::Step { label: label.to_string(),
                          source: Box::new(source) }
    }
}
