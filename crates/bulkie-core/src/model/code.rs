//! Fuentes de código remoto: inline o por referencia de contenido.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::hashing;

/// Prefijo del patrón de referencias de código direccionadas por contenido.
pub const CODE_REF_PREFIX: &str = "Qm";

/// Referencia de código direccionada por contenido (patrón `Qm…`). El nodo
/// remoto resuelve la referencia; el core sólo valida su forma.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeRef(String);

impl CodeRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, CoreError> {
        let reference = reference.into();
        if !reference.starts_with(CODE_REF_PREFIX) || reference.len() <= CODE_REF_PREFIX.len() {
            return Err(CoreError::validation(format!("`{reference}` is not a valid code reference (expected `Qm…`)")));
        }
        Ok(Self(reference))
    }

    /// Deriva una referencia estable a partir del propio código fuente.
    pub fn derive_from_source(code: &str) -> Self {
        Self(format!("{CODE_REF_PREFIX}{}", &hashing::hash_str(code)[..44]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` si el string tiene la forma de una referencia de código.
    pub fn matches(candidate: &str) -> bool {
        candidate.starts_with(CODE_REF_PREFIX) && candidate.len() > CODE_REF_PREFIX.len()
    }
}

impl std::fmt::Display for CodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Qué código ejecutar remotamente: exactamente una de las dos formas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CodeSource {
    Inline(String),
    Reference(CodeRef),
}

impl CodeSource {
    /// Regla "exactamente uno": ambos presentes o ambos ausentes son
    /// parámetros contradictorios.
    pub fn resolve(code: Option<String>, reference: Option<CodeRef>) -> Result<Self, CoreError> {
        match (code, reference) {
            (Some(code), None) => Ok(CodeSource::Inline(code)),
            (None, Some(reference)) => Ok(CodeSource::Reference(reference)),
            (Some(_), Some(_)) => Err(CoreError::validation("provide inline code or a code reference, not both")),
            (None, None) => Err(CoreError::validation("either inline code or a code reference is required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_ref_pattern_is_enforced() {
        assert!(CodeRef::new("QmabcDEF123").is_ok());
        assert!(CodeRef::new("Qm").is_err());
        assert!(CodeRef::new("bafy-something").is_err());
    }

    #[test]
    fn derived_reference_is_stable_and_well_formed() {
        let a = CodeRef::derive_from_source("console.log('hi')");
        let b = CodeRef::derive_from_source("console.log('hi')");
        assert_eq!(a, b);
        assert!(CodeRef::matches(a.as_str()));
    }

    #[test]
    fn resolve_requires_exactly_one_source() {
        assert!(CodeSource::resolve(None, None).is_err());
        assert!(CodeSource::resolve(Some("x".into()), Some(CodeRef::derive_from_source("x"))).is_err());
        assert!(CodeSource::resolve(Some("x".into()), None).is_ok());
    }
}
