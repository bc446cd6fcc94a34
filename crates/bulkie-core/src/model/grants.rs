//! Declaración de recursos y composición de abilities.
//!
//! Un `ResourceGrant` es la tupla declarativa `(kind, scope)` que el caller
//! entrega; `compose` la traduce a las peticiones de ability concretas que el
//! minteo de credenciales exige. El kind es una enumeración cerrada: los
//! valores desconocidos sólo pueden aparecer al parsear desde texto y se
//! rechazan con `UnsupportedResource`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::CoreError;

/// Kinds de capacidad soportados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Signing,
    CodeExecution,
    Decryption,
    RateLimitDelegation,
    AccessConditionSigning,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Signing => "signing",
            ResourceKind::CodeExecution => "code-execution",
            ResourceKind::Decryption => "decryption",
            ResourceKind::RateLimitDelegation => "rate-limit-delegation",
            ResourceKind::AccessConditionSigning => "access-condition-signing",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signing" => Ok(ResourceKind::Signing),
            "code-execution" => Ok(ResourceKind::CodeExecution),
            "decryption" => Ok(ResourceKind::Decryption),
            "rate-limit-delegation" => Ok(ResourceKind::RateLimitDelegation),
            "access-condition-signing" => Ok(ResourceKind::AccessConditionSigning),
            other => Err(CoreError::UnsupportedResource(other.to_string())),
        }
    }
}

/// Grant declarativo e inmutable: kind + expresión de alcance (`*` o un
/// recurso concreto). Sólo se consume como input del minteo de credenciales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceGrant {
    pub kind: ResourceKind,
    pub scope: String,
}

impl ResourceGrant {
    pub fn new(kind: ResourceKind, scope: impl Into<String>) -> Self {
        Self { kind, scope: scope.into() }
    }

    /// Grant con alcance total para el kind dado.
    pub fn wildcard(kind: ResourceKind) -> Self {
        Self::new(kind, "*")
    }
}

/// Ability concreta que la red entiende.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ability {
    IdentitySigning,
    CodeExecution,
    AccessConditionDecryption,
    AccessConditionSigning,
    RateLimitDelegation,
}

/// Localizador del recurso sobre el que aplica una ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocator {
    pub prefix: String,
    pub path: String,
}

impl ResourceLocator {
    fn new(prefix: &str, path: &str) -> Self {
        Self { prefix: prefix.to_string(),
               path: path.to_string() }
    }

    pub fn uri(&self) -> String {
        format!("{}://{}", self.prefix, self.path)
    }
}

/// Petición de ability concreta: lo que realmente viaja al minteo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRequest {
    pub ability: Ability,
    pub resource: ResourceLocator,
}

/// Traduce la lista declarativa de grants a abilities concretas. La expresión
/// de alcance se adjunta sin modificar. Lista vacía es un error de
/// validación: una credencial sin capacidades no autoriza nada.
pub fn compose(grants: &[ResourceGrant]) -> Result<Vec<AbilityRequest>, CoreError> {
    if grants.is_empty() {
        return Err(CoreError::validation("at least one resource grant is required"));
    }

    Ok(grants.iter()
             .map(|g| match g.kind {
                 ResourceKind::Signing => AbilityRequest { ability: Ability::IdentitySigning,
                                                           resource: ResourceLocator::new("identity", &g.scope) },
                 ResourceKind::CodeExecution => AbilityRequest { ability: Ability::CodeExecution,
                                                                 resource: ResourceLocator::new("code", &g.scope) },
                 ResourceKind::Decryption => {
                     AbilityRequest { ability: Ability::AccessConditionDecryption,
                                      resource: ResourceLocator::new("access-condition", &g.scope) }
                 }
                 ResourceKind::AccessConditionSigning => {
                     AbilityRequest { ability: Ability::AccessConditionSigning,
                                      resource: ResourceLocator::new("access-condition", &g.scope) }
                 }
                 ResourceKind::RateLimitDelegation => AbilityRequest { ability: Ability::RateLimitDelegation,
                                                                       resource: ResourceLocator::new("quota", &g.scope) },
             })
             .collect())
}

/// Alcances de un auth method al concederlo sobre una identidad.
/// El mapeo numérico es parte del contrato on-chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethodScope {
    NoPermission,
    SignAnything,
    PersonalSign,
}

impl AuthMethodScope {
    pub fn as_u8(&self) -> u8 {
        match self {
            AuthMethodScope::NoPermission => 0,
            AuthMethodScope::SignAnything => 1,
            AuthMethodScope::PersonalSign => 2,
        }
    }
}
