//! Configuración del orquestador.
//!
//! Una instancia se construye con la red objetivo y, opcionalmente, un RPC
//! propio; si no se indica se resuelve contra la tabla de RPCs por defecto.
//! `from_env` sigue la convención del resto del workspace: carga perezosa de
//! `.env` una sola vez y lectura de variables `BULKIE_*`.

use std::env;
use std::str::FromStr;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Redes soportadas por el orquestador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    Mainnet,
    Testnet,
    /// Nodo local; no tiene RPC por defecto, hay que proveerlo.
    Local,
}

impl NetworkId {
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Mainnet => "mainnet",
            NetworkId::Testnet => "testnet",
            NetworkId::Local => "local",
        }
    }
}

impl std::fmt::Display for NetworkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(NetworkId::Mainnet),
            "testnet" => Ok(NetworkId::Testnet),
            "local" => Ok(NetworkId::Local),
            other => Err(CoreError::validation(format!("unknown network `{other}`"))),
        }
    }
}

/// RPC por defecto de cada red. `Local` obliga a configurarlo a mano.
pub fn default_rpc_url(network: NetworkId) -> Option<&'static str> {
    match network {
        NetworkId::Mainnet => Some("https://rpc.mainnet.example.org"),
        NetworkId::Testnet => Some("https://rpc.testnet.example.org"),
        NetworkId::Local => None,
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub network: NetworkId,
    /// RPC explícito; si es `None` se usa el de la tabla por red.
    pub rpc_url: Option<String>,
    /// Activa la guía "what can I do next" por el observador inyectado.
    pub guides: bool,
}

impl OrchestratorConfig {
    pub fn new(network: NetworkId) -> Self {
        Self { network,
               rpc_url: None,
               guides: false }
    }

    pub fn with_rpc_url(mut self, rpc_url: impl Into<String>) -> Self {
        self.rpc_url = Some(rpc_url.into());
        self
    }

    pub fn with_guides(mut self, guides: bool) -> Self {
        self.guides = guides;
        self
    }

    /// RPC efectivo: el explícito o el por defecto de la red.
    pub fn resolved_rpc_url(&self) -> Option<String> {
        self.rpc_url
            .clone()
            .or_else(|| default_rpc_url(self.network).map(str::to_string))
    }

    /// Lee `BULKIE_NETWORK` (obligatoria) y `BULKIE_RPC_URL` / `BULKIE_GUIDES`
    /// (opcionales) del entorno.
    pub fn from_env() -> Result<Self, CoreError> {
        Lazy::force(&DOTENV_LOADED);
        let network = env::var("BULKIE_NETWORK").map_err(|_| CoreError::validation("BULKIE_NETWORK is not set"))?
                                                .parse::<NetworkId>()?;
        let rpc_url = env::var("BULKIE_RPC_URL").ok();
        let guides = env::var("BULKIE_GUIDES").map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                                              .unwrap_or(false);
        Ok(Self { network, rpc_url, guides })
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
