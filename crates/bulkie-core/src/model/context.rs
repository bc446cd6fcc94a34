//! Estado mutable del orquestador.
//!
//! Propiedad exclusiva de una instancia; no se comparte ni se arbitra
//! concurrencia: el contrato exige secuenciar las operaciones. Los handles
//! de conexión están ausentes hasta que la operación correspondiente los
//! establece.

use std::sync::Arc;

use crate::clients::{ContractsHandle, NetworkHandle, SigningIdentity};
use crate::config::NetworkId;
use crate::model::outputs::OutputStore;

pub struct ExecutionContext {
    pub(crate) network: NetworkId,
    /// RPC efectivo; `None` si la red no tiene default y no se configuró.
    pub(crate) rpc_url: Option<String>,
    pub(crate) network_handle: Option<Arc<dyn NetworkHandle>>,
    pub(crate) contracts_handle: Option<Arc<dyn ContractsHandle>>,
    pub(crate) signer: Option<Arc<dyn SigningIdentity>>,
    pub(crate) outputs: OutputStore,
}

impl ExecutionContext {
    pub(crate) fn new(network: NetworkId, rpc_url: Option<String>, signer: Option<Arc<dyn SigningIdentity>>) -> Self {
        Self { network,
               rpc_url,
               network_handle: None,
               contracts_handle: None,
               signer,
               outputs: OutputStore::new() }
    }

    pub fn network(&self) -> NetworkId {
        self.network
    }

    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref()
    }

    pub fn is_network_connected(&self) -> bool {
        self.network_handle.is_some()
    }

    pub fn is_contracts_connected(&self) -> bool {
        self.contracts_handle.is_some()
    }

    pub fn has_signer(&self) -> bool {
        self.signer.is_some()
    }

    pub fn outputs(&self) -> &OutputStore {
        &self.outputs
    }
}
