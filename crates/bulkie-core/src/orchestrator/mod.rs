//! Fachada de orquestación por pasos.
//!
//! `Bulkie` secuencia un conjunto cerrado de operaciones asíncronas contra
//! tres colaboradores opacos, registrando el output de cada operación bajo
//! una clave estable y haciendo cumplir las precondiciones antes de ejecutar.
//!
//! Contrato de concurrencia: una instancia tiene un único dueño lógico.
//! Todas las operaciones toman `&mut self`, así que el propio borrow checker
//! impide dos operaciones en vuelo sobre la misma instancia; no hay cola,
//! reintentos ni reordenamiento internos. Un future abandonado a mitad de
//! `await` puede dejar el contexto parcialmente actualizado (limitación
//! explícita, no garantía).

mod access_token;
mod connections;
mod minting;
mod runner;
mod use_context;

pub use minting::{DelegateQuotaParams, GrantAuthMethodParams, GrantCodeReferenceParams, MintIdentityParams};
pub use use_context::{PackagedOutput, UseContext};

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::clients::{ContractsClient, ContractsHandle, NetworkClient, NetworkHandle, SigningIdentity};
use crate::config::{NetworkId, OrchestratorConfig};
use crate::constants::CORE_VERSION;
use crate::errors::CoreError;
use crate::guide::{ConsoleGuide, Guide, NoopGuide};
use crate::model::{ExecutionContext, Op, OutputSpec, OutputStore};
use crate::preconditions::Requirement;

pub struct Bulkie {
    config: OrchestratorConfig,
    network_client: Arc<dyn NetworkClient>,
    contracts_client: Arc<dyn ContractsClient>,
    ctx: ExecutionContext,
    guide: Box<dyn Guide>,
    /// Acumulado de duración de pasos exitosos durante la vida de la
    /// instancia.
    total_execution: Duration,
}

impl Bulkie {
    /// Crea el orquestador. El firmante es opcional: las operaciones que lo
    /// exigen lo declaran como precondición.
    pub fn new(config: OrchestratorConfig,
               network_client: Arc<dyn NetworkClient>,
               contracts_client: Arc<dyn ContractsClient>,
               signer: Option<Arc<dyn SigningIdentity>>)
               -> Self {
        let rpc_url = config.resolved_rpc_url();
        debug!(core_version = CORE_VERSION, network = %config.network, "orchestrator created");
        let guide: Box<dyn Guide> = if config.guides { Box::new(ConsoleGuide) } else { Box::new(NoopGuide) };
        Self { ctx: ExecutionContext::new(config.network, rpc_url, signer),
               config,
               network_client,
               contracts_client,
               guide,
               total_execution: Duration::ZERO }
    }

    /// Sustituye el observador de guía.
    pub fn with_guide(mut self, guide: Box<dyn Guide>) -> Self {
        self.guide = guide;
        self
    }

    pub fn network(&self) -> NetworkId {
        self.ctx.network()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Registro de outputs (lectura).
    pub fn outputs(&self) -> &OutputStore {
        self.ctx.outputs()
    }

    /// Output tipado de la operación asociada a `T`, si ya se registró.
    pub fn get_output<T: OutputSpec>(&self, instance: Option<&str>) -> Result<Option<T>, CoreError> {
        self.ctx.outputs().get_as::<T>(instance)
    }

    /// Duración acumulada de todos los pasos exitosos.
    pub fn total_execution_time(&self) -> Duration {
        self.total_execution
    }

    pub fn network_handle(&self) -> Option<Arc<dyn NetworkHandle>> {
        self.ctx.network_handle.clone()
    }

    pub fn contracts_handle(&self) -> Option<Arc<dyn ContractsHandle>> {
        self.ctx.contracts_handle.clone()
    }

    pub fn signer(&self) -> Option<Arc<dyn SigningIdentity>> {
        self.ctx.signer.clone()
    }

    // ---- extracción de handles con error de precondición ----
    // Estas comprobaciones duplican la tabla de `preconditions` sólo en
    // apariencia: extraer el handle exige nombrar el requisito ausente con
    // el mismo error que emitiría la tabla.

    pub(crate) fn require_rpc(&self, op: Op) -> Result<String, CoreError> {
        self.ctx
            .rpc_url()
            .map(str::to_string)
            .ok_or(CoreError::Precondition { op,
                                             requirement: Requirement::NetworkConfigured })
    }

    pub(crate) fn require_network_handle(&self, op: Op) -> Result<Arc<dyn NetworkHandle>, CoreError> {
        self.ctx
            .network_handle
            .clone()
            .ok_or(CoreError::Precondition { op,
                                             requirement: Requirement::NetworkConnected })
    }

    pub(crate) fn require_contracts_handle(&self, op: Op) -> Result<Arc<dyn ContractsHandle>, CoreError> {
        self.ctx
            .contracts_handle
            .clone()
            .ok_or(CoreError::Precondition { op,
                                             requirement: Requirement::ContractsConnected })
    }

    pub(crate) fn require_signer(&self, op: Op) -> Result<Arc<dyn SigningIdentity>, CoreError> {
        self.ctx
            .signer
            .clone()
            .ok_or(CoreError::Precondition { op,
                                             requirement: Requirement::SignerPresent })
    }
}
