//! Operaciones de conexión: red de nodos y cliente de contratos.
//!
//! Ambas separan el resultado registrable (un resumen serializable) del
//! handle vivo, que queda en el `ExecutionContext` para las operaciones
//! posteriores.

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

use crate::deps::next_steps;
use crate::errors::CoreError;
use crate::model::{ContractsConnection, NetworkConnection, Op};

use super::Bulkie;

impl Bulkie {
    /// Conecta con la red de nodos y retiene el handle para las operaciones
    /// que lo requieren.
    pub async fn connect_to_network(&mut self, output_id: Option<&str>) -> Result<NetworkConnection, CoreError> {
        let op = Op::ConnectToNetwork;
        let rpc_url = self.require_rpc(op)?;
        let client = Arc::clone(&self.network_client);
        let network = self.ctx.network();

        let (record, handle) = self.run_step_with(op, output_id, next_steps(op), async move {
                                       let handle = client.connect(network, &rpc_url).await?;
                                       let record = NetworkConnection { network,
                                                                        rpc_url,
                                                                        connected_at: Utc::now() };
                                       Ok((record, handle))
                                   })
                                   .await?;

        self.ctx.network_handle = Some(handle);
        Ok(record)
    }

    /// Conecta con el cliente de contratos. Si hay firmante configurado, la
    /// conexión lo adjunta y el resumen incluye su dirección.
    pub async fn connect_to_contracts(&mut self, output_id: Option<&str>) -> Result<ContractsConnection, CoreError> {
        let op = Op::ConnectToContracts;
        let rpc_url = self.require_rpc(op)?;
        let client = Arc::clone(&self.contracts_client);
        let network = self.ctx.network();
        let signer = self.ctx.signer.clone();

        let (record, handle) = self.run_step_with(op, output_id, next_steps(op), async move {
                                       let signer_address = match &signer {
                                           Some(s) => {
                                               let address = s.address().await?;
                                               let balance = s.balance().await?;
                                               debug!(%address, balance, "signer attached to contracts client");
                                               Some(address)
                                           }
                                           None => None,
                                       };
                                       let handle = client.connect(network, &rpc_url, signer).await?;
                                       let record = ContractsConnection { network,
                                                                          rpc_url,
                                                                          signer_address,
                                                                          connected_at: Utc::now() };
                                       Ok((record, handle))
                                   })
                                   .await?;

        self.ctx.contracts_handle = Some(handle);
        Ok(record)
    }
}
