//! Contexto de uso de una credencial de acceso.
//!
//! `use_credential` valida la credencial una sola vez y devuelve una vista
//! mutable acotada sobre el orquestador; las operaciones del contexto pasan
//! por el mismo runner que el resto (precondiciones, timing, registro).

use serde_json::Value;

use crate::deps::next_steps;
use crate::errors::CoreError;
use crate::hashing;
use crate::model::{AccessCredential, CodeRef, CodeSource, ExecutionOutput, GeneratedKey, Op, PackagedRequest,
                   SignableMessage, SignatureOutput};

use super::Bulkie;

/// Resultado de una petición empaquetada.
#[derive(Debug, Clone)]
pub enum PackagedOutput {
    Key(GeneratedKey),
    Execution(ExecutionOutput),
}

pub struct UseContext<'a> {
    orchestrator: &'a mut Bulkie,
    credential: AccessCredential,
}

impl Bulkie {
    /// Abre un contexto de uso sobre una credencial. La validación
    /// estructural ocurre aquí; una credencial vencida o hueca no llega a
    /// ninguna operación.
    pub fn use_credential(&mut self, credential: AccessCredential) -> Result<UseContext<'_>, CoreError> {
        credential.validate()?;
        Ok(UseContext { orchestrator: self,
                        credential })
    }
}

impl UseContext<'_> {
    pub fn credential(&self) -> &AccessCredential {
        &self.credential
    }

    /// Ejecuta una rutina empaquetada bajo la credencial. El discriminador
    /// de instancia separa invocaciones que deben convivir en el registro.
    pub async fn run_packaged(&mut self,
                              request: PackagedRequest,
                              instance: Option<&str>)
                              -> Result<PackagedOutput, CoreError> {
        match request {
            PackagedRequest::GenerateKey(params) => {
                let op = Op::GenerateKey;
                let network = self.orchestrator.require_network_handle(op)?;
                let credential = self.credential.clone();

                let key = self.orchestrator
                              .run_step(op, instance, next_steps(op), async move {
                                  let key = network.generate_key(&credential, params.chain, &params.memo).await?;
                                  Ok(key)
                              })
                              .await?;
                Ok(PackagedOutput::Key(key))
            }
            PackagedRequest::CodeReference { reference, js_params } => {
                let output = self.execute_code(None, Some(reference), js_params, instance).await?;
                Ok(PackagedOutput::Execution(output))
            }
        }
    }

    /// Ejecuta código remoto (inline o por referencia, exactamente uno).
    pub async fn execute_code(&mut self,
                              code: Option<String>,
                              code_ref: Option<CodeRef>,
                              js_params: Value,
                              instance: Option<&str>)
                              -> Result<ExecutionOutput, CoreError> {
        let op = Op::ExecuteRemoteCode;
        let source = CodeSource::resolve(code, code_ref)?;
        let network = self.orchestrator.require_network_handle(op)?;
        let credential = self.credential.clone();

        self.orchestrator
            .run_step(op, instance, next_steps(op), async move {
                let response = network.execute_remote_code(&credential, &source, &js_params).await?;
                Ok(ExecutionOutput { response })
            })
            .await
    }

    /// Solicita la firma de un mensaje con la identidad de la credencial (o
    /// una clave pública explícita). Los textos se reducen a digest SHA-256
    /// antes de someterse.
    pub async fn request_signature(&mut self,
                                   message: SignableMessage,
                                   public_key: Option<String>,
                                   instance: Option<&str>)
                                   -> Result<SignatureOutput, CoreError> {
        let op = Op::RequestSignature;
        let network = self.orchestrator.require_network_handle(op)?;
        let credential = self.credential.clone();
        let public_key = public_key.unwrap_or_else(|| credential.identity_public_key.clone());
        let digest = message.digest();

        self.orchestrator
            .run_step(op, instance, next_steps(op), async move {
                let signature = network.request_signature(&credential, &public_key, &digest).await?;
                Ok(SignatureOutput { signature,
                                     digest: hashing::to_hex(&digest),
                                     public_key })
            })
            .await
    }
}
