//! Colaborador de red: sesión, ejecución remota y firma.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::config::NetworkId;
use crate::errors::CollaboratorError;
use crate::model::{AccessCredential, CodeSource, GeneratedKey, KeyChain, MintSessionRequest};

/// Fábrica de conexiones a la red de nodos.
#[async_trait]
pub trait NetworkClient: Send + Sync {
    async fn connect(&self, network: NetworkId, rpc_url: &str) -> Result<Arc<dyn NetworkHandle>, CollaboratorError>;
}

/// Conexión viva a la red. Todas las llamadas son opacas: el protocolo de
/// firma de sesión y la semántica del entorno de ejecución confiable quedan
/// del lado del colaborador.
#[async_trait]
pub trait NetworkHandle: Send + Sync {
    /// Mintea una credencial de sesión a partir de insumos ya validados.
    async fn mint_session_credential(&self, request: MintSessionRequest)
                                     -> Result<AccessCredential, CollaboratorError>;

    /// Ejecuta código (inline o por referencia) bajo una credencial.
    async fn execute_remote_code(&self,
                                 credential: &AccessCredential,
                                 code: &CodeSource,
                                 js_params: &Value)
                                 -> Result<Value, CollaboratorError>;

    /// Solicita la firma de un digest con la clave de la identidad dada.
    /// Devuelve la firma en hex.
    async fn request_signature(&self,
                               credential: &AccessCredential,
                               public_key: &str,
                               digest: &[u8])
                               -> Result<String, CollaboratorError>;

    /// Rutina empaquetada: genera una clave dentro del entorno remoto.
    async fn generate_key(&self,
                          credential: &AccessCredential,
                          chain: KeyChain,
                          memo: &str)
                          -> Result<GeneratedKey, CollaboratorError>;
}
