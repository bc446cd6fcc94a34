//! Red de nodos simulada.
//!
//! Tres nodos ficticios firman las credenciales de sesión y las peticiones de
//! firma con blake3 determinista, de modo que un test pueda verificar una
//! firma recomputándola con `verify_signature`.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use bulkie_core::clients::{NetworkClient, NetworkHandle};
use bulkie_core::config::NetworkId;
use bulkie_core::errors::CollaboratorError;
use bulkie_core::model::{AccessCredential, CodeSource, CredentialEntry, GeneratedKey, KeyChain, MintSessionRequest};

use crate::signer::derive_address;

const NODE_URLS: [&str; 3] = ["https://node-a.example.org", "https://node-b.example.org", "https://node-c.example.org"];

fn node_signature(node: &str, message: &str) -> String {
    format!("0x{}", blake3::hash(format!("node-sig:{node}:{message}").as_bytes()).to_hex())
}

fn network_signature(public_key: &str, digest: &[u8]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(b"network-sign:");
    hasher.update(public_key.as_bytes());
    hasher.update(b":");
    hasher.update(digest);
    format!("0x{}", hasher.finalize().to_hex())
}

/// Recomputa la firma determinista de la red y la compara.
pub fn verify_signature(public_key: &str, digest: &[u8], signature: &str) -> bool {
    network_signature(public_key, digest) == signature
}

/// Fábrica de conexiones a la red simulada.
#[derive(Debug, Default, Clone, Copy)]
pub struct InMemoryNetwork;

impl InMemoryNetwork {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NetworkClient for InMemoryNetwork {
    async fn connect(&self, network: NetworkId, rpc_url: &str) -> Result<Arc<dyn NetworkHandle>, CollaboratorError> {
        Ok(Arc::new(InMemoryNetworkHandle { network,
                                            rpc_url: rpc_url.to_string() }))
    }
}

struct InMemoryNetworkHandle {
    network: NetworkId,
    rpc_url: String,
}

#[async_trait]
impl NetworkHandle for InMemoryNetworkHandle {
    async fn mint_session_credential(&self,
                                     request: MintSessionRequest)
                                     -> Result<AccessCredential, CollaboratorError> {
        let issued_at = Utc::now();
        let resources: Vec<String> = request.abilities.iter().map(|a| a.resource.uri()).collect();

        let mut entries = BTreeMap::new();
        for node in NODE_URLS {
            let signed_message = format!("session for {} on {} over [{}] until {}",
                                         request.identity_public_key,
                                         self.network,
                                         resources.join(","),
                                         request.expires_at.to_rfc3339());
            entries.insert(node.to_string(),
                           CredentialEntry { node: node.to_string(),
                                             signature: node_signature(node, &signed_message),
                                             signed_message,
                                             address: derive_address(node) });
        }

        Ok(AccessCredential { credential_id: Uuid::new_v4().to_string(),
                              kind: request.kind,
                              identity_public_key: request.identity_public_key,
                              abilities: request.abilities,
                              issued_at,
                              expires_at: request.expires_at,
                              delegation: request.delegation_token,
                              entries })
    }

    async fn execute_remote_code(&self,
                                 credential: &AccessCredential,
                                 code: &CodeSource,
                                 js_params: &Value)
                                 -> Result<Value, CollaboratorError> {
        let code_descriptor = match code {
            CodeSource::Inline(source) => json!({"inline": source.len()}),
            CodeSource::Reference(reference) => json!({"reference": reference.as_str()}),
        };
        Ok(json!({
            "ok": true,
            "rpc": self.rpc_url,
            "identity": credential.identity_public_key,
            "code": code_descriptor,
            "params": js_params,
        }))
    }

    async fn request_signature(&self,
                               credential: &AccessCredential,
                               public_key: &str,
                               digest: &[u8])
                               -> Result<String, CollaboratorError> {
        if digest.is_empty() {
            return Err("refusing to sign an empty digest".into());
        }
        let _ = credential; // la validación estructural ya ocurrió aguas arriba
        Ok(network_signature(public_key, digest))
    }

    async fn generate_key(&self,
                          credential: &AccessCredential,
                          chain: KeyChain,
                          memo: &str)
                          -> Result<GeneratedKey, CollaboratorError> {
        let seed = format!("generated-key:{}:{}:{memo}", credential.identity_public_key, chain.as_str());
        let generated_public_key = format!("0x{}", blake3::hash(seed.as_bytes()).to_hex());
        Ok(GeneratedKey { key_id: Uuid::new_v4().to_string(),
                          generated_public_key,
                          identity_address: derive_address(&credential.identity_public_key) })
    }
}
