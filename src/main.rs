//! Demo de flujo completo: conexión, minteo, permisos, access token y uso.

use std::sync::Arc;

use serde_json::json;

use bulkie_adapters::{InMemoryContracts, InMemoryNetwork, StaticSigner};
use bulkie_core::clients::{ContractsClient, NetworkClient, SigningIdentity};
use bulkie_core::{AccessTokenRequest, AuthMethodScope, Bulkie, CodeRef, CredentialKind, DelegateQuotaParams,
                  GenerateKeyParams, GrantAuthMethodParams, GrantCodeReferenceParams, KeyChain, MintIdentityParams,
                  NetworkId, OrchestratorConfig, PackagedRequest, ResourceGrant, ResourceKind, SignableMessage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                             .init();

    println!("=== bulkie demo: flujo completo contra colaboradores in-memory ===\n");

    let network: Arc<dyn NetworkClient> = Arc::new(InMemoryNetwork::new());
    let contracts: Arc<dyn ContractsClient> = Arc::new(InMemoryContracts::new());
    let signer: Arc<dyn SigningIdentity> = Arc::new(StaticSigner::new("demo-owner", 10_000_000_000_000_000));

    let config = OrchestratorConfig::new(NetworkId::Testnet).with_guides(true);
    let mut bulkie = Bulkie::new(config, network, contracts, Some(signer));

    // 1. Conexiones
    bulkie.connect_to_network(None).await?;
    bulkie.connect_to_contracts(None).await?;

    // 2. Identidad con auto-fondeo
    let minted = bulkie.mint_identity(MintIdentityParams { self_fund: true,
                                                           funding_amount: None },
                                      None)
                       .await?;
    println!("identity token {} at {}", minted.token_id.decimal, minted.address);

    // 3. Permisos sobre la identidad
    bulkie.grant_auth_method(GrantAuthMethodParams { token_id: minted.token_id.clone(),
                                                     method_id: "app:demo".into(),
                                                     method_type: 6,
                                                     scopes: vec![AuthMethodScope::SignAnything] },
                             None)
          .await?;
    bulkie.grant_code_reference(GrantCodeReferenceParams { token_id: minted.token_id.clone(),
                                                           code_ref: CodeRef::derive_from_source("console.log(1)"),
                                                           scopes: vec![AuthMethodScope::SignAnything] },
                                None)
          .await?;

    // 4. Cuota y delegación
    let quota = bulkie.mint_quota_token(80, 30, None).await?;
    let delegation = bulkie.delegate_quota(DelegateQuotaParams { quota_token_id: quota.quota_token_id,
                                                                 expires_at: None,
                                                                 delegates: vec![minted.address.clone()] },
                                           None)
                           .await?;

    // 5. Access token delegado
    let request = AccessTokenRequest { kind: CredentialKind::Delegated,
                                       identity_public_key: minted.public_key.clone(),
                                       grants: vec![ResourceGrant::wildcard(ResourceKind::Signing),
                                                    ResourceGrant::wildcard(ResourceKind::CodeExecution)],
                                       code: Some("(async () => {})()".into()),
                                       code_ref: None,
                                       js_params: json!({}),
                                       delegation_token: Some(delegation),
                                       expiry: None };
    let credential = bulkie.create_access_token(request, None).await?;
    println!("{}", credential.summary());

    // 6. Uso de la credencial
    let mut ctx = bulkie.use_credential(credential)?;
    let exec = ctx.execute_code(Some("console.log('hola')".into()), None, json!({"n": 1}), None)
                  .await?;
    println!("execution response: {}", exec.response);

    let signed = ctx.request_signature(SignableMessage::text("hola bulkie"), None, None).await?;
    println!("signature over sha256 {}: {}…", signed.digest, &signed.signature[..18]);

    let generated = ctx.run_packaged(PackagedRequest::GenerateKey(GenerateKeyParams { chain: KeyChain::Evm,
                                                                                      memo: "demo-wallet".into() }),
                                     Some("evm"))
                       .await?;
    println!("packaged output: {generated:?}");

    tracing::info!(outputs = bulkie.outputs().len(), "demo flow finished");
    println!("\noutputs registrados: {}", bulkie.outputs().len());
    println!("tiempo total de pasos: {}ms", bulkie.total_execution_time().as_millis());
    Ok(())
}
