//! Minteo de access tokens: validaciones síncronas y flujo delegado.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;

use bulkie_adapters::{InMemoryContracts, InMemoryNetwork, StaticSigner};
use bulkie_core::{AccessCredential, AccessTokenRequest, Bulkie, CodeRef, CoreError, CredentialKind,
                  DelegateQuotaParams, NetworkId, Op, OrchestratorConfig, Requirement, ResourceGrant, ResourceKind};

fn orchestrator() -> Bulkie {
    let signer = Arc::new(StaticSigner::new("owner", 0));
    let config = OrchestratorConfig::new(NetworkId::Testnet);
    Bulkie::new(config, Arc::new(InMemoryNetwork::new()), Arc::new(InMemoryContracts::new()), Some(signer))
}

fn standalone_request() -> AccessTokenRequest {
    AccessTokenRequest { kind: CredentialKind::Standalone,
                         identity_public_key: "0xdeadbeef".into(),
                         grants: vec![ResourceGrant::wildcard(ResourceKind::Signing),
                                      ResourceGrant::wildcard(ResourceKind::CodeExecution)],
                         code: Some("(async () => {})()".into()),
                         code_ref: None,
                         js_params: json!({}),
                         delegation_token: None,
                         expiry: None }
}

#[tokio::test]
async fn standalone_token_is_minted_validated_and_recorded() {
    let mut bulkie = orchestrator();
    bulkie.connect_to_network(None).await.unwrap();

    let credential = bulkie.create_access_token(standalone_request(), None).await.unwrap();
    assert_eq!(credential.kind, CredentialKind::Standalone);
    // la clave pública viaja sin 0x
    assert_eq!(credential.identity_public_key, "deadbeef");
    assert_eq!(credential.abilities.len(), 2);
    assert!(credential.validate().is_ok());

    let recorded: AccessCredential = bulkie.get_output(None).unwrap().unwrap();
    assert_eq!(recorded.credential_id, credential.credential_id);
}

#[tokio::test]
async fn default_expiry_is_a_short_window() {
    let mut bulkie = orchestrator();
    bulkie.connect_to_network(None).await.unwrap();

    let before = Utc::now();
    let credential = bulkie.create_access_token(standalone_request(), None).await.unwrap();
    let ttl = credential.expires_at - before;
    assert!(ttl <= Duration::minutes(16));
    assert!(ttl >= Duration::minutes(14));
}

#[tokio::test]
async fn minting_without_network_connection_fails_the_precondition() {
    let mut bulkie = orchestrator();
    let err = bulkie.create_access_token(standalone_request(), None).await.unwrap_err();
    assert!(matches!(err,
                     CoreError::Precondition { op: Op::CreateAccessToken,
                                               requirement: Requirement::NetworkConnected }));
}

#[tokio::test]
async fn contradictory_requests_surface_as_plain_validation_errors() {
    let mut bulkie = orchestrator();
    bulkie.connect_to_network(None).await.unwrap();
    let before = bulkie.outputs().len();

    // código inline y referencia a la vez
    let mut both = standalone_request();
    both.code_ref = Some(CodeRef::derive_from_source("x"));
    assert!(matches!(bulkie.create_access_token(both, None).await, Err(CoreError::Validation(_))));

    // ninguna fuente de código
    let mut neither = standalone_request();
    neither.code = None;
    assert!(matches!(bulkie.create_access_token(neither, None).await, Err(CoreError::Validation(_))));

    // sin grants
    let mut no_grants = standalone_request();
    no_grants.grants.clear();
    assert!(matches!(bulkie.create_access_token(no_grants, None).await, Err(CoreError::Validation(_))));

    // delegado sin token de delegación
    let mut delegated = standalone_request();
    delegated.kind = CredentialKind::Delegated;
    assert!(matches!(bulkie.create_access_token(delegated, None).await, Err(CoreError::Validation(_))));

    // ninguno registró output
    assert_eq!(bulkie.outputs().len(), before);
}

#[tokio::test]
async fn delegated_token_carries_the_delegation() {
    let mut bulkie = orchestrator();
    bulkie.connect_to_network(None).await.unwrap();
    bulkie.connect_to_contracts(None).await.unwrap();

    let quota = bulkie.mint_quota_token(80, 30, None).await.unwrap();
    let delegation = bulkie.delegate_quota(DelegateQuotaParams { quota_token_id: quota.quota_token_id,
                                                                 expires_at: None,
                                                                 delegates: vec!["0xuser".into()] },
                                           None)
                           .await
                           .unwrap();

    let mut request = standalone_request();
    request.kind = CredentialKind::Delegated;
    request.delegation_token = Some(delegation.clone());

    let credential = bulkie.create_access_token(request, None).await.unwrap();
    assert_eq!(credential.kind, CredentialKind::Delegated);
    assert_eq!(credential.delegation, Some(delegation));
}

#[tokio::test]
async fn fingerprint_ignores_per_node_signatures() {
    let mut bulkie = orchestrator();
    bulkie.connect_to_network(None).await.unwrap();

    let expiry = Utc::now() + Duration::minutes(10);
    let mut request = standalone_request();
    request.expiry = Some(expiry);
    let a = bulkie.create_access_token(request.clone(), None).await.unwrap();
    let b = bulkie.create_access_token(request, None).await.unwrap();

    assert_ne!(a.credential_id, b.credential_id);
    assert_eq!(a.fingerprint(), b.fingerprint());
}
