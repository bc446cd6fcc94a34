//! Escenarios de flujo completo contra colaboradores in-memory.

use std::sync::Arc;

use bulkie_adapters::{InMemoryContracts, InMemoryNetwork, StaticSigner};
use bulkie_core::clients::SigningIdentity;
use bulkie_core::{AuthMethodScope, Bulkie, CodeRef, ContractsConnection, CoreError, DelegateQuotaParams,
                  GrantAuthMethodParams, GrantCodeReferenceParams, MintIdentityParams, MintedIdentity, MintedQuota,
                  NetworkId, Op, OrchestratorConfig, OwnedIdentities, Requirement};

fn orchestrator_with(signer_balance: u128) -> (Bulkie, Arc<InMemoryContracts>, Arc<dyn SigningIdentity>) {
    let contracts = Arc::new(InMemoryContracts::new());
    let signer: Arc<dyn SigningIdentity> = Arc::new(StaticSigner::new("owner", signer_balance));
    let config = OrchestratorConfig::new(NetworkId::Local).with_rpc_url("http://127.0.0.1:8545");
    let bulkie = Bulkie::new(config,
                             Arc::new(InMemoryNetwork::new()),
                             Arc::clone(&contracts) as Arc<dyn bulkie_core::clients::ContractsClient>,
                             Some(Arc::clone(&signer)));
    (bulkie, contracts, signer)
}

#[tokio::test]
async fn happy_path_records_every_output_under_its_key() {
    let (mut bulkie, contracts, signer) = orchestrator_with(10_000_000_000_000_000);

    bulkie.connect_to_network(None).await.unwrap();
    bulkie.connect_to_contracts(None).await.unwrap();

    let minted = bulkie.mint_identity(MintIdentityParams::default(), None).await.unwrap();
    assert_eq!(minted.token_id.decimal, "1");

    let owned = bulkie.get_identities(None).await.unwrap();
    assert_eq!(owned.identities.len(), 1);
    assert_eq!(owned.identities[0].public_key, minted.public_key);

    bulkie.grant_auth_method(GrantAuthMethodParams { token_id: minted.token_id.clone(),
                                                     method_id: "app:google".into(),
                                                     method_type: 6,
                                                     scopes: vec![AuthMethodScope::SignAnything] },
                             None)
          .await
          .unwrap();
    bulkie.grant_code_reference(GrantCodeReferenceParams { token_id: minted.token_id.clone(),
                                                           code_ref: CodeRef::derive_from_source("console.log(1)"),
                                                           scopes: vec![AuthMethodScope::SignAnything] },
                                None)
          .await
          .unwrap();

    let quota = bulkie.mint_quota_token(80, 30, None).await.unwrap();
    let owner = signer.address().await.unwrap();
    bulkie.delegate_quota(DelegateQuotaParams { quota_token_id: quota.quota_token_id.clone(),
                                                expires_at: None,
                                                delegates: vec![owner] },
                          None)
          .await
          .unwrap();

    // Cada operación dejó su output bajo su clave.
    for op in [Op::ConnectToNetwork,
               Op::ConnectToContracts,
               Op::MintIdentity,
               Op::GetIdentities,
               Op::GrantAuthMethod,
               Op::GrantCodeReference,
               Op::MintQuotaToken,
               Op::DelegateQuota]
    {
        assert!(bulkie.outputs().contains(op.key(), None), "missing output for {op}");
    }

    // Y el acceso tipado decodifica lo registrado.
    let typed: MintedIdentity = bulkie.get_output(None).unwrap().unwrap();
    assert_eq!(typed, minted);
    let typed_quota: MintedQuota = bulkie.get_output(None).unwrap().unwrap();
    assert_eq!(typed_quota, quota);
    let typed_owned: OwnedIdentities = bulkie.get_output(None).unwrap().unwrap();
    assert_eq!(typed_owned.identities.len(), 1);

    // Los grants quedaron en el registro del colaborador.
    assert_eq!(contracts.auth_grants().len(), 1);
    assert_eq!(contracts.code_grants().len(), 1);
}

#[tokio::test]
async fn self_funding_debits_the_signer() {
    let (mut bulkie, _contracts, signer) = orchestrator_with(1_000);

    bulkie.connect_to_contracts(None).await.unwrap();
    bulkie.mint_identity(MintIdentityParams { self_fund: true,
                                              funding_amount: Some(600) },
                         None)
          .await
          .unwrap();

    assert_eq!(signer.balance().await.unwrap(), 400);
}

#[tokio::test]
async fn self_funding_failure_is_wrapped_with_the_step_label() {
    let (mut bulkie, _contracts, _signer) = orchestrator_with(10);

    bulkie.connect_to_contracts(None).await.unwrap();
    let err = bulkie.mint_identity(MintIdentityParams { self_fund: true,
                                                        funding_amount: Some(600) },
                                   None)
                    .await
                    .unwrap_err();

    match err {
        CoreError::Step { label, source } => {
            assert_eq!(label, "Mint identity token");
            assert!(matches!(*source, CoreError::Collaborator(_)));
        }
        other => panic!("expected Step, got {other}"),
    }
    // El fallo no registró nada.
    assert!(!bulkie.outputs().contains(Op::MintIdentity.key(), None));
}

#[tokio::test]
async fn operations_before_connecting_fail_the_precondition() {
    let (mut bulkie, _contracts, _signer) = orchestrator_with(0);

    let err = bulkie.mint_identity(MintIdentityParams::default(), None).await.unwrap_err();
    assert!(matches!(err,
                     CoreError::Precondition { op: Op::MintIdentity,
                                               requirement: Requirement::ContractsConnected }));
    assert!(bulkie.outputs().is_empty());
}

#[tokio::test]
async fn signerless_instance_cannot_mint() {
    let config = OrchestratorConfig::new(NetworkId::Testnet);
    let mut bulkie = Bulkie::new(config, Arc::new(InMemoryNetwork::new()), Arc::new(InMemoryContracts::new()), None);

    bulkie.connect_to_contracts(None).await.unwrap();
    let err = bulkie.mint_identity(MintIdentityParams::default(), None).await.unwrap_err();
    assert!(matches!(err, CoreError::Precondition { requirement: Requirement::SignerPresent, .. }));
}

#[tokio::test]
async fn local_network_without_rpc_cannot_connect() {
    let config = OrchestratorConfig::new(NetworkId::Local);
    let mut bulkie = Bulkie::new(config, Arc::new(InMemoryNetwork::new()), Arc::new(InMemoryContracts::new()), None);

    let err = bulkie.connect_to_network(None).await.unwrap_err();
    assert!(matches!(err, CoreError::Precondition { requirement: Requirement::NetworkConfigured, .. }));
}

#[tokio::test]
async fn zero_quota_parameters_are_rejected_before_running() {
    let (mut bulkie, _contracts, _signer) = orchestrator_with(0);
    bulkie.connect_to_contracts(None).await.unwrap();

    let before = bulkie.outputs().len();
    assert!(matches!(bulkie.mint_quota_token(0, 30, None).await, Err(CoreError::Validation(_))));
    assert!(matches!(bulkie.mint_quota_token(80, 0, None).await, Err(CoreError::Validation(_))));
    assert_eq!(bulkie.outputs().len(), before);
}

#[tokio::test]
async fn repeated_operations_coexist_under_output_ids() {
    let (mut bulkie, _contracts, _signer) = orchestrator_with(0);
    bulkie.connect_to_contracts(None).await.unwrap();

    let first = bulkie.mint_identity(MintIdentityParams::default(), Some("primary")).await.unwrap();
    let second = bulkie.mint_identity(MintIdentityParams::default(), Some("backup")).await.unwrap();
    assert_eq!(first.token_id.decimal, "1");
    assert_eq!(second.token_id.decimal, "2");

    // Ambas instancias conviven; la clave pelada queda libre.
    let primary: MintedIdentity = bulkie.get_output(Some("primary")).unwrap().unwrap();
    let backup: MintedIdentity = bulkie.get_output(Some("backup")).unwrap().unwrap();
    assert_eq!(primary, first);
    assert_eq!(backup, second);
    assert!(bulkie.get_output::<MintedIdentity>(None).unwrap().is_none());

    // Sin discriminador, la última escritura gana.
    bulkie.mint_quota_token(80, 30, None).await.unwrap();
    bulkie.mint_quota_token(40, 30, None).await.unwrap();
    let quota: MintedQuota = bulkie.get_output(None).unwrap().unwrap();
    assert!(quota.quota_token_id.contains("40rps"));
}

#[tokio::test]
async fn contracts_connection_summary_names_the_signer() {
    let (mut bulkie, _contracts, signer) = orchestrator_with(0);
    bulkie.connect_to_contracts(None).await.unwrap();

    let record: ContractsConnection = bulkie.get_output(None).unwrap().unwrap();
    assert_eq!(record.signer_address, Some(signer.address().await.unwrap()));
    assert_eq!(record.rpc_url, "http://127.0.0.1:8545");
}
