//! bulkie-core: Núcleo de orquestación por pasos
pub mod clients;
pub mod config;
pub mod constants;
pub mod deps;
pub mod errors;
pub mod guide;
pub mod hashing;
pub mod model;
pub mod orchestrator;
pub mod preconditions;

pub use config::{default_rpc_url, init_dotenv, NetworkId, OrchestratorConfig};
pub use deps::{dependencies_of, next_steps, NextStep};
pub use errors::{CollaboratorError, CoreError};
pub use guide::{ConsoleGuide, Guide, NoopGuide};
pub use model::{AccessCredential, AccessTokenRequest, Ability, AbilityRequest, AuthMethodGrant, AuthMethodScope,
                CodeRef, CodeReferenceGrant, CodeSource, ContractsConnection, CredentialEntry, CredentialKind,
                DelegationToken, ExecutionOutput, GeneratedKey, GenerateKeyParams, IdentitySummary, KeyChain,
                MintedIdentity, MintedQuota, MintSessionRequest, NetworkConnection, Op, OutputSpec, OutputStore,
                OwnedIdentities, PackagedRequest, ResourceGrant, ResourceKind, SignableMessage, SignatureOutput,
                TokenId, TxReceipt, GENERATE_KEY_ID};
pub use orchestrator::{Bulkie, DelegateQuotaParams, GrantAuthMethodParams, GrantCodeReferenceParams,
                       MintIdentityParams, PackagedOutput, UseContext};
pub use preconditions::{requirements_of, Requirement};
