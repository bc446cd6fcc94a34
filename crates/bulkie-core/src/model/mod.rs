//! Modelo del core: operaciones, outputs, grants, credenciales y contexto.

pub mod code;
pub mod context;
pub mod credential;
pub mod grants;
pub mod op;
pub mod outputs;
pub mod packaged;
pub mod records;

pub use code::{CodeRef, CodeSource, CODE_REF_PREFIX};
pub use context::ExecutionContext;
pub use credential::{AccessCredential, AccessTokenRequest, CredentialEntry, CredentialKind, MintSessionRequest};
pub use grants::{compose, Ability, AbilityRequest, AuthMethodScope, ResourceGrant, ResourceKind, ResourceLocator};
pub use op::Op;
pub use outputs::{OutputRecord, OutputSpec, OutputStore};
pub use packaged::{GenerateKeyParams, KeyChain, PackagedRequest, GENERATE_KEY_ID};
pub use records::{AuthMethodGrant, CodeReferenceGrant, ContractsConnection, DelegationToken, ExecutionOutput,
                  GeneratedKey, IdentitySummary, MintedIdentity, MintedQuota, NetworkConnection, OwnedIdentities,
                  SignableMessage, SignatureOutput, TokenId, TxReceipt};
