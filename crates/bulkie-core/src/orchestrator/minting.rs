//! Operaciones contra el cliente de contratos: minteo de identidades y
//! cuotas, delegación y concesión de permisos.
//!
//! Todas aceptan un `output_id` opcional: el discriminador de instancia bajo
//! el que se registra el output, para que invocaciones repetidas de la misma
//! operación convivan en el registro en vez de sobreescribirse.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::constants::DEFAULT_FUNDING_AMOUNT;
use crate::deps::{mint_identity_next_steps, next_steps};
use crate::errors::CoreError;
use crate::model::{AuthMethodGrant, AuthMethodScope, CodeRef, CodeReferenceGrant, DelegationToken, MintedIdentity,
                   MintedQuota, Op, OwnedIdentities, TokenId};

use super::Bulkie;

/// Parámetros de `mint_identity`.
#[derive(Debug, Clone, Default)]
pub struct MintIdentityParams {
    /// Transfiere fondos del firmante a la identidad recién minteada, para
    /// que pueda pagar sus propias transacciones.
    pub self_fund: bool,
    /// Monto a transferir si `self_fund`; si falta se aplica el default.
    pub funding_amount: Option<u128>,
}

/// Parámetros de `delegate_quota`.
#[derive(Debug, Clone)]
pub struct DelegateQuotaParams {
    pub quota_token_id: String,
    /// Si falta, el colaborador aplica su vigencia por defecto.
    pub expires_at: Option<DateTime<Utc>>,
    /// Direcciones autorizadas a consumir la cuota.
    pub delegates: Vec<String>,
}

/// Parámetros de `grant_auth_method`.
#[derive(Debug, Clone)]
pub struct GrantAuthMethodParams {
    pub token_id: TokenId,
    pub method_id: String,
    pub method_type: u32,
    pub scopes: Vec<AuthMethodScope>,
}

/// Parámetros de `grant_code_reference`.
#[derive(Debug, Clone)]
pub struct GrantCodeReferenceParams {
    pub token_id: TokenId,
    pub code_ref: CodeRef,
    pub scopes: Vec<AuthMethodScope>,
}

impl Bulkie {
    /// Mintea una identidad on-chain. Con `self_fund` además transfiere
    /// fondos del firmante a la dirección de la identidad.
    pub async fn mint_identity(&mut self,
                               params: MintIdentityParams,
                               output_id: Option<&str>)
                               -> Result<MintedIdentity, CoreError> {
        let op = Op::MintIdentity;
        let contracts = self.require_contracts_handle(op)?;
        let signer = self.require_signer(op)?;
        let steps = mint_identity_next_steps(params.self_fund);

        self.run_step(op, output_id, steps, async move {
                let minted = contracts.mint_identity_token().await?;
                if params.self_fund {
                    let amount = params.funding_amount.unwrap_or(DEFAULT_FUNDING_AMOUNT);
                    let receipt = signer.send_value(&minted.address, amount).await?;
                    debug!(to = %minted.address, amount, tx = %receipt.hash, "funded minted identity");
                }
                Ok(minted)
            })
            .await
    }

    /// Lista las identidades ya minteadas propiedad del firmante.
    pub async fn get_identities(&mut self, output_id: Option<&str>) -> Result<OwnedIdentities, CoreError> {
        let op = Op::GetIdentities;
        let contracts = self.require_contracts_handle(op)?;
        let signer = self.require_signer(op)?;

        self.run_step(op, output_id, next_steps(op), async move {
                let owner = signer.address().await?;
                let identities = contracts.identities_of(&owner).await?;
                Ok(OwnedIdentities { identities })
            })
            .await
    }

    /// Mintea un token de cuota que paga uso de red.
    pub async fn mint_quota_token(&mut self,
                                  requests_per_kilosecond: u64,
                                  days_until_expiry: u32,
                                  output_id: Option<&str>)
                                  -> Result<MintedQuota, CoreError> {
        let op = Op::MintQuotaToken;
        if requests_per_kilosecond == 0 {
            return Err(CoreError::validation("requests per kilosecond must be greater than zero"));
        }
        if days_until_expiry == 0 {
            return Err(CoreError::validation("days until expiry must be greater than zero"));
        }
        let contracts = self.require_contracts_handle(op)?;

        self.run_step(op, output_id, next_steps(op), async move {
                let quota_token_id = contracts.mint_quota_token(requests_per_kilosecond, days_until_expiry)
                                              .await?;
                Ok(MintedQuota { quota_token_id })
            })
            .await
    }

    /// Emite un token de delegación contra una cuota ya minteada.
    pub async fn delegate_quota(&mut self,
                                params: DelegateQuotaParams,
                                output_id: Option<&str>)
                                -> Result<DelegationToken, CoreError> {
        let op = Op::DelegateQuota;
        if params.quota_token_id.is_empty() {
            return Err(CoreError::validation("a quota token id is required"));
        }
        let contracts = self.require_contracts_handle(op)?;

        self.run_step(op, output_id, next_steps(op), async move {
                let token = contracts.delegate_quota(&params.quota_token_id, params.expires_at, &params.delegates)
                                     .await?;
                Ok(token)
            })
            .await
    }

    /// Concede un método de autenticación sobre una identidad.
    pub async fn grant_auth_method(&mut self,
                                   params: GrantAuthMethodParams,
                                   output_id: Option<&str>)
                                   -> Result<AuthMethodGrant, CoreError> {
        let op = Op::GrantAuthMethod;
        if params.method_id.is_empty() {
            return Err(CoreError::validation("an auth method id is required"));
        }
        if params.scopes.is_empty() {
            return Err(CoreError::validation("at least one scope is required"));
        }
        let contracts = self.require_contracts_handle(op)?;

        self.run_step(op, output_id, next_steps(op), async move {
                let tx = contracts.grant_auth_method(&params.token_id,
                                                     &params.method_id,
                                                     params.method_type,
                                                     &params.scopes)
                                  .await?;
                Ok(AuthMethodGrant { tx })
            })
            .await
    }

    /// Concede una referencia de código como método de uso de una identidad.
    pub async fn grant_code_reference(&mut self,
                                      params: GrantCodeReferenceParams,
                                      output_id: Option<&str>)
                                      -> Result<CodeReferenceGrant, CoreError> {
        let op = Op::GrantCodeReference;
        if params.scopes.is_empty() {
            return Err(CoreError::validation("at least one scope is required"));
        }
        let contracts = self.require_contracts_handle(op)?;

        self.run_step(op, output_id, next_steps(op), async move {
                let tx = contracts.grant_code_reference(&params.token_id, &params.code_ref, &params.scopes)
                                  .await?;
                Ok(CodeReferenceGrant { tx })
            })
            .await
    }
}
