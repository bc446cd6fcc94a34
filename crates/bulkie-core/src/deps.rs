//! Grafo estático de dependencias entre operaciones y tabla de sugerencias.
//!
//! Dos tablas deliberadamente separadas:
//! - `dependencies_of`: qué operaciones deben haber registrado output antes
//!   de ejecutar una dada. Sirve a la guía y al diagnóstico; la barrera dura
//!   vive en `preconditions` (descubribilidad y seguridad pueden divergir).
//! - `next_steps`: sugerencias hacia adelante tras completar una operación.
//! Ambas son totales sobre `Op::ALL`.

use crate::model::Op;

/// Operaciones cuyo output debe existir antes de ejecutar `op`.
pub fn dependencies_of(op: Op) -> &'static [Op] {
    match op {
        Op::ConnectToNetwork => &[],
        Op::ConnectToContracts => &[],
        Op::MintIdentity => &[Op::ConnectToContracts],
        Op::GetIdentities => &[Op::ConnectToContracts],
        Op::MintQuotaToken => &[Op::ConnectToContracts],
        Op::DelegateQuota => &[Op::ConnectToContracts, Op::MintQuotaToken],
        Op::GrantAuthMethod => &[Op::ConnectToContracts, Op::MintIdentity],
        Op::GrantCodeReference => &[Op::ConnectToContracts, Op::MintIdentity],
        Op::CreateAccessToken => &[Op::ConnectToNetwork],
        Op::ExecuteRemoteCode => &[Op::CreateAccessToken],
        Op::RequestSignature => &[Op::CreateAccessToken],
        Op::GenerateKey => &[Op::CreateAccessToken],
    }
}

/// Sugerencia mostrada por la guía tras completar una operación. `Tip` es un
/// consejo sin operación asociada.
#[derive(Debug, Clone, Copy)]
pub enum NextStep {
    Run(Op, &'static str),
    Tip(&'static str),
}

impl NextStep {
    pub fn render(&self) -> String {
        match self {
            NextStep::Run(op, hint) => format!("{} - ({hint})", op.key()),
            NextStep::Tip(tip) => (*tip).to_string(),
        }
    }
}

/// Consejo mostrado cuando la identidad se minteó sin auto-fondeo.
pub const FUNDING_TIP: NextStep =
    NextStep::Tip("you can fund the identity so it can send transactions later");

/// Sugerencias por defecto tras completar `op`.
pub fn next_steps(op: Op) -> &'static [NextStep] {
    match op {
        Op::ConnectToNetwork => &[NextStep::Run(Op::ConnectToContracts, "to connect to the contracts client")],
        Op::ConnectToContracts => &[NextStep::Run(Op::MintIdentity, "to mint an identity token"),
                                    NextStep::Run(Op::GetIdentities, "to list identity tokens you already own"),
                                    NextStep::Run(Op::MintQuotaToken, "to mint a quota token to pay for network usage")],
        Op::MintIdentity => &[FUNDING_TIP,
                              NextStep::Run(Op::GrantAuthMethod, "to grant an auth method to use the identity"),
                              NextStep::Run(Op::GrantCodeReference, "to grant a code reference to use the identity"),
                              NextStep::Run(Op::MintQuotaToken, "to mint a quota token")],
        Op::GetIdentities => &[],
        Op::MintQuotaToken => &[NextStep::Run(Op::DelegateQuota, "to let your users draw against the quota you minted")],
        Op::DelegateQuota => &[NextStep::Run(Op::CreateAccessToken, "to mint an access token against the delegation")],
        Op::GrantAuthMethod => &[NextStep::Run(Op::GrantCodeReference, "to grant a code reference as well")],
        Op::GrantCodeReference => &[NextStep::Run(Op::CreateAccessToken, "to mint an access token")],
        Op::CreateAccessToken => &[NextStep::Run(Op::ExecuteRemoteCode, "to execute code in the trusted environment"),
                                   NextStep::Run(Op::RequestSignature, "to sign a message with the identity"),
                                   NextStep::Run(Op::GenerateKey, "to generate a key inside the trusted environment")],
        Op::ExecuteRemoteCode => &[],
        Op::RequestSignature => &[],
        Op::GenerateKey => &[],
    }
}

/// Variante de sugerencias para un minteo de identidad con auto-fondeo (el
/// consejo de fondear sobra).
pub fn mint_identity_next_steps(self_funded: bool) -> &'static [NextStep] {
    if self_funded {
        &[NextStep::Run(Op::GrantAuthMethod, "to grant an auth method to use the identity"),
          NextStep::Run(Op::GrantCodeReference, "to grant a code reference to use the identity"),
          NextStep::Run(Op::MintQuotaToken, "to mint a quota token")]
    } else {
        next_steps(Op::MintIdentity)
    }
}
