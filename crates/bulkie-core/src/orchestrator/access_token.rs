//! Minteo de access tokens: composición de grants, resolución del código y
//! llamada de sesión al colaborador de red.

use crate::deps::next_steps;
use crate::errors::CoreError;
use crate::model::{AccessCredential, AccessTokenRequest, Op};

use super::Bulkie;

impl Bulkie {
    /// Mintea una credencial de acceso. La petición se valida y reduce de
    /// forma síncrona (grants → abilities, exactamente una fuente de código,
    /// delegación obligatoria si la clase lo exige, expiración por defecto)
    /// antes de tocar la red; la credencial devuelta se valida
    /// estructuralmente antes de registrarse.
    pub async fn create_access_token(&mut self,
                                     request: AccessTokenRequest,
                                     output_id: Option<&str>)
                                     -> Result<AccessCredential, CoreError> {
        let op = Op::CreateAccessToken;
        let network = self.require_network_handle(op)?;
        let mint = request.into_mint_request()?;

        self.run_step(op, output_id, next_steps(op), async move {
                let credential = network.mint_session_credential(mint).await?;
                credential.validate()?;
                Ok(credential)
            })
            .await
    }
}
