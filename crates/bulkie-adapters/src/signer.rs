//! Identidad firmante local con saldo simulado.

use std::sync::Mutex;

use async_trait::async_trait;

use bulkie_core::clients::SigningIdentity;
use bulkie_core::errors::CollaboratorError;
use bulkie_core::model::TxReceipt;

/// Dirección determinista derivada de una semilla arbitraria.
pub fn derive_address(seed: &str) -> String {
    let digest = blake3::hash(seed.as_bytes()).to_hex().to_string();
    format!("0x{}", &digest[..40])
}

/// Firmante de pruebas: dirección derivada de la semilla, saldo en memoria y
/// firmas deterministas (blake3 de dirección + mensaje).
pub struct StaticSigner {
    address: String,
    balance: Mutex<u128>,
    nonce: Mutex<u64>,
}

impl StaticSigner {
    pub fn new(seed: &str, initial_balance: u128) -> Self {
        Self { address: derive_address(seed),
               balance: Mutex::new(initial_balance),
               nonce: Mutex::new(0) }
    }

    fn lock_balance(&self) -> Result<std::sync::MutexGuard<'_, u128>, CollaboratorError> {
        self.balance.lock().map_err(|_| CollaboratorError::from("signer balance lock poisoned"))
    }
}

#[async_trait]
impl SigningIdentity for StaticSigner {
    async fn address(&self) -> Result<String, CollaboratorError> {
        Ok(self.address.clone())
    }

    async fn balance(&self) -> Result<u128, CollaboratorError> {
        Ok(*self.lock_balance()?)
    }

    async fn send_value(&self, to: &str, amount: u128) -> Result<TxReceipt, CollaboratorError> {
        let mut balance = self.lock_balance()?;
        if *balance < amount {
            return Err(format!("insufficient balance: have {balance}, need {amount}").into());
        }
        *balance -= amount;

        let mut nonce = self.nonce.lock().map_err(|_| CollaboratorError::from("signer nonce lock poisoned"))?;
        *nonce += 1;
        let hash = blake3::hash(format!("{}:{to}:{amount}:{nonce}", self.address).as_bytes()).to_hex()
                                                                                             .to_string();
        Ok(TxReceipt { hash: format!("0x{hash}"),
                       explorer_url: None })
    }

    async fn sign_message(&self, message: &str) -> Result<String, CollaboratorError> {
        let sig = blake3::hash(format!("{}:{message}", self.address).as_bytes()).to_hex().to_string();
        Ok(format!("0x{sig}"))
    }
}
