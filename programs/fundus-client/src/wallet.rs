use crate::error::WalletError;
use async_trait::async_trait;
use solana_sdk::{pubkey::Pubkey, signature::Keypair, signer::Signer, transaction::Transaction};

/// The donor's signing agent. Any of its capabilities may be missing while
/// no wallet is connected, so callers check `public_key` first.
#[async_trait]
pub trait Wallet: Send + Sync {
    fn public_key(&self) -> Option<Pubkey>;

    /// Signs `tx` against the blockhash already set in its message.
    async fn sign_transaction(&self, tx: Transaction) -> Result<Transaction, WalletError>;
}

/// Wallet backed by an in-process keypair.
#[derive(Default)]
pub struct KeypairWallet {
    keypair: Option<Keypair>,
}

impl KeypairWallet {
    pub fn connected(keypair: Keypair) -> Self {
        Self {
            keypair: Some(keypair),
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    pub fn disconnect(&mut self) -> Option<Keypair> {
        self.keypair.take()
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(Keypair::pubkey)
    }

    async fn sign_transaction(&self, mut tx: Transaction) -> Result<Transaction, WalletError> {
        let keypair = self.keypair.as_ref().ok_or(WalletError::Disconnected)?;
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[keypair], blockhash)
            .map_err(|e| WalletError::Signing(e.to_string()))?;
        Ok(tx)
    }
}
