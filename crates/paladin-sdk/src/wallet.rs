//! The signing capability the action functions consume.

use std::future::Future;

use sol_tx::{Keypair, Pubkey, Signature, VersionedTransaction};

use crate::error::{Result, SdkError};
use crate::rpc::{RpcConnection, SendOptions};

/// A connected (or not) wallet.
///
/// `sign_transaction` is the one required capability. Wallets that can only
/// sign and submit in a single step override [`Wallet::sign_and_send`]
/// instead and make `sign_transaction` return [`SdkError::WalletRejected`].
pub trait Wallet: Sync {
    /// The active identity, `None` while disconnected.
    fn public_key(&self) -> Option<Pubkey>;

    /// Fill the wallet's signature slot and hand the transaction back.
    fn sign_transaction(
        &self,
        tx: VersionedTransaction,
    ) -> impl Future<Output = Result<VersionedTransaction>> + Send;

    /// Sign, check every slot is filled, and submit the wire bytes.
    fn sign_and_send<R: RpcConnection>(
        &self,
        tx: VersionedTransaction,
        rpc: &R,
        options: SendOptions,
    ) -> impl Future<Output = Result<Signature>> + Send {
        async move {
            let signed = self.sign_transaction(tx).await?;
            signed.verify_signatures()?;
            let wire = signed.serialize()?;
            rpc.send_raw_transaction(&wire, options).await
        }
    }
}

/// [`Wallet`] over a local keypair.
#[derive(Debug, Default)]
pub struct KeypairWallet {
    keypair: Option<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair: Some(keypair),
        }
    }

    /// A wallet with no active identity.
    pub fn disconnected() -> Self {
        Self { keypair: None }
    }
}

impl Wallet for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        self.keypair.as_ref().map(Keypair::pubkey)
    }

    async fn sign_transaction(&self, mut tx: VersionedTransaction) -> Result<VersionedTransaction> {
        let keypair = self.keypair.as_ref().ok_or(SdkError::WalletNotConnected)?;
        tx.partial_sign(&[keypair])?;
        Ok(tx)
    }
}
