//! Wallet-facing actions.
//!
//! Each action checks the wallet identity and the instruction name before
//! touching the network. It then fetches what the transaction needs, builds
//! it, has the wallet sign and submit it, and returns a
//! [`PendingTransaction`]. Nothing is retried; a failed submission is
//! returned as-is.

use sol_tx::{Keypair, Pubkey, Signature, VersionedTransaction};

use crate::amount::Amount;
use crate::assemble::TxContext;
use crate::config::SdkConfig;
use crate::constants::{LOCKUP_ACCOUNT_SIZE, VALIDATOR_STAKE_ACCOUNT_SIZE};
use crate::error::{Result, SdkError};
use crate::idl::{lockup_ix, stake_ix, Idls};
use crate::lockup;
use crate::rpc::{
    BlockhashConfirmation, Commitment, HttpRpcClient, LatestBlockhash, RpcConnection, SendOptions,
};
use crate::stake;
use crate::wallet::Wallet;

/// A submitted transaction and what is needed to wait for it.
#[derive(Debug)]
pub struct PendingTransaction<'a, R> {
    rpc: &'a R,
    confirmation: BlockhashConfirmation,
}

impl<R: RpcConnection> PendingTransaction<'_, R> {
    pub fn signature(&self) -> &Signature {
        &self.confirmation.signature
    }

    /// The blockhash snapshot the transaction was built against.
    pub fn confirmation(&self) -> BlockhashConfirmation {
        self.confirmation
    }

    /// Wait until the transaction reaches `commitment`.
    pub async fn confirm(&self, commitment: Commitment) -> Result<()> {
        self.rpc.confirm_transaction(self.confirmation, commitment).await
    }
}

/// A lock submission, with the freshly created lockup account.
#[derive(Debug)]
pub struct PendingLock<'a, R> {
    /// Needed later to unlock and withdraw.
    pub lockup_account: Pubkey,
    pub pending: PendingTransaction<'a, R>,
}

/// Entry point for the lockup and stake actions.
#[derive(Debug)]
pub struct PaladinClient<R> {
    rpc: R,
    config: SdkConfig,
    idls: Idls,
}

impl PaladinClient<HttpRpcClient> {
    /// Client talking JSON-RPC to `config.rpc_url`.
    pub fn from_config(config: SdkConfig) -> Result<Self> {
        let rpc = HttpRpcClient::new(&config)?;
        Ok(Self::new(rpc, config))
    }
}

impl<R: RpcConnection> PaladinClient<R> {
    pub fn new(rpc: R, config: SdkConfig) -> Self {
        Self {
            rpc,
            config,
            idls: Idls::default(),
        }
    }

    /// Replace the built-in descriptor tables, e.g. with ones parsed from
    /// the deployed programs' IDL.
    pub fn with_idls(mut self, idls: Idls) -> Self {
        self.idls = idls;
        self
    }

    pub fn rpc(&self) -> &R {
        &self.rpc
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Lock `amount` for `beneficiary` into a new lockup account.
    pub async fn lock_tokens<W: Wallet>(
        &self,
        wallet: &W,
        beneficiary: &Pubkey,
        amount: Amount,
    ) -> Result<PendingLock<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.lockup.discriminant(lockup_ix::LOCKUP)?;
        non_zero(amount)?;

        let rent = self
            .rpc
            .get_minimum_balance_for_rent_exemption(LOCKUP_ACCOUNT_SIZE)
            .await?;
        let latest = self.latest_blockhash().await?;

        let lockup_account = Keypair::new();
        let tx = lockup::build_lock_transaction(
            &self.context(&latest),
            &payer,
            beneficiary,
            amount,
            &lockup_account,
            rent,
        )?;

        let pending = self.submit(wallet, tx, latest).await?;
        Ok(PendingLock {
            lockup_account: lockup_account.pubkey(),
            pending,
        })
    }

    pub async fn unlock_tokens<W: Wallet>(
        &self,
        wallet: &W,
        lockup_account: &Pubkey,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.lockup.discriminant(lockup_ix::UNLOCK)?;
        let latest = self.latest_blockhash().await?;
        let tx = lockup::build_unlock_transaction(&self.context(&latest), &payer, lockup_account)?;
        self.submit(wallet, tx, latest).await
    }

    pub async fn withdraw_tokens<W: Wallet>(
        &self,
        wallet: &W,
        lockup_account: &Pubkey,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.lockup.discriminant(lockup_ix::WITHDRAW)?;
        let latest = self.latest_blockhash().await?;
        let tx =
            lockup::build_withdraw_transaction(&self.context(&latest), &payer, lockup_account)?;
        self.submit(wallet, tx, latest).await
    }

    /// Create and initialize the stake record of `vote_account`.
    pub async fn initialize_validator_stake<W: Wallet>(
        &self,
        wallet: &W,
        vote_account: &Pubkey,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.stake.discriminant(stake_ix::INITIALIZE_VALIDATOR_STAKE)?;
        let rent = self
            .rpc
            .get_minimum_balance_for_rent_exemption(VALIDATOR_STAKE_ACCOUNT_SIZE)
            .await?;
        let latest = self.latest_blockhash().await?;
        let tx = stake::build_initialize_validator_stake_transaction(
            &self.context(&latest),
            &payer,
            vote_account,
            rent,
        )?;
        self.submit(wallet, tx, latest).await
    }

    /// Stake `amount` from the wallet to the validator whose node identity
    /// is `validator_identity`.
    pub async fn validator_stake_tokens<W: Wallet>(
        &self,
        wallet: &W,
        validator_identity: &Pubkey,
        amount: Amount,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.stake.discriminant(stake_ix::VALIDATOR_STAKE_TOKENS)?;
        non_zero(amount)?;

        let vote_account = stake::find_vote_account(&self.rpc, validator_identity).await?;
        let stake_authority =
            stake::vote_account_withdraw_authority(&self.rpc, &vote_account).await?;
        let latest = self.latest_blockhash().await?;
        let tx = stake::build_validator_stake_transaction(
            &self.context(&latest),
            &payer,
            &vote_account,
            &stake_authority,
            amount,
        )?;
        self.submit(wallet, tx, latest).await
    }

    /// Unstake `amount` from the validator whose node identity is
    /// `validator_identity`.
    pub async fn validator_unstake_tokens<W: Wallet>(
        &self,
        wallet: &W,
        validator_identity: &Pubkey,
        amount: Amount,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.stake.discriminant(stake_ix::UNSTAKE_TOKENS)?;
        non_zero(amount)?;

        let vote_account = stake::find_vote_account(&self.rpc, validator_identity).await?;
        let latest = self.latest_blockhash().await?;
        let tx = stake::build_validator_unstake_transaction(
            &self.context(&latest),
            &payer,
            &vote_account,
            amount,
        )?;
        self.submit(wallet, tx, latest).await
    }

    /// Unstake `amount` from the SOL staker record of `native_stake`.
    pub async fn sol_staker_unstake_tokens<W: Wallet>(
        &self,
        wallet: &W,
        native_stake: &Pubkey,
        amount: Amount,
    ) -> Result<PendingTransaction<'_, R>> {
        let payer = connected(wallet)?;
        self.idls.stake.discriminant(stake_ix::UNSTAKE_TOKENS)?;
        non_zero(amount)?;

        let latest = self.latest_blockhash().await?;
        let tx = stake::build_sol_staker_unstake_transaction(
            &self.context(&latest),
            &payer,
            native_stake,
            amount,
        )?;
        self.submit(wallet, tx, latest).await
    }

    fn context(&self, latest: &LatestBlockhash) -> TxContext<'_> {
        TxContext {
            program_ids: &self.config.program_ids,
            idls: &self.idls,
            compute_unit_price: self.config.compute_unit_price,
            recent_blockhash: latest.blockhash,
        }
    }

    async fn latest_blockhash(&self) -> Result<LatestBlockhash> {
        self.rpc.get_latest_blockhash(self.config.commitment).await
    }

    async fn submit<W: Wallet>(
        &self,
        wallet: &W,
        tx: VersionedTransaction,
        latest: LatestBlockhash,
    ) -> Result<PendingTransaction<'_, R>> {
        let options = SendOptions {
            skip_preflight: self.config.skip_preflight,
            preflight_commitment: Some(self.config.commitment),
        };
        let signature = wallet.sign_and_send(tx, &self.rpc, options).await?;

        Ok(PendingTransaction {
            rpc: &self.rpc,
            confirmation: BlockhashConfirmation {
                signature,
                blockhash: latest.blockhash,
                last_valid_block_height: latest.last_valid_block_height,
            },
        })
    }
}

fn connected<W: Wallet>(wallet: &W) -> Result<Pubkey> {
    wallet.public_key().ok_or(SdkError::WalletNotConnected)
}

fn non_zero(amount: Amount) -> Result<()> {
    if amount.is_zero() {
        return Err(SdkError::InvalidAmount("amount must be greater than zero".into()));
    }
    Ok(())
}
