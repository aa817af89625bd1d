//! The network capability the SDK consumes.
//!
//! [`RpcConnection`] is the seam between transaction building and the
//! cluster. [`HttpRpcClient`] implements it over JSON-RPC; tests plug in an
//! in-memory implementation.

mod http;

use std::future::Future;

use serde::{Deserialize, Serialize};
use sol_tx::{Hash, Pubkey, Signature};

use crate::error::Result;

pub use http::HttpRpcClient;

/// Finality requested when reading state or confirming a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    Processed,
    #[default]
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recent blockhash and the last block height at which it is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatestBlockhash {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Submit without the node simulating the transaction first.
    pub skip_preflight: bool,
    pub preflight_commitment: Option<Commitment>,
}

/// Everything needed to wait for a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockhashConfirmation {
    pub signature: Signature,
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteAccountInfo {
    pub vote_pubkey: Pubkey,
    /// The validator identity.
    pub node_pubkey: Pubkey,
    #[serde(default)]
    pub activated_stake: u64,
    #[serde(default)]
    pub commission: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VoteAccountStatus {
    pub current: Vec<VoteAccountInfo>,
    pub delinquent: Vec<VoteAccountInfo>,
}

impl VoteAccountStatus {
    /// Current and delinquent vote accounts, current first.
    pub fn iter(&self) -> impl Iterator<Item = &VoteAccountInfo> {
        self.current.iter().chain(self.delinquent.iter())
    }
}

/// The cluster operations the SDK needs.
///
/// Every method is a suspension point; none of them retry.
pub trait RpcConnection: Sync {
    fn get_latest_blockhash(
        &self,
        commitment: Commitment,
    ) -> impl Future<Output = Result<LatestBlockhash>> + Send;

    /// Submit signed wire bytes, returning the transaction signature.
    fn send_raw_transaction(
        &self,
        wire_transaction: &[u8],
        options: SendOptions,
    ) -> impl Future<Output = Result<Signature>> + Send;

    /// Resolve once the transaction reaches `commitment`, or fail when it
    /// errors on chain or its blockhash expires.
    fn confirm_transaction(
        &self,
        strategy: BlockhashConfirmation,
        commitment: Commitment,
    ) -> impl Future<Output = Result<()>> + Send;

    fn get_minimum_balance_for_rent_exemption(
        &self,
        data_len: u64,
    ) -> impl Future<Output = Result<u64>> + Send;

    fn get_vote_accounts(&self) -> impl Future<Output = Result<VoteAccountStatus>> + Send;

    /// Raw account data, `None` if the account does not exist.
    fn get_account_data(
        &self,
        pubkey: &Pubkey,
    ) -> impl Future<Output = Result<Option<Vec<u8>>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commitment_ordering() {
        assert!(Commitment::Processed < Commitment::Confirmed);
        assert!(Commitment::Confirmed < Commitment::Finalized);
        assert_eq!(Commitment::default(), Commitment::Confirmed);
    }

    #[test]
    fn commitment_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Commitment::Finalized).unwrap(),
            "\"finalized\""
        );
        let c: Commitment = serde_json::from_str("\"processed\"").unwrap();
        assert_eq!(c, Commitment::Processed);
    }

    #[test]
    fn vote_accounts_deserialize_from_rpc_shape() {
        let json = r#"{
            "current": [{
                "votePubkey": "11111111111111111111111111111111",
                "nodePubkey": "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb",
                "activatedStake": 42,
                "commission": 10,
                "epochVoteAccount": true,
                "epochCredits": [],
                "lastVote": 1,
                "rootSlot": 1
            }],
            "delinquent": []
        }"#;
        let status: VoteAccountStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.current.len(), 1);
        assert_eq!(status.current[0].activated_stake, 42);
        assert_eq!(status.iter().count(), 1);
    }
}
