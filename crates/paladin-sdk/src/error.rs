//! Error types for the Paladin SDK.
//!
//! Variants fall into four groups: input errors (caught before any network
//! call), lookup errors, network errors and encoding errors. Nothing is
//! retried or swallowed here; every failure is returned to the caller.

use std::time::Duration;

use sol_tx::{Pubkey, Signature, SolError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    // -- input ---------------------------------------------------------------
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // -- lookup --------------------------------------------------------------
    #[error("Instruction {0} not found in IDL")]
    UnknownInstruction(String),

    #[error("Could not find vote account for validator identity: {0}")]
    VoteAccountNotFound(Pubkey),

    #[error("Account {0} not found")]
    AccountNotFound(Pubkey),

    // -- network -------------------------------------------------------------
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Transaction {signature} failed: {reason}")]
    TransactionFailed { signature: Signature, reason: String },

    #[error("Blockhash expired before transaction {0} was confirmed")]
    BlockhashExpired(Signature),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Wallet rejected the transaction: {0}")]
    WalletRejected(String),

    // -- encoding ------------------------------------------------------------
    #[error("Transaction error: {0}")]
    Transaction(#[from] SolError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;

impl SdkError {
    /// Errors raised from caller input, before the network is touched.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            SdkError::WalletNotConnected
                | SdkError::InvalidAmount(_)
                | SdkError::Configuration(_)
        )
    }

    pub fn is_lookup_error(&self) -> bool {
        matches!(
            self,
            SdkError::UnknownInstruction(_)
                | SdkError::VoteAccountNotFound(_)
                | SdkError::AccountNotFound(_)
        )
    }

    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            SdkError::Http(_)
                | SdkError::Rpc { .. }
                | SdkError::TransactionFailed { .. }
                | SdkError::BlockhashExpired(_)
                | SdkError::Timeout(_)
        )
    }

    /// The JSON-RPC error code, if this came from the node.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            SdkError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_not_connected_message() {
        assert_eq!(SdkError::WalletNotConnected.to_string(), "Wallet not connected");
    }

    #[test]
    fn unknown_instruction_message() {
        let err = SdkError::UnknownInstruction("Foo".into());
        assert_eq!(err.to_string(), "Instruction Foo not found in IDL");
        assert!(err.is_lookup_error());
        assert!(!err.is_network_error());
    }

    #[test]
    fn vote_account_not_found_names_identity() {
        let identity = Pubkey::new_from_array([0; 32]);
        let err = SdkError::VoteAccountNotFound(identity);
        assert!(err
            .to_string()
            .ends_with("11111111111111111111111111111111"));
    }

    #[test]
    fn classification() {
        assert!(SdkError::InvalidAmount("overflow".into()).is_input_error());
        assert!(SdkError::WalletNotConnected.is_input_error());

        let rpc = SdkError::Rpc {
            code: -32002,
            message: "Transaction simulation failed".into(),
        };
        assert!(rpc.is_network_error());
        assert_eq!(rpc.rpc_code(), Some(-32002));
        assert_eq!(
            rpc.to_string(),
            "RPC error -32002: Transaction simulation failed"
        );

        assert!(SdkError::Timeout(Duration::from_secs(30)).is_network_error());
        assert!(SdkError::BlockhashExpired(Signature::default()).is_network_error());
    }

    #[test]
    fn sol_error_converts() {
        let err: SdkError = SolError::SigningError("bad".into()).into();
        assert!(matches!(err, SdkError::Transaction(_)));
        assert!(err.to_string().contains("signing error: bad"));
        assert_eq!(err.rpc_code(), None);
    }
}
