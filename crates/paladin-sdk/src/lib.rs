//! Client SDK for the Paladin lockup and stake programs.
//!
//! Builds the instructions and transactions the on-chain programs expect,
//! derives the program-owned accounts they reference, and drives a
//! [`Wallet`] and an [`RpcConnection`] to sign, submit and confirm them.
//!
//! Layers, bottom-up:
//! - [`constants`], [`idl`], [`amount`], [`pda`]: static tables and pure
//!   derivations.
//! - [`lockup`], [`stake`]: instruction encoders and transaction builders.
//!   Pure apart from the vote-account lookups in [`stake`].
//! - [`actions`]: [`PaladinClient`], which fetches live chain state and
//!   submits through a wallet.

pub mod actions;
pub mod amount;
pub mod assemble;
pub mod config;
pub mod constants;
pub mod error;
pub mod idl;
pub mod lockup;
pub mod pda;
pub mod rpc;
pub mod stake;
pub mod wallet;

pub use actions::{PaladinClient, PendingLock, PendingTransaction};
pub use amount::Amount;
pub use assemble::{assemble, ComputeBudget, TxContext};
pub use config::SdkConfig;
pub use constants::ProgramIds;
pub use error::{Result, SdkError};
pub use idl::{Idls, InstructionTable};
pub use rpc::{Commitment, HttpRpcClient, RpcConnection, SendOptions};
pub use wallet::{KeypairWallet, Wallet};

pub use sol_tx;
