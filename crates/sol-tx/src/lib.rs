//! Solana transaction plumbing for the Paladin SDK.
//!
//! This crate handles address types, program-derived address derivation,
//! instruction and message compilation, and multi-signer signing, without
//! pulling in `solana-sdk` (which drags in 200+ transitive dependencies).
//!
//! The compact binary wire format is implemented by hand, using
//! `ed25519-dalek` for signing, `curve25519-dalek` for the off-curve check
//! and `bs58` for Base58 encoding.

pub mod compute_budget;
pub mod error;
pub mod instruction;
pub mod keypair;
pub mod message;
pub mod pda;
pub mod pubkey;
pub mod system;
pub mod token;
pub mod transaction;

// Re-export key public types for ergonomic imports.
pub use error::SolError;
pub use instruction::{AccountMeta, Instruction};
pub use keypair::Keypair;
pub use message::{
    decode_compact_u16, encode_compact_u16, CompiledInstruction, Message, MessageHeader,
    VersionedMessage,
};
pub use pda::{create_program_address, find_program_address};
pub use pubkey::{Hash, Pubkey, Signature};
pub use system::SYSTEM_PROGRAM_ID;
pub use token::{
    get_associated_token_address_with_program_id, ASSOCIATED_TOKEN_PROGRAM_ID,
    TOKEN_2022_PROGRAM_ID, TOKEN_PROGRAM_ID,
};
pub use transaction::VersionedTransaction;
