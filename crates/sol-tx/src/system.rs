//! System Program instructions used by the SDK.
//!
//! System instructions are prefixed with a little-endian `u32` index rather
//! than a single discriminant byte.

use crate::instruction::{AccountMeta, Instruction};
use crate::pubkey::Pubkey;

/// The System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey::new_from_array([0u8; 32]);

const CREATE_ACCOUNT_IX_INDEX: u32 = 0;
const TRANSFER_IX_INDEX: u32 = 2;

/// Build a `CreateAccount` instruction.
///
/// Both `from` and `new_account` must sign: the new account proves it owns
/// its address, so this cannot be used for program-derived addresses.
pub fn create_account(
    from: &Pubkey,
    new_account: &Pubkey,
    lamports: u64,
    space: u64,
    owner: &Pubkey,
) -> Instruction {
    // u32 index + u64 lamports + u64 space + 32-byte owner.
    let mut data = Vec::with_capacity(52);
    data.extend_from_slice(&CREATE_ACCOUNT_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());
    data.extend_from_slice(&space.to_le_bytes());
    data.extend_from_slice(owner.as_ref());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*from, true),
            AccountMeta::new(*new_account, true),
        ],
        data,
    }
}

/// Build a `Transfer` instruction moving `lamports` from `from` to `to`.
pub fn transfer(from: &Pubkey, to: &Pubkey, lamports: u64) -> Instruction {
    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Instruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![AccountMeta::new(*from, true), AccountMeta::new(*to, false)],
        data,
    }
}
