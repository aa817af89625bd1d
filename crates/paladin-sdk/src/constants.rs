//! Mainnet addresses, account sizes and fee policy for the Paladin programs.

use serde::{Deserialize, Serialize};
use sol_tx::Pubkey;

// ---------------------------------------------------------------------------
// Programs
// ---------------------------------------------------------------------------

/// Lockup program: `2fzrtg7ckXTFxjgsXbAWLLvXr4wJK9xfUjJJ69uZ7chb`
pub const LOCKUP_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0x18, 0xd9, 0x2e, 0x2e, 0x5d, 0xe8, 0x08, 0x78, 0x1e, 0x6e, 0x2d, 0xc7, 0x3f, 0xdb, 0x94,
    0x23, 0x6a, 0x71, 0xb2, 0xa2, 0xf9, 0xfe, 0xdc, 0xf0, 0x8a, 0x08, 0x81, 0xea, 0x88, 0x9d,
    0x6a, 0x0e,
]);

/// Rewards program: `7LdHk6jnrY4kJW79mVXshTzduvgn3yz4hZzHpzTbt7Ph`
pub const REWARDS_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0x5e, 0x2d, 0x30, 0x4c, 0x57, 0xdf, 0xd4, 0xda, 0xf6, 0xa8, 0x36, 0xb5, 0x1f, 0x87, 0x33,
    0x37, 0xbf, 0xa1, 0xdd, 0xda, 0xd3, 0x2c, 0x6c, 0xee, 0x91, 0x42, 0xb2, 0xe6, 0xd9, 0xac,
    0x34, 0x14,
]);

/// Stake program placeholder: `PStake1111111111111111111111111111111111111`
///
/// No stake program address has been published alongside the other
/// Paladin accounts. Deployments set the real one through
/// [`ProgramIds::stake_program`] (or the `program_ids.stake_program` config
/// key).
pub const STAKE_PROGRAM_ID: Pubkey = Pubkey::new_from_array([
    0x05, 0xc0, 0x0d, 0x0c, 0xa1, 0x0b, 0x73, 0x0a, 0x0b, 0xf2, 0xf4, 0xa0, 0x21, 0x03, 0xab,
    0x40, 0x96, 0x6c, 0x07, 0xf2, 0xd1, 0x2b, 0x4c, 0xb9, 0x23, 0xec, 0x2c, 0x60, 0x00, 0x00,
    0x00, 0x00,
]);

// ---------------------------------------------------------------------------
// Token and rewards accounts
// ---------------------------------------------------------------------------

/// PAL mint (Token-2022): `HV9WocvHgRAkYAYmNzvBGHgCj2Vg2Z6N7VffouyiHJdu`
pub const PAL_MINT: Pubkey = Pubkey::new_from_array([
    0xf4, 0xf0, 0xe1, 0x4f, 0xef, 0xfb, 0x46, 0x83, 0xfc, 0x47, 0xb4, 0x17, 0xd4, 0x53, 0xec,
    0x0f, 0x41, 0x08, 0xa6, 0x09, 0x7e, 0x76, 0x35, 0x02, 0x32, 0x70, 0x9a, 0x18, 0x71, 0x03,
    0x36, 0xd0,
]);

/// Transfer-hook extra account metas of the mint:
/// `B7HWKeRXgzHTfKdh3Ybf4NkizXWGq9UDmaMgXe6jKKW`
pub const EXTRA_ACCOUNT_METAS: Pubkey = Pubkey::new_from_array([
    0x02, 0x96, 0xea, 0x01, 0x8c, 0x22, 0x3e, 0x5b, 0x73, 0x01, 0x31, 0x45, 0xa9, 0x76, 0x2e,
    0x56, 0xbe, 0x50, 0xd7, 0xe4, 0x1e, 0xc6, 0x85, 0x8f, 0x76, 0xc8, 0x59, 0xd3, 0xc7, 0x43,
    0x1f, 0xb9,
]);

/// Holder rewards pool: `9EeBEci7SovWiZpaLM7xzPQpYywa8DY865WmHYRC6vVD`
pub const HOLDER_REWARDS_POOL: Pubkey = Pubkey::new_from_array([
    0x7a, 0x5c, 0x14, 0xdc, 0x5e, 0x38, 0x8c, 0x93, 0xc8, 0xbf, 0x8f, 0xd4, 0xd7, 0x1b, 0x69,
    0x6a, 0x69, 0xca, 0x7a, 0x4c, 0x8e, 0x90, 0x67, 0x92, 0x40, 0x2f, 0x4c, 0x60, 0xe8, 0xcc,
    0x88, 0x10,
]);

/// Recipient rewards account: `2d3Cb1fA9CcFgvcWtuP6n4rJNKk24rTqTxa1ywAxBUib`
pub const RECIPIENT_REWARDS: Pubkey = Pubkey::new_from_array([
    0x18, 0x17, 0x15, 0x55, 0x80, 0x6c, 0xea, 0x48, 0x1d, 0xf9, 0x26, 0xd5, 0xc6, 0xad, 0xe5,
    0x31, 0x02, 0x12, 0x78, 0xe9, 0xe0, 0xb1, 0x41, 0x5b, 0x69, 0x26, 0x07, 0xeb, 0x11, 0x62,
    0xa6, 0x58,
]);

/// Lockup pool: `EJi4Rj2u1VXiLpKtaqeQh3w4XxAGLFqnAG1jCorSvVmg`
pub const LOCKUP_POOL: Pubkey = Pubkey::new_from_array([
    0xc5, 0xb1, 0x3a, 0xbc, 0x90, 0x5c, 0xce, 0x8e, 0x2d, 0x8d, 0xce, 0xc1, 0x53, 0x00, 0xd8,
    0xaa, 0xca, 0x34, 0x8f, 0x0d, 0x38, 0x56, 0x47, 0x07, 0xfb, 0x76, 0x7a, 0xbb, 0xff, 0xe4,
    0xdf, 0x87,
]);

// ---------------------------------------------------------------------------
// Stake accounts
// ---------------------------------------------------------------------------

/// Stake config: `h4BWpb5mVFxabgskaEdsuDbkNdG3MpbELDdXPdNSkKH`
pub const STAKE_CONFIG: Pubkey = Pubkey::new_from_array([
    0x0a, 0x42, 0xd4, 0x56, 0x91, 0x9f, 0x2d, 0x7e, 0xe0, 0xbe, 0xf0, 0x8c, 0x12, 0x0f, 0xc8,
    0xd7, 0x90, 0x35, 0x63, 0xd4, 0xca, 0x08, 0xc2, 0xa2, 0xe6, 0xa5, 0xe0, 0xff, 0x64, 0x29,
    0xb8, 0x68,
]);

/// Stake vault token account: `319k4mx787DPAhfe6pssjsz3rLrSC9SxHYfuxbyuzuHo`
pub const STAKE_VAULT: Pubkey = Pubkey::new_from_array([
    0x1d, 0xc1, 0x42, 0x4f, 0xd5, 0x2b, 0xf4, 0x3e, 0xaa, 0x24, 0x70, 0xd0, 0x32, 0xc4, 0x8d,
    0x22, 0xb6, 0x9b, 0x48, 0x3d, 0xf9, 0xb8, 0xff, 0xf6, 0x15, 0x4a, 0xf2, 0x12, 0x17, 0x6c,
    0xb6, 0x46,
]);

/// Holder rewards account of the stake vault:
/// `62WN4pmhwbaA14uyVWzPayNQatasoraC7yjHSxBjM9zK`
pub const STAKE_VAULT_HOLDER_REWARDS: Pubkey = Pubkey::new_from_array([
    0x4a, 0xad, 0x37, 0x6e, 0x11, 0x67, 0xd9, 0xd0, 0x4d, 0x5c, 0x87, 0x10, 0x2e, 0xd5, 0x33,
    0xd3, 0x04, 0xca, 0x44, 0xb7, 0x3d, 0xa0, 0x02, 0xdc, 0x01, 0x94, 0x59, 0x27, 0x6e, 0xd0,
    0xd0, 0x5c,
]);

// ---------------------------------------------------------------------------
// Sizes, decimals and fee policy
// ---------------------------------------------------------------------------

/// Size in bytes of a lockup record.
pub const LOCKUP_ACCOUNT_SIZE: u64 = 160;

/// Size in bytes of a validator stake record.
pub const VALIDATOR_STAKE_ACCOUNT_SIZE: u64 = 200;

/// PAL has 9 decimal places.
pub const PAL_DECIMALS: u32 = 9;

/// Priority fee in micro-lamports per compute unit.
pub const DEFAULT_COMPUTE_UNIT_PRICE: u64 = 1_000;

/// Compute-unit ceilings per operation.
pub mod compute_units {
    pub const LOCK: u32 = 1_400_000;
    pub const UNLOCK: u32 = 400_000;
    pub const WITHDRAW: u32 = 600_000;
    pub const VALIDATOR_INITIALIZE: u32 = 300_000;
    pub const VALIDATOR_STAKE: u32 = 1_400_000;
    pub const UNSTAKE: u32 = 300_000;
}

/// Every address the SDK references, grouped so a deployment other than
/// mainnet (or a test) can swap them out. `Default` is the mainnet table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramIds {
    pub lockup_program: Pubkey,
    pub rewards_program: Pubkey,
    pub stake_program: Pubkey,
    pub mint: Pubkey,
    pub extra_account_metas: Pubkey,
    pub holder_rewards_pool: Pubkey,
    pub recipient_rewards: Pubkey,
    pub lockup_pool: Pubkey,
    pub stake_config: Pubkey,
    pub stake_vault: Pubkey,
    pub stake_vault_holder_rewards: Pubkey,
}

impl Default for ProgramIds {
    fn default() -> Self {
        Self {
            lockup_program: LOCKUP_PROGRAM_ID,
            rewards_program: REWARDS_PROGRAM_ID,
            stake_program: STAKE_PROGRAM_ID,
            mint: PAL_MINT,
            extra_account_metas: EXTRA_ACCOUNT_METAS,
            holder_rewards_pool: HOLDER_REWARDS_POOL,
            recipient_rewards: RECIPIENT_REWARDS,
            lockup_pool: LOCKUP_POOL,
            stake_config: STAKE_CONFIG,
            stake_vault: STAKE_VAULT,
            stake_vault_holder_rewards: STAKE_VAULT_HOLDER_REWARDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_match_base58() {
        let table = [
            (LOCKUP_PROGRAM_ID, "2fzrtg7ckXTFxjgsXbAWLLvXr4wJK9xfUjJJ69uZ7chb"),
            (REWARDS_PROGRAM_ID, "7LdHk6jnrY4kJW79mVXshTzduvgn3yz4hZzHpzTbt7Ph"),
            (STAKE_PROGRAM_ID, "PStake1111111111111111111111111111111111111"),
            (PAL_MINT, "HV9WocvHgRAkYAYmNzvBGHgCj2Vg2Z6N7VffouyiHJdu"),
            (EXTRA_ACCOUNT_METAS, "B7HWKeRXgzHTfKdh3Ybf4NkizXWGq9UDmaMgXe6jKKW"),
            (HOLDER_REWARDS_POOL, "9EeBEci7SovWiZpaLM7xzPQpYywa8DY865WmHYRC6vVD"),
            (RECIPIENT_REWARDS, "2d3Cb1fA9CcFgvcWtuP6n4rJNKk24rTqTxa1ywAxBUib"),
            (LOCKUP_POOL, "EJi4Rj2u1VXiLpKtaqeQh3w4XxAGLFqnAG1jCorSvVmg"),
            (STAKE_CONFIG, "h4BWpb5mVFxabgskaEdsuDbkNdG3MpbELDdXPdNSkKH"),
            (STAKE_VAULT, "319k4mx787DPAhfe6pssjsz3rLrSC9SxHYfuxbyuzuHo"),
            (
                STAKE_VAULT_HOLDER_REWARDS,
                "62WN4pmhwbaA14uyVWzPayNQatasoraC7yjHSxBjM9zK",
            ),
        ];
        for (key, expected) in table {
            assert_eq!(key.to_string(), expected);
        }
    }

    #[test]
    fn program_ids_partial_override_from_json() {
        let json = r#"{ "stake_program": "11111111111111111111111111111111" }"#;
        let ids: ProgramIds = serde_json::from_str(json).unwrap();
        assert_eq!(ids.stake_program, Pubkey::default());
        assert_eq!(ids.lockup_program, LOCKUP_PROGRAM_ID);
        assert_eq!(ids.mint, PAL_MINT);
    }
}
