//! Seed recipes for the program-derived accounts the Paladin programs use.
//!
//! The on-chain programs re-derive each of these from the same seeds and
//! reject the instruction if the address passed in differs.

use sol_tx::{find_program_address, get_associated_token_address_with_program_id, Pubkey};
use sol_tx::TOKEN_2022_PROGRAM_ID;

use crate::constants::REWARDS_PROGRAM_ID;
use crate::error::Result;

pub const ESCROW_AUTHORITY_SEED: &[u8] = b"escrow_authority";
pub const VAULT_AUTHORITY_SEED: &[u8] = b"vault_authority";
pub const HOLDER_REWARDS_SEED: &[u8] = b"holder";
pub const VALIDATOR_STAKE_SEED: &[u8] = b"validator_stake";
pub const SOL_STAKER_STAKE_SEED: &[u8] = b"sol_staker_stake";

/// Authority over the lockup program's token escrow.
pub fn find_escrow_authority(lockup_program: &Pubkey) -> Result<(Pubkey, u8)> {
    Ok(find_program_address(&[ESCROW_AUTHORITY_SEED], lockup_program)?)
}

/// Authority over a stake program vault.
pub fn find_vault_authority(vault: &Pubkey, stake_program: &Pubkey) -> Result<(Pubkey, u8)> {
    Ok(find_program_address(
        &[VAULT_AUTHORITY_SEED, vault.as_ref()],
        stake_program,
    )?)
}

/// Holder rewards account tracking `token_account`.
///
/// Derived under the rewards program unless `program_override` is given.
pub fn find_holder_rewards(
    token_account: &Pubkey,
    program_override: Option<&Pubkey>,
) -> Result<(Pubkey, u8)> {
    let program = program_override.unwrap_or(&REWARDS_PROGRAM_ID);
    Ok(find_program_address(
        &[HOLDER_REWARDS_SEED, token_account.as_ref()],
        program,
    )?)
}

/// Stake record of the validator owning `vote_account`.
pub fn find_validator_stake(
    vote_account: &Pubkey,
    stake_config: &Pubkey,
    stake_program: &Pubkey,
) -> Result<(Pubkey, u8)> {
    Ok(find_program_address(
        &[VALIDATOR_STAKE_SEED, vote_account.as_ref(), stake_config.as_ref()],
        stake_program,
    )?)
}

/// Stake record of a SOL staker, keyed by their native stake account.
pub fn find_sol_staker_stake(
    native_stake: &Pubkey,
    stake_config: &Pubkey,
    stake_program: &Pubkey,
) -> Result<(Pubkey, u8)> {
    Ok(find_program_address(
        &[SOL_STAKER_STAKE_SEED, native_stake.as_ref(), stake_config.as_ref()],
        stake_program,
    )?)
}

/// The Token-2022 associated account of `owner` for `mint`.
pub fn token_2022_account(owner: &Pubkey, mint: &Pubkey) -> Result<Pubkey> {
    Ok(get_associated_token_address_with_program_id(
        owner,
        mint,
        &TOKEN_2022_PROGRAM_ID,
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{
        LOCKUP_PROGRAM_ID, PAL_MINT, STAKE_CONFIG, STAKE_PROGRAM_ID, STAKE_VAULT,
        STAKE_VAULT_HOLDER_REWARDS,
    };

    #[test]
    fn escrow_authority_vector() {
        let (address, bump) = find_escrow_authority(&LOCKUP_PROGRAM_ID).unwrap();
        assert_eq!(address.to_string(), "F9vCykDbn6ZYUXAHasJov3aiQ1og2Vu4UzcdroKKh1sQ");
        assert_eq!(bump, 255);
    }

    #[test]
    fn stake_vault_holder_rewards_matches_mainnet_constant() {
        let (address, _) = find_holder_rewards(&STAKE_VAULT, None).unwrap();
        assert_eq!(address, STAKE_VAULT_HOLDER_REWARDS);
    }

    #[test]
    fn holder_rewards_program_override() {
        let other = Pubkey::new_from_array([0x11; 32]);
        let (default, _) = find_holder_rewards(&STAKE_VAULT, None).unwrap();
        let (overridden, _) = find_holder_rewards(&STAKE_VAULT, Some(&other)).unwrap();
        assert_ne!(default, overridden);
        assert_eq!(
            find_holder_rewards(&STAKE_VAULT, Some(&REWARDS_PROGRAM_ID)).unwrap().0,
            default
        );
    }

    #[test]
    fn vault_authority_vector() {
        let (address, bump) = find_vault_authority(&STAKE_VAULT, &STAKE_PROGRAM_ID).unwrap();
        assert_eq!(address.to_string(), "BX14XQR3C1cW76Ym3gF6937XpUSjNVFFwuvoB3H8HzPh");
        assert_eq!(bump, 254);
    }

    #[test]
    fn validator_stake_vector() {
        let vote = Pubkey::new_from_array([7; 32]);
        let (address, bump) = find_validator_stake(&vote, &STAKE_CONFIG, &STAKE_PROGRAM_ID).unwrap();
        assert_eq!(address.to_string(), "DRiaHdbb9uGaNmfuRtiYhEHUHhXEFLjXn1yPiYCewrk4");
        assert_eq!(bump, 253);

        // Pure: same inputs, same output.
        assert_eq!(
            find_validator_stake(&vote, &STAKE_CONFIG, &STAKE_PROGRAM_ID).unwrap(),
            (address, bump)
        );
    }

    #[test]
    fn sol_staker_stake_vector() {
        let native = Pubkey::new_from_array([9; 32]);
        let (address, bump) =
            find_sol_staker_stake(&native, &STAKE_CONFIG, &STAKE_PROGRAM_ID).unwrap();
        assert_eq!(address.to_string(), "8gCGET1DmEbJv2ZRQFEgRsp18BLwRW7pbpY9Noi1vesJ");
        assert_eq!(bump, 255);
    }

    #[test]
    fn validator_and_sol_staker_recipes_differ() {
        let key = Pubkey::new_from_array([9; 32]);
        let (a, _) = find_validator_stake(&key, &STAKE_CONFIG, &STAKE_PROGRAM_ID).unwrap();
        let (b, _) = find_sol_staker_stake(&key, &STAKE_CONFIG, &STAKE_PROGRAM_ID).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn escrow_token_account_vector() {
        let (escrow, _) = find_escrow_authority(&LOCKUP_PROGRAM_ID).unwrap();
        let ata = token_2022_account(&escrow, &PAL_MINT).unwrap();
        assert_eq!(ata.to_string(), "68TUUAVuDrKWAdNqyJdJHvstEg1FwPvvaUA7hpghR6Rg");
    }
}
