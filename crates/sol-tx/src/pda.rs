//! Program Derived Address (PDA) derivation.
//!
//! A PDA is `SHA-256(seed_0 || ... || seed_n || bump || program_id ||
//! "ProgramDerivedAddress")`, accepted only when the digest is NOT a valid
//! Ed25519 point, so no private key can ever sign for it. On-chain programs
//! re-derive the same address and compare, so this must stay bit-exact.

use sha2::{Digest, Sha256};

use crate::error::SolError;
use crate::pubkey::Pubkey;

/// Domain separator appended to every PDA hash.
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Maximum number of seeds, including the bump.
pub const MAX_SEEDS: usize = 16;

/// Maximum length of a single seed.
pub const MAX_SEED_LEN: usize = 32;

/// Find the canonical PDA for `seeds` under `program_id`.
///
/// Bumps are tried from 255 down to 0; the first off-curve candidate wins
/// and is returned together with its bump.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Pubkey,
) -> Result<(Pubkey, u8), SolError> {
    // Leave one slot for the bump.
    check_seeds(seeds, MAX_SEEDS - 1)?;

    for bump in (0u8..=255).rev() {
        if let Some(address) = derive_candidate(seeds, &[bump], program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::InvalidSeeds(
        "could not find valid PDA bump seed".into(),
    ))
}

/// Create a PDA from seeds that already include the bump.
///
/// Fails if the seeds are malformed or the digest lands on the curve.
pub fn create_program_address(seeds: &[&[u8]], program_id: &Pubkey) -> Result<Pubkey, SolError> {
    check_seeds(seeds, MAX_SEEDS)?;
    derive_candidate(seeds, &[], program_id).ok_or_else(|| {
        SolError::InvalidSeeds("derived address falls on the ed25519 curve".into())
    })
}

fn check_seeds(seeds: &[&[u8]], max_seeds: usize) -> Result<(), SolError> {
    if seeds.len() > max_seeds {
        return Err(SolError::InvalidSeeds(format!(
            "{} seeds given, at most {max_seeds} allowed",
            seeds.len()
        )));
    }
    if let Some((index, seed)) = seeds
        .iter()
        .enumerate()
        .find(|(_, seed)| seed.len() > MAX_SEED_LEN)
    {
        return Err(SolError::InvalidSeeds(format!(
            "seed {index} is {} bytes, at most {MAX_SEED_LEN} allowed",
            seed.len()
        )));
    }
    Ok(())
}

/// Returns `None` when the digest is a valid curve point.
fn derive_candidate(seeds: &[&[u8]], bump_seed: &[u8], program_id: &Pubkey) -> Option<Pubkey> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let candidate = Pubkey::new_from_array(hasher.finalize().into());
    if candidate.is_on_curve() {
        return None;
    }

    Some(candidate)
}
