//! Ed25519 keypairs for auxiliary signers.
//!
//! Used for accounts that must sign their own creation (e.g. a fresh lockup
//! record) and by the in-process wallet. The secret seed is wiped when the
//! keypair is dropped.

use ed25519_dalek::{Signer, SigningKey};
use rand_core::{OsRng, RngCore};
use zeroize::Zeroize;

use crate::pubkey::{Pubkey, Signature};

pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a keypair from the OS CSPRNG.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        OsRng.fill_bytes(&mut seed);
        let keypair = Self::from_seed(&seed);
        seed.zeroize();
        keypair
    }

    /// Build a keypair from a 32-byte Ed25519 seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let mut seed = *seed;
        let signing_key = SigningKey::from_bytes(&seed);
        seed.zeroize();
        Self { signing_key }
    }

    pub fn pubkey(&self) -> Pubkey {
        Pubkey::new_from_array(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign_message(&self, message: &[u8]) -> Signature {
        Signature::new_from_array(self.signing_key.sign(message).to_bytes())
    }
}

impl Default for Keypair {
    fn default() -> Self {
        Self::new()
    }
}

// Never print secret material.
impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}
