//! Signed transaction envelope.
//!
//! ```text
//! Transaction:
//!   num_signatures   compact-u16
//!   signatures       64 bytes * num_signatures
//!   message          legacy or v0 (see `message`)
//! ```
//!
//! Signature slots follow the order of the message's signer keys. A
//! transaction may be signed by several parties at different times (a fresh
//! account keypair first, the wallet last), so unsigned slots stay zeroed
//! until their owner signs.

use crate::error::SolError;
use crate::keypair::Keypair;
use crate::message::{decode_compact_u16, encode_compact_u16, VersionedMessage};
use crate::pubkey::{Pubkey, Signature, SIGNATURE_BYTES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionedTransaction {
    pub signatures: Vec<Signature>,
    pub message: VersionedMessage,
}

impl VersionedTransaction {
    /// Wrap a message with one zeroed signature slot per required signer.
    pub fn new_unsigned(message: VersionedMessage) -> Self {
        let slots = message.message().header.num_required_signatures as usize;
        Self {
            signatures: vec![Signature::default(); slots],
            message,
        }
    }

    pub fn signer_keys(&self) -> &[Pubkey] {
        self.message.message().signer_keys()
    }

    /// Sign with each keypair in `signers`, writing its slot.
    ///
    /// Every keypair must be a required signer of the message; slots of
    /// signers not passed here are left untouched.
    pub fn partial_sign(&mut self, signers: &[&Keypair]) -> Result<(), SolError> {
        let message_bytes = self.message.serialize()?;

        for signer in signers {
            let pubkey = signer.pubkey();
            let slot = self
                .signer_keys()
                .iter()
                .position(|k| *k == pubkey)
                .ok_or_else(|| {
                    SolError::SigningError(format!("{pubkey} is not a required signer"))
                })?;
            self.signatures[slot] = signer.sign_message(&message_bytes);
        }

        Ok(())
    }

    /// The transaction id: the fee payer's signature.
    pub fn signature(&self) -> Option<&Signature> {
        self.signatures.first()
    }

    /// Whether every required slot carries a valid signature.
    pub fn is_fully_signed(&self) -> bool {
        self.verify_signatures().is_ok()
    }

    pub fn verify_signatures(&self) -> Result<(), SolError> {
        let message_bytes = self.message.serialize()?;
        let signers = self.signer_keys();
        if signers.len() != self.signatures.len() {
            return Err(SolError::SigningError(format!(
                "{} signature slots for {} signers",
                self.signatures.len(),
                signers.len()
            )));
        }

        for (key, signature) in signers.iter().zip(&self.signatures) {
            if !signature.verify(key, &message_bytes) {
                return Err(SolError::SigningError(format!(
                    "missing or invalid signature for {key}"
                )));
            }
        }
        Ok(())
    }

    /// Serialize into wire format, ready for `sendTransaction`.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let count = u16::try_from(self.signatures.len()).map_err(|_| {
            SolError::SerializationError("too many signatures".into())
        })?;
        let message_bytes = self.message.serialize()?;

        let mut wire =
            Vec::with_capacity(3 + self.signatures.len() * SIGNATURE_BYTES + message_bytes.len());
        wire.extend_from_slice(&encode_compact_u16(count));
        for signature in &self.signatures {
            wire.extend_from_slice(signature.as_ref());
        }
        wire.extend_from_slice(&message_bytes);

        Ok(wire)
    }

    /// Parse wire bytes, e.g. a transaction handed back by a wallet.
    pub fn deserialize(raw_tx: &[u8]) -> Result<Self, SolError> {
        let (num_sigs, compact_len) = decode_compact_u16(raw_tx)?;

        let sigs_end = compact_len + num_sigs as usize * SIGNATURE_BYTES;
        let sig_bytes = raw_tx.get(compact_len..sigs_end).ok_or_else(|| {
            SolError::SerializationError(
                "transaction too short: signature slots exceed length".into(),
            )
        })?;

        let signatures = sig_bytes
            .chunks_exact(SIGNATURE_BYTES)
            .map(|chunk| {
                let mut bytes = [0u8; SIGNATURE_BYTES];
                bytes.copy_from_slice(chunk);
                Signature::new_from_array(bytes)
            })
            .collect();

        let (message, message_len) = VersionedMessage::deserialize(&raw_tx[sigs_end..])?;
        if sigs_end + message_len != raw_tx.len() {
            return Err(SolError::SerializationError(format!(
                "{} trailing bytes after message",
                raw_tx.len() - sigs_end - message_len
            )));
        }

        Ok(Self {
            signatures,
            message,
        })
    }
}
