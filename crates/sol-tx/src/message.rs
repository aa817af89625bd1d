//! Message compilation and the legacy / v0 wire formats.
//!
//! ```text
//! Message (legacy):
//!   num_required_sigs     u8
//!   num_readonly_signed   u8
//!   num_readonly_unsigned u8
//!   num_accounts          compact-u16
//!   account_keys          32 bytes * num_accounts
//!   recent_blockhash      32 bytes
//!   num_instructions      compact-u16
//!   instructions[]        (see below)
//!
//! Message (v0):
//!   0x80                  version prefix
//!   <legacy layout>
//!   num_lookup_tables     compact-u16 (always 0 here)
//!
//! Instruction:
//!   program_id_index      u8
//!   num_accounts          compact-u16
//!   account_indices       u8 * num_accounts
//!   data_len              compact-u16
//!   data                  u8 * data_len
//! ```

use crate::error::SolError;
use crate::instruction::Instruction;
use crate::pubkey::{Hash, Pubkey, PUBKEY_BYTES};

/// High bit set on the first byte marks a versioned message.
const MESSAGE_VERSION_PREFIX: u8 = 0x80;

// ---------------------------------------------------------------------------
// Compact-u16 encoding
// ---------------------------------------------------------------------------

/// Encode a `u16` value in Solana's compact-u16 format.
///
/// - Values 0..0x7f       -> 1 byte
/// - Values 0x80..0x3fff  -> 2 bytes
/// - Values 0x4000..      -> 3 bytes
pub fn encode_compact_u16(value: u16) -> Vec<u8> {
    let mut val = value as u32;
    let mut out = Vec::with_capacity(3);

    loop {
        let mut byte = (val & 0x7f) as u8;
        val >>= 7;
        if val > 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if val == 0 {
            break;
        }
    }

    out
}

/// Decode a compact-u16 value from a byte slice.
///
/// Returns `(value, bytes_consumed)` or an error if the data is truncated.
pub fn decode_compact_u16(data: &[u8]) -> Result<(u16, usize), SolError> {
    let mut value: u32 = 0;
    let mut consumed = 0usize;

    loop {
        let byte = *data.get(consumed).ok_or_else(|| {
            SolError::SerializationError(
                "unexpected end of data while decoding compact-u16".into(),
            )
        })?;
        value |= ((byte & 0x7f) as u32) << (7 * consumed);
        consumed += 1;

        if byte & 0x80 == 0 || consumed >= 3 {
            break;
        }
    }

    if value > u16::MAX as u32 {
        return Err(SolError::SerializationError(
            "compact-u16 value overflow".into(),
        ));
    }

    Ok((value as u16, consumed))
}

fn compact_len(len: usize, what: &str) -> Result<Vec<u8>, SolError> {
    let len = u16::try_from(len).map_err(|_| {
        SolError::SerializationError(format!("{what} length {len} exceeds compact-u16"))
    })?;
    Ok(encode_compact_u16(len))
}

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageHeader {
    /// Number of required signatures (first N account keys are signers).
    pub num_required_signatures: u8,
    /// How many of the signing accounts are read-only.
    pub num_readonly_signed_accounts: u8,
    /// How many of the non-signing accounts are read-only.
    pub num_readonly_unsigned_accounts: u8,
}

/// An instruction whose account references are indices into the message's
/// `account_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

/// A compiled message, the bytes every signer signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: MessageHeader,
    /// All account keys in canonical order:
    ///   1. writable signers (fee payer first)
    ///   2. read-only signers
    ///   3. writable non-signers
    ///   4. read-only non-signers
    pub account_keys: Vec<Pubkey>,
    pub recent_blockhash: Hash,
    pub instructions: Vec<CompiledInstruction>,
}

impl Message {
    /// Compile `instructions` with `payer` as the fee payer.
    ///
    /// Accounts referenced more than once are merged and keep the union of
    /// their signer / writable flags.
    pub fn compile(
        payer: &Pubkey,
        instructions: &[Instruction],
        recent_blockhash: Hash,
    ) -> Result<Self, SolError> {
        struct AccountEntry {
            pubkey: Pubkey,
            is_signer: bool,
            is_writable: bool,
        }

        // Instruction account lists are tiny, a Vec keeps insertion order.
        let mut entries: Vec<AccountEntry> = Vec::new();
        let mut upsert = |pubkey: Pubkey, signer: bool, writable: bool| {
            if let Some(entry) = entries.iter_mut().find(|e| e.pubkey == pubkey) {
                entry.is_signer |= signer;
                entry.is_writable |= writable;
            } else {
                entries.push(AccountEntry {
                    pubkey,
                    is_signer: signer,
                    is_writable: writable,
                });
            }
        };

        // Fee payer is always signer + writable, and inserted first.
        upsert(*payer, true, true);

        for ix in instructions {
            for meta in &ix.accounts {
                upsert(meta.pubkey, meta.is_signer, meta.is_writable);
            }
            // Program IDs are non-signer, read-only accounts.
            upsert(ix.program_id, false, false);
        }

        // Stable sort, so the payer stays first and each category keeps
        // insertion order.
        entries.sort_by_key(|e| match (e.is_signer, e.is_writable) {
            (true, true) => 0u8,
            (true, false) => 1,
            (false, true) => 2,
            (false, false) => 3,
        });

        if entries.len() > 256 {
            return Err(SolError::TransactionBuildError(format!(
                "{} accounts referenced, at most 256 fit in a message",
                entries.len()
            )));
        }

        let count = |what: &str, f: fn(&AccountEntry) -> bool| -> Result<u8, SolError> {
            let n = entries.iter().filter(|e| f(e)).count();
            u8::try_from(n).map_err(|_| {
                SolError::TransactionBuildError(format!("{n} {what}, at most 255 fit in a header"))
            })
        };
        let header = MessageHeader {
            num_required_signatures: count("signers", |e| e.is_signer)?,
            num_readonly_signed_accounts: count("read-only signers", |e| {
                e.is_signer && !e.is_writable
            })?,
            num_readonly_unsigned_accounts: count("read-only accounts", |e| {
                !e.is_signer && !e.is_writable
            })?,
        };

        let account_keys: Vec<Pubkey> = entries.iter().map(|e| e.pubkey).collect();
        let index_of = |key: &Pubkey| -> Result<u8, SolError> {
            account_keys
                .iter()
                .position(|k| k == key)
                .map(|i| i as u8)
                .ok_or_else(|| {
                    SolError::TransactionBuildError(format!("{key} not in account keys"))
                })
        };

        let mut compiled = Vec::with_capacity(instructions.len());
        for ix in instructions {
            let accounts = ix
                .accounts
                .iter()
                .map(|meta| index_of(&meta.pubkey))
                .collect::<Result<Vec<_>, _>>()?;
            compiled.push(CompiledInstruction {
                program_id_index: index_of(&ix.program_id)?,
                accounts,
                data: ix.data.clone(),
            });
        }

        Ok(Self {
            header,
            account_keys,
            recent_blockhash,
            instructions: compiled,
        })
    }

    /// The first `num_required_signatures` keys, in signature-slot order.
    pub fn signer_keys(&self) -> &[Pubkey] {
        let n = (self.header.num_required_signatures as usize).min(self.account_keys.len());
        &self.account_keys[..n]
    }

    pub fn fee_payer(&self) -> Option<&Pubkey> {
        self.account_keys.first()
    }

    /// Serialize in the legacy layout.
    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        let mut buf = Vec::with_capacity(256);

        buf.push(self.header.num_required_signatures);
        buf.push(self.header.num_readonly_signed_accounts);
        buf.push(self.header.num_readonly_unsigned_accounts);

        buf.extend_from_slice(&compact_len(self.account_keys.len(), "account keys")?);
        for key in &self.account_keys {
            buf.extend_from_slice(key.as_ref());
        }

        buf.extend_from_slice(self.recent_blockhash.as_ref());

        buf.extend_from_slice(&compact_len(self.instructions.len(), "instructions")?);
        for ix in &self.instructions {
            buf.push(ix.program_id_index);

            buf.extend_from_slice(&compact_len(ix.accounts.len(), "instruction accounts")?);
            buf.extend_from_slice(&ix.accounts);

            buf.extend_from_slice(&compact_len(ix.data.len(), "instruction data")?);
            buf.extend_from_slice(&ix.data);
        }

        Ok(buf)
    }

    /// Parse a legacy-layout message, returning it and the bytes consumed.
    fn deserialize(data: &[u8]) -> Result<(Self, usize), SolError> {
        let mut reader = Reader { data, pos: 0 };

        let header = MessageHeader {
            num_required_signatures: reader.u8()?,
            num_readonly_signed_accounts: reader.u8()?,
            num_readonly_unsigned_accounts: reader.u8()?,
        };

        let num_keys = reader.compact()?;
        let mut account_keys = Vec::with_capacity(num_keys);
        for _ in 0..num_keys {
            account_keys.push(Pubkey::try_from_slice(reader.take(PUBKEY_BYTES)?)?);
        }

        let blockhash: [u8; 32] = reader
            .take(32)?
            .try_into()
            .map_err(|_| SolError::SerializationError("blockhash truncated".into()))?;

        let num_instructions = reader.compact()?;
        let mut instructions = Vec::with_capacity(num_instructions);
        for _ in 0..num_instructions {
            let program_id_index = reader.u8()?;
            let n = reader.compact()?;
            let accounts = reader.take(n)?.to_vec();
            let n = reader.compact()?;
            let data = reader.take(n)?.to_vec();
            instructions.push(CompiledInstruction {
                program_id_index,
                accounts,
                data,
            });
        }

        let message = Self {
            header,
            account_keys,
            recent_blockhash: Hash::new_from_array(blockhash),
            instructions,
        };
        Ok((message, reader.pos))
    }
}

/// A message tagged with its wire version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionedMessage {
    Legacy(Message),
    /// Version 0 without address lookup tables.
    V0(Message),
}

impl VersionedMessage {
    pub fn message(&self) -> &Message {
        match self {
            VersionedMessage::Legacy(message) | VersionedMessage::V0(message) => message,
        }
    }

    pub fn serialize(&self) -> Result<Vec<u8>, SolError> {
        match self {
            VersionedMessage::Legacy(message) => message.serialize(),
            VersionedMessage::V0(message) => {
                let body = message.serialize()?;
                let mut buf = Vec::with_capacity(body.len() + 2);
                buf.push(MESSAGE_VERSION_PREFIX);
                buf.extend_from_slice(&body);
                buf.extend_from_slice(&encode_compact_u16(0));
                Ok(buf)
            }
        }
    }

    /// Parse a message, returning it and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> Result<(Self, usize), SolError> {
        let first = *data
            .first()
            .ok_or_else(|| SolError::SerializationError("empty message".into()))?;

        if first & MESSAGE_VERSION_PREFIX == 0 {
            let (message, len) = Message::deserialize(data)?;
            return Ok((VersionedMessage::Legacy(message), len));
        }

        let version = first & !MESSAGE_VERSION_PREFIX;
        if version != 0 {
            return Err(SolError::SerializationError(format!(
                "unsupported message version {version}"
            )));
        }

        let (message, len) = Message::deserialize(&data[1..])?;
        let (lookups, lookup_len) = decode_compact_u16(&data[1 + len..])?;
        if lookups != 0 {
            return Err(SolError::SerializationError(
                "address lookup tables are not supported".into(),
            ));
        }
        Ok((VersionedMessage::V0(message), 1 + len + lookup_len))
    }
}

struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], SolError> {
        let end = self.pos + n;
        let slice = self.data.get(self.pos..end).ok_or_else(|| {
            SolError::SerializationError(format!(
                "message truncated: need {n} bytes at offset {}",
                self.pos
            ))
        })?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, SolError> {
        Ok(self.take(1)?[0])
    }

    fn compact(&mut self) -> Result<usize, SolError> {
        let (value, len) = decode_compact_u16(&self.data[self.pos.min(self.data.len())..])?;
        self.pos += len;
        Ok(value as usize)
    }
}
