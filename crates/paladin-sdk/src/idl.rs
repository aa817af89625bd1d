//! Instruction descriptor tables.
//!
//! Each on-chain program prefixes its instruction payloads with a one-byte
//! discriminant. The tables here map instruction names to those bytes. They
//! default to the built-in values and can be replaced by the program's
//! Shank IDL. Looking up a name that is not in the table is a hard error.

use serde::Deserialize;

use crate::error::{Result, SdkError};

pub mod lockup_ix {
    pub const INITIALIZE_LOCKUP_POOL: &str = "InitializeLockupPool";
    pub const LOCKUP: &str = "Lockup";
    pub const UNLOCK: &str = "Unlock";
    pub const WITHDRAW: &str = "Withdraw";
}

pub mod stake_ix {
    pub const INITIALIZE_CONFIG: &str = "InitializeConfig";
    pub const INITIALIZE_VALIDATOR_STAKE: &str = "InitializeValidatorStake";
    pub const VALIDATOR_STAKE_TOKENS: &str = "ValidatorStakeTokens";
    pub const UNSTAKE_TOKENS: &str = "UnstakeTokens";
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDescriptor {
    pub name: String,
    pub discriminant: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionTable {
    program: String,
    instructions: Vec<InstructionDescriptor>,
}

impl InstructionTable {
    pub fn new(program: impl Into<String>, entries: &[(&str, u8)]) -> Self {
        Self {
            program: program.into(),
            instructions: entries
                .iter()
                .map(|(name, discriminant)| InstructionDescriptor {
                    name: (*name).to_string(),
                    discriminant: *discriminant,
                })
                .collect(),
        }
    }

    /// The lockup program's instruction set.
    pub fn lockup() -> Self {
        Self::new(
            "paladin_lockup_program",
            &[
                (lockup_ix::INITIALIZE_LOCKUP_POOL, 0),
                (lockup_ix::LOCKUP, 1),
                (lockup_ix::UNLOCK, 2),
                (lockup_ix::WITHDRAW, 3),
            ],
        )
    }

    /// The stake program's instruction set.
    pub fn stake() -> Self {
        Self::new(
            "paladin_stake_program",
            &[
                (stake_ix::INITIALIZE_CONFIG, 0),
                (stake_ix::INITIALIZE_VALIDATOR_STAKE, 1),
                (stake_ix::VALIDATOR_STAKE_TOKENS, 2),
                (stake_ix::UNSTAKE_TOKENS, 3),
            ],
        )
    }

    /// Parse a Shank IDL document.
    ///
    /// Only `name` and each instruction's `name` and `discriminant.value`
    /// are read; everything else in the IDL is ignored.
    pub fn from_idl_json(json: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct Idl {
            name: String,
            instructions: Vec<IdlInstruction>,
        }

        #[derive(Deserialize)]
        struct IdlInstruction {
            name: String,
            discriminant: IdlDiscriminant,
        }

        #[derive(Deserialize)]
        struct IdlDiscriminant {
            #[serde(rename = "type")]
            ty: String,
            value: u8,
        }

        let idl: Idl = serde_json::from_str(json)?;
        let mut instructions = Vec::with_capacity(idl.instructions.len());
        for ix in idl.instructions {
            if ix.discriminant.ty != "u8" {
                return Err(SdkError::Serialization(format!(
                    "instruction {} has a {} discriminant, expected u8",
                    ix.name, ix.discriminant.ty
                )));
            }
            instructions.push(InstructionDescriptor {
                name: ix.name,
                discriminant: ix.discriminant.value,
            });
        }

        Ok(Self {
            program: idl.name,
            instructions,
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get(&self, name: &str) -> Result<&InstructionDescriptor> {
        self.instructions
            .iter()
            .find(|ix| ix.name == name)
            .ok_or_else(|| SdkError::UnknownInstruction(name.to_string()))
    }

    /// Discriminant byte for the instruction `name`.
    pub fn discriminant(&self, name: &str) -> Result<u8> {
        let ix = self.get(name)?;
        tracing::trace!(
            program = %self.program,
            instruction = name,
            discriminant = ix.discriminant,
            "resolved discriminant"
        );
        Ok(ix.discriminant)
    }
}

/// Descriptor tables for both programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idls {
    pub lockup: InstructionTable,
    pub stake: InstructionTable,
}

impl Default for Idls {
    fn default() -> Self {
        Self {
            lockup: InstructionTable::lockup(),
            stake: InstructionTable::stake(),
        }
    }
}
