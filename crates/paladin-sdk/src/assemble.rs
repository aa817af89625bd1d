//! Transaction assembly.

use sol_tx::compute_budget::{set_compute_unit_limit, set_compute_unit_price};
use sol_tx::{Hash, Instruction, Keypair, Message, Pubkey, VersionedMessage, VersionedTransaction};

use crate::constants::ProgramIds;
use crate::error::Result;
use crate::idl::Idls;

/// Fee policy for one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputeBudget {
    pub unit_limit: u32,
    pub unit_price_micro_lamports: u64,
}

/// Inputs shared by every transaction builder.
#[derive(Debug, Clone, Copy)]
pub struct TxContext<'a> {
    pub program_ids: &'a ProgramIds,
    pub idls: &'a Idls,
    /// Priority fee in micro-lamports per compute unit.
    pub compute_unit_price: u64,
    pub recent_blockhash: Hash,
}

impl TxContext<'_> {
    pub fn budget(&self, unit_limit: u32) -> ComputeBudget {
        ComputeBudget {
            unit_limit,
            unit_price_micro_lamports: self.compute_unit_price,
        }
    }
}

/// Build a v0 transaction paid for by `payer`.
///
/// The compute-unit limit and price instructions always come first, followed
/// by `instructions` in order. `aux_signers` (e.g. a freshly generated
/// account) sign immediately; the payer's slot is left for the wallet.
pub fn assemble(
    payer: &Pubkey,
    budget: ComputeBudget,
    instructions: Vec<Instruction>,
    recent_blockhash: Hash,
    aux_signers: &[&Keypair],
) -> Result<VersionedTransaction> {
    let mut all = Vec::with_capacity(instructions.len() + 2);
    all.push(set_compute_unit_limit(budget.unit_limit));
    all.push(set_compute_unit_price(budget.unit_price_micro_lamports));
    all.extend(instructions);

    let message = Message::compile(payer, &all, recent_blockhash)?;
    let mut tx = VersionedTransaction::new_unsigned(VersionedMessage::V0(message));
    tx.partial_sign(aux_signers)?;

    tracing::debug!(
        payer = %payer,
        blockhash = %recent_blockhash,
        instructions = all.len(),
        signers = tx.signatures.len(),
        "assembled transaction"
    );
    Ok(tx)
}
