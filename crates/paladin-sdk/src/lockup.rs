//! Lockup program instructions and transactions.
//!
//! The program decodes accounts positionally, so the order of every
//! account list below is part of the wire contract.

use sol_tx::{system, AccountMeta, Instruction, Keypair, Pubkey, VersionedTransaction};
use sol_tx::TOKEN_2022_PROGRAM_ID;

use crate::amount::Amount;
use crate::assemble::{assemble, TxContext};
use crate::constants::{compute_units, LOCKUP_ACCOUNT_SIZE};
use crate::error::Result;
use crate::idl::lockup_ix;
use crate::pda::{find_escrow_authority, find_holder_rewards, token_2022_account};

/// `Lockup`: move `amount` from the authority's token account into escrow,
/// recorded in `lockup_account` on behalf of `beneficiary`.
///
/// Data: `[disc] ‖ beneficiary (32) ‖ amount u64 LE`.
///
/// Accounts:
/// 0. `[]` lockup authority
/// 1. `[signer, writable]` payer (the same wallet)
/// 2. `[writable]` depositor token account
/// 3. `[writable]` lockup pool
/// 4. `[signer, writable]` lockup account
/// 5. `[]` escrow authority
/// 6. `[writable]` escrow token account
/// 7. `[]` mint
/// 8. `[]` token-2022 program
/// 9. `[]` extra account metas
/// 10. `[writable]` holder rewards pool
/// 11. `[writable]` depositor holder rewards
/// 12. `[writable]` recipient rewards
/// 13. `[]` rewards program
pub fn lockup_instruction(
    ctx: &TxContext<'_>,
    authority: &Pubkey,
    beneficiary: &Pubkey,
    lockup_account: &Pubkey,
    amount: Amount,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.lockup.discriminant(lockup_ix::LOCKUP)?;

    let mut data = Vec::with_capacity(41);
    data.push(discriminant);
    data.extend_from_slice(beneficiary.as_ref());
    data.extend_from_slice(&amount.to_le_bytes());

    let (escrow_authority, _) = find_escrow_authority(&ids.lockup_program)?;
    let escrow_token_account = token_2022_account(&escrow_authority, &ids.mint)?;
    let depositor_token_account = token_2022_account(authority, &ids.mint)?;
    let (holder_rewards, _) =
        find_holder_rewards(&depositor_token_account, Some(&ids.rewards_program))?;

    let accounts = vec![
        AccountMeta::new_readonly(*authority, false),
        AccountMeta::new(*authority, true),
        AccountMeta::new(depositor_token_account, false),
        AccountMeta::new(ids.lockup_pool, false),
        AccountMeta::new(*lockup_account, true),
        AccountMeta::new_readonly(escrow_authority, false),
        AccountMeta::new(escrow_token_account, false),
        AccountMeta::new_readonly(ids.mint, false),
        AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
        AccountMeta::new_readonly(ids.extra_account_metas, false),
        AccountMeta::new(ids.holder_rewards_pool, false),
        AccountMeta::new(holder_rewards, false),
        AccountMeta::new(ids.recipient_rewards, false),
        AccountMeta::new_readonly(ids.rewards_program, false),
    ];

    Ok(Instruction {
        program_id: ids.lockup_program,
        accounts,
        data,
    })
}

/// `Unlock`: start the unlock period of `lockup_account`.
///
/// Accounts:
/// 0. `[signer]` lockup authority
/// 1. `[writable]` lockup pool
/// 2. `[writable]` lockup account
pub fn unlock_instruction(
    ctx: &TxContext<'_>,
    authority: &Pubkey,
    lockup_account: &Pubkey,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.lockup.discriminant(lockup_ix::UNLOCK)?;

    Ok(Instruction {
        program_id: ids.lockup_program,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(ids.lockup_pool, false),
            AccountMeta::new(*lockup_account, false),
        ],
        data: vec![discriminant],
    })
}

/// `Withdraw`: return unlocked tokens to the authority's token account and
/// close `lockup_account`, sending its lamports to the authority.
///
/// Accounts:
/// 0. `[signer]` lockup authority
/// 1. `[writable]` lamport destination
/// 2. `[writable]` token destination
/// 3. `[writable]` lockup account
/// 4. `[]` escrow authority
/// 5. `[writable]` escrow token account
/// 6. `[]` mint
/// 7. `[]` token-2022 program
/// 8. `[]` extra account metas
/// 9. `[writable]` holder rewards pool
/// 10. `[writable]` destination holder rewards
/// 11. `[writable]` recipient rewards
/// 12. `[]` rewards program
pub fn withdraw_instruction(
    ctx: &TxContext<'_>,
    authority: &Pubkey,
    lockup_account: &Pubkey,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.lockup.discriminant(lockup_ix::WITHDRAW)?;

    let (escrow_authority, _) = find_escrow_authority(&ids.lockup_program)?;
    let escrow_token_account = token_2022_account(&escrow_authority, &ids.mint)?;
    let token_destination = token_2022_account(authority, &ids.mint)?;
    let (holder_rewards, _) = find_holder_rewards(&token_destination, Some(&ids.rewards_program))?;

    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(*authority, false),
        AccountMeta::new(token_destination, false),
        AccountMeta::new(*lockup_account, false),
        AccountMeta::new_readonly(escrow_authority, false),
        AccountMeta::new(escrow_token_account, false),
        AccountMeta::new_readonly(ids.mint, false),
        AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
        AccountMeta::new_readonly(ids.extra_account_metas, false),
        AccountMeta::new(ids.holder_rewards_pool, false),
        AccountMeta::new(holder_rewards, false),
        AccountMeta::new(ids.recipient_rewards, false),
        AccountMeta::new_readonly(ids.rewards_program, false),
    ];

    Ok(Instruction {
        program_id: ids.lockup_program,
        accounts,
        data: vec![discriminant],
    })
}

/// Create `lockup_account` (funded with `rent_lamports`, owned by the
/// lockup program) and lock `amount` into it.
///
/// The returned transaction already carries the lockup account's
/// signature; only the payer's slot is left.
pub fn build_lock_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    beneficiary: &Pubkey,
    amount: Amount,
    lockup_account: &Keypair,
    rent_lamports: u64,
) -> Result<VersionedTransaction> {
    let lockup_pubkey = lockup_account.pubkey();
    let create = system::create_account(
        payer,
        &lockup_pubkey,
        rent_lamports,
        LOCKUP_ACCOUNT_SIZE,
        &ctx.program_ids.lockup_program,
    );
    let lock = lockup_instruction(ctx, payer, beneficiary, &lockup_pubkey, amount)?;

    tracing::debug!(
        lockup_account = %lockup_pubkey,
        beneficiary = %beneficiary,
        amount = %amount,
        rent_lamports,
        "building lock transaction"
    );
    assemble(
        payer,
        ctx.budget(compute_units::LOCK),
        vec![create, lock],
        ctx.recent_blockhash,
        &[lockup_account],
    )
}

pub fn build_unlock_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    lockup_account: &Pubkey,
) -> Result<VersionedTransaction> {
    let unlock = unlock_instruction(ctx, payer, lockup_account)?;
    assemble(
        payer,
        ctx.budget(compute_units::UNLOCK),
        vec![unlock],
        ctx.recent_blockhash,
        &[],
    )
}

pub fn build_withdraw_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    lockup_account: &Pubkey,
) -> Result<VersionedTransaction> {
    let withdraw = withdraw_instruction(ctx, payer, lockup_account)?;
    assemble(
        payer,
        ctx.budget(compute_units::WITHDRAW),
        vec![withdraw],
        ctx.recent_blockhash,
        &[],
    )
}
