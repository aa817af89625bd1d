//! Stake program instructions and transactions.
//!
//! Two flows share the program: validators stake against a PDA keyed by
//! their vote account, SOL stakers against a PDA keyed by their native
//! stake account. Unstaking uses the same account layout for both.

use sol_tx::{system, AccountMeta, Instruction, Pubkey, VersionedTransaction};
use sol_tx::{SYSTEM_PROGRAM_ID, TOKEN_2022_PROGRAM_ID};

use crate::amount::Amount;
use crate::assemble::{assemble, TxContext};
use crate::constants::compute_units;
use crate::error::{Result, SdkError};
use crate::idl::stake_ix;
use crate::pda::{find_sol_staker_stake, find_validator_stake, find_vault_authority, token_2022_account};
use crate::rpc::RpcConnection;

/// Byte range of the authorized withdrawer in a vote account.
const VOTE_WITHDRAW_AUTHORITY: std::ops::Range<usize> = 36..68;

fn amount_data(discriminant: u8, amount: Amount) -> Vec<u8> {
    let mut data = Vec::with_capacity(9);
    data.push(discriminant);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

/// `InitializeValidatorStake`: set up the stake record of `vote_account`.
///
/// The record lives at a PDA, which cannot sign its own creation; fund it
/// first (see [`build_initialize_validator_stake_transaction`]).
///
/// Accounts:
/// 0. `[]` stake config
/// 1. `[writable]` validator stake
/// 2. `[]` validator vote account
/// 3. `[]` system program
pub fn initialize_validator_stake_instruction(
    ctx: &TxContext<'_>,
    vote_account: &Pubkey,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.stake.discriminant(stake_ix::INITIALIZE_VALIDATOR_STAKE)?;
    let (validator_stake, _) =
        find_validator_stake(vote_account, &ids.stake_config, &ids.stake_program)?;

    Ok(Instruction {
        program_id: ids.stake_program,
        accounts: vec![
            AccountMeta::new_readonly(ids.stake_config, false),
            AccountMeta::new(validator_stake, false),
            AccountMeta::new_readonly(*vote_account, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: vec![discriminant],
    })
}

/// `ValidatorStakeTokens`: move `amount` from `source_wallet`'s token
/// account into the stake vault, credited to `vote_account`'s validator.
///
/// Accounts:
/// 0. `[writable]` stake config
/// 1. `[writable]` validator stake
/// 2. `[writable]` validator stake authority
/// 3. `[writable]` source token account
/// 4. `[signer]` source token account owner
/// 5. `[]` mint
/// 6. `[writable]` stake vault
/// 7. `[writable]` vault holder rewards
/// 8. `[]` token-2022 program
pub fn validator_stake_tokens_instruction(
    ctx: &TxContext<'_>,
    source_wallet: &Pubkey,
    vote_account: &Pubkey,
    stake_authority: &Pubkey,
    amount: Amount,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.stake.discriminant(stake_ix::VALIDATOR_STAKE_TOKENS)?;
    let (validator_stake, _) =
        find_validator_stake(vote_account, &ids.stake_config, &ids.stake_program)?;
    let source_token_account = token_2022_account(source_wallet, &ids.mint)?;

    Ok(Instruction {
        program_id: ids.stake_program,
        accounts: vec![
            AccountMeta::new(ids.stake_config, false),
            AccountMeta::new(validator_stake, false),
            AccountMeta::new(*stake_authority, false),
            AccountMeta::new(source_token_account, false),
            AccountMeta::new_readonly(*source_wallet, true),
            AccountMeta::new_readonly(ids.mint, false),
            AccountMeta::new(ids.stake_vault, false),
            AccountMeta::new(ids.stake_vault_holder_rewards, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
        ],
        data: amount_data(discriminant, amount),
    })
}

/// `UnstakeTokens` against an existing stake record, paying out to the
/// authority's token account.
///
/// Accounts:
/// 0. `[writable]` stake config
/// 1. `[writable]` stake (validator or SOL staker)
/// 2. `[signer, writable]` stake authority
/// 3. `[writable]` stake vault
/// 4. `[writable]` vault authority
/// 5. `[writable]` vault holder rewards
/// 6. `[]` mint
/// 7. `[writable]` destination token account
/// 8. `[]` token-2022 program
pub fn unstake_tokens_instruction(
    ctx: &TxContext<'_>,
    stake: &Pubkey,
    stake_authority: &Pubkey,
    amount: Amount,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let discriminant = ctx.idls.stake.discriminant(stake_ix::UNSTAKE_TOKENS)?;
    let (vault_authority, _) = find_vault_authority(&ids.stake_vault, &ids.stake_program)?;
    let destination = token_2022_account(stake_authority, &ids.mint)?;

    Ok(Instruction {
        program_id: ids.stake_program,
        accounts: vec![
            AccountMeta::new(ids.stake_config, false),
            AccountMeta::new(*stake, false),
            AccountMeta::new(*stake_authority, true),
            AccountMeta::new(ids.stake_vault, false),
            AccountMeta::new(vault_authority, false),
            AccountMeta::new(ids.stake_vault_holder_rewards, false),
            AccountMeta::new_readonly(ids.mint, false),
            AccountMeta::new(destination, false),
            AccountMeta::new_readonly(TOKEN_2022_PROGRAM_ID, false),
        ],
        data: amount_data(discriminant, amount),
    })
}

/// Unstake from the validator stake record of `vote_account`.
pub fn validator_unstake_tokens_instruction(
    ctx: &TxContext<'_>,
    vote_account: &Pubkey,
    stake_authority: &Pubkey,
    amount: Amount,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let (validator_stake, _) =
        find_validator_stake(vote_account, &ids.stake_config, &ids.stake_program)?;
    unstake_tokens_instruction(ctx, &validator_stake, stake_authority, amount)
}

/// Unstake from the SOL staker record of `native_stake`.
pub fn sol_staker_unstake_tokens_instruction(
    ctx: &TxContext<'_>,
    native_stake: &Pubkey,
    stake_authority: &Pubkey,
    amount: Amount,
) -> Result<Instruction> {
    let ids = ctx.program_ids;
    let (sol_staker_stake, _) =
        find_sol_staker_stake(native_stake, &ids.stake_config, &ids.stake_program)?;
    unstake_tokens_instruction(ctx, &sol_staker_stake, stake_authority, amount)
}

// -- lookups -----------------------------------------------------------------

/// The vote account whose node identity is `identity`.
///
/// Searches current validators, then delinquent ones.
pub async fn find_vote_account<R: RpcConnection>(rpc: &R, identity: &Pubkey) -> Result<Pubkey> {
    let status = rpc.get_vote_accounts().await?;
    let vote_account = status
        .iter()
        .find(|info| info.node_pubkey == *identity)
        .map(|info| info.vote_pubkey)
        .ok_or(SdkError::VoteAccountNotFound(*identity))?;

    tracing::debug!(%identity, %vote_account, "resolved vote account");
    Ok(vote_account)
}

/// The authorized withdrawer recorded in `vote_account`.
pub async fn vote_account_withdraw_authority<R: RpcConnection>(
    rpc: &R,
    vote_account: &Pubkey,
) -> Result<Pubkey> {
    let data = rpc
        .get_account_data(vote_account)
        .await?
        .ok_or(SdkError::AccountNotFound(*vote_account))?;
    let bytes = data.get(VOTE_WITHDRAW_AUTHORITY).ok_or_else(|| {
        SdkError::Serialization(format!(
            "vote account {vote_account} data is {} bytes, too short",
            data.len()
        ))
    })?;
    Ok(Pubkey::try_from_slice(bytes)?)
}

// -- transactions ------------------------------------------------------------

/// Fund the validator stake PDA with `rent_lamports` and initialize it.
pub fn build_initialize_validator_stake_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    vote_account: &Pubkey,
    rent_lamports: u64,
) -> Result<VersionedTransaction> {
    let ids = ctx.program_ids;
    let (validator_stake, _) =
        find_validator_stake(vote_account, &ids.stake_config, &ids.stake_program)?;
    let fund = system::transfer(payer, &validator_stake, rent_lamports);
    let initialize = initialize_validator_stake_instruction(ctx, vote_account)?;

    tracing::debug!(
        %vote_account,
        %validator_stake,
        rent_lamports,
        "building validator stake initialization"
    );
    assemble(
        payer,
        ctx.budget(compute_units::VALIDATOR_INITIALIZE),
        vec![fund, initialize],
        ctx.recent_blockhash,
        &[],
    )
}

pub fn build_validator_stake_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    vote_account: &Pubkey,
    stake_authority: &Pubkey,
    amount: Amount,
) -> Result<VersionedTransaction> {
    let stake =
        validator_stake_tokens_instruction(ctx, payer, vote_account, stake_authority, amount)?;
    assemble(
        payer,
        ctx.budget(compute_units::VALIDATOR_STAKE),
        vec![stake],
        ctx.recent_blockhash,
        &[],
    )
}

pub fn build_validator_unstake_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    vote_account: &Pubkey,
    amount: Amount,
) -> Result<VersionedTransaction> {
    let unstake = validator_unstake_tokens_instruction(ctx, vote_account, payer, amount)?;
    assemble(
        payer,
        ctx.budget(compute_units::UNSTAKE),
        vec![unstake],
        ctx.recent_blockhash,
        &[],
    )
}

pub fn build_sol_staker_unstake_transaction(
    ctx: &TxContext<'_>,
    payer: &Pubkey,
    native_stake: &Pubkey,
    amount: Amount,
) -> Result<VersionedTransaction> {
    let unstake = sol_staker_unstake_tokens_instruction(ctx, native_stake, payer, amount)?;
    assemble(
        payer,
        ctx.budget(compute_units::UNSTAKE),
        vec![unstake],
        ctx.recent_blockhash,
        &[],
    )
}
