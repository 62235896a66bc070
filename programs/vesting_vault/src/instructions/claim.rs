use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{VAULT_STATE_SEED, VAULT_TOKEN_SEED, VESTING_SEED};
use crate::error::VestingError;
use crate::state::{VaultState, VestingAccount};

/// Releases whatever has vested since the last claim. The claimed total is
/// bumped before the transfer CPI; a failing CPI aborts the transaction and
/// with it the bookkeeping.
pub fn handler(ctx: Context<Claim>) -> Result<u64> {
    // Capture the signer AccountInfo before taking mutable borrows.
    let vault_state_ai = ctx.accounts.vault_state.to_account_info();
    let vault_bump = ctx.accounts.vault_state.bump;
    let claimant = ctx.accounts.claimant.key();

    let vesting = &mut ctx.accounts.vesting_account;
    require_keys_eq!(claimant, vesting.beneficiary, VestingError::Unauthorized);

    let now = Clock::get()?.unix_timestamp;
    let delta = vesting.claimable(now)?;
    if delta == 0 {
        msg!("[vesting_vault] nothing to claim beneficiary={} now={}", claimant, now);
        return Ok(0);
    }

    let claimed_total = vesting.record_claim(delta)?;
    let total_tokens = vesting.total_tokens;
    let released_total = ctx.accounts.vault_state.record_release(delta)?;

    let signer_seeds: &[&[&[u8]]] = &[&[VAULT_STATE_SEED, &[vault_bump]]];
    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.vault_token_account.to_account_info(),
                to: ctx.accounts.beneficiary_token_account.to_account_info(),
                authority: vault_state_ai,
            },
            signer_seeds,
        ),
        delta,
    )?;

    emit!(TokensClaimed {
        beneficiary: claimant,
        amount: delta,
        claimed_total,
        total_tokens,
        released_total,
        timestamp: now,
    });

    msg!(
        "[vesting_vault] claim beneficiary={} amount={} claimed_total={}/{}",
        claimant,
        delta,
        claimed_total,
        total_tokens
    );
    Ok(delta)
}

#[derive(Accounts)]
pub struct Claim<'info> {
    #[account(mut, seeds = [VAULT_STATE_SEED], bump = vault_state.bump)]
    pub vault_state: Account<'info, VaultState>,

    #[account(
        mut,
        seeds = [VESTING_SEED, vesting_account.beneficiary.as_ref()],
        bump = vesting_account.bump,
        constraint = vesting_account.beneficiary == claimant.key() @ VestingError::Unauthorized,
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    #[account(
        mut,
        seeds = [VAULT_TOKEN_SEED, vault_state.key().as_ref()],
        bump,
        constraint = vault_token_account.mint == vault_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(
        mut,
        constraint = beneficiary_token_account.mint == vault_state.mint @ VestingError::InvalidTokenMint,
        constraint = beneficiary_token_account.owner == claimant.key() @ VestingError::InvalidTokenAccount,
    )]
    pub beneficiary_token_account: Account<'info, TokenAccount>,

    pub claimant: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[event]
pub struct TokensClaimed {
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub claimed_total: u64,
    pub total_tokens: u64,
    pub released_total: u64,
    pub timestamp: i64,
}
