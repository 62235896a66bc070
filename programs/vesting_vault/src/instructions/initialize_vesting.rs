use anchor_lang::prelude::*;
use anchor_spl::token::{self, Token, TokenAccount, Transfer};

use crate::constants::{DISCRIMINATOR_LEN, VAULT_STATE_SEED, VAULT_TOKEN_SEED, VESTING_SEED};
use crate::error::VestingError;
use crate::state::{VaultState, VestingAccount};

/// Records a schedule for `beneficiary` starting now and moves the full
/// allocation from the admin's token account into vault custody.
pub fn handler(
    ctx: Context<InitializeVesting>,
    beneficiary: Pubkey,
    total_tokens: u64,
    end_at: i64,
    cliff_period_till: i64,
) -> Result<()> {
    let st = &ctx.accounts.vault_state;
    st.ensure_admin(&ctx.accounts.admin.key())?;
    st.ensure_mint(&ctx.accounts.admin_token_account.mint)?;
    require_keys_eq!(
        ctx.accounts.admin_token_account.owner,
        ctx.accounts.admin.key(),
        VestingError::InvalidTokenAccount
    );

    let now = Clock::get()?.unix_timestamp;
    let schedule = VestingAccount::new(
        beneficiary,
        total_tokens,
        now,
        end_at,
        cliff_period_till,
        ctx.bumps.vesting_account,
    )?;

    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.admin_token_account.to_account_info(),
                to: ctx.accounts.vault_token_account.to_account_info(),
                authority: ctx.accounts.admin.to_account_info(),
            },
        ),
        total_tokens,
    )?;

    let total_deposited = ctx.accounts.vault_state.record_deposit(total_tokens)?;
    ctx.accounts.vesting_account.set_inner(schedule);

    emit!(VestingInitialized {
        beneficiary,
        total_tokens,
        started_at: now,
        end_at,
        cliff_period_till,
        total_deposited,
    });

    msg!(
        "[vesting_vault] schedule created beneficiary={} total={} end_at={} cliff={}",
        beneficiary,
        total_tokens,
        end_at,
        cliff_period_till
    );
    Ok(())
}

/// Creates the `[b"vesting", beneficiary]` PDA and funds it from the admin.
///
/// A second schedule for the same beneficiary fails inside `init` with the
/// system program's "account already in use" error (custom code 0), not
/// `VestingError::DuplicateBeneficiary`. Clients should report that failure
/// as `DuplicateBeneficiary`.
#[derive(Accounts)]
#[instruction(beneficiary: Pubkey)]
pub struct InitializeVesting<'info> {
    #[account(
        mut,
        seeds = [VAULT_STATE_SEED],
        bump = vault_state.bump,
        has_one = admin @ VestingError::InvalidAdmin,
    )]
    pub vault_state: Account<'info, VaultState>,

    /// One schedule per beneficiary: a second `init` on the same seeds fails.
    #[account(
        init,
        payer = admin,
        space = DISCRIMINATOR_LEN + VestingAccount::SIZE,
        seeds = [VESTING_SEED, beneficiary.as_ref()],
        bump
    )]
    pub vesting_account: Account<'info, VestingAccount>,

    #[account(
        mut,
        seeds = [VAULT_TOKEN_SEED, vault_state.key().as_ref()],
        bump,
        constraint = vault_token_account.mint == vault_state.mint @ VestingError::InvalidTokenMint,
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct VestingInitialized {
    pub beneficiary: Pubkey,
    pub total_tokens: u64,
    pub started_at: i64,
    pub end_at: i64,
    pub cliff_period_till: i64,
    pub total_deposited: u64,
}
