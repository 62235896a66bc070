use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{DISCRIMINATOR_LEN, VAULT_STATE_SEED, VAULT_TOKEN_SEED};
use crate::state::VaultState;

/// Creates the singleton vault. A second call fails in `init` because the
/// vault state PDA is already allocated.
pub fn handler(ctx: Context<InitializeVault>, admin: Pubkey) -> Result<()> {
    VaultState::authorize_initializer(&ctx.accounts.payer.key(), &admin, None)?;

    let mint = ctx.accounts.mint.key();
    ctx.accounts
        .vault_state
        .set_inner(VaultState::new(admin, mint, ctx.bumps.vault_state));

    let timestamp = Clock::get()?.unix_timestamp;
    emit!(VaultInitialized {
        admin,
        mint,
        vault_token_account: ctx.accounts.vault_token_account.key(),
        timestamp,
    });

    msg!("[vesting_vault] vault initialized admin={} mint={}", admin, mint);
    Ok(())
}

/// Creates the `[b"vault_state"]` PDA and its custody token account.
///
/// A second call fails inside `init` with the system program's "account
/// already in use" error (custom code 0), not `VestingError::AlreadyInitialized`.
/// Clients should report that failure as `AlreadyInitialized`.
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    #[account(
        init,
        payer = payer,
        space = DISCRIMINATOR_LEN + VaultState::SIZE,
        seeds = [VAULT_STATE_SEED],
        bump
    )]
    pub vault_state: Account<'info, VaultState>,

    /// Custody account, owned by the vault state PDA.
    #[account(
        init,
        payer = payer,
        token::mint = mint,
        token::authority = vault_state,
        seeds = [VAULT_TOKEN_SEED, vault_state.key().as_ref()],
        bump
    )]
    pub vault_token_account: Account<'info, TokenAccount>,

    pub mint: Account<'info, Mint>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
}

#[event]
pub struct VaultInitialized {
    pub admin: Pubkey,
    pub mint: Pubkey,
    pub vault_token_account: Pubkey,
    pub timestamp: i64,
}
