use anchor_lang::prelude::*;

use crate::constants::VESTING_SEED;
use crate::state::VestingAccount;

pub fn handler(ctx: Context<QuoteClaimable>) -> Result<u64> {
    let vesting = &ctx.accounts.vesting_account;
    let now = Clock::get()?.unix_timestamp;

    let vested = vesting.vested_amount(now)?;
    let claimable = vesting.claimable(now)?;

    emit!(VestingQuote {
        beneficiary: vesting.beneficiary,
        vested_amount: vested,
        claimed_tokens: vesting.claimed_tokens,
        claimable,
        timestamp: now,
    });

    Ok(claimable)
}

#[derive(Accounts)]
pub struct QuoteClaimable<'info> {
    #[account(
        seeds = [VESTING_SEED, vesting_account.beneficiary.as_ref()],
        bump = vesting_account.bump
    )]
    pub vesting_account: Account<'info, VestingAccount>,
}

#[event]
pub struct VestingQuote {
    pub beneficiary: Pubkey,
    pub vested_amount: u64,
    pub claimed_tokens: u64,
    pub claimable: u64,
    pub timestamp: i64,
}
