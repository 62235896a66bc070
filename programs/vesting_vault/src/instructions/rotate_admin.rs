use anchor_lang::prelude::*;

use crate::constants::VAULT_STATE_SEED;
use crate::state::VaultState;

pub fn handler(ctx: Context<RotateAdmin>, new_admin: Pubkey) -> Result<()> {
    let caller = ctx.accounts.admin.key();
    let old_admin = ctx.accounts.vault_state.rotate_admin(&caller, new_admin)?;

    emit!(AdminRotated {
        old_admin,
        new_admin,
    });

    msg!("[vesting_vault] admin rotated {} -> {}", old_admin, new_admin);
    Ok(())
}

#[derive(Accounts)]
pub struct RotateAdmin<'info> {
    #[account(mut, seeds = [VAULT_STATE_SEED], bump = vault_state.bump)]
    pub vault_state: Account<'info, VaultState>,

    pub admin: Signer<'info>,
}

#[event]
pub struct AdminRotated {
    pub old_admin: Pubkey,
    pub new_admin: Pubkey,
}
