use anchor_lang::prelude::*;

use crate::error::VestingError;

/// Singleton vault state PDA (seeds = [b"vault_state"]).
#[account]
#[derive(Default, Debug, PartialEq, Eq)]
pub struct VaultState {
    /// Administrator allowed to create schedules and rotate itself.
    pub admin: Pubkey,
    /// The only token mint this vault accepts.
    pub mint: Pubkey,
    /// Lifetime allocations deposited into custody.
    pub total_deposited: u64,
    /// Lifetime amount released to beneficiaries.
    pub total_released: u64,
    pub bump: u8,
}

impl VaultState {
    pub const SIZE: usize =
        32 + // admin
        32 + // mint
        8 +  // total_deposited
        8 +  // total_released
        1;   // bump

    /// Initialization policy: the signer installs itself as admin. When a
    /// pre-configured `authority` is given, only that key may initialize.
    pub fn authorize_initializer(
        caller: &Pubkey,
        admin: &Pubkey,
        authority: Option<&Pubkey>,
    ) -> std::result::Result<(), VestingError> {
        if *admin == Pubkey::default() || caller != admin {
            return Err(VestingError::InvalidAdmin);
        }
        match authority {
            Some(authority) if authority != caller => Err(VestingError::InvalidAdmin),
            _ => Ok(()),
        }
    }

    pub fn new(admin: Pubkey, mint: Pubkey, bump: u8) -> Self {
        Self {
            admin,
            mint,
            total_deposited: 0,
            total_released: 0,
            bump,
        }
    }

    pub fn ensure_admin(&self, caller: &Pubkey) -> std::result::Result<(), VestingError> {
        if *caller != self.admin {
            return Err(VestingError::InvalidAdmin);
        }
        Ok(())
    }

    pub fn ensure_mint(&self, mint: &Pubkey) -> std::result::Result<(), VestingError> {
        if *mint != self.mint {
            return Err(VestingError::InvalidTokenMint);
        }
        Ok(())
    }

    pub fn record_deposit(&mut self, amount: u64) -> std::result::Result<u64, VestingError> {
        self.total_deposited = self
            .total_deposited
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;
        Ok(self.total_deposited)
    }

    /// Releases can never exceed what was deposited.
    pub fn record_release(&mut self, amount: u64) -> std::result::Result<u64, VestingError> {
        let released = self
            .total_released
            .checked_add(amount)
            .ok_or(VestingError::Overflow)?;
        if released > self.total_deposited {
            return Err(VestingError::Overflow);
        }
        self.total_released = released;
        Ok(released)
    }

    /// Swaps the admin key, returning the previous one.
    pub fn rotate_admin(
        &mut self,
        caller: &Pubkey,
        new_admin: Pubkey,
    ) -> std::result::Result<Pubkey, VestingError> {
        self.ensure_admin(caller)?;
        if new_admin == Pubkey::default() {
            return Err(VestingError::InvalidPubkey);
        }
        Ok(std::mem::replace(&mut self.admin, new_admin))
    }
}
