use anchor_lang::prelude::{msg, Pubkey};

use crate::error::VestingError;
use crate::ledger::custody::TokenCustody;
use crate::ledger::store::VestingStore;
use crate::ledger::vault::VaultManager;

/// Point-in-time view of a schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimQuote {
    pub vested: u64,
    pub claimed: u64,
    pub claimable: u64,
}

/// Authorizes, computes and settles claims.
///
/// Ordering is state-then-transfer: the claimed total and the vault's release
/// counter are bumped, then the release is requested. Everything runs inside
/// `VestingStore::settle`, so the record's mutex is held across both steps
/// and a failed release restores the record.
pub struct ClaimProcessor<'a, C> {
    vault: &'a VaultManager,
    store: &'a VestingStore,
    custody: &'a C,
}

impl<'a, C: TokenCustody> ClaimProcessor<'a, C> {
    pub fn new(vault: &'a VaultManager, store: &'a VestingStore, custody: &'a C) -> Self {
        Self {
            vault,
            store,
            custody,
        }
    }

    pub fn claim(&self, caller: &Pubkey, beneficiary: &Pubkey, now: i64) -> Result<u64, VestingError> {
        if caller != beneficiary {
            return Err(VestingError::Unauthorized);
        }
        let mint = self.vault.mint()?;

        self.store.settle(beneficiary, |account| {
            let delta = account.claimable(now)?;
            if delta == 0 {
                msg!("[vesting_vault] nothing to claim beneficiary={} now={}", beneficiary, now);
                return Ok(0);
            }

            let claimed_total = account.record_claim(delta)?;
            let released_total = self.vault.reserve_release(delta)?;

            if let Err(err) = self.custody.release(&mint, beneficiary, delta) {
                self.vault.cancel_release(delta);
                msg!(
                    "[vesting_vault] release failed, claim rolled back beneficiary={} amount={} err={}",
                    beneficiary,
                    delta,
                    err
                );
                return Err(VestingError::TransferFailed);
            }

            msg!(
                "[vesting_vault] claim beneficiary={} amount={} claimed_total={}/{} released_total={}",
                beneficiary,
                delta,
                claimed_total,
                account.total_tokens,
                released_total
            );
            Ok(delta)
        })
    }

    /// Read-only; anyone may ask.
    pub fn quote(&self, beneficiary: &Pubkey, now: i64) -> Result<ClaimQuote, VestingError> {
        let account = self.store.get(beneficiary)?;
        Ok(ClaimQuote {
            vested: account.vested_amount(now)?,
            claimed: account.claimed_tokens,
            claimable: account.claimable(now)?,
        })
    }
}
