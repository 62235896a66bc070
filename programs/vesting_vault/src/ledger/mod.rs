//! Host-side rendition of the vesting vault.
//!
//! Same state types and schedule math as the program, with the runtime's
//! guarantees made explicit: record addressing is a keyed map, per-beneficiary
//! serialization is a mutex, and token movement goes through [`TokenCustody`].

pub mod address;
pub mod custody;
pub mod processor;
pub mod store;
pub mod vault;

pub use address::RecordAddress;
pub use custody::TokenCustody;
pub use processor::{ClaimProcessor, ClaimQuote};
pub use store::VestingStore;
pub use vault::VaultManager;

use anchor_lang::prelude::{msg, Pubkey};

use crate::error::VestingError;
use crate::state::{VaultState, VestingAccount};

/// Parameters for a new schedule; it starts at the `now` of the call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduleInput {
    pub beneficiary: Pubkey,
    pub total_tokens: u64,
    pub end_at: i64,
    pub cliff_period_till: i64,
}

/// Vault, schedules and custody behind one handle.
pub struct VestingLedger<C> {
    vault: VaultManager,
    store: VestingStore,
    custody: C,
}

impl<C: TokenCustody> VestingLedger<C> {
    pub fn new(custody: C) -> Self {
        Self {
            vault: VaultManager::new(),
            store: VestingStore::new(),
            custody,
        }
    }

    /// Only `authority` may initialize the vault.
    pub fn with_authority(authority: Pubkey, custody: C) -> Self {
        Self {
            vault: VaultManager::with_authority(authority),
            store: VestingStore::new(),
            custody,
        }
    }

    pub fn initialize_vault(
        &self,
        caller: &Pubkey,
        admin: Pubkey,
        mint: Pubkey,
    ) -> Result<VaultState, VestingError> {
        self.vault.initialize(caller, admin, mint)
    }

    /// Admin-only. Validates the schedule, deposits `total_tokens` of `mint`
    /// from the caller into custody, then stores the record. Nothing is
    /// stored or counted if the deposit fails.
    pub fn initialize_vesting(
        &self,
        caller: &Pubkey,
        mint: &Pubkey,
        input: ScheduleInput,
        now: i64,
    ) -> Result<VestingAccount, VestingError> {
        self.vault.ensure_admin_deposit(caller, mint)?;
        let account = VestingAccount::new(
            input.beneficiary,
            input.total_tokens,
            now,
            input.end_at,
            input.cliff_period_till,
            0,
        )?;

        self.store.insert_with(account, |account| {
            let amount = account.total_tokens;
            self.vault.reserve_deposit(amount)?;
            self.custody.deposit(mint, caller, amount).map_err(|err| {
                self.vault.cancel_deposit(amount);
                msg!(
                    "[vesting_vault] deposit failed beneficiary={} amount={} err={}",
                    account.beneficiary,
                    amount,
                    err
                );
                VestingError::TransferFailed
            })
        })
    }

    pub fn claim(&self, caller: &Pubkey, beneficiary: &Pubkey, now: i64) -> Result<u64, VestingError> {
        self.processor().claim(caller, beneficiary, now)
    }

    pub fn quote_claimable(&self, beneficiary: &Pubkey, now: i64) -> Result<ClaimQuote, VestingError> {
        self.processor().quote(beneficiary, now)
    }

    pub fn rotate_admin(&self, caller: &Pubkey, new_admin: Pubkey) -> Result<Pubkey, VestingError> {
        self.vault.rotate_admin(caller, new_admin)
    }

    pub fn vault(&self) -> Result<VaultState, VestingError> {
        self.vault.state()
    }

    pub fn vesting_account(&self, beneficiary: &Pubkey) -> Result<VestingAccount, VestingError> {
        self.store.get(beneficiary)
    }

    pub fn processor(&self) -> ClaimProcessor<'_, C> {
        ClaimProcessor::new(&self.vault, &self.store, &self.custody)
    }

    pub fn custody(&self) -> &C {
        &self.custody
    }
}
