use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use anchor_lang::prelude::{msg, Pubkey};

use crate::error::VestingError;
use crate::state::VaultState;

/// Owns the vault singleton for a host ledger.
///
/// The admin/mint record sits behind a read-mostly lock; the deposit and
/// release counters are atomics so claims for different beneficiaries never
/// contend on the vault.
#[derive(Debug, Default)]
pub struct VaultManager {
    authority: Option<Pubkey>,
    state: RwLock<Option<VaultState>>,
    deposited: AtomicU64,
    released: AtomicU64,
}

impl VaultManager {
    /// First caller installs itself as admin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only `authority` may initialize.
    pub fn with_authority(authority: Pubkey) -> Self {
        Self {
            authority: Some(authority),
            ..Self::default()
        }
    }

    pub fn initialize(
        &self,
        caller: &Pubkey,
        admin: Pubkey,
        mint: Pubkey,
    ) -> Result<VaultState, VestingError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.is_some() {
            return Err(VestingError::AlreadyInitialized);
        }
        VaultState::authorize_initializer(caller, &admin, self.authority.as_ref())?;

        let vault = VaultState::new(admin, mint, 0);
        *state = Some(vault.clone());
        msg!("[vesting_vault] vault initialized admin={} mint={}", admin, mint);
        Ok(vault)
    }

    pub fn is_initialized(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Snapshot including the current counters.
    pub fn state(&self) -> Result<VaultState, VestingError> {
        let mut vault = self
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(VestingError::NotFound)?;
        vault.total_deposited = self.deposited.load(Ordering::Acquire);
        vault.total_released = self.released.load(Ordering::Acquire);
        Ok(vault)
    }

    pub fn mint(&self) -> Result<Pubkey, VestingError> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|vault| vault.mint)
            .ok_or(VestingError::NotFound)
    }

    /// Checks that `caller` administers the vault and `mint` is its token.
    pub fn ensure_admin_deposit(&self, caller: &Pubkey, mint: &Pubkey) -> Result<(), VestingError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let vault = state.as_ref().ok_or(VestingError::NotFound)?;
        vault.ensure_admin(caller)?;
        vault.ensure_mint(mint)
    }

    pub fn rotate_admin(&self, caller: &Pubkey, new_admin: Pubkey) -> Result<Pubkey, VestingError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let vault = state.as_mut().ok_or(VestingError::NotFound)?;
        let old = vault.rotate_admin(caller, new_admin)?;
        msg!("[vesting_vault] admin rotated {} -> {}", old, new_admin);
        Ok(old)
    }

    /// Reserves room in the deposit counter; undo with [`Self::cancel_deposit`].
    pub(crate) fn reserve_deposit(&self, amount: u64) -> Result<u64, VestingError> {
        self.deposited
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |d| d.checked_add(amount))
            .map(|prev| prev + amount)
            .map_err(|_| VestingError::Overflow)
    }

    pub(crate) fn cancel_deposit(&self, amount: u64) {
        self.deposited.fetch_sub(amount, Ordering::AcqRel);
    }

    /// Reserves `amount` against the release counter, which may never pass
    /// the deposit counter. Undo with [`Self::cancel_release`].
    pub(crate) fn reserve_release(&self, amount: u64) -> Result<u64, VestingError> {
        self.released
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |released| {
                released
                    .checked_add(amount)
                    .filter(|next| *next <= self.deposited.load(Ordering::Acquire))
            })
            .map(|prev| prev + amount)
            .map_err(|_| VestingError::Overflow)
    }

    pub(crate) fn cancel_release(&self, amount: u64) {
        self.released.fetch_sub(amount, Ordering::AcqRel);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::thread;

    use super::*;

    #[test]
    fn initializes_exactly_once() {
        let manager = VaultManager::new();
        let admin = Pubkey::new_unique();
        let mint = Pubkey::new_unique();

        assert!(matches!(manager.state(), Err(VestingError::NotFound)));
        let vault = manager.initialize(&admin, admin, mint).unwrap();
        assert_eq!((vault.admin, vault.mint), (admin, mint));

        let other = Pubkey::new_unique();
        assert!(matches!(
            manager.initialize(&other, other, Pubkey::new_unique()),
            Err(VestingError::AlreadyInitialized)
        ));
        assert_eq!(manager.state().unwrap().admin, admin);
    }

    #[test]
    fn unauthorized_initializer_leaves_vault_empty() {
        let authority = Pubkey::new_unique();
        let manager = VaultManager::with_authority(authority);
        let intruder = Pubkey::new_unique();

        assert!(matches!(
            manager.initialize(&intruder, intruder, Pubkey::new_unique()),
            Err(VestingError::InvalidAdmin)
        ));
        assert!(!manager.is_initialized());
        assert!(manager.initialize(&authority, authority, Pubkey::new_unique()).is_ok());
    }

    #[test]
    fn racing_initializers_produce_one_vault() {
        let manager = VaultManager::new();
        let barrier = Barrier::new(8);
        let mint = Pubkey::new_unique();

        let wins = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        let admin = Pubkey::new_unique();
                        barrier.wait();
                        manager.initialize(&admin, admin, mint).is_ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|won| *won)
                .count()
        });

        assert_eq!(wins, 1);
    }

    #[test]
    fn deposit_reservations_roll_back() {
        let manager = VaultManager::new();
        let admin = Pubkey::new_unique();
        manager.initialize(&admin, admin, Pubkey::new_unique()).unwrap();

        assert_eq!(manager.reserve_deposit(70).unwrap(), 70);
        assert_eq!(manager.reserve_deposit(30).unwrap(), 100);
        manager.cancel_deposit(30);
        assert!(matches!(
            manager.reserve_deposit(u64::MAX),
            Err(VestingError::Overflow)
        ));
        assert_eq!(manager.state().unwrap().total_deposited, 70);
    }

    #[test]
    fn releases_never_pass_deposits() {
        let manager = VaultManager::new();
        let admin = Pubkey::new_unique();
        manager.initialize(&admin, admin, Pubkey::new_unique()).unwrap();
        manager.reserve_deposit(100).unwrap();

        assert_eq!(manager.reserve_release(60).unwrap(), 60);
        assert!(matches!(manager.reserve_release(41), Err(VestingError::Overflow)));
        assert!(matches!(
            manager.reserve_release(u64::MAX),
            Err(VestingError::Overflow)
        ));
        assert_eq!(manager.reserve_release(40).unwrap(), 100);
        manager.cancel_release(40);

        let vault = manager.state().unwrap();
        assert_eq!((vault.total_deposited, vault.total_released), (100, 60));
    }

    #[test]
    fn racing_releases_stay_within_deposits() {
        let manager = VaultManager::new();
        let admin = Pubkey::new_unique();
        manager.initialize(&admin, admin, Pubkey::new_unique()).unwrap();
        manager.reserve_deposit(500).unwrap();
        let barrier = Barrier::new(8);

        let granted: u64 = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        (0..100)
                            .filter(|_| manager.reserve_release(1).is_ok())
                            .count() as u64
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(granted, 500);
        assert_eq!(manager.state().unwrap().total_released, 500);
    }
}
