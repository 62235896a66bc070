use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};

use anchor_lang::prelude::{msg, Pubkey};

use crate::constants::VESTING_SEED;
use crate::error::VestingError;
use crate::ledger::address::RecordAddress;
use crate::state::VestingAccount;

type Slot = Arc<Mutex<VestingAccount>>;

/// A reserved address is invisible to lookups until its funding lands.
#[derive(Debug)]
enum Record {
    Pending,
    Live(Slot),
}

/// Per-beneficiary vesting records.
///
/// The map lock is only held to look up, reserve or publish a slot, never
/// across custody calls; every mutation of a record happens under that
/// record's own mutex, so beneficiaries never contend with one another.
#[derive(Debug, Default)]
pub struct VestingStore {
    records: RwLock<HashMap<RecordAddress, Record>>,
}

impl VestingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn address(beneficiary: &Pubkey) -> RecordAddress {
        RecordAddress::derive(VESTING_SEED, beneficiary)
    }

    pub fn create(
        &self,
        beneficiary: Pubkey,
        total_tokens: u64,
        started_at: i64,
        end_at: i64,
        cliff_period_till: i64,
    ) -> Result<VestingAccount, VestingError> {
        let account =
            VestingAccount::new(beneficiary, total_tokens, started_at, end_at, cliff_period_till, 0)?;
        self.insert_with(account, |_| Ok(()))
    }

    /// Reserves the beneficiary's address, runs `fund` with the map unlocked,
    /// then publishes the record, or drops the reservation if `fund` fails.
    /// A second create for the same beneficiary sees the reservation and gets
    /// `DuplicateBeneficiary`.
    pub(crate) fn insert_with<F>(
        &self,
        account: VestingAccount,
        fund: F,
    ) -> Result<VestingAccount, VestingError>
    where
        F: FnOnce(&VestingAccount) -> Result<(), VestingError>,
    {
        let address = Self::address(&account.beneficiary);
        match self.write_records().entry(address) {
            Entry::Occupied(_) => return Err(VestingError::DuplicateBeneficiary),
            Entry::Vacant(vacant) => {
                vacant.insert(Record::Pending);
            }
        }

        if let Err(err) = fund(&account) {
            self.write_records().remove(&address);
            return Err(err);
        }

        self.write_records().insert(
            address,
            Record::Live(Arc::new(Mutex::new(account.clone()))),
        );
        msg!(
            "[vesting_vault] schedule stored beneficiary={} total={}",
            account.beneficiary,
            account.total_tokens
        );
        Ok(account)
    }

    pub fn get(&self, beneficiary: &Pubkey) -> Result<VestingAccount, VestingError> {
        let slot = self.slot(beneficiary)?;
        let account = slot.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(account.clone())
    }

    /// Runs `settle` on the beneficiary's record under its mutex. If `settle`
    /// fails the record is restored to what it was before the call, so a
    /// failed settlement leaves no trace.
    ///
    /// This is the only way to mutate a stored record; each settlement is
    /// linearizable per beneficiary.
    pub(crate) fn settle<R, F>(&self, beneficiary: &Pubkey, settle: F) -> Result<R, VestingError>
    where
        F: FnOnce(&mut VestingAccount) -> Result<R, VestingError>,
    {
        let slot = self.slot(beneficiary)?;
        let mut account = slot.lock().unwrap_or_else(PoisonError::into_inner);
        let before = account.clone();
        let result = settle(&mut account);
        if result.is_err() {
            *account = before;
        }
        result
    }

    fn slot(&self, beneficiary: &Pubkey) -> Result<Slot, VestingError> {
        match self
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&Self::address(beneficiary))
        {
            Some(Record::Live(slot)) => Ok(Arc::clone(slot)),
            Some(Record::Pending) | None => Err(VestingError::NotFound),
        }
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, HashMap<RecordAddress, Record>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Live records only.
    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|record| matches!(record, Record::Live(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
