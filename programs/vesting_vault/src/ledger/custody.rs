use anchor_lang::prelude::Pubkey;

/// Token movement in and out of vault custody.
///
/// Both calls are synchronous and all-or-nothing: `Ok` means the full amount
/// moved, `Err` means nothing did.
pub trait TokenCustody {
    /// Move `amount` of `mint` from `from` into vault custody.
    fn deposit(&self, mint: &Pubkey, from: &Pubkey, amount: u64) -> anchor_lang::Result<()>;

    /// Move `amount` of `mint` out of vault custody to `to`.
    fn release(&self, mint: &Pubkey, to: &Pubkey, amount: u64) -> anchor_lang::Result<()>;
}
