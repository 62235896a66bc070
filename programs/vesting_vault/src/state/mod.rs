pub mod vault_state;
pub mod vesting_account;

pub use vault_state::*;
pub use vesting_account::*;
