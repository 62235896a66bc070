#![allow(ambiguous_glob_reexports)]

pub mod claim;
pub mod initialize_vault;
pub mod initialize_vesting;
pub mod quote_claimable;
pub mod rotate_admin;

pub use claim::*;
pub use initialize_vault::*;
pub use initialize_vesting::*;
pub use quote_claimable::*;
pub use rotate_admin::*;
