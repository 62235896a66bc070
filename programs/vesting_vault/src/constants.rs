//! Program-wide constants.

/// PDA seed for the singleton vault state.
pub const VAULT_STATE_SEED: &[u8] = b"vault_state";

/// PDA seed for the custodial token account, namespaced by the vault state.
pub const VAULT_TOKEN_SEED: &[u8] = b"vault";

/// PDA seed for per-beneficiary vesting accounts.
pub const VESTING_SEED: &[u8] = b"vesting";

/// Anchor account discriminator length.
pub const DISCRIMINATOR_LEN: usize = 8;
