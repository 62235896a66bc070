use anchor_lang::prelude::Pubkey;

/// Deterministic record location derived from `(namespace, owner)`, the
/// host-side stand-in for a PDA.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordAddress([u8; 32]);

impl RecordAddress {
    pub fn derive(namespace: &[u8], owner: &Pubkey) -> Self {
        let mut hasher = blake3::Hasher::new();
        // Length prefix keeps (namespace, owner) pairs unambiguous.
        hasher.update(&(namespace.len() as u64).to_le_bytes());
        hasher.update(namespace);
        hasher.update(owner.as_ref());
        Self(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
