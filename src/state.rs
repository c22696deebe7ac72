// src/state.rs

use std::collections::HashMap;
use std::fmt;

use crate::address::Address;

/// Failure inside the state store itself, never attributable to the content
/// of the transaction being processed.
#[derive(Debug)]
pub struct ContextError(pub String);

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "state context failure: {}", self.0)
    }
}

impl std::error::Error for ContextError {}

/// Key-addressed ledger state supplied by the host runtime (your node
/// implements this). The handler performs one `get_state` followed by at
/// most one `set_state` per transaction; serializing concurrent transactions
/// that touch the same address is the host's concern.
pub trait StateContext {
    /// Fetch raw entries. Addresses never written are absent from the
    /// returned map.
    fn get_state(
        &self,
        addresses: &[Address],
    ) -> Result<HashMap<Address, Vec<u8>>, ContextError>;

    /// Write raw entries, returning the addresses actually written. An
    /// address missing from the result means the store refused that write.
    fn set_state(
        &mut self,
        entries: HashMap<Address, Vec<u8>>,
    ) -> Result<Vec<Address>, ContextError>;
}
