// src/handler.rs

use std::collections::HashMap;
use std::fmt;

use crate::address::{make_address, namespace_prefix, Address, FAMILY_NAME, FAMILY_VERSION};
use crate::codec::{self, PayloadError};
use crate::state::{ContextError, StateContext};
use crate::stf::{self, TransitionError};
use crate::types::Balances;

#[derive(Debug)]
pub enum ApplyError {
    /// The transaction is at fault; state is untouched and the host should
    /// not retry it.
    InvalidTransaction(String),
    /// The environment is at fault; the host may retry at a higher layer.
    InternalError(String),
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyError::InvalidTransaction(reason) => {
                write!(f, "invalid transaction: {}", reason)
            }
            ApplyError::InternalError(reason) => write!(f, "internal error: {}", reason),
        }
    }
}

impl std::error::Error for ApplyError {}

impl From<PayloadError> for ApplyError {
    fn from(e: PayloadError) -> Self {
        ApplyError::InvalidTransaction(e.to_string())
    }
}

impl From<TransitionError> for ApplyError {
    fn from(e: TransitionError) -> Self {
        ApplyError::InvalidTransaction(e.to_string())
    }
}

impl From<ContextError> for ApplyError {
    fn from(e: ContextError) -> Self {
        ApplyError::InternalError(e.to_string())
    }
}

/// Ties the pipeline together: decode -> address -> read -> engine -> write.
///
/// The metadata accessors are what the host uses to route transactions whose
/// declared family matches to this handler.
pub struct LedgerHandler;

impl LedgerHandler {
    pub fn new() -> Self {
        Self
    }

    /// Family name the host routes on.
    pub fn family_name(&self) -> String {
        FAMILY_NAME.to_string()
    }

    /// Protocol versions this handler accepts.
    pub fn family_versions(&self) -> Vec<String> {
        vec![FAMILY_VERSION.to_string()]
    }

    /// Address prefixes claimed by this handler.
    pub fn namespaces(&self) -> Vec<String> {
        vec![namespace_prefix().to_string()]
    }

    /// Process one transaction against the host-supplied state. Any failure
    /// rejects the whole transaction; nothing partial is ever persisted.
    pub fn apply(
        &self,
        payload: &[u8],
        context: &mut dyn StateContext,
    ) -> Result<(), ApplyError> {
        let tx = codec::decode_payload(payload)?;

        let address = make_address(&tx.account);
        let prior = read_bucket(context, &address)?;

        let updated = stf::process_transaction(&tx, &prior)?;

        // Query leaves the bucket as it was; skipping the write keeps a
        // read-only verb from creating or rewriting state.
        if updated != prior {
            write_bucket(context, &address, &updated)?;
        }
        Ok(())
    }
}

impl Default for LedgerHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn read_bucket(context: &dyn StateContext, address: &Address) -> Result<Balances, ApplyError> {
    let mut entries = context.get_state(std::slice::from_ref(address))?;

    match entries.remove(address) {
        None => Ok(Balances::new()),
        Some(raw) => codec::decode_balances(&raw)
            .map_err(|_| ApplyError::InternalError("failed to load state data".to_string())),
    }
}

fn write_bucket(
    context: &mut dyn StateContext,
    address: &Address,
    state: &Balances,
) -> Result<(), ApplyError> {
    let raw = codec::encode_balances(state)
        .map_err(|e| ApplyError::InternalError(format!("failed to encode state data: {}", e)))?;

    let written = context.set_state(HashMap::from([(address.clone(), raw)]))?;
    if !written.iter().any(|a| a == address) {
        return Err(ApplyError::InternalError(
            "state write rejected by the store".to_string(),
        ));
    }
    Ok(())
}
