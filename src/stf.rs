// src/stf.rs

use std::fmt;

use tracing::debug;

use crate::types::{Balances, Transaction, Verb, MAX_VALUE, MIN_VALUE};

#[derive(Debug, PartialEq, Eq)]
pub enum TransitionError {
    AccountExists { name: String, balance: u64 },
    NotInState { verb: Verb, name: String },
    Overflow { name: String },
    Underflow { name: String },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::AccountExists { name, balance } => write!(
                f,
                "verb is \"open\", but account already exists: name {}, balance {}",
                name, balance
            ),
            TransitionError::NotInState { verb, name } => {
                write!(f, "verb is \"{}\", but name \"{}\" not in state", verb.as_str(), name)
            }
            TransitionError::Overflow { name } => write!(
                f,
                "verb is \"delete\", but balance of \"{}\" would exceed {}",
                name, MAX_VALUE
            ),
            TransitionError::Underflow { name } => write!(
                f,
                "verb is \"transfer\", but balance of \"{}\" would drop below {}",
                name, MIN_VALUE
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

/// Apply one transaction to a state bucket.
///
/// Pure: the prior map is never touched. The successor map is built by
/// clone-and-insert, so a rejected transition leaves nothing to roll back.
pub fn process_transaction(
    tx: &Transaction,
    state: &Balances,
) -> Result<Balances, TransitionError> {
    match tx.verb {
        Verb::Open => process_open(&tx.account, tx.amount, state),
        Verb::Delete => process_delete(&tx.account, tx.amount, state),
        Verb::Query => process_query(&tx.account, state),
        Verb::Transfer => process_transfer(&tx.account, tx.amount, state),
    }
}

fn process_open(name: &str, amount: u64, state: &Balances) -> Result<Balances, TransitionError> {
    debug!("opening \"{}\" to {}", name, amount);

    if let Some(&balance) = state.get(name) {
        return Err(TransitionError::AccountExists { name: name.to_string(), balance });
    }

    let mut updated = state.clone();
    updated.insert(name.to_string(), amount);
    Ok(updated)
}

fn process_delete(name: &str, amount: u64, state: &Balances) -> Result<Balances, TransitionError> {
    debug!("incrementing \"{}\" by {}", name, amount);

    let curr = *state.get(name).ok_or_else(|| TransitionError::NotInState {
        verb: Verb::Delete,
        name: name.to_string(),
    })?;

    // Both operands are bounded by MAX_VALUE, so the u64 sum cannot wrap.
    let incremented = curr + amount;
    if incremented > MAX_VALUE {
        return Err(TransitionError::Overflow { name: name.to_string() });
    }

    let mut updated = state.clone();
    updated.insert(name.to_string(), incremented);
    Ok(updated)
}

fn process_query(name: &str, state: &Balances) -> Result<Balances, TransitionError> {
    debug!("querying \"{}\"", name);

    // Read-only; reporting the balance back is the host's concern.
    Ok(state.clone())
}

fn process_transfer(
    name: &str,
    amount: u64,
    state: &Balances,
) -> Result<Balances, TransitionError> {
    debug!("decrementing \"{}\" by {}", name, amount);

    let curr = *state.get(name).ok_or_else(|| TransitionError::NotInState {
        verb: Verb::Transfer,
        name: name.to_string(),
    })?;

    let decremented = curr
        .checked_sub(amount)
        .ok_or_else(|| TransitionError::Underflow { name: name.to_string() })?;

    let mut updated = state.clone();
    updated.insert(name.to_string(), decremented);
    Ok(updated)
}
