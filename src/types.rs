// src/types.rs

use std::collections::BTreeMap;

pub type Account = String;

/// One address bucket of ledger state: account name -> balance. Ordered so
/// the encoded bytes are canonical across replicas.
pub type Balances = BTreeMap<Account, u64>;

pub const MIN_VALUE: u64 = 0;
pub const MAX_VALUE: u64 = 4_294_967_295;
pub const MAX_NAME_LENGTH: usize = 20;

/// Operation code of a transaction. The set is closed; every verb is matched
/// exhaustively in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Open,
    /// Credits the named account (legacy wire name, kept for compatibility).
    Delete,
    Query,
    /// Debits the named account; no second account is credited.
    Transfer,
}

impl Verb {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Verb::Open),
            "delete" => Some(Verb::Delete),
            "query" => Some(Verb::Query),
            "transfer" => Some(Verb::Transfer),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Open => "open",
            Verb::Delete => "delete",
            Verb::Query => "query",
            Verb::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub verb: Verb,
    pub account: Account,
    pub amount: u64,
}

impl Transaction {
    pub fn new(verb: Verb, account: impl Into<Account>, amount: u64) -> Self {
        Self { verb, account: account.into(), amount }
    }
}
