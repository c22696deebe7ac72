// src/codec.rs

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_cbor::Value;

use crate::types::{Balances, Transaction, Verb, MAX_NAME_LENGTH, MAX_VALUE, MIN_VALUE};

const FIELD_VERB: &str = "verb";
const FIELD_ACCOUNT: &str = "account";
const FIELD_MONEY: &str = "money";

#[derive(Debug, PartialEq, Eq)]
pub enum PayloadError {
    InvalidSerialization,
    VerbRequired,
    NameRequired,
    ValueRequired,
    UnknownVerb(String),
    NameOutOfBounds { chars: usize },
    ValueOutOfRange(i128),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadError::InvalidSerialization => write!(f, "invalid payload serialization"),
            PayloadError::VerbRequired => write!(f, "verb is required"),
            PayloadError::NameRequired => write!(f, "name is required"),
            PayloadError::ValueRequired => write!(f, "value is required"),
            PayloadError::UnknownVerb(got) => write!(
                f,
                "verb must be \"open\", \"delete\", \"query\", or \"transfer\", got \"{}\"",
                got
            ),
            PayloadError::NameOutOfBounds { chars } => write!(
                f,
                "name must be a string of 1 to {} characters, got {}",
                MAX_NAME_LENGTH, chars
            ),
            PayloadError::ValueOutOfRange(v) => write!(
                f,
                "value must be an integer no less than {} and no greater than {}, got {}",
                MIN_VALUE, MAX_VALUE, v
            ),
        }
    }
}

impl std::error::Error for PayloadError {}

/// Decode and validate a raw transaction payload.
///
/// The wire format is a CBOR map with text keys `verb`, `account`, `money`.
/// Each gate fails fast; a partially valid transaction never escapes.
pub fn decode_payload(raw: &[u8]) -> Result<Transaction, PayloadError> {
    let value: Value =
        serde_cbor::from_slice(raw).map_err(|_| PayloadError::InvalidSerialization)?;
    let fields = match value {
        Value::Map(fields) => fields,
        _ => return Err(PayloadError::InvalidSerialization),
    };

    let verb_raw = text_field(&fields, FIELD_VERB).ok_or(PayloadError::VerbRequired)?;
    let account = text_field(&fields, FIELD_ACCOUNT).ok_or(PayloadError::NameRequired)?;
    let money = integer_field(&fields, FIELD_MONEY).ok_or(PayloadError::ValueRequired)?;

    let verb = Verb::parse(&verb_raw).ok_or(PayloadError::UnknownVerb(verb_raw))?;

    let chars = account.chars().count();
    if chars == 0 || chars > MAX_NAME_LENGTH {
        return Err(PayloadError::NameOutOfBounds { chars });
    }

    if money < MIN_VALUE as i128 || money > MAX_VALUE as i128 {
        return Err(PayloadError::ValueOutOfRange(money));
    }

    Ok(Transaction { verb, account, amount: money as u64 })
}

#[derive(Serialize)]
struct RawPayload<'a> {
    verb: &'a str,
    account: &'a str,
    money: u64,
}

/// Encode a transaction into the wire payload. `decode_payload` reproduces
/// an equivalent transaction for every valid input.
pub fn encode_payload(tx: &Transaction) -> Result<Vec<u8>, serde_cbor::Error> {
    serde_cbor::to_vec(&RawPayload {
        verb: tx.verb.as_str(),
        account: &tx.account,
        money: tx.amount,
    })
}

/// Decode one state bucket (account name -> balance).
pub fn decode_balances(raw: &[u8]) -> Result<Balances, serde_cbor::Error> {
    serde_cbor::from_slice(raw)
}

/// Encode one state bucket. `Balances` is ordered, so the bytes are
/// canonical across replicas.
pub fn encode_balances(state: &Balances) -> Result<Vec<u8>, serde_cbor::Error> {
    serde_cbor::to_vec(state)
}

fn text_field(fields: &BTreeMap<Value, Value>, key: &str) -> Option<String> {
    match fields.get(&Value::Text(key.to_string())) {
        Some(Value::Text(s)) => Some(s.clone()),
        _ => None,
    }
}

// `money` arrives as a CBOR integer from well-behaved clients; a decimal
// text field is coerced for parity with older ones.
fn integer_field(fields: &BTreeMap<Value, Value>, key: &str) -> Option<i128> {
    match fields.get(&Value::Text(key.to_string())) {
        Some(Value::Integer(i)) => Some(*i),
        Some(Value::Text(s)) => s.parse::<i128>().ok(),
        _ => None,
    }
}
