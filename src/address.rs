// src/address.rs

use once_cell::sync::Lazy;
use sha2::{Digest, Sha512};

/// Transaction family this ledger registers with the host.
pub const FAMILY_NAME: &str = "simple";
pub const FAMILY_VERSION: &str = "1.0";

/// 70-char lowercase hex state address: 6-char namespace prefix followed by
/// a 64-char account suffix.
pub type Address = String;

static NAMESPACE_PREFIX: Lazy<String> =
    Lazy::new(|| hex_sha512(FAMILY_NAME.as_bytes())[..6].to_string());

/// First 6 hex chars of SHA-512 of the family name. Partitions the global
/// address space so this family's entries never collide with another
/// namespace's.
pub fn namespace_prefix() -> &'static str {
    &NAMESPACE_PREFIX
}

/// Deterministic state address for an account: prefix plus the last 64 hex
/// chars of SHA-512 of the name. The hashed suffix spreads accounts
/// uniformly across the store.
pub fn make_address(name: &str) -> Address {
    let digest = hex_sha512(name.as_bytes());
    format!("{}{}", namespace_prefix(), &digest[digest.len() - 64..])
}

fn hex_sha512(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}
