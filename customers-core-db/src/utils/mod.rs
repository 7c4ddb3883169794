use customers_core_api::domain::account::MAX_ACCOUNT_NUMBER_LEN;
use heapless::String as HeaplessString;
use serde::Serialize;
use std::str::FromStr;

const MASK_CHAR: char = '*';
const VISIBLE_SUFFIX_LEN: usize = 4;

/// Deterministic keyed hash of an account's identifying fields.
///
/// The key must be distinct from the secret keeper's key. Same key and inputs
/// always yield the same fingerprint, which is what the per-customer uniqueness
/// index relies on.
#[derive(Clone)]
pub struct AccountFingerprinter {
    key: [u8; 32],
}

impl AccountFingerprinter {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    pub fn fingerprint(&self, account_number: &str, routing_number: &str) -> Result<String, String> {
        keyed_hash_hex(&self.key, &(routing_number, account_number))
    }
}

impl std::fmt::Debug for AccountFingerprinter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountFingerprinter").finish_non_exhaustive()
    }
}

/// Hashes serializable data with keyed BLAKE3 over its CBOR encoding and
/// returns the hex digest.
pub fn keyed_hash_hex<T: Serialize>(key: &[u8; 32], data: &T) -> Result<String, String> {
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    Ok(blake3::keyed_hash(key, &cbor).to_hex().to_string())
}

/// Display-safe form of an account number: the last four characters (or the
/// whole number when shorter) stay visible behind at least one mask character.
pub fn mask_account_number(
    account_number: &str,
) -> Result<HeaplessString<MAX_ACCOUNT_NUMBER_LEN>, String> {
    let len = account_number.chars().count();
    let visible = len.min(VISIBLE_SUFFIX_LEN);
    let hidden = (len - visible).max(1);

    let masked: String = std::iter::repeat(MASK_CHAR)
        .take(hidden)
        .chain(account_number.chars().skip(len - visible))
        .collect();

    HeaplessString::from_str(&masked).map_err(|_| {
        format!("Account number is too long to mask (max {MAX_ACCOUNT_NUMBER_LEN} chars)")
    })
}
