//! One-way anonymization of hardware addresses

use sha2::{Digest, Sha256};

/// Length of a rendered address hash in hex characters
pub const ADDRESS_HASH_LEN: usize = 64;

/// Hash a raw address token with SHA-256, rendered as lowercase hex.
///
/// The token is hashed verbatim; callers that want stable hashes across radio
/// stacks must normalize the address text before handing it over.
pub fn hash_address(address: &str) -> String {
    hex::encode(Sha256::digest(address.as_bytes()))
}
