//! Link and API token generation.
//!
//! Tokens carry the full 256 bits of entropy drawn from the system CSPRNG
//! and are encoded as unpadded base64url. Only their SHA-256 digest is ever
//! used as a lookup key for API tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::rand::{SecureRandom, SystemRandom};

use crate::digest::sha256_hex;
use crate::error::CryptoError;

/// Random bytes per token.
pub const TOKEN_BYTES: usize = 32;

/// Encoded token length (unpadded base64url of 32 bytes).
pub const TOKEN_LEN: usize = 43;

/// Public link identifier; the sole credential for passphrase-less links.
pub fn new_link_token() -> Result<String, CryptoError> {
    random_token()
}

/// Raw personal access token, returned to its owner exactly once.
pub fn new_api_token() -> Result<String, CryptoError> {
    random_token()
}

/// One-way digest stored in place of a raw API token.
pub fn hash_token(token: &str) -> String {
    sha256_hex(token.as_bytes())
}

/// Last `n` characters of a token, shown as a non-secret preview.
pub fn token_preview(token: &str, n: usize) -> String {
    let skip = token.chars().count().saturating_sub(n);
    token.chars().skip(skip).collect()
}

fn random_token() -> Result<String, CryptoError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    SystemRandom::new()
        .fill(&mut bytes)
        .map_err(|_| CryptoError::Random)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
