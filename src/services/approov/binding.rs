//! Token binding (`pay` claim).
//!
//! The issuer embeds `base64(sha256(value))` of an application credential
//! (typically the Authorization header). A request passes the binding check only
//! if it carries the same credential the token was minted for.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use super::token::AttestationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingCheck {
    /// The token carries no `pay` claim (e.g. minted by the failover issuer).
    NoBindingClaim,
    Matches,
    Mismatch,
}

/// `base64(sha256(value))`, standard alphabet with padding.
///
/// Hashes the raw bytes as received; header values are not required to be UTF-8.
pub fn binding_digest(value: &[u8]) -> String {
    let digest = Sha256::digest(value);
    STANDARD.encode(digest)
}

pub fn check_binding(token: &AttestationToken, bound_value: &[u8]) -> BindingCheck {
    let Some(expected) = token.binding_digest.as_deref() else {
        return BindingCheck::NoBindingClaim;
    };

    let actual = binding_digest(bound_value);
    if bool::from(actual.as_bytes().ct_eq(expected.as_bytes())) {
        BindingCheck::Matches
    } else {
        BindingCheck::Mismatch
    }
}
