//! Approov token decoding (JWS compact, HS256 only).
//!
//! The algorithm is pinned: a header announcing anything else (including
//! `none`) never reaches signature verification. Expiry is checked here rather
//! than by `jsonwebtoken` so that the comparison is strict and uses the
//! caller's clock.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use super::secret::SharedSecret;

/// A successfully verified Approov token.
///
/// Only ever constructed by [`TokenCodec::decode`] after the signature and
/// expiry checks passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttestationToken {
    pub expires_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binding_digest: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    Valid(AttestationToken),
    InvalidSignature,
    Expired,
    Malformed,
}

impl VerificationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

// Wire claims. `exp` is a NumericDate and may carry a fractional part.
#[derive(Debug, Deserialize)]
struct ApproovClaims {
    exp: f64,
    #[serde(default)]
    iss: Option<String>,
    #[serde(default)]
    pay: Option<String>,
}

#[derive(Clone)]
pub struct TokenCodec {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenCodec")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &SharedSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Only signature + pinned alg are left to jsonwebtoken.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: secret.decoding_key(),
            validation,
        }
    }

    /// Decode and verify `raw` as of `now`.
    ///
    /// `raw` must be non-empty; absent tokens are the policy layer's concern.
    pub fn decode(&self, raw: &str, now: DateTime<Utc>) -> VerificationOutcome {
        debug_assert!(!raw.is_empty(), "empty token must be handled by the caller");

        let data = match jsonwebtoken::decode::<ApproovClaims>(
            raw,
            &self.decoding_key,
            &self.validation,
        ) {
            Ok(data) => data,
            Err(err) => {
                return match err.kind() {
                    ErrorKind::InvalidSignature => VerificationOutcome::InvalidSignature,
                    _ => VerificationOutcome::Malformed,
                };
            }
        };

        let Some(expires_at) = numeric_date(data.claims.exp) else {
            return VerificationOutcome::Malformed;
        };

        if expires_at <= now {
            return VerificationOutcome::Expired;
        }

        VerificationOutcome::Valid(AttestationToken {
            expires_at,
            issuer: data.claims.iss,
            binding_digest: data.claims.pay,
        })
    }
}

fn numeric_date(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    // Millisecond precision is plenty for expiry; saturating cast lands out of range.
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}
