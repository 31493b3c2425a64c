//! Per-request gate decision.
//!
//! Single pass, fixed order: token presence -> token verification -> (optional)
//! binding. Each decision point writes one audit line before the next step or
//! the final `Verdict`.

use std::sync::Arc;

use super::audit::{AuditCheck, AuditEvent, AuditLog, AuditReason};
use super::binding::{BindingCheck, check_binding};
use super::clock::{Clock, SystemClock};
use super::secret::SharedSecret;
use super::token::{AttestationToken, TokenCodec, VerificationOutcome};

/// Process-wide policy switches. Fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicyConfig {
    pub abort_on_invalid_token: bool,
    pub abort_on_invalid_binding: bool,
    pub audit_logging_enabled: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            abort_on_invalid_token: true,
            abort_on_invalid_binding: true,
            audit_logging_enabled: true,
        }
    }
}

/// Whether the calling endpoint binds the token to a request value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'a> {
    NotRequired,
    /// The raw bound value bytes as received (absent header = `None`).
    Required(Option<&'a [u8]>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub accepted: bool,
    /// The last decision that shaped the verdict.
    pub reason: AuditReason,
    /// Only set on acceptance with a verified token.
    pub token: Option<AttestationToken>,
}

impl Verdict {
    fn accept(reason: AuditReason, token: Option<AttestationToken>) -> Self {
        Self {
            accepted: true,
            reason,
            token,
        }
    }

    fn reject(reason: AuditReason) -> Self {
        Self {
            accepted: false,
            reason,
            token: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

pub struct PolicyEngine {
    codec: TokenCodec,
    config: PolicyConfig,
    audit: AuditLog,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("codec", &self.codec)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl PolicyEngine {
    pub fn new(secret: &SharedSecret, config: PolicyConfig) -> Self {
        Self::with_clock(secret, config, Arc::new(SystemClock))
    }

    pub fn with_clock(secret: &SharedSecret, config: PolicyConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec: TokenCodec::new(secret),
            config,
            audit: AuditLog::new(config.audit_logging_enabled),
            clock,
        }
    }

    pub fn config(&self) -> PolicyConfig {
        self.config
    }

    pub fn evaluate(&self, raw_token: Option<&str>, binding: Binding<'_>) -> Verdict {
        let enforce_token = self.config.abort_on_invalid_token;

        let token = match self.verify_token(raw_token) {
            Ok(token) => {
                self.record(AuditCheck::Token, AuditReason::ValidToken, enforce_token);
                token
            }
            Err(reason) => {
                self.record(AuditCheck::Token, reason, enforce_token);
                // Soft-fail passes through unverified; binding needs a decoded token.
                return if enforce_token {
                    Verdict::reject(reason)
                } else {
                    Verdict::accept(reason, None)
                };
            }
        };

        let Binding::Required(bound_value) = binding else {
            return Verdict::accept(AuditReason::ValidToken, Some(token));
        };

        let enforce_binding = self.config.abort_on_invalid_binding;
        let reason = match Self::check(&token, bound_value) {
            BindingCheck::NoBindingClaim => AuditReason::NoBindingClaim,
            BindingCheck::Matches => AuditReason::BindingMatches,
            BindingCheck::Mismatch => AuditReason::BindingMismatch,
        };
        self.record(AuditCheck::Binding, reason, enforce_binding);

        if reason == AuditReason::BindingMismatch && enforce_binding {
            Verdict::reject(reason)
        } else {
            Verdict::accept(reason, Some(token))
        }
    }

    fn verify_token(&self, raw_token: Option<&str>) -> Result<AttestationToken, AuditReason> {
        let Some(raw) = raw_token.filter(|t| !t.is_empty()) else {
            return Err(AuditReason::MissingToken);
        };

        match self.codec.decode(raw, self.clock.now()) {
            VerificationOutcome::Valid(token) => Ok(token),
            VerificationOutcome::InvalidSignature => Err(AuditReason::InvalidSignature),
            VerificationOutcome::Expired => Err(AuditReason::ExpiredToken),
            VerificationOutcome::Malformed => Err(AuditReason::MalformedToken),
        }
    }

    fn check(token: &AttestationToken, bound_value: Option<&[u8]>) -> BindingCheck {
        match bound_value.filter(|v| !v.is_empty()) {
            Some(value) => check_binding(token, value),
            // No claim wins over a missing value: failover tokens never bind.
            None if token.binding_digest.is_none() => BindingCheck::NoBindingClaim,
            None => BindingCheck::Mismatch,
        }
    }

    fn record(&self, check: AuditCheck, reason: AuditReason, enforced: bool) {
        let event = AuditEvent {
            check,
            reason,
            enforced,
        };
        self.audit.emit(reason.level(), &event);
    }
}
