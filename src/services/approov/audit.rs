//! Audit log for gate decisions.
//!
//! Every decision point (token check, binding check) writes exactly one line,
//! pass or fail, under the `approov::audit` target. Nothing is written when
//! audit logging is disabled.

use serde::Serialize;

pub const AUDIT_TARGET: &str = "approov::audit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Error,
}

/// Decision point an audit line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditCheck {
    Token,
    Binding,
}

impl AuditCheck {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Binding => "binding",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditReason {
    MissingToken,
    InvalidSignature,
    ExpiredToken,
    MalformedToken,
    ValidToken,
    NoBindingClaim,
    BindingMatches,
    BindingMismatch,
}

impl AuditReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidSignature => "invalid_signature",
            Self::ExpiredToken => "expired_token",
            Self::MalformedToken => "malformed_token",
            Self::ValidToken => "valid_token",
            Self::NoBindingClaim => "no_binding_claim",
            Self::BindingMatches => "binding_matches",
            Self::BindingMismatch => "binding_mismatch",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::MissingToken => "missing token",
            Self::InvalidSignature => "token signature verification failed",
            Self::ExpiredToken => "token expired",
            Self::MalformedToken => "token malformed or signed with an unexpected algorithm",
            Self::ValidToken => "token valid",
            Self::NoBindingClaim => "token carries no binding claim",
            Self::BindingMatches => "token binding matches",
            Self::BindingMismatch => "token binding does not match request value",
        }
    }

    pub fn is_failure(self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::InvalidSignature
                | Self::ExpiredToken
                | Self::MalformedToken
                | Self::BindingMismatch
        )
    }

    pub fn level(self) -> AuditLevel {
        if self.is_failure() {
            AuditLevel::Error
        } else {
            AuditLevel::Info
        }
    }
}

impl std::fmt::Display for AuditReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditEvent {
    pub check: AuditCheck,
    pub reason: AuditReason,
    // Whether a failure at this decision point aborts the request.
    pub enforced: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct AuditLog {
    enabled: bool,
}

impl AuditLog {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn emit(&self, level: AuditLevel, event: &AuditEvent) {
        if !self.enabled {
            return;
        }

        let check = event.check.as_str();
        let reason = event.reason.code();
        let enforced = event.enforced;

        match level {
            AuditLevel::Info => tracing::info!(
                target: AUDIT_TARGET,
                check,
                reason,
                enforced,
                "{}",
                event.reason.message()
            ),
            AuditLevel::Error => tracing::error!(
                target: AUDIT_TARGET,
                check,
                reason,
                enforced,
                "{}",
                event.reason.message()
            ),
        }
    }
}
