/*
 * Responsibility
 * - Handler から見える「gate 通過済み」コンテキストの型
 * - middleware が Verdict から作って request extensions に格納する
 */

use serde::Serialize;

use crate::services::approov::{AttestationToken, AuditReason, Verdict};

/// Context attached to every request the gate let through.
///
/// - `token` is `None` only in soft-fail mode (invalid token passed through)
/// - `reason` is the last gate decision, for handlers that want to degrade
///   behaviour on an unverified or unbound request
#[derive(Debug, Clone, Serialize)]
pub struct Attestation {
    pub verified: bool,
    pub reason: AuditReason,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<AttestationToken>,
}

impl From<Verdict> for Attestation {
    fn from(verdict: Verdict) -> Self {
        Self {
            verified: verdict.token.is_some(),
            reason: verdict.reason,
            token: verdict.token,
        }
    }
}
