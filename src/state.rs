/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - policy: PolicyEngine, gate が読むヘッダ名
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use axum::http::HeaderName;

use crate::services::approov::PolicyEngine;

#[derive(Clone, Debug)]
pub struct AppState {
    pub policy: Arc<PolicyEngine>,
    pub token_header: HeaderName,
    pub binding_header: HeaderName,
}

impl AppState {
    pub fn new(
        policy: Arc<PolicyEngine>,
        token_header: HeaderName,
        binding_header: HeaderName,
    ) -> Self {
        Self {
            policy,
            token_header,
            binding_header,
        }
    }
}
