/// Factory: build the process-wide `PolicyEngine` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::approov::PolicyEngine;

pub fn build_policy_engine(config: &Config) -> Arc<PolicyEngine> {
    let policy = config.policy;

    tracing::info!(
        abort_on_invalid_token = policy.abort_on_invalid_token,
        abort_on_invalid_binding = policy.abort_on_invalid_binding,
        audit_logging_enabled = policy.audit_logging_enabled,
        "approov policy loaded"
    );

    Arc::new(PolicyEngine::new(&config.approov_secret, policy))
}
