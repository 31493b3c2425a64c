//! Approov token verification core.
//!
//! Leaf-first: `token` decodes and verifies the JWT, `binding` checks the
//! optional `pay` claim, `policy` combines both into a per-request `Verdict`
//! and `audit` writes one log line per decision point.
//!
//! Nothing here touches HTTP; middleware hands in raw header values.

pub mod audit;
pub mod binding;
pub mod clock;
pub mod factory;
pub mod policy;
pub mod secret;
pub mod token;

#[cfg(test)]
pub(crate) mod testing;

pub use audit::{AuditCheck, AuditEvent, AuditLevel, AuditLog, AuditReason};
pub use binding::{BindingCheck, binding_digest, check_binding};
pub use clock::{Clock, FixedClock, SystemClock};
pub use factory::build_policy_engine;
pub use policy::{Binding, PolicyConfig, PolicyEngine, Verdict};
pub use secret::{SecretError, SharedSecret};
pub use token::{AttestationToken, TokenCodec, VerificationOutcome};
