//! Token minting and audit capture helpers shared by unit tests.

use std::sync::{Arc, Mutex};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::audit::AUDIT_TARGET;
use super::secret::SharedSecret;

pub(crate) const SECRET: &[u8] = b"approov-unit-test-secret";

pub(crate) fn secret() -> SharedSecret {
    SharedSecret::new(SECRET.to_vec()).unwrap()
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
}

pub(crate) fn sign(claims: &serde_json::Value) -> String {
    sign_with(claims, SECRET, Algorithm::HS256)
}

pub(crate) fn sign_with(claims: &serde_json::Value, key: &[u8], alg: Algorithm) -> String {
    jsonwebtoken::encode(&Header::new(alg), claims, &EncodingKey::from_secret(key)).unwrap()
}

/// `alg: none` token with an empty signature segment.
pub(crate) fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
    format!("{header}.{payload}.")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AuditRecord {
    pub level: tracing::Level,
    pub check: String,
    pub reason: String,
    pub enforced: Option<bool>,
}

struct AuditRecorder(Arc<Mutex<Vec<AuditRecord>>>);

impl<S: tracing::Subscriber> Layer<S> for AuditRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        if event.metadata().target() != AUDIT_TARGET {
            return;
        }
        let mut fields = AuditFields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(AuditRecord {
            level: *event.metadata().level(),
            check: fields.check,
            reason: fields.reason,
            enforced: fields.enforced,
        });
    }
}

#[derive(Default)]
struct AuditFields {
    check: String,
    reason: String,
    enforced: Option<bool>,
}

impl Visit for AuditFields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "check" => self.check = value.to_owned(),
            "reason" => self.reason = value.to_owned(),
            _ => {}
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "enforced" {
            self.enforced = Some(value);
        }
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}
}

/// Run `f` with a subscriber that records audit lines emitted on this thread.
pub(crate) fn capture_audit<T>(f: impl FnOnce() -> T) -> (T, Vec<AuditRecord>) {
    let records = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(AuditRecorder(Arc::clone(&records)));
    let out = tracing::subscriber::with_default(subscriber, f);
    let records = records.lock().unwrap().clone();
    (out, records)
}
