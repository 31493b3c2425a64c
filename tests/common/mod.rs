#![allow(dead_code)]

use std::sync::Arc;

use approov_gate::app::build_router;
use approov_gate::config::HttpConfig;
use approov_gate::services::approov::{FixedClock, PolicyConfig, PolicyEngine, SharedSecret};
use approov_gate::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request, Response, header};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &[u8] = b"approov-integration-secret";
pub const TOKEN_HEADER: &str = "approov-token";

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

pub fn app(config: PolicyConfig) -> Router {
    app_with_limits(config, HttpConfig::default())
}

pub fn app_with_limits(config: PolicyConfig, http: HttpConfig) -> Router {
    let secret = SharedSecret::new(SECRET.to_vec()).expect("secret");
    let engine = PolicyEngine::with_clock(&secret, config, Arc::new(FixedClock(now())));
    let state = AppState::new(
        Arc::new(engine),
        HeaderName::from_static(TOKEN_HEADER),
        header::AUTHORIZATION,
    );
    build_router(state, &http)
}

pub fn sign(claims: &Value) -> String {
    sign_with(claims, SECRET)
}

pub fn sign_with(claims: &Value, key: &[u8]) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(key),
    )
    .expect("sign token")
}

pub fn get(uri: &str, headers: &[(&str, &str)]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(Body::empty()).expect("build request")
}

/// Like `get`, but header values are raw bytes (not necessarily UTF-8).
pub fn get_raw(uri: &str, headers: &[(&str, &[u8])]) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        let value = HeaderValue::from_bytes(value).expect("header bytes");
        builder = builder.header(*name, value);
    }
    builder.body(Body::empty()).expect("build request")
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.expect("infallible router")
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
