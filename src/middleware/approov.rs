//! Approov token gate: header 抽出 → PolicyEngine → 401 or continue.
//!
//! - `protect`: token check only
//! - `protect_bound`: token check + binding of the `pay` claim to the binding header
//!
//! Rejections are opaque (same 401 body for every reason). The reason only goes
//! to the audit log written by the engine. On acceptance an [`Attestation`] is
//! inserted into request extensions for handlers.

use std::borrow::Cow;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::Attestation;
use crate::error::AppError;
use crate::services::approov::Binding;
use crate::state::AppState;

/// Gate every route of `router` on a valid token.
///
/// ```ignore
/// let routes = Router::new().route("/shapes", get(shapes));
/// let routes = middleware::approov::protect(routes, state.clone());
/// ```
pub fn protect(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, token_gate))
}

/// Gate every route of `router` on a valid token bound to the binding header.
pub fn protect_bound(router: Router<AppState>, state: AppState) -> Router<AppState> {
    router.layer(middleware::from_fn_with_state(state, bound_token_gate))
}

async fn token_gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, false).await
}

async fn bound_token_gate(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    gate(state, req, next, true).await
}

async fn gate(
    state: AppState,
    mut req: Request<Body>,
    next: Next,
    bound: bool,
) -> Result<Response, AppError> {
    let verdict = {
        let headers = req.headers();
        let token = token_value(headers, &state.token_header);

        let binding = if bound {
            Binding::Required(bound_value(headers, &state.binding_header))
        } else {
            Binding::NotRequired
        };

        state.policy.evaluate(token.as_deref(), binding)
    };

    if !verdict.is_accepted() {
        return Err(AppError::Unauthorized);
    }

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(Attestation::from(verdict));

    Ok(next.run(req).await)
}

// Non-UTF-8 bytes are replaced; such a token can never pass JWS parsing.
fn token_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<Cow<'a, str>> {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()))
}

// Raw bytes: the binding digest is taken over exactly what the client sent.
fn bound_value<'a>(headers: &'a HeaderMap, name: &HeaderName) -> Option<&'a [u8]> {
    headers.get(name).map(HeaderValue::as_bytes)
}
