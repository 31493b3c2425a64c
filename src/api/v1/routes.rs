/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - gate (token only / token + binding) をどのルートに掛けるかをここで決める
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::attestation::attestation;
use crate::middleware::approov;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let token_only = Router::new().route("/attestation", get(attestation));
    let bound = Router::new().route("/bound/attestation", get(attestation));

    Router::new()
        .merge(approov::protect(token_only, state.clone()))
        .merge(approov::protect_bound(bound, state))
}
