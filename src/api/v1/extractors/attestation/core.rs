use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::Attestation;

/// Handler で Attestation を受け取るための extractor
/// middleware が Attestation を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 を返す（gate 未適用のルート）
pub struct ApproovAttestation(pub Attestation);

impl<S> FromRequestParts<S> for ApproovAttestation
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Attestation>()
            .cloned()
            .map(ApproovAttestation)
            .ok_or(AppError::Unauthorized)
    }
}
