/*
 * Responsibility
 * - GET /attestation, /bound/attestation
 * - gate が通したリクエストの Attestation をそのまま返す (診断用)
 */
use axum::Json;

use crate::api::v1::extractors::{ApproovAttestation, Attestation};

pub async fn attestation(ApproovAttestation(attestation): ApproovAttestation) -> Json<Attestation> {
    Json(attestation)
}
