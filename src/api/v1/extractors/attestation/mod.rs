/*!
 * Attestation context extractor
 *
 * Responsibility:
 * - gate を通過したリクエストの Attestation を handler に提供する
 * - axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Attestation
 * - ApproovAttestation
 */

mod core;
mod types;

pub use self::core::ApproovAttestation;
pub use self::types::Attestation;
