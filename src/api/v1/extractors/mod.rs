pub mod attestation;

pub use attestation::{ApproovAttestation, Attestation};
