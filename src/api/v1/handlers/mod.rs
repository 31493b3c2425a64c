pub mod attestation;
pub mod health;
