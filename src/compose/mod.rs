//! Per-frame overlay composition and frame fingerprints.

pub mod fingerprint;
pub mod layers;
