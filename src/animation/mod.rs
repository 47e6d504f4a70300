//! Pure, deterministic animation primitives sampled per frame.

pub mod curve;
pub mod ease;
