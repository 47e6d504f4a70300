//! Frame-indexed narrative phase derivation.

pub mod phase;
