//! Shared foundation types: frame indexing, rational fps, transforms, errors.

pub mod core;
pub mod error;
