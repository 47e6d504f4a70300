//! Cue activity windows, envelopes, and per-kind parameters.

pub mod params;
pub mod schedule;
