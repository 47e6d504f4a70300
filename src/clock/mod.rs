//! Narration-time to output-frame mapping under a playback-rate multiplier.

pub mod mapper;
