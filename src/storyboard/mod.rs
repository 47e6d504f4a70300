//! Authored per-video configuration: playback, anchors, cues.

pub mod dsl;
pub mod model;
pub mod resolve;
