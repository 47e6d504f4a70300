//! Cueline is an audio-synchronized timeline compositor for short-form quiz
//! videos.
//!
//! A narration take is annotated with named [`Anchor`]s; overlay and audio
//! [`Cue`]s hang off those anchors. For each output frame the engine resolves
//! the narrative [`Phase`], schedules the live cues, and composes a z-ordered
//! [`ComposedFrame`] for the host renderer.
//!
//! # Pipeline overview
//!
//! 1. **Author**: build a [`Storyboard`] from JSON or via [`StoryboardBuilder`]
//! 2. **Resolve**: `Storyboard -> ResolvedStoryboard` (every timestamp frozen to a frame, once)
//! 3. **Compose**: `ResolvedStoryboard + FrameIndex -> ComposedFrame` (layers, offsets, audio gains)
//! 4. **Rasterize** (host side): the host draws the layer list; [`fingerprint_frame`] tells it
//!    which frames repeat and can reuse pixels
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: composition is pure and bit-stable for a given storyboard.
//! - **No IO**: the engine never touches media files; cue content payloads pass through opaquely.
//! - **Soft-fail composition**: a malformed cue drops with a warning, the rest of the frame
//!   still composes.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod clock;
mod compose;
mod cue;
mod eval;
mod foundation;
mod storyboard;
mod timeline;

pub use animation::curve::{
    SPRING_OVERSHOOT_CAP, decaying_oscillation, pulse, ramp_clamped, ramp_eased, spring_approach,
};
pub use animation::ease::Ease;
pub use clock::mapper::PlaybackConfig;
pub use compose::fingerprint::{FrameFingerprint, fingerprint_frame};
pub use compose::layers::{AudioLayer, ComposedFrame, RenderLayer, StackPolicy, compose};
pub use cue::params::{
    AudioParams, CaptionParams, HighlightParams, ShakeParams, ShakeScope, validate_params,
};
pub use cue::schedule::{EnvelopeSpec, LiveCue, active_cues};
pub use eval::frame::{
    ComposeStats, ComposeThreading, compose_frame, compose_frame_unchecked, compose_frames,
    compose_frames_with_stats,
};
pub use foundation::core::{Affine, Fps, FrameIndex, FrameRange, Point, Transform2D, Vec2};
pub use foundation::error::{CuelineError, CuelineResult};
pub use storyboard::dsl::{CueBuilder, StoryboardBuilder, audio_cue, caption_cue};
pub use storyboard::model::{Anchor, Cue, CueAnchor, LayerKind, Storyboard};
pub use storyboard::resolve::{ResolvedCue, ResolvedStoryboard};
pub use timeline::phase::{Phase, PhaseState, PhaseTrack};
