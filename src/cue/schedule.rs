use crate::{
    animation::curve,
    animation::ease::Ease,
    foundation::core::FrameIndex,
    foundation::error::{CuelineError, CuelineResult},
    storyboard::resolve::ResolvedCue,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Uniform entrance/exit envelope applied to every live cue.
pub struct EnvelopeSpec {
    /// Frames to ramp opacity in and out at the window edges.
    #[serde(default = "default_fade_frames")]
    pub fade_frames: u64,
    /// Frames the pop-in scale takes to settle.
    #[serde(default = "default_pop_frames")]
    pub pop_frames: u64,
    /// Scale the pop-in starts from.
    #[serde(default = "default_pop_scale_from")]
    pub pop_scale_from: f64,
}

fn default_fade_frames() -> u64 {
    5
}

fn default_pop_frames() -> u64 {
    8
}

fn default_pop_scale_from() -> f64 {
    0.8
}

impl Default for EnvelopeSpec {
    fn default() -> Self {
        Self {
            fade_frames: default_fade_frames(),
            pop_frames: default_pop_frames(),
            pop_scale_from: default_pop_scale_from(),
        }
    }
}

impl EnvelopeSpec {
    /// Validate envelope invariants.
    pub fn validate(&self) -> CuelineResult<()> {
        if !self.pop_scale_from.is_finite() || self.pop_scale_from <= 0.0 {
            return Err(CuelineError::validation(
                "envelope pop_scale_from must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
/// A cue live on the current frame, with its envelope values sampled.
pub struct LiveCue<'a> {
    /// The underlying resolved cue.
    pub cue: &'a ResolvedCue,
    /// Whole frames elapsed since the cue fired.
    pub frames_into: u64,
    /// Normalized position across the live window, in `[0, 1]`.
    pub progress: f64,
    /// Trapezoid fade value in `[0, 1]`.
    pub fade: f64,
    /// Pop-in scale multiplier, `pop_scale_from` settling to 1.0.
    pub pop_scale: f64,
}

/// Collect the cues live on `frame` with their envelopes sampled.
///
/// A cue with anchor `A` and duration `D` is live on every frame of the
/// closed interval `[A, A + D]`. The fade ramps 0 to 1 over the first
/// `fade_frames`, holds 1, and ramps back to 0 over the last `fade_frames`;
/// windows shorter than two fades peak below 1 instead of dividing by zero.
/// Overlapping cues of the same kind all stay live; nothing deduplicates.
pub fn active_cues<'a>(
    frame: FrameIndex,
    cues: &'a [ResolvedCue],
    envelope: &EnvelopeSpec,
) -> Vec<LiveCue<'a>> {
    let mut live = Vec::new();
    for cue in cues {
        if cue.duration_frames == 0 {
            // validate() rejects these up front; an unvalidated storyboard
            // degrades to a skip instead of a divide-by-zero.
            tracing::warn!(cue = %cue.id, "skipping zero-duration cue");
            continue;
        }
        if !cue.is_live(frame) {
            continue;
        }

        let frames_into = frame.0 - cue.anchor_frame.0;
        let t = frames_into as f64;
        let dur = cue.duration_frames as f64;
        let fade_len = envelope.fade_frames as f64;

        let fade_in = curve::ramp_clamped(t, 0.0, fade_len, 0.0, 1.0);
        let fade_out = curve::ramp_clamped(t, dur - fade_len, dur, 1.0, 0.0);

        live.push(LiveCue {
            cue,
            frames_into,
            progress: curve::ramp_clamped(t, 0.0, dur, 0.0, 1.0),
            fade: fade_in.min(fade_out),
            pop_scale: curve::ramp_eased(
                t,
                0.0,
                envelope.pop_frames as f64,
                envelope.pop_scale_from,
                1.0,
                Ease::OutCubic,
            ),
        });
    }
    live
}

#[cfg(test)]
#[path = "../../tests/unit/cue/schedule.rs"]
mod tests;
