use crate::foundation::core::{FrameIndex, Fps};
use crate::foundation::error::{CuelineError, CuelineResult};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Mapping from narration-audio seconds to output frames.
///
/// Narration timestamps are authored against the raw voiceover take, while
/// the published video plays that take at `rate` (2.0 means twice as fast).
/// A timestamp `t` lands on output frame `floor(t / rate * fps)`.
pub struct PlaybackConfig {
    /// Output frame rate.
    pub fps: Fps,
    /// Narration playback-rate multiplier.
    #[serde(default = "default_playback_rate")]
    pub rate: f64,
}

fn default_playback_rate() -> f64 {
    1.0
}

impl PlaybackConfig {
    /// Build a config, rejecting invalid fps or rate.
    pub fn new(fps: Fps, rate: f64) -> CuelineResult<Self> {
        let cfg = Self { fps, rate };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validate fps terms and the rate multiplier.
    pub fn validate(&self) -> CuelineResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(CuelineError::validation("fps must have num>0 and den>0"));
        }
        if !self.rate.is_finite() || self.rate <= 0.0 {
            return Err(CuelineError::validation(
                "playback rate must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Map a narration timestamp in seconds to its output frame.
    ///
    /// Monotonic non-decreasing in `secs` for a fixed config. Negative or
    /// non-finite timestamps are authoring errors and are rejected.
    pub fn to_frame(&self, secs: f64) -> CuelineResult<FrameIndex> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(CuelineError::validation(format!(
                "timestamp must be finite and >= 0, got {secs}"
            )));
        }
        Ok(FrameIndex(self.fps.secs_to_frames_floor(secs / self.rate)))
    }

    /// Map a timestamp to a frame, clamping anything below zero to frame 0.
    ///
    /// Convenience for ad-hoc host queries where a hard error is unhelpful.
    pub fn to_frame_clamped(&self, secs: f64) -> FrameIndex {
        FrameIndex(self.fps.secs_to_frames_floor(secs / self.rate))
    }

    /// Output seconds covered by `frame` whole frames at this fps.
    pub fn frame_to_secs(&self, frame: FrameIndex) -> f64 {
        self.fps.frames_to_secs(frame.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/mapper.rs"]
mod tests;
