use crate::foundation::core::FrameIndex;
use crate::foundation::error::{CuelineError, CuelineResult};

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Narrative phase of a quiz video, in playback order.
///
/// The variant order is normative: phase-starting anchors must appear in
/// strictly increasing variant order, and content providers may rely on
/// `Phase` comparisons to ask "has the answer dropped yet".
pub enum Phase {
    /// Before the first anchored phase.
    Idle,
    /// Question text is typing into the vignette.
    VignetteTyping,
    /// Answer options slide in one by one.
    OptionsRevealing,
    /// Countdown while the viewer guesses.
    Thinking,
    /// Correct answer highlighted.
    AnswerRevealed,
    /// Explainer segment after the reveal.
    Teaching,
    /// Outro and end card.
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
/// Phase sample for a single frame.
pub struct PhaseState {
    /// Phase owning the frame.
    pub phase: Phase,
    /// Normalized position inside the phase interval, in `[0, 1]`.
    ///
    /// Zero across the Idle lead-in, pinned to 1.0 inside the open-ended
    /// final phase.
    pub progress: f64,
    /// Whole frames elapsed since the phase started.
    pub frames_into: u64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
/// Ordered phase-start anchors covering the whole timeline.
///
/// Each entry opens a half-open interval that runs until the next entry (the
/// last entry runs forever). Frames before the first entry are [`Phase::Idle`].
pub struct PhaseTrack {
    starts: Vec<(Phase, FrameIndex)>,
}

impl PhaseTrack {
    /// Build a track from `(phase, start frame)` pairs in authored order.
    ///
    /// Phases must be strictly increasing in variant order; that is a
    /// structural authoring error and is rejected. Start frames that run
    /// backwards are a timing slip: they are clamped forward to the latest
    /// start seen so far (flashing the affected phase to zero length) and
    /// reported through a warning rather than an error.
    pub fn new(starts: Vec<(Phase, FrameIndex)>) -> CuelineResult<Self> {
        for w in starts.windows(2) {
            let (prev, cur) = (w[0].0, w[1].0);
            if cur <= prev {
                return Err(CuelineError::validation(format!(
                    "phase {cur:?} must come after {prev:?} in the track"
                )));
            }
        }

        let mut effective = Vec::with_capacity(starts.len());
        let mut floor = FrameIndex(0);
        for (phase, start) in starts {
            if start < floor {
                tracing::warn!(
                    ?phase,
                    authored = start.0,
                    clamped = floor.0,
                    "phase start runs backwards, clamping forward"
                );
                effective.push((phase, floor));
            } else {
                floor = start;
                effective.push((phase, start));
            }
        }

        Ok(Self { starts: effective })
    }

    /// Effective `(phase, start frame)` pairs after clamping.
    pub fn starts(&self) -> &[(Phase, FrameIndex)] {
        &self.starts
    }

    /// True when no phase anchors exist (every frame is Idle).
    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Resolve the phase state owning `frame`.
    ///
    /// Total over all frames: exactly one phase owns each frame. When several
    /// anchors share a start frame the later-listed phase wins and the earlier
    /// ones flash with zero visible frames.
    pub fn resolve(&self, frame: FrameIndex) -> PhaseState {
        let idx = self.starts.partition_point(|&(_, start)| start.0 <= frame.0);

        if idx == 0 {
            return PhaseState {
                phase: Phase::Idle,
                progress: 0.0,
                frames_into: frame.0,
            };
        }

        let (phase, start) = self.starts[idx - 1];
        let frames_into = frame.0 - start.0;

        let progress = match self.starts.get(idx) {
            Some(&(_, next)) => {
                let denom = next.0.saturating_sub(start.0).max(1);
                ((frames_into as f64) / (denom as f64)).clamp(0.0, 1.0)
            }
            None => 1.0,
        };

        PhaseState {
            phase,
            progress,
            frames_into,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
