use std::collections::BTreeMap;

use crate::{
    clock::mapper::PlaybackConfig,
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CuelineError, CuelineResult},
    storyboard::model::{CueAnchor, LayerKind, Storyboard},
    timeline::phase::{PhaseState, PhaseTrack},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A storyboard with every timestamp frozen into output frames.
///
/// Resolution happens once per video; per-frame composition only reads from
/// this structure, so repeated floating-point re-derivation can never make
/// two passes disagree about where an anchor lands.
pub struct ResolvedStoryboard {
    /// Playback mapping the storyboard was resolved under.
    pub playback: PlaybackConfig,
    /// Anchor names frozen to output frames.
    pub frame_anchors: BTreeMap<String, FrameIndex>,
    /// Phase-start track derived from phase-starting anchors.
    pub phases: PhaseTrack,
    /// Cues with anchor references replaced by frames.
    pub cues: Vec<ResolvedCue>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// A cue frozen to its output frame window.
pub struct ResolvedCue {
    /// Cue identifier.
    pub id: String,
    /// Kind of layer the cue produces.
    pub kind: LayerKind,
    /// Output frame the cue fires on.
    pub anchor_frame: FrameIndex,
    /// Frames the cue stays live past its anchor (inclusive window).
    pub duration_frames: u64,
    /// Raw per-kind parameters.
    pub params: serde_json::Value,
    /// Opaque payload passed through to the rendering host.
    pub content: serde_json::Value,
}

impl ResolvedCue {
    /// Live window as a half-open range.
    ///
    /// The authored window is inclusive on both ends: a cue with duration
    /// `D` is live on `D + 1` frames.
    pub fn live_range(&self) -> FrameRange {
        let end_excl = self
            .anchor_frame
            .0
            .saturating_add(self.duration_frames)
            .saturating_add(1);
        FrameRange {
            start: self.anchor_frame,
            end: FrameIndex(end_excl),
        }
    }

    /// True when the cue is live on `frame`.
    pub fn is_live(&self, frame: FrameIndex) -> bool {
        self.live_range().contains(frame)
    }
}

impl Storyboard {
    /// Validate and freeze the storyboard into frames.
    #[tracing::instrument(skip(self))]
    pub fn resolve(&self) -> CuelineResult<ResolvedStoryboard> {
        self.validate()?;

        let mut frame_anchors = BTreeMap::new();
        let mut phase_starts = Vec::new();
        for anchor in &self.anchors {
            let frame = self.playback.to_frame(anchor.at_sec)?;
            frame_anchors.insert(anchor.name.clone(), frame);
            if let Some(phase) = anchor.starts_phase {
                phase_starts.push((phase, frame));
            }
        }
        let phases = PhaseTrack::new(phase_starts)?;

        let mut cues = Vec::with_capacity(self.cues.len());
        for cue in &self.cues {
            let anchor_frame = match &cue.at {
                CueAnchor::Name(name) => *frame_anchors.get(name).ok_or_else(|| {
                    CuelineError::evaluation(format!(
                        "cue '{}' references missing anchor '{name}'",
                        cue.id
                    ))
                })?,
                CueAnchor::Sec(secs) => self.playback.to_frame(*secs)?,
            };
            cues.push(ResolvedCue {
                id: cue.id.clone(),
                kind: cue.kind,
                anchor_frame,
                duration_frames: cue.duration_frames,
                params: cue.params.clone(),
                content: cue.content.clone(),
            });
        }

        Ok(ResolvedStoryboard {
            playback: self.playback,
            frame_anchors,
            phases,
            cues,
        })
    }
}

impl ResolvedStoryboard {
    /// Phase state owning `frame`.
    pub fn phase_at(&self, frame: FrameIndex) -> PhaseState {
        self.phases.resolve(frame)
    }

    /// Frame a named anchor landed on, if it exists.
    pub fn anchor_frame(&self, name: &str) -> Option<FrameIndex> {
        self.frame_anchors.get(name).copied()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/resolve.rs"]
mod tests;
