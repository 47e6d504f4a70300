use crate::{
    clock::mapper::PlaybackConfig,
    cue::params,
    foundation::error::{CuelineError, CuelineResult},
    timeline::phase::Phase,
};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A complete authored storyboard for one video.
///
/// A storyboard is a pure data model that can be:
/// - built programmatically (see [`crate::StoryboardBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Composing frames from a storyboard goes through [`Storyboard::resolve`]
/// once, then [`crate::compose_frame`] per output frame.
pub struct Storyboard {
    /// Narration-time to output-frame mapping.
    pub playback: PlaybackConfig,
    /// Named narration timestamps, authored against the raw voiceover.
    pub anchors: Vec<Anchor>,
    /// Overlay and audio cues hung off the anchors.
    pub cues: Vec<Cue>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A named narration timestamp.
pub struct Anchor {
    /// Stable name other records refer to (e.g. `"answer_reveal"`).
    pub name: String,
    /// Timestamp in raw narration seconds.
    pub at_sec: f64,
    /// Phase that starts at this anchor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_phase: Option<Phase>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One scheduled overlay or audio event.
pub struct Cue {
    /// Cue identifier (stable within a storyboard).
    pub id: String,
    /// Where the cue starts: a named anchor or a raw timestamp.
    pub at: CueAnchor,
    /// Frames the cue stays live past its anchor (inclusive window).
    pub duration_frames: u64,
    /// What kind of layer the cue produces.
    pub kind: LayerKind,
    /// Per-kind animation parameters ([`ShakeParams`](crate::ShakeParams),
    /// [`HighlightParams`](crate::HighlightParams), and friends).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
    /// Opaque payload passed through to the rendering host.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub content: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Start position of a cue.
pub enum CueAnchor {
    /// Reference to a named [`Anchor`].
    Name(String),
    /// Raw narration timestamp in seconds.
    Sec(f64),
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
/// Kind of layer a cue produces.
pub enum LayerKind {
    /// Still image overlay (diagram, sticker).
    StaticImage,
    /// Short looping video overlay (meme clip).
    LoopingClip,
    /// One karaoke-style caption word.
    CaptionWord,
    /// Pulsing emphasis effect on a content card.
    Highlight,
    /// Full-screen vignette or flash surface.
    Vignette,
    /// Countdown ring in the HUD.
    TimerRing,
    /// Camera-shake impulse; contributes offsets, never a visible layer.
    Shake,
    /// One-shot sound effect; contributes audio gain, never a visible layer.
    AudioOneShot,
}

impl LayerKind {
    /// True for kinds that produce a visible overlay layer.
    pub fn is_visual(self) -> bool {
        !matches!(self, Self::Shake | Self::AudioOneShot)
    }

    /// True for kinds that scale in with the pop entrance envelope.
    ///
    /// Full-surface kinds keep their authored scale; popping a flash or a
    /// vignette reads as a glitch.
    pub fn wants_pop_in(self) -> bool {
        matches!(
            self,
            Self::StaticImage | Self::LoopingClip | Self::CaptionWord | Self::TimerRing
        )
    }
}

impl Storyboard {
    /// Validate storyboard invariants and anchor/cue references.
    pub fn validate(&self) -> CuelineResult<()> {
        self.playback.validate()?;

        let mut seen_anchor_names = std::collections::BTreeSet::new();
        for anchor in &self.anchors {
            if anchor.name.trim().is_empty() {
                return Err(CuelineError::validation("anchor name must be non-empty"));
            }
            if !seen_anchor_names.insert(anchor.name.as_str()) {
                return Err(CuelineError::validation(format!(
                    "duplicate anchor name '{}'",
                    anchor.name
                )));
            }
            if !anchor.at_sec.is_finite() || anchor.at_sec < 0.0 {
                return Err(CuelineError::validation(format!(
                    "anchor '{}' at_sec must be finite and >= 0",
                    anchor.name
                )));
            }
        }

        let phase_starts: Vec<(&str, Phase)> = self
            .anchors
            .iter()
            .filter_map(|a| a.starts_phase.map(|p| (a.name.as_str(), p)))
            .collect();
        for w in phase_starts.windows(2) {
            let ((prev_name, prev), (name, cur)) = (w[0], w[1]);
            if cur <= prev {
                return Err(CuelineError::validation(format!(
                    "anchor '{name}' starts phase {cur:?} but '{prev_name}' already started {prev:?}"
                )));
            }
        }

        let mut seen_cue_ids = std::collections::BTreeSet::new();
        for cue in &self.cues {
            if cue.id.trim().is_empty() {
                return Err(CuelineError::validation("cue id must be non-empty"));
            }
            if !seen_cue_ids.insert(cue.id.as_str()) {
                return Err(CuelineError::validation(format!(
                    "duplicate cue id '{}'",
                    cue.id
                )));
            }
            if cue.duration_frames == 0 {
                return Err(CuelineError::validation(format!(
                    "cue '{}' duration_frames must be > 0",
                    cue.id
                )));
            }
            match &cue.at {
                CueAnchor::Name(name) => {
                    if !seen_anchor_names.contains(name.as_str()) {
                        return Err(CuelineError::validation(format!(
                            "cue '{}' references missing anchor '{name}'",
                            cue.id
                        )));
                    }
                }
                CueAnchor::Sec(secs) => {
                    if !secs.is_finite() || *secs < 0.0 {
                        return Err(CuelineError::validation(format!(
                            "cue '{}' at_sec must be finite and >= 0",
                            cue.id
                        )));
                    }
                }
            }
            if !(cue.params.is_null() || cue.params.is_object()) {
                return Err(CuelineError::validation(format!(
                    "cue '{}' params must be an object when set",
                    cue.id
                )));
            }
            params::validate_params(cue.kind, &cue.params).map_err(|e| {
                CuelineError::validation(format!("cue '{}': {e}", cue.id))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/model.rs"]
mod tests;
