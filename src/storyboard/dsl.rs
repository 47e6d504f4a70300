use crate::{
    clock::mapper::PlaybackConfig,
    cue::params,
    foundation::error::{CuelineError, CuelineResult},
    storyboard::model::{Anchor, Cue, CueAnchor, LayerKind, Storyboard},
    timeline::phase::Phase,
};

/// Builder for [`Storyboard`](crate::Storyboard).
pub struct StoryboardBuilder {
    playback: PlaybackConfig,
    anchors: Vec<Anchor>,
    cues: Vec<Cue>,
}

impl StoryboardBuilder {
    /// Create a builder for a new storyboard.
    pub fn new(playback: PlaybackConfig) -> Self {
        Self {
            playback,
            anchors: Vec::new(),
            cues: Vec::new(),
        }
    }

    /// Add a named anchor at `at_sec` narration seconds.
    pub fn anchor(self, name: impl Into<String>, at_sec: f64) -> CuelineResult<Self> {
        self.push_anchor(Anchor {
            name: name.into(),
            at_sec,
            starts_phase: None,
        })
    }

    /// Add a named anchor that also starts `phase`.
    pub fn phase_anchor(
        self,
        name: impl Into<String>,
        at_sec: f64,
        phase: Phase,
    ) -> CuelineResult<Self> {
        self.push_anchor(Anchor {
            name: name.into(),
            at_sec,
            starts_phase: Some(phase),
        })
    }

    fn push_anchor(mut self, anchor: Anchor) -> CuelineResult<Self> {
        if self.anchors.iter().any(|a| a.name == anchor.name) {
            return Err(CuelineError::validation(format!(
                "duplicate anchor name '{}'",
                anchor.name
            )));
        }
        self.anchors.push(anchor);
        Ok(self)
    }

    /// Append a cue.
    pub fn cue(mut self, cue: Cue) -> CuelineResult<Self> {
        if self.cues.iter().any(|c| c.id == cue.id) {
            return Err(CuelineError::validation(format!(
                "duplicate cue id '{}'",
                cue.id
            )));
        }
        self.cues.push(cue);
        Ok(self)
    }

    /// Build and validate the final [`Storyboard`](crate::Storyboard).
    pub fn build(self) -> CuelineResult<Storyboard> {
        let board = Storyboard {
            playback: self.playback,
            anchors: self.anchors,
            cues: self.cues,
        };
        board.validate()?;
        Ok(board)
    }
}

/// Builder for [`Cue`](crate::Cue) values.
pub struct CueBuilder {
    id: String,
    at: CueAnchor,
    duration_frames: u64,
    kind: LayerKind,
    params: serde_json::Value,
    content: serde_json::Value,
}

impl CueBuilder {
    /// Create a cue builder with required id, kind, anchor, and duration.
    pub fn new(id: impl Into<String>, kind: LayerKind, at: CueAnchor, duration_frames: u64) -> Self {
        Self {
            id: id.into(),
            at,
            duration_frames,
            kind,
            params: serde_json::Value::Null,
            content: serde_json::Value::Null,
        }
    }

    /// Set the kind-specific parameter table.
    pub fn params(mut self, params: serde_json::Value) -> Self {
        self.params = params;
        self
    }

    /// Set the opaque content payload handed back at composition time.
    pub fn content(mut self, content: serde_json::Value) -> Self {
        self.content = content;
        self
    }

    /// Build a validated [`Cue`](crate::Cue).
    pub fn build(self) -> CuelineResult<Cue> {
        if self.id.trim().is_empty() {
            return Err(CuelineError::validation("cue id must be non-empty"));
        }
        if self.duration_frames == 0 {
            return Err(CuelineError::validation(format!(
                "cue '{}' duration_frames must be >= 1",
                self.id
            )));
        }
        params::validate_params(self.kind, &self.params)?;

        Ok(Cue {
            id: self.id,
            at: self.at,
            duration_frames: self.duration_frames,
            kind: self.kind,
            params: self.params,
            content: self.content,
        })
    }
}

/// Caption-word cue carrying its display text as content.
pub fn caption_cue(
    id: impl Into<String>,
    at: CueAnchor,
    duration_frames: u64,
    text: impl Into<String>,
) -> CuelineResult<Cue> {
    CueBuilder::new(id, LayerKind::CaptionWord, at, duration_frames)
        .content(serde_json::json!({ "text": text.into() }))
        .build()
}

/// One-shot audio cue referencing a sound asset by name.
pub fn audio_cue(
    id: impl Into<String>,
    at: CueAnchor,
    duration_frames: u64,
    asset: impl Into<String>,
) -> CuelineResult<Cue> {
    CueBuilder::new(id, LayerKind::AudioOneShot, at, duration_frames)
        .content(serde_json::json!({ "asset": asset.into() }))
        .build()
}

#[cfg(test)]
#[path = "../../tests/unit/storyboard/dsl.rs"]
mod tests;
