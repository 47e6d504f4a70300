use std::collections::BTreeMap;

use crate::{
    animation::curve,
    cue::params::{self, ShakeScope},
    cue::schedule::LiveCue,
    foundation::core::{FrameIndex, Fps, Transform2D, Vec2},
    foundation::error::CuelineResult,
    storyboard::model::LayerKind,
    timeline::phase::PhaseState,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Stacking priorities per layer kind.
///
/// Stacking is decided here and nowhere else: authoring order never breaks a
/// tie. A kind missing from the table has no defined place on screen, so its
/// layers are dropped with a diagnostic instead of guessing a z.
pub struct StackPolicy {
    z_for: BTreeMap<LayerKind, i32>,
}

impl Default for StackPolicy {
    /// Background diagrams under content words, effects over content,
    /// meme clips over effects, full-screen surfaces over those, HUD on top.
    fn default() -> Self {
        let mut z_for = BTreeMap::new();
        z_for.insert(LayerKind::StaticImage, 0);
        z_for.insert(LayerKind::CaptionWord, 10);
        z_for.insert(LayerKind::Highlight, 20);
        z_for.insert(LayerKind::LoopingClip, 30);
        z_for.insert(LayerKind::Vignette, 40);
        z_for.insert(LayerKind::TimerRing, 50);
        Self { z_for }
    }
}

impl StackPolicy {
    /// Priority for `kind`, if the policy places it at all.
    pub fn z_for(&self, kind: LayerKind) -> Option<i32> {
        self.z_for.get(&kind).copied()
    }

    /// Set or override the priority for `kind`.
    pub fn insert(&mut self, kind: LayerKind, z: i32) {
        self.z_for.insert(kind, z);
    }

    /// Remove `kind` from the policy so its layers are dropped.
    pub fn remove(&mut self, kind: LayerKind) {
        self.z_for.remove(&kind);
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One visual overlay the host must draw.
///
/// `transform` carries only the animation-driven part (pop scale, shake
/// translate). Static placement lives in the opaque `content` payload and is
/// the host's business.
pub struct RenderLayer {
    /// Cue that produced this layer.
    pub cue_id: String,
    /// Layer kind.
    pub kind: LayerKind,
    /// Resolved stacking priority.
    pub z: i32,
    /// Animation transform to apply on top of static placement.
    pub transform: Transform2D,
    /// Final opacity in `[0, 1]`.
    pub opacity: f64,
    /// Cue progress in `[0, 1]` (drives countdown sweeps, type-on, etc).
    pub progress: f64,
    /// Opaque payload passed through from the cue.
    pub content: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One sound effect the host must mix.
pub struct AudioLayer {
    /// Cue that produced this layer.
    pub cue_id: String,
    /// Linear gain in `[0, volume]`, fade envelope included.
    pub gain: f64,
    /// Cue progress in `[0, 1]`.
    pub progress: f64,
    /// Opaque payload passed through from the cue.
    pub content: serde_json::Value,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Everything the host needs to draw one output frame.
pub struct ComposedFrame {
    /// Output frame index.
    pub frame: FrameIndex,
    /// Phase state for content providers.
    pub phase: PhaseState,
    /// Summed container-scope shake displacement.
    pub container_offset: Vec2,
    /// Visual layers in draw order (lowest z first).
    pub layers: Vec<RenderLayer>,
    /// Sound effects live on this frame.
    pub audio: Vec<AudioLayer>,
}

/// Compose the live cues of one frame into an ordered layer stack.
///
/// Pure: every call builds a fresh [`ComposedFrame`] from its arguments.
/// Layers are ordered by `(z, anchor frame, cue id)`. Simultaneous shakes
/// sum their displacements, container-scope ones into
/// [`ComposedFrame::container_offset`], kind-scope ones into the translate
/// of the targeted layers. Cues whose kind has no stacking priority or whose
/// params fail to parse are dropped with a warning; the rest of the frame
/// still composes.
pub fn compose(
    frame: FrameIndex,
    phase: PhaseState,
    live: &[LiveCue<'_>],
    policy: &StackPolicy,
    fps: Fps,
) -> ComposedFrame {
    let mut container_offset = Vec2::ZERO;
    let mut kind_offsets: BTreeMap<LayerKind, Vec2> = BTreeMap::new();

    for lc in live {
        if lc.cue.kind != LayerKind::Shake {
            continue;
        }
        let shake = match params::parse_shake(&lc.cue.params) {
            Ok(p) => p,
            Err(err) => {
                tracing::warn!(cue = %lc.cue.id, %err, "dropping shake with bad params");
                continue;
            }
        };
        let t_secs = fps.frames_to_secs(lc.frames_into);
        let offset = shake.offset_at(&lc.cue.id, t_secs);
        match shake.scope {
            ShakeScope::Container => {
                container_offset += offset;
            }
            ShakeScope::Kinds(kinds) => {
                for kind in kinds {
                    let slot = kind_offsets.entry(kind).or_insert(Vec2::ZERO);
                    *slot += offset;
                }
            }
        }
    }

    let mut layers_with_key: Vec<((i32, u64, String), RenderLayer)> = Vec::new();
    let mut audio = Vec::new();

    for lc in live {
        match lc.cue.kind {
            LayerKind::Shake => {}
            LayerKind::AudioOneShot => match params::parse_audio(&lc.cue.params) {
                Ok(p) => audio.push(AudioLayer {
                    cue_id: lc.cue.id.clone(),
                    gain: lc.fade * p.volume,
                    progress: lc.progress,
                    content: lc.cue.content.clone(),
                }),
                Err(err) => {
                    tracing::warn!(cue = %lc.cue.id, %err, "dropping audio cue with bad params");
                }
            },
            kind => {
                let Some(z) = policy.z_for(kind) else {
                    tracing::warn!(cue = %lc.cue.id, ?kind, "no stacking priority for layer kind, dropping");
                    continue;
                };
                let layer = match visual_layer(lc, kind, z, &kind_offsets, fps) {
                    Ok(layer) => layer,
                    Err(err) => {
                        tracing::warn!(cue = %lc.cue.id, %err, "dropping layer with bad params");
                        continue;
                    }
                };
                let sort_key = (z, lc.cue.anchor_frame.0, layer.cue_id.clone());
                layers_with_key.push((sort_key, layer));
            }
        }
    }

    layers_with_key.sort_by(|a, b| a.0.cmp(&b.0));
    let layers = layers_with_key.into_iter().map(|(_, l)| l).collect();

    ComposedFrame {
        frame,
        phase,
        container_offset,
        layers,
        audio,
    }
}

fn visual_layer(
    lc: &LiveCue<'_>,
    kind: LayerKind,
    z: i32,
    kind_offsets: &BTreeMap<LayerKind, Vec2>,
    fps: Fps,
) -> CuelineResult<RenderLayer> {
    let t_secs = fps.frames_to_secs(lc.frames_into);

    let scale = match kind {
        LayerKind::Highlight => {
            let p = params::parse_highlight(&lc.cue.params)?;
            curve::pulse(t_secs, p.pulse_speed_hz, p.pulse_intensity)
        }
        LayerKind::CaptionWord => {
            let p = params::parse_caption(&lc.cue.params)?;
            if p.bounce {
                curve::spring_approach(t_secs, 1.0, p.bounce_damping, p.bounce_stiffness)
            } else {
                lc.pop_scale
            }
        }
        k if k.wants_pop_in() => lc.pop_scale,
        _ => 1.0,
    };

    let translate = kind_offsets.get(&kind).copied().unwrap_or(Vec2::ZERO);

    Ok(RenderLayer {
        cue_id: lc.cue.id.clone(),
        kind,
        z,
        transform: Transform2D {
            translate,
            scale: Vec2::new(scale, scale),
            ..Transform2D::default()
        },
        opacity: lc.fade,
        progress: lc.progress,
        content: lc.cue.content.clone(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/compose/layers.rs"]
mod tests;
