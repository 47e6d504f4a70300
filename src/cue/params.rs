use smallvec::SmallVec;

use crate::{
    animation::curve,
    foundation::core::Vec2,
    foundation::error::{CuelineError, CuelineResult},
    storyboard::model::LayerKind,
};

/// Which transforms a shake impulse disturbs.
#[derive(Clone, Debug, PartialEq)]
pub enum ShakeScope {
    /// Offset the shared container every visual layer rides on.
    Container,
    /// Offset only live layers of the listed kinds.
    Kinds(SmallVec<[LayerKind; 4]>),
}

/// Parsed parameters of a [`LayerKind::Shake`] cue.
#[derive(Clone, Debug, PartialEq)]
pub struct ShakeParams {
    /// Peak displacement in pixels.
    pub amp_px: f64,
    /// Oscillation frequency in Hz.
    pub freq_hz: f64,
    /// Exponential decay rate per second. Always positive, so the impulse
    /// dies out on its own.
    pub decay: f64,
    /// Scope the offsets apply to.
    pub scope: ShakeScope,
}

impl Default for ShakeParams {
    fn default() -> Self {
        Self {
            amp_px: 6.0,
            freq_hz: 9.0,
            decay: 6.0,
            scope: ShakeScope::Container,
        }
    }
}

impl ShakeParams {
    /// Sample the shake displacement `t_secs` into the impulse.
    ///
    /// Each axis runs the same decaying oscillation with a phase derived from
    /// the cue id, so motion is chaotic on screen but reproducible run to run.
    pub fn offset_at(&self, cue_id: &str, t_secs: f64) -> Vec2 {
        let px = phase01(cue_id, "shake.x") * std::f64::consts::TAU;
        let py = phase01(cue_id, "shake.y") * std::f64::consts::TAU;
        Vec2::new(
            curve::decaying_oscillation(t_secs, self.freq_hz, self.amp_px, self.decay, px),
            curve::decaying_oscillation(t_secs, self.freq_hz * 1.13, self.amp_px, self.decay, py),
        )
    }
}

/// Parsed parameters of a [`LayerKind::Highlight`] cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightParams {
    /// Pulse amplitude as a scale fraction.
    pub pulse_intensity: f64,
    /// Pulse speed in Hz.
    pub pulse_speed_hz: f64,
}

impl Default for HighlightParams {
    fn default() -> Self {
        Self {
            pulse_intensity: 0.08,
            pulse_speed_hz: 2.0,
        }
    }
}

/// Parsed parameters of a [`LayerKind::CaptionWord`] cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionParams {
    /// Spring-bounce the word in instead of the plain pop envelope.
    pub bounce: bool,
    /// Spring damping when bouncing.
    pub bounce_damping: f64,
    /// Spring stiffness when bouncing.
    pub bounce_stiffness: f64,
}

impl Default for CaptionParams {
    fn default() -> Self {
        Self {
            bounce: false,
            bounce_damping: 9.0,
            bounce_stiffness: 220.0,
        }
    }
}

/// Parsed parameters of a [`LayerKind::AudioOneShot`] cue.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AudioParams {
    /// Linear gain multiplier applied on top of the fade envelope.
    pub volume: f64,
}

impl Default for AudioParams {
    fn default() -> Self {
        Self { volume: 1.0 }
    }
}

/// Parse shake parameters, falling back to defaults for missing fields.
pub fn parse_shake(params: &serde_json::Value) -> CuelineResult<ShakeParams> {
    let d = ShakeParams::default();
    let amp_px = get_f64_or(params, "amp_px", d.amp_px)?;
    if amp_px < 0.0 {
        return Err(CuelineError::validation("shake amp_px must be >= 0"));
    }
    let freq_hz = get_f64_or(params, "freq_hz", d.freq_hz)?;
    if freq_hz <= 0.0 {
        return Err(CuelineError::validation("shake freq_hz must be > 0"));
    }
    let decay = get_f64_or(params, "decay", d.decay)?;
    if decay <= 0.0 {
        return Err(CuelineError::validation("shake decay must be > 0"));
    }
    Ok(ShakeParams {
        amp_px,
        freq_hz,
        decay,
        scope: parse_scope(params)?,
    })
}

fn parse_scope(params: &serde_json::Value) -> CuelineResult<ShakeScope> {
    let Some(v) = params.get("scope") else {
        return Ok(ShakeScope::Container);
    };
    match v {
        serde_json::Value::String(s) if s.eq_ignore_ascii_case("container") => {
            Ok(ShakeScope::Container)
        }
        serde_json::Value::Array(kinds) => {
            if kinds.is_empty() {
                return Err(CuelineError::validation(
                    "shake scope kind list must be non-empty",
                ));
            }
            let mut out = SmallVec::new();
            for k in kinds {
                let kind: LayerKind = serde_json::from_value(k.clone()).map_err(|_| {
                    CuelineError::validation(format!("shake scope contains unknown layer kind {k}"))
                })?;
                out.push(kind);
            }
            Ok(ShakeScope::Kinds(out))
        }
        other => Err(CuelineError::validation(format!(
            "shake scope must be \"container\" or a list of layer kinds, got {other}"
        ))),
    }
}

/// Parse highlight parameters, falling back to defaults for missing fields.
pub fn parse_highlight(params: &serde_json::Value) -> CuelineResult<HighlightParams> {
    let d = HighlightParams::default();
    let pulse_intensity = get_f64_or(params, "pulse_intensity", d.pulse_intensity)?;
    if !(0.0..=1.0).contains(&pulse_intensity) {
        return Err(CuelineError::validation(
            "highlight pulse_intensity must be in [0, 1]",
        ));
    }
    let pulse_speed_hz = get_f64_or(params, "pulse_speed_hz", d.pulse_speed_hz)?;
    if pulse_speed_hz <= 0.0 {
        return Err(CuelineError::validation(
            "highlight pulse_speed_hz must be > 0",
        ));
    }
    Ok(HighlightParams {
        pulse_intensity,
        pulse_speed_hz,
    })
}

/// Parse caption parameters, falling back to defaults for missing fields.
pub fn parse_caption(params: &serde_json::Value) -> CuelineResult<CaptionParams> {
    let d = CaptionParams::default();
    let bounce = get_bool_or(params, "bounce", d.bounce)?;
    let bounce_damping = get_f64_or(params, "bounce_damping", d.bounce_damping)?;
    if bounce_damping < 0.0 {
        return Err(CuelineError::validation("caption bounce_damping must be >= 0"));
    }
    let bounce_stiffness = get_f64_or(params, "bounce_stiffness", d.bounce_stiffness)?;
    if bounce_stiffness <= 0.0 {
        return Err(CuelineError::validation(
            "caption bounce_stiffness must be > 0",
        ));
    }
    Ok(CaptionParams {
        bounce,
        bounce_damping,
        bounce_stiffness,
    })
}

/// Parse audio one-shot parameters, falling back to defaults.
pub fn parse_audio(params: &serde_json::Value) -> CuelineResult<AudioParams> {
    let d = AudioParams::default();
    let volume = get_f64_or(params, "volume", d.volume)?;
    if volume < 0.0 {
        return Err(CuelineError::validation("audio volume must be >= 0"));
    }
    Ok(AudioParams { volume })
}

/// Check that `params` parses cleanly for `kind`.
///
/// Kinds without tunable parameters accept any object and ignore its fields.
pub fn validate_params(kind: LayerKind, params: &serde_json::Value) -> CuelineResult<()> {
    match kind {
        LayerKind::Shake => parse_shake(params).map(|_| ()),
        LayerKind::Highlight => parse_highlight(params).map(|_| ()),
        LayerKind::CaptionWord => parse_caption(params).map(|_| ()),
        LayerKind::AudioOneShot => parse_audio(params).map(|_| ()),
        LayerKind::StaticImage
        | LayerKind::LoopingClip
        | LayerKind::Vignette
        | LayerKind::TimerRing => Ok(()),
    }
}

fn get_f64_or(obj: &serde_json::Value, key: &str, default: f64) -> CuelineResult<f64> {
    let Some(v) = obj.get(key) else {
        return Ok(default);
    };
    let Some(n) = v.as_f64() else {
        return Err(CuelineError::validation(format!(
            "cue param '{key}' must be a number"
        )));
    };
    if !n.is_finite() {
        return Err(CuelineError::validation(format!(
            "cue param '{key}' must be finite"
        )));
    }
    Ok(n)
}

fn get_bool_or(obj: &serde_json::Value, key: &str, default: bool) -> CuelineResult<bool> {
    let Some(v) = obj.get(key) else {
        return Ok(default);
    };
    v.as_bool().ok_or_else(|| {
        CuelineError::validation(format!("cue param '{key}' must be a boolean"))
    })
}

fn stable_hash64(seed: u64, s: &str) -> u64 {
    // FNV-1a 64, seeded.
    let mut h = 0xcbf2_9ce4_8422_2325u64 ^ seed;
    for &b in s.as_bytes() {
        h ^= u64::from(b);
        h = h.wrapping_mul(0x0000_0100_0000_01B3);
    }
    h
}

fn phase01(cue_id: &str, axis: &str) -> f64 {
    let h = stable_hash64(stable_hash64(0, axis), cue_id);
    // 53 bits of precision.
    ((h >> 11) as f64) * (1.0 / ((1u64 << 53) as f64))
}
