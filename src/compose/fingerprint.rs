use xxhash_rust::xxh3::Xxh3;

use crate::compose::layers::{AudioLayer, ComposedFrame, RenderLayer};
use crate::storyboard::model::LayerKind;
use crate::timeline::phase::Phase;

const XXH3_SEED: u64 = 0x3fd6_a1b2_90c4_77e5;

/// Stable per-frame fingerprint used by host-side static-frame caches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameFingerprint {
    /// High 64 bits of the xxh3-128 digest.
    pub hi: u64,
    /// Low 64 bits of the xxh3-128 digest.
    pub lo: u64,
}

/// Compute a stable fingerprint of everything the host draws or mixes.
///
/// Two frames with equal fingerprints are visually and audibly identical, so
/// a host can render one and reuse the pixels for the other.
///
/// Note: the global frame index and the raw `frames_into` counters are
/// intentionally *not* hashed, so a visually still frame can elide across
/// time. Phase progress is hashed because content providers key off it.
pub fn fingerprint_frame(frame: &ComposedFrame) -> FrameFingerprint {
    let mut h = StableHasher::new();

    write_phase(&mut h, frame.phase.phase);
    h.write_f64(frame.phase.progress);
    h.write_f64(frame.container_offset.x);
    h.write_f64(frame.container_offset.y);

    h.write_u32(frame.layers.len() as u32);
    for layer in &frame.layers {
        write_layer(&mut h, layer);
    }

    h.write_u32(frame.audio.len() as u32);
    for audio in &frame.audio {
        write_audio(&mut h, audio);
    }

    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_i32(&mut self, v: i32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_bytes(&v.to_bits().to_le_bytes());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

fn write_phase(h: &mut StableHasher, p: Phase) {
    h.write_u8(match p {
        Phase::Idle => 0,
        Phase::VignetteTyping => 1,
        Phase::OptionsRevealing => 2,
        Phase::Thinking => 3,
        Phase::AnswerRevealed => 4,
        Phase::Teaching => 5,
        Phase::Done => 6,
    });
}

fn write_kind(h: &mut StableHasher, k: LayerKind) {
    h.write_u8(match k {
        LayerKind::StaticImage => 0,
        LayerKind::LoopingClip => 1,
        LayerKind::CaptionWord => 2,
        LayerKind::Highlight => 3,
        LayerKind::Vignette => 4,
        LayerKind::TimerRing => 5,
        LayerKind::Shake => 6,
        LayerKind::AudioOneShot => 7,
    });
}

fn write_layer(h: &mut StableHasher, l: &RenderLayer) {
    h.write_str(&l.cue_id);
    write_kind(h, l.kind);
    h.write_i32(l.z);
    h.write_f64(l.transform.translate.x);
    h.write_f64(l.transform.translate.y);
    h.write_f64(l.transform.rotation_rad);
    h.write_f64(l.transform.scale.x);
    h.write_f64(l.transform.scale.y);
    h.write_f64(l.transform.anchor.x);
    h.write_f64(l.transform.anchor.y);
    h.write_f64(l.opacity);
    h.write_f64(l.progress);
    write_json(h, &l.content);
}

fn write_audio(h: &mut StableHasher, a: &AudioLayer) {
    h.write_str(&a.cue_id);
    h.write_f64(a.gain);
    h.write_f64(a.progress);
    write_json(h, &a.content);
}

fn write_json(h: &mut StableHasher, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => h.write_u8(0),
        serde_json::Value::Bool(b) => {
            h.write_u8(1);
            h.write_u8(u8::from(*b));
        }
        serde_json::Value::Number(n) => {
            h.write_u8(2);
            // Canonical decimal form keeps integers exact past f64 range.
            h.write_str(&n.to_string());
        }
        serde_json::Value::String(s) => {
            h.write_u8(3);
            h.write_str(s);
        }
        serde_json::Value::Array(items) => {
            h.write_u8(4);
            h.write_u32(items.len() as u32);
            for item in items {
                write_json(h, item);
            }
        }
        serde_json::Value::Object(map) => {
            h.write_u8(5);
            h.write_u32(map.len() as u32);
            // Map iteration is key-sorted, so this is order-stable.
            for (k, val) in map {
                h.write_str(k);
                write_json(h, val);
            }
        }
    }
}
