use std::collections::HashSet;

use rayon::prelude::*;

use crate::{
    compose::fingerprint::{FrameFingerprint, fingerprint_frame},
    compose::layers::{ComposedFrame, StackPolicy, compose},
    cue::schedule::{EnvelopeSpec, active_cues},
    foundation::core::{FrameIndex, FrameRange},
    foundation::error::{CuelineError, CuelineResult},
    storyboard::resolve::ResolvedStoryboard,
};

/// Compose a single frame of a resolved storyboard.
///
/// This is the primary "one-shot" API for producing a frame plan from a
/// [`ResolvedStoryboard`].
///
/// Pipeline:
/// 1. [`ResolvedStoryboard::phase_at`]
/// 2. [`active_cues`](crate::active_cues)
/// 3. [`compose`](crate::compose)
///
/// Pure with respect to its inputs: calling it twice with the same arguments
/// yields bit-identical [`ComposedFrame`]s.
#[tracing::instrument(skip(resolved, policy, envelope))]
pub fn compose_frame(
    resolved: &ResolvedStoryboard,
    frame: FrameIndex,
    policy: &StackPolicy,
    envelope: &EnvelopeSpec,
) -> CuelineResult<ComposedFrame> {
    envelope.validate()?;
    Ok(compose_frame_unchecked(resolved, frame, policy, envelope))
}

/// [`compose_frame`] without the envelope validation step.
///
/// Batch loops validate once and then call this per frame.
pub fn compose_frame_unchecked(
    resolved: &ResolvedStoryboard,
    frame: FrameIndex,
    policy: &StackPolicy,
    envelope: &EnvelopeSpec,
) -> ComposedFrame {
    let phase = resolved.phase_at(frame);
    let live = active_cues(frame, &resolved.cues, envelope);
    compose(frame, phase, &live, policy, resolved.playback.fps)
}

#[derive(Clone, Debug)]
/// Threading controls for multi-frame composition.
pub struct ComposeThreading {
    /// Evaluate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for ComposeThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// Aggregated composition counters.
pub struct ComposeStats {
    /// Total requested frames.
    pub frames_total: u64,
    /// Frames with a distinct fingerprint; the rest can reuse cached pixels.
    pub frames_unique: u64,
}

/// Compose a range of frames (inclusive start, exclusive end).
///
/// This is a convenience wrapper over [`compose_frames_with_stats`] with
/// default (serial) threading.
pub fn compose_frames(
    resolved: &ResolvedStoryboard,
    range: FrameRange,
    policy: &StackPolicy,
    envelope: &EnvelopeSpec,
) -> CuelineResult<Vec<ComposedFrame>> {
    compose_frames_with_stats(
        resolved,
        range,
        policy,
        envelope,
        &ComposeThreading::default(),
    )
    .map(|(frames, _)| frames)
}

/// Compose a frame range and return both the frames and dedup stats.
///
/// Parallel and serial execution produce identical output; frames come back
/// in range order either way. [`ComposeStats::frames_unique`] counts distinct
/// [fingerprints](crate::fingerprint_frame), which tells a host how many
/// frames it actually has to rasterize.
pub fn compose_frames_with_stats(
    resolved: &ResolvedStoryboard,
    range: FrameRange,
    policy: &StackPolicy,
    envelope: &EnvelopeSpec,
    threading: &ComposeThreading,
) -> CuelineResult<(Vec<ComposedFrame>, ComposeStats)> {
    if range.is_empty() {
        return Err(CuelineError::validation("compose range must be non-empty"));
    }
    envelope.validate()?;

    let frames = if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            (range.start.0..range.end.0)
                .into_par_iter()
                .map(|f| compose_frame_unchecked(resolved, FrameIndex(f), policy, envelope))
                .collect::<Vec<_>>()
        })
    } else {
        (range.start.0..range.end.0)
            .map(|f| compose_frame_unchecked(resolved, FrameIndex(f), policy, envelope))
            .collect::<Vec<_>>()
    };

    let mut stats = ComposeStats {
        frames_total: frames.len() as u64,
        frames_unique: 0,
    };
    let mut seen = HashSet::<FrameFingerprint>::new();
    for frame in &frames {
        if seen.insert(fingerprint_frame(frame)) {
            stats.frames_unique += 1;
        }
    }

    Ok((frames, stats))
}

fn build_thread_pool(threads: Option<usize>) -> CuelineResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CuelineError::validation(
            "compose threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| CuelineError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
