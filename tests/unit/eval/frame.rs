use super::*;
use crate::clock::mapper::PlaybackConfig;
use crate::foundation::core::Fps;
use crate::storyboard::model::{Anchor, Cue, CueAnchor, LayerKind, Storyboard};
use crate::timeline::phase::Phase;

fn quiz_board() -> ResolvedStoryboard {
    let board = Storyboard {
        playback: PlaybackConfig::new(Fps::new(30, 1).unwrap(), 1.0).unwrap(),
        anchors: vec![
            Anchor {
                name: "question_on".to_string(),
                at_sec: 1.0,
                starts_phase: Some(Phase::VignetteTyping),
            },
            Anchor {
                name: "answer_drop".to_string(),
                at_sec: 4.0,
                starts_phase: Some(Phase::AnswerRevealed),
            },
        ],
        cues: vec![
            Cue {
                id: "bg".to_string(),
                at: CueAnchor::Sec(0.0),
                duration_frames: 200,
                kind: LayerKind::StaticImage,
                params: serde_json::Value::Null,
                content: serde_json::json!({ "asset": "bg.png" }),
            },
            Cue {
                id: "q-word-1".to_string(),
                at: CueAnchor::Name("question_on".to_string()),
                duration_frames: 60,
                kind: LayerKind::CaptionWord,
                params: serde_json::json!({ "bounce": true }),
                content: serde_json::json!({ "text": "Which" }),
            },
            Cue {
                id: "rumble".to_string(),
                at: CueAnchor::Name("answer_drop".to_string()),
                duration_frames: 18,
                kind: LayerKind::Shake,
                params: serde_json::json!({ "amp_px": 8.0 }),
                content: serde_json::Value::Null,
            },
            Cue {
                id: "ding".to_string(),
                at: CueAnchor::Name("answer_drop".to_string()),
                duration_frames: 12,
                kind: LayerKind::AudioOneShot,
                params: serde_json::json!({ "volume": 0.7 }),
                content: serde_json::json!({ "asset": "ding.ogg" }),
            },
        ],
    };
    board.resolve().unwrap()
}

#[test]
fn compose_frame_is_deterministic() {
    let resolved = quiz_board();
    let policy = StackPolicy::default();
    let envelope = EnvelopeSpec::default();

    let a = compose_frame(&resolved, FrameIndex(125), &policy, &envelope).unwrap();
    let b = compose_frame(&resolved, FrameIndex(125), &policy, &envelope).unwrap();
    assert_eq!(a, b);
    assert_eq!(fingerprint_frame(&a), fingerprint_frame(&b));
}

#[test]
fn shake_frame_moves_the_container_and_mixes_audio() {
    let resolved = quiz_board();
    let frame = compose_frame(
        &resolved,
        FrameIndex(125),
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
    )
    .unwrap();

    // Frame 125 sits inside the rumble and ding cues (both anchored at 120).
    assert_ne!(frame.container_offset.x, 0.0);
    assert_eq!(frame.audio.len(), 1);
    assert_eq!(frame.audio[0].cue_id, "ding");
    // No visual layer for the shake or the one-shot.
    assert!(frame.layers.iter().all(|l| l.kind != LayerKind::Shake));
    assert!(frame.layers.iter().all(|l| l.kind != LayerKind::AudioOneShot));
}

#[test]
fn batch_matches_single_frame_calls() {
    let resolved = quiz_board();
    let policy = StackPolicy::default();
    let envelope = EnvelopeSpec::default();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(48)).unwrap();

    let batch = compose_frames(&resolved, range, &policy, &envelope).unwrap();
    assert_eq!(batch.len(), 48);
    for (i, got) in batch.iter().enumerate() {
        let single = compose_frame(&resolved, FrameIndex(i as u64), &policy, &envelope).unwrap();
        assert_eq!(*got, single);
    }
}

#[test]
fn parallel_output_matches_serial() {
    let resolved = quiz_board();
    let policy = StackPolicy::default();
    let envelope = EnvelopeSpec::default();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(200)).unwrap();

    let (serial, serial_stats) =
        compose_frames_with_stats(&resolved, range, &policy, &envelope, &ComposeThreading::default())
            .unwrap();
    let (parallel, parallel_stats) = compose_frames_with_stats(
        &resolved,
        range,
        &policy,
        &envelope,
        &ComposeThreading {
            parallel: true,
            threads: Some(2),
        },
    )
    .unwrap();

    assert_eq!(serial, parallel);
    assert_eq!(serial_stats, parallel_stats);
}

#[test]
fn stats_collapse_static_tail_frames() {
    // One short cue, no phase anchors: everything after the cue ends is the
    // same empty frame.
    let board = Storyboard {
        playback: PlaybackConfig::new(Fps::new(30, 1).unwrap(), 1.0).unwrap(),
        anchors: vec![],
        cues: vec![Cue {
            id: "card".to_string(),
            at: CueAnchor::Sec(0.0),
            duration_frames: 10,
            kind: LayerKind::StaticImage,
            params: serde_json::Value::Null,
            content: serde_json::json!({ "asset": "card.png" }),
        }],
    };
    let resolved = board.resolve().unwrap();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(40)).unwrap();

    let (frames, stats) = compose_frames_with_stats(
        &resolved,
        range,
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
        &ComposeThreading::default(),
    )
    .unwrap();

    assert_eq!(frames.len(), 40);
    assert_eq!(stats.frames_total, 40);
    // Frames 0..=10 are live (progress changes every frame), frames 11..39
    // are one repeated empty frame.
    assert_eq!(stats.frames_unique, 12);
}

#[test]
fn empty_range_is_rejected() {
    let resolved = quiz_board();
    let range = FrameRange::new(FrameIndex(10), FrameIndex(10)).unwrap();
    let err = compose_frames(
        &resolved,
        range,
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("non-empty"));
}

#[test]
fn zero_worker_threads_is_rejected() {
    let resolved = quiz_board();
    let range = FrameRange::new(FrameIndex(0), FrameIndex(10)).unwrap();
    let err = compose_frames_with_stats(
        &resolved,
        range,
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
        &ComposeThreading {
            parallel: true,
            threads: Some(0),
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("threads"));
}
