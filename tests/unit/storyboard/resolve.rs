use super::*;
use crate::foundation::core::Fps;
use crate::storyboard::model::{Anchor, Cue};
use crate::timeline::phase::Phase;

/// Narration recorded once, published at double speed.
fn sped_up_board() -> Storyboard {
    Storyboard {
        playback: PlaybackConfig::new(Fps::new(30, 1).unwrap(), 2.0).unwrap(),
        anchors: vec![
            Anchor {
                name: "question_on".to_string(),
                at_sec: 2.0,
                starts_phase: Some(Phase::VignetteTyping),
            },
            Anchor {
                name: "answer_drop".to_string(),
                at_sec: 8.0,
                starts_phase: Some(Phase::AnswerRevealed),
            },
            Anchor {
                name: "narration_beat".to_string(),
                at_sec: 52.686,
                starts_phase: None,
            },
        ],
        cues: vec![
            Cue {
                id: "w0".to_string(),
                at: CueAnchor::Name("question_on".to_string()),
                duration_frames: 40,
                kind: LayerKind::CaptionWord,
                params: serde_json::Value::Null,
                content: serde_json::json!({ "text": "Which" }),
            },
            Cue {
                id: "card".to_string(),
                at: CueAnchor::Sec(2.0),
                duration_frames: 40,
                kind: LayerKind::StaticImage,
                params: serde_json::Value::Null,
                content: serde_json::json!({ "asset": "card.png" }),
            },
            Cue {
                id: "late-beat".to_string(),
                at: CueAnchor::Name("narration_beat".to_string()),
                duration_frames: 10,
                kind: LayerKind::Highlight,
                params: serde_json::Value::Null,
                content: serde_json::Value::Null,
            },
        ],
    }
}

#[test]
fn anchors_freeze_through_the_playback_rate() {
    let resolved = sped_up_board().resolve().unwrap();
    // 2.0s of narration at rate 2.0 is 1.0s of output, so frame 30.
    assert_eq!(resolved.anchor_frame("question_on"), Some(FrameIndex(30)));
    // floor(52.686 / 2.0 * 30) = floor(790.29).
    assert_eq!(resolved.anchor_frame("narration_beat"), Some(FrameIndex(790)));
    assert_eq!(resolved.anchor_frame("nope"), None);
}

#[test]
fn named_and_raw_cue_anchors_agree() {
    let resolved = sped_up_board().resolve().unwrap();
    assert_eq!(resolved.cues[0].anchor_frame, FrameIndex(30));
    assert_eq!(resolved.cues[0].anchor_frame, resolved.cues[1].anchor_frame);
    assert_eq!(resolved.cues[2].anchor_frame, FrameIndex(790));
}

#[test]
fn phase_track_uses_only_phase_starting_anchors() {
    let resolved = sped_up_board().resolve().unwrap();
    assert_eq!(resolved.phases.starts().len(), 2);
    assert_eq!(resolved.phase_at(FrameIndex(10)).phase, Phase::Idle);
    assert_eq!(
        resolved.phase_at(FrameIndex(45)).phase,
        Phase::VignetteTyping
    );
    assert_eq!(
        resolved.phase_at(FrameIndex(500)).phase,
        Phase::AnswerRevealed
    );
}

#[test]
fn live_window_is_inclusive_on_both_ends() {
    let resolved = sped_up_board().resolve().unwrap();
    let cue = &resolved.cues[0];
    assert_eq!(cue.live_range().len_frames(), 41);
    assert!(!cue.is_live(FrameIndex(29)));
    assert!(cue.is_live(FrameIndex(30)));
    assert!(cue.is_live(FrameIndex(70)));
    assert!(!cue.is_live(FrameIndex(71)));
}

#[test]
fn resolve_is_pure() {
    let board = sped_up_board();
    assert_eq!(board.resolve().unwrap(), board.resolve().unwrap());
}

#[test]
fn resolve_rejects_invalid_boards() {
    let mut board = sped_up_board();
    board.cues[1].id = "w0".to_string();
    assert!(board.resolve().is_err());
}
