use super::*;
use crate::foundation::core::Fps;

fn basic_board() -> Storyboard {
    Storyboard {
        playback: PlaybackConfig::new(Fps::new(30, 1).unwrap(), 1.25).unwrap(),
        anchors: vec![
            Anchor {
                name: "question_on".to_string(),
                at_sec: 1.0,
                starts_phase: Some(Phase::VignetteTyping),
            },
            Anchor {
                name: "options_in".to_string(),
                at_sec: 3.0,
                starts_phase: Some(Phase::OptionsRevealing),
            },
            Anchor {
                name: "sting".to_string(),
                at_sec: 3.2,
                starts_phase: None,
            },
        ],
        cues: vec![
            Cue {
                id: "w0".to_string(),
                at: CueAnchor::Name("question_on".to_string()),
                duration_frames: 40,
                kind: LayerKind::CaptionWord,
                params: serde_json::json!({ "bounce": true }),
                content: serde_json::json!({ "text": "Which" }),
            },
            Cue {
                id: "rumble".to_string(),
                at: CueAnchor::Name("sting".to_string()),
                duration_frames: 18,
                kind: LayerKind::Shake,
                params: serde_json::json!({ "amp_px": 8.0 }),
                content: serde_json::Value::Null,
            },
            Cue {
                id: "pic".to_string(),
                at: CueAnchor::Sec(2.25),
                duration_frames: 60,
                kind: LayerKind::StaticImage,
                params: serde_json::Value::Null,
                content: serde_json::json!({ "asset": "diagram.png" }),
            },
        ],
    }
}

#[test]
fn json_roundtrip() {
    let board = basic_board();
    let s = serde_json::to_string_pretty(&board).unwrap();
    let de: Storyboard = serde_json::from_str(&s).unwrap();
    de.validate().unwrap();
    assert_eq!(de.anchors.len(), 3);
    assert_eq!(de.cues.len(), 3);
    assert_eq!(de.playback.rate, 1.25);
    assert_eq!(de.cues[0].at, CueAnchor::Name("question_on".to_string()));
    assert_eq!(de.cues[2].at, CueAnchor::Sec(2.25));
}

#[test]
fn serde_defaults_fill_optional_fields() {
    let json = r#"{
        "playback": { "fps": { "num": 30, "den": 1 } },
        "anchors": [
            { "name": "question_on", "at_sec": 1.0, "starts_phase": "VignetteTyping" },
            { "name": "sting", "at_sec": 2.5 }
        ],
        "cues": [
            { "id": "w0", "at": "question_on", "duration_frames": 40, "kind": "CaptionWord" },
            { "id": "pic", "at": 2.25, "duration_frames": 60, "kind": "StaticImage" }
        ]
    }"#;
    let board: Storyboard = serde_json::from_str(json).unwrap();
    board.validate().unwrap();

    assert_eq!(board.playback.rate, 1.0);
    assert!(board.anchors[1].starts_phase.is_none());
    assert_eq!(board.cues[0].at, CueAnchor::Name("question_on".to_string()));
    assert_eq!(board.cues[1].at, CueAnchor::Sec(2.25));
    assert!(board.cues[0].params.is_null());
    assert!(board.cues[0].content.is_null());
}

#[test]
fn validate_rejects_duplicate_anchor_name() {
    let mut board = basic_board();
    board.anchors[1].name = "question_on".to_string();
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_duplicate_cue_id() {
    let mut board = basic_board();
    board.cues[1].id = "w0".to_string();
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_zero_duration_cue() {
    let mut board = basic_board();
    board.cues[0].duration_frames = 0;
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_missing_anchor_reference() {
    let mut board = basic_board();
    board.cues[0].at = CueAnchor::Name("nope".to_string());
    let err = board.validate().unwrap_err();
    assert!(err.to_string().contains("missing anchor"));
}

#[test]
fn validate_rejects_out_of_order_phase_starts() {
    let mut board = basic_board();
    board.anchors[0].starts_phase = Some(Phase::Thinking);
    board.anchors[1].starts_phase = Some(Phase::VignetteTyping);
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_negative_timestamps() {
    let mut board = basic_board();
    board.anchors[2].at_sec = -0.5;
    assert!(board.validate().is_err());

    let mut board = basic_board();
    board.cues[2].at = CueAnchor::Sec(f64::NAN);
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_malformed_params() {
    let mut board = basic_board();
    board.cues[1].params = serde_json::json!({ "amp_px": "loud" });
    let err = board.validate().unwrap_err();
    assert!(err.to_string().contains("rumble"));

    let mut board = basic_board();
    board.cues[0].params = serde_json::json!([1, 2, 3]);
    assert!(board.validate().is_err());
}

#[test]
fn validate_rejects_bad_playback() {
    let mut board = basic_board();
    board.playback.rate = 0.0;
    assert!(board.validate().is_err());

    let mut board = basic_board();
    board.playback.fps = Fps { num: 30, den: 0 };
    assert!(board.validate().is_err());
}

#[test]
fn kind_classification_covers_every_variant() {
    let visual = [
        LayerKind::StaticImage,
        LayerKind::LoopingClip,
        LayerKind::CaptionWord,
        LayerKind::Highlight,
        LayerKind::Vignette,
        LayerKind::TimerRing,
    ];
    for kind in visual {
        assert!(kind.is_visual());
    }
    assert!(!LayerKind::Shake.is_visual());
    assert!(!LayerKind::AudioOneShot.is_visual());

    let pops = [
        LayerKind::StaticImage,
        LayerKind::LoopingClip,
        LayerKind::CaptionWord,
        LayerKind::TimerRing,
    ];
    for kind in pops {
        assert!(kind.wants_pop_in());
    }
    assert!(!LayerKind::Highlight.wants_pop_in());
    assert!(!LayerKind::Vignette.wants_pop_in());
}
