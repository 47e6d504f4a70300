use super::*;

fn cfg(fps_num: u32, rate: f64) -> PlaybackConfig {
    PlaybackConfig::new(Fps::new(fps_num, 1).unwrap(), rate).unwrap()
}

#[test]
fn maps_sped_up_narration_to_frames() {
    // 52.686s of raw narration at 2x playback, 30 fps output.
    let cfg = cfg(30, 2.0);
    assert_eq!(cfg.to_frame(52.686).unwrap(), FrameIndex(790));
}

#[test]
fn unit_rate_matches_plain_fps_mapping() {
    let cfg = cfg(30, 1.0);
    assert_eq!(cfg.to_frame(0.0).unwrap(), FrameIndex(0));
    assert_eq!(cfg.to_frame(1.0).unwrap(), FrameIndex(30));
    assert_eq!(cfg.to_frame(1.5).unwrap(), FrameIndex(45));
}

#[test]
fn mapping_is_monotonic_non_decreasing() {
    let cfg = cfg(30, 1.37);
    let mut prev = cfg.to_frame(0.0).unwrap();
    for i in 1..=2000 {
        let t = (i as f64) * 0.0173;
        let f = cfg.to_frame(t).unwrap();
        assert!(f >= prev, "frame regressed at t={t}: {f:?} < {prev:?}");
        prev = f;
    }
}

#[test]
fn rejects_invalid_rate() {
    let fps = Fps::new(30, 1).unwrap();
    assert!(PlaybackConfig::new(fps, 0.0).is_err());
    assert!(PlaybackConfig::new(fps, -1.0).is_err());
    assert!(PlaybackConfig::new(fps, f64::NAN).is_err());
    assert!(PlaybackConfig::new(fps, f64::INFINITY).is_err());
}

#[test]
fn rejects_negative_and_non_finite_timestamps() {
    let cfg = cfg(30, 2.0);
    assert!(cfg.to_frame(-0.1).is_err());
    assert!(cfg.to_frame(f64::NAN).is_err());
    assert!(cfg.to_frame(f64::INFINITY).is_err());
}

#[test]
fn clamped_mapping_floors_negatives_to_zero() {
    let cfg = cfg(30, 2.0);
    assert_eq!(cfg.to_frame_clamped(-5.0), FrameIndex(0));
    assert_eq!(cfg.to_frame_clamped(52.686), FrameIndex(790));
}

#[test]
fn rate_defaults_to_one_in_json() {
    let cfg: PlaybackConfig = serde_json::from_str(r#"{"fps":{"num":30,"den":1}}"#).unwrap();
    assert_eq!(cfg.rate, 1.0);
    cfg.validate().unwrap();
}
