use cueline::{
    CueAnchor, CueBuilder, Fps, LayerKind, Phase, PlaybackConfig, StoryboardBuilder, audio_cue,
    caption_cue,
};

fn main() -> anyhow::Result<()> {
    let playback = PlaybackConfig::new(Fps::new(30, 1)?, 2.0)?;

    let board = StoryboardBuilder::new(playback)
        .phase_anchor("question_on", 1.2, Phase::VignetteTyping)?
        .phase_anchor("answer_drop", 9.0, Phase::AnswerRevealed)?
        .cue(caption_cue(
            "q-word-which",
            CueAnchor::Name("question_on".to_string()),
            90,
            "Which",
        )?)?
        .cue(
            CueBuilder::new(
                "reveal-shake",
                LayerKind::Shake,
                CueAnchor::Name("answer_drop".to_string()),
                16,
            )
            .params(serde_json::json!({ "amp_px": 7.0, "scope": "container" }))
            .build()?,
        )?
        .cue(audio_cue(
            "ding",
            CueAnchor::Name("answer_drop".to_string()),
            14,
            "ding.ogg",
        )?)?
        .build()?;

    println!("{}", serde_json::to_string_pretty(&board)?);
    Ok(())
}
