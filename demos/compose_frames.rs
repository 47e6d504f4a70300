use cueline::{
    ComposeThreading, EnvelopeSpec, FrameIndex, FrameRange, StackPolicy, Storyboard, compose_frame,
    compose_frames_with_stats,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("../tests/data/quiz_storyboard.json");
    let board: Storyboard = serde_json::from_str(s)?;
    let resolved = board.resolve()?;

    let policy = StackPolicy::default();
    let envelope = EnvelopeSpec::default();

    for f in [0u64, 18, 51, 76, 135, 140, 170, 280] {
        let frame = compose_frame(&resolved, FrameIndex(f), &policy, &envelope)?;
        println!(
            "frame {f}: {:?} +{} | {} layers, {} audio, offset ({:.2}, {:.2})",
            frame.phase.phase,
            frame.phase.frames_into,
            frame.layers.len(),
            frame.audio.len(),
            frame.container_offset.x,
            frame.container_offset.y,
        );
    }

    let range = FrameRange::new(FrameIndex(0), FrameIndex(300))?;
    let (_, stats) = compose_frames_with_stats(
        &resolved,
        range,
        &policy,
        &envelope,
        &ComposeThreading {
            parallel: true,
            threads: None,
        },
    )?;
    println!(
        "composed {} frames, {} unique",
        stats.frames_total, stats.frames_unique
    );

    Ok(())
}
