use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cueline::{
    ComposeThreading, EnvelopeSpec, FrameIndex, FrameRange, ResolvedStoryboard, StackPolicy,
    Storyboard, compose_frame, compose_frames_with_stats,
};

#[derive(Parser, Debug)]
#[command(name = "cueline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a storyboard JSON file and report its shape.
    Validate(ValidateArgs),
    /// Resolve a storyboard and dump its anchor frame table.
    Anchors(ValidateArgs),
    /// Compose a single frame and print the frame plan as JSON.
    Frame(FrameArgs),
    /// Compose a frame range and report dedup stats.
    Range(RangeArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RangeArgs {
    /// Input storyboard JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// End frame (exclusive).
    #[arg(long)]
    end: u64,

    /// Output JSON path for the full frame list (omitted: stats only).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Anchors(args) => cmd_anchors(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Range(args) => cmd_range(args),
    }
}

fn load_storyboard(path: &PathBuf) -> anyhow::Result<ResolvedStoryboard> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read storyboard '{}'", path.display()))?;
    let board: Storyboard = serde_json::from_str(&text)
        .with_context(|| format!("parse storyboard '{}'", path.display()))?;
    let resolved = board
        .resolve()
        .with_context(|| format!("resolve storyboard '{}'", path.display()))?;
    Ok(resolved)
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let resolved = load_storyboard(&args.in_path)?;
    eprintln!(
        "ok: {} anchors, {} cues, {} phase starts",
        resolved.frame_anchors.len(),
        resolved.cues.len(),
        resolved.phases.starts().len()
    );
    Ok(())
}

fn cmd_anchors(args: ValidateArgs) -> anyhow::Result<()> {
    let resolved = load_storyboard(&args.in_path)?;
    println!("{}", serde_json::to_string_pretty(&resolved.frame_anchors)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let resolved = load_storyboard(&args.in_path)?;
    let frame = compose_frame(
        &resolved,
        FrameIndex(args.frame),
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
    )?;
    let json = serde_json::to_string_pretty(&frame)?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write frame plan '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_range(args: RangeArgs) -> anyhow::Result<()> {
    let resolved = load_storyboard(&args.in_path)?;
    let range = FrameRange::new(FrameIndex(args.start), FrameIndex(args.end))?;
    let threading = ComposeThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let (frames, stats) = compose_frames_with_stats(
        &resolved,
        range,
        &StackPolicy::default(),
        &EnvelopeSpec::default(),
        &threading,
    )?;

    if let Some(out) = args.out {
        if let Some(parent) = out.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&out, serde_json::to_string_pretty(&frames)?)
            .with_context(|| format!("write frame plans '{}'", out.display()))?;
        eprintln!("wrote {}", out.display());
    }

    eprintln!(
        "composed {} frames ({} unique)",
        stats.frames_total, stats.frames_unique
    );
    Ok(())
}
