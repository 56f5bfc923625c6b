use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use tryon::{
    Canvas, Catalog, Compositor, FrameSink, LandmarkFrame, PoseSequence, RenderThreading,
    RenderedFrame, Rgba8, SequenceJob, SplitMix64, TryOnConfig, TryOnResult, VideoFrame,
    render_sequence_into,
};

#[derive(Parser, Debug)]
#[command(name = "tryon", version, about = "Fit procedural garments to tracked poses")]
struct Cli {
    /// Log debug output to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite one landmark frame into a PNG.
    Frame(FrameArgs),
    /// Render a recorded pose sequence into numbered PNGs.
    Sequence(SequenceArgs),
    /// List the garment catalog.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug)]
struct RenderOpts {
    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Background image painted under the garment.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Garment id (defaults to the configured or first catalog garment).
    #[arg(long)]
    garment: Option<u32>,

    /// Garment scale, clamped to [0.5, 2.0].
    #[arg(long)]
    scale: Option<f32>,

    /// Draw the pose skeleton.
    #[arg(long, default_value_t = false)]
    skeleton: bool,

    /// Seed for sparkles and flowers.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Landmark frame JSON (an array of 33 landmarks or nulls).
    #[arg(long)]
    landmarks: PathBuf,

    /// Surface width when no background is given.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Surface height when no background is given.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    /// Pose sequence JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size (parallel mode only).
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Catalog(args) => cmd_catalog(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<TryOnConfig> {
    match path {
        Some(p) => TryOnConfig::from_path(p).with_context(|| format!("load config '{}'", p.display())),
        None => Ok(TryOnConfig::default()),
    }
}

/// Config with command-line overrides applied.
fn resolve(opts: &RenderOpts) -> anyhow::Result<(TryOnConfig, Catalog)> {
    let mut cfg = load_config(opts.config.as_deref())?;
    if let Some(scale) = opts.scale {
        cfg.render.set_scale(scale);
    }
    if opts.skeleton {
        cfg.render.show_skeleton = true;
    }
    if opts.garment.is_some() {
        cfg.default_garment = opts.garment;
    }
    cfg.validate()?;
    let catalog = cfg.catalog()?;
    Ok((cfg, catalog))
}

fn load_background(path: Option<&Path>, fallback: Canvas) -> anyhow::Result<VideoFrame> {
    let frame = match path {
        Some(p) => VideoFrame::from_path(p)?,
        None => VideoFrame::solid(fallback.width, fallback.height, Rgba8::BLACK)?,
    };
    Ok(frame)
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, catalog) = resolve(&args.render)?;
    let file = std::fs::File::open(&args.landmarks)
        .with_context(|| format!("open landmarks '{}'", args.landmarks.display()))?;
    let landmarks: LandmarkFrame = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("parse landmarks '{}'", args.landmarks.display()))?;

    let background = load_background(
        args.render.background.as_deref(),
        Canvas::new(args.width, args.height)?,
    )?;
    let canvas = background.canvas()?;

    let mut compositor =
        Compositor::with_rng(canvas, cfg.anatomy_builder(), SplitMix64::new(args.render.seed));
    compositor.start(&catalog);
    if let Some(id) = cfg.default_garment {
        compositor.select_garment(id)?;
    }
    let outcome = compositor.on_frame(&background, Some(&landmarks), &cfg.render)?;
    tracing::info!(?outcome, "frame composited");

    write_file(&args.out, &compositor.snapshot_png()?)?;
    eprintln!("wrote {} ({outcome:?})", args.out.display());
    Ok(())
}

struct PngDirSink {
    dir: PathBuf,
}

impl FrameSink for PngDirSink {
    fn push(&mut self, frame: RenderedFrame) -> TryOnResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", frame.index));
        let png = frame.frame.to_png()?;
        std::fs::write(&path, png).with_context(|| format!("write '{}'", path.display()))?;
        Ok(())
    }
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (cfg, catalog) = resolve(&args.render)?;
    let sequence = PoseSequence::from_path(&args.in_path)?;
    let background = load_background(args.render.background.as_deref(), sequence.canvas()?)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let job = SequenceJob {
        sequence: &sequence,
        background: &background,
        catalog: &catalog,
        garment: cfg.default_garment,
        anatomy: cfg.anatomy_builder(),
        render: cfg.render,
        seed: args.render.seed,
    };
    let threading = RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };
    let mut sink = PngDirSink {
        dir: args.out_dir.clone(),
    };
    let stats = render_sequence_into(&job, &threading, &mut sink)?;

    eprintln!(
        "wrote {} frames to {} ({} with garment, {} skipped)",
        stats.frames_total,
        args.out_dir.display(),
        stats.frames_drawn,
        stats.frames_skipped
    );
    Ok(())
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let catalog = cfg.catalog()?;
    for g in catalog.garments() {
        let pattern = g.pattern.as_deref().unwrap_or("-");
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            g.id,
            g.name,
            g.color,
            g.style.as_str(),
            g.style.kind().as_str(),
            pattern
        );
    }
    Ok(())
}
