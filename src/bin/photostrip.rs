use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use photostrip::{
    BoothConfig, Canvas, Frame, FrameCompositor, OverlayImage, OverlayTransform, Rgb8,
    StripAssembler, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "photostrip", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture one mirrored still from an image, optionally with an overlay.
    Capture(CaptureArgs),
    /// Assemble captured stills into a themed strip.
    Strip(StripArgs),
    /// List available themes.
    Themes,
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Image standing in for the camera feed.
    #[arg(long)]
    source: PathBuf,

    /// Foreground overlay image.
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Horizontal overlay pan in preview pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    tx: f64,

    /// Vertical overlay pan in preview pixels.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    ty: f64,

    /// Overlay zoom (clamped to the configured limits).
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Width of the preview container the pan was measured in. Defaults to the capture width.
    #[arg(long)]
    preview_width: Option<f64>,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct StripArgs {
    /// Captured stills, in strip order.
    #[arg(long = "frame", required = true)]
    frames: Vec<PathBuf>,

    /// Theme id.
    #[arg(long, default_value = "simple")]
    theme: Theme,

    /// Background colour (`#rrggbb`).
    #[arg(long, default_value = "#ffffff")]
    background: Rgb8,

    /// Font file for decoration text (overrides the config).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Strip(args) => cmd_strip(args),
        Command::Themes => {
            for t in Theme::ALL {
                println!("{}\t{}", t.id(), t.display_name());
            }
            Ok(())
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BoothConfig> {
    match path {
        Some(p) => Ok(BoothConfig::from_path(p)?),
        None => Ok(BoothConfig::default()),
    }
}

fn read_image(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let compositor = FrameCompositor::new(cfg.capture.canvas()?);
    let source = read_image(&args.source)?;
    let overlay = match &args.overlay {
        Some(p) => {
            let bytes = std::fs::read(p).with_context(|| format!("read '{}'", p.display()))?;
            Some(OverlayImage::decode(&bytes)?)
        }
        None => None,
    };

    let transform = OverlayTransform {
        translate_x: args.tx,
        translate_y: args.ty,
        scale: args.scale.clamp(cfg.scale.min, cfg.scale.max),
    };
    let preview_width = args
        .preview_width
        .unwrap_or_else(|| f64::from(cfg.capture.width));

    let frame = compositor.capture(&source, overlay.as_ref(), transform, preview_width)?;
    std::fs::write(&args.out, frame.png_bytes())
        .with_context(|| format!("write '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_strip(args: StripArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(args.config.as_deref())?;
    if let Some(font) = args.font {
        cfg.font = Some(font);
    }
    let expected = cfg.capture.canvas()?;

    let mut frames = Vec::with_capacity(args.frames.len());
    for p in &args.frames {
        let bytes = std::fs::read(p).with_context(|| format!("read frame '{}'", p.display()))?;
        frames.push(Frame::from_encoded(bytes, frame_canvas(p, expected)?));
    }

    let assembler = StripAssembler::new(&cfg)?;
    let strip = assembler.assemble(args.theme, args.background, &frames)?;
    strip.save_png(&args.out)?;
    eprintln!(
        "wrote {} ({}x{}, {} frames)",
        args.out.display(),
        strip.width(),
        strip.height(),
        frames.len()
    );
    Ok(())
}

fn frame_canvas(path: &Path, fallback: Canvas) -> anyhow::Result<Canvas> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Ok(Canvas::new(width, height)?),
        Err(_) => Ok(fallback),
    }
}
