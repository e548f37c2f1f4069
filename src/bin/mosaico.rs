use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use mosaico::{
    Bounds, CompositeOutput, CompositeSettings, Compositor, DecodeThreading, DirImageSource,
    DocumentPage, SceneDoc, Workspace, crop_image, encode_png, export::png, foundation::core::Size,
    write_pdf,
};

#[derive(Parser, Debug)]
#[command(name = "mosaico", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the scene composite as a PNG.
    Render(RenderArgs),
    /// Render the scene composite into a single-page PDF.
    Pdf(RenderArgs),
    /// Render the opaque mosaic used to feed a new crop.
    Mosaic(RenderArgs),
    /// Cut a display-space area out of an image.
    Crop(CropArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. Defaults to a timestamped name in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Root for relative image references. Defaults to the scene's directory.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Override the container size, e.g. `1280x720`.
    #[arg(long, value_parser = parse_size)]
    container: Option<Size>,

    /// Decode fragment images on a rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct CropArgs {
    /// Source image.
    #[arg(long)]
    image: PathBuf,

    /// Size the image is displayed at, e.g. `400x300`.
    #[arg(long, value_parser = parse_size)]
    display: Size,

    /// Crop area in display coordinates: `x,y,width,height`.
    #[arg(long, value_parser = parse_bounds)]
    area: Bounds,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Pdf(args) => cmd_pdf(args),
        Command::Mosaic(args) => cmd_mosaic(args),
        Command::Crop(args) => cmd_crop(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (ws, compositor) = load(&args)?;
    let Some(out) = compositor.composite(&ws)? else {
        eprintln!("nothing to render");
        return Ok(());
    };
    report(&out);
    let path = out_path(&args, png::COMPOSITE_PREFIX, "png");
    png::write_bytes(&path, &encode_png(&out.raster)?)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_pdf(args: RenderArgs) -> anyhow::Result<()> {
    let (ws, compositor) = load(&args)?;
    let Some(out) = compositor.composite(&ws)? else {
        eprintln!("nothing to render");
        return Ok(());
    };
    report(&out);
    let page = DocumentPage::for_size(ws.template().canvas_size(ws.container()));
    let path = out_path(&args, png::MOSAIC_PREFIX, "pdf");
    png::write_bytes(&path, &write_pdf(&out.raster, &page)?)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_mosaic(args: RenderArgs) -> anyhow::Result<()> {
    let (ws, compositor) = load(&args)?;
    let Some(out) = compositor.composite_for_crop(&ws)? else {
        eprintln!("nothing to render");
        return Ok(());
    };
    report(&out);
    let path = out_path(&args, png::MOSAIC_PREFIX, "png");
    png::write_bytes(&path, &encode_png(&out.raster)?)?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_crop(args: CropArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let cropped = crop_image(&bytes, args.area, args.display)?;
    png::write_bytes(&args.out, &cropped)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn load(args: &RenderArgs) -> anyhow::Result<(Workspace, Compositor)> {
    let mut doc = SceneDoc::from_path(&args.in_path)?;
    if let Some(container) = args.container {
        doc.container = container;
    }
    let ws = doc.into_workspace()?;

    let root = match &args.assets {
        Some(dir) => dir.clone(),
        None => args
            .in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf(),
    };
    let settings = CompositeSettings {
        threading: DecodeThreading {
            parallel: args.parallel,
            threads: args.threads,
        }
        .with_env_override(),
    };
    let compositor = Compositor::new(Arc::new(DirImageSource::new(root)), settings);
    Ok((ws, compositor))
}

fn report(out: &CompositeOutput) {
    if out.stats.skipped > 0 {
        eprintln!(
            "{} fragment(s) skipped: image unavailable",
            out.stats.skipped
        );
    }
}

fn out_path(args: &RenderArgs, prefix: &str, ext: &str) -> PathBuf {
    args.out
        .clone()
        .unwrap_or_else(|| PathBuf::from(png::timestamped_name(prefix, png::now_millis(), ext)))
}

fn parse_size(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    Ok(Size::new(w, h))
}

fn parse_bounds(s: &str) -> Result<Bounds, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("bad area '{s}': {e}"))?;
    match parts.as_slice() {
        [x, y, w, h] => Ok(Bounds::new(*x, *y, *w, *h)),
        _ => Err(format!("expected x,y,width,height, got '{s}'")),
    }
}
