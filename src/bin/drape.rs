use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "drape", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a preview composite at a viewport size as a PNG.
    Composite(CompositeArgs),
    /// Render at the product photo's native resolution as a PNG.
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct JobArgs {
    /// Product record JSON (catalog format).
    #[arg(long)]
    record: PathBuf,

    /// Product photo. Defaults to the record's `imageUrl`, relative to the record file.
    #[arg(long)]
    product: Option<PathBuf>,

    /// Design image (PNG or JPEG).
    #[arg(long)]
    design: PathBuf,

    /// Product color as `#RRGGBB`. Defaults to the record's first color option.
    #[arg(long)]
    color: Option<String>,

    /// Compositor options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Design scale as a multiple of its fit scale.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Design rotation in degrees.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    rotate: f64,

    #[command(flatten)]
    warp: WarpArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct WarpArgs {
    /// Warp shape.
    #[arg(long, value_enum, default_value_t = StyleChoice::Wave)]
    warp_style: StyleChoice,

    /// Wave travel axis.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Horizontal)]
    warp_direction: DirectionChoice,

    /// Warp strength in [-100, 100]; 0 disables warping.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    intensity: f64,

    /// Wave cycles across the design in [1, 10].
    #[arg(long, default_value_t = 2.0)]
    frequency: f64,

    /// Peak displacement in pixels, [1, 20].
    #[arg(long, default_value_t = 5.0)]
    amplitude: f64,

    /// Wave phase in degrees.
    #[arg(long, default_value_t = 0.0)]
    phase: f64,
}

#[derive(Args, Debug)]
struct CompositeArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    job: JobArgs,

    /// Also print the save-design request JSON for this user to stdout.
    #[arg(long)]
    user: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Wave,
    Bulge,
    Pinch,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Horizontal,
    Vertical,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.job, Some((args.width, args.height)))?;
    let bmp = session.composite()?;
    write_png(&args.job.out, &bmp)?;
    eprintln!("wrote {}", args.job.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut session = open_session(&args.job, None)?;
    let bmp = session.export_full_resolution()?;
    write_png(&args.job.out, &bmp)?;
    eprintln!("wrote {}", args.job.out.display());

    if let Some(user) = &args.user {
        let req = session.save_request(user)?;
        println!("{}", serde_json::to_string_pretty(&req)?);
    }
    Ok(())
}

/// Without a viewport, the preview surface matches the product photo.
fn open_session(
    job: &JobArgs,
    viewport: Option<(u32, u32)>,
) -> anyhow::Result<drape::EditSession> {
    let record = read_record(&job.record)?;
    let opts = match &job.config {
        Some(path) => drape::CompositorOpts::from_json_file(path)?,
        None => drape::CompositorOpts::default(),
    };

    let product_path = match &job.product {
        Some(p) => p.clone(),
        None => job
            .record
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(&record.image_url),
    };

    let (width, height) = viewport.unwrap_or((1, 1));
    let mut session = drape::EditSession::new(record, opts, width, height)?;
    session
        .load_product(drape::ImageSource::File(product_path.clone()))
        .with_context(|| format!("load product '{}'", product_path.display()))?;
    if viewport.is_none()
        && let Some(img) = session.product_slot().ready()
    {
        let (w, h) = (img.width, img.height);
        session.resize_now(w, h);
    }
    session
        .load_design(drape::ImageSource::File(job.design.clone()))
        .with_context(|| format!("load design '{}'", job.design.display()))?;

    if let Some(color) = &job.color {
        session.select_color(color)?;
    }
    session.set_warp(warp_params(&job.warp));
    session.resize_to(job.scale)?;
    session.rotate_to(job.rotate)?;
    Ok(session)
}

fn read_record(path: &Path) -> anyhow::Result<drape::ProductRecord> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open product record '{}'", path.display()))?;
    let record = drape::ProductRecord::from_json(&text)
        .with_context(|| format!("parse product record '{}'", path.display()))?;
    Ok(record)
}

fn warp_params(args: &WarpArgs) -> drape::WarpParams {
    drape::WarpParams {
        style: match args.warp_style {
            StyleChoice::Wave => drape::WarpStyle::Wave,
            StyleChoice::Bulge => drape::WarpStyle::Bulge,
            StyleChoice::Pinch => drape::WarpStyle::Pinch,
        },
        direction: match args.warp_direction {
            DirectionChoice::Horizontal => drape::WarpDirection::Horizontal,
            DirectionChoice::Vertical => drape::WarpDirection::Vertical,
        },
        intensity: args.intensity,
        frequency: args.frequency,
        amplitude: args.amplitude,
        phase: args.phase,
    }
}

fn write_png(path: &Path, bmp: &drape::RenderedBitmap) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &bmp.to_straight_rgba8(),
        bmp.width,
        bmp.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
