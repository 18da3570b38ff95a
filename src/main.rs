//! `zensprite`: pack a folder of PNGs into one sprite sheet plus a stylesheet.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use zensprite::composite::{self, FileSource, OverrideFit};
use zensprite::{Catalog, GridConfig, Stylesheet, discover, svg};

#[derive(Parser, Debug)]
#[command(
    name = "zensprite",
    version,
    about = "Pack a folder of PNG images into a sprite sheet and a CSS stylesheet"
)]
struct Cli {
    /// Folder containing the source PNGs
    dir: PathBuf,

    /// Also pick up PNGs in sub-folders
    #[arg(short, long)]
    recursive: bool,

    /// Where to write the sprite sheet
    #[arg(short = 'i', long = "output-image", default_value = "sprite.png")]
    output_image: PathBuf,

    /// Where to write the stylesheet
    #[arg(short = 's', long = "output-style", default_value = "style.css")]
    output_style: PathBuf,

    /// Gap in pixels between neighbouring sprites and between rows
    #[arg(short, long, default_value_t = 0)]
    padding: u32,

    /// Force every sprite into an N×N cell
    #[arg(
        short = 'o',
        long = "override-size",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    override_size: Option<u32>,

    /// Put at most N sprites on each row
    #[arg(
        short = 'c',
        long = "columns-number",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    columns: Option<u32>,

    /// How images that don't match the override size are fitted to it
    #[arg(long, value_enum, default_value_t = FitArg::Scale)]
    override_fit: FitArg,

    /// CSS class shared by every sprite; ids become `<prefix>-<id>`
    #[arg(long, default_value = Stylesheet::DEFAULT_PREFIX, value_parser = parse_class_prefix)]
    class_prefix: String,

    /// Also write an SVG preview of the layout
    #[arg(long, value_name = "PATH")]
    preview_svg: Option<PathBuf>,

    /// Overwrite output files that already exist
    #[arg(long)]
    force: bool,

    /// More logging (-v debug, -vv trace). Ignored when RUST_LOG is set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FitArg {
    /// Resample to the cell size
    Scale,
    /// Keep the top-left corner
    Crop,
}

impl From<FitArg> for OverrideFit {
    fn from(fit: FitArg) -> Self {
        match fit {
            FitArg::Scale => OverrideFit::Scale,
            FitArg::Crop => OverrideFit::Crop,
        }
    }
}

fn parse_class_prefix(raw: &str) -> Result<String, String> {
    let mut chars = raw.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '-');
    if leading_ok && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        Ok(raw.to_owned())
    } else {
        Err(format!("{raw:?} is not a usable CSS class name"))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}

fn init_tracing(verbose: u8) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, &rust_log))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// `rust_log` directives when it has any valid ones, else the `-v` level.
fn log_filter(verbose: u8, rust_log: &str) -> EnvFilter {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log)
}

fn run(cli: &Cli) -> Result<()> {
    // Output paths are checked before anything is decoded.
    let mut outputs = vec![&cli.output_image, &cli.output_style];
    outputs.extend(cli.preview_svg.as_ref());
    check_outputs(&outputs, cli.force)?;

    let mut paths = discover::find_images(&cli.dir, cli.recursive)
        .with_context(|| format!("cannot scan {}", cli.dir.display()))?;
    // A previous sheet written into the input folder is not an input.
    if let Ok(own) = std::fs::canonicalize(&cli.output_image) {
        paths.retain(|p| std::fs::canonicalize(p).map_or(true, |p| p != own));
    }

    let sources = discover::probe(&paths, cli.override_size)?;
    let catalog = Catalog::build(sources, cli.override_size)
        .with_context(|| format!("no usable sprites in {}", cli.dir.display()))?;

    let collisions = catalog.duplicate_ids();
    if !collisions.is_empty() {
        for collision in &collisions {
            warn!(id = collision.id, files = ?collision.names, "sprite id collision");
        }
        bail!(
            "{} sprite id(s) are shared by more than one file; rename the files so their names differ",
            collisions.len()
        );
    }

    let config = GridConfig {
        columns: cli.columns,
        padding: cli.padding,
    };
    let plan = config
        .plan(catalog.items())
        .context("cannot lay out sprites")?;

    let sheet = composite::compose(&catalog, &plan, &FileSource, cli.override_fit.into())?;
    composite::write_png(&sheet, &cli.output_image)?;

    let css = Stylesheet::new(image_url(&cli.output_image))
        .class_prefix(cli.class_prefix.as_str())
        .render(&plan);
    std::fs::write(&cli.output_style, css)
        .with_context(|| format!("failed to write {}", cli.output_style.display()))?;

    if let Some(path) = &cli.preview_svg {
        std::fs::write(path, svg::render_plan_svg(&plan))
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let canvas = plan.canvas();
    info!(
        sprites = plan.placements().len(),
        rows = plan.rows().len(),
        width = canvas.width,
        height = canvas.height,
        occupancy = format_args!("{:.1}%", plan.occupancy() * 100.0),
        image = %cli.output_image.display(),
        style = %cli.output_style.display(),
        "wrote sprite sheet"
    );
    Ok(())
}

/// The stylesheet refers to the sheet by file name, so the two are expected
/// to be served from the same directory.
fn image_url(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

fn check_outputs(outputs: &[&PathBuf], force: bool) -> Result<()> {
    let mut seen: Vec<PathBuf> = Vec::with_capacity(outputs.len());
    for path in outputs {
        if path.is_dir() {
            bail!("{} is a directory", path.display());
        }
        if path.exists() && !force {
            bail!("{} already exists (pass --force to overwrite)", path.display());
        }
        let parent = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        if !parent.is_dir() {
            bail!(
                "cannot write {}: {} is not a directory",
                path.display(),
                parent.display()
            );
        }
        let Some(file_name) = path.file_name() else {
            bail!("{} does not name a file", path.display());
        };
        let resolved = std::fs::canonicalize(parent)
            .with_context(|| format!("cannot resolve {}", parent.display()))?
            .join(file_name);
        if seen.contains(&resolved) {
            bail!("{} is given for more than one output", path.display());
        }
        seen.push(resolved);
    }
    Ok(())
}
