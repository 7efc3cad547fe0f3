use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use tomo_core::{Image, Point2d, finite_range, normalize_to_u8};
use tomo_phantom::{MAIN_RAY_VALUE, NOISE_RAY_VALUE, StarPatternConfig, make_star_pattern};
use tomo_radon::{RadonConfig, RadonProjector, Sinogram, angle_range_deg};

#[derive(Parser, Debug)]
#[command(name = "tomo_gallery")]
#[command(about = "Render star fixtures and their sinograms to disk")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the star pattern.
    #[command(name = "star")]
    Star(StarArgs),
    /// Project an image (or the star pattern) into a sinogram.
    #[command(name = "sinogram")]
    Sinogram(SinogramArgs),
}

#[derive(Args, Debug, Clone)]
struct StarOverrides {
    /// JSON file with a full or partial star pattern config.
    #[arg(long)]
    star_config: Option<PathBuf>,
    #[arg(long)]
    width: Option<usize>,
    #[arg(long)]
    height: Option<usize>,
    /// Ray origin column (requires --center-y).
    #[arg(long, requires = "center_y")]
    center_x: Option<f64>,
    /// Ray origin row (requires --center-x).
    #[arg(long, requires = "center_x")]
    center_y: Option<f64>,
    #[arg(long)]
    length: Option<usize>,
    #[arg(long)]
    thickness: Option<usize>,
    /// Strong ray angles in degrees, comma separated.
    #[arg(long, value_delimiter = ',')]
    main_angles: Option<Vec<f64>>,
    /// Weak ray angles in degrees, comma separated.
    #[arg(long, value_delimiter = ',')]
    noise_angles: Option<Vec<f64>>,
}

#[derive(Args, Debug, Clone)]
struct StarArgs {
    #[command(flatten)]
    star: StarOverrides,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
struct SinogramArgs {
    /// Grayscale input image; the star pattern is drawn when absent.
    #[arg(long)]
    input: Option<PathBuf>,
    #[command(flatten)]
    star: StarOverrides,
    /// JSON file with a full or partial transform config.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Skip diagonal padding.
    #[arg(long)]
    no_pad: bool,
    /// Keep the full square instead of the inscribed circle.
    #[arg(long)]
    no_circular_fov: bool,
    #[arg(long)]
    fill: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    angle_start: f64,
    /// Exclusive upper bound of the angle sweep.
    #[arg(long, default_value_t = 180.0)]
    angle_stop: f64,
    #[arg(long, default_value_t = 1.0)]
    angle_step: f64,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize)]
struct MetaStar {
    config: StarPatternConfig,
    center: Point2d,
    main_pixels: usize,
    noise_pixels: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSinogram {
    source: String,
    input_width: usize,
    input_height: usize,
    /// Sample scale of the input: `0..=65535` for files, `0..=1` for the star.
    input_scale: &'static str,
    config: RadonConfig,
    num_detectors: usize,
    num_angles: usize,
    s_range: Option<[f64; 2]>,
    angle_range_deg: Option<[f64; 2]>,
    value_range: Option<[f64; 2]>,
    layout: &'static str,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Star(args) => run_star(args),
        Command::Sinogram(args) => run_sinogram(args),
    }
}

fn run_star(args: StarArgs) -> Result<()> {
    let case_dir = prepare_case_dir(&args.out, "star")?;
    let cfg = resolve_star_config(&args.star)?;
    let img = make_star_pattern(&cfg).context("drawing star pattern")?;

    tracing::info!("star pattern {}x{}", img.width(), img.height());

    save_f64_image(case_dir.join("input.png"), &img)?;
    write_json(
        case_dir.join("meta.json"),
        &MetaStar {
            center: cfg.resolved_center(),
            main_pixels: count_value(&img, MAIN_RAY_VALUE),
            noise_pixels: count_value(&img, NOISE_RAY_VALUE),
            config: cfg,
        },
    )?;

    Ok(())
}

fn run_sinogram(args: SinogramArgs) -> Result<()> {
    let case_dir = prepare_case_dir(&args.out, "sinogram")?;

    let (img, source, input_scale) = match &args.input {
        Some(path) => {
            ensure_file_exists(path, "input")?;
            (load_input_f64(path)?, path.display().to_string(), "luma16")
        }
        None => {
            let cfg = resolve_star_config(&args.star)?;
            (
                make_star_pattern(&cfg).context("drawing star pattern")?,
                "star".to_string(),
                "unit",
            )
        }
    };

    let mut cfg: RadonConfig = match &args.config {
        Some(path) => read_json(path)
            .with_context(|| format!("reading transform config at {}", path.display()))?,
        None => RadonConfig::default(),
    };
    if args.no_pad {
        cfg.pad = false;
    }
    if args.no_circular_fov {
        cfg.use_circular_fov = false;
    }
    if let Some(fill) = args.fill {
        cfg.fill = fill;
    }

    let angles = angle_range_deg(args.angle_start, args.angle_stop, args.angle_step);
    if angles.is_empty() {
        tracing::warn!(
            "empty angle sweep [{}, {}) step {}",
            args.angle_start,
            args.angle_stop,
            args.angle_step
        );
    }

    tracing::info!(
        "projecting {} ({}x{}) over {} angles",
        source,
        img.width(),
        img.height(),
        angles.len()
    );

    let mut projector = RadonProjector::new();
    let sino = projector
        .project(&img.as_view(), &angles, &cfg)
        .context("computing sinogram")?;

    save_f64_image(case_dir.join("input.png"), &img)?;
    if sino.num_angles() > 0 {
        save_f64_image(case_dir.join("sinogram.png"), &sino.values().flipped_rows())?;
    }
    write_sinogram_csv(case_dir.join("sinogram.csv"), &sino)?;
    write_csv(case_dir.join("s_coords.csv"), "s", sino.s_coords())?;
    write_csv(case_dir.join("angles.csv"), "angle_deg", &angles)?;

    let (num_detectors, num_angles) = sino.shape();
    write_json(
        case_dir.join("meta.json"),
        &MetaSinogram {
            source,
            input_width: img.width(),
            input_height: img.height(),
            input_scale,
            config: cfg,
            num_detectors,
            num_angles,
            s_range: first_last(sino.s_coords()),
            angle_range_deg: first_last(&angles),
            value_range: finite_range(sino.values().data()),
            layout: "rows = s (ascending), columns = angles (input order)",
        },
    )?;

    tracing::info!(
        "sinogram {}x{} written to {}",
        num_detectors,
        num_angles,
        case_dir.display()
    );

    Ok(())
}

fn resolve_star_config(o: &StarOverrides) -> Result<StarPatternConfig> {
    let mut cfg: StarPatternConfig = match &o.star_config {
        Some(path) => read_json(path)
            .with_context(|| format!("reading star config at {}", path.display()))?,
        None => StarPatternConfig::default(),
    };

    if let Some(w) = o.width {
        cfg.width = w;
    }
    if let Some(h) = o.height {
        cfg.height = h;
    }
    if let (Some(x), Some(y)) = (o.center_x, o.center_y) {
        cfg.center = Some(Point2d::new(x, y));
    }
    if let Some(length) = o.length {
        cfg.length = length;
    }
    if let Some(t) = o.thickness {
        cfg.thickness = t;
    }
    if let Some(a) = &o.main_angles {
        cfg.main_angles_deg = a.clone();
    }
    if let Some(a) = &o.noise_angles {
        cfg.noise_angles_deg = a.clone();
    }

    if cfg.width == 0 || cfg.height == 0 {
        bail!(
            "star canvas must be non-empty, got {}x{}.",
            cfg.width,
            cfg.height
        );
    }

    Ok(cfg)
}

fn prepare_case_dir(out: &Path, case_name: &str) -> Result<PathBuf> {
    let case_dir = out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;
    Ok(case_dir)
}

fn load_input_f64(path: &Path) -> Result<Image<f64>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    luma16_to_f64(&dyn_img).with_context(|| format!("constructing image from {}", path.display()))
}

/// Grayscale samples on the 16-bit scale (`0..=65535`), so 16-bit inputs
/// keep their precision and 8-bit inputs are scaled by 257.
fn luma16_to_f64(dyn_img: &DynamicImage) -> Result<Image<f64>> {
    let luma = dyn_img.to_luma16();
    let (w, h) = luma.dimensions();
    let data = luma.into_raw().into_iter().map(f64::from).collect();
    Ok(Image::from_vec(w as usize, h as usize, data)?)
}

fn save_f64_image(path: PathBuf, img: &Image<f64>) -> Result<()> {
    let vis = normalize_to_u8(img.data());
    let gray = GrayImage::from_raw(img.width() as u32, img.height() as u32, vis)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn first_last(values: &[f64]) -> Option<[f64; 2]> {
    Some([*values.first()?, *values.last()?])
}

fn count_value(img: &Image<f64>, value: f64) -> usize {
    img.data().iter().filter(|&&v| v == value).count()
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    ensure_file_exists(path, "config")?;
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn write_csv(path: PathBuf, column: &str, values: &[f64]) -> Result<()> {
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_indexed_csv(&mut out, column, values)?;
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))
}

fn write_indexed_csv(out: &mut impl Write, column: &str, values: &[f64]) -> Result<()> {
    writeln!(out, "index,{column}").context("writing csv header")?;
    for (i, v) in values.iter().enumerate() {
        writeln!(out, "{i},{v}").context("writing csv row")?;
    }
    Ok(())
}

fn write_sinogram_csv(path: PathBuf, sino: &Sinogram) -> Result<()> {
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let values = sino.values();
    for (y, s) in sino.s_coords().iter().enumerate() {
        write!(out, "{s}").context("writing csv row")?;
        for v in values.row(y) {
            write!(out, ",{v}").context("writing csv row")?;
        }
        writeln!(out).context("writing csv row")?;
    }
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
