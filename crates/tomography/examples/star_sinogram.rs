//! Example: sinogram of the synthetic star pattern.
//!
//! Draws the star fixture with its origin off-center, projects it over
//! `0..179` degrees in 1-degree steps, and prints the sinogram shape together
//! with the detector and angle ranges. With `--out`, the input image and the
//! sinogram are also written as min/max-normalised grayscale PNGs (sinogram
//! rows are `s`, increasing upward; columns are angles).
//!
//! Run from the workspace root:
//!   cargo run -p tomography --example star_sinogram -- --help
//!   cargo run --release -p tomography --example star_sinogram -- --out target/star

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::GrayImage;
use tomography::{
    Image, Point2d, RadonConfig, StarPatternConfig, angle_range_deg, make_star_pattern,
    normalize_to_u8, radon_transform,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Compute the sinogram of a synthetic star pattern")]
struct Args {
    /// Canvas side in pixels
    #[arg(long, default_value_t = 1000)]
    size: usize,

    /// Ray origin column
    #[arg(long, default_value_t = 470.0)]
    center_x: f64,

    /// Ray origin row
    #[arg(long, default_value_t = 800.0)]
    center_y: f64,

    /// Angle step in degrees for the 0..180 sweep
    #[arg(long, default_value_t = 1.0)]
    step: f64,

    /// Directory for input.png and sinogram.png (text summary only if absent)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_gray_vis(img: &Image<f64>) -> Result<GrayImage> {
    GrayImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        normalize_to_u8(img.data()),
    )
    .context("building GrayImage from normalised samples")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let star_cfg = StarPatternConfig {
        width: args.size,
        height: args.size,
        center: Some(Point2d::new(args.center_x, args.center_y)),
        ..StarPatternConfig::default()
    };
    let input = make_star_pattern(&star_cfg).context("drawing star pattern")?;
    let angles_deg = angle_range_deg(0.0, 180.0, args.step);

    tracing::info!(
        "projecting {}x{} star pattern over {} angles",
        input.width(),
        input.height(),
        angles_deg.len()
    );

    let t0 = Instant::now();
    let sino = radon_transform(&input.as_view(), &angles_deg, &RadonConfig::default())
        .context("computing sinogram")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    let s = sino.s_coords();
    let (num_s, num_angles) = sino.shape();
    println!("Computed sinogram shape (s, θ): ({num_s}, {num_angles})");
    if let (Some(first), Some(last)) = (s.first(), s.last()) {
        println!("s range: ({first}, {last})");
    }
    if let (Some(first), Some(last)) = (angles_deg.first(), angles_deg.last()) {
        println!("θ range (deg): ({first}, {last})");
    }
    println!("elapsed: {elapsed_ms:.1} ms");

    if let Some(dir) = args.out {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;

        let input_path = dir.join("input.png");
        to_gray_vis(&input)?
            .save(&input_path)
            .with_context(|| format!("saving {}", input_path.display()))?;

        let sino_path = dir.join("sinogram.png");
        to_gray_vis(&sino.values().flipped_rows())?
            .save(&sino_path)
            .with_context(|| format!("saving {}", sino_path.display()))?;

        println!("images written to {}", dir.display());
    }

    Ok(())
}
