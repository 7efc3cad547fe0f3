use serde::{Deserialize, Serialize};
use tomo_core::{Error, Image, Point2d};

pub const MAIN_RAY_VALUE: f64 = 1.0;
pub const NOISE_RAY_VALUE: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarPatternConfig {
    pub width: usize,
    pub height: usize,
    /// Ray origin; `None` means `(width / 2, height / 2)` with integer halving.
    pub center: Option<Point2d>,
    /// Angles of the strong rays, in degrees. `0` points along `+x`, `90`
    /// along `+y` (downward).
    pub main_angles_deg: Vec<f64>,
    /// Number of brush stamps per ray, at radii `0..length`.
    pub length: usize,
    /// Brush half-width; the stamp is `(2 * thickness + 1)` pixels square.
    pub thickness: usize,
    /// Angles of the weak rays, drawn after the strong ones.
    pub noise_angles_deg: Vec<f64>,
}

impl Default for StarPatternConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 1000,
            center: None,
            main_angles_deg: vec![0.0, 60.0, 120.0, 180.0, 240.0, 300.0],
            length: 380,
            thickness: 1,
            noise_angles_deg: vec![30.0, 90.0, 150.0, 210.0, 270.0, 330.0],
        }
    }
}

impl StarPatternConfig {
    pub fn resolved_center(&self) -> Point2d {
        self.center.unwrap_or(Point2d {
            x: (self.width / 2) as f64,
            y: (self.height / 2) as f64,
        })
    }
}

/// Draws the star pattern on a zeroed canvas.
///
/// Strong rays are drawn first with [`MAIN_RAY_VALUE`], then weak rays with
/// [`NOISE_RAY_VALUE`]. Later stamps overwrite earlier ones.
pub fn make_star_pattern(cfg: &StarPatternConfig) -> Result<Image<f64>, Error> {
    if cfg.width == 0 || cfg.height == 0 {
        return Err(Error::Shape {
            width: cfg.width,
            height: cfg.height,
        });
    }

    let mut img = Image::new_fill(cfg.width, cfg.height, 0.0);
    let center = cfg.resolved_center();

    for &angle in &cfg.main_angles_deg {
        draw_ray(&mut img, center, angle, cfg.length, cfg.thickness, MAIN_RAY_VALUE);
    }
    for &angle in &cfg.noise_angles_deg {
        draw_ray(&mut img, center, angle, cfg.length, cfg.thickness, NOISE_RAY_VALUE);
    }

    Ok(img)
}

fn draw_ray(
    img: &mut Image<f64>,
    center: Point2d,
    angle_deg: f64,
    length: usize,
    thickness: usize,
    value: f64,
) {
    let (sin_t, cos_t) = angle_deg.to_radians().sin_cos();
    let w = img.width() as isize;
    let h = img.height() as isize;
    // A brush wider than the canvas covers it all; clamp before the cast.
    let t = thickness.min(img.width().max(img.height())) as isize;

    for r in 0..length {
        let x = (center.x + r as f64 * cos_t).round_ties_even() as isize;
        let y = (center.y + r as f64 * sin_t).round_ties_even() as isize;
        if x < 0 || x >= w || y < 0 || y >= h {
            continue;
        }

        let x_lo = (x - t).max(0) as usize;
        let x_hi = (x + t + 1).min(w) as usize;
        for by in (y - t).max(0)..(y + t + 1).min(h) {
            img.row_mut(by as usize)[x_lo..x_hi].fill(value);
        }
    }
}
