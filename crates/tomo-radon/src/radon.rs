use serde::{Deserialize, Serialize};
use tomo_core::{Error, Image, ImageView, to_f64};

use crate::fov::apply_circular_fov;
use crate::pad::pad_to_diagonal;
use crate::rotate::rotate_bilinear_into;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadonConfig {
    /// Zero everything outside the inscribed circle of the working image.
    pub use_circular_fov: bool,
    /// Pad to the diagonal square before projecting so no content is cropped.
    pub pad: bool,
    /// Value for padded cells and for samples rotated in from outside.
    pub fill: f64,
}

impl Default for RadonConfig {
    fn default() -> Self {
        Self {
            use_circular_fov: true,
            pad: true,
            fill: 0.0,
        }
    }
}

/// Projections indexed by detector offset (rows) and angle (columns).
#[derive(Debug, Clone, PartialEq)]
pub struct Sinogram {
    values: Image<f64>,
    s_coords: Vec<f64>,
    angles_rad: Vec<f64>,
}

impl Sinogram {
    /// `(num_detectors, num_angles)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.values.height(), self.values.width())
    }

    pub fn num_detectors(&self) -> usize {
        self.values.height()
    }

    pub fn num_angles(&self) -> usize {
        self.values.width()
    }

    /// Row-major `num_detectors x num_angles` grid.
    pub fn values(&self) -> &Image<f64> {
        &self.values
    }

    pub fn get(&self, s_idx: usize, angle_idx: usize) -> Option<f64> {
        self.values.get(angle_idx, s_idx).copied()
    }

    /// Copy of the projection taken at `angle_idx`.
    pub fn projection(&self, angle_idx: usize) -> Option<Vec<f64>> {
        if angle_idx >= self.num_angles() {
            return None;
        }
        Some(
            (0..self.num_detectors())
                .map(|s| self.values.row(s)[angle_idx])
                .collect(),
        )
    }

    pub fn s_coords(&self) -> &[f64] {
        &self.s_coords
    }

    pub fn angles_rad(&self) -> &[f64] {
        &self.angles_rad
    }
}

/// Detector offsets `-(n - 1) / 2, ..., (n - 1) / 2` with unit spacing.
pub fn detector_coords(n: usize) -> Vec<f64> {
    let half = (n as f64 - 1.0) / 2.0;
    (0..n).map(|i| i as f64 - half).collect()
}

/// Per-column sums, accumulated top row first.
pub fn column_sums_into(img: &ImageView<'_, f64>, out: &mut Vec<f64>) {
    out.clear();
    out.resize(img.width(), 0.0);
    for y in 0..img.height() {
        for (acc, &v) in out.iter_mut().zip(img.row(y).iter()) {
            *acc += v;
        }
    }
}

/// Builds the double-precision image that every angle is projected from:
/// copy, then optional diagonal padding, then optional circular masking.
pub fn prepare_working_image<T: Copy + Into<f64>>(
    img: &ImageView<'_, T>,
    cfg: &RadonConfig,
) -> Result<Image<f64>, Error> {
    if img.is_empty() {
        return Err(Error::Shape {
            width: img.width(),
            height: img.height(),
        });
    }

    let mut work = to_f64(img);
    if cfg.pad {
        work = pad_to_diagonal(&work.as_view(), cfg.fill)?;
    }
    if cfg.use_circular_fov {
        work = apply_circular_fov(&work.as_view());
    }

    tracing::debug!(
        "working image {}x{} from {}x{} input (pad={}, circular_fov={})",
        work.width(),
        work.height(),
        img.width(),
        img.height(),
        cfg.pad,
        cfg.use_circular_fov
    );

    Ok(work)
}

/// Rotate-and-sum projector with reusable scratch buffers.
///
/// Every angle is resampled from the same working image, never from a
/// previous rotation, so interpolation error does not build up across angles.
#[derive(Debug, Clone)]
pub struct RadonProjector {
    rotated: Image<f64>,
    projection: Vec<f64>,
}

impl Default for RadonProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl RadonProjector {
    pub fn new() -> Self {
        Self {
            rotated: Image::new_fill(0, 0, 0.0),
            projection: Vec::new(),
        }
    }

    /// Computes the sinogram of `img` for `angles_deg`, in the given order.
    ///
    /// An empty angle list is valid and yields a `(W, 0)` sinogram.
    pub fn project<T: Copy + Into<f64>>(
        &mut self,
        img: &ImageView<'_, T>,
        angles_deg: &[f64],
        cfg: &RadonConfig,
    ) -> Result<Sinogram, Error> {
        let work = prepare_working_image(img, cfg)?;
        let num_s = work.width();
        let num_angles = angles_deg.len();

        let mut values = Image::new_fill(num_angles, num_s, 0.0);
        for (j, &angle) in angles_deg.iter().enumerate() {
            rotate_bilinear_into(&work.as_view(), angle, cfg.fill, &mut self.rotated);
            column_sums_into(&self.rotated.as_view(), &mut self.projection);
            for (s, &p) in self.projection.iter().enumerate() {
                values.row_mut(s)[j] = p;
            }
            tracing::trace!("projected angle {} ({}/{})", angle, j + 1, num_angles);
        }

        let sino = Sinogram {
            values,
            s_coords: detector_coords(num_s),
            angles_rad: angles_deg.iter().map(|a| a.to_radians()).collect(),
        };

        tracing::debug!(
            "sinogram {}x{} (detectors x angles)",
            sino.num_detectors(),
            sino.num_angles()
        );

        Ok(sino)
    }
}

/// One-shot [`RadonProjector::project`].
pub fn radon_transform<T: Copy + Into<f64>>(
    img: &ImageView<'_, T>,
    angles_deg: &[f64],
    cfg: &RadonConfig,
) -> Result<Sinogram, Error> {
    RadonProjector::new().project(img, angles_deg, cfg)
}

/// `start, start + step, ...` up to but excluding `stop`.
pub fn angle_range_deg(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let span = stop - start;
    if !span.is_finite() || step.is_nan() || span <= 0.0 || step <= 0.0 {
        return Vec::new();
    }
    let n = ((span / step).ceil() as usize).max(1);
    (0..n).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use tomo_core::{Error, Image};
    use tomo_phantom::{StarPatternConfig, make_star_pattern};

    use super::{
        RadonConfig, RadonProjector, angle_range_deg, column_sums_into, detector_coords,
        prepare_working_image, radon_transform,
    };
    use crate::pad::diagonal_side;
    use crate::rotate::rotate_bilinear;

    const RAW: RadonConfig = RadonConfig {
        use_circular_fov: false,
        pad: false,
        fill: 0.0,
    };

    fn ramp(w: usize, h: usize) -> Image<f64> {
        Image::from_vec(w, h, (0..w * h).map(|v| (v % 7) as f64 + 0.5).collect()).expect("valid")
    }

    fn single_ray_101() -> Image<f64> {
        let cfg = StarPatternConfig {
            width: 101,
            height: 101,
            center: Some(tomo_core::Point2d::new(50.0, 50.0)),
            main_angles_deg: vec![0.0],
            length: 50,
            thickness: 0,
            noise_angles_deg: Vec::new(),
        };
        make_star_pattern(&cfg).expect("valid pattern config")
    }

    #[test]
    fn all_ones_4x4_at_zero_degrees() {
        let img = Image::new_fill(4, 4, 1.0f64);
        let sino = radon_transform(&img.as_view(), &[0.0], &RAW).expect("valid input");

        assert_eq!(sino.shape(), (4, 1));
        assert_eq!(sino.projection(0), Some(vec![4.0, 4.0, 4.0, 4.0]));
        assert_eq!(sino.s_coords(), &[-1.5, -0.5, 0.5, 1.5]);
        assert_eq!(sino.angles_rad(), &[0.0]);
    }

    #[test]
    fn cardinal_angles_keep_unpadded_ones_intact() {
        let img = Image::new_fill(4, 4, 1.0f64);
        let sino =
            radon_transform(&img.as_view(), &[90.0, 180.0, 270.0], &RAW).expect("valid input");
        for k in 0..3 {
            assert_eq!(sino.projection(k), Some(vec![4.0, 4.0, 4.0, 4.0]), "column {k}");
        }
    }

    #[test]
    fn zero_degrees_without_padding_is_the_raw_column_sum() {
        let img = ramp(5, 3);
        let sino = radon_transform(&img.as_view(), &[0.0], &RAW).expect("valid input");

        let mut expected = Vec::new();
        column_sums_into(&img.as_view(), &mut expected);
        assert_eq!(sino.projection(0), Some(expected));
    }

    #[test]
    fn full_turn_rotation_reproduces_working_image() {
        let img = ramp(6, 4);
        let work = prepare_working_image(&img.as_view(), &RadonConfig::default())
            .expect("valid input");
        for angle in [0.0, 360.0, -360.0] {
            assert_eq!(rotate_bilinear(&work.as_view(), angle, 0.0), work);
        }
    }

    #[test]
    fn detector_count_follows_padding() {
        let img = ramp(7, 3);

        let padded = radon_transform(&img.as_view(), &[10.0], &RadonConfig::default())
            .expect("valid input");
        assert_eq!(padded.num_detectors(), diagonal_side(7, 3));
        assert_eq!(padded.num_detectors(), 8);

        let unpadded = radon_transform(
            &img.as_view(),
            &[10.0],
            &RadonConfig {
                pad: false,
                ..RadonConfig::default()
            },
        )
        .expect("valid input");
        assert_eq!(unpadded.num_detectors(), 7);
    }

    #[test]
    fn s_coords_are_increasing_and_symmetric() {
        for n in [1usize, 2, 5, 8, 143] {
            let s = detector_coords(n);
            assert_eq!(s.len(), n);
            assert!(s.windows(2).all(|p| p[1] - p[0] == 1.0));
            for i in 0..n {
                assert_eq!(s[i], -s[n - 1 - i]);
            }
        }
    }

    #[test]
    fn empty_angle_list_gives_zero_columns() {
        let img = ramp(4, 4);
        let sino = radon_transform(&img.as_view(), &[], &RadonConfig::default())
            .expect("empty angle list is valid");

        assert_eq!(sino.shape(), (diagonal_side(4, 4), 0));
        assert_eq!(sino.s_coords().len(), sino.num_detectors());
        assert!(sino.angles_rad().is_empty());
        assert_eq!(sino.projection(0), None);
    }

    #[test]
    fn empty_image_is_a_shape_error() {
        let img: Image<u8> = Image::from_vec(3, 0, Vec::new()).expect("valid");
        let err = radon_transform(&img.as_view(), &[0.0], &RadonConfig::default()).unwrap_err();
        assert!(err.is_shape_error());
        assert_eq!(
            err,
            Error::Shape {
                width: 3,
                height: 0
            }
        );
    }

    #[test]
    fn angle_order_is_preserved() {
        let img = single_ray_101();
        let angles = [90.0, 0.0, 45.0];
        let sino = radon_transform(&img.as_view(), &angles, &RadonConfig::default())
            .expect("valid input");
        let forward = radon_transform(&img.as_view(), &[0.0, 45.0, 90.0], &RadonConfig::default())
            .expect("valid input");

        assert_eq!(sino.projection(0), forward.projection(2));
        assert_eq!(sino.projection(1), forward.projection(0));
        assert_eq!(sino.projection(2), forward.projection(1));
        for (rad, deg) in sino.angles_rad().iter().zip(angles) {
            assert!((rad - deg.to_radians()).abs() < 1e-15);
        }
    }

    #[test]
    fn single_ray_separates_0_and_90_degrees() {
        let img = single_ray_101();
        let sino = radon_transform(&img.as_view(), &[0.0, 90.0], &RadonConfig::default())
            .expect("valid input");

        assert_eq!(sino.shape(), (143, 2));
        let p0 = sino.projection(0).expect("column 0");
        let p90 = sino.projection(1).expect("column 1");
        assert!(p0.iter().chain(p90.iter()).all(|&v| v >= 0.0));

        // The horizontal ray covers s = 0..49 at 0 degrees.
        let center = 71;
        for (k, &v) in p0.iter().enumerate() {
            let expected = if (center..center + 50).contains(&k) { 1.0 } else { 0.0 };
            assert_eq!(v, expected, "s index {k}");
        }
        let s = sino.s_coords();
        let mean_s0: f64 = p0.iter().zip(s).map(|(v, s)| v * s).sum::<f64>() / 50.0;
        assert!((mean_s0 - 24.5).abs() < 1e-12);

        // At 90 degrees it is aligned with the integration direction.
        assert_eq!(p90[center], 50.0);
        assert!((p90.iter().sum::<f64>() - 50.0).abs() < 1e-12);
    }

    #[test]
    fn quarter_turn_of_a_ray_matches_the_ray_drawn_at_90_degrees() {
        let horizontal = single_ray_101();
        let vertical = make_star_pattern(&StarPatternConfig {
            main_angles_deg: vec![90.0],
            width: 101,
            height: 101,
            center: Some(tomo_core::Point2d::new(50.0, 50.0)),
            length: 50,
            thickness: 0,
            noise_angles_deg: Vec::new(),
        })
        .expect("valid pattern config");

        assert_eq!(rotate_bilinear(&horizontal.as_view(), 90.0, 0.0), vertical);
    }

    #[test]
    fn projector_reuse_matches_one_shot() {
        let img = ramp(9, 5);
        let cfg = RadonConfig::default();
        let angles = angle_range_deg(0.0, 180.0, 30.0);

        let mut projector = RadonProjector::new();
        let first = projector.project(&img.as_view(), &angles, &cfg).expect("valid");
        let second = projector.project(&img.as_view(), &angles, &cfg).expect("valid");
        let one_shot = radon_transform(&img.as_view(), &angles, &cfg).expect("valid");

        assert_eq!(first, second);
        assert_eq!(first, one_shot);
    }

    #[test]
    fn quarter_turns_conserve_mass_inside_the_disk() {
        let mut img = Image::new_fill(21, 21, 0.0f64);
        for y in 8..13 {
            for x in 8..13 {
                img.row_mut(y)[x] = 1.0;
            }
        }
        let angles = [0.0, 90.0, 180.0, 270.0];
        let sino = radon_transform(&img.as_view(), &angles, &RadonConfig::default())
            .expect("valid input");

        for j in 0..sino.num_angles() {
            let total: f64 = sino.projection(j).expect("column").iter().sum();
            assert!((total - 25.0).abs() < 1e-9, "angle index {j}: {total}");
        }
    }

    #[test]
    fn nan_samples_propagate() {
        let mut img = Image::new_fill(3, 3, 1.0f64);
        img.row_mut(1)[1] = f64::NAN;
        let sino = radon_transform(&img.as_view(), &[0.0], &RAW).expect("valid input");
        let p = sino.projection(0).expect("column 0");

        // Column 0 fetches the NaN as its right neighbour with weight 0, and
        // NaN * 0 is NaN, so the raw column-sum identity holds for finite
        // input only.
        assert!(p[0].is_nan());
        assert!(p[1].is_nan());
        assert_eq!(p[2], 3.0);
    }

    #[test]
    fn fill_enters_padded_border_without_fov() {
        let img = Image::new_fill(2, 2, 0.0f64);
        let cfg = RadonConfig {
            use_circular_fov: false,
            pad: true,
            fill: 1.0,
        };
        let sino = radon_transform(&img.as_view(), &[0.0], &cfg).expect("valid input");

        // side 3, image at offset (0, 0); column 2 is all fill.
        assert_eq!(sino.projection(0), Some(vec![1.0, 1.0, 3.0]));
    }

    #[test]
    fn angle_range_excludes_stop() {
        let a = angle_range_deg(0.0, 180.0, 1.0);
        assert_eq!(a.len(), 180);
        assert_eq!(a[0], 0.0);
        assert_eq!(a[179], 179.0);
        assert!(angle_range_deg(0.0, 0.0, 1.0).is_empty());
        assert!(angle_range_deg(0.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: RadonConfig = serde_json::from_str(r#"{"pad": false}"#).expect("valid json");
        assert_eq!(
            cfg,
            RadonConfig {
                pad: false,
                ..RadonConfig::default()
            }
        );
    }
}
