//! Rotation about the geometric center by inverse mapping.

use tomo_core::{Image, ImageView, Point2d, sample_bilinear_fill};

/// Returns `(sin, cos)` of an angle in degrees.
///
/// Multiples of 90 degrees return exact values so that quarter turns and
/// full turns map pixel centers onto pixel centers without rounding noise.
pub fn sin_cos_deg(angle_deg: f64) -> (f64, f64) {
    let quarter = angle_deg.rem_euclid(360.0);
    if quarter == 0.0 {
        return (0.0, 1.0);
    }
    if quarter == 90.0 {
        return (1.0, 0.0);
    }
    if quarter == 180.0 {
        return (0.0, -1.0);
    }
    if quarter == 270.0 {
        return (-1.0, 0.0);
    }
    angle_deg.to_radians().sin_cos()
}

/// Rotates `src` by `angle_deg` about `((w - 1) / 2, (h - 1) / 2)`.
///
/// Each destination pixel `(x, y)` looks up its source position
///
/// ```text
/// xs =  cos * (x - cx) + sin * (y - cy) + cx
/// ys = -sin * (x - cx) + cos * (y - cy) + cy
/// ```
///
/// and is sampled bilinearly, with `fill` for positions outside the source.
/// With rows increasing downward, a positive angle turns the `+x` axis toward
/// `+y`: content right of the center moves below it.
///
/// The output always has the source dimensions.
pub fn rotate_bilinear<T: Copy + Into<f64>>(
    src: &ImageView<'_, T>,
    angle_deg: f64,
    fill: f64,
) -> Image<f64> {
    let mut dst = Image::new_fill(0, 0, 0.0);
    rotate_bilinear_into(src, angle_deg, fill, &mut dst);
    dst
}

/// Same as [`rotate_bilinear`], writing into `dst` (resized to match `src`).
pub fn rotate_bilinear_into<T: Copy + Into<f64>>(
    src: &ImageView<'_, T>,
    angle_deg: f64,
    fill: f64,
    dst: &mut Image<f64>,
) {
    let (w, h) = (src.width(), src.height());
    if dst.width() != w || dst.height() != h {
        dst.reset(w, h, fill);
    }
    if src.is_empty() {
        return;
    }

    let (sin_t, cos_t) = sin_cos_deg(angle_deg);
    let c = Point2d::grid_center(w, h);

    for y in 0..h {
        let y_rel = y as f64 - c.y;
        for (x, out) in dst.row_mut(y).iter_mut().enumerate() {
            let x_rel = x as f64 - c.x;
            let xs = cos_t * x_rel + sin_t * y_rel + c.x;
            let ys = -sin_t * x_rel + cos_t * y_rel + c.y;
            *out = sample_bilinear_fill(src, xs, ys, fill);
        }
    }
}
