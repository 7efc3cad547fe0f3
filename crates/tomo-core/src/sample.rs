use crate::Error;
use crate::border::{clamp_index, outside_closed_range};
use crate::image::{Image, ImageView};

/// Bilinear sample at `(x, y)` with a constant fill outside the image.
///
/// The four neighbours are fetched with indices clamped into the image, so no
/// query reads out of range. The interpolated value is then replaced by `fill`
/// whenever the unclamped `x` lies outside `[0, w - 1]` or `y` outside
/// `[0, h - 1]`. Edge pixels are therefore never replicated into the border.
///
/// Non-finite inputs are not special-cased: a NaN coordinate or sample
/// propagates into the result.
pub fn sample_bilinear_fill<T: Copy + Into<f64>>(
    img: &ImageView<'_, T>,
    x: f64,
    y: f64,
    fill: f64,
) -> f64 {
    let w = img.width();
    let h = img.height();
    if w == 0 || h == 0 {
        return fill;
    }

    let fx0 = x.floor();
    let fy0 = y.floor();
    let dx = x - fx0;
    let dy = y - fy0;

    // Float-to-int casts saturate (NaN maps to 0), so the neighbour indices
    // stay well-defined for any query.
    let x0 = fx0 as isize;
    let y0 = fy0 as isize;
    let x1 = x0.saturating_add(1);
    let y1 = y0.saturating_add(1);

    let (Some(x0c), Some(x1c), Some(y0c), Some(y1c)) = (
        clamp_index(x0, w),
        clamp_index(x1, w),
        clamp_index(y0, h),
        clamp_index(y1, h),
    ) else {
        return fill;
    };

    // SAFETY: `clamp_index` returns indices in `[0, len)` for non-empty images.
    let (ia, ib, ic, id) = unsafe {
        (
            (*img.get_unchecked(x0c, y0c)).into(),
            (*img.get_unchecked(x1c, y0c)).into(),
            (*img.get_unchecked(x0c, y1c)).into(),
            (*img.get_unchecked(x1c, y1c)).into(),
        )
    };

    let wa = (1.0 - dx) * (1.0 - dy);
    let wb = dx * (1.0 - dy);
    let wc = (1.0 - dx) * dy;
    let wd = dx * dy;
    let value = ia * wa + ib * wb + ic * wc + id * wd;

    if outside_closed_range(x, w) || outside_closed_range(y, h) {
        fill
    } else {
        value
    }
}

/// Samples `img` at every `(xs[i], ys[i])` pair.
///
/// `xs` and `ys` must have the same dimensions; the output takes them too.
pub fn sample_bilinear_grid<T: Copy + Into<f64>>(
    img: &ImageView<'_, T>,
    xs: &ImageView<'_, f64>,
    ys: &ImageView<'_, f64>,
    fill: f64,
) -> Result<Image<f64>, Error> {
    if xs.width() != ys.width() || xs.height() != ys.height() {
        return Err(Error::DimensionMismatch {
            expected: (xs.width(), xs.height()),
            actual: (ys.width(), ys.height()),
        });
    }

    let mut out = Vec::with_capacity(xs.width() * xs.height());
    for row in 0..xs.height() {
        let xr = xs.row(row);
        let yr = ys.row(row);
        out.extend(
            xr.iter()
                .zip(yr.iter())
                .map(|(&x, &y)| sample_bilinear_fill(img, x, y, fill)),
        );
    }

    Image::from_vec(xs.width(), xs.height(), out)
}
