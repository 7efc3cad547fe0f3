use tomo_core::{Image, ImageView, Point2d};

/// Zeroes every sample outside the inscribed circle.
///
/// Center is `((w - 1) / 2, (h - 1) / 2)`, radius is the smaller of the two
/// center coordinates, and pixels at exactly the radius are kept.
pub fn apply_circular_fov<T: Copy + Default>(src: &ImageView<'_, T>) -> Image<T> {
    let (w, h) = (src.width(), src.height());
    let mut out = Image::new_fill(w, h, T::default());
    if src.is_empty() {
        return out;
    }

    let c = Point2d::grid_center(w, h);
    let r = c.x.min(c.y);
    let r2 = r * r;

    for y in 0..h {
        let dy = y as f64 - c.y;
        let src_row = src.row(y);
        let dst_row = out.row_mut(y);
        for (x, (d, &s)) in dst_row.iter_mut().zip(src_row.iter()).enumerate() {
            let dx = x as f64 - c.x;
            if dx * dx + dy * dy <= r2 {
                *d = s;
            }
        }
    }

    out
}
