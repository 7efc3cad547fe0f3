use tomo_core::{Error, Image, ImageView};

/// Side of the square that holds a `width`x`height` image under any rotation:
/// `ceil(sqrt(h^2 + w^2))`.
pub fn diagonal_side(width: usize, height: usize) -> usize {
    let (w, h) = (width as f64, height as f64);
    (h * h + w * w).sqrt().ceil() as usize
}

/// Pads `src` to a `S`x`S` square with `S = diagonal_side(w, h)`.
///
/// The source lands at offset `((S - w) / 2, (S - h) / 2)` with integer
/// halving; every other sample is `fill`.
pub fn pad_to_diagonal<T: Copy>(src: &ImageView<'_, T>, fill: T) -> Result<Image<T>, Error> {
    let (w, h) = (src.width(), src.height());
    if src.is_empty() {
        return Err(Error::Shape {
            width: w,
            height: h,
        });
    }

    let side = diagonal_side(w, h);
    let pad_x = (side - w) / 2;
    let pad_y = (side - h) / 2;

    let mut out = Image::new_fill(side, side, fill);
    for y in 0..h {
        out.row_mut(pad_y + y)[pad_x..pad_x + w].copy_from_slice(src.row(y));
    }

    Ok(out)
}
