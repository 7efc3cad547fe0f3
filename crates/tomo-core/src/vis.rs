//! Min/max stretching of `f64` samples to 8-bit grayscale for display.

/// Smallest and largest finite sample, or `None` if there is none.
pub fn finite_range(data: &[f64]) -> Option<[f64; 2]> {
    let mut range: Option<[f64; 2]> = None;
    for &v in data.iter().filter(|v| v.is_finite()) {
        range = Some(match range {
            None => [v, v],
            Some([lo, hi]) => [lo.min(v), hi.max(v)],
        });
    }
    range
}

/// Maps the finite range of `data` linearly onto `0..=255`.
///
/// Flat or all-non-finite input maps to zeros. NaN maps to 0 and infinities
/// saturate.
pub fn normalize_to_u8(data: &[f64]) -> Vec<u8> {
    let Some([min_v, max_v]) = finite_range(data) else {
        return vec![0u8; data.len()];
    };

    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}
