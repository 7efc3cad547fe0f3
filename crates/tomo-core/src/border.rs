/// Clamps a possibly out-of-range index into `[0, len - 1]`.
///
/// Returns `None` only for `len == 0`.
#[inline]
pub fn clamp_index(i: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if i < 0 {
        Some(0)
    } else {
        let idx = i as usize;
        Some(idx.min(len - 1))
    }
}

/// True when `v` lies in the closed interval `[0, len - 1]`.
///
/// NaN is never reported as outside.
#[inline]
pub fn outside_closed_range(v: f64, len: usize) -> bool {
    v < 0.0 || v > (len as f64 - 1.0)
}

#[cfg(test)]
mod tests {
    use super::{clamp_index, outside_closed_range};

    #[test]
    fn clamp_handles_negative_and_overflow() {
        assert_eq!(clamp_index(-3, 5), Some(0));
        assert_eq!(clamp_index(-1, 5), Some(0));
        assert_eq!(clamp_index(0, 5), Some(0));
        assert_eq!(clamp_index(4, 5), Some(4));
        assert_eq!(clamp_index(5, 5), Some(4));
        assert_eq!(clamp_index(isize::MAX, 5), Some(4));
        assert_eq!(clamp_index(0, 0), None);
    }

    #[test]
    fn closed_range_includes_both_ends() {
        assert!(!outside_closed_range(0.0, 4));
        assert!(!outside_closed_range(3.0, 4));
        assert!(outside_closed_range(3.0001, 4));
        assert!(outside_closed_range(-1e-9, 4));
        assert!(!outside_closed_range(f64::NAN, 4));
        assert!(outside_closed_range(f64::INFINITY, 4));
    }
}
