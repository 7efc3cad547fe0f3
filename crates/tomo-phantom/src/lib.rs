//! Synthetic fixtures for exercising projections.
//!
//! The star pattern is drawn with nearest-pixel rays and a square brush, no
//! anti-aliasing. Its coarse rasterisation is part of the fixture: tests
//! assert against exact pixel positions.

mod star;

pub use star::{MAIN_RAY_VALUE, NOISE_RAY_VALUE, StarPatternConfig, make_star_pattern};
