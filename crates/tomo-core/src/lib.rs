//! Foundational primitives for sinogram computation.
//!
//! ## Images and Stride
//! [`Image`] owns a contiguous row-major buffer. [`ImageView`] borrows one and
//! uses element stride (not byte stride): `stride` is the distance, in
//! elements, between adjacent row starts and may be greater than `width`.
//!
//! ## Coordinates
//! Integer coordinates refer to pixel centers. `x` is the column, `y` the row,
//! and `y` increases downward.
//!
//! ## Sampling
//! [`sample_bilinear_fill`] uses the floor-based 2x2 neighbourhood. Neighbour
//! fetches are clamped into the image, and any query outside the closed
//! pixel-center range returns the fill value instead of an interpolated one.
//!
//! ## Display
//! [`normalize_to_u8`] stretches the finite sample range to `0..=255`.

mod border;
mod error;
mod geom;
mod image;
mod sample;
mod vis;

pub use border::{clamp_index, outside_closed_range};
pub use error::Error;
pub use geom::Point2d;
pub use image::{Image, ImageView, to_f64};
pub use sample::{sample_bilinear_fill, sample_bilinear_grid};
pub use vis::{finite_range, normalize_to_u8};
