//! Radon transform by rotate-and-sum.
//!
//! For each angle the working image is rotated about its geometric center
//! (bilinear resampling, inverse mapping) and summed column by column. The
//! column index of the rotated image is the detector coordinate `s`.
//!
//! Output layout:
//! - Sinogram rows are detector offsets `s`, increasing and centered on zero.
//! - Sinogram columns are angles, in the order they were requested.
//!
//! Working image:
//! - Input of any real sample type is copied to `f64`.
//! - [`RadonConfig::pad`] pads to a square of side `ceil(sqrt(h^2 + w^2))` so
//!   rotation never crops content.
//! - [`RadonConfig::use_circular_fov`] keeps only the inscribed circle, the
//!   region every angle sees in full.
//!
//! Angles are in degrees; `0` integrates along image columns. With rows
//! increasing downward, a positive angle rotates `+x` toward `+y`.

mod fov;
mod pad;
mod radon;
mod rotate;

pub use fov::apply_circular_fov;
pub use pad::{diagonal_side, pad_to_diagonal};
pub use radon::{
    RadonConfig, RadonProjector, Sinogram, angle_range_deg, column_sums_into, detector_coords,
    prepare_working_image, radon_transform,
};
pub use rotate::{rotate_bilinear, rotate_bilinear_into, sin_cos_deg};
