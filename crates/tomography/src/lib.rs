//! Umbrella crate for the `tomo-*` workspace.
//!
//! Re-exports the image core, the Radon engine, and the synthetic fixtures.

pub use tomo_core::*;
pub use tomo_phantom::*;
pub use tomo_radon::*;
