//! Equirectangular sampling module.
//!
//! Converts sphere directions into panorama pixel coordinates and looks up
//! colours with a pluggable kernel (nearest-neighbour by default).

pub mod equirect;
mod kernel;
mod source;

pub use equirect::{nearest_pixel, pixel_coords, sample, sample_with};
pub use kernel::{NearestNeighbor, SamplingKernel};
pub use source::SourceImage;
