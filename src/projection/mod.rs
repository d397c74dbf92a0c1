//! Face projection module.
//!
//! Turns face-local pixel positions into unit directions on the sphere.

mod grid;
pub mod raster;

pub use grid::{project, FaceProjector, FaceSampleGrid};
pub use raster::{face_height, TriangleRaster};
