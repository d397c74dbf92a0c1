//! Equirectangular panorama to icosahedral net unwrapper.
//!
//! This crate projects a spherical panorama onto the twenty faces of a
//! regular icosahedron and lays the faces out as a flat, printable net.

pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod projection;
pub mod sampler;
pub mod sampling;

pub use config::UnwrapConfig;
pub use error::{Result, UnwrapError};
pub use geometry::{Band, Face, Icosahedron, Orientation};
pub use layout::{FaceColors, FaceImage, NetLayout, UnwrappedImage};
pub use projection::{FaceProjector, FaceSampleGrid};
pub use sampler::{get_face_colors, get_face_image, unwrap, IcosahedralSampler};
pub use sampling::{NearestNeighbor, SamplingKernel, SourceImage};
