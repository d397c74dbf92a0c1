//! Icosahedron geometry module.
//!
//! Provides the pole-aligned regular icosahedron, face identification and
//! the latitude/longitude conversions shared by the projection and sampling
//! code.

mod face;
mod icosahedron;
pub mod spherical;

pub use face::{Band, Face, Orientation, FACES_PER_BAND};
pub use icosahedron::{Icosahedron, EDGE_COUNT, FACE_COUNT, VERTEX_COUNT, VERTEX_DEGREE};
pub use spherical::{from_lat_lon, latitude, longitude, to_lat_lon};
