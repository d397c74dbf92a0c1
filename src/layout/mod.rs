//! Unwrapped net layout module.
//!
//! Holds the rendered face types and arranges twenty faces into one raster.

mod face_image;
mod net;

pub use face_image::{FaceColors, FaceImage};
pub use net::{
    compose, FacePlacement, NetLayout, UnwrappedImage, FACE_OFFSET_COUNT, MAX_FACE_OFFSET,
};
