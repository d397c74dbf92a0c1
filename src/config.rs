//! Configuration for unwrapping a panorama.

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UnwrapError};
use crate::layout::MAX_FACE_OFFSET;

/// Parameters of one unwrap run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnwrapConfig {
    /// Width in pixels of one triangular face.
    pub face_resolution: u32,
    /// Net rotation, selecting which face column starts the net (0-4).
    pub face_offset: u32,
    /// RGB colour of net pixels not covered by any face.
    pub background: [u8; 3],
}

impl Default for UnwrapConfig {
    fn default() -> Self {
        Self {
            face_resolution: 600,
            face_offset: 0,
            background: [255, 255, 255],
        }
    }
}

impl UnwrapConfig {
    /// Creates a configuration with the default background.
    pub fn new(face_resolution: u32, face_offset: u32) -> Self {
        Self {
            face_resolution,
            face_offset,
            ..Default::default()
        }
    }

    /// Small faces for previews and tests.
    pub fn preview() -> Self {
        Self::new(64, 0)
    }

    /// Background colour as an image pixel.
    pub fn background_rgb(&self) -> Rgb<u8> {
        Rgb(self.background)
    }

    /// Checks resolution and face offset without doing any work.
    pub fn validate(&self) -> Result<()> {
        if self.face_resolution == 0 {
            return Err(UnwrapError::InvalidResolution(self.face_resolution));
        }
        if self.face_offset > MAX_FACE_OFFSET {
            return Err(UnwrapError::InvalidFaceOffset {
                offset: self.face_offset,
                max: MAX_FACE_OFFSET,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UnwrapConfig::default();
        assert_eq!(config.face_resolution, 600);
        assert_eq!(config.face_offset, 0);
        assert_eq!(config.background_rgb(), Rgb([255, 255, 255]));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preview_config() {
        let config = UnwrapConfig::preview();
        assert!(config.face_resolution < UnwrapConfig::default().face_resolution);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert_eq!(
            UnwrapConfig::new(0, 0).validate().unwrap_err(),
            UnwrapError::InvalidResolution(0)
        );
        assert_eq!(
            UnwrapConfig::new(10, 5).validate().unwrap_err(),
            UnwrapError::InvalidFaceOffset { offset: 5, max: 4 }
        );
        assert!(UnwrapConfig::new(1, 4).validate().is_ok());
    }
}
