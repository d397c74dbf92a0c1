//! The equirectangular source raster.

use image::{Rgb, RgbImage};
use log::warn;

use crate::error::{Result, UnwrapError};

/// A validated equirectangular panorama.
///
/// Width spans 360° of longitude, height spans 180° of latitude. Both
/// dimensions are guaranteed to be non-zero.
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: RgbImage,
}

impl SourceImage {
    /// Wraps an RGB image, rejecting zero-sized rasters.
    ///
    /// A width that is not twice the height is accepted, but logged, since
    /// the pixels then cover longitude and latitude at different rates.
    pub fn new(image: RgbImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(UnwrapError::EmptySource { width, height });
        }
        if width as u64 != 2 * height as u64 {
            warn!(
                "source image is {}x{}, not the 2:1 aspect ratio of an equirectangular panorama",
                width, height
            );
        }
        Ok(Self { image })
    }

    /// Builds a source image from tightly packed RGB8 bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(UnwrapError::EmptySource { width, height });
        }
        let expected = width as usize * height as usize * 3;
        let actual = data.len();
        let image = RgbImage::from_raw(width, height, data)
            .filter(|_| actual == expected)
            .ok_or(UnwrapError::SourceBufferSize { expected, actual })?;
        Self::new(image)
    }

    /// A source image filled with a single colour.
    pub fn uniform(width: u32, height: u32, color: Rgb<u8>) -> Result<Self> {
        Self::new(RgbImage::from_pixel(width, height, color))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Colour at column `x`, row `y`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn as_image(&self) -> &RgbImage {
        &self.image
    }
}

impl TryFrom<RgbImage> for SourceImage {
    type Error = UnwrapError;

    fn try_from(image: RgbImage) -> Result<Self> {
        Self::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_dimension_rejected() {
        let err = SourceImage::new(RgbImage::new(0, 8)).unwrap_err();
        assert_eq!(err, UnwrapError::EmptySource { width: 0, height: 8 });
        assert!(err.is_input());
        assert!(SourceImage::from_raw(4, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_from_raw_checks_length() {
        let ok = SourceImage::from_raw(4, 2, vec![0; 24]).unwrap();
        assert_eq!((ok.width(), ok.height()), (4, 2));

        let err = SourceImage::from_raw(4, 2, vec![0; 25]).unwrap_err();
        assert_eq!(err, UnwrapError::SourceBufferSize { expected: 24, actual: 25 });
        let err = SourceImage::from_raw(4, 2, vec![0; 10]).unwrap_err();
        assert_eq!(err, UnwrapError::SourceBufferSize { expected: 24, actual: 10 });
    }

    #[test]
    fn test_try_from_validates() {
        assert!(SourceImage::try_from(RgbImage::new(8, 0)).unwrap_err().is_input());
        let source = SourceImage::try_from(RgbImage::new(8, 4)).unwrap();
        assert_eq!((source.width(), source.height()), (8, 4));
    }

    #[test]
    fn test_non_standard_aspect_is_accepted() {
        let source = SourceImage::uniform(10, 10, Rgb([1, 2, 3])).unwrap();
        assert_eq!(source.pixel(9, 9), Rgb([1, 2, 3]));
    }
}
