//! Rendered faces: raw per-pixel colours and the face raster built from them.

use image::{Rgb, RgbImage};

use crate::geometry::Orientation;

/// Colours sampled for every pixel of one face grid.
///
/// Shaped exactly like the face's `FaceSampleGrid`; pixels outside the
/// triangle hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceColors {
    face: usize,
    orientation: Orientation,
    resolution: u32,
    width: u32,
    height: u32,
    colors: Vec<Option<Rgb<u8>>>,
}

impl FaceColors {
    /// Creates a colour grid. `colors` must hold `width * height` entries in
    /// row-major order.
    pub fn new(
        face: usize,
        orientation: Orientation,
        resolution: u32,
        width: u32,
        height: u32,
        colors: Vec<Option<Rgb<u8>>>,
    ) -> Self {
        debug_assert_eq!(colors.len(), (width * height) as usize);
        Self {
            face,
            orientation,
            resolution,
            width,
            height,
            colors,
        }
    }

    pub fn face_index(&self) -> usize {
        self.face
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Colour of pixel `(x, y)`, or `None` outside the triangle.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        debug_assert!(x < self.width && y < self.height);
        self.colors[(y * self.width + x) as usize]
    }

    /// All colours in row-major order.
    pub fn colors(&self) -> &[Option<Rgb<u8>>] {
        &self.colors
    }

    /// Iterates over the colours of inside pixels only.
    pub fn iter_valid(&self) -> impl Iterator<Item = Rgb<u8>> + '_ {
        self.colors.iter().flatten().copied()
    }
}

/// One face rendered to an RGB raster.
///
/// Pixels outside the triangle carry the background colour; `is_covered`
/// tells them apart from sampled pixels of the same colour.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceImage {
    face: usize,
    orientation: Orientation,
    resolution: u32,
    image: RgbImage,
    mask: Vec<bool>,
}

impl FaceImage {
    /// Paints sampled colours over a background-filled raster.
    pub fn from_colors(colors: &FaceColors, background: Rgb<u8>) -> Self {
        let mut image = RgbImage::from_pixel(colors.width(), colors.height(), background);
        let mut mask = vec![false; colors.colors().len()];
        for (i, color) in colors.colors().iter().enumerate() {
            if let Some(c) = color {
                let x = i as u32 % colors.width();
                let y = i as u32 / colors.width();
                image.put_pixel(x, y, *c);
                mask[i] = true;
            }
        }
        Self {
            face: colors.face_index(),
            orientation: colors.orientation(),
            resolution: colors.resolution(),
            image,
            mask,
        }
    }

    pub fn face_index(&self) -> usize {
        self.face
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Returns true if pixel `(x, y)` was sampled from the source.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.mask[(y * self.image.width() + x) as usize]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Iterates over sampled pixels as `(x, y, colour)`.
    pub fn iter_covered(&self) -> impl Iterator<Item = (u32, u32, Rgb<u8>)> + '_ {
        self.image
            .enumerate_pixels()
            .filter(|(x, y, _)| self.is_covered(*x, *y))
            .map(|(x, y, p)| (x, y, *p))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal_colors() -> FaceColors {
        // 3x2 grid with the two cells on the main diagonal covered
        let red = Some(Rgb([255, 0, 0]));
        let colors = vec![red, None, None, None, red, None];
        FaceColors::new(4, Orientation::Up, 3, 3, 2, colors)
    }

    #[test]
    fn test_face_colors_accessors() {
        let colors = diagonal_colors();
        assert_eq!(colors.face_index(), 4);
        assert_eq!(colors.get(0, 0), Some(Rgb([255, 0, 0])));
        assert_eq!(colors.get(1, 0), None);
        assert_eq!(colors.iter_valid().count(), 2);
    }

    #[test]
    fn test_face_image_background_and_mask() {
        let background = Rgb([0, 0, 0]);
        let image = FaceImage::from_colors(&diagonal_colors(), background);
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.pixel(1, 1), Rgb([255, 0, 0]));
        assert_eq!(image.pixel(2, 1), background);
        assert!(image.is_covered(0, 0));
        assert!(!image.is_covered(2, 0));
        let covered: Vec<_> = image.iter_covered().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(covered, vec![(0, 0), (1, 1)]);
    }
}
