//! End-to-end unwrapping of an equirectangular panorama.
//!
//! [`IcosahedralSampler`] caches the twenty direction grids for one face
//! resolution so that any number of source images can be unwrapped without
//! recomputing geometry. The free functions build a sampler per call.

use std::sync::Arc;

use image::Rgb;
use log::debug;
use rayon::prelude::*;

use crate::config::UnwrapConfig;
use crate::error::{Result, UnwrapError};
use crate::geometry::Icosahedron;
use crate::layout::{FaceColors, FaceImage, NetLayout, UnwrappedImage};
use crate::projection::{FaceProjector, FaceSampleGrid};
use crate::sampling::{sample_with, NearestNeighbor, SamplingKernel, SourceImage};

/// Samples panorama colours onto the faces of an icosahedron.
pub struct IcosahedralSampler<K = NearestNeighbor> {
    ico: Arc<Icosahedron>,
    projector: FaceProjector,
    grids: Vec<FaceSampleGrid>,
    kernel: K,
    background: Rgb<u8>,
}

impl IcosahedralSampler<NearestNeighbor> {
    /// Creates a nearest-neighbour sampler for faces `resolution` pixels wide.
    pub fn new(resolution: u32) -> Result<Self> {
        Self::with_kernel(Icosahedron::shared()?, resolution, NearestNeighbor)
    }

    /// Creates a sampler from a run configuration.
    ///
    /// The face offset is validated here as well, so a bad configuration is
    /// rejected before any grid is computed.
    pub fn from_config(config: &UnwrapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.face_resolution)?.with_background(config.background_rgb()))
    }
}

impl<K: SamplingKernel> IcosahedralSampler<K> {
    /// Creates a sampler that resolves colours with `kernel`.
    pub fn with_kernel(ico: Arc<Icosahedron>, resolution: u32, kernel: K) -> Result<Self> {
        let projector = FaceProjector::new(resolution)?;
        let grids = ico
            .faces()
            .par_iter()
            .map(|face| projector.project(&ico, face))
            .collect::<Result<Vec<_>>>()?;
        debug!("projected {} face grids at resolution {}", grids.len(), resolution);
        Ok(Self {
            ico,
            projector,
            grids,
            kernel,
            background: Rgb([255, 255, 255]),
        })
    }

    /// Sets the colour of pixels not covered by a face.
    pub fn with_background(mut self, background: Rgb<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn icosahedron(&self) -> &Icosahedron {
        &self.ico
    }

    pub fn resolution(&self) -> u32 {
        self.projector.resolution()
    }

    pub fn background(&self) -> Rgb<u8> {
        self.background
    }

    /// Cached direction grid of a face.
    pub fn grid(&self, face_index: usize) -> Result<&FaceSampleGrid> {
        self.grids
            .get(face_index)
            .ok_or(UnwrapError::InvalidFaceIndex(face_index))
    }

    /// Raw sampled colours of one face, without composing a raster.
    pub fn face_colors(&self, face_index: usize, source: &SourceImage) -> Result<FaceColors> {
        let grid = self.grid(face_index)?;
        let colors = grid
            .cells()
            .iter()
            .map(|cell| cell.map(|dir| sample_with(&self.kernel, dir, source)))
            .collect();
        Ok(FaceColors::new(
            face_index,
            grid.orientation(),
            grid.resolution(),
            grid.width(),
            grid.height(),
            colors,
        ))
    }

    /// One face rendered to its own raster.
    pub fn face_image(&self, face_index: usize, source: &SourceImage) -> Result<FaceImage> {
        let colors = self.face_colors(face_index, source)?;
        Ok(FaceImage::from_colors(&colors, self.background))
    }

    /// All twenty faces, rendered in parallel and ordered by face index.
    pub fn face_images(&self, source: &SourceImage) -> Result<Vec<FaceImage>> {
        (0..self.grids.len())
            .into_par_iter()
            .map(|i| self.face_image(i, source))
            .collect()
    }

    /// Unwraps `source` into an icosahedral net.
    pub fn unwrap(&self, source: &SourceImage, face_offset: u32) -> Result<UnwrappedImage> {
        let layout = NetLayout::new(self.resolution(), face_offset)?;
        let faces = self.face_images(source)?;
        layout.compose(&faces, self.background)
    }
}

/// Unwraps `source` with a freshly built sampler.
pub fn unwrap(
    source: &SourceImage,
    face_resolution: u32,
    face_offset: u32,
) -> Result<UnwrappedImage> {
    NetLayout::new(face_resolution, face_offset)?;
    IcosahedralSampler::new(face_resolution)?.unwrap(source, face_offset)
}

/// Renders a single face.
///
/// Pixels outside the triangle carry the default net background (white), so
/// a face image matches its region of the composed net. Use
/// [`IcosahedralSampler::with_background`] for another colour.
pub fn get_face_image(
    face_index: usize,
    source: &SourceImage,
    face_resolution: u32,
) -> Result<FaceImage> {
    let colors = get_face_colors(face_index, source, face_resolution)?;
    Ok(FaceImage::from_colors(&colors, UnwrapConfig::default().background_rgb()))
}

/// Samples the raw colours of a single face.
///
/// Only the requested face is projected.
pub fn get_face_colors(
    face_index: usize,
    source: &SourceImage,
    face_resolution: u32,
) -> Result<FaceColors> {
    let ico = Icosahedron::shared()?;
    let face = ico.face(face_index)?;
    let grid = FaceProjector::new(face_resolution)?.project(&ico, face)?;
    let colors = grid
        .cells()
        .iter()
        .map(|cell| cell.map(|dir| sample_with(&NearestNeighbor, dir, source)))
        .collect();
    Ok(FaceColors::new(
        face_index,
        grid.orientation(),
        face_resolution,
        grid.width(),
        grid.height(),
        colors,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Band;
    use image::RgbImage;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    /// Panorama whose colour encodes row and column, so any mix-up shows.
    fn gradient_source(width: u32, height: u32) -> SourceImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, ((x + y) % 7) as u8])
        });
        SourceImage::new(img).unwrap()
    }

    #[test]
    fn test_uniform_source_gives_uniform_faces() {
        let source = SourceImage::uniform(64, 32, RED).unwrap();
        for resolution in [1u32, 5, 16] {
            let sampler = IcosahedralSampler::new(resolution).unwrap();
            for face in 0..20 {
                let colors = sampler.face_colors(face, &source).unwrap();
                assert!(colors.iter_valid().count() > 0);
                assert!(colors.iter_valid().all(|c| c == RED));
            }
            for offset in 0..5 {
                let net = sampler.unwrap(&source, offset).unwrap();
                let red = net.image().pixels().filter(|p| **p == RED).count();
                assert!(red > 0);
                if resolution == 1 {
                    // one centroid sample per face, none overwritten
                    assert_eq!(red, 20);
                }
            }
        }
    }

    #[test]
    fn test_north_pole_pixel_only_reaches_north_faces() {
        let mut img = RgbImage::from_pixel(16, 8, BLACK);
        img.put_pixel(8, 0, WHITE);
        let source = SourceImage::new(img).unwrap();
        let sampler = IcosahedralSampler::new(50).unwrap();

        let mut lit_faces = Vec::new();
        for face in sampler.icosahedron().faces() {
            let colors = sampler.face_colors(face.index, &source).unwrap();
            if colors.iter_valid().any(|c| c != BLACK) {
                lit_faces.push(face.index);
                assert_eq!(face.band, Band::North, "face {} saw the pole pixel", face.index);
            }
        }
        assert!(!lit_faces.is_empty());
    }

    #[test]
    fn test_face_index_bounds() {
        let source = SourceImage::uniform(32, 16, RED).unwrap();
        let err = get_face_image(20, &source, 8).unwrap_err();
        assert_eq!(err, UnwrapError::InvalidFaceIndex(20));
        assert!(err.is_configuration());
        assert!(get_face_image(0, &source, 8).is_ok());

        let sampler = IcosahedralSampler::new(8).unwrap();
        assert!(sampler.face_image(20, &source).is_err());
        assert!(sampler.face_colors(19, &source).is_ok());
    }

    #[test]
    fn test_face_image_background_matches_net() {
        let source = SourceImage::uniform(32, 16, RED).unwrap();
        let face = get_face_image(0, &source, 8).unwrap();
        assert!(!face.is_covered(0, 0));
        assert_eq!(face.pixel(0, 0), WHITE);
        assert_eq!(face.pixel(0, 0), UnwrapConfig::default().background_rgb());

        let sampler = IcosahedralSampler::new(8).unwrap().with_background(BLACK);
        assert_eq!(sampler.face_image(0, &source).unwrap().pixel(0, 0), BLACK);
    }

    #[test]
    fn test_zero_resolution_fails() {
        let source = SourceImage::uniform(32, 16, RED).unwrap();
        let err = unwrap(&source, 0, 0).unwrap_err();
        assert_eq!(err, UnwrapError::InvalidResolution(0));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_offset_fails() {
        let source = SourceImage::uniform(32, 16, RED).unwrap();
        let err = unwrap(&source, 8, 5).unwrap_err();
        assert!(matches!(err, UnwrapError::InvalidFaceOffset { offset: 5, .. }));
        let config = UnwrapConfig::new(8, 7);
        assert!(IcosahedralSampler::from_config(&config).is_err());
    }

    #[test]
    fn test_unwrap_is_deterministic() {
        let source = gradient_source(128, 64);
        let a = unwrap(&source, 20, 3).unwrap();
        let b = unwrap(&source, 20, 3).unwrap();
        assert_eq!(a.image().as_raw(), b.image().as_raw());
    }

    #[test]
    fn test_cached_sampler_matches_free_functions() {
        let source = gradient_source(96, 48);
        let sampler = IcosahedralSampler::new(12).unwrap();
        for face in [0usize, 6, 13, 19] {
            assert_eq!(
                sampler.face_colors(face, &source).unwrap(),
                get_face_colors(face, &source, 12).unwrap()
            );
            assert_eq!(
                sampler.face_image(face, &source).unwrap(),
                get_face_image(face, &source, 12).unwrap()
            );
        }
    }

    #[test]
    fn test_net_contains_face_images() {
        let source = gradient_source(200, 100);
        let sampler = IcosahedralSampler::new(15).unwrap();
        let net = sampler.unwrap(&source, 1).unwrap();
        for face in sampler.face_images(&source).unwrap() {
            let p = net.layout().placement(face.face_index()).unwrap();
            for (x, y, color) in face.iter_covered() {
                assert_eq!(*net.image().get_pixel(p.x + x, p.y + y), color);
            }
        }
    }

    #[test]
    fn test_sampler_reused_across_sources() {
        let sampler = IcosahedralSampler::new(10).unwrap();
        let red = SourceImage::uniform(20, 10, RED).unwrap();
        let black = SourceImage::uniform(20, 10, BLACK).unwrap();
        let a = sampler.face_colors(4, &red).unwrap();
        let b = sampler.face_colors(4, &black).unwrap();
        assert!(a.iter_valid().all(|c| c == RED));
        assert!(b.iter_valid().all(|c| c == BLACK));
        assert_eq!(a.iter_valid().count(), b.iter_valid().count());
    }

    #[test]
    fn test_background_from_config() {
        let config = UnwrapConfig {
            face_resolution: 8,
            face_offset: 0,
            background: [0, 0, 255],
        };
        let sampler = IcosahedralSampler::from_config(&config).unwrap();
        let source = SourceImage::uniform(16, 8, RED).unwrap();
        let net = sampler.unwrap(&source, 0).unwrap();
        assert_eq!(*net.image().get_pixel(0, 0), Rgb([0, 0, 255]));
    }
}
