//! Colour lookup kernels.

use image::Rgb;

use super::source::SourceImage;

/// Resolves fractional, pixel-centre-referenced raster coordinates to a colour.
///
/// Coordinates may fall outside the raster: columns wrap around the
/// longitude seam and rows clamp at the poles.
pub trait SamplingKernel: Send + Sync {
    fn sample(&self, source: &SourceImage, row: f64, col: f64) -> Rgb<u8>;
}

/// Picks the single closest source pixel. No blending is performed, which
/// keeps colours exact at the cost of aliasing at low face resolutions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NearestNeighbor;

impl NearestNeighbor {
    /// Integer `(row, col)` of the pixel closest to the fractional position.
    /// Both dimensions must be non-zero.
    pub(crate) fn index(width: u32, height: u32, row: f64, col: f64) -> (u32, u32) {
        debug_assert!(width > 0 && height > 0);
        let col = (col.round() as i64).rem_euclid(width as i64) as u32;
        let row = (row.round() as i64).clamp(0, height as i64 - 1) as u32;
        (row, col)
    }
}

impl SamplingKernel for NearestNeighbor {
    fn sample(&self, source: &SourceImage, row: f64, col: f64) -> Rgb<u8> {
        let (row, col) = Self::index(source.width(), source.height(), row, col);
        source.pixel(col, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_rounds_to_nearest() {
        assert_eq!(NearestNeighbor::index(8, 4, 1.4, 2.6), (1, 3));
        assert_eq!(NearestNeighbor::index(8, 4, 0.0, 0.0), (0, 0));
    }

    #[test]
    fn test_index_wraps_columns() {
        assert_eq!(NearestNeighbor::index(8, 4, 0.0, 7.6), (0, 0));
        assert_eq!(NearestNeighbor::index(8, 4, 0.0, -0.6), (0, 7));
        assert_eq!(NearestNeighbor::index(8, 4, 0.0, 16.2), (0, 0));
    }

    #[test]
    fn test_index_clamps_rows() {
        assert_eq!(NearestNeighbor::index(8, 4, -0.7, 1.0), (0, 1));
        assert_eq!(NearestNeighbor::index(8, 4, 3.6, 1.0), (3, 1));
    }

    #[test]
    fn test_sample_reads_pixel() {
        let mut data = vec![0u8; 4 * 2 * 3];
        // pixel (col 3, row 1)
        let offset = (4 + 3) * 3;
        data[offset..offset + 3].copy_from_slice(&[9, 8, 7]);
        let source = SourceImage::from_raw(4, 2, data).unwrap();
        assert_eq!(NearestNeighbor.sample(&source, 1.2, 2.9), Rgb([9, 8, 7]));
        assert_eq!(NearestNeighbor.sample(&source, 0.0, 0.0), Rgb([0, 0, 0]));
    }
}
