//! Direction to equirectangular pixel mapping.
//!
//! Column 0 starts at longitude 0 and columns increase eastwards; row 0 is
//! the north pole. Coordinates are pixel-centre referenced, so the centre of
//! pixel `(row, col)` has the fractional coordinates `(row, col)` exactly.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;
use image::Rgb;

use super::kernel::{NearestNeighbor, SamplingKernel};
use super::source::SourceImage;
use crate::error::{Result, UnwrapError};
use crate::geometry::to_lat_lon;

/// Fractional `(row, col)` of a unit direction in a `width x height` panorama.
pub fn pixel_coords(dir: DVec3, width: u32, height: u32) -> Result<(f64, f64)> {
    if width == 0 || height == 0 {
        return Err(UnwrapError::EmptySource { width, height });
    }
    Ok(pixel_coords_unchecked(dir, width, height))
}

#[inline]
fn pixel_coords_unchecked(dir: DVec3, width: u32, height: u32) -> (f64, f64) {
    let (lat, lon) = to_lat_lon(dir);
    // The half-pixel shift makes pixel centres land on integer coordinates.
    let col = lon / TAU * width as f64 - 0.5;
    let row = (FRAC_PI_2 - lat) / PI * height as f64 - 0.5;
    (row, col)
}

/// Integer `(row, col)` of the source pixel nearest to `dir`.
pub fn nearest_pixel(dir: DVec3, width: u32, height: u32) -> Result<(u32, u32)> {
    let (row, col) = pixel_coords(dir, width, height)?;
    Ok(NearestNeighbor::index(width, height, row, col))
}

/// Colour of the source pixel nearest to `dir`.
pub fn sample(dir: DVec3, source: &SourceImage) -> Rgb<u8> {
    sample_with(&NearestNeighbor, dir, source)
}

/// Colour at `dir` as resolved by `kernel`.
pub fn sample_with<K: SamplingKernel + ?Sized>(
    kernel: &K,
    dir: DVec3,
    source: &SourceImage,
) -> Rgb<u8> {
    let (row, col) = pixel_coords_unchecked(dir, source.width(), source.height());
    kernel.sample(source, row, col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::from_lat_lon;
    use image::RgbImage;

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(pixel_coords(DVec3::X, 0, 10).unwrap_err().is_input());
        assert!(nearest_pixel(DVec3::X, 10, 0).is_err());
    }

    #[test]
    fn test_equator_and_poles() {
        let (row, col) = pixel_coords(DVec3::X, 360, 180).unwrap();
        assert!((row - 89.5).abs() < 1e-9);
        assert!((col + 0.5).abs() < 1e-9);

        let (row, _) = pixel_coords(DVec3::Z, 360, 180).unwrap();
        assert!((row + 0.5).abs() < 1e-9);
        assert_eq!(nearest_pixel(DVec3::Z, 360, 180).unwrap().0, 0);
        assert_eq!(nearest_pixel(DVec3::NEG_Z, 360, 180).unwrap().0, 179);
    }

    #[test]
    fn test_pixel_centres_map_to_themselves() {
        let (w, h) = (64u32, 32u32);
        for row in 0..h {
            for col in 0..w {
                let lat = FRAC_PI_2 - (row as f64 + 0.5) / h as f64 * PI;
                let lon = (col as f64 + 0.5) / w as f64 * TAU;
                let dir = from_lat_lon(lat, lon);
                assert_eq!(nearest_pixel(dir, w, h).unwrap(), (row, col));
            }
        }
    }

    #[test]
    fn test_longitude_seam_is_continuous() {
        let (w, h) = (1024u32, 512u32);
        for &lat in &[-1.2, -0.3, 0.0, 0.4, 1.3] {
            let before = nearest_pixel(from_lat_lon(lat, TAU - 1e-6), w, h).unwrap().1 as i64;
            let after = nearest_pixel(from_lat_lon(lat, 1e-6), w, h).unwrap().1 as i64;
            let jump = (after - before).rem_euclid(w as i64);
            let jump = jump.min(w as i64 - jump);
            assert!(jump <= 1, "column jump {} across the seam at lat {}", jump, lat);
        }
    }

    #[test]
    fn test_sample_uniform_color() {
        let source = SourceImage::uniform(40, 20, Rgb([255, 0, 0])).unwrap();
        for i in 0..100 {
            let t = i as f64 / 100.0;
            let dir = from_lat_lon(t * PI - FRAC_PI_2, t * 7.0);
            assert_eq!(sample(dir, &source), Rgb([255, 0, 0]));
        }
    }

    #[test]
    fn test_sample_picks_quadrant() {
        // 4x2 panorama: each column is a quarter of the longitudes.
        let mut img = RgbImage::new(4, 2);
        for x in 0..4 {
            for y in 0..2 {
                img.put_pixel(x, y, Rgb([x as u8 * 10, y as u8, 0]));
            }
        }
        let source = SourceImage::new(img).unwrap();
        let dir = from_lat_lon(0.5, 100f64.to_radians());
        assert_eq!(sample(dir, &source), Rgb([10, 0, 0]));
        let dir = from_lat_lon(-0.5, 300f64.to_radians());
        assert_eq!(sample(dir, &source), Rgb([30, 1, 0]));
    }
}
