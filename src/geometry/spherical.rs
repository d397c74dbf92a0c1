//! Conversions between unit direction vectors and latitude/longitude.
//!
//! The sphere's up axis is +Z. Longitude is measured from +X towards +Y and
//! lives in `[0, 2π)`; latitude lives in `[-π/2, π/2]`.

use std::f64::consts::TAU;

use glam::DVec3;

/// Wraps an angle into `[0, 2π)`.
#[inline]
pub fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Longitude of a direction in `[0, 2π)`.
#[inline]
pub fn longitude(dir: DVec3) -> f64 {
    wrap_longitude(dir.y.atan2(dir.x))
}

/// Latitude of a unit direction in `[-π/2, π/2]`.
///
/// The z component is clamped so directions that are a rounding error away
/// from unit length do not produce NaN at the poles.
#[inline]
pub fn latitude(dir: DVec3) -> f64 {
    dir.z.clamp(-1.0, 1.0).asin()
}

/// Converts a direction to `(latitude, longitude)`.
#[inline]
pub fn to_lat_lon(dir: DVec3) -> (f64, f64) {
    (latitude(dir), longitude(dir))
}

/// Builds the unit direction for a latitude/longitude pair.
#[inline]
pub fn from_lat_lon(lat: f64, lon: f64) -> DVec3 {
    let (slon, clon) = lon.sin_cos();
    let (slat, clat) = lat.sin_cos();
    DVec3::new(clat * clon, clat * slon, slat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_axis_directions() {
        let cases = [
            (DVec3::X, 0.0, 0.0),
            (DVec3::Y, 0.0, FRAC_PI_2),
            (DVec3::NEG_X, 0.0, PI),
            (DVec3::NEG_Y, 0.0, 3.0 * FRAC_PI_2),
        ];
        for (dir, lat, lon) in cases {
            let (got_lat, got_lon) = to_lat_lon(dir);
            assert!((got_lat - lat).abs() < 1e-12, "{:?} lat {}", dir, got_lat);
            assert!((got_lon - lon).abs() < 1e-12, "{:?} lon {}", dir, got_lon);
        }
        assert!((latitude(DVec3::Z) - FRAC_PI_2).abs() < 1e-12);
        assert!((latitude(DVec3::NEG_Z) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_longitude_range() {
        for i in 0..360 {
            let lon = (i as f64).to_radians() - PI;
            let l = longitude(from_lat_lon(0.3, lon));
            assert!((0.0..TAU).contains(&l), "longitude {} out of range", l);
        }
        assert_eq!(wrap_longitude(-1e-20), 0.0);
    }

    #[test]
    fn test_lat_lon_roundtrip() {
        for &lat in &[-1.2, -0.4, 0.0, 0.7, 1.5] {
            for &lon in &[0.1, 1.0, 3.0, 5.5] {
                let dir = from_lat_lon(lat, lon);
                assert!((dir.length() - 1.0).abs() < 1e-12);
                let (lat2, lon2) = to_lat_lon(dir);
                assert!((lat - lat2).abs() < 1e-12);
                assert!((lon - lon2).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_latitude_clamps_overlong_vectors() {
        let almost_pole = DVec3::new(0.0, 0.0, 1.0 + 1e-15);
        assert!(latitude(almost_pole).is_finite());
    }
}
