//! Rasterization of the face triangle and its barycentric weights.
//!
//! A face of resolution `R` is drawn in an `R x H` raster with
//! `H = max(1, floor(sqrt(3)/2 * R))`. All corner coordinates are integers
//! so that triangles placed side by side in the net share exact edges.
//! Pixel centres are tested in doubled coordinates to stay in integer
//! arithmetic; centres that fall exactly on an edge use a top-left rule so
//! neighbouring triangles never both claim them.

use glam::I64Vec2;
use log::warn;

use crate::error::{Result, UnwrapError};
use crate::geometry::Orientation;

/// Height in pixels of a face raster of the given resolution.
pub fn face_height(resolution: u32) -> u32 {
    ((3.0_f64.sqrt() / 2.0 * resolution as f64) as u32).max(1)
}

/// Triangle corners in raster units, in role order: apex, left, right.
pub fn triangle_corners(resolution: u32, orientation: Orientation) -> [I64Vec2; 3] {
    let r = resolution as i64;
    let h = face_height(resolution) as i64;
    let half = r / 2;
    match orientation {
        Orientation::Up => [
            I64Vec2::new(half, 0),
            I64Vec2::new(0, h),
            I64Vec2::new(r, h),
        ],
        Orientation::Down => [
            I64Vec2::new(r - half, h),
            I64Vec2::new(0, 0),
            I64Vec2::new(r, 0),
        ],
    }
}

/// Signed doubled area of `(a, b, p)`; positive when `p` is left of `a -> b`
/// in y-down raster coordinates.
#[inline]
fn edge(a: I64Vec2, b: I64Vec2, p: I64Vec2) -> i64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

#[inline]
fn owns_boundary(a: I64Vec2, b: I64Vec2) -> bool {
    let d = b - a;
    d.y < 0 || (d.y == 0 && d.x > 0)
}

/// Which pixels of a face raster lie inside the triangle, with the
/// barycentric weights (apex, left, right) of each inside pixel centre.
#[derive(Debug, Clone)]
pub struct TriangleRaster {
    resolution: u32,
    width: u32,
    height: u32,
    orientation: Orientation,
    weights: Vec<Option<[f64; 3]>>,
}

impl TriangleRaster {
    /// Rasterizes the triangle for `resolution` and `orientation`.
    pub fn new(resolution: u32, orientation: Orientation) -> Result<Self> {
        if resolution == 0 {
            return Err(UnwrapError::InvalidResolution(resolution));
        }
        let width = resolution;
        let height = face_height(resolution);

        if resolution == 1 {
            warn!("face resolution 1 yields a single centroid sample per face");
            return Ok(Self {
                resolution,
                width,
                height,
                orientation,
                weights: vec![Some([1.0 / 3.0; 3])],
            });
        }

        let [apex, left, right] = triangle_corners(resolution, orientation).map(|c| c * 2);
        let area = edge(apex, left, right);
        let winding = if area > 0 {
            [apex, left, right]
        } else {
            [apex, right, left]
        };
        let area = area as f64;

        let mut weights = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            for x in 0..width {
                let p = I64Vec2::new(2 * x as i64 + 1, 2 * y as i64 + 1);
                let inside = (0..3).all(|i| {
                    let (a, b) = (winding[i], winding[(i + 1) % 3]);
                    let e = edge(a, b, p);
                    e > 0 || (e == 0 && owns_boundary(a, b))
                });
                weights.push(inside.then(|| {
                    [
                        edge(left, right, p) as f64 / area,
                        edge(right, apex, p) as f64 / area,
                        edge(apex, left, p) as f64 / area,
                    ]
                }));
            }
        }

        Ok(Self {
            resolution,
            width,
            height,
            orientation,
            weights,
        })
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

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Barycentric weights (apex, left, right) of pixel `(x, y)`, or `None`
    /// when the pixel is outside the triangle.
    pub fn weights(&self, x: u32, y: u32) -> Option<[f64; 3]> {
        debug_assert!(x < self.width && y < self.height);
        self.weights[(y * self.width + x) as usize]
    }

    /// Returns true if pixel `(x, y)` is inside the triangle.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.weights(x, y).is_some()
    }

    /// Number of pixels inside the triangle.
    pub fn inside_count(&self) -> usize {
        self.weights.iter().filter(|w| w.is_some()).count()
    }

    /// Iterates over inside pixels as `(x, y, weights)` in row-major order.
    pub fn iter_inside(&self) -> impl Iterator<Item = (u32, u32, [f64; 3])> + '_ {
        let width = self.width;
        self.weights
            .iter()
            .enumerate()
            .filter_map(move |(i, &w)| w.map(|w| (i as u32 % width, i as u32 / width, w)))
    }
}
