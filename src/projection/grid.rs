//! Per-face direction grids.

use glam::DVec3;
use log::debug;

use super::raster::TriangleRaster;
use crate::error::{Result, UnwrapError};
use crate::geometry::{Face, Icosahedron, Orientation};

/// Below this length an interpolated direction cannot be renormalized.
const MIN_DIRECTION_LENGTH: f64 = 1e-9;

/// Dense grid of unit directions for one face at one resolution.
///
/// Cells outside the face triangle hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceSampleGrid {
    face: usize,
    orientation: Orientation,
    resolution: u32,
    width: u32,
    height: u32,
    cells: Vec<Option<DVec3>>,
}

impl FaceSampleGrid {
    /// Index of the face this grid was projected from.
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

    /// Direction of cell `(x, y)`, or `None` outside the triangle.
    pub fn get(&self, x: u32, y: u32) -> Option<DVec3> {
        debug_assert!(x < self.width && y < self.height);
        self.cells[(y * self.width + x) as usize]
    }

    /// Returns true if cell `(x, y)` lies inside the triangle.
    pub fn is_valid(&self, x: u32, y: u32) -> bool {
        self.get(x, y).is_some()
    }

    /// Number of cells inside the triangle.
    pub fn valid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Option<DVec3>] {
        &self.cells
    }

    /// Iterates over valid cells as `(x, y, direction)`.
    pub fn iter_valid(&self) -> impl Iterator<Item = (u32, u32, DVec3)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, &c)| c.map(|d| (i as u32 % width, i as u32 / width, d)))
    }
}

/// Maps face-local pixels to sphere directions for one resolution.
///
/// The triangle rasters depend only on resolution and orientation, so they
/// are computed once here and shared by all twenty faces.
#[derive(Debug, Clone)]
pub struct FaceProjector {
    resolution: u32,
    up: TriangleRaster,
    down: TriangleRaster,
}

impl FaceProjector {
    /// Creates a projector for faces `resolution` pixels wide.
    pub fn new(resolution: u32) -> Result<Self> {
        let up = TriangleRaster::new(resolution, Orientation::Up)?;
        let down = TriangleRaster::new(resolution, Orientation::Down)?;
        debug!(
            "face rasters at resolution {}: {}x{}, {} pixels per face",
            resolution,
            up.width(),
            up.height(),
            up.inside_count()
        );
        Ok(Self {
            resolution,
            up,
            down,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Raster used for faces with the given orientation.
    pub fn raster(&self, orientation: Orientation) -> &TriangleRaster {
        match orientation {
            Orientation::Up => &self.up,
            Orientation::Down => &self.down,
        }
    }

    /// Projects every inside pixel of `face` onto the unit sphere.
    ///
    /// The direction is the barycentric blend of the three face vertices,
    /// renormalized to unit length (a gnomonic projection of the flat face).
    pub fn project(&self, ico: &Icosahedron, face: &Face) -> Result<FaceSampleGrid> {
        let raster = self.raster(face.orientation());
        let corners = face.roles().map(|v| ico.vertex(v));
        let width = raster.width();

        let mut cells = vec![None; (width * raster.height()) as usize];
        for (x, y, [wa, wl, wr]) in raster.iter_inside() {
            let blended = corners[0] * wa + corners[1] * wl + corners[2] * wr;
            let length = blended.length();
            if !length.is_finite() || length < MIN_DIRECTION_LENGTH {
                return Err(UnwrapError::DegenerateDirection {
                    face: face.index,
                    x,
                    y,
                });
            }
            cells[(y * width + x) as usize] = Some(blended / length);
        }

        Ok(FaceSampleGrid {
            face: face.index,
            orientation: face.orientation(),
            resolution: self.resolution,
            width,
            height: raster.height(),
            cells,
        })
    }
}

/// Projects a single face at `resolution`.
pub fn project(ico: &Icosahedron, face: &Face, resolution: u32) -> Result<FaceSampleGrid> {
    FaceProjector::new(resolution)?.project(ico, face)
}
