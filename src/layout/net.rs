//! Icosahedral net layout and composition.
//!
//! The net is four strips of triangles, `3 * H` pixels tall and
//! `5 * R + R / 2` pixels wide for face resolution `R` and face height `H`:
//!
//! ```text
//!    /\  /\  /\  /\  /\        north band (up)
//!   /__\/__\/__\/__\/__\
//!   \  /\  /\  /\  /\  /\      upper belt (down) interleaved
//!    \/__\/__\/__\/__\/__\     with lower belt (up)
//!     \  /\  /\  /\  /\  /
//!      \/  \/  \/  \/  \/      south band (down)
//! ```
//!
//! Resolution 1 is the exception: its columns sit two pixels apart, giving
//! a 10 x 3 net.
//!
//! Face `(band, k)` goes to column slot `(k + face_offset) mod 5`. The
//! offset moves the cut seam of the net; it never changes which faces are
//! neighbours away from the seam. Offset 0 starts the net at face column 0;
//! offset 2 puts face column 0 in the middle slot.

use image::{Rgb, RgbImage};
use log::debug;

use super::face_image::FaceImage;
use crate::error::{Result, UnwrapError};
use crate::geometry::{Band, Orientation, FACES_PER_BAND, FACE_COUNT};
use crate::projection::face_height;

/// Number of distinct face offsets.
pub const FACE_OFFSET_COUNT: u32 = FACES_PER_BAND as u32;

/// Largest supported face offset.
pub const MAX_FACE_OFFSET: u32 = FACE_OFFSET_COUNT - 1;

/// Column pitch and half-column shift of the net for a face resolution.
///
/// A one-pixel face is a single centroid sample that both belt faces of a
/// column would claim, so resolution 1 spreads the columns two pixels apart.
fn column_pitch(resolution: u32) -> (u32, u32) {
    (resolution.max(2), (resolution / 2).max(1))
}

/// Where one face lands in the net.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacePlacement {
    /// Face index (0-19).
    pub face: usize,
    /// Column slot (0-4) after applying the face offset.
    pub slot: usize,
    /// Left edge of the face raster in the net.
    pub x: u32,
    /// Top edge of the face raster in the net.
    pub y: u32,
    /// Orientation of the triangle in its raster.
    pub orientation: Orientation,
}

/// Placement table for one face resolution and face offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetLayout {
    resolution: u32,
    face_offset: u32,
    face_height: u32,
    placements: Vec<FacePlacement>,
}

impl NetLayout {
    /// Builds the layout, rejecting resolution 0 and offsets outside `0..=4`.
    pub fn new(resolution: u32, face_offset: u32) -> Result<Self> {
        if resolution == 0 {
            return Err(UnwrapError::InvalidResolution(resolution));
        }
        if face_offset > MAX_FACE_OFFSET {
            return Err(UnwrapError::InvalidFaceOffset {
                offset: face_offset,
                max: MAX_FACE_OFFSET,
            });
        }

        let h = face_height(resolution);
        let (pitch, half) = column_pitch(resolution);
        let mut placements = Vec::with_capacity(FACE_COUNT);
        for band in Band::all() {
            for k in 0..FACES_PER_BAND {
                let slot = (k + face_offset as usize) % FACES_PER_BAND;
                let column_x = slot as u32 * pitch;
                let (x, y) = match band {
                    Band::North => (column_x + half, 0),
                    Band::UpperBelt => (column_x + half, h),
                    Band::LowerBelt => (column_x, h),
                    Band::South => (column_x, 2 * h),
                };
                placements.push(FacePlacement {
                    face: band.index() * FACES_PER_BAND + k,
                    slot,
                    x,
                    y,
                    orientation: band.orientation(),
                });
            }
        }

        Ok(Self {
            resolution,
            face_offset,
            face_height: h,
            placements,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn face_offset(&self) -> u32 {
        self.face_offset
    }

    /// Height of one face raster.
    pub fn face_height(&self) -> u32 {
        self.face_height
    }

    /// Width of the composed net.
    pub fn width(&self) -> u32 {
        let (pitch, half) = column_pitch(self.resolution);
        4 * pitch + half + self.resolution
    }

    /// Height of the composed net.
    pub fn height(&self) -> u32 {
        3 * self.face_height
    }

    /// Placement of a face, or an error for indices outside 0..20.
    pub fn placement(&self, face: usize) -> Result<&FacePlacement> {
        self.placements
            .get(face)
            .ok_or(UnwrapError::InvalidFaceIndex(face))
    }

    /// All placements ordered by face index.
    pub fn placements(&self) -> &[FacePlacement] {
        &self.placements
    }

    /// Face index occupying each `[band][slot]` position of the net.
    pub fn slots(&self) -> [[usize; FACES_PER_BAND]; 4] {
        let mut slots = [[0; FACES_PER_BAND]; 4];
        for p in &self.placements {
            slots[p.face / FACES_PER_BAND][p.slot] = p.face;
        }
        slots
    }

    /// Copies the twenty face images into a background-filled net.
    ///
    /// `faces` must be ordered by face index and share this layout's
    /// resolution. Only covered pixels are copied, so the net holds the
    /// face pixels unchanged.
    pub fn compose(&self, faces: &[FaceImage], background: Rgb<u8>) -> Result<UnwrappedImage> {
        if faces.len() != FACE_COUNT {
            return Err(UnwrapError::FaceCount {
                expected: FACE_COUNT,
                actual: faces.len(),
            });
        }
        for (position, face) in faces.iter().enumerate() {
            if face.face_index() != position {
                return Err(UnwrapError::FaceOrder {
                    position,
                    face: face.face_index(),
                });
            }
            if face.resolution() != self.resolution {
                return Err(UnwrapError::ResolutionMismatch {
                    face: position,
                    expected: self.resolution,
                    actual: face.resolution(),
                });
            }
        }

        let mut canvas = RgbImage::from_pixel(self.width(), self.height(), background);
        for (face, placement) in faces.iter().zip(&self.placements) {
            for (x, y, color) in face.iter_covered() {
                canvas.put_pixel(placement.x + x, placement.y + y, color);
            }
        }

        debug!(
            "composed {}x{} net (face resolution {}, offset {})",
            self.width(),
            self.height(),
            self.resolution,
            self.face_offset
        );

        Ok(UnwrappedImage {
            image: canvas,
            layout: self.clone(),
        })
    }
}

/// Composes twenty face images into a net with the given face offset.
pub fn compose(
    faces: &[FaceImage],
    face_offset: u32,
    background: Rgb<u8>,
) -> Result<UnwrappedImage> {
    let resolution = faces
        .first()
        .map(|f| f.resolution())
        .ok_or(UnwrapError::FaceCount {
            expected: FACE_COUNT,
            actual: 0,
        })?;
    NetLayout::new(resolution, face_offset)?.compose(faces, background)
}

/// The composed net together with the layout that produced it.
#[derive(Debug, Clone)]
pub struct UnwrappedImage {
    image: RgbImage,
    layout: NetLayout,
}

impl UnwrappedImage {
    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn layout(&self) -> &NetLayout {
        &self.layout
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
