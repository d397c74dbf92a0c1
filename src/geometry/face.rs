//! Icosahedron face identification: bands, orientation and vertex roles.

use serde::{Deserialize, Serialize};

/// Number of faces in each horizontal band of the icosahedron.
pub const FACES_PER_BAND: usize = 5;

/// Horizontal band of faces, counted from the north pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Band {
    /// Faces sharing the north pole vertex.
    North = 0,
    /// Faces with two upper-ring vertices and one lower-ring vertex.
    UpperBelt = 1,
    /// Faces with one upper-ring vertex and two lower-ring vertices.
    LowerBelt = 2,
    /// Faces sharing the south pole vertex.
    South = 3,
}

impl Band {
    /// Returns all four bands from north to south.
    pub const fn all() -> [Band; 4] {
        [Band::North, Band::UpperBelt, Band::LowerBelt, Band::South]
    }

    /// Returns the band index (0-3).
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Creates a band from an index (0-3).
    pub const fn from_index(index: usize) -> Option<Band> {
        match index {
            0 => Some(Band::North),
            1 => Some(Band::UpperBelt),
            2 => Some(Band::LowerBelt),
            3 => Some(Band::South),
            _ => None,
        }
    }

    /// Orientation every face of this band has in the unwrapped net.
    pub const fn orientation(self) -> Orientation {
        match self {
            Band::North | Band::LowerBelt => Orientation::Up,
            Band::UpperBelt | Band::South => Orientation::Down,
        }
    }

    /// Returns a short name for the band (e.g., "north", "upper").
    pub const fn short_name(self) -> &'static str {
        match self {
            Band::North => "north",
            Band::UpperBelt => "upper",
            Band::LowerBelt => "lower",
            Band::South => "south",
        }
    }
}

/// How a face triangle sits in its raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Apex on the top row, base along the bottom.
    Up,
    /// Base along the top row, apex on the bottom.
    Down,
}

/// One triangular face of the icosahedron.
///
/// `vertices` holds the vertex indices counter-clockwise as seen from outside
/// the sphere, starting at the apex. The apex/left/right roles describe where
/// each vertex lands in the face raster; "left" is always the western one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Face index (0-19), equal to `5 * band + column`.
    pub index: usize,
    /// Band the face belongs to.
    pub band: Band,
    /// Position within the band (0-4), increasing eastwards.
    pub column: usize,
    /// Vertex indices, counter-clockwise from outside, apex first.
    pub vertices: [usize; 3],
    apex: usize,
    left: usize,
    right: usize,
}

impl Face {
    /// Creates a face from its raster roles. The winding is derived from the
    /// band orientation.
    pub fn new(band: Band, column: usize, apex: usize, left: usize, right: usize) -> Self {
        let vertices = match band.orientation() {
            Orientation::Up => [apex, left, right],
            Orientation::Down => [apex, right, left],
        };
        Self {
            index: band.index() * FACES_PER_BAND + column,
            band,
            column,
            vertices,
            apex,
            left,
            right,
        }
    }

    /// Orientation of this face in the net.
    pub fn orientation(&self) -> Orientation {
        self.band.orientation()
    }

    /// Vertex at the tip of the triangle.
    pub fn apex(&self) -> usize {
        self.apex
    }

    /// Western vertex of the triangle base.
    pub fn left(&self) -> usize {
        self.left
    }

    /// Eastern vertex of the triangle base.
    pub fn right(&self) -> usize {
        self.right
    }

    /// Vertex indices in raster role order: apex, left, right.
    pub fn roles(&self) -> [usize; 3] {
        [self.apex, self.left, self.right]
    }

    /// Returns the three undirected edges of the face as sorted pairs.
    pub fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.vertices;
        let sorted = |x: usize, y: usize| if x < y { (x, y) } else { (y, x) };
        [sorted(a, b), sorted(b, c), sorted(c, a)]
    }

    /// Returns true if the face uses the given vertex.
    pub fn contains_vertex(&self, vertex: usize) -> bool {
        self.vertices.contains(&vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_bands() {
        let bands = Band::all();
        assert_eq!(bands.len(), 4);
        for (i, band) in bands.iter().enumerate() {
            assert_eq!(band.index(), i);
            assert_eq!(Band::from_index(i), Some(*band));
        }
        assert!(Band::from_index(4).is_none());
    }

    #[test]
    fn test_band_orientation_alternates() {
        assert_eq!(Band::North.orientation(), Orientation::Up);
        assert_eq!(Band::UpperBelt.orientation(), Orientation::Down);
        assert_eq!(Band::LowerBelt.orientation(), Orientation::Up);
        assert_eq!(Band::South.orientation(), Orientation::Down);
    }

    #[test]
    fn test_face_winding_follows_orientation() {
        let up = Face::new(Band::North, 2, 0, 3, 4);
        assert_eq!(up.index, 2);
        assert_eq!(up.vertices, [0, 3, 4]);
        assert_eq!(up.roles(), [0, 3, 4]);

        let down = Face::new(Band::South, 1, 11, 6, 7);
        assert_eq!(down.index, 16);
        assert_eq!(down.vertices, [11, 7, 6]);
        assert_eq!(down.left(), 6);
        assert_eq!(down.right(), 7);
    }

    #[test]
    fn test_face_edges_are_sorted() {
        let face = Face::new(Band::UpperBelt, 0, 9, 2, 1);
        for (a, b) in face.edges() {
            assert!(a < b);
        }
        assert!(face.contains_vertex(9));
        assert!(!face.contains_vertex(5));
    }
}
