//! Regular icosahedron inscribed in the unit sphere.
//!
//! Vertices come from the three mutually orthogonal golden rectangles
//! `(0, ±1, ±φ)` and their cyclic permutations. The model is rotated once so
//! that one vertex sits on the north pole (+Z) and the first upper-ring
//! vertex sits at 36° longitude. Faces are then derived from the vertex
//! adjacency and labelled by band (see [`Band`]).

use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

use glam::{DQuat, DVec3};
use log::debug;

use super::face::{Band, Face, FACES_PER_BAND};
use super::spherical::longitude;
use crate::error::{Result, UnwrapError};

/// Number of icosahedron vertices.
pub const VERTEX_COUNT: usize = 12;
/// Number of icosahedron faces.
pub const FACE_COUNT: usize = 20;
/// Number of icosahedron edges.
pub const EDGE_COUNT: usize = 30;
/// Number of neighbours of every vertex.
pub const VERTEX_DEGREE: usize = 5;

/// Longitude of the first upper-ring vertex.
const RING_START_LONGITUDE: f64 = PI / 5.0;

/// Relative tolerance used when comparing edge lengths.
const EDGE_TOLERANCE: f64 = 1e-6;

static SHARED: OnceLock<Result<Arc<Icosahedron>>> = OnceLock::new();

/// Immutable icosahedron topology and geometry.
#[derive(Debug, Clone)]
pub struct Icosahedron {
    vertices: [DVec3; VERTEX_COUNT],
    faces: [Face; FACE_COUNT],
    neighbors: [[usize; VERTEX_DEGREE]; VERTEX_COUNT],
    edges: Vec<(usize, usize)>,
    edge_length: f64,
    north: usize,
    south: usize,
}

impl Icosahedron {
    /// Builds the pole-aligned icosahedron.
    ///
    /// Fails only if floating point error breaks the expected topology
    /// (every vertex with five neighbours, twenty consistent faces).
    pub fn build() -> Result<Self> {
        let raw = golden_rectangle_vertices();
        let (neighbors, edge_length) = vertex_adjacency(&raw)?;

        // Rotate vertex 0 onto the north pole, then spin the upper ring into place.
        let tilt = DQuat::from_rotation_arc(raw[0], DVec3::Z);
        let mut vertices = raw.map(|v| (tilt * v).normalize());
        let ring_start = neighbors[0]
            .iter()
            .map(|&v| longitude(vertices[v]))
            .fold(f64::INFINITY, f64::min);
        let spin = DQuat::from_rotation_z(RING_START_LONGITUDE - ring_start);
        vertices = vertices.map(|v| (spin * v).normalize());

        let triangles = outward_triangles(&vertices, &neighbors)?;
        let (faces, north, south) = label_faces(&vertices, &neighbors, &triangles)?;

        let mut edges: Vec<(usize, usize)> = Vec::with_capacity(EDGE_COUNT);
        for (a, adjacent) in neighbors.iter().enumerate() {
            for &b in adjacent {
                if a < b {
                    edges.push((a, b));
                }
            }
        }
        if edges.len() != EDGE_COUNT {
            return Err(UnwrapError::Topology(format!(
                "expected {} edges, found {}",
                EDGE_COUNT,
                edges.len()
            )));
        }

        debug!(
            "built icosahedron: {} vertices, {} faces, {} edges, edge length {:.6}",
            vertices.len(),
            faces.len(),
            edges.len(),
            edge_length
        );

        Ok(Self {
            vertices,
            faces,
            neighbors,
            edges,
            edge_length,
            north,
            south,
        })
    }

    /// Process-wide icosahedron, built on first use.
    pub fn shared() -> Result<Arc<Icosahedron>> {
        SHARED
            .get_or_init(|| Icosahedron::build().map(Arc::new))
            .clone()
    }

    /// All twelve unit vertex directions.
    pub fn vertices(&self) -> &[DVec3; VERTEX_COUNT] {
        &self.vertices
    }

    /// Returns a single vertex direction.
    pub fn vertex(&self, index: usize) -> DVec3 {
        self.vertices[index]
    }

    /// All twenty faces, ordered by face index.
    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }

    /// Returns a face by index, or an error if the index is outside 0..20.
    pub fn face(&self, index: usize) -> Result<&Face> {
        self.faces
            .get(index)
            .ok_or(UnwrapError::InvalidFaceIndex(index))
    }

    /// The five vertices adjacent to `vertex`.
    pub fn neighbors(&self, vertex: usize) -> &[usize; VERTEX_DEGREE] {
        &self.neighbors[vertex]
    }

    /// The thirty undirected edges as `(low, high)` vertex pairs.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Chord length of an edge on the unit sphere.
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Index of the vertex on the north pole.
    pub fn north_pole(&self) -> usize {
        self.north
    }

    /// Index of the vertex on the south pole.
    pub fn south_pole(&self) -> usize {
        self.south
    }

    /// Corner directions of a face in winding order.
    pub fn face_vertices(&self, face: &Face) -> [DVec3; 3] {
        face.vertices.map(|v| self.vertices[v])
    }

    /// Unit direction through the centroid of a face.
    pub fn face_center(&self, face: &Face) -> DVec3 {
        let [a, b, c] = self.face_vertices(face);
        (a + b + c).normalize()
    }

    /// Solid angle subtended by a face (Van Oosterom-Strackee).
    pub fn face_solid_angle(&self, face: &Face) -> f64 {
        let [a, b, c] = self.face_vertices(face);
        let numerator = a.dot(b.cross(c)).abs();
        let denominator = 1.0 + a.dot(b) + b.dot(c) + c.dot(a);
        2.0 * numerator.atan2(denominator)
    }

    /// Index of the face containing `dir`.
    ///
    /// Picks the face whose worst edge test is largest, so points on shared
    /// edges resolve to the lowest such index and the result is always defined.
    pub fn face_containing(&self, dir: DVec3) -> usize {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for face in &self.faces {
            let score = self.edge_margin(face, dir);
            if score > best_score {
                best_score = score;
                best = face.index;
            }
        }
        best
    }

    /// Smallest signed distance-like value of `dir` against the three edge
    /// planes of `face`; positive strictly inside.
    pub fn edge_margin(&self, face: &Face, dir: DVec3) -> f64 {
        let [a, b, c] = self.face_vertices(face);
        let ab = dir.dot(a.cross(b).normalize());
        let bc = dir.dot(b.cross(c).normalize());
        let ca = dir.dot(c.cross(a).normalize());
        ab.min(bc).min(ca)
    }
}

/// The twelve golden-rectangle vertices, normalized to unit length.
fn golden_rectangle_vertices() -> [DVec3; VERTEX_COUNT] {
    let phi = (1.0 + 5.0_f64.sqrt()) / 2.0;
    let mut out = [DVec3::ZERO; VERTEX_COUNT];
    let mut i = 0;
    for &s1 in &[1.0, -1.0] {
        for &s2 in &[1.0, -1.0] {
            let (a, b) = (s1, s2 * phi);
            out[i] = DVec3::new(0.0, a, b);
            out[i + 1] = DVec3::new(a, b, 0.0);
            out[i + 2] = DVec3::new(b, 0.0, a);
            i += 3;
        }
    }
    out.map(|v| v.normalize())
}

/// Precomputes the five nearest neighbours of every vertex.
fn vertex_adjacency(
    vertices: &[DVec3; VERTEX_COUNT],
) -> Result<([[usize; VERTEX_DEGREE]; VERTEX_COUNT], f64)> {
    let mut edge_length = f64::INFINITY;
    for (i, a) in vertices.iter().enumerate() {
        for b in &vertices[i + 1..] {
            edge_length = edge_length.min(a.distance(*b));
        }
    }
    if !edge_length.is_finite() || edge_length <= 0.0 {
        return Err(UnwrapError::Topology(format!(
            "invalid edge length {}",
            edge_length
        )));
    }

    let limit = edge_length * (1.0 + EDGE_TOLERANCE);
    let mut neighbors = [[0usize; VERTEX_DEGREE]; VERTEX_COUNT];
    for (i, a) in vertices.iter().enumerate() {
        let adjacent: Vec<usize> = (0..VERTEX_COUNT)
            .filter(|&j| j != i && a.distance(vertices[j]) <= limit)
            .collect();
        if adjacent.len() != VERTEX_DEGREE {
            return Err(UnwrapError::Topology(format!(
                "vertex {} has {} neighbours, expected {}",
                i,
                adjacent.len(),
                VERTEX_DEGREE
            )));
        }
        neighbors[i].copy_from_slice(&adjacent);
    }
    Ok((neighbors, edge_length))
}

/// Every mutually adjacent vertex triple, wound counter-clockwise from outside.
fn outward_triangles(
    vertices: &[DVec3; VERTEX_COUNT],
    neighbors: &[[usize; VERTEX_DEGREE]; VERTEX_COUNT],
) -> Result<Vec<[usize; 3]>> {
    let adjacent = |a: usize, b: usize| neighbors[a].contains(&b);
    let mut triangles = Vec::with_capacity(FACE_COUNT);
    for i in 0..VERTEX_COUNT {
        for j in (i + 1)..VERTEX_COUNT {
            if !adjacent(i, j) {
                continue;
            }
            for k in (j + 1)..VERTEX_COUNT {
                if !adjacent(i, k) || !adjacent(j, k) {
                    continue;
                }
                let (a, b, c) = (vertices[i], vertices[j], vertices[k]);
                let normal = (b - a).cross(c - a);
                if normal.dot(a + b + c) > 0.0 {
                    triangles.push([i, j, k]);
                } else {
                    triangles.push([i, k, j]);
                }
            }
        }
    }
    if triangles.len() != FACE_COUNT {
        return Err(UnwrapError::Topology(format!(
            "expected {} faces, found {}",
            FACE_COUNT,
            triangles.len()
        )));
    }
    Ok(triangles)
}

/// Assigns band, column and raster roles to each triangle.
///
/// Returns the faces ordered by index plus the north and south pole vertices.
fn label_faces(
    vertices: &[DVec3; VERTEX_COUNT],
    neighbors: &[[usize; VERTEX_DEGREE]; VERTEX_COUNT],
    triangles: &[[usize; 3]],
) -> Result<([Face; FACE_COUNT], usize, usize)> {
    let by_z = |a: &usize, b: &usize| vertices[*a].z.total_cmp(&vertices[*b].z);
    let north = (0..VERTEX_COUNT).max_by(by_z).unwrap_or(0);
    let south = (0..VERTEX_COUNT).min_by(by_z).unwrap_or(0);

    let mut upper: Vec<usize> = neighbors[north].to_vec();
    upper.sort_by(|a, b| longitude(vertices[*a]).total_cmp(&longitude(vertices[*b])));

    // L_k sits between U_k and U_k+1.
    let mut lower = Vec::with_capacity(FACES_PER_BAND);
    for k in 0..FACES_PER_BAND {
        let (u0, u1) = (upper[k], upper[(k + 1) % FACES_PER_BAND]);
        let shared = neighbors[u0]
            .iter()
            .copied()
            .find(|&v| v != north && neighbors[u1].contains(&v))
            .ok_or_else(|| {
                UnwrapError::Topology(format!("no lower vertex between {} and {}", u0, u1))
            })?;
        lower.push(shared);
    }

    let upper_pos = |v: usize| upper.iter().position(|&u| u == v);
    let lower_pos = |v: usize| lower.iter().position(|&l| l == v);
    // For a pair of ring positions {k, k+1}, returns k.
    let western = |a: usize, b: usize| -> Option<usize> {
        if (a + 1) % FACES_PER_BAND == b {
            Some(a)
        } else if (b + 1) % FACES_PER_BAND == a {
            Some(b)
        } else {
            None
        }
    };

    let mut slots: [Option<Face>; FACE_COUNT] = [None; FACE_COUNT];
    for tri in triangles {
        let ups: Vec<usize> = tri.iter().filter_map(|&v| upper_pos(v)).collect();
        let lows: Vec<usize> = tri.iter().filter_map(|&v| lower_pos(v)).collect();
        let n = FACES_PER_BAND;

        let face = if tri.contains(&north) && ups.len() == 2 {
            western(ups[0], ups[1])
                .map(|k| Face::new(Band::North, k, north, upper[k], upper[(k + 1) % n]))
        } else if tri.contains(&south) && lows.len() == 2 {
            // Column k sits under the lower-belt face whose apex is U_k.
            western(lows[0], lows[1]).map(|w| {
                let k = (w + 1) % n;
                Face::new(Band::South, k, south, lower[w], lower[k])
            })
        } else if ups.len() == 2 && lows.len() == 1 {
            let k = lows[0];
            western(ups[0], ups[1])
                .filter(|&w| w == k)
                .map(|_| Face::new(Band::UpperBelt, k, lower[k], upper[k], upper[(k + 1) % n]))
        } else if ups.len() == 1 && lows.len() == 2 {
            let k = ups[0];
            western(lows[0], lows[1])
                .filter(|&w| (w + 1) % n == k)
                .map(|w| Face::new(Band::LowerBelt, k, upper[k], lower[w], lower[k]))
        } else {
            None
        };

        let face = face.ok_or_else(|| {
            UnwrapError::Topology(format!("triangle {:?} does not fit the band structure", tri))
        })?;

        if !same_cycle(face.vertices, *tri) {
            return Err(UnwrapError::Topology(format!(
                "face {} winding {:?} disagrees with outward triangle {:?}",
                face.index, face.vertices, tri
            )));
        }
        if slots[face.index].replace(face).is_some() {
            return Err(UnwrapError::Topology(format!(
                "face index {} assigned twice",
                face.index
            )));
        }
    }

    let mut faces = Vec::with_capacity(FACE_COUNT);
    for (i, slot) in slots.iter().enumerate() {
        faces.push(slot.ok_or_else(|| UnwrapError::Topology(format!("face {} missing", i)))?);
    }
    let faces: [Face; FACE_COUNT] = faces
        .try_into()
        .map_err(|_| UnwrapError::Topology("face table has wrong length".to_string()))?;
    Ok((faces, north, south))
}

/// True if `a` is a cyclic rotation of `b`.
fn same_cycle(a: [usize; 3], b: [usize; 3]) -> bool {
    (0..3).any(|r| (0..3).all(|i| a[i] == b[(i + r) % 3]))
}
