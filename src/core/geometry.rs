use nalgebra::{Point3, Vector3};
use std::fmt;

/// Index of a vertex in a mesh's vertex arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of a face in a mesh's face arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Index of a half-edge in a mesh's half-edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A mesh vertex.
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub id: VertexId,
    /// Position in world space once the model transform has been baked in.
    pub position: Point3<f32>,
    /// Unweighted mean of incident face normals. Valid only when the mesh's normals are clean.
    pub normal: Vector3<f32>,
    /// One half-edge leaving this vertex. `None` for isolated vertices.
    pub outgoing: Option<HalfEdgeId>,
    /// Number of triangle corners at this vertex, i.e. of half-edges leaving it.
    pub corners: usize,
}

impl Vertex {
    pub fn new(id: VertexId, position: Point3<f32>) -> Self {
        Self {
            id,
            position,
            normal: Vector3::zeros(),
            outgoing: None,
            corners: 0,
        }
    }
}

/// A triangle.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub half_edge: HalfEdgeId,
    pub centroid: Point3<f32>,
    pub normal: Vector3<f32>,
}

/// A directed edge inside one face.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    pub start: VertexId,
    pub face: FaceId,
    /// Next half-edge around the same face, counter-clockwise.
    pub next: HalfEdgeId,
    /// The reversed half-edge in the neighboring face. `None` on an open boundary.
    pub opposite: Option<HalfEdgeId>,
}
