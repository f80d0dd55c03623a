use crate::core::geometry::{Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};
use crate::error::MeshError;
use log::debug;
use nalgebra::{Matrix4, Point3, Vector3};
use std::collections::HashMap;

type Topology = (
    Vec<Vertex>,
    Vec<Face>,
    Vec<HalfEdge>,
    HashMap<(usize, usize), HalfEdgeId>,
);

/// Triangle mesh with half-edge connectivity.
///
/// The triangle index list is authoritative; vertices, faces and half-edges
/// are arenas derived from it and rebuilt whenever topology changes. Each face
/// owns three half-edges `3f, 3f + 1, 3f + 2` linked by `next`, and a half-edge's
/// `opposite` is the reversed directed edge when some other face has it.
///
/// Normals and face centroids are a cache: anything that moves positions or
/// changes topology marks them dirty until [`HalfEdgeMesh::update_normals`] runs.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    half_edges: Vec<HalfEdge>,
    edge_lookup: HashMap<(usize, usize), HalfEdgeId>,
    triangles: Vec<[usize; 3]>,
    normals_dirty: bool,
}

impl HalfEdgeMesh {
    /// Builds the connectivity for counter-clockwise triangles over `positions`.
    ///
    /// Open boundaries are allowed. A repeated directed edge is rejected, since it
    /// means either non-manifold geometry or inconsistent winding.
    pub fn new(positions: Vec<Point3<f32>>, triangles: Vec<[usize; 3]>) -> Result<Self, MeshError> {
        let (vertices, faces, half_edges, edge_lookup) = build_topology(&positions, &triangles)?;
        Ok(Self {
            vertices,
            faces,
            half_edges,
            edge_lookup,
            triangles,
            normals_dirty: true,
        })
    }

    /// Same as [`HalfEdgeMesh::new`] for a flat index list, three indices per triangle.
    pub fn from_indices(positions: Vec<Point3<f32>>, indices: &[u32]) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::MalformedIndices { len: indices.len() });
        }
        let triangles = indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
            .collect();
        Self::new(positions, triangles)
    }

    /// A single counter-clockwise triangle in the z = 0 plane, facing +Z.
    pub fn create_test_triangle() -> Self {
        Self::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2]],
        )
        .expect("static triangle is valid")
    }

    /// Closed unit octahedron with outward-facing triangles.
    #[rustfmt::skip]
    pub fn create_octahedron() -> Self {
        let positions = vec![
            Point3::new( 1.0,  0.0,  0.0),
            Point3::new(-1.0,  0.0,  0.0),
            Point3::new( 0.0,  1.0,  0.0),
            Point3::new( 0.0, -1.0,  0.0),
            Point3::new( 0.0,  0.0,  1.0),
            Point3::new( 0.0,  0.0, -1.0),
        ];
        let triangles = vec![
            [0, 2, 4], [1, 4, 2], [0, 4, 3], [0, 5, 2],
            [1, 3, 4], [1, 2, 5], [0, 3, 5], [1, 5, 3],
        ];
        Self::new(positions, triangles).expect("static octahedron is valid")
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let boundary = self
            .half_edges
            .iter()
            .filter(|e| e.opposite.is_none())
            .count();
        boundary + (self.half_edges.len() - boundary) / 2
    }

    /// True when the mesh has faces and every half-edge has an opposite.
    pub fn is_closed(&self) -> bool {
        !self.faces.is_empty() && self.half_edges.iter().all(|e| e.opposite.is_some())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    pub fn positions(&self) -> Vec<Point3<f32>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    pub fn vertex(&self, v: VertexId) -> &Vertex {
        &self.vertices[v.0]
    }

    pub fn face(&self, f: FaceId) -> &Face {
        &self.faces[f.0]
    }

    pub fn half_edge(&self, e: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[e.0]
    }

    /// Half-edge for the directed edge `start -> end`, if a face contains it.
    pub fn find_half_edge(&self, start: VertexId, end: VertexId) -> Option<HalfEdgeId> {
        self.edge_lookup.get(&(start.0, end.0)).copied()
    }

    /// The vertex a half-edge points to.
    #[inline]
    pub fn end_vertex(&self, e: HalfEdgeId) -> VertexId {
        self.half_edges[self.half_edges[e.0].next.0].start
    }

    #[inline]
    fn prev(&self, e: HalfEdgeId) -> HalfEdgeId {
        let next = self.half_edges[e.0].next;
        self.half_edges[next.0].next
    }

    pub fn normals_dirty(&self) -> bool {
        self.normals_dirty
    }

    /// The three corners of a face in winding order.
    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        let e0 = self.faces[f.0].half_edge;
        let e1 = self.half_edges[e0.0].next;
        let e2 = self.half_edges[e1.0].next;
        [
            self.half_edges[e0.0].start,
            self.half_edges[e1.0].start,
            self.half_edges[e2.0].start,
        ]
    }

    /// One-ring of `v`, walking `opposite(next(next(e)))` around the vertex.
    ///
    /// The ring must be closed and must visit every corner at `v`; a vertex
    /// where two closed fans touch is non-manifold. Isolated vertices have no
    /// neighbors.
    pub fn vertex_neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, MeshError> {
        let vertex = &self.vertices[v.0];
        let Some(first) = vertex.outgoing else {
            return Ok(Vec::new());
        };

        let mut ring = Vec::new();
        let mut e = first;
        for _ in 0..self.half_edges.len() {
            ring.push(self.end_vertex(e));
            let incoming = self.prev(e);
            match self.half_edges[incoming.0].opposite {
                Some(o) if o == first => {
                    if ring.len() != vertex.corners {
                        break;
                    }
                    return Ok(ring);
                }
                Some(o) => e = o,
                None => {
                    return Err(MeshError::OpenBoundary {
                        start: self.half_edges[incoming.0].start.0,
                        end: v.0,
                    });
                }
            }
        }
        Err(MeshError::NonManifoldVertex { vertex: v.0 })
    }

    /// Faces around `v`. On a boundary the fan is gathered from both sides.
    pub fn vertex_faces(&self, v: VertexId) -> Vec<FaceId> {
        let Some(first) = self.vertices[v.0].outgoing else {
            return Vec::new();
        };

        let mut fan = Vec::new();
        let mut e = first;
        for _ in 0..self.half_edges.len() {
            fan.push(self.half_edges[e.0].face);
            match self.half_edges[self.prev(e).0].opposite {
                Some(o) if o == first => return fan,
                Some(o) => e = o,
                None => break,
            }
        }

        // Hit a boundary: sweep the other way from the starting edge.
        let mut e = first;
        for _ in 0..self.half_edges.len() {
            let Some(o) = self.half_edges[e.0].opposite else {
                break;
            };
            let next = self.half_edges[o.0].next;
            if next == first {
                break;
            }
            fan.push(self.half_edges[next.0].face);
            e = next;
        }
        fan
    }

    /// Recomputes face normals, centroids and vertex normals if anything changed.
    pub fn update_normals(&mut self) {
        if !self.normals_dirty {
            return;
        }

        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        for (face, tri) in self.faces.iter_mut().zip(&self.triangles) {
            let [a, b, c] = *tri;
            let (p0, p1, p2) = (
                self.vertices[a].position,
                self.vertices[b].position,
                self.vertices[c].position,
            );
            face.normal = normalize_or_zero((p1 - p0).cross(&(p2 - p0)));
            face.centroid = Point3::from((p0.coords + p1.coords + p2.coords) / 3.0);
            for &i in tri {
                sums[i] += face.normal;
            }
        }
        for (vertex, sum) in self.vertices.iter_mut().zip(sums) {
            vertex.normal = normalize_or_zero(sum);
        }

        self.normals_dirty = false;
    }

    /// Bakes a model matrix into every position.
    pub fn transform(&mut self, model: &Matrix4<f32>) {
        for v in &mut self.vertices {
            v.position = model.transform_point(&v.position);
        }
        self.normals_dirty = true;
    }

    /// One level of Loop subdivision.
    ///
    /// Requires a closed mesh; a boundary edge is reported before anything is
    /// modified. All new positions are computed from the current neighborhoods
    /// and committed together, after which the arenas are rebuilt from the new
    /// triangle list.
    pub fn subdivide(&mut self) -> Result<(), MeshError> {
        let rings = (0..self.vertices.len())
            .map(|v| self.vertex_neighbors(VertexId(v)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut positions: Vec<Point3<f32>> =
            Vec::with_capacity(self.vertices.len() + self.half_edges.len() / 2);

        for (vertex, ring) in self.vertices.iter().zip(&rings) {
            positions.push(if ring.is_empty() {
                vertex.position
            } else {
                let n = ring.len();
                let beta = if n == 3 { 3.0 / 16.0 } else { 3.0 / (8.0 * n as f32) };
                let sum = ring
                    .iter()
                    .fold(Vector3::zeros(), |acc, w| acc + self.vertices[w.0].position.coords);
                Point3::from(vertex.position.coords * (1.0 - n as f32 * beta) + sum * beta)
            });
        }

        let mut edge_points: HashMap<(usize, usize), usize> =
            HashMap::with_capacity(self.half_edges.len() / 2);
        for (i, he) in self.half_edges.iter().enumerate() {
            let a = he.start;
            let b = self.end_vertex(HalfEdgeId(i));
            let key = undirected(a.0, b.0);
            if edge_points.contains_key(&key) {
                continue;
            }
            let Some(opposite) = he.opposite else {
                return Err(MeshError::OpenBoundary { start: a.0, end: b.0 });
            };
            let w = self.half_edges[self.prev(HalfEdgeId(i)).0].start;
            let x = self.half_edges[self.prev(opposite).0].start;

            let p = |id: VertexId| self.vertices[id.0].position.coords;
            let point = (p(a) + p(b)) * (3.0 / 8.0) + (p(w) + p(x)) * (1.0 / 8.0);
            edge_points.insert(key, positions.len());
            positions.push(Point3::from(point));
        }

        let edge_point = |u: usize, v: usize| {
            edge_points
                .get(&undirected(u, v))
                .copied()
                .ok_or(MeshError::OpenBoundary { start: u, end: v })
        };
        let mut triangles = Vec::with_capacity(self.triangles.len() * 4);
        for &[a, b, c] in &self.triangles {
            let ab = edge_point(a, b)?;
            let bc = edge_point(b, c)?;
            let ca = edge_point(c, a)?;
            triangles.push([ab, b, bc]);
            triangles.push([bc, c, ca]);
            triangles.push([ca, a, ab]);
            triangles.push([ab, bc, ca]);
        }

        let (vertices, faces, half_edges, edge_lookup) = build_topology(&positions, &triangles)?;
        debug!(
            "Loop subdivision: {} -> {} vertices, {} -> {} faces",
            self.vertices.len(),
            vertices.len(),
            self.faces.len(),
            faces.len()
        );

        self.vertices = vertices;
        self.faces = faces;
        self.half_edges = half_edges;
        self.edge_lookup = edge_lookup;
        self.triangles = triangles;
        self.normals_dirty = true;
        Ok(())
    }
}

#[inline]
fn undirected(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

#[inline]
fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    v.try_normalize(f32::EPSILON).unwrap_or_else(Vector3::zeros)
}

fn build_topology(
    positions: &[Point3<f32>],
    triangles: &[[usize; 3]],
) -> Result<Topology, MeshError> {
    let mut vertices: Vec<Vertex> = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| Vertex::new(VertexId(i), p))
        .collect();
    let mut faces = Vec::with_capacity(triangles.len());
    let mut half_edges = Vec::with_capacity(triangles.len() * 3);
    let mut edge_lookup = HashMap::with_capacity(triangles.len() * 3);

    for (f, tri) in triangles.iter().enumerate() {
        for &index in tri {
            if index >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    face: f,
                    index,
                    vertex_count: positions.len(),
                });
            }
        }
        if tri[0] == tri[1] || tri[1] == tri[2] || tri[2] == tri[0] {
            return Err(MeshError::DegenerateTriangle { face: f });
        }

        let base = half_edges.len();
        for i in 0..3 {
            let (start, end) = (tri[i], tri[(i + 1) % 3]);
            let id = HalfEdgeId(base + i);
            if edge_lookup.insert((start, end), id).is_some() {
                return Err(MeshError::DuplicateHalfEdge { start, end });
            }
            half_edges.push(HalfEdge {
                start: VertexId(start),
                face: FaceId(f),
                next: HalfEdgeId(base + (i + 1) % 3),
                opposite: None,
            });
            vertices[start].outgoing.get_or_insert(id);
            vertices[start].corners += 1;
        }
        faces.push(Face {
            half_edge: HalfEdgeId(base),
            centroid: Point3::origin(),
            normal: Vector3::zeros(),
        });
    }

    for (&(start, end), &id) in &edge_lookup {
        half_edges[id.0].opposite = edge_lookup.get(&(end, start)).copied();
    }

    Ok((vertices, faces, half_edges, edge_lookup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn tetrahedron() -> HalfEdgeMesh {
        HalfEdgeMesh::new(
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(1.0, -1.0, -1.0),
                Point3::new(-1.0, 1.0, -1.0),
                Point3::new(-1.0, -1.0, 1.0),
            ],
            vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        )
        .unwrap()
    }

    fn assert_half_edge_invariants(mesh: &HalfEdgeMesh) {
        assert_eq!(mesh.half_edge_count(), 3 * mesh.face_count());
        for (i, he) in mesh.half_edges().iter().enumerate() {
            let id = HalfEdgeId(i);
            let next = mesh.half_edge(he.next);
            assert_eq!(mesh.half_edge(next.next).next, id);
            assert_eq!(next.face, he.face);
            if let Some(o) = he.opposite {
                let opp = mesh.half_edge(o);
                assert_eq!(opp.opposite, Some(id));
                assert_eq!(opp.start, next.start);
            }
        }
    }

    #[test]
    fn octahedron_connectivity() {
        let mesh = HalfEdgeMesh::create_octahedron();
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.face_count(), 8);
        assert_eq!(mesh.half_edge_count(), 24);
        assert_eq!(mesh.edge_count(), 12);
        assert!(mesh.is_closed());
        assert_half_edge_invariants(&mesh);
    }

    #[test]
    fn neighbors_form_the_one_ring() {
        let mesh = HalfEdgeMesh::create_octahedron();
        let ring: HashSet<usize> = mesh
            .vertex_neighbors(VertexId(0))
            .unwrap()
            .into_iter()
            .map(|v| v.0)
            .collect();
        assert_eq!(ring, HashSet::from([2, 3, 4, 5]));

        for v in 0..mesh.vertex_count() {
            assert_eq!(mesh.vertex_neighbors(VertexId(v)).unwrap().len(), 4);
            assert_eq!(mesh.vertex_faces(VertexId(v)).len(), 4);
        }
    }

    #[test]
    fn face_vertices_follow_winding() {
        let mesh = HalfEdgeMesh::create_octahedron();
        for (f, tri) in mesh.triangles().iter().enumerate() {
            let corners = mesh.face_vertices(FaceId(f)).map(|v| v.0);
            assert_eq!(&corners, tri);
        }

        let e = mesh.find_half_edge(VertexId(0), VertexId(2)).unwrap();
        assert_eq!(mesh.half_edge(e).face, FaceId(0));
        assert_eq!(mesh.end_vertex(e), VertexId(2));
        assert!(mesh.find_half_edge(VertexId(0), VertexId(1)).is_none());
    }

    #[test]
    fn open_triangle_has_boundary() {
        let mut mesh = HalfEdgeMesh::create_test_triangle();
        assert!(!mesh.is_closed());
        assert_eq!(mesh.edge_count(), 3);
        assert!(mesh.half_edges().iter().all(|e| e.opposite.is_none()));
        assert!(matches!(
            mesh.vertex_neighbors(VertexId(0)),
            Err(MeshError::OpenBoundary { .. })
        ));
        assert_eq!(mesh.vertex_faces(VertexId(1)), vec![FaceId(0)]);

        mesh.update_normals();
        assert_relative_eq!(mesh.vertex(VertexId(2)).normal, Vector3::z());
        assert_relative_eq!(mesh.face(FaceId(0)).normal, Vector3::z());
    }

    #[test]
    fn boundary_fan_is_complete() {
        // Two triangles sharing edge (1, 2); vertex 1 sits on the boundary.
        let mesh = HalfEdgeMesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        )
        .unwrap();
        for v in [1, 2] {
            let fan: HashSet<FaceId> = mesh.vertex_faces(VertexId(v)).into_iter().collect();
            assert_eq!(fan, HashSet::from([FaceId(0), FaceId(1)]));
        }
        assert_eq!(mesh.edge_count(), 5);
        assert_half_edge_invariants(&mesh);
    }

    #[test]
    fn build_rejects_bad_input() {
        let p = vec![Point3::origin(); 4];
        assert_eq!(
            HalfEdgeMesh::new(p.clone(), vec![[0, 1, 7]]).unwrap_err(),
            MeshError::IndexOutOfRange {
                face: 0,
                index: 7,
                vertex_count: 4
            }
        );
        assert_eq!(
            HalfEdgeMesh::new(p.clone(), vec![[0, 1, 2], [3, 3, 1]]).unwrap_err(),
            MeshError::DegenerateTriangle { face: 1 }
        );
        assert_eq!(
            HalfEdgeMesh::new(p.clone(), vec![[0, 1, 2], [0, 1, 3]]).unwrap_err(),
            MeshError::DuplicateHalfEdge { start: 0, end: 1 }
        );
        assert_eq!(
            HalfEdgeMesh::from_indices(p, &[0, 1, 2, 3]).unwrap_err(),
            MeshError::MalformedIndices { len: 4 }
        );
    }

    #[test]
    fn normals_are_lazy() {
        let mut mesh = HalfEdgeMesh::create_octahedron();
        assert!(mesh.normals_dirty());
        mesh.update_normals();
        assert!(!mesh.normals_dirty());
        assert_relative_eq!(mesh.vertex(VertexId(0)).normal, Vector3::x(), epsilon = 1e-6);
        assert_relative_eq!(
            mesh.face(FaceId(0)).centroid,
            Point3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
            epsilon = 1e-6
        );

        mesh.transform(&Matrix4::new_translation(&Vector3::new(0.0, 2.0, 0.0)));
        assert!(mesh.normals_dirty());
        mesh.update_normals();
        assert_relative_eq!(mesh.vertex(VertexId(0)).normal, Vector3::x(), epsilon = 1e-6);
        assert_relative_eq!(mesh.vertex(VertexId(2)).position, Point3::new(0.0, 3.0, 0.0));
    }

    #[test]
    fn tetrahedron_subdivision_matches_closed_form() {
        let mut mesh = tetrahedron();
        let before = mesh.positions();
        mesh.subdivide().unwrap();

        assert_eq!(mesh.vertex_count(), 4 + 6);
        assert_eq!(mesh.face_count(), 16);
        assert!(mesh.is_closed());
        assert_half_edge_invariants(&mesh);

        for (i, p) in before.iter().enumerate() {
            assert_relative_eq!(mesh.vertex(VertexId(i)).position, p / 4.0, epsilon = 1e-6);
        }
        // Edge (0, 1) is the first half-edge's edge, so it produced vertex 4.
        assert_relative_eq!(
            mesh.vertex(VertexId(4)).position,
            Point3::from((before[0].coords + before[1].coords) / 4.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn repeated_subdivision_keeps_counting_and_moving() {
        let mut mesh = tetrahedron();
        mesh.subdivide().unwrap();
        let once = mesh.positions();
        mesh.subdivide().unwrap();

        assert_eq!(mesh.vertex_count(), 34);
        assert_eq!(mesh.face_count(), 64);
        assert_eq!(mesh.edge_count(), 96);
        let moved = once
            .iter()
            .zip(mesh.positions())
            .any(|(a, b)| (a - b).norm() > 1e-4);
        assert!(moved);
    }

    #[test]
    fn octahedron_subdivision_counts_and_shrinks() {
        let mut mesh = HalfEdgeMesh::create_octahedron();
        let radius = |m: &HalfEdgeMesh| {
            m.positions()
                .iter()
                .map(|p| p.coords.norm())
                .fold(0.0f32, f32::max)
        };
        let r0 = radius(&mesh);

        mesh.subdivide().unwrap();
        assert_eq!(mesh.vertex_count(), 6 + 12);
        assert_eq!(mesh.face_count(), 32);
        assert!(mesh.normals_dirty());
        let r1 = radius(&mesh);

        mesh.subdivide().unwrap();
        let r2 = radius(&mesh);
        assert!(r1 < r0);
        assert!(r2 < r1);
        assert_half_edge_invariants(&mesh);
    }

    #[test]
    fn vertex_shared_by_two_closed_fans_is_rejected() {
        // Two tetrahedra touching only at vertex 0.
        let mut positions = tetrahedron().positions();
        positions.extend([
            Point3::new(-1.0, 3.0, 3.0),
            Point3::new(3.0, -1.0, 3.0),
            Point3::new(3.0, 3.0, -1.0),
        ]);
        let mut mesh = HalfEdgeMesh::new(
            positions,
            vec![
                [0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2],
                [0, 4, 5], [0, 6, 4], [0, 5, 6], [4, 6, 5],
            ],
        )
        .unwrap();
        assert!(mesh.is_closed());
        assert_eq!(mesh.vertex(VertexId(0)).corners, 6);

        assert_eq!(
            mesh.vertex_neighbors(VertexId(0)),
            Err(MeshError::NonManifoldVertex { vertex: 0 })
        );
        assert_eq!(mesh.vertex_neighbors(VertexId(1)).unwrap().len(), 3);

        let before = mesh.positions();
        assert_eq!(
            mesh.subdivide(),
            Err(MeshError::NonManifoldVertex { vertex: 0 })
        );
        assert_eq!(mesh.positions(), before);
        assert_eq!(mesh.face_count(), 8);
    }

    #[test]
    fn subdivision_of_open_mesh_leaves_it_untouched() {
        let mut mesh = HalfEdgeMesh::create_test_triangle();
        let before = mesh.positions();
        assert!(matches!(mesh.subdivide(), Err(MeshError::OpenBoundary { .. })));
        assert_eq!(mesh.positions(), before);
        assert_eq!(mesh.face_count(), 1);
    }
}
