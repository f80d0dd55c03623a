use crate::core::math::matrix::Matrix;
use crate::error::{MeshError, Result};
use crate::scene::mesh::HalfEdgeMesh;
use log::{debug, info, warn};
use nalgebra::Point3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Loads an OBJ file into a half-edge mesh.
///
/// Faces are triangulated but positions are kept in their own index space, so
/// corners that share a position stay connected even when their normals or
/// texture coordinates differ. Objects and groups are merged into one mesh.
pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<HalfEdgeMesh> {
    let path = path.as_ref();
    info!("Loading OBJ file: {}", path.display());

    let load_options = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &load_options)?;

    let mut welder = PositionWelder::default();
    let mut indices: Vec<u32> = Vec::new();

    for (model_index, model) in models.iter().enumerate() {
        let mesh = &model.mesh;
        if mesh.indices.is_empty() {
            warn!("OBJ object '{}' has no faces, skipping", model.name);
            continue;
        }

        // N x 3 table; a ragged position array fails the shape check.
        let table = Matrix::from_row_slice(mesh.positions.len() / 3, 3, &mesh.positions)?;
        let remap = (0..table.rows())
            .map(|row| Ok(welder.insert(model_index, table.row_point3(row)?)))
            .collect::<Result<Vec<u32>>>()?;

        for &i in &mesh.indices {
            let global = remap.get(i as usize).copied().ok_or(MeshError::IndexOutOfRange {
                face: indices.len() / 3,
                index: i as usize,
                vertex_count: remap.len(),
            })?;
            indices.push(global);
        }
    }

    if welder.welded > 0 {
        debug!("Welded {} positions shared between OBJ groups", welder.welded);
    }
    let mesh = HalfEdgeMesh::from_indices(welder.positions, &indices)?;
    info!(
        "OBJ loaded successfully. Vertices: {}, triangles: {}, closed: {}",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.is_closed()
    );
    Ok(mesh)
}

/// Rebuilds one vertex list across OBJ groups.
///
/// `tobj` re-indexes positions per group, so a vertex shared by two groups
/// comes back once per group. Bit-identical positions from different groups are
/// merged; duplicates inside one group stay distinct, as they are in the file.
#[derive(Default)]
struct PositionWelder {
    positions: Vec<Point3<f32>>,
    seen: HashMap<[u32; 3], (usize, u32)>,
    welded: usize,
}

impl PositionWelder {
    fn insert(&mut self, model: usize, p: Point3<f32>) -> u32 {
        let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
        if let Some(&(owner, index)) = self.seen.get(&key) {
            if owner != model {
                self.welded += 1;
                return index;
            }
        }
        let index = self.positions.len() as u32;
        self.positions.push(p);
        self.seen.entry(key).or_insert((model, index));
        index
    }
}

/// Writes positions and triangles as a plain OBJ file with 1-based indices.
pub fn write_obj<P: AsRef<Path>>(mesh: &HalfEdgeMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);

    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    for [a, b, c] in mesh.triangles() {
        writeln!(out, "f {} {} {}", a + 1, b + 1, c + 1)?;
    }
    out.flush()?;

    info!(
        "Wrote {} vertices and {} triangles to {}",
        mesh.vertex_count(),
        mesh.face_count(),
        path.display()
    );
    Ok(())
}
