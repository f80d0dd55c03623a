use crate::scene::material::Material;
use crate::scene::mesh::HalfEdgeMesh;

/// A mesh paired with the material it is shaded with.
#[derive(Debug, Clone)]
pub struct Surface {
    pub name: String,
    pub mesh: HalfEdgeMesh,
    pub material: Material,
}

impl Surface {
    pub fn new(name: impl Into<String>, mesh: HalfEdgeMesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
        }
    }

    /// Applies `levels` rounds of Loop subdivision and refreshes normals.
    pub fn refine(&mut self, levels: u32) -> Result<(), crate::error::MeshError> {
        for _ in 0..levels {
            self.mesh.subdivide()?;
        }
        self.mesh.update_normals();
        Ok(())
    }
}
