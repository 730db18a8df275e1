use glam::{DMat4, DVec3};

use crate::math::AABB;

/// A mesh face, either a triangle or a quad, indexing into `Mesh::vertices`
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    Triangle([u32; 3]),
    Quad([u32; 4]),
}

impl Face {
    /// Triangle-list indices for this face. Quads split along the A-C diagonal.
    pub fn triangulate(&self) -> impl Iterator<Item = u32> {
        let (buf, len) = match *self {
            Face::Triangle([a, b, c]) => ([a, b, c, 0, 0, 0], 3),
            Face::Quad([a, b, c, d]) => ([a, b, c, a, c, d], 6),
        };
        buf.into_iter().take(len)
    }

    fn corners(&self) -> &[u32] {
        match self {
            Face::Triangle(idx) => &idx[..],
            Face::Quad(idx) => &idx[..],
        }
    }
}

/// Indexed polygon mesh in millimeters, Z-up
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<DVec3>,
    pub normals: Vec<DVec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a vertex and returns its index
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.faces.push(Face::Triangle([a, b, c]));
    }

    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.faces.push(Face::Quad([a, b, c, d]));
    }

    pub fn bounds(&self) -> Option<AABB> {
        AABB::from_points(&self.vertices)
    }

    /// Recomputes per-vertex normals by accumulating area-weighted face normals
    pub fn compute_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.vertices.len()];

        for face in &self.faces {
            let corners = face.corners();
            let origin = self.vertices[corners[0] as usize];
            // Fan from the first corner; the cross product length carries the area weight
            let mut face_normal = DVec3::ZERO;
            for pair in corners[1..].windows(2) {
                let b = self.vertices[pair[0] as usize] - origin;
                let c = self.vertices[pair[1] as usize] - origin;
                face_normal += b.cross(c);
            }
            for &idx in corners {
                normals[idx as usize] += face_normal;
            }
        }

        self.normals = normals
            .into_iter()
            .map(|n| n.try_normalize().unwrap_or(DVec3::Z))
            .collect();
    }

    /// Applies an affine transform to positions and normals in place
    pub fn transform(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
        let normal_matrix = matrix.inverse().transpose();
        for n in &mut self.normals {
            *n = normal_matrix
                .transform_vector3(*n)
                .try_normalize()
                .unwrap_or(*n);
        }
    }

    pub fn translate(&mut self, offset: DVec3) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    pub fn triangle_indices(&self) -> Vec<u32> {
        self.faces.iter().flat_map(Face::triangulate).collect()
    }
}

/// A mesh tagged with the material key it renders with
#[derive(Clone, Debug, PartialEq)]
pub struct MeshGroup {
    pub mesh: Mesh,
    pub material_key: String,
}

/// Ordered mesh groups plus material keys in first-seen order.
///
/// Both orders feed directly into node and material indices of the exported file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub groups: Vec<MeshGroup>,
    pub material_keys: Vec<String>,
}

impl Scene {
    /// Appends a group, registering its material key if unseen
    pub fn push(&mut self, mesh: Mesh, material_key: &str) {
        if !self.material_keys.iter().any(|k| k == material_key) {
            self.material_keys.push(material_key.to_string());
        }
        self.groups.push(MeshGroup {
            mesh,
            material_key: material_key.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        let d = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
        mesh.add_quad(a, b, c, d);
        mesh
    }

    #[test]
    fn test_quad_splits_on_ac_diagonal() {
        let face = Face::Quad([4, 5, 6, 7]);
        assert_eq!(face.triangulate().collect::<Vec<_>>(), vec![4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_triangle_passes_through() {
        let face = Face::Triangle([2, 0, 1]);
        assert_eq!(face.triangulate().collect::<Vec<_>>(), vec![2, 0, 1]);
    }

    #[test]
    fn test_compute_normals_ccw_square_faces_up() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        for n in &mesh.normals {
            assert!((*n - DVec3::Z).length() < 1e-12);
        }
    }

    #[test]
    fn test_transform_rotates_normals() {
        let mut mesh = unit_square();
        mesh.compute_normals();
        mesh.transform(&DMat4::from_rotation_x(std::f64::consts::PI));
        for n in &mesh.normals {
            assert!((*n + DVec3::Z).length() < 1e-9);
        }
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut mesh = unit_square();
        mesh.translate(DVec3::new(10.0, 0.0, -5.0));
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.min, DVec3::new(10.0, 0.0, -5.0));
        assert_eq!(bounds.max, DVec3::new(11.0, 1.0, -5.0));
    }

    #[test]
    fn test_scene_push_dedups_material_keys() {
        let mut scene = Scene::default();
        scene.push(Mesh::new(), "canopy_black");
        scene.push(Mesh::new(), "cable_black");
        scene.push(Mesh::new(), "canopy_black");
        assert_eq!(scene.groups.len(), 3);
        assert_eq!(scene.material_keys, vec!["canopy_black", "cable_black"]);
    }
}
