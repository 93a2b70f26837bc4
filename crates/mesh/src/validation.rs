//! Mesh validation utilities.
//!
//! `MeshValidator` checks extracted meshes before they are written out:
//! index stride, in-range indices, finite positions, unit facet normals, bounds.

use crate::geometry::TriMesh;

/// Validator for `TriMesh` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a TriMesh,
}

impl<'a> MeshValidator<'a> {
    /// Create a new validator for the given mesh.
    pub fn new(mesh: &'a TriMesh) -> Self {
        Self { mesh }
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// Index buffer (or the position list when non-indexed) is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        match &self.mesh.indices {
            Some(indices) => indices.len() % 3 == 0,
            None => self.mesh.positions.len() % 3 == 0,
        }
    }

    /// Check that all indices are within the valid vertex range.
    pub fn are_indices_in_range(&self) -> bool {
        let max_idx = self.vertex_count() as u32;
        match &self.mesh.indices {
            Some(indices) => indices.iter().all(|&i| i < max_idx),
            None => true,
        }
    }

    pub fn are_positions_finite(&self) -> bool {
        self.mesh.positions.iter().all(|p| p.is_finite())
    }

    /// Check that every facet normal has unit length (within epsilon).
    pub fn are_normals_normalized(&self, epsilon: f64) -> bool {
        self.mesh
            .facets()
            .iter()
            .all(|f| (f.normal.length() - 1.0).abs() <= epsilon)
    }

    /// Number of triangles dropped as degenerate.
    pub fn degenerate_count(&self) -> usize {
        self.triangle_count() - self.mesh.facets().len()
    }

    /// Dimensions (width, height, depth) of the bounding box; zero for an empty mesh.
    pub fn dimensions(&self) -> [f64; 3] {
        match self.mesh.bounds() {
            Some((min, max)) => (max - min).to_array(),
            None => [0.0; 3],
        }
    }

    /// Check that the bounding box dimensions are approximately equal to `expected`.
    pub fn assert_dimensions_approx(&self, expected: [f64; 3], tolerance: f64) -> bool {
        let dims = self.dimensions();
        (0..3).all(|i| (dims[i] - expected[i]).abs() < tolerance)
    }

    /// Run all validation checks and return a list of error messages.
    /// An empty list means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_index_stride_valid() {
            errors.push(format!(
                "Index buffer length is not a multiple of 3 ({} triangles, {} vertices)",
                self.triangle_count(),
                self.vertex_count()
            ));
        }

        if !self.are_indices_in_range() {
            let max_idx = self.vertex_count() as u32;
            let out_of_range: Vec<_> = self
                .mesh
                .indices
                .iter()
                .flatten()
                .filter(|&&i| i >= max_idx)
                .take(5)
                .collect();
            errors.push(format!(
                "Indices out of range (vertex_count={}): {:?}",
                max_idx, out_of_range
            ));
        }

        if !self.are_positions_finite() {
            errors.push("Some positions are not finite".to_string());
        }

        if !self.are_normals_normalized(1e-6) {
            errors.push("Some facet normals are not unit-length (epsilon=1e-6)".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::geometry;

    fn simple_triangle() -> TriMesh {
        TriMesh::indexed(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![0, 1, 2])
    }

    #[test]
    fn test_counts() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.vertex_count(), 3);
        assert_eq!(v.triangle_count(), 1);
        assert_eq!(v.degenerate_count(), 0);
    }

    #[test]
    fn test_indices_out_of_range() {
        let bad = TriMesh::indexed(vec![DVec3::ZERO], vec![0, 1, 2]);
        let v = MeshValidator::new(&bad);
        assert!(!v.are_indices_in_range());
        let errors = v.validate_all();
        assert!(errors.iter().any(|e| e.contains("out of range")));
    }

    #[test]
    fn test_bad_stride() {
        let bad = TriMesh::indexed(vec![DVec3::ZERO, DVec3::X, DVec3::Y], vec![0, 1]);
        let v = MeshValidator::new(&bad);
        assert!(!v.is_index_stride_valid());
        assert!(v.validate_all().iter().any(|e| e.contains("multiple of 3")));
    }

    #[test]
    fn test_non_finite_position() {
        let bad = TriMesh::non_indexed(vec![DVec3::ZERO, DVec3::X, DVec3::new(f64::NAN, 0.0, 0.0)]);
        let v = MeshValidator::new(&bad);
        assert!(!v.are_positions_finite());
        assert_eq!(v.degenerate_count(), 1);
    }

    #[test]
    fn test_dimensions() {
        let mesh = simple_triangle();
        let v = MeshValidator::new(&mesh);
        assert!(v.assert_dimensions_approx([1.0, 1.0, 0.0], 1e-9));
        assert!(!v.assert_dimensions_approx([2.0, 1.0, 0.0], 1e-9));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = TriMesh::default();
        let v = MeshValidator::new(&mesh);
        assert_eq!(v.dimensions(), [0.0; 3]);
        assert!(v.validate_all().is_empty());
    }

    #[test]
    fn test_primitives_are_valid() {
        let meshes = [
            geometry::unit_box(),
            geometry::sphere(1.0, 32, 16),
            geometry::cylinder(1.0, 0.5, 2.0, 32),
            geometry::cone(1.0, 1.0, 32),
            geometry::torus(1.0, 0.4, 32, 24),
            geometry::icosahedron(1.0),
        ];
        for mesh in &meshes {
            let errors = MeshValidator::new(mesh).validate_all();
            assert!(errors.is_empty(), "Expected no errors, got: {:?}", errors);
        }
    }
}
