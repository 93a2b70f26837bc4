//! Factory functions for creating test models.
//!
//! Used by the unit tests, the integration tests and the server route tests.

use shared::{GeneratedModel, ModelPart, ShapeType};

// ── Part factories ──────────────────────────────────────────────

/// Unit box at the origin.
pub fn unit_box_part(id: &str) -> ModelPart {
    ModelPart::new(id, ShapeType::Box, [0.0; 3])
}

/// Box at a position with a per-axis scale.
pub fn box_part_at(id: &str, position: [f64; 3], scale: [f64; 3]) -> ModelPart {
    ModelPart::new(id, ShapeType::Box, position).with_scale(scale)
}

pub fn sphere_part(id: &str, radius: f64) -> ModelPart {
    ModelPart::new(id, ShapeType::Sphere, [0.0; 3]).with_args(vec![radius])
}

pub fn cylinder_part(id: &str, radius: f64, height: f64) -> ModelPart {
    ModelPart::new(id, ShapeType::Cylinder, [0.0; 3]).with_args(vec![radius, radius, height])
}

pub fn cone_part(id: &str, radius: f64, height: f64) -> ModelPart {
    ModelPart::new(id, ShapeType::Cone, [0.0; 3]).with_args(vec![radius, height])
}

pub fn torus_part(id: &str, radius: f64, tube: f64) -> ModelPart {
    ModelPart::new(id, ShapeType::Torus, [0.0; 3]).with_args(vec![radius, tube])
}

pub fn icosahedron_part(id: &str, radius: f64) -> ModelPart {
    ModelPart::new(id, ShapeType::Icosahedron, [0.0; 3]).with_args(vec![radius])
}

// ── Model factories ─────────────────────────────────────────────

pub fn model_of(name: &str, parts: Vec<ModelPart>) -> GeneratedModel {
    GeneratedModel::new(name, parts)
}

/// Model with no parts; every exporter refuses it.
pub fn empty_model() -> GeneratedModel {
    GeneratedModel::new("Empty", vec![])
}

/// A single unit box (12 triangles).
pub fn single_box_model() -> GeneratedModel {
    GeneratedModel::new("Cube", vec![unit_box_part("cube")])
}

/// One part of every shape, spread along X.
pub fn all_shapes_model() -> GeneratedModel {
    let parts = vec![
        unit_box_part("box"),
        sphere_part("sphere", 0.5),
        cylinder_part("cylinder", 0.5, 1.0),
        cone_part("cone", 0.5, 1.0),
        torus_part("torus", 0.5, 0.1),
        icosahedron_part("icosahedron", 0.5),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, mut part)| {
        part.position = [i as f64 * 2.0, 0.0, 0.0];
        part
    })
    .collect();

    GeneratedModel::new("All Shapes", parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factories_are_valid() {
        assert!(empty_model().is_empty());
        assert_eq!(single_box_model().validate(), Ok(()));
        assert_eq!(all_shapes_model().validate(), Ok(()));
    }

    #[test]
    fn test_all_shapes_covers_catalog() {
        let model = all_shapes_model();
        let shapes: Vec<ShapeType> = model.parts.iter().map(|p| p.shape).collect();
        assert_eq!(shapes, ShapeType::ALL);
        assert_eq!(model.parts[3].position, [6.0, 0.0, 0.0]);
    }

    #[test]
    fn test_box_part_at() {
        let part = box_part_at("b", [1.0, 2.0, 3.0], [0.5, 0.5, 0.5]);
        assert_eq!(part.position, [1.0, 2.0, 3.0]);
        assert_eq!(part.scale, Some([0.5, 0.5, 0.5]));
    }
}
