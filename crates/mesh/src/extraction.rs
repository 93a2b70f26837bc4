//! Mesh extraction: model parts -> world-space triangle meshes.
//!
//! This is the single geometry routine behind every mesh exporter.

use glam::{DMat3, DMat4, DVec3};
use shared::{GeneratedModel, ModelPart, Tessellation};

use crate::geometry::{self, TriMesh};

/// World-space mesh of one part.
#[derive(Debug, Clone, PartialEq)]
pub struct PartMesh {
    pub id: String,
    pub mesh: TriMesh,
}

/// Rotation matrix for per-axis Euler angles, applied X, then Y, then Z about
/// the rotating (intrinsic) axes. Matches the viewer's "XYZ" Euler order.
pub fn rotation_matrix(rotation: [f64; 3]) -> DMat3 {
    let [rx, ry, rz] = rotation;
    DMat3::from_rotation_x(rx) * DMat3::from_rotation_y(ry) * DMat3::from_rotation_z(rz)
}

/// Model-space transform of a part: scale, then rotation, then translation.
pub fn part_transform(part: &ModelPart) -> DMat4 {
    DMat4::from_translation(DVec3::from_array(part.position))
        * DMat4::from_mat3(rotation_matrix(part.rotation_or_default()))
        * DMat4::from_scale(DVec3::from_array(part.scale_or_default()))
}

/// Build the world-space mesh for a single part.
pub fn extract_part(part: &ModelPart, tessellation: &Tessellation) -> TriMesh {
    let shape = part.resolved_shape();
    let transform = part_transform(part);
    let mesh = geometry::build(&shape, tessellation).map_positions(|p| transform.transform_point3(p));

    tracing::debug!(
        "extract_part '{}' ({}): {} vertices, {} tris",
        part.id,
        part.shape,
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    mesh
}

/// Build world-space meshes for every part, in model order.
pub fn extract_model(model: &GeneratedModel, tessellation: &Tessellation) -> Vec<PartMesh> {
    model
        .parts
        .iter()
        .map(|part| PartMesh {
            id: part.id.clone(),
            mesh: extract_part(part, tessellation),
        })
        .collect()
}

/// Axis-aligned bounds of a whole extracted model.
pub fn model_bounds(meshes: &[PartMesh]) -> Option<(DVec3, DVec3)> {
    meshes
        .iter()
        .filter_map(|m| m.mesh.bounds())
        .reduce(|(amin, amax), (bmin, bmax)| (amin.min(bmin), amax.max(bmax)))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use shared::ShapeType;

    use super::*;

    const EPS: f64 = 1e-9;

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).abs().max_element() < EPS
    }

    #[test]
    fn test_identity_transform_for_minimal_part() {
        let part = ModelPart::new("b", ShapeType::Box, [0.0, 0.0, 0.0]);
        assert_eq!(part_transform(&part), DMat4::IDENTITY);
    }

    #[test]
    fn test_scale_then_translate() {
        let part = ModelPart::new("b", ShapeType::Box, [1.0, 2.0, 3.0]).with_scale([2.0, 4.0, 6.0]);
        let mesh = extract_part(&part, &Tessellation::EXPORT);
        let (min, max) = mesh.bounds().unwrap();

        assert!(approx(min, DVec3::new(0.0, 0.0, 0.0)));
        assert!(approx(max, DVec3::new(2.0, 4.0, 6.0)));
    }

    #[test]
    fn test_rotation_order_is_intrinsic_xyz() {
        let part = ModelPart::new("b", ShapeType::Box, [0.0; 3]).with_rotation([FRAC_PI_2, FRAC_PI_2, 0.0]);
        let m = part_transform(&part);

        // Rx · Ry: +X -> -Z (Ry) -> +Y (Rx)
        assert!(approx(m.transform_point3(DVec3::X), DVec3::Y));
        // the extrinsic order would give -Z instead
        assert!(!approx(m.transform_point3(DVec3::X), DVec3::NEG_Z));
    }

    #[test]
    fn test_rotation_applied_after_scale() {
        let part = ModelPart::new("b", ShapeType::Box, [0.0; 3])
            .with_scale([2.0, 1.0, 1.0])
            .with_rotation([0.0, 0.0, FRAC_PI_2]);
        let m = part_transform(&part);

        // scaled along X first, then rotated onto Y
        assert!(approx(m.transform_point3(DVec3::X), DVec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_torus_rotated_upright() {
        let part = ModelPart::new("rim", ShapeType::Torus, [0.0, 1.0, 0.0])
            .with_rotation([FRAC_PI_2, 0.0, 0.0])
            .with_args(vec![1.0, 0.1]);
        let mesh = extract_part(&part, &Tessellation::EXPORT);
        let (min, max) = mesh.bounds().unwrap();

        // ring now lies in the XZ plane at y = 1
        assert!((max.y - 1.1).abs() < 1e-6);
        assert!((min.y - 0.9).abs() < 1e-6);
        assert!((max.z - 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_extract_model_preserves_order() {
        let model = GeneratedModel::new(
            "m",
            vec![
                ModelPart::new("first", ShapeType::Sphere, [0.0; 3]),
                ModelPart::new("second", ShapeType::Icosahedron, [5.0, 0.0, 0.0]),
            ],
        );
        let meshes = extract_model(&model, &Tessellation::EXPORT);
        let ids: Vec<&str> = meshes.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);

        let (min, max) = model_bounds(&meshes).unwrap();
        assert!((min.x + 1.0).abs() < 1e-6);
        // icosahedron corners (±t, 0, ±1) normalized
        let t = (1.0 + 5.0_f64.sqrt()) / 2.0;
        assert!((max.x - (5.0 + t / (1.0 + t * t).sqrt())).abs() < 1e-6);
    }
}
