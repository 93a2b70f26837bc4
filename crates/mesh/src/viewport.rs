//! Render buffers for the interactive viewer.
//!
//! Same extraction as the exporters, at the finer viewport tessellation,
//! flattened into f32 vertex/index buffers ready for upload.

use serde::Serialize;
use shared::{GeneratedModel, Tessellation};

use crate::extraction::{extract_model, model_bounds};

/// Render buffers of one part.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportPart {
    pub id: String,
    /// `[x, y, z]` per vertex
    pub positions: Vec<f32>,
    /// Three indices per triangle
    pub indices: Vec<u32>,
}

/// Render buffers of a whole model plus its bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportMesh {
    pub parts: Vec<ViewportPart>,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl ViewportMesh {
    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.indices.len() / 3).sum()
    }
}

/// Build viewer buffers for a model. An empty model yields no parts and zero bounds.
pub fn viewport_mesh(model: &GeneratedModel) -> ViewportMesh {
    let meshes = extract_model(model, &Tessellation::VIEWPORT);
    let (min, max) = model_bounds(&meshes)
        .map(|(min, max)| (min.as_vec3().to_array(), max.as_vec3().to_array()))
        .unwrap_or_default();

    let parts = meshes
        .into_iter()
        .map(|part| ViewportPart {
            positions: part
                .mesh
                .positions
                .iter()
                .flat_map(|p| p.as_vec3().to_array())
                .collect(),
            indices: part.mesh.faces().into_iter().flatten().collect(),
            id: part.id,
        })
        .collect();

    let mesh = ViewportMesh { parts, min, max };
    tracing::debug!(
        "viewport mesh for '{}': {} parts, {} tris",
        model.name,
        mesh.parts.len(),
        mesh.triangle_count()
    );
    mesh
}
