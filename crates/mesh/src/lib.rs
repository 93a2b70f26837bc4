//! Mesh extraction and file export for generated models.
//!
//! `extraction` turns model parts into world-space triangle meshes; `export`
//! writes them as ASCII STL or OBJ, or saves the model itself as a `.part` file. `viewport` flattens the
//! same meshes into render buffers for the viewer.

pub mod export;
pub mod extraction;
pub mod fixtures;
pub mod geometry;
pub mod validation;
pub mod viewport;

pub use export::{
    export_model, from_part_json, sanitize_name, save_export, to_ascii_stl, to_obj,
    to_obj_box_proxy, to_part_json, Export, ExportError, ExportFormat, UNTITLED_NAME,
};
pub use extraction::{extract_model, extract_part, model_bounds, part_transform, PartMesh};
pub use geometry::{Facet, TriMesh};
pub use validation::MeshValidator;
pub use viewport::{viewport_mesh, ViewportMesh, ViewportPart};
