//! Model export: ASCII STL, OBJ, box-proxy OBJ and the `.part` project file.
//!
//! Every exporter refuses an empty model. File writing is all-or-nothing:
//! `save_export` writes a temporary file next to the target and renames it.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use shared::{GeneratedModel, SchemaViolation, Tessellation};
use thiserror::Error;

use crate::extraction::extract_model;

/// File name used when a model has no usable name
pub const UNTITLED_NAME: &str = "untitled_model";

#[derive(Debug, Error)]
pub enum ExportError {
    /// User-visible: nothing to export
    #[error("No model to export")]
    EmptyModel,
    #[error("Unknown export format '{0}'")]
    UnknownFormat(String),
    #[error("Invalid export file name '{0}'")]
    InvalidFilename(String),
    #[error("Invalid model: {0}")]
    Schema(#[from] SchemaViolation),
    #[error("Failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize model: {0}")]
    Json(#[from] serde_json::Error),
}

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// ASCII STL with true primitive geometry
    Stl,
    /// Wavefront OBJ with true primitive geometry
    Obj,
    /// OBJ where every part is approximated by its `position ± scale` box
    ObjBoxProxy,
    /// Pretty-printed JSON project file
    Part,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Stl,
        ExportFormat::Obj,
        ExportFormat::ObjBoxProxy,
        ExportFormat::Part,
    ];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Obj | ExportFormat::ObjBoxProxy => "obj",
            ExportFormat::Part => "part",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Stl => "model/stl",
            ExportFormat::Obj | ExportFormat::ObjBoxProxy => "model/obj",
            ExportFormat::Part => "application/json",
        }
    }

    /// Identifier used in URLs and `FromStr`
    pub fn id(&self) -> &'static str {
        match self {
            ExportFormat::Stl => "stl",
            ExportFormat::Obj => "obj",
            ExportFormat::ObjBoxProxy => "obj-box",
            ExportFormat::Part => "part",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.id() == id)
            .ok_or_else(|| ExportError::UnknownFormat(s.to_string()))
    }
}

/// A finished export: file name, content type and content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// File-system safe model name: a single path component.
///
/// Whitespace runs become one `_`, any other character outside
/// `[A-Za-z0-9._-]` becomes `_`, and leading dots are dropped.
pub fn sanitize_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
            out.push(c);
        } else {
            out.push('_');
        }
    }

    let trimmed = out.trim_start_matches('.');
    if name.trim().is_empty() || trimmed.is_empty() {
        UNTITLED_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Part id as a single OBJ token: control characters become `_`.
fn obj_token(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect()
}

fn ensure_not_empty(model: &GeneratedModel) -> Result<(), ExportError> {
    if model.is_empty() {
        tracing::warn!("export refused: model '{}' has no parts", model.name);
        return Err(ExportError::EmptyModel);
    }
    Ok(())
}

/// Export a model in the given format.
pub fn export_model(model: &GeneratedModel, format: ExportFormat) -> Result<Export, ExportError> {
    let content = match format {
        ExportFormat::Stl => to_ascii_stl(model)?,
        ExportFormat::Obj => to_obj(model)?,
        ExportFormat::ObjBoxProxy => to_obj_box_proxy(model)?,
        ExportFormat::Part => to_part_json(model)?,
    };

    let filename = format!("{}.{}", sanitize_name(&model.name), format.extension());
    tracing::info!("Exported '{}' as {} ({} bytes)", model.name, format, content.len());

    Ok(Export {
        filename,
        mime_type: format.mime_type(),
        bytes: content.into_bytes(),
    })
}

/// ASCII STL of the true primitive geometry, one facet per non-degenerate triangle.
pub fn to_ascii_stl(model: &GeneratedModel) -> Result<String, ExportError> {
    ensure_not_empty(model)?;

    let name = sanitize_name(&model.name);
    let mut out = String::new();
    out.push_str(&format!("solid {}\n", name));

    for part in extract_model(model, &Tessellation::EXPORT) {
        for facet in part.mesh.facets() {
            let n = facet.normal;
            out.push_str(&format!("facet normal {:e} {:e} {:e}\n", n.x, n.y, n.z));
            out.push_str("outer loop\n");
            for v in facet.vertices {
                out.push_str(&format!("vertex {:e} {:e} {:e}\n", v.x, v.y, v.z));
            }
            out.push_str("endloop\n");
            out.push_str("endfacet\n");
        }
    }

    out.push_str(&format!("endsolid {}\n", name));
    Ok(out)
}

/// OBJ of the true primitive geometry. One object per part, triangle faces,
/// 1-based indices with a running vertex offset.
pub fn to_obj(model: &GeneratedModel) -> Result<String, ExportError> {
    ensure_not_empty(model)?;

    let mut out = String::new();
    out.push_str(&format!("# {}\n", sanitize_name(&model.name)));
    let mut offset = 1u32;

    for part in extract_model(model, &Tessellation::EXPORT) {
        out.push_str(&format!("o {}\n", obj_token(&part.id)));
        for p in &part.mesh.positions {
            out.push_str(&format!("v {} {} {}\n", p.x, p.y, p.z));
        }
        for face in part.mesh.faces() {
            // degenerate faces are skipped, as in STL
            if part.mesh.facet(face).is_none() {
                continue;
            }
            out.push_str(&format!(
                "f {} {} {}\n",
                face[0] + offset,
                face[1] + offset,
                face[2] + offset
            ));
        }
        offset += part.mesh.vertex_count() as u32;
    }

    Ok(out)
}

/// Box-proxy OBJ: each part becomes the axis-aligned box `position ± scale`
/// with 6 quad faces.
pub fn to_obj_box_proxy(model: &GeneratedModel) -> Result<String, ExportError> {
    ensure_not_empty(model)?;

    let mut out = String::new();
    let mut o = 1u32;

    for part in &model.parts {
        let [x, y, z] = part.position;
        let [sx, sy, sz] = part.scale_or_default();

        let corners = [
            [x - sx, y - sy, z - sz],
            [x + sx, y - sy, z - sz],
            [x + sx, y + sy, z - sz],
            [x - sx, y + sy, z - sz],
            [x - sx, y - sy, z + sz],
            [x + sx, y - sy, z + sz],
            [x + sx, y + sy, z + sz],
            [x - sx, y + sy, z + sz],
        ];
        for [vx, vy, vz] in corners {
            out.push_str(&format!("v {} {} {}\n", vx, vy, vz));
        }

        let quads = [
            [o, o + 1, o + 2, o + 3],
            [o + 4, o + 5, o + 6, o + 7],
            [o, o + 1, o + 5, o + 4],
            [o + 2, o + 3, o + 7, o + 6],
            [o + 1, o + 2, o + 6, o + 5],
            [o, o + 3, o + 7, o + 4],
        ];
        for [a, b, c, d] in quads {
            out.push_str(&format!("f {} {} {} {}\n", a, b, c, d));
        }

        o += 8;
    }

    Ok(out)
}

/// `.part` project file: pretty-printed JSON of the model.
pub fn to_part_json(model: &GeneratedModel) -> Result<String, ExportError> {
    ensure_not_empty(model)?;
    Ok(serde_json::to_string_pretty(model)?)
}

/// Read a `.part` project file back.
pub fn from_part_json(json: &str) -> Result<GeneratedModel, ExportError> {
    let model: GeneratedModel = serde_json::from_str(json)?;
    model.validate()?;
    Ok(model)
}

/// Write an export into `dir`, creating it if needed. Returns the final path.
///
/// `export.filename` must be a single plain file name. The content goes to a temporary file in the same directory first and is then
/// renamed over the target, so the target either has the full content or is
/// left untouched.
pub fn save_export(dir: &Path, export: &Export) -> Result<PathBuf, ExportError> {
    let mut components = Path::new(&export.filename).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        tracing::warn!("export refused: unsafe file name '{}'", export.filename);
        return Err(ExportError::InvalidFilename(export.filename.clone()));
    }

    std::fs::create_dir_all(dir)?;

    let path = dir.join(&export.filename);
    let tmp = dir.join(format!(".{}.tmp", export.filename));

    if let Err(e) = std::fs::write(&tmp, &export.bytes) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    if let Err(e) = std::fs::rename(&tmp, &path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::info!("Saved export to {}", path.display());
    Ok(path)
}
