use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub mod catalog;
pub mod detect;
pub mod normalize;
pub mod templates;

pub use catalog::{Shape, ShapeType, Tessellation};
pub use detect::{detect_label, DEFAULT_LABEL, LABELS};
pub use normalize::{normalization_factor, TARGET_SIZE};
pub use templates::{template_for, template_keywords, Template, TEMPLATES};

/// Уникальный идентификатор детали внутри модели
pub type PartId = String;

/// Цвет по умолчанию (нейтральный серый)
pub const DEFAULT_COLOR: &str = "#cccccc";

pub const DEFAULT_ROTATION: [f64; 3] = [0.0, 0.0, 0.0];
pub const DEFAULT_SCALE: [f64; 3] = [1.0, 1.0, 1.0];

/// Деталь модели — один примитив с размещением и размерами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPart {
    pub id: PartId,
    #[serde(rename = "type")]
    pub shape: ShapeType,
    pub position: [f64; 3],
    /// Углы в радианах по осям X, Y, Z
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f64; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<[f64; 3]>,
    /// Параметры размера, зависящие от типа примитива
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelPart {
    /// Деталь только с типом и позицией — единичный примитив с материалом по умолчанию
    pub fn new(id: impl Into<PartId>, shape: ShapeType, position: [f64; 3]) -> Self {
        Self {
            id: id.into(),
            shape,
            position,
            rotation: None,
            scale: None,
            args: None,
            color: None,
            description: None,
        }
    }

    pub fn with_rotation(mut self, rotation: [f64; 3]) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_scale(mut self, scale: [f64; 3]) -> Self {
        self.scale = Some(scale);
        self
    }

    pub fn with_args(mut self, args: impl Into<Vec<f64>>) -> Self {
        self.args = Some(args.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn rotation_or_default(&self) -> [f64; 3] {
        self.rotation.unwrap_or(DEFAULT_ROTATION)
    }

    pub fn scale_or_default(&self) -> [f64; 3] {
        self.scale.unwrap_or(DEFAULT_SCALE)
    }

    pub fn args_or_empty(&self) -> &[f64] {
        self.args.as_deref().unwrap_or(&[])
    }

    pub fn color_or_default(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_COLOR)
    }

    /// Конкретная геометрия детали с подставленными значениями по умолчанию
    pub fn resolved_shape(&self) -> Shape {
        self.shape.resolve(self.args_or_empty())
    }
}

/// Сгенерированная модель — именованный упорядоченный набор деталей
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedModel {
    pub name: String,
    /// Порядок деталей — порядок отрисовки и анимации
    pub parts: Vec<ModelPart>,
}

/// Нарушение схемы модели
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    #[error("model has no parts")]
    NoParts,
    #[error("part #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate part id '{0}'")]
    DuplicateId(PartId),
    #[error("part '{id}' has a non-finite {field}")]
    NonFinite { id: PartId, field: &'static str },
}

impl GeneratedModel {
    pub fn new(name: impl Into<String>, parts: Vec<ModelPart>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn part(&self, id: &str) -> Option<&ModelPart> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Проверить модель: хотя бы одна деталь, уникальные непустые id, конечные числа
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if self.parts.is_empty() {
            return Err(SchemaViolation::NoParts);
        }

        let mut seen = HashSet::new();
        for (index, part) in self.parts.iter().enumerate() {
            if part.id.trim().is_empty() {
                return Err(SchemaViolation::EmptyId { index });
            }
            if !seen.insert(part.id.as_str()) {
                return Err(SchemaViolation::DuplicateId(part.id.clone()));
            }

            let fields: [(&'static str, &[f64]); 4] = [
                ("position", &part.position[..]),
                ("rotation", part.rotation.as_ref().map_or(&[][..], |r| &r[..])),
                ("scale", part.scale.as_ref().map_or(&[][..], |s| &s[..])),
                ("args", part.args_or_empty()),
            ];
            for (field, values) in fields {
                if values.iter().any(|v| !v.is_finite()) {
                    return Err(SchemaViolation::NonFinite {
                        id: part.id.clone(),
                        field,
                    });
                }
            }
        }
        Ok(())
    }
}
