//! Generative adapter: description -> model via a text-generation service.
//!
//! `generate_model` is the explicit-result form. `resolve_model` is the policy the
//! HTTP layer uses: template first, then generation, and on any failure the fixed
//! fallback model with the failure reason attached.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;
use serde_json::error::Category;
use shared::{template_for, GeneratedModel, ModelPart, ShapeType};
use thiserror::Error;

mod gemini;
#[cfg(test)]
pub(crate) mod stub;

pub use gemini::GeminiClient;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("GEMINI_API_KEY not set")]
    MissingCredentials,
    #[error("network failure: {0}")]
    Network(String),
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("unparseable response: {0}")]
    Parse(String),
    #[error("response does not describe a valid model: {0}")]
    Schema(String),
}

impl GenerationError {
    /// Stable machine-readable tag for API responses
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::MissingCredentials => "missing_credentials",
            GenerationError::Network(_) => "network",
            GenerationError::Timeout(_) => "timeout",
            GenerationError::Service { .. } => "service",
            GenerationError::Parse(_) => "parse",
            GenerationError::Schema(_) => "schema",
        }
    }
}

/// The network seam: anything that turns a prompt into response text.
pub trait TextGenerator: Send + Sync + 'static {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Where a resolved model came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Template,
    Generated,
    Fallback,
}

/// Outcome of `resolve_model`. The model is always normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub model: GeneratedModel,
    pub source: Source,
    pub failure: Option<GenerationError>,
}

const PROMPT_RULES: &str = r##"
Rules:
- Return ONLY JSON, no prose and no code fences
- Use only these primitive types: cylinder, box, torus, sphere
- Keep proportions realistic
- Parts must connect
- Center model at origin
- Y axis is UP
- Rotations are in radians

JSON shape:
{
  "name": "string",
  "parts": [
    {
      "id": "unique string",
      "type": "cylinder | box | torus | sphere",
      "position": [x, y, z],
      "rotation": [x, y, z],
      "scale": [x, y, z],
      "args": [numbers],
      "color": "#rrggbb",
      "description": "string"
    }
  ]
}

args per type:
- box: [] (size comes from scale)
- sphere: [radius]
- cylinder: [radiusTop, radiusBottom, height, radialSegments]
- torus: [radius, tube, radialSegments, tubularSegments]
"##;

/// Instruction text sent to the generative service.
pub fn build_prompt(description: &str) -> String {
    format!(
        "Create a clean 3D model using primitives.\n\nObject: {}\n{}",
        description.trim(),
        PROMPT_RULES
    )
}

/// Extract and validate a model from free-form response text.
///
/// Everything outside the first `{` and the last `}` is ignored.
pub fn parse_response(text: &str) -> Result<GeneratedModel, GenerationError> {
    let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) else {
        return Err(GenerationError::Parse("No JSON found in response".to_string()));
    };
    if last < first {
        return Err(GenerationError::Parse("No JSON found in response".to_string()));
    }

    let model: GeneratedModel =
        serde_json::from_str(&text[first..=last]).map_err(|e| match e.classify() {
            Category::Data => GenerationError::Schema(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => GenerationError::Parse(e.to_string()),
        })?;

    model
        .validate()
        .map_err(|e| GenerationError::Schema(e.to_string()))?;
    Ok(model)
}

/// Ask the generator for a model. The result is not normalized.
pub async fn generate_model<G: TextGenerator>(
    generator: &G,
    description: &str,
    timeout: Duration,
) -> Result<GeneratedModel, GenerationError> {
    let prompt = build_prompt(description);
    let text = tokio::time::timeout(timeout, generator.generate(&prompt))
        .await
        .map_err(|_| GenerationError::Timeout(timeout))??;
    parse_response(&text)
}

/// Fixed safe model served whenever generation fails.
pub fn fallback_model() -> GeneratedModel {
    GeneratedModel::new(
        "fallback",
        vec![
            ModelPart::new("body", ShapeType::Cylinder, [0.0, 0.0, 0.0])
                .with_rotation([0.0, 0.0, 0.0])
                .with_args(vec![1.0, 1.0, 2.0, 32.0])
                .with_scale([1.0, 1.0, 1.0])
                .with_color("#ff8800")
                .with_description("fallback body"),
            ModelPart::new("handle", ShapeType::Torus, [1.2, 0.3, 0.0])
                .with_rotation([0.0, 0.0, 0.0])
                .with_args(vec![0.8, 0.2, 16.0, 100.0])
                .with_scale([1.0, 1.0, 1.0])
                .with_color("#ff8800")
                .with_description("fallback handle"),
        ],
    )
}

/// Template, else generation, else fallback. Never fails; no retries.
pub async fn resolve_model<G: TextGenerator>(
    generator: &G,
    description: &str,
    timeout: Duration,
) -> Generation {
    tracing::info!("Generating model for: {}", description);

    if let Some(model) = template_for(description) {
        tracing::info!("Using template model '{}'", model.name);
        return Generation {
            model: model.normalized(),
            source: Source::Template,
            failure: None,
        };
    }

    match generate_model(generator, description, timeout).await {
        Ok(model) => {
            tracing::info!("Generated model '{}' ({} parts)", model.name, model.parts.len());
            Generation {
                model: model.normalized(),
                source: Source::Generated,
                failure: None,
            }
        }
        Err(e) => {
            tracing::warn!("Generation failed, using fallback: {}", e);
            Generation {
                model: fallback_model().normalized(),
                source: Source::Fallback,
                failure: Some(e),
            }
        }
    }
}
