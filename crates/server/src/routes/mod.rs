use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use objstudio_mesh::{export_model, save_export, Export, ExportError, ExportFormat};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared::{detect_label, GeneratedModel};

use crate::ai::{self, Source, TextGenerator};
use crate::AppState;

/// Confidence reported for every filename detection
pub const DETECTION_CONFIDENCE: f64 = 0.99;

// ── Errors ──────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Io(_) => ApiError::internal(err.to_string()),
            ExportError::EmptyModel
            | ExportError::UnknownFormat(_)
            | ExportError::InvalidFilename(_)
            | ExportError::Schema(_)
            | ExportError::Json(_) => ApiError::bad_request(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

// ── Payloads ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct Failure {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub model: GeneratedModel,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<Failure>,
}

#[derive(Debug, Deserialize)]
pub struct DetectRequest {
    pub filename: String,
}

/// Detection record for an uploaded image
#[derive(Debug, Serialize)]
pub struct DetectedObject {
    pub id: String,
    pub label: &'static str,
    pub confidence: f64,
}

// ── Handlers ────────────────────────────────────────────────────

/// Health check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Description -> model. Template, generation or fallback; the result becomes current.
pub async fn generate<G: TextGenerator>(
    State(state): State<AppState<G>>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(ApiError::bad_request("description must not be empty"));
    }

    let Ok(_gate) = state.generation_gate.try_lock() else {
        return Err(ApiError::conflict("A generation is already in progress"));
    };

    let generation = ai::resolve_model(
        state.generator.as_ref(),
        description,
        state.config.generation_timeout,
    )
    .await;

    state.set_current_model(generation.model.clone()).await;

    Ok(Json(GenerateResponse {
        model: generation.model,
        source: generation.source,
        failure: generation.failure.map(|e| Failure {
            kind: e.kind(),
            message: e.to_string(),
        }),
    }))
}

/// Filename -> detection record
pub async fn detect(Json(request): Json<DetectRequest>) -> Json<DetectedObject> {
    let label = detect_label(&request.filename);
    tracing::info!("Detected '{}' from {}", label, request.filename);
    Json(DetectedObject {
        id: uuid::Uuid::new_v4().to_string(),
        label,
        confidence: DETECTION_CONFIDENCE,
    })
}

/// The current model
pub async fn current_model<G: TextGenerator>(
    State(state): State<AppState<G>>,
) -> Result<Json<GeneratedModel>, ApiError> {
    let model = state
        .current_model()
        .await
        .ok_or_else(|| ApiError::not_found("No model loaded"))?;
    Ok(Json(model.as_ref().clone()))
}

/// Normalized copy of the posted model
pub async fn normalize(Json(model): Json<GeneratedModel>) -> Result<Json<GeneratedModel>, ApiError> {
    model
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(Json(model.normalized()))
}

async fn export_current<G: TextGenerator>(
    state: &AppState<G>,
    format: &str,
) -> Result<Export, ApiError> {
    let format: ExportFormat = format.parse()?;
    let model = state
        .current_model()
        .await
        .ok_or_else(|| ApiError::not_found(ExportError::EmptyModel.to_string()))?;

    tokio::task::spawn_blocking(move || export_model(&model, format))
        .await
        .map_err(|e| ApiError::internal(format!("export task failed: {e}")))?
        .map_err(ApiError::from)
}

/// Current model as a downloadable file
pub async fn export<G: TextGenerator>(
    State(state): State<AppState<G>>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let export = export_current(&state, &format).await?;

    let headers = [
        (header::CONTENT_TYPE, export.mime_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];
    Ok((headers, export.bytes).into_response())
}

/// Write the current model's export into the configured export directory
pub async fn save<G: TextGenerator>(
    State(state): State<AppState<G>>,
    Path(format): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let export = export_current(&state, &format).await?;
    let dir = state.config.export_dir.clone();

    let path = tokio::task::spawn_blocking(move || save_export(&dir, &export))
        .await
        .map_err(|e| ApiError::internal(format!("save task failed: {e}")))??;

    Ok(Json(json!({ "path": path.display().to_string() })))
}
