use wasm_bindgen::prelude::*;

use objstudio_mesh::{export_model, sanitize_name, viewport_mesh, ExportError, ExportFormat};
use shared::{template_for, GeneratedModel};

/// Читает модель из JSON
fn parse_model(model_json: &str) -> Result<GeneratedModel, JsError> {
    serde_json::from_str(model_json).map_err(|e| JsError::new(&e.to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Экспорт в текстовый формат; пустая модель — ошибка "No model to export"
fn export_text(model_json: &str, format: ExportFormat) -> Result<String, JsError> {
    let model = parse_model(model_json)?;
    let export = export_model(&model, format).map_err(|e| JsError::new(&e.to_string()))?;
    String::from_utf8(export.bytes).map_err(|e| JsError::new(&e.to_string()))
}

/// Нормализованный шаблон для описания или `undefined`, если шаблона нет
#[wasm_bindgen]
pub fn template_model(description: &str) -> Result<Option<String>, JsError> {
    template_for(description)
        .map(|model| to_json(&model.normalized()))
        .transpose()
}

/// Нормализует модель к целевому размеру
#[wasm_bindgen]
pub fn normalize_model(model_json: &str) -> Result<String, JsError> {
    let model = parse_model(model_json)?;
    model.validate().map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&model.normalized())
}

/// Метка объекта по имени файла
#[wasm_bindgen]
pub fn detect_label(filename: &str) -> String {
    shared::detect_label(filename).to_string()
}

/// Буферы для просмотра: `{ parts: [{ id, positions, indices }], min, max }`
#[wasm_bindgen]
pub fn viewport_buffers(model_json: &str) -> Result<String, JsError> {
    let model = parse_model(model_json)?;
    model.validate().map_err(|e| JsError::new(&e.to_string()))?;
    to_json(&viewport_mesh(&model))
}

/// ASCII STL
#[wasm_bindgen]
pub fn export_stl(model_json: &str) -> Result<String, JsError> {
    export_text(model_json, ExportFormat::Stl)
}

/// OBJ; `box_proxy` — упрощённый вариант из боксов `position ± scale`
#[wasm_bindgen]
pub fn export_obj(model_json: &str, box_proxy: bool) -> Result<String, JsError> {
    let format = if box_proxy {
        ExportFormat::ObjBoxProxy
    } else {
        ExportFormat::Obj
    };
    export_text(model_json, format)
}

/// Файл проекта `.part`
#[wasm_bindgen]
pub fn export_part(model_json: &str) -> Result<String, JsError> {
    export_text(model_json, ExportFormat::Part)
}

/// Имя файла для экспорта: "stl", "obj", "obj-box" или "part"
#[wasm_bindgen]
pub fn export_filename(model_json: &str, format: &str) -> Result<String, JsError> {
    let model = parse_model(model_json)?;
    let format: ExportFormat = format
        .parse()
        .map_err(|e: ExportError| JsError::new(&e.to_string()))?;
    Ok(format!("{}.{}", sanitize_name(&model.name), format.extension()))
}
