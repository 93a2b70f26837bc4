//! Эвристическое определение объекта по имени файла

/// Метки в порядке приоритета
pub const LABELS: [&str; 10] = [
    "mug", "bottle", "pen", "glass", "laptop", "phone", "book", "chair", "box", "ball",
];

/// Метка, если ни одна не подошла
pub const DEFAULT_LABEL: &str = "object";

/// Определить метку объекта по имени файла. Всегда возвращает значение.
pub fn detect_label(filename: &str) -> &'static str {
    let name = filename.to_lowercase();
    tracing::debug!(filename = %name, "filename received");

    let label = LABELS
        .iter()
        .copied()
        .find(|label| name.contains(label))
        .unwrap_or(DEFAULT_LABEL);

    tracing::debug!(label, "detected label");
    label
}
