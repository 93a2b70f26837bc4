//! Нормализация размера модели

use crate::GeneratedModel;

/// Целевой размер наибольшей компоненты масштаба
pub const TARGET_SIZE: f64 = 3.0;

/// Коэффициент нормализации или `None`, если масштабировать нечего.
///
/// Наибольшая компонента масштаба среди всех деталей (отсутствующий масштаб
/// считается `(1, 1, 1)`); без положительного конечного максимума масштабирование
/// пропускается.
pub fn normalization_factor(model: &GeneratedModel) -> Option<f64> {
    let max_dim = model
        .parts
        .iter()
        .flat_map(|p| p.scale_or_default())
        .fold(0.0_f64, f64::max);

    if max_dim > 0.0 && max_dim.is_finite() {
        Some(TARGET_SIZE / max_dim)
    } else {
        None
    }
}

impl GeneratedModel {
    /// Новая модель, равномерно отмасштабированная так, что наибольшая
    /// компонента масштаба равна `TARGET_SIZE`.
    ///
    /// Позиции, масштабы и `args` умножаются на один коэффициент; повороты и цвета
    /// не меняются. Для уже нормализованной модели коэффициент равен 1.
    pub fn normalized(&self) -> GeneratedModel {
        let Some(factor) = normalization_factor(self) else {
            return self.clone();
        };

        let parts = self
            .parts
            .iter()
            .map(|p| {
                let mut part = p.clone();
                part.position = part.position.map(|v| v * factor);
                part.scale = Some(p.scale_or_default().map(|v| v * factor));
                part.args = p
                    .args
                    .as_ref()
                    .map(|args| args.iter().map(|v| v * factor).collect());
                part
            })
            .collect();

        GeneratedModel {
            name: self.name.clone(),
            parts,
        }
    }
}
