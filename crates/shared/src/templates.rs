//! Библиотека шаблонов — готовые модели для известных объектов.
//!
//! Шаблоны проверяются до обращения к генеративному сервису. Порядок таблицы
//! `TEMPLATES` — это приоритет: описание может содержать несколько ключевых слов
//! ("travel mug bottle"), и побеждает первая подходящая запись.

use std::f64::consts::FRAC_PI_2;

use crate::{GeneratedModel, ModelPart, ShapeType};

/// Запись таблицы шаблонов: ключевые слова и фабрика модели
pub struct Template {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub build: fn() -> GeneratedModel,
}

impl Template {
    /// Подходит ли шаблон к описанию (уже приведённому к нижнему регистру)
    pub fn matches(&self, key: &str) -> bool {
        self.keywords.iter().any(|kw| key.contains(kw))
    }
}

/// Шаблоны в порядке приоритета
pub const TEMPLATES: &[Template] = &[
    Template {
        name: "Pen",
        keywords: &["pen", "pencil"],
        build: pen,
    },
    Template {
        name: "Bottle",
        keywords: &["bottle"],
        build: bottle,
    },
    Template {
        name: "Mug",
        keywords: &["mug", "cup"],
        build: mug,
    },
    Template {
        name: "Chair",
        keywords: &["chair"],
        build: chair,
    },
];

/// Найти шаблон для описания. `None` — сигнал перейти к генерации, не ошибка.
pub fn template_for(description: &str) -> Option<GeneratedModel> {
    let key = description.trim().to_lowercase();
    let template = TEMPLATES.iter().find(|t| t.matches(&key))?;
    tracing::debug!(template = template.name, description, "template hit");
    Some((template.build)())
}

/// Все ключевые слова в порядке проверки
pub fn template_keywords() -> Vec<&'static str> {
    TEMPLATES
        .iter()
        .flat_map(|t| t.keywords.iter().copied())
        .collect()
}

fn pen() -> GeneratedModel {
    GeneratedModel::new(
        "Pen",
        vec![
            ModelPart::new("body", ShapeType::Cylinder, [0.0, 0.0, 0.0])
                .with_args(vec![0.05, 0.05, 5.0, 32.0])
                .with_scale([1.0, 1.0, 1.0])
                .with_color("#111")
                .with_description("pen body"),
            ModelPart::new("tip", ShapeType::Cone, [0.0, -2.6, 0.0])
                .with_args(vec![0.05, 0.4, 32.0])
                .with_color("#999")
                .with_description("pen tip"),
            ModelPart::new("ring", ShapeType::Cylinder, [0.0, 1.6, 0.0])
                .with_args(vec![0.055, 0.055, 0.2, 32.0])
                .with_color("#bbb")
                .with_description("cap ring"),
            ModelPart::new("clip", ShapeType::Box, [0.07, 1.3, 0.0])
                .with_scale([0.02, 1.2, 0.15])
                .with_color("#222")
                .with_description("clip"),
        ],
    )
}

fn bottle() -> GeneratedModel {
    GeneratedModel::new(
        "Bottle",
        vec![
            ModelPart::new("body", ShapeType::Cylinder, [0.0, 0.0, 0.0])
                .with_args(vec![0.9, 1.0, 3.2, 32.0])
                .with_color("#4aa3ff")
                .with_description("bottle body"),
            ModelPart::new("neck", ShapeType::Cylinder, [0.0, 2.0, 0.0])
                .with_args(vec![0.45, 0.6, 1.0, 32.0])
                .with_color("#4aa3ff")
                .with_description("neck"),
            ModelPart::new("cap", ShapeType::Cylinder, [0.0, 2.9, 0.0])
                .with_args(vec![0.5, 0.5, 0.5, 32.0])
                .with_color("#ddd")
                .with_description("cap"),
            ModelPart::new("base", ShapeType::Torus, [0.0, -1.6, 0.0])
                .with_rotation([FRAC_PI_2, 0.0, 0.0])
                .with_args(vec![0.9, 0.05, 16.0, 100.0])
                .with_color("#357edd")
                .with_description("bottom ring"),
        ],
    )
}

fn mug() -> GeneratedModel {
    GeneratedModel::new(
        "Mug",
        vec![
            ModelPart::new("body", ShapeType::Cylinder, [0.0, 0.0, 0.0])
                .with_args(vec![1.1, 1.1, 2.2, 32.0])
                .with_color("#e5e5e5")
                .with_description("outer body"),
            ModelPart::new("inner", ShapeType::Cylinder, [0.0, 0.1, 0.0])
                .with_args(vec![0.9, 0.9, 2.0, 32.0])
                .with_color("#ffffff")
                .with_description("inner hollow"),
            ModelPart::new("rim", ShapeType::Torus, [0.0, 1.1, 0.0])
                .with_rotation([FRAC_PI_2, 0.0, 0.0])
                .with_args(vec![1.08, 0.06, 16.0, 100.0])
                .with_color("#ddd")
                .with_description("rim"),
            ModelPart::new("base", ShapeType::Cylinder, [0.0, -1.1, 0.0])
                .with_args(vec![1.0, 1.0, 0.25, 32.0])
                .with_color("#d9d9d9")
                .with_description("base"),
            ModelPart::new("handle", ShapeType::Torus, [1.25, 0.1, 0.0])
                .with_rotation([0.0, 0.0, 0.0])
                .with_args(vec![0.75, 0.18, 16.0, 100.0])
                .with_color("#e5e5e5")
                .with_description("handle"),
        ],
    )
}

fn chair() -> GeneratedModel {
    GeneratedModel::new(
        "Chair",
        vec![
            ModelPart::new("seat", ShapeType::Box, [0.0, 0.0, 0.0])
                .with_rotation([0.0, 0.0, 0.0])
                .with_scale([2.0, 0.3, 2.0])
                .with_args(vec![])
                .with_color("#b08968")
                .with_description("seat"),
            ModelPart::new("back", ShapeType::Box, [0.0, 1.2, -0.9])
                .with_rotation([0.0, 0.0, 0.0])
                .with_scale([2.0, 2.0, 0.3])
                .with_args(vec![])
                .with_color("#b08968")
                .with_description("backrest"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(description: &str) -> Option<String> {
        template_for(description).map(|m| m.name)
    }

    #[test]
    fn test_priority_order() {
        let names: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
        assert_eq!(names, ["Pen", "Bottle", "Mug", "Chair"]);
        assert_eq!(
            template_keywords(),
            ["pen", "pencil", "bottle", "mug", "cup", "chair"]
        );
    }

    #[test]
    fn test_single_keywords() {
        assert_eq!(name_of("pen").as_deref(), Some("Pen"));
        assert_eq!(name_of("a yellow pencil").as_deref(), Some("Pen"));
        assert_eq!(name_of("water bottle").as_deref(), Some("Bottle"));
        assert_eq!(name_of("coffee mug").as_deref(), Some("Mug"));
        assert_eq!(name_of("tea cup").as_deref(), Some("Mug"));
        assert_eq!(name_of("office chair").as_deref(), Some("Chair"));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(name_of("  BOTTLE ").as_deref(), Some("Bottle"));
        assert_eq!(name_of("Chair").as_deref(), Some("Chair"));
    }

    #[test]
    fn test_overlapping_keywords_resolve_by_priority() {
        assert_eq!(name_of("mug bottle").as_deref(), Some("Bottle"));
        assert_eq!(name_of("travel mug bottle").as_deref(), Some("Bottle"));
        assert_eq!(name_of("pencil cup").as_deref(), Some("Pen"));
        assert_eq!(name_of("chair with a mug").as_deref(), Some("Mug"));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(name_of("spaceship"), None);
        assert_eq!(name_of(""), None);
    }

    #[test]
    fn test_templates_are_valid_models() {
        for template in TEMPLATES {
            let model = (template.build)();
            assert_eq!(model.name, template.name);
            assert_eq!(model.validate(), Ok(()), "template {}", template.name);
        }
    }

    #[test]
    fn test_mug_parts() {
        let mug = template_for("mug").unwrap();
        let ids: Vec<&str> = mug.parts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["body", "inner", "rim", "base", "handle"]);
        assert_eq!(mug.part("rim").unwrap().rotation, Some([FRAC_PI_2, 0.0, 0.0]));
    }

    #[test]
    fn test_templates_are_deterministic() {
        assert_eq!(template_for("bottle"), template_for("BOTTLE"));
    }
}
