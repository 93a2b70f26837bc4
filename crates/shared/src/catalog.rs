//! Каталог примитивов: типы фигур, их аргументы и значения по умолчанию

use serde::{Deserialize, Serialize};

/// Тип примитива
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Box,
    Sphere,
    Cylinder,
    Cone,
    Torus,
    Icosahedron,
}

impl ShapeType {
    pub const ALL: [ShapeType; 6] = [
        ShapeType::Box,
        ShapeType::Sphere,
        ShapeType::Cylinder,
        ShapeType::Cone,
        ShapeType::Torus,
        ShapeType::Icosahedron,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShapeType::Box => "box",
            ShapeType::Sphere => "sphere",
            ShapeType::Cylinder => "cylinder",
            ShapeType::Cone => "cone",
            ShapeType::Torus => "torus",
            ShapeType::Icosahedron => "icosahedron",
        }
    }

    /// Подставить значения по умолчанию и получить конкретную геометрию.
    ///
    /// Отсутствующий, нулевой или NaN аргумент заменяется значением по умолчанию,
    /// так же как это делает рендерер.
    pub fn resolve(&self, args: &[f64]) -> Shape {
        match self {
            ShapeType::Box => Shape::Box,
            ShapeType::Sphere => Shape::Sphere {
                radius: arg(args, 0, 1.0),
            },
            ShapeType::Cylinder => Shape::Cylinder {
                radius_top: arg(args, 0, 1.0),
                radius_bottom: arg(args, 1, 1.0),
                height: arg(args, 2, 1.0),
            },
            ShapeType::Cone => Shape::Cone {
                radius: arg(args, 0, 1.0),
                height: arg(args, 1, 1.0),
            },
            ShapeType::Torus => Shape::Torus {
                radius: arg(args, 0, 1.0),
                tube: arg(args, 1, 0.4),
            },
            ShapeType::Icosahedron => Shape::Icosahedron {
                radius: arg(args, 0, 1.0),
            },
        }
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn arg(args: &[f64], index: usize, default: f64) -> f64 {
    match args.get(index) {
        Some(&v) if v != 0.0 && !v.is_nan() => v,
        _ => default,
    }
}

/// Примитив с разрешёнными размерами (до масштабирования)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Единичный куб, центрированный в начале координат
    Box,
    Sphere {
        radius: f64,
    },
    /// Ось вдоль Y, центр по высоте в начале координат
    Cylinder {
        radius_top: f64,
        radius_bottom: f64,
        height: f64,
    },
    /// Вершина сверху (+Y)
    Cone {
        radius: f64,
        height: f64,
    },
    /// Кольцо в плоскости XY
    Torus {
        radius: f64,
        tube: f64,
    },
    Icosahedron {
        radius: f64,
    },
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Box => ShapeType::Box,
            Shape::Sphere { .. } => ShapeType::Sphere,
            Shape::Cylinder { .. } => ShapeType::Cylinder,
            Shape::Cone { .. } => ShapeType::Cone,
            Shape::Torus { .. } => ShapeType::Torus,
            Shape::Icosahedron { .. } => ShapeType::Icosahedron,
        }
    }
}

/// Число сегментов при разбиении примитивов на треугольники
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellation {
    pub sphere_width: u32,
    pub sphere_height: u32,
    pub radial: u32,
    pub torus_radial: u32,
    pub torus_tubular: u32,
}

impl Tessellation {
    /// Разбиение, которое использует экспорт в STL/OBJ
    pub const EXPORT: Tessellation = Tessellation {
        sphere_width: 32,
        sphere_height: 16,
        radial: 32,
        torus_radial: 32,
        torus_tubular: 24,
    };

    /// Разбиение, которое использует интерактивный просмотр
    pub const VIEWPORT: Tessellation = Tessellation {
        sphere_width: 32,
        sphere_height: 32,
        radial: 32,
        torus_radial: 32,
        torus_tubular: 100,
    };
}

impl Default for Tessellation {
    fn default() -> Self {
        Self::EXPORT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_type_serde_lowercase() {
        for shape in ShapeType::ALL {
            let json = serde_json::to_string(&shape).unwrap();
            assert_eq!(json, format!("\"{}\"", shape.name()));
            let back: ShapeType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, shape);
        }
    }

    #[test]
    fn test_resolve_defaults() {
        assert_eq!(ShapeType::Sphere.resolve(&[]), Shape::Sphere { radius: 1.0 });
        assert_eq!(
            ShapeType::Cylinder.resolve(&[]),
            Shape::Cylinder {
                radius_top: 1.0,
                radius_bottom: 1.0,
                height: 1.0
            }
        );
        assert_eq!(ShapeType::Torus.resolve(&[]), Shape::Torus { radius: 1.0, tube: 0.4 });
    }

    #[test]
    fn test_resolve_uses_args_in_order() {
        assert_eq!(
            ShapeType::Cylinder.resolve(&[0.05, 0.06, 5.0, 32.0]),
            Shape::Cylinder {
                radius_top: 0.05,
                radius_bottom: 0.06,
                height: 5.0
            }
        );
        assert_eq!(
            ShapeType::Cone.resolve(&[0.05, 0.4, 32.0]),
            Shape::Cone { radius: 0.05, height: 0.4 }
        );
    }

    #[test]
    fn test_resolve_zero_and_nan_fall_back() {
        assert_eq!(ShapeType::Sphere.resolve(&[0.0]), Shape::Sphere { radius: 1.0 });
        assert_eq!(
            ShapeType::Torus.resolve(&[2.0, f64::NAN]),
            Shape::Torus { radius: 2.0, tube: 0.4 }
        );
    }

    #[test]
    fn test_box_ignores_args() {
        assert_eq!(ShapeType::Box.resolve(&[5.0, 5.0, 5.0]), Shape::Box);
    }

    #[test]
    fn test_shape_type_roundtrip_through_resolve() {
        for shape in ShapeType::ALL {
            assert_eq!(shape.resolve(&[]).shape_type(), shape);
        }
    }
}
