//! Geometrie-Formeln: Umfang, Fläche, Volumen und Oberfläche.
//!
//! Reine Funktionen ohne Zustand. Die Zuordnung (Form, Kennzahl) → Formel ist
//! ein exhaustiver `match`; eine neue Form erzwingt einen neuen Arm zur Compile-Zeit.

use serde::{Deserialize, Deserializer, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Geometrische Grundform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ShapeKind {
    /// Rechteck (a × b)
    Rectangle,
    /// Dreieck mit Seiten a, b, c
    Triangle,
    /// Kreis mit Radius r
    Circle,
    /// Würfel mit Kante a
    Cube,
    /// Quader a × b × c
    Cuboid,
    /// Zylinder mit Radius r und Höhe h
    Cylinder,
    /// Kugel mit Radius r
    Sphere,
}

impl ShapeKind {
    /// Alle Formen in Datei-Index-Reihenfolge.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Rectangle,
        ShapeKind::Triangle,
        ShapeKind::Circle,
        ShapeKind::Cube,
        ShapeKind::Cuboid,
        ShapeKind::Cylinder,
        ShapeKind::Sphere,
    ];

    /// Form aus dem numerischen Index des Fragenformats.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Name wie im Fragenformat.
    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Circle => "Circle",
            ShapeKind::Cube => "Cube",
            ShapeKind::Cuboid => "Cuboid",
            ShapeKind::Cylinder => "Cylinder",
            ShapeKind::Sphere => "Sphere",
        }
    }

    /// Räumlicher Körper (Volumen/Oberfläche) statt ebener Figur.
    pub fn is_solid(self) -> bool {
        matches!(
            self,
            ShapeKind::Cube | ShapeKind::Cuboid | ShapeKind::Cylinder | ShapeKind::Sphere
        )
    }

    /// Kennzahlen, für die eine Formel existiert.
    pub fn supported_metrics(self) -> [MetricKind; 2] {
        if self.is_solid() {
            [MetricKind::Volume, MetricKind::SurfaceArea]
        } else {
            [MetricKind::Perimeter, MetricKind::Area]
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gesuchte Kennzahl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MetricKind {
    /// Umfang
    Perimeter,
    /// Flächeninhalt
    Area,
    /// Volumen
    Volume,
    /// Oberfläche
    SurfaceArea,
}

impl MetricKind {
    /// Alle Kennzahlen in Datei-Index-Reihenfolge.
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Perimeter,
        MetricKind::Area,
        MetricKind::Volume,
        MetricKind::SurfaceArea,
    ];

    /// Kennzahl aus dem numerischen Index des Fragenformats.
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Name wie im Fragenformat.
    pub fn name(self) -> &'static str {
        match self {
            MetricKind::Perimeter => "Perimeter",
            MetricKind::Area => "Area",
            MetricKind::Volume => "Volume",
            MetricKind::SurfaceArea => "SurfaceArea",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Enum-Feld im Fragenformat: Name oder Index.
#[derive(Deserialize)]
#[serde(untagged)]
enum EnumRepr {
    Index(u32),
    Name(String),
}

impl<'de> Deserialize<'de> for ShapeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Index(i) => Self::from_index(i),
            EnumRepr::Name(name) => Self::ALL
                .into_iter()
                .find(|s| s.name().eq_ignore_ascii_case(name.trim())),
        };
        parsed.ok_or_else(|| serde::de::Error::custom("unbekannte Form"))
    }
}

impl<'de> Deserialize<'de> for MetricKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let parsed = match EnumRepr::deserialize(deserializer)? {
            EnumRepr::Index(i) => Self::from_index(i),
            EnumRepr::Name(name) => Self::ALL
                .into_iter()
                .find(|m| m.name().eq_ignore_ascii_case(name.trim())),
        };
        parsed.ok_or_else(|| serde::de::Error::custom("unbekannte Kennzahl"))
    }
}

/// Maße einer Form. Je nach Form ist nur eine Teilmenge relevant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    /// Seite a
    #[serde(default)]
    pub a: f64,
    /// Seite b
    #[serde(default)]
    pub b: f64,
    /// Seite c
    #[serde(default)]
    pub c: f64,
    /// Radius
    #[serde(default)]
    pub r: f64,
    /// Höhe
    #[serde(default)]
    pub h: f64,
}

/// Konfigurationsfehler der Formel-Tabelle.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Kennzahl ist für die Form nicht definiert (z.B. Volumen eines Kreises).
    #[error("Kennzahl {metric} ist fuer Form {shape} nicht definiert")]
    UnsupportedMetric {
        /// Form der Frage
        shape: ShapeKind,
        /// Angefragte Kennzahl
        metric: MetricKind,
    },
}

/// Prüft, ob für (Form, Kennzahl) eine Formel existiert.
pub fn is_supported(shape: ShapeKind, metric: MetricKind) -> bool {
    shape.supported_metrics().contains(&metric)
}

/// Berechnet die Kennzahl einer Form.
pub fn compute(
    shape: ShapeKind,
    metric: MetricKind,
    dims: &Dimensions,
) -> Result<f64, GeometryError> {
    use MetricKind::*;
    use ShapeKind::*;

    let Dimensions { a, b, c, r, h } = *dims;
    let value = match (shape, metric) {
        (Rectangle, Perimeter) => 2.0 * (a + b),
        (Rectangle, Area) => a * b,
        (Triangle, Perimeter) => a + b + c,
        (Triangle, Area) => heron_area(a, b, c),
        (Circle, Perimeter) => 2.0 * PI * r,
        (Circle, Area) => PI * r * r,
        (Cube, Volume) => a * a * a,
        (Cube, SurfaceArea) => 6.0 * a * a,
        (Cuboid, Volume) => a * b * c,
        (Cuboid, SurfaceArea) => 2.0 * (a * b + a * c + b * c),
        (Cylinder, Volume) => PI * r * r * h,
        (Cylinder, SurfaceArea) => 2.0 * PI * r * (r + h),
        (Sphere, Volume) => 4.0 / 3.0 * PI * r * r * r,
        (Sphere, SurfaceArea) => 4.0 * PI * r * r,
        (Rectangle | Triangle | Circle, Volume | SurfaceArea)
        | (Cube | Cuboid | Cylinder | Sphere, Perimeter | Area) => {
            return Err(GeometryError::UnsupportedMetric { shape, metric })
        }
    };
    Ok(value)
}

/// Dreiecksfläche nach Heron; degenerierte Dreiecke liefern 0 statt NaN.
fn heron_area(a: f64, b: f64, c: f64) -> f64 {
    let s = (a + b + c) / 2.0;
    let radicand = s * (s - a) * (s - b) * (s - c);
    if radicand <= 0.0 {
        0.0
    } else {
        radicand.sqrt()
    }
}

/// Lesbare Formel für (Form, Kennzahl), z.B. `"A = a * b"`.
pub fn formula(shape: ShapeKind, metric: MetricKind) -> Option<&'static str> {
    use MetricKind::*;
    use ShapeKind::*;

    let text = match (shape, metric) {
        (Rectangle, Perimeter) => "P = 2 * (a + b)",
        (Rectangle, Area) => "A = a * b",
        (Triangle, Perimeter) => "P = a + b + c",
        (Triangle, Area) => "A = sqrt(s * (s-a) * (s-b) * (s-c)), s = P/2",
        (Circle, Perimeter) => "C = 2 * pi * r",
        (Circle, Area) => "A = pi * r^2",
        (Cube, Volume) => "V = a^3",
        (Cube, SurfaceArea) => "A = 6 * a^2",
        (Cuboid, Volume) => "V = a * b * c",
        (Cuboid, SurfaceArea) => "A = 2 * (ab + ac + bc)",
        (Cylinder, Volume) => "V = pi * r^2 * h",
        (Cylinder, SurfaceArea) => "A = 2 * pi * r * (r + h)",
        (Sphere, Volume) => "V = (4/3) * pi * r^3",
        (Sphere, SurfaceArea) => "A = 4 * pi * r^2",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims(a: f64, b: f64, c: f64, r: f64, h: f64) -> Dimensions {
        Dimensions { a, b, c, r, h }
    }

    #[test]
    fn test_rectangle_formulas() {
        let d = dims(3.0, 4.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(compute(ShapeKind::Rectangle, MetricKind::Perimeter, &d).unwrap(), 14.0);
        assert_relative_eq!(compute(ShapeKind::Rectangle, MetricKind::Area, &d).unwrap(), 12.0);
    }

    #[test]
    fn test_triangle_heron_right_triangle() {
        let d = dims(3.0, 4.0, 5.0, 0.0, 0.0);
        assert_relative_eq!(compute(ShapeKind::Triangle, MetricKind::Perimeter, &d).unwrap(), 12.0);
        assert_relative_eq!(compute(ShapeKind::Triangle, MetricKind::Area, &d).unwrap(), 6.0);
    }

    #[test]
    fn test_degenerate_triangle_area_is_zero_not_nan() {
        let d = dims(1.0, 1.0, 5.0, 0.0, 0.0);
        let area = compute(ShapeKind::Triangle, MetricKind::Area, &d).unwrap();
        assert!(!area.is_nan());
        assert_eq!(area, 0.0);
    }

    #[test]
    fn test_round_shapes() {
        let d = dims(0.0, 0.0, 0.0, 2.0, 3.0);
        assert_relative_eq!(compute(ShapeKind::Circle, MetricKind::Perimeter, &d).unwrap(), 4.0 * PI);
        assert_relative_eq!(compute(ShapeKind::Circle, MetricKind::Area, &d).unwrap(), 4.0 * PI);
        assert_relative_eq!(compute(ShapeKind::Cylinder, MetricKind::Volume, &d).unwrap(), 12.0 * PI);
        assert_relative_eq!(
            compute(ShapeKind::Cylinder, MetricKind::SurfaceArea, &d).unwrap(),
            20.0 * PI
        );
        assert_relative_eq!(
            compute(ShapeKind::Sphere, MetricKind::Volume, &d).unwrap(),
            32.0 / 3.0 * PI
        );
        assert_relative_eq!(compute(ShapeKind::Sphere, MetricKind::SurfaceArea, &d).unwrap(), 16.0 * PI);
    }

    #[test]
    fn test_box_shapes() {
        let d = dims(2.0, 3.0, 4.0, 0.0, 0.0);
        assert_relative_eq!(compute(ShapeKind::Cube, MetricKind::Volume, &d).unwrap(), 8.0);
        assert_relative_eq!(compute(ShapeKind::Cube, MetricKind::SurfaceArea, &d).unwrap(), 24.0);
        assert_relative_eq!(compute(ShapeKind::Cuboid, MetricKind::Volume, &d).unwrap(), 24.0);
        assert_relative_eq!(compute(ShapeKind::Cuboid, MetricKind::SurfaceArea, &d).unwrap(), 52.0);
    }

    #[test]
    fn test_unsupported_pair_is_error() {
        let err = compute(ShapeKind::Circle, MetricKind::Volume, &Dimensions::default()).unwrap_err();
        assert_eq!(
            err,
            GeometryError::UnsupportedMetric {
                shape: ShapeKind::Circle,
                metric: MetricKind::Volume
            }
        );
        assert!(!is_supported(ShapeKind::Cube, MetricKind::Area));
    }

    #[test]
    fn test_all_supported_pairs_are_deterministic_and_non_negative() {
        let d = dims(1.5, 2.5, 3.0, 0.75, 2.0);
        for shape in ShapeKind::ALL {
            for metric in shape.supported_metrics() {
                let first = compute(shape, metric, &d).unwrap();
                let second = compute(shape, metric, &d).unwrap();
                assert_eq!(first, second);
                assert!(first >= 0.0, "{shape} {metric} negativ");
                assert!(formula(shape, metric).is_some());
            }
        }
    }

    #[test]
    fn test_enum_deserialize_accepts_names_and_indices() {
        let shape: ShapeKind = serde_json::from_str("\"Cylinder\"").unwrap();
        assert_eq!(shape, ShapeKind::Cylinder);
        let shape: ShapeKind = serde_json::from_str("6").unwrap();
        assert_eq!(shape, ShapeKind::Sphere);
        let metric: MetricKind = serde_json::from_str("3").unwrap();
        assert_eq!(metric, MetricKind::SurfaceArea);
        assert!(serde_json::from_str::<ShapeKind>("\"Hexagon\"").is_err());
    }
}
