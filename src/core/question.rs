//! Quiz-Fragen, Antwort-Parsing und Bewertung mit Toleranz.

use super::geometry::{self, Dimensions, MetricKind, ShapeKind};
use serde::{Deserialize, Serialize};

/// Eine Geometrie-Frage aus der Fragenbank. Nach dem Laden unveränderlich.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryQuestion {
    /// Eindeutige Kennung
    #[serde(default)]
    pub id: String,
    /// Fragetext
    #[serde(default)]
    pub prompt: String,
    /// Form
    pub shape: ShapeKind,
    /// Gesuchte Kennzahl
    pub metric: MetricKind,
    /// Maße (a, b, c, r, h)
    #[serde(flatten)]
    pub dims: Dimensions,
    /// Maximal erlaubte Abweichung (negativ wird als 0 behandelt)
    #[serde(default)]
    pub tolerance: f64,
    /// Einheit für die Anzeige (z.B. "m²")
    #[serde(default)]
    pub unit: String,
    /// Nur visuelle Skalierung, ändert die Rechenwerte nicht
    #[serde(default = "default_visual_scale")]
    pub visual_scale: f32,
}

fn default_visual_scale() -> f32 {
    1.0
}

impl GeometryQuestion {
    /// Erstellt eine Frage mit leerem Text und Standardwerten.
    pub fn new(
        id: impl Into<String>,
        shape: ShapeKind,
        metric: MetricKind,
        dims: Dimensions,
        tolerance: f64,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: String::new(),
            shape,
            metric,
            dims,
            tolerance,
            unit: String::new(),
            visual_scale: 1.0,
        }
    }

    /// Prüft, ob die Formel-Tabelle diese Frage abdeckt.
    pub fn is_supported(&self) -> bool {
        geometry::is_supported(self.shape, self.metric)
    }

    /// Nicht-negative Toleranz.
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.max(0.0)
    }

    /// Erwarteter Wert der Frage.
    ///
    /// Nicht unterstützte Kombinationen sind ein Programmierfehler: Debug-Builds
    /// brechen ab, Release-Builds loggen und liefern 0.
    pub fn expected_answer(&self) -> f64 {
        match geometry::compute(self.shape, self.metric, &self.dims) {
            Ok(value) => value,
            Err(e) => {
                debug_assert!(false, "Frage '{}': {}", self.id, e);
                log::error!("Frage '{}' nicht berechenbar: {}", self.id, e);
                0.0
            }
        }
    }

    /// `|erwartet - antwort| <= toleranz`
    pub fn is_correct(&self, answer: f64) -> bool {
        (self.expected_answer() - answer).abs() <= self.effective_tolerance()
    }

    /// Formel-Hinweis für die UI.
    pub fn formula(&self) -> Option<&'static str> {
        geometry::formula(self.shape, self.metric)
    }
}

/// Parst eine Benutzereingabe als Dezimalzahl. Akzeptiert `.` und `,` als Trennzeichen.
pub fn parse_answer(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replace(',', ".");
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Formatiert einen Hinweiswert mit höchstens drei Nachkommastellen ohne Null-Ende.
pub fn format_hint_value(value: f64) -> String {
    let text = format!("{value:.3}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
