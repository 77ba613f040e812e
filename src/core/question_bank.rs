//! Fragenbank und zufällige Auswahl ohne Zurücklegen.

use super::geometry::ShapeKind;
use super::question::GeometryQuestion;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::sync::Arc;

/// Fehler beim strikten Parsen einer Fragenbank.
#[derive(Debug, thiserror::Error)]
pub enum QuestionBankError {
    /// Datei nicht lesbar
    #[error("Fragenbank nicht lesbar: {0}")]
    Io(#[from] std::io::Error),
    /// JSON fehlerhaft
    #[error("Fragenbank fehlerhaft: {0}")]
    Json(#[from] serde_json::Error),
}

/// Dateiformat: `{ "questions": [ ... ] }`
#[derive(Deserialize)]
struct QuestionList {
    #[serde(default)]
    questions: Vec<GeometryQuestion>,
}

/// Validierte, unveränderliche Fragenbank. Besitzt alle Fragen.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    questions: Vec<Arc<GeometryQuestion>>,
}

impl QuestionBank {
    /// Erstellt eine Bank aus Fragen; nicht berechenbare Einträge werden verworfen.
    pub fn new(questions: Vec<GeometryQuestion>) -> Self {
        let total = questions.len();
        let questions: Vec<Arc<GeometryQuestion>> = questions
            .into_iter()
            .filter(|q| {
                let ok = q.is_supported();
                if !ok {
                    log::warn!(
                        "Frage '{}' verworfen: {} hat keine Kennzahl {}",
                        q.id,
                        q.shape,
                        q.metric
                    );
                }
                ok
            })
            .map(Arc::new)
            .collect();
        if questions.len() < total {
            log::warn!("{} von {} Fragen verworfen", total - questions.len(), total);
        }
        Self { questions }
    }

    /// Striktes Parsen: Fehler werden an den Aufrufer gemeldet.
    pub fn parse(json: &str) -> Result<Self, QuestionBankError> {
        let list: QuestionList = serde_json::from_str(json)?;
        Ok(Self::new(list.questions))
    }

    /// Nachsichtiges Parsen: fehlerhafte Quelle ergibt eine leere Bank.
    pub fn load_from_str(json: &str) -> Self {
        if json.trim().is_empty() {
            log::warn!("Fragenbank ist leer");
            return Self::default();
        }
        match Self::parse(json) {
            Ok(bank) => bank,
            Err(e) => {
                log::warn!("{}, verwende leere Fragenbank", e);
                Self::default()
            }
        }
    }

    /// Lädt eine Fragenbank aus einer Datei. Fehlende oder fehlerhafte Datei: leere Bank.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let bank = Self::load_from_str(&content);
                log::info!("{} Fragen geladen aus: {}", bank.len(), path.display());
                bank
            }
            Err(e) => {
                log::warn!("Fragenbank {} nicht lesbar: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Teilmenge mit nur einer Form (`None` = alle).
    pub fn filtered(&self, shape: Option<ShapeKind>) -> Vec<Arc<GeometryQuestion>> {
        self.questions
            .iter()
            .filter(|q| shape.is_none_or(|s| q.shape == s))
            .cloned()
            .collect()
    }

    /// Alle Fragen.
    pub fn questions(&self) -> &[Arc<GeometryQuestion>] {
        &self.questions
    }

    /// Anzahl der Fragen.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Gibt `true` zurück, wenn die Bank keine Fragen enthält.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Wählt `count` Fragen gleichverteilt ohne Zurücklegen (Fisher-Yates mit Seed).
///
/// Mehr angefordert als vorhanden: alle vorhandenen in gemischter Reihenfolge.
pub fn select_questions<T: Clone>(source: &[T], count: usize, seed: u64) -> Vec<T> {
    if source.is_empty() || count == 0 {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..source.len()).collect();
    for i in (1..indices.len()).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }

    indices
        .into_iter()
        .take(count)
        .map(|i| source[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const BANK: &str = r#"{
        "questions": [
            { "id": "r1", "shape": "Rectangle", "metric": "Area", "a": 2, "b": 3, "tolerance": 0.01 },
            { "id": "c1", "shape": "Circle", "metric": "Volume", "r": 1 },
            { "id": "s1", "shape": 6, "metric": 2, "r": 1, "tolerance": 0.1 }
        ]
    }"#;

    #[test]
    fn test_parse_drops_unsupported_records() {
        let bank = QuestionBank::parse(BANK).expect("Bank sollte parsen");
        let ids: Vec<&str> = bank.questions().iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "s1"]);
    }

    #[test]
    fn test_malformed_source_yields_empty_bank() {
        assert!(QuestionBank::load_from_str("{ nicht json").is_empty());
        assert!(QuestionBank::load_from_str("").is_empty());
        assert!(QuestionBank::load_from_str("{}").is_empty());
        assert!(QuestionBank::parse("[1, 2]").is_err());
    }

    #[test]
    fn test_filtered_by_shape() {
        let bank = QuestionBank::load_from_str(BANK);
        assert_eq!(bank.filtered(None).len(), 2);
        let spheres = bank.filtered(Some(ShapeKind::Sphere));
        assert_eq!(spheres.len(), 1);
        assert_eq!(spheres[0].id, "s1");
        assert!(bank.filtered(Some(ShapeKind::Cube)).is_empty());
    }

    #[test]
    fn test_select_all_returns_each_exactly_once() {
        let source = vec![1, 2, 3];
        for seed in 0..50 {
            let picked = select_questions(&source, 3, seed);
            assert_eq!(picked.len(), 3);
            let unique: HashSet<_> = picked.iter().collect();
            assert_eq!(unique.len(), 3);
        }
    }

    #[test]
    fn test_select_zero_and_oversized() {
        let source = vec!["a", "b"];
        assert!(select_questions(&source, 0, 7).is_empty());
        let picked = select_questions(&source, 10, 7);
        assert_eq!(picked.len(), 2);
        assert!(select_questions::<u8>(&[], 3, 7).is_empty());
    }

    #[test]
    fn test_select_is_deterministic_per_seed() {
        let source: Vec<u32> = (0..20).collect();
        assert_eq!(
            select_questions(&source, 5, 42),
            select_questions(&source, 5, 42)
        );
    }
}
