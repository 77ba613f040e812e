//! Bestpunktzahl als einziger persistenter Zustand.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Zugriff auf die gespeicherte Bestpunktzahl.
///
/// Wird zu Beginn eines Durchlaufs gelesen und am Ende nur bei strikt
/// höherer Punktzahl überschrieben.
pub trait BestScoreRepository {
    /// Aktuelle Bestpunktzahl (0, wenn noch keine gespeichert ist).
    fn best_score(&self) -> u32;

    /// Überschreibt die Bestpunktzahl bedingungslos.
    fn store_best_score(&mut self, score: u32) -> anyhow::Result<()>;

    /// Speichert `score` nur, wenn er strikt größer ist. Gibt `true` bei neuem Rekord zurück.
    fn try_set_best(&mut self, score: u32) -> anyhow::Result<bool> {
        if score > self.best_score() {
            self.store_best_score(score)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

/// Dateiformat der Fortschritts-Datei.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProgressFile {
    #[serde(default)]
    best_score: u32,
}

/// Bestpunktzahl in einer TOML-Datei (`best_score = N`).
#[derive(Debug, Clone)]
pub struct FileProgressRepository {
    path: PathBuf,
    best_score: u32,
}

impl FileProgressRepository {
    /// Öffnet die Datei. Fehlende oder fehlerhafte Datei: Bestpunktzahl 0.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best_score = Self::read(&path);
        Self { path, best_score }
    }

    fn read(path: &Path) -> u32 {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                log::info!("Kein Fortschritt gefunden unter: {}", path.display());
                return 0;
            }
        };
        match toml::from_str::<ProgressFile>(&content) {
            Ok(progress) => progress.best_score,
            Err(e) => {
                log::warn!("Fortschritts-Datei fehlerhaft, starte bei 0: {}", e);
                0
            }
        }
    }

    /// Pfad der Fortschritts-Datei.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BestScoreRepository for FileProgressRepository {
    fn best_score(&self) -> u32 {
        self.best_score
    }

    fn store_best_score(&mut self, score: u32) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(&ProgressFile { best_score: score })?;
        std::fs::write(&self.path, content)?;
        self.best_score = score;
        log::info!(
            "Bestpunktzahl {} gespeichert nach: {}",
            score,
            self.path.display()
        );
        Ok(())
    }
}

/// Flüchtige Bestpunktzahl für Tests und Hosts ohne Dateisystem.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProgressRepository {
    best_score: u32,
}

impl InMemoryProgressRepository {
    /// Erstellt ein Repository mit vorgegebener Bestpunktzahl.
    pub fn with_best_score(best_score: u32) -> Self {
        Self { best_score }
    }
}

impl BestScoreRepository for InMemoryProgressRepository {
    fn best_score(&self) -> u32 {
        self.best_score
    }

    fn store_best_score(&mut self, score: u32) -> anyhow::Result<()> {
        self.best_score = score;
        Ok(())
    }
}
