//! Zentrale Konfiguration für das AR-Geometrie-Quiz.
//!
//! `QuizOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Durchlauf ───────────────────────────────────────────────────────

/// Anzahl Fragen pro Durchlauf.
pub const QUESTIONS_PER_RUN: usize = 10;
/// Standard-Dateiname der Fragenbank.
pub const QUESTION_FILE: &str = "questions.json";
/// Standard-Dateiname für den Fortschritt (Bestpunktzahl).
pub const PROGRESS_FILE: &str = "progress.toml";

// ── Platzierung ─────────────────────────────────────────────────────

/// Virtueller Boden liegt so weit unter der Kamera (Meter).
pub const FALLBACK_FLOOR_OFFSET: f32 = 1.5;
/// Maximale Distanz eines Treffers auf dem virtuellen Boden (Meter).
pub const FALLBACK_MAX_DISTANCE: f32 = 10.0;
/// Abstand vor der Kamera, wenn der virtuelle Boden nicht getroffen wird.
pub const FALLBACK_FRONT_DISTANCE: f32 = 2.0;

// ── Tracking ────────────────────────────────────────────────────────

/// Startfenster: so lange darf der Provider schweigen, bevor Fallback angenommen wird.
pub const TRACKING_STARTUP_WINDOW_SECS: f32 = 3.0;

// ── Gesten ──────────────────────────────────────────────────────────

/// Pixel Abstandsänderung für +100 % Skalierung.
pub const PINCH_SCALE_DIVISOR: f32 = 500.0;
/// Minimale Skalierung.
pub const SCALE_MIN: f32 = 0.05;
/// Maximale Skalierung.
pub const SCALE_MAX: f32 = 2.0;
/// Minimale Ziehtiefe vor der Kamera.
pub const DRAG_MIN_DEPTH: f32 = 0.2;
/// Ziehtiefe, wenn das Objekt hinter der Kamera liegt.
pub const DRAG_DEFAULT_DEPTH: f32 = 1.0;

// ── Leerlauf-Animation ──────────────────────────────────────────────

/// Drehgeschwindigkeit in Grad pro Sekunde.
pub const IDLE_ROTATION_SPEED_DEG: f32 = 15.0;
/// Schwebe-Frequenz.
pub const IDLE_BOB_FREQUENCY: f32 = 0.5;
/// Schwebe-Amplitude in Metern.
pub const IDLE_BOB_AMPLITUDE: f32 = 0.05;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Quiz-Optionen.
/// Wird als `ar_geometry_quiz.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizOptions {
    // ── Durchlauf ───────────────────────────────────────────────
    /// Fragen pro Durchlauf
    pub questions_per_run: usize,
    /// Pfad zur Fragenbank (relativ zur Optionen-Datei)
    pub question_file: String,
    /// Pfad zur Fortschritts-Datei (relativ zur Optionen-Datei)
    pub progress_file: String,

    // ── Platzierung ─────────────────────────────────────────────
    /// Abstand des virtuellen Bodens unter der Kamera
    pub fallback_floor_offset: f32,
    /// Maximale Treffer-Distanz auf dem virtuellen Boden
    pub fallback_max_distance: f32,
    /// Abstand vor der Kamera ohne Bodentreffer
    pub fallback_front_distance: f32,

    // ── Tracking ────────────────────────────────────────────────
    /// Startfenster für schweigende Provider
    pub tracking_startup_window_secs: f32,

    // ── Gesten ──────────────────────────────────────────────────
    /// Pixel für +100 % Skalierung beim Pinch
    pub pinch_scale_divisor: f32,
    /// Minimale Skalierung
    pub scale_min: f32,
    /// Maximale Skalierung
    pub scale_max: f32,
    /// Minimale Ziehtiefe
    pub drag_min_depth: f32,
    /// Ziehtiefe für Objekte hinter der Kamera
    pub drag_default_depth: f32,

    // ── Leerlauf-Animation ──────────────────────────────────────
    /// Leerlauf-Animation aktiv
    pub idle_animation: bool,
    /// Drehgeschwindigkeit in Grad/s
    pub idle_rotation_speed_deg: f32,
    /// Schwebe-Frequenz
    pub idle_bob_frequency: f32,
    /// Schwebe-Amplitude
    pub idle_bob_amplitude: f32,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            questions_per_run: QUESTIONS_PER_RUN,
            question_file: QUESTION_FILE.to_string(),
            progress_file: PROGRESS_FILE.to_string(),

            fallback_floor_offset: FALLBACK_FLOOR_OFFSET,
            fallback_max_distance: FALLBACK_MAX_DISTANCE,
            fallback_front_distance: FALLBACK_FRONT_DISTANCE,

            tracking_startup_window_secs: TRACKING_STARTUP_WINDOW_SECS,

            pinch_scale_divisor: PINCH_SCALE_DIVISOR,
            scale_min: SCALE_MIN,
            scale_max: SCALE_MAX,
            drag_min_depth: DRAG_MIN_DEPTH,
            drag_default_depth: DRAG_DEFAULT_DEPTH,

            idle_animation: true,
            idle_rotation_speed_deg: IDLE_ROTATION_SPEED_DEG,
            idle_bob_frequency: IDLE_BOB_FREQUENCY,
            idle_bob_amplitude: IDLE_BOB_AMPLITUDE,
        }
    }
}

impl QuizOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        Self::base_dir().join("ar_geometry_quiz.toml")
    }

    /// Verzeichnis der Binary (Basis für relative Pfade).
    pub fn base_dir() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("ar-geometry-quiz"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .to_path_buf()
    }

    /// Löst einen konfigurierten Pfad relativ zu `base` auf.
    pub fn resolve(base: &std::path::Path, configured: &str) -> std::path::PathBuf {
        let path = std::path::Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            base.join(path)
        }
    }

    /// Skalierung in den konfigurierten Grenzen.
    pub fn clamp_scale(&self, scale: f32) -> f32 {
        let min = self.scale_min.min(self.scale_max);
        scale.clamp(min, self.scale_max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let opts: QuizOptions =
            toml::from_str("questions_per_run = 3\nscale_max = 4.0\n").expect("TOML sollte parsen");
        assert_eq!(opts.questions_per_run, 3);
        assert_eq!(opts.scale_max, 4.0);
        assert_eq!(opts.scale_min, SCALE_MIN);
        assert_eq!(opts.question_file, QUESTION_FILE);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("ar_geometry_quiz_missing_options.toml");
        let _ = std::fs::remove_file(&path);
        assert_eq!(QuizOptions::load_from_file(&path), QuizOptions::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "ar_geometry_quiz_options_{}.toml",
            std::process::id()
        ));
        let opts = QuizOptions {
            questions_per_run: 4,
            idle_animation: false,
            ..QuizOptions::default()
        };
        opts.save_to_file(&path).expect("Speichern sollte klappen");
        assert_eq!(QuizOptions::load_from_file(&path), opts);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_clamp_scale() {
        let opts = QuizOptions::default();
        assert_eq!(opts.clamp_scale(0.0), SCALE_MIN);
        assert_eq!(opts.clamp_scale(9.0), SCALE_MAX);
        assert_eq!(opts.clamp_scale(1.0), 1.0);
    }
}
