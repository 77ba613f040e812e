//! Fragenbank von der Platte laden.

use crate::core::QuestionBank;
use crate::shared::QuizOptions;
use std::path::Path;

/// Lädt die in den Optionen konfigurierte Fragenbank relativ zu `base_dir`.
///
/// Fehlende oder fehlerhafte Datei ergibt eine leere Bank; der Durchlauf endet dann sofort.
pub fn load_question_bank(options: &QuizOptions, base_dir: &Path) -> QuestionBank {
    let path = QuizOptions::resolve(base_dir, &options.question_file);
    let bank = QuestionBank::load_from_file(&path);
    if bank.is_empty() {
        log::warn!("Keine gültigen Fragen in {}", path.display());
    }
    bank
}
