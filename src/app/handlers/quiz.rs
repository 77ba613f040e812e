//! Handler für Antworten und Überspringen.

use crate::app::use_cases;
use crate::app::AppState;
use crate::storage::BestScoreRepository;

/// Bewertet eine Antwort.
pub fn submit_answer(
    state: &mut AppState,
    progress: &mut dyn BestScoreRepository,
    raw: &str,
) -> anyhow::Result<()> {
    use_cases::quiz::submit_answer(state, progress, raw)
}

/// Überspringt die aktuelle Frage.
pub fn skip(state: &mut AppState, progress: &mut dyn BestScoreRepository) -> anyhow::Result<()> {
    use_cases::quiz::skip(state, progress)
}
