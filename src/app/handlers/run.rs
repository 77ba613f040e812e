//! Handler für Start, Filter und Abschluss eines Durchlaufs.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ShapeKind;
use crate::storage::BestScoreRepository;

/// Startet einen neuen Durchlauf.
pub fn start(
    state: &mut AppState,
    progress: &mut dyn BestScoreRepository,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    use_cases::run::start_run(state, progress, seed)
}

/// Setzt den Formfilter.
pub fn set_shape_filter(state: &mut AppState, shape: Option<ShapeKind>) {
    use_cases::run::set_shape_filter(state, shape);
}

/// Beendet den Durchlauf vorzeitig.
pub fn finish(state: &mut AppState, progress: &mut dyn BestScoreRepository) -> anyhow::Result<()> {
    use_cases::run::finish_run(state, progress)
}
