//! Handler für die Darstellung erkannter Flächen.

use crate::app::use_cases;
use crate::app::AppState;

/// Zeigt oder versteckt die Flächen-Visualisierung.
pub fn set_planes_visible(state: &mut AppState, visible: bool) {
    use_cases::placement::set_planes_visible(state, visible);
}
