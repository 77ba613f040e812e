//! Handler für Platzierung und Gesten-Manipulation.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::TrackingProvider;
use crate::input::Touch;
use glam::Vec2;

/// Platziert das Objekt der aktuellen Frage.
pub fn commit(
    state: &mut AppState,
    tracking: &dyn TrackingProvider,
    screen_pos: Vec2,
) -> anyhow::Result<()> {
    use_cases::quiz::commit_placement(state, tracking, screen_pos)
}

/// Wendet Touches auf das platzierte Objekt an.
pub fn manipulate(state: &mut AppState, tracking: &dyn TrackingProvider, touches: &[Touch]) {
    use_cases::quiz::manipulate_object(state, tracking, touches);
}
