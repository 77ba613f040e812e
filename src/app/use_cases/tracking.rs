//! Use-Case: Tracking-Meldung des Frames übernehmen und Anker nachführen.

use crate::app::outbox::QuizEvent;
use crate::app::AppState;
use crate::core::TrackingProvider;

/// Liest den Provider-Zustand und zieht gekoppelte Anker mit ihren Flächen mit.
///
/// Läuft jeden Frame vor Platzierung und Gesten.
pub fn refresh(state: &mut AppState, tracking: &dyn TrackingProvider, delta_seconds: f32) {
    if let Some(changed) = state.tracking.update(tracking.report(), delta_seconds) {
        state
            .events
            .push(QuizEvent::TrackingStateChanged { state: changed });
    }
    state.anchors.refresh(tracking);
}
