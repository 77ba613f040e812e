//! Eingabe-Snapshot pro Frame: Touches, Kamera und UI-Intents des Hosts.

use crate::app::AppIntent;
use crate::core::ArCamera;
use glam::Vec2;

/// Phase eines Touches in diesem Frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// Finger hat den Bildschirm berührt
    Began,
    /// Finger liegt weiter auf (bewegt oder still)
    Moved,
    /// Finger wurde abgehoben
    Ended,
    /// System hat den Touch abgebrochen
    Canceled,
}

impl TouchPhase {
    /// Liegt der Finger noch auf?
    pub fn is_active(self) -> bool {
        matches!(self, TouchPhase::Began | TouchPhase::Moved)
    }
}

/// Ein Touch in Screen-Pixeln (Ursprung oben links).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// Stabile Kennung über die Lebensdauer des Fingers
    pub id: u64,
    /// Position in Pixeln
    pub position: Vec2,
    /// Phase in diesem Frame
    pub phase: TouchPhase,
    /// Wurde der Touch von einem UI-Overlay abgefangen?
    pub over_ui: bool,
}

impl Touch {
    /// Touch, der nicht von der UI abgefangen wurde.
    pub fn new(id: u64, position: Vec2, phase: TouchPhase) -> Self {
        Self {
            id,
            position,
            phase,
            over_ui: false,
        }
    }

    /// Markiert den Touch als von der UI abgefangen.
    pub fn over_ui(mut self) -> Self {
        self.over_ui = true;
        self
    }
}

/// Alles, was der Host pro Frame an den Kern übergibt.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Zeit seit dem letzten Frame in Sekunden
    pub delta_seconds: f32,
    /// Aktuelle Kamera (`None` = keine Kamera verfügbar)
    pub camera: Option<ArCamera>,
    /// Touches dieses Frames
    pub touches: Vec<Touch>,
    /// UI-Intents dieses Frames (Antwort, Überspringen, Filter, ...)
    pub intents: Vec<AppIntent>,
}

impl FrameInput {
    /// Frame ohne Eingaben.
    pub fn new(delta_seconds: f32, camera: Option<ArCamera>) -> Self {
        Self {
            delta_seconds,
            camera,
            ..Self::default()
        }
    }

    /// Fügt einen Touch hinzu.
    pub fn with_touch(mut self, touch: Touch) -> Self {
        self.touches.push(touch);
        self
    }

    /// Fügt einen UI-Intent hinzu.
    pub fn with_intent(mut self, intent: AppIntent) -> Self {
        self.intents.push(intent);
        self
    }
}

/// Erster qualifizierender Platzierungs-Tap: Phase `Began`, nicht von der UI abgefangen.
pub fn placement_tap(touches: &[Touch]) -> Option<Vec2> {
    touches
        .iter()
        .find(|t| t.phase == TouchPhase::Began && !t.over_ui)
        .map(|t| t.position)
}

/// Touches, die Gesten steuern dürfen (nicht von der UI abgefangen).
pub fn gesture_touches(touches: &[Touch]) -> Vec<Touch> {
    touches.iter().filter(|t| !t.over_ui).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_tap_ignores_ui_and_moves() {
        let touches = [
            Touch::new(1, Vec2::new(10.0, 10.0), TouchPhase::Began).over_ui(),
            Touch::new(2, Vec2::new(20.0, 20.0), TouchPhase::Moved),
            Touch::new(3, Vec2::new(30.0, 30.0), TouchPhase::Began),
        ];
        assert_eq!(placement_tap(&touches), Some(Vec2::new(30.0, 30.0)));
        assert_eq!(placement_tap(&touches[..2]), None);
    }

    #[test]
    fn test_gesture_touches_drop_intercepted() {
        let touches = [
            Touch::new(1, Vec2::ZERO, TouchPhase::Moved).over_ui(),
            Touch::new(2, Vec2::ONE, TouchPhase::Moved),
        ];
        let usable = gesture_touches(&touches);
        assert_eq!(usable.len(), 1);
        assert_eq!(usable[0].id, 2);
    }
}
