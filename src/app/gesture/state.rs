//! State-Definitionen und Konstruktor für den Gesten-Manipulator.

use glam::Vec2;

/// Letzte Messung eines Finger-Paars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairSample {
    /// Kennungen der beiden Finger
    pub ids: (u64, u64),
    /// Abstand der Finger in Pixeln
    pub distance: f32,
    /// Winkel der Verbindungslinie in Grad
    pub angle_deg: f32,
}

/// Flüchtiger Zustand pro Objekt. Wird mit dem Objekt verworfen.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureState {
    /// Objekt ist ausgewählt
    pub selected: bool,
    /// Letzter Ein-Finger-Touch (Kennung, Position)
    pub last_single: Option<(u64, Vec2)>,
    /// Letzte Zwei-Finger-Messung
    pub last_pair: Option<PairSample>,
}

/// An genau ein `PlacedObject` gebunden.
#[derive(Debug, Clone, Default)]
pub struct GestureManipulator {
    pub(crate) state: GestureState,
}

impl GestureManipulator {
    /// Erstellt einen Manipulator ohne Auswahl.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ist das Objekt ausgewählt?
    pub fn is_selected(&self) -> bool {
        self.state.selected
    }

    /// Read-only Sicht auf den Gesten-Zustand.
    pub fn state(&self) -> &GestureState {
        &self.state
    }
}
