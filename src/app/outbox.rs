//! Ausgehende Events für UI/Audio und die Warteschlange, die sie pro Tick sammelt.
//!
//! Mutationen passieren ausschließlich im Controller. Events werden nur
//! gesammelt und nach dem Tick in Reihenfolge an den Host übergeben.

use crate::core::{AnchorHandle, GeometryQuestion, PlacementMode, Pose, TrackingState};
use std::collections::VecDeque;
use std::sync::Arc;

/// Art einer Rückmeldung an den Spieler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackKind {
    /// Eingabe ist keine Zahl
    InvalidInput,
    /// Antwort richtig
    Correct,
    /// Antwort falsch (mit Hinweis)
    Incorrect,
    /// Objekt wurde platziert
    Placed,
    /// Antwort ohne platziertes Objekt
    PlacementRequired,
}

/// Event an die Host-Kollaborateure.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizEvent {
    /// Neue Frage aktiv
    QuestionChanged {
        /// Aktive Frage
        question: Arc<GeometryQuestion>,
        /// Position im Durchlauf (1-basiert)
        index: usize,
        /// Anzahl Fragen im Durchlauf
        total: usize,
        /// Formel-Hinweis
        formula: Option<&'static str>,
    },
    /// Neue Rückmeldung
    FeedbackChanged { kind: FeedbackKind, message: String },
    /// Durchlauf beendet
    RunFinished {
        score: u32,
        best_score: u32,
        new_best: bool,
    },
    /// Punktzahl hat sich geändert
    ScoreChanged { score: u32 },
    /// Objekt wurde platziert
    ObjectPlaced {
        anchor: AnchorHandle,
        pose: Pose,
        mode: PlacementMode,
    },
    /// Objekt wurde entfernt
    ObjectRemoved { anchor: AnchorHandle },
    /// Objekt wurde per Geste ausgewählt oder losgelassen
    SelectionChanged { selected: bool },
    /// Autoritativer Tracking-Zustand hat sich geändert
    TrackingStateChanged { state: TrackingState },
    /// Platzierung wechselt zwischen echt und Fallback
    PlacementModeChanged { mode: PlacementMode },
    /// Vorschau-Pose erscheint oder verschwindet
    PlacementPreviewChanged { pose: Option<Pose> },
    /// Flächen-Visualisierung ein/aus
    PlanesVisibilityChanged { visible: bool },
}

/// FIFO der Events eines Ticks.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<QuizEvent>,
}

impl EventQueue {
    /// Erstellt eine leere Warteschlange.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt ein Event an.
    pub fn push(&mut self, event: QuizEvent) {
        self.events.push_back(event);
    }

    /// Entnimmt alle Events in Reihenfolge.
    pub fn drain(&mut self) -> Vec<QuizEvent> {
        self.events.drain(..).collect()
    }

    /// Anzahl wartender Events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Gibt `true` zurück, wenn keine Events warten.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Read-only Sicht auf wartende Events.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &QuizEvent> {
        self.events.iter()
    }
}
