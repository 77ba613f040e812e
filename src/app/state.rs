//! Application State: zentrale Datenhaltung eines Durchlaufs.

use super::gesture::GestureManipulator;
use super::outbox::EventQueue;
use super::use_cases::placement::ResolvedPlacement;
use super::CommandLog;
use crate::core::{
    AnchorStore, ArCamera, GeometryQuestion, PlacedObject, PlacementMode, QuestionBank, Session,
    ShapeKind, TrackingStateMachine,
};
use crate::shared::QuizOptions;
use std::sync::Arc;

/// Phase des Quiz-Durchlaufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QuizPhase {
    /// Noch kein Durchlauf gestartet bzw. Auswahl läuft
    #[default]
    Loading,
    /// Aktuelle Frage hat noch kein Objekt
    AwaitingPlacement,
    /// Objekt steht, Antwort erwartet
    AwaitingAnswer,
    /// Durchlauf abgeschlossen
    Finished,
}

impl QuizPhase {
    /// Läuft gerade eine Frage (Zeit zählt)?
    pub fn is_in_progress(self) -> bool {
        matches!(self, QuizPhase::AwaitingPlacement | QuizPhase::AwaitingAnswer)
    }
}

/// Ausgewählte Fragen und Fortschritt im Durchlauf.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    /// Ausgewählte Fragen (Referenzen in die Bank)
    pub questions: Vec<Arc<GeometryQuestion>>,
    /// Index der aktuellen Frage (0-basiert)
    pub index: usize,
    /// Seed der Auswahl
    pub seed: u64,
    /// Aktiver Formfilter
    pub shape_filter: Option<ShapeKind>,
    /// Zuletzt gemeldete Punktzahl
    pub reported_score: u32,
}

impl RunState {
    /// Aktuelle Frage, falls der Index gültig ist.
    pub fn current_question(&self) -> Option<&Arc<GeometryQuestion>> {
        self.questions.get(self.index)
    }

    /// Anzahl ausgewählter Fragen.
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Das platzierte Objekt und sein Gesten-Zustand.
#[derive(Debug, Clone)]
pub struct ActiveObject {
    /// Objekt der aktuellen Frage
    pub object: PlacedObject,
    /// Gesten-Manipulator, exklusiv an dieses Objekt gebunden
    pub gesture: GestureManipulator,
}

impl ActiveObject {
    /// Bindet einen frischen Manipulator an das Objekt.
    pub fn new(object: PlacedObject) -> Self {
        Self {
            object,
            gesture: GestureManipulator::new(),
        }
    }
}

/// Kamera- und Darstellungszustand.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Kamera des aktuellen Frames
    pub camera: Option<ArCamera>,
    /// Werden erkannte Flächen angezeigt?
    pub planes_visible: bool,
}

impl ViewState {
    /// Erstellt den Standard-View-State.
    pub fn new() -> Self {
        Self {
            camera: None,
            planes_visible: true,
        }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

/// Zustand des Platzierungs-Resolvers.
#[derive(Debug, Clone, Default)]
pub struct PlacementState {
    /// Vorschau-Pose in der Bildschirmmitte
    pub preview: Option<ResolvedPlacement>,
    /// Zuletzt gemeldeter Modus
    pub mode: PlacementMode,
}

/// Hauptzustand der Anwendung
#[derive(Debug)]
pub struct AppState {
    /// Phase des Durchlaufs
    pub phase: QuizPhase,
    /// Fragenbank (unveränderlich)
    pub bank: Arc<QuestionBank>,
    /// Ausgewählte Fragen und Index
    pub run: RunState,
    /// Session des Durchlaufs
    pub session: Session,
    /// Klassifizierter Tracking-Zustand
    pub tracking: TrackingStateMachine,
    /// Lebende Anker
    pub anchors: AnchorStore,
    /// Objekt der aktuellen Frage
    pub active: Option<ActiveObject>,
    /// View-State
    pub view: ViewState,
    /// Platzierungs-Zustand
    pub placement: PlacementState,
    /// Zu Beginn des Durchlaufs gelesene Bestpunktzahl
    pub best_score: u32,
    /// Laufzeit-Optionen
    pub options: QuizOptions,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Events des laufenden Ticks
    pub events: EventQueue,
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State
    pub fn new() -> Self {
        Self::with_question_bank(QuestionBank::default(), QuizOptions::default())
    }

    /// Erstellt einen State mit Fragenbank und Optionen.
    pub fn with_question_bank(bank: QuestionBank, options: QuizOptions) -> Self {
        Self {
            phase: QuizPhase::Loading,
            bank: Arc::new(bank),
            run: RunState::default(),
            session: Session::new(),
            tracking: TrackingStateMachine::new(options.tracking_startup_window_secs),
            anchors: AnchorStore::new(),
            active: None,
            view: ViewState::new(),
            placement: PlacementState::default(),
            best_score: 0,
            options,
            command_log: CommandLog::new(),
            events: EventQueue::new(),
        }
    }

    /// Aktuelle Frage.
    pub fn current_question(&self) -> Option<&Arc<GeometryQuestion>> {
        self.run.current_question()
    }

    /// Existiert ein platziertes Objekt?
    pub fn has_object(&self) -> bool {
        self.active.is_some()
    }

    /// Ist das Objekt gerade per Geste ausgewählt?
    pub fn is_object_selected(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| active.gesture.is_selected())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
