//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use crate::core::ShapeKind;
use crate::input::Touch;
use glam::Vec2;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone, PartialEq)]
pub enum AppIntent {
    /// Neuen Durchlauf starten (`None` = zufälliger Seed)
    StartRunRequested { seed: Option<u64> },
    /// Antwort-Text wurde abgeschickt
    AnswerSubmitted { raw: String },
    /// Aktuelle Frage überspringen
    SkipRequested,
    /// Durchlauf vorzeitig beenden
    FinishRunRequested,
    /// Formfilter geändert (`None` = alle Formen), startet neu
    ShapeFilterChanged { shape: Option<ShapeKind> },
    /// Flächen-Visualisierung umschalten
    TogglePlanesRequested,
    /// Qualifizierender Tap zum Platzieren
    PlacementTapped { screen_pos: Vec2 },
    /// Touches dieses Frames für die Gesten-Manipulation
    TouchesUpdated { touches: Vec<Touch> },
}

/// Commands sind mutierende Schritte, die zentral ausgeführt werden.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    /// Fragen auswählen, Session zurücksetzen
    StartRun { seed: Option<u64> },
    /// Formfilter setzen
    SetShapeFilter { shape: Option<ShapeKind> },
    /// Antwort bewerten
    SubmitAnswer { raw: String },
    /// Frage ohne Bewertung überspringen
    SkipQuestion,
    /// Durchlauf abschließen
    FinishRun,
    /// Objekt an der aufgelösten Pose platzieren
    CommitPlacement { screen_pos: Vec2 },
    /// Gesten auf das platzierte Objekt anwenden
    ManipulateObject { touches: Vec<Touch> },
    /// Flächen-Visualisierung setzen
    SetPlanesVisible { visible: bool },
}
