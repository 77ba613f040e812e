//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod gesture;
pub mod handlers;
mod intent_mapping;
pub mod outbox;
/// Application State
///
/// Dieses Modul verwaltet den Zustand eines Durchlaufs (Fragen, Session, Objekt, Tracking).
pub mod state;
pub mod use_cases;

pub use command_log::{CommandLog, LoggedCommand};
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use gesture::{GestureContext, GestureManipulator, GestureOutcome};
pub use outbox::{EventQueue, FeedbackKind, QuizEvent};
pub use state::{ActiveObject, AppState, PlacementState, QuizPhase, RunState, ViewState};
pub use use_cases::placement::{PlacementResolver, ResolvedPlacement};
