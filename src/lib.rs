//! AR-Geometrie-Quiz Library.
//! Platzierungs-, Tracking- und Gesten-Kern plus Quiz-Zustandsmaschine,
//! als Library exportiert für Hosts, Tests und Benchmarks.

pub mod app;
pub mod core;
pub mod input;
pub mod shared;
pub mod storage;

pub use app::{
    AppCommand, AppController, AppIntent, AppState, FeedbackKind, PlacementResolver, QuizEvent,
    QuizPhase, ResolvedPlacement,
};
pub use core::{
    compute_score, parse_answer, select_questions, AnchorHandle, AnchorStore, ArCamera,
    Dimensions, GeometryQuestion, MetricKind, PlacedObject, PlacementMode, Pose, QuestionBank,
    Session, ShapeKind, SimulatedPlane, SimulatedTrackingProvider, SurfaceId, TrackingProvider,
    TrackingState, TrackingStateMachine,
};
pub use input::{FrameInput, Touch, TouchPhase};
pub use shared::QuizOptions;
pub use storage::{BestScoreRepository, FileProgressRepository, InMemoryProgressRepository};
