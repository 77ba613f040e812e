//! Core-Domänentypen: Geometrie, Fragen, Session, Tracking, Anker, Objekte.

pub mod anchor;
pub mod camera;
pub mod geometry;
pub mod placed_object;
pub mod pose;
pub mod question;
pub mod question_bank;
pub mod session;
pub mod simulated_tracking;
pub mod tracking;

pub use anchor::{Anchor, AnchorAttachment, AnchorHandle, AnchorStore};
pub use camera::ArCamera;
pub use geometry::{Dimensions, GeometryError, MetricKind, ShapeKind};
pub use placed_object::{CollisionBox, IdleAnimation, ObjectTransform, PlacedObject};
pub use pose::{HorizontalPlane, Pose, Ray};
pub use question::{format_hint_value, parse_answer, GeometryQuestion};
pub use question_bank::{select_questions, QuestionBank, QuestionBankError};
pub use session::{compute_score, Session};
pub use simulated_tracking::{SimulatedPlane, SimulatedTrackingProvider};
pub use tracking::{
    NotTrackingReason, PlacementMode, SurfaceHit, SurfaceId, TrackingProvider, TrackingState,
    TrackingStateMachine,
};
