//! Geteilte Typen für schichtübergreifende Verträge.
//!
//! Enthält die Konfiguration, die `core`, `app` und `storage` gemeinsam lesen.

pub mod options;

pub use options::QuizOptions;
pub use options::{QUESTIONS_PER_RUN, TRACKING_STARTUP_WINDOW_SECS};
