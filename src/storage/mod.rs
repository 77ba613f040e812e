//! Persistenz: Bestpunktzahl und Laden der Fragenbank von der Platte.

mod progress;
mod questions;

pub use progress::{BestScoreRepository, FileProgressRepository, InMemoryProgressRepository};
pub use questions::load_question_bank;
