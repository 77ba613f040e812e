//! Gesten-Manipulator: Ein-Finger-Ziehen, Zwei-Finger-Pinch und -Drehen
//! für genau ein platziertes Objekt.

mod manipulator;
mod state;


pub use manipulator::{GestureContext, GestureOutcome};
pub use state::{GestureManipulator, GestureState, PairSample};
