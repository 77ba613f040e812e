//! Use-Cases der Application-Layer-Orchestrierung.

pub mod placement;
pub mod quiz;
pub mod run;
pub mod tracking;
