//! Feature-Handler: dünne Schicht zwischen Controller-Dispatch und Use-Cases.
//!
//! Jeder Handler entspricht einer Command-Gruppe.

pub mod placement;
pub mod quiz;
pub mod run;
pub mod view;
