//! Application Controller für zentrale Event-Verarbeitung.

use super::outbox::QuizEvent;
use super::{AppCommand, AppIntent, AppState, QuizPhase};
use crate::core::TrackingProvider;
use crate::input::{self, FrameInput};
use crate::storage::{BestScoreRepository, InMemoryProgressRepository};

/// Orchestriert Frames, Intents und Use-Cases auf den AppState.
///
/// Besitzt das Repository für die Bestpunktzahl; der Zustand selbst lebt im `AppState`.
pub struct AppController {
    progress: Box<dyn BestScoreRepository>,
}

impl Default for AppController {
    fn default() -> Self {
        Self::new()
    }
}

impl AppController {
    /// Erstellt einen Controller mit flüchtiger Bestpunktzahl.
    pub fn new() -> Self {
        Self::with_repository(Box::new(InMemoryProgressRepository::default()))
    }

    /// Erstellt einen Controller mit gegebenem Repository.
    pub fn with_repository(progress: Box<dyn BestScoreRepository>) -> Self {
        Self { progress }
    }

    /// Gespeicherte Bestpunktzahl.
    pub fn best_score(&self) -> u32 {
        self.progress.best_score()
    }

    /// Ein Frame: Tracking → Anker → Session-Zeit → Platzierung/Gesten → UI-Intents → Animation.
    ///
    /// Gibt die Events dieses Frames in Reihenfolge zurück.
    pub fn tick(
        &mut self,
        state: &mut AppState,
        tracking: &dyn TrackingProvider,
        frame: FrameInput,
    ) -> Vec<QuizEvent> {
        let FrameInput {
            delta_seconds,
            camera,
            touches,
            intents,
        } = frame;
        let delta_seconds = if delta_seconds.is_finite() {
            delta_seconds.max(0.0)
        } else {
            0.0
        };

        state.view.camera = camera;
        super::use_cases::tracking::refresh(state, tracking, delta_seconds);

        if state.phase.is_in_progress() {
            state.session.tick(delta_seconds);
            super::use_cases::quiz::publish_score(state);
        }

        // Phase zu Frame-Beginn entscheidet: ein frisch platziertes Objekt
        // wird frühestens im nächsten Frame manipuliert.
        let mut frame_intents = Vec::with_capacity(intents.len() + 1);
        match state.phase {
            QuizPhase::AwaitingPlacement => {
                super::use_cases::placement::refresh_preview(state, tracking);
                if let Some(screen_pos) = input::placement_tap(&touches) {
                    frame_intents.push(AppIntent::PlacementTapped { screen_pos });
                }
            }
            QuizPhase::AwaitingAnswer if state.has_object() => {
                let usable = input::gesture_touches(&touches);
                if !usable.is_empty() || state.is_object_selected() {
                    frame_intents.push(AppIntent::TouchesUpdated { touches: usable });
                }
            }
            _ => {}
        }
        frame_intents.extend(intents);

        for intent in frame_intents {
            if let Err(e) = self.handle_intent(state, tracking, intent) {
                log::error!("Intent fehlgeschlagen: {:#}", e);
            }
        }

        if let Some(active) = state.active.as_mut() {
            active.object.advance_idle(delta_seconds);
        }

        state.events.drain()
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(
        &mut self,
        state: &mut AppState,
        tracking: &dyn TrackingProvider,
        intent: AppIntent,
    ) -> anyhow::Result<()> {
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, tracking, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        tracking: &dyn TrackingProvider,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        // Gesten-Frames nicht loggen, sie fluten sonst das Log
        if !matches!(command, AppCommand::ManipulateObject { .. }) {
            state.command_log.record(state.phase, &command);
        }
        use super::handlers;

        match command {
            // === Durchlauf ===
            AppCommand::StartRun { seed } => {
                handlers::run::start(state, self.progress.as_mut(), seed)?
            }
            AppCommand::SetShapeFilter { shape } => handlers::run::set_shape_filter(state, shape),
            AppCommand::FinishRun => handlers::run::finish(state, self.progress.as_mut())?,

            // === Quiz ===
            AppCommand::SubmitAnswer { raw } => {
                handlers::quiz::submit_answer(state, self.progress.as_mut(), &raw)?
            }
            AppCommand::SkipQuestion => handlers::quiz::skip(state, self.progress.as_mut())?,

            // === Platzierung & Gesten ===
            AppCommand::CommitPlacement { screen_pos } => {
                handlers::placement::commit(state, tracking, screen_pos)?
            }
            AppCommand::ManipulateObject { touches } => {
                handlers::placement::manipulate(state, tracking, &touches)
            }

            // === Darstellung ===
            AppCommand::SetPlanesVisible { visible } => {
                handlers::view::set_planes_visible(state, visible)
            }
        }

        Ok(())
    }
}
