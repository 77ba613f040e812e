//! Mapping von UI-Intents auf mutierende App-Commands.

use super::{AppCommand, AppIntent, AppState, QuizPhase};

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    match intent {
        AppIntent::StartRunRequested { seed } => vec![AppCommand::StartRun { seed }],
        AppIntent::AnswerSubmitted { raw } => vec![AppCommand::SubmitAnswer { raw }],
        AppIntent::SkipRequested => vec![AppCommand::SkipQuestion],
        AppIntent::FinishRunRequested => vec![AppCommand::FinishRun],
        AppIntent::ShapeFilterChanged { shape } => vec![
            AppCommand::SetShapeFilter { shape },
            AppCommand::StartRun { seed: None },
        ],
        AppIntent::TogglePlanesRequested => vec![AppCommand::SetPlanesVisible {
            visible: !state.view.planes_visible,
        }],
        AppIntent::PlacementTapped { screen_pos } => {
            // Genau eine Platzierung pro Frage
            if state.phase == QuizPhase::AwaitingPlacement && !state.has_object() {
                vec![AppCommand::CommitPlacement { screen_pos }]
            } else {
                Vec::new()
            }
        }
        AppIntent::TouchesUpdated { touches } => {
            if state.has_object() {
                vec![AppCommand::ManipulateObject { touches }]
            } else {
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests;
