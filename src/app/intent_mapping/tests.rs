use crate::app::{AppCommand, AppIntent, AppState, QuizPhase};
use crate::core::ShapeKind;
use crate::input::{Touch, TouchPhase};
use glam::Vec2;

use super::map_intent_to_commands;

#[test]
fn shape_filter_changed_maps_to_filter_then_restart() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ShapeFilterChanged {
            shape: Some(ShapeKind::Cylinder),
        },
    );

    assert_eq!(commands.len(), 2);
    assert!(matches!(
        commands[0],
        AppCommand::SetShapeFilter {
            shape: Some(ShapeKind::Cylinder)
        }
    ));
    assert!(matches!(commands[1], AppCommand::StartRun { seed: None }));
}

#[test]
fn toggle_planes_flips_current_visibility() {
    let mut state = AppState::new();
    state.view.planes_visible = false;

    let commands = map_intent_to_commands(&state, AppIntent::TogglePlanesRequested);

    assert_eq!(commands, vec![AppCommand::SetPlanesVisible { visible: true }]);
}

#[test]
fn placement_tap_is_dropped_outside_awaiting_placement() {
    let mut state = AppState::new();
    let tap = AppIntent::PlacementTapped {
        screen_pos: Vec2::new(10.0, 20.0),
    };

    assert!(map_intent_to_commands(&state, tap.clone()).is_empty());

    state.phase = QuizPhase::AwaitingPlacement;
    let commands = map_intent_to_commands(&state, tap);
    assert_eq!(
        commands,
        vec![AppCommand::CommitPlacement {
            screen_pos: Vec2::new(10.0, 20.0)
        }]
    );
}

#[test]
fn touches_without_object_map_to_nothing() {
    let state = AppState::new();
    let touches = vec![Touch::new(1, Vec2::ZERO, TouchPhase::Began)];

    let commands = map_intent_to_commands(&state, AppIntent::TouchesUpdated { touches });

    assert!(commands.is_empty());
}

#[test]
fn answer_submitted_keeps_raw_text() {
    let state = AppState::new();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::AnswerSubmitted {
            raw: " 0,25 ".to_string(),
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::SubmitAnswer {
            raw: " 0,25 ".to_string()
        }]
    );
}
