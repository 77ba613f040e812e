//! Use-Case: Platzieren, Antworten, Überspringen und Weiterschalten.

use super::placement::{set_planes_visible, set_preview, PlacementResolver};
use super::run::finish_run;
use crate::app::gesture::GestureContext;
use crate::app::outbox::{FeedbackKind, QuizEvent};
use crate::app::{ActiveObject, AppState, QuizPhase};
use crate::core::{
    format_hint_value, parse_answer, IdleAnimation, PlacedObject, PlacementMode, TrackingProvider,
};
use crate::input::Touch;
use crate::storage::BestScoreRepository;
use glam::Vec2;

const MSG_INVALID_INPUT: &str = "Invalid answer. Use a number (e.g. 0.25 or 0,25).";
const MSG_CORRECT: &str = "Correct!";
const MSG_PLACED: &str = "Object placed. Answer the question.";
const MSG_PLACED_FALLBACK: &str = "Object placed (camera mode). Answer the question.";
const MSG_PLACEMENT_REQUIRED: &str = "Place the object first.";

fn feedback(state: &mut AppState, kind: FeedbackKind, message: impl Into<String>) {
    state.events.push(QuizEvent::FeedbackChanged {
        kind,
        message: message.into(),
    });
}

/// Meldet die aktuelle Frage an die UI.
pub fn announce_question(state: &mut AppState) {
    let Some(question) = state.run.current_question().cloned() else {
        return;
    };
    log::info!(
        "Frage {}/{}: {} ({} {})",
        state.run.index + 1,
        state.run.total(),
        question.id,
        question.shape,
        question.metric
    );
    let formula = question.formula();
    state.events.push(QuizEvent::QuestionChanged {
        question,
        index: state.run.index + 1,
        total: state.run.total(),
        formula,
    });
}

/// Meldet die Punktzahl, wenn sie sich seit der letzten Meldung geändert hat.
pub fn publish_score(state: &mut AppState) {
    let score = state.session.score;
    if score != state.run.reported_score {
        state.run.reported_score = score;
        state.events.push(QuizEvent::ScoreChanged { score });
    }
}

/// Zerstört Objekt und Anker der aktuellen Frage.
pub fn remove_active_object(state: &mut AppState) {
    let Some(active) = state.active.take() else {
        return;
    };
    let anchor = active.object.anchor;
    if !state.anchors.remove(anchor) {
        log::warn!("Anker {:?} war bereits entfernt", anchor);
    }
    log::debug!("Objekt an Anker {:?} entfernt", anchor);
    state.events.push(QuizEvent::ObjectRemoved { anchor });
}

/// Platziert das Objekt der aktuellen Frage an der aufgelösten Pose.
///
/// Genau eine Platzierung pro Frage; weitere Taps werden ignoriert.
pub fn commit_placement(
    state: &mut AppState,
    tracking: &dyn TrackingProvider,
    screen_pos: Vec2,
) -> anyhow::Result<()> {
    if state.phase != QuizPhase::AwaitingPlacement {
        log::debug!("Platzierungs-Tap in Phase {:?} ignoriert", state.phase);
        return Ok(());
    }
    let Some(question) = state.run.current_question().cloned() else {
        anyhow::bail!("Keine aktive Frage für die Platzierung");
    };

    let resolved = PlacementResolver::new(tracking, state.tracking.placement_mode(), &state.options)
        .resolve(state.view.camera.as_ref(), Some(screen_pos))
        .ok_or_else(|| anyhow::anyhow!("Keine Kamera verfügbar: Platzierung nicht möglich"))?;

    let anchor = state
        .anchors
        .place_anchor(resolved.pose, resolved.surface, tracking);
    let mut object = PlacedObject::new(anchor, question);
    if state.options.idle_animation {
        object = object.with_idle(IdleAnimation::new(
            state.options.idle_rotation_speed_deg,
            state.options.idle_bob_frequency,
            state.options.idle_bob_amplitude,
        ));
    }
    state.active = Some(ActiveObject::new(object));
    state.phase = QuizPhase::AwaitingAnswer;

    log::info!(
        "Objekt platziert ({:?}) bei {:?}",
        resolved.mode,
        resolved.pose.position
    );

    set_preview(state, None);
    set_planes_visible(state, false);
    state.events.push(QuizEvent::ObjectPlaced {
        anchor,
        pose: resolved.pose,
        mode: resolved.mode,
    });
    let message = match resolved.mode {
        PlacementMode::Real => MSG_PLACED,
        PlacementMode::Fallback => MSG_PLACED_FALLBACK,
    };
    feedback(state, FeedbackKind::Placed, message);
    Ok(())
}

/// Bewertet eine Antwort.
///
/// Ungültige Eingabe zählt nicht als Versuch. Richtig: weiter zur nächsten Frage.
/// Falsch: Hinweis, gleiche Frage bleibt aktiv.
pub fn submit_answer(
    state: &mut AppState,
    progress: &mut dyn BestScoreRepository,
    raw: &str,
) -> anyhow::Result<()> {
    match state.phase {
        QuizPhase::AwaitingAnswer => {}
        QuizPhase::AwaitingPlacement => {
            feedback(state, FeedbackKind::PlacementRequired, MSG_PLACEMENT_REQUIRED);
            return Ok(());
        }
        phase => {
            log::debug!("Antwort in Phase {:?} ignoriert", phase);
            return Ok(());
        }
    }

    let Some(answer) = parse_answer(raw) else {
        feedback(state, FeedbackKind::InvalidInput, MSG_INVALID_INPUT);
        return Ok(());
    };
    let Some(question) = state.run.current_question().cloned() else {
        anyhow::bail!("Keine aktive Frage für die Antwort");
    };

    let expected = question.expected_answer();
    let correct = question.is_correct(answer);
    log::debug!(
        "Antwort {} auf '{}': erwartet {}, {}",
        answer,
        question.id,
        expected,
        if correct { "richtig" } else { "falsch" }
    );

    state.session.register_attempt(correct);
    publish_score(state);

    if correct {
        feedback(state, FeedbackKind::Correct, MSG_CORRECT);
        advance(state, progress)
    } else {
        let value = format_hint_value(expected);
        let result = if question.unit.is_empty() {
            value
        } else {
            format!("{} {}", value, question.unit)
        };
        let hint = format!("Incorrect. Try again. (Hint: result ≈ {result})");
        feedback(state, FeedbackKind::Incorrect, hint);
        Ok(())
    }
}

/// Überspringt die aktuelle Frage ohne Bewertung.
pub fn skip(state: &mut AppState, progress: &mut dyn BestScoreRepository) -> anyhow::Result<()> {
    if !state.phase.is_in_progress() {
        log::debug!("Überspringen in Phase {:?} ignoriert", state.phase);
        return Ok(());
    }
    log::info!("Frage {} übersprungen", state.run.index + 1);
    advance(state, progress)
}

/// Entfernt das Objekt und schaltet zur nächsten Frage oder beendet den Durchlauf.
///
/// Die neue Frage verlangt immer eine frische Platzierung.
pub fn advance(state: &mut AppState, progress: &mut dyn BestScoreRepository) -> anyhow::Result<()> {
    remove_active_object(state);
    state.run.index += 1;

    if state.run.index >= state.run.total() {
        return finish_run(state, progress);
    }

    state.phase = QuizPhase::AwaitingPlacement;
    set_planes_visible(state, true);
    announce_question(state);
    Ok(())
}

/// Wendet die Touches des Frames auf das platzierte Objekt an.
pub fn manipulate_object(state: &mut AppState, tracking: &dyn TrackingProvider, touches: &[Touch]) {
    let Some(active) = state.active.as_mut() else {
        return;
    };
    let Some(anchor_pose) = state.anchors.world_pose(active.object.anchor) else {
        log::warn!("Anker {:?} fehlt, Geste verworfen", active.object.anchor);
        return;
    };

    let ctx = GestureContext {
        camera: state.view.camera.as_ref(),
        tracking,
        placement_mode: state.tracking.placement_mode(),
        anchor_pose,
        options: &state.options,
    };
    let outcome = active.gesture.process(touches, &mut active.object, &ctx);

    if let Some(selected) = outcome.selection_changed {
        state.events.push(QuizEvent::SelectionChanged { selected });
    }
}
