//! Use-Case: Durchlauf starten, Formfilter setzen, Durchlauf abschließen.

use super::placement::{set_planes_visible, set_preview};
use super::quiz::{announce_question, publish_score, remove_active_object};
use crate::app::outbox::QuizEvent;
use crate::app::{AppState, QuizPhase};
use crate::core::{select_questions, ShapeKind, TrackingStateMachine};
use crate::storage::BestScoreRepository;

/// Startet einen neuen Durchlauf.
///
/// Wählt N Fragen ohne Zurücklegen, setzt Session und Anker zurück und liest
/// die Bestpunktzahl. Eine leere Auswahl endet sofort in `Finished`.
pub fn start_run(
    state: &mut AppState,
    progress: &mut dyn BestScoreRepository,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let seed = seed.unwrap_or_else(rand::random);

    remove_active_object(state);
    state.anchors.clear();
    state.tracking = TrackingStateMachine::new(state.options.tracking_startup_window_secs);
    state.phase = QuizPhase::Loading;

    let candidates = state.bank.filtered(state.run.shape_filter);
    state.run.questions = select_questions(&candidates, state.options.questions_per_run, seed);
    state.run.index = 0;
    state.run.seed = seed;
    state
        .session
        .start_new(u32::try_from(state.run.total()).unwrap_or(u32::MAX));
    publish_score(state);
    state.best_score = progress.best_score();

    log::info!(
        "Durchlauf gestartet: {} von {} Fragen (Seed {}, Filter {:?})",
        state.run.total(),
        candidates.len(),
        seed,
        state.run.shape_filter
    );

    if state.run.questions.is_empty() {
        log::warn!("Keine Fragen verfügbar, Durchlauf endet sofort");
        return finish_run(state, progress);
    }

    state.phase = QuizPhase::AwaitingPlacement;
    set_planes_visible(state, true);
    announce_question(state);
    Ok(())
}

/// Setzt den Formfilter für den nächsten Start.
pub fn set_shape_filter(state: &mut AppState, shape: Option<ShapeKind>) {
    log::info!("Formfilter: {:?}", shape);
    state.run.shape_filter = shape;
}

/// Schließt den Durchlauf ab und vergleicht mit der Bestpunktzahl.
///
/// Ein Speicherfehler wird geloggt, der Durchlauf endet trotzdem.
pub fn finish_run(
    state: &mut AppState,
    progress: &mut dyn BestScoreRepository,
) -> anyhow::Result<()> {
    if state.phase == QuizPhase::Finished {
        log::debug!("Durchlauf ist bereits beendet");
        return Ok(());
    }

    remove_active_object(state);
    set_preview(state, None);
    state.phase = QuizPhase::Finished;

    let score = state.session.recompute_score();
    publish_score(state);

    let new_best = match progress.try_set_best(score) {
        Ok(new_best) => new_best,
        Err(e) => {
            log::error!("Bestpunktzahl konnte nicht gespeichert werden: {:#}", e);
            false
        }
    };
    state.best_score = progress.best_score().max(state.best_score);

    log::info!(
        "Durchlauf beendet: {} Punkte ({}/{} richtig, {} Versuche, {} Eingaben, {:.1}s), Bestwert {}{}",
        score,
        state.session.correct_answers,
        state.session.total_questions,
        state.session.attempts,
        state.command_log.answers_in_run(),
        state.session.elapsed_seconds,
        state.best_score,
        if new_best { " (neu)" } else { "" }
    );

    state.events.push(QuizEvent::RunFinished {
        score,
        best_score: state.best_score,
        new_best,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dimensions, GeometryQuestion, MetricKind, QuestionBank};
    use crate::shared::QuizOptions;
    use crate::storage::InMemoryProgressRepository;

    fn bank() -> QuestionBank {
        let cube = |id: &str, a: f64| {
            GeometryQuestion::new(
                id,
                ShapeKind::Cube,
                MetricKind::Volume,
                Dimensions {
                    a,
                    ..Default::default()
                },
                0.01,
            )
        };
        let circle = GeometryQuestion::new(
            "circle",
            ShapeKind::Circle,
            MetricKind::Area,
            Dimensions {
                r: 1.0,
                ..Default::default()
            },
            0.01,
        );
        QuestionBank::new(vec![cube("c1", 1.0), cube("c2", 2.0), circle])
    }

    #[test]
    fn test_start_run_selects_questions_and_announces_first() {
        let options = QuizOptions {
            questions_per_run: 2,
            ..QuizOptions::default()
        };
        let mut state = AppState::with_question_bank(bank(), options);
        let mut progress = InMemoryProgressRepository::with_best_score(70);

        start_run(&mut state, &mut progress, Some(9)).expect("Start sollte klappen");

        assert_eq!(state.phase, QuizPhase::AwaitingPlacement);
        assert_eq!(state.run.total(), 2);
        assert_eq!(state.session.total_questions, 2);
        assert_eq!(state.best_score, 70);
        assert!(state.events.iter().any(|e| matches!(
            e,
            QuizEvent::QuestionChanged {
                index: 1,
                total: 2,
                ..
            }
        )));
    }

    #[test]
    fn test_empty_selection_finishes_immediately() {
        let mut state = AppState::with_question_bank(bank(), QuizOptions::default());
        let mut progress = InMemoryProgressRepository::default();
        set_shape_filter(&mut state, Some(ShapeKind::Sphere));

        start_run(&mut state, &mut progress, Some(1)).expect("Start sollte klappen");

        assert_eq!(state.phase, QuizPhase::Finished);
        assert!(state.events.iter().any(|e| matches!(
            e,
            QuizEvent::RunFinished {
                score: 0,
                new_best: false,
                ..
            }
        )));
    }

    #[test]
    fn test_shape_filter_limits_selection() {
        let mut state = AppState::with_question_bank(bank(), QuizOptions::default());
        let mut progress = InMemoryProgressRepository::default();
        set_shape_filter(&mut state, Some(ShapeKind::Cube));

        start_run(&mut state, &mut progress, Some(3)).expect("Start sollte klappen");

        assert_eq!(state.run.total(), 2);
        assert!(state
            .run
            .questions
            .iter()
            .all(|q| q.shape == ShapeKind::Cube));
    }

    #[test]
    fn test_finish_only_stores_strictly_greater_score() {
        let mut state = AppState::with_question_bank(bank(), QuizOptions::default());
        let mut progress = InMemoryProgressRepository::with_best_score(100);
        start_run(&mut state, &mut progress, Some(3)).expect("Start sollte klappen");
        state.session.register_attempt(true);

        finish_run(&mut state, &mut progress).expect("Abschluss sollte klappen");

        assert_eq!(progress.best_score(), 100);
        assert!(state.events.iter().any(|e| matches!(
            e,
            QuizEvent::RunFinished {
                score: 100,
                best_score: 100,
                new_best: false
            }
        )));
    }
}
