//! Spiel-Session: Zähler, verstrichene Zeit und abgeleitete Punktzahl.

/// Punkte pro richtiger Antwort.
pub const POINTS_PER_CORRECT: i64 = 100;
/// Abzug pro falschem Versuch.
pub const PENALTY_PER_WRONG: i64 = 10;
/// Abzug pro Sekunde Spielzeit.
pub const PENALTY_PER_SECOND: f32 = 2.0;

/// `max(0, correct*100 - max(0, attempts-correct)*10 - floor(elapsed*2))`
pub fn compute_score(correct: u32, attempts: u32, elapsed_seconds: f32) -> u32 {
    let wrong = i64::from(attempts.saturating_sub(correct));
    let time_penalty = (elapsed_seconds.max(0.0) * PENALTY_PER_SECOND).floor() as i64;
    let raw = i64::from(correct) * POINTS_PER_CORRECT - wrong * PENALTY_PER_WRONG - time_penalty;
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

/// Zustand eines Durchlaufs. Genau eine Session ist aktiv; sie gehört dem `AppState`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Anzahl ausgewählter Fragen
    pub total_questions: u32,
    /// Richtige Antworten
    pub correct_answers: u32,
    /// Bewertete Versuche (richtig + falsch)
    pub attempts: u32,
    /// Verstrichene Spielzeit in Sekunden
    pub elapsed_seconds: f32,
    /// Abgeleitete Punktzahl
    pub score: u32,
}

impl Session {
    /// Erstellt eine leere Session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Setzt alle Zähler für einen neuen Durchlauf zurück.
    pub fn start_new(&mut self, total_questions: u32) {
        *self = Self {
            total_questions,
            ..Self::default()
        };
    }

    /// Registriert einen bewerteten Versuch und aktualisiert die Punktzahl.
    pub fn register_attempt(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct_answers += 1;
        }
        self.recompute_score();
    }

    /// Addiert Spielzeit. Nicht-positive Deltas werden ignoriert.
    pub fn tick(&mut self, delta_seconds: f32) {
        if delta_seconds <= 0.0 || !delta_seconds.is_finite() {
            return;
        }
        self.elapsed_seconds += delta_seconds;
        self.recompute_score();
    }

    /// Berechnet die Punktzahl aus den aktuellen Zählern neu.
    pub fn recompute_score(&mut self) -> u32 {
        self.score = compute_score(self.correct_answers, self.attempts, self.elapsed_seconds);
        self.score
    }

    /// Anzahl falscher Versuche.
    pub fn wrong_answers(&self) -> u32 {
        self.attempts.saturating_sub(self.correct_answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_all_correct_no_time() {
        assert_eq!(compute_score(10, 10, 0.0), 1000);
    }

    #[test]
    fn test_score_with_wrong_answers_and_time() {
        assert_eq!(compute_score(5, 10, 10.0), 430);
    }

    #[test]
    fn test_score_never_negative() {
        assert_eq!(compute_score(0, 5, 100.0), 0);
        assert_eq!(compute_score(0, 0, 0.4), 0);
    }

    #[test]
    fn test_time_penalty_is_floored() {
        // 0.74s * 2 = 1.48 → 1 Punkt Abzug
        assert_eq!(compute_score(1, 1, 0.74), 99);
    }

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::new();
        session.start_new(3);
        session.register_attempt(false);
        session.register_attempt(true);
        session.tick(1.0);
        session.tick(-5.0);

        assert_eq!(session.total_questions, 3);
        assert_eq!(session.attempts, 2);
        assert_eq!(session.correct_answers, 1);
        assert_eq!(session.wrong_answers(), 1);
        assert_eq!(session.score, 100 - 10 - 2);

        session.start_new(2);
        assert_eq!(session.attempts, 0);
        assert_eq!(session.elapsed_seconds, 0.0);
        assert_eq!(session.score, 0);
    }
}
