//! Journal der ausgeführten Commands, gruppiert nach Durchläufen.

use super::{AppCommand, QuizPhase};

/// Ein Journal-Eintrag: Command plus Phase zum Zeitpunkt der Ausführung.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedCommand {
    /// Phase vor der Ausführung
    pub phase: QuizPhase,
    /// Ausgeführter Command
    pub command: AppCommand,
}

/// Begrenztes Journal; Gesten-Frames landen nicht hier.
#[derive(Debug, Default)]
pub struct CommandLog {
    entries: Vec<LoggedCommand>,
}

impl CommandLog {
    const MAX_ENTRIES: usize = 1000;

    /// Erstellt ein leeres Journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hängt einen Command an. Bei vollem Journal fällt die ältere Hälfte weg.
    pub fn record(&mut self, phase: QuizPhase, command: &AppCommand) {
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.drain(..Self::MAX_ENTRIES / 2);
        }
        self.entries.push(LoggedCommand {
            phase,
            command: command.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Einträge ab dem letzten `StartRun` (inklusive).
    pub fn current_run(&self) -> &[LoggedCommand] {
        let start = self
            .entries
            .iter()
            .rposition(|e| matches!(e.command, AppCommand::StartRun { .. }))
            .unwrap_or(0);
        &self.entries[start..]
    }

    /// Anzahl abgegebener Antworten im aktuellen Durchlauf (auch ungültige).
    pub fn answers_in_run(&self) -> usize {
        self.current_run()
            .iter()
            .filter(|e| matches!(e.command, AppCommand::SubmitAnswer { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_is_bounded() {
        let mut log = CommandLog::new();
        for _ in 0..CommandLog::MAX_ENTRIES + 1 {
            log.record(QuizPhase::AwaitingAnswer, &AppCommand::SkipQuestion);
        }
        assert_eq!(log.len(), CommandLog::MAX_ENTRIES / 2 + 1);
    }

    #[test]
    fn test_current_run_starts_at_last_start() {
        let mut log = CommandLog::new();
        assert!(log.current_run().is_empty());

        log.record(QuizPhase::Loading, &AppCommand::StartRun { seed: Some(1) });
        log.record(
            QuizPhase::AwaitingAnswer,
            &AppCommand::SubmitAnswer { raw: "1".into() },
        );
        log.record(QuizPhase::AwaitingAnswer, &AppCommand::FinishRun);
        log.record(QuizPhase::Finished, &AppCommand::StartRun { seed: Some(2) });
        log.record(
            QuizPhase::AwaitingPlacement,
            &AppCommand::SubmitAnswer { raw: "x".into() },
        );

        let run = log.current_run();
        assert_eq!(run.len(), 2);
        assert_eq!(run[0].command, AppCommand::StartRun { seed: Some(2) });
        assert_eq!(run[0].phase, QuizPhase::Finished);
        assert_eq!(log.answers_in_run(), 1);
        assert_eq!(log.len(), 5);
    }
}
