//! AR-Geometrie-Quiz (Headless-Host).
//!
//! Treibt den Kern Frame für Frame gegen den simulierten Tracking-Provider
//! und liest Antworten von stdin.

use ar_geometry_quiz::storage::load_question_bank;
use ar_geometry_quiz::{
    AppController, AppIntent, AppState, ArCamera, FileProgressRepository, FrameInput, Pose,
    QuizEvent, QuizOptions, QuizPhase, SimulatedPlane, SimulatedTrackingProvider, Touch,
    TouchPhase,
};
use glam::{Quat, Vec2, Vec3};
use std::io::{BufRead, Write};
use std::time::Instant;

/// Simulierte Bildschirmgröße (Hochformat).
const VIEWPORT: Vec2 = Vec2::new(1080.0, 1920.0);

fn main() -> anyhow::Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("AR-Geometrie-Quiz v{} startet...", env!("CARGO_PKG_VERSION"));

    HeadlessHost::new().run()
}

/// Eingabe des Spielers pro Frage.
enum Command {
    Answer(String),
    Skip,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "skip" => Command::Skip,
            "quit" | "exit" => Command::Quit,
            _ => Command::Answer(line.trim().to_string()),
        }
    }
}

/// Haupt-Anwendungsstruktur
struct HeadlessHost {
    state: AppState,
    controller: AppController,
    tracking: SimulatedTrackingProvider,
    camera: ArCamera,
    last_frame: Instant,
}

impl HeadlessHost {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let base_dir = QuizOptions::base_dir();
        let options = QuizOptions::load_from_file(&QuizOptions::config_path());
        let bank = load_question_bank(&options, &base_dir);
        let progress =
            FileProgressRepository::open(QuizOptions::resolve(&base_dir, &options.progress_file));

        // Gerät auf 1.4 m Höhe, leicht nach unten geneigt, Tisch davor
        let camera = ArCamera::new(
            Pose::new(Vec3::new(0.0, 1.4, 0.0), Quat::from_rotation_x(-0.6)),
            VIEWPORT,
        );
        let mut tracking = SimulatedTrackingProvider::tracking();
        tracking.set_camera(Some(camera));
        tracking.add_plane(SimulatedPlane::new(
            Pose::from_position(Vec3::new(0.0, 0.0, -2.0)),
            Vec2::splat(2.0),
        ));

        Self {
            state: AppState::with_question_bank(bank, options),
            controller: AppController::with_repository(Box::new(progress)),
            tracking,
            camera,
            last_frame: Instant::now(),
        }
    }

    fn run(mut self) -> anyhow::Result<()> {
        println!("Best score so far: {}", self.controller.best_score());
        self.frame(Vec::new(), vec![AppIntent::StartRunRequested { seed: None }]);

        let stdin = std::io::stdin();
        let mut lines = stdin.lock().lines();

        while self.state.phase != QuizPhase::Finished {
            match self.state.phase {
                QuizPhase::AwaitingPlacement => self.tap_center(),
                QuizPhase::AwaitingAnswer => {
                    print!("> ");
                    std::io::stdout().flush()?;
                    let command = match lines.next() {
                        Some(line) => Command::parse(&line?),
                        None => Command::Quit,
                    };
                    let intent = match command {
                        Command::Answer(raw) => AppIntent::AnswerSubmitted { raw },
                        Command::Skip => AppIntent::SkipRequested,
                        Command::Quit => AppIntent::FinishRunRequested,
                    };
                    self.frame(Vec::new(), vec![intent]);
                }
                QuizPhase::Loading | QuizPhase::Finished => {
                    anyhow::bail!("Durchlauf konnte nicht gestartet werden")
                }
            }
        }

        Ok(())
    }

    /// Synthetischer Tap in der Bildschirmmitte (Began, dann Ended).
    fn tap_center(&mut self) {
        let center = self.camera.viewport_center();
        self.frame(vec![Touch::new(0, center, TouchPhase::Began)], Vec::new());
        self.frame(vec![Touch::new(0, center, TouchPhase::Ended)], Vec::new());
    }

    fn frame(&mut self, touches: Vec<Touch>, intents: Vec<AppIntent>) {
        let now = Instant::now();
        let frame = FrameInput {
            delta_seconds: now.duration_since(self.last_frame).as_secs_f32(),
            camera: Some(self.camera),
            touches,
            intents,
        };
        self.last_frame = now;

        for event in self.controller.tick(&mut self.state, &self.tracking, frame) {
            print_event(&event);
        }
    }
}

fn print_event(event: &QuizEvent) {
    match event {
        QuizEvent::QuestionChanged {
            question,
            index,
            total,
            formula,
        } => {
            println!();
            println!("Question {index}/{total}: {}", question.prompt);
            println!(
                "  {} {} with a={} b={} c={} r={} h={}",
                question.shape,
                question.metric,
                question.dims.a,
                question.dims.b,
                question.dims.c,
                question.dims.r,
                question.dims.h
            );
            if let Some(formula) = formula {
                println!("  Formula: {formula}");
            }
        }
        QuizEvent::FeedbackChanged { message, .. } => println!("{message}"),
        QuizEvent::ScoreChanged { score } => log::debug!("Punktzahl: {}", score),
        QuizEvent::RunFinished {
            score,
            best_score,
            new_best,
        } => {
            println!();
            println!("Final score: {score}");
            if *new_best {
                println!("New best score!");
            } else {
                println!("Best score: {best_score}");
            }
        }
        other => log::debug!("Event: {:?}", other),
    }
}
