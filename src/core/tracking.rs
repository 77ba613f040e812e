//! Tracking-Zustand des Geräts und Schnittstelle zum Tracking-Provider.
//!
//! Der Zustand wird ausschließlich vom Provider gemeldet; der Kern leitet
//! nur ab, ob echte Platzierung gerade möglich ist.

use super::pose::Pose;
use glam::Vec2;
use std::fmt;

/// Opake Kennung einer erkannten Fläche.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "surface#{}", self.0)
    }
}

/// Grund für fehlendes Tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotTrackingReason {
    /// Kein Grund gemeldet
    None,
    /// Sitzung startet noch
    Initializing,
    /// Gerät sucht seine Position nach Unterbrechung
    Relocalizing,
    /// Zu schnelle Bewegung
    ExcessiveMotion,
    /// Zu wenig Licht
    InsufficientLight,
    /// Zu wenige Merkmale in der Szene
    InsufficientFeatures,
    /// Sonstiger Grund
    Unknown,
}

/// Tracking-Zustand. Genau ein Wert ist aktiv.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingState {
    /// Gerät/Plattform kann nicht tracken (terminal für den Durchlauf)
    Unsupported,
    /// Tracking startet
    Initializing,
    /// Tracking aktiv
    Tracking,
    /// Tracking vorübergehend verloren
    NotTracking(NotTrackingReason),
}

/// Art der Platzierung, die der Resolver gerade liefern kann.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlacementMode {
    /// Hit-Test gegen erkannte Flächen
    Real,
    /// Virtueller Boden / Pose vor der Kamera
    #[default]
    Fallback,
}

/// Treffer eines Hit-Tests gegen eine erkannte Fläche.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Trefferpose auf der Fläche
    pub pose: Pose,
    /// Getroffene Fläche
    pub surface: SurfaceId,
}

/// Externer Tracking-Provider (AR-Subsystem). Der Kern liest nur.
pub trait TrackingProvider {
    /// Zustand dieses Frames; `None` wenn der Provider (noch) nichts meldet.
    fn report(&self) -> Option<TrackingState>;

    /// Hit-Test an einem Screen-Punkt gegen erkannte Flächen.
    fn hit_test(&self, screen_point: Vec2) -> Option<SurfaceHit>;

    /// Aktuelle Pose einer Fläche; `None` wenn sie nicht (mehr) getrackt wird.
    fn surface_pose(&self, surface: SurfaceId) -> Option<Pose>;
}

/// Klassifiziert den Provider-Zustand. Leitet keine Übergänge selbst ab.
#[derive(Debug, Clone)]
pub struct TrackingStateMachine {
    state: TrackingState,
    has_report: bool,
    silent_seconds: f32,
    startup_window_secs: f32,
}

impl TrackingStateMachine {
    /// Erstellt die Maschine im Zustand `Initializing`.
    pub fn new(startup_window_secs: f32) -> Self {
        Self {
            state: TrackingState::Initializing,
            has_report: false,
            silent_seconds: 0.0,
            startup_window_secs: startup_window_secs.max(0.0),
        }
    }

    /// Übernimmt die Meldung dieses Frames.
    ///
    /// Gibt den neuen Zustand zurück, wenn er sich geändert hat.
    /// `Unsupported` ist terminal bis `reset()`.
    pub fn update(&mut self, report: Option<TrackingState>, delta_seconds: f32) -> Option<TrackingState> {
        let Some(next) = report else {
            if delta_seconds > 0.0 {
                self.silent_seconds += delta_seconds;
            }
            return None;
        };

        self.silent_seconds = 0.0;
        self.has_report = true;

        if self.state == TrackingState::Unsupported && next != TrackingState::Unsupported {
            log::debug!("Tracking-Meldung {:?} ignoriert: Gerät ist unsupported", next);
            return None;
        }
        if next == self.state {
            return None;
        }

        log::info!("Tracking-Zustand: {:?} -> {:?}", self.state, next);
        self.state = next;
        Some(next)
    }

    /// Autoritativer Zustand.
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Echte Platzierung nur bei `Tracking`.
    pub fn is_real_placement_viable(&self) -> bool {
        self.state == TrackingState::Tracking
    }

    /// Provider schweigt länger als das Startfenster.
    ///
    /// Gilt für jede Schweigephase, auch nachdem bereits `Tracking` gemeldet wurde;
    /// die nächste Meldung setzt den Zähler zurück.
    pub fn is_provider_silent(&self) -> bool {
        self.silent_seconds > self.startup_window_secs
    }

    /// Ob der Provider seit dem letzten Reset überhaupt etwas gemeldet hat.
    pub fn has_report(&self) -> bool {
        self.has_report
    }

    /// Platzierungsmodus für den Resolver; ändert den Zustand nicht.
    pub fn placement_mode(&self) -> PlacementMode {
        if self.is_real_placement_viable() && !self.is_provider_silent() {
            PlacementMode::Real
        } else {
            PlacementMode::Fallback
        }
    }

    /// Setzt die Maschine für einen neuen Durchlauf zurück.
    pub fn reset(&mut self) {
        *self = Self::new(self.startup_window_secs);
    }
}

impl Default for TrackingStateMachine {
    fn default() -> Self {
        Self::new(crate::shared::options::TRACKING_STARTUP_WINDOW_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tracking_is_viable() {
        let mut machine = TrackingStateMachine::new(3.0);
        assert!(!machine.is_real_placement_viable());

        machine.update(Some(TrackingState::Tracking), 0.016);
        assert!(machine.is_real_placement_viable());
        assert_eq!(machine.placement_mode(), PlacementMode::Real);

        machine.update(
            Some(TrackingState::NotTracking(NotTrackingReason::ExcessiveMotion)),
            0.016,
        );
        assert!(!machine.is_real_placement_viable());
        assert_eq!(machine.placement_mode(), PlacementMode::Fallback);
    }

    #[test]
    fn test_update_reports_changes_only() {
        let mut machine = TrackingStateMachine::new(3.0);
        assert_eq!(
            machine.update(Some(TrackingState::Tracking), 0.1),
            Some(TrackingState::Tracking)
        );
        assert_eq!(machine.update(Some(TrackingState::Tracking), 0.1), None);
    }

    #[test]
    fn test_unsupported_is_terminal_until_reset() {
        let mut machine = TrackingStateMachine::new(3.0);
        machine.update(Some(TrackingState::Unsupported), 0.1);
        assert_eq!(machine.update(Some(TrackingState::Tracking), 0.1), None);
        assert_eq!(machine.state(), TrackingState::Unsupported);

        machine.reset();
        assert_eq!(machine.state(), TrackingState::Initializing);
    }

    #[test]
    fn test_silence_assumes_fallback_without_changing_state() {
        let mut machine = TrackingStateMachine::new(1.0);
        machine.update(Some(TrackingState::Tracking), 0.1);

        machine.update(None, 0.6);
        assert_eq!(machine.placement_mode(), PlacementMode::Real);

        machine.update(None, 0.6);
        assert_eq!(machine.placement_mode(), PlacementMode::Fallback);
        assert_eq!(machine.state(), TrackingState::Tracking);

        machine.update(Some(TrackingState::Tracking), 0.1);
        assert_eq!(machine.placement_mode(), PlacementMode::Real);
    }
}
