//! Use-Case: Wo soll das Objekt jetzt stehen? Echter Hit-Test oder virtueller Boden.

use crate::app::outbox::QuizEvent;
use crate::app::AppState;
use crate::core::{
    ArCamera, HorizontalPlane, PlacementMode, Pose, SurfaceId, TrackingProvider,
};
use crate::shared::QuizOptions;
use glam::{Quat, Vec2};

/// Ergebnis einer Auflösung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPlacement {
    /// Weltpose für das Objekt
    pub pose: Pose,
    /// Getroffene Fläche (`None` = Fallback)
    pub surface: Option<SurfaceId>,
    /// Tatsächlich verwendeter Modus
    pub mode: PlacementMode,
}

/// Löst Platzierungs-Posen auf. Zustandslos, jeden Frame neu konstruierbar.
pub struct PlacementResolver<'a> {
    tracking: &'a dyn TrackingProvider,
    mode: PlacementMode,
    options: &'a QuizOptions,
}

impl<'a> PlacementResolver<'a> {
    /// Erstellt einen Resolver für den aktuellen Platzierungsmodus.
    pub fn new(
        tracking: &'a dyn TrackingProvider,
        mode: PlacementMode,
        options: &'a QuizOptions,
    ) -> Self {
        Self {
            tracking,
            mode,
            options,
        }
    }

    /// Pose an `screen_point` (oder der Bildschirmmitte).
    ///
    /// `None` nur ohne Kamera.
    pub fn resolve(
        &self,
        camera: Option<&ArCamera>,
        screen_point: Option<Vec2>,
    ) -> Option<ResolvedPlacement> {
        let camera = camera?;
        let point = screen_point.unwrap_or_else(|| camera.viewport_center());

        if self.mode == PlacementMode::Real {
            if let Some(hit) = self.tracking.hit_test(point) {
                return Some(ResolvedPlacement {
                    pose: hit.pose,
                    surface: Some(hit.surface),
                    mode: PlacementMode::Real,
                });
            }
        }

        Some(ResolvedPlacement {
            pose: self.fallback_pose(camera, point),
            surface: None,
            mode: PlacementMode::Fallback,
        })
    }

    /// Virtueller Boden unter der Kamera, sonst fester Abstand vor der Kamera.
    fn fallback_pose(&self, camera: &ArCamera, point: Vec2) -> Pose {
        let ray = camera.screen_point_to_ray(point);
        let floor = HorizontalPlane::new(camera.position().y - self.options.fallback_floor_offset);

        if let Some(distance) = floor.intersect(&ray) {
            let distance = distance.min(self.options.fallback_max_distance);
            return Pose::new(ray.point_at(distance), Quat::IDENTITY);
        }

        let position = camera.position() + camera.forward() * self.options.fallback_front_distance;
        Pose::new(position, Quat::IDENTITY)
    }
}

/// Aktualisiert Modus und Vorschau; nur solange auf Platzierung gewartet wird.
pub fn refresh_preview(state: &mut AppState, tracking: &dyn TrackingProvider) {
    let mode = state.tracking.placement_mode();
    if mode != state.placement.mode {
        log::info!("Platzierungsmodus: {:?} -> {:?}", state.placement.mode, mode);
        state.placement.mode = mode;
        state.events.push(QuizEvent::PlacementModeChanged { mode });
    }

    let preview = PlacementResolver::new(tracking, mode, &state.options)
        .resolve(state.view.camera.as_ref(), None);
    set_preview(state, preview);
}

/// Setzt die Vorschau und meldet Erscheinen/Verschwinden.
pub fn set_preview(state: &mut AppState, preview: Option<ResolvedPlacement>) {
    let appeared_or_vanished = preview.is_some() != state.placement.preview.is_some();
    state.placement.preview = preview;
    if appeared_or_vanished {
        state.events.push(QuizEvent::PlacementPreviewChanged {
            pose: preview.map(|p| p.pose),
        });
    }
}

/// Zeigt oder versteckt die Flächen-Visualisierung.
pub fn set_planes_visible(state: &mut AppState, visible: bool) {
    if state.view.planes_visible != visible {
        state.view.planes_visible = visible;
        state
            .events
            .push(QuizEvent::PlanesVisibilityChanged { visible });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SimulatedPlane, SimulatedTrackingProvider};
    use approx::assert_relative_eq;
    use glam::Vec3;

    fn camera_looking_down(height: f32) -> ArCamera {
        ArCamera::new(
            Pose::new(
                Vec3::new(0.0, height, 0.0),
                Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2),
            ),
            Vec2::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_unsupported_tracking_uses_virtual_floor() {
        let provider = SimulatedTrackingProvider::unsupported();
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Fallback, &options);
        let camera = camera_looking_down(2.0);

        let resolved = resolver.resolve(Some(&camera), None).expect("Pose erwartet");
        assert_eq!(resolved.surface, None);
        assert_eq!(resolved.mode, PlacementMode::Fallback);
        assert_relative_eq!(resolved.pose.position.y, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_horizon_ray_falls_back_in_front_without_tilt() {
        let provider = SimulatedTrackingProvider::unsupported();
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Fallback, &options);
        // Blick nach oben: der Boden wird nie getroffen
        let camera = ArCamera::new(
            Pose::new(Vec3::new(0.0, 1.6, 0.0), Quat::from_rotation_x(0.5)),
            Vec2::new(800.0, 600.0),
        );

        let resolved = resolver.resolve(Some(&camera), None).expect("Pose erwartet");
        let expected = camera.position() + camera.forward() * 2.0;
        assert_relative_eq!(resolved.pose.position.x, expected.x, epsilon = 1e-4);
        assert_relative_eq!(resolved.pose.position.y, expected.y, epsilon = 1e-4);
        assert_relative_eq!(resolved.pose.position.z, expected.z, epsilon = 1e-4);
        assert_eq!(resolved.pose.rotation, Quat::IDENTITY);
    }

    #[test]
    fn test_far_floor_hit_is_clamped() {
        let provider = SimulatedTrackingProvider::unsupported();
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Fallback, &options);
        // Fast horizontaler Blick: Bodentreffer weit entfernt
        let camera = ArCamera::new(
            Pose::new(Vec3::new(0.0, 1.6, 0.0), Quat::from_rotation_x(-0.05)),
            Vec2::new(800.0, 600.0),
        );

        let resolved = resolver.resolve(Some(&camera), None).expect("Pose erwartet");
        let distance = resolved.pose.position.distance(camera.position());
        assert_relative_eq!(distance, 10.0, epsilon = 1e-3);
    }

    #[test]
    fn test_real_mode_prefers_surface_hit() {
        let mut provider = SimulatedTrackingProvider::tracking();
        let camera = camera_looking_down(2.0);
        provider.set_camera(Some(camera));
        let table = provider.add_plane(SimulatedPlane::new(
            Pose::from_position(Vec3::new(0.0, 0.7, 0.0)),
            Vec2::splat(1.0),
        ));
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Real, &options);

        let resolved = resolver.resolve(Some(&camera), None).expect("Pose erwartet");
        assert_eq!(resolved.surface, Some(table));
        assert_eq!(resolved.mode, PlacementMode::Real);
        assert_relative_eq!(resolved.pose.position.y, 0.7, epsilon = 1e-4);
    }

    #[test]
    fn test_real_mode_without_hit_degrades_to_fallback() {
        let mut provider = SimulatedTrackingProvider::tracking();
        let camera = camera_looking_down(2.0);
        provider.set_camera(Some(camera));
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Real, &options);

        let resolved = resolver.resolve(Some(&camera), None).expect("Pose erwartet");
        assert_eq!(resolved.mode, PlacementMode::Fallback);
        assert_relative_eq!(resolved.pose.position.y, 0.5, epsilon = 1e-4);
    }

    #[test]
    fn test_no_camera_yields_no_pose() {
        let provider = SimulatedTrackingProvider::tracking();
        let options = QuizOptions::default();
        let resolver = PlacementResolver::new(&provider, PlacementMode::Real, &options);
        assert!(resolver.resolve(None, Some(Vec2::ZERO)).is_none());
    }
}
