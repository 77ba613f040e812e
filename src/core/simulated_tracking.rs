//! Simulierter Tracking-Provider für Tests, Benchmarks und den Headless-Host.

use super::camera::ArCamera;
use super::pose::{Pose, Ray};
use super::tracking::{SurfaceHit, SurfaceId, TrackingProvider, TrackingState};
use glam::{Vec2, Vec3};
use indexmap::IndexMap;

/// Horizontale, rechteckige Fläche um ihre Pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulatedPlane {
    /// Mittelpunkt und Orientierung (Normale = lokale +Y)
    pub pose: Pose,
    /// Halbe Ausdehnung in lokaler X/Z-Richtung
    pub half_extents: Vec2,
    /// Wird die Fläche aktuell getrackt?
    pub tracked: bool,
}

impl SimulatedPlane {
    /// Erstellt eine getrackte Fläche.
    pub fn new(pose: Pose, half_extents: Vec2) -> Self {
        Self {
            pose,
            half_extents,
            tracked: true,
        }
    }

    /// Schnittdistanz eines Strahls innerhalb des Flächen-Polygons.
    fn intersect(&self, ray: &Ray) -> Option<f32> {
        let normal = self.pose.rotation * Vec3::Y;
        let denom = ray.direction.dot(normal);
        if denom.abs() < 1e-5 {
            return None;
        }
        let distance = (self.pose.position - ray.origin).dot(normal) / denom;
        if distance <= 0.0 {
            return None;
        }
        let local = self.pose.inverse_transform_point(ray.point_at(distance));
        let inside = local.x.abs() <= self.half_extents.x && local.z.abs() <= self.half_extents.y;
        inside.then_some(distance)
    }
}

/// Skriptbarer Provider: fester Zustand, Kamera und eine Menge von Flächen.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTrackingProvider {
    /// Gemeldeter Zustand (`None` = Provider schweigt)
    pub state: Option<TrackingState>,
    /// Kamera für Hit-Tests
    pub camera: Option<ArCamera>,
    planes: IndexMap<SurfaceId, SimulatedPlane>,
    next_id: u64,
}

impl SimulatedTrackingProvider {
    /// Provider, der `Tracking` meldet.
    pub fn tracking() -> Self {
        Self {
            state: Some(TrackingState::Tracking),
            ..Self::default()
        }
    }

    /// Provider eines Geräts ohne AR-Unterstützung.
    pub fn unsupported() -> Self {
        Self {
            state: Some(TrackingState::Unsupported),
            ..Self::default()
        }
    }

    /// Provider, der gar nichts meldet.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Setzt die Kamera (normalerweise jeden Frame identisch zur Host-Kamera).
    pub fn set_camera(&mut self, camera: Option<ArCamera>) {
        self.camera = camera;
    }

    /// Fügt eine Fläche hinzu und liefert ihre Kennung.
    pub fn add_plane(&mut self, plane: SimulatedPlane) -> SurfaceId {
        self.next_id += 1;
        let id = SurfaceId(self.next_id);
        self.planes.insert(id, plane);
        id
    }

    /// Verschiebt eine Fläche (z.B. verfeinertes Tracking).
    pub fn move_plane(&mut self, id: SurfaceId, pose: Pose) {
        if let Some(plane) = self.planes.get_mut(&id) {
            plane.pose = pose;
        }
    }

    /// Setzt den Tracking-Status einer Fläche.
    pub fn set_plane_tracked(&mut self, id: SurfaceId, tracked: bool) {
        if let Some(plane) = self.planes.get_mut(&id) {
            plane.tracked = tracked;
        }
    }
}

impl TrackingProvider for SimulatedTrackingProvider {
    fn report(&self) -> Option<TrackingState> {
        self.state
    }

    fn hit_test(&self, screen_point: Vec2) -> Option<SurfaceHit> {
        if self.state != Some(TrackingState::Tracking) {
            return None;
        }
        let ray = self.camera?.screen_point_to_ray(screen_point);

        self.planes
            .iter()
            .filter(|(_, plane)| plane.tracked)
            .filter_map(|(id, plane)| plane.intersect(&ray).map(|d| (d, *id, plane)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(distance, surface, plane)| SurfaceHit {
                pose: Pose::new(ray.point_at(distance), plane.pose.rotation),
                surface,
            })
    }

    fn surface_pose(&self, surface: SurfaceId) -> Option<Pose> {
        self.planes
            .get(&surface)
            .filter(|plane| plane.tracked)
            .map(|plane| plane.pose)
    }
}
