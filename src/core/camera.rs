//! AR-Kamera: Pose des Geräts plus Projektion für Screen→Ray.

use super::pose::{Pose, Ray};
use glam::{Vec2, Vec3};

/// Kamera des Geräts, wie sie der Host pro Frame meldet.
///
/// Screen-Koordinaten in Pixeln, Ursprung oben links, Y nach unten.
/// Die Kamera blickt entlang ihrer lokalen -Z-Achse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArCamera {
    /// Welt-Pose der Kamera
    pub pose: Pose,
    /// Vertikaler Öffnungswinkel in Grad
    pub vertical_fov_deg: f32,
    /// Viewport-Größe in Pixeln
    pub viewport_size: Vec2,
}

impl ArCamera {
    /// Standard-Öffnungswinkel typischer Smartphone-Kameras.
    pub const DEFAULT_VERTICAL_FOV_DEG: f32 = 60.0;

    /// Erstellt eine Kamera mit Standard-Öffnungswinkel.
    pub fn new(pose: Pose, viewport_size: Vec2) -> Self {
        Self {
            pose,
            vertical_fov_deg: Self::DEFAULT_VERTICAL_FOV_DEG,
            viewport_size,
        }
    }

    /// Kameraposition in Weltkoordinaten.
    pub fn position(&self) -> Vec3 {
        self.pose.position
    }

    /// Blickrichtung in Weltkoordinaten.
    pub fn forward(&self) -> Vec3 {
        self.pose.forward()
    }

    /// Bildschirmmitte in Pixeln.
    pub fn viewport_center(&self) -> Vec2 {
        self.viewport_size * 0.5
    }

    /// Strahl durch einen Viewport-Punkt (0..1, Ursprung oben links).
    pub fn viewport_point_to_ray(&self, viewport: Vec2) -> Ray {
        let size = self.viewport_size.max(Vec2::ONE);
        let aspect = size.x / size.y;
        let tan_half = (self.vertical_fov_deg.to_radians() * 0.5).tan();
        // NDC: x nach rechts, y nach oben
        let ndc = Vec2::new(viewport.x * 2.0 - 1.0, 1.0 - viewport.y * 2.0);
        let local_dir = Vec3::new(ndc.x * tan_half * aspect, ndc.y * tan_half, -1.0);
        Ray::new(self.pose.position, self.pose.rotation * local_dir)
    }

    /// Strahl durch einen Screen-Punkt in Pixeln.
    pub fn screen_point_to_ray(&self, screen: Vec2) -> Ray {
        let size = self.viewport_size.max(Vec2::ONE);
        self.viewport_point_to_ray(screen / size)
    }

    /// Strahl durch die Bildschirmmitte (entspricht der Blickrichtung).
    pub fn center_ray(&self) -> Ray {
        self.viewport_point_to_ray(Vec2::splat(0.5))
    }

    /// Tiefe eines Weltpunkts entlang der Blickrichtung.
    pub fn depth_of(&self, world: Vec3) -> f32 {
        (world - self.position()).dot(self.forward())
    }
}
