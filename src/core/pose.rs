//! Pose, Strahl und horizontale Ebene im Welt-Koordinatensystem.
//!
//! Konvention: rechtshändig, Y zeigt nach oben (Weltvertikale).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position plus Orientierung (Einheits-Quaternion).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position in Welt-Einheiten (Meter)
    pub position: Vec3,
    /// Orientierung als Einheits-Quaternion
    pub rotation: Quat,
}

impl Pose {
    /// Ursprung ohne Rotation.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Erstellt eine Pose aus Position und Rotation.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Pose an `position` ohne Neigung.
    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Transformiert einen Punkt aus dem lokalen Raum dieser Pose in Weltkoordinaten.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Transformiert einen Weltpunkt in den lokalen Raum dieser Pose.
    pub fn inverse_transform_point(&self, world: Vec3) -> Vec3 {
        self.rotation.inverse() * (world - self.position)
    }

    /// Inverse Pose (`self * self.inverse() == IDENTITY`).
    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();
        Self {
            position: rotation * -self.position,
            rotation,
        }
    }

    /// Verkettet zwei Posen: `other` ist relativ zu `self` angegeben.
    pub fn mul_pose(&self, other: &Pose) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: (self.rotation * other.rotation).normalize(),
        }
    }

    /// Vorwärtsrichtung (-Z) in Weltkoordinaten.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Halbgerade mit normierter Richtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Startpunkt
    pub origin: Vec3,
    /// Normierte Richtung
    pub direction: Vec3,
}

impl Ray {
    /// Erstellt einen Strahl; die Richtung wird normiert.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or(Vec3::NEG_Z),
        }
    }

    /// Punkt im Abstand `distance` entlang des Strahls.
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// Mathematische horizontale Ebene `y = height` (Normale = Weltvertikale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalPlane {
    /// Höhe der Ebene
    pub height: f32,
}

impl HorizontalPlane {
    /// Richtungskomponenten unterhalb dieser Schwelle gelten als parallel zur Ebene.
    const PARALLEL_EPSILON: f32 = 1e-5;

    /// Erstellt eine Ebene auf gegebener Höhe.
    pub fn new(height: f32) -> Self {
        Self { height }
    }

    /// Schnittdistanz entlang des Strahls.
    ///
    /// `None` wenn der Strahl parallel verläuft oder die Ebene hinter dem Ursprung liegt.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let denom = ray.direction.y;
        if denom.abs() < Self::PARALLEL_EPSILON {
            return None;
        }
        let distance = (self.height - ray.origin.y) / denom;
        (distance > 0.0).then_some(distance)
    }
}

/// Reine Gier-Rotation (um die Weltvertikale) in Grad.
pub fn yaw_rotation_deg(degrees: f32) -> Quat {
    Quat::from_rotation_y(degrees.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverse_roundtrip_restores_point() {
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::from_rotation_y(0.7));
        let local = Vec3::new(0.5, -0.25, 2.0);
        let world = pose.transform_point(local);
        let back = pose.inverse_transform_point(world);
        assert_relative_eq!(back.x, local.x, epsilon = 1e-5);
        assert_relative_eq!(back.y, local.y, epsilon = 1e-5);
        assert_relative_eq!(back.z, local.z, epsilon = 1e-5);
    }

    #[test]
    fn test_mul_pose_with_inverse_is_identity() {
        let pose = Pose::new(Vec3::new(-4.0, 0.5, 9.0), Quat::from_rotation_x(0.3));
        let id = pose.mul_pose(&pose.inverse());
        assert!(id.position.length() < 1e-5);
        assert!(id.rotation.angle_between(Quat::IDENTITY) < 1e-4);
    }

    #[test]
    fn test_plane_intersection_looking_down() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y);
        let distance = HorizontalPlane::new(0.5).intersect(&ray).expect("Schnitt erwartet");
        assert_relative_eq!(distance, 1.5);
        assert_relative_eq!(ray.point_at(distance).y, 0.5);
    }

    #[test]
    fn test_plane_intersection_parallel_or_behind_is_none() {
        let flat = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z);
        assert!(HorizontalPlane::new(0.5).intersect(&flat).is_none());

        let up = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!(HorizontalPlane::new(0.5).intersect(&up).is_none());
    }
}
