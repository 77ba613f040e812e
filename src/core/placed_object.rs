//! Platziertes Objekt: Anker-Referenz, lokale Transformation, Kollisionsvolumen.

use super::anchor::AnchorHandle;
use super::geometry::ShapeKind;
use super::pose::{yaw_rotation_deg, Pose, Ray};
use super::question::GeometryQuestion;
use glam::{Quat, Vec3};
use std::sync::Arc;

/// Minimale Kantenlänge des Kollisionsvolumens.
pub const MIN_COLLIDER_EXTENT: f32 = 0.01;
/// Dicke flacher Figuren (Rechteck, Dreieck).
pub const FLAT_SHAPE_THICKNESS: f32 = 0.05;
/// Dicke der Kreisscheibe.
pub const DISK_THICKNESS: f32 = 0.02;

/// Lokale Transformation relativ zum Anker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// Position im Anker-Koordinatensystem
    pub position: Vec3,
    /// Rotation im Anker-Koordinatensystem
    pub rotation: Quat,
    /// Gleichmäßige Skalierung relativ zur Basisgröße
    pub scale: f32,
}

impl Default for ObjectTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// Leerlauf-Animation: langsames Drehen und Auf-und-Ab-Schweben.
///
/// Wirkt nur auf die Render-Transformation, nie auf die manipulierte Transformation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleAnimation {
    /// Drehgeschwindigkeit in Grad/s
    pub rotation_speed_deg: f32,
    /// Schwebe-Frequenz
    pub bob_frequency: f32,
    /// Schwebe-Amplitude
    pub bob_amplitude: f32,
    /// Aktueller Gier-Winkel in Grad
    pub yaw_deg: f32,
    /// Aktueller Höhenversatz
    pub bob_offset: f32,
    /// Laufzeit der Animation
    time: f32,
    /// Pausiert während der Interaktion
    suspended: bool,
}

impl IdleAnimation {
    /// Erstellt eine laufende Animation.
    pub fn new(rotation_speed_deg: f32, bob_frequency: f32, bob_amplitude: f32) -> Self {
        Self {
            rotation_speed_deg,
            bob_frequency,
            bob_amplitude,
            yaw_deg: 0.0,
            bob_offset: 0.0,
            time: 0.0,
            suspended: false,
        }
    }

    /// Schreitet um `delta_seconds` fort, außer wenn pausiert.
    pub fn advance(&mut self, delta_seconds: f32) {
        if self.suspended || delta_seconds <= 0.0 {
            return;
        }
        self.time += delta_seconds;
        self.yaw_deg = (self.yaw_deg + self.rotation_speed_deg * delta_seconds).rem_euclid(360.0);
        self.bob_offset = (self.time * self.bob_frequency).sin() * self.bob_amplitude;
    }

    /// Pausiert oder setzt fort.
    pub fn set_suspended(&mut self, suspended: bool) {
        self.suspended = suspended;
    }

    /// Ist die Animation pausiert?
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }
}

/// Achsenparalleles Kollisionsvolumen im lokalen Objektraum (zentriert).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionBox {
    /// Halbe Kantenlängen bei Skalierung 1.0
    pub half_extents: Vec3,
}

impl CollisionBox {
    /// Leitet das Volumen aus Form und Maßen der Frage ab.
    pub fn for_question(question: &GeometryQuestion) -> Self {
        let d = question.dims;
        let (a, b, c, r, h) = (d.a as f32, d.b as f32, d.c as f32, d.r as f32, d.h as f32);
        let size = match question.shape {
            ShapeKind::Rectangle => Vec3::new(a, FLAT_SHAPE_THICKNESS, b),
            ShapeKind::Triangle => Vec3::new(a, FLAT_SHAPE_THICKNESS, triangle_height(a, b, c)),
            ShapeKind::Circle => Vec3::new(2.0 * r, DISK_THICKNESS, 2.0 * r),
            ShapeKind::Cube => Vec3::splat(a),
            ShapeKind::Cuboid => Vec3::new(a, c, b),
            ShapeKind::Cylinder => Vec3::new(2.0 * r, h, 2.0 * r),
            ShapeKind::Sphere => Vec3::splat(2.0 * r),
        };
        let size = (size * question.visual_scale).abs().max(Vec3::splat(MIN_COLLIDER_EXTENT));
        Self {
            half_extents: size * 0.5,
        }
    }

    /// Strahl-Box-Test (Slab-Verfahren) im lokalen Raum.
    fn intersects_local(&self, origin: Vec3, direction: Vec3, half: Vec3) -> bool {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let h = half[axis];
            if d.abs() < 1e-8 {
                if o < -h || o > h {
                    return false;
                }
                continue;
            }
            let t1 = (-h - o) / d;
            let t2 = (h - o) / d;
            t_min = t_min.max(t1.min(t2));
            t_max = t_max.min(t1.max(t2));
            if t_min > t_max {
                return false;
            }
        }
        t_max >= 0.0
    }
}

/// Höhe des Dreiecks über Seite a (Lage von Punkt C wie beim Aufbau des Meshes).
fn triangle_height(a: f32, b: f32, c: f32) -> f32 {
    if a <= 0.0 {
        return 0.0;
    }
    let cx = (c * c + a * a - b * b) / (2.0 * a);
    let under = c * c - cx * cx;
    if under <= 0.0 {
        0.0
    } else {
        under.sqrt()
    }
}

/// Das Objekt der aktuellen Frage.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    /// Zugehöriger Anker (genau einer pro Objekt)
    pub anchor: AnchorHandle,
    /// Aktive Frage (Referenz, Besitz bleibt bei der Fragenbank)
    pub question: Arc<GeometryQuestion>,
    /// Manipulierte Transformation relativ zum Anker
    pub transform: ObjectTransform,
    /// Kollisionsvolumen
    pub collider: CollisionBox,
    /// Optionale Leerlauf-Animation
    pub idle: Option<IdleAnimation>,
}

impl PlacedObject {
    /// Erstellt ein Objekt im Ursprung seines Ankers.
    pub fn new(anchor: AnchorHandle, question: Arc<GeometryQuestion>) -> Self {
        let collider = CollisionBox::for_question(&question);
        Self {
            anchor,
            question,
            transform: ObjectTransform::default(),
            collider,
            idle: None,
        }
    }

    /// Fügt eine Leerlauf-Animation hinzu.
    pub fn with_idle(mut self, idle: IdleAnimation) -> Self {
        self.idle = Some(idle);
        self
    }

    /// Weltpose des Objekts (ohne Skalierung).
    pub fn world_pose(&self, anchor_pose: &Pose) -> Pose {
        anchor_pose.mul_pose(&Pose::new(self.transform.position, self.transform.rotation))
    }

    /// Weltposition des Objekts.
    pub fn world_position(&self, anchor_pose: &Pose) -> Vec3 {
        anchor_pose.transform_point(self.transform.position)
    }

    /// Setzt die Weltposition (Rotation bleibt).
    pub fn set_world_position(&mut self, anchor_pose: &Pose, world: Vec3) {
        self.transform.position = anchor_pose.inverse_transform_point(world);
    }

    /// Dreht das Objekt um die Weltvertikale. Neigung und Rollen bleiben unverändert.
    pub fn rotate_world_yaw(&mut self, anchor_pose: &Pose, degrees: f32) {
        let world_rotation = anchor_pose.rotation * self.transform.rotation;
        let rotated = (yaw_rotation_deg(degrees) * world_rotation).normalize();
        self.transform.rotation = (anchor_pose.rotation.inverse() * rotated).normalize();
    }

    /// Gleichmäßige Skalierung.
    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    /// Trifft der Strahl das Kollisionsvolumen (inkl. Kinder, die darin liegen)?
    pub fn hit_by(&self, ray: &Ray, anchor_pose: &Pose) -> bool {
        let pose = self.world_pose(anchor_pose);
        let origin = pose.inverse_transform_point(ray.origin);
        let direction = pose.rotation.inverse() * ray.direction;
        let half = self.collider.half_extents * self.transform.scale.max(0.0);
        self.collider.intersects_local(origin, direction, half)
    }

    /// Render-Transformation inkl. Leerlauf-Animation.
    pub fn render_transform(&self) -> ObjectTransform {
        let mut t = self.transform;
        if let Some(idle) = &self.idle {
            t.position.y += idle.bob_offset;
            t.rotation = (t.rotation * yaw_rotation_deg(idle.yaw_deg)).normalize();
        }
        t
    }

    /// Schreitet die Leerlauf-Animation fort.
    pub fn advance_idle(&mut self, delta_seconds: f32) {
        if let Some(idle) = self.idle.as_mut() {
            idle.advance(delta_seconds);
        }
    }

    /// Pausiert/setzt die Leerlauf-Animation fort (falls vorhanden).
    pub fn set_interacting(&mut self, interacting: bool) {
        if let Some(idle) = self.idle.as_mut() {
            idle.set_suspended(interacting);
        }
    }
}
