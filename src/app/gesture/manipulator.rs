//! Zerlegt Touch-Ströme in Verschieben, Skalieren und Drehen.

use super::state::{GestureManipulator, GestureState, PairSample};
use crate::core::{
    ArCamera, HorizontalPlane, PlacedObject, PlacementMode, Pose, TrackingProvider,
};
use crate::input::{Touch, TouchPhase};
use crate::shared::QuizOptions;
use glam::Vec2;

/// Alles, was der Manipulator pro Frame lesen darf.
pub struct GestureContext<'a> {
    /// Kamera des Frames
    pub camera: Option<&'a ArCamera>,
    /// Tracking-Provider für Flächen-Hit-Tests
    pub tracking: &'a dyn TrackingProvider,
    /// Aktueller Platzierungsmodus
    pub placement_mode: PlacementMode,
    /// Weltpose des Ankers des Objekts
    pub anchor_pose: Pose,
    /// Grenzen und Faktoren
    pub options: &'a QuizOptions,
}

/// Was ein Frame am Objekt verändert hat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureOutcome {
    /// Neue Auswahl, falls sie sich geändert hat
    pub selection_changed: Option<bool>,
    /// Objekt wurde verschoben
    pub moved: bool,
    /// Skalierung wurde geändert
    pub scaled: bool,
    /// Objekt wurde gedreht
    pub rotated: bool,
}

/// Winkeldifferenz nach (-180, 180].
fn wrap_degrees(delta: f32) -> f32 {
    let wrapped = delta.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

fn pair_sample(a: &Touch, b: &Touch) -> PairSample {
    let line = b.position - a.position;
    PairSample {
        ids: (a.id, b.id),
        distance: line.length(),
        angle_deg: line.y.atan2(line.x).to_degrees(),
    }
}

impl GestureManipulator {
    /// Verarbeitet die Touches eines Frames.
    ///
    /// Ein- und Zwei-Finger-Modus schließen sich pro Frame gegenseitig aus.
    /// Von der UI abgefangene Touches werden ignoriert.
    pub fn process(
        &mut self,
        touches: &[Touch],
        object: &mut PlacedObject,
        ctx: &GestureContext<'_>,
    ) -> GestureOutcome {
        let mut outcome = GestureOutcome::default();
        let mut live: Vec<Touch> = touches
            .iter()
            .filter(|t| !t.over_ui && t.phase.is_active())
            .copied()
            .collect();
        live.sort_by_key(|t| t.id);

        match live.as_slice() {
            [] => self.release(object, &mut outcome),
            [touch] => self.process_single(touch, object, ctx, &mut outcome),
            [first, second, ..] => self.process_pair(first, second, object, ctx, &mut outcome),
        }
        outcome
    }

    fn process_single(
        &mut self,
        touch: &Touch,
        object: &mut PlacedObject,
        ctx: &GestureContext<'_>,
        outcome: &mut GestureOutcome,
    ) {
        // Ein Finger des Paars wurde abgehoben
        if self.state.last_pair.is_some() {
            self.release(object, outcome);
        }

        let same_touch = self
            .state
            .last_single
            .is_some_and(|(id, _)| id == touch.id);

        if touch.phase == TouchPhase::Began || !same_touch {
            let hit = touch.phase == TouchPhase::Began && self.hits(touch.position, object, ctx);
            self.set_selected(hit, object, outcome);
            self.state.last_single = Some((touch.id, touch.position));
            return;
        }

        if self.state.selected {
            outcome.moved = self.drag_to(touch.position, object, ctx);
        }
        self.state.last_single = Some((touch.id, touch.position));
    }

    fn process_pair(
        &mut self,
        a: &Touch,
        b: &Touch,
        object: &mut PlacedObject,
        ctx: &GestureContext<'_>,
        outcome: &mut GestureOutcome,
    ) {
        self.state.last_single = None;
        let sample = pair_sample(a, b);

        let baseline = match self.state.last_pair {
            Some(last)
                if last.ids == sample.ids
                    && a.phase != TouchPhase::Began
                    && b.phase != TouchPhase::Began =>
            {
                last
            }
            _ => {
                // Erstes Frame des Paars: nur Ausgangswerte merken.
                // Auswahl nur bei frisch aufgesetztem Finger, der das Objekt trifft.
                let touched_down = a.phase == TouchPhase::Began || b.phase == TouchPhase::Began;
                if !self.state.selected
                    && touched_down
                    && (self.hits(a.position, object, ctx) || self.hits(b.position, object, ctx))
                {
                    self.set_selected(true, object, outcome);
                }
                self.state.last_pair = Some(sample);
                return;
            }
        };

        if self.state.selected {
            let distance_delta = sample.distance - baseline.distance;
            if distance_delta != 0.0 {
                let divisor = ctx.options.pinch_scale_divisor.max(f32::EPSILON);
                let old = object.transform.scale;
                let new = ctx.options.clamp_scale(old * (1.0 + distance_delta / divisor));
                if new != old {
                    object.transform.scale = new;
                    outcome.scaled = true;
                }
            }

            let angle_delta = wrap_degrees(sample.angle_deg - baseline.angle_deg);
            if angle_delta != 0.0 {
                object.rotate_world_yaw(&ctx.anchor_pose, -angle_delta);
                outcome.rotated = true;
            }
        }
        self.state.last_pair = Some(sample);
    }

    /// Hebt die Auswahl auf und verwirft alle Ausgangswerte.
    fn release(&mut self, object: &mut PlacedObject, outcome: &mut GestureOutcome) {
        self.set_selected(false, object, outcome);
        self.state = GestureState::default();
    }

    fn set_selected(
        &mut self,
        selected: bool,
        object: &mut PlacedObject,
        outcome: &mut GestureOutcome,
    ) {
        if self.state.selected == selected {
            return;
        }
        self.state.selected = selected;
        object.set_interacting(selected);
        outcome.selection_changed = Some(selected);
        log::debug!(
            "Objekt {:?} {}",
            object.anchor,
            if selected { "ausgewählt" } else { "losgelassen" }
        );
    }

    /// Trifft der Strahl durch `screen` das Kollisionsvolumen?
    fn hits(&self, screen: Vec2, object: &PlacedObject, ctx: &GestureContext<'_>) -> bool {
        let Some(camera) = ctx.camera else {
            return false;
        };
        object.hit_by(&camera.screen_point_to_ray(screen), &ctx.anchor_pose)
    }

    /// Neue Position: Flächen-Treffer, sonst Ebene auf Objekthöhe, sonst Punkt auf dem Strahl.
    fn drag_to(&self, screen: Vec2, object: &mut PlacedObject, ctx: &GestureContext<'_>) -> bool {
        if ctx.placement_mode == PlacementMode::Real {
            if let Some(hit) = ctx.tracking.hit_test(screen) {
                object.set_world_position(&ctx.anchor_pose, hit.pose.position);
                return true;
            }
        }

        let Some(camera) = ctx.camera else {
            return false;
        };
        let ray = camera.screen_point_to_ray(screen);
        let current = object.world_position(&ctx.anchor_pose);

        let target = match HorizontalPlane::new(current.y)
            .intersect(&ray)
            .filter(|d| *d <= ctx.options.fallback_max_distance)
        {
            Some(distance) => ray.point_at(distance),
            None => {
                let depth = camera.depth_of(current);
                let depth = if depth > 0.0 {
                    depth.max(ctx.options.drag_min_depth)
                } else {
                    ctx.options.drag_default_depth
                };
                ray.point_at(depth)
            }
        };

        object.set_world_position(&ctx.anchor_pose, target);
        true
    }
}
