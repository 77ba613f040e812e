//! Anker: stabile Bezugssysteme, optional starr an eine Fläche gekoppelt.

use super::pose::Pose;
use super::tracking::{SurfaceId, TrackingProvider};
use indexmap::IndexMap;

/// Handle auf einen Anker im `AnchorStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnchorHandle(pub u64);

/// Kopplung eines Ankers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorAttachment {
    /// Starr an eine Fläche gekoppelt; `offset` ist relativ zur Flächenpose.
    Surface {
        /// Getrackte Fläche
        surface: SurfaceId,
        /// Ankerpose im Flächen-Koordinatensystem
        offset: Pose,
    },
    /// Freistehend, bewegt sich nie von selbst
    Free,
}

/// Ein Anker mit seiner zuletzt bekannten Weltpose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Handle
    pub handle: AnchorHandle,
    /// Kopplung
    pub attachment: AnchorAttachment,
    /// Zuletzt bekannte Weltpose
    pub pose: Pose,
}

impl Anchor {
    /// Gekoppelte Fläche, falls vorhanden.
    pub fn surface(&self) -> Option<SurfaceId> {
        match self.attachment {
            AnchorAttachment::Surface { surface, .. } => Some(surface),
            AnchorAttachment::Free => None,
        }
    }
}

/// Verwaltet alle lebenden Anker.
#[derive(Debug, Clone, Default)]
pub struct AnchorStore {
    anchors: IndexMap<AnchorHandle, Anchor>,
    next_id: u64,
}

impl AnchorStore {
    /// Erstellt einen leeren Store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Erstellt einen Anker an `pose`.
    ///
    /// Mit getrackter Fläche: an die Fläche gekoppelt. Sonst (oder wenn die
    /// Kopplung scheitert) freistehend an derselben Pose. Liefert immer ein Handle.
    pub fn place_anchor(
        &mut self,
        pose: Pose,
        surface: Option<SurfaceId>,
        tracking: &dyn TrackingProvider,
    ) -> AnchorHandle {
        self.next_id += 1;
        let handle = AnchorHandle(self.next_id);

        let attachment = match surface {
            Some(surface) => match tracking.surface_pose(surface) {
                Some(surface_pose) => AnchorAttachment::Surface {
                    surface,
                    offset: surface_pose.inverse().mul_pose(&pose),
                },
                None => {
                    log::warn!(
                        "Fläche {} nicht getrackt, lege freistehenden Anker an",
                        surface
                    );
                    AnchorAttachment::Free
                }
            },
            None => AnchorAttachment::Free,
        };

        log::debug!("Anker {:?} erstellt: {:?}", handle, attachment);
        self.anchors.insert(
            handle,
            Anchor {
                handle,
                attachment,
                pose,
            },
        );
        handle
    }

    /// Entfernt einen Anker. Gibt `true` zurück, wenn er existierte.
    pub fn remove(&mut self, handle: AnchorHandle) -> bool {
        self.anchors.shift_remove(&handle).is_some()
    }

    /// Aktuelle Weltpose eines Ankers.
    pub fn world_pose(&self, handle: AnchorHandle) -> Option<Pose> {
        self.anchors.get(&handle).map(|a| a.pose)
    }

    /// Anker nach Handle.
    pub fn get(&self, handle: AnchorHandle) -> Option<&Anchor> {
        self.anchors.get(&handle)
    }

    /// Zieht gekoppelte Anker mit ihrer Fläche mit.
    ///
    /// Nicht mehr getrackte Flächen behalten die letzte bekannte Pose.
    pub fn refresh(&mut self, tracking: &dyn TrackingProvider) {
        for anchor in self.anchors.values_mut() {
            if let AnchorAttachment::Surface { surface, offset } = anchor.attachment {
                if let Some(surface_pose) = tracking.surface_pose(surface) {
                    anchor.pose = surface_pose.mul_pose(&offset);
                }
            }
        }
    }

    /// Anzahl lebender Anker.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Gibt `true` zurück, wenn kein Anker lebt.
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Entfernt alle Anker.
    pub fn clear(&mut self) {
        self.anchors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::simulated_tracking::{SimulatedPlane, SimulatedTrackingProvider};
    use approx::assert_relative_eq;
    use glam::{Quat, Vec2, Vec3};

    fn provider_with_plane() -> (SimulatedTrackingProvider, SurfaceId) {
        let mut provider = SimulatedTrackingProvider::tracking();
        let id = provider.add_plane(SimulatedPlane::new(
            Pose::from_position(Vec3::new(0.0, 0.0, -2.0)),
            Vec2::new(2.0, 2.0),
        ));
        (provider, id)
    }

    #[test]
    fn test_anchor_on_tracked_surface_moves_with_surface() {
        let (mut provider, id) = provider_with_plane();
        let mut store = AnchorStore::new();
        let pose = Pose::from_position(Vec3::new(0.5, 0.0, -2.0));

        let handle = store.place_anchor(pose, Some(id), &provider);
        assert_eq!(store.get(handle).unwrap().surface(), Some(id));

        // Fläche wird um 0.1 angehoben und um 90° gedreht
        provider.move_plane(
            id,
            Pose::new(
                Vec3::new(0.0, 0.1, -2.0),
                Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ),
        );
        store.refresh(&provider);

        let moved = store.world_pose(handle).unwrap();
        assert_relative_eq!(moved.position.y, 0.1, epsilon = 1e-5);
        assert_relative_eq!(moved.position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(moved.position.z, -2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_untracked_surface_degrades_to_free_anchor() {
        let (mut provider, id) = provider_with_plane();
        provider.set_plane_tracked(id, false);
        let mut store = AnchorStore::new();
        let pose = Pose::from_position(Vec3::new(1.0, 0.0, -1.0));

        let handle = store.place_anchor(pose, Some(id), &provider);
        let anchor = store.get(handle).unwrap();
        assert_eq!(anchor.attachment, AnchorAttachment::Free);
        assert_eq!(anchor.pose, pose);
    }

    #[test]
    fn test_free_anchor_never_moves() {
        let (provider, _) = provider_with_plane();
        let mut store = AnchorStore::new();
        let pose = Pose::from_position(Vec3::new(0.0, -1.5, -3.0));
        let handle = store.place_anchor(pose, None, &provider);

        store.refresh(&provider);
        assert_eq!(store.world_pose(handle), Some(pose));
    }

    #[test]
    fn test_remove_destroys_anchor() {
        let (provider, _) = provider_with_plane();
        let mut store = AnchorStore::new();
        let handle = store.place_anchor(Pose::IDENTITY, None, &provider);
        assert!(store.remove(handle));
        assert!(!store.remove(handle));
        assert!(store.is_empty());
    }
}
