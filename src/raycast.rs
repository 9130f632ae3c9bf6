use glam::Vec3;

use crate::block::LayerMask;
use crate::config::{FrontRaySettings, RaySettings, RaysConfig};
use crate::scene::Transform;
use crate::world::RayCaster;

/// Boden- und Hindernis-Sonden. Jede Abfrage geht frisch gegen die Welt.
pub trait RaycastChecker {
    fn check_leg(&self, body: &Transform, world: &dyn RayCaster) -> bool;
    fn check_front(&self, body: &Transform, world: &dyn RayCaster) -> bool;
}

/// Strahl ab `offset` (lokal) in Richtung `direction_distance` (lokal, Betrag = Länge).
pub fn cast_from(
    body: &Transform,
    offset: Vec3,
    direction_distance: Vec3,
    layers: LayerMask,
    world: &dyn RayCaster,
) -> bool {
    world.raycast(
        body.transform_point(offset),
        body.transform_direction(direction_distance).normalize_or_zero(),
        direction_distance.length(),
        layers,
    )
}

/// Start-Offset des `index`-ten Strahls im Fächer.
/// Bei `quantity <= 1` gibt es nur einen Strahl in der Mitte des Intervalls.
pub fn fan_offset(offset: Vec3, index: u32, quantity: u32, interval: f32) -> Vec3 {
    if quantity <= 1 {
        return offset + Vec3::Y * (interval * 0.5);
    }
    let step = interval / (quantity - 1) as f32;
    offset + Vec3::Y * (index as f32 * step)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckRaycast {
    leg: RaySettings,
    front: FrontRaySettings,
}

impl CheckRaycast {
    pub fn new(rays: RaysConfig) -> Self {
        Self {
            leg: rays.leg,
            front: rays.front.sanitized(),
        }
    }

    pub fn front_offsets(&self) -> impl Iterator<Item = Vec3> + '_ {
        let f = &self.front;
        (0..f.quantity.max(1)).map(move |i| fan_offset(f.offset, i, f.quantity, f.interval))
    }
}

impl RaycastChecker for CheckRaycast {
    fn check_leg(&self, body: &Transform, world: &dyn RayCaster) -> bool {
        cast_from(
            body,
            self.leg.offset,
            self.leg.direction_distance,
            self.leg.layers,
            world,
        )
    }

    fn check_front(&self, body: &Transform, world: &dyn RayCaster) -> bool {
        // von unten nach oben, erster Treffer reicht
        self.front_offsets().any(|offset| {
            cast_from(
                body,
                offset,
                self.front.direction_distance,
                self.front.layers,
                world,
            )
        })
    }
}
