use glam::{EulerRot, Quat, Vec2};

use crate::config::{ConfigError, TripodSettings};
use crate::controller::{ControlError, Tick, UpdatableController};
use crate::scene::Scene;

/// Kamera-Stativ: folgt dem Körper starr, dreht sich mit der Maus.
pub struct TripodMovementController {
    settings: TripodSettings,
    // x = yaw, y = pitch (Grad)
    rotation: Vec2,
}

impl TripodMovementController {
    pub fn new(settings: TripodSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            rotation: Vec2::ZERO,
        })
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.x
    }

    pub fn pitch(&self) -> f32 {
        self.rotation.y
    }

    fn pitch_limit(&self) -> f32 {
        self.settings.clamped_vertical_rotation.abs()
    }

    fn set_position(&self, scene: &mut Scene) {
        scene.tripod.position = scene.body.position + self.settings.offset;
    }

    fn set_rotation(&mut self, tick: &Tick, scene: &mut Scene) {
        let delta = tick.input.pointer_delta() * self.settings.sensitivity * tick.dt;

        // ohne Invert wird negiert
        let horizontal = if self.settings.horizontal_invert { delta.x } else { -delta.x };
        let vertical = if self.settings.vertical_invert { delta.y } else { -delta.y };

        let limit = self.pitch_limit();
        self.rotation.x += horizontal;
        self.rotation.y = (self.rotation.y + vertical).clamp(-limit, limit);

        scene.tripod.rotation = Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.x.to_radians(),
            self.rotation.y.to_radians(),
            0.0,
        );
    }
}

impl UpdatableController for TripodMovementController {
    fn name(&self) -> &'static str {
        "TripodMovementController"
    }

    fn update_control(&mut self, tick: &Tick, scene: &mut Scene) -> Result<(), ControlError> {
        self.set_position(scene);
        self.set_rotation(tick, scene);

        if !self.rotation.is_finite() {
            return Err(ControlError::NonFinite {
                controller: self.name(),
                what: "tripod rotation",
            });
        }
        Ok(())
    }
}
