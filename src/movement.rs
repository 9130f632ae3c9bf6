//! Spielerbewegung: horizontale Geschwindigkeit aus der Eingabe, Blickrichtung
//! und die Zustandsmaschine für Boden- und Doppelsprung.

use std::rc::Rc;

use glam::{Quat, Vec3};
use log::debug;

use crate::config::{ConfigError, MovementSettings};
use crate::controller::{ControlError, Tick, UpdatableController};
use crate::handler::{PlayerControlInput, WalkingMode};
use crate::raycast::RaycastChecker;
use crate::scene::Scene;

/// Startgeschwindigkeit für Sprunghöhe `height`: v = sqrt(2 * g * h).
pub fn jump_velocity(gravity: f32, height: f32) -> f32 {
    (2.0 * gravity.abs() * height).sqrt()
}

/// Lokale Eingaberichtung → Welt (nur Gierwinkel der Kamera), flach, normiert, mal `speed`.
pub fn recalculate_force(force: Vec3, yaw_degrees: f32, speed: f32) -> Vec3 {
    let world = Quat::from_rotation_y(yaw_degrees.to_radians()) * force;
    Vec3::new(world.x, 0.0, world.z).normalize_or_zero() * speed
}

/// Zielrotation: Blickrichtung der Eingabe plus Gierwinkel der Kamera, nur um Y.
pub fn target_rotation(force: Vec3, yaw_offset_degrees: f32) -> Quat {
    let look_yaw = force.x.atan2(force.z).to_degrees();
    Quat::from_rotation_y((look_yaw + yaw_offset_degrees).to_radians())
}

/// Frame-unabhängiges Nachdrehen; `t` wird wie bei einer Engine-Slerp auf [0, 1] begrenzt.
pub fn smooth_rotation(current: Quat, target: Quat, smoothness: f32, dt: f32) -> Quat {
    let t = (smoothness * dt).clamp(0.0, 1.0);
    current.slerp(target, t).normalize()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpKind {
    Ground,
    Double,
}

/// Doppelsprung-Buchhaltung.
///
/// Das "verbraucht"-Flag wird nur beim nächsten Sprung vom Boden gelöscht,
/// nicht schon beim Landen.
#[derive(Debug, Clone, Copy, Default)]
pub struct JumpState {
    double_jump_used: bool,
}

impl JumpState {
    pub fn request(&mut self, grounded: bool) -> Option<JumpKind> {
        if grounded {
            self.double_jump_used = false;
            Some(JumpKind::Ground)
        } else if !self.double_jump_used {
            self.double_jump_used = true;
            Some(JumpKind::Double)
        } else {
            None
        }
    }

    pub fn double_jump_used(&self) -> bool {
        self.double_jump_used
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroundState {
    pub is_grounded: bool,
    pub is_obstructed: bool,
    pub can_double_jump: bool,
}

pub struct PlayerMovementController {
    input: Rc<dyn PlayerControlInput>,
    rays: Rc<dyn RaycastChecker>,
    settings: MovementSettings,

    jump_velocity: f32,
    double_jump_velocity: f32,

    jump: JumpState,
    ground: GroundState,
}

impl PlayerMovementController {
    pub fn new(
        input: Rc<dyn PlayerControlInput>,
        rays: Rc<dyn RaycastChecker>,
        settings: MovementSettings,
        gravity: f32,
    ) -> Result<Self, ConfigError> {
        settings.validate()?;
        if !(gravity > 0.0) {
            return Err(ConfigError::NonPositiveGravity(gravity));
        }

        Ok(Self {
            jump_velocity: jump_velocity(gravity, settings.jump_height),
            double_jump_velocity: jump_velocity(gravity, settings.double_jump_height),
            input,
            rays,
            settings,
            jump: JumpState::default(),
            ground: GroundState::default(),
        })
    }

    pub fn speed_for(&self, mode: WalkingMode) -> f32 {
        match mode {
            WalkingMode::Run => self.settings.run_speed,
            WalkingMode::Walk => self.settings.walk_speed,
            WalkingMode::Stop => self.settings.stop_speed,
        }
    }

    pub fn jump_velocities(&self) -> (f32, f32) {
        (self.jump_velocity, self.double_jump_velocity)
    }

    /// Sonden-Ergebnis und Sprungzustand des letzten Ticks.
    pub fn ground_state(&self) -> GroundState {
        self.ground
    }
}

impl UpdatableController for PlayerMovementController {
    fn name(&self) -> &'static str {
        "PlayerMovementController"
    }

    fn update_control(&mut self, tick: &Tick, scene: &mut Scene) -> Result<(), ControlError> {
        let intent = self.input.movement_intent(tick.input);

        let body = scene.body.transform();
        let front_hit = self.rays.check_front(&body, &scene.world);
        let leg_hit = self.rays.check_leg(&body, &scene.world);
        let yaw = scene.tripod.yaw_degrees();

        if intent.force != Vec3::ZERO && !front_hit {
            let v = recalculate_force(intent.force, yaw, self.speed_for(intent.walking_mode));
            scene.body.set_velocity(Some(v.x), None, Some(v.z));
        }

        if intent.walking_mode.is_moving() {
            let target = target_rotation(intent.force, yaw);
            scene.body.rotation = smooth_rotation(
                scene.body.rotation,
                target,
                self.settings.rotation_smoothness,
                tick.dt,
            );
        }

        if intent.jump_requested {
            match self.jump.request(leg_hit) {
                Some(JumpKind::Ground) => {
                    scene.body.set_velocity(None, Some(self.jump_velocity), None);
                    debug!("jump vy={:.2}", self.jump_velocity);
                }
                Some(JumpKind::Double) => {
                    scene.body.set_velocity(None, Some(self.double_jump_velocity), None);
                    debug!("double jump vy={:.2}", self.double_jump_velocity);
                }
                None => {}
            }
        }

        self.ground = GroundState {
            is_grounded: leg_hit,
            is_obstructed: front_hit,
            can_double_jump: !leg_hit && !self.jump.double_jump_used(),
        };

        if !scene.body.velocity.is_finite() {
            return Err(ControlError::NonFinite {
                controller: self.name(),
                what: "body velocity",
            });
        }
        if !scene.body.rotation.is_finite() {
            return Err(ControlError::NonFinite {
                controller: self.name(),
                what: "body rotation",
            });
        }
        Ok(())
    }
}
