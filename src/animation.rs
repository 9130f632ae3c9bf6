use std::rc::Rc;

use crate::controller::{ControlError, Tick, UpdatableController};
use crate::handler::{PlayerControlInput, WalkingMode};
use crate::raycast::RaycastChecker;
use crate::scene::Scene;

/// Animations-Parameter, die der Host an sein Rig weiterreicht.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Animator {
    mode: i32,
}

impl Animator {
    pub fn mode(&self) -> i32 {
        self.mode
    }

    pub fn set_mode(&mut self, mode: i32) {
        self.mode = mode;
    }
}

/// Vor einem Hindernis immer 0 (idle), sonst die Id des Laufmodus.
pub fn animation_mode(walking_mode: WalkingMode, front_blocked: bool) -> i32 {
    if front_blocked {
        return 0;
    }
    walking_mode.id()
}

pub struct PlayerAnimationController {
    input: Rc<dyn PlayerControlInput>,
    rays: Rc<dyn RaycastChecker>,
}

impl PlayerAnimationController {
    pub fn new(input: Rc<dyn PlayerControlInput>, rays: Rc<dyn RaycastChecker>) -> Self {
        Self { input, rays }
    }
}

impl UpdatableController for PlayerAnimationController {
    fn name(&self) -> &'static str {
        "PlayerAnimationController"
    }

    fn update_control(&mut self, tick: &Tick, scene: &mut Scene) -> Result<(), ControlError> {
        let walking_mode = self.input.walking_mode(tick.input);
        let front_blocked = self.rays.check_front(&scene.body.transform(), &scene.world);

        scene.animator.set_mode(animation_mode(walking_mode, front_blocked));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_passthrough() {
        assert_eq!(animation_mode(WalkingMode::Stop, false), 0);
        assert_eq!(animation_mode(WalkingMode::Walk, false), 1);
        assert_eq!(animation_mode(WalkingMode::Run, false), 2);
    }

    #[test]
    fn test_obstacle_forces_idle() {
        for mode in [WalkingMode::Stop, WalkingMode::Walk, WalkingMode::Run] {
            assert_eq!(animation_mode(mode, true), 0);
        }
    }
}
