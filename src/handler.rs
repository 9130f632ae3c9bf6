use glam::Vec3;

use crate::buttons::{Action, ButtonsInput, PlayerInputButtons};
use crate::input::{InputState, PushMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum WalkingMode {
    #[default]
    Stop = 0,
    Walk = 1,
    Run = 2,
}

impl WalkingMode {
    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn is_moving(self) -> bool {
        self > WalkingMode::Stop
    }
}

/// Was der Spieler in diesem Tick will. Wird jeden Tick komplett neu berechnet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    /// Lokale Richtung: x = rechts/links, z = vor/zurück, y immer 0.
    pub force: Vec3,
    /// Mindestens eine Bewegungstaste wird gehalten (nicht nur losgelassen).
    pub full_speed: bool,
    pub walking_mode: WalkingMode,
    pub jump_requested: bool,
}

pub trait PlayerControlInput {
    fn movement_intent(&self, input: &InputState) -> MovementIntent;

    fn walking_mode(&self, input: &InputState) -> WalkingMode {
        self.movement_intent(input).walking_mode
    }

    fn jump_requested(&self, input: &InputState) -> bool {
        self.movement_intent(input).jump_requested
    }
}

pub struct PlayerInputHandler<B: ButtonsInput = PlayerInputButtons> {
    buttons: B,
}

impl<B: ButtonsInput> PlayerInputHandler<B> {
    pub fn new(buttons: B) -> Self {
        Self { buttons }
    }

    /// Achsenwert: gehalten +1/-1 mit full speed, losgelassen (ein Tick) +1/-1 ohne, sonst 0.
    fn axis_value(&self, input: &InputState, positive: Action, negative: Action) -> (f32, bool) {
        let b = &self.buttons;
        if b.is_action(input, positive, PushMode::Hold) {
            (1.0, true)
        } else if b.is_action(input, negative, PushMode::Hold) {
            (-1.0, true)
        } else if b.is_action(input, positive, PushMode::Release) {
            (1.0, false)
        } else if b.is_action(input, negative, PushMode::Release) {
            (-1.0, false)
        } else {
            (0.0, false)
        }
    }
}

impl<B: ButtonsInput> PlayerControlInput for PlayerInputHandler<B> {
    fn movement_intent(&self, input: &InputState) -> MovementIntent {
        let (z, full_z) = self.axis_value(input, Action::Forward, Action::Backward);
        let (x, full_x) = self.axis_value(input, Action::Rightward, Action::Leftward);
        let full_speed = full_z || full_x;

        let walking_mode = if !full_speed {
            WalkingMode::Stop
        } else if self.buttons.is_action(input, Action::Run, PushMode::Hold) {
            WalkingMode::Run
        } else {
            WalkingMode::Walk
        };

        MovementIntent {
            force: Vec3::new(x, 0.0, z),
            full_speed,
            walking_mode,
            jump_requested: self.buttons.is_action(input, Action::Jump, PushMode::Press),
        }
    }
}
