use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::config::ConfigError;
use crate::input::{InputState, PushMode};

/// Logische Aktionen, jede an genau eine physische Taste gebunden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Forward,
    Backward,
    Rightward,
    Leftward,
    Run,
    Jump,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::Forward,
        Action::Backward,
        Action::Rightward,
        Action::Leftward,
        Action::Run,
        Action::Jump,
    ];
}

/// Quelle für Tastenbelegung + Tastenzustand.
pub trait ButtonsInput {
    fn binding(&self, action: Action) -> KeyCode;

    fn is_button_pressed(&self, input: &InputState, code: KeyCode, mode: PushMode) -> bool {
        input.is_button(code, mode)
    }

    fn is_action(&self, input: &InputState, action: Action, mode: PushMode) -> bool {
        self.is_button_pressed(input, self.binding(action), mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInputButtons {
    pub forward: KeyCode,
    pub backward: KeyCode,
    pub rightward: KeyCode,
    pub leftward: KeyCode,

    pub run: KeyCode,
    pub jump: KeyCode,
}

impl Default for PlayerInputButtons {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            backward: KeyCode::KeyS,
            rightward: KeyCode::KeyD,
            leftward: KeyCode::KeyA,
            run: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
        }
    }
}

impl PlayerInputButtons {
    /// Zwei Aktionen auf derselben Taste sind ein Konfigurationsfehler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, &first) in Action::ALL.iter().enumerate() {
            for &second in &Action::ALL[i + 1..] {
                let key = self.binding(first);
                if key == self.binding(second) {
                    return Err(ConfigError::DuplicateBinding { first, second, key });
                }
            }
        }
        Ok(())
    }

    pub fn rebind(&mut self, action: Action, code: KeyCode) {
        let slot = match action {
            Action::Forward => &mut self.forward,
            Action::Backward => &mut self.backward,
            Action::Rightward => &mut self.rightward,
            Action::Leftward => &mut self.leftward,
            Action::Run => &mut self.run,
            Action::Jump => &mut self.jump,
        };
        *slot = code;
    }
}

impl ButtonsInput for PlayerInputButtons {
    fn binding(&self, action: Action) -> KeyCode {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Rightward => self.rightward,
            Action::Leftward => self.leftward,
            Action::Run => self.run,
            Action::Jump => self.jump,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings_are_unique() {
        assert!(PlayerInputButtons::default().validate().is_ok());
    }

    #[test]
    fn test_duplicate_binding_is_reported() {
        let mut buttons = PlayerInputButtons::default();
        buttons.rebind(Action::Jump, KeyCode::KeyW);

        match buttons.validate() {
            Err(ConfigError::DuplicateBinding { first, second, key }) => {
                assert_eq!(first, Action::Forward);
                assert_eq!(second, Action::Jump);
                assert_eq!(key, KeyCode::KeyW);
            }
            other => panic!("expected DuplicateBinding, got {other:?}"),
        }
    }

    #[test]
    fn test_is_action_reads_snapshot() {
        let mut buttons = PlayerInputButtons::default();
        buttons.rebind(Action::Run, KeyCode::ControlLeft);

        let mut input = InputState::new();
        input.key_down(KeyCode::ControlLeft);

        assert!(buttons.is_action(&input, Action::Run, PushMode::Hold));
        assert!(buttons.is_action(&input, Action::Run, PushMode::Press));
        assert!(!buttons.is_action(&input, Action::Jump, PushMode::Hold));
    }

    #[test]
    fn test_bindings_from_json() {
        let buttons: PlayerInputButtons =
            serde_json::from_str(r#"{ "jump": "KeyJ" }"#).expect("parse");
        assert_eq!(buttons.jump, KeyCode::KeyJ);
        assert_eq!(buttons.forward, KeyCode::KeyW);
    }
}
