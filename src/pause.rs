use log::debug;
use winit::keyboard::KeyCode;

use crate::input::{InputState, PushMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    None,
    Locked,
}

/// Cursor-Modus für "Spiel aktiv" / "Spiel inaktiv".
#[derive(Debug, Clone, Copy)]
pub struct CursorLock {
    pub enabled: CursorMode,
    pub disabled: CursorMode,
}

impl Default for CursorLock {
    fn default() -> Self {
        Self {
            enabled: CursorMode::Locked,
            disabled: CursorMode::None,
        }
    }
}

impl CursorLock {
    pub fn mode(&self, gameplay_active: bool) -> CursorMode {
        if gameplay_active {
            self.enabled
        } else {
            self.disabled
        }
    }
}

/// Pause-Menü: Escape schaltet um. Pausiert = Controller laufen nicht, Cursor frei.
#[derive(Debug, Clone, Copy)]
pub struct PauseLogic {
    key: KeyCode,
    paused: bool,
    cursor: CursorLock,
}

impl Default for PauseLogic {
    fn default() -> Self {
        Self {
            key: KeyCode::Escape,
            paused: false,
            cursor: CursorLock::default(),
        }
    }
}

impl PauseLogic {
    pub fn new(key: KeyCode, cursor: CursorLock) -> Self {
        Self {
            key,
            paused: false,
            cursor,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor.mode(!self.paused)
    }

    /// Gibt den neuen Cursor-Modus zurück, wenn sich etwas geändert hat.
    pub fn update(&mut self, input: &InputState) -> Option<CursorMode> {
        if !input.is_button(self.key, PushMode::Press) {
            return None;
        }
        self.paused = !self.paused;
        debug!("paused={}", self.paused);
        Some(self.cursor_mode())
    }

    /// "Zurück ins Spiel" aus dem Menü.
    pub fn resume(&mut self) -> CursorMode {
        self.paused = false;
        self.cursor_mode()
    }
}
