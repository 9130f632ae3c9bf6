use std::collections::HashSet;

use glam::Vec2;
use winit::keyboard::KeyCode;

/// Abfrage-Modus für eine Taste: Flanke runter, gehalten, Flanke hoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushMode {
    Press,
    Hold,
    Release,
}

/// Eingabe-Snapshot für genau einen Tick.
///
/// Der Host füttert rohe Events hinein, alle Controller lesen im selben Tick
/// denselben Zustand. Nach dem Tick `clear_one_shots()` aufrufen.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    // --- Held keys (bleiben gesetzt solange gedrückt) ---
    held: HashSet<KeyCode>,

    // --- One-shot (werden nach Tick zurückgesetzt) ---
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
    pointer_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Taste runter. Auto-Repeat (schon gehalten) erzeugt keine neue Flanke.
    pub fn key_down(&mut self, code: KeyCode) {
        if self.held.insert(code) {
            self.pressed.insert(code);
        }
    }

    pub fn key_up(&mut self, code: KeyCode) {
        if self.held.remove(&code) {
            self.released.insert(code);
        }
    }

    /// Mausbewegung aufsummieren (mehrere Events pro Tick möglich).
    pub fn add_pointer_delta(&mut self, dx: f32, dy: f32) {
        self.pointer_delta += Vec2::new(dx, dy);
    }

    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    pub fn is_button(&self, code: KeyCode, mode: PushMode) -> bool {
        match mode {
            PushMode::Press => self.pressed.contains(&code),
            PushMode::Hold => self.held.contains(&code),
            PushMode::Release => self.released.contains(&code),
        }
    }

    /// Nach jedem Tick aufrufen: setzt nur One-shot Zustand zurück.
    pub fn clear_one_shots(&mut self) {
        self.pressed.clear();
        self.released.clear();
        self.pointer_delta = Vec2::ZERO;
    }

    /// Fokusverlust: alles loslassen, sonst bleiben Tasten "hängen".
    pub fn release_all(&mut self) {
        let held: Vec<KeyCode> = self.held.iter().copied().collect();
        for code in held {
            self.key_up(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_hold_release_edges() {
        let mut input = InputState::new();
        input.key_down(KeyCode::KeyW);

        assert!(input.is_button(KeyCode::KeyW, PushMode::Press));
        assert!(input.is_button(KeyCode::KeyW, PushMode::Hold));
        assert!(!input.is_button(KeyCode::KeyW, PushMode::Release));

        input.clear_one_shots();
        assert!(!input.is_button(KeyCode::KeyW, PushMode::Press));
        assert!(input.is_button(KeyCode::KeyW, PushMode::Hold));

        input.key_up(KeyCode::KeyW);
        assert!(input.is_button(KeyCode::KeyW, PushMode::Release));
        assert!(!input.is_button(KeyCode::KeyW, PushMode::Hold));

        input.clear_one_shots();
        assert!(!input.is_button(KeyCode::KeyW, PushMode::Release));
    }

    #[test]
    fn test_auto_repeat_is_not_a_new_press() {
        let mut input = InputState::new();
        input.key_down(KeyCode::Space);
        input.clear_one_shots();

        input.key_down(KeyCode::Space);
        assert!(!input.is_button(KeyCode::Space, PushMode::Press));
    }

    #[test]
    fn test_pointer_delta_accumulates_until_cleared() {
        let mut input = InputState::new();
        input.add_pointer_delta(1.0, -2.0);
        input.add_pointer_delta(0.5, 0.5);
        assert_eq!(input.pointer_delta(), Vec2::new(1.5, -1.5));

        input.clear_one_shots();
        assert_eq!(input.pointer_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_release_all_emits_release_edges() {
        let mut input = InputState::new();
        input.key_down(KeyCode::KeyA);
        input.key_down(KeyCode::KeyD);
        input.clear_one_shots();

        input.release_all();
        assert!(input.is_button(KeyCode::KeyA, PushMode::Release));
        assert!(input.is_button(KeyCode::KeyD, PushMode::Release));
        assert!(!input.is_button(KeyCode::KeyA, PushMode::Hold));
    }
}
