use log::error;

use crate::input::InputState;
use crate::scene::Scene;

/// Was jeder Controller pro Tick bekommt.
#[derive(Debug, Clone, Copy)]
pub struct Tick<'a> {
    pub input: &'a InputState,
    /// Sekunden seit dem letzten Tick.
    pub dt: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("{controller}: {what} is not finite")]
    NonFinite {
        controller: &'static str,
        what: &'static str,
    },
}

pub trait UpdatableController {
    fn name(&self) -> &'static str;

    fn update_control(&mut self, tick: &Tick, scene: &mut Scene) -> Result<(), ControlError>;
}

struct Slot {
    controller: Box<dyn UpdatableController>,
    enabled: bool,
}

/// Ruft alle registrierten Controller pro Tick in Registrierungs-Reihenfolge auf.
/// Ein Controller, der einen Fehler liefert, wird abgeschaltet; die anderen laufen weiter.
#[derive(Default)]
pub struct InputController {
    slots: Vec<Slot>,
}

impl InputController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, controller: Box<dyn UpdatableController>) {
        self.slots.push(Slot {
            controller,
            enabled: true,
        });
    }

    pub fn tick(&mut self, tick: &Tick, scene: &mut Scene) {
        for slot in self.slots.iter_mut().filter(|s| s.enabled) {
            if let Err(e) = slot.controller.update_control(tick, scene) {
                error!("{e}; disabling {}", slot.controller.name());
                slot.enabled = false;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Namen der noch aktiven Controller, in Update-Reihenfolge.
    pub fn active(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.controller.name())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec3;

    use super::*;
    use crate::world::World;

    struct Recording {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail_on_call: Option<usize>,
        calls: usize,
    }

    impl UpdatableController for Recording {
        fn name(&self) -> &'static str {
            self.name
        }

        fn update_control(&mut self, _tick: &Tick, _scene: &mut Scene) -> Result<(), ControlError> {
            self.calls += 1;
            self.log.borrow_mut().push(self.name);
            if self.fail_on_call == Some(self.calls) {
                return Err(ControlError::NonFinite {
                    controller: self.name,
                    what: "test value",
                });
            }
            Ok(())
        }
    }

    fn recording(
        name: &'static str,
        log: &Rc<RefCell<Vec<&'static str>>>,
        fail_on_call: Option<usize>,
    ) -> Box<dyn UpdatableController> {
        Box::new(Recording {
            name,
            log: log.clone(),
            fail_on_call,
            calls: 0,
        })
    }

    fn run(dispatcher: &mut InputController, ticks: usize) {
        let mut scene = Scene::new(World::empty(2), Vec3::ZERO, 9.81);
        let input = InputState::new();
        for _ in 0..ticks {
            dispatcher.tick(&Tick { input: &input, dt: 0.016 }, &mut scene);
        }
    }

    #[test]
    fn test_registration_order_is_update_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d = InputController::new();
        d.register(recording("a", &log, None));
        d.register(recording("b", &log, None));
        d.register(recording("c", &log, None));

        run(&mut d, 2);
        assert_eq!(*log.borrow(), vec!["a", "b", "c", "a", "b", "c"]);
    }

    #[test]
    fn test_failing_controller_is_disabled_others_continue() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut d = InputController::new();
        d.register(recording("a", &log, None));
        d.register(recording("b", &log, Some(2)));
        d.register(recording("c", &log, None));

        run(&mut d, 3);
        assert_eq!(
            *log.borrow(),
            vec!["a", "b", "c", "a", "b", "c", "a", "c"]
        );
        assert_eq!(d.active(), vec!["a", "c"]);
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_empty_dispatcher_ticks() {
        let mut d = InputController::new();
        assert!(d.is_empty());
        run(&mut d, 1);
    }
}
