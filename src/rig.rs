//! Baut den Controller-Graphen aus einer [`ControllerConfig`].
//!
//! Jeder Controller wird einzeln gebaut. Fehlen Kollaborateure oder sind die
//! Einstellungen ungültig, wird er geloggt und weggelassen; der Rest läuft.

use std::rc::Rc;
use std::str::FromStr;

use log::{error, info};

use crate::animation::PlayerAnimationController;
use crate::config::{ConfigError, ControllerConfig};
use crate::controller::{InputController, UpdatableController};
use crate::handler::{PlayerControlInput, PlayerInputHandler};
use crate::movement::PlayerMovementController;
use crate::raycast::{CheckRaycast, RaycastChecker};
use crate::tripod::TripodMovementController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Movement,
    Tripod,
    Animation,
}

impl FromStr for ControllerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movement" => Ok(ControllerKind::Movement),
            "tripod" | "camera" => Ok(ControllerKind::Tripod),
            "animation" => Ok(ControllerKind::Animation),
            _ => Err(ConfigError::UnknownController(s.to_string())),
        }
    }
}

/// Geteilte Kollaborateure. `None` = nicht gesetzt.
#[derive(Default, Clone)]
pub struct Wiring {
    input: Option<Rc<dyn PlayerControlInput>>,
    rays: Option<Rc<dyn RaycastChecker>>,
}

impl Wiring {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: Rc<dyn PlayerControlInput>) -> Self {
        self.input = Some(input);
        self
    }

    pub fn with_rays(mut self, rays: Rc<dyn RaycastChecker>) -> Self {
        self.rays = Some(rays);
        self
    }

    pub fn from_config(cfg: &ControllerConfig) -> Self {
        let mut wiring = Self::new();

        match &cfg.bindings {
            Some(buttons) => match buttons.validate() {
                Ok(()) => {
                    wiring.input = Some(Rc::new(PlayerInputHandler::new(buttons.clone())));
                }
                Err(e) => error!("{e}; PlayerInputHandler disabled"),
            },
            None => error!(
                "{}",
                ConfigError::Missing {
                    component: "PlayerInputHandler",
                    field: "bindings",
                }
            ),
        }

        if let Some(rays) = &cfg.rays {
            wiring.rays = Some(Rc::new(CheckRaycast::new(rays.clone())));
        }

        wiring
    }

    fn input(&self, component: &'static str) -> Result<Rc<dyn PlayerControlInput>, ConfigError> {
        self.input.clone().ok_or(ConfigError::Missing {
            component,
            field: "input_handler",
        })
    }

    fn rays(&self, component: &'static str) -> Result<Rc<dyn RaycastChecker>, ConfigError> {
        self.rays.clone().ok_or(ConfigError::Missing {
            component,
            field: "raycast_checker",
        })
    }
}

pub fn build(
    kind: ControllerKind,
    cfg: &ControllerConfig,
    wiring: &Wiring,
) -> Result<Box<dyn UpdatableController>, ConfigError> {
    let controller: Box<dyn UpdatableController> = match kind {
        ControllerKind::Movement => {
            const NAME: &str = "PlayerMovementController";
            Box::new(PlayerMovementController::new(
                wiring.input(NAME)?,
                wiring.rays(NAME)?,
                cfg.movement.clone(),
                cfg.check_gravity()?,
            )?)
        }
        ControllerKind::Tripod => Box::new(TripodMovementController::new(cfg.tripod.clone())?),
        ControllerKind::Animation => {
            const NAME: &str = "PlayerAnimationController";
            Box::new(PlayerAnimationController::new(
                wiring.input(NAME)?,
                wiring.rays(NAME)?,
            ))
        }
    };
    Ok(controller)
}

pub fn assemble_with(cfg: &ControllerConfig, wiring: &Wiring) -> InputController {
    let mut dispatcher = InputController::new();

    for name in &cfg.controllers {
        let built = name
            .parse::<ControllerKind>()
            .and_then(|kind| build(kind, cfg, wiring));

        match built {
            Ok(controller) => {
                info!("registered {}", controller.name());
                dispatcher.register(controller);
            }
            Err(e) => error!("{e}; controller {name:?} disabled"),
        }
    }

    dispatcher
}

pub fn assemble(cfg: &ControllerConfig) -> InputController {
    assemble_with(cfg, &Wiring::from_config(cfg))
}
