//! Start-Konfiguration: Geschwindigkeiten, Sprunghöhen, Sonden-Geometrie,
//! Kamera, Tastenbelegung und Controller-Reihenfolge.
//!
//! Wird einmal aus JSON geladen. Fehlende Felder nehmen die Defaults unten;
//! ein Abschnitt mit `null` gilt als nicht gesetzte Referenz und schaltet die
//! Controller ab, die ihn brauchen.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::block::LayerMask;
use crate::buttons::{Action, PlayerInputButtons};

pub const DEFAULT_GRAVITY: f32 = 9.81;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Null reference: {field} in {component} is None")]
    Missing {
        component: &'static str,
        field: &'static str,
    },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("unknown controller kind: {0:?}")]
    UnknownController(String),

    #[error("{first:?} and {second:?} are both bound to {key:?}")]
    DuplicateBinding {
        first: Action,
        second: Action,
        key: KeyCode,
    },

    #[error("gravity must be greater than zero, got {0}")]
    NonPositiveGravity(f32),
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub stop_speed: f32,
    pub rotation_smoothness: f32,
    pub jump_height: f32,
    pub double_jump_height: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            run_speed: 6.0,
            stop_speed: 1.0,
            rotation_smoothness: 10.0,
            jump_height: 5.0,
            double_jump_height: 3.0,
        }
    }
}

impl MovementSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("movement.walk_speed", self.walk_speed, 0.0, 20.0)?;
        check_range("movement.run_speed", self.run_speed, 0.0, 40.0)?;
        check_range("movement.stop_speed", self.stop_speed, 0.0, 10.0)?;
        check_range("movement.rotation_smoothness", self.rotation_smoothness, 1.0, 20.0)?;
        check_range("movement.jump_height", self.jump_height, 0.0, 10.0)?;
        check_range("movement.double_jump_height", self.double_jump_height, 0.0, 10.0)?;
        Ok(())
    }
}

/// Ein einzelner Strahl: Offset und Richtung lokal zum Körper,
/// Länge = Betrag von `direction_distance`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaySettings {
    pub offset: Vec3,
    pub direction_distance: Vec3,
    pub layers: LayerMask,
}

impl Default for RaySettings {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.1, 0.0),
            direction_distance: Vec3::new(0.0, -0.3, 0.0),
            layers: LayerMask::ALL,
        }
    }
}

/// Fächer aus `quantity` parallelen Strahlen, vertikal über `interval` verteilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontRaySettings {
    pub offset: Vec3,
    pub direction_distance: Vec3,
    pub interval: f32,
    pub quantity: u32,
    pub layers: LayerMask,
}

impl Default for FrontRaySettings {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 0.2, 0.0),
            direction_distance: Vec3::new(0.0, 0.0, 0.6),
            interval: 1.4,
            quantity: 3,
            layers: LayerMask::OBSTACLE,
        }
    }
}

impl FrontRaySettings {
    /// Negative Intervalle → 0, quantity 0 → 1. Beides nur mit Warnung.
    pub fn sanitized(mut self) -> Self {
        if !(self.interval >= 0.0) {
            log::warn!(
                "front ray interval {} is negative, clamping to 0",
                self.interval
            );
            self.interval = 0.0;
        }
        if self.quantity == 0 {
            log::warn!("front ray quantity is 0, using a single ray");
            self.quantity = 1;
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RaysConfig {
    pub leg: RaySettings,
    pub front: FrontRaySettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripodSettings {
    pub offset: Vec3,
    pub sensitivity: f32,
    pub clamped_vertical_rotation: f32,
    pub horizontal_invert: bool,
    pub vertical_invert: bool,
}

impl Default for TripodSettings {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 1.6, 0.0),
            sensitivity: 200.0,
            clamped_vertical_rotation: 45.0,
            horizontal_invert: false,
            vertical_invert: false,
        }
    }
}

impl TripodSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("tripod.sensitivity", self.sensitivity, 0.0, 1000.0)?;
        check_range(
            "tripod.clamped_vertical_rotation",
            self.clamped_vertical_rotation,
            -90.0,
            90.0,
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub gravity: f32,
    pub bindings: Option<PlayerInputButtons>,
    pub rays: Option<RaysConfig>,
    pub movement: MovementSettings,
    pub tripod: TripodSettings,
    /// Reihenfolge = Update-Reihenfolge im Dispatcher.
    pub controllers: Vec<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            bindings: Some(PlayerInputButtons::default()),
            rays: Some(RaysConfig::default()),
            movement: MovementSettings::default(),
            tripod: TripodSettings::default(),
            controllers: vec!["movement".into(), "tripod".into(), "animation".into()],
        }
    }
}

impl ControllerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn check_gravity(&self) -> Result<f32, ConfigError> {
        if self.gravity.is_finite() && self.gravity > 0.0 {
            Ok(self.gravity)
        } else {
            Err(ConfigError::NonPositiveGravity(self.gravity))
        }
    }
}
