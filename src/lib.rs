//! Kern eines Third-Person-Controllers.
//!
//! Der Host liefert pro Tick einen [`input::InputState`]-Snapshot und eine
//! [`scene::Scene`]; der [`controller::InputController`] ruft die registrierten
//! Controller (Bewegung, Kamera-Stativ, Animation) der Reihe nach auf, und
//! jeder schreibt nur seinen eigenen Teil der Szene.

pub mod animation;
pub mod block;
pub mod buttons;
pub mod config;
pub mod controller;
pub mod handler;
pub mod host;
pub mod input;
pub mod inventory;
pub mod movement;
pub mod pause;
pub mod raycast;
pub mod rig;
pub mod scene;
pub mod tripod;
pub mod world;

pub use config::{ConfigError, ControllerConfig};
pub use controller::{ControlError, InputController, Tick, UpdatableController};
pub use input::{InputState, PushMode};
pub use scene::Scene;
pub use world::World;
