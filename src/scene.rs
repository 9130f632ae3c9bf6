//! Engine-Zustand, den die Controller pro Tick lesen und ändern.
//!
//! Jedes Feld hat genau einen Schreiber: den Körper der Bewegungs-Controller,
//! das Stativ der Kamera-Controller, den Animator die Animations-Brücke. Der
//! Host integriert den Körper, nachdem alle Controller gelaufen sind.

use glam::{EulerRot, Quat, Vec3};

use crate::animation::Animator;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Lokale Richtung → Welt (nur Rotation, keine Skalierung).
    pub fn transform_direction(&self, local: Vec3) -> Vec3 {
        self.rotation * local
    }

    /// Lokaler Offset → Weltposition.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.position + self.rotation * local
    }

    /// Gierwinkel in Grad, [0, 360). Nickwinkel spielt keine Rolle.
    pub fn yaw_degrees(&self) -> f32 {
        let (yaw, _pitch, _roll) = self.rotation.to_euler(EulerRot::YXZ);
        yaw.to_degrees().rem_euclid(360.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBody {
    pub position: Vec3,
    pub rotation: Quat,
    pub velocity: Vec3,
}

impl RigidBody {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
        }
    }

    /// Setzt nur die angegebenen Achsen, der Rest bleibt wie er ist.
    pub fn set_velocity(&mut self, x: Option<f32>, y: Option<f32>, z: Option<f32>) {
        self.velocity = Vec3::new(
            x.unwrap_or(self.velocity.x),
            y.unwrap_or(self.velocity.y),
            z.unwrap_or(self.velocity.z),
        );
    }
}

pub struct Scene {
    pub world: World,
    pub body: RigidBody,
    pub tripod: Transform,
    pub animator: Animator,
    /// Betrag der Erdbeschleunigung (m/s², > 0).
    pub gravity: f32,
}

impl Scene {
    pub fn new(world: World, spawn: Vec3, gravity: f32) -> Self {
        Self {
            world,
            body: RigidBody::at(spawn),
            tripod: Transform::from_position(spawn),
            animator: Animator::default(),
            gravity,
        }
    }
}
