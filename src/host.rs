//! Minimaler Host-Schritt nach den Controllern: Schwerkraft, Geschwindigkeit
//! integrieren, achsenweise gegen die Voxel-Welt stoppen, am Boden abbremsen.
//! Kein Physik-Solver.

use crate::scene::Scene;
use crate::world::World;

// Hitbox (Breite ~0.6, Höhe ~1.8), Position = Fußpunkt
const HALF_WIDTH: f32 = 0.3;
const HEIGHT: f32 = 1.8;

/// Bodenreibung (1/s): horizontale Geschwindigkeit schrumpft pro Tick um `GROUND_FRICTION * dt`.
pub const GROUND_FRICTION: f32 = 10.0;
// darunter gilt der Körper als stehend
const REST_SPEED: f32 = 0.05;

pub fn collides_at(world: &World, px: f32, py: f32, pz: f32) -> bool {
    let x0 = (px - HALF_WIDTH).floor() as i32;
    let x1 = (px + HALF_WIDTH).floor() as i32;
    let y0 = py.floor() as i32;
    let y1 = (py + HEIGHT).floor() as i32;
    let z0 = (pz - HALF_WIDTH).floor() as i32;
    let z1 = (pz + HALF_WIDTH).floor() as i32;

    for y in y0..=y1 {
        for z in z0..=z1 {
            for x in x0..=x1 {
                if world.is_solid(x, y, z) {
                    return true;
                }
            }
        }
    }
    false
}

pub fn step(scene: &mut Scene, dt: f32) {
    let world = &scene.world;
    let body = &mut scene.body;

    body.velocity.y -= scene.gravity * dt;

    // erst X, dann Z, dann Y
    let target_x = body.position.x + body.velocity.x * dt;
    if !collides_at(world, target_x, body.position.y, body.position.z) {
        body.position.x = target_x;
    } else {
        body.velocity.x = 0.0;
    }

    let target_z = body.position.z + body.velocity.z * dt;
    if !collides_at(world, body.position.x, body.position.y, target_z) {
        body.position.z = target_z;
    } else {
        body.velocity.z = 0.0;
    }

    let mut grounded = false;
    let new_y = body.position.y + body.velocity.y * dt;
    if !collides_at(world, body.position.x, new_y, body.position.z) {
        body.position.y = new_y;
    } else {
        if body.velocity.y < 0.0 {
            grounded = true;
            // auf die Oberkante des getroffenen Blocks setzen
            let top = new_y.floor() + 1.0;
            if top <= body.position.y && !collides_at(world, body.position.x, top, body.position.z) {
                body.position.y = top;
            }
        }
        body.velocity.y = 0.0;
    }

    // Reibung nur am Boden, nach dem Integrieren: der Controller-Wert wirkt den ganzen Tick
    if grounded {
        let factor = (1.0 - GROUND_FRICTION * dt).max(0.0);
        body.velocity.x *= factor;
        body.velocity.z *= factor;
        if body.velocity.x.hypot(body.velocity.z) < REST_SPEED {
            body.velocity.x = 0.0;
            body.velocity.z = 0.0;
        }
    }
}
