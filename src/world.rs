use glam::{IVec3, Vec3};

use crate::block::{Block, LayerMask};

/// Strahlen werden auf diese Länge gekappt, sonst läuft DDA bei `INFINITY` endlos.
const MAX_RAY_DISTANCE: f32 = 1024.0;

/// Ray-Abfrage gegen die Welt-Geometrie. Nur Treffer ja/nein, keine Details.
pub trait RayCaster {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub cell: IVec3,
    pub block: Block,
    pub normal: IVec3,
    pub distance: f32,
}

pub struct World {
    // Würfel-Welt: size×size×size
    size: i32,
    blocks: Vec<Block>,
}

impl World {
    /// Leere Welt (nur Air).
    pub fn empty(size: i32) -> Self {
        let size = size.max(1);
        let total = (size * size * size) as usize;
        Self {
            size,
            blocks: vec![Block::Air; total],
        }
    }

    /// Bodenplatte aus Dirt bei y=0, sonst leer.
    pub fn flat(size: i32) -> Self {
        let mut world = Self::empty(size);
        for z in 0..world.size {
            for x in 0..world.size {
                world.set_block(x, 0, z, Block::Dirt);
            }
        }
        world
    }

    /// Testlevel: Bodenplatte, Stone-Wand bei z=8 (x=3..5, y=1..3)
    /// und ein Dirt-Podest zum Draufspringen.
    pub fn demo() -> Self {
        let mut world = Self::flat(16);

        for y in 1..=3 {
            for x in 3..=5 {
                world.set_block(x, y, 8, Block::Stone);
            }
        }

        for z in 11..=13 {
            for x in 10..=12 {
                world.set_block(x, 1, z, Block::Dirt);
                world.set_block(x, 2, z, Block::Dirt);
            }
        }

        world
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if !Self::in_bounds(self.size, x, y, z) {
            return None;
        }
        let idx = Self::index(self.size, x, y, z);
        Some(self.blocks[idx])
    }

    pub fn set_block(&mut self, x: i32, y: i32, z: i32, b: Block) -> bool {
        if !Self::in_bounds(self.size, x, y, z) {
            return false;
        }
        let idx = Self::index(self.size, x, y, z);
        self.blocks[idx] = b;
        true
    }

    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).is_some_and(Block::is_solid)
    }

    fn in_bounds(size: i32, x: i32, y: i32, z: i32) -> bool {
        x >= 0 && x < size && y >= 0 && y < size && z >= 0 && z < size
    }

    fn index(size: i32, x: i32, y: i32, z: i32) -> usize {
        // x + size*(y + size*z)
        (x + size * (y + size * z)) as usize
    }

    /// Voxel-DDA. Die Start-Zelle zählt nicht (Strahl aus einem Block heraus trifft ihn nicht).
    /// Blöcke außerhalb von `layers` werden durchlaufen.
    pub fn raycast_first_solid(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_dist: f32,
        layers: LayerMask,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO || !(max_dist > 0.0) {
            return None;
        }
        let max_dist = max_dist.min(MAX_RAY_DISTANCE);

        let mut cell = origin.floor().as_ivec3();
        let step = IVec3::new(axis_step(dir.x), axis_step(dir.y), axis_step(dir.z));

        let inv = Vec3::new(inv_abs(dir.x), inv_abs(dir.y), inv_abs(dir.z));

        let boundary = |c: i32, s: i32| if s > 0 { (c + 1) as f32 } else { c as f32 };
        let first = |o: f32, c: i32, s: i32, inv: f32| {
            if s != 0 {
                (boundary(c, s) - o).abs() * inv
            } else {
                f32::INFINITY
            }
        };

        let mut t_max = Vec3::new(
            first(origin.x, cell.x, step.x, inv.x),
            first(origin.y, cell.y, step.y, inv.y),
            first(origin.z, cell.z, step.z, inv.z),
        );

        loop {
            let (t, normal) = if t_max.x < t_max.y && t_max.x < t_max.z {
                cell.x += step.x;
                let t = t_max.x;
                t_max.x += inv.x;
                (t, IVec3::new(-step.x, 0, 0))
            } else if t_max.y < t_max.z {
                cell.y += step.y;
                let t = t_max.y;
                t_max.y += inv.y;
                (t, IVec3::new(0, -step.y, 0))
            } else {
                cell.z += step.z;
                let t = t_max.z;
                t_max.z += inv.z;
                (t, IVec3::new(0, 0, -step.z))
            };

            if t > max_dist {
                return None;
            }

            // außerhalb der Welt = Air
            let Some(block) = self.get_block(cell.x, cell.y, cell.z) else {
                continue;
            };

            if block.is_solid() && block.layer().intersects(layers) {
                return Some(RayHit {
                    cell,
                    block,
                    normal,
                    distance: t,
                });
            }
        }
    }
}

impl RayCaster for World {
    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, layers: LayerMask) -> bool {
        self.raycast_first_solid(origin, direction, max_distance, layers)
            .is_some()
    }
}

#[inline]
fn axis_step(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

#[inline]
fn inv_abs(d: f32) -> f32 {
    if d != 0.0 { 1.0 / d.abs() } else { f32::INFINITY }
}
