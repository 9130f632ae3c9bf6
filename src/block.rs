use serde::{Deserialize, Serialize};

/// Bitmaske für Ray-Filter, wie Physik-Layer in einer Engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);
    pub const GROUND: LayerMask = LayerMask(1 << 0);
    pub const OBSTACLE: LayerMask = LayerMask(1 << 1);
    pub const ALL: LayerMask = LayerMask(u32::MAX);

    #[inline]
    pub fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = LayerMask;

    fn bitor(self, rhs: LayerMask) -> LayerMask {
        LayerMask(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Block {
    #[default]
    Air,
    Dirt,
    Stone,
}

impl Block {
    /// Layer des Blocks. Air liegt auf keinem Layer und wird nie getroffen.
    pub fn layer(self) -> LayerMask {
        match self {
            Block::Air => LayerMask::NONE,
            Block::Dirt => LayerMask::GROUND,
            Block::Stone => LayerMask::OBSTACLE,
        }
    }

    pub fn is_solid(self) -> bool {
        self != Block::Air
    }
}
