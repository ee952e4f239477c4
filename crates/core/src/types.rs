use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct BoothId;
    pub struct DispenserId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    BoothEmpty,
    BoothPrize,
    BoothUtility,
    Entrance,
    Dispenser,
    OutOfBounds,
}

impl Cell {
    pub fn is_booth(self) -> bool {
        matches!(self, Self::BoothEmpty | Self::BoothPrize | Self::BoothUtility)
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Self::Empty | Self::Entrance | Self::Dispenser)
    }
}

/// Facing used by interaction queries. The discriminants index [`Direction::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    YPositive,
    XPositive,
    YNegative,
    XNegative,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::YPositive, Self::XPositive, Self::YNegative, Self::XNegative];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::YPositive => (0, 1),
            Self::XPositive => (1, 0),
            Self::YNegative => (0, -1),
            Self::XNegative => (-1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::YPositive => Self::YNegative,
            Self::XPositive => Self::XNegative,
            Self::YNegative => Self::YPositive,
            Self::XNegative => Self::XPositive,
        }
    }
}

/// Yaw in whole quarter turns, stored as degrees in `[0, 360)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation(u16);

impl Rotation {
    pub const IDENTITY: Self = Self(0);

    pub fn from_degrees(degrees: i32) -> Self {
        Self(degrees.rem_euclid(360) as u16)
    }

    pub fn from_quarter_turns(turns: usize) -> Self {
        Self(((turns % 4) * 90) as u16)
    }

    pub fn degrees(self) -> u16 {
        self.0
    }
}

/// Opaque handle into one of the content pack's visual pools.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualId(pub u32);

/// World-space anchor for a spawned object; the level lies on the `y = 0` plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Pos> for WorldPos {
    fn from(pos: Pos) -> Self {
        Self { x: pos.x as f32, y: 0.0, z: pos.y as f32 }
    }
}
