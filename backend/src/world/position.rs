use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer block position in the host world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The tile directly below
    pub const fn down(self) -> Self {
        Self::new(self.x, self.y - 1, self.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EastWest {
    East,
    West,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NorthSouth {
    North,
    South,
}

/// Diagonal search direction used when looking for a raid spawn point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Heading {
    pub east_west: EastWest,
    pub north_south: NorthSouth,
}

impl Heading {
    pub const fn new(east_west: EastWest, north_south: NorthSouth) -> Self {
        Self {
            east_west,
            north_south,
        }
    }

    /// Unit step along x (east is +x)
    pub const fn dx(self) -> i32 {
        match self.east_west {
            EastWest::East => 1,
            EastWest::West => -1,
        }
    }

    /// Unit step along z (south is +z)
    pub const fn dz(self) -> i32 {
        match self.north_south {
            NorthSouth::North => -1,
            NorthSouth::South => 1,
        }
    }
}
