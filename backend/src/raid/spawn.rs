//! Spawn site search
//!
//! Picks a point on the settlement's outer boundary for the raid to arrive
//! at. A random diagonal heading is chosen (east/west × north/south), the
//! territory is asked for its outermost point that way, and the result is
//! projected onto walkable ground.
//!
//! If the site sits on (or just above) a body of open water large enough for
//! a raid vessel, the raid arrives by sea instead.

use crate::world::{
    EastWest, Heading, NorthSouth, Position, RandomSource, TerrainQuery, TerritoryQuery,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Where a raid will arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSite {
    /// No usable boundary point; the raid must not happen
    Unavailable,
    /// Arrives on foot
    Land(Position),
    /// Arrives by vessel; the position is the water tile
    Naval(Position),
}

impl SpawnSite {
    pub fn position(&self) -> Option<Position> {
        match self {
            SpawnSite::Unavailable => None,
            SpawnSite::Land(position) | SpawnSite::Naval(position) => Some(*position),
        }
    }

    pub fn is_naval(&self) -> bool {
        matches!(self, SpawnSite::Naval(_))
    }
}

/// Two fair coin flips: east or west, north or south
pub fn pick_heading<R>(rng: &mut R) -> Heading
where
    R: RandomSource + ?Sized,
{
    let east_west = if rng.next_bool() {
        EastWest::East
    } else {
        EastWest::West
    };
    let north_south = if rng.next_bool() {
        NorthSouth::North
    } else {
        NorthSouth::South
    };
    Heading::new(east_west, north_south)
}

/// Boundary point on walkable ground, or `center` when none exists
pub fn calculate_spawn_location<W>(settlement_id: &str, center: Position, world: &mut W) -> Position
where
    W: RandomSource + TerritoryQuery + TerrainQuery + ?Sized,
{
    let heading = pick_heading(world);
    let candidate = world.outermost_point_in_direction(settlement_id, heading);

    if candidate == center {
        info!(settlement = settlement_id, %center, "raid spawn candidate is the settlement center");
        return center;
    }

    match world.find_walkable_ground(candidate) {
        Some(ground) => ground,
        None => {
            warn!(settlement = settlement_id, %candidate, "no walkable ground near raid spawn candidate");
            center
        }
    }
}

/// Full site search, including the naval check
pub fn locate_spawn_site<W>(
    settlement_id: &str,
    center: Position,
    water_size: u32,
    world: &mut W,
) -> SpawnSite
where
    W: RandomSource + TerritoryQuery + TerrainQuery + ?Sized,
{
    let site = calculate_spawn_location(settlement_id, center, world);
    if site == center {
        return SpawnSite::Unavailable;
    }
    classify_site(site, water_size, &*world)
}

/// Land or naval, correcting to the water tile below when needed
pub fn classify_site<T>(site: Position, water_size: u32, terrain: &T) -> SpawnSite
where
    T: TerrainQuery + ?Sized,
{
    let anchors = |point: Position| {
        terrain.is_open_water(point) && terrain.check_water_area(point, water_size, water_size)
    };

    if anchors(site) {
        SpawnSite::Naval(site)
    } else if anchors(site.down()) {
        SpawnSite::Naval(site.down())
    } else {
        SpawnSite::Land(site)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Coast {
        water: HashSet<Position>,
    }

    impl TerrainQuery for Coast {
        fn find_walkable_ground(&self, point: Position) -> Option<Position> {
            Some(point)
        }

        fn is_open_water(&self, point: Position) -> bool {
            self.water.contains(&point)
        }

        fn check_water_area(&self, point: Position, width: u32, height: u32) -> bool {
            self.water.contains(&point) && width == 15 && height == 15
        }
    }

    #[test]
    fn test_dry_site_is_land() {
        let coast = Coast {
            water: HashSet::new(),
        };
        let site = Position::new(10, 64, 10);
        assert_eq!(classify_site(site, 15, &coast), SpawnSite::Land(site));
    }

    #[test]
    fn test_water_below_moves_site_down() {
        let site = Position::new(10, 64, 10);
        let coast = Coast {
            water: HashSet::from([site.down()]),
        };

        let classified = classify_site(site, 15, &coast);

        assert_eq!(classified, SpawnSite::Naval(site.down()));
        assert!(classified.is_naval());
    }

    #[test]
    fn test_small_pond_is_not_naval() {
        let site = Position::new(0, 62, 0);
        let coast = Coast {
            water: HashSet::from([site]),
        };
        assert_eq!(classify_site(site, 5, &coast), SpawnSite::Land(site));
    }
}
