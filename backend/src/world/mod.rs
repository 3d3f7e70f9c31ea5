//! Seams to the host world
//!
//! The colony core never owns terrain, territory, clocks or actors. Everything
//! it needs from the outside is expressed as one of the small traits below,
//! which the host implements on whatever world representation it has.
//!
//! [`RaidWorld`] bundles every service the raid clock consumes and is
//! implemented automatically for any type providing all of them.

mod position;

pub use position::{EastWest, Heading, NorthSouth, Position};

use crate::raid::dispatch::RaidRequest;

/// Binary day/night phase signal
pub trait DayNightSource {
    fn is_daytime(&self) -> bool;
}

/// Uniform random draws
pub trait RandomSource {
    /// Draw in [0.0, 1.0)
    fn next_double(&mut self) -> f64;

    /// Fair coin flip
    fn next_bool(&mut self) -> bool {
        self.next_double() < 0.5
    }
}

/// Terrain and water queries against the host's spatial map
pub trait TerrainQuery {
    /// Project a point onto walkable ground, `None` when nothing suitable exists
    fn find_walkable_ground(&self, point: Position) -> Option<Position>;

    /// Whether the tile at `point` is open water
    fn is_open_water(&self, point: Position) -> bool;

    /// Whether a `width` × `height` area of water is anchored at `point`
    fn check_water_area(&self, point: Position, width: u32, height: u32) -> bool;
}

/// Territory boundary queries
pub trait TerritoryQuery {
    /// Outermost point of the settlement's territory along `heading`.
    ///
    /// Returns the settlement centre when the territory is degenerate.
    fn outermost_point_in_direction(&self, settlement_id: &str, heading: Heading) -> Position;
}

/// Spawns the actual raid actors
pub trait RaidSpawner {
    fn spawn_raid(&mut self, settlement_id: &str, request: &RaidRequest);
}

/// Optional chat sink, only used when dev messages are enabled
pub trait Notifier {
    fn notify(&mut self, recipients: &[String], text: &str);
}

/// Everything the raid clock consumes in a single tick
pub trait RaidWorld:
    DayNightSource + RandomSource + TerrainQuery + TerritoryQuery + RaidSpawner + Notifier
{
}

impl<T> RaidWorld for T where
    T: DayNightSource + RandomSource + TerrainQuery + TerritoryQuery + RaidSpawner + Notifier
{
}

/// Host-side services; the orchestrator supplies clock and randomness itself
pub trait WorldHost: TerrainQuery + TerritoryQuery + RaidSpawner + Notifier {}

impl<T> WorldHost for T where T: TerrainQuery + TerritoryQuery + RaidSpawner + Notifier {}
