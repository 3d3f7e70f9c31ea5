//! Shared test host for raid integration tests
//!
//! A scripted world: day/night is a plain flag, random draws come from a
//! queue, terrain is a set of water tiles, and every spawner/notifier call is
//! recorded for inspection.

#![allow(dead_code)]

use colony_ai_core_rs::raid::RaidRequest;
use colony_ai_core_rs::world::{
    DayNightSource, Heading, Notifier, Position, RaidSpawner, RandomSource, TerrainQuery,
    TerritoryQuery,
};
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct FakeWorld {
    pub daytime: bool,
    /// Draws handed out in order; `fallback_draw` once exhausted
    pub draws: VecDeque<f64>,
    pub fallback_draw: f64,
    pub draw_count: usize,

    /// Returned for every heading; `None` means "the settlement centre"
    pub boundary_point: Option<Position>,
    pub center: Position,

    /// When false, no walkable ground exists anywhere
    pub has_ground: bool,
    pub water: HashSet<Position>,
    pub large_water: HashSet<Position>,

    pub spawned: Vec<(String, RaidRequest)>,
    pub messages: Vec<String>,
}

impl FakeWorld {
    pub fn new() -> Self {
        Self {
            daytime: true,
            fallback_draw: 0.99,
            has_ground: true,
            ..Self::default()
        }
    }

    pub fn with_draws(mut self, draws: &[f64]) -> Self {
        self.draws = draws.iter().copied().collect();
        self
    }

    pub fn with_boundary(mut self, point: Position) -> Self {
        self.boundary_point = Some(point);
        self
    }

    /// Mark `point` as open water large enough for a vessel
    pub fn with_sea(mut self, point: Position) -> Self {
        self.water.insert(point);
        self.large_water.insert(point);
        self
    }
}

impl DayNightSource for FakeWorld {
    fn is_daytime(&self) -> bool {
        self.daytime
    }
}

impl RandomSource for FakeWorld {
    fn next_double(&mut self) -> f64 {
        self.draw_count += 1;
        self.draws.pop_front().unwrap_or(self.fallback_draw)
    }
}

impl TerritoryQuery for FakeWorld {
    fn outermost_point_in_direction(&self, _settlement_id: &str, _heading: Heading) -> Position {
        self.boundary_point.unwrap_or(self.center)
    }
}

impl TerrainQuery for FakeWorld {
    fn find_walkable_ground(&self, point: Position) -> Option<Position> {
        self.has_ground.then_some(point)
    }

    fn is_open_water(&self, point: Position) -> bool {
        self.water.contains(&point)
    }

    fn check_water_area(&self, point: Position, _width: u32, _height: u32) -> bool {
        self.large_water.contains(&point)
    }
}

impl RaidSpawner for FakeWorld {
    fn spawn_raid(&mut self, settlement_id: &str, request: &RaidRequest) {
        self.spawned.push((settlement_id.to_string(), *request));
    }
}

impl Notifier for FakeWorld {
    fn notify(&mut self, _recipients: &[String], text: &str) {
        self.messages.push(text.to_string());
    }
}
