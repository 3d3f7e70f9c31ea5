//! Time management for the simulation
//!
//! The simulation operates in discrete ticks. Multiple ticks form a day, and
//! the first `daylight_ticks` of every day are daytime; the rest is night.
//! The raid clock only cares about the binary day/night signal, which this
//! type exposes through [`DayNightSource`].

use crate::world::DayNightSource;
use serde::{Deserialize, Serialize};

/// Manages simulation time in discrete ticks, days and day/night halves
///
/// # Example
/// ```
/// use colony_ai_core_rs::TimeManager;
///
/// let mut time = TimeManager::new(10, 6); // 6 ticks of daylight, 4 of night
/// assert!(time.is_daytime());
///
/// for _ in 0..6 {
///     time.advance_tick();
/// }
/// assert!(!time.is_daytime());
/// assert_eq!(time.current_day(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeManager {
    /// Total ticks elapsed since simulation start
    current_tick: usize,
    /// Number of ticks in one full day/night cycle
    ticks_per_day: usize,
    /// Leading ticks of each cycle that count as daytime
    daylight_ticks: usize,
}

impl TimeManager {
    /// Create a new TimeManager
    ///
    /// # Arguments
    /// * `ticks_per_day` - Number of ticks in one day/night cycle
    /// * `daylight_ticks` - How many of those ticks are daytime
    ///
    /// # Panics
    /// Panics if `ticks_per_day` is zero or `daylight_ticks` is not strictly
    /// between zero and `ticks_per_day`.
    pub fn new(ticks_per_day: usize, daylight_ticks: usize) -> Self {
        assert!(ticks_per_day > 0, "ticks_per_day must be positive");
        assert!(
            daylight_ticks > 0 && daylight_ticks < ticks_per_day,
            "daylight_ticks must leave room for both day and night"
        );
        Self {
            current_tick: 0,
            ticks_per_day,
            daylight_ticks,
        }
    }

    /// Advance time by one tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }

    /// Get the current tick (total ticks since start)
    pub fn current_tick(&self) -> usize {
        self.current_tick
    }

    /// Get the current day (0-indexed)
    ///
    /// # Example
    /// ```
    /// use colony_ai_core_rs::TimeManager;
    ///
    /// let mut time = TimeManager::new(100, 50);
    /// for _ in 0..100 {
    ///     time.advance_tick();
    /// }
    /// assert_eq!(time.current_day(), 1);
    /// ```
    pub fn current_day(&self) -> usize {
        self.current_tick / self.ticks_per_day
    }

    /// Get the tick within the current day (0-indexed)
    pub fn tick_within_day(&self) -> usize {
        self.current_tick % self.ticks_per_day
    }

    /// True during the leading daylight window of each cycle
    pub fn is_daytime(&self) -> bool {
        self.tick_within_day() < self.daylight_ticks
    }

    /// True on the first night tick of a cycle
    pub fn is_nightfall(&self) -> bool {
        self.tick_within_day() == self.daylight_ticks
    }

    /// Get ticks per day
    pub fn ticks_per_day(&self) -> usize {
        self.ticks_per_day
    }

    /// Get daylight ticks per day
    pub fn daylight_ticks(&self) -> usize {
        self.daylight_ticks
    }
}

impl DayNightSource for TimeManager {
    fn is_daytime(&self) -> bool {
        TimeManager::is_daytime(self)
    }
}
