//! Settlement model
//!
//! The colony being defended. Owns its population list and the raid timing
//! flags; the raid clock mutates the flags through `&mut Settlement`, never
//! through shared state, so settlements stay independent of one another.

use crate::raid::timing::RaidState;
use crate::world::Position;
use serde::{Deserialize, Serialize};

/// A settlement member, as far as raids care
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citizen {
    pub level: i32,
}

impl Citizen {
    pub fn new(level: i32) -> Self {
        Self { level }
    }
}

/// A persistent colony
///
/// # Example
/// ```
/// use colony_ai_core_rs::models::{Citizen, Settlement};
/// use colony_ai_core_rs::world::Position;
///
/// let mut colony = Settlement::new("colony-1", Position::new(0, 64, 0));
/// colony.add_citizen(Citizen::new(2));
/// assert_eq!(colony.citizens().len(), 1);
/// assert!(colony.can_have_raid_events());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    id: String,
    center: Position,
    citizens: Vec<Citizen>,

    /// Raid timing flags, written by the raid clock only
    raid_state: RaidState,

    /// Settlement-level eligibility gate for raids
    can_have_raid_events: bool,

    /// Who receives dev-mode raid messages
    message_recipients: Vec<String>,

    /// Every dispatched raid's arrival point, oldest first
    raider_spawn_points: Vec<Position>,

    /// Set whenever the core changed something the host should persist
    dirty: bool,
}

impl Settlement {
    pub fn new(id: impl Into<String>, center: Position) -> Self {
        Self {
            id: id.into(),
            center,
            citizens: Vec::new(),
            raid_state: RaidState::new(),
            can_have_raid_events: true,
            message_recipients: Vec::new(),
            raider_spawn_points: Vec::new(),
            dirty: false,
        }
    }

    /// Start from previously persisted raid flags
    pub fn with_raid_state(mut self, raid_state: RaidState) -> Self {
        self.raid_state = raid_state;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn center(&self) -> Position {
        self.center
    }

    pub fn citizens(&self) -> &[Citizen] {
        &self.citizens
    }

    pub fn add_citizen(&mut self, citizen: Citizen) {
        self.citizens.push(citizen);
    }

    pub fn set_citizens(&mut self, citizens: Vec<Citizen>) {
        self.citizens = citizens;
    }

    pub fn raid_state(&self) -> &RaidState {
        &self.raid_state
    }

    pub(crate) fn raid_state_mut(&mut self) -> &mut RaidState {
        self.dirty = true;
        &mut self.raid_state
    }

    /// Split borrow for the timing decider
    pub(crate) fn raid_state_and_recipients(&mut self) -> (&mut RaidState, &[String]) {
        (&mut self.raid_state, &self.message_recipients)
    }

    pub fn can_have_raid_events(&self) -> bool {
        self.can_have_raid_events
    }

    pub fn set_can_have_raid_events(&mut self, enabled: bool) {
        self.can_have_raid_events = enabled;
    }

    pub fn message_recipients(&self) -> &[String] {
        &self.message_recipients
    }

    pub fn add_message_recipient(&mut self, recipient: impl Into<String>) {
        self.message_recipients.push(recipient.into());
    }

    pub fn raider_spawn_points(&self) -> &[Position] {
        &self.raider_spawn_points
    }

    pub(crate) fn record_raider_spawn_point(&mut self, position: Position) {
        self.raider_spawn_points.push(position);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Call after persisting
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}
