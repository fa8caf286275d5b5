//! Game state aggregate
//!
//! One `GameState` is the full authoritative snapshot after an event. The
//! reducer consumes a state and returns its successor; nothing else holds
//! onto it.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::layout;
use crate::tuning::Tuning;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Tick counter (reset to 0 by a restart)
    pub time: u64,
    pub frog: Entity,
    pub fly: Entity,
    pub vehicles: Vec<Entity>,
    pub logs: Vec<Entity>,
    pub turtles: Vec<Entity>,
    /// Lilypads not yet filled this round
    pub lilypads: Vec<Entity>,
    /// One marker per lilypad filled this round
    pub markers: Vec<Entity>,
    pub game_over: bool,
    /// Latched by a restart key, cleared once the reset has taken
    pub restart_requested: bool,
    pub lives: u8,
    pub current_score: u64,
    /// Highest `current_score` seen, never decreases
    pub high_score: u64,
    /// Lane speed multiplier, grows each cleared board
    pub difficulty: f64,
}

impl GameState {
    /// Fresh board for a new run
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            time: 0,
            frog: Entity::frog(tuning.frog_start),
            fly: layout::first_fly(tuning.lilypad_count),
            vehicles: layout::vehicles(tuning.vehicle_count),
            logs: layout::logs(tuning.log_count),
            turtles: layout::turtles(tuning.turtle_count),
            lilypads: layout::lilypads(tuning.lilypad_count),
            markers: Vec::new(),
            game_over: false,
            restart_requested: false,
            lives: tuning.start_lives,
            current_score: 0,
            high_score: 0,
            difficulty: 1.0,
        }
    }

    /// Lilypads still open plus those already filled
    pub fn slot_count(&self) -> usize {
        self.lilypads.len() + self.markers.len()
    }
}
