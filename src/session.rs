//! Driving loop
//!
//! A `Session` owns the running state and folds events from an injected
//! `EventSource` strictly one at a time, handing every snapshot to the
//! consumer before the next event is pulled.

use std::collections::VecDeque;
use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::input::{Direction, KeyPress, translate};
use crate::sim::{GameEvent, GameState, reduce};
use crate::tuning::{Tuning, TuningError};

/// Errors raised while loading an input script
#[derive(thiserror::Error, Debug)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Producer of the merged, ordered event stream
pub trait EventSource {
    /// Next event, or `None` when the stream has ended. The current state is
    /// visible so producers such as the autopilot can react to it.
    fn next_event(&mut self, state: &GameState) -> Option<GameEvent>;
}

/// Totals reported at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub events: u64,
    pub ticks: u64,
    pub final_score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub game_over: bool,
    pub difficulty: f64,
}

/// Running game: the current state plus the tuning it was built with
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    tuning: Tuning,
}

impl Session {
    /// Fresh game. Fails if `tuning` does not validate.
    pub fn new(tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(&tuning),
            tuning,
        })
    }

    /// Resume from an existing snapshot
    pub fn with_state(state: GameState, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self { state, tuning })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Fold a single event
    pub fn apply(&mut self, event: GameEvent) -> &GameState {
        self.state = reduce(self.state.clone(), event, &self.tuning);
        &self.state
    }

    /// Drain `source`, passing each event and its resulting snapshot to `consumer`
    pub fn run<S, F>(&mut self, source: &mut S, mut consumer: F) -> RunSummary
    where
        S: EventSource + ?Sized,
        F: FnMut(&GameEvent, &GameState),
    {
        let mut events = 0;
        let mut ticks = 0;
        log::info!("Session starting at tick {}", self.state.time);

        while let Some(event) = source.next_event(&self.state) {
            let state = self.apply(event);
            consumer(&event, state);
            events += 1;
            if matches!(event, GameEvent::Tick { .. }) {
                ticks += 1;
            }
        }

        let summary = RunSummary {
            events,
            ticks,
            final_score: self.state.current_score,
            high_score: self.state.high_score,
            lives: self.state.lives,
            game_over: self.state.game_over,
            difficulty: self.state.difficulty,
        };
        log::info!(
            "Session finished: {} events, {} ticks, high score {}",
            summary.events,
            summary.ticks,
            summary.high_score
        );
        summary
    }
}

/// Replays a fixed list of events
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    events: VecDeque<GameEvent>,
}

impl ScriptedEvents {
    pub fn new(events: impl IntoIterator<Item = GameEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let events: Vec<GameEvent> = serde_json::from_str(json)?;
        Ok(Self::new(events))
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self, _state: &GameState) -> Option<GameEvent> {
        self.events.pop_front()
    }
}

/// A key-down scheduled just before a given tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledPress {
    pub at: u64,
    #[serde(flatten)]
    pub press: KeyPress,
}

/// Fixed-rate clock emitting `Tick(0)..Tick(limit - 1)`, merged with key
/// presses. Presses scheduled at tick `n` are delivered before `Tick(n)`.
#[derive(Debug, Clone)]
pub struct TickClock {
    next_tick: u64,
    limit: u64,
    schedule: VecDeque<ScheduledPress>,
}

impl TickClock {
    pub fn new(limit: u64) -> Self {
        Self::with_presses(limit, Vec::new())
    }

    pub fn with_presses(limit: u64, mut presses: Vec<ScheduledPress>) -> Self {
        presses.sort_by_key(|p| p.at);
        Self {
            next_tick: 0,
            limit,
            schedule: presses.into(),
        }
    }

    /// Parse a JSON list of `{ "at": n, "key": "ArrowUp" }` entries
    pub fn from_json(limit: u64, json: &str) -> Result<Self, ScriptError> {
        let presses: Vec<ScheduledPress> = serde_json::from_str(json)?;
        log::debug!("Loaded {} scheduled key presses", presses.len());
        Ok(Self::with_presses(limit, presses))
    }

    pub fn load(limit: u64, path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(limit, &json)
    }
}

impl EventSource for TickClock {
    fn next_event(&mut self, _state: &GameState) -> Option<GameEvent> {
        while self.schedule.front().is_some_and(|p| p.at <= self.next_tick) {
            if let Some(event) = self.schedule.pop_front().and_then(|p| translate(p.press)) {
                return Some(event);
            }
        }
        if self.next_tick >= self.limit {
            return None;
        }
        let event = GameEvent::Tick {
            elapsed: self.next_tick,
        };
        self.next_tick += 1;
        Some(event)
    }
}

/// Attract-mode player. Jumps in a seeded pseudo-random direction every
/// `jump_interval` ticks, mostly upward, and presses restart once the game
/// is over. The same seed always yields the same stream.
#[derive(Debug, Clone)]
pub struct Autopilot {
    rng: Pcg32,
    next_tick: u64,
    limit: u64,
    jump_interval: u64,
    acted: bool,
}

impl Autopilot {
    pub fn new(seed: u64, limit: u64, jump_interval: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_tick: 0,
            limit,
            jump_interval: jump_interval.max(1),
            acted: false,
        }
    }

    fn pick_direction(&mut self) -> Direction {
        match self.rng.random_range(0..6u32) {
            0..=2 => Direction::Up,
            3 => Direction::Left,
            4 => Direction::Right,
            _ => Direction::Down,
        }
    }
}

impl EventSource for Autopilot {
    fn next_event(&mut self, state: &GameState) -> Option<GameEvent> {
        if self.next_tick >= self.limit {
            return None;
        }
        if !self.acted {
            self.acted = true;
            if state.game_over && !state.restart_requested {
                return Some(GameEvent::Restart);
            }
            if self.next_tick > 0 && self.next_tick % self.jump_interval == 0 {
                return Some(self.pick_direction().jump());
            }
        }
        self.acted = false;
        let event = GameEvent::Tick {
            elapsed: self.next_tick,
        };
        self.next_tick += 1;
        Some(event)
    }
}
