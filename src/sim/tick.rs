//! Event reducer
//!
//! `reduce` folds one event into the state. Only `Tick` advances the
//! simulation; jumps and restarts are recorded and take effect on the next
//! tick.

use serde::{Deserialize, Serialize};

use super::collision;
use super::entity::{Axis, Entity};
use super::movement::{advance, cycle_vehicle_sprite, delay_frame, sink_or_rise};
use super::state::GameState;
use crate::consts::*;
use crate::tuning::Tuning;

/// Input events, merged into a single ordered stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// One fixed time quantum elapsed
    Tick { elapsed: u64 },
    /// Arrow key pressed (not a key repeat)
    Jump { direction: i8, axis: Axis, frame: u8 },
    /// Restart key pressed
    Restart,
}

/// Fold one event into the state
pub fn reduce(state: GameState, event: GameEvent, tuning: &Tuning) -> GameState {
    log::trace!("t={} {:?}", state.time, event);
    match event {
        GameEvent::Tick { elapsed } => tick(state, elapsed, tuning),
        GameEvent::Jump {
            direction,
            axis,
            frame,
        } => {
            let frog = Entity {
                displacement: tuning.jump_distance * f64::from(direction),
                axis,
                frame_x: 1,
                frame_y: frame,
                ..state.frog
            };
            GameState { frog, ..state }
        }
        GameEvent::Restart => GameState {
            restart_requested: true,
            ..state
        },
    }
}

/// Would the frog's pending jump leave the board? Blocked jumps are kept
/// and retried next tick rather than clamped.
pub fn frog_blocked(frog: &Entity, tuning: &Tuning) -> bool {
    match frog.axis {
        Axis::X => {
            let x = frog.pos.x + frog.displacement;
            x > tuning.frog_max_x() || x < FROG_MIN_X
        }
        Axis::Y => {
            let y = frog.pos.y + frog.displacement;
            y > tuning.frog_max_y() || y < FROG_MIN_Y
        }
        Axis::None => false,
    }
}

/// Advance the game by one tick
pub fn tick(state: GameState, elapsed: u64, tuning: &Tuning) -> GameState {
    let canvas = tuning.canvas_size;
    let move_all = |lane: &[Entity]| -> Vec<Entity> {
        lane.iter().map(|e| advance(e, canvas)).collect()
    };

    let frog = if state.time % tuning.frog_frame_period.get() == 0 {
        delay_frame(&state.frog)
    } else if !frog_blocked(&state.frog, tuning) {
        advance(&state.frog, canvas)
    } else {
        state.frog.clone()
    };

    let logs = move_all(&state.logs);
    let vehicles = state
        .vehicles
        .iter()
        .map(|v| cycle_vehicle_sprite(&advance(v, canvas), canvas))
        .collect();
    let turtles = if state.time % tuning.turtle_cycle_period.get() == 0 {
        state
            .turtles
            .iter()
            .map(|t| delay_frame(&sink_or_rise(t)))
            .collect()
    } else {
        move_all(&state.turtles)
    };

    let moved = GameState {
        time: elapsed,
        frog,
        vehicles,
        logs,
        turtles,
        ..state
    };
    collision::resolve(moved, tuning)
}
