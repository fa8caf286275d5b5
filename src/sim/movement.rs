//! Per-tick movement and sprite animation
//!
//! Each function takes an entity and returns its successor.

use glam::DVec2;

use super::entity::{Axis, Entity, EntityKind};
use crate::consts::*;
use crate::wrap_horizontal;

/// Sprite sheet column offsets for turtle/frog frames. The sheet's cells are
/// not evenly spaced, so frame `i` is drawn at `FRAME_COLUMNS[i]`.
pub const FRAME_COLUMNS: [f64; 10] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 6.726, 7.4, 8.0];

/// Frames visited while a turtle resurfaces. The sheet has no rising frames
/// below column 5, so the animation snaps from 5 straight back to 0.
pub const RESURFACE_FRAMES: [usize; 6] = [9, 8, 7, 6, 5, 0];

/// Column a frame index is drawn from
#[inline]
pub fn frame_column(frame_x: usize) -> f64 {
    FRAME_COLUMNS.get(frame_x).copied().unwrap_or(0.0)
}

/// Integrate one tick of displacement. The frog stops after every step so
/// a jump only lasts one tick unless renewed.
pub fn advance(entity: &Entity, canvas_size: f64) -> Entity {
    let pos = match entity.axis {
        Axis::X => DVec2::new(
            wrap_horizontal(entity.pos.x + entity.displacement, canvas_size),
            entity.pos.y,
        ),
        Axis::Y => DVec2::new(entity.pos.x, entity.pos.y + entity.displacement),
        Axis::None => entity.pos,
    };
    let displacement = if entity.kind == EntityKind::Frog {
        0.0
    } else {
        entity.displacement
    };

    Entity {
        pos,
        displacement,
        ..entity.clone()
    }
}

/// Swap to the next car sprite whenever a vehicle sits on a lane reset
/// boundary: the right canvas edge or `VEHICLE_RESET_LEFT`.
pub fn cycle_vehicle_sprite(vehicle: &Entity, canvas_size: f64) -> Entity {
    let x = vehicle.pos.x;
    if x != canvas_size && x != VEHICLE_RESET_LEFT {
        return vehicle.clone();
    }
    Entity {
        frame_y: (vehicle.frame_y + 1) % VEHICLE_SPRITES,
        ..vehicle.clone()
    }
}

/// One step of the turtle dive cycle: shrink while sinking, grow while rising,
/// turning around at the submerged/surfaced thresholds.
pub fn sink_or_rise(turtle: &Entity) -> Entity {
    let delta = if turtle.sinking {
        -TURTLE_SINK_STEP
    } else {
        TURTLE_RISE_STEP
    };
    let sinking = if turtle.size.both_below(TURTLE_SUBMERGED) {
        false
    } else if turtle.size.both_above(TURTLE_SURFACED) {
        true
    } else {
        turtle.sinking
    };

    Entity {
        size: turtle.size.grown(delta),
        sinking,
        ..turtle.clone()
    }
}

/// Hold animation frames for longer than a tick. The frog drops back to its
/// resting frame; everything else walks the column table, reversing at
/// either end.
pub fn delay_frame(entity: &Entity) -> Entity {
    let column = frame_column(entity.frame_x);
    let frame_x = if entity.kind == EntityKind::Frog {
        0
    } else if entity.frame_delay {
        resurface_frame(entity.frame_x)
    } else {
        submerge_frame(entity.frame_x)
    };
    let frame_delay = if column < 0.1 {
        false
    } else if column > 7.5 {
        true
    } else {
        entity.frame_delay
    };

    Entity {
        frame_x,
        frame_delay,
        ..entity.clone()
    }
}

fn submerge_frame(frame_x: usize) -> usize {
    if frame_x + 1 < FRAME_COLUMNS.len() {
        frame_x + 1
    } else {
        frame_x
    }
}

fn resurface_frame(frame_x: usize) -> usize {
    RESURFACE_FRAMES
        .iter()
        .position(|&f| f == frame_x)
        .and_then(|i| RESURFACE_FRAMES.get(i + 1))
        .copied()
        .unwrap_or(frame_x)
}
