//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One state in, one state out per event
//! - Pseudo-random picks keyed on the tick count only
//! - Stable iteration order (lane order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod layout;
pub mod movement;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, pick_by_time, resolve};
pub use entity::{Axis, Entity, EntityKind};
pub use movement::{FRAME_COLUMNS, RESURFACE_FRAMES, frame_column};
pub use rect::{Rect, Size};
pub use state::GameState;
pub use tick::{GameEvent, frog_blocked, reduce, tick};
