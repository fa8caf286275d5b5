//! Frogger Sim - deterministic game-state engine for a Frogger-style arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, scoring, restart)
//! - `tuning`: Data-driven game constants
//! - `input`: Key presses to semantic game events
//! - `session`: Event-source driven fold over the reducer

pub mod input;
pub mod session;
pub mod sim;
pub mod tuning;

pub use session::{EventSource, RunSummary, Session};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Canvas width and height
    pub const CANVAS_SIZE: f64 = 600.0;
    /// Frog jump length per key press
    pub const JUMP_DISTANCE: f64 = 70.0;
    /// Lives at the start of a run
    pub const START_LIVES: u8 = 3;
    /// Tick count stamped on entities created at game start
    pub const START_TIME: u64 = 0;

    /// Frog spawn point
    pub const FROG_START_X: f64 = 275.0;
    pub const FROG_START_Y: f64 = 540.0;

    /// Frog may not jump past these (checked against x/y + displacement).
    /// The right and bottom bounds follow the canvas size.
    pub const FROG_MIN_X: f64 = -6.0;
    pub const FROG_MIN_Y: f64 = -30.0;
    /// Gap between the right bound and the canvas edge
    pub const FROG_RIGHT_MARGIN: f64 = 44.0;

    /// Everything above this line is water
    pub const RIVER_LINE: f64 = 242.0;

    /// Torus wrap thresholds and sprite-width compensation
    pub const WRAP_LOW: f64 = -500.0;
    pub const WRAP_HIGH_MARGIN: f64 = 400.0;
    pub const WRAP_LOW_OFFSET: f64 = 500.0;
    pub const WRAP_HIGH_OFFSET: f64 = 580.0;

    /// Vehicle x position (besides the canvas width) at which the sprite
    /// cycles to the next car
    pub const VEHICLE_RESET_LEFT: f64 = -200.0;
    pub const VEHICLE_SPRITES: u8 = 3;

    /// Turtle sink/rise animation
    pub const TURTLE_RISE_STEP: f64 = 7.857;
    pub const TURTLE_SINK_STEP: f64 = 6.1;
    pub const TURTLE_SUBMERGED: f64 = 10.0;
    pub const TURTLE_SURFACED: f64 = 43.0;

    /// Difficulty gained per cleared board (multiplicative on lane speed)
    pub const DIFFICULTY_STEP: f64 = 0.1;

    /// Ticks between frog frame resets / turtle animation steps
    pub const FROG_FRAME_PERIOD: u64 = 10;
    pub const TURTLE_CYCLE_PERIOD: u64 = 30;

    /// Default lane populations
    pub const VEHICLE_COUNT: usize = 8;
    pub const LOG_COUNT: usize = 4;
    pub const TURTLE_COUNT: usize = 10;
    pub const LILYPAD_COUNT: usize = 5;
}

/// Wrap a horizontal coordinate around the canvas.
///
/// The offsets are asymmetric so a lane object reappears flush with the
/// opposite edge once its sprite width is accounted for. Vertical
/// coordinates never wrap.
#[inline]
pub fn wrap_horizontal(x: f64, canvas_size: f64) -> f64 {
    use consts::*;
    if x < WRAP_LOW {
        x + canvas_size + WRAP_LOW_OFFSET
    } else if x > canvas_size + WRAP_HIGH_MARGIN {
        x - canvas_size - WRAP_HIGH_OFFSET
    } else {
        x
    }
}
