//! Keyboard to game-event translation
//!
//! Producers deliver one `Jump` per arrow key-down and one `Restart` per
//! restart key-down. Auto-repeated key-downs are dropped here so holding a
//! key never queues extra jumps.

use serde::{Deserialize, Serialize};

use crate::sim::{Axis, GameEvent};

/// Semantic jump direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Sign, axis and sprite row for this direction
    pub fn jump(self) -> GameEvent {
        let (direction, axis, frame) = match self {
            Direction::Up => (-1, Axis::Y, 0),
            Direction::Down => (1, Axis::Y, 3),
            Direction::Left => (-1, Axis::X, 2),
            Direction::Right => (1, Axis::X, 1),
        };
        GameEvent::Jump {
            direction,
            axis,
            frame,
        }
    }
}

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyR,
}

impl Key {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "KeyR" => Some(Key::KeyR),
            _ => None,
        }
    }
}

/// A key-down as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    pub key: Key,
    /// Auto-repeat from a held key
    #[serde(default)]
    pub repeat: bool,
}

impl KeyPress {
    pub fn new(key: Key) -> Self {
        Self { key, repeat: false }
    }
}

/// Map a key-down to its game event, dropping auto-repeats
pub fn translate(press: KeyPress) -> Option<GameEvent> {
    if press.repeat {
        return None;
    }
    let event = match press.key {
        Key::ArrowUp => Direction::Up.jump(),
        Key::ArrowDown => Direction::Down.jump(),
        Key::ArrowLeft => Direction::Left.jump(),
        Key::ArrowRight => Direction::Right.jump(),
        Key::KeyR => GameEvent::Restart,
    };
    Some(event)
}
