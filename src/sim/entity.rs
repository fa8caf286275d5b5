//! Game entities and their constructors
//!
//! All board objects share one record discriminated by `kind`. Entities are
//! never edited in place between ticks: each transition builds a new value,
//! and the constructors here pin down which fields start where.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::{Rect, Size};
use crate::consts::START_TIME;

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Frog,
    Vehicle,
    Log,
    Turtle,
    Fly,
    LilyPad,
    /// A filled lilypad slot
    LilyPadMarker,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Frog => "frog",
            EntityKind::Vehicle => "vehicle",
            EntityKind::Log => "log",
            EntityKind::Turtle => "turtle",
            EntityKind::Fly => "fly",
            EntityKind::LilyPad => "lilypad",
            EntityKind::LilyPadMarker => "marker",
        }
    }

    /// Collision box for this kind
    pub fn size(&self) -> Size {
        match self {
            EntityKind::Frog | EntityKind::LilyPadMarker => Size::new(45.0, 45.0),
            EntityKind::Vehicle => Size::new(65.0, 180.0),
            EntityKind::Log => Size::new(55.0, 200.0),
            EntityKind::Turtle => Size::new(55.0, 55.0),
            EntityKind::Fly | EntityKind::LilyPad => Size::new(50.0, 40.0),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis a displacement is applied along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    None,
}

/// A single game object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Tick count when created
    pub create_time: u64,
    pub pos: DVec2,
    pub size: Size,
    pub kind: EntityKind,
    pub axis: Axis,
    /// Signed distance moved along `axis` per tick
    pub displacement: f64,
    /// Index into `movement::FRAME_COLUMNS`
    pub frame_x: usize,
    pub frame_y: u8,
    /// Turtle is shrinking toward submersion
    pub sinking: bool,
    /// Frame index is walking back down the column table
    pub frame_delay: bool,
}

impl Entity {
    fn spawn(
        kind: EntityKind,
        tag: impl fmt::Display,
        create_time: u64,
        pos: DVec2,
        axis: Axis,
        displacement: f64,
    ) -> Self {
        Self {
            id: format!("{kind}{tag}"),
            create_time,
            pos,
            size: kind.size(),
            kind,
            axis,
            displacement,
            frame_x: 0,
            frame_y: 0,
            sinking: true,
            frame_delay: false,
        }
    }

    /// The frog at the start of a run
    pub fn frog(start: DVec2) -> Self {
        Self::spawn(EntityKind::Frog, "", START_TIME, start, Axis::X, 0.0)
    }

    /// A frog respawned at tick `time`
    pub fn respawned_frog(start: DVec2, time: u64) -> Self {
        Self::spawn(EntityKind::Frog, time, time, start, Axis::X, 0.0)
    }

    pub fn vehicle(lane_index: usize, pos: DVec2, displacement: f64) -> Self {
        Self::spawn(EntityKind::Vehicle, lane_index, START_TIME, pos, Axis::X, displacement)
    }

    pub fn log(lane_index: usize, pos: DVec2, displacement: f64) -> Self {
        Self::spawn(EntityKind::Log, lane_index, START_TIME, pos, Axis::X, displacement)
    }

    pub fn turtle(lane_index: usize, pos: DVec2, displacement: f64) -> Self {
        Self::spawn(EntityKind::Turtle, lane_index, START_TIME, pos, Axis::X, displacement)
    }

    pub fn lilypad(slot: usize, pos: DVec2) -> Self {
        Self::spawn(EntityKind::LilyPad, slot, START_TIME, pos, Axis::None, 0.0)
    }

    /// The fly present when a run starts
    pub fn fly(pos: DVec2) -> Self {
        Self::spawn(EntityKind::Fly, "", START_TIME, pos, Axis::None, 0.0)
    }

    /// A fly relocated at tick `time`
    pub fn respawned_fly(pos: DVec2, time: u64) -> Self {
        Self::spawn(EntityKind::Fly, time, time, pos, Axis::None, 0.0)
    }

    /// Marker for a lilypad filled at tick `time`
    pub fn marker(pos: DVec2, time: u64) -> Self {
        Self::spawn(EntityKind::LilyPadMarker, time, time, pos, Axis::None, 0.0)
    }

    /// Collision rectangle
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }

    /// Copy of this entity carried along by `ride`
    pub fn riding(&self, ride: &Entity) -> Self {
        Self {
            displacement: ride.displacement,
            axis: ride.axis,
            ..self.clone()
        }
    }

    /// Copy of this entity with its lane speed scaled
    pub fn sped_up(&self, factor: f64) -> Self {
        Self {
            displacement: self.displacement * factor,
            ..self.clone()
        }
    }
}
