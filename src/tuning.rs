//! Data-driven game constants
//!
//! Every number the rules depend on lives here so a run can be replayed
//! with different lane populations or board sizes. Defaults reproduce the
//! arcade layout.

use std::num::NonZeroU64;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a tuning file
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Overridable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_size: f64,
    pub jump_distance: f64,
    pub start_lives: u8,
    pub vehicle_count: usize,
    pub log_count: usize,
    pub turtle_count: usize,
    pub lilypad_count: usize,
    pub frog_start: DVec2,
    /// Frog above this y (smaller y) must be riding something
    pub river_line: f64,
    pub difficulty_step: f64,
    pub frog_frame_period: NonZeroU64,
    pub turtle_cycle_period: NonZeroU64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_size: CANVAS_SIZE,
            jump_distance: JUMP_DISTANCE,
            start_lives: START_LIVES,
            vehicle_count: VEHICLE_COUNT,
            log_count: LOG_COUNT,
            turtle_count: TURTLE_COUNT,
            lilypad_count: LILYPAD_COUNT,
            frog_start: DVec2::new(FROG_START_X, FROG_START_Y),
            river_line: RIVER_LINE,
            difficulty_step: DIFFICULTY_STEP,
            frog_frame_period: NonZeroU64::new(FROG_FRAME_PERIOD).unwrap_or(NonZeroU64::MIN),
            turtle_cycle_period: NonZeroU64::new(TURTLE_CYCLE_PERIOD).unwrap_or(NonZeroU64::MIN),
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Rightmost x the frog may jump to
    #[inline]
    pub fn frog_max_x(&self) -> f64 {
        self.canvas_size - FROG_RIGHT_MARGIN
    }

    /// Lowest y the frog may jump to
    #[inline]
    pub fn frog_max_y(&self) -> f64 {
        self.canvas_size
    }

    /// Reject values the rules cannot operate on
    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };

        if !(self.canvas_size > 0.0) {
            return invalid("canvas_size", "must be positive");
        }
        if !(self.jump_distance > 0.0) {
            return invalid("jump_distance", "must be positive");
        }
        if !(1..=START_LIVES).contains(&self.start_lives) {
            return invalid("start_lives", "must be between 1 and 3");
        }
        if self.lilypad_count == 0 {
            return invalid("lilypad_count", "must be at least 1");
        }
        if !(self.difficulty_step >= 0.0) {
            return invalid("difficulty_step", "must not be negative");
        }
        if !(FROG_MIN_X..=self.frog_max_x()).contains(&self.frog_start.x)
            || !(FROG_MIN_Y..=self.frog_max_y()).contains(&self.frog_start.y)
        {
            return invalid("frog_start", "must lie inside the board");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "jump_distance": 35.0, "vehicle_count": 2 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.jump_distance, 35.0);
        assert_eq!(tuning.vehicle_count, 2);
        assert_eq!(tuning.canvas_size, CANVAS_SIZE);
        assert_eq!(tuning.start_lives, START_LIVES);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "start_lives": 4 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "start_lives", .. }));

        let err = Tuning::from_json(r#"{ "lilypad_count": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "lilypad_count", .. }));

        let err = Tuning::from_json(r#"{ "canvas_size": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "canvas_size", .. }));
    }

    #[test]
    fn test_rejects_frog_start_off_board() {
        let err = Tuning::from_json(r#"{ "frog_start": [275.0, 700.0] }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "frog_start", .. }));

        let wide = Tuning::from_json(r#"{ "canvas_size": 800.0, "frog_start": [375.0, 700.0] }"#)
            .expect("valid tuning");
        assert_eq!(wide.frog_max_x(), 756.0);
        assert_eq!(wide.frog_max_y(), 800.0);
    }

    #[test]
    fn test_zero_periods_do_not_parse() {
        assert!(matches!(
            Tuning::from_json(r#"{ "frog_frame_period": 0 }"#),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "turtle_cycle_period": 0 }"#),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }
}
