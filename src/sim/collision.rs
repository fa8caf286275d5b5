//! Collision detection and rule resolution
//!
//! Once the frog has been moved for the tick, `resolve` decides everything
//! that follows from where it landed: lives, score, filled lilypads, the
//! fly, difficulty, and restarts. Every rule reads the state as it stood at
//! the start of resolution, so rule order never leaks between rules.

use super::entity::Entity;
use super::layout;
use super::state::GameState;
use crate::tuning::Tuning;

/// What the frog is touching this tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    pub caught_fly: bool,
    pub hit_vehicle: bool,
    /// Index of the first log under the frog
    pub on_log: Option<usize>,
    /// Index of the first turtle under the frog
    pub on_turtle: Option<usize>,
    /// Index of the first open lilypad under the frog
    pub on_lily_pad: Option<usize>,
    /// Frog landed on a slot that is already filled
    pub hit_marker: bool,
    /// In the river without anything to stand on
    pub drowned: bool,
    pub last_pad_remaining: bool,
    pub board_cleared: bool,
}

impl CollisionReport {
    pub fn detect(state: &GameState, river_line: f64) -> Self {
        let frog = &state.frog;
        let first_hit = |entities: &[Entity]| entities.iter().position(|e| frog.overlaps(e));

        let on_log = first_hit(&state.logs);
        let on_turtle = first_hit(&state.turtles);
        let on_lily_pad = first_hit(&state.lilypads);
        let in_river = frog.pos.y < river_line;

        Self {
            caught_fly: frog.overlaps(&state.fly),
            hit_vehicle: state.vehicles.iter().any(|v| frog.overlaps(v)),
            on_log,
            on_turtle,
            on_lily_pad,
            hit_marker: state.markers.iter().any(|m| frog.overlaps(m)),
            drowned: in_river && on_log.is_none() && on_turtle.is_none() && on_lily_pad.is_none(),
            last_pad_remaining: state.lilypads.len() == 1,
            board_cleared: state.lilypads.is_empty(),
        }
    }

    /// Frog dies and costs a life
    pub fn frog_lost(&self) -> bool {
        self.drowned || self.hit_vehicle || self.hit_marker
    }

    /// Frog goes back to the start, either dead or home on a lilypad
    pub fn frog_sent_home(&self) -> bool {
        self.frog_lost() || self.on_lily_pad.is_some()
    }

    /// Open lilypad the frog fills this tick
    pub fn captured_pad(&self) -> Option<usize> {
        self.on_lily_pad.filter(|_| !self.hit_marker)
    }
}

/// Pseudo-random pick keyed on the tick count. `None` when there is nothing
/// to pick from.
pub fn pick_by_time(candidates: &[Entity], time: u64) -> Option<&Entity> {
    if candidates.is_empty() {
        return None;
    }
    candidates.get((time % candidates.len() as u64) as usize)
}

/// Resolve the rules for a state whose frog has already moved this tick
pub fn resolve(state: GameState, tuning: &Tuning) -> GameState {
    if state.restart_requested {
        return restart(&state, tuning);
    }

    let hits = CollisionReport::detect(&state, tuning.river_line);
    let time = state.time;

    // Open pads other than the one the frog is on
    let remaining: Vec<Entity> = state
        .lilypads
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != hits.on_lily_pad)
        .map(|(_, pad)| pad.clone())
        .collect();

    let (lilypads, markers) = if hits.board_cleared {
        (layout::lilypads(tuning.lilypad_count), Vec::new())
    } else if let Some(i) = hits.captured_pad() {
        let mut markers = state.markers.clone();
        markers.push(Entity::marker(state.lilypads[i].pos, time));
        log::debug!("Lilypad {} filled at tick {}", state.lilypads[i].id, time);
        (remaining.clone(), markers)
    } else {
        (state.lilypads.clone(), state.markers.clone())
    };

    let fly = if hits.board_cleared {
        let fresh = layout::lilypads(tuning.lilypad_count);
        respawn_fly(&fresh, time).unwrap_or_else(|| state.fly.clone())
    } else if hits.caught_fly && !hits.last_pad_remaining {
        respawn_fly(&remaining, time).unwrap_or_else(|| state.fly.clone())
    } else {
        state.fly.clone()
    };

    let frog = if hits.frog_sent_home() {
        Entity::respawned_frog(tuning.frog_start, time)
    } else if let Some(i) = hits.on_log {
        state.frog.riding(&state.logs[i])
    } else if let Some(i) = hits.on_turtle {
        state.frog.riding(&state.turtles[i])
    } else {
        state.frog.clone()
    };

    let difficulty = if hits.board_cleared {
        state.difficulty + tuning.difficulty_step
    } else {
        state.difficulty
    };
    let speed_up = |lane: &[Entity]| -> Vec<Entity> {
        if hits.board_cleared {
            lane.iter().map(|e| e.sped_up(difficulty)).collect()
        } else {
            lane.to_vec()
        }
    };
    if hits.board_cleared {
        log::info!("Board cleared at tick {time}, difficulty now {difficulty:.1}");
    }

    let lives = if hits.frog_lost() {
        log::debug!(
            "Life lost at tick {time} (vehicle: {}, drowned: {}, filled slot: {})",
            hits.hit_vehicle,
            hits.drowned,
            hits.hit_marker
        );
        state.lives.saturating_sub(1)
    } else {
        state.lives
    };

    let current_score = if state.game_over {
        0
    } else if hits.caught_fly {
        log::debug!("Fly caught at tick {time}");
        state.current_score + 2
    } else if hits.captured_pad().is_some() {
        state.current_score + 1
    } else {
        state.current_score
    };

    let game_over = state.lives < 1;
    if game_over && !state.game_over {
        log::info!("Game over at tick {time}, high score {}", state.high_score);
    }

    GameState {
        time,
        frog,
        fly,
        vehicles: speed_up(&state.vehicles),
        logs: speed_up(&state.logs),
        turtles: speed_up(&state.turtles),
        lilypads,
        markers,
        game_over,
        restart_requested: false,
        lives,
        current_score,
        high_score: state.high_score.max(state.current_score),
        difficulty,
    }
}

/// New fly on one of `candidates`, or `None` if there are none
fn respawn_fly(candidates: &[Entity], time: u64) -> Option<Entity> {
    pick_by_time(candidates, time).map(|pad| Entity::respawned_fly(pad.pos, time))
}

/// Full board reset.
///
/// The restart latch is only released when the run being abandoned still
/// had its full starting lives; otherwise it stays set and the following
/// tick performs the reset a second time before clearing it.
// NOTE: this couples the latch to `lives` and is very likely unintended.
// Kept for replay compatibility; clearing unconditionally here is the fix.
fn restart(state: &GameState, tuning: &Tuning) -> GameState {
    let time = state.time;
    let lilypads = layout::lilypads(tuning.lilypad_count);
    let fly = respawn_fly(&lilypads, time).unwrap_or_else(|| layout::first_fly(tuning.lilypad_count));
    log::info!("Restart at tick {time} (lives were {})", state.lives);

    GameState {
        time: 0,
        frog: Entity::respawned_frog(tuning.frog_start, time),
        fly,
        vehicles: layout::vehicles(tuning.vehicle_count),
        logs: layout::logs(tuning.log_count),
        turtles: layout::turtles(tuning.turtle_count),
        lilypads,
        markers: Vec::new(),
        game_over: false,
        restart_requested: state.lives != tuning.start_lives,
        lives: tuning.start_lives,
        current_score: 0,
        high_score: state.high_score.max(state.current_score),
        difficulty: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityKind;
    use glam::DVec2;

    fn state() -> (GameState, Tuning) {
        let tuning = Tuning::default();
        (GameState::new(&tuning), tuning)
    }

    /// Park the frog at `pos` with nothing else on the board
    fn isolate(state: &mut GameState, pos: DVec2) {
        state.frog.pos = pos;
        state.vehicles.clear();
        state.logs.clear();
        state.turtles.clear();
        state.fly.pos = DVec2::new(-1000.0, -1000.0);
    }

    #[test]
    fn test_vehicle_hit_costs_life() {
        let (mut s, tuning) = state();
        s.time = 12;
        s.vehicles[0].pos = DVec2::new(260.0, 520.0);
        let next = resolve(s, &tuning);
        assert_eq!(next.lives, 2);
        assert_eq!(next.frog.pos, DVec2::new(275.0, 540.0));
        assert_eq!(next.frog.id, "frog12");
        assert_eq!(next.current_score, 0);
    }

    #[test]
    fn test_safe_tick_changes_nothing() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 540.0));
        let next = resolve(s.clone(), &tuning);
        assert_eq!(next, s);
    }

    #[test]
    fn test_drowning() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 200.0));
        let next = resolve(s, &tuning);
        assert_eq!(next.lives, 2);
        assert_eq!(next.frog.pos, tuning.frog_start);
    }

    #[test]
    fn test_riding_log_copies_motion() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 120.0));
        s.logs.push(Entity::log(0, DVec2::new(250.0, 120.0), -0.5));
        let next = resolve(s, &tuning);
        assert_eq!(next.lives, 3);
        assert_eq!(next.frog.displacement, -0.5);
        assert_eq!(next.frog.pos, DVec2::new(275.0, 120.0));
    }

    #[test]
    fn test_log_wins_over_turtle() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 120.0));
        s.logs.push(Entity::log(0, DVec2::new(250.0, 120.0), -0.5));
        s.turtles.push(Entity::turtle(0, DVec2::new(280.0, 120.0), 0.8));
        let next = resolve(s, &tuning);
        assert_eq!(next.frog.displacement, -0.5);
    }

    #[test]
    fn test_lilypad_capture() {
        let (mut s, tuning) = state();
        s.time = 40;
        isolate(&mut s, DVec2::new(165.0, 5.0));
        let next = resolve(s, &tuning);
        assert_eq!(next.lilypads.len(), 4);
        assert!(next.lilypads.iter().all(|p| p.id != "lilypad1"));
        assert_eq!(next.markers.len(), 1);
        assert_eq!(next.markers[0].kind, EntityKind::LilyPadMarker);
        assert_eq!(next.markers[0].pos, DVec2::new(165.0, 0.0));
        assert_eq!(next.markers[0].id, "marker40");
        assert_eq!(next.current_score, 1);
        assert_eq!(next.lives, 3);
        assert_eq!(next.frog.pos, tuning.frog_start);
        assert_eq!(next.slot_count(), 5);
    }

    #[test]
    fn test_filled_slot_is_a_failure() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(165.0, 5.0));
        let pad = s.lilypads.remove(1);
        s.markers.push(Entity::marker(pad.pos, 3));
        let next = resolve(s, &tuning);
        assert_eq!(next.lives, 2);
        assert_eq!(next.markers.len(), 1);
        assert_eq!(next.lilypads.len(), 4);
        assert_eq!(next.current_score, 0);
    }

    #[test]
    fn test_fly_capture_moves_fly_to_remaining_pad() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 300.0));
        s.fly.pos = DVec2::new(280.0, 310.0);
        s.lilypads.truncate(3);
        s.markers = vec![Entity::marker(DVec2::new(385.0, 0.0), 1), Entity::marker(DVec2::new(495.0, 0.0), 2)];
        s.time = 7;
        let pads: Vec<DVec2> = s.lilypads.iter().map(|p| p.pos).collect();
        let next = resolve(s, &tuning);
        assert_eq!(next.current_score, 2);
        // 7 % 3 == 1
        assert_eq!(next.fly.pos, pads[1]);
        assert_eq!(next.fly.id, "fly7");
    }

    #[test]
    fn test_fly_on_pad_scores_once_and_skips_that_pad() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(55.0, 5.0));
        s.fly.pos = DVec2::new(55.0, 0.0);
        s.time = 4;
        let next = resolve(s, &tuning);
        assert_eq!(next.current_score, 2);
        assert_eq!(next.markers.len(), 1);
        // remaining pads are slots 1..5, 4 % 4 == 0 -> slot 1
        assert_eq!(next.fly.pos, DVec2::new(165.0, 0.0));
    }

    #[test]
    fn test_fly_stays_on_last_pad() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(300.0, 300.0));
        s.fly.pos = DVec2::new(300.0, 300.0);
        s.lilypads.truncate(1);
        let before = s.fly.clone();
        let next = resolve(s, &tuning);
        assert_eq!(next.fly, before);
        assert_eq!(next.current_score, 2);
    }

    #[test]
    fn test_board_clear_resets_and_speeds_up() {
        let (mut s, tuning) = state();
        s.time = 13;
        s.lilypads.clear();
        s.markers = layout::lilypads(5)
            .iter()
            .map(|p| Entity::marker(p.pos, 1))
            .collect();
        let speeds: Vec<f64> = s.vehicles.iter().map(|v| v.displacement).collect();
        let next = resolve(s, &tuning);
        assert_eq!(next.lilypads.len(), 5);
        assert!(next.markers.is_empty());
        assert!((next.difficulty - 1.1).abs() < 1e-12);
        for (v, before) in next.vehicles.iter().zip(speeds) {
            assert_eq!(v.displacement, before * next.difficulty);
        }
        // 13 % 5 == 3
        assert_eq!(next.fly.pos, DVec2::new(385.0, 0.0));
    }

    #[test]
    fn test_board_clears_compound() {
        let (mut s, tuning) = state();
        isolate(&mut s, tuning.frog_start);
        s.logs.push(Entity::log(0, DVec2::new(0.0, 120.0), -0.5));
        s.lilypads.clear();
        let once = resolve(s, &tuning);
        let d1 = once.difficulty;
        let mut again = once;
        again.lilypads.clear();
        let twice = resolve(again, &tuning);
        let d2 = twice.difficulty;
        assert_eq!(twice.logs[0].displacement, -0.5 * d1 * d2);
        assert!((twice.logs[0].displacement - -0.5 * 1.1 * 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_game_over_and_score_zeroing() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 540.0));
        s.lives = 0;
        s.current_score = 9;
        let next = resolve(s, &tuning);
        assert!(next.game_over);
        // previous tick was not over yet, score survives one tick
        assert_eq!(next.current_score, 9);
        assert_eq!(next.high_score, 9);
        let after = resolve(next, &tuning);
        assert_eq!(after.current_score, 0);
        assert_eq!(after.high_score, 9);
    }

    #[test]
    fn test_lives_floor_at_zero() {
        let (mut s, tuning) = state();
        isolate(&mut s, DVec2::new(275.0, 200.0));
        s.lives = 0;
        let next = resolve(s, &tuning);
        assert_eq!(next.lives, 0);
    }

    #[test]
    fn test_restart_with_full_lives_clears_latch() {
        let (mut s, tuning) = state();
        s.restart_requested = true;
        s.time = 21;
        s.current_score = 5;
        s.difficulty = 1.3;
        let next = resolve(s, &tuning);
        assert!(!next.restart_requested);
        assert_eq!(next.time, 0);
        assert_eq!(next.current_score, 0);
        assert_eq!(next.high_score, 5);
        assert_eq!(next.difficulty, 1.0);
        assert_eq!(next.frog.id, "frog21");
        // 21 % 5 == 1
        assert_eq!(next.fly.pos, DVec2::new(165.0, 0.0));
    }

    #[test]
    fn test_restart_after_losing_lives_keeps_latch() {
        let (mut s, tuning) = state();
        s.restart_requested = true;
        s.lives = 1;
        s.lilypads.truncate(2);
        let next = resolve(s, &tuning);
        assert!(next.restart_requested);
        assert_eq!(next.lives, 3);
        assert_eq!(next.lilypads.len(), 5);
        let again = resolve(next, &tuning);
        assert!(!again.restart_requested);
    }

    #[test]
    fn test_pick_by_time_guards_empty() {
        assert!(pick_by_time(&[], 10).is_none());
        let pads = layout::lilypads(3);
        assert_eq!(pick_by_time(&pads, 10).map(|p| p.id.as_str()), Some("lilypad1"));
    }
}
