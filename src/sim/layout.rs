//! Starting lane layouts
//!
//! Positions and speeds are hand placed so lanes read as evenly spaced
//! traffic once wrapping kicks in.

use glam::DVec2;

use super::entity::Entity;

/// Road lanes, nearest the start first: three cars, two, then the rest
pub fn vehicles(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            let k = i as f64;
            if i < 3 {
                Entity::vehicle(i, DVec2::new(-100.0 - 290.0 * k, 470.0), 1.0)
            } else if i < 5 {
                Entity::vehicle(i, DVec2::new(600.0 + 350.0 * k, 392.5), -2.0)
            } else {
                Entity::vehicle(i, DVec2::new(-100.0 - 300.0 * k, 316.0), 1.5)
            }
        })
        .collect()
}

pub fn logs(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| Entity::log(i, DVec2::new(600.0 + 300.0 * i as f64, 120.0), -0.5))
        .collect()
}

/// Two turtle lanes, first five in the lower lane
pub fn turtles(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            let k = i as f64;
            if i < 5 {
                Entity::turtle(i, DVec2::new(-100.0 - 200.0 * k, 182.5), 0.8)
            } else {
                Entity::turtle(i, DVec2::new(-200.0 + 200.0 * k, 60.0), 0.8)
            }
        })
        .collect()
}

/// Evenly spaced slots along the top edge
pub fn lilypads(count: usize) -> Vec<Entity> {
    (0..count)
        .map(|i| Entity::lilypad(i, DVec2::new(55.0 + 110.0 * i as f64, 0.0)))
        .collect()
}

/// The first fly of a run waits on the middle slot
pub fn first_fly(lilypad_count: usize) -> Entity {
    Entity::fly(DVec2::new(55.0 + 110.0 * (lilypad_count / 2) as f64, 0.0))
}
