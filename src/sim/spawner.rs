//! Enemy spawning
//!
//! Enemies appear on a circle that encloses the whole field, so they always
//! enter from off-screen whatever the aspect ratio.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::GameState;
use crate::heading;

/// Radius of the spawn circle around the field center
pub fn spawn_radius(state: &GameState) -> f32 {
    state.width.max(state.height)
}

/// Point on the spawn circle at `angle`
pub fn spawn_point(state: &GameState, angle: f32) -> Vec2 {
    state.center() + heading(angle) * spawn_radius(state)
}

/// Roll the per-tick spawn chance; on success add one enemy.
///
/// Returns the new enemy's ID.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    let chance = state.tuning.spawn_chance;
    if chance <= 0.0 || state.rng.random::<f32>() >= chance {
        return None;
    }

    let angle = state.rng.random_range(0.0..TAU);
    let pos = spawn_point(state, angle);
    let id = state.add_enemy(pos);
    log::debug!("Spawned enemy {} at ({:.1}, {:.1})", id, pos.x, pos.y);
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_spawns_on_circle_outside_field() {
        let tuning = Tuning {
            spawn_chance: 1.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(800.0, 600.0, tuning, 42);
        for _ in 0..50 {
            assert!(maybe_spawn(&mut state).is_some());
        }
        assert_eq!(state.enemies.len(), 50);
        let center = state.center();
        for enemy in &state.enemies {
            assert!((enemy.pos.distance(center) - 800.0).abs() < 1e-2);
            assert!(!state.in_field(enemy.pos));
            assert_eq!(enemy.health, 50.0);
        }
    }

    #[test]
    fn test_zero_chance_never_spawns() {
        let mut state = GameState::new(800.0, 600.0, Tuning::without_spawns(), 42);
        for _ in 0..1000 {
            assert!(maybe_spawn(&mut state).is_none());
        }
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_spawn_rate_roughly_matches_chance() {
        let mut state = GameState::new(800.0, 600.0, Tuning::default(), 1234);
        let spawned = (0..10_000).filter(|_| maybe_spawn(&mut state).is_some()).count();
        // 2% of 10k ticks, wide tolerance
        assert!((100..=300).contains(&spawned), "spawned {}", spawned);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let mut a = GameState::new(800.0, 600.0, Tuning::default(), 9);
        let mut b = GameState::new(800.0, 600.0, Tuning::default(), 9);
        for _ in 0..2000 {
            maybe_spawn(&mut a);
            maybe_spawn(&mut b);
        }
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(&b.enemies) {
            assert_eq!(ea.pos, eb.pos);
        }
    }
}
