//! Movement integration for one tick
//!
//! Order: player, storm shrink, storm damage, enemies, bullets.

use super::state::GameState;
use super::tick::HeldKeys;
use crate::{angle_to, heading};

/// Advance every moving thing by one tick
pub fn step(state: &mut GameState, held: &HeldKeys) {
    move_player(state, held);
    state.storm.shrink();
    apply_storm_damage(state);
    move_enemies(state);
    move_bullets(state);
}

/// Apply held direction keys. Each axis moves only if the result stays inside
/// `[radius, dimension - radius]`; diagonals are deliberately not normalized.
pub fn move_player(state: &mut GameState, held: &HeldKeys) {
    let (width, height) = (state.width, state.height);
    let player = &mut state.player;
    let r = player.radius;

    let within = |v: f32, dim: f32| v >= r && v <= dim - r;

    if held.up && within(player.pos.y - player.speed, height) {
        player.pos.y -= player.speed;
    }
    if held.down && within(player.pos.y + player.speed, height) {
        player.pos.y += player.speed;
    }
    if held.left && within(player.pos.x - player.speed, width) {
        player.pos.x -= player.speed;
    }
    if held.right && within(player.pos.x + player.speed, width) {
        player.pos.x += player.speed;
    }
}

/// Chip damage while the player stands outside the storm
pub fn apply_storm_damage(state: &mut GameState) {
    if state.storm.is_outside(state.player.pos) {
        state.player.health -= state.tuning.storm_damage;
    }
}

/// Pure pursuit: every enemy re-aims at the player's current position
pub fn move_enemies(state: &mut GameState) {
    let target = state.player.pos;
    for enemy in &mut state.enemies {
        let dir = heading(angle_to(enemy.pos, target));
        enemy.pos += dir * enemy.speed;
    }
}

/// Ballistic motion, no drag
pub fn move_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos += bullet.vel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_state() -> GameState {
        GameState::new(800.0, 600.0, Tuning::without_spawns(), 1)
    }

    #[test]
    fn test_player_moves_per_key() {
        let mut state = quiet_state();
        let start = state.player.pos;
        move_player(
            &mut state,
            &HeldKeys {
                up: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos, start + Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_diagonal_is_unnormalized() {
        let mut state = quiet_state();
        let start = state.player.pos;
        move_player(
            &mut state,
            &HeldKeys {
                down: true,
                right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos, start + Vec2::new(5.0, 5.0));
    }

    #[test]
    fn test_player_stops_at_edge() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(22.0, 300.0);
        let left = HeldKeys {
            left: true,
            ..Default::default()
        };
        move_player(&mut state, &left);
        assert_eq!(state.player.pos.x, 22.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut state = quiet_state();
        let start = state.player.pos;
        let held = HeldKeys {
            up: true,
            down: true,
            left: true,
            right: true,
        };
        move_player(&mut state, &held);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn test_enemy_seeks_player() {
        let mut state = quiet_state();
        state.add_enemy(Vec2::new(100.0, 300.0));
        move_enemies(&mut state);
        let enemy = &state.enemies[0];
        assert!((enemy.pos.x - 102.0).abs() < 1e-4);
        assert!((enemy.pos.y - 300.0).abs() < 1e-4);
    }

    #[test]
    fn test_enemy_on_player_does_not_produce_nan() {
        let mut state = quiet_state();
        let pos = state.player.pos;
        state.add_enemy(pos);
        move_enemies(&mut state);
        assert!(state.enemies[0].pos.is_finite());
    }

    #[test]
    fn test_storm_damage_only_outside() {
        let mut state = quiet_state();
        apply_storm_damage(&mut state);
        assert_eq!(state.player.health, 100.0);

        state.storm.radius = 50.0;
        state.player.pos = Vec2::new(30.0, 30.0);
        apply_storm_damage(&mut state);
        assert!((state.player.health - 99.9).abs() < 1e-4);
    }

    #[test]
    fn test_bullets_travel_linearly() {
        let mut state = quiet_state();
        state.add_bullet(Vec2::new(10.0, 10.0), Vec2::new(3.0, -4.0));
        move_bullets(&mut state);
        move_bullets(&mut state);
        assert_eq!(state.bullets[0].pos, Vec2::new(16.0, 2.0));
    }
}
