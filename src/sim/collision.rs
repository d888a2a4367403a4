//! Collision detection and damage resolution
//!
//! Exhaustive pairwise scans in a fixed order. Nothing is removed while a
//! collection is being scanned: IDs are marked first and compacted afterwards.

use super::state::GameState;
use crate::point_in_rect;

/// Totals produced by one resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CollisionReport {
    /// Health the player lost to enemy contact
    pub contact_damage: f32,
    /// Enemies killed by walls
    pub crushed: u32,
    /// Bullet-enemy hits (one bullet may hit several enemies)
    pub hits: u32,
    /// Enemies killed by bullets
    pub kills: u32,
    /// Bullets absorbed by walls
    pub blocked: u32,
    /// Bullets that left the field
    pub escaped: u32,
    /// Walls destroyed
    pub walls_lost: u32,
}

/// Run every collision check for this tick, in order
pub fn resolve(state: &mut GameState) -> CollisionReport {
    let mut report = CollisionReport::default();
    enemy_player(state, &mut report);
    enemy_wall(state);
    report.crushed = prune_enemies(state);
    bullets(state, &mut report);
    report.walls_lost = prune_walls(state);
    report
}

/// Every overlapping enemy bites the player independently
fn enemy_player(state: &mut GameState, report: &mut CollisionReport) {
    let player = &mut state.player;
    let damage = state.tuning.contact_damage;
    for enemy in &state.enemies {
        if enemy.overlaps(player.pos, player.radius) {
            player.health -= damage;
            report.contact_damage += damage;
        }
    }
}

/// Enemy centers inside a wall grind both down
fn enemy_wall(state: &mut GameState) {
    let damage = state.tuning.wall_contact_damage;
    for enemy in &mut state.enemies {
        for wall in &mut state.walls {
            if point_in_rect(enemy.pos, &wall.rect()) {
                enemy.health -= damage;
                wall.health -= damage;
            }
        }
    }
}

fn prune_enemies(state: &mut GameState) -> u32 {
    let before = state.enemies.len();
    state.enemies.retain(|e| e.is_alive());
    (before - state.enemies.len()) as u32
}

fn prune_walls(state: &mut GameState) -> u32 {
    let before = state.walls.len();
    state.walls.retain(|w| w.is_alive());
    (before - state.walls.len()) as u32
}

/// Bullet checks: enemies, then walls, then field bounds.
///
/// A bullet hits every living enemy it overlaps this tick. A bullet spent on
/// enemies skips the wall and bounds checks.
fn bullets(state: &mut GameState, report: &mut CollisionReport) {
    let tuning = &state.tuning;
    let mut spent: Vec<u32> = Vec::new();
    let mut killed: Vec<u32> = Vec::new();

    for bullet in &state.bullets {
        let mut hit_enemy = false;
        for enemy in state.enemies.iter_mut().filter(|e| e.is_alive()) {
            if !enemy.overlaps(bullet.pos, bullet.radius) {
                continue;
            }
            hit_enemy = true;
            report.hits += 1;
            enemy.health -= tuning.bullet_damage;
            state.player.score += tuning.hit_score;
            if !enemy.is_alive() {
                state.player.score += tuning.kill_bonus;
                report.kills += 1;
                killed.push(enemy.id);
                log::debug!("Bullet {} killed enemy {}", bullet.id, enemy.id);
            }
        }
        if hit_enemy {
            spent.push(bullet.id);
            continue;
        }

        let mut hit_wall = false;
        for wall in &mut state.walls {
            if point_in_rect(bullet.pos, &wall.rect()) {
                hit_wall = true;
                wall.health -= tuning.bullet_wall_damage;
            }
        }
        if hit_wall {
            report.blocked += 1;
            spent.push(bullet.id);
            continue;
        }

        if !state.in_field(bullet.pos) {
            report.escaped += 1;
            spent.push(bullet.id);
        }
    }

    if !killed.is_empty() {
        state.enemies.retain(|e| !killed.contains(&e.id));
    }
    if !spent.is_empty() {
        state.bullets.retain(|b| !spent.contains(&b.id));
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
    fn test_bullet_hit_wounds_enemy() {
        let mut state = quiet_state();
        state.add_enemy(Vec2::new(100.0, 100.0));
        state.add_bullet(Vec2::new(105.0, 100.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.hits, 1);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 30.0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.score, 10);
    }

    #[test]
    fn test_bullet_kill_awards_bonus() {
        let mut state = quiet_state();
        state.add_enemy(Vec2::new(100.0, 100.0));
        state.enemies[0].health = 20.0;
        state.add_bullet(Vec2::new(100.0, 110.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.kills, 1);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.score, 60);
    }

    #[test]
    fn test_one_bullet_hits_every_overlapping_enemy() {
        let mut state = quiet_state();
        state.add_enemy(Vec2::new(100.0, 100.0));
        state.add_enemy(Vec2::new(110.0, 100.0));
        state.add_bullet(Vec2::new(105.0, 100.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.hits, 2);
        assert!(state.enemies.iter().all(|e| e.health == 30.0));
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.score, 20);
    }

    #[test]
    fn test_two_bullets_one_enemy_second_skips_corpse() {
        let mut state = quiet_state();
        state.add_enemy(Vec2::new(100.0, 100.0));
        state.enemies[0].health = 20.0;
        state.add_bullet(Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.add_bullet(Vec2::new(101.0, 100.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.hits, 1);
        assert_eq!(report.kills, 1);
        assert_eq!(state.player.score, 60);
        // The second bullet found no living target and stays in flight
        assert_eq!(state.bullets.len(), 1);
    }

    #[test]
    fn test_enemy_contact_stacks() {
        let mut state = quiet_state();
        let pos = state.player.pos;
        state.add_enemy(pos + Vec2::new(10.0, 0.0));
        state.add_enemy(pos - Vec2::new(10.0, 0.0));
        state.add_enemy(pos + Vec2::new(200.0, 0.0));

        let report = resolve(&mut state);

        assert!((report.contact_damage - 1.0).abs() < 1e-6);
        assert!((state.player.health - 99.0).abs() < 1e-4);
        assert_eq!(state.enemies.len(), 3);
    }

    #[test]
    fn test_enemy_grinds_against_wall() {
        let mut state = quiet_state();
        state.add_wall(Vec2::new(100.0, 100.0));
        state.add_enemy(Vec2::new(120.0, 120.0));
        state.enemies[0].health = 10.0;

        let report = resolve(&mut state);

        assert_eq!(report.crushed, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.walls[0].health, 90.0);
    }

    #[test]
    fn test_bullet_absorbed_by_wall() {
        let mut state = quiet_state();
        state.add_wall(Vec2::new(100.0, 100.0));
        state.walls[0].health = 20.0;
        state.add_bullet(Vec2::new(120.0, 120.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.blocked, 1);
        assert_eq!(report.walls_lost, 1);
        assert!(state.bullets.is_empty());
        assert!(state.walls.is_empty());
        assert_eq!(state.player.score, 0);
    }

    #[test]
    fn test_bullet_spent_on_enemy_skips_wall() {
        let mut state = quiet_state();
        state.add_wall(Vec2::new(100.0, 100.0));
        state.add_enemy(Vec2::new(120.0, 120.0));
        state.add_bullet(Vec2::new(120.0, 120.0), Vec2::ZERO);

        let report = resolve(&mut state);

        // Only the enemy grinding against the wall costs the wall health
        assert_eq!(state.walls[0].health, 90.0);
        assert_eq!(state.enemies[0].health, 20.0);
        assert_eq!(report.hits, 1);
        assert_eq!(report.blocked, 0);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.score, 10);
    }

    #[test]
    fn test_bullet_damages_every_overlapping_wall() {
        let mut state = quiet_state();
        state.add_wall(Vec2::new(100.0, 100.0));
        state.add_wall(Vec2::new(110.0, 110.0));
        state.add_bullet(Vec2::new(120.0, 120.0), Vec2::ZERO);
        state.add_bullet(Vec2::new(400.0, 300.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert!(state.walls.iter().all(|w| w.health == 80.0));
        assert_eq!(report.blocked, 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.bullets[0].pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_escaped_bullet_has_no_side_effects() {
        let mut state = quiet_state();
        state.add_bullet(Vec2::new(-1.0, 300.0), Vec2::ZERO);
        state.add_bullet(Vec2::new(400.0, 300.0), Vec2::ZERO);

        let report = resolve(&mut state);

        assert_eq!(report.escaped, 1);
        assert_eq!(state.bullets.len(), 1);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn test_empty_world_is_fine() {
        let mut state = quiet_state();
        assert_eq!(resolve(&mut state), CollisionReport::default());
    }

    #[test]
    fn test_simultaneous_deaths() {
        let mut state = quiet_state();
        for i in 0..5 {
            state.add_enemy(Vec2::new(100.0 + i as f32 * 100.0, 100.0));
            state.enemies[i].health = 20.0;
            state.add_bullet(Vec2::new(100.0 + i as f32 * 100.0, 100.0), Vec2::ZERO);
        }

        let report = resolve(&mut state);

        assert_eq!(report.kills, 5);
        assert!(state.enemies.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.score, 300);
    }
}
