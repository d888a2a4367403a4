//! Game state and core simulation types
//!
//! Everything the tick mutates lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::STORM_START_FRACTION;
use crate::tuning::Tuning;
use crate::{Rect, distance};

/// Session lifecycle. `Over` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Over,
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
    pub coins: u32,
    pub score: u64,
}

impl Player {
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

/// An enemy that seeks the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub health: f32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// Circle overlap test against another circle
    pub fn overlaps(&self, pos: Vec2, radius: f32) -> bool {
        distance(self.pos, pos) < self.radius + radius
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// A player-built barrier (axis-aligned, `pos` is the top-left corner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: f32,
}

impl Wall {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// The shrinking safe zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Storm {
    pub center: Vec2,
    pub radius: f32,
    pub shrink_rate: f32,
    pub min_radius: f32,
}

impl Storm {
    /// Shrink by one tick, never below the floor
    pub fn shrink(&mut self) {
        self.radius = (self.radius - self.shrink_rate.max(0.0)).max(self.min_radius);
    }

    /// True if `pos` is strictly outside the safe radius
    pub fn is_outside(&self, pos: Vec2) -> bool {
        distance(pos, self.center) > self.radius
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Play-field width (pixels)
    pub width: f32,
    /// Play-field height (pixels)
    pub height: f32,
    /// Balance values this run was started with
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Bullets in fire order
    pub bullets: Vec<Bullet>,
    /// Walls in build order
    pub walls: Vec<Wall>,
    pub storm: Storm,
    /// Spawner RNG
    pub(crate) rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session for a field of the given size
    pub fn new(width: f32, height: f32, tuning: Tuning, seed: u64) -> Self {
        let center = Vec2::new(width / 2.0, height / 2.0);
        let player = Player {
            pos: center,
            radius: tuning.player_radius,
            speed: tuning.player_speed,
            health: tuning.player_health,
            coins: tuning.player_coins,
            score: 0,
        };
        let storm = Storm {
            center,
            radius: (width.min(height) * STORM_START_FRACTION).max(tuning.storm_min_radius),
            shrink_rate: tuning.storm_shrink_rate,
            min_radius: tuning.storm_min_radius,
        };

        log::info!("New session {}x{} with seed {}", width, height, seed);

        Self {
            seed,
            width,
            height,
            tuning,
            phase: GamePhase::Running,
            time_ticks: 0,
            player,
            enemies: Vec::new(),
            bullets: Vec::new(),
            walls: Vec::new(),
            storm,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Over
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// True if `pos` lies within the field rectangle (edges included)
    pub fn in_field(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Insert an enemy with full health at `pos`
    pub fn add_enemy(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy {
            id,
            pos,
            radius: self.tuning.enemy_radius,
            speed: self.tuning.enemy_speed,
            health: self.tuning.enemy_health,
        });
        id
    }

    /// Insert a bullet at `pos` moving with `vel`
    pub fn add_bullet(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet {
            id,
            pos,
            vel,
            radius: self.tuning.bullet_radius,
        });
        id
    }

    /// Insert a full-health wall with its top-left corner at `pos`
    pub fn add_wall(&mut self, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.walls.push(Wall {
            id,
            pos,
            size: Vec2::new(self.tuning.wall_width, self.tuning.wall_height),
            health: self.tuning.wall_health,
        });
        id
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            width: self.width,
            height: self.height,
            phase: self.phase,
            player: &self.player,
            enemies: &self.enemies,
            bullets: &self.bullets,
            walls: &self.walls,
            storm: &self.storm,
        }
    }

    /// Plain values for the HUD
    pub fn hud(&self) -> HudStats {
        HudStats {
            health: self.player.health,
            coins: self.player.coins,
            score: self.player.score,
            enemies: self.enemies.len(),
            tick: self.time_ticks,
            over: self.is_over(),
        }
    }
}

/// Borrowed view of everything a renderer needs for one frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub walls: &'a [Wall],
    pub storm: &'a Storm,
}

/// Values shown in the HUD after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub health: f32,
    pub coins: u32,
    pub score: u64,
    pub enemies: usize,
    pub tick: u64,
    pub over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(800.0, 600.0, Tuning::default(), 7);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.player.health, 100.0);
        assert_eq!(state.player.coins, 0);
        assert_eq!(state.storm.center, state.player.pos);
        assert!((state.storm.radius - 480.0).abs() < 1e-4);
        assert!(state.enemies.is_empty() && state.bullets.is_empty() && state.walls.is_empty());
    }

    #[test]
    fn test_entity_ids_are_unique() {
        let mut state = GameState::new(800.0, 600.0, Tuning::default(), 7);
        let a = state.add_enemy(Vec2::ZERO);
        let b = state.add_bullet(Vec2::ZERO, Vec2::X);
        let c = state.add_wall(Vec2::ZERO);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_storm_floor() {
        let mut storm = Storm {
            center: Vec2::ZERO,
            radius: 50.01,
            shrink_rate: 0.02,
            min_radius: 50.0,
        };
        storm.shrink();
        assert_eq!(storm.radius, 50.0);
        storm.shrink();
        assert_eq!(storm.radius, 50.0);
    }

    #[test]
    fn test_hud_reflects_player() {
        let mut state = GameState::new(800.0, 600.0, Tuning::default(), 7);
        state.player.coins = 30;
        state.player.score = 120;
        let hud = state.hud();
        assert_eq!(hud.coins, 30);
        assert_eq!(hud.score, 120);
        assert!(!hud.over);
    }
}
