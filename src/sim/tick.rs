//! Simulation tick
//!
//! One call advances the session by exactly one frame. Inputs arrive as a
//! polled snapshot so a run replays exactly from its seed and input list.

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::state::{GamePhase, GameState};
use super::{economy, physics, spawner};

/// Movement keys currently held (level-sensitive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub held: HeldKeys,
    /// Shots requested since the last tick, in click order
    pub shots: Vec<Vec2>,
    /// Wall builds requested since the last tick
    pub build_walls: u32,
}

impl TickInput {
    /// Drop the edge-triggered events once a tick has consumed them
    pub fn clear_events(&mut self) {
        self.shots.clear();
        self.build_walls = 0;
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    pub fired: u32,
    pub built: u32,
    pub collisions: CollisionReport,
    pub spawned: Option<u32>,
}

/// Advance the game state by one tick.
///
/// Does nothing once the session is over.
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();
    if state.is_over() {
        return report;
    }

    state.time_ticks += 1;

    // Edge-triggered actions recorded since the previous frame
    for &target in &input.shots {
        if economy::shoot(state, target).is_some() {
            report.fired += 1;
        }
    }
    for _ in 0..input.build_walls {
        if economy::build_wall(state) {
            report.built += 1;
        }
    }

    physics::step(state, &input.held);
    report.collisions = collision::resolve(state);
    report.spawned = spawner::maybe_spawn(state);

    if state.player.is_dead() {
        state.phase = GamePhase::Over;
        log::info!(
            "Game over at tick {}: score {}, {} enemies on field",
            state.time_ticks,
            state.player.score,
            state.enemies.len()
        );
    }

    report
}
