//! Player actions: shooting and coin-gated wall building

use glam::Vec2;

use super::state::GameState;
use crate::{angle_to, heading};

/// Fire a bullet from the player toward `target`.
///
/// Returns the bullet ID, or `None` once the session is over.
pub fn shoot(state: &mut GameState, target: Vec2) -> Option<u32> {
    if state.is_over() {
        return None;
    }
    let origin = state.player.pos;
    let vel = heading(angle_to(origin, target)) * state.tuning.bullet_speed;
    Some(state.add_bullet(origin, vel))
}

/// Spend coins on a wall beside the player.
///
/// Returns `false` (leaving everything untouched) when the player cannot
/// afford it or the session is over.
pub fn build_wall(state: &mut GameState) -> bool {
    let cost = state.tuning.wall_cost;
    if state.is_over() || state.player.coins < cost {
        return false;
    }
    state.player.coins -= cost;
    let pos = state.player.pos + Vec2::new(state.tuning.wall_offset_x, 0.0);
    let id = state.add_wall(pos);
    log::info!(
        "Built wall {} at ({:.0}, {:.0}), {} coins left",
        id,
        pos.x,
        pos.y,
        state.player.coins
    );
    true
}
