//! Debug commands
//!
//! Kept apart from [`super::TickInput`] so no normal gameplay input can reach
//! them. Hosts decide whether to expose these at all.

use serde::{Deserialize, Serialize};

use super::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebugCommand {
    /// Add coins to the player's balance
    GrantCoins(u32),
}

impl DebugCommand {
    /// The standard coin grant from tuning
    pub fn grant_default(state: &GameState) -> Self {
        DebugCommand::GrantCoins(state.tuning.debug_coin_grant)
    }
}

/// Apply a debug command between ticks. Ignored once the session is over.
pub fn apply(state: &mut GameState, command: DebugCommand) {
    if state.is_over() {
        return;
    }
    match command {
        DebugCommand::GrantCoins(amount) => {
            state.player.coins = state.player.coins.saturating_add(amount);
            log::info!("Debug: granted {} coins ({} total)", amount, state.player.coins);
        }
    }
}
