//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (creation order by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod debug;
pub mod economy;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::CollisionReport;
pub use debug::DebugCommand;
pub use economy::{build_wall, shoot};
pub use state::{
    Bullet, Enemy, GamePhase, GameState, HudStats, Player, Snapshot, Storm, Wall,
};
pub use tick::{HeldKeys, TickInput, TickReport, tick};
