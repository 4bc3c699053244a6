//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Timestamps come in as arguments, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (items sorted by ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod chase;
pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use autopilot::steer;
pub use collision::{enemy_catches_player, player_reaches_item};
pub use spawn::{respawn_after_pickup, spawn};
pub use state::{
    Enemy, FruitKind, GameEvent, GamePhase, GameState, Item, ItemKind, Player, SpawnKind,
};
pub use tick::{TickInput, advance};
