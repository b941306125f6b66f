//! Player domain
//!
//! Содержит:
//! - Player marker + PlayerState (input, can_jump)
//! - PlayerConfig (константы движения)
//! - Player Controller (velocity controller + jump)
//! - Ground probe (ray test после advance)
//! - spawn_player

pub mod config;
pub mod controller;
pub mod ground;
pub mod player;
pub mod spawn;

pub use config::PlayerConfig;
pub use controller::{drive_player, step_controller, MoveBasis};
pub use ground::probe_ground;
pub use player::{Player, PlayerState};
pub use spawn::spawn_player;
