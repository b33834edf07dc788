//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time driven, one `tick` per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod chase;
pub mod collision;
pub mod input;
pub mod player;
pub mod score;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use chase::Chaser;
pub use collision::{OnHit, Outcome, Policy, policy, resolve};
pub use input::{Direction, InputIntent};
pub use player::{BuffKind, EffectKind, Player, StatusEvent, StatusPhase};
pub use score::ScoreBoard;
pub use snapshot::SceneFrame;
pub use spawn::{Hit, Obstacle, ObstacleKind, Powerup, Spawner};
pub use state::{FlashState, GamePhase, GameState, SimConfig, World};
pub use tick::{FrameEvents, tick};
