//! Paddle-ball simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - One step per animation frame, velocities in units per frame
//! - Seeded RNG only
//! - No rendering, timers or DOM access

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{PaddleHit, bounce_walls, collide_paddle, out_of_play, touches_paddle};
pub use input::{InputArbiter, InputMode, TouchAssignment, TouchId};
pub use state::{Ball, GameConfig, GamePhase, GameRng, GameState, Paddle, Playfield, Score, Side};
pub use tick::{GameEvent, tick};
