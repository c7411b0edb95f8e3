//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod flow;
pub mod speed;
pub mod state;
pub mod tick;
pub mod tween;

pub use collision::{is_hit, nearest_gap, shortest_between};
pub use flow::SceneFlow;
pub use speed::tick_speed;
pub use state::{
    BreakPiece, GameEvent, GameState, Knife, PieceKind, RoundState, Scene, ThrowPhase,
};
pub use tick::{TickInput, tick};
pub use tween::{Easing, Tween};
