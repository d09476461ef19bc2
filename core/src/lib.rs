//! Minesweeper Rules Engine
//!
//! This library implements the rules of minesweeper: board representation,
//! first-click-safe mine placement, flood-fill and chord reveals, win
//! detection, and a session type that ties them together behind a small
//! action API. It does no rendering and no I/O; frontends drive a
//! [`GameSession`] and present its snapshots and events however they like.
//!
//! ## Usage
//!
//! ```rust
//! use minesweeper_core::{GameConfig, GameSession, GameState, Pos};
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 7);
//!
//! // Mines are placed on the first reveal, never on or next to it.
//! let first = session.reveal(Pos { row: 4, col: 4 });
//! assert!(!first.hit_mine);
//! assert!(!first.changed.is_empty());
//! assert_ne!(session.state(), GameState::Lost);
//!
//! // Revealing the same cell again is a silent no-op.
//! assert!(session.reveal(Pos { row: 4, col: 4 }).changed.is_empty());
//! ```
//!
//! The free functions in [`place`], [`reveal`], [`win`] and [`cluster`] work
//! on a bare [`Board`] for callers that manage game flow themselves.

pub mod board;
pub mod cluster;
pub mod grid;
pub mod place;
pub mod reveal;
pub mod session;
pub mod win;

pub use board::{Board, Cell};
pub use cluster::cluster_by_value;
pub use place::{place_mines_at, place_mines_first_safe};
pub use reveal::{RevealResult, chord_from, expose_mines, reveal_from, toggle_flag};
pub use session::GameSession;
pub use win::is_won;

// Re-export common types for convenience
pub use minesweeper_common::{events::*, models::*};
