//! Arcade Snake - the classic walled-arena Snake game for the terminal
//!
//! This library provides:
//! - Core game logic (game module): movement, collisions, growth, food
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The frame loop and its Playing / NameEntry modes (modes module)
//! - Session statistics and the in-memory leaderboard (metrics module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
