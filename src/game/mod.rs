//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The simulation works in screen pixels for collisions and in grid units for
//! snake movement; rendering only ever sees the rectangles handed out by
//! [`GameState::draw`].

pub mod action;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::{GameEngine, StepInfo, StepResult};
pub use geometry::Rect;
pub use state::{Arena, CollisionType, Food, GameState, Position, Snake, Sprite};
