use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::action::Direction;
use super::state::{Arena, Position};

/// Largest accepted screen side in pixels
pub const MAX_SCREEN_SIDE: i32 = 1 << 15;

/// Configuration for the game
///
/// All sizes are in screen pixels except `start_head`, which is in grid
/// units of `segment_size` pixels. Missing fields in a config file fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen width
    pub screen_width: i32,
    /// Logical screen height
    pub screen_height: i32,
    /// Side of one snake segment, also the grid unit
    pub segment_size: i32,
    /// Side of the food item
    pub food_size: i32,
    /// Thickness of the border walls
    pub wall_thickness: i32,

    /// Length of a freshly spawned snake
    pub initial_snake_length: usize,
    /// Head position of a freshly spawned snake; the body trails to the left
    pub start_head: Position,
    /// Body slots allocated for a freshly spawned snake
    pub initial_capacity: usize,
    /// Segments added per food eaten
    pub growth_per_food: usize,
    /// Slots added whenever the body buffer runs out of room
    pub capacity_increment: usize,

    /// Simulation ticks per second
    pub fps: u32,
    /// Longest name accepted on the high score screen
    pub max_name_length: usize,
    /// Minimum gap between two accepted keystrokes while typing a name
    pub keystroke_debounce_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 640,
            screen_height: 480,
            segment_size: 10,
            food_size: 10,
            wall_thickness: 10,
            initial_snake_length: 10,
            start_head: Position::new(22, 20),
            initial_capacity: 100,
            growth_per_food: 5,
            capacity_increment: 100,
            fps: 40,
            max_name_length: 19,
            keystroke_debounce_ms: 100,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom screen size
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {:?}", path))?;
        Ok(())
    }

    /// Time budget of one frame
    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }

    pub fn keystroke_debounce(&self) -> Duration {
        Duration::from_millis(self.keystroke_debounce_ms)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.screen_width > 0 && self.screen_height > 0,
            "screen size must be positive, got {}x{}",
            self.screen_width,
            self.screen_height
        );
        ensure!(self.segment_size > 0, "segment_size must be positive");
        ensure!(self.food_size > 0, "food_size must be positive");
        ensure!(self.wall_thickness > 0, "wall_thickness must be positive");
        ensure!(self.fps > 0, "fps must be positive");
        ensure!(
            self.screen_width <= MAX_SCREEN_SIDE && self.screen_height <= MAX_SCREEN_SIDE,
            "screen size {}x{} exceeds {} pixels per side",
            self.screen_width,
            self.screen_height,
            MAX_SCREEN_SIDE
        );
        ensure!(
            self.segment_size <= self.screen_width.min(self.screen_height)
                && self.food_size <= self.screen_width.min(self.screen_height),
            "segment_size and food_size must fit on the screen"
        );
        ensure!(
            self.wall_thickness <= self.screen_width.min(self.screen_height) / 2,
            "wall_thickness {} leaves no room inside the walls",
            self.wall_thickness
        );
        ensure!(
            self.initial_snake_length > 0,
            "initial_snake_length must be at least 1"
        );
        ensure!(
            self.initial_snake_length <= self.initial_capacity,
            "initial_snake_length {} exceeds initial_capacity {}",
            self.initial_snake_length,
            self.initial_capacity
        );
        ensure!(
            self.capacity_increment > 0,
            "capacity_increment must be positive"
        );

        let interior_w = self.screen_width - 2 * self.wall_thickness;
        let interior_h = self.screen_height - 2 * self.wall_thickness;
        ensure!(
            interior_w >= self.food_size && interior_h >= self.food_size,
            "interior {}x{} cannot hold food of size {}",
            interior_w,
            interior_h,
            self.food_size
        );

        // Keeps every starting segment, and its pixel rect, within i32
        let grid_w = self.screen_width / self.segment_size;
        let grid_h = self.screen_height / self.segment_size;
        ensure!(
            (0..grid_w).contains(&self.start_head.x) && (0..grid_h).contains(&self.start_head.y),
            "start_head {:?} is off the {}x{} grid",
            self.start_head,
            grid_w,
            grid_h
        );
        ensure!(
            self.initial_snake_length <= grid_w as usize,
            "initial_snake_length {} is wider than the screen",
            self.initial_snake_length
        );

        let arena = Arena::from_config(self);
        let (dx, dy) = Direction::Right.delta();
        for i in 0..self.initial_snake_length as i32 {
            let segment = self.start_head.moved_by(-dx * i, -dy * i);
            let rect = arena.segment_rect(segment);
            ensure!(
                arena.bounds().contains(&rect) && !arena.hits_wall(&rect),
                "starting snake segment {:?} is outside the interior",
                segment
            );
        }

        Ok(())
    }
}
