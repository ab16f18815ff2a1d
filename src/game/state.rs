use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use super::action::Direction;
use super::config::GameConfig;
use super::geometry::Rect;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
///
/// Segments live in one contiguous buffer of `capacity` slots, of which the
/// first `len` form the body, head at index 0. The buffer only grows, in
/// fixed increments, and is dropped as a whole when the snake is respawned.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    segments: Vec<Position>,
    len: usize,
    capacity: usize,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` segments in a straight line behind `head`
    pub fn new(head: Position, direction: Direction, length: usize, capacity: usize) -> Result<Self> {
        ensure!(length > 0, "a snake needs at least one segment");
        ensure!(
            length <= capacity,
            "snake length {} exceeds capacity {}",
            length,
            capacity
        );

        let mut segments = Vec::new();
        segments
            .try_reserve_exact(capacity)
            .with_context(|| format!("Failed to allocate {} body segments", capacity))?;

        let (back_dx, back_dy) = direction.reversed().delta();
        let mut segment = head;
        for _ in 0..length {
            segments.push(segment);
            segment = segment.moved_by(back_dx, back_dy);
        }

        let tail = segments[length - 1];
        segments.resize(capacity, tail);

        Ok(Self {
            segments,
            len: length,
            capacity,
            direction,
        })
    }

    /// Create the starting snake described by the config
    pub fn spawn(config: &GameConfig) -> Result<Self> {
        Self::new(
            config.start_head,
            Direction::Right,
            config.initial_snake_length,
            config.initial_capacity,
        )
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.segments[self.len - 1]
    }

    /// All segments, head first
    pub fn body(&self) -> &[Position] {
        &self.segments[..self.len]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.segments[1..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of allocated body slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Advance one grid unit: every segment takes its predecessor's place,
    /// then the head steps in the current direction.
    pub fn translate(&mut self) {
        let head = self.head();
        self.segments.copy_within(0..self.len - 1, 1);
        self.segments[0] = head.moved_in_direction(self.direction);
    }

    /// Lengthen the snake by `amount` segments stacked on the tail, adding
    /// `increment` slots at a time until the buffer has room.
    ///
    /// Returns the number of slots added. The snake is unchanged on error.
    pub fn grow(&mut self, amount: usize, increment: usize) -> Result<usize> {
        ensure!(increment > 0, "capacity increment must be positive");

        let needed = self
            .len
            .checked_add(amount)
            .context("Snake length overflow")?;
        let mut new_capacity = self.capacity;
        while needed > new_capacity {
            new_capacity = new_capacity
                .checked_add(increment)
                .context("Snake body capacity overflow")?;
        }

        let tail = self.tail();
        let added = new_capacity - self.capacity;
        if added > 0 {
            self.segments
                .try_reserve_exact(added)
                .with_context(|| format!("Failed to grow snake body to {} segments", new_capacity))?;
            self.segments.resize(new_capacity, tail);
            self.capacity = new_capacity;
        }

        self.segments[self.len..needed].fill(tail);
        self.len = needed;

        Ok(added)
    }
}

/// The food item, positioned freely in pixels rather than on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    /// Top-left corner in pixels
    pub position: Position,
    pub size: i32,
}

impl Food {
    pub fn new(position: Position, size: i32) -> Self {
        Self { position, size }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.position.x, self.position.y, self.size)
    }
}

/// Play field geometry: screen size, grid unit and the four border walls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    pub width: i32,
    pub height: i32,
    pub segment_size: i32,
    pub food_size: i32,
    pub wall_thickness: i32,
    walls: [Rect; 4],
}

impl Arena {
    pub fn from_config(config: &GameConfig) -> Self {
        let (w, h, t) = (
            config.screen_width,
            config.screen_height,
            config.wall_thickness,
        );

        let walls = [
            // top, bottom, left, right
            Rect::new(0, 0, w, t),
            Rect::new(0, h - t, w, t),
            Rect::new(0, t, t, h - 2 * t),
            Rect::new(w - t, t, t, h - 2 * t),
        ];

        Self {
            width: w,
            height: h,
            segment_size: config.segment_size,
            food_size: config.food_size,
            wall_thickness: t,
            walls,
        }
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// The whole screen
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// The screen minus the wall border
    pub fn interior(&self) -> Rect {
        let t = self.wall_thickness;
        Rect::new(t, t, self.width - 2 * t, self.height - 2 * t)
    }

    /// Pixel rectangle covered by a grid position
    pub fn segment_rect(&self, pos: Position) -> Rect {
        Rect::square(
            pos.x * self.segment_size,
            pos.y * self.segment_size,
            self.segment_size,
        )
    }

    pub fn hits_wall(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|wall| wall.intersects(rect))
    }

    /// Valid top-left corners for a food item fully inside the interior
    pub fn food_range(&self) -> (RangeInclusive<i32>, RangeInclusive<i32>) {
        let interior = self.interior();
        (
            interior.x..=interior.right() - self.food_size,
            interior.y..=interior.bottom() - self.food_size,
        )
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What a rectangle handed to the draw callback represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    SnakeSegment,
    Food,
    Wall,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub arena: Arena,
    /// Simulation steps taken this session
    pub ticks: u64,
    /// Runs ended by a collision this session
    pub runs: u32,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Food, arena: Arena) -> Self {
        Self {
            snake,
            food,
            arena,
            ticks: 0,
            runs: 0,
        }
    }

    /// Score shown to the player: the snake's length
    pub fn score(&self) -> usize {
        self.snake.len()
    }

    pub fn head_rect(&self) -> Rect {
        self.arena.segment_rect(self.snake.head())
    }

    pub fn head_on_food(&self) -> bool {
        self.head_rect().intersects(&self.food.rect())
    }

    pub fn head_hits_wall(&self) -> bool {
        self.arena.hits_wall(&self.head_rect())
    }

    /// True if the head overlaps any other segment
    pub fn head_hits_body(&self) -> bool {
        let head = self.head_rect();
        self.snake
            .body_segments()
            .iter()
            .any(|&segment| self.arena.segment_rect(segment).intersects(&head))
    }

    /// Hand every visible rectangle to `paint`: snake, then food, then walls
    pub fn draw<F: FnMut(Rect, Sprite)>(&self, mut paint: F) {
        for &segment in self.snake.body() {
            paint(self.arena.segment_rect(segment), Sprite::SnakeSegment);
        }
        paint(self.food.rect(), Sprite::Food);
        for &wall in self.arena.walls() {
            paint(wall, Sprite::Wall);
        }
    }
}
