use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Action,
    config::GameConfig,
    state::{Arena, CollisionType, Food, GameState, Position, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Body slots allocated this step
    pub capacity_added: usize,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the run ended and the snake was respawned
    pub run_ended: bool,
    /// Snake length at the end of the step, before any respawn
    pub final_length: usize,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the initial game state: starting snake, walls and a first food item
    pub fn reset(&mut self) -> Result<GameState> {
        self.config.validate()?;
        let arena = Arena::from_config(&self.config);
        let snake = Snake::spawn(&self.config).context("Failed to spawn snake")?;
        let food = self.place_food(&arena);

        Ok(GameState::new(snake, food, arena))
    }

    /// Execute one tick of the game
    ///
    /// Steers, moves the snake one grid unit, then resolves food, wall and
    /// self collisions in that order. A wall or self collision respawns the
    /// snake in its starting configuration. Failing to grow the body buffer
    /// is fatal and returned as an error.
    pub fn step(&mut self, state: &mut GameState, action: Action) -> Result<StepResult> {
        if let Action::Move(direction) = action {
            state.snake.direction = direction;
        }

        state.snake.translate();
        state.ticks += 1;

        let mut info = StepInfo {
            ate_food: false,
            capacity_added: 0,
            collision_type: None,
        };

        if state.head_on_food() {
            info.capacity_added = state
                .snake
                .grow(self.config.growth_per_food, self.config.capacity_increment)
                .context("Snake body growth failed")?;
            if info.capacity_added > 0 {
                debug!(
                    "Grew snake body buffer by {} slots to {}",
                    info.capacity_added,
                    state.snake.capacity()
                );
            }

            state.food = self.place_food(&state.arena);
            info.ate_food = true;
            debug!(
                "Food eaten, length {}, next food at {:?}",
                state.snake.len(),
                state.food.position
            );
        }

        info.collision_type = self.check_collision(state);
        let final_length = state.snake.len();

        if let Some(collision) = info.collision_type {
            info!(
                "Run ended by {:?} at length {} after {} ticks",
                collision, final_length, state.ticks
            );
            state.snake = Snake::spawn(&self.config).context("Failed to respawn snake")?;
            state.runs += 1;
        }

        Ok(StepResult {
            run_ended: info.collision_type.is_some(),
            final_length,
            info,
        })
    }

    /// Check whether the head is in a wall or in the body
    fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        if state.head_hits_wall() {
            return Some(CollisionType::Wall);
        }

        if state.head_hits_body() {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food uniformly inside the walls
    fn place_food(&mut self, arena: &Arena) -> Food {
        let (xs, ys) = arena.food_range();
        let x = self.rng.gen_range(xs);
        let y = self.rng.gen_range(ys);
        Food::new(Position::new(x, y), arena.food_size)
    }
}
