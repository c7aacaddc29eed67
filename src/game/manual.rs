use log::{debug, warn};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    grid::{FreeCells, Grid},
    state::{Cell, CollisionType, Snake},
};

/// State of a direction-driven game
#[derive(Debug, Clone, PartialEq)]
pub struct ManualState {
    pub snake: Snake,
    pub foods: Vec<Cell>,
    pub grid: Grid,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
    pub won: bool,
}

impl ManualState {
    pub fn is_finished(&self) -> bool {
        !self.is_alive || self.won
    }
}

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// Whether the win score was reached this step
    pub won: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// Rules of the player-steered variant: walls and the body are deadly,
/// several foods can be on the board, reaching the win score ends the game.
pub struct ManualEngine {
    config: GameConfig,
    rng: StdRng,
}

impl ManualEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> ManualState {
        let grid = Grid::new(self.config.rows, self.config.cols);
        let center_col = (self.config.cols / 2) as i32;
        let center_row = (self.config.rows / 2) as i32;

        let snake = Snake::new(
            Cell::new(center_col, center_row),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = ManualState {
            snake,
            foods: Vec::with_capacity(self.config.apple_count),
            grid,
            score: 0,
            steps: 0,
            is_alive: true,
            won: false,
        };
        for _ in 0..self.config.apple_count {
            if let Some(food) = self.spawn_food(&state) {
                state.foods.push(food);
            }
        }
        state
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut ManualState, action: Action) -> StepResult {
        if state.is_finished() {
            return StepResult {
                terminated: true,
                won: false,
                info: StepInfo {
                    ate_food: false,
                    collision_type: None,
                },
            };
        }

        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if state.snake.direction.is_opposite(new_direction) {
                warn!("Ignoring reverse turn to {:?}", new_direction);
            } else {
                state.snake.direction = new_direction;
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);
        state.steps += 1;

        if let Some(collision_type) = self.check_collision(state, new_head) {
            state.is_alive = false;
            debug!("Collision {:?} at {:?}", collision_type, new_head);

            return StepResult {
                terminated: true,
                won: false,
                info: StepInfo {
                    ate_food: false,
                    collision_type: Some(collision_type),
                },
            };
        }

        let eaten = state.foods.iter().position(|&food| food == new_head);
        state.snake.move_snake(eaten.is_some());

        if let Some(idx) = eaten {
            state.foods.swap_remove(idx);
            state.score += 1;
            if let Some(food) = self.spawn_food(state) {
                state.foods.push(food);
            }
            if state.score >= self.config.win_score {
                state.won = true;
            }
        }

        StepResult {
            terminated: state.won,
            won: state.won,
            info: StepInfo {
                ate_food: eaten.is_some(),
                collision_type: None,
            },
        }
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &ManualState, cell: Cell) -> Option<CollisionType> {
        if !state.grid.contains(cell) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(cell) {
            return Some(CollisionType::SelfCollision);
        }

        None
    }

    /// Spawn food at a random cell free of both snake and other food
    fn spawn_food(&mut self, state: &ManualState) -> Option<Cell> {
        let free = FreeCells::excluding(state.grid, state.snake.iter().chain(&state.foods));
        free.random(&mut self.rng)
    }
}
