use std::collections::HashSet;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    cycle::Cycle,
    error::{GameError, Result},
    state::{Cell, GameState, Snake},
};

/// Information about a bot step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the board is full after this step
    pub completed: bool,
}

/// Drives the snake around a fixed Hamiltonian cycle until it fills the board.
///
/// The head only ever moves to `cycle.next(head)`, and the body is kept as a
/// contiguous run of the cycle behind it. The cell ahead of the head is then
/// either free or the tail that is about to move, so no collision check is
/// needed.
pub struct BotController {
    config: GameConfig,
    cycle: Cycle,
    rng: StdRng,
}

impl BotController {
    /// Create a controller for the configured grid and tour shape
    pub fn new(config: GameConfig) -> Result<Self> {
        let cycle = Cycle::with_shape(config.cycle_shape, config.rows, config.cols)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self { config, cycle, rng })
    }

    pub fn cycle(&self) -> &Cycle {
        &self.cycle
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game with the configured seed length at the start of the tour
    pub fn reset_default(&mut self) -> Result<GameState> {
        let seed = self.cycle.seed(self.config.initial_snake_length);
        self.reset(self.config.rows, self.config.cols, &seed)
    }

    /// Start a new game on a `rows`×`cols` board with `initial_snake` (head
    /// first). The cycle is rebuilt if the dimensions changed.
    pub fn reset(&mut self, rows: usize, cols: usize, initial_snake: &[Cell]) -> Result<GameState> {
        let rebuilt = if (rows, cols) != (self.cycle.rows(), self.cycle.cols()) {
            Some(Cycle::with_shape(self.config.cycle_shape, rows, cols)?)
        } else {
            None
        };
        let cycle = rebuilt.as_ref().unwrap_or(&self.cycle);
        validate_seed(cycle, initial_snake)?;

        let heading = match initial_snake {
            [head, neck, ..] => Direction::between(*neck, *head),
            [head] => Direction::between(cycle.prev(*head), *head),
            [] => None,
        }
        .unwrap_or(Direction::Down);

        let snake = Snake::from_cells(initial_snake.iter().copied(), heading);
        let mut state = GameState::new(snake, cycle.grid());

        // Nothing below can fail, so the controller only moves to the new grid here
        if let Some(cycle) = rebuilt {
            self.cycle = cycle;
            self.config.rows = rows;
            self.config.cols = cols;
        }
        state.food = Some(self.random_food(&state)?);

        info!(
            "Reset {}x{} board, snake length {}, food at {:?}",
            rows,
            cols,
            state.snake.len(),
            state.food
        );
        Ok(state)
    }

    /// A cell chosen uniformly among those not covered by the snake
    pub fn random_food(&mut self, state: &GameState) -> Result<Cell> {
        state.free.random(&mut self.rng).ok_or(GameError::BoardFull)
    }

    /// Advance one tick along the cycle. No-op once the board is full.
    pub fn step(&mut self, state: &mut GameState) -> StepInfo {
        if state.victory {
            return StepInfo {
                ate_food: false,
                completed: true,
            };
        }

        let new_head = self.cycle.next(state.snake.head());
        let ate_food = state.food == Some(new_head);

        if let Some(tail) = state.snake.advance_to(new_head, ate_food) {
            state.free.vacate(tail);
        }
        state.free.occupy(new_head);
        state.steps += 1;

        if ate_food {
            state.score += 1;
            if state.snake.len() == state.grid.cell_count() {
                state.victory = true;
                state.food = None;
                info!(
                    "Board filled after {} steps, score {}",
                    state.steps, state.score
                );
            } else {
                // The snake cannot cover the board here, so a free cell exists
                state.food = state.free.random(&mut self.rng);
                debug!(
                    "Ate food at {:?}, length {}, next food {:?}",
                    new_head,
                    state.snake.len(),
                    state.food
                );
            }
        }

        StepInfo {
            ate_food,
            completed: state.victory,
        }
    }

    /// Check every structural invariant of `state` against this controller's cycle
    pub fn verify(&self, state: &GameState) -> Result<()> {
        let inconsistent = |reason: String| Err(GameError::Inconsistent(reason));

        if state.grid != self.cycle.grid() {
            return inconsistent(format!(
                "state is on a {}x{} board but the cycle covers {}x{}",
                state.grid.rows,
                state.grid.cols,
                self.cycle.rows(),
                self.cycle.cols()
            ));
        }

        let snake = &state.snake;
        if snake.is_empty() {
            return inconsistent("snake is empty".to_string());
        }
        if snake.len() > self.cycle.len() {
            return inconsistent(format!("snake length {} exceeds board", snake.len()));
        }

        let mut seen = HashSet::with_capacity(snake.len());
        for &cell in snake.iter() {
            if !state.grid.contains(cell) {
                return inconsistent(format!("{:?} is off the board", cell));
            }
            if !seen.insert(cell) {
                return inconsistent(format!("{:?} appears twice in the snake", cell));
            }
        }

        let body: Vec<Cell> = snake.iter().copied().collect();
        for pair in body.windows(2) {
            if self.cycle.next(pair[1]) != pair[0] {
                return inconsistent(format!(
                    "{:?} does not follow {:?} on the cycle",
                    pair[0], pair[1]
                ));
            }
        }

        if !self.free_set_matches(state) {
            return inconsistent("free-cell set out of sync with snake".to_string());
        }

        match state.food {
            Some(food) if snake.contains(food) => {
                inconsistent(format!("food {:?} is under the snake", food))
            }
            Some(_) if state.victory => inconsistent("food present after victory".to_string()),
            None if !state.victory => inconsistent("no food while running".to_string()),
            _ => Ok(()),
        }
    }

    fn free_set_matches(&self, state: &GameState) -> bool {
        let free: HashSet<Cell> = state.free.iter().collect();
        state.free.len() + state.snake.len() == state.grid.cell_count()
            && state.grid.cells().all(|cell| free.contains(&cell) != state.snake.contains(cell))
    }
}

/// A seed must be a non-empty, head-first run of the cycle that leaves room for food
fn validate_seed(cycle: &Cycle, cells: &[Cell]) -> Result<()> {
    let invalid = |reason: String| Err(GameError::InvalidInitialState(reason));

    if cells.is_empty() {
        return invalid("snake is empty".to_string());
    }
    if cells.len() >= cycle.len() {
        return invalid(format!(
            "length {} leaves no free cell on a {}-cell board",
            cells.len(),
            cycle.len()
        ));
    }

    let mut seen = HashSet::with_capacity(cells.len());
    for &cell in cells {
        if !cycle.grid().contains(cell) {
            return invalid(format!("{:?} is off the board", cell));
        }
        if !seen.insert(cell) {
            return invalid(format!("{:?} appears twice", cell));
        }
    }

    for pair in cells.windows(2) {
        if cycle.next(pair[1]) != pair[0] {
            return invalid(format!(
                "{:?} is not the cycle successor of {:?}",
                pair[0], pair[1]
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::cycle::CycleShape;

    fn controller(rows: usize, cols: usize, seed: u64) -> BotController {
        BotController::new(GameConfig::new(rows, cols).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_reset() {
        let mut bot = controller(10, 10, 1);
        let state = bot.reset_default().unwrap();

        assert_eq!(state.score(), 0);
        assert_eq!(state.steps(), 0);
        assert_eq!(state.snake().len(), 3);
        assert_eq!(state.snake().head(), Cell::new(0, 2));
        assert_eq!(state.snake().direction, Direction::Down);
        assert!(!state.victory());
        assert!(!state.game_over());
        assert!(bot.verify(&state).is_ok());
    }

    #[test]
    fn test_reset_rejects_tail_first_seed() {
        let mut bot = controller(10, 10, 1);
        let seed = [Cell::new(0, 0), Cell::new(0, 1), Cell::new(0, 2)];
        assert!(matches!(
            bot.reset(10, 10, &seed),
            Err(GameError::InvalidInitialState(_))
        ));
    }

    #[test]
    fn test_reset_rejects_bad_seeds() {
        let mut bot = controller(4, 4, 1);
        let bad: [&[Cell]; 4] = [
            &[],
            &[Cell::new(0, 1), Cell::new(0, 1)],
            &[Cell::new(0, 4)],
            &[Cell::new(0, 2), Cell::new(0, 0)],
        ];
        for seed in bad {
            assert!(
                matches!(bot.reset(4, 4, seed), Err(GameError::InvalidInitialState(_))),
                "accepted {seed:?}"
            );
        }

        let full = bot.cycle().seed(16);
        assert!(matches!(
            bot.reset(4, 4, &full),
            Err(GameError::InvalidInitialState(_))
        ));
    }

    #[test]
    fn test_reset_rebuilds_cycle_for_new_grid() {
        let mut bot = controller(4, 4, 1);
        let seed = [Cell::new(0, 1), Cell::new(0, 0)];
        let state = bot.reset(6, 8, &seed).unwrap();

        assert_eq!(bot.cycle().len(), 48);
        assert_eq!(state.grid().cell_count(), 48);
        assert!(matches!(
            bot.reset(5, 5, &seed),
            Err(GameError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_failed_reset_keeps_current_grid() {
        let mut bot = controller(10, 10, 1);
        let mut state = bot.reset_default().unwrap();
        for _ in 0..30 {
            bot.step(&mut state);
        }

        // Tail-first seed on a new 4x4 board
        let bad = [Cell::new(0, 0), Cell::new(0, 1)];
        assert!(matches!(
            bot.reset(4, 4, &bad),
            Err(GameError::InvalidInitialState(_))
        ));
        assert_eq!((bot.cycle().rows(), bot.cycle().cols()), (10, 10));
        assert_eq!((bot.config().rows, bot.config().cols), (10, 10));

        for _ in 0..30 {
            bot.step(&mut state);
            assert!(bot.verify(&state).is_ok());
        }
    }

    #[test]
    fn test_verify_rejects_state_from_other_grid() {
        let mut small = controller(4, 4, 1);
        let state = small.reset_default().unwrap();
        let large = controller(10, 10, 1);

        assert!(matches!(
            large.verify(&state),
            Err(GameError::Inconsistent(_))
        ));
    }

    #[test]
    fn test_step_counter_passes_u32_range() {
        let mut bot = controller(10, 10, 1);
        let mut state = bot.reset_default().unwrap();
        state.steps = u64::from(u32::MAX);

        bot.step(&mut state);

        assert_eq!(state.steps(), u64::from(u32::MAX) + 1);
        assert_eq!(state.snapshot().steps, u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_step_follows_cycle() {
        let mut bot = controller(4, 4, 9);
        let mut state = bot.reset_default().unwrap();

        for _ in 0..20 {
            let head = state.snake().head();
            let len = state.snake().len();
            let info = bot.step(&mut state);

            assert_eq!(state.snake().head(), bot.cycle().next(head));
            if info.ate_food {
                assert_eq!(state.snake().len(), len + 1);
            } else {
                assert_eq!(state.snake().len(), len);
            }
            if info.completed {
                break;
            }
        }
    }

    #[test]
    fn test_food_directly_ahead_is_eaten() {
        let mut bot = controller(4, 4, 3);
        let mut state = bot.reset_default().unwrap();
        let ahead = bot.cycle().next(state.snake().head());
        state.food = Some(ahead);

        let info = bot.step(&mut state);

        assert!(info.ate_food);
        assert_eq!(state.score(), 1);
        assert_eq!(state.snake().len(), 4);
        assert_ne!(state.food(), Some(ahead));
        assert!(bot.verify(&state).is_ok());
    }

    #[test]
    fn test_last_free_cell_gets_the_food() {
        let mut bot = controller(2, 2, 5);
        let seed = bot.cycle().seed(3);
        let state = bot.reset(2, 2, &seed).unwrap();
        let last = bot.cycle().order()[3];

        assert_eq!(state.food(), Some(last));
        for _ in 0..5 {
            assert_eq!(bot.random_food(&state).unwrap(), last);
        }
    }

    #[test]
    fn test_completion_is_terminal() {
        let mut bot = controller(2, 2, 5);
        let seed = bot.cycle().seed(3);
        let mut state = bot.reset(2, 2, &seed).unwrap();

        let info = bot.step(&mut state);
        assert!(info.ate_food);
        assert!(info.completed);
        assert!(state.victory());
        assert_eq!(state.food(), None);
        assert_eq!(state.free_cells(), 0);
        assert!(matches!(bot.random_food(&state), Err(GameError::BoardFull)));

        let frozen = state.clone();
        let info = bot.step(&mut state);
        assert!(info.completed);
        assert!(!info.ate_food);
        assert_eq!(state, frozen);
    }

    #[test]
    fn test_serpentine_shape_also_completes() {
        let config = GameConfig {
            cycle_shape: CycleShape::Serpentine,
            ..GameConfig::new(4, 6).with_seed(11)
        };
        let mut bot = BotController::new(config).unwrap();
        let mut state = bot.reset_default().unwrap();

        for _ in 0..24 * 24 {
            bot.step(&mut state);
            assert!(bot.verify(&state).is_ok());
        }
        assert!(state.victory());
        assert_eq!(state.snake().len(), 24);
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let run = |seed| {
            let mut bot = controller(6, 6, seed);
            let mut state = bot.reset_default().unwrap();
            for _ in 0..50 {
                bot.step(&mut state);
            }
            state.snapshot()
        };
        assert_eq!(run(21), run(21));
    }
}
