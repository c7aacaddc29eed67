use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{
    action::Direction,
    grid::{FreeCells, Grid},
};

/// A cell on the game grid, `(column, row)`, 0-indexed with rows growing downward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i32,
    pub row: i32,
}

impl Cell {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Move cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dcol, drow) = direction.delta();
        self.moved_by(dcol, drow)
    }

    /// True if the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.col - other.col).abs() + (self.row - other.row).abs() == 1
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: VecDeque<Cell>,
    /// Direction of the last head move
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake with its head at `head`, body trailing behind
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let back = direction.opposite();
        let mut body = VecDeque::with_capacity(length);
        let mut cell = head;
        for _ in 0..length {
            body.push_back(cell);
            cell = cell.moved_in_direction(back);
        }

        Self { body, direction }
    }

    /// Create a snake from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
        }
    }

    /// Get the head position
    ///
    /// # Panics
    ///
    /// Panics on an empty snake, which no engine ever produces.
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Body segments (excluding head)
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter().skip(1)
    }

    /// Check if position collides with snake body (excluding head)
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.segments().any(|&c| c == cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Push a new head, dropping the tail unless growing.
    /// Returns the vacated tail cell.
    pub fn advance_to(&mut self, new_head: Cell, grow: bool) -> Option<Cell> {
        if let Some(dir) = self
            .body
            .front()
            .and_then(|&head| Direction::between(head, new_head))
        {
            self.direction = dir;
        }
        let vacated = if grow { None } else { self.body.pop_back() };
        self.body.push_front(new_head);
        vacated
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.advance_to(new_head, should_grow);
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

/// Type of collision that occurred in the manual game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Logical state of the bot controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BotPhase {
    Running,
    /// The snake covers the board. Terminal.
    Complete,
}

/// Complete state of a bot game.
///
/// Only [`BotController`](super::BotController) writes it; everyone else
/// reads through the accessors or a [`Snapshot`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub(crate) snake: Snake,
    pub(crate) food: Option<Cell>,
    pub(crate) grid: Grid,
    pub(crate) score: u32,
    pub(crate) steps: u64,
    pub(crate) game_over: bool,
    pub(crate) victory: bool,
    pub(crate) free: FreeCells,
}

impl GameState {
    pub(crate) fn new(snake: Snake, grid: Grid) -> Self {
        let free = FreeCells::excluding(grid, snake.iter());
        Self {
            snake,
            food: None,
            grid,
            score: 0,
            steps: 0,
            game_over: false,
            victory: false,
            free,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Current food, absent once the board is full
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Always false for the bot, which cannot lose
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn victory(&self) -> bool {
        self.victory
    }

    pub fn phase(&self) -> BotPhase {
        if self.victory {
            BotPhase::Complete
        } else {
            BotPhase::Running
        }
    }

    /// Number of cells neither snake nor wall
    pub fn free_cells(&self) -> usize {
        self.free.len()
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.grid.contains(cell) && !self.free.is_free(cell)
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            rows: self.grid.rows,
            cols: self.grid.cols,
            snake: self.snake.iter().copied().collect(),
            heading: self.snake.direction,
            food: self.food,
            score: self.score,
            steps: self.steps,
            victory: self.victory,
        }
    }
}

/// Read-only view of a [`GameState`] handed to hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub rows: usize,
    pub cols: usize,
    /// Head first
    pub snake: Vec<Cell>,
    pub heading: Direction,
    pub food: Option<Cell>,
    pub score: u32,
    pub steps: u64,
    pub victory: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(-1, 0), Cell::new(4, 5));
        assert_eq!(cell.moved_by(0, 1), Cell::new(5, 6));
        assert_eq!(cell.moved_by(0, -1), Cell::new(5, 4));
    }

    #[test]
    fn test_cell_adjacency() {
        let cell = Cell::new(2, 2);
        assert!(cell.is_adjacent(Cell::new(2, 3)));
        assert!(cell.is_adjacent(Cell::new(1, 2)));
        assert!(!cell.is_adjacent(Cell::new(3, 3)));
        assert!(!cell.is_adjacent(cell));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.body[1], Cell::new(4, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_snake_movement() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        // Move without growing
        snake.move_snake(false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));

        // Move with growing
        snake.move_snake(true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
    }

    #[test]
    fn test_advance_tracks_heading_and_tail() {
        let mut snake = Snake::new(Cell::new(1, 1), Direction::Right, 2);
        let vacated = snake.advance_to(Cell::new(1, 2), false);
        assert_eq!(vacated, Some(Cell::new(0, 1)));
        assert_eq!(snake.direction, Direction::Down);

        // A non-adjacent jump keeps the previous heading
        assert_eq!(snake.advance_to(Cell::new(5, 5), true), None);
        assert_eq!(snake.direction, Direction::Down);
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert!(!snake.collides_with_body(Cell::new(5, 5))); // head
        assert!(snake.collides_with_body(Cell::new(4, 5))); // body
        assert!(!snake.collides_with_body(Cell::new(10, 10))); // empty
    }

    #[test]
    fn test_state_occupancy_and_snapshot() {
        let snake = Snake::new(Cell::new(2, 0), Direction::Right, 3);
        let state = GameState::new(snake, Grid::new(2, 4));

        assert_eq!(state.free_cells(), 5);
        assert!(state.is_occupied_by_snake(Cell::new(1, 0)));
        assert!(!state.is_occupied_by_snake(Cell::new(1, 1)));
        assert!(!state.is_occupied_by_snake(Cell::new(9, 9)));
        assert_eq!(state.phase(), BotPhase::Running);

        let snapshot = state.snapshot();
        assert_eq!(snapshot.snake.len(), 3);
        assert_eq!(snapshot.heading, Direction::Right);
        assert_eq!(snapshot.food, None);
        assert!(!snapshot.victory);
    }
}
