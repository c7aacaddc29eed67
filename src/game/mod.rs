//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or timing
//! dependencies. The bot follows a Hamiltonian cycle and cannot lose; the
//! manual engine carries the rules of the player-steered variant.

pub mod action;
pub mod bot;
pub mod config;
pub mod cycle;
pub mod error;
pub mod grid;
pub mod manual;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use bot::{BotController, StepInfo};
pub use config::GameConfig;
pub use cycle::{Cycle, CycleShape};
pub use error::{GameError, Result};
pub use grid::{FreeCells, Grid};
pub use manual::{ManualEngine, ManualState, StepResult};
pub use session::{Session, SessionEvent, SessionState};
pub use state::{BotPhase, Cell, CollisionType, GameState, Snake, Snapshot};
