use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::cycle::CycleShape;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of rows in the grid
    pub rows: usize,
    /// Number of columns in the grid
    pub cols: usize,
    /// Milliseconds between ticks. Only the host loop reads this.
    pub tick_interval_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Which Hamiltonian tour the bot follows
    pub cycle_shape: CycleShape,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,

    // Manual variant
    /// Number of foods on the board at once
    pub apple_count: usize,
    /// Score at which the manual game is won
    pub win_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            tick_interval_ms: 60,
            initial_snake_length: 3,
            cycle_shape: CycleShape::Closed,
            seed: None,
            apple_count: 1,
            win_score: 87,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Same configuration with a fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&json).context("Failed to parse config")
    }

    /// Write the configuration as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))
    }
}
