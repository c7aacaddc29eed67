use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hamilton_snake::game::{CycleShape, GameConfig};
use hamilton_snake::modes::BotMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hamilton_snake")]
#[command(version, about = "Snake bot that fills the board along a Hamiltonian cycle")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Milliseconds between ticks (0 runs as fast as possible)
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Tour the bot follows
    #[arg(long)]
    shape: Option<Shape>,

    /// RNG seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks even if the board is not full
    #[arg(long)]
    max_ticks: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Shape {
    /// Column zig-zag with a jump back to the start
    Serpentine,
    /// Zig-zag with a return lane, every step a unit move
    Closed,
}

impl From<Shape> for CycleShape {
    fn from(shape: Shape) -> Self {
        match shape {
            Shape::Serpentine => CycleShape::Serpentine,
            Shape::Closed => CycleShape::Closed,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(shape) = self.shape {
            config.cycle_shape = shape.into();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.game_config()?;

    let mut bot_mode = BotMode::new(config, cli.max_ticks)?;
    let summary = bot_mode.run().await?;

    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
    println!("{json}");

    Ok(())
}
