//! Headless host loop for the Hamiltonian bot
//!
//! Ticks the [`BotController`] on a timer until the board is full, the tick
//! limit is hit, or Ctrl+C arrives. A tick interval of zero runs unthrottled.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;
use std::future::Future;
use std::time::Duration;
use tokio::time::{interval, MissedTickBehavior};

use crate::game::{BotController, GameConfig, GameState, Session, SessionEvent, Snapshot};
use crate::metrics::RunMetrics;

/// Outcome of a run, printed by the binary
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub completed: bool,
    pub ticks: u64,
    pub elapsed: String,
    pub final_state: Snapshot,
}

pub struct BotMode {
    controller: BotController,
    state: GameState,
    session: Session,
    metrics: RunMetrics,
    tick_interval: Duration,
    max_ticks: Option<u64>,
    should_quit: bool,
}

impl BotMode {
    pub fn new(config: GameConfig, max_ticks: Option<u64>) -> Result<Self> {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let mut controller =
            BotController::new(config).context("Failed to build the Hamiltonian cycle")?;
        let state = controller
            .reset_default()
            .context("Failed to place the initial snake")?;

        Ok(Self {
            controller,
            state,
            session: Session::new(),
            metrics: RunMetrics::new(),
            tick_interval,
            max_ticks,
            should_quit: false,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Run until the board is full, the tick limit is hit, or Ctrl+C
    pub async fn run(&mut self) -> Result<RunSummary> {
        self.run_until(async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                warn!("Cannot listen for Ctrl+C: {err}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Like [`run`](Self::run), with `shutdown` standing in for Ctrl+C
    pub async fn run_until(&mut self, shutdown: impl Future<Output = ()>) -> Result<RunSummary> {
        self.session.handle(SessionEvent::Start)?;
        self.metrics.on_game_start();
        info!(
            "Bot started on {}x{} {:?} cycle",
            self.controller.cycle().rows(),
            self.controller.cycle().cols(),
            self.controller.cycle().shape()
        );

        if self.tick_interval.is_zero() {
            while !self.should_quit {
                self.update_game()?;
            }
        } else {
            self.run_timed(shutdown).await?;
        }

        self.finish()
    }

    async fn run_timed(&mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        // Polled across iterations so a signal raised during a tick is kept
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                _ = &mut shutdown => {
                    warn!("Interrupted after {} ticks", self.metrics.ticks);
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        let info = self.controller.step(&mut self.state);
        self.metrics.on_tick(info.ate_food);

        if info.ate_food && self.state.score() % 10 == 0 {
            self.metrics.update();
            debug!(
                "Score {} after {} ticks ({})",
                self.state.score(),
                self.metrics.ticks,
                self.metrics.format_time()
            );
        }

        if info.completed {
            self.session.handle(SessionEvent::Won)?;
            self.metrics.on_game_complete();
            self.should_quit = true;
        } else if self.max_ticks.is_some_and(|max| self.metrics.ticks >= max) {
            info!("Tick limit reached");
            self.should_quit = true;
        }

        Ok(())
    }

    fn finish(&mut self) -> Result<RunSummary> {
        self.controller
            .verify(&self.state)
            .context("Final state failed verification")?;
        self.metrics.update();

        info!(
            "Run finished: score {}, {} ticks in {} ({:.0} ticks/s)",
            self.state.score(),
            self.metrics.ticks,
            self.metrics.format_time(),
            self.metrics.tick_rate()
        );

        Ok(RunSummary {
            completed: self.state.victory(),
            ticks: self.metrics.ticks,
            elapsed: self.metrics.format_time(),
            final_state: self.state.snapshot(),
        })
    }
}
