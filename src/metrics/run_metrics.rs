use std::time::{Duration, Instant};

/// Counters for one bot run, refreshed by the host loop
pub struct RunMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub ticks: u64,
    pub foods_eaten: u32,
    pub games_completed: u32,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            ticks: 0,
            foods_eaten: 0,
            games_completed: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.foods_eaten = 0;
    }

    pub fn on_tick(&mut self, ate_food: bool) {
        self.ticks += 1;
        if ate_food {
            self.foods_eaten += 1;
        }
    }

    pub fn on_game_complete(&mut self) {
        self.games_completed += 1;
        self.update();
    }

    /// Ticks per second since the game started
    pub fn tick_rate(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for RunMetrics {
    fn default() -> Self {
        Self::new()
    }
}
