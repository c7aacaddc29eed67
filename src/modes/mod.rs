pub mod bot;

pub use bot::{BotMode, RunSummary};
