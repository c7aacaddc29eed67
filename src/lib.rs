//! Hamilton Snake - a Snake bot that never loses
//!
//! This library provides:
//! - Core game logic, including the Hamiltonian cycle the bot follows (game module)
//! - Run counters for the host loop (metrics module)
//! - A headless, timer-driven bot runner (modes module)

pub mod game;
pub mod metrics;
pub mod modes;
