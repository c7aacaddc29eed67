//! Screen-level state machine wrapped around a game.
//!
//! Independent of how the game itself is played: a bot run and a manual run
//! both go Menu -> Playing and end in Won or Lost.

use serde::{Deserialize, Serialize};

use super::error::{GameError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Menu,
    Playing,
    Won,
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionEvent {
    Start,
    Won,
    Lost,
    Restart,
    ReturnToMenu,
}

/// Every legal edge. Anything not listed is rejected.
const TRANSITIONS: &[(SessionState, SessionEvent, SessionState)] = &[
    (SessionState::Menu, SessionEvent::Start, SessionState::Playing),
    (SessionState::Playing, SessionEvent::Won, SessionState::Won),
    (SessionState::Playing, SessionEvent::Lost, SessionState::Lost),
    (SessionState::Lost, SessionEvent::Restart, SessionState::Playing),
    (SessionState::Won, SessionEvent::ReturnToMenu, SessionState::Menu),
    (SessionState::Lost, SessionEvent::ReturnToMenu, SessionState::Menu),
];

impl SessionState {
    /// Target state for `event`, if the edge exists
    pub fn transition(self, event: SessionEvent) -> Option<SessionState> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|&(_, _, to)| to)
    }

    pub fn is_terminal_screen(self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Menu,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Apply an event, leaving the state untouched if the edge does not exist
    pub fn handle(&mut self, event: SessionEvent) -> Result<SessionState> {
        let next = self
            .state
            .transition(event)
            .ok_or(GameError::InvalidTransition {
                from: self.state,
                event,
            })?;
        log::debug!("Session {:?} -> {:?} on {:?}", self.state, next, event);
        self.state = next;
        Ok(next)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
