use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Identifies one game from creation or reset until the next reset.
pub type SessionId = u32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No card face up
    Idle,
    /// One card face up, waiting for the second pick
    OneFlipped,
    /// Two cards face up, waiting for the match check
    Resolving,
    /// Every card has been matched
    Ended,
}

impl GameState {
    pub const fn accepts_clicks(self) -> bool {
        matches!(self, Self::Idle | Self::OneFlipped)
    }

    pub const fn is_ended(self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::Idle
    }
}

/// What the end-game summary shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub elapsed_secs: u32,
    pub move_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MemoryGame {
    board: Board,
    flipped: SmallVec<[CardIndex; 2]>,
    matched: Vec<CardIndex>,
    move_count: u32,
    elapsed_secs: u32,
    timer_running: bool,
    flip_duration: FlipDuration,
    session: SessionId,
}

impl MemoryGame {
    /// Shuffles the board with `seed`, flips it face down and starts the timer.
    pub fn new(mut board: Board, flip_duration: FlipDuration, seed: u64) -> Self {
        board.reset(seed);
        Self {
            board,
            flipped: SmallVec::new(),
            matched: Vec::new(),
            move_count: 0,
            elapsed_secs: 0,
            timer_running: true,
            flip_duration,
            session: 0,
        }
    }

    pub fn state(&self) -> GameState {
        match self.flipped.len() {
            _ if self.is_complete() => GameState::Ended,
            0 => GameState::Idle,
            1 => GameState::OneFlipped,
            _ => GameState::Resolving,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flipped(&self) -> &[CardIndex] {
        &self.flipped
    }

    pub fn matched(&self) -> &[CardIndex] {
        &self.matched
    }

    pub fn is_matched(&self, index: CardIndex) -> bool {
        self.matched.contains(&index)
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn flip_duration(&self) -> FlipDuration {
        self.flip_duration
    }

    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn summary(&self) -> Option<GameSummary> {
        self.state().is_ended().then_some(GameSummary {
            elapsed_secs: self.elapsed_secs,
            move_count: self.move_count,
        })
    }

    /// Flips the card at `index` if the turn allows it, asking for a match check once two cards are up.
    pub fn handle_card_click(&mut self, index: CardIndex) -> Result<ClickOutcome> {
        let index = self.board.validate_index(index)?;

        if self.flipped.len() >= 2 || self.board.cards()[index].is_flipped() {
            log::trace!("ignored click on card {}", index);
            return Ok(ClickOutcome::NoChange);
        }

        self.board.card_mut(index).toggle_flip();
        self.flipped.push(index);
        self.move_count = self.move_count.saturating_add(1);
        log::debug!(
            "flipped card {} ({}), move {}",
            index,
            self.board.cards()[index].name(),
            self.move_count
        );

        Ok(if self.flipped.len() == 2 {
            ClickOutcome::CheckScheduled {
                session: self.session,
                after: self.flip_duration,
            }
        } else {
            ClickOutcome::Flipped
        })
    }

    /// Resolves the two face-up cards. Checks scheduled in an earlier session are ignored.
    pub fn check_for_match(&mut self, session: SessionId) -> MatchOutcome {
        if session != self.session {
            log::debug!(
                "dropped match check from session {}, current is {}",
                session,
                self.session
            );
            return MatchOutcome::NoChange;
        }

        let [first, second] = match self.flipped.as_slice() {
            &[first, second] => [first, second],
            _ => return MatchOutcome::NoChange,
        };
        self.flipped.clear();

        let cards = self.board.cards();
        if cards[first].matches(&cards[second]) {
            self.matched.extend([first, second]);
            log::debug!("matched {} ({}/{})", cards[first].name(), self.matched.len(), cards.len());
            if self.is_complete() {
                self.end_game();
                MatchOutcome::Won
            } else {
                MatchOutcome::Matched
            }
        } else {
            log::debug!("{} and {} do not match", cards[first].name(), cards[second].name());
            self.board.card_mut(first).unflip();
            self.board.card_mut(second).unflip();
            MatchOutcome::Mismatch
        }
    }

    /// Advances the elapsed-time counter by one second, only while the timer runs.
    pub fn tick(&mut self) -> bool {
        if !self.timer_running {
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        log::debug!("time: {}s", self.elapsed_secs);
        true
    }

    /// Starts a fresh session on the same cards.
    pub fn reset_game(&mut self, seed: u64) {
        self.stop_timer();
        self.flipped.clear();
        self.matched.clear();
        self.move_count = 0;
        self.elapsed_secs = 0;
        self.session = self.session.wrapping_add(1);
        self.board.reset(seed);
        self.timer_running = true;
        log::debug!("started session {}", self.session);
    }

    fn is_complete(&self) -> bool {
        !self.board.is_empty() && self.matched.len() == self.board.len()
    }

    fn end_game(&mut self) {
        self.stop_timer();
        log::info!(
            "game finished in {}s with {} moves",
            self.elapsed_secs,
            self.move_count
        );
    }

    fn stop_timer(&mut self) {
        self.timer_running = false;
    }
}
