// Copyright 2023 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! A headless two player session on top of a `Board`.
//!
//! The session owns whose turn it is and whether the game is still
//! running, and keeps a running score across consecutive games.

use anyhow::Result;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::{Board, Color, Layout, LegalMoves, Pair, Square, TerminalState};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is not in progress")]
    NotInProgress,
    #[error("Game is still in progress")]
    InProgress,
    #[error("No moves to take back")]
    NothingToUndo,
}
use GameError::*;

pub trait Turn {
    fn turn(&self) -> Color;
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameResult {
    Win(Color, WinReason),
    Draw(DrawReason),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WinReason {
    CheckMate,
    Forfeit,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawReason {
    StaleMate,
    // The players abandoned a running game to start over
    Restarted,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Ongoing,
    Over(GameResult),
}

/// Points awarded at the end of a game.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Scoring {
    pub win: u32,
    pub tie: u32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self { win: 3, tie: 1 }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GameConfig {
    pub layout: Layout,
    pub scoring: Scoring,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    layout: Layout,
    scores: Pair<u32>,
    scoring: Scoring,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Turn for Game {
    #[inline]
    fn turn(&self) -> Color {
        self.turn
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::new(config.layout),
            turn: Color::White,
            status: GameStatus::Ongoing,
            layout: config.layout,
            scores: Pair::default(),
            scoring: config.scoring,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn score(&self, color: Color) -> u32 {
        self.scores[color]
    }

    #[inline]
    pub fn is_ongoing(&self) -> bool {
        self.status == GameStatus::Ongoing
    }

    /// Where the side to move may send the piece on `from`.
    pub fn destinations(&self, from: Square) -> Vec<Square> {
        if !self.is_ongoing() {
            return Vec::new();
        }
        self.board.legal_moves(from, self.turn)
    }

    /// Plays a move for the side to move, hands the turn over and checks
    /// whether the new side to move is mated or stalemated.
    pub fn play(&mut self, from: Square, to: Square) -> Result<GameStatus> {
        if !self.is_ongoing() {
            return Err(NotInProgress.into());
        }
        let mover = self.turn;
        self.board.submit_move(from, to, mover)?;
        self.turn = !mover;
        if let GameStatus::Over(result) = self.judge() {
            self.finish(result);
        }
        Ok(self.status)
    }

    pub fn take_back(&mut self) -> Result<()> {
        if !self.is_ongoing() {
            return Err(NotInProgress.into());
        }
        let record = self.board.take_back()?.ok_or(NothingToUndo)?;
        self.turn = !self.turn;
        // re-judged without scoring
        self.status = self.judge();
        debug!("took back {record}, {} to move", self.turn);
        Ok(())
    }

    /// The side to move concedes.
    pub fn forfeit(&mut self) -> Result<GameResult> {
        if !self.is_ongoing() {
            return Err(NotInProgress.into());
        }
        let result = GameResult::Win(!self.turn, WinReason::Forfeit);
        self.finish(result);
        Ok(result)
    }

    /// Abandons the running game as a draw and starts over with the same
    /// layout.
    pub fn restart(&mut self) -> Result<GameResult> {
        if !self.is_ongoing() {
            return Err(NotInProgress.into());
        }
        let result = GameResult::Draw(DrawReason::Restarted);
        self.finish(result);
        self.reset(self.layout);
        Ok(result)
    }

    pub fn new_game(&mut self, layout: Layout) -> Result<()> {
        if self.is_ongoing() {
            return Err(InProgress.into());
        }
        self.reset(layout);
        Ok(())
    }

    /// Status of the board from the point of view of the side to move.
    fn judge(&self) -> GameStatus {
        match self.board.terminal_state(self.turn) {
            TerminalState::Ongoing => GameStatus::Ongoing,
            TerminalState::Checkmate => {
                GameStatus::Over(GameResult::Win(!self.turn, WinReason::CheckMate))
            }
            TerminalState::Stalemate => GameStatus::Over(GameResult::Draw(DrawReason::StaleMate)),
        }
    }

    fn reset(&mut self, layout: Layout) {
        self.board.init_layout(layout);
        self.layout = layout;
        self.turn = Color::White;
        self.status = GameStatus::Ongoing;
    }

    fn finish(&mut self, result: GameResult) {
        match result {
            GameResult::Win(winner, _) => self.scores[winner] += self.scoring.win,
            GameResult::Draw(_) => {
                for color in Color::iter() {
                    self.scores[color] += self.scoring.tie;
                }
            }
        }
        info!(
            "game over: {:?} (score {} - {})",
            result,
            self.scores.white(),
            self.scores.black()
        );
        self.status = GameStatus::Over(result);
    }
}
