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

//! Chess board supporting standard pieces plus the Alfil and Nightrider
//!
//! A _board_ represents the state of a chess board and provides the
//! core mechanisms to play a game on it. The following features are
//! supported:
//!
//! [x] Standard piece movement (without castling, en passant or promotion)
//! [x] Alfil and Nightrider fairy pieces
//! [x] Standard and variant starting layouts
//! [x] Check, checkmate and stalemate detection
//! [x] Capturing the king ends the game
//! [x] Undo of any number of moves
//! [ ] Castling, en passant and promotion
//! [ ] Repetition and fifty-move rules
//!
//! Some of the key abstractions include:
//!
//! * A `Square` represents the coordinates for a single square on an
//!   8-by-8 board. Squares are numbered row-major from `A1` (index 0,
//!   coordinates `(0, 0)`) to `H8` (index 63, coordinates `(7, 7)`).
//!   Conversions from raw indices or coordinates return `None` when the
//!   input is off the board.
//!
//! * A `Mask` is a 64-bit (u64) value in which each bit maps to a
//!   square on the board. A position keeps one per color plus one for
//!   the kings, which makes finding a king a single lookup.
//!
//! * A `Piece` has an owner (`Color`), a `Kind` and the `Square` it
//!   stands on. Each kind maps to a `Capability`: a list of vectors
//!   walked once or repeatedly, or the hand coded pawn rule.
//!
//! * A `Position` holds the contents of each square. Read-only queries
//!   live in the `Pos` trait, pattern-based move generation in
//!   `PseudoMoves` and king-safety aware queries in `LegalMoves`. All
//!   three work on anything implementing `AsRef<Position>`.
//!
//! * Legality is decided by playing a move on the position, asking
//!   whether the mover's king is attacked and then reverting the move.
//!   Detecting check only ever uses pseudo-legal moves, so the two
//!   never recurse into each other.
//!
//! * A `Board` wraps a position together with the `History` of
//!   `MoveRecord`s that produced it. Every query and move takes the
//!   acting side explicitly. The board has no notion of whose turn it
//!   is; that belongs to the caller (see `Game`).
//!

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

mod history;
mod material;
mod moves;
mod position;
mod rules;
mod square;

pub use history::*;
pub use material::*;
pub use moves::*;
pub use position::*;
pub use rules::*;
pub use square::*;

use MoveError::*;

/// Result of asking whether a coordinate holds a piece.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Occupancy {
    OffBoard,
    Vacant,
    Occupied,
}

/// Result of asking whether a coordinate holds an opposing piece.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opposition {
    OffBoard,
    No,
    Yes,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    position: Position,
    history: History,
}

impl Board {
    pub fn new(layout: Layout) -> Self {
        Self {
            position: Position::new(layout),
            history: History::new(),
        }
    }

    pub fn empty() -> Self {
        Self {
            position: Position::empty(),
            history: History::new(),
        }
    }

    pub fn standard() -> Self {
        Self::new(Layout::Standard)
    }

    pub fn variant() -> Self {
        Self::new(Layout::Variant)
    }

    /// Resets the board to `layout` and forgets all history.
    pub fn init_layout(&mut self, layout: Layout) {
        self.position.init(layout);
        self.history.clear();
        debug!("board reset to {layout} layout");
    }

    pub fn init_standard_layout(&mut self) {
        self.init_layout(Layout::Standard)
    }

    pub fn init_variant_layout(&mut self) {
        self.init_layout(Layout::Variant)
    }

    /// Sets up a piece outside of play, e.g. to build a puzzle.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        self.position.place(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.position.remove(square)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn is_occupied(&self, x: isize, y: isize) -> Occupancy {
        match Square::from_coords(x, y) {
            None => Occupancy::OffBoard,
            Some(square) if self.is_vacant(square) => Occupancy::Vacant,
            Some(_) => Occupancy::Occupied,
        }
    }

    pub fn is_occupied_by_opponent(&self, x: isize, y: isize, side: Color) -> Opposition {
        let Some(square) = Square::from_coords(x, y) else {
            return Opposition::OffBoard;
        };
        match self.piece_at(square) {
            Some(piece) if piece.color() != side => Opposition::Yes,
            _ => Opposition::No,
        }
    }

    /// Legal destinations for the piece on board index `index`. Empty if
    /// the index is off the board, vacant or holds an opposing piece.
    pub fn legal_moves_at(&self, index: isize, side: Color) -> Vec<Square> {
        match Square::try_from_index(index) {
            Some(from) => self.legal_moves(from, side),
            None => Vec::new(),
        }
    }

    /// Plays a legal move for `side` and records it. The board is left
    /// untouched if the move is rejected.
    pub fn submit_move(&mut self, from: Square, to: Square, side: Color) -> Result<MoveRecord> {
        self.position.check_move(from, to, side)?;
        let displaced = self.position.relocate(from, to);
        let record = MoveRecord::new(from, to, displaced);
        debug_assert!(self.position.is_consistent());
        self.history.push(record);
        debug!("{side} played {record}");
        Ok(record)
    }

    pub fn submit_index_move(&mut self, from: isize, to: isize, side: Color) -> Result<MoveRecord> {
        let from = Square::try_from_index(from).ok_or(OffBoard)?;
        let to = Square::try_from_index(to).ok_or(OffBoard)?;
        self.submit_move(from, to, side)
    }

    pub fn move_index(&mut self, from: isize, to: isize, side: Color) -> bool {
        self.submit_index_move(from, to, side).is_ok()
    }

    pub fn move_coords(&mut self, from: (isize, isize), to: (isize, isize), side: Color) -> bool {
        let (Some(from), Some(to)) = (
            Square::from_coords(from.0, from.1),
            Square::from_coords(to.0, to.1),
        ) else {
            return false;
        };
        self.submit_move(from, to, side).is_ok()
    }

    /// Reverses `record` without regard to whose turn it is and drops it
    /// from the history. Only a recorded move whose squares no later move
    /// has disturbed can be reversed.
    pub fn undo(&mut self, record: &MoveRecord) -> Result<()> {
        let index = self.history.reversible(record).ok_or(StaleRecord)?;
        if self.position[record.to].is_none() || self.position[record.from].is_some() {
            return Err(StaleRecord.into());
        }
        self.position.restore(record.from, record.to, record.displaced);
        debug_assert!(self.position.is_consistent());
        self.history.remove(index);
        debug!("undid {record}");
        Ok(())
    }

    /// Undoes the most recent move. `Ok(None)` means there was nothing to
    /// take back.
    pub fn take_back(&mut self) -> Result<Option<MoveRecord>> {
        let Some(&record) = self.history.last() else {
            return Ok(None);
        };
        self.undo(&record)?;
        Ok(Some(record))
    }
}

impl AsRef<Position> for Board {
    fn as_ref(&self) -> &Position {
        &self.position
    }
}

impl Pos for Board {}

impl PseudoMoves for Board {}

impl LegalMoves for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.position)
    }
}
