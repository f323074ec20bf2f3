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

use anyhow::Result;
use log::trace;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use super::material::Color;
use super::moves::{MoveError, PseudoMoves};
use super::position::{Pos, Position};
use super::square::Square;

use MoveError::*;

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalState {
    Ongoing,
    Checkmate,
    Stalemate,
}

impl TerminalState {
    #[inline]
    pub fn is_over(&self) -> bool {
        !matches!(*self, TerminalState::Ongoing)
    }
}

impl Position {
    /// Plays `from` -> `to` for `side`, reports whether `side`'s king is
    /// then attacked, and puts everything back exactly as it was.
    ///
    /// This is the only place a hypothetical move is ever applied. The
    /// caller must already know `to` is a pseudo-legal destination of
    /// the piece on `from`.
    pub(crate) fn exposes_king(&mut self, from: Square, to: Square, side: Color) -> bool {
        let displaced = self.relocate(from, to);
        let exposed = self.is_in_check(side);
        self.restore(from, to, displaced);
        trace!("probe {from}-{to} for {side}: exposed={exposed}");
        exposed
    }

    /// Checks that `side` may move the piece on `from` to `to`. Leaves
    /// the position as it found it whether or not the move is legal.
    pub(crate) fn check_move(&mut self, from: Square, to: Square, side: Color) -> Result<()> {
        let Some(piece) = *self.contents(from) else {
            return Err(EmptySource(from).into());
        };
        if piece.color() != side {
            return Err(WrongSide(from).into());
        }
        if !self.can_reach(&piece, to) {
            return Err(Unreachable.into());
        }
        if self.exposes_king(from, to, side) {
            return Err(ExposesKing.into());
        }
        Ok(())
    }
}

/// King-safety aware queries.
///
/// Every method takes the acting side explicitly. Queries borrow the
/// position immutably, so hypothetical moves are probed on a scratch
/// copy which is checked against the original afterwards in debug
/// builds.
pub trait LegalMoves: AsRef<Position> {
    /// True if any opposing piece can pseudo-legally reach `side`'s
    /// king. A side without a king is never in check.
    fn is_in_check(&self, side: Color) -> bool {
        let pos: &Position = self.as_ref();
        let Some(king) = pos.king(side) else {
            return false;
        };
        pos.pieces(!side)
            .iter()
            .any(|piece| pos.can_reach(piece, king))
    }

    /// Pseudo-legal destinations of the piece on `from` that don't leave
    /// `side`'s king in check, in generation order. Empty when `from`
    /// is vacant or holds an opposing piece.
    fn legal_moves(&self, from: Square, side: Color) -> Vec<Square> {
        let pos: &Position = self.as_ref();
        let Some(piece) = pos.contents(from) else {
            return Vec::new();
        };
        if piece.color() != side {
            return Vec::new();
        }
        let candidates = pos.pseudo_legal_moves(piece);
        if candidates.is_empty() {
            return candidates;
        }
        let mut scratch = pos.clone();
        let result = candidates
            .into_iter()
            .filter(|&to| !scratch.exposes_king(from, to, side))
            .collect();
        debug_assert_eq!(&scratch, pos);
        result
    }

    fn validate_move(&self, from: Square, to: Square, side: Color) -> Result<()> {
        let pos: &Position = self.as_ref();
        let mut scratch = pos.clone();
        let result = scratch.check_move(from, to, side);
        debug_assert_eq!(&scratch, pos);
        result
    }

    /// Stops at the first pseudo-legal move that keeps the king safe.
    fn has_legal_move(&self, side: Color) -> bool {
        let pos: &Position = self.as_ref();
        let mut scratch = pos.clone();
        let found = pos.pieces(side).iter().any(|piece| {
            let from = piece.square();
            pos.pseudo_legal_moves(piece)
                .into_iter()
                .any(|to| !scratch.exposes_king(from, to, side))
        });
        debug_assert_eq!(&scratch, pos);
        found
    }

    /// A side whose king has been captured has lost, so that case is
    /// reported as checkmate.
    fn terminal_state(&self, side: Color) -> TerminalState {
        let pos: &Position = self.as_ref();
        if pos.king(side).is_none() {
            return TerminalState::Checkmate;
        }
        match (self.is_in_check(side), self.has_legal_move(side)) {
            (_, true) => TerminalState::Ongoing,
            (true, false) => TerminalState::Checkmate,
            (false, false) => TerminalState::Stalemate,
        }
    }
}

impl LegalMoves for Position {}
