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

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use strum::IntoEnumIterator;
use strum_macros::Display;

use super::material::{Color, Kind, Pair, Piece};
use super::square::{File, Mask, Rank, Square};

use Color::*;
use Kind::*;

/// Starting arrangement of the pieces.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    #[default]
    Standard,
    /// The standard arrangement with an Alfil in place of one rook
    /// and a Nightrider in place of one knight on each side.
    Variant,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Masks {
    pieces: Pair<Mask>,
    kings: Mask,
}

/// The contents of all 64 squares.
///
/// Alongside the slots, a position keeps a mask of the squares held by
/// each color and a mask of the squares holding kings. Both are kept up
/// to date by `place` and `remove`, which are the only ways to change a
/// slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    squares: [Option<Piece>; 64],
    masks: Masks,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl Position {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            masks: Masks::default(),
        }
    }

    pub fn new(layout: Layout) -> Self {
        let mut position = Self::empty();
        position.init(layout);
        position
    }

    pub(crate) fn init(&mut self, layout: Layout) {
        *self = Self::empty();
        const BACK_RANK: [Kind; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        for color in Color::iter() {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                self.place(Piece::new(color, kind, Square::new(file, color.back_rank())));
                self.place(Piece::new(color, Pawn, Square::new(file, color.pawn_rank())));
            }
        }
        if layout == Layout::Variant {
            self.place(Piece::white(Alfil, Square::A1));
            self.place(Piece::black(Alfil, Square::H8));
            self.place(Piece::white(Nightrider, Square::G1));
            self.place(Piece::black(Nightrider, Square::B8));
        }
    }

    /// Puts `piece` on the square it claims to stand on and returns
    /// whatever was there before.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        let square = piece.square();
        let replaced = self.remove(square);
        self.squares[square] = Some(piece);
        self.masks.pieces[piece.color()] |= square;
        if piece.kind().is_king() {
            self.masks.kings |= square;
        }
        replaced
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        if let Some(piece) = self.squares[square].take() {
            self.masks.pieces[piece.color()].reset(square);
            self.masks.kings.reset(square);
            return Some(piece);
        }
        None
    }

    /// Moves the piece on `from` to `to`, updating its stored square,
    /// and returns the piece it displaced. `from` must be occupied.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        debug_assert!(self.squares[from].is_some(), "relocate from vacant {from}");
        let mut piece = self.remove(from)?;
        piece.set_square(to);
        self.place(piece)
    }

    /// Exact inverse of `relocate`.
    pub(crate) fn restore(&mut self, from: Square, to: Square, displaced: Option<Piece>) {
        if let Some(mut piece) = self.remove(to) {
            piece.set_square(from);
            self.place(piece);
        }
        if let Some(piece) = displaced {
            debug_assert_eq!(piece.square(), to);
            self.place(piece);
        }
    }

    /// True when every piece's stored square matches its slot and the
    /// masks agree with the slots.
    pub fn is_consistent(&self) -> bool {
        let mut masks = Masks::default();
        for square in Square::iter() {
            if let Some(piece) = self.squares[square] {
                if piece.square() != square {
                    return false;
                }
                masks.pieces[piece.color()] |= square;
                if piece.kind().is_king() {
                    masks.kings |= square;
                }
            }
        }
        masks == self.masks
    }
}

impl Index<Square> for Position {
    type Output = Option<Piece>;
    #[inline]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index]
    }
}

impl AsRef<Self> for Position {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl Pos for Position {}

/// Read-only queries over anything that can lend out a `Position`.
pub trait Pos: AsRef<Position> {
    #[inline]
    fn contents(&self, square: Square) -> &Option<Piece> {
        let pos: &Position = self.as_ref();
        &pos.squares[square]
    }
    #[inline]
    fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.contents(square).as_ref()
    }
    #[inline]
    fn white(&self) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.pieces[White]
    }
    #[inline]
    fn black(&self) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.pieces[Black]
    }
    #[inline]
    fn kings(&self) -> Mask {
        let pos: &Position = self.as_ref();
        pos.masks.kings
    }
    #[inline]
    fn occupied_by(&self, color: Color) -> Mask {
        match color {
            White => self.white(),
            Black => self.black(),
        }
    }
    #[inline]
    fn occupied(&self) -> Mask {
        self.white() | self.black()
    }
    #[inline]
    fn is_vacant(&self, square: Square) -> bool {
        self.contents(square).is_none()
    }
    /// Square of `color`'s king, or `None` once it has been captured.
    #[inline]
    fn king(&self, color: Color) -> Option<Square> {
        let mask = self.occupied_by(color) & self.kings();
        mask.iter().next()
    }
    /// Pieces belonging to `color` in ascending index order.
    fn pieces(&self, color: Color) -> Vec<Piece> {
        self.occupied_by(color)
            .iter()
            .filter_map(|square| *self.contents(square))
            .collect()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{} |", rank)?;
            for file in File::iter() {
                let square = Square::new(file, rank);
                let symbol = self.squares[square].map_or('.', |piece| piece.symbol());
                write!(f, " {}", symbol)?;
            }
            writeln!(f, " | {:>2}", Square::new(File::FileA, rank).to_index())?;
        }
        write!(f, "   ")?;
        for file in File::iter() {
            write!(f, " {}", file)?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
impl Position {
    pub fn set_contents(mut self, square: Square, value: Option<Piece>) -> Self {
        match value {
            Some(piece) => {
                debug_assert_eq!(piece.square(), square);
                self.place(piece);
            }
            None => {
                self.remove(square);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Square::*;

    #[test]
    fn test_standard_occupancy() {
        let position = Position::default();
        for square in Square::iter() {
            let index = square.to_index();
            let expected = index < 16 || index >= 48;
            assert_eq!(position[square].is_some(), expected, "{square}");
        }
        assert_eq!(position.occupied().len(), 32);
        assert!(position.is_consistent());
    }
    #[test]
    fn test_standard_back_ranks() {
        let position = Position::default();
        assert_eq!(position[A1].map(|p| p.kind()), Some(Rook));
        assert_eq!(position[B1].map(|p| p.kind()), Some(Knight));
        assert_eq!(position[D1].map(|p| p.kind()), Some(Queen));
        assert_eq!(position[E1].map(|p| p.kind()), Some(King));
        assert_eq!(position[E8].map(|p| p.kind()), Some(King));
        assert_eq!(position[E8].map(|p| p.color()), Some(Black));
        assert_eq!(position.king(White), Some(E1));
        assert_eq!(position.king(Black), Some(E8));
    }
    #[test]
    fn test_variant_replacements() {
        let position = Position::new(Layout::Variant);
        assert_eq!(position[A1], Some(Piece::white(Alfil, A1)));
        assert_eq!(position[H8], Some(Piece::black(Alfil, H8)));
        assert_eq!(position[G1], Some(Piece::white(Nightrider, G1)));
        assert_eq!(position[B8], Some(Piece::black(Nightrider, B8)));
        assert_eq!(position[H1].map(|p| p.kind()), Some(Rook));
        assert_eq!(position[A8].map(|p| p.kind()), Some(Rook));
        assert_eq!(position.occupied().len(), 32);
        assert!(position.is_consistent());
    }
    #[test]
    fn test_place_replaces() {
        let mut position = Position::empty();
        assert_eq!(position.place(Piece::white(Knight, C3)), None);
        let replaced = position.place(Piece::black(Bishop, C3));
        assert_eq!(replaced, Some(Piece::white(Knight, C3)));
        assert!(position.white().is_empty());
        assert!(position.black().contains(C3));
    }
    #[test]
    fn test_relocate_and_restore_capture() {
        let original = Position::empty()
            .set_contents(D4, Some(Piece::white(Queen, D4)))
            .set_contents(D7, Some(Piece::black(Rook, D7)));
        let mut position = original.clone();
        let displaced = position.relocate(D4, D7);
        assert_eq!(displaced, Some(Piece::black(Rook, D7)));
        assert_eq!(position[D7], Some(Piece::white(Queen, D7)));
        assert_eq!(position[D4], None);
        assert!(position.is_consistent());
        position.restore(D4, D7, displaced);
        assert_eq!(position, original);
    }
    #[test]
    fn test_king_lookup_after_capture() {
        let mut position = Position::empty()
            .set_contents(E1, Some(Piece::white(King, E1)))
            .set_contents(E2, Some(Piece::black(Queen, E2)));
        assert_eq!(position.king(White), Some(E1));
        position.relocate(E2, E1);
        assert_eq!(position.king(White), None);
        assert!(position.kings().is_empty());
    }
    #[test]
    fn test_pieces_in_index_order() {
        let position = Position::default();
        let squares: Vec<Square> = position.pieces(Black).iter().map(|p| p.square()).collect();
        assert_eq!(squares.len(), 16);
        assert_eq!(squares.first(), Some(&A7));
        assert_eq!(squares.last(), Some(&H8));
    }
    #[test]
    fn test_display() {
        let text = Position::new(Layout::Variant).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "8 | r h b q k b n a | 56");
        assert_eq!(lines[7], "1 | A N B Q K B H R |  0");
        assert_eq!(lines[8], "    a b c d e f g h");
    }
}
