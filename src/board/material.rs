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
use std::hash::{Hash, Hasher};
use std::ops::{Index, IndexMut, Not};
use strum_macros::Display;
use strum_macros::EnumIter;

use super::square::{Offset, Rank, Square};

/// A piece on the board: who owns it, what it is and where it stands.
///
/// The stored square must always match the slot the piece occupies.
/// `Position` is the only thing that moves pieces, and it keeps the two
/// in sync.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: Kind,
    square: Square,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: Kind, square: Square) -> Self {
        Self {
            color,
            kind,
            square,
        }
    }

    #[inline]
    pub const fn white(kind: Kind, square: Square) -> Self {
        Self::new(White, kind, square)
    }

    #[inline]
    pub const fn black(kind: Kind, square: Square) -> Self {
        Self::new(Black, kind, square)
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    #[inline]
    pub fn square(&self) -> Square {
        self.square
    }

    #[inline]
    pub(crate) fn set_square(&mut self, square: Square) {
        self.square = square
    }

    #[inline]
    pub fn capability(&self) -> Capability {
        self.kind.capability()
    }

    /// Single letter code, upper case for White and lower case for Black.
    pub fn symbol(&self) -> char {
        let c = self.kind.symbol();
        match self.color {
            White => c,
            Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.square)
    }
}

use Color::{Black, White};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Row direction a pawn of this color advances in.
    #[inline]
    pub const fn forward(&self) -> isize {
        match self {
            White => 1,
            Black => -1,
        }
    }

    #[inline]
    pub const fn pawn_rank(&self) -> Rank {
        match self {
            White => Rank::Rank2,
            Black => Rank::Rank7,
        }
    }

    #[inline]
    pub const fn back_rank(&self) -> Rank {
        match self {
            White => Rank::Rank1,
            Black => Rank::Rank8,
        }
    }
}

impl Not for Color {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        match self {
            White => Black,
            Black => White,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pair<T>((T, T));

impl<T> Pair<T> {
    pub const fn new(white: T, black: T) -> Self {
        Self((white, black))
    }
}

impl<T> Pair<T> {
    pub fn white(&self) -> &T {
        &self.0 .0
    }
    pub fn white_mut(&mut self) -> &mut T {
        &mut self.0 .0
    }
    pub fn black(&self) -> &T {
        &self.0 .1
    }
    pub fn black_mut(&mut self) -> &mut T {
        &mut self.0 .1
    }
}

impl<T: Hash> Hash for Pair<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.white().hash(state);
        self.black().hash(state);
    }
}

impl<T> Index<Color> for Pair<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        match index {
            White => self.white(),
            Black => self.black(),
        }
    }
}

impl<T> IndexMut<Color> for Pair<T> {
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        match index {
            White => self.white_mut(),
            Black => self.black_mut(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Alfil,
    Nightrider,
}
use Kind::{Alfil, Bishop, King, Knight, Nightrider, Pawn, Queen, Rook};

impl Kind {
    pub fn is_king(&self) -> bool {
        matches!(*self, King)
    }
    pub fn is_pawn(&self) -> bool {
        matches!(*self, Pawn)
    }

    pub const fn symbol(&self) -> char {
        match self {
            Pawn => 'P',
            Knight => 'N',
            Bishop => 'B',
            Rook => 'R',
            Queen => 'Q',
            King => 'K',
            Alfil => 'A',
            Nightrider => 'H',
        }
    }

    pub fn capability(&self) -> Capability {
        match self {
            Pawn => Capability::Pawn,
            King => Capability::vectors(&KING_OFFSETS, Stride::Single),
            Knight => Capability::vectors(&KNIGHT_OFFSETS, Stride::Single),
            Alfil => Capability::vectors(&ALFIL_OFFSETS, Stride::Single),
            Bishop => Capability::vectors(&BISHOP_OFFSETS, Stride::Repeat),
            Rook => Capability::vectors(&ROOK_OFFSETS, Stride::Repeat),
            Queen => Capability::vectors(&QUEEN_OFFSETS, Stride::Repeat),
            Nightrider => Capability::vectors(&KNIGHT_OFFSETS, Stride::Repeat),
        }
    }
}

/// How far a piece travels along one of its vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stride {
    /// Exactly one application of the vector.
    Single,
    /// Keep applying the vector until blocked or off the board.
    Repeat,
}

/// Movement descriptor for a kind of piece.
///
/// Everything except the pawn is a fixed list of vectors walked with a
/// stride. Only the landing square of each step is ever inspected, so
/// leapers and the Nightrider jump over whatever lies in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Pawn,
    Vectors {
        offsets: &'static [Offset],
        stride: Stride,
    },
}

impl Capability {
    const fn vectors(offsets: &'static [Offset], stride: Stride) -> Self {
        Capability::Vectors { offsets, stride }
    }
}

// Vector order determines the order destinations are reported in.

const KING_OFFSETS: [Offset; 8] = [
    Offset::new(1, 0),
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(0, 1),
    Offset::new(0, -1),
    Offset::new(-1, 0),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(-2, 1),
    Offset::new(-2, -1),
    Offset::new(1, 2),
    Offset::new(-1, 2),
    Offset::new(1, -2),
    Offset::new(-1, -2),
];

const ALFIL_OFFSETS: [Offset; 4] = [
    Offset::new(2, 2),
    Offset::new(2, -2),
    Offset::new(-2, 2),
    Offset::new(-2, -2),
];

const BISHOP_OFFSETS: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
];

const ROOK_OFFSETS: [Offset; 4] = [
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];

const QUEEN_OFFSETS: [Offset; 8] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, 1),
    Offset::new(-1, -1),
    Offset::new(1, 0),
    Offset::new(-1, 0),
    Offset::new(0, 1),
    Offset::new(0, -1),
];
