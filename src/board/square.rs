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
use std::ops::{Add, BitAnd, BitOr, BitOrAssign};
use std::ops::{Index, IndexMut};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// A square on the 8-by-8 board.
///
/// Squares are numbered row-major starting from the lower left
/// corner, so `A1` is index 0, `H1` is index 7 and `A2` is index 8.
/// Column `x` is the file and row `y` is the rank, giving
/// `index = y * 8 + x`.
#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

#[rustfmt::skip]
use Square::{
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
};

impl Square {
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::from_index(rank.to_index() * 8 + file.to_index())
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        #[rustfmt::skip]
        const VALUES: [Square; 64] = [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ];
        debug_assert!(index < 64);
        VALUES[index]
    }

    /// Returns `None` for any index outside `0..64`.
    #[inline]
    pub fn try_from_index(index: isize) -> Option<Self> {
        match usize::try_from(index) {
            Ok(i) if i < 64 => Some(Self::from_index(i)),
            _ => None,
        }
    }

    /// Returns `None` unless both coordinates are in `0..8`.
    #[inline]
    pub fn from_coords(x: isize, y: isize) -> Option<Self> {
        let file = File::try_from_index(x)?;
        let rank = Rank::try_from_index(y)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub fn try_from_string(name: &str) -> Option<Self> {
        let mut chars = name.chars();
        let f = chars.next()?;
        let r = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::try_from_chars(f, r)
    }
    #[inline]
    pub fn try_from_chars(f: char, r: char) -> Option<Self> {
        let file = File::try_from_char(f)?;
        let rank = Rank::try_from_char(r)?;
        Some(Self::new(file, rank))
    }

    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(0x1 << (63 - self.to_index()))
    }
    #[inline]
    pub const fn x(&self) -> isize {
        (self.to_index() % 8) as isize
    }
    #[inline]
    pub const fn y(&self) -> isize {
        (self.to_index() / 8) as isize
    }
    #[inline]
    pub const fn to_coords(&self) -> (isize, isize) {
        (self.x(), self.y())
    }
    #[inline]
    pub const fn file(&self) -> File {
        File::from_index(self.to_index() % 8)
    }
    #[inline]
    pub const fn rank(&self) -> Rank {
        Rank::from_index(self.to_index() / 8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl From<Square> for usize {
    fn from(value: Square) -> Self {
        value.to_index()
    }
}

#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum File {
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
}

#[rustfmt::skip]
use File::{
    FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
};

impl File {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        #[rustfmt::skip]
        const VALUES: [File; 8] = [
            FileA, FileB, FileC, FileD, FileE, FileF, FileG, FileH,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub fn try_from_index(index: isize) -> Option<Self> {
        match usize::try_from(index) {
            Ok(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
    #[inline]
    pub const fn try_from_char(c: char) -> Option<Self> {
        match c {
            'a' | 'A' => Some(FileA),
            'b' | 'B' => Some(FileB),
            'c' | 'C' => Some(FileC),
            'd' | 'D' => Some(FileD),
            'e' | 'E' => Some(FileE),
            'f' | 'F' => Some(FileF),
            'g' | 'G' => Some(FileG),
            'h' | 'H' => Some(FileH),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const VALUES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
        write!(f, "{}", VALUES[self.to_index()])
    }
}

impl Add<isize> for File {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

#[rustfmt::skip]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
pub enum Rank {
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
}

#[rustfmt::skip]
use Rank::{
    Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
};

impl Rank {
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        #[rustfmt::skip]
        const VALUES: [Rank; 8] = [
            Rank1, Rank2, Rank3, Rank4, Rank5, Rank6, Rank7, Rank8,
        ];
        debug_assert!(index < 8);
        VALUES[index]
    }
    #[inline]
    pub fn try_from_index(index: isize) -> Option<Self> {
        match usize::try_from(index) {
            Ok(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
    #[inline]
    pub fn try_from_char(c: char) -> Option<Self> {
        match c {
            '1' => Some(Rank1),
            '2' => Some(Rank2),
            '3' => Some(Rank3),
            '4' => Some(Rank4),
            '5' => Some(Rank5),
            '6' => Some(Rank6),
            '7' => Some(Rank7),
            '8' => Some(Rank8),
            _ => None,
        }
    }
    #[inline]
    pub const fn to_index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_index() + 1)
    }
}

impl Add<isize> for Rank {
    type Output = Option<Self>;
    fn add(self, rhs: isize) -> Self::Output {
        match self.to_index().checked_add_signed(rhs) {
            Some(i) if i < 8 => Some(Self::from_index(i)),
            _ => None,
        }
    }
}

/// A displacement of `x` columns and `y` rows.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: isize,
    pub y: isize,
}

impl Offset {
    pub const fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}

impl Add<Offset> for Square {
    type Output = Option<Square>;
    fn add(self, rhs: Offset) -> Self::Output {
        let file = (self.file() + rhs.x)?;
        let rank = (self.rank() + rhs.y)?;
        Some(Square::new(file, rank))
    }
}

impl<T> Index<Square> for [T; 64] {
    type Output = T;
    fn index(&self, square: Square) -> &Self::Output {
        &self[square.to_index()]
    }
}

impl<T> IndexMut<Square> for [T; 64] {
    fn index_mut(&mut self, square: Square) -> &mut Self::Output {
        &mut self[square.to_index()]
    }
}

/// A set of squares packed into a `u64`.
///
/// The highest bit holds `A1`, so iteration visits squares in
/// ascending index order.
#[derive(Clone, Serialize, Deserialize, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    #[inline]
    pub const fn new(val: u64) -> Self {
        Self(val)
    }

    #[inline]
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn from_squares<I>(squares: I) -> Self
    where
        I: IntoIterator<Item = Square>,
    {
        squares
            .into_iter()
            .map(|square| square.to_mask())
            .reduce(|m1, m2| m1 | m2)
            .unwrap_or_default()
    }

    #[inline]
    pub(crate) const fn inner(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn set(&mut self, square: Square) {
        self.0 |= square.to_mask().0;
    }

    #[inline]
    pub fn reset(&mut self, square: Square) {
        self.0 &= !square.to_mask().0;
    }

    #[inline]
    pub const fn contains(&self, square: Square) -> bool {
        (self.0 & square.to_mask().0) != 0
    }

    pub fn iter(&self) -> MaskIter {
        MaskIter(self.0)
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let square = Square::new(file, rank);
                write!(f, "{}", if self.contains(square) { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl BitOr for Mask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign<Square> for Mask {
    fn bitor_assign(&mut self, rhs: Square) {
        self.0 |= rhs.to_mask().0;
    }
}

impl BitAnd for Mask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaskIter(u64);

impl Iterator for MaskIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(self.0.leading_zeros() as usize);
            self.0 &= !square.to_mask().inner();
            return Some(square);
        }
        None
    }
}

impl DoubleEndedIterator for MaskIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.0 != 0 {
            let square = Square::from_index(63 - self.0.trailing_zeros() as usize);
            self.0 &= !square.to_mask().inner();
            return Some(square);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip() {
        for square in Square::iter() {
            let index = square.to_index() as isize;
            assert_eq!(Square::try_from_index(index), Some(square));
            assert_eq!(Square::from_coords(square.x(), square.y()), Some(square));
            assert_eq!(square.y() * 8 + square.x(), index);
        }
    }
    #[test]
    fn test_index_out_of_range() {
        assert_eq!(Square::try_from_index(-1), None);
        assert_eq!(Square::try_from_index(64), None);
        assert_eq!(Square::try_from_index(isize::MIN), None);
        assert_eq!(Square::try_from_index(isize::MAX), None);
    }
    #[test]
    fn test_coords_out_of_range() {
        assert_eq!(Square::from_coords(-1, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
        assert_eq!(Square::from_coords(8, 8), None);
    }
    #[test]
    fn test_index_to_coords() {
        assert_eq!(Square::from_index(31).to_coords(), (7, 3));
        assert_eq!(Square::from_index(32).to_coords(), (0, 4));
        assert_eq!(Square::from_index(26).to_coords(), (2, 3));
        assert_eq!(Square::from_index(33).to_coords(), (1, 4));
        assert_eq!(Square::from_index(0), A1);
        assert_eq!(Square::from_index(63), H8);
    }
    #[test]
    fn test_square_names() {
        assert_eq!(Square::try_from_string("e2"), Some(E2));
        assert_eq!(Square::try_from_string("H8"), Some(H8));
        assert_eq!(Square::try_from_string("i1"), None);
        assert_eq!(Square::try_from_string("a9"), None);
        assert_eq!(Square::try_from_string("a10"), None);
        assert_eq!(E2.to_string(), "e2");
    }
    #[test]
    fn test_offset_leaves_board() {
        assert_eq!(A1 + Offset::new(-1, 0), None);
        assert_eq!(H8 + Offset::new(0, 1), None);
        assert_eq!(A1 + Offset::new(2, 1), Some(C2));
    }
    #[test]
    fn test_mask_iterates_in_index_order() {
        let mask = Mask::from_squares([H8, A1, D4, B1]);
        assert_eq!(mask.len(), 4);
        let squares: Vec<Square> = mask.iter().collect();
        assert_eq!(squares, vec![A1, B1, D4, H8]);
        let reversed: Vec<Square> = mask.iter().rev().collect();
        assert_eq!(reversed, vec![H8, D4, B1, A1]);
    }
    #[test]
    fn test_mask_set_and_reset() {
        let mut mask = Mask::empty();
        mask.set(C3);
        assert!(mask.contains(C3));
        mask |= E5;
        assert_eq!(mask.len(), 2);
        mask.reset(C3);
        assert!(!mask.contains(C3));
        assert!(mask.contains(E5));
    }
}
