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

use once_cell::sync::Lazy;
use std::collections::HashMap;
use strum::IntoEnumIterator;
use thiserror::Error;

use super::material::{Capability, Kind, Piece, Stride};
use super::position::{Pos, Position};
use super::square::{Offset, Square};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("Square is off the board")]
    OffBoard,
    #[error("No piece on {0}")]
    EmptySource(Square),
    #[error("Piece on {0} belongs to the other side")]
    WrongSide(Square),
    #[error("Not a legal move")]
    Unreachable,
    #[error("Move would leave the king in check")]
    ExposesKing,
    #[error("Move record does not match the board")]
    StaleRecord,
}

/// Destinations a piece can reach by its movement pattern alone.
///
/// Pseudo-legal moves respect the board edge and occupancy (nothing
/// lands on a friendly piece, sliders stop at the first blocker) but
/// never consider whether the mover's own king is left attacked. That
/// is the job of `LegalMoves`.
pub trait PseudoMoves: AsRef<Position> {
    fn pseudo_legal_moves(&self, piece: &Piece) -> Vec<Square> {
        match piece.capability() {
            Capability::Pawn => self.pawn_moves(piece),
            Capability::Vectors { offsets, stride } => self.vector_moves(piece, offsets, stride),
        }
    }

    fn can_reach(&self, piece: &Piece, target: Square) -> bool {
        self.pseudo_legal_moves(piece).contains(&target)
    }

    fn vector_moves(&self, piece: &Piece, offsets: &[Offset], stride: Stride) -> Vec<Square> {
        let pos: &Position = self.as_ref();
        let mut result = Vec::new();
        for offset in offsets {
            let ray = ray(piece.square(), *offset);
            let steps = match stride {
                Stride::Single => &ray[..ray.len().min(1)],
                Stride::Repeat => ray,
            };
            for &dest in steps {
                match pos.contents(dest) {
                    None => result.push(dest),
                    Some(other) => {
                        if other.color() != piece.color() {
                            result.push(dest);
                        }
                        break;
                    }
                }
            }
        }
        result
    }

    fn pawn_moves(&self, piece: &Piece) -> Vec<Square> {
        let pos: &Position = self.as_ref();
        let from = piece.square();
        let forward = piece.color().forward();
        let mut result = Vec::new();
        if let Some(single) = from + Offset::new(0, forward) {
            if pos.is_vacant(single) {
                result.push(single);
                // double advance only from the home row
                if from.rank() == piece.color().pawn_rank() {
                    if let Some(double) = single + Offset::new(0, forward) {
                        if pos.is_vacant(double) {
                            result.push(double);
                        }
                    }
                }
            }
        }
        for side in [-1, 1] {
            if let Some(dest) = from + Offset::new(side, forward) {
                if matches!(pos.contents(dest), Some(other) if other.color() != piece.color()) {
                    result.push(dest);
                }
            }
        }
        result
    }
}

impl PseudoMoves for Position {}

/// Squares visited by walking `offset` from `from` until leaving the
/// board, nearest first.
pub(super) fn ray(from: Square, offset: Offset) -> &'static [Square] {
    RAYS.get(&(from, offset)).map(Vec::as_slice).unwrap_or(&[])
}

static RAYS: Lazy<HashMap<(Square, Offset), Vec<Square>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for kind in Kind::iter() {
        let Capability::Vectors { offsets, .. } = kind.capability() else {
            continue;
        };
        for &offset in offsets {
            for from in Square::iter() {
                map.entry((from, offset)).or_insert_with(|| {
                    let mut squares = Vec::new();
                    let mut next = from + offset;
                    while let Some(square) = next {
                        squares.push(square);
                        next = square + offset;
                    }
                    squares
                });
            }
        }
    }
    map
});

#[cfg(test)]
mod tests {
    use crate::*;
    use Color::*;
    use Kind::*;
    use Square::*;

    fn coords(squares: &[Square]) -> Vec<(isize, isize)> {
        squares.iter().map(|square| square.to_coords()).collect()
    }

    fn moves_at(position: &Position, square: Square) -> Vec<Square> {
        let piece = position[square].expect("no piece on square");
        position.pseudo_legal_moves(&piece)
    }

    #[test]
    fn test_ray_from_corner() {
        let squares = super::ray(A1, Offset::new(1, 1));
        assert_eq!(squares, &[B2, C3, D4, E5, F6, G7, H8]);
        assert!(super::ray(A1, Offset::new(-1, 0)).is_empty());
        assert_eq!(super::ray(A1, Offset::new(2, 1)), &[C2, E3, G4]);
    }
    #[test]
    fn test_pawn_single_and_double_advance() {
        let position = Position::default();
        assert_eq!(coords(&moves_at(&position, C2)), vec![(2, 2), (2, 3)]);
        assert_eq!(coords(&moves_at(&position, E7)), vec![(4, 5), (4, 4)]);
    }
    #[test]
    fn test_pawn_off_home_row_never_double_advances() {
        let position = Position::empty()
            .set_contents(E3, Some(Piece::white(Pawn, E3)))
            .set_contents(D6, Some(Piece::black(Pawn, D6)));
        assert_eq!(moves_at(&position, E3), vec![E4]);
        assert_eq!(moves_at(&position, D6), vec![D5]);
    }
    #[test]
    fn test_pawn_advance_blocked() {
        let position = Position::default().set_contents(E3, Some(Piece::black(Bishop, E3)));
        assert!(moves_at(&position, E2).is_empty());
        let position = Position::default().set_contents(E4, Some(Piece::black(Bishop, E4)));
        assert_eq!(moves_at(&position, E2), vec![E3]);
    }
    #[test]
    fn test_pawn_captures_diagonally_only() {
        let position = Position::default()
            .set_contents(D3, Some(Piece::black(Bishop, D3)))
            .set_contents(F3, Some(Piece::white(Knight, F3)))
            .set_contents(E3, Some(Piece::black(Rook, E3)));
        assert_eq!(moves_at(&position, E2), vec![D3]);
    }
    #[test]
    fn test_black_pawn_capture_order() {
        let position = Position::default()
            .set_contents(D6, Some(Piece::white(Bishop, D6)))
            .set_contents(F6, Some(Piece::white(Knight, F6)));
        assert_eq!(moves_at(&position, E7), vec![E6, E5, D6, F6]);
    }
    #[test]
    fn test_knight_order() {
        let position = Position::default();
        assert_eq!(coords(&moves_at(&position, B1)), vec![(2, 2), (0, 2)]);
    }
    #[test]
    fn test_king_on_empty_board() {
        let position = Position::empty().set_contents(G4, Some(Piece::white(King, G4)));
        let moves = moves_at(&position, G4);
        assert_eq!(moves.len(), 8);
        assert_eq!(moves[0].to_coords(), (7, 3));
    }
    #[test]
    fn test_king_blocked_by_own_pieces() {
        let position = Position::default();
        assert!(moves_at(&position, E1).is_empty());
    }
    #[test]
    fn test_bishop_blocked_at_start() {
        let position = Position::default();
        assert!(moves_at(&position, C1).is_empty());
        assert!(moves_at(&position, D1).is_empty());
    }
    #[test]
    fn test_rook_stops_at_capture() {
        let position = Position::empty()
            .set_contents(D4, Some(Piece::white(Rook, D4)))
            .set_contents(D6, Some(Piece::black(Pawn, D6)))
            .set_contents(F4, Some(Piece::white(Pawn, F4)));
        let moves = moves_at(&position, D4);
        assert_eq!(moves, vec![E4, C4, B4, A4, D5, D6, D3, D2, D1]);
    }
    #[test]
    fn test_queen_order() {
        let position = Position::empty()
            .set_contents(A1, Some(Piece::white(Queen, A1)))
            .set_contents(C3, Some(Piece::black(Pawn, C3)))
            .set_contents(A3, Some(Piece::white(Pawn, A3)));
        let moves = moves_at(&position, A1);
        assert_eq!(moves, vec![B2, C3, B1, C1, D1, E1, F1, G1, H1, A2]);
    }
    #[test]
    fn test_alfil_on_standard_board() {
        let position = Position::default().set_contents(D2, Some(Piece::white(Alfil, D2)));
        assert_eq!(coords(&moves_at(&position, D2)), vec![(5, 3), (1, 3)]);
        let position = Position::default().set_contents(G7, Some(Piece::black(Alfil, G7)));
        assert_eq!(coords(&moves_at(&position, G7)), vec![(4, 4)]);
    }
    #[test]
    fn test_alfil_leaps_over_pieces() {
        let position = Position::empty()
            .set_contents(F4, Some(Piece::white(Alfil, F4)))
            .set_contents(G5, Some(Piece::white(Pawn, G5)))
            .set_contents(E3, Some(Piece::black(Pawn, E3)));
        let moves = moves_at(&position, F4);
        assert_eq!(coords(&moves), vec![(7, 5), (7, 1), (3, 5), (3, 1)]);
    }
    #[test]
    fn test_nightrider_on_standard_board() {
        let position = Position::default().set_contents(B1, Some(Piece::white(Nightrider, B1)));
        let moves = moves_at(&position, B1);
        assert_eq!(coords(&moves), vec![(2, 2), (3, 4), (4, 6), (0, 2)]);
    }
    #[test]
    fn test_nightrider_on_empty_board() {
        let position = Position::empty().set_contents(D4, Some(Piece::black(Nightrider, D4)));
        assert_eq!(moves_at(&position, D4).len(), 12);
    }
    #[test]
    fn test_nightrider_blocked_only_on_landing_squares() {
        let position = Position::empty()
            .set_contents(A1, Some(Piece::white(Nightrider, A1)))
            .set_contents(B1, Some(Piece::white(Pawn, B1)))
            .set_contents(B2, Some(Piece::black(Pawn, B2)))
            .set_contents(E3, Some(Piece::white(Pawn, E3)))
            .set_contents(C5, Some(Piece::black(Knight, C5)));
        let moves = moves_at(&position, A1);
        assert_eq!(moves, vec![C2, B3, C5]);
    }
    #[test]
    fn test_can_reach() {
        let position = Position::default();
        let knight = position[G8].expect("black knight");
        assert!(position.can_reach(&knight, F6));
        assert!(!position.can_reach(&knight, G6));
        assert_eq!(knight.color(), Black);
    }
}
