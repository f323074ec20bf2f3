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

use super::material::Piece;
use super::square::Square;

/// Everything needed to take a move back: where the piece came from,
/// where it went and what (if anything) it captured.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub displaced: Option<Piece>,
}

impl MoveRecord {
    pub fn new(from: Square, to: Square, displaced: Option<Piece>) -> Self {
        Self {
            from,
            to,
            displaced,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.displaced.is_some()
    }

    #[inline]
    pub fn touches(&self, square: Square) -> bool {
        self.from == square || self.to == square
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.displaced {
            Some(_) => write!(f, "{}x{}", self.from, self.to),
            None => write!(f, "{}-{}", self.from, self.to),
        }
    }
}

/// Moves played on a board, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    records: Vec<MoveRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    pub fn last(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    /// Position of the latest entry equal to `record`, provided no later
    /// entry moved anything onto or off its squares.
    pub fn reversible(&self, record: &MoveRecord) -> Option<usize> {
        let index = self.records.iter().rposition(|r| r == record)?;
        let disturbed = self.records[index + 1..]
            .iter()
            .any(|later| later.touches(record.from) || later.touches(record.to));
        (!disturbed).then_some(index)
    }

    pub fn remove(&mut self, index: usize) -> MoveRecord {
        self.records.remove(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &MoveRecord> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Kind, Piece};
    use Square::*;

    #[test]
    fn test_stack_order() {
        let mut history = History::new();
        assert!(history.is_empty());
        history.push(MoveRecord::new(E2, E4, None));
        history.push(MoveRecord::new(D7, D5, None));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|r| r.from), Some(D7));
        assert_eq!(history.remove(1).to, D5);
        assert_eq!(history.last().map(|r| r.to), Some(E4));
        history.clear();
        assert!(history.last().is_none());
    }
    #[test]
    fn test_display() {
        let quiet = MoveRecord::new(G1, F3, None);
        let capture = MoveRecord::new(E4, D5, Some(Piece::black(Kind::Pawn, D5)));
        assert_eq!(quiet.to_string(), "g1-f3");
        assert_eq!(capture.to_string(), "e4xd5");
        assert!(capture.is_capture());
        assert!(!quiet.is_capture());
    }
    #[test]
    fn test_reversible_skips_disturbed_records() {
        let mut history = History::new();
        let knight = MoveRecord::new(G1, F3, None);
        let pawn = MoveRecord::new(E2, E4, None);
        history.push(knight);
        history.push(MoveRecord::new(B8, C6, None));
        history.push(pawn);
        assert_eq!(history.reversible(&knight), Some(0));
        assert_eq!(history.reversible(&pawn), Some(2));
        history.push(MoveRecord::new(F3, G5, None));
        assert_eq!(history.reversible(&knight), None);
        assert_eq!(history.reversible(&MoveRecord::new(D2, D4, None)), None);
        assert_eq!(history.remove(2), pawn);
        assert_eq!(history.len(), 3);
    }
}
