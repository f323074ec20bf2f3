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

//! Rules core for chess and a handful of fairy pieces.
//!
//! The `board` module holds the state of a single board together with
//! move generation, legality checking and reversible move execution.
//! The `game` module layers a headless two-player session on top of it
//! (turns, take-backs, forfeits and a running score).

mod board;
mod game;

pub use board::*;
pub use game::*;
