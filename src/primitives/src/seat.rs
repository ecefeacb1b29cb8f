// Copyright © spellclash 2024-present
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A player's immutable, 0-based seat index.
///
/// Rather than a fixed-variant enum sized to one specific game, a seat here
/// is a plain, immutable, 0-based index: BoardSmith supports any number of
/// seats, fixed at game creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Seat(pub u32);

impl Seat {
    pub const fn new(index: u32) -> Self {
        Seat(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

impl From<u32> for Seat {
    fn from(value: u32) -> Self {
        Seat(value)
    }
}

impl From<usize> for Seat {
    fn from(value: usize) -> Self {
        Seat(value as u32)
    }
}
