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

/// The fixed set of element kinds the core recognizes.
///
/// A closed, tagged variant rather than a textual class name plus runtime
/// registry: class dispatch is a `match`, not a lookup table, and
/// serialization emits the tag directly rather than a class-name string
/// resolved through reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementClass {
    /// The single root of the visible tree.
    GameRoot,
    /// The off-tree subtree that receives removed pieces.
    Pile,
    Space,
    Piece,
    Grid,
    GridCell,
    HexGrid,
    HexCell,
    Die,
    DicePool,
    Card,
    Deck,
    Hand,
}

impl ElementClass {
    /// Spaces (and space-like containers) may carry a zone-visibility default
    /// and fire enter/exit hooks on their children; pieces may not.
    pub fn is_space_like(self) -> bool {
        matches!(
            self,
            ElementClass::GameRoot
                | ElementClass::Pile
                | ElementClass::Space
                | ElementClass::Grid
                | ElementClass::GridCell
                | ElementClass::HexGrid
                | ElementClass::HexCell
                | ElementClass::DicePool
                | ElementClass::Deck
                | ElementClass::Hand
        )
    }

    /// Pieces may be moved between spaces/pieces and may be removed to the
    /// pile; spaces structure the tree but are not themselves relocated by
    /// the `MOVE` command family.
    pub fn is_piece_like(self) -> bool {
        matches!(self, ElementClass::Piece | ElementClass::Die | ElementClass::Card)
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
