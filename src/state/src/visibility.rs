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

use std::collections::BTreeSet;

use primitives::seat::Seat;
use serde::{Deserialize, Serialize};

/// How an element's contents are disclosed to non-owning observers
///.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisibilityMode {
    /// Visible to everyone except `exceptPlayers`.
    All,
    /// Visible only to the element's owner (and anyone in `addPlayers`).
    Owner,
    /// Visible to no one but `addPlayers`; children are dropped entirely.
    Hidden,
    /// As `Hidden`, but the view-builder emits a child count in place of
    /// children.
    CountOnly,
    /// Children exist and their count is visible, but their relative order is
    /// not meaningful to a non-owning observer (e.g. a shuffled deck face
    /// down). Carried as a distinct mode so a host UI can choose to render it
    /// without implying order information the model doesn't have.
    Unordered,
}

/// A visibility rule, attached either explicitly to one element or as a
/// zone default inherited by a Space's descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRule {
    pub mode: VisibilityMode,
    pub add_players: BTreeSet<Seat>,
    pub except_players: BTreeSet<Seat>,
    /// True if this rule was set directly on the element (by
    /// `SET_VISIBILITY`) rather than being the built-in "visible to all"
    /// default or an inherited zone rule.
    pub explicit: bool,
}

impl VisibilityRule {
    pub fn visible_to_all() -> Self {
        VisibilityRule {
            mode: VisibilityMode::All,
            add_players: BTreeSet::new(),
            except_players: BTreeSet::new(),
            explicit: false,
        }
    }

    pub fn owner_only() -> Self {
        VisibilityRule {
            mode: VisibilityMode::Owner,
            add_players: BTreeSet::new(),
            except_players: BTreeSet::new(),
            explicit: true,
        }
    }

    pub fn hidden() -> Self {
        VisibilityRule {
            mode: VisibilityMode::Hidden,
            add_players: BTreeSet::new(),
            except_players: BTreeSet::new(),
            explicit: true,
        }
    }

    pub fn count_only() -> Self {
        VisibilityRule { mode: VisibilityMode::CountOnly, ..VisibilityRule::hidden() }
    }

    pub fn with_add_players(mut self, players: impl IntoIterator<Item = Seat>) -> Self {
        self.add_players.extend(players);
        self
    }
}
