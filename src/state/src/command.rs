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

use primitives::attribute::{AttributeMap, AttributeValue};
use primitives::element_class::ElementClass;
use primitives::element_id::ElementId;
use primitives::seat::Seat;

use crate::element::ChildOrder;
use crate::visibility::VisibilityRule;

/// The closed set of mutations the executor recognizes.
#[derive(Debug, Clone)]
pub enum Command {
    Create { parent: ElementId, class: ElementClass, name: Option<String>, attrs: AttributeMap },
    CreateMany { parent: ElementId, class: ElementClass, name: Option<String>, count: usize, attrs_list: Vec<AttributeMap> },
    Move { element: ElementId, destination: ElementId, position: Option<usize> },
    Remove { element: ElementId },
    Shuffle { space: ElementId },
    SetAttribute { element: ElementId, key: String, value: AttributeValue },
    SetVisibility { element: ElementId, visibility: VisibilityRule },
    AddVisibleTo { element: ElementId, players: Vec<Seat> },
    SetOrder { space: ElementId, order: ChildOrder },
    SetCurrentPlayer { seat: Option<Seat> },
    Message { text: String, data: AttributeMap },
    StartGame,
    EndGame { winners: Option<Vec<Seat>> },
}

impl Command {
    /// Every command except `SHUFFLE`, `START_GAME`, and `END_GAME` is invertible.
    pub fn is_invertible_kind(&self) -> bool {
        !matches!(self, Command::Shuffle { .. } | Command::StartGame | Command::EndGame { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Create { .. } => "CREATE",
            Command::CreateMany { .. } => "CREATE_MANY",
            Command::Move { .. } => "MOVE",
            Command::Remove { .. } => "REMOVE",
            Command::Shuffle { .. } => "SHUFFLE",
            Command::SetAttribute { .. } => "SET_ATTRIBUTE",
            Command::SetVisibility { .. } => "SET_VISIBILITY",
            Command::AddVisibleTo { .. } => "ADD_VISIBLE_TO",
            Command::SetOrder { .. } => "SET_ORDER",
            Command::SetCurrentPlayer { .. } => "SET_CURRENT_PLAYER",
            Command::Message { .. } => "MESSAGE",
            Command::StartGame => "START_GAME",
            Command::EndGame { .. } => "END_GAME",
        }
    }
}

/// Pre-mutation state captured at apply time, sufficient to synthesize the
/// inverse of an invertible command.
#[derive(Debug, Clone)]
pub enum PreState {
    None,
    Created { ids: Vec<ElementId> },
    Moved { previous_parent: ElementId, previous_index: usize },
    Removed { previous_parent: ElementId, previous_index: usize },
    AttributeChanged { previous_value: Option<AttributeValue> },
    VisibilityChanged { previous_visibility: Option<VisibilityRule> },
    /// `newly_added` names the seats the command actually added (those not
    /// already present), so replaying the command twice is idempotent for
    /// inverse purposes; `previous_visibility` is the element's visibility
    /// before the command ran (`None` if it was still inheriting a zone
    /// rule), which is what the inverse restores wholesale.
    VisibleToAdded { newly_added: Vec<Seat>, previous_visibility: Option<VisibilityRule> },
    OrderChanged { previous_order: ChildOrder },
    CurrentPlayerChanged { previous_seat: Option<Seat> },
}

/// One entry in the command history: the command as logged, plus whatever
/// pre-state the executor captured to undo it.
#[derive(Debug, Clone)]
pub struct CommandRecord {
    pub command: Command,
    pub pre_state: PreState,
}

impl CommandRecord {
    pub fn is_invertible(&self) -> bool {
        self.command.is_invertible_kind()
    }
}
