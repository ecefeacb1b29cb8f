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

use derive_more::Display;

use crate::element_id::ElementId;

/// Structural failures from element-tree operations. Reported by command application; never a panic.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[display(fmt = "unknown element id {_0:?}")]
    UnknownElement(ElementId),
    #[display(fmt = "element {_0:?} is not a space and cannot contain children")]
    NotAContainer(ElementId),
    #[display(fmt = "cannot create a Space inside a Piece ({_0:?})")]
    SpaceInsidePiece(ElementId),
    #[display(fmt = "move of {piece:?} into {destination:?} would create a cycle")]
    DestinationCycle { piece: ElementId, destination: ElementId },
    #[display(fmt = "element {_0:?} has already been removed to the pile")]
    AlreadyRemoved(ElementId),
}

impl std::error::Error for TreeError {}

/// Failures from applying a logged command.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[display(fmt = "{_0}")]
    Tree(TreeError),
    #[display(fmt = "unknown player seat {_0}")]
    UnknownSeat(u32),
    #[display(fmt = "unknown attribute key {_0:?}")]
    UnknownAttribute(String),
    #[display(fmt = "command history is empty")]
    EmptyHistory,
    #[display(fmt = "the last command ({_0}) is not invertible")]
    NotInvertible(&'static str),
}

impl std::error::Error for CommandError {}

impl From<TreeError> for CommandError {
    fn from(value: TreeError) -> Self {
        CommandError::Tree(value)
    }
}

/// Failures from validating or executing a player action.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[display(fmt = "unknown action {_0:?}")]
    UnknownAction(String),
    #[display(fmt = "action {_0:?} is not currently available")]
    Unavailable(String),
    #[display(fmt = "pick {_0:?} is required but was not supplied")]
    MissingPick(String),
    #[display(fmt = "pick {pick:?} received a value outside its domain")]
    ValueNotInDomain { pick: String },
    #[display(fmt = "pick {pick:?} failed validation: {message}")]
    ValidationFailed { pick: String, message: String },
    #[display(fmt = "pick {pick:?} selected {actual} values, expected between {min} and {max}")]
    MultiSelectBounds { pick: String, actual: usize, min: usize, max: usize },
    #[display(fmt = "pick {_0:?}'s filter could not be evaluated: {_1}")]
    FilterFailed(String, String),
    #[display(fmt = "action's condition was not satisfied")]
    ConditionFailed,
    #[display(fmt = "action execution failed: {_0}")]
    ExecutionFailed(String),
}

impl std::error::Error for ActionError {}
