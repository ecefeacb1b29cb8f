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

//! Pure data definitions for the BoardSmith engine: the element tree, the
//! command log, action/pick declarations, and the flow tree. The `rules`
//! crate supplies the logic that walks and mutates these types.

pub mod action;
pub mod command;
pub mod context;
pub mod element;
pub mod flow;
pub mod game_state;
pub mod history;
pub mod pick;
pub mod player;
pub mod tree;
pub mod visibility;
