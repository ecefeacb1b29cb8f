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

//! The single object a host talks to: composes the element tree, command executor, action
//! system, and flow engine from `rules`/`state` behind one API, and owns the
//! serialization boundary (`view`) between in-memory ids and the wire format.

mod facade;
mod view;

pub use facade::{AwaitingAction, AwaitingPlayer, FlowState, Game, SerializedAction, Suspension};
