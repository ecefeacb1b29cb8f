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

//! The "verbs" of the BoardSmith engine: everything that walks and mutates
//! the pure data definitions in the `state` crate. Nothing here is public
//! state of its own; a `game::Game` facade composes these into a single
//! entry point for a host.

pub mod actions;
pub mod context_impl;
pub mod executor;
pub mod flow;
pub mod mutations;
pub mod queries;
