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

//! Shared primitive types for the BoardSmith engine: ids, seats, branch
//! addressing, the attribute-value union, and the error taxonomy. Nothing in
//! this crate depends on any other workspace member.

pub mod attribute;
pub mod branch;
pub mod element_class;
pub mod element_id;
pub mod errors;
pub mod rng;
pub mod seat;
