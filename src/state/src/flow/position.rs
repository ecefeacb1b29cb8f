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

use std::collections::BTreeMap;

use primitives::attribute::AttributeValue;
use serde::{Deserialize, Serialize};

/// The serializable form of the flow engine's current position.
///
/// Sufficient to reconstruct the frame stack by re-walking the flow tree
///.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FlowPosition {
    /// One child index per active frame.
    pub path: Vec<usize>,
    /// Keyed `__iter_<depth>`.
    pub iterations: BTreeMap<String, usize>,
    pub player_index: Option<u32>,
    pub variables: BTreeMap<String, AttributeValue>,
}

impl FlowPosition {
    pub fn iteration_key(depth: usize) -> String {
        format!("__iter_{depth}")
    }
}
