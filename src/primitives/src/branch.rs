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

/// A path of child indices from the tree root to some descendant, stable
/// only between mutations.
///
/// Used at the serialization boundary wherever the wire format needs to name
/// an element without exposing its arena id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Branch(pub Vec<usize>);

impl Branch {
    pub fn root() -> Self {
        Branch(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&self, index: usize) -> Branch {
        let mut path = self.0.clone();
        path.push(index);
        Branch(path)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Renders as `dot`-separated indices, e.g. `"0.2.1"`, used in the
    /// `{__elementRef: branch}` wire encoding.
    pub fn to_wire_string(&self) -> String {
        self.0.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(".")
    }

    pub fn from_wire_string(s: &str) -> Option<Branch> {
        if s.is_empty() {
            return Some(Branch::root());
        }
        s.split('.')
            .map(|part| part.parse::<usize>().ok())
            .collect::<Option<Vec<_>>>()
            .map(Branch)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire_string())
    }
}
