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

use primitives::attribute::AttributeMap;
use primitives::element_class::ElementClass;
use primitives::element_id::ElementId;
use primitives::seat::Seat;

use crate::visibility::VisibilityRule;

/// How a container orders newly-inserted children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOrder {
    /// New children are appended (the default).
    Normal,
    /// New children are prepended, as with a stack of cards dealt face down.
    Stacking,
}

impl Default for ChildOrder {
    fn default() -> Self {
        ChildOrder::Normal
    }
}

/// A node in the element tree.
#[derive(Debug, Clone)]
pub struct Element {
    /// Assigned from a monotonically increasing counter at creation and never
    /// reused, even after removal. Backed by a slotmap key rather than a raw integer
    /// so that id lookups can never alias a removed-and-reused slot.
    pub id: ElementId,
    pub name: Option<String>,
    pub class: ElementClass,
    pub children: Vec<ElementId>,
    pub parent: Option<ElementId>,
    pub owner: Option<Seat>,
    /// Set only when `SET_VISIBILITY` has been applied directly to this
    /// element; otherwise visibility is resolved by walking ancestors for a
    /// zone rule.
    pub visibility: Option<VisibilityRule>,
    /// Only meaningful for container classes.
    pub child_order: ChildOrder,
    pub attributes: AttributeMap,
}

impl Element {
    pub fn new(id: ElementId, class: ElementClass, name: Option<String>) -> Self {
        Element {
            id,
            name,
            class,
            children: Vec::new(),
            parent: None,
            owner: None,
            visibility: None,
            child_order: ChildOrder::Normal,
            attributes: AttributeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
