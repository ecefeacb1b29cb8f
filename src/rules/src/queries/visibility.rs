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

//! Computes whether a player may see an element, given the element's own
//! rule, an inherited zone rule, and explicit overrides.

use primitives::element_id::ElementId;
use primitives::seat::Seat;
use state::tree::ElementTree;
use state::visibility::{VisibilityMode, VisibilityRule};

/// Whether `id` itself should be rendered at all for `observer`, as opposed
/// to a fully opaque placeholder, in a per-player view. This differs from [is_visible_to]: a zone's
/// `hidden`/`count-only`/`owner` rule restricts what is shown of that zone's
/// *contents* (a child count, possibly system-only attributes) without
/// hiding the zone's own existence — you still know an opponent's hand has
/// five cards. A non-container element (no children to count) has no such
/// middle ground, so those same three modes do collapse it to a placeholder.
/// The only way a *container*'s own existence disappears is `all`/`unordered`
/// with the observer named in `exceptPlayers`, which conceals it outright.
pub fn is_container_visible_to(tree: &ElementTree, id: ElementId, observer: Seat) -> bool {
    let rule = effective_rule(tree, id);
    if rule.add_players.contains(&observer) {
        return true;
    }
    let is_container = tree.at_id(id).map(|e| e.class.is_space_like()).unwrap_or(false);
    match rule.mode {
        VisibilityMode::All | VisibilityMode::Unordered => !rule.except_players.contains(&observer),
        VisibilityMode::Owner => is_container || tree.at_id(id).and_then(|e| e.owner) == Some(observer),
        VisibilityMode::Hidden | VisibilityMode::CountOnly => is_container,
    }
}

/// Starts from the element's own explicit rule, else walks ancestors for the
/// nearest Space's zone rule, else falls back to "visible to all".
pub fn effective_rule(tree: &ElementTree, id: ElementId) -> VisibilityRule {
    if let Some(element) = tree.at_id(id) {
        if let Some(rule) = &element.visibility {
            if rule.explicit {
                return rule.clone();
            }
        }
    }
    let mut current = tree.at_id(id).and_then(|e| e.parent);
    while let Some(ancestor_id) = current {
        let Some(ancestor) = tree.at_id(ancestor_id) else { break };
        if ancestor.class.is_space_like() {
            if let Some(rule) = &ancestor.visibility {
                return rule.clone();
            }
        }
        current = ancestor.parent;
    }
    VisibilityRule::visible_to_all()
}

/// Whether `observer` may see `id`, given its effective rule and owner
///: `addPlayers` is an override that applies
/// regardless of mode; `all`/`owner` otherwise gate on `exceptPlayers`/the
/// owner seat; `hidden`/`count-only` are invisible to everyone else.
pub fn is_visible_to(tree: &ElementTree, id: ElementId, observer: Seat) -> bool {
    let rule = effective_rule(tree, id);
    if rule.add_players.contains(&observer) {
        return true;
    }
    match rule.mode {
        VisibilityMode::All => !rule.except_players.contains(&observer),
        VisibilityMode::Unordered => !rule.except_players.contains(&observer),
        VisibilityMode::Owner => tree.at_id(id).and_then(|e| e.owner) == Some(observer),
        VisibilityMode::Hidden | VisibilityMode::CountOnly => false,
    }
}

/// True when `id`'s children should be replaced by a count rather than
/// shown or hidden outright.
pub fn is_count_only(tree: &ElementTree, id: ElementId) -> bool {
    effective_rule(tree, id).mode == VisibilityMode::CountOnly
}

/// True when `id`'s children should be dropped for a non-owning observer
/// because the effective rule is `hidden` or (for a non-owner) `owner`.
pub fn hides_children_from(tree: &ElementTree, id: ElementId, observer: Seat) -> bool {
    let rule = effective_rule(tree, id);
    if rule.add_players.contains(&observer) {
        return false;
    }
    match rule.mode {
        VisibilityMode::Hidden | VisibilityMode::CountOnly => true,
        VisibilityMode::Owner => tree.at_id(id).and_then(|e| e.owner) != Some(observer),
        VisibilityMode::All | VisibilityMode::Unordered => false,
    }
}
