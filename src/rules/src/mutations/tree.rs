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

//! Structural operations over [ElementTree]: `create`, `move`, `remove`,
//! `shuffle`, `setOrder`. Each enforces its own operation-level invariants
//! rather than trusting callers.

use primitives::attribute::{AttributeMap, AttributeValue, OWNER_KEY};
use primitives::element_class::ElementClass;
use primitives::element_id::ElementId;
use primitives::errors::TreeError;
use rand::Rng;
use state::element::ChildOrder;
use state::game_state::ZoneEvent;
use state::tree::ElementTree;

fn can_contain(class: ElementClass) -> bool {
    class.is_space_like() || class.is_piece_like()
}

fn extract_owner(attrs: &mut AttributeMap) -> Option<primitives::seat::Seat> {
    match attrs.remove(OWNER_KEY) {
        Some(AttributeValue::Seat(seat)) => Some(seat),
        _ => None,
    }
}

/// Refuses to create a `Space` inside a `Piece`.
fn check_create(tree: &ElementTree, parent: ElementId, class: ElementClass) -> Result<(), TreeError> {
    let parent_element = tree.require(parent)?;
    if !can_contain(parent_element.class) {
        return Err(TreeError::NotAContainer(parent));
    }
    if class == ElementClass::Space && parent_element.class == ElementClass::Piece {
        return Err(TreeError::SpaceInsidePiece(parent));
    }
    Ok(())
}

/// Allocates the next id, assigns attributes, and inserts into `parent`'s
/// ordered children at the position dictated by its [ChildOrder].
pub fn create(
    tree: &mut ElementTree,
    parent: ElementId,
    class: ElementClass,
    name: Option<String>,
    mut attrs: AttributeMap,
) -> Result<ElementId, TreeError> {
    check_create(tree, parent, class)?;
    let owner = extract_owner(&mut attrs);
    let id = tree.insert_element(class, name);
    if let Some(element) = tree.at_id_mut(id) {
        element.attributes = attrs;
        element.owner = owner;
    }
    tree.attach(parent, id, None)?;
    Ok(id)
}

/// Same rules as [create], `n` times, one attribute map per element drawn
/// from `attrs_list`.
pub fn create_many(
    tree: &mut ElementTree,
    parent: ElementId,
    class: ElementClass,
    name: Option<String>,
    count: usize,
    attrs_list: Vec<AttributeMap>,
) -> Result<Vec<ElementId>, TreeError> {
    check_create(tree, parent, class)?;
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let mut attrs = attrs_list.get(i).cloned().unwrap_or_default();
        let owner = extract_owner(&mut attrs);
        let id = tree.insert_element(class, name.clone());
        if let Some(element) = tree.at_id_mut(id) {
            element.attributes = attrs;
            element.owner = owner;
        }
        tree.attach(parent, id, None)?;
        ids.push(id);
    }
    Ok(ids)
}

/// What the caller needs to synthesize an inverse `MOVE`/`REMOVE`, plus the
/// zone-enter/exit events the move crossed.
pub struct MoveOutcome {
    pub previous_parent: ElementId,
    pub previous_index: usize,
    pub events: Vec<ZoneEvent>,
}

/// Detaches `piece` from its current parent and attaches it to `destination`
/// at `position`. Refuses to move a piece into
/// itself or one of its own descendants.
pub fn move_element(
    tree: &mut ElementTree,
    piece: ElementId,
    destination: ElementId,
    position: Option<usize>,
) -> Result<MoveOutcome, TreeError> {
    tree.require(piece)?;
    let destination_element = tree.require(destination)?;
    let destination_class = destination_element.class;
    if tree.is_ancestor_or_self(piece, destination) {
        return Err(TreeError::DestinationCycle { piece, destination });
    }
    let (previous_parent, previous_index) =
        tree.detach(piece).ok_or(TreeError::UnknownElement(piece))?;
    let mut events = Vec::new();
    if let Some(old_parent) = tree.at_id(previous_parent) {
        if old_parent.class.is_space_like() {
            events.push(ZoneEvent::Exited { space: previous_parent, piece });
        }
    }
    tree.attach(destination, piece, position)?;
    if destination_class.is_space_like() {
        events.push(ZoneEvent::Entered { space: destination, piece });
    }
    Ok(MoveOutcome { previous_parent, previous_index, events })
}

/// Relocates `piece` to the game root's pile, preserving its id.
pub fn remove(tree: &mut ElementTree, piece: ElementId) -> Result<MoveOutcome, TreeError> {
    let pile = tree.pile();
    move_element(tree, piece, pile, None)
}

/// Permutes `space`'s children using the seeded PRNG, returning the
/// pre-shuffle order.
pub fn shuffle(tree: &mut ElementTree, space: ElementId, rng: &mut impl Rng) -> Result<Vec<ElementId>, TreeError> {
    tree.shuffle(space, rng)
}

/// Sets a container's child-insertion mode.
pub fn set_order(tree: &mut ElementTree, space: ElementId, order: ChildOrder) -> Result<(), TreeError> {
    tree.set_child_order(space, order)
}
