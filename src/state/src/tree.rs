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

use std::cmp::Ordering;

use primitives::attribute::AttributeValue;
use primitives::branch::Branch;
use primitives::element_class::ElementClass;
use primitives::element_id::ElementId;
use primitives::errors::TreeError;
use primitives::seat::Seat;
use rand::seq::SliceRandom;
use rand::Rng;
use slotmap::SlotMap;

use crate::element::{ChildOrder, Element};

/// One argument to a tree query.
///
/// `Empty` and `Mine` correspond to the two reserved finder keys: `Empty`
/// matches elements with no children, `Mine` matches elements owned by the
/// current player context.
pub enum Finder<'a> {
    Name(&'a str),
    Class(ElementClass),
    Predicate(Box<dyn Fn(&Element) -> bool + 'a>),
    Empty,
    Mine(Seat),
    Attribute(&'a str, AttributeValue),
}

impl<'a> Finder<'a> {
    fn matches(&self, element: &Element) -> bool {
        match self {
            Finder::Name(name) => element.name.as_deref() == Some(*name),
            Finder::Class(class) => element.class == *class,
            Finder::Predicate(f) => f(element),
            Finder::Empty => element.is_empty(),
            Finder::Mine(seat) => element.owner == Some(*seat),
            Finder::Attribute(key, value) => element.attributes.get(*key) == Some(value),
        }
    }
}

/// The hierarchical, addressable tree of game entities.
///
/// Holds a single arena for every element reachable from either the visible
/// root or the pile, so that ids assigned before a `REMOVE` remain valid
/// afterward.
pub struct ElementTree {
    arena: SlotMap<ElementId, Element>,
    root: ElementId,
    pile: ElementId,
}

impl ElementTree {
    /// Creates a fresh tree with just a game root and its pile.
    pub fn new() -> Self {
        let mut arena = SlotMap::with_key();
        let root = arena.insert_with_key(|id| Element::new(id, ElementClass::GameRoot, None));
        let pile = arena.insert_with_key(|id| Element::new(id, ElementClass::Pile, None));
        ElementTree { arena, root, pile }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn pile(&self) -> ElementId {
        self.pile
    }

    // ---- id-total lookups ----

    pub fn at_id(&self, id: ElementId) -> Option<&Element> {
        self.arena.get(id)
    }

    pub fn at_id_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.arena.get_mut(id)
    }

    pub fn require(&self, id: ElementId) -> Result<&Element, TreeError> {
        self.at_id(id).ok_or(TreeError::UnknownElement(id))
    }

    pub fn require_mut(&mut self, id: ElementId) -> Result<&mut Element, TreeError> {
        self.at_id_mut(id).ok_or(TreeError::UnknownElement(id))
    }

    // ---- branch addressing ----

    /// The path of child indices from the root to `id`, or `None` if `id`
    /// does not descend from the visible root (it may still be reachable
    /// through the pile).
    pub fn branch_of(&self, id: ElementId) -> Option<Branch> {
        let mut path = Vec::new();
        let mut current = id;
        loop {
            let element = self.arena.get(current)?;
            let Some(parent) = element.parent else {
                return if current == self.root { Some(Branch(path.into_iter().rev().collect())) } else { None };
            };
            let parent_element = self.arena.get(parent)?;
            let index = parent_element.children.iter().position(|c| *c == current)?;
            path.push(index);
            current = parent;
        }
    }

    /// Resolves a branch path, searching the root first and the pile second
    ///.
    pub fn at_branch(&self, branch: &Branch) -> Option<ElementId> {
        self.walk_branch(self.root, branch).or_else(|| self.walk_branch(self.pile, branch))
    }

    fn walk_branch(&self, start: ElementId, branch: &Branch) -> Option<ElementId> {
        let mut current = start;
        for &index in branch.indices() {
            let element = self.arena.get(current)?;
            current = *element.children.get(index)?;
        }
        Some(current)
    }

    // ---- queries ----

    /// Recursively collects every descendant of `start` (inclusive of
    /// `start`'s children, not `start` itself) matching every finder, in tree
    /// order.
    pub fn all(&self, start: ElementId, finders: &[Finder]) -> Vec<ElementId> {
        let mut results = Vec::new();
        self.collect(start, finders, &mut results);
        results
    }

    fn collect(&self, start: ElementId, finders: &[Finder], out: &mut Vec<ElementId>) {
        let Some(element) = self.arena.get(start) else { return };
        for &child_id in &element.children {
            let Some(child) = self.arena.get(child_id) else { continue };
            if finders.iter().all(|f| f.matches(child)) {
                out.push(child_id);
            }
            self.collect(child_id, finders, out);
        }
    }

    pub fn first(&self, start: ElementId, finders: &[Finder]) -> Option<ElementId> {
        self.all(start, finders).into_iter().next()
    }

    pub fn last(&self, start: ElementId, finders: &[Finder]) -> Option<ElementId> {
        self.all(start, finders).into_iter().next_back()
    }

    pub fn first_n(&self, start: ElementId, finders: &[Finder], n: usize) -> Vec<ElementId> {
        self.all(start, finders).into_iter().take(n).collect()
    }

    pub fn last_n(&self, start: ElementId, finders: &[Finder], n: usize) -> Vec<ElementId> {
        let mut all = self.all(start, finders);
        let len = all.len();
        all.split_off(len.saturating_sub(n))
    }

    pub fn has(&self, start: ElementId, finders: &[Finder]) -> bool {
        self.first(start, finders).is_some()
    }

    pub fn count(&self, start: ElementId, finders: &[Finder]) -> usize {
        self.all(start, finders).len()
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.arena.get(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.arena.get(id).and_then(|e| e.parent)
    }

    // ---- internal setters. Only the `rules` crate's executor calls these;
    // all other mutation goes through the command executor. ----

    pub fn insert_element(&mut self, class: ElementClass, name: Option<String>) -> ElementId {
        self.arena.insert_with_key(|id| Element::new(id, class, name))
    }

    pub fn remove_from_arena(&mut self, id: ElementId) -> Option<Element> {
        self.arena.remove(id)
    }

    /// Attaches `child` to `parent`'s children list at `position`, or at the
    /// front/back per `parent`'s [ChildOrder] if no position is given.
    /// Does not detach `child` from any previous parent; callers must call
    /// [Self::detach] first.
    pub fn attach(&mut self, parent: ElementId, child: ElementId, position: Option<usize>) -> Result<(), TreeError> {
        let default_front = self
            .arena
            .get(parent)
            .map(|p| matches!(p.child_order, ChildOrder::Stacking))
            .unwrap_or(false);
        let parent_element = self.require_mut(parent)?;
        let index = position.unwrap_or(if default_front { 0 } else { parent_element.children.len() });
        let index = index.min(parent_element.children.len());
        parent_element.children.insert(index, child);
        if let Some(child_element) = self.arena.get_mut(child) {
            child_element.parent = Some(parent);
        }
        Ok(())
    }

    /// Detaches `child` from its current parent, if any. Returns the previous
    /// parent and index, so the executor can synthesize an inverse `MOVE`.
    pub fn detach(&mut self, child: ElementId) -> Option<(ElementId, usize)> {
        let parent_id = self.arena.get(child)?.parent?;
        let parent = self.arena.get_mut(parent_id)?;
        let index = parent.children.iter().position(|c| *c == child)?;
        parent.children.remove(index);
        if let Some(child_element) = self.arena.get_mut(child) {
            child_element.parent = None;
        }
        Some((parent_id, index))
    }

    /// Returns true if `descendant` is `ancestor` or a descendant of it,
    /// i.e. attaching `ancestor` under `descendant` would create a cycle
    ///.
    pub fn is_ancestor_or_self(&self, ancestor: ElementId, descendant: ElementId) -> bool {
        let mut current = Some(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.arena.get(id).and_then(|e| e.parent);
        }
        false
    }

    pub fn set_child_order(&mut self, id: ElementId, order: ChildOrder) -> Result<(), TreeError> {
        self.require_mut(id)?.child_order = order;
        Ok(())
    }

    /// Permutes `space`'s children in place using `rng`, without touching
    /// ids. Returns the pre-shuffle order so the executor can log it (the
    /// command itself is not invertible, but replay needs to reproduce it).
    pub fn shuffle(&mut self, space: ElementId, rng: &mut impl Rng) -> Result<Vec<ElementId>, TreeError> {
        let element = self.require_mut(space)?;
        let previous = element.children.clone();
        element.children.shuffle(rng);
        Ok(previous)
    }

    /// Replaces a space's children order directly (used to restore a
    /// recorded shuffle order during `SET_ORDER`/replay, and by
    /// [crate::flow]-adjacent test fixtures).
    pub fn set_children_order(&mut self, space: ElementId, order: Vec<ElementId>) -> Result<(), TreeError> {
        self.require_mut(space)?.children = order;
        Ok(())
    }
}

impl Default for ElementTree {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a query: an ordered list of element ids supporting
/// aggregate collection operations.
#[derive(Debug, Clone, Default)]
pub struct ElementCollection(pub Vec<ElementId>);

impl ElementCollection {
    pub fn new(ids: Vec<ElementId>) -> Self {
        ElementCollection(ids)
    }

    pub fn sort_by<K: Ord>(&mut self, tree: &ElementTree, ascending: bool, key: impl Fn(&Element) -> K) {
        self.0.sort_by(|a, b| {
            let ka = tree.at_id(*a).map(&key);
            let kb = tree.at_id(*b).map(&key);
            let ordering = ka.cmp(&kb);
            if ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }

    pub fn sum(&self, tree: &ElementTree, key: impl Fn(&Element) -> f64) -> f64 {
        self.0.iter().filter_map(|id| tree.at_id(*id)).map(key).sum()
    }

    pub fn min(&self, tree: &ElementTree, key: impl Fn(&Element) -> f64) -> Option<ElementId> {
        self.0
            .iter()
            .copied()
            .filter_map(|id| tree.at_id(id).map(|e| (id, key(e))))
            .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(id, _)| id)
    }

    pub fn max(&self, tree: &ElementTree, key: impl Fn(&Element) -> f64) -> Option<ElementId> {
        self.0
            .iter()
            .copied()
            .filter_map(|id| tree.at_id(id).map(|e| (id, key(e))))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(Ordering::Equal))
            .map(|(id, _)| id)
    }

    pub fn unique<K: Eq + std::hash::Hash>(&self, tree: &ElementTree, key: impl Fn(&Element) -> K) -> ElementCollection {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for &id in &self.0 {
            if let Some(element) = tree.at_id(id) {
                if seen.insert(key(element)) {
                    out.push(id);
                }
            }
        }
        ElementCollection(out)
    }

    pub fn shuffle(&self, rng: &mut impl Rng) -> ElementCollection {
        let mut out = self.0.clone();
        out.shuffle(rng);
        ElementCollection(out)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
