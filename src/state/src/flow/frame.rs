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
use std::rc::Rc;

use primitives::attribute::AttributeValue;
use primitives::seat::Seat;

use crate::flow::node::FlowNode;

/// Per-player progress within an active `simultaneous-action-step`.
///
/// Each awaiting player gets their own entry rather than a single
/// frame-wide boolean bag, modeling partial completion of a simultaneous
/// step as a per-player sub-state machine.
#[derive(Debug, Clone)]
pub struct PlayerProgress {
    pub done: bool,
}

/// Node-kind-specific data carried alongside a [FlowFrame].
#[derive(Clone)]
pub enum FrameLocal {
    None,
    Loop { iteration: usize },
    EachPlayer { order: Vec<Seat>, index: usize },
    ForEach { items: Vec<AttributeValue>, index: usize },
    /// Used by `if`/`switch`: true once a branch has been pushed, so that on
    /// child completion the frame knows to simply complete rather than
    /// re-evaluate the condition.
    BranchPushed,
    SimultaneousActionStep { progress: BTreeMap<Seat, PlayerProgress> },
}

/// One entry on the flow engine's frame stack: the node, a child index within
/// it, a completed flag, and node-local data.
#[derive(Clone)]
pub struct FlowFrame {
    pub node: Rc<FlowNode>,
    pub child_index: usize,
    pub completed: bool,
    pub local: FrameLocal,
}

impl FlowFrame {
    pub fn new(node: Rc<FlowNode>) -> Self {
        FlowFrame { node, child_index: 0, completed: false, local: FrameLocal::None }
    }
}
