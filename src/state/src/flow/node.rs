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

use std::rc::Rc;

use primitives::attribute::AttributeValue;
use primitives::seat::Seat;

use crate::context::{EngineContext, EvalContext};

pub type BoolFn = Rc<dyn Fn(&dyn EvalContext) -> bool>;
pub type SeatFn = Rc<dyn Fn(&dyn EvalContext) -> Seat>;
pub type SeatListFn = Rc<dyn Fn(&dyn EvalContext) -> Vec<Seat>>;
pub type SeatFilterFn = Rc<dyn Fn(&dyn EvalContext, Seat) -> bool>;
pub type ValueFn = Rc<dyn Fn(&dyn EvalContext) -> AttributeValue>;
pub type ValueListFn = Rc<dyn Fn(&dyn EvalContext) -> Vec<AttributeValue>>;
pub type ExecuteFn = Rc<dyn Fn(&mut dyn EngineContext) -> color_eyre::Result<()>>;

/// Iteration order for an `each-player` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Reversed,
}

/// A `set-var` node's value: either a constant, or computed fresh each time
/// the node runs.
#[derive(Clone)]
pub enum SetVarValue {
    Static(AttributeValue),
    Computed(ValueFn),
}

/// One `switch` case: matches when `on` evaluates to an equal value.
#[derive(Clone)]
pub struct SwitchCase {
    pub when: AttributeValue,
    pub body: Rc<FlowNode>,
}

/// The resumable, serializable tree of control nodes that drives a game
///. This is shared, immutable structure: the same
/// `Rc<FlowNode>` subtree is referenced by every [crate::flow::frame::FlowFrame]
/// built while walking it, and by any restored copy produced by re-walking
/// the tree.
pub enum FlowNode {
    Sequence { steps: Vec<Rc<FlowNode>> },
    Loop { while_cond: Option<BoolFn>, max_iterations: Option<usize>, body: Rc<FlowNode> },
    EachPlayer { filter: Option<SeatFilterFn>, direction: Direction, starting_player: Option<SeatFn>, body: Rc<FlowNode> },
    ForEach { collection: ValueListFn, var_name: String, body: Rc<FlowNode> },
    If { condition: BoolFn, then_branch: Rc<FlowNode>, else_branch: Option<Rc<FlowNode>> },
    Switch { on: ValueFn, cases: Vec<SwitchCase>, default: Option<Rc<FlowNode>> },
    ActionStep {
        player: Option<SeatFn>,
        actions: Vec<String>,
        prompt: Option<String>,
        skip_if: Option<BoolFn>,
        repeat_until: Option<BoolFn>,
    },
    SimultaneousActionStep {
        players: Option<SeatListFn>,
        actions: Vec<String>,
        player_done: Option<SeatFilterFn>,
        all_done: Option<BoolFn>,
        prompt: Option<String>,
    },
    Execute { body: ExecuteFn },
    SetVar { name: String, value: SetVarValue },
}

impl FlowNode {
    pub fn sequence(steps: Vec<Rc<FlowNode>>) -> Rc<FlowNode> {
        Rc::new(FlowNode::Sequence { steps })
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            FlowNode::Sequence { .. } => "sequence",
            FlowNode::Loop { .. } => "loop",
            FlowNode::EachPlayer { .. } => "each-player",
            FlowNode::ForEach { .. } => "for-each",
            FlowNode::If { .. } => "if",
            FlowNode::Switch { .. } => "switch",
            FlowNode::ActionStep { .. } => "action-step",
            FlowNode::SimultaneousActionStep { .. } => "simultaneous-action-step",
            FlowNode::Execute { .. } => "execute",
            FlowNode::SetVar { .. } => "set-var",
        }
    }
}
