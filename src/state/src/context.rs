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
use primitives::errors::CommandError;
use primitives::seat::Seat;

use crate::command::Command;
use crate::game_state::GameState;

/// Arguments to an action, after the resolution step: ids and seat indices
/// have already been turned into the objects they name.
pub type ResolvedArgs = BTreeMap<String, AttributeValue>;

/// Read-only handle passed to every pure closure stored on a
/// [crate::pick::Pick] or [crate::action::Action]/[crate::flow::node::FlowNode]:
/// domain computation, filters, validators, and conditions. None of these may
/// mutate state.
///
/// `state` defines this trait (and [EngineContext] below) so that action and
/// flow data can store `Rc<dyn Fn(&dyn EvalContext) -> _>` closures without
/// depending on the `rules` crate; `rules` provides the concrete
/// implementations and owns every place that actually invokes these
/// closures, generalizing the plain `fn(game: &GameState, ...)` query
/// function pattern behind a trait because BoardSmith's closures are
/// host/game-supplied data rather than crate-local functions.
pub trait EvalContext {
    fn game(&self) -> &GameState;

    /// The player this closure is evaluated on behalf of: the acting player
    /// for an action's picks, or the current/awaiting player for a flow node.
    /// `None` outside of any player-scoped evaluation (e.g. a top-level
    /// `isComplete`/`getWinners` predicate).
    fn player(&self) -> Option<Seat>;

    /// The value chosen for an earlier pick in the same action invocation, if
    /// any. A filter referencing a pick that has not been chosen yet must
    /// see `None`, not panic.
    fn arg(&self, pick_name: &str) -> Option<&AttributeValue>;

    /// A flow-scoped variable set by a `set-var` node or a `for-each` loop
    /// body.
    fn variable(&self, name: &str) -> Option<&AttributeValue>;
}

/// Mutating handle passed to an action's `execute` body and a flow node's
/// `execute`/`set-var` body: everything [EvalContext] offers, plus the
/// ability to set flow variables and emit commands.
pub trait EngineContext: EvalContext {
    /// Sets a flow-scoped variable.
    fn set_variable(&mut self, name: String, value: AttributeValue);

    /// Emits a command through the executor. This is the sole way an
    /// action's `execute` body or a flow node's `execute`/`set-var` body may
    /// mutate state.
    fn emit(&mut self, command: Command) -> Result<(), CommandError>;
}
