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

//! The concrete [EvalContext]/[EngineContext] implementation threaded
//! through pick domains, filters, validators, conditions, and action/flow
//! `execute` bodies. `state` only defines the traits (so action and flow
//! data can store closures without depending on `rules`); this is the one
//! type in the workspace that actually implements them.

use primitives::attribute::AttributeValue;
use primitives::errors::CommandError;
use primitives::seat::Seat;
use state::command::Command;
use state::context::{EngineContext, EvalContext, ResolvedArgs};
use state::game_state::GameState;

use crate::executor;

/// Borrows a [GameState] mutably for the duration of one action execution or
/// flow dispatch step, with the current player and in-progress argument map
/// attached.
pub struct Context<'a> {
    game: &'a mut GameState,
    player: Option<Seat>,
    args: ResolvedArgs,
}

impl<'a> Context<'a> {
    pub fn new(game: &'a mut GameState, player: Option<Seat>) -> Self {
        Context { game, player, args: ResolvedArgs::new() }
    }

    pub fn with_args(game: &'a mut GameState, player: Option<Seat>, args: ResolvedArgs) -> Self {
        Context { game, player, args }
    }

    pub fn into_game(self) -> &'a mut GameState {
        self.game
    }
}

impl<'a> EvalContext for Context<'a> {
    fn game(&self) -> &GameState {
        self.game
    }

    fn player(&self) -> Option<Seat> {
        self.player
    }

    fn arg(&self, pick_name: &str) -> Option<&AttributeValue> {
        self.args.get(pick_name)
    }

    fn variable(&self, name: &str) -> Option<&AttributeValue> {
        self.game.flow_variables.get(name)
    }
}

impl<'a> EngineContext for Context<'a> {
    fn set_variable(&mut self, name: String, value: AttributeValue) {
        self.game.flow_variables.insert(name, value);
    }

    fn emit(&mut self, command: Command) -> Result<(), CommandError> {
        executor::apply(self.game, command)
    }
}

/// A shared-borrow counterpart to [Context] for the read-only evaluations
/// the action system runs many times per `performAction` call (domain
/// computation, validation): pick-by-pick, as each earlier pick's resolved
/// value becomes visible to later picks.
pub struct ReadContext<'a> {
    game: &'a GameState,
    player: Option<Seat>,
    args: ResolvedArgs,
}

impl<'a> ReadContext<'a> {
    pub fn new(game: &'a GameState, player: Option<Seat>, args: ResolvedArgs) -> Self {
        ReadContext { game, player, args }
    }
}

impl<'a> EvalContext for ReadContext<'a> {
    fn game(&self) -> &GameState {
        self.game
    }

    fn player(&self) -> Option<Seat> {
        self.player
    }

    fn arg(&self, pick_name: &str) -> Option<&AttributeValue> {
        self.args.get(pick_name)
    }

    fn variable(&self, name: &str) -> Option<&AttributeValue> {
        self.game.flow_variables.get(name)
    }
}
