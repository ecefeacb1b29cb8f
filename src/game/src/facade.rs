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

//! The single object a host talks to: composes the element tree, command executor, action
//! system, and flow engine behind one API, and is the only place that knows
//! how all four fit together.

use std::collections::BTreeMap;
use std::rc::Rc;

use primitives::attribute::AttributeValue;
use primitives::errors::{ActionError, CommandError};
use primitives::seat::Seat;
use rules::context_impl::ReadContext;
use rules::queries::picks;
use rules::{actions, executor, flow};
use state::action::Action;
use state::command::Command;
use state::context::EvalContext;
use state::flow::node::{BoolFn, FlowNode};
use state::flow::position::FlowPosition;
use state::game_state::{GamePhase, GameState};
use state::player::Players;

pub use rules::flow::{AwaitingAction, AwaitingPlayer, Suspension};

/// A top-level predicate consulted on flow completion, separate from
/// `isComplete`.
pub type WinnersFn = Rc<dyn Fn(&dyn EvalContext) -> Option<Vec<Seat>>>;

/// A snapshot of what the flow engine is doing right now: the lifecycle phase, whose turn it is, and — if the
/// flow is suspended — what it is waiting on.
#[derive(Debug, Clone)]
pub struct FlowState {
    pub phase: GamePhase,
    pub current_player: Option<Seat>,
    pub awaiting: Option<Suspension>,
}

/// The wire form of one action submission: a name, the acting seat, and an argument map whose values may
/// still be raw JSON (`{__elementRef: branch}`, seat-index integers, or
/// element ids) rather than resolved in-memory values.
#[derive(Debug, Clone)]
pub struct SerializedAction {
    pub name: String,
    pub player: Seat,
    pub args: BTreeMap<String, serde_json::Value>,
}

/// Ties the element tree, command executor, action system, and flow engine
/// together into the one object a host links against.
///
/// `Game` owns a single [GameState] and never exposes it for unmediated
/// mutation: every state change is either a command applied through
/// [executor::apply] or a flow step driven through [flow::start]/
/// [flow::resume], applying mutations only through the element tree's
/// internal setters, never through the public API.
pub struct Game {
    state: GameState,
    actions: BTreeMap<String, Action>,
    flow_root: Option<Rc<FlowNode>>,
    is_complete: Option<BoolFn>,
    get_winners: Option<WinnersFn>,
}

impl Game {
    pub fn new(seed: u64, players: Players) -> Self {
        Game { state: GameState::new(seed, players), actions: BTreeMap::new(), flow_root: None, is_complete: None, get_winners: None }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    // ---- action registration ----

    pub fn register_action(&mut self, action: Action) {
        self.actions.insert(action.name.clone(), action);
    }

    pub fn register_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        for action in actions {
            self.register_action(action);
        }
    }

    pub fn get_action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Every registered action whose `isAvailable` is true for `player`
    ///. A crashing filter surfaces as
    /// an error naming the offending action rather than silently excluding it
    ///.
    pub fn get_available_actions(&self, player: Seat) -> Result<Vec<String>, ActionError> {
        let mut names = Vec::new();
        for (name, action) in &self.actions {
            if actions::is_available(&self.state, action, player)? {
                names.push(name.clone());
            }
        }
        Ok(names)
    }

    /// The current domain of one pick, given whatever args the host has
    /// collected from the player so far. Used to drive an incremental picker UI.
    pub fn get_selection_choices(
        &self,
        action_name: &str,
        pick_name: &str,
        player: Seat,
        raw_args: &BTreeMap<String, AttributeValue>,
    ) -> Result<Vec<AttributeValue>, ActionError> {
        let action = self.get_action(action_name).ok_or_else(|| ActionError::UnknownAction(action_name.to_string()))?;
        let pick = action.pick_named(pick_name).ok_or_else(|| ActionError::MissingPick(pick_name.to_string()))?;
        let resolved = actions::resolve_args(action, raw_args);
        let ctx = ReadContext::new(&self.state, Some(player), resolved.clone());
        let domain = picks::compute_domain(&ctx, pick, &resolved)?;
        Ok(domain.values().to_vec())
    }

    /// Resolves, validates, and runs one action directly against the current
    /// state, independent of the flow engine.
    /// [Self::continue_flow] is the flow-gated counterpart that also advances
    /// the flow position.
    #[tracing::instrument(level = "debug", skip(self, raw_args))]
    pub fn perform_action(
        &mut self,
        action_name: &str,
        player: Seat,
        raw_args: BTreeMap<String, AttributeValue>,
    ) -> Result<(), ActionError> {
        let action = self.actions.get(action_name).ok_or_else(|| ActionError::UnknownAction(action_name.to_string()))?.clone();
        actions::perform_action(&mut self.state, &action, player, raw_args)
    }

    /// Decodes a wire-format action submission and performs it.
    pub fn perform_serialized_action(&mut self, action: SerializedAction) -> color_eyre::Result<()> {
        let raw_args = action
            .args
            .into_iter()
            .map(|(name, value)| (name, crate::view::decode_value(&self.state.tree, &value)))
            .collect();
        self.perform_action(&action.name, action.player, raw_args).map_err(|error| color_eyre::eyre::eyre!("{error}"))
    }

    // ---- flow lifecycle ----

    /// Installs the flow tree this game runs, along with its top-level
    /// completion predicates.
    pub fn set_flow(&mut self, root: Rc<FlowNode>, is_complete: Option<BoolFn>, get_winners: Option<WinnersFn>) {
        self.flow_root = Some(root);
        self.is_complete = is_complete;
        self.get_winners = get_winners;
    }

    /// Transitions `setup` → `started` (via the `START_GAME` command, so the
    /// transition is itself logged and replayable) and runs the flow to its
    /// first suspension or completion.
    #[tracing::instrument(level = "info", skip(self))]
    pub fn start_flow(&mut self) -> color_eyre::Result<()> {
        let root = self.flow_root.clone().ok_or_else(|| color_eyre::eyre::eyre!("no flow has been set on this game"))?;
        self.apply(Command::StartGame).map_err(|error| color_eyre::eyre::eyre!("{error}"))?;
        let outcome = flow::start(&mut self.state, root, &self.actions, self.is_complete.as_deref())?;
        self.finish_if_completed(outcome)
    }

    /// Advances the flow after a host's chosen action: delegates to [flow::resume], then transitions to
    /// `finished` and records winners if the flow completed as a result.
    #[tracing::instrument(level = "debug", skip(self, args))]
    pub fn continue_flow(
        &mut self,
        action_name: &str,
        args: BTreeMap<String, AttributeValue>,
        player: Option<Seat>,
    ) -> color_eyre::Result<()> {
        let outcome = flow::resume(&mut self.state, &self.actions, self.is_complete.as_deref(), action_name, args, player)?;
        self.finish_if_completed(outcome)
    }

    fn finish_if_completed(&mut self, outcome: flow::FlowOutcome) -> color_eyre::Result<()> {
        if let flow::FlowOutcome::Completed = outcome {
            let winners = self.get_winners.as_ref().and_then(|f| {
                let ctx = ReadContext::new(&self.state, None, state::context::ResolvedArgs::new());
                f(&ctx)
            });
            self.apply(Command::EndGame { winners }).map_err(|error| color_eyre::eyre::eyre!("{error}"))?;
        }
        Ok(())
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn get_winners(&self) -> Option<Vec<Seat>> {
        self.state.winners()
    }

    pub fn get_flow_state(&self) -> FlowState {
        FlowState {
            phase: self.state.phase,
            current_player: self.state.players.current(),
            awaiting: flow::current_suspension(&self.state, &self.actions),
        }
    }

    pub fn is_awaiting_input(&self) -> bool {
        flow::current_suspension(&self.state, &self.actions).is_some()
    }

    /// True if `seat` is the current player awaiting an `action-step`, or is
    /// named and not yet done in an awaiting `simultaneous-action-step`
    ///.
    pub fn can_player_act(&self, seat: Seat) -> bool {
        match flow::current_suspension(&self.state, &self.actions) {
            Some(Suspension::Action(awaiting)) => awaiting.player == seat,
            Some(Suspension::Simultaneous { awaiting, .. }) => {
                awaiting.get(&seat).map(|player| !player.done).unwrap_or(false)
            }
            None => false,
        }
    }

    // ---- commands, replay, undo ----

    pub fn apply(&mut self, command: Command) -> Result<(), CommandError> {
        executor::apply(&mut self.state, command)
    }

    pub fn replay_commands(&mut self, commands: &[Command]) -> Result<(), (usize, CommandError)> {
        executor::replay_commands(&mut self.state, commands)
    }

    pub fn undo_last_command(&mut self) -> Result<bool, CommandError> {
        executor::undo_last_command(&mut self.state)
    }

    pub fn undo_commands(&mut self, n: usize) -> Result<bool, CommandError> {
        executor::undo_commands(&mut self.state, n)
    }

    /// Re-walks the flow tree along `position.path`, rebuilding the frame
    /// stack. Requires [Self::set_flow] to
    /// have been called with the same flow tree the position was captured
    /// from; a path naming a step that tree no longer has is a fatal restore
    /// failure.
    pub fn restore_flow(&mut self, position: &FlowPosition) -> color_eyre::Result<()> {
        let root = self.flow_root.clone().ok_or_else(|| color_eyre::eyre::eyre!("no flow has been set on this game"))?;
        flow::restore(&mut self.state, root, position)
    }

    pub fn serialize_flow_position(&self) -> FlowPosition {
        flow::serialize_position(&self.state)
    }

    // ---- snapshots ----

    pub fn to_json(&self) -> serde_json::Value {
        crate::view::to_json(&self.state)
    }

    pub fn to_json_for_player(&self, seat: Seat) -> serde_json::Value {
        crate::view::to_json_for_player(&self.state, seat)
    }
}
