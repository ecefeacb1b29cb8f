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

//! Executes the flow tree to completion, suspending when player input is
//! required, and round-trips its position through serialization.

use std::collections::BTreeMap;
use std::rc::Rc;

use color_eyre::eyre::eyre;
use primitives::attribute::AttributeValue;
use primitives::errors::ActionError;
use primitives::seat::Seat;
use state::action::Action;
use state::context::{EvalContext, ResolvedArgs};
use state::flow::frame::{FlowFrame, FrameLocal, PlayerProgress};
use state::flow::node::{Direction, FlowNode, SetVarValue};
use state::flow::position::FlowPosition;
use state::game_state::GameState;

use crate::actions;
use crate::context_impl::{Context, ReadContext};

/// A step awaiting one player's action choice.
#[derive(Debug, Clone)]
pub struct AwaitingAction {
    pub player: Seat,
    pub actions: Vec<String>,
    pub prompt: Option<String>,
}

/// One player's slot within an awaiting simultaneous step.
#[derive(Debug, Clone)]
pub struct AwaitingPlayer {
    pub actions: Vec<String>,
    pub done: bool,
}

/// What the flow is waiting on.
#[derive(Debug, Clone)]
pub enum Suspension {
    Action(AwaitingAction),
    Simultaneous { awaiting: BTreeMap<Seat, AwaitingPlayer>, prompt: Option<String> },
}

/// The result of running the flow loop to its next stopping point.
#[derive(Debug, Clone)]
pub enum FlowOutcome {
    Suspended(Suspension),
    Completed,
}

const MAX_ITERATIONS: usize = 10_000;

enum DispatchResult {
    Continue,
    Suspend(Suspension),
}

fn current_player(game: &GameState) -> Option<Seat> {
    game.players.current()
}

fn complete(game: &mut GameState, index: usize) {
    game.flow_frames[index].completed = true;
}

fn push(game: &mut GameState, node: Rc<FlowNode>) {
    game.flow_frames.push(FlowFrame::new(node));
}

/// Runs the frame-stack loop: peek the top frame, pop it if completed, else
/// dispatch by node type, until the stack empties, an
/// `isComplete` predicate fires, or a node requests suspension. Aborts with an error past [MAX_ITERATIONS] steps
///.
pub fn run(
    game: &mut GameState,
    actions: &BTreeMap<String, Action>,
    is_complete: Option<&state::flow::node::BoolFn>,
) -> color_eyre::Result<FlowOutcome> {
    let mut steps = 0usize;
    loop {
        steps += 1;
        if steps > MAX_ITERATIONS {
            return Err(eyre!("flow exceeded its {MAX_ITERATIONS}-iteration safety bound"));
        }
        if let Some(predicate) = is_complete {
            let done = {
                let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                predicate(&ctx)
            };
            if done {
                game.flow_frames.clear();
                return Ok(FlowOutcome::Completed);
            }
        }
        let Some(top) = game.flow_frames.last() else {
            return Ok(FlowOutcome::Completed);
        };
        if top.completed {
            game.flow_frames.pop();
            continue;
        }
        match dispatch(game, actions)? {
            DispatchResult::Continue => continue,
            DispatchResult::Suspend(suspension) => return Ok(FlowOutcome::Suspended(suspension)),
        }
    }
}

pub fn start(
    game: &mut GameState,
    root: Rc<FlowNode>,
    actions: &BTreeMap<String, Action>,
    is_complete: Option<&state::flow::node::BoolFn>,
) -> color_eyre::Result<FlowOutcome> {
    game.flow_frames.clear();
    push(game, root);
    run(game, actions, is_complete)
}

fn dispatch(game: &mut GameState, actions: &BTreeMap<String, Action>) -> color_eyre::Result<DispatchResult> {
    let index = game.flow_frames.len() - 1;
    let node = game.flow_frames[index].node.clone();
    match &*node {
        FlowNode::Sequence { steps } => {
            let child_index = game.flow_frames[index].child_index;
            if child_index >= steps.len() {
                complete(game, index);
            } else {
                let next = steps[child_index].clone();
                game.flow_frames[index].child_index += 1;
                push(game, next);
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::Loop { while_cond, max_iterations, body } => {
            let iteration = match game.flow_frames[index].local {
                FrameLocal::Loop { iteration } => iteration,
                _ => 0,
            };
            let within_cap = max_iterations.map_or(true, |max| iteration < max);
            let condition_holds = match while_cond {
                Some(f) => {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    f(&ctx)
                }
                None => true,
            };
            if within_cap && condition_holds {
                game.flow_frames[index].local = FrameLocal::Loop { iteration: iteration + 1 };
                push(game, body.clone());
            } else {
                complete(game, index);
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::EachPlayer { filter, direction, starting_player, body } => {
            let local = game.flow_frames[index].local.clone();
            match local {
                FrameLocal::None => {
                    let seats = build_player_order(game, filter, *direction, starting_player);
                    if seats.is_empty() {
                        complete(game, index);
                    } else {
                        game.players.set_current(Some(seats[0]));
                        game.flow_frames[index].local = FrameLocal::EachPlayer { order: seats, index: 0 };
                        push(game, body.clone());
                    }
                }
                FrameLocal::EachPlayer { order, index: current } => {
                    let next = current + 1;
                    if next >= order.len() {
                        complete(game, index);
                    } else {
                        game.players.set_current(Some(order[next]));
                        game.flow_frames[index].local = FrameLocal::EachPlayer { order, index: next };
                        push(game, body.clone());
                    }
                }
                _ => complete(game, index),
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::ForEach { collection, var_name, body } => {
            let local = game.flow_frames[index].local.clone();
            match local {
                FrameLocal::None => {
                    let items = {
                        let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                        collection(&ctx)
                    };
                    if items.is_empty() {
                        complete(game, index);
                    } else {
                        game.flow_variables.insert(var_name.clone(), items[0].clone());
                        game.flow_frames[index].local = FrameLocal::ForEach { items, index: 0 };
                        push(game, body.clone());
                    }
                }
                FrameLocal::ForEach { items, index: current } => {
                    let next = current + 1;
                    if next >= items.len() {
                        complete(game, index);
                    } else {
                        game.flow_variables.insert(var_name.clone(), items[next].clone());
                        game.flow_frames[index].local = FrameLocal::ForEach { items, index: next };
                        push(game, body.clone());
                    }
                }
                _ => complete(game, index),
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::If { condition, then_branch, else_branch } => {
            if matches!(game.flow_frames[index].local, FrameLocal::BranchPushed) {
                complete(game, index);
                return Ok(DispatchResult::Continue);
            }
            let result = {
                let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                condition(&ctx)
            };
            game.flow_frames[index].local = FrameLocal::BranchPushed;
            if result {
                push(game, then_branch.clone());
            } else if let Some(else_branch) = else_branch {
                push(game, else_branch.clone());
            } else {
                complete(game, index);
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::Switch { on, cases, default } => {
            if matches!(game.flow_frames[index].local, FrameLocal::BranchPushed) {
                complete(game, index);
                return Ok(DispatchResult::Continue);
            }
            let value = {
                let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                on(&ctx)
            };
            game.flow_frames[index].local = FrameLocal::BranchPushed;
            let matching = cases.iter().find(|case| case.when == value).map(|case| case.body.clone());
            match matching.or_else(|| default.clone()) {
                Some(body) => push(game, body),
                None => complete(game, index),
            }
            Ok(DispatchResult::Continue)
        }
        FlowNode::Execute { body } => {
            let mut ctx = Context::new(game, current_player(game));
            body(&mut ctx)?;
            complete(game, index);
            Ok(DispatchResult::Continue)
        }
        FlowNode::SetVar { name, value } => {
            let resolved = match value {
                SetVarValue::Static(value) => value.clone(),
                SetVarValue::Computed(f) => {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    f(&ctx)
                }
            };
            game.flow_variables.insert(name.clone(), resolved);
            complete(game, index);
            Ok(DispatchResult::Continue)
        }
        FlowNode::ActionStep { player, actions: allowed, prompt, skip_if, .. } => {
            let skip = match skip_if {
                Some(f) => {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    f(&ctx)
                }
                None => false,
            };
            if skip {
                complete(game, index);
                return Ok(DispatchResult::Continue);
            }
            let acting = match player {
                Some(f) => {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    f(&ctx)
                }
                None => current_player(game).ok_or_else(|| eyre!("action-step has no current player to act"))?,
            };
            game.players.set_current(Some(acting));
            let available = available_action_names(game, actions, allowed, acting)?;
            Ok(DispatchResult::Suspend(Suspension::Action(AwaitingAction {
                player: acting,
                actions: available,
                prompt: prompt.clone(),
            })))
        }
        FlowNode::SimultaneousActionStep { players, actions: allowed, all_done, prompt, .. } => {
            if !matches!(game.flow_frames[index].local, FrameLocal::SimultaneousActionStep { .. }) {
                let seats = match players {
                    Some(f) => {
                        let ctx = ReadContext::new(game, None, ResolvedArgs::new());
                        f(&ctx)
                    }
                    None => game.players.seats(),
                };
                let progress = seats.into_iter().map(|seat| (seat, PlayerProgress { done: false })).collect();
                game.flow_frames[index].local = FrameLocal::SimultaneousActionStep { progress };
            }
            if is_all_done(game, index, all_done) {
                complete(game, index);
                return Ok(DispatchResult::Continue);
            }
            let awaiting = build_awaiting_snapshot(game, index, actions, allowed)?;
            Ok(DispatchResult::Suspend(Suspension::Simultaneous { awaiting, prompt: prompt.clone() }))
        }
    }
}

fn build_player_order(
    game: &GameState,
    filter: &Option<state::flow::node::SeatFilterFn>,
    direction: Direction,
    starting_player: &Option<state::flow::node::SeatFn>,
) -> Vec<Seat> {
    let mut seats = game.players.seats();
    if let Some(filter) = filter {
        let ctx = ReadContext::new(game, None, ResolvedArgs::new());
        seats.retain(|seat| filter(&ctx, *seat));
    }
    if matches!(direction, Direction::Reversed) {
        seats.reverse();
    }
    if let Some(start_fn) = starting_player {
        let start_seat = {
            let ctx = ReadContext::new(game, None, ResolvedArgs::new());
            start_fn(&ctx)
        };
        if let Some(position) = seats.iter().position(|seat| *seat == start_seat) {
            seats.rotate_left(position);
        }
    }
    seats
}

fn available_action_names(
    game: &GameState,
    actions: &BTreeMap<String, Action>,
    allowed: &[String],
    seat: Seat,
) -> color_eyre::Result<Vec<String>> {
    let mut names = Vec::new();
    for name in allowed {
        let Some(action) = actions.get(name) else { continue };
        match self::actions::is_available(game, action, seat) {
            Ok(true) => names.push(name.clone()),
            Ok(false) => {}
            Err(error) => return Err(eyre!("{error}")),
        }
    }
    Ok(names)
}

fn is_all_done(game: &GameState, index: usize, all_done: &Option<state::flow::node::BoolFn>) -> bool {
    match all_done {
        Some(f) => {
            let ctx = ReadContext::new(game, None, ResolvedArgs::new());
            f(&ctx)
        }
        None => match &game.flow_frames[index].local {
            FrameLocal::SimultaneousActionStep { progress } => progress.values().all(|p| p.done),
            _ => true,
        },
    }
}

fn build_awaiting_snapshot(
    game: &GameState,
    index: usize,
    actions: &BTreeMap<String, Action>,
    allowed: &[String],
) -> color_eyre::Result<BTreeMap<Seat, AwaitingPlayer>> {
    let FrameLocal::SimultaneousActionStep { progress } = &game.flow_frames[index].local else {
        return Err(eyre!("simultaneous step has no progress state"));
    };
    let mut awaiting = BTreeMap::new();
    for (seat, player_progress) in progress {
        let names = if player_progress.done { Vec::new() } else { available_action_names(game, actions, allowed, *seat)? };
        awaiting.insert(*seat, AwaitingPlayer { actions: names, done: player_progress.done });
    }
    Ok(awaiting)
}

/// Reconstructs the suspension a host would have seen at the engine's
/// current top frame, without mutating anything. Unlike the `Suspension` a
/// `start`/`resume` call returns directly, this can be recomputed at any
/// time — in particular right after [restore], so a host that just restored
/// a position doesn't have to replay a dummy action to learn what it's
/// awaiting.
pub fn current_suspension(game: &GameState, actions: &BTreeMap<String, Action>) -> Option<Suspension> {
    let index = game.flow_frames.len().checked_sub(1)?;
    if game.flow_frames[index].completed {
        return None;
    }
    match &*game.flow_frames[index].node {
        FlowNode::ActionStep { actions: allowed, prompt, .. } => {
            let player = current_player(game)?;
            let available = available_action_names(game, actions, allowed, player).ok()?;
            Some(Suspension::Action(AwaitingAction { player, actions: available, prompt: prompt.clone() }))
        }
        FlowNode::SimultaneousActionStep { actions: allowed, prompt, .. } => {
            let awaiting = build_awaiting_snapshot(game, index, actions, allowed).ok()?;
            Some(Suspension::Simultaneous { awaiting, prompt: prompt.clone() })
        }
        _ => None,
    }
}

/// Advances the flow after a host's chosen action. Requires the top frame to be an `action-step` or
/// `simultaneous-action-step`, i.e. `awaitingInput` must currently be true.
pub fn resume(
    game: &mut GameState,
    actions: &BTreeMap<String, Action>,
    is_complete: Option<&state::flow::node::BoolFn>,
    action_name: &str,
    raw_args: BTreeMap<String, AttributeValue>,
    player_seat: Option<Seat>,
) -> color_eyre::Result<FlowOutcome> {
    let index = match game.flow_frames.last() {
        Some(frame) if !frame.completed => game.flow_frames.len() - 1,
        _ => return Err(eyre!("flow is not awaiting input")),
    };
    let node = game.flow_frames[index].node.clone();
    match &*node {
        FlowNode::ActionStep { actions: allowed, repeat_until, .. } => {
            let acting = current_player(game).ok_or_else(|| eyre!("no current player to resume"))?;
            if let Some(requested) = player_seat {
                if requested != acting {
                    return Err(eyre!("player {requested} is not the current player"));
                }
            }
            if !allowed.iter().any(|name| name == action_name) {
                return Err(eyre!("action {action_name:?} is not awaited by this step"));
            }
            perform_for_flow(game, actions, action_name, acting, raw_args)?;
            let repeat = match repeat_until {
                Some(f) => {
                    let ctx = ReadContext::new(game, Some(acting), ResolvedArgs::new());
                    !f(&ctx)
                }
                None => false,
            };
            if !repeat {
                complete(game, index);
            }
        }
        FlowNode::SimultaneousActionStep { actions: allowed, player_done, .. } => {
            let FrameLocal::SimultaneousActionStep { progress } = &game.flow_frames[index].local else {
                return Err(eyre!("simultaneous step has no progress state"));
            };
            let seat = match player_seat {
                Some(seat) => seat,
                None => *progress
                    .iter()
                    .find(|(_, p)| !p.done)
                    .map(|(seat, _)| seat)
                    .ok_or_else(|| eyre!("no player is awaiting input in this step"))?,
            };
            let entry = progress.get(&seat).ok_or_else(|| eyre!("player {seat} is not part of this step"))?;
            if entry.done {
                return Err(eyre!("player {seat} has already finished this step"));
            }
            if !allowed.iter().any(|name| name == action_name) {
                return Err(eyre!("action {action_name:?} is not awaited by this step"));
            }
            perform_for_flow(game, actions, action_name, seat, raw_args)?;
            let done = match player_done {
                Some(f) => {
                    let ctx = ReadContext::new(game, Some(seat), ResolvedArgs::new());
                    f(&ctx, seat)
                }
                None => true,
            };
            if let FrameLocal::SimultaneousActionStep { progress } = &mut game.flow_frames[index].local {
                if let Some(entry) = progress.get_mut(&seat) {
                    entry.done = done;
                }
            }
        }
        _ => return Err(eyre!("flow is not awaiting input")),
    }
    run(game, actions, is_complete)
}

fn perform_for_flow(
    game: &mut GameState,
    actions: &BTreeMap<String, Action>,
    action_name: &str,
    seat: Seat,
    raw_args: BTreeMap<String, AttributeValue>,
) -> color_eyre::Result<()> {
    let action = actions.get(action_name).ok_or_else(|| eyre!("unknown action {action_name:?}"))?;
    self::actions::perform_action(game, action, seat, raw_args).map_err(|error: ActionError| eyre!("{error}"))
}

/// Emits the serializable form of the engine's current position.
pub fn serialize_position(game: &GameState) -> FlowPosition {
    let mut path = Vec::with_capacity(game.flow_frames.len());
    let mut iterations = BTreeMap::new();
    for (depth, frame) in game.flow_frames.iter().enumerate() {
        path.push(frame.child_index);
        let count = match &frame.local {
            FrameLocal::Loop { iteration } => Some(*iteration),
            FrameLocal::EachPlayer { index, .. } => Some(*index),
            FrameLocal::ForEach { index, .. } => Some(*index),
            _ => None,
        };
        if let Some(count) = count {
            iterations.insert(FlowPosition::iteration_key(depth), count);
        }
    }
    FlowPosition {
        path,
        iterations,
        player_index: game.players.current().map(|seat| seat.0),
        variables: game.flow_variables.clone(),
    }
}

/// Re-walks `root` along `position.path`, rebuilding the frame stack and
/// setting the current player and flow variables. A path entry naming a
/// step that no longer exists (e.g. the flow tree changed between versions)
/// is a fatal restore failure.
pub fn restore(game: &mut GameState, root: Rc<FlowNode>, position: &FlowPosition) -> color_eyre::Result<()> {
    game.flow_frames.clear();
    game.flow_variables = position.variables.clone();
    if let Some(seat) = position.player_index {
        game.players.set_current(Some(Seat::new(seat)));
    }
    let mut node = root;
    for (depth, &child_index) in position.path.iter().enumerate() {
        let mut frame = FlowFrame::new(node.clone());
        frame.child_index = child_index;
        let next = match &*node {
            FlowNode::Sequence { steps } => {
                // `child_index` is the index dispatch will advance to NEXT, recorded
                // after the live child was already pushed (see the `Sequence` arm of
                // `dispatch`), so the active child is always `child_index - 1`: a
                // suspension never leaves a `Sequence` frame on top of the stack.
                let active = child_index.checked_sub(1).ok_or_else(|| eyre!("flow position names a removed step"))?;
                Some(steps.get(active).cloned().ok_or_else(|| eyre!("flow position names a removed step"))?)
            }
            FlowNode::Loop { body, .. } => {
                let iteration = position.iterations.get(&FlowPosition::iteration_key(depth)).copied().unwrap_or(0);
                frame.local = FrameLocal::Loop { iteration };
                Some(body.clone())
            }
            FlowNode::EachPlayer { filter, direction, starting_player, body } => {
                let seats = build_player_order(game, filter, *direction, starting_player);
                let position_index = position.iterations.get(&FlowPosition::iteration_key(depth)).copied().unwrap_or(0);
                if let Some(seat) = seats.get(position_index) {
                    game.players.set_current(Some(*seat));
                }
                frame.local = FrameLocal::EachPlayer { order: seats, index: position_index };
                Some(body.clone())
            }
            FlowNode::ForEach { collection, var_name, body } => {
                let items = {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    collection(&ctx)
                };
                let position_index = position.iterations.get(&FlowPosition::iteration_key(depth)).copied().unwrap_or(0);
                if let Some(item) = items.get(position_index) {
                    game.flow_variables.insert(var_name.clone(), item.clone());
                }
                frame.local = FrameLocal::ForEach { items, index: position_index };
                Some(body.clone())
            }
            FlowNode::If { condition, then_branch, else_branch } => {
                let result = {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    condition(&ctx)
                };
                frame.local = FrameLocal::BranchPushed;
                if result { Some(then_branch.clone()) } else { else_branch.clone() }
            }
            FlowNode::Switch { on, cases, default } => {
                let value = {
                    let ctx = ReadContext::new(game, current_player(game), ResolvedArgs::new());
                    on(&ctx)
                };
                frame.local = FrameLocal::BranchPushed;
                cases.iter().find(|case| case.when == value).map(|case| case.body.clone()).or_else(|| default.clone())
            }
            FlowNode::ActionStep { .. } | FlowNode::SimultaneousActionStep { .. } | FlowNode::Execute { .. } | FlowNode::SetVar { .. } => None,
        };
        game.flow_frames.push(frame);
        match next {
            Some(next_node) => node = next_node,
            None => break,
        }
    }
    reinitialize_simultaneous_progress(game);
    Ok(())
}

/// A restored position does not carry per-seat `done` state for an
/// in-progress simultaneous step; the restored step resumes with every seat awaiting, which is
/// the behavior a host sees if it only ever captures positions between
/// individual players' turns rather than mid-step.
fn reinitialize_simultaneous_progress(game: &mut GameState) {
    let seats = match game.flow_frames.last().map(|frame| frame.node.clone()) {
        Some(node) => match &*node {
            FlowNode::SimultaneousActionStep { players, .. } => Some(match players {
                Some(f) => {
                    let ctx = ReadContext::new(game, None, ResolvedArgs::new());
                    f(&ctx)
                }
                None => game.players.seats(),
            }),
            _ => None,
        },
        None => None,
    };
    if let Some(seats) = seats {
        let progress = seats.into_iter().map(|seat| (seat, PlayerProgress { done: false })).collect();
        if let Some(last) = game.flow_frames.last_mut() {
            last.local = FrameLocal::SimultaneousActionStep { progress };
        }
    }
}
