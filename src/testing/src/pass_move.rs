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

//! A two-seat game with a `board` space, an empty `hand` space, and a `pass`
//! action driven by an `each-player` flow: exercises command replay, undo,
//! and flow position serialize/restore without any card-specific machinery.

use std::rc::Rc;

use game::Game;
use primitives::attribute::AttributeMap;
use primitives::element_class::ElementClass;
use primitives::errors::ActionError;
use primitives::seat::Seat;
use state::action::Action;
use state::command::Command;
use state::flow::node::{Direction, FlowNode};
use state::pick::{Pick, PickKind};
use state::player::{Player, Players};
use state::tree::Finder;

fn two_players() -> Players {
    Players::new(vec![Player::new(Seat::new(0), "P0"), Player::new(Seat::new(1), "P1")])
}

fn pass_action() -> Action {
    Action::new("pass", Rc::new(|_args, _ctx| Ok(())))
}

fn move_action() -> Action {
    Action::new(
        "move",
        Rc::new(|args, ctx| {
            let piece = args
                .get("piece")
                .and_then(|v| v.as_element_ref())
                .ok_or_else(|| ActionError::MissingPick("piece".into()))?;
            let dest = args
                .get("dest")
                .and_then(|v| v.as_element_ref())
                .ok_or_else(|| ActionError::MissingPick("dest".into()))?;
            ctx.emit(Command::Move { element: piece, destination: dest, position: None })
                .map_err(|error| ActionError::ExecutionFailed(error.to_string()))
        }),
    )
    .pick(Pick::new(
        "piece",
        PickKind::Element {
            source: Some(Rc::new(|ctx| ctx.game().tree.all(ctx.game().tree.root(), &[Finder::Class(ElementClass::Piece)]))),
            class: Some(ElementClass::Piece),
            filter: None,
        },
    ))
    .pick(Pick::new(
        "dest",
        PickKind::Element {
            source: Some(Rc::new(|ctx| ctx.game().tree.all(ctx.game().tree.root(), &[Finder::Class(ElementClass::Space)]))),
            class: Some(ElementClass::Space),
            filter: None,
        },
    ))
}

fn each_player_pass_flow() -> Rc<FlowNode> {
    Rc::new(FlowNode::EachPlayer {
        filter: None,
        direction: Direction::Forward,
        starting_player: None,
        body: Rc::new(FlowNode::ActionStep {
            player: None,
            actions: vec!["pass".to_string()],
            prompt: None,
            skip_if: None,
            repeat_until: None,
        }),
    })
}

fn fixed_player_pass_step() -> Rc<FlowNode> {
    Rc::new(FlowNode::ActionStep {
        player: Some(Rc::new(|_ctx| Seat::new(0))),
        actions: vec!["pass".to_string()],
        prompt: None,
        skip_if: None,
        repeat_until: None,
    })
}

/// Two `action-step([pass])` nodes back to back under one `sequence`, used
/// to exercise restoring a suspended `Sequence` frame: the serialized
/// `child_index` names the next step, not the live one, and `restore` must
/// land back on the step that was actually suspended.
fn sequence_two_pass_flow() -> Rc<FlowNode> {
    Rc::new(FlowNode::Sequence { steps: vec![fixed_player_pass_step(), fixed_player_pass_step()] })
}

/// Two seats and the `pass`/`move` actions registered, with no elements
/// created yet — the starting point for both building a populated game and
/// for a replay target that reaches the same state purely by replaying
/// another instance's command history.
pub fn blank_two_seat_game(seed: u64) -> Game {
    let mut game = Game::new(seed, two_players());
    game.register_action(pass_action());
    game.register_action(move_action());
    game.set_flow(each_player_pass_flow(), None, None);
    game
}

/// [blank_two_seat_game] plus a `board` space holding three pieces and an
/// empty `hand` space, with `each-player(do: action-step([pass]))` installed
/// as the flow.
pub fn two_seat_game(seed: u64) -> Game {
    let mut game = blank_two_seat_game(seed);
    let root = game.state().tree.root();
    game.apply(Command::Create { parent: root, class: ElementClass::Space, name: Some("board".into()), attrs: AttributeMap::new() })
        .expect("creating board");
    game.apply(Command::Create { parent: root, class: ElementClass::Space, name: Some("hand".into()), attrs: AttributeMap::new() })
        .expect("creating hand");
    let board = game.state().tree.first(root, &[Finder::Name("board")]).expect("board exists");
    for _ in 0..3 {
        game.apply(Command::Create { parent: board, class: ElementClass::Piece, name: Some("piece".into()), attrs: AttributeMap::new() })
            .expect("creating piece");
    }
    game
}

/// A single seat with no elements and a `sequence([action-step([pass]),
/// action-step([pass])])` flow — the fixture used to exercise the
/// `Sequence` frame restore case described on [sequence_two_pass_flow].
pub fn single_seat_sequence_game(seed: u64) -> Game {
    let players = Players::new(vec![Player::new(Seat::new(0), "P0")]);
    let mut game = Game::new(seed, players);
    game.register_action(pass_action());
    game.set_flow(sequence_two_pass_flow(), None, None);
    game
}

/// A `board`/`hand` pair with a single named piece `p` in `board`, and no
/// flow started — the move/undo round-trip fixture.
pub fn single_piece_game(seed: u64) -> Game {
    let mut game = blank_two_seat_game(seed);
    let root = game.state().tree.root();
    game.apply(Command::Create { parent: root, class: ElementClass::Space, name: Some("board".into()), attrs: AttributeMap::new() })
        .expect("creating board");
    game.apply(Command::Create { parent: root, class: ElementClass::Space, name: Some("hand".into()), attrs: AttributeMap::new() })
        .expect("creating hand");
    let board = game.state().tree.first(root, &[Finder::Name("board")]).expect("board exists");
    game.apply(Command::Create { parent: board, class: ElementClass::Piece, name: Some("p".into()), attrs: AttributeMap::new() })
        .expect("creating piece");
    game
}
