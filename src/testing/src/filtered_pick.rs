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

//! `piece_count` `Piece` elements directly under the root and two actions
//! that both pick two distinct pieces (`p`, then `dest` filtered to exclude
//! whatever `p` resolved to): `move` filters safely (a not-yet-chosen `p`
//! reads as "no value", so the filter passes everything); `risky_move`
//! dereferences `p`'s value with `unwrap()` instead, the way a careless
//! filter closure might, to exercise the engine's panic-to-`ActionError`
//! boundary.

use std::rc::Rc;

use game::Game;
use primitives::element_class::ElementClass;
use primitives::seat::Seat;
use state::action::Action;
use state::pick::{ElementSource, Pick, PickKind};
use state::player::{Player, Players};
use state::tree::Finder;

fn all_pieces_source() -> ElementSource {
    Rc::new(|ctx| ctx.game().tree.all(ctx.game().tree.root(), &[Finder::Class(ElementClass::Piece)]))
}

fn move_action() -> Action {
    Action::new("move", Rc::new(|_args, _ctx| Ok(())))
        .pick(Pick::new("p", PickKind::Element { source: Some(all_pieces_source()), class: Some(ElementClass::Piece), filter: None }))
        .pick(
            Pick::new(
                "dest",
                PickKind::Element {
                    source: Some(all_pieces_source()),
                    class: Some(ElementClass::Piece),
                    filter: Some(Rc::new(|ctx, id| ctx.arg("p").and_then(|v| v.as_element_ref()) != Some(id))),
                },
            )
            .depends_on("p"),
        )
}

fn risky_move_action() -> Action {
    Action::new("risky_move", Rc::new(|_args, _ctx| Ok(())))
        .pick(Pick::new("p", PickKind::Element { source: Some(all_pieces_source()), class: Some(ElementClass::Piece), filter: None }))
        .pick(
            Pick::new(
                "dest",
                PickKind::Element {
                    source: Some(all_pieces_source()),
                    class: Some(ElementClass::Piece),
                    // Panics on a not-yet-chosen `p` instead of treating it as
                    // absent.
                    filter: Some(Rc::new(|ctx, id| ctx.arg("p").unwrap().as_element_ref().unwrap() != id)),
                },
            )
            .depends_on("p"),
        )
}

/// One seat and `piece_count` pieces directly under the root, with `move`
/// and `risky_move` registered and no flow attached.
pub fn filtered_pick_game(seed: u64, piece_count: usize) -> Game {
    let players = Players::new(vec![Player::new(Seat::new(0), "P0")]);
    let mut game = Game::new(seed, players);
    let root = game.state().tree.root();
    for _ in 0..piece_count {
        game.apply(state::command::Command::Create {
            parent: root,
            class: ElementClass::Piece,
            name: Some("piece".into()),
            attrs: primitives::attribute::AttributeMap::new(),
        })
        .expect("creating piece");
    }
    game.register_action(move_action());
    game.register_action(risky_move_action());
    game
}
