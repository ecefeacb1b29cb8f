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

//! A `hand` owned by seat 0 with an explicit owner-only visibility rule,
//! holding one `card` — exercises `toJSONForPlayer`'s container-vs-contents
//! distinction without any card-game rules attached.

use game::Game;
use primitives::attribute::{AttributeMap, AttributeValue, OWNER_KEY};
use primitives::element_class::ElementClass;
use primitives::seat::Seat;
use state::command::Command;
use state::player::{Player, Players};
use state::tree::Finder;
use state::visibility::VisibilityRule;

/// Two seats; a `Hand` owned by seat 0 holding a single `Card`, with an
/// explicit owner-only visibility rule on the hand itself.
pub fn hidden_hand_game(seed: u64) -> Game {
    let players = Players::new(vec![Player::new(Seat::new(0), "P0"), Player::new(Seat::new(1), "P1")]);
    let mut game = Game::new(seed, players);
    let root = game.state().tree.root();

    let mut hand_attrs = AttributeMap::new();
    hand_attrs.insert(OWNER_KEY.to_string(), AttributeValue::Seat(Seat::new(0)));
    game.apply(Command::Create { parent: root, class: ElementClass::Hand, name: Some("hand".into()), attrs: hand_attrs })
        .expect("creating hand");
    let hand = game.state().tree.first(root, &[Finder::Name("hand")]).expect("hand exists");
    game.apply(Command::SetVisibility { element: hand, visibility: VisibilityRule::owner_only() }).expect("setting visibility");
    game.apply(Command::Create { parent: hand, class: ElementClass::Card, name: Some("card".into()), attrs: AttributeMap::new() })
        .expect("creating card");
    game
}
