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
use primitives::element_class::ElementClass;
use primitives::errors::ActionError;
use primitives::seat::Seat;
use state::tree::Finder;
use testing::filtered_pick;

#[test]
fn a_filter_dependent_pick_rejects_choosing_the_same_element_twice() {
    let mut game = filtered_pick::filtered_pick_game(5, 3);
    assert!(game.get_available_actions(Seat::new(0)).unwrap().contains(&"move".to_string()));

    let root = game.state().tree.root();
    let piece = game.state().tree.first(root, &[Finder::Class(ElementClass::Piece)]).unwrap();

    let mut args = BTreeMap::new();
    args.insert("p".to_string(), AttributeValue::ElementRef(piece));
    args.insert("dest".to_string(), AttributeValue::ElementRef(piece));
    let result = game.perform_action("move", Seat::new(0), args);

    assert_eq!(result, Err(ActionError::ValueNotInDomain { pick: "dest".to_string() }));
}

#[test]
fn distinct_pieces_are_accepted() {
    let mut game = filtered_pick::filtered_pick_game(5, 3);
    let root = game.state().tree.root();
    let pieces = game.state().tree.all(root, &[Finder::Class(ElementClass::Piece)]);
    assert_eq!(pieces.len(), 3);

    let mut args = BTreeMap::new();
    args.insert("p".to_string(), AttributeValue::ElementRef(pieces[0]));
    args.insert("dest".to_string(), AttributeValue::ElementRef(pieces[1]));
    game.perform_action("move", Seat::new(0), args).unwrap();
}

#[test]
fn a_filter_that_panics_on_a_missing_dependency_surfaces_as_a_structured_error() {
    let game = filtered_pick::filtered_pick_game(5, 3);
    let action = game.get_action("risky_move").unwrap();
    let result = rules::actions::is_available(game.state(), action, Seat::new(0));
    match result {
        Err(ActionError::FilterFailed(pick, _message)) => assert_eq!(pick, "dest"),
        other => panic!("expected a structured FilterFailed error naming \"dest\", got {other:?}"),
    }
}
