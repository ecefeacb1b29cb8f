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

use primitives::seat::Seat;
use testing::hidden_hand;

fn find_by_name<'a>(value: &'a serde_json::Value, name: &str) -> Option<&'a serde_json::Value> {
    if value.get("name").and_then(|n| n.as_str()) == Some(name) {
        return Some(value);
    }
    value.get("children")?.as_array()?.iter().find_map(|child| find_by_name(child, name))
}

#[test]
fn owner_sees_into_the_hand_and_others_see_only_its_count() {
    let game = hidden_hand::hidden_hand_game(1);

    let owner_view = game.to_json_for_player(Seat::new(0));
    let hand = find_by_name(&owner_view, "hand").expect("hand is present in the owner's view");
    assert!(hand.get("children").is_some(), "the owner should see the hand's children array");
    assert!(find_by_name(hand, "card").is_some(), "the owner should see the card inside");

    let other_view = game.to_json_for_player(Seat::new(1));
    let hand = find_by_name(&other_view, "hand").expect("the hand container itself is still visible");
    assert!(hand.get("children").is_none(), "a non-owner must not see the hand's children array");
    assert_eq!(hand.get("childCount").and_then(|c| c.as_u64()), Some(1));

    let full_view = game.to_json();
    let hand = find_by_name(&full_view, "hand").expect("toJSON is unfiltered");
    assert!(find_by_name(hand, "card").is_some(), "toJSON always shows the card regardless of visibility");
}
