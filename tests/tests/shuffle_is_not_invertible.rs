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

use state::command::Command;
use state::tree::Finder;
use testing::pass_move;

#[test]
fn shuffle_reorders_children_deterministically_and_cannot_be_undone() {
    let mut game = pass_move::two_seat_game(99);
    let root = game.state().tree.root();
    let board = game.state().tree.first(root, &[Finder::Name("board")]).unwrap();

    let before = game.state().tree.children(board).to_vec();
    game.apply(Command::Shuffle { space: board }).unwrap();
    let after_shuffle = game.state().tree.children(board).to_vec();

    // Same elements, not necessarily the same order.
    let mut sorted_before = before.clone();
    let mut sorted_after = after_shuffle.clone();
    sorted_before.sort();
    sorted_after.sort();
    assert_eq!(sorted_before, sorted_after);

    let undone = game.undo_last_command().unwrap();
    assert!(!undone, "SHUFFLE must not be invertible");
    assert_eq!(game.state().tree.children(board).to_vec(), after_shuffle, "a rejected undo must leave the tree untouched");
}

#[test]
fn replaying_the_same_seed_reproduces_the_same_shuffle() {
    let mut a = pass_move::two_seat_game(12345);
    let mut b = pass_move::two_seat_game(12345);
    let root_a = a.state().tree.root();
    let root_b = b.state().tree.root();
    let board_a = a.state().tree.first(root_a, &[Finder::Name("board")]).unwrap();
    let board_b = b.state().tree.first(root_b, &[Finder::Name("board")]).unwrap();

    a.apply(Command::Shuffle { space: board_a }).unwrap();
    b.apply(Command::Shuffle { space: board_b }).unwrap();

    assert_eq!(a.to_json(), b.to_json(), "two games built from the same seed must shuffle identically");
}
