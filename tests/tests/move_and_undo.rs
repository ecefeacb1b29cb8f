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

use primitives::element_class::ElementClass;
use state::command::Command;
use state::tree::Finder;
use testing::pass_move;

#[test]
fn move_then_undo_restores_the_tree() {
    let mut game = pass_move::single_piece_game(42);
    let root = game.state().tree.root();
    let board = game.state().tree.first(root, &[Finder::Name("board")]).unwrap();
    let hand = game.state().tree.first(root, &[Finder::Name("hand")]).unwrap();
    let piece = game.state().tree.first(root, &[Finder::Class(ElementClass::Piece)]).unwrap();

    let history_before = game.state().history.len();
    game.apply(Command::Move { element: piece, destination: hand, position: None }).unwrap();
    assert_eq!(game.state().history.len(), history_before + 1);
    assert_eq!(game.state().tree.parent(piece), Some(hand));
    assert_eq!(game.state().tree.children(board).len(), 0);
    assert_eq!(game.state().tree.children(hand).len(), 1);

    let undone = game.undo_last_command().unwrap();
    assert!(undone);
    assert_eq!(game.state().history.len(), history_before);
    assert_eq!(game.state().tree.parent(piece), Some(board));
    assert_eq!(game.state().tree.children(hand).len(), 0);
    assert_eq!(game.state().tree.children(board).len(), 1);
}

#[test]
fn undoing_an_empty_history_reports_no_op() {
    let mut game = pass_move::blank_two_seat_game(7);
    assert!(!game.undo_last_command().unwrap());
}
