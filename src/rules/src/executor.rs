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

//! The single point of mutation:
//! resolves ids, validates preconditions, captures whatever pre-state the
//! inverse needs, applies through the element tree's internal setters, and
//! appends to [CommandHistory] on success.

use primitives::errors::CommandError;
use primitives::seat::Seat;
use state::command::{Command, CommandRecord, PreState};
use state::game_state::GameState;

use crate::mutations::tree;
use crate::queries::visibility::effective_rule;

/// Applies one command to `game`. On success the command (plus the
/// pre-state its inverse needs) is appended to history; on failure `game` is
/// left untouched.
#[tracing::instrument(level = "debug", skip(game))]
pub fn apply(game: &mut GameState, command: Command) -> Result<(), CommandError> {
    game.zone_events.clear();
    let pre_state = apply_effect(game, &command)?;
    game.history.push(CommandRecord { command, pre_state });
    Ok(())
}

fn apply_effect(game: &mut GameState, command: &Command) -> Result<PreState, CommandError> {
    match command {
        Command::Create { parent, class, name, attrs } => {
            let id = tree::create(&mut game.tree, *parent, *class, name.clone(), attrs.clone())?;
            Ok(PreState::Created { ids: vec![id] })
        }
        Command::CreateMany { parent, class, name, count, attrs_list } => {
            let ids = tree::create_many(&mut game.tree, *parent, *class, name.clone(), *count, attrs_list.clone())?;
            Ok(PreState::Created { ids })
        }
        Command::Move { element, destination, position } => {
            let outcome = tree::move_element(&mut game.tree, *element, *destination, *position)?;
            game.zone_events = outcome.events;
            Ok(PreState::Moved { previous_parent: outcome.previous_parent, previous_index: outcome.previous_index })
        }
        Command::Remove { element } => {
            let outcome = tree::remove(&mut game.tree, *element)?;
            game.zone_events = outcome.events;
            Ok(PreState::Removed { previous_parent: outcome.previous_parent, previous_index: outcome.previous_index })
        }
        Command::Shuffle { space } => {
            tree::shuffle(&mut game.tree, *space, &mut game.rng)?;
            Ok(PreState::None)
        }
        Command::SetAttribute { element, key, value } => {
            let target = game.tree.require_mut(*element)?;
            let previous_value = target.attributes.insert(key.clone(), value.clone());
            Ok(PreState::AttributeChanged { previous_value })
        }
        Command::SetVisibility { element, visibility } => {
            let target = game.tree.require_mut(*element)?;
            let previous_visibility = target.visibility.replace(visibility.clone());
            Ok(PreState::VisibilityChanged { previous_visibility })
        }
        Command::AddVisibleTo { element, players } => {
            let previous_visibility = game.tree.require(*element)?.visibility.clone();
            let mut rule = previous_visibility.clone().unwrap_or_else(|| effective_rule(&game.tree, *element));
            let newly_added: Vec<Seat> = players.iter().copied().filter(|s| !rule.add_players.contains(s)).collect();
            rule.add_players.extend(newly_added.iter().copied());
            rule.explicit = true;
            game.tree.require_mut(*element)?.visibility = Some(rule);
            Ok(PreState::VisibleToAdded { newly_added, previous_visibility })
        }
        Command::SetOrder { space, order } => {
            let previous_order = game.tree.require(*space)?.child_order;
            tree::set_order(&mut game.tree, *space, *order)?;
            Ok(PreState::OrderChanged { previous_order })
        }
        Command::SetCurrentPlayer { seat } => {
            let previous_seat = game.players.current();
            game.players.set_current(*seat);
            Ok(PreState::CurrentPlayerChanged { previous_seat })
        }
        Command::Message { text, data } => {
            game.messages.push(state::game_state::Message { text: text.clone(), data: data.clone() });
            Ok(PreState::None)
        }
        Command::StartGame => {
            game.phase = state::game_state::GamePhase::Started;
            Ok(PreState::None)
        }
        Command::EndGame { winners } => {
            game.phase = state::game_state::GamePhase::Finished;
            if let Some(winners) = winners {
                let values = winners.iter().map(|s| primitives::attribute::AttributeValue::Int(s.0 as i64)).collect();
                game.settings.insert("winners".to_string(), primitives::attribute::AttributeValue::List(values));
            }
            Ok(PreState::None)
        }
    }
}

/// Replays `commands` in order from `game`'s current (typically fresh)
/// state. Aborts on the first failure, naming its index.
pub fn replay_commands(game: &mut GameState, commands: &[Command]) -> Result<(), (usize, CommandError)> {
    for (index, command) in commands.iter().enumerate() {
        apply(game, command.clone()).map_err(|error| (index, error))?;
    }
    Ok(())
}

/// Undoes the most recently applied command if it is invertible, by
/// synthesizing and applying its inverse directly (not through [apply], so
/// undo never grows the history) and popping the record. Returns `false`
/// without touching history if the last command is not invertible or the
/// history is empty.
pub fn undo_last_command(game: &mut GameState) -> Result<bool, CommandError> {
    let Some(last) = game.history.last() else { return Ok(false) };
    if !last.is_invertible() {
        return Ok(false);
    }
    let record = game.history.pop().expect("just checked last() is Some");
    apply_inverse(game, &record)?;
    Ok(true)
}

/// Calls [undo_last_command] up to `n` times, stopping at the first
/// non-invertible command or empty history and reporting `false` if that
/// happened before all `n` undos completed.
pub fn undo_commands(game: &mut GameState, n: usize) -> Result<bool, CommandError> {
    for _ in 0..n {
        if !undo_last_command(game)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn apply_inverse(game: &mut GameState, record: &CommandRecord) -> Result<(), CommandError> {
    match (&record.command, &record.pre_state) {
        (Command::Create { .. } | Command::CreateMany { .. }, PreState::Created { ids }) => {
            for id in ids.iter().rev() {
                game.tree.detach(*id);
                game.tree.remove_from_arena(*id);
            }
            Ok(())
        }
        (Command::Move { element, .. }, PreState::Moved { previous_parent, previous_index }) => {
            game.tree.detach(*element);
            game.tree.attach(*previous_parent, *element, Some(*previous_index))?;
            Ok(())
        }
        (Command::Remove { element }, PreState::Removed { previous_parent, previous_index }) => {
            game.tree.detach(*element);
            game.tree.attach(*previous_parent, *element, Some(*previous_index))?;
            Ok(())
        }
        (Command::SetAttribute { element, key, .. }, PreState::AttributeChanged { previous_value }) => {
            let target = game.tree.require_mut(*element)?;
            match previous_value {
                Some(value) => {
                    target.attributes.insert(key.clone(), value.clone());
                }
                None => {
                    target.attributes.remove(key);
                }
            }
            Ok(())
        }
        (Command::SetVisibility { element, .. }, PreState::VisibilityChanged { previous_visibility }) => {
            game.tree.require_mut(*element)?.visibility = previous_visibility.clone();
            Ok(())
        }
        (Command::AddVisibleTo { element, .. }, PreState::VisibleToAdded { previous_visibility, .. }) => {
            game.tree.require_mut(*element)?.visibility = previous_visibility.clone();
            Ok(())
        }
        (Command::SetOrder { space, .. }, PreState::OrderChanged { previous_order }) => {
            tree::set_order(&mut game.tree, *space, *previous_order)?;
            Ok(())
        }
        (Command::SetCurrentPlayer { .. }, PreState::CurrentPlayerChanged { previous_seat }) => {
            game.players.set_current(*previous_seat);
            Ok(())
        }
        (Command::Message { .. }, PreState::None) => {
            game.messages.pop();
            Ok(())
        }
        _ => Ok(()),
    }
}
