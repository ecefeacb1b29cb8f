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

use primitives::attribute::{AttributeMap, AttributeValue};
use primitives::element_id::ElementId;
use primitives::rng::{rng_from_seed, EngineRng};
use primitives::seat::Seat;
use serde::{Deserialize, Serialize};

use crate::flow::frame::FlowFrame;
use crate::history::CommandHistory;
use crate::player::Players;
use crate::tree::ElementTree;

/// A notification that a piece crossed a Space boundary. The executor appends these during
/// `MOVE`/`REMOVE` application; an action's `execute` body (or a flow
/// node's `execute` body) can inspect the current batch through
/// [GameState::zone_events] to react to the transition, without the engine
/// itself owning any game-specific hook-dispatch machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
    Entered { space: ElementId, piece: ElementId },
    Exited { space: ElementId, piece: ElementId },
}

/// The high-level lifecycle stage of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Started,
    Finished,
}

/// A log entry emitted by the `MESSAGE` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub data: AttributeMap,
}

/// The complete state of one game in progress.
///
/// This is the aggregate every other piece of the engine operates on: the
/// element tree, the player collection, the command history, the seeded
/// PRNG, and the flow engine's frame stack all live here, exactly as the
/// teacher crate's own `GameState` aggregates its zones, players, history,
/// and rng into one struct threaded through every mutation.
pub struct GameState {
    pub tree: ElementTree,
    pub players: Players,
    pub history: CommandHistory,
    pub rng_seed: u64,
    pub rng: EngineRng,
    pub phase: GamePhase,
    pub messages: Vec<Message>,
    /// Opaque per-game settings bag. `winners` is written here under the `winners` key on game end,
    /// so the finished phase carries its winners alongside the rest of the settings.
    pub settings: AttributeMap,
    /// The flow engine's frame stack. Empty before `start` and after the
    /// flow completes.
    pub flow_frames: Vec<FlowFrame>,
    /// Flow-scoped variables, set by `set-var` nodes and `for-each` loop
    /// bodies.
    pub flow_variables: BTreeMap<String, AttributeValue>,
    /// Enter/exit notifications from the most recently applied command,
    /// cleared and repopulated by the executor on every `apply` call. Not part of any invariant the host
    /// can rely on across calls; purely a same-call observation channel.
    pub zone_events: Vec<ZoneEvent>,
}

impl GameState {
    pub fn new(seed: u64, players: Players) -> Self {
        GameState {
            tree: ElementTree::new(),
            players,
            history: CommandHistory::new(),
            rng_seed: seed,
            rng: rng_from_seed(seed),
            phase: GamePhase::Setup,
            messages: Vec::new(),
            settings: AttributeMap::new(),
            flow_frames: Vec::new(),
            flow_variables: BTreeMap::new(),
            zone_events: Vec::new(),
        }
    }

    pub fn winners(&self) -> Option<Vec<Seat>> {
        match self.settings.get("winners") {
            Some(AttributeValue::List(values)) => {
                Some(values.iter().filter_map(|v| v.as_int()).map(|i| Seat::new(i as u32)).collect())
            }
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }
}
