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
use serde::{Deserialize, Serialize};

/// A seat in the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub seat: Seat,
    pub name: String,
    pub color: Option<String>,
    pub avatar: Option<String>,
}

impl Player {
    pub fn new(seat: Seat, name: impl Into<String>) -> Self {
        Player { seat, name: name.into(), color: None, avatar: None }
    }
}

/// The ordered collection of players in a game. Not part of the element tree; elements reference players by
/// [Seat] rather than containing them as children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Players {
    players: Vec<Player>,
    current: Option<Seat>,
}

impl Players {
    pub fn new(players: Vec<Player>) -> Self {
        Players { players, current: None }
    }

    pub fn all(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn by_seat(&self, seat: Seat) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn current(&self) -> Option<Seat> {
        self.current
    }

    pub fn set_current(&mut self, seat: Option<Seat>) {
        self.current = seat;
    }

    /// The next seat after `seat` in turn order, wrapping around.
    pub fn next(&self, seat: Seat) -> Option<Seat> {
        let index = self.players.iter().position(|p| p.seat == seat)?;
        self.players.get((index + 1) % self.players.len()).map(|p| p.seat)
    }

    pub fn previous(&self, seat: Seat) -> Option<Seat> {
        let index = self.players.iter().position(|p| p.seat == seat)?;
        let prev_index = (index + self.players.len() - 1) % self.players.len();
        self.players.get(prev_index).map(|p| p.seat)
    }

    /// Every seat except `seat`.
    pub fn others(&self, seat: Seat) -> Vec<Seat> {
        self.players.iter().map(|p| p.seat).filter(|s| *s != seat).collect()
    }

    pub fn seats(&self) -> Vec<Seat> {
        self.players.iter().map(|p| p.seat).collect()
    }
}
