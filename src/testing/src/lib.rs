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

//! Minimal, self-contained reference games, each exercising one engine
//! feature area without pulling in a real ruleset, so the integration suite
//! can assert on engine behavior directly instead of through
//! card-game-specific setup.

pub mod filtered_pick;
pub mod hidden_hand;
pub mod pass_move;
