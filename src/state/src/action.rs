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

use std::rc::Rc;

use primitives::errors::ActionError;

use crate::context::{EngineContext, EvalContext, ResolvedArgs};
use crate::pick::Pick;

pub type Condition = Rc<dyn Fn(&dyn EvalContext) -> bool>;
pub type Execute = Rc<dyn Fn(&ResolvedArgs, &mut dyn EngineContext) -> Result<(), ActionError>>;

/// A named, validated, player-initiated operation that emits commands
///. Purely declarative: all side effects live in
/// `execute`.
#[derive(Clone)]
pub struct Action {
    pub name: String,
    pub prompt: Option<String>,
    pub condition: Option<Condition>,
    pub picks: Vec<Pick>,
    pub execute: Execute,
    /// Whether the commands this action emits should be treated as a unit by
    /// a host's undo UI. The executor itself always supports undoing the
    /// individual logged commands regardless of this flag; it is informative
    /// metadata for the host.
    pub undoable: bool,
}

impl Action {
    pub fn new(name: impl Into<String>, execute: Execute) -> Self {
        Action { name: name.into(), prompt: None, condition: None, picks: Vec::new(), execute, undoable: true }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn pick(mut self, pick: Pick) -> Self {
        self.picks.push(pick);
        self
    }

    pub fn picks(mut self, picks: Vec<Pick>) -> Self {
        self.picks = picks;
        self
    }

    pub fn not_undoable(mut self) -> Self {
        self.undoable = false;
        self
    }

    pub fn pick_named(&self, name: &str) -> Option<&Pick> {
        self.picks.iter().find(|p| p.name == name)
    }
}
