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

use slotmap::{new_key_type, Key, KeyData};

new_key_type! {
    /// Identifies an element in the tree: a space, piece, grid, card, die, or
    /// the game root itself.
    ///
    /// Elements live in a single arena owned by the game root and are
    /// referenced everywhere else by this id rather than by pointer, so
    /// there are no ownership cycles between parent and child links.
    pub struct ElementId;
}

impl ElementId {
    /// Converts an opaque number received from [Self::to_ffi_value] back into
    /// an element id. Used only at the host boundary; nothing in the engine
    /// itself needs this representation.
    pub fn from_ffi_value(value: u64) -> Self {
        KeyData::from_ffi(value).into()
    }

    /// Returns an opaque number which can later be converted back into an
    /// element id.
    pub fn to_ffi_value(self) -> u64 {
        self.data().as_ffi()
    }
}
