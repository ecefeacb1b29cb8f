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

use serde::{Deserialize, Serialize};

use crate::element_id::ElementId;
use crate::seat::Seat;

/// An opaque, typed attribute value.
///
/// Class-specific fields are reimplemented as per-variant record types at
/// the `state` crate level; this union remains only as the single
/// "attribute bag" used for game-specific extension at the host boundary,
/// plus the carrier used for `SET_ATTRIBUTE` command payloads, which are
/// necessarily type-erased (the executor doesn't know the game's attribute
/// schema).
///
/// `ElementRef` is stored as an arena id in memory; serialization converts it
/// to a branch path, never a direct pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Seat(Seat),
    ElementRef(ElementId),
    List(Vec<AttributeValue>),
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_element_ref(&self) -> Option<ElementId> {
        match self {
            AttributeValue::ElementRef(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<ElementId> for AttributeValue {
    fn from(value: ElementId) -> Self {
        AttributeValue::ElementRef(value)
    }
}

/// An ordered bag of named attributes, keyed by attribute name.
///
/// System attributes conventionally begin with `$`: the
/// per-player view always emits these even for hidden elements, so a view
/// layer can still render containers it cannot see inside.
pub type AttributeMap = BTreeMap<String, AttributeValue>;

pub fn is_system_key(key: &str) -> bool {
    key.starts_with('$')
}

/// The reserved `CREATE`/`CREATE_MANY` attrs key an owning seat rides in on.
/// The closed command set has no dedicated `SET_OWNER`
/// command, so an element's owner — like any other creation-time fact — is
/// passed through `attrs` and pulled into the element's dedicated `owner`
/// field at creation; it is never stored or serialized as a regular
/// attribute.
pub const OWNER_KEY: &str = "$owner";
