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

//! The wire-format boundary: converts between in-memory
//! [AttributeValue]/[ElementId] and `serde_json::Value`, and builds the full
//! and per-player tree snapshots.

use primitives::attribute::{is_system_key, AttributeMap, AttributeValue};
use primitives::branch::Branch;
use primitives::element_id::ElementId;
use primitives::seat::Seat;
use rules::queries::visibility;
use serde_json::{json, Map, Value};
use state::element::Element;
use state::game_state::{GamePhase, GameState};
use state::tree::ElementTree;

/// Converts one in-memory value to its wire form. Element references resolve
/// to a branch string, `{__elementRef: "0.2.1"}`; a reference to
/// an id no longer reachable from the root or the pile has nothing sensible
/// to encode and serializes as `null`.
pub fn encode_value(tree: &ElementTree, value: &AttributeValue) -> Value {
    match value {
        AttributeValue::Null => Value::Null,
        AttributeValue::Bool(b) => json!(b),
        AttributeValue::Int(i) => json!(i),
        AttributeValue::Float(f) => json!(f),
        AttributeValue::Text(s) => json!(s),
        AttributeValue::Seat(seat) => json!(seat.0),
        AttributeValue::ElementRef(id) => match tree.branch_of(*id) {
            Some(branch) => json!({ "__elementRef": branch.to_wire_string() }),
            None => Value::Null,
        },
        AttributeValue::List(items) => Value::Array(items.iter().map(|v| encode_value(tree, v)).collect()),
        AttributeValue::Map(map) => {
            Value::Object(map.iter().map(|(k, v)| (k.clone(), encode_value(tree, v))).collect())
        }
    }
}

pub fn encode_attributes(tree: &ElementTree, attrs: &AttributeMap) -> Value {
    Value::Object(attrs.iter().map(|(k, v)| (k.clone(), encode_value(tree, v))).collect())
}

fn encode_system_attributes(tree: &ElementTree, attrs: &AttributeMap) -> Value {
    Value::Object(attrs.iter().filter(|(k, _)| is_system_key(k)).map(|(k, v)| (k.clone(), encode_value(tree, v))).collect())
}

/// Decodes one wire value back into an [AttributeValue]. `{__elementRef:
/// branch}` is resolved against `tree` immediately; a branch naming
/// nothing reachable decodes to `Null` rather than failing the whole
/// argument map, so the action system's own validation reports the problem
/// with a pick-scoped message instead of a opaque decode error.
pub fn decode_value(tree: &ElementTree, value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null,
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                AttributeValue::Int(i)
            } else {
                AttributeValue::Float(n.as_f64().unwrap_or(0.0))
            }
        }
        Value::String(s) => AttributeValue::Text(s.clone()),
        Value::Array(items) => AttributeValue::List(items.iter().map(|v| decode_value(tree, v)).collect()),
        Value::Object(map) => {
            if let Some(Value::String(branch_str)) = map.get("__elementRef") {
                return Branch::from_wire_string(branch_str)
                    .and_then(|branch| tree.at_branch(&branch))
                    .map(AttributeValue::ElementRef)
                    .unwrap_or(AttributeValue::Null);
            }
            AttributeValue::Map(map.iter().map(|(k, v)| (k.clone(), decode_value(tree, v))).collect())
        }
    }
}

fn base_fields(element: &Element, attributes: Value) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("className".into(), json!(element.class.to_string()));
    obj.insert("id".into(), json!(element.id.to_ffi_value()));
    if let Some(name) = &element.name {
        obj.insert("name".into(), json!(name));
    }
    if let Some(rule) = &element.visibility {
        obj.insert("visibility".into(), encode_visibility(rule));
    }
    obj.insert("attributes".into(), attributes);
    obj
}

fn encode_visibility(rule: &state::visibility::VisibilityRule) -> Value {
    let mode = match rule.mode {
        state::visibility::VisibilityMode::All => "all",
        state::visibility::VisibilityMode::Owner => "owner",
        state::visibility::VisibilityMode::Hidden => "hidden",
        state::visibility::VisibilityMode::CountOnly => "count-only",
        state::visibility::VisibilityMode::Unordered => "unordered",
    };
    json!({
        "mode": mode,
        "addPlayers": rule.add_players.iter().map(|s| s.0).collect::<Vec<_>>(),
        "exceptPlayers": rule.except_players.iter().map(|s| s.0).collect::<Vec<_>>(),
    })
}

/// Full serialization, unfiltered: used by `toJSON` and as the replay-
/// equivalence/undo-round-trip comparison target in tests.
pub fn serialize_full(tree: &ElementTree, id: ElementId) -> Value {
    let Some(element) = tree.at_id(id) else { return Value::Null };
    let attributes = encode_attributes(tree, &element.attributes);
    let mut obj = base_fields(element, attributes);
    let children: Vec<Value> = element.children.iter().map(|&c| serialize_full(tree, c)).collect();
    obj.insert("children".into(), Value::Array(children));
    Value::Object(obj)
}

/// Per-player serialization.
///
/// A zone's own `hidden`/`count-only`/`owner` rule narrows what is shown of
/// its *contents* without hiding the zone itself: an opponent's hand is still
/// visible as a container with a `childCount`, just not its cards. Only
/// `all`/`unordered` with the observer in `exceptPlayers` — or any of those
/// three content-restricting modes applied to a childless, non-container
/// element, which has no count to show in its place — produces the fully
/// opaque placeholder (see [visibility::is_container_visible_to]).
pub fn serialize_for_player(tree: &ElementTree, id: ElementId, seat: Seat) -> Value {
    let Some(element) = tree.at_id(id) else { return Value::Null };
    if !visibility::is_container_visible_to(tree, id, seat) {
        return placeholder(tree, element);
    }
    let rule = visibility::effective_rule(tree, id);
    let overridden = rule.add_players.contains(&seat);
    let hide_children = !overridden && visibility::hides_children_from(tree, id, seat);
    let count_only = !overridden && visibility::is_count_only(tree, id);
    let attributes =
        if count_only { encode_system_attributes(tree, &element.attributes) } else { encode_attributes(tree, &element.attributes) };
    let mut obj = base_fields(element, attributes);
    if hide_children {
        obj.insert("childCount".into(), json!(element.children.len()));
    } else {
        let children: Vec<Value> = element.children.iter().map(|&c| serialize_for_player(tree, c, seat)).collect();
        obj.insert("children".into(), Value::Array(children));
    }
    Value::Object(obj)
}

fn placeholder(tree: &ElementTree, element: &Element) -> Value {
    let mut attributes = match encode_system_attributes(tree, &element.attributes) {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    attributes.insert("__hidden".into(), json!(true));
    json!({
        "className": element.class.to_string(),
        "id": element.id.to_ffi_value(),
        "attributes": Value::Object(attributes),
    })
}

fn phase_str(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Setup => "setup",
        GamePhase::Started => "started",
        GamePhase::Finished => "finished",
    }
}

fn players_json(game: &GameState) -> Value {
    Value::Array(
        game.players
            .all()
            .iter()
            .map(|p| json!({ "seat": p.seat.0, "name": p.name, "color": p.color, "avatar": p.avatar }))
            .collect(),
    )
}

fn messages_json(tree: &ElementTree, game: &GameState) -> Value {
    Value::Array(game.messages.iter().map(|m| json!({ "text": m.text, "data": encode_attributes(tree, &m.data) })).collect())
}

pub fn to_json(game: &GameState) -> Value {
    json!({
        "tree": serialize_full(&game.tree, game.tree.root()),
        "players": players_json(game),
        "phase": phase_str(game.phase),
        "messages": messages_json(&game.tree, game),
        "settings": encode_attributes(&game.tree, &game.settings),
    })
}

pub fn to_json_for_player(game: &GameState, seat: Seat) -> Value {
    json!({
        "tree": serialize_for_player(&game.tree, game.tree.root(), seat),
        "players": players_json(game),
        "phase": phase_str(game.phase),
        "messages": messages_json(&game.tree, game),
        "settings": encode_attributes(&game.tree, &game.settings),
    })
}
