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

//! Pick domain computation. A domain is a plain list of candidate values; `choice`,
//! `player`, and `element`/`elements` all reduce to this so that selection
//! validation (`crate::actions::validate_selection`) can compare candidate
//! and chosen value uniformly by structural equality.

use std::panic::{self, AssertUnwindSafe};

use primitives::attribute::AttributeValue;
use primitives::errors::ActionError;
use state::context::{EvalContext, ResolvedArgs};
use state::pick::{Pick, PickKind};

/// The result of evaluating a pick's domain. `NotEnumerable` covers
/// `text`/`number`, which have no enumerable domain and are validated at
/// submission instead, rather than being treated as an empty domain (an
/// empty domain would wrongly mark the pick unavailable).
pub enum PickDomain {
    Enumerable(Vec<AttributeValue>),
    NotEnumerable,
}

impl PickDomain {
    pub fn is_empty(&self) -> bool {
        match self {
            PickDomain::Enumerable(values) => values.is_empty(),
            PickDomain::NotEnumerable => false,
        }
    }

    pub fn values(&self) -> &[AttributeValue] {
        match self {
            PickDomain::Enumerable(values) => values,
            PickDomain::NotEnumerable => &[],
        }
    }
}

/// Runs a possibly-panicking filter closure, converting a panic into a
/// descriptive, pick-named [ActionError] instead of unwinding past the
/// action system.
pub(crate) fn guarded<T>(pick_name: &str, f: impl FnOnce() -> T) -> Result<T, ActionError> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "filter panicked".to_string());
        ActionError::FilterFailed(pick_name.to_string(), message)
    })
}

/// Computes `pick`'s domain under `args` (the args resolved/chosen so far in
/// the current action invocation). `filter_by` is looked up here rather than
/// passed in so that callers don't need to thread the owning `Action`
/// through every call site.
pub fn compute_domain(
    ctx: &dyn EvalContext,
    pick: &Pick,
    args: &ResolvedArgs,
) -> Result<PickDomain, ActionError> {
    let mut values = match &pick.kind {
        PickKind::Choice { source } => guarded(&pick.name, || source(ctx))?,
        PickKind::Player { filter } => {
            let mut out = Vec::new();
            for seat in ctx.game().players.seats() {
                let included = match filter {
                    Some(f) => guarded(&pick.name, || f(ctx, seat))?,
                    None => true,
                };
                if included {
                    out.push(AttributeValue::Seat(seat));
                }
            }
            out
        }
        PickKind::Element { source, class, filter } | PickKind::Elements { source, class, filter } => {
            let candidates: Vec<_> = match source {
                Some(f) => guarded(&pick.name, || f(ctx))?,
                None => ctx.game().tree.all(ctx.game().tree.root(), &[]),
            };
            let mut out = Vec::new();
            for id in candidates {
                if let Some(class) = class {
                    let Some(element) = ctx.game().tree.at_id(id) else { continue };
                    if element.class != *class {
                        continue;
                    }
                }
                let included = match filter {
                    Some(f) => guarded(&pick.name, || f(ctx, id))?,
                    None => true,
                };
                if included {
                    out.push(AttributeValue::ElementRef(id));
                }
            }
            out
        }
        PickKind::Number { .. } | PickKind::Text { .. } => return Ok(PickDomain::NotEnumerable),
    };

    if let Some(filter_by) = &pick.filter_by {
        if let Some(target_value) = args.get(&filter_by.pick_name) {
            let target = match target_value {
                AttributeValue::Map(map) => map.get(&filter_by.key).cloned().unwrap_or(AttributeValue::Null),
                other => other.clone(),
            };
            values.retain(|candidate| candidate_key(ctx, candidate, &filter_by.key) == target);
        }
        // If the dependency hasn't been chosen yet, tolerate that rather than
        // crash; we simply don't narrow by it yet (availability probing runs
        // with no args).
    }

    Ok(PickDomain::Enumerable(values))
}

/// Reads `key` off the element a candidate `ElementRef` points to, or treats
/// a non-element candidate's own value as its key (so `filterBy` also works
/// against plain `choice` domains whose values are maps).
fn candidate_key(ctx: &dyn EvalContext, candidate: &AttributeValue, key: &str) -> AttributeValue {
    match candidate {
        AttributeValue::ElementRef(id) => ctx
            .game()
            .tree
            .at_id(*id)
            .and_then(|e| e.attributes.get(key))
            .cloned()
            .unwrap_or(AttributeValue::Null),
        AttributeValue::Map(map) => map.get(key).cloned().unwrap_or(AttributeValue::Null),
        other => other.clone(),
    }
}
