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

//! Turns declarative [Action]s + argument maps into validated,
//! command-emitting executions.

use std::collections::BTreeMap;

use primitives::attribute::AttributeValue;
use primitives::element_id::ElementId;
use primitives::errors::ActionError;
use primitives::seat::Seat;
use regex::Regex;
use state::action::Action;
use state::context::{EvalContext, ResolvedArgs};
use state::game_state::GameState;
use state::pick::{Pick, PickKind};

use crate::context_impl::{Context, ReadContext};
use crate::queries::picks::{compute_domain, guarded, PickDomain};

/// Spec.md §4.3, "Availability": the action's condition must hold and every
/// non-optional pick must have a non-empty domain. A crashing condition or
/// filter is reported rather than propagated as a panic.
pub fn is_available(game: &GameState, action: &Action, player: Seat) -> Result<bool, ActionError> {
    let ctx = ReadContext::new(game, Some(player), ResolvedArgs::new());
    if let Some(condition) = &action.condition {
        if !guarded(&action.name, || condition(&ctx))? {
            return Ok(false);
        }
    }
    let empty = ResolvedArgs::new();
    for pick in &action.picks {
        if pick.optional {
            continue;
        }
        let domain = compute_domain(&ctx, pick, &empty)?;
        if domain.is_empty() {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Converts a raw wire-format argument map into resolved values: numeric
/// seat indices become [AttributeValue::Seat], numeric/ref element ids
/// become [AttributeValue::ElementRef]. This is the one place the action system crosses the
/// serialization boundary.
pub fn resolve_args(action: &Action, raw: &BTreeMap<String, AttributeValue>) -> ResolvedArgs {
    let mut resolved = ResolvedArgs::new();
    for pick in &action.picks {
        if let Some(value) = raw.get(&pick.name) {
            resolved.insert(pick.name.clone(), resolve_value(pick, value));
        }
    }
    resolved
}

fn resolve_value(pick: &Pick, value: &AttributeValue) -> AttributeValue {
    if pick.is_plural() {
        if let AttributeValue::List(items) = value {
            return AttributeValue::List(items.iter().map(|item| resolve_scalar(pick, item)).collect());
        }
    }
    resolve_scalar(pick, value)
}

fn resolve_scalar(pick: &Pick, value: &AttributeValue) -> AttributeValue {
    match (&pick.kind, value) {
        (PickKind::Player { .. }, AttributeValue::Int(seat)) => AttributeValue::Seat(Seat::new(*seat as u32)),
        (PickKind::Element { .. } | PickKind::Elements { .. }, AttributeValue::Int(id)) => {
            AttributeValue::ElementRef(ElementId::from_ffi_value(*id as u64))
        }
        _ => value.clone(),
    }
}

/// Picks that have no enumerable domain (`text`/`number`) are validated at
/// submission against their own constraints rather than domain membership
///.
fn validate_scalar(ctx: &dyn EvalContext, pick: &Pick, value: &AttributeValue, domain: &PickDomain) -> Result<(), ActionError> {
    match &pick.kind {
        PickKind::Text { min_length, max_length, pattern } => {
            let AttributeValue::Text(text) = value else {
                return Err(ActionError::ValidationFailed { pick: pick.name.clone(), message: "expected text".into() });
            };
            let len = text.chars().count();
            if let Some(min) = min_length {
                if len < *min {
                    return Err(ActionError::ValidationFailed {
                        pick: pick.name.clone(),
                        message: format!("text shorter than minimum length {min}"),
                    });
                }
            }
            if let Some(max) = max_length {
                if len > *max {
                    return Err(ActionError::ValidationFailed {
                        pick: pick.name.clone(),
                        message: format!("text longer than maximum length {max}"),
                    });
                }
            }
            if let Some(pattern) = pattern {
                let regex = Regex::new(pattern).map_err(|error| ActionError::ValidationFailed {
                    pick: pick.name.clone(),
                    message: format!("invalid pattern {pattern:?}: {error}"),
                })?;
                if !regex.is_match(text) {
                    return Err(ActionError::ValidationFailed {
                        pick: pick.name.clone(),
                        message: format!("{text:?} does not match the required pattern"),
                    });
                }
            }
        }
        PickKind::Number { min, max, integer } => {
            let number = value.as_float().ok_or_else(|| ActionError::ValidationFailed {
                pick: pick.name.clone(),
                message: "expected a number".into(),
            })?;
            if number.is_nan() {
                return Err(ActionError::ValidationFailed { pick: pick.name.clone(), message: "value is NaN".into() });
            }
            if *integer && number.fract() != 0.0 {
                return Err(ActionError::ValidationFailed {
                    pick: pick.name.clone(),
                    message: "value must be an integer".into(),
                });
            }
            if let Some(min) = min {
                if number < *min {
                    return Err(ActionError::ValidationFailed {
                        pick: pick.name.clone(),
                        message: format!("value below minimum {min}"),
                    });
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Err(ActionError::ValidationFailed {
                        pick: pick.name.clone(),
                        message: format!("value above maximum {max}"),
                    });
                }
            }
        }
        _ => {
            if !domain.values().contains(value) {
                return Err(ActionError::ValueNotInDomain { pick: pick.name.clone() });
            }
        }
    }
    Ok(())
}

/// Validates one pick's chosen value: a `List` against each item plus
/// `multiSelect`/`repeat` bounds for plural picks, a single value otherwise;
/// the custom `validate` closure, if any, runs last.
pub fn validate_selection(
    ctx: &dyn EvalContext,
    pick: &Pick,
    value: &AttributeValue,
    args: &ResolvedArgs,
) -> Result<(), ActionError> {
    let domain = compute_domain(ctx, pick, args)?;
    if pick.is_plural() {
        let AttributeValue::List(items) = value else {
            return Err(ActionError::ValidationFailed {
                pick: pick.name.clone(),
                message: "expected a list of values".into(),
            });
        };
        for item in items {
            validate_scalar(ctx, pick, item, &domain)?;
        }
        if let Some(multi_select) = &pick.multi_select {
            let min = multi_select.min.resolve(ctx, args);
            let max = multi_select.max.resolve(ctx, args);
            if items.len() < min || items.len() > max {
                return Err(ActionError::MultiSelectBounds { pick: pick.name.clone(), actual: items.len(), min, max });
            }
        }
        if let Some(repeat) = &pick.repeat {
            if let Some(max) = repeat.max {
                if items.len() > max {
                    return Err(ActionError::MultiSelectBounds {
                        pick: pick.name.clone(),
                        actual: items.len(),
                        min: 0,
                        max,
                    });
                }
            }
        }
    } else {
        validate_scalar(ctx, pick, value, &domain)?;
    }
    if let Some(validator) = &pick.validate {
        if let Err(message) = validator(value, args, ctx) {
            return Err(ActionError::ValidationFailed { pick: pick.name.clone(), message });
        }
    }
    Ok(())
}

/// Resolves and validates every pick in order, imputing a value for any
/// `skipIfOnlyOne` pick whose domain has exactly one candidate. Later picks see earlier ones through `ctx.arg`,
/// so each iteration rebuilds the read context over the args resolved so
/// far.
pub fn resolve_and_validate(
    game: &GameState,
    action: &Action,
    player: Seat,
    raw_args: &BTreeMap<String, AttributeValue>,
) -> Result<ResolvedArgs, ActionError> {
    {
        let ctx = ReadContext::new(game, Some(player), ResolvedArgs::new());
        if let Some(condition) = &action.condition {
            if !guarded(&action.name, || condition(&ctx)).map_err(|_| ActionError::ConditionFailed)? {
                return Err(ActionError::ConditionFailed);
            }
        }
    }
    let mut resolved = resolve_args(action, raw_args);
    for pick in &action.picks {
        let ctx = ReadContext::new(game, Some(player), resolved.clone());
        match resolved.get(&pick.name).cloned() {
            Some(value) => validate_selection(&ctx, pick, &value, &resolved)?,
            None => {
                if pick.optional {
                    continue;
                }
                let domain = compute_domain(&ctx, pick, &resolved)?;
                if pick.skip_if_only_one && domain.values().len() == 1 {
                    resolved.insert(pick.name.clone(), domain.values()[0].clone());
                } else {
                    return Err(ActionError::MissingPick(pick.name.clone()));
                }
            }
        }
    }
    Ok(resolved)
}

/// Resolves, validates, then invokes `action.execute` with a mutable
/// context over `game` so its body can emit commands. A thrown error from `execute` itself is converted to
/// [ActionError::ExecutionFailed]; the command history reflects whatever
/// commands were emitted before the failure, since a failed execute closure
/// may have already applied some of its commands.
pub fn perform_action(
    game: &mut GameState,
    action: &Action,
    player: Seat,
    raw_args: BTreeMap<String, AttributeValue>,
) -> Result<(), ActionError> {
    let resolved = resolve_and_validate(game, action, player, &raw_args)?;
    let mut ctx = Context::with_args(game, Some(player), resolved.clone());
    (action.execute)(&resolved, &mut ctx)
}
