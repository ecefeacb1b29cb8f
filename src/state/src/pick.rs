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

use primitives::attribute::AttributeValue;
use primitives::element_class::ElementClass;
use primitives::element_id::ElementId;

use crate::context::{EvalContext, ResolvedArgs};

/// A source of candidate elements for an `element`/`elements` pick: either a
/// fixed starting element (queried from) or a function of context.
pub type ElementSource = Rc<dyn Fn(&dyn EvalContext) -> Vec<ElementId>>;

pub type ChoiceSource = Rc<dyn Fn(&dyn EvalContext) -> Vec<AttributeValue>>;

pub type PlayerFilter = Rc<dyn Fn(&dyn EvalContext, primitives::seat::Seat) -> bool>;

pub type ElementFilter = Rc<dyn Fn(&dyn EvalContext, ElementId) -> bool>;

pub type Validator = Rc<dyn Fn(&AttributeValue, &ResolvedArgs, &dyn EvalContext) -> Result<(), String>>;

/// The kind of value a pick collects.
#[derive(Clone)]
pub enum PickKind {
    /// A fixed array of values, or a function of context, used verbatim as
    /// the domain.
    Choice { source: ChoiceSource },
    /// A single element, drawn from an optional source filtered by class.
    Element { source: Option<ElementSource>, class: Option<ElementClass>, filter: Option<ElementFilter> },
    /// Like `Element`, but the pick always collects an array of values
    /// regardless of `multi_select`.
    Elements { source: Option<ElementSource>, class: Option<ElementClass>, filter: Option<ElementFilter> },
    Player { filter: Option<PlayerFilter> },
    Number { min: Option<f64>, max: Option<f64>, integer: bool },
    Text { min_length: Option<usize>, max_length: Option<usize>, pattern: Option<String> },
}

impl PickKind {
    pub fn has_enumerable_domain(&self) -> bool {
        !matches!(self, PickKind::Number { .. } | PickKind::Text { .. })
    }
}

/// A bound on how many values a multi-select pick may collect; either fixed
/// or computed from context.
#[derive(Clone)]
pub enum SelectBound {
    Fixed(usize),
    Dynamic(Rc<dyn Fn(&dyn EvalContext, &ResolvedArgs) -> usize>),
}

impl SelectBound {
    pub fn resolve(&self, ctx: &dyn EvalContext, args: &ResolvedArgs) -> usize {
        match self {
            SelectBound::Fixed(n) => *n,
            SelectBound::Dynamic(f) => f(ctx, args),
        }
    }
}

#[derive(Clone)]
pub struct MultiSelect {
    pub min: SelectBound,
    pub max: SelectBound,
}

/// Collects repeated values until a terminator is chosen or `max` is reached
///.
#[derive(Clone)]
pub struct Repeat {
    pub until: Option<AttributeValue>,
    pub max: Option<usize>,
}

/// Narrows a later pick's domain to candidates whose `key` matches an earlier
/// pick's chosen value.
#[derive(Clone)]
pub struct FilterBy {
    pub key: String,
    pub pick_name: String,
}

/// A single declared input to an action.
#[derive(Clone)]
pub struct Pick {
    pub name: String,
    pub kind: PickKind,
    pub prompt: Option<String>,
    pub optional: bool,
    pub multi_select: Option<MultiSelect>,
    pub repeat: Option<Repeat>,
    pub filter_by: Option<FilterBy>,
    pub depends_on: Option<String>,
    pub skip_if_only_one: bool,
    pub validate: Option<Validator>,
}

impl Pick {
    pub fn new(name: impl Into<String>, kind: PickKind) -> Self {
        Pick {
            name: name.into(),
            kind,
            prompt: None,
            optional: false,
            multi_select: None,
            repeat: None,
            filter_by: None,
            depends_on: None,
            skip_if_only_one: false,
            validate: None,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn multi_select(mut self, min: SelectBound, max: SelectBound) -> Self {
        self.multi_select = Some(MultiSelect { min, max });
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn filter_by(mut self, key: impl Into<String>, pick_name: impl Into<String>) -> Self {
        self.filter_by = Some(FilterBy { key: key.into(), pick_name: pick_name.into() });
        self
    }

    pub fn depends_on(mut self, pick_name: impl Into<String>) -> Self {
        self.depends_on = Some(pick_name.into());
        self
    }

    pub fn skip_if_only_one(mut self) -> Self {
        self.skip_if_only_one = true;
        self
    }

    pub fn validate_with(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }

    /// True if this pick collects an array value regardless of
    /// `multi_select` or `repeat`.
    pub fn is_plural(&self) -> bool {
        matches!(self.kind, PickKind::Elements { .. }) || self.multi_select.is_some() || self.repeat.is_some()
    }
}
