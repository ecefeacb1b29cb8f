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

//! Error helpers for the "thrown" class of failure named in spec §7: flow
//! misuse and the flow iteration safety cap. These indicate a host logic bug
//! rather than a structural or validation failure, so they are reported as
//! `color_eyre::Result` rather than as one of the structured error enums in
//! `primitives`.

use std::error;
use std::fmt::Display;

use color_eyre::eyre::WrapErr;

/// Equivalent to `color_eyre::bail!`. Immediately returns an error.
#[macro_export]
macro_rules! fail {
    ($msg:literal $(,)?) => {
        return std::result::Result::Err(color_eyre::eyre::eyre!($msg));
    };
    ($err:expr $(,)?) => {
        return std::result::Result::Err(color_eyre::eyre::eyre!($err));
    };
    ($fmt:expr, $($arg:tt)*) => {
        return std::result::Result::Err(color_eyre::eyre::eyre!($fmt, $($arg)*));
    };
}

/// Equivalent to `color_eyre::ensure!`. Returns an error if the predicate is
/// false.
#[macro_export]
macro_rules! verify {
    ($cond:expr $(,)?) => {
        $crate::verify!($cond, concat!("Condition failed: `", stringify!($cond), "`"))
    };
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return std::result::Result::Err(color_eyre::eyre::eyre!($msg));
        }
    };
    ($cond:expr, $fmt:expr, $($arg:tt)*) => {
        if !$cond {
            return std::result::Result::Err(color_eyre::eyre::eyre!($fmt, $($arg)*));
        }
    };
}

pub trait WithError<T> {
    /// Wraps an error with context that is evaluated lazily, only if an
    /// error occurs.
    fn with_error<C, F>(self, f: F) -> color_eyre::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> WithError<T> for Option<T> {
    fn with_error<C, F>(self, context: F) -> color_eyre::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| color_eyre::eyre::eyre!(context()))
    }
}

impl<T, E> WithError<T> for Result<T, E>
where
    E: error::Error + Send + Sync + 'static,
{
    fn with_error<C, F>(self, context: F) -> color_eyre::Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.wrap_err_with(context)
    }
}
