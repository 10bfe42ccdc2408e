// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::engine::context::RunContext;
use crate::engine::err::InvalidStrategyError;
use night_alloc_model::problem::night::NightDate;
use std::str::FromStr;

/// One per-night assignment policy. Every strategy sees the same ranked
/// night sequence; it decides candidate order and quota handling within
/// a single night.
pub trait Strategy {
    fn name(&self) -> &'static str;

    /// Fills one night from the requesters who asked for it, up to the
    /// headcount, never booking anyone twice on the same night.
    fn assign_night(&self, ctx: &mut RunContext<'_>, night: NightDate);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    #[default]
    Balanced,
    Coverage,
    Satisfaction,
}

impl StrategyKind {
    pub const NAME_BALANCED: &'static str = "balanced";
    pub const NAME_COVERAGE: &'static str = "coverage";
    pub const NAME_SATISFACTION: &'static str = "satisfaction";

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Balanced => Self::NAME_BALANCED,
            StrategyKind::Coverage => Self::NAME_COVERAGE,
            StrategyKind::Satisfaction => Self::NAME_SATISFACTION,
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = InvalidStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            Self::NAME_BALANCED => Ok(StrategyKind::Balanced),
            Self::NAME_COVERAGE => Ok(StrategyKind::Coverage),
            Self::NAME_SATISFACTION => Ok(StrategyKind::Satisfaction),
            _ => Err(InvalidStrategyError::new(s)),
        }
    }
}
