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

use crate::common::Priority;
use crate::problem::err::{
    DuplicateRequesterIdError, EmptyRequesterIdError, NegativeDesiredCountError, ValidationError,
    ZeroSlotsError,
};
use crate::problem::night::{NightDate, NightRange};
use crate::problem::prob::{NightUniverse, Problem};
use crate::problem::req::{Requester, RequesterContainer, RequesterIdentifier};
use std::collections::BTreeSet;

/// One raw requester record as it arrives from an input adapter, before
/// any validation or date normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterRow {
    pub id: String,
    pub name: String,
    pub desired_nights: i64,
    pub requested_dates: Vec<String>,
    pub priority: Option<i64>,
}

impl RequesterRow {
    #[inline]
    pub fn new(id: impl Into<String>, name: impl Into<String>, desired_nights: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            desired_nights,
            requested_dates: Vec::new(),
            priority: None,
        }
    }

    #[inline]
    pub fn with_requested_dates<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requested_dates = dates.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn with_priority(mut self, tier: i64) -> Self {
        self.priority = Some(tier);
        self
    }
}

/// Turns raw requester rows into a validated [`Problem`].
///
/// Fatal conditions (empty or duplicate id, negative desired count, zero
/// headcount) abort the build with a [`ValidationError`]. Per-token
/// malformed data (unparseable dates, out-of-range priority tiers) is
/// corrected by omission or default and never aborts the build.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    rows: Vec<RequesterRow>,
    slots_per_night: Option<u32>,
    range: Option<NightRange>,
}

impl ProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uniform headcount required per night. Defaults to 1.
    #[inline]
    pub fn with_slots_per_night(mut self, slots: u32) -> Self {
        self.slots_per_night = Some(slots);
        self
    }

    /// Switches the night universe from sparse (derived from requests) to
    /// the given explicit inclusive range.
    #[inline]
    pub fn with_night_range(mut self, range: NightRange) -> Self {
        self.range = Some(range);
        self
    }

    #[inline]
    pub fn add_row(&mut self, row: RequesterRow) -> &mut Self {
        self.rows.push(row);
        self
    }

    #[inline]
    pub fn with_rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = RequesterRow>,
    {
        self.rows = rows.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<Problem, ValidationError> {
        let slots = self.slots_per_night.unwrap_or(1);
        if slots == 0 {
            return Err(ZeroSlotsError)?;
        }

        let mut requesters = RequesterContainer::with_capacity(self.rows.len());
        for (row_index, row) in self.rows.into_iter().enumerate() {
            let id_raw = row.id.trim();
            if id_raw.is_empty() {
                return Err(EmptyRequesterIdError::new(row_index, row.name))?;
            }
            let id = RequesterIdentifier::new(id_raw.to_string());
            if requesters.contains_id(&id) {
                return Err(DuplicateRequesterIdError::new(id))?;
            }

            if row.desired_nights < 0 {
                return Err(NegativeDesiredCountError::new(id, row.desired_nights))?;
            }
            let desired = row.desired_nights as u32;

            let priority = match row.priority {
                None => Priority::default(),
                Some(tier) => Priority::from_tier(tier).unwrap_or_else(|| {
                    tracing::debug!(
                        requester = %id,
                        tier,
                        "priority tier outside 1..=3, falling back to medium"
                    );
                    Priority::default()
                }),
            };

            let mut requests = BTreeSet::new();
            for token in &row.requested_dates {
                if token.trim().is_empty() {
                    continue;
                }
                match NightDate::parse(token) {
                    Ok(night) => {
                        requests.insert(night);
                    }
                    Err(err) => {
                        tracing::debug!(requester = %id, %err, "dropping unparseable date token");
                    }
                }
            }

            requesters.insert(Requester::new(
                id,
                row.name.trim().to_string(),
                desired,
                priority,
                requests,
            ));
        }

        let universe = match self.range {
            Some(range) => NightUniverse::Dense(range),
            None => NightUniverse::Sparse,
        };

        Ok(Problem::new(requesters, universe, slots))
    }
}
