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

use crate::problem::night::NightDate;
use crate::problem::req::RequesterIdentifier;
use std::collections::BTreeMap;

/// The completed roster of one run: night → ordered requester ids, plus
/// the derived per-requester night lists. Read-only once built.
///
/// Only nights with at least one assignment carry a schedule entry;
/// lookups for other nights yield the empty slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    schedule: BTreeMap<NightDate, Vec<RequesterIdentifier>>,
    assigned_by_requester: BTreeMap<RequesterIdentifier, Vec<NightDate>>,
}

impl Solution {
    pub fn from_schedule(schedule: BTreeMap<NightDate, Vec<RequesterIdentifier>>) -> Self {
        let mut assigned_by_requester: BTreeMap<RequesterIdentifier, Vec<NightDate>> =
            BTreeMap::new();
        for (&night, ids) in &schedule {
            for id in ids {
                assigned_by_requester
                    .entry(id.clone())
                    .or_default()
                    .push(night);
            }
        }
        Self {
            schedule,
            assigned_by_requester,
        }
    }

    #[inline]
    pub fn empty() -> Self {
        Self::from_schedule(BTreeMap::new())
    }

    #[inline]
    pub fn schedule(&self) -> &BTreeMap<NightDate, Vec<RequesterIdentifier>> {
        &self.schedule
    }

    #[inline]
    pub fn assignments_for(&self, night: NightDate) -> &[RequesterIdentifier] {
        self.schedule.get(&night).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nights assigned to the given requester, in calendar order.
    #[inline]
    pub fn assigned_nights(&self, id: &RequesterIdentifier) -> &[NightDate] {
        self.assigned_by_requester
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn assigned_count(&self, id: &RequesterIdentifier) -> usize {
        self.assigned_nights(id).len()
    }

    #[inline]
    pub fn filled_slots(&self) -> usize {
        self.schedule.values().map(Vec::len).sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schedule.values().all(Vec::is_empty)
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (NightDate, &[RequesterIdentifier])> {
        self.schedule.iter().map(|(&n, ids)| (n, ids.as_slice()))
    }
}
