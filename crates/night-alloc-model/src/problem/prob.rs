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

use crate::problem::night::{NightDate, NightRange};
use crate::problem::req::{Requester, RequesterContainer, RequesterIdentifier};
use std::collections::{BTreeMap, BTreeSet};

/// Where the set of schedulable nights comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NightUniverse {
    /// The union of all dates appearing in any requester's request set.
    Sparse,
    /// Every date in an explicit inclusive range, requested or not.
    Dense(NightRange),
}

impl NightUniverse {
    #[inline]
    pub fn is_dense(&self) -> bool {
        matches!(self, NightUniverse::Dense(_))
    }
}

/// The immutable input to one optimization run: the requester pool, the
/// night universe, the uniform per-night headcount, and the reverse index
/// from nights to the requesters who asked for them.
///
/// Invariant: a night has an index entry iff at least one requester
/// requested it and, in dense mode, it lies inside the configured range.
/// Requests outside a dense range are dropped from the index (they remain
/// visible in the requester's own request set).
#[derive(Debug, Clone)]
pub struct Problem {
    requesters: RequesterContainer,
    universe: NightUniverse,
    slots_per_night: u32,
    nights: BTreeSet<NightDate>,
    requests_by_night: BTreeMap<NightDate, Vec<RequesterIdentifier>>,
}

impl Problem {
    /// Builds the problem and its request index in a single pass over the
    /// requester pool. Only reachable through `ProblemBuilder`, which has
    /// already validated the inputs.
    pub(crate) fn new(
        requesters: RequesterContainer,
        universe: NightUniverse,
        slots_per_night: u32,
    ) -> Self {
        let mut requests_by_night: BTreeMap<NightDate, Vec<RequesterIdentifier>> = BTreeMap::new();
        for requester in requesters.iter() {
            for &night in requester.requests() {
                if let NightUniverse::Dense(range) = universe {
                    if !range.contains(night) {
                        tracing::debug!(
                            requester = %requester.id(),
                            night = %night,
                            "dropping request outside the configured night range"
                        );
                        continue;
                    }
                }
                requests_by_night
                    .entry(night)
                    .or_default()
                    .push(requester.id().clone());
            }
        }

        let nights: BTreeSet<NightDate> = match universe {
            NightUniverse::Sparse => requests_by_night.keys().copied().collect(),
            NightUniverse::Dense(range) => range.iter().collect(),
        };

        Self {
            requesters,
            universe,
            slots_per_night,
            nights,
            requests_by_night,
        }
    }

    #[inline]
    pub fn requesters(&self) -> &RequesterContainer {
        &self.requesters
    }

    #[inline]
    pub fn requester(&self, id: &RequesterIdentifier) -> Option<&Requester> {
        self.requesters.get(id)
    }

    #[inline]
    pub fn universe(&self) -> NightUniverse {
        self.universe
    }

    #[inline]
    pub fn is_dense(&self) -> bool {
        self.universe.is_dense()
    }

    #[inline]
    pub fn slots_per_night(&self) -> u32 {
        self.slots_per_night
    }

    /// All nights of the universe in calendar order. In dense mode this
    /// includes nights nobody requested.
    #[inline]
    pub fn nights(&self) -> impl Iterator<Item = NightDate> + '_ {
        self.nights.iter().copied()
    }

    #[inline]
    pub fn night_count(&self) -> usize {
        self.nights.len()
    }

    #[inline]
    pub fn contains_night(&self, night: NightDate) -> bool {
        self.nights.contains(&night)
    }

    /// Requesters who asked for the given night, in input order. Empty for
    /// nights nobody requested.
    #[inline]
    pub fn requesters_for_night(&self, night: NightDate) -> &[RequesterIdentifier] {
        self.requests_by_night
            .get(&night)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[inline]
    pub fn requested_night_count(&self, night: NightDate) -> usize {
        self.requesters_for_night(night).len()
    }

    /// Total required slots across the universe.
    #[inline]
    pub fn total_slots(&self) -> usize {
        self.nights.len() * self.slots_per_night as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Priority;
    use crate::problem::req::RequesterIdentifier;
    use chrono::NaiveDate;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn requester(id: &str, nights: &[NightDate]) -> Requester {
        Requester::new(
            rid(id),
            id.to_uppercase(),
            1,
            Priority::Medium,
            nights.iter().copied(),
        )
    }

    fn container(rs: Vec<Requester>) -> RequesterContainer {
        rs.into_iter().collect()
    }

    #[test]
    fn test_sparse_universe_is_union_of_requests() {
        let c = container(vec![
            requester("a", &[nd(2025, 3, 1), nd(2025, 3, 3)]),
            requester("b", &[nd(2025, 3, 3), nd(2025, 3, 5)]),
        ]);
        let p = Problem::new(c, NightUniverse::Sparse, 1);
        let nights: Vec<_> = p.nights().collect();
        assert_eq!(nights, vec![nd(2025, 3, 1), nd(2025, 3, 3), nd(2025, 3, 5)]);
        assert_eq!(p.night_count(), 3);
    }

    #[test]
    fn test_index_entry_iff_requested() {
        let c = container(vec![requester("a", &[nd(2025, 3, 1)])]);
        let p = Problem::new(c, NightUniverse::Sparse, 2);
        assert_eq!(p.requesters_for_night(nd(2025, 3, 1)), &[rid("a")]);
        assert!(p.requesters_for_night(nd(2025, 3, 2)).is_empty());
    }

    #[test]
    fn test_index_preserves_input_order_per_night() {
        let shared = nd(2025, 3, 1);
        let c = container(vec![
            requester("zeta", &[shared]),
            requester("alpha", &[shared]),
        ]);
        let p = Problem::new(c, NightUniverse::Sparse, 1);
        assert_eq!(
            p.requesters_for_night(shared),
            &[rid("zeta"), rid("alpha")]
        );
    }

    #[test]
    fn test_dense_universe_includes_unrequested_nights() {
        let range = NightRange::new(nd(2025, 3, 1), nd(2025, 3, 4)).unwrap();
        let c = container(vec![requester("a", &[nd(2025, 3, 2)])]);
        let p = Problem::new(c, NightUniverse::Dense(range), 1);
        assert_eq!(p.night_count(), 4);
        assert!(p.is_dense());
        assert!(p.contains_night(nd(2025, 3, 4)));
        assert!(p.requesters_for_night(nd(2025, 3, 4)).is_empty());
    }

    #[test]
    fn test_dense_universe_drops_out_of_range_requests() {
        let range = NightRange::new(nd(2025, 3, 1), nd(2025, 3, 2)).unwrap();
        let c = container(vec![requester("a", &[nd(2025, 3, 2), nd(2025, 4, 1)])]);
        let p = Problem::new(c, NightUniverse::Dense(range), 1);
        assert_eq!(p.requesters_for_night(nd(2025, 3, 2)), &[rid("a")]);
        assert!(p.requesters_for_night(nd(2025, 4, 1)).is_empty());
        assert!(!p.contains_night(nd(2025, 4, 1)));
        // The raw request set still records what was asked for.
        assert!(p.requester(&rid("a")).unwrap().has_requested(nd(2025, 4, 1)));
    }

    #[test]
    fn test_total_slots() {
        let range = NightRange::new(nd(2025, 3, 1), nd(2025, 3, 3)).unwrap();
        let p = Problem::new(container(vec![]), NightUniverse::Dense(range), 2);
        assert_eq!(p.total_slots(), 6);
    }
}
