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

use night_alloc_model::problem::night::NightDate;
use night_alloc_model::problem::prob::Problem;
use night_alloc_model::problem::req::RequesterIdentifier;
use night_alloc_model::solution::sol::Solution;
use std::collections::{BTreeMap, HashMap};

/// Run-scoped mutable state of one optimization run: the growing
/// schedule and the live per-requester assigned counts. Owned by exactly
/// one run; nothing in here survives it.
#[derive(Debug, Clone)]
pub struct RunContext<'p> {
    problem: &'p Problem,
    assignments_by_night: BTreeMap<NightDate, Vec<RequesterIdentifier>>,
    assigned_counts: HashMap<RequesterIdentifier, usize>,
}

impl<'p> RunContext<'p> {
    pub fn new(problem: &'p Problem) -> Self {
        Self {
            problem,
            assignments_by_night: BTreeMap::new(),
            assigned_counts: HashMap::with_capacity(problem.requesters().len()),
        }
    }

    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn assigned_count(&self, id: &RequesterIdentifier) -> usize {
        self.assigned_counts.get(id).copied().unwrap_or(0)
    }

    #[inline]
    pub fn fill(&self, night: NightDate) -> usize {
        self.assignments_by_night
            .get(&night)
            .map(Vec::len)
            .unwrap_or(0)
    }

    #[inline]
    pub fn is_full(&self, night: NightDate) -> bool {
        self.fill(night) >= self.problem.slots_per_night() as usize
    }

    #[inline]
    pub fn contains(&self, night: NightDate, id: &RequesterIdentifier) -> bool {
        self.assignments_by_night
            .get(&night)
            .map(|ids| ids.contains(id))
            .unwrap_or(false)
    }

    /// Records one assignment unless the night is already at headcount or
    /// the requester is already on it. Returns whether anything changed.
    pub fn try_assign(&mut self, night: NightDate, id: &RequesterIdentifier) -> bool {
        if self.is_full(night) || self.contains(night, id) {
            return false;
        }
        self.assignments_by_night
            .entry(night)
            .or_default()
            .push(id.clone());
        *self.assigned_counts.entry(id.clone()).or_insert(0) += 1;
        true
    }

    pub fn into_solution(self) -> Solution {
        Solution::from_schedule(self.assignments_by_night)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use night_alloc_model::problem::builder::{ProblemBuilder, RequesterRow};
    use chrono::NaiveDate;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn problem() -> Problem {
        ProblemBuilder::new()
            .with_slots_per_night(2)
            .with_rows([
                RequesterRow::new("a", "A", 2)
                    .with_requested_dates(["2025-03-01", "2025-03-02"]),
                RequesterRow::new("b", "B", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn test_assign_updates_fill_and_counts() {
        let p = problem();
        let mut ctx = RunContext::new(&p);
        assert!(ctx.try_assign(nd(2025, 3, 1), &rid("a")));
        assert_eq!(ctx.fill(nd(2025, 3, 1)), 1);
        assert_eq!(ctx.assigned_count(&rid("a")), 1);
        assert_eq!(ctx.assigned_count(&rid("b")), 0);
    }

    #[test]
    fn test_double_booking_is_refused() {
        let p = problem();
        let mut ctx = RunContext::new(&p);
        assert!(ctx.try_assign(nd(2025, 3, 1), &rid("a")));
        assert!(!ctx.try_assign(nd(2025, 3, 1), &rid("a")));
        assert_eq!(ctx.assigned_count(&rid("a")), 1);
    }

    #[test]
    fn test_full_night_is_refused() {
        let p = problem();
        let mut ctx = RunContext::new(&p);
        assert!(ctx.try_assign(nd(2025, 3, 1), &rid("a")));
        assert!(ctx.try_assign(nd(2025, 3, 1), &rid("b")));
        assert!(ctx.is_full(nd(2025, 3, 1)));
        assert!(!ctx.try_assign(nd(2025, 3, 1), &rid("c")));
    }

    #[test]
    fn test_into_solution_carries_order() {
        let p = problem();
        let mut ctx = RunContext::new(&p);
        ctx.try_assign(nd(2025, 3, 1), &rid("b"));
        ctx.try_assign(nd(2025, 3, 1), &rid("a"));
        let s = ctx.into_solution();
        assert_eq!(s.assignments_for(nd(2025, 3, 1)), &[rid("b"), rid("a")]);
    }
}
