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
use night_alloc_model::solution::sol::Solution;
use serde::Serialize;

/// Per-requester outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequesterStats {
    pub id: String,
    pub name: String,
    pub requested: usize,
    pub desired: u32,
    pub assigned: usize,
    pub difference: i64,
    pub fulfillment: f64,
}

/// Aggregate quality measures of a finished schedule.
///
/// `partial_gaps` only exists for dense universes, where an unrequested
/// night with zero assignments is a meaningfully different failure than
/// a requested night that came up short.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub coverage_rate: f64,
    pub avg_satisfaction: f64,
    pub full_gaps: Vec<NightDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial_gaps: Option<Vec<NightDate>>,
    pub requester_stats: Vec<RequesterStats>,
}

#[inline]
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Derives [`Metrics`] from a schedule and nothing else. Running it
/// twice over the same schedule yields the same numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsBuilder;

impl MetricsBuilder {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, problem: &Problem, solution: &Solution) -> Metrics {
        let total_slots = problem.total_slots();
        let filled_slots = solution.filled_slots();
        let coverage_rate = if total_slots == 0 {
            0.0
        } else {
            round1(100.0 * filled_slots as f64 / total_slots as f64)
        };

        let mut requester_stats = Vec::with_capacity(problem.requesters().len());
        let mut satisfaction_sum = 0.0;
        for requester in problem.requesters().iter() {
            let assigned = solution.assigned_count(requester.id());
            let desired = requester.desired();
            let fulfillment = if desired > 0 {
                round1(100.0 * assigned as f64 / desired as f64)
            } else {
                // No quota means no shortfall, whatever got assigned.
                100.0
            };
            satisfaction_sum += fulfillment;
            requester_stats.push(RequesterStats {
                id: requester.id().as_str().to_string(),
                name: requester.name().to_string(),
                requested: requester.request_count(),
                desired,
                assigned,
                difference: assigned as i64 - desired as i64,
                fulfillment,
            });
        }

        let avg_satisfaction = if requester_stats.is_empty() {
            0.0
        } else {
            round1(satisfaction_sum / requester_stats.len() as f64)
        };

        let slots = problem.slots_per_night() as usize;
        let full_gaps: Vec<NightDate> = problem
            .nights()
            .filter(|&night| solution.assignments_for(night).len() < slots)
            .collect();
        let partial_gaps = problem.is_dense().then(|| {
            problem
                .nights()
                .filter(|&night| {
                    let fill = solution.assignments_for(night).len();
                    fill > 0 && fill < slots
                })
                .collect()
        });

        Metrics {
            coverage_rate,
            avg_satisfaction,
            full_gaps,
            partial_gaps,
            requester_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use night_alloc_model::problem::builder::{ProblemBuilder, RequesterRow};
    use night_alloc_model::problem::night::NightRange;
    use night_alloc_model::problem::req::RequesterIdentifier;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn solution(entries: &[(NightDate, &[&str])]) -> Solution {
        let mut schedule = BTreeMap::new();
        for &(night, ids) in entries {
            schedule.insert(night, ids.iter().map(|s| rid(s)).collect());
        }
        Solution::from_schedule(schedule)
    }

    #[test]
    fn test_coverage_rate_is_rounded_to_one_decimal() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("a", "A", 1)
                    .with_requested_dates(["2025-03-01", "2025-03-02", "2025-03-03"]),
            ])
            .build()
            .unwrap();
        let s = solution(&[(nd(2025, 3, 1), &["a"])]);
        let m = MetricsBuilder::new().build(&p, &s);
        assert_eq!(m.coverage_rate, 33.3);
    }

    #[test]
    fn test_empty_universe_yields_zero_coverage() {
        let p = ProblemBuilder::new().build().unwrap();
        let m = MetricsBuilder::new().build(&p, &Solution::empty());
        assert_eq!(m.coverage_rate, 0.0);
        assert_eq!(m.avg_satisfaction, 0.0);
        assert!(m.full_gaps.is_empty());
    }

    #[test]
    fn test_fulfillment_and_difference_per_requester() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("a", "A", 2)
                    .with_requested_dates(["2025-03-01", "2025-03-02"]),
                RequesterRow::new("b", "B", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        let s = solution(&[(nd(2025, 3, 2), &["a"])]);
        let m = MetricsBuilder::new().build(&p, &s);
        let a = &m.requester_stats[0];
        assert_eq!(a.assigned, 1);
        assert_eq!(a.difference, -1);
        assert_eq!(a.fulfillment, 50.0);
        let b = &m.requester_stats[1];
        assert_eq!(b.difference, -1);
        assert_eq!(b.fulfillment, 0.0);
        assert_eq!(m.avg_satisfaction, 25.0);
    }

    #[test]
    fn test_zero_desired_counts_as_fully_satisfied() {
        let p = ProblemBuilder::new()
            .with_rows([RequesterRow::new("a", "A", 0)])
            .build()
            .unwrap();
        let m = MetricsBuilder::new().build(&p, &Solution::empty());
        assert_eq!(m.requester_stats[0].fulfillment, 100.0);
        assert_eq!(m.avg_satisfaction, 100.0);
    }

    #[test]
    fn test_full_gaps_cover_every_underfilled_night() {
        let p = ProblemBuilder::new()
            .with_slots_per_night(2)
            .with_rows([
                RequesterRow::new("a", "A", 2)
                    .with_requested_dates(["2025-03-01", "2025-03-02"]),
                RequesterRow::new("b", "B", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        let s = solution(&[(nd(2025, 3, 1), &["a", "b"]), (nd(2025, 3, 2), &["a"])]);
        let m = MetricsBuilder::new().build(&p, &s);
        assert_eq!(m.full_gaps, vec![nd(2025, 3, 2)]);
        assert!(m.partial_gaps.is_none());
    }

    #[test]
    fn test_dense_mode_separates_partial_gaps() {
        let range = NightRange::new(nd(2025, 3, 1), nd(2025, 3, 3)).unwrap();
        let p = ProblemBuilder::new()
            .with_slots_per_night(2)
            .with_night_range(range)
            .with_rows([RequesterRow::new("a", "A", 1).with_requested_dates(["2025-03-01"])])
            .build()
            .unwrap();
        let s = solution(&[(nd(2025, 3, 1), &["a"])]);
        let m = MetricsBuilder::new().build(&p, &s);
        assert_eq!(
            m.full_gaps,
            vec![nd(2025, 3, 1), nd(2025, 3, 2), nd(2025, 3, 3)]
        );
        assert_eq!(m.partial_gaps, Some(vec![nd(2025, 3, 1)]));
    }

    #[test]
    fn test_metrics_are_idempotent() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("a", "A", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        let s = solution(&[(nd(2025, 3, 1), &["a"])]);
        let builder = MetricsBuilder::new();
        assert_eq!(builder.build(&p, &s), builder.build(&p, &s));
    }
}
