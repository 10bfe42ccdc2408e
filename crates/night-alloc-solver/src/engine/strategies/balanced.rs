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
use crate::engine::need::need_score;
use crate::engine::strategy::{Strategy, StrategyKind};
use night_alloc_model::problem::night::NightDate;
use night_alloc_model::problem::req::Requester;

/// Hands each slot to whoever needs it most right now.
///
/// Candidate order: need score descending, then total request count
/// descending (broadly flexible requesters win ties), then priority tier,
/// then name. Never pushes anyone past their desired count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BalancedStrategy;

impl Strategy for BalancedStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::NAME_BALANCED
    }

    fn assign_night(&self, ctx: &mut RunContext<'_>, night: NightDate) {
        let problem = ctx.problem();
        let mut candidates: Vec<&Requester> = problem
            .requesters_for_night(night)
            .iter()
            .filter_map(|id| problem.requester(id))
            .collect();

        candidates.sort_by(|a, b| {
            let need_a = need_score(a, ctx.assigned_count(a.id()));
            let need_b = need_score(b, ctx.assigned_count(b.id()));
            need_b
                .cmp(&need_a)
                .then_with(|| b.request_count().cmp(&a.request_count()))
                .then_with(|| a.priority().cmp(&b.priority()))
                .then_with(|| a.name().cmp(b.name()))
        });

        for requester in candidates {
            if ctx.is_full(night) {
                break;
            }
            if ctx.assigned_count(requester.id()) >= requester.desired() as usize {
                continue;
            }
            ctx.try_assign(night, requester.id());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use night_alloc_model::problem::builder::{ProblemBuilder, RequesterRow};
    use night_alloc_model::problem::prob::Problem;
    use night_alloc_model::problem::req::RequesterIdentifier;
    use chrono::NaiveDate;

    #[inline]
    fn rid(s: &str) -> RequesterIdentifier {
        RequesterIdentifier::new(s.to_string())
    }

    #[inline]
    fn nd(y: i32, m: u32, d: u32) -> NightDate {
        NightDate::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn assign(problem: &Problem, night: NightDate) -> Vec<RequesterIdentifier> {
        let mut ctx = RunContext::new(problem);
        BalancedStrategy.assign_night(&mut ctx, night);
        ctx.into_solution().assignments_for(night).to_vec()
    }

    #[test]
    fn test_higher_deficit_wins_the_slot() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("one", "One", 1).with_requested_dates(["2025-03-01"]),
                RequesterRow::new("three", "Three", 3).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        assert_eq!(assign(&p, nd(2025, 3, 1)), vec![rid("three")]);
    }

    #[test]
    fn test_priority_breaks_equal_deficit() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("low", "Low", 1)
                    .with_requested_dates(["2025-03-01"])
                    .with_priority(3),
                RequesterRow::new("high", "High", 1)
                    .with_requested_dates(["2025-03-01"])
                    .with_priority(1),
            ])
            .build()
            .unwrap();
        assert_eq!(assign(&p, nd(2025, 3, 1)), vec![rid("high")]);
    }

    #[test]
    fn test_broader_request_set_breaks_score_ties() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("narrow", "Narrow", 1).with_requested_dates(["2025-03-01"]),
                RequesterRow::new("wide", "Wide", 1)
                    .with_requested_dates(["2025-03-01", "2025-03-02", "2025-03-03"]),
            ])
            .build()
            .unwrap();
        assert_eq!(assign(&p, nd(2025, 3, 1)), vec![rid("wide")]);
    }

    #[test]
    fn test_name_is_the_final_tie_break() {
        let p = ProblemBuilder::new()
            .with_rows([
                RequesterRow::new("z", "Zoe", 1).with_requested_dates(["2025-03-01"]),
                RequesterRow::new("a", "Ada", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        assert_eq!(assign(&p, nd(2025, 3, 1)), vec![rid("a")]);
    }

    #[test]
    fn test_quota_is_never_exceeded() {
        let p = ProblemBuilder::new()
            .with_rows([RequesterRow::new("a", "A", 0).with_requested_dates(["2025-03-01"])])
            .build()
            .unwrap();
        assert!(assign(&p, nd(2025, 3, 1)).is_empty());
    }

    #[test]
    fn test_fills_up_to_headcount() {
        let p = ProblemBuilder::new()
            .with_slots_per_night(2)
            .with_rows([
                RequesterRow::new("a", "A", 1).with_requested_dates(["2025-03-01"]),
                RequesterRow::new("b", "B", 1).with_requested_dates(["2025-03-01"]),
                RequesterRow::new("c", "C", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap();
        assert_eq!(assign(&p, nd(2025, 3, 1)).len(), 2);
    }
}
