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
use crate::engine::strategy::{Strategy, StrategyKind};
use night_alloc_model::problem::night::NightDate;
use night_alloc_model::problem::req::Requester;

/// Fills every night it can, quota be damned.
///
/// Candidate order: priority tier first, then current assigned count
/// ascending. The only strategy allowed to push a requester past their
/// desired count; it still never exceeds a night's headcount. A backfill
/// pass sweeps the same candidate list whenever slots remain open, so a
/// night is filled whenever enough distinct requesters asked for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoverageStrategy;

impl Strategy for CoverageStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::NAME_COVERAGE
    }

    fn assign_night(&self, ctx: &mut RunContext<'_>, night: NightDate) {
        let problem = ctx.problem();
        let mut candidates: Vec<&Requester> = problem
            .requesters_for_night(night)
            .iter()
            .filter_map(|id| problem.requester(id))
            .collect();

        candidates.sort_by(|a, b| {
            a.priority()
                .cmp(&b.priority())
                .then_with(|| ctx.assigned_count(a.id()).cmp(&ctx.assigned_count(b.id())))
        });

        for requester in &candidates {
            if ctx.is_full(night) {
                break;
            }
            ctx.try_assign(night, requester.id());
        }

        // Backfill any slots still open with the first uncommitted
        // candidates in the same order.
        if !ctx.is_full(night) {
            for requester in &candidates {
                if ctx.is_full(night) {
                    break;
                }
                ctx.try_assign(night, requester.id());
            }
        }
    }
}
