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
use rand::seq::SliceRandom;
use rand::Rng;

/// Serves the least-served requester first.
///
/// Candidate order: current assigned count ascending, then priority
/// tier. Quota is a hard ceiling. This is the sparse-mode greedy form;
/// dense-mode runs use [`run_rounds`] instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SatisfactionStrategy;

impl Strategy for SatisfactionStrategy {
    fn name(&self) -> &'static str {
        StrategyKind::NAME_SATISFACTION
    }

    fn assign_night(&self, ctx: &mut RunContext<'_>, night: NightDate) {
        let problem = ctx.problem();
        let mut candidates: Vec<&Requester> = problem
            .requesters_for_night(night)
            .iter()
            .filter_map(|id| problem.requester(id))
            .collect();

        candidates.sort_by(|a, b| {
            ctx.assigned_count(a.id())
                .cmp(&ctx.assigned_count(b.id()))
                .then_with(|| a.priority().cmp(&b.priority()))
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

/// Round-based satisfaction mode for dense night universes.
///
/// Each round, every requester still under quota claims at most one of
/// their open requested nights, preferring the least contested one.
/// Requester order is reshuffled every round and contention ties are
/// broken at random; feed a seeded rng for reproducible schedules.
/// Terminates once a full round makes no progress, which is bounded by
/// the largest desired count in the pool.
pub fn run_rounds<R: Rng>(ctx: &mut RunContext<'_>, rng: &mut R) {
    let problem = ctx.problem();
    loop {
        let mut under_quota: Vec<&Requester> = problem
            .requesters()
            .iter()
            .filter(|r| ctx.assigned_count(r.id()) < r.desired() as usize)
            .collect();
        under_quota.shuffle(rng);

        let mut progress = false;
        for requester in under_quota {
            if ctx.assigned_count(requester.id()) >= requester.desired() as usize {
                continue;
            }

            let options: Vec<NightDate> = requester
                .requests()
                .iter()
                .copied()
                .filter(|&night| {
                    problem.contains_night(night)
                        && !ctx.is_full(night)
                        && !ctx.contains(night, requester.id())
                })
                .collect();

            let least_contested = options
                .iter()
                .map(|&night| problem.requested_night_count(night))
                .min();
            let Some(least_contested) = least_contested else {
                continue;
            };

            let ties: Vec<NightDate> = options
                .into_iter()
                .filter(|&night| problem.requested_night_count(night) == least_contested)
                .collect();
            if let Some(&night) = ties.choose(rng) {
                if ctx.try_assign(night, requester.id()) {
                    progress = true;
                }
            }
        }

        if !progress {
            break;
        }
    }
}
