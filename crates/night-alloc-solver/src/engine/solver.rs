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
use crate::engine::ranking::rank_nights;
use crate::engine::strategies::balanced::BalancedStrategy;
use crate::engine::strategies::coverage::CoverageStrategy;
use crate::engine::strategies::satisfaction::{run_rounds, SatisfactionStrategy};
use crate::engine::strategy::{Strategy, StrategyKind};
use crate::metrics::{Metrics, MetricsBuilder};
use night_alloc_model::problem::prob::Problem;
use night_alloc_model::solution::sol::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Schedule plus the metrics derived from it, as returned by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    solution: Solution,
    metrics: Metrics,
}

impl SolveResult {
    #[inline]
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[inline]
    pub fn into_parts(self) -> (Solution, Metrics) {
        (self.solution, self.metrics)
    }
}

/// One optimization run: ranks the nights, lets the configured strategy
/// fill them, and derives the metrics. The seed only matters for the
/// satisfaction strategy's round-based dense mode; everything else is
/// deterministic on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solver {
    strategy: StrategyKind,
    seed: u64,
}

impl Solver {
    pub fn new(strategy: StrategyKind) -> Self {
        Self { strategy, seed: 0 }
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn solve(&self, problem: &Problem) -> SolveResult {
        tracing::info!(
            strategy = %self.strategy,
            nights = problem.night_count(),
            requesters = problem.requesters().len(),
            slots_per_night = problem.slots_per_night(),
            "starting optimization run"
        );

        let mut ctx = RunContext::new(problem);
        match (self.strategy, problem.is_dense()) {
            (StrategyKind::Satisfaction, true) => {
                let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
                run_rounds(&mut ctx, &mut rng);
            }
            _ => {
                let strategy: &dyn Strategy = match self.strategy {
                    StrategyKind::Balanced => &BalancedStrategy,
                    StrategyKind::Coverage => &CoverageStrategy,
                    StrategyKind::Satisfaction => &SatisfactionStrategy,
                };
                for night in rank_nights(problem) {
                    if problem.requesters_for_night(night).is_empty() {
                        continue;
                    }
                    strategy.assign_night(&mut ctx, night);
                }
            }
        }

        let solution = ctx.into_solution();
        let metrics = MetricsBuilder::new().build(problem, &solution);
        tracing::info!(
            filled_slots = solution.filled_slots(),
            coverage_rate = metrics.coverage_rate,
            avg_satisfaction = metrics.avg_satisfaction,
            "optimization run finished"
        );
        SolveResult { solution, metrics }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(StrategyKind::default())
    }
}
