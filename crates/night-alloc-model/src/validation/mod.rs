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

pub mod err;

use crate::problem::prob::Problem;
use crate::solution::sol::Solution;
use crate::validation::err::{
    DuplicateAssignmentError, NightOverfilledError, SolutionValidationError,
    UnknownRequesterError, UnrequestedAssignmentError,
};
use std::collections::HashSet;

/// Checks a finished schedule against the problem it was produced for.
///
/// The checked invariants are the ones every strategy must uphold:
/// every assignee exists and requested the night, no requester appears
/// twice on the same night, and no night exceeds the headcount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionValidator;

impl SolutionValidator {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn validate(
        &self,
        problem: &Problem,
        solution: &Solution,
    ) -> Result<(), SolutionValidationError> {
        for (night, ids) in solution.iter() {
            if ids.len() > problem.slots_per_night() as usize {
                return Err(NightOverfilledError::new(
                    night,
                    ids.len(),
                    problem.slots_per_night(),
                ))?;
            }

            let mut seen = HashSet::with_capacity(ids.len());
            for id in ids {
                if !seen.insert(id) {
                    return Err(DuplicateAssignmentError::new(night, id.clone()))?;
                }
                let requester = problem
                    .requester(id)
                    .ok_or_else(|| UnknownRequesterError::new(id.clone()))?;
                if !requester.has_requested(night) {
                    return Err(UnrequestedAssignmentError::new(night, id.clone()))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::builder::{ProblemBuilder, RequesterRow};
    use crate::problem::night::NightDate;
    use crate::problem::req::RequesterIdentifier;
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

    fn problem(slots: u32) -> Problem {
        ProblemBuilder::new()
            .with_slots_per_night(slots)
            .with_rows([
                RequesterRow::new("a", "A", 2)
                    .with_requested_dates(["2025-03-01", "2025-03-02"]),
                RequesterRow::new("b", "B", 1).with_requested_dates(["2025-03-01"]),
            ])
            .build()
            .unwrap()
    }

    fn solution(entries: &[(NightDate, &[&str])]) -> Solution {
        let mut schedule = BTreeMap::new();
        for &(night, ids) in entries {
            schedule.insert(night, ids.iter().map(|s| rid(s)).collect());
        }
        Solution::from_schedule(schedule)
    }

    #[test]
    fn test_valid_solution_passes() {
        let p = problem(2);
        let s = solution(&[
            (nd(2025, 3, 1), &["a", "b"]),
            (nd(2025, 3, 2), &["a"]),
        ]);
        assert!(SolutionValidator::new().validate(&p, &s).is_ok());
    }

    #[test]
    fn test_overfilled_night_is_rejected() {
        let p = problem(1);
        let s = solution(&[(nd(2025, 3, 1), &["a", "b"])]);
        let err = SolutionValidator::new().validate(&p, &s).unwrap_err();
        match err {
            SolutionValidationError::NightOverfilled(e) => {
                assert_eq!(e.night(), nd(2025, 3, 1));
                assert_eq!(e.assigned(), 2);
                assert_eq!(e.slots(), 1);
            }
            other => panic!("expected NightOverfilled, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_assignment_is_rejected() {
        let p = problem(2);
        let s = solution(&[(nd(2025, 3, 1), &["a", "a"])]);
        let err = SolutionValidator::new().validate(&p, &s).unwrap_err();
        match err {
            SolutionValidationError::DuplicateAssignment(e) => {
                assert_eq!(e.id(), &rid("a"));
            }
            other => panic!("expected DuplicateAssignment, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_requester_is_rejected() {
        let p = problem(2);
        let s = solution(&[(nd(2025, 3, 1), &["ghost"])]);
        let err = SolutionValidator::new().validate(&p, &s).unwrap_err();
        match err {
            SolutionValidationError::UnknownRequester(e) => assert_eq!(e.id(), &rid("ghost")),
            other => panic!("expected UnknownRequester, got {other:?}"),
        }
    }

    #[test]
    fn test_unrequested_assignment_is_rejected() {
        let p = problem(2);
        let s = solution(&[(nd(2025, 3, 2), &["b"])]);
        let err = SolutionValidator::new().validate(&p, &s).unwrap_err();
        match err {
            SolutionValidationError::UnrequestedAssignment(e) => {
                assert_eq!(e.id(), &rid("b"));
                assert_eq!(e.night(), nd(2025, 3, 2));
            }
            other => panic!("expected UnrequestedAssignment, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_solution_passes() {
        let p = problem(1);
        assert!(SolutionValidator::new()
            .validate(&p, &Solution::empty())
            .is_ok());
    }
}
