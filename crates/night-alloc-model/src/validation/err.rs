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

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateAssignmentError {
    night: NightDate,
    id: RequesterIdentifier,
}

impl DuplicateAssignmentError {
    pub fn new(night: NightDate, id: RequesterIdentifier) -> Self {
        Self { night, id }
    }

    pub fn night(&self) -> NightDate {
        self.night
    }

    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }
}

impl std::fmt::Display for DuplicateAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requester {} is assigned more than once to night {}",
            self.id, self.night
        )
    }
}

impl std::error::Error for DuplicateAssignmentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NightOverfilledError {
    night: NightDate,
    assigned: usize,
    slots: u32,
}

impl NightOverfilledError {
    pub fn new(night: NightDate, assigned: usize, slots: u32) -> Self {
        Self {
            night,
            assigned,
            slots,
        }
    }

    pub fn night(&self) -> NightDate {
        self.night
    }

    pub fn assigned(&self) -> usize {
        self.assigned
    }

    pub fn slots(&self) -> u32 {
        self.slots
    }
}

impl std::fmt::Display for NightOverfilledError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Night {} holds {} assignments but only {} slot(s)",
            self.night, self.assigned, self.slots
        )
    }
}

impl std::error::Error for NightOverfilledError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnrequestedAssignmentError {
    night: NightDate,
    id: RequesterIdentifier,
}

impl UnrequestedAssignmentError {
    pub fn new(night: NightDate, id: RequesterIdentifier) -> Self {
        Self { night, id }
    }

    pub fn night(&self) -> NightDate {
        self.night
    }

    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }
}

impl std::fmt::Display for UnrequestedAssignmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requester {} is assigned to night {} without having requested it",
            self.id, self.night
        )
    }
}

impl std::error::Error for UnrequestedAssignmentError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownRequesterError {
    id: RequesterIdentifier,
}

impl UnknownRequesterError {
    pub fn new(id: RequesterIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }
}

impl std::fmt::Display for UnknownRequesterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Schedule references unknown requester {}", self.id)
    }
}

impl std::error::Error for UnknownRequesterError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SolutionValidationError {
    DuplicateAssignment(DuplicateAssignmentError),
    NightOverfilled(NightOverfilledError),
    UnrequestedAssignment(UnrequestedAssignmentError),
    UnknownRequester(UnknownRequesterError),
}

impl std::fmt::Display for SolutionValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionValidationError::DuplicateAssignment(e) => write!(f, "{}", e),
            SolutionValidationError::NightOverfilled(e) => write!(f, "{}", e),
            SolutionValidationError::UnrequestedAssignment(e) => write!(f, "{}", e),
            SolutionValidationError::UnknownRequester(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SolutionValidationError {}

impl From<DuplicateAssignmentError> for SolutionValidationError {
    fn from(err: DuplicateAssignmentError) -> Self {
        SolutionValidationError::DuplicateAssignment(err)
    }
}

impl From<NightOverfilledError> for SolutionValidationError {
    fn from(err: NightOverfilledError) -> Self {
        SolutionValidationError::NightOverfilled(err)
    }
}

impl From<UnrequestedAssignmentError> for SolutionValidationError {
    fn from(err: UnrequestedAssignmentError) -> Self {
        SolutionValidationError::UnrequestedAssignment(err)
    }
}

impl From<UnknownRequesterError> for SolutionValidationError {
    fn from(err: UnknownRequesterError) -> Self {
        SolutionValidationError::UnknownRequester(err)
    }
}
