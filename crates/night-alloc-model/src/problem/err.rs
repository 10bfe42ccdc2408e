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
pub struct DateParseError {
    token: String,
}

impl DateParseError {
    pub fn new(token: String) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Display for DateParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Date token {:?} matches neither YYYY-MM-DD nor MM/DD/YYYY",
            self.token
        )
    }
}

impl std::error::Error for DateParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyNightRangeError {
    start: NightDate,
    end: NightDate,
}

impl EmptyNightRangeError {
    pub fn new(start: NightDate, end: NightDate) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> NightDate {
        self.start
    }

    pub fn end(&self) -> NightDate {
        self.end
    }
}

impl std::fmt::Display for EmptyNightRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Night range start {} lies after its end {}",
            self.start, self.end
        )
    }
}

impl std::error::Error for EmptyNightRangeError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmptyRequesterIdError {
    row: usize,
    name: String,
}

impl EmptyRequesterIdError {
    pub fn new(row: usize, name: String) -> Self {
        Self { row, name }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for EmptyRequesterIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requester record {} (name {:?}) has an empty id",
            self.row, self.name
        )
    }
}

impl std::error::Error for EmptyRequesterIdError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateRequesterIdError {
    id: RequesterIdentifier,
}

impl DuplicateRequesterIdError {
    pub fn new(id: RequesterIdentifier) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }
}

impl std::fmt::Display for DuplicateRequesterIdError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Requester id {} appears more than once", self.id)
    }
}

impl std::error::Error for DuplicateRequesterIdError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NegativeDesiredCountError {
    id: RequesterIdentifier,
    desired: i64,
}

impl NegativeDesiredCountError {
    pub fn new(id: RequesterIdentifier, desired: i64) -> Self {
        Self { id, desired }
    }

    pub fn id(&self) -> &RequesterIdentifier {
        &self.id
    }

    pub fn desired(&self) -> i64 {
        self.desired
    }
}

impl std::fmt::Display for NegativeDesiredCountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Requester {} has a negative desired night count ({})",
            self.id, self.desired
        )
    }
}

impl std::error::Error for NegativeDesiredCountError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZeroSlotsError;

impl std::fmt::Display for ZeroSlotsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slots per night must be at least 1")
    }
}

impl std::error::Error for ZeroSlotsError {}

/// Fatal input validation failures. Raised before any optimization runs;
/// a run never starts on a problem that failed to build.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationError {
    EmptyRequesterId(EmptyRequesterIdError),
    DuplicateRequesterId(DuplicateRequesterIdError),
    NegativeDesiredCount(NegativeDesiredCountError),
    ZeroSlots(ZeroSlotsError),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::EmptyRequesterId(e) => write!(f, "{}", e),
            ValidationError::DuplicateRequesterId(e) => write!(f, "{}", e),
            ValidationError::NegativeDesiredCount(e) => write!(f, "{}", e),
            ValidationError::ZeroSlots(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<EmptyRequesterIdError> for ValidationError {
    fn from(err: EmptyRequesterIdError) -> Self {
        ValidationError::EmptyRequesterId(err)
    }
}

impl From<DuplicateRequesterIdError> for ValidationError {
    fn from(err: DuplicateRequesterIdError) -> Self {
        ValidationError::DuplicateRequesterId(err)
    }
}

impl From<NegativeDesiredCountError> for ValidationError {
    fn from(err: NegativeDesiredCountError) -> Self {
        ValidationError::NegativeDesiredCount(err)
    }
}

impl From<ZeroSlotsError> for ValidationError {
    fn from(err: ZeroSlotsError) -> Self {
        ValidationError::ZeroSlots(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MissingColumnError {
    column: &'static str,
}

impl MissingColumnError {
    pub fn new(column: &'static str) -> Self {
        Self { column }
    }

    pub fn column(&self) -> &'static str {
        self.column
    }
}

impl std::fmt::Display for MissingColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Required column {:?} is missing from the input", self.column)
    }
}

impl std::error::Error for MissingColumnError {}

#[derive(Debug)]
pub enum LoaderError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(MissingColumnError),
    Validation(ValidationError),
}

impl From<std::io::Error> for LoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for LoaderError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

impl From<MissingColumnError> for LoaderError {
    fn from(e: MissingColumnError) -> Self {
        Self::MissingColumn(e)
    }
}

impl From<ValidationError> for LoaderError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use LoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            Csv(e) => write!(f, "CSV error: {e}"),
            MissingColumn(e) => write!(f, "{e}"),
            Validation(e) => write!(f, "validation error: {e}"),
        }
    }
}

impl std::error::Error for LoaderError {}
