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

use night_alloc_model::problem::req::Requester;

/// Weight of one night of unmet quota. Larger than any priority bonus,
/// so a deficit difference of one always dominates the tie-break.
pub const DEFICIT_WEIGHT: i64 = 10;

/// Live urgency of a requester given their current assigned count.
///
/// `(desired - assigned) * DEFICIT_WEIGHT + priority bonus`. Recomputed
/// on every use; the assigned count moves with every assignment.
#[inline]
pub fn need_score(requester: &Requester, assigned: usize) -> i64 {
    let deficit = requester.desired() as i64 - assigned as i64;
    deficit * DEFICIT_WEIGHT + requester.priority().bonus()
}
