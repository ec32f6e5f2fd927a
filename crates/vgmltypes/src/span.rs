// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::ByteExt;

/// A region of the source text matched by an element.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct Span<'a> {
    /// A byte offset of the element in the source text.
    pub source_index: usize,
    /// The matched text.
    pub raw: &'a str,
}

impl<'a> Span<'a> {
    /// Creates a new span.
    #[inline]
    pub fn new(source_index: usize, raw: &'a str) -> Self {
        Span { source_index, raw }
    }

    /// Creates an empty span for synthesized elements.
    #[inline]
    pub fn empty(source_index: usize) -> Self {
        Span {
            source_index,
            raw: "",
        }
    }

    /// Checks that the span was synthesized and doesn't cover any text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of non-whitespace characters covered by the span.
    pub fn validation_count(&self) -> usize {
        validation_len(self.raw)
    }
}

/// Returns the number of non-whitespace characters in the text.
///
/// Only `[ \r\n\t]` are whitespace, same as in `Stream::skip_spaces`.
pub fn validation_len(text: &str) -> usize {
    text.chars()
        .filter(|c| !(c.is_ascii() && (*c as u8).is_space()))
        .count()
}
