// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{validation_len, Error, Grammar, Stream, StreamError};

/// Tracks characters that were not attributed to any element.
///
/// Every grammar scans its input once. Whatever the scanner cannot parse
/// is skipped char by char and remembered here, so the final check can
/// report the first unattributed position.
#[derive(Clone, Copy, Debug)]
pub struct Validator<'a> {
    text: &'a str,
    grammar: Grammar,
    first_skipped: Option<usize>,
}

impl<'a> Validator<'a> {
    /// Creates a new validator for the selected input.
    pub fn new(text: &'a str, grammar: Grammar) -> Self {
        Validator {
            text,
            grammar,
            first_skipped: None,
        }
    }

    /// Skips a single char and remembers its position.
    pub fn skip(&mut self, s: &mut Stream<'a>) {
        self.reject(s.pos());
        s.advance_char();
    }

    /// Remembers a byte position as unattributed without advancing.
    pub fn reject(&mut self, byte_pos: usize) {
        if self.first_skipped.is_none() {
            log::trace!(
                "Unexpected {} data at byte {} in '{}'.",
                self.grammar,
                byte_pos,
                self.text
            );
            self.first_skipped = Some(byte_pos);
        }
    }

    /// Returns an `UnrecognizedGrammar` error for this input.
    pub fn unrecognized(&self) -> Error {
        Error::UnrecognizedGrammar {
            grammar: self.grammar,
            text: self.text.to_string(),
        }
    }

    /// Returns an `AmbiguousDefinition` error for this input.
    pub fn ambiguous(&self) -> Error {
        Error::AmbiguousDefinition {
            grammar: self.grammar,
            text: self.text.to_string(),
        }
    }

    /// Checks that `attributed` characters cover the whole input.
    ///
    /// Whitespace is not counted on either side.
    pub fn check(&self, attributed: usize) -> Result<(), Error> {
        if attributed == validation_len(self.text) {
            return Ok(());
        }

        let byte_pos = self.first_skipped.unwrap_or(self.text.len());
        Err(Error::MalformedInput {
            grammar: self.grammar,
            pos: Stream::from(self.text).calc_char_pos_at(byte_pos),
            text: self.text.to_string(),
        })
    }
}

/// Parses a grammar that allows exactly one top-level definition.
///
/// `parse` is applied at every position the scanner stops at. Successful
/// matches are attributed to the input, failed ones are skipped.
pub fn parse_single<'a, T, F>(text: &'a str, grammar: Grammar, mut parse: F) -> Result<T, Error>
where
    F: FnMut(&mut Stream<'a>) -> Result<T, StreamError>,
{
    let mut s = Stream::from(text);
    let mut validator = Validator::new(text, grammar);
    let mut attributed = 0;
    let mut definitions = Vec::with_capacity(1);

    loop {
        s.skip_spaces();
        if s.at_end() {
            break;
        }

        let start = s.pos();
        let mut probe = s;
        match parse(&mut probe) {
            Ok(value) => {
                attributed += probe.span_from(start).validation_count();
                definitions.push(value);
                s = probe;
            }
            Err(_) => validator.skip(&mut s),
        }
    }

    if definitions.len() > 1 {
        return Err(validator.ambiguous());
    }

    let value = definitions.pop().ok_or_else(|| validator.unrecognized())?;
    validator.check(attributed)?;
    Ok(value)
}
