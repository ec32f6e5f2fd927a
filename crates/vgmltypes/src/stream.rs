// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use crate::{Point, Span, StreamError};

/// Extension methods for ASCII-only byte classification.
pub trait ByteExt {
    /// Checks if a byte is a numeric sign.
    fn is_sign(&self) -> bool;

    /// Checks if a byte is a digit.
    ///
    /// `[0-9]`
    fn is_digit(&self) -> bool;

    /// Checks if a byte is a hex digit.
    ///
    /// `[0-9A-Fa-f]`
    fn is_hex_digit(&self) -> bool;

    /// Checks if a byte is a space.
    ///
    /// `[ \r\n\t]`
    fn is_space(&self) -> bool;

    /// Checks if a byte is an ASCII char.
    ///
    /// `[A-Za-z]`
    fn is_letter(&self) -> bool;

    /// Checks if a byte can start a number.
    ///
    /// `[0-9.+-]`
    fn is_number_start(&self) -> bool;
}

impl ByteExt for u8 {
    #[inline]
    fn is_sign(&self) -> bool {
        matches!(*self, b'+' | b'-')
    }

    #[inline]
    fn is_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9')
    }

    #[inline]
    fn is_hex_digit(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'A'..=b'F' | b'a'..=b'f')
    }

    #[inline]
    fn is_space(&self) -> bool {
        matches!(*self, b' ' | b'\t' | b'\n' | b'\r')
    }

    #[inline]
    fn is_letter(&self) -> bool {
        matches!(*self, b'A'..=b'Z' | b'a'..=b'z')
    }

    #[inline]
    fn is_number_start(&self) -> bool {
        matches!(*self, b'0'..=b'9' | b'.' | b'-' | b'+')
    }
}

/// An enumeration encoded as a zero-based integer index.
///
/// Indices outside of `VARIANTS` fall back to `Default` with a warning.
pub trait IndexedEnum: Copy + Default + std::fmt::Debug + 'static {
    /// A human readable name used in diagnostics.
    const NAME: &'static str;

    /// All variants in index order.
    const VARIANTS: &'static [Self];
}

/// A streaming text parsing interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Stream<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> From<&'a str> for Stream<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        Stream { text, pos: 0 }
    }
}

impl<'a> Stream<'a> {
    /// Returns the current position in bytes.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Calculates the current position in chars.
    pub fn calc_char_pos(&self) -> usize {
        self.calc_char_pos_at(self.pos)
    }

    /// Calculates a 1-based position in chars of the selected byte offset.
    pub fn calc_char_pos_at(&self, byte_pos: usize) -> usize {
        self.text
            .char_indices()
            .take_while(|(idx, _)| *idx < byte_pos)
            .count()
            + 1
    }

    /// Checks if the stream is reached the end.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Errors
    ///
    /// - `UnexpectedEndOfStream`
    #[inline]
    pub fn curr_byte(&self) -> Result<u8, StreamError> {
        if self.at_end() {
            return Err(StreamError::UnexpectedEndOfStream);
        }

        Ok(self.curr_byte_unchecked())
    }

    /// Returns a byte from a current stream position.
    ///
    /// # Panics
    ///
    /// - if the current position is after the end of the data
    #[inline]
    pub fn curr_byte_unchecked(&self) -> u8 {
        self.text.as_bytes()[self.pos]
    }

    /// Checks that current byte is equal to provided.
    ///
    /// Returns `false` if no bytes left.
    #[inline]
    pub fn is_curr_byte_eq(&self, c: u8) -> bool {
        if !self.at_end() {
            self.curr_byte_unchecked() == c
        } else {
            false
        }
    }

    /// Checks that the current byte can start a number.
    #[inline]
    pub fn starts_with_number(&self) -> bool {
        !self.at_end() && self.curr_byte_unchecked().is_number_start()
    }

    /// Advances by `n` bytes.
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.text.len());
        self.pos += n;
    }

    /// Advances by a single char, which can be longer than a byte.
    pub fn advance_char(&mut self) {
        if let Some(c) = self.text[self.pos..].chars().next() {
            self.pos += c.len_utf8();
        }
    }

    /// Skips whitespaces.
    ///
    /// Accepted values: `' ' \n \r \t`.
    pub fn skip_spaces(&mut self) {
        while !self.at_end() && self.curr_byte_unchecked().is_space() {
            self.advance(1);
        }
    }

    /// Consumes bytes by the predicate and returns them.
    ///
    /// The result can be empty.
    pub fn consume_bytes<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(&Stream, u8) -> bool,
    {
        let start = self.pos();
        self.skip_bytes(f);
        self.slice_back(start)
    }

    /// Consumes bytes by the predicate.
    pub fn skip_bytes<F>(&mut self, f: F)
    where
        F: Fn(&Stream, u8) -> bool,
    {
        while !self.at_end() {
            let c = self.curr_byte_unchecked();
            if f(self, c) {
                self.advance(1);
            } else {
                break;
            }
        }
    }

    /// Slices data from `pos` to the current position.
    #[inline]
    pub fn slice_back(&self, pos: usize) -> &'a str {
        &self.text[pos..self.pos]
    }

    /// Slices data from the current position to the end.
    #[inline]
    pub fn slice_tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Returns a span from `pos` to the current position.
    ///
    /// Trailing whitespaces are not part of the span.
    pub fn span_from(&self, pos: usize) -> Span<'a> {
        Span::new(pos, self.slice_back(pos).trim_end())
    }

    /// Returns a keyword at the current position without consuming it.
    ///
    /// A keyword is a run of uppercase ASCII letters. The result can be empty.
    pub fn peek_keyword(&self) -> &'a str {
        let mut s = *self;
        s.consume_bytes(|_, c| c.is_ascii_uppercase())
    }

    /// Consumes a selected keyword.
    ///
    /// Leading spaces are skipped. Returns `false` and doesn't advance
    /// when the stream is not at the keyword.
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        let mut s = *self;
        s.skip_spaces();
        if s.peek_keyword() == keyword {
            s.advance(keyword.len());
            *self = s;
            true
        } else {
            false
        }
    }

    /// Parses a number from the stream.
    ///
    /// Accepts `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`.
    /// An exponent is consumed only when it is followed by digits.
    ///
    /// A well-formed number that doesn't fit into `f32` becomes `0`.
    ///
    /// # Errors
    ///
    /// - `InvalidNumber`
    pub fn parse_number(&mut self) -> Result<f32, StreamError> {
        self.skip_spaces();

        let start = self.pos();

        if self.at_end() {
            return Err(StreamError::InvalidNumber(self.calc_char_pos_at(start)));
        }

        if self.skip_number_lexeme().is_err() {
            return Err(StreamError::InvalidNumber(self.calc_char_pos_at(start)));
        }

        let text = self.slice_back(start);
        match f32::from_str(text) {
            Ok(n) if n.is_finite() => Ok(n),
            _ => {
                log::warn!("'{}' is not a valid number. Using 0 instead.", text);
                Ok(0.0)
            }
        }
    }

    fn skip_number_lexeme(&mut self) -> Result<(), StreamError> {
        if self.curr_byte()?.is_sign() {
            self.advance(1);
        }

        let int_start = self.pos();
        self.skip_digits();
        let has_integer = self.pos() != int_start;

        if self.is_curr_byte_eq(b'.') {
            self.advance(1);
            let frac_start = self.pos();
            self.skip_digits();
            if !has_integer && self.pos() == frac_start {
                return Err(StreamError::UnexpectedData(self.calc_char_pos()));
            }
        } else if !has_integer {
            return Err(StreamError::UnexpectedData(self.calc_char_pos()));
        }

        if matches!(self.curr_byte(), Ok(b'e' | b'E')) {
            let mut s = *self;
            s.advance(1);
            if s.curr_byte().map(|c| c.is_sign()).unwrap_or(false) {
                s.advance(1);
            }

            if s.curr_byte().map(|c| c.is_digit()).unwrap_or(false) {
                s.skip_digits();
                *self = s;
            }
        }

        Ok(())
    }

    /// Parses number from a list of numbers.
    pub fn parse_list_number(&mut self) -> Result<f32, StreamError> {
        if self.at_end() {
            return Err(StreamError::UnexpectedEndOfStream);
        }

        let n = self.parse_number()?;
        self.skip_spaces();
        self.parse_list_separator();
        Ok(n)
    }

    /// Parses a pair of numbers from a list of numbers.
    pub fn parse_list_point(&mut self) -> Result<Point, StreamError> {
        let x = self.parse_list_number()?;
        let y = self.parse_list_number()?;
        Ok(Point::from_xy(x, y))
    }

    /// Parses integer number from the stream.
    ///
    /// Same as [`parse_number()`], but only for integer.
    /// A value that overflows `i32` becomes `0`.
    ///
    /// [`parse_number()`]: #method.parse_number
    pub fn parse_integer(&mut self) -> Result<i32, StreamError> {
        self.skip_spaces();

        if self.at_end() {
            return Err(StreamError::InvalidNumber(self.calc_char_pos()));
        }

        let start = self.pos();

        // Consume sign.
        if self.curr_byte()?.is_sign() {
            self.advance(1);
        }

        // The current char must be a digit.
        if !self.curr_byte()?.is_digit() {
            return Err(StreamError::InvalidNumber(self.calc_char_pos_at(start)));
        }

        self.skip_digits();

        let text = self.slice_back(start);
        match i32::from_str(text) {
            Ok(n) => Ok(n),
            Err(_) => {
                log::warn!("'{}' is not a valid integer. Using 0 instead.", text);
                Ok(0)
            }
        }
    }

    /// Parses integer from a list of numbers.
    pub fn parse_list_integer(&mut self) -> Result<i32, StreamError> {
        if self.at_end() {
            return Err(StreamError::UnexpectedEndOfStream);
        }

        let n = self.parse_integer()?;
        self.skip_spaces();
        self.parse_list_separator();
        Ok(n)
    }

    /// Parses an enumeration index from a list of numbers.
    pub fn parse_list_indexed<T: IndexedEnum>(&mut self) -> Result<T, StreamError> {
        let n = self.parse_list_integer()?;
        match usize::try_from(n).ok().and_then(|idx| T::VARIANTS.get(idx)) {
            Some(v) => Ok(*v),
            None => {
                let fallback = T::default();
                log::warn!(
                    "{} index {} is out of range. Using {:?} instead.",
                    T::NAME,
                    n,
                    fallback
                );
                Ok(fallback)
            }
        }
    }

    /// Parses a single-char `0`/`1` flag.
    ///
    /// Flags can be written without any separators, e.g.: `10 20 30 01 10 20`.
    pub fn parse_flag(&mut self) -> Result<bool, StreamError> {
        self.skip_spaces();

        let c = self.curr_byte()?;
        match c {
            b'0' | b'1' => {
                self.advance(1);
                self.skip_spaces();
                self.parse_list_separator();
                self.skip_spaces();

                Ok(c == b'1')
            }
            _ => Err(StreamError::UnexpectedData(self.calc_char_pos())),
        }
    }

    /// Skips digits.
    pub fn skip_digits(&mut self) {
        self.skip_bytes(|_, c| c.is_digit());
    }

    /// Consumes a single comma, if available.
    #[inline]
    pub fn parse_list_separator(&mut self) {
        if self.is_curr_byte_eq(b',') {
            self.advance(1);
        }
    }
}
