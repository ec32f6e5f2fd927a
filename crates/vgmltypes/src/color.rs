// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{parse_single, ByteExt, Error, Grammar, Stream, StreamError};

/// An 8-bit ARGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[allow(missing_docs)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    /// Constructs a new `Color` from ARGB values.
    #[inline]
    pub fn from_argb(alpha: u8, red: u8, green: u8, blue: u8) -> Color {
        Color {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Constructs a new opaque `Color` from RGB values.
    #[inline]
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Color {
        Color::from_argb(255, red, green, blue)
    }

    /// Converts the color into normalized floats.
    pub fn to_hdr(&self) -> HdrColor {
        HdrColor::new(
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
            self.alpha as f32 / 255.0,
        )
    }
}

impl std::str::FromStr for Color {
    type Err = Error;

    /// Parses a `Color` from a string.
    ///
    /// Accepts `#RRGGBB`, `#AARRGGBB` (the `#` is optional)
    /// and four HDR floats, which are converted to bytes.
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_single(text, Grammar::Color, |s| s.parse_color())
    }
}

/// A color with normalized floating point channels.
///
/// Channels are not clamped and may exceed `0..=1`.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
#[allow(missing_docs)]
pub struct HdrColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl HdrColor {
    /// Constructs a new `HdrColor`.
    #[inline]
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        HdrColor { r, g, b, a }
    }

    /// Converts the color into 8-bit channels.
    ///
    /// Each channel maps to `round(clamp(|c|, 0, 1) * 255)`.
    pub fn to_color(&self) -> Color {
        Color::from_argb(
            hdr_channel(self.a),
            hdr_channel(self.r),
            hdr_channel(self.g),
            hdr_channel(self.b),
        )
    }
}

impl From<HdrColor> for Color {
    #[inline]
    fn from(c: HdrColor) -> Self {
        c.to_color()
    }
}

impl std::str::FromStr for HdrColor {
    type Err = Error;

    /// Parses an `HdrColor` from a string.
    ///
    /// Accepts the same forms as `Color`. Hex colors are normalized.
    fn from_str(text: &str) -> Result<Self, Error> {
        parse_single(text, Grammar::Color, |s| {
            let mut probe = *s;
            match probe.parse_hex_color() {
                Ok(color) => {
                    *s = probe;
                    Ok(color.to_hdr())
                }
                Err(_) => s.parse_hdr_color(),
            }
        })
    }
}

impl<'a> Stream<'a> {
    /// Parses a hex or an HDR color.
    ///
    /// A bare run of 6 or 8 hex digits is always treated as a hex color.
    pub fn parse_color(&mut self) -> Result<Color, StreamError> {
        let mut probe = *self;
        if let Ok(color) = probe.parse_hex_color() {
            *self = probe;
            return Ok(color);
        }

        self.parse_hdr_color().map(Color::from)
    }

    /// Parses a `#RRGGBB` or a `#AARRGGBB` color. The `#` is optional.
    pub fn parse_hex_color(&mut self) -> Result<Color, StreamError> {
        self.skip_spaces();

        let start = self.pos();
        if self.is_curr_byte_eq(b'#') {
            self.advance(1);
        }

        let digits = self.consume_bytes(|_, c| c.is_hex_digit()).as_bytes();

        // A hex color must not be glued to a following token.
        if let Ok(c) = self.curr_byte() {
            if c.is_letter() || c == b'.' {
                return Err(StreamError::UnexpectedData(self.calc_char_pos()));
            }
        }

        let color = match *digits {
            [r1, r2, g1, g2, b1, b2] => {
                Color::from_rgb(hex_pair(r1, r2), hex_pair(g1, g2), hex_pair(b1, b2))
            }
            [a1, a2, r1, r2, g1, g2, b1, b2] => Color::from_argb(
                hex_pair(a1, a2),
                hex_pair(r1, r2),
                hex_pair(g1, g2),
                hex_pair(b1, b2),
            ),
            _ => return Err(StreamError::UnexpectedData(self.calc_char_pos_at(start))),
        };

        self.skip_spaces();
        self.parse_list_separator();
        Ok(color)
    }

    /// Parses four floats as an HDR color.
    pub fn parse_hdr_color(&mut self) -> Result<HdrColor, StreamError> {
        Ok(HdrColor::new(
            self.parse_list_number()?,
            self.parse_list_number()?,
            self.parse_list_number()?,
            self.parse_list_number()?,
        ))
    }
}

#[inline]
fn hdr_channel(v: f32) -> u8 {
    (v.abs().min(1.0) * 255.0).round() as u8
}

#[inline]
fn from_hex(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[inline]
fn hex_pair(c1: u8, c2: u8) -> u8 {
    (from_hex(c1) << 4) | from_hex(c2)
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::{Color, Error, Grammar, HdrColor};

    macro_rules! test {
        ($name:ident, $text:expr, $color:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Color::from_str($text).unwrap(), $color);
            }
        };
    }

    test!(rrggbb, "#ff0000", Color::from_rgb(255, 0, 0));
    test!(rrggbb_upper, "#FF0000", Color::from_rgb(255, 0, 0));
    test!(aarrggbb, "#80FF0000", Color::from_argb(128, 255, 0, 0));
    test!(no_hash, "00ff00", Color::from_rgb(0, 255, 0));
    test!(padded, "  #0000ff  ", Color::from_rgb(0, 0, 255));
    test!(hdr_gray, "0.5 0.5 0.5 1", Color::from_argb(255, 128, 128, 128));
    test!(hdr_commas, "1,0,0,0.5", Color::from_argb(128, 255, 0, 0));
    test!(hdr_clamped, "2 -1 0 1", Color::from_argb(255, 255, 255, 0));

    macro_rules! test_err {
        ($name:ident, $text:expr, $err:pat) => {
            #[test]
            fn $name() {
                assert!(matches!(Color::from_str($text).unwrap_err(), $err));
            }
        };
    }

    test_err!(empty, "", Error::UnrecognizedGrammar { .. });
    test_err!(short_hex, "#fff", Error::UnrecognizedGrammar { .. });
    test_err!(two_colors, "#ff0000 #00ff00", Error::AmbiguousDefinition { .. });
    test_err!(hdr_too_short, "0.5 0.5 0.5", Error::UnrecognizedGrammar { .. });
    test_err!(trailing_data, "#ff0000 x", Error::MalformedInput { pos: 9, .. });

    #[test]
    fn error_keeps_input() {
        let err = Color::from_str("nope").unwrap_err();
        assert_eq!(err.grammar(), Grammar::Color);
        assert_eq!(err.text(), "nope");
    }

    #[test]
    fn hdr_from_hex() {
        let c = HdrColor::from_str("#FF000000").unwrap();
        assert_eq!(c, HdrColor::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn hdr_from_floats() {
        let c = HdrColor::from_str("0.25 4 0 1").unwrap();
        assert_eq!(c, HdrColor::new(0.25, 4.0, 0.0, 1.0));
        assert_eq!(c.to_color(), Color::from_argb(255, 64, 255, 0));
    }
}
