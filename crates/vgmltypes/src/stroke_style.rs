// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{parse_single, Error, Grammar, IndexedEnum, Span, Stream, StreamError};

/// A dash preset.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum DashStyle {
    #[default]
    Solid,
    Dash,
    Dot,
    DashDot,
    DashDotDot,
}

impl IndexedEnum for DashStyle {
    const NAME: &'static str = "Dash style";
    const VARIANTS: &'static [Self] = &[
        DashStyle::Solid,
        DashStyle::Dash,
        DashStyle::Dot,
        DashStyle::DashDot,
        DashStyle::DashDotDot,
    ];
}

/// A line join.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum LineJoin {
    #[default]
    Miter,
    Bevel,
    Round,
    MiterOrBevel,
}

impl IndexedEnum for LineJoin {
    const NAME: &'static str = "Line join";
    const VARIANTS: &'static [Self] = &[
        LineJoin::Miter,
        LineJoin::Bevel,
        LineJoin::Round,
        LineJoin::MiterOrBevel,
    ];
}

/// A line cap.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum CapStyle {
    #[default]
    Flat,
    Square,
    Round,
    Triangle,
}

impl IndexedEnum for CapStyle {
    const NAME: &'static str = "Cap style";
    const VARIANTS: &'static [Self] = &[
        CapStyle::Flat,
        CapStyle::Square,
        CapStyle::Round,
        CapStyle::Triangle,
    ];
}

/// Controls how a stroke reacts to the world transform.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum StrokeTransformBehavior {
    #[default]
    Normal,
    Fixed,
    Hairline,
}

impl IndexedEnum for StrokeTransformBehavior {
    const NAME: &'static str = "Stroke transform behavior";
    const VARIANTS: &'static [Self] = &[
        StrokeTransformBehavior::Normal,
        StrokeTransformBehavior::Fixed,
        StrokeTransformBehavior::Hairline,
    ];
}

/// A parsed stroke style.
///
/// `CSS` followed, in any order and at most once each, by:
///
/// | Key   | Value                                  |
/// |-------|----------------------------------------|
/// | `DS`  | dash style index                       |
/// | `LJ`  | line join index                        |
/// | `ML`  | miter limit, `10` by default           |
/// | `DO`  | dash offset                            |
/// | `SC`  | start cap index                        |
/// | `EC`  | end cap index                          |
/// | `DC`  | dash cap index                         |
/// | `TB`  | transform behavior index               |
/// | `CDS` | one or more custom dash lengths        |
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeStyleElement<'a> {
    /// The matched text.
    pub span: Span<'a>,
    /// Dash preset. Ignored when `custom_dash` is set.
    pub dash_style: DashStyle,
    /// Line join.
    pub line_join: LineJoin,
    /// Miter limit. Always positive.
    pub miter_limit: f32,
    /// Dash offset.
    pub dash_offset: f32,
    /// Start cap.
    pub start_cap: CapStyle,
    /// End cap.
    pub end_cap: CapStyle,
    /// Dash cap.
    pub dash_cap: CapStyle,
    /// Transform behavior.
    pub transform_behavior: StrokeTransformBehavior,
    /// Custom dash lengths, relative to the stroke width. Always positive.
    pub custom_dash: Vec<f32>,
}

impl Default for StrokeStyleElement<'_> {
    fn default() -> Self {
        StrokeStyleElement {
            span: Span::default(),
            dash_style: DashStyle::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash_offset: 0.0,
            start_cap: CapStyle::default(),
            end_cap: CapStyle::default(),
            dash_cap: CapStyle::default(),
            transform_behavior: StrokeTransformBehavior::default(),
            custom_dash: Vec::new(),
        }
    }
}

impl<'a> StrokeStyleElement<'a> {
    /// Parses a stroke style from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Result<Self, Error> {
        parse_single(text, Grammar::StrokeStyle, |s| s.parse_stroke_style())
    }

    /// Returns the number of non-whitespace characters covered by the element.
    pub fn validation_count(&self) -> usize {
        self.span.validation_count()
    }
}

impl<'a> Stream<'a> {
    /// Parses a `CSS ...` stroke style.
    ///
    /// Attribute parsing stops at the first unknown or repeated key,
    /// which is left unconsumed.
    pub fn parse_stroke_style(&mut self) -> Result<StrokeStyleElement<'a>, StreamError> {
        self.skip_spaces();
        let start = self.pos();

        if !self.consume_keyword("CSS") {
            return Err(StreamError::UnexpectedData(self.calc_char_pos()));
        }

        let mut style = StrokeStyleElement::default();
        let mut seen: Vec<&str> = Vec::new();
        loop {
            self.skip_spaces();

            let key = self.peek_keyword();
            if key.is_empty() || seen.contains(&key) {
                break;
            }

            let mut s = *self;
            s.advance(key.len());
            let res = match key {
                "DS" => s.parse_list_indexed().map(|v| style.dash_style = v),
                "LJ" => s.parse_list_indexed().map(|v| style.line_join = v),
                "ML" => s.parse_list_number().map(|v| style.miter_limit = v.abs()),
                "DO" => s.parse_list_number().map(|v| style.dash_offset = v),
                "SC" => s.parse_list_indexed().map(|v| style.start_cap = v),
                "EC" => s.parse_list_indexed().map(|v| style.end_cap = v),
                "DC" => s.parse_list_indexed().map(|v| style.dash_cap = v),
                "TB" => s.parse_list_indexed().map(|v| style.transform_behavior = v),
                "CDS" => parse_dash_array(&mut s).map(|v| style.custom_dash = v),
                _ => break,
            };

            if res.is_err() {
                break;
            }

            seen.push(key);
            *self = s;
        }

        style.span = self.span_from(start);
        Ok(style)
    }
}

fn parse_dash_array(s: &mut Stream) -> Result<Vec<f32>, StreamError> {
    let mut list = vec![s.parse_list_number()?.abs()];
    loop {
        s.skip_spaces();
        if !s.starts_with_number() {
            break;
        }

        list.push(s.parse_list_number()?.abs());
    }

    Ok(list)
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test {
        ($name:ident, $text:expr, $check:expr) => {
            #[test]
            fn $name() {
                let style = StrokeStyleElement::from_str($text).unwrap();
                let check: fn(&StrokeStyleElement) -> bool = $check;
                assert!(check(&style), "{:?}", style);
            }
        };
    }

    test!(defaults, "CSS", |s| *s == StrokeStyleElement { span: Span::new(0, "CSS"), ..StrokeStyleElement::default() });
    test!(dash_style, "CSS DS 2", |s| s.dash_style == DashStyle::Dot);
    test!(line_join, "CSS LJ3", |s| s.line_join == LineJoin::MiterOrBevel);
    test!(miter_limit, "CSS ML -4.5", |s| s.miter_limit == 4.5);
    test!(dash_offset, "CSS DO -2", |s| s.dash_offset == -2.0);
    test!(caps, "CSS SC 1 EC 2 DC 3", |s| {
        s.start_cap == CapStyle::Square && s.end_cap == CapStyle::Round && s.dash_cap == CapStyle::Triangle
    });
    test!(transform_behavior, "CSS TB 2", |s| s.transform_behavior == StrokeTransformBehavior::Hairline);
    test!(custom_dash, "CSS CDS 1 2,3 -4 LJ 1", |s| s.custom_dash == [1.0, 2.0, 3.0, 4.0] && s.line_join == LineJoin::Bevel);
    test!(any_order, "CSS LJ 2 DS 1", |s| s.line_join == LineJoin::Round && s.dash_style == DashStyle::Dash);
    test!(out_of_range_index, "CSS DS 9", |s| s.dash_style == DashStyle::Solid);

    macro_rules! test_err {
        ($name:ident, $text:expr, $err:pat) => {
            #[test]
            fn $name() {
                assert!(matches!(StrokeStyleElement::from_str($text).unwrap_err(), $err));
            }
        };
    }

    test_err!(empty, "", Error::UnrecognizedGrammar { .. });
    test_err!(unknown_key, "CSS XX 1", Error::MalformedInput { pos: 5, .. });
    test_err!(repeated_key, "CSS DS 1 DS 2", Error::MalformedInput { pos: 10, .. });
    test_err!(two_styles, "CSS DS 1 CSS", Error::AmbiguousDefinition { .. });
    test_err!(missing_value, "CSS ML", Error::MalformedInput { pos: 5, .. });

    #[test]
    fn span() {
        let style = StrokeStyleElement::from_str(" CSS LJ 1 ").unwrap();
        assert_eq!(style.span, Span::new(1, "CSS LJ 1"));
        assert_eq!(style.validation_count(), 6);
    }
}
