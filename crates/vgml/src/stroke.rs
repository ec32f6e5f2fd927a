// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgmltypes::{parse_single, Error, Grammar, Span, Stream, StreamError, StrokeStyleElement};

use crate::brush::parse_brush;
use crate::{BrushElement, ResourceFactory};

/// A parsed stroke.
///
/// `ST width brush [stroke-style]`
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeElement<'a> {
    /// The matched text.
    pub span: Span<'a>,
    /// Stroke width. Always positive.
    pub width: f32,
    /// Stroke paint.
    pub brush: BrushElement<'a>,
    /// Stroke style.
    pub style: Option<StrokeStyleElement<'a>>,
}

impl<'a> StrokeElement<'a> {
    /// Parses a stroke from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Result<Self, Error> {
        parse_single(text, Grammar::Stroke, parse_stroke)
    }

    /// Returns the number of non-whitespace characters covered by the element.
    pub fn validation_count(&self) -> usize {
        self.span.validation_count()
    }

    /// Creates a backend stroke.
    ///
    /// Returns `None` when the brush or the style cannot be created.
    pub fn realize<F: ResourceFactory>(&self, factory: &F) -> Option<F::Stroke> {
        let brush = self.brush.realize(factory)?;
        let style = match self.style {
            Some(ref style) => Some(factory.create_stroke_style(style)?),
            None => None,
        };

        factory.create_stroke(self.width, brush, style)
    }
}

fn parse_stroke<'a>(s: &mut Stream<'a>) -> Result<StrokeElement<'a>, StreamError> {
    s.skip_spaces();
    let start = s.pos();

    if !s.consume_keyword("ST") {
        return Err(StreamError::UnexpectedData(s.calc_char_pos()));
    }

    let width = s.parse_list_number()?.abs();
    let brush = parse_brush(s)?;

    let mut probe = *s;
    let style = match probe.parse_stroke_style() {
        Ok(style) => {
            *s = probe;
            Some(style)
        }
        Err(_) => None,
    };

    Ok(StrokeElement {
        span: s.span_from(start),
        width,
        brush,
        style,
    })
}

#[rustfmt::skip]
#[cfg(test)]
mod tests {
    use super::*;
    use vgmltypes::{Color, DashStyle, LineJoin};
    use crate::BrushKind;

    #[test]
    fn without_style() {
        let stroke = StrokeElement::from_str("ST 2 SC #FF0000").unwrap();
        assert_eq!(stroke.width, 2.0);
        assert_eq!(stroke.brush.kind, BrushKind::SolidColor(Color::from_rgb(255, 0, 0)));
        assert_eq!(stroke.brush.span, Span::new(5, "SC #FF0000"));
        assert!(stroke.style.is_none());
    }

    #[test]
    fn with_style() {
        let stroke = StrokeElement::from_str("ST -1.5 SC #FF0000 O 0.5 CSS DS 1 LJ 2").unwrap();
        assert_eq!(stroke.width, 1.5);
        assert_eq!(stroke.brush.opacity.get(), 0.5);

        let style = stroke.style.unwrap();
        assert_eq!(style.dash_style, DashStyle::Dash);
        assert_eq!(style.line_join, LineJoin::Round);
        assert_eq!(stroke.span.raw, "ST -1.5 SC #FF0000 O 0.5 CSS DS 1 LJ 2");
    }

    #[test]
    fn start_cap_is_not_a_brush() {
        let stroke = StrokeElement::from_str("ST 1 SC #000000 CSS SC 2").unwrap();
        assert_eq!(stroke.style.unwrap().start_cap, vgmltypes::CapStyle::Round);
    }

    #[test]
    fn gradient_brush() {
        let stroke = StrokeElement::from_str("ST 4 LG 0,0 10,0 S 0 #FF0000 1 #0000FF").unwrap();
        assert!(matches!(stroke.brush.kind, BrushKind::LinearGradient(_)));
    }

    #[test]
    fn missing_brush() {
        assert!(matches!(
            StrokeElement::from_str("ST 4").unwrap_err(),
            Error::UnrecognizedGrammar { .. }
        ));
    }

    #[test]
    fn two_strokes() {
        assert!(matches!(
            StrokeElement::from_str("ST 1 SC #000000 ST 2 SC #000000").unwrap_err(),
            Error::AmbiguousDefinition { .. }
        ));
    }

    #[test]
    fn broken_style() {
        assert!(matches!(
            StrokeElement::from_str("ST 1 SC #000000 CSS DS").unwrap_err(),
            Error::MalformedInput { pos: 21, .. }
        ));
    }
}
