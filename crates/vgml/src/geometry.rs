// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgmltypes::{Error, Grammar, Span, Stream, StreamError, Validator};

use crate::{
    ArcSize, Cursor, Figure, FigureLoop, FillRule, MoveTo, Options, PathBuilder, PathElement,
    PathElementKind, ResourceFactory, SweepDirection,
};

/// A parsed geometry.
///
/// The first element is always a `FillRule`. It is followed by figures
/// and closed shapes in source order.
#[derive(Clone, PartialEq, Debug)]
pub struct GeometryDocument<'a> {
    text: &'a str,
    elements: Vec<PathElement<'a>>,
}

impl<'a> GeometryDocument<'a> {
    /// Parses a geometry using default options.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Result<Self, Error> {
        Self::from_str_with_options(text, &Options::default())
    }

    /// Parses a geometry.
    pub fn from_str_with_options(text: &'a str, opt: &Options) -> Result<Self, Error> {
        parse(text, opt)
    }

    /// Returns the source text.
    #[inline]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// Returns top-level elements.
    #[inline]
    pub fn elements(&self) -> &[PathElement<'a>] {
        &self.elements
    }

    /// Returns the geometry fill rule.
    pub fn fill_rule(&self) -> FillRule {
        match self.elements.first().map(|e| &e.kind) {
            Some(PathElementKind::FillRule(rule)) => *rule,
            _ => FillRule::default(),
        }
    }

    /// Returns the number of non-whitespace characters covered by all elements.
    ///
    /// Always equals the number of non-whitespace characters of the text.
    pub fn validation_count(&self) -> usize {
        self.elements.iter().map(|e| e.validation_count()).sum()
    }

    /// Emits all elements into the builder and returns the final cursor.
    pub fn replay<B: PathBuilder + ?Sized>(&self, builder: &mut B) -> Cursor {
        self.elements
            .iter()
            .fold(Cursor::default(), |cursor, e| e.emit(builder, cursor))
    }

    /// Replays the geometry into a new path builder and finalizes it.
    pub fn realize<F: ResourceFactory>(&self, factory: &F) -> Option<F::Geometry> {
        let mut builder = factory.create_path_builder(self.fill_rule());
        self.replay(&mut builder);
        factory.create_geometry(builder)
    }
}

enum Token<'a> {
    FillRule(PathElement<'a>),
    MoveTo(Span<'a>, MoveTo),
    Element(PathElement<'a>),
}

struct FigureBuilder<'a> {
    span: Span<'a>,
    start: Option<MoveTo>,
    children: Vec<PathElement<'a>>,
}

impl<'a> FigureBuilder<'a> {
    fn finish(mut self, end: usize, opt: &Options) -> PathElement<'a> {
        let is_closed = matches!(
            self.children.last().map(|e| &e.kind),
            Some(PathElementKind::ClosePath { .. })
        );

        if !is_closed {
            self.children.push(PathElement::new(
                Span::empty(end),
                PathElementKind::ClosePath {
                    figure_loop: opt.implicit_figure_loop,
                },
            ));
        }

        PathElement::new(
            self.span,
            PathElementKind::Figure(Figure {
                start: self.start,
                children: self.children,
            }),
        )
    }
}

fn parse<'a>(text: &'a str, opt: &Options) -> Result<GeometryDocument<'a>, Error> {
    let mut s = Stream::from(text);
    let mut validator = Validator::new(text, Grammar::Geometry);

    let mut fill_rule = None;
    let mut fill_rule_count = 0;
    let mut elements = Vec::new();
    let mut figure: Option<FigureBuilder> = None;

    loop {
        s.skip_spaces();
        if s.at_end() {
            break;
        }

        let mut probe = s;
        let tokens = match parse_command(&mut probe) {
            Ok(tokens) => tokens,
            Err(_) => {
                validator.skip(&mut s);
                continue;
            }
        };
        s = probe;

        for token in tokens {
            match token {
                Token::FillRule(element) => {
                    fill_rule_count += 1;
                    if fill_rule_count == 1 && elements.is_empty() && figure.is_none() {
                        fill_rule = Some(element);
                    } else {
                        // Only a single leading fill rule is allowed.
                        validator.reject(element.span.source_index);
                    }
                }
                Token::MoveTo(span, start) => {
                    if let Some(f) = figure.take() {
                        elements.push(f.finish(span.source_index, opt));
                    }

                    figure = Some(FigureBuilder {
                        span,
                        start: Some(start),
                        children: Vec::new(),
                    });
                }
                Token::Element(element) if element.is_closed_shape() => match figure {
                    Some(ref mut f) => f.children.push(element),
                    None => elements.push(element),
                },
                Token::Element(element) => {
                    let is_close = matches!(element.kind, PathElementKind::ClosePath { .. });
                    let f = figure.get_or_insert_with(|| FigureBuilder {
                        span: Span::empty(element.span.source_index),
                        start: None,
                        children: Vec::new(),
                    });
                    f.children.push(element);

                    if is_close {
                        if let Some(f) = figure.take() {
                            elements.push(f.finish(s.pos(), opt));
                        }
                    }
                }
            }
        }
    }

    if let Some(f) = figure.take() {
        elements.push(f.finish(text.len(), opt));
    }

    if elements.is_empty() {
        return Err(validator.unrecognized());
    }

    if fill_rule_count > 1 {
        return Err(validator.ambiguous());
    }

    let fill_rule = fill_rule.unwrap_or_else(|| {
        PathElement::new(
            Span::empty(0),
            PathElementKind::FillRule(opt.default_fill_rule),
        )
    });
    elements.insert(0, fill_rule);

    let doc = GeometryDocument { text, elements };
    validator.check(doc.validation_count())?;
    Ok(doc)
}

/// Returns `true` if the selected char starts a coordinate group.
#[rustfmt::skip]
#[inline]
fn is_cmd(c: u8) -> bool {
    matches!(c,
          b'M' | b'm'
        | b'L' | b'l'
        | b'H' | b'h'
        | b'V' | b'v'
        | b'C' | b'c'
        | b'S' | b's'
        | b'Q' | b'q'
        | b'T' | b't'
        | b'A' | b'a'
        | b'O' | b'o'
        | b'P' | b'p'
        | b'R' | b'r'
        | b'U' | b'u')
}

fn parse_command<'a>(s: &mut Stream<'a>) -> Result<Vec<Token<'a>>, StreamError> {
    let start = s.pos();
    let cmd = s.curr_byte()?;

    let mut tokens = Vec::new();
    match cmd {
        b'F' => {
            s.advance(1);
            s.skip_spaces();
            let rule = match s.curr_byte()? {
                b'0' => FillRule::EvenOdd,
                b'1' => FillRule::NonZero,
                _ => return Err(StreamError::UnexpectedData(s.calc_char_pos())),
            };
            s.advance(1);

            let kind = PathElementKind::FillRule(rule);
            tokens.push(Token::FillRule(PathElement::new(s.span_from(start), kind)));
        }
        b'Z' | b'z' => {
            s.advance(1);

            // Consecutive closes are folded into one.
            loop {
                s.skip_spaces();
                if s.is_curr_byte_eq(b'Z') || s.is_curr_byte_eq(b'z') {
                    s.advance(1);
                } else {
                    break;
                }
            }

            let kind = PathElementKind::ClosePath {
                figure_loop: FigureLoop::Closed,
            };
            tokens.push(Token::Element(PathElement::new(s.span_from(start), kind)));
        }
        _ if is_cmd(cmd) => {
            s.advance(1);

            let abs = cmd.is_ascii_uppercase();
            let cmd = cmd.to_ascii_lowercase();
            tokens.push(parse_group(s, cmd, abs, start)?);

            // Repeated coordinate groups share the command.
            // After a MoveTo they are lines.
            let cmd = if cmd == b'm' { b'l' } else { cmd };
            loop {
                s.skip_spaces();
                if !s.starts_with_number() {
                    break;
                }

                let group_start = s.pos();
                let mut probe = *s;
                match parse_group(&mut probe, cmd, abs, group_start) {
                    Ok(token) => {
                        tokens.push(token);
                        *s = probe;
                    }
                    Err(_) => break,
                }
            }
        }
        _ => return Err(StreamError::UnexpectedData(s.calc_char_pos())),
    }

    Ok(tokens)
}

fn parse_group<'a>(
    s: &mut Stream<'a>,
    cmd: u8,
    abs: bool,
    start: usize,
) -> Result<Token<'a>, StreamError> {
    let kind = match cmd {
        b'm' => {
            let p = s.parse_list_point()?;
            let start_point = MoveTo { abs, x: p.x, y: p.y };
            return Ok(Token::MoveTo(s.span_from(start), start_point));
        }
        b'l' => PathElementKind::Line {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'h' => PathElementKind::HorizontalLine {
            abs,
            x: s.parse_list_number()?,
        },
        b'v' => PathElementKind::VerticalLine {
            abs,
            y: s.parse_list_number()?,
        },
        b'c' => PathElementKind::CubicBezier {
            abs,
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b's' => PathElementKind::SmoothCubicBezier {
            abs,
            x2: s.parse_list_number()?,
            y2: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'q' => PathElementKind::QuadraticBezier {
            abs,
            x1: s.parse_list_number()?,
            y1: s.parse_list_number()?,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b't' => PathElementKind::SmoothQuadraticBezier {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'a' => PathElementKind::Arc {
            abs,
            radius_x: s.parse_list_number()?.abs(),
            radius_y: s.parse_list_number()?.abs(),
            rotation: s.parse_list_number()?,
            size: if s.parse_flag()? {
                ArcSize::Large
            } else {
                ArcSize::Small
            },
            sweep: if s.parse_flag()? {
                SweepDirection::Clockwise
            } else {
                SweepDirection::CounterClockwise
            },
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'o' => PathElementKind::Ellipse {
            abs,
            radius_x: s.parse_list_number()?.abs(),
            radius_y: s.parse_list_number()?.abs(),
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'p' => PathElementKind::Polygon {
            abs,
            sides: s.parse_list_integer()?.unsigned_abs(),
            radius: s.parse_list_number()?.abs(),
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
        },
        b'r' => PathElementKind::Rectangle {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
            width: s.parse_list_number()?.abs(),
            height: s.parse_list_number()?.abs(),
        },
        b'u' => PathElementKind::RoundedRectangle {
            abs,
            x: s.parse_list_number()?,
            y: s.parse_list_number()?,
            width: s.parse_list_number()?.abs(),
            height: s.parse_list_number()?.abs(),
            radius_x: s.parse_list_number()?.abs(),
            radius_y: s.parse_list_number()?.abs(),
        },
        _ => return Err(StreamError::UnexpectedData(s.calc_char_pos_at(start))),
    };

    Ok(Token::Element(PathElement::new(s.span_from(start), kind)))
}
