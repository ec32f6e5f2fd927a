// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgmltypes::{Point, Rect, Span};

use crate::PathBuilder;

/// A fill rule.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum FillRule {
    /// `F0`
    #[default]
    EvenOdd,
    /// `F1`
    NonZero,
}

/// Defines whether a figure end is connected to its start.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum FigureLoop {
    Open,
    #[default]
    Closed,
}

/// An arc sweep direction.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SweepDirection {
    CounterClockwise,
    Clockwise,
}

/// An arc size.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArcSize {
    Small,
    Large,
}

/// A single element of a geometry.
#[derive(Clone, PartialEq, Debug)]
pub struct PathElement<'a> {
    /// The matched text.
    ///
    /// Empty for synthesized elements.
    pub span: Span<'a>,
    /// Element data.
    pub kind: PathElementKind<'a>,
}

/// A path element variant.
///
/// Coordinates are absolute when `abs` is set and relative to the current
/// point otherwise. Sizes and radii are never negative.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum PathElementKind<'a> {
    FillRule(FillRule),
    Figure(Figure<'a>),
    Line {
        abs: bool,
        x: f32,
        y: f32,
    },
    HorizontalLine {
        abs: bool,
        x: f32,
    },
    VerticalLine {
        abs: bool,
        y: f32,
    },
    CubicBezier {
        abs: bool,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    SmoothCubicBezier {
        abs: bool,
        x2: f32,
        y2: f32,
        x: f32,
        y: f32,
    },
    QuadraticBezier {
        abs: bool,
        x1: f32,
        y1: f32,
        x: f32,
        y: f32,
    },
    SmoothQuadraticBezier {
        abs: bool,
        x: f32,
        y: f32,
    },
    Arc {
        abs: bool,
        radius_x: f32,
        radius_y: f32,
        /// In degrees.
        rotation: f32,
        size: ArcSize,
        sweep: SweepDirection,
        x: f32,
        y: f32,
    },
    ClosePath {
        figure_loop: FigureLoop,
    },
    Ellipse {
        abs: bool,
        radius_x: f32,
        radius_y: f32,
        x: f32,
        y: f32,
    },
    Polygon {
        abs: bool,
        sides: u32,
        radius: f32,
        x: f32,
        y: f32,
    },
    Rectangle {
        abs: bool,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    RoundedRectangle {
        abs: bool,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius_x: f32,
        radius_y: f32,
    },
}

/// A figure start, aka `MoveTo`.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MoveTo {
    pub abs: bool,
    pub x: f32,
    pub y: f32,
}

/// A sequence of connected segments.
///
/// The last child is always a `ClosePath`.
#[derive(Clone, PartialEq, Debug)]
pub struct Figure<'a> {
    /// An explicit start point.
    ///
    /// `None` when a figure was started implicitly at the current point.
    pub start: Option<MoveTo>,
    /// Segments and closed shapes, in source order.
    pub children: Vec<PathElement<'a>>,
}

/// The state carried between elements during replay.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Cursor {
    /// The current point.
    pub point: Point,
    /// The start of the current figure.
    pub figure_start: Point,
    /// The previous element.
    pub previous: Previous,
}

/// The previous element, as far as smooth curves are concerned.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub enum Previous {
    /// Nothing was emitted yet.
    #[default]
    None,
    /// A cubic bezier with its second control point.
    CubicBezier {
        /// The second control point.
        control: Point,
    },
    /// A quadratic bezier with its control point.
    QuadraticBezier {
        /// The control point, explicit or reflected.
        control: Point,
    },
    /// Any other element.
    Other,
}

impl Cursor {
    #[inline]
    fn resolve(&self, abs: bool, x: f32, y: f32) -> Point {
        if abs {
            Point::from_xy(x, y)
        } else {
            self.point + Point::from_xy(x, y)
        }
    }

    #[inline]
    fn advance(self, point: Point, previous: Previous) -> Self {
        Cursor {
            point,
            figure_start: self.figure_start,
            previous,
        }
    }
}

impl<'a> PathElement<'a> {
    /// Creates a new element.
    #[inline]
    pub fn new(span: Span<'a>, kind: PathElementKind<'a>) -> Self {
        PathElement { span, kind }
    }

    /// Returns the number of non-whitespace characters covered by the element
    /// and its children.
    pub fn validation_count(&self) -> usize {
        let own = self.span.validation_count();
        match self.kind {
            PathElementKind::Figure(ref figure) => {
                own + figure
                    .children
                    .iter()
                    .map(|c| c.validation_count())
                    .sum::<usize>()
            }
            _ => own,
        }
    }

    /// Checks that the element is a self-contained shape,
    /// like an ellipse or a rectangle.
    pub fn is_closed_shape(&self) -> bool {
        matches!(
            self.kind,
            PathElementKind::Ellipse { .. }
                | PathElementKind::Polygon { .. }
                | PathElementKind::Rectangle { .. }
                | PathElementKind::RoundedRectangle { .. }
        )
    }

    /// Emits the element into the builder and returns the updated cursor.
    pub fn emit<B: PathBuilder + ?Sized>(&self, builder: &mut B, cursor: Cursor) -> Cursor {
        let resolve = |abs: bool, x: f32, y: f32| cursor.resolve(abs, x, y);

        match self.kind {
            PathElementKind::FillRule(_) => cursor,
            PathElementKind::Figure(ref figure) => figure.emit(builder, cursor),
            PathElementKind::Line { abs, x, y } => {
                let p = resolve(abs, x, y);
                builder.add_line(p);
                cursor.advance(p, Previous::Other)
            }
            PathElementKind::HorizontalLine { abs, x } => {
                let x = if abs { x } else { cursor.point.x + x };
                let p = Point::from_xy(x, cursor.point.y);
                builder.add_line(p);
                cursor.advance(p, Previous::Other)
            }
            PathElementKind::VerticalLine { abs, y } => {
                let y = if abs { y } else { cursor.point.y + y };
                let p = Point::from_xy(cursor.point.x, y);
                builder.add_line(p);
                cursor.advance(p, Previous::Other)
            }
            PathElementKind::CubicBezier {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let control2 = resolve(abs, x2, y2);
                let p = resolve(abs, x, y);
                builder.add_cubic_bezier(resolve(abs, x1, y1), control2, p);
                cursor.advance(p, Previous::CubicBezier { control: control2 })
            }
            PathElementKind::SmoothCubicBezier { abs, x2, y2, x, y } => {
                let control1 = match cursor.previous {
                    Previous::CubicBezier { control } => control.reflect(cursor.point),
                    _ => cursor.point,
                };
                let control2 = resolve(abs, x2, y2);
                let p = resolve(abs, x, y);
                builder.add_cubic_bezier(control1, control2, p);
                cursor.advance(p, Previous::CubicBezier { control: control2 })
            }
            PathElementKind::QuadraticBezier { abs, x1, y1, x, y } => {
                let control = resolve(abs, x1, y1);
                let p = resolve(abs, x, y);
                builder.add_quadratic_bezier(control, p);
                cursor.advance(p, Previous::QuadraticBezier { control })
            }
            PathElementKind::SmoothQuadraticBezier { abs, x, y } => {
                let control = match cursor.previous {
                    Previous::QuadraticBezier { control } => control.reflect(cursor.point),
                    _ => cursor.point,
                };
                let p = resolve(abs, x, y);
                builder.add_quadratic_bezier(control, p);
                cursor.advance(p, Previous::QuadraticBezier { control })
            }
            PathElementKind::Arc {
                abs,
                radius_x,
                radius_y,
                rotation,
                size,
                sweep,
                x,
                y,
            } => {
                let p = resolve(abs, x, y);
                builder.add_arc(p, radius_x, radius_y, rotation, sweep, size);
                cursor.advance(p, Previous::Other)
            }
            PathElementKind::ClosePath { figure_loop } => {
                builder.end_figure(figure_loop);
                cursor.advance(cursor.figure_start, Previous::Other)
            }
            // Closed shapes are anchored at the current point
            // but do not move it.
            PathElementKind::Ellipse {
                abs,
                radius_x,
                radius_y,
                x,
                y,
            } => {
                builder.add_ellipse(resolve(abs, x, y), radius_x, radius_y);
                cursor.advance(cursor.point, Previous::Other)
            }
            PathElementKind::Polygon {
                abs,
                sides,
                radius,
                x,
                y,
            } => {
                builder.add_polygon(resolve(abs, x, y), radius, sides);
                cursor.advance(cursor.point, Previous::Other)
            }
            PathElementKind::Rectangle {
                abs,
                x,
                y,
                width,
                height,
            } => {
                let origin = resolve(abs, x, y);
                builder.add_rectangle(Rect::from_xywh(origin.x, origin.y, width, height));
                cursor.advance(cursor.point, Previous::Other)
            }
            PathElementKind::RoundedRectangle {
                abs,
                x,
                y,
                width,
                height,
                radius_x,
                radius_y,
            } => {
                let origin = resolve(abs, x, y);
                let rect = Rect::from_xywh(origin.x, origin.y, width, height);
                builder.add_rounded_rectangle(rect, radius_x, radius_y);
                cursor.advance(cursor.point, Previous::Other)
            }
        }
    }
}

impl<'a> Figure<'a> {
    /// Begins a figure and emits all children in order.
    pub fn emit<B: PathBuilder + ?Sized>(&self, builder: &mut B, cursor: Cursor) -> Cursor {
        let start = match self.start {
            Some(MoveTo { abs, x, y }) => cursor.resolve(abs, x, y),
            None => cursor.point,
        };

        builder.begin_figure(start);

        let cursor = Cursor {
            point: start,
            figure_start: start,
            previous: Previous::None,
        };

        self.children
            .iter()
            .fold(cursor, |cursor, child| child.emit(builder, cursor))
    }
}
