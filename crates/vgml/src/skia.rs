// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A `tiny-skia` backend.

use vgmltypes::{
    CapStyle, Color, DashStyle, GradientStop, HdrColor, LineJoin, Point, Rect,
    StrokeStyleElement, StrokeTransformBehavior,
};

use crate::{
    ArcSize, EdgeBehavior, FigureLoop, FillRule, GradientAttributes, LinearGradient, Opacity,
    RadialGradient, ResourceFactory, SweepDirection,
};

/// A resource factory that produces `tiny-skia` objects.
#[derive(Clone, Copy, Debug)]
pub struct TinySkiaFactory {
    /// Arcs to cubic beziers conversion accuracy.
    ///
    /// Values below `0.001`, `NaN` included, are clamped to `0.001`.
    ///
    /// Default: 0.1
    pub tolerance: f64,
}

const MIN_TOLERANCE: f64 = 0.001;

/// The largest polygon a path builder will produce.
pub const MAX_POLYGON_SIDES: u32 = 1024;

impl Default for TinySkiaFactory {
    fn default() -> Self {
        TinySkiaFactory { tolerance: 0.1 }
    }
}

/// A finished geometry.
#[derive(Clone, Debug)]
pub struct Geometry {
    /// Figures followed by closed shapes.
    pub path: tiny_skia::Path,
    /// Fill rule.
    pub fill_rule: tiny_skia::FillRule,
}

/// A stroke style with dashes relative to the stroke width.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeStyle {
    pub(crate) line_cap: tiny_skia::LineCap,
    pub(crate) line_join: tiny_skia::LineJoin,
    pub(crate) miter_limit: f32,
    pub(crate) dash: Option<Vec<f32>>,
    pub(crate) dash_offset: f32,
    pub(crate) hairline: bool,
}

/// A stroke.
#[derive(Clone, Debug)]
pub struct Stroke {
    /// Stroke paint.
    pub shader: tiny_skia::Shader<'static>,
    /// Stroke properties, ready for `Path::stroke`.
    pub stroke: tiny_skia::Stroke,
}

/// A path builder that collects figures and closed shapes separately.
///
/// Closed shapes are appended after all figures, so they never
/// interrupt an open figure.
#[derive(Debug)]
pub struct SkiaPathBuilder {
    fill_rule: tiny_skia::FillRule,
    tolerance: f64,
    figures: tiny_skia::PathBuilder,
    shapes: tiny_skia::PathBuilder,
    // A figure is emitted only once it gets a segment.
    pending: Option<Point>,
}

impl SkiaPathBuilder {
    fn start_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            self.figures.move_to(p.x, p.y);
        }
    }
}

impl crate::PathBuilder for SkiaPathBuilder {
    fn begin_figure(&mut self, start: Point) {
        self.pending = Some(start);
    }

    fn add_line(&mut self, to: Point) {
        self.start_pending();
        self.figures.line_to(to.x, to.y);
    }

    fn add_cubic_bezier(&mut self, control1: Point, control2: Point, to: Point) {
        self.start_pending();
        self.figures
            .cubic_to(control1.x, control1.y, control2.x, control2.y, to.x, to.y);
    }

    fn add_quadratic_bezier(&mut self, control: Point, to: Point) {
        self.start_pending();
        self.figures.quad_to(control.x, control.y, to.x, to.y);
    }

    fn add_arc(
        &mut self,
        to: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        sweep: SweepDirection,
        size: ArcSize,
    ) {
        self.start_pending();
        self.figures.arc_to(
            radius_x,
            radius_y,
            rotation,
            size == ArcSize::Large,
            sweep == SweepDirection::Clockwise,
            to.x,
            to.y,
            self.tolerance,
        );
    }

    fn end_figure(&mut self, figure_loop: FigureLoop) {
        if self.pending.take().is_some() {
            log::debug!("A figure without segments. Skipped.");
            return;
        }

        if figure_loop == FigureLoop::Closed {
            self.figures.close();
        }
    }

    fn add_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32) {
        if !(radius_x > 0.0 && radius_y > 0.0) {
            log::warn!("Ellipse has an invalid radius. Skipped.");
            return;
        }

        let (cx, cy) = (center.x, center.y);
        let (rx, ry) = (radius_x, radius_y);
        let b = &mut self.shapes;
        b.move_to(cx + rx, cy);
        b.arc_to(rx, ry, 0.0, false, true, cx, cy + ry, self.tolerance);
        b.arc_to(rx, ry, 0.0, false, true, cx - rx, cy, self.tolerance);
        b.arc_to(rx, ry, 0.0, false, true, cx, cy - ry, self.tolerance);
        b.arc_to(rx, ry, 0.0, false, true, cx + rx, cy, self.tolerance);
        b.close();
    }

    fn add_rectangle(&mut self, rect: Rect) {
        match convert_rect(rect) {
            Some(r) => self.shapes.push_rect(r),
            None => log::warn!("Rectangle has an invalid size. Skipped."),
        }
    }

    fn add_rounded_rectangle(&mut self, rect: Rect, radius_x: f32, radius_y: f32) {
        let r = match convert_rect(rect) {
            Some(r) => r,
            None => {
                log::warn!("Rectangle has an invalid size. Skipped.");
                return;
            }
        };

        let rx = radius_x.min(rect.width / 2.0);
        let ry = radius_y.min(rect.height / 2.0);
        if rx == 0.0 || ry == 0.0 {
            self.shapes.push_rect(r);
            return;
        }

        let Rect {
            x,
            y,
            width,
            height,
        } = rect;
        let t = self.tolerance;
        let b = &mut self.shapes;
        b.move_to(x + rx, y);

        b.line_to(x + width - rx, y);
        b.arc_to(rx, ry, 0.0, false, true, x + width, y + ry, t);

        b.line_to(x + width, y + height - ry);
        b.arc_to(rx, ry, 0.0, false, true, x + width - rx, y + height, t);

        b.line_to(x + rx, y + height);
        b.arc_to(rx, ry, 0.0, false, true, x, y + height - ry, t);

        b.line_to(x, y + ry);
        b.arc_to(rx, ry, 0.0, false, true, x + rx, y, t);

        b.close();
    }

    fn add_polygon(&mut self, center: Point, radius: f32, sides: u32) {
        if sides < 3 {
            log::warn!("Polygon must have at least 3 sides, not {}. Skipped.", sides);
            return;
        }

        if sides > MAX_POLYGON_SIDES {
            log::warn!(
                "Polygon cannot have more than {} sides, not {}. Skipped.",
                MAX_POLYGON_SIDES,
                sides
            );
            return;
        }

        let mut vertices = polygon_vertices(center, radius, sides);
        if let Some(p) = vertices.next() {
            self.shapes.move_to(p.x, p.y);
        }

        for p in vertices {
            self.shapes.line_to(p.x, p.y);
        }

        self.shapes.close();
    }
}

fn convert_rect(rect: Rect) -> Option<tiny_skia::Rect> {
    if !(rect.width > 0.0 && rect.height > 0.0) {
        return None;
    }

    tiny_skia::Rect::from_xywh(rect.x, rect.y, rect.width, rect.height)
}

// Vertices of a regular polygon, starting straight above the center.
fn polygon_vertices(center: Point, radius: f32, sides: u32) -> impl Iterator<Item = Point> {
    let step = std::f32::consts::TAU / sides as f32;
    (0..sides).map(move |i| {
        let angle = -std::f32::consts::FRAC_PI_2 + step * i as f32;
        Point::from_xy(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        )
    })
}

impl ResourceFactory for TinySkiaFactory {
    type PathBuilder = SkiaPathBuilder;
    type Geometry = Geometry;
    type Brush = tiny_skia::Shader<'static>;
    type StrokeStyle = StrokeStyle;
    type Stroke = Stroke;

    fn create_path_builder(&self, fill_rule: FillRule) -> SkiaPathBuilder {
        SkiaPathBuilder {
            fill_rule: match fill_rule {
                FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
                FillRule::NonZero => tiny_skia::FillRule::Winding,
            },
            tolerance: self.tolerance.max(MIN_TOLERANCE),
            figures: tiny_skia::PathBuilder::new(),
            shapes: tiny_skia::PathBuilder::new(),
            pending: None,
        }
    }

    fn create_geometry(&self, builder: SkiaPathBuilder) -> Option<Geometry> {
        let SkiaPathBuilder {
            mut figures,
            shapes,
            fill_rule,
            ..
        } = builder;

        if let Some(shapes) = shapes.finish() {
            figures.push_path(&shapes);
        }

        let path = figures
            .finish()
            .log_none(|| log::warn!("Geometry has no segments. Skipped."))?;

        Some(Geometry { path, fill_rule })
    }

    fn create_solid_color_brush(
        &self,
        color: Color,
        opacity: Opacity,
    ) -> Option<tiny_skia::Shader<'static>> {
        Some(tiny_skia::Shader::SolidColor(convert_color(color, opacity)))
    }

    fn create_linear_gradient_brush(
        &self,
        gradient: &LinearGradient<Color>,
        opacity: Opacity,
    ) -> Option<tiny_skia::Shader<'static>> {
        convert_linear_gradient(gradient, opacity)
    }

    fn create_linear_gradient_hdr_brush(
        &self,
        gradient: &LinearGradient<HdrColor>,
        opacity: Opacity,
    ) -> Option<tiny_skia::Shader<'static>> {
        convert_linear_gradient(gradient, opacity)
    }

    fn create_radial_gradient_brush(
        &self,
        gradient: &RadialGradient<Color>,
        opacity: Opacity,
    ) -> Option<tiny_skia::Shader<'static>> {
        convert_radial_gradient(gradient, opacity)
    }

    fn create_radial_gradient_hdr_brush(
        &self,
        gradient: &RadialGradient<HdrColor>,
        opacity: Opacity,
    ) -> Option<tiny_skia::Shader<'static>> {
        convert_radial_gradient(gradient, opacity)
    }

    fn create_stroke_style(&self, style: &StrokeStyleElement) -> Option<StrokeStyle> {
        Some(convert_stroke_style(style))
    }

    fn create_stroke(
        &self,
        width: f32,
        brush: tiny_skia::Shader<'static>,
        style: Option<StrokeStyle>,
    ) -> Option<Stroke> {
        let style = style.unwrap_or_else(|| convert_stroke_style(&StrokeStyleElement::default()));

        let mut stroke = tiny_skia::Stroke {
            width,
            miter_limit: style.miter_limit,
            line_cap: style.line_cap,
            line_join: style.line_join,
            dash: None,
        };

        if let Some(ref pattern) = style.dash {
            let array = pattern.iter().map(|n| n * width).collect();
            stroke.dash = tiny_skia::StrokeDash::new(array, style.dash_offset * width)
                .log_none(|| log::warn!("Invalid dash pattern. Dashing is disabled."));
        }

        // A zero width is a hairline in tiny-skia.
        if style.hairline {
            stroke.width = 0.0;
        }

        Some(Stroke {
            shader: brush,
            stroke,
        })
    }
}

fn convert_color(color: Color, opacity: Opacity) -> tiny_skia::Color {
    let alpha = Opacity::new_clamped(color.alpha as f32 / 255.0) * opacity;
    tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, alpha.to_u8())
}

fn convert_linear_gradient<C>(
    gradient: &LinearGradient<C>,
    opacity: Opacity,
) -> Option<tiny_skia::Shader<'static>>
where
    C: Copy + Into<Color>,
{
    let (mode, points) = convert_base_gradient(&gradient.stops, gradient.attributes, opacity);

    tiny_skia::LinearGradient::new(
        tiny_skia::Point::from_xy(gradient.start.x, gradient.start.y),
        tiny_skia::Point::from_xy(gradient.end.x, gradient.end.y),
        points,
        mode,
        tiny_skia::Transform::default(),
    )
    .log_none(|| log::warn!("Linear gradient is degenerate. Skipped."))
}

fn convert_radial_gradient<C>(
    gradient: &RadialGradient<C>,
    opacity: Opacity,
) -> Option<tiny_skia::Shader<'static>>
where
    C: Copy + Into<Color>,
{
    if !(gradient.radius_x > 0.0 && gradient.radius_y > 0.0) {
        log::warn!("Radial gradient has an invalid radius. Skipped.");
        return None;
    }

    let (mode, points) = convert_base_gradient(&gradient.stops, gradient.attributes, opacity);

    // tiny-skia gradients are circular, so an ellipse is a circle
    // with `radius_x`, scaled vertically around the center.
    let center = gradient.center;
    let scale_y = gradient.radius_y / gradient.radius_x;
    let transform = tiny_skia::Transform::from_row(
        1.0,
        0.0,
        0.0,
        scale_y,
        0.0,
        center.y - center.y * scale_y,
    );

    let focal = tiny_skia::Point::from_xy(
        center.x + gradient.origin_offset.x,
        center.y + gradient.origin_offset.y / scale_y,
    );

    tiny_skia::RadialGradient::new(
        focal,
        tiny_skia::Point::from_xy(center.x, center.y),
        gradient.radius_x,
        points,
        mode,
        transform,
    )
    .log_none(|| log::warn!("Radial gradient is degenerate. Skipped."))
}

fn convert_base_gradient<C>(
    stops: &[GradientStop<C>],
    attributes: GradientAttributes,
    opacity: Opacity,
) -> (tiny_skia::SpreadMode, Vec<tiny_skia::GradientStop>)
where
    C: Copy + Into<Color>,
{
    let mode = match attributes.edge_behavior {
        EdgeBehavior::Clamp => tiny_skia::SpreadMode::Pad,
        EdgeBehavior::Wrap => tiny_skia::SpreadMode::Repeat,
        EdgeBehavior::Mirror => tiny_skia::SpreadMode::Reflect,
    };

    let unsupported = GradientAttributes {
        edge_behavior: attributes.edge_behavior,
        ..GradientAttributes::default()
    };
    if attributes != unsupported {
        log::debug!("Gradient buffer and color space attributes are not supported. Ignored.");
    }

    let points = stops
        .iter()
        .map(|stop| {
            let color = convert_color(stop.color.into(), opacity);
            tiny_skia::GradientStop::new(stop.position, color)
        })
        .collect();

    (mode, points)
}

pub(crate) fn convert_stroke_style(style: &StrokeStyleElement) -> StrokeStyle {
    if style.end_cap != style.start_cap || style.dash_cap != style.start_cap {
        log::debug!("Separate end and dash caps are not supported. Start cap is used.");
    }

    let line_cap = match style.start_cap {
        CapStyle::Flat => tiny_skia::LineCap::Butt,
        CapStyle::Square => tiny_skia::LineCap::Square,
        CapStyle::Round => tiny_skia::LineCap::Round,
        CapStyle::Triangle => {
            log::debug!("Triangle caps are not supported. Flat is used.");
            tiny_skia::LineCap::Butt
        }
    };

    let line_join = match style.line_join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::MiterOrBevel => tiny_skia::LineJoin::MiterClip,
    };

    let dash = if !style.custom_dash.is_empty() {
        let mut list = style.custom_dash.clone();
        // An odd list is repeated to get an even one.
        if list.len() % 2 != 0 {
            list.extend_from_within(..);
        }

        Some(list)
    } else {
        match style.dash_style {
            DashStyle::Solid => None,
            DashStyle::Dash => Some(vec![2.0, 2.0]),
            DashStyle::Dot => Some(vec![0.0, 2.0]),
            DashStyle::DashDot => Some(vec![2.0, 2.0, 0.0, 2.0]),
            DashStyle::DashDotDot => Some(vec![2.0, 2.0, 0.0, 2.0, 0.0, 2.0]),
        }
    };

    if style.transform_behavior == StrokeTransformBehavior::Fixed {
        log::debug!("Fixed stroke transform behavior is not supported. Ignored.");
    }

    StrokeStyle {
        line_cap,
        line_join,
        miter_limit: style.miter_limit,
        dash,
        dash_offset: style.dash_offset,
        hairline: style.transform_behavior == StrokeTransformBehavior::Hairline,
    }
}

trait PathBuilderExt {
    #[allow(clippy::too_many_arguments)]
    fn arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
        tolerance: f64,
    );
}

impl PathBuilderExt for tiny_skia::PathBuilder {
    fn arc_to(
        &mut self,
        rx: f32,
        ry: f32,
        x_axis_rotation: f32,
        large_arc: bool,
        sweep: bool,
        x: f32,
        y: f32,
        tolerance: f64,
    ) {
        let prev = match self.last_point() {
            Some(v) => v,
            None => return,
        };

        let svg_arc = kurbo::SvgArc {
            from: kurbo::Point::new(prev.x as f64, prev.y as f64),
            to: kurbo::Point::new(x as f64, y as f64),
            radii: kurbo::Vec2::new(rx as f64, ry as f64),
            x_rotation: (x_axis_rotation as f64).to_radians(),
            large_arc,
            sweep,
        };

        // A degenerate arc is a straight line.
        match kurbo::Arc::from_svg_arc(&svg_arc) {
            Some(arc) => {
                arc.to_cubic_beziers(tolerance, |p1, p2, p| {
                    self.cubic_to(
                        p1.x as f32,
                        p1.y as f32,
                        p2.x as f32,
                        p2.y as f32,
                        p.x as f32,
                        p.y as f32,
                    );
                });
            }
            None => {
                self.line_to(x, y);
            }
        }
    }
}

trait OptionLog {
    fn log_none<F: FnOnce()>(self, f: F) -> Self;
}

impl<T> OptionLog for Option<T> {
    #[inline]
    fn log_none<F: FnOnce()>(self, f: F) -> Self {
        self.or_else(|| {
            f();
            None
        })
    }
}
