// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgmltypes::{Color, HdrColor, Point, Rect, StrokeStyleElement};

use crate::{ArcSize, FigureLoop, FillRule, LinearGradient, Opacity, RadialGradient, SweepDirection};

/// A receiver of replayed drawing calls.
///
/// Calls arrive in source order. Figure segments are always enclosed
/// by `begin_figure` and `end_figure`, while closed shapes can arrive
/// both inside and outside of a figure.
pub trait PathBuilder {
    /// Starts a new figure at the selected point.
    fn begin_figure(&mut self, start: Point);

    /// Adds a line from the current point.
    fn add_line(&mut self, to: Point);

    /// Adds a cubic bezier from the current point.
    fn add_cubic_bezier(&mut self, control1: Point, control2: Point, to: Point);

    /// Adds a quadratic bezier from the current point.
    fn add_quadratic_bezier(&mut self, control: Point, to: Point);

    /// Adds an elliptical arc from the current point.
    ///
    /// `rotation` is in degrees.
    fn add_arc(
        &mut self,
        to: Point,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        sweep: SweepDirection,
        size: ArcSize,
    );

    /// Ends the current figure.
    fn end_figure(&mut self, figure_loop: FigureLoop);

    /// Adds a standalone ellipse.
    fn add_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32);

    /// Adds a standalone rectangle.
    fn add_rectangle(&mut self, rect: Rect);

    /// Adds a standalone rectangle with rounded corners.
    fn add_rounded_rectangle(&mut self, rect: Rect, radius_x: f32, radius_y: f32);

    /// Adds a standalone regular polygon.
    ///
    /// The first vertex is straight above the center.
    fn add_polygon(&mut self, center: Point, radius: f32, sides: u32);
}

/// A producer of path builders and paint objects.
///
/// All methods return `None` when the backend cannot represent the input.
pub trait ResourceFactory {
    /// A path builder type.
    type PathBuilder: PathBuilder;
    /// A finished geometry.
    type Geometry;
    /// A paint.
    type Brush;
    /// A stroke style.
    type StrokeStyle;
    /// A stroke.
    type Stroke;

    /// Creates a new, empty path builder.
    fn create_path_builder(&self, fill_rule: FillRule) -> Self::PathBuilder;

    /// Finalizes a path builder.
    fn create_geometry(&self, builder: Self::PathBuilder) -> Option<Self::Geometry>;

    /// Creates a solid color paint.
    fn create_solid_color_brush(&self, color: Color, opacity: Opacity) -> Option<Self::Brush>;

    /// Creates a linear gradient paint.
    fn create_linear_gradient_brush(
        &self,
        gradient: &LinearGradient<Color>,
        opacity: Opacity,
    ) -> Option<Self::Brush>;

    /// Creates a linear gradient paint with HDR stops.
    fn create_linear_gradient_hdr_brush(
        &self,
        gradient: &LinearGradient<HdrColor>,
        opacity: Opacity,
    ) -> Option<Self::Brush>;

    /// Creates a radial gradient paint.
    fn create_radial_gradient_brush(
        &self,
        gradient: &RadialGradient<Color>,
        opacity: Opacity,
    ) -> Option<Self::Brush>;

    /// Creates a radial gradient paint with HDR stops.
    fn create_radial_gradient_hdr_brush(
        &self,
        gradient: &RadialGradient<HdrColor>,
        opacity: Opacity,
    ) -> Option<Self::Brush>;

    /// Creates a stroke style.
    fn create_stroke_style(&self, style: &StrokeStyleElement) -> Option<Self::StrokeStyle>;

    /// Creates a stroke.
    fn create_stroke(
        &self,
        width: f32,
        brush: Self::Brush,
        style: Option<Self::StrokeStyle>,
    ) -> Option<Self::Stroke>;
}
