// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use vgmltypes::{
    parse_single, Color, Error, GradientStop, Grammar, HdrColor, IndexedEnum, Point, Span,
    Stream, StreamError,
};

use crate::{Opacity, ResourceFactory};

/// Defines how the alpha channel of gradient stops is interpreted.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum AlphaMode {
    #[default]
    Premultiplied,
    Straight,
    Ignore,
}

impl IndexedEnum for AlphaMode {
    const NAME: &'static str = "Alpha mode";
    const VARIANTS: &'static [Self] = &[
        AlphaMode::Premultiplied,
        AlphaMode::Straight,
        AlphaMode::Ignore,
    ];
}

/// A gradient buffer precision.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum BufferPrecision {
    #[default]
    Uint8Normalized,
    Uint8NormalizedSrgb,
    Uint16Normalized,
    Float16,
    Float32,
}

impl IndexedEnum for BufferPrecision {
    const NAME: &'static str = "Buffer precision";
    const VARIANTS: &'static [Self] = &[
        BufferPrecision::Uint8Normalized,
        BufferPrecision::Uint8NormalizedSrgb,
        BufferPrecision::Uint16Normalized,
        BufferPrecision::Float16,
        BufferPrecision::Float32,
    ];
}

/// Defines how a gradient is extended past its stops.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum EdgeBehavior {
    #[default]
    Clamp,
    Wrap,
    Mirror,
}

impl IndexedEnum for EdgeBehavior {
    const NAME: &'static str = "Edge behavior";
    const VARIANTS: &'static [Self] = &[
        EdgeBehavior::Clamp,
        EdgeBehavior::Wrap,
        EdgeBehavior::Mirror,
    ];
}

/// A gradient interpolation color space.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum ColorSpace {
    Custom,
    #[default]
    Srgb,
    ScRgb,
}

impl IndexedEnum for ColorSpace {
    const NAME: &'static str = "Color space";
    const VARIANTS: &'static [Self] = &[ColorSpace::Custom, ColorSpace::Srgb, ColorSpace::ScRgb];
}

/// Optional gradient attributes.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub struct GradientAttributes {
    pub alpha_mode: AlphaMode,
    pub buffer_precision: BufferPrecision,
    pub edge_behavior: EdgeBehavior,
    pub pre_interpolation_space: ColorSpace,
    pub post_interpolation_space: ColorSpace,
}

/// A linear gradient.
#[derive(Clone, PartialEq, Debug)]
pub struct LinearGradient<C> {
    /// Gradient start.
    pub start: Point,
    /// Gradient end.
    pub end: Point,
    /// Stops, sorted by position. Never empty.
    pub stops: Vec<GradientStop<C>>,
    /// Attributes.
    pub attributes: GradientAttributes,
}

/// An elliptical radial gradient.
#[derive(Clone, PartialEq, Debug)]
pub struct RadialGradient<C> {
    /// Horizontal radius. Always positive.
    pub radius_x: f32,
    /// Vertical radius. Always positive.
    pub radius_y: f32,
    /// Ellipse center.
    pub center: Point,
    /// Gradient origin, relative to the center.
    pub origin_offset: Point,
    /// Stops, sorted by position. Never empty.
    pub stops: Vec<GradientStop<C>>,
    /// Attributes.
    pub attributes: GradientAttributes,
}

/// A paint variant.
#[allow(missing_docs)]
#[derive(Clone, PartialEq, Debug)]
pub enum BrushKind {
    SolidColor(Color),
    LinearGradient(LinearGradient<Color>),
    LinearGradientHdr(LinearGradient<HdrColor>),
    RadialGradient(RadialGradient<Color>),
    RadialGradientHdr(RadialGradient<HdrColor>),
}

/// A parsed paint.
///
/// | Kind                | Syntax                                          |
/// |---------------------|-------------------------------------------------|
/// | solid color         | `SC color [O opacity]`                          |
/// | linear gradient     | `LG x0,y0 x1,y1 [attributes] S pos color ...`   |
/// | HDR linear gradient | `LH x0,y0 x1,y1 [attributes] S pos r g b a ...` |
/// | radial gradient     | `RG rx ry cx,cy ox,oy [attributes] S ...`       |
/// | HDR radial gradient | `RH rx ry cx,cy ox,oy [attributes] S ...`       |
///
/// Gradient attributes can be set in any order, but only once:
/// `A` alpha mode, `B` buffer precision, `E` edge behavior,
/// `P` and `R` pre and post interpolation color spaces, `O` opacity.
#[derive(Clone, PartialEq, Debug)]
pub struct BrushElement<'a> {
    /// The matched text.
    pub span: Span<'a>,
    /// Paint opacity.
    pub opacity: Opacity,
    /// Paint data.
    pub kind: BrushKind,
}

impl<'a> BrushElement<'a> {
    /// Parses a brush from a string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &'a str) -> Result<Self, Error> {
        parse_single(text, Grammar::Brush, parse_brush)
    }

    /// Returns the number of non-whitespace characters covered by the element.
    pub fn validation_count(&self) -> usize {
        self.span.validation_count()
    }

    /// Creates a backend paint.
    pub fn realize<F: ResourceFactory>(&self, factory: &F) -> Option<F::Brush> {
        match self.kind {
            BrushKind::SolidColor(color) => factory.create_solid_color_brush(color, self.opacity),
            BrushKind::LinearGradient(ref g) => {
                factory.create_linear_gradient_brush(g, self.opacity)
            }
            BrushKind::LinearGradientHdr(ref g) => {
                factory.create_linear_gradient_hdr_brush(g, self.opacity)
            }
            BrushKind::RadialGradient(ref g) => {
                factory.create_radial_gradient_brush(g, self.opacity)
            }
            BrushKind::RadialGradientHdr(ref g) => {
                factory.create_radial_gradient_hdr_brush(g, self.opacity)
            }
        }
    }
}

pub(crate) fn parse_brush<'a>(s: &mut Stream<'a>) -> Result<BrushElement<'a>, StreamError> {
    s.skip_spaces();
    let start = s.pos();

    let keyword = s.peek_keyword();
    if !matches!(keyword, "SC" | "LG" | "LH" | "RG" | "RH") {
        return Err(StreamError::UnexpectedData(s.calc_char_pos()));
    }
    s.advance(keyword.len());

    let mut opacity = 1.0;
    let mut attributes = GradientAttributes::default();

    let kind = match keyword {
        "SC" => {
            let color = s.parse_color()?;
            parse_attributes(s, &mut opacity, None);
            BrushKind::SolidColor(color)
        }
        "LG" | "LH" => {
            let start = s.parse_list_point()?;
            let end = s.parse_list_point()?;
            parse_attributes(s, &mut opacity, Some(&mut attributes));

            if keyword == "LG" {
                BrushKind::LinearGradient(LinearGradient {
                    start,
                    end,
                    stops: s.parse_gradient_stops()?,
                    attributes,
                })
            } else {
                BrushKind::LinearGradientHdr(LinearGradient {
                    start,
                    end,
                    stops: s.parse_hdr_gradient_stops()?,
                    attributes,
                })
            }
        }
        _ => {
            let radius_x = s.parse_list_number()?.abs();
            let radius_y = s.parse_list_number()?.abs();
            let center = s.parse_list_point()?;
            let origin_offset = s.parse_list_point()?;
            parse_attributes(s, &mut opacity, Some(&mut attributes));

            if keyword == "RG" {
                BrushKind::RadialGradient(RadialGradient {
                    radius_x,
                    radius_y,
                    center,
                    origin_offset,
                    stops: s.parse_gradient_stops()?,
                    attributes,
                })
            } else {
                BrushKind::RadialGradientHdr(RadialGradient {
                    radius_x,
                    radius_y,
                    center,
                    origin_offset,
                    stops: s.parse_hdr_gradient_stops()?,
                    attributes,
                })
            }
        }
    };

    Ok(BrushElement {
        span: s.span_from(start),
        opacity: Opacity::new_clamped(opacity),
        kind,
    })
}

// Stops at the first unknown or repeated key, leaving it unconsumed.
fn parse_attributes(
    s: &mut Stream,
    opacity: &mut f32,
    mut attributes: Option<&mut GradientAttributes>,
) {
    let mut seen: Vec<&str> = Vec::new();
    loop {
        s.skip_spaces();

        let key = s.peek_keyword();
        if key.is_empty() || seen.contains(&key) {
            break;
        }

        let mut probe = *s;
        probe.advance(key.len());
        let res = match (key, attributes.as_deref_mut()) {
            ("O", _) => probe.parse_list_number().map(|v| *opacity = v),
            ("A", Some(a)) => probe.parse_list_indexed().map(|v| a.alpha_mode = v),
            ("B", Some(a)) => probe.parse_list_indexed().map(|v| a.buffer_precision = v),
            ("E", Some(a)) => probe.parse_list_indexed().map(|v| a.edge_behavior = v),
            ("P", Some(a)) => probe
                .parse_list_indexed()
                .map(|v| a.pre_interpolation_space = v),
            ("R", Some(a)) => probe
                .parse_list_indexed()
                .map(|v| a.post_interpolation_space = v),
            _ => break,
        };

        if res.is_err() {
            break;
        }

        seen.push(key);
        *s = probe;
    }
}
