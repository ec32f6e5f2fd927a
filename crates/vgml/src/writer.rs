// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use strict_num::ApproxEqUlps;
use vgmltypes::{Color, GradientStop};
use xmlwriter::XmlWriter;

use crate::skia::{convert_stroke_style, Geometry};
use crate::{BrushElement, BrushKind, EdgeBehavior, LinearGradient, RadialGradient, StrokeElement};

/// SVG writing options.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Set the coordinates numeric precision.
    ///
    /// Smaller precision can lead to a malformed output in some cases.
    ///
    /// Default: 4
    pub coordinates_precision: u8,

    /// Use single quote marks instead of double quote.
    ///
    /// Default: disabled
    pub use_single_quote: bool,

    /// Set XML nodes indention.
    ///
    /// Default: 4 spaces
    pub indent: xmlwriter::Indent,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            coordinates_precision: 4,
            use_single_quote: false,
            indent: xmlwriter::Indent::Spaces(4),
        }
    }
}

const FILL_ID: &str = "fill-paint";
const STROKE_ID: &str = "stroke-paint";

/// Converts a path into SVG path data.
pub fn path_data(path: &tiny_skia::Path, precision: u8) -> String {
    use tiny_skia::PathSegment;

    let mut buf = String::new();
    for seg in path.segments() {
        match seg {
            PathSegment::MoveTo(p) => {
                buf.push_str("M ");
                write_points(&[p], &mut buf, precision);
            }
            PathSegment::LineTo(p) => {
                buf.push_str("L ");
                write_points(&[p], &mut buf, precision);
            }
            PathSegment::QuadTo(p1, p) => {
                buf.push_str("Q ");
                write_points(&[p1, p], &mut buf, precision);
            }
            PathSegment::CubicTo(p1, p2, p) => {
                buf.push_str("C ");
                write_points(&[p1, p2, p], &mut buf, precision);
            }
            PathSegment::Close => {
                buf.push_str("Z ");
            }
        }
    }

    buf.pop();
    buf
}

/// Writes a standalone SVG document with a single path.
///
/// Paints are written from the parsed elements, since backend shaders
/// cannot be inspected.
pub fn write_svg(
    geometry: &Geometry,
    fill: Option<&BrushElement>,
    stroke: Option<&StrokeElement>,
    opt: &WriteOptions,
) -> String {
    let mut xml = XmlWriter::new(xmlwriter::Options {
        use_single_quote: opt.use_single_quote,
        indent: opt.indent,
        attributes_indent: xmlwriter::Indent::None,
    });

    let precision = opt.coordinates_precision;
    let margin = stroke.map(|s| s.width / 2.0).unwrap_or(0.0);
    let bounds = geometry.path.bounds();
    let width = (bounds.width() + margin * 2.0).max(1.0);
    let height = (bounds.height() + margin * 2.0).max(1.0);

    xml.start_element("svg");
    xml.write_attribute("width", &num(width.ceil(), 0));
    xml.write_attribute("height", &num(height.ceil(), 0));
    xml.write_attribute_fmt(
        "viewBox",
        format_args!(
            "{} {} {} {}",
            num(bounds.x() - margin, precision),
            num(bounds.y() - margin, precision),
            num(width, precision),
            num(height, precision)
        ),
    );
    xml.write_attribute("xmlns", "http://www.w3.org/2000/svg");

    let has_gradient = |b: Option<&BrushElement>| {
        b.map_or(false, |b| !matches!(b.kind, BrushKind::SolidColor(_)))
    };
    let fill_gradient = has_gradient(fill);
    let stroke_gradient = has_gradient(stroke.map(|s| &s.brush));
    if fill_gradient || stroke_gradient {
        xml.start_element("defs");
        if let (true, Some(brush)) = (fill_gradient, fill) {
            write_gradient(FILL_ID, brush, precision, &mut xml);
        }
        if let (true, Some(stroke)) = (stroke_gradient, stroke) {
            write_gradient(STROKE_ID, &stroke.brush, precision, &mut xml);
        }
        xml.end_element();
    }

    xml.start_element("path");
    match fill {
        Some(brush) => write_paint("fill", FILL_ID, brush, &mut xml),
        None => xml.write_attribute("fill", "none"),
    }

    if geometry.fill_rule == tiny_skia::FillRule::EvenOdd {
        xml.write_attribute("fill-rule", "evenodd");
    }

    if let Some(stroke) = stroke {
        write_stroke(stroke, precision, &mut xml);
    }

    xml.write_attribute("d", &path_data(&geometry.path, precision));
    xml.end_element();

    xml.end_document()
}

fn write_paint(aid: &str, id: &str, brush: &BrushElement, xml: &mut XmlWriter) {
    match brush.kind {
        BrushKind::SolidColor(c) => {
            write_color(aid, c, xml);
            let opacity = brush.opacity.get() * c.alpha as f32 / 255.0;
            if opacity != 1.0 {
                xml.write_attribute_fmt(
                    &format!("{}-opacity", aid),
                    format_args!("{}", num(opacity, 4)),
                );
            }
        }
        _ => {
            xml.write_attribute_fmt(aid, format_args!("url(#{})", id));
            if brush.opacity.get() != 1.0 {
                xml.write_attribute_fmt(
                    &format!("{}-opacity", aid),
                    format_args!("{}", num(brush.opacity.get(), 4)),
                );
            }
        }
    }
}

fn write_stroke(stroke: &StrokeElement, precision: u8, xml: &mut XmlWriter) {
    write_paint("stroke", STROKE_ID, &stroke.brush, xml);

    let style = match stroke.style {
        Some(ref style) => convert_stroke_style(style),
        None => convert_stroke_style(&Default::default()),
    };

    if style.hairline {
        xml.write_attribute("stroke-width", "1");
        xml.write_attribute("vector-effect", "non-scaling-stroke");
    } else {
        xml.write_attribute("stroke-width", &num(stroke.width, precision));
    }

    match style.line_cap {
        tiny_skia::LineCap::Butt => {}
        tiny_skia::LineCap::Round => xml.write_attribute("stroke-linecap", "round"),
        tiny_skia::LineCap::Square => xml.write_attribute("stroke-linecap", "square"),
    }

    match style.line_join {
        tiny_skia::LineJoin::Miter => {}
        tiny_skia::LineJoin::MiterClip => xml.write_attribute("stroke-linejoin", "miter-clip"),
        tiny_skia::LineJoin::Round => xml.write_attribute("stroke-linejoin", "round"),
        tiny_skia::LineJoin::Bevel => xml.write_attribute("stroke-linejoin", "bevel"),
    }

    if style.miter_limit != 4.0 {
        xml.write_attribute("stroke-miterlimit", &num(style.miter_limit, precision));
    }

    if let Some(ref dash) = style.dash {
        let list: Vec<_> = dash
            .iter()
            .map(|n| num(n * stroke.width, precision))
            .collect();
        xml.write_attribute("stroke-dasharray", &list.join(" "));

        if style.dash_offset != 0.0 {
            xml.write_attribute(
                "stroke-dashoffset",
                &num(style.dash_offset * stroke.width, precision),
            );
        }
    }
}

fn write_gradient(id: &str, brush: &BrushElement, precision: u8, xml: &mut XmlWriter) {
    match brush.kind {
        BrushKind::SolidColor(_) => {}
        BrushKind::LinearGradient(ref g) => write_linear_gradient(id, g, precision, xml),
        BrushKind::LinearGradientHdr(ref g) => write_linear_gradient(id, g, precision, xml),
        BrushKind::RadialGradient(ref g) => write_radial_gradient(id, g, precision, xml),
        BrushKind::RadialGradientHdr(ref g) => write_radial_gradient(id, g, precision, xml),
    }
}

fn write_linear_gradient<C>(id: &str, g: &LinearGradient<C>, precision: u8, xml: &mut XmlWriter)
where
    C: Copy + Into<Color>,
{
    xml.start_element("linearGradient");
    xml.write_attribute("id", id);
    xml.write_attribute("x1", &num(g.start.x, precision));
    xml.write_attribute("y1", &num(g.start.y, precision));
    xml.write_attribute("x2", &num(g.end.x, precision));
    xml.write_attribute("y2", &num(g.end.y, precision));
    write_base_gradient(g.attributes.edge_behavior, &g.stops, xml);
    xml.end_element();
}

fn write_radial_gradient<C>(id: &str, g: &RadialGradient<C>, precision: u8, xml: &mut XmlWriter)
where
    C: Copy + Into<Color>,
{
    xml.start_element("radialGradient");
    xml.write_attribute("id", id);
    xml.write_attribute("cx", &num(g.center.x, precision));
    xml.write_attribute("cy", &num(g.center.y, precision));
    xml.write_attribute("r", &num(g.radius_x, precision));

    let scale_y = if g.radius_x > 0.0 {
        g.radius_y / g.radius_x
    } else {
        1.0
    };

    if g.origin_offset != vgmltypes::Point::default() {
        xml.write_attribute("fx", &num(g.center.x + g.origin_offset.x, precision));
        xml.write_attribute(
            "fy",
            &num(g.center.y + g.origin_offset.y / scale_y, precision),
        );
    }

    if scale_y != 1.0 {
        xml.write_attribute_fmt(
            "gradientTransform",
            format_args!(
                "matrix(1 0 0 {} 0 {})",
                num(scale_y, precision),
                num(g.center.y - g.center.y * scale_y, precision)
            ),
        );
    }

    write_base_gradient(g.attributes.edge_behavior, &g.stops, xml);
    xml.end_element();
}

fn write_base_gradient<C>(edge: EdgeBehavior, stops: &[GradientStop<C>], xml: &mut XmlWriter)
where
    C: Copy + Into<Color>,
{
    xml.write_attribute("gradientUnits", "userSpaceOnUse");
    match edge {
        EdgeBehavior::Clamp => {}
        EdgeBehavior::Wrap => xml.write_attribute("spreadMethod", "repeat"),
        EdgeBehavior::Mirror => xml.write_attribute("spreadMethod", "reflect"),
    }

    for stop in stops {
        let color: Color = stop.color.into();
        xml.start_element("stop");
        xml.write_attribute("offset", &num(stop.position, 4));
        write_color("stop-color", color, xml);
        if color.alpha != 255 {
            xml.write_attribute("stop-opacity", &num(color.alpha as f32 / 255.0, 4));
        }
        xml.end_element();
    }
}

fn write_color(aid: &str, c: Color, xml: &mut XmlWriter) {
    static CHARS: &[u8] = b"0123456789abcdef";

    #[inline]
    fn int2hex(n: u8) -> (u8, u8) {
        (CHARS[(n >> 4) as usize], CHARS[(n & 0xf) as usize])
    }

    let (r1, r2) = int2hex(c.red);
    let (g1, g2) = int2hex(c.green);
    let (b1, b2) = int2hex(c.blue);

    xml.write_attribute_raw(aid, |buf| {
        buf.extend_from_slice(&[b'#', r1, r2, g1, g2, b1, b2])
    });
}

fn write_points(points: &[tiny_skia::Point], buf: &mut String, precision: u8) {
    for p in points {
        buf.push_str(&num(p.x, precision));
        buf.push(' ');
        buf.push_str(&num(p.y, precision));
        buf.push(' ');
    }
}

fn num(n: f32, precision: u8) -> String {
    if n.fract().approx_eq_ulps(&0.0, 4) {
        return (n as i32).to_string();
    }

    // Rounding prevents numbers like 29.999999999999996.
    let pow = 10f32.powi(precision as i32);
    let v = (n * pow).round() / pow;
    v.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(num(10.0, 4), "10");
        assert_eq!(num(-3.0, 4), "-3");
    }

    #[test]
    fn rounding() {
        assert_eq!(num(0.123456, 4), "0.1235");
        assert_eq!(num(1.5, 0), "2");
    }

    #[test]
    fn simple_path() {
        let mut pb = tiny_skia::PathBuilder::new();
        pb.move_to(10.0, 20.0);
        pb.line_to(30.5, 40.0);
        pb.quad_to(1.0, 2.0, 3.0, 4.0);
        pb.close();
        let path = pb.finish().unwrap();
        assert_eq!(path_data(&path, 4), "M 10 20 L 30.5 40 Q 1 2 3 4 Z");
    }
}
