use vgml::skia::TinySkiaFactory;
use vgml::*;

fn realize(text: &str) -> Option<vgml::skia::Geometry> {
    GeometryDocument::from_str(text)
        .unwrap()
        .realize(&TinySkiaFactory::default())
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn closed_figure() {
    let geometry = realize("M 0,0 L 10,0 L 10,10").unwrap();
    let bounds = geometry.path.bounds();
    assert_eq!(bounds.width(), 10.0);
    assert_eq!(bounds.height(), 10.0);
    assert_eq!(geometry.path.segments().count(), 4);
    assert_eq!(geometry.fill_rule, tiny_skia::FillRule::EvenOdd);
}

#[test]
fn open_figure() {
    let opt = Options {
        implicit_figure_loop: FigureLoop::Open,
        default_fill_rule: FillRule::NonZero,
    };
    let geometry = GeometryDocument::from_str_with_options("M 0,0 L 10,0 L 10,10", &opt)
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();
    assert_eq!(geometry.path.segments().count(), 3);
    assert_eq!(geometry.fill_rule, tiny_skia::FillRule::Winding);
}

#[test]
fn figure_without_segments() {
    assert!(realize("M 5,5").is_none());
}

#[test]
fn ellipse() {
    let geometry = realize("O 5 5 10,10").unwrap();
    let bounds = geometry.path.bounds();
    assert!(approx(bounds.x(), 5.0));
    assert!(approx(bounds.y(), 5.0));
    assert!(approx(bounds.width(), 10.0));
    assert!(approx(bounds.height(), 10.0));
}

#[test]
fn rectangle() {
    let geometry = realize("R 0 0 10 20").unwrap();
    let bounds = geometry.path.bounds();
    assert_eq!(bounds.width(), 10.0);
    assert_eq!(bounds.height(), 20.0);
}

#[test]
fn rounded_rectangle() {
    let geometry = realize("U 0 0 10 20 50 50").unwrap();
    let bounds = geometry.path.bounds();
    assert!(approx(bounds.width(), 10.0));
    assert!(approx(bounds.height(), 20.0));
}

#[test]
fn polygon() {
    let geometry = realize("P 4 5 0,0").unwrap();
    let bounds = geometry.path.bounds();
    assert!(approx(bounds.width(), 10.0));
    assert!(approx(bounds.height(), 10.0));
}

#[test]
fn degenerate_polygon() {
    assert!(realize("P 2 5 0,0").is_none());
}

#[test]
fn polygon_side_limit() {
    let geometry = realize("P 1024 5 0,0").unwrap();
    // M, 1023 L, Z.
    assert_eq!(geometry.path.segments().count(), 1025);

    assert!(realize("P 5000000 5 0,0").is_none());
    assert!(realize("P 2000000000 5 0 0").is_none());
}

#[test]
fn zero_tolerance_arc() {
    let geometry = GeometryDocument::from_str("M 0,0 A 10 10 0 0 1 20,0")
        .unwrap()
        .realize(&TinySkiaFactory { tolerance: 0.0 })
        .unwrap();
    assert!(approx(geometry.path.bounds().width(), 20.0));
}

#[test]
fn shapes_follow_figures() {
    let geometry = realize("M 0,0 R 20 20 5 5 L 10,0 L 10,10").unwrap();
    // Figure: M L L Z, rectangle: M L L L Z.
    let segments: Vec<_> = geometry.path.segments().collect();
    assert_eq!(segments.len(), 9);
    assert!(matches!(segments[3], tiny_skia::PathSegment::Close));
    assert!(matches!(segments[4], tiny_skia::PathSegment::MoveTo(_)));
}

#[test]
fn arc() {
    let geometry = realize("M 0,0 A 10 10 0 0 1 20,0").unwrap();
    let bounds = geometry.path.bounds();
    assert!(approx(bounds.width(), 20.0));
    // Bounds include control points.
    assert!(bounds.height() > 9.99 && bounds.height() < 11.0);
}

#[test]
fn fill() {
    let geometry = realize("R 0 0 10 10").unwrap();
    let brush = BrushElement::from_str("SC #FF0000")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();

    let mut pixmap = tiny_skia::Pixmap::new(20, 20).unwrap();
    let paint = tiny_skia::Paint {
        shader: brush,
        ..tiny_skia::Paint::default()
    };
    pixmap.fill_path(
        &geometry.path,
        &paint,
        geometry.fill_rule,
        tiny_skia::Transform::identity(),
        None,
    );

    let inside = pixmap.pixel(5, 5).unwrap();
    assert_eq!(inside.red(), 255);
    assert_eq!(inside.alpha(), 255);
    assert_eq!(pixmap.pixel(15, 15).unwrap().alpha(), 0);
}

#[test]
fn brush_opacity() {
    let brush = BrushElement::from_str("SC #FF0000 O 0.5")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();
    match brush {
        tiny_skia::Shader::SolidColor(c) => assert_eq!(c.to_color_u8().alpha(), 128),
        _ => panic!("not a solid color"),
    }
}

#[test]
fn linear_gradient() {
    let brush = BrushElement::from_str("LG 0,0 10,0 E 2 S 0 #FF0000 1 #0000FF")
        .unwrap()
        .realize(&TinySkiaFactory::default());
    assert!(matches!(brush, Some(tiny_skia::Shader::LinearGradient(_))));
}

#[test]
fn radial_gradient() {
    let brush = BrushElement::from_str("RG 10 5 0,0 0,0 S 0 #FF0000 1 #0000FF")
        .unwrap()
        .realize(&TinySkiaFactory::default());
    assert!(matches!(brush, Some(tiny_skia::Shader::RadialGradient(_))));
}

#[test]
fn zero_radius_gradient() {
    let brush = BrushElement::from_str("RG 0 5 0,0 0,0 S 0 #FF0000 1 #0000FF")
        .unwrap()
        .realize(&TinySkiaFactory::default());
    assert!(brush.is_none());
}

#[test]
fn dashed_stroke() {
    let stroke = StrokeElement::from_str("ST 2 SC #000000 CSS DS 1 LJ 3 SC 2")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();
    assert_eq!(stroke.stroke.width, 2.0);
    assert!(stroke.stroke.dash.is_some());
    assert_eq!(stroke.stroke.line_join, tiny_skia::LineJoin::MiterClip);
    assert_eq!(stroke.stroke.line_cap, tiny_skia::LineCap::Round);
}

#[test]
fn hairline_stroke() {
    let stroke = StrokeElement::from_str("ST 3 SC #000000 CSS TB 2")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();
    assert_eq!(stroke.stroke.width, 0.0);
}

#[test]
fn default_stroke() {
    let stroke = StrokeElement::from_str("ST 4 SC #000000")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();
    assert_eq!(stroke.stroke.width, 4.0);
    assert_eq!(stroke.stroke.miter_limit, 10.0);
    assert!(stroke.stroke.dash.is_none());
}

#[test]
fn draw_stroke() {
    let geometry = realize("M 2,10 L 18,10").unwrap();
    let stroke = StrokeElement::from_str("ST 4 SC #0000FF")
        .unwrap()
        .realize(&TinySkiaFactory::default())
        .unwrap();

    let mut pixmap = tiny_skia::Pixmap::new(20, 20).unwrap();
    let paint = tiny_skia::Paint {
        shader: stroke.shader,
        ..tiny_skia::Paint::default()
    };
    pixmap.stroke_path(
        &geometry.path,
        &paint,
        &stroke.stroke,
        tiny_skia::Transform::identity(),
        None,
    );

    assert_eq!(pixmap.pixel(10, 10).unwrap().blue(), 255);
    assert_eq!(pixmap.pixel(10, 2).unwrap().alpha(), 0);
}
