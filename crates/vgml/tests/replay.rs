use vgml::*;

#[derive(Clone, PartialEq, Debug)]
enum Call {
    Begin(Point),
    Line(Point),
    Cubic(Point, Point, Point),
    Quad(Point, Point),
    Arc(Point, f32, f32, f32, SweepDirection, ArcSize),
    End(FigureLoop),
    Ellipse(Point, f32, f32),
    Rectangle(Rect),
    RoundedRectangle(Rect, f32, f32),
    Polygon(Point, f32, u32),
}

#[derive(Default, Debug)]
struct Recorder {
    fill_rule: FillRule,
    calls: Vec<Call>,
}

impl PathBuilder for Recorder {
    fn begin_figure(&mut self, start: Point) {
        self.calls.push(Call::Begin(start));
    }

    fn add_line(&mut self, to: Point) {
        self.calls.push(Call::Line(to));
    }

    fn add_cubic_bezier(&mut self, control1: Point, control2: Point, to: Point) {
        self.calls.push(Call::Cubic(control1, control2, to));
    }

    fn add_quadratic_bezier(&mut self, control: Point, to: Point) {
        self.calls.push(Call::Quad(control, to));
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
        self.calls
            .push(Call::Arc(to, radius_x, radius_y, rotation, sweep, size));
    }

    fn end_figure(&mut self, figure_loop: FigureLoop) {
        self.calls.push(Call::End(figure_loop));
    }

    fn add_ellipse(&mut self, center: Point, radius_x: f32, radius_y: f32) {
        self.calls.push(Call::Ellipse(center, radius_x, radius_y));
    }

    fn add_rectangle(&mut self, rect: Rect) {
        self.calls.push(Call::Rectangle(rect));
    }

    fn add_rounded_rectangle(&mut self, rect: Rect, radius_x: f32, radius_y: f32) {
        self.calls
            .push(Call::RoundedRectangle(rect, radius_x, radius_y));
    }

    fn add_polygon(&mut self, center: Point, radius: f32, sides: u32) {
        self.calls.push(Call::Polygon(center, radius, sides));
    }
}

#[derive(Clone, PartialEq, Debug)]
enum Paint {
    Solid(Color, f32),
    Linear(Vec<f32>, f32),
    LinearHdr(Vec<HdrColor>),
    Radial(Point, f32, f32),
    RadialHdr(Vec<HdrColor>),
}

struct RecordingFactory;

impl ResourceFactory for RecordingFactory {
    type PathBuilder = Recorder;
    type Geometry = Recorder;
    type Brush = Paint;
    type StrokeStyle = DashStyle;
    type Stroke = (f32, Paint, Option<DashStyle>);

    fn create_path_builder(&self, fill_rule: FillRule) -> Recorder {
        Recorder {
            fill_rule,
            calls: Vec::new(),
        }
    }

    fn create_geometry(&self, builder: Recorder) -> Option<Recorder> {
        if builder.calls.is_empty() {
            None
        } else {
            Some(builder)
        }
    }

    fn create_solid_color_brush(&self, color: Color, opacity: Opacity) -> Option<Paint> {
        Some(Paint::Solid(color, opacity.get()))
    }

    fn create_linear_gradient_brush(
        &self,
        gradient: &LinearGradient<Color>,
        opacity: Opacity,
    ) -> Option<Paint> {
        let positions = gradient.stops.iter().map(|s| s.position).collect();
        Some(Paint::Linear(positions, opacity.get()))
    }

    fn create_linear_gradient_hdr_brush(
        &self,
        gradient: &LinearGradient<HdrColor>,
        _: Opacity,
    ) -> Option<Paint> {
        let colors = gradient.stops.iter().map(|s| s.color).collect();
        Some(Paint::LinearHdr(colors))
    }

    fn create_radial_gradient_brush(
        &self,
        gradient: &RadialGradient<Color>,
        _: Opacity,
    ) -> Option<Paint> {
        Some(Paint::Radial(
            gradient.center,
            gradient.radius_x,
            gradient.radius_y,
        ))
    }

    fn create_radial_gradient_hdr_brush(
        &self,
        gradient: &RadialGradient<HdrColor>,
        _: Opacity,
    ) -> Option<Paint> {
        let colors = gradient.stops.iter().map(|s| s.color).collect();
        Some(Paint::RadialHdr(colors))
    }

    fn create_stroke_style(&self, style: &StrokeStyleElement) -> Option<DashStyle> {
        Some(style.dash_style)
    }

    fn create_stroke(
        &self,
        width: f32,
        brush: Paint,
        style: Option<DashStyle>,
    ) -> Option<(f32, Paint, Option<DashStyle>)> {
        Some((width, brush, style))
    }
}

fn replay(text: &str) -> Vec<Call> {
    let doc = GeometryDocument::from_str(text).unwrap();
    let mut recorder = Recorder::default();
    doc.replay(&mut recorder);
    recorder.calls
}

fn pt(x: f32, y: f32) -> Point {
    Point::from_xy(x, y)
}

#[test]
fn smooth_cubic_reflects_control_point() {
    assert_eq!(
        replay("M 0,0 C 0,0 10,0 10,10 S 20,20 30,10"),
        vec![
            Call::Begin(pt(0.0, 0.0)),
            Call::Cubic(pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)),
            Call::Cubic(pt(10.0, 20.0), pt(20.0, 20.0), pt(30.0, 10.0)),
            Call::End(FigureLoop::Closed),
        ]
    );
}

#[test]
fn smooth_cubic_after_line() {
    let calls = replay("M 0,0 L 10,10 S 20,20 30,10");
    assert_eq!(
        calls[2],
        Call::Cubic(pt(10.0, 10.0), pt(20.0, 20.0), pt(30.0, 10.0))
    );
}

#[test]
fn smooth_quadratic_reflects_control_point() {
    let calls = replay("M 0,0 Q 10,0 10,10 T 10,20 T 0,30");
    assert_eq!(calls[2], Call::Quad(pt(10.0, 20.0), pt(10.0, 20.0)));
    assert_eq!(calls[3], Call::Quad(pt(10.0, 20.0), pt(0.0, 30.0)));
}

#[test]
fn smooth_cubic_ignores_quadratic() {
    let calls = replay("M 0,0 Q 10,0 10,10 S 20,20 30,10");
    assert_eq!(
        calls[2],
        Call::Cubic(pt(10.0, 10.0), pt(20.0, 20.0), pt(30.0, 10.0))
    );
}

#[test]
fn implicit_close_is_explicit_close() {
    assert_eq!(
        replay("M 0,0 L 10,0 L 10,10"),
        replay("M 0,0 L 10,0 L 10,10 Z")
    );
}

#[test]
fn implicit_open_figure() {
    let opt = Options {
        implicit_figure_loop: FigureLoop::Open,
        ..Options::default()
    };
    let doc = GeometryDocument::from_str_with_options("M 0,0 L 10,0", &opt).unwrap();
    let mut recorder = Recorder::default();
    doc.replay(&mut recorder);
    assert_eq!(recorder.calls.last(), Some(&Call::End(FigureLoop::Open)));
}

#[test]
fn figures_in_order() {
    assert_eq!(
        replay("M 0,0 L 1,1 Z M 5,5 L 6,6 Z"),
        vec![
            Call::Begin(pt(0.0, 0.0)),
            Call::Line(pt(1.0, 1.0)),
            Call::End(FigureLoop::Closed),
            Call::Begin(pt(5.0, 5.0)),
            Call::Line(pt(6.0, 6.0)),
            Call::End(FigureLoop::Closed),
        ]
    );
}

#[test]
fn relative_after_close() {
    assert_eq!(
        replay("M 10,10 L 20,10 Z l 5,5"),
        vec![
            Call::Begin(pt(10.0, 10.0)),
            Call::Line(pt(20.0, 10.0)),
            Call::End(FigureLoop::Closed),
            Call::Begin(pt(10.0, 10.0)),
            Call::Line(pt(15.0, 15.0)),
            Call::End(FigureLoop::Closed),
        ]
    );
}

#[test]
fn relative_lines() {
    assert_eq!(
        replay("m 1,2 l 3,4 h 5 v -6"),
        vec![
            Call::Begin(pt(1.0, 2.0)),
            Call::Line(pt(4.0, 6.0)),
            Call::Line(pt(9.0, 6.0)),
            Call::Line(pt(9.0, 0.0)),
            Call::End(FigureLoop::Closed),
        ]
    );
}

#[test]
fn negative_ellipse_radii() {
    assert_eq!(
        replay("O -10 -10 0,0"),
        vec![Call::Ellipse(pt(0.0, 0.0), 10.0, 10.0)]
    );
}

#[test]
fn shape_inside_figure() {
    assert_eq!(
        replay("M 5,5 L 10,10 o 2 2 1,1 L 0,0"),
        vec![
            Call::Begin(pt(5.0, 5.0)),
            Call::Line(pt(10.0, 10.0)),
            Call::Ellipse(pt(11.0, 11.0), 2.0, 2.0),
            Call::Line(pt(0.0, 0.0)),
            Call::End(FigureLoop::Closed),
        ]
    );
}

#[test]
fn shapes() {
    assert_eq!(
        replay("R 1 2 3 4 U 0 0 10 10 2 3 P 6 5 1,1"),
        vec![
            Call::Rectangle(Rect::from_xywh(1.0, 2.0, 3.0, 4.0)),
            Call::RoundedRectangle(Rect::from_xywh(0.0, 0.0, 10.0, 10.0), 2.0, 3.0),
            Call::Polygon(pt(1.0, 1.0), 5.0, 6),
        ]
    );
}

#[test]
fn arc() {
    let calls = replay("M 10,20 a 5 5 30 1 0 10,0");
    assert_eq!(
        calls[1],
        Call::Arc(
            pt(20.0, 20.0),
            5.0,
            5.0,
            30.0,
            SweepDirection::CounterClockwise,
            ArcSize::Large
        )
    );
}

#[test]
fn fill_rule_reaches_factory() {
    let doc = GeometryDocument::from_str("F1 M 0,0 L 1,1").unwrap();
    let geometry = doc.realize(&RecordingFactory).unwrap();
    assert_eq!(geometry.fill_rule, FillRule::NonZero);

    let doc = GeometryDocument::from_str("M 0,0 L 1,1").unwrap();
    let geometry = doc.realize(&RecordingFactory).unwrap();
    assert_eq!(geometry.fill_rule, FillRule::EvenOdd);
}

#[test]
fn malformed_geometry() {
    let err = GeometryDocument::from_str("M 0,0 L 10,10 x").unwrap_err();
    assert_eq!(
        err,
        Error::MalformedInput {
            grammar: Grammar::Geometry,
            pos: 15,
            text: "M 0,0 L 10,10 x".to_string(),
        }
    );
}

#[test]
fn non_ascii_space_is_malformed() {
    let text = "M 0,0 L 10,10\u{a0}L 20,0";
    assert_eq!(
        GeometryDocument::from_str(text).unwrap_err(),
        Error::MalformedInput {
            grammar: Grammar::Geometry,
            pos: 14,
            text: text.to_string(),
        }
    );
}

#[test]
fn unrecognized_geometry() {
    assert!(matches!(
        GeometryDocument::from_str("   ").unwrap_err(),
        Error::UnrecognizedGrammar { .. }
    ));
}

#[test]
fn solid_color_brush() {
    let brush = BrushElement::from_str("SC #80FF0000 O 0.5").unwrap();
    assert_eq!(
        brush.realize(&RecordingFactory),
        Some(Paint::Solid(Color::from_argb(128, 255, 0, 0), 0.5))
    );
}

#[test]
fn hdr_solid_color_brush() {
    let brush = BrushElement::from_str("SC 0.5 0.5 0.5 1").unwrap();
    assert_eq!(
        brush.realize(&RecordingFactory),
        Some(Paint::Solid(Color::from_rgb(128, 128, 128), 1.0))
    );
}

#[test]
fn gradient_stops_are_sorted() {
    let brush = BrushElement::from_str("LG 0,0 1,0 S 1 #0000FF 0 #FF0000 0.5 #00FF00").unwrap();
    assert_eq!(
        brush.realize(&RecordingFactory),
        Some(Paint::Linear(vec![0.0, 0.5, 1.0], 1.0))
    );
}

#[test]
fn hdr_gradient() {
    let brush = BrushElement::from_str("LH 0,0 1,0 S 0 2 0 0 1").unwrap();
    assert_eq!(
        brush.realize(&RecordingFactory),
        Some(Paint::LinearHdr(vec![HdrColor::new(2.0, 0.0, 0.0, 1.0)]))
    );
}

#[test]
fn radial_gradient() {
    let brush = BrushElement::from_str("RG 10 -5 3,4 0,0 S 0 #FFFFFF").unwrap();
    assert_eq!(
        brush.realize(&RecordingFactory),
        Some(Paint::Radial(pt(3.0, 4.0), 10.0, 5.0))
    );
}

#[test]
fn two_brushes() {
    assert!(matches!(
        BrushElement::from_str("SC #FF0000 SC #00FF00").unwrap_err(),
        Error::AmbiguousDefinition {
            grammar: Grammar::Brush,
            ..
        }
    ));
}

#[test]
fn stroke() {
    let stroke = StrokeElement::from_str("ST 2 SC #FF0000 CSS DS 1").unwrap();
    assert_eq!(
        stroke.realize(&RecordingFactory),
        Some((
            2.0,
            Paint::Solid(Color::from_rgb(255, 0, 0), 1.0),
            Some(DashStyle::Dash)
        ))
    );
}

#[test]
fn stroke_without_style() {
    let stroke = StrokeElement::from_str("ST 1 SC #000000").unwrap();
    let (_, _, style) = stroke.realize(&RecordingFactory).unwrap();
    assert_eq!(style, None);
}

#[test]
fn colors() {
    assert_eq!(
        "#80FF0000".parse::<Color>().unwrap(),
        Color::from_argb(128, 255, 0, 0)
    );
    assert_eq!(
        "0.5 0.5 0.5 0.5".parse::<Color>().unwrap(),
        Color::from_argb(128, 128, 128, 128)
    );
    assert!(matches!(
        "#FF0000 #00FF00".parse::<Color>().unwrap_err(),
        Error::AmbiguousDefinition { .. }
    ));
}
