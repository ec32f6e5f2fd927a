// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use pico_args::Arguments;
use vgml::skia::TinySkiaFactory;
use vgml::{
    BrushElement, FigureLoop, FillRule, GeometryDocument, HdrColor, StrokeElement,
    StrokeStyleElement,
};

const HELP: &str = "\
vgml compiles vector path & paint definitions.

USAGE:
  vgml [OPTIONS] <KIND> <TEXT>

OPTIONS:
  -h, --help                        Prints help information
  -V, --version                     Prints version information

  --ast                             Prints the parsed element tree
  --svg PATH                        Writes an SVG preview of a geometry.
                                    Use '-' for the stdout
  --fill BRUSH                      Sets the preview fill brush
  --stroke STROKE                   Sets the preview stroke
  --fill-rule RULE                  Sets the fill rule of geometries without F0/F1
                                    [default: evenodd] [possible values: evenodd, nonzero]
  --open-figures                    Leaves figures without Z open
  --tolerance NUM                   Sets the arc flattening tolerance
                                    [default: 0.1]
  --coordinates-precision NUM       Set the coordinates numeric precision
                                    [values: 2..8 (inclusive)] [default: 4]
  --quiet                           Disables warnings

ARGS:
  <KIND>                            Input grammar
                                    [possible values: geometry, brush, stroke,
                                    stroke-style, color]
  <TEXT>                            Input definition
";

#[derive(Clone, Copy, PartialEq, Debug)]
enum Kind {
    Geometry,
    Brush,
    Stroke,
    StrokeStyle,
    Color,
}

#[derive(Debug)]
struct Args {
    ast: bool,
    svg: Option<PathBuf>,
    fill: Option<String>,
    stroke: Option<String>,
    fill_rule: FillRule,
    open_figures: bool,
    tolerance: f64,
    coordinates_precision: u8,
    quiet: bool,
    kind: Kind,
    text: String,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Parse(#[from] vgml::Error),

    #[error("{0} cannot be created by the backend")]
    Unsupported(&'static str),

    #[error("--svg, --fill and --stroke require a geometry")]
    NotAGeometry,

    #[error("failed to write to '{}' cause {}", path.display(), source)]
    Write {
        path: PathBuf,
        source: io::Error,
    },
}

fn collect_args() -> Result<Args, pico_args::Error> {
    let mut input = Arguments::from_env();

    if input.contains(["-h", "--help"]) {
        print!("{}", HELP);
        process::exit(0);
    }

    if input.contains(["-V", "--version"]) {
        println!("{}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    Ok(Args {
        ast: input.contains("--ast"),
        svg: input.opt_value_from_str("--svg")?,
        fill: input.opt_value_from_str("--fill")?,
        stroke: input.opt_value_from_str("--stroke")?,
        fill_rule: input
            .opt_value_from_fn("--fill-rule", parse_fill_rule)?
            .unwrap_or_default(),
        open_figures: input.contains("--open-figures"),
        tolerance: input
            .opt_value_from_fn("--tolerance", parse_tolerance)?
            .unwrap_or(0.1),
        coordinates_precision: input
            .opt_value_from_fn("--coordinates-precision", parse_precision)?
            .unwrap_or(4),
        quiet: input.contains("--quiet"),
        kind: input.free_from_fn(parse_kind)?,
        text: input.free_from_str()?,
    })
}

fn parse_kind(s: &str) -> Result<Kind, String> {
    let kind = match s {
        "geometry" => Kind::Geometry,
        "brush" => Kind::Brush,
        "stroke" => Kind::Stroke,
        "stroke-style" => Kind::StrokeStyle,
        "color" => Kind::Color,
        _ => return Err("invalid KIND value".to_string()),
    };

    Ok(kind)
}

fn parse_fill_rule(s: &str) -> Result<FillRule, String> {
    match s {
        "evenodd" => Ok(FillRule::EvenOdd),
        "nonzero" => Ok(FillRule::NonZero),
        _ => Err("invalid RULE value".to_string()),
    }
}

fn parse_tolerance(s: &str) -> Result<f64, String> {
    let n: f64 = s.parse().map_err(|_| "invalid tolerance NUM value")?;
    if n > 0.0 && n.is_finite() {
        Ok(n)
    } else {
        Err("tolerance NUM must be positive".to_string())
    }
}

fn parse_precision(s: &str) -> Result<u8, String> {
    let n: u8 = s.parse().map_err(|_| "invalid precision NUM value")?;
    if (2..=8).contains(&n) {
        Ok(n)
    } else {
        Err("precision NUM cannot be smaller than 2 or larger than 8".to_string())
    }
}

fn main() {
    let args = match collect_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            process::exit(1);
        }
    };

    if !args.quiet {
        if let Ok(()) = log::set_logger(&LOGGER) {
            log::set_max_level(log::LevelFilter::Warn);
        }
    }

    if let Err(e) = process(args) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn process(args: Args) -> Result<(), CliError> {
    let factory = TinySkiaFactory {
        tolerance: args.tolerance,
    };

    if args.kind != Kind::Geometry
        && (args.svg.is_some() || args.fill.is_some() || args.stroke.is_some())
    {
        return Err(CliError::NotAGeometry);
    }

    match args.kind {
        Kind::Geometry => process_geometry(&args, &factory)?,
        Kind::Brush => {
            let brush = BrushElement::from_str(&args.text)?;
            brush
                .realize(&factory)
                .ok_or(CliError::Unsupported("brush"))?;
            println!("{:#?}", brush);
        }
        Kind::Stroke => {
            let stroke = StrokeElement::from_str(&args.text)?;
            stroke
                .realize(&factory)
                .ok_or(CliError::Unsupported("stroke"))?;
            println!("{:#?}", stroke);
        }
        Kind::StrokeStyle => {
            let style = StrokeStyleElement::from_str(&args.text)?;
            println!("{:#?}", style);
        }
        Kind::Color => {
            let color: HdrColor = args.text.parse()?;
            let c = color.to_color();
            println!(
                "#{:02X}{:02X}{:02X}{:02X} ({} {} {} {})",
                c.alpha, c.red, c.green, c.blue, color.r, color.g, color.b, color.a
            );
        }
    }

    Ok(())
}

fn process_geometry(args: &Args, factory: &TinySkiaFactory) -> Result<(), CliError> {
    let opt = vgml::Options {
        default_fill_rule: args.fill_rule,
        implicit_figure_loop: if args.open_figures {
            FigureLoop::Open
        } else {
            FigureLoop::Closed
        },
    };

    let doc = GeometryDocument::from_str_with_options(&args.text, &opt)?;
    if args.ast {
        println!("{:#?}", doc.elements());
    }

    let geometry = doc
        .realize(factory)
        .ok_or(CliError::Unsupported("geometry"))?;

    let path = match args.svg {
        Some(ref path) => path,
        None => {
            if !args.ast {
                println!(
                    "{}",
                    vgml::path_data(&geometry.path, args.coordinates_precision)
                );
            }
            return Ok(());
        }
    };

    let fill = args.fill.as_deref().map(BrushElement::from_str).transpose()?;
    let stroke = args
        .stroke
        .as_deref()
        .map(StrokeElement::from_str)
        .transpose()?;

    let xml_opt = vgml::WriteOptions {
        coordinates_precision: args.coordinates_precision,
        ..vgml::WriteOptions::default()
    };
    let s = vgml::write_svg(&geometry, fill.as_ref(), stroke.as_ref(), &xml_opt);

    let result = if path.as_os_str() == "-" {
        io::stdout().write_all(s.as_bytes())
    } else {
        std::fs::write(path, s.as_bytes())
    };

    result.map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })
}

/// A simple stderr logger.
static LOGGER: SimpleLogger = SimpleLogger;
struct SimpleLogger;
impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::LevelFilter::Warn
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            let target = if !record.target().is_empty() {
                record.target()
            } else {
                record.module_path().unwrap_or_default()
            };

            let line = record.line().unwrap_or(0);
            let args = record.args();

            match record.level() {
                log::Level::Error => eprintln!("Error (in {}:{}): {}", target, line, args),
                log::Level::Warn => eprintln!("Warning (in {}:{}): {}", target, line, args),
                log::Level::Info => eprintln!("Info (in {}:{}): {}", target, line, args),
                log::Level::Debug => eprintln!("Debug (in {}:{}): {}", target, line, args),
                log::Level::Trace => eprintln!("Trace (in {}:{}): {}", target, line, args),
            }
        }
    }

    fn flush(&self) {}
}
