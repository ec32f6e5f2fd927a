// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
`vgml` is a compiler for a compact vector path & paint mini-language.

A text definition is parsed into a strongly-typed element tree, which can
be replayed against any graphics backend that implements
[`ResourceFactory`] and [`PathBuilder`].

## Grammars

- Geometry: `[F0|F1] M x,y L x,y C ... Z O rx ry cx,cy R x y w h ...`
- Brush: `SC color`, `LG`/`LH` linear and `RG`/`RH` radial gradients
- Stroke: `ST width brush [stroke-style]`
- Stroke style: `CSS DS n LJ n ML n ...`
- Color: `#RRGGBB`, `#AARRGGBB` or four HDR floats

## Validation

Each input is scanned once and every non-whitespace character must be
attributed to a parsed element. Otherwise an [`Error`] is returned:

- `UnrecognizedGrammar` when nothing matched
- `AmbiguousDefinition` when a single-element grammar matched twice
- `MalformedInput` with the 1-based position of the first unattributed character

## Backends

A [`tiny-skia`](tiny_skia) backend is provided in the [`skia`] module.

## Safety

- The library should not panic. Any panic considered as a critical bug and should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

mod brush;
mod factory;
mod geometry;
mod options;
mod path;
pub mod skia;
mod stroke;
mod writer;

pub use crate::brush::*;
pub use crate::factory::*;
pub use crate::geometry::*;
pub use crate::options::*;
pub use crate::path::*;
pub use crate::stroke::*;
pub use crate::writer::*;

pub use strict_num::NormalizedF32;
pub use vgmltypes::{
    CapStyle, Color, DashStyle, Error, GradientStop, Grammar, HdrColor, LineJoin, Point, Rect,
    Span, StrokeStyleElement, StrokeTransformBehavior,
};

/// An alias to `NormalizedF32`.
pub type Opacity = NormalizedF32;
