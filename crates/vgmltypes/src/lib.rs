// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
*vgmltypes* is the lexical layer of the vgml path & paint mini-language.

It provides a byte-level tokenizer and the leaf grammars shared by the
composite ones in the `vgml` crate.

## Supported types

- `<color>`: `#RRGGBB`, `#AARRGGBB` or four HDR floats
- `<gradient-stops>`: `S pos color [pos color ...]`
- `<stroke-style>`: `CSS` followed by dash, cap and join attributes
- `<number>`: `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`

## Validation

Every grammar scans its input once. Anything the scanner cannot attribute
to an element makes the whole input invalid. See [`Error`] for details.

## Safety

- The library should not panic. Any panic considered as a critical bug and should be reported.
- The library forbids unsafe code.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

mod color;
mod error;
mod geom;
mod gradient;
mod scan;
mod span;
mod stream;
mod stroke_style;

pub use crate::color::*;
pub use crate::error::*;
pub use crate::geom::*;
pub use crate::gradient::*;
pub use crate::scan::*;
pub use crate::span::*;
pub use crate::stream::*;
pub use crate::stroke_style::*;
