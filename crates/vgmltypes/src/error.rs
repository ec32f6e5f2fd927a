// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fmt;

/// A grammar of the mini-language family.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Grammar {
    /// Path data: figures, segments and closed shapes.
    Geometry,
    /// Solid color and gradient paints.
    Brush,
    /// Width, brush and an optional stroke style.
    Stroke,
    /// Dashes, caps and joins.
    StrokeStyle,
    /// A single hex or HDR color literal.
    Color,
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Grammar::Geometry => "geometry",
            Grammar::Brush => "brush",
            Grammar::Stroke => "stroke",
            Grammar::StrokeStyle => "stroke style",
            Grammar::Color => "color",
        };

        f.write_str(name)
    }
}

/// List of all parsing errors.
///
/// Every error carries the offending input verbatim.
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    /// The input contains no recognizable definition at all.
    #[error("no {grammar} definition found in '{text}'")]
    UnrecognizedGrammar { grammar: Grammar, text: String },

    /// The input contains more than one top-level definition
    /// where only one is allowed.
    #[error("multiple {grammar} definitions found in '{text}'")]
    AmbiguousDefinition { grammar: Grammar, text: String },

    /// Some characters of the input were not attributed to any element.
    ///
    /// `pos` is a 1-based character position of the first such character.
    #[error("unexpected data at position {pos} in {grammar} '{text}'")]
    MalformedInput {
        grammar: Grammar,
        pos: usize,
        text: String,
    },
}

impl Error {
    /// Returns the grammar that failed.
    pub fn grammar(&self) -> Grammar {
        match *self {
            Error::UnrecognizedGrammar { grammar, .. }
            | Error::AmbiguousDefinition { grammar, .. }
            | Error::MalformedInput { grammar, .. } => grammar,
        }
    }

    /// Returns the input that failed to parse.
    pub fn text(&self) -> &str {
        match self {
            Error::UnrecognizedGrammar { text, .. }
            | Error::AmbiguousDefinition { text, .. }
            | Error::MalformedInput { text, .. } => text,
        }
    }
}

/// Tokenizer-level errors.
///
/// Never returned by the public grammar entry points. A failed element
/// makes the scanner resynchronize instead.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum StreamError {
    /// An input data ended earlier than expected.
    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,

    /// An input text contains unknown data.
    #[error("unexpected data at position {0}")]
    UnexpectedData(usize),

    /// An invalid number.
    #[error("invalid number at position {0}")]
    InvalidNumber(usize),
}
