// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{FigureLoop, FillRule};

/// Geometry parsing options.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Options {
    /// A fill rule used when the geometry doesn't start with `F0`/`F1`.
    ///
    /// Default: EvenOdd
    pub default_fill_rule: FillRule,

    /// A figure loop of figures without an explicit `Z`.
    ///
    /// Default: Closed
    pub implicit_figure_loop: FigureLoop,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            default_fill_rule: FillRule::EvenOdd,
            implicit_figure_loop: FigureLoop::Closed,
        }
    }
}
