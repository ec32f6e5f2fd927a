// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::{Color, HdrColor, Stream, StreamError};

/// A gradient stop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct GradientStop<C> {
    /// Position in `0..=1`.
    pub position: f32,
    /// Stop color.
    pub color: C,
}

impl<C> GradientStop<C> {
    /// Creates a new stop. The position is clamped to `0..=1`.
    #[inline]
    pub fn new(position: f32, color: C) -> Self {
        GradientStop {
            position: position.clamp(0.0, 1.0),
            color,
        }
    }
}

impl<'a> Stream<'a> {
    /// Parses `S pos color [pos color ...]` groups with 8-bit colors.
    ///
    /// Stops are sorted by position.
    pub fn parse_gradient_stops(&mut self) -> Result<Vec<GradientStop<Color>>, StreamError> {
        self.parse_stops_with(|s| s.parse_color())
    }

    /// Parses `S pos r g b a [pos r g b a ...]` groups with HDR colors.
    ///
    /// Stops are sorted by position.
    pub fn parse_hdr_gradient_stops(
        &mut self,
    ) -> Result<Vec<GradientStop<HdrColor>>, StreamError> {
        self.parse_stops_with(|s| s.parse_hdr_color())
    }

    fn parse_stops_with<C, F>(&mut self, parse_color: F) -> Result<Vec<GradientStop<C>>, StreamError>
    where
        F: Fn(&mut Stream<'a>) -> Result<C, StreamError>,
    {
        let parse_stop = |s: &mut Stream<'a>| -> Result<GradientStop<C>, StreamError> {
            let position = s.parse_list_number()?;
            let color = parse_color(s)?;
            Ok(GradientStop::new(position, color))
        };

        let mut stops = Vec::new();
        while self.consume_keyword("S") {
            stops.push(parse_stop(self)?);

            // Additional stops sharing the same keyword.
            loop {
                self.skip_spaces();
                if !self.starts_with_number() {
                    break;
                }

                let mut probe = *self;
                match parse_stop(&mut probe) {
                    Ok(stop) => {
                        stops.push(stop);
                        *self = probe;
                    }
                    Err(_) => break,
                }
            }
        }

        if stops.is_empty() {
            return Err(StreamError::UnexpectedData(self.calc_char_pos()));
        }

        // Stable, so stops with equal positions keep the source order.
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Ok(stops)
    }
}
