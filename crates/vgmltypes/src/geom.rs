// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::{Add, Mul, Sub};

/// A 2D point.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Creates a new `Point`.
    #[inline]
    pub fn from_xy(x: f32, y: f32) -> Self {
        Point { x, y }
    }

    /// Returns a point reflected through `center`.
    ///
    /// Used to derive the implicit control point of smooth curves.
    #[inline]
    pub fn reflect(self, center: Point) -> Self {
        center * 2.0 - self
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Point {
        Point::from_xy(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Point {
        Point::from_xy(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, factor: f32) -> Point {
        Point::from_xy(self.x * factor, self.y * factor)
    }
}

/// An axis-aligned rectangle.
///
/// Unlike most rect types, a zero size is allowed.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Default, Debug)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Creates a new `Rect`.
    #[inline]
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}
