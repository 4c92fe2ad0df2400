//! Points, needles, and the field they are dropped on
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::impl_display;
use crate::result::ConfigError;

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    fn from(pt: Point) -> Self {
        (pt.x, pt.y)
    }
}

/// A line segment, `start` to `end`.
///
/// Needles are immutable once dropped.
///
/// # Example
///
/// ```
/// use buffon::geom::Needle;
/// use std::f64::consts::FRAC_PI_2;
///
/// // A unit needle pointing straight up from (3, 0.5)
/// let needle = Needle::from_polar((3.0, 0.5).into(), 1.0, FRAC_PI_2);
///
/// assert!((needle.end().y - 1.5).abs() < 1E-12);
/// assert!((needle.end().x - 3.0).abs() < 1E-12);
/// assert_eq!(needle.y_extent(), (0.5, needle.end().y));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Needle {
    start: Point,
    end: Point,
}

impl Needle {
    /// Create a needle from its two endpoints
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Needle { start, end }
    }

    /// Create a needle of `length` anchored at `origin` and pointing along
    /// `angle` (radians, counter-clockwise from the x axis)
    #[inline]
    pub fn from_polar(origin: Point, length: f64, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Needle {
            start: origin,
            end: Point {
                x: length.mul_add(cos, origin.x),
                y: length.mul_add(sin, origin.y),
            },
        }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// The endpoints as `[(x1, y1), (x2, y2)]`, the shape most plotting
    /// libraries take line segments in
    #[inline]
    pub fn segment(&self) -> [(f64, f64); 2] {
        [self.start.into(), self.end.into()]
    }

    /// The lowest and highest y coordinate touched by the needle
    #[inline]
    pub fn y_extent(&self) -> (f64, f64) {
        if self.start.y <= self.end.y {
            (self.start.y, self.end.y)
        } else {
            (self.end.y, self.start.y)
        }
    }

    /// Euclidean length of the needle
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

impl From<&Needle> for String {
    fn from(needle: &Needle) -> String {
        format!(
            "Needle(({}, {}) -> ({}, {}))",
            needle.start.x, needle.start.y, needle.end.x, needle.end.y
        )
    }
}

impl_display!(Needle);

/// The rectangle needle origins are drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
#[cfg_attr(feature = "serde1", serde(try_from = "FieldBounds"))]
pub struct Field {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Field {
    /// Create a new field spanning `[x_min, x_max) × [y_min, y_max)`
    pub fn new(
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    ) -> Result<Self, ConfigError> {
        check_axis('x', x_min, x_max)?;
        check_axis('y', y_min, y_max)?;
        Ok(Field::new_unchecked(x_min, x_max, y_min, y_max))
    }

    /// Creates a new Field without checking whether the bounds are valid.
    #[inline]
    pub fn new_unchecked(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Field {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[inline]
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    #[inline]
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    #[inline]
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    #[inline]
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// `(x_min, x_max, y_min, y_max)`
    #[inline]
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// Returns `true` if `pt` lies in the half-open rectangle
    pub fn contains(&self, pt: &Point) -> bool {
        (self.x_min..self.x_max).contains(&pt.x)
            && (self.y_min..self.y_max).contains(&pt.y)
    }
}

impl Default for Field {
    /// The 10-by-10 square anchored at the origin
    fn default() -> Self {
        Field::new_unchecked(0.0, 10.0, 0.0, 10.0)
    }
}

impl TryFrom<(f64, f64, f64, f64)> for Field {
    type Error = ConfigError;

    fn try_from(
        (x_min, x_max, y_min, y_max): (f64, f64, f64, f64),
    ) -> Result<Self, Self::Error> {
        Field::new(x_min, x_max, y_min, y_max)
    }
}

#[cfg(feature = "serde1")]
#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
struct FieldBounds {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

#[cfg(feature = "serde1")]
impl TryFrom<FieldBounds> for Field {
    type Error = ConfigError;

    fn try_from(b: FieldBounds) -> Result<Self, Self::Error> {
        Field::new(b.x_min, b.x_max, b.y_min, b.y_max)
    }
}

fn check_axis(axis: char, min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() {
        Err(ConfigError::BoundNotFinite { axis, bound: min })
    } else if !max.is_finite() {
        Err(ConfigError::BoundNotFinite { axis, bound: max })
    } else if min >= max {
        Err(ConfigError::InvalidInterval { axis, min, max })
    } else {
        Ok(())
    }
}
