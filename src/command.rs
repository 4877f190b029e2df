use std::convert;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A `Point` consists of an absolute x and y coordinate.
#[derive(Debug, PartialEq, Copy, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Mirror `other` through this point.
    pub fn reflect(self, other: Point) -> Self {
        Self::new(self.x * 2.0 - other.x, self.y * 2.0 - other.y)
    }

    /// Offset this point by the given deltas.
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl convert::From<(f64, f64)> for Point {
    fn from(val: (f64, f64)) -> Self {
        Self { x: val.0, y: val.1 }
    }
}

impl convert::From<Point> for lyon_geom::Point<f64> {
    fn from(val: Point) -> Self {
        lyon_geom::point(val.x, val.y)
    }
}

impl convert::From<lyon_geom::Point<f64>> for Point {
    fn from(val: lyon_geom::Point<f64>) -> Self {
        Self { x: val.x, y: val.y }
    }
}

/// A canonical path command. All coordinates are absolute.
///
/// `SmoothCurveTo` and `SmoothQuadratic` keep their shorthand form: the
/// implicit control point is the reflection of the previous curve's last
/// control point through the current point, or the current point itself if
/// there is nothing to reflect. Set
/// [`Options::resolve_shorthand`](crate::Options::resolve_shorthand) to get
/// `CurveTo` and `Quadratic` instead, or resolve a finished path with
/// [`Path::to_explicit`](crate::Path::to_explicit).
#[derive(Debug, PartialEq, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Command {
    MoveTo { to: Point },
    LineTo { to: Point },
    CurveTo { ctrl1: Point, ctrl2: Point, to: Point },
    SmoothCurveTo { ctrl2: Point, to: Point },
    Quadratic { ctrl: Point, to: Point },
    SmoothQuadratic { to: Point },
    ClosePath,
}

impl Command {
    /// The path-data letter of this command.
    pub fn letter(&self) -> char {
        match self {
            Command::MoveTo { .. } => 'M',
            Command::LineTo { .. } => 'L',
            Command::CurveTo { .. } => 'C',
            Command::SmoothCurveTo { .. } => 'S',
            Command::Quadratic { .. } => 'Q',
            Command::SmoothQuadratic { .. } => 'T',
            Command::ClosePath => 'Z',
        }
    }

    /// The explicit end point, if the command carries one.
    ///
    /// `ClosePath` returns `None`; its end point is the subpath start.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Command::MoveTo { to }
            | Command::LineTo { to }
            | Command::CurveTo { to, .. }
            | Command::SmoothCurveTo { to, .. }
            | Command::Quadratic { to, .. }
            | Command::SmoothQuadratic { to } => Some(to),
            Command::ClosePath => None,
        }
    }

    /// Return a copy with every point passed through `f`.
    pub fn map_points<F: Fn(Point) -> Point>(&self, f: F) -> Self {
        match *self {
            Command::MoveTo { to } => Command::MoveTo { to: f(to) },
            Command::LineTo { to } => Command::LineTo { to: f(to) },
            Command::CurveTo { ctrl1, ctrl2, to } => Command::CurveTo {
                ctrl1: f(ctrl1),
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Command::SmoothCurveTo { ctrl2, to } => Command::SmoothCurveTo {
                ctrl2: f(ctrl2),
                to: f(to),
            },
            Command::Quadratic { ctrl, to } => Command::Quadratic {
                ctrl: f(ctrl),
                to: f(to),
            },
            Command::SmoothQuadratic { to } => Command::SmoothQuadratic { to: f(to) },
            Command::ClosePath => Command::ClosePath,
        }
    }

    /// All points carried by this command, control points first.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Command::MoveTo { to } | Command::LineTo { to } | Command::SmoothQuadratic { to } => {
                vec![to]
            }
            Command::CurveTo { ctrl1, ctrl2, to } => vec![ctrl1, ctrl2, to],
            Command::SmoothCurveTo { ctrl2, to } => vec![ctrl2, to],
            Command::Quadratic { ctrl, to } => vec![ctrl, to],
            Command::ClosePath => Vec::new(),
        }
    }
}
