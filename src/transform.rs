//! Bounding box and affine helpers for normalized paths.
//!
//! All scaling on [`Path`] happens about the origin. [`ViewBox`] maps a
//! user-space rectangle onto target dimensions.

use crate::command::{Command, Point};
use crate::error::Error;
use crate::path::Path;

/// Axis-aligned box around every point of a path, control points included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

fn ratio(target: f64, extent: f64) -> Option<f64> {
    if extent > 0.0 {
        Some(target / extent)
    } else {
        None
    }
}

/// A rectangle in user coordinates, like the SVG `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Width and height must be positive and finite.
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Result<Self, Error> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !(min_x.is_finite() && min_y.is_finite() && valid(width) && valid(height)) {
            return Err(Error::InvalidConfig(format!(
                "invalid view box ({}, {}, {}, {})",
                min_x, min_y, width, height
            )));
        }
        Ok(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Map a point of this box into a `width` x `height` area at the origin.
    pub fn map_point(&self, p: Point, width: f64, height: f64) -> Point {
        Point::new(
            (p.x - self.min_x) * width / self.width,
            (p.y - self.min_y) * height / self.height,
        )
    }

    pub fn map_command(&self, command: &Command, width: f64, height: f64) -> Command {
        command.map_points(|p| self.map_point(p, width, height))
    }

    /// Return a mapped copy of `path`.
    pub fn map_path(&self, path: &Path, width: f64, height: f64) -> Path {
        let mut mapped = path.clone();
        self.map_path_mut(&mut mapped, width, height);
        mapped
    }

    pub fn map_path_mut(&self, path: &mut Path, width: f64, height: f64) {
        path.map_points(|p| self.map_point(p, width, height));
    }

    /// Lazily map the commands of `path`.
    pub fn map_iter<'a>(
        &'a self,
        path: &'a Path,
        width: f64,
        height: f64,
    ) -> impl Iterator<Item = Command> + 'a {
        path.iter()
            .map(move |command| self.map_command(command, width, height))
    }
}

impl Path {
    fn map_points<F: Fn(Point) -> Point>(&mut self, f: F) {
        for command in self.commands.iter_mut() {
            *command = command.map_points(&f);
        }
        self.current_point = f(self.current_point);
        self.subpath_start = f(self.subpath_start);
    }

    /// Returns `None` for a path without points.
    ///
    /// Implicit control points of `S` and `T` are included.
    pub fn bounds(&self) -> Option<Bounds> {
        self.to_explicit()
            .commands
            .iter()
            .flat_map(|command| command.points())
            .fold(None, |bounds, p| {
                Some(match bounds {
                    None => Bounds { min: p, max: p },
                    Some(Bounds { min, max }) => Bounds {
                        min: Point::new(min.x.min(p.x), min.y.min(p.y)),
                        max: Point::new(max.x.max(p.x), max.y.max(p.y)),
                    },
                })
            })
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.map_points(|p| p.offset(dx, dy));
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.map_points(|p| Point::new(p.x * sx, p.y * sy));
    }

    /// Scale each axis so the bounds are `width` x `height`.
    ///
    /// An axis with a zero extent is left as is.
    pub fn resize(&mut self, width: f64, height: f64) {
        if let Some(bounds) = self.bounds() {
            let sx = ratio(width, bounds.width()).unwrap_or(1.0);
            let sy = ratio(height, bounds.height()).unwrap_or(1.0);
            self.scale(sx, sy);
        }
    }

    /// Scale uniformly so the bounds fit inside `width` x `height`.
    pub fn fit(&mut self, width: f64, height: f64) {
        if let Some(factor) = self.uniform_factor(width, height, f64::min) {
            self.scale(factor, factor);
        }
    }

    /// Scale uniformly so the bounds cover `width` x `height`.
    pub fn cover(&mut self, width: f64, height: f64) {
        if let Some(factor) = self.uniform_factor(width, height, f64::max) {
            self.scale(factor, factor);
        }
    }

    /// Combine the per-axis factors, ignoring axes with a zero extent.
    fn uniform_factor(&self, width: f64, height: f64, pick: fn(f64, f64) -> f64) -> Option<f64> {
        let bounds = self.bounds()?;
        match (
            ratio(width, bounds.width()),
            ratio(height, bounds.height()),
        ) {
            (Some(x), Some(y)) => Some(pick(x, y)),
            (Some(factor), None) | (None, Some(factor)) => Some(factor),
            (None, None) => None,
        }
    }
}
