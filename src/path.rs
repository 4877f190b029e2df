use std::slice;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::{Command, Point};

/// A normalized path: absolute canonical commands plus the pen position
/// after the last one.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    pub(crate) commands: Vec<Command>,
    pub(crate) current_point: Point,
    pub(crate) subpath_start: Point,
}

impl Path {
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// The current point after the last command.
    pub fn current_point(&self) -> Point {
        self.current_point
    }

    /// The start point of the last subpath.
    pub fn subpath_start(&self) -> Point {
        self.subpath_start
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Command> {
        self.commands.iter()
    }

    /// A copy with every `SmoothCurveTo` and `SmoothQuadratic` replaced by
    /// `CurveTo` and `Quadratic` carrying the reflected control point.
    pub fn to_explicit(&self) -> Path {
        let mut builder = PathBuilder::new();
        let mut reflection = Reflection::default();
        for &command in &self.commands {
            let explicit = reflection.resolve(builder.current_point(), command);
            builder.push(explicit);
        }
        builder.finish()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Command;
    type IntoIter = slice::Iter<'a, Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl IntoIterator for Path {
    type Item = Command;
    type IntoIter = std::vec::IntoIter<Command>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl From<Vec<Command>> for Path {
    fn from(commands: Vec<Command>) -> Self {
        let mut builder = PathBuilder::new();
        builder.extend(commands);
        builder.finish()
    }
}

/// Control points remembered for shorthand curves.
///
/// Holding a point means the previous curve of that family can be
/// reflected. Moveto and lineto commands forget both, a curve of one family
/// forgets the other, and closepath keeps them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct Reflection {
    cubic: Option<Point>,
    quadratic: Option<Point>,
}

impl Reflection {
    /// Implicit first control point of a smooth cubic starting at `current`.
    fn cubic_ctrl(&self, current: Point) -> Point {
        self.cubic.map_or(current, |ctrl| current.reflect(ctrl))
    }

    /// Implicit control point of a smooth quadratic starting at `current`.
    fn quadratic_ctrl(&self, current: Point) -> Point {
        self.quadratic.map_or(current, |ctrl| current.reflect(ctrl))
    }

    /// Follow `command`, drawn from `current`, and return it with any
    /// implicit control point made explicit.
    pub(crate) fn resolve(&mut self, current: Point, command: Command) -> Command {
        match command {
            Command::MoveTo { .. } | Command::LineTo { .. } => {
                *self = Self::default();
                command
            }
            Command::CurveTo { ctrl2, .. } => {
                self.cubic = Some(ctrl2);
                self.quadratic = None;
                command
            }
            Command::SmoothCurveTo { ctrl2, to } => {
                let ctrl1 = self.cubic_ctrl(current);
                self.cubic = Some(ctrl2);
                self.quadratic = None;
                Command::CurveTo { ctrl1, ctrl2, to }
            }
            Command::Quadratic { ctrl, .. } => {
                self.quadratic = Some(ctrl);
                self.cubic = None;
                command
            }
            Command::SmoothQuadratic { to } => {
                let ctrl = self.quadratic_ctrl(current);
                self.quadratic = Some(ctrl);
                self.cubic = None;
                Command::Quadratic { ctrl, to }
            }
            Command::ClosePath => command,
        }
    }
}

/// Accumulates canonical commands in order and keeps track of the pen.
///
/// Commands are stored as given; the builder only follows them to know
/// the current point and the subpath start.
#[derive(Debug, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_point(&self) -> Point {
        self.path.current_point
    }

    pub fn subpath_start(&self) -> Point {
        self.path.subpath_start
    }

    pub fn push(&mut self, command: Command) {
        match command {
            Command::MoveTo { to } => {
                self.path.current_point = to;
                self.path.subpath_start = to;
            }
            Command::ClosePath => {
                self.path.current_point = self.path.subpath_start;
            }
            Command::LineTo { to }
            | Command::CurveTo { to, .. }
            | Command::SmoothCurveTo { to, .. }
            | Command::Quadratic { to, .. }
            | Command::SmoothQuadratic { to } => {
                self.path.current_point = to;
            }
        }
        self.path.commands.push(command);
    }

    pub fn finish(self) -> Path {
        self.path
    }
}

impl Extend<Command> for PathBuilder {
    fn extend<I: IntoIterator<Item = Command>>(&mut self, iter: I) {
        for command in iter {
            self.push(command);
        }
    }
}
