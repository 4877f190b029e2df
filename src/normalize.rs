//! Turn tokens into canonical absolute commands.

use log::{debug, trace};

use crate::arc::{self, EllipticalArc};
use crate::command::{Command, Point};
use crate::error::Error;
use crate::path::{Path, PathBuilder, Reflection};
use crate::tokenizer::{Letter, Token};
use crate::Options;

/// Normalization state for a single parse.
///
/// The builder tracks the current point and subpath start, this struct adds
/// the shorthand reflection memory. Commands are built in the shorthand
/// form and resolved on the way out.
pub struct Normalizer<'o> {
    options: &'o Options,
    builder: PathBuilder,
    reflection: Reflection,
}

impl<'o> Normalizer<'o> {
    pub fn new(options: &'o Options) -> Self {
        Self {
            options,
            builder: PathBuilder::new(),
            reflection: Reflection::default(),
        }
    }

    pub fn current_point(&self) -> Point {
        self.builder.current_point()
    }

    /// Normalize one token and append the resulting commands.
    pub fn push(&mut self, token: &Token) -> Result<(), Error> {
        let current = self.current_point();
        let args = token.args();
        let base = if token.relative {
            current
        } else {
            Point::default()
        };
        let at = |i: usize| base.offset(args[i], args[i + 1]);

        match token.letter {
            Letter::MoveTo => self.emit(Command::MoveTo { to: at(0) }),
            Letter::LineTo => self.emit(Command::LineTo { to: at(0) }),
            Letter::HorizontalLineTo => self.emit(Command::LineTo {
                to: Point::new(base.x + args[0], current.y),
            }),
            Letter::VerticalLineTo => self.emit(Command::LineTo {
                to: Point::new(current.x, base.y + args[0]),
            }),
            Letter::CurveTo => self.emit(Command::CurveTo {
                ctrl1: at(0),
                ctrl2: at(2),
                to: at(4),
            }),
            Letter::SmoothCurveTo => self.emit(Command::SmoothCurveTo {
                ctrl2: at(0),
                to: at(2),
            }),
            Letter::Quadratic => self.emit(Command::Quadratic {
                ctrl: at(0),
                to: at(2),
            }),
            Letter::SmoothQuadratic => self.emit(Command::SmoothQuadratic { to: at(0) }),
            Letter::EllipticalArc => {
                let arc = EllipticalArc {
                    from: current,
                    to: at(5),
                    rx: args[0],
                    ry: args[1],
                    x_axis_rotation: args[2],
                    large_arc: args[3] != 0.0,
                    sweep: args[4] != 0.0,
                };
                trace!("normalize: EllipticalArc {:?}", arc);
                // A zero-length arc yields nothing and leaves the memory alone
                for command in arc::to_quadratics(&arc, self.options.arc_subdivision)? {
                    self.emit(command);
                }
            }
            Letter::ClosePath => self.emit(Command::ClosePath),
        }
        Ok(())
    }

    fn emit(&mut self, command: Command) {
        trace!("normalize: {:?}", command);
        let explicit = self.reflection.resolve(self.current_point(), command);
        self.builder.push(if self.options.resolve_shorthand {
            explicit
        } else {
            command
        });
    }

    pub fn finish(self) -> Path {
        self.builder.finish()
    }
}

/// Normalize a token stream. The first error aborts normalization.
pub fn normalize<I>(tokens: I, options: &Options) -> Result<Path, Error>
where
    I: IntoIterator<Item = Result<Token, Error>>,
{
    options.validate()?;
    let mut normalizer = Normalizer::new(options);
    for token in tokens {
        normalizer.push(&token?)?;
    }
    let path = normalizer.finish();
    debug!("normalize: {} commands", path.len());
    Ok(path)
}
