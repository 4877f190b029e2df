//! Split path data into raw command records.
//!
//! Lexing is done by [`svgtypes::PathParser`], which already understands the
//! number grammar, glued arc flags and implicit command repetition. This
//! module turns each lexed segment into a [`Token`] and enforces that the
//! data starts with a moveto.

use log::trace;
use svgtypes::{PathParser, PathSegment};

use crate::error::Error;

/// The largest number of arguments a single command group takes (`A`).
pub const MAX_ARITY: usize = 7;

/// A path-data command letter, independent of its relativity.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Letter {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    EllipticalArc,
    ClosePath,
}

impl Letter {
    /// Number of arguments in one group of this command.
    pub fn arity(self) -> usize {
        match self {
            Letter::MoveTo | Letter::LineTo | Letter::SmoothQuadratic => 2,
            Letter::HorizontalLineTo | Letter::VerticalLineTo => 1,
            Letter::CurveTo => 6,
            Letter::SmoothCurveTo | Letter::Quadratic => 4,
            Letter::EllipticalArc => 7,
            Letter::ClosePath => 0,
        }
    }

    /// The path-data letter, lowercase for the relative form.
    pub fn to_char(self, relative: bool) -> char {
        let c = match self {
            Letter::MoveTo => 'M',
            Letter::LineTo => 'L',
            Letter::HorizontalLineTo => 'H',
            Letter::VerticalLineTo => 'V',
            Letter::CurveTo => 'C',
            Letter::SmoothCurveTo => 'S',
            Letter::Quadratic => 'Q',
            Letter::SmoothQuadratic => 'T',
            Letter::EllipticalArc => 'A',
            Letter::ClosePath => 'Z',
        };
        if relative {
            c.to_ascii_lowercase()
        } else {
            c
        }
    }
}

/// One argument group of a path-data command, exactly as written.
///
/// A command letter followed by several argument groups yields one token
/// per group. The extra coordinate pairs after a moveto are tokenized as
/// linetos with the same relativity.
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Token {
    pub letter: Letter,
    pub relative: bool,
    args: [f64; MAX_ARITY],
}

impl Token {
    pub fn new(letter: Letter, relative: bool, values: &[f64]) -> Self {
        debug_assert_eq!(values.len(), letter.arity());
        let mut args = [0.0; MAX_ARITY];
        args[..values.len()].copy_from_slice(values);
        Self {
            letter,
            relative,
            args,
        }
    }

    /// The numeric arguments; arc flags are `0.0` or `1.0`.
    pub fn args(&self) -> &[f64] {
        &self.args[..self.letter.arity()]
    }
}

fn flag(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

impl From<PathSegment> for Token {
    fn from(segment: PathSegment) -> Self {
        match segment {
            PathSegment::MoveTo { abs, x, y } => Token::new(Letter::MoveTo, !abs, &[x, y]),
            PathSegment::LineTo { abs, x, y } => Token::new(Letter::LineTo, !abs, &[x, y]),
            PathSegment::HorizontalLineTo { abs, x } => {
                Token::new(Letter::HorizontalLineTo, !abs, &[x])
            }
            PathSegment::VerticalLineTo { abs, y } => {
                Token::new(Letter::VerticalLineTo, !abs, &[y])
            }
            PathSegment::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => Token::new(Letter::CurveTo, !abs, &[x1, y1, x2, y2, x, y]),
            PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
                Token::new(Letter::SmoothCurveTo, !abs, &[x2, y2, x, y])
            }
            PathSegment::Quadratic { abs, x1, y1, x, y } => {
                Token::new(Letter::Quadratic, !abs, &[x1, y1, x, y])
            }
            PathSegment::SmoothQuadratic { abs, x, y } => {
                Token::new(Letter::SmoothQuadratic, !abs, &[x, y])
            }
            PathSegment::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => Token::new(
                Letter::EllipticalArc,
                !abs,
                &[rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
            ),
            PathSegment::ClosePath { abs } => Token::new(Letter::ClosePath, !abs, &[]),
        }
    }
}

/// Lazy iterator over the tokens of a path-data string.
///
/// Yields at most one error, after which the iterator is exhausted.
pub struct Tokenizer<'a> {
    parser: PathParser<'a>,
    index: usize,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a str) -> Self {
        Self {
            parser: PathParser::from(data),
            index: 0,
            failed: false,
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let index = self.index;
        let result = match self.parser.next()? {
            Ok(segment) => {
                let token = Token::from(segment);
                if index == 0 && token.letter != Letter::MoveTo {
                    Err(Error::MalformedPath(format!(
                        "path data must start with a moveto, found '{}'",
                        token.letter.to_char(token.relative)
                    )))
                } else {
                    trace!(
                        "tokenizer: {} {:?}",
                        token.letter.to_char(token.relative),
                        token.args()
                    );
                    Ok(token)
                }
            }
            Err(e) => Err(Error::MalformedPath(format!(
                "could not parse path segment {}: {}",
                index, e
            ))),
        };
        if result.is_err() {
            self.failed = true;
        }
        self.index += 1;
        Some(result)
    }
}
