//! Normalize SVG path data (the `d` attribute of a `<path>` element) into a
//! reduced, absolute command set: `M`, `L`, `C`, `S`, `Q`, `T` and `Z`.
//!
//! Relative commands are resolved against the current point, `H` and `V`
//! become `L`, and elliptical arcs (`A`) are approximated with quadratic
//! Bézier curves. The arc subdivision is configurable, either as a fixed
//! number of curves per arc or as a maximum deviation from the true
//! ellipse.
//!
//! ```
//! use svgpath_normalize::{parse, Command};
//!
//! let path = parse("m 10,10 h 5 v 5 z").unwrap();
//! assert_eq!(path.commands()[1], Command::LineTo { to: (15.0, 10.0).into() });
//! ```
//!
//! You can optionally get serde 1 support by enabling the `serde` feature.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

use log::trace;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod arc;
mod command;
mod error;
pub mod normalize;
mod path;
pub mod tokenizer;
mod transform;

pub use crate::arc::ArcSubdivision;
pub use crate::command::{Command, Point};
pub use crate::error::Error;
pub use crate::path::{Path, PathBuilder};
pub use crate::tokenizer::Tokenizer;
pub use crate::transform::{Bounds, ViewBox};

/// Parse options.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Options {
    /// How arcs are split into quadratic curves.
    pub arc_subdivision: ArcSubdivision,
    /// Emit `C` and `Q` with the reflected control point instead of the
    /// shorthand `S` and `T`.
    pub resolve_shorthand: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split every arc into `steps` curves.
    pub fn arc_steps(mut self, steps: u32) -> Self {
        self.arc_subdivision = ArcSubdivision::Steps(steps);
        self
    }

    /// Split arcs so the curves stay within `tolerance` of the ellipse.
    pub fn arc_tolerance(mut self, tolerance: f64) -> Self {
        self.arc_subdivision = ArcSubdivision::Tolerance(tolerance);
        self
    }

    /// Emit `C` and `Q` in place of `S` and `T`.
    pub fn resolve_shorthand(mut self, resolve: bool) -> Self {
        self.resolve_shorthand = resolve;
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.arc_subdivision.validate()
    }
}

/// Parse path data into a normalized [`Path`] using default options.
pub fn parse(path_data: &str) -> Result<Path, Error> {
    parse_with_options(path_data, &Options::default())
}

/// Parse path data into a normalized [`Path`].
///
/// Either the whole path is returned or the first error; there is no
/// partial result.
pub fn parse_with_options(path_data: &str, options: &Options) -> Result<Path, Error> {
    trace!("parse_with_options: {:?}", options);
    normalize::normalize(Tokenizer::new(path_data), options)
}

#[cfg(test)]
#[allow(clippy::unreadable_literal)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn assert_paths_close(a: &Path, b: &Path) {
        assert_eq!(a.len(), b.len(), "{:?} vs {:?}", a, b);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.letter(), y.letter());
            for (px, py) in x.points().into_iter().zip(y.points()) {
                assert!(px.distance_to(py) < 1e-9, "{:?} vs {:?}", x, y);
            }
        }
    }

    #[test]
    fn test_parse_simple_absolute() {
        let _ = env_logger::try_init();
        let path = parse("M 113,35 H 40 L -39,49 H 40").unwrap();
        assert_eq!(
            path.commands(),
            &[
                Command::MoveTo { to: p(113.0, 35.0) },
                Command::LineTo { to: p(40.0, 35.0) },
                Command::LineTo { to: p(-39.0, 49.0) },
                Command::LineTo { to: p(40.0, 49.0) },
            ]
        );
    }

    #[test]
    fn test_implicit_lineto_after_moveto() {
        let _ = env_logger::try_init();
        let path = parse("M 10,100 40,70 h 10 m -20,40 10,-20").unwrap();
        assert_eq!(
            path.commands(),
            &[
                Command::MoveTo { to: p(10.0, 100.0) },
                Command::LineTo { to: p(40.0, 70.0) },
                Command::LineTo { to: p(50.0, 70.0) },
                Command::MoveTo { to: p(30.0, 110.0) },
                Command::LineTo { to: p(40.0, 90.0) },
            ]
        );
        assert_eq!(path.subpath_start(), p(30.0, 110.0));
    }

    #[test]
    fn test_relative_moveto_after_close() {
        let path = parse("M 10,10 20,15 10,20 Z m 0,40 H 0").unwrap();
        assert_eq!(path.commands()[3], Command::ClosePath);
        assert_eq!(path.commands()[4], Command::MoveTo { to: p(10.0, 50.0) });
        assert_eq!(path.commands()[5], Command::LineTo { to: p(0.0, 50.0) });
    }

    #[test]
    fn test_canonical_is_unchanged() {
        let data = "M1.5,2 L3,4 C5,6 7,8 9,10 Q11,12 13,14 Z M-1,-2 L-3,-4";
        let once = parse(data).unwrap();
        let expected = vec![
            Command::MoveTo { to: p(1.5, 2.0) },
            Command::LineTo { to: p(3.0, 4.0) },
            Command::CurveTo {
                ctrl1: p(5.0, 6.0),
                ctrl2: p(7.0, 8.0),
                to: p(9.0, 10.0),
            },
            Command::Quadratic {
                ctrl: p(11.0, 12.0),
                to: p(13.0, 14.0),
            },
            Command::ClosePath,
            Command::MoveTo { to: p(-1.0, -2.0) },
            Command::LineTo { to: p(-3.0, -4.0) },
        ];
        assert_eq!(once.commands(), &expected[..]);
        assert_eq!(Path::from(once.clone().into_commands()), once);
    }

    #[test]
    fn test_relative_absolute_equivalence() {
        let _ = env_logger::try_init();
        let absolute = "M 10 20 C 10 20 11 17 12 15 S 2 7 10 20 Q 15 25 20 20 T 30 20 \
                        L 35 25 H 40 V 30 A 5 5 0 0 1 50 30 Z";
        let relative = "m 10 20 c 0 0 1 -3 2 -5 s -10 -8 -2 5 q 5 5 10 0 t 10 0 \
                        l 5 5 h 5 v 5 a 5 5 0 0 1 10 0 z";
        let options = Options::new().resolve_shorthand(true);
        let a = parse_with_options(absolute, &options).unwrap();
        let b = parse_with_options(relative, &options).unwrap();
        assert_paths_close(&a, &b);

        let a = parse(absolute).unwrap();
        let b = parse(relative).unwrap();
        assert_paths_close(&a, &b);
    }

    #[test]
    fn test_smooth_reflection() {
        let path = parse("M0,0 C10,0 10,10 20,10 S30,20 30,30").unwrap();
        assert_eq!(
            path.commands()[2],
            Command::SmoothCurveTo {
                ctrl2: p(30.0, 20.0),
                to: p(30.0, 30.0),
            }
        );

        let options = Options::new().resolve_shorthand(true);
        let path = parse_with_options("M0,0 C10,0 10,10 20,10 S30,20 30,30", &options).unwrap();
        assert_eq!(
            path.commands()[2],
            Command::CurveTo {
                ctrl1: p(30.0, 10.0),
                ctrl2: p(30.0, 20.0),
                to: p(30.0, 30.0),
            }
        );
    }

    #[test]
    fn test_degenerate_arc_is_line() {
        let path = parse("M0,0 A0,5 0 0,0 10,10").unwrap();
        assert_eq!(
            path.commands(),
            &[
                Command::MoveTo { to: p(0.0, 0.0) },
                Command::LineTo { to: p(10.0, 10.0) },
            ]
        );
    }

    #[test]
    fn test_zero_length_arc() {
        let path = parse("M3,3 A5,5 0 0,0 3,3 L4,4").unwrap();
        assert_eq!(
            path.commands(),
            &[
                Command::MoveTo { to: p(3.0, 3.0) },
                Command::LineTo { to: p(4.0, 4.0) },
            ]
        );
    }

    #[test]
    fn test_closepath_then_line() {
        let path = parse("M5,5 L10,5 L10,10 Z L5,5").unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path.commands()[3], Command::ClosePath);
        assert_eq!(path.commands()[4], Command::LineTo { to: p(5.0, 5.0) });
        assert_eq!(path.current_point(), p(5.0, 5.0));
    }

    #[test]
    fn test_arc_commands() {
        let _ = env_logger::try_init();
        let path = parse_with_options("M10,0 a10,10 0 1,1 -20,0", &Options::new().arc_steps(4)).unwrap();
        assert_eq!(path.len(), 5);
        assert!(path.iter().skip(1).all(|c| c.letter() == 'Q'));
        assert_eq!(path.current_point(), p(-10.0, 0.0));
        assert_eq!(path.commands()[4].end_point(), Some(p(-10.0, 0.0)));
    }

    #[test]
    fn test_arc_tolerance_option() {
        let data = "M0,0 A50,30 20 1,0 80,10";
        let coarse = parse_with_options(data, &Options::new().arc_tolerance(1.0)).unwrap();
        let fine = parse_with_options(data, &Options::new().arc_tolerance(0.001)).unwrap();
        assert!(fine.len() > coarse.len());
        assert_eq!(fine.current_point(), p(80.0, 10.0));
        assert_eq!(coarse.current_point(), p(80.0, 10.0));
    }

    #[test]
    fn test_output_is_canonical() {
        let path = parse("m1 1 h2 v2 l-1 1 c1 1 2 2 3 3 s1 1 2 2 q1 1 2 2 t1 1 a3 4 10 0 1 5 5 z").unwrap();
        assert!(path.iter().all(|c| "MLCSQTZ".contains(c.letter())));
        assert_eq!(path.commands()[0].letter(), 'M');
    }

    #[test]
    fn test_malformed_input() {
        let _ = env_logger::try_init();
        assert!(matches!(parse("M1,1 X2,2"), Err(Error::MalformedPath(_))));
        assert!(matches!(parse("M1,1 L2"), Err(Error::MalformedPath(_))));
        assert!(matches!(parse("L1,1"), Err(Error::MalformedPath(_))));
    }

    #[test]
    fn test_invalid_options() {
        assert!(matches!(
            parse_with_options("M0,0", &Options::new().arc_steps(0)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_with_options("M0,0", &Options::new().arc_steps(2000)),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_with_options("M0,0", &Options::new().arc_tolerance(-1.0)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_huge_arc_radius() {
        let path = parse_with_options("M0,0 A1e200,1e200 0 0,1 10,0", &Options::new().arc_steps(2)).unwrap();
        assert_eq!(path.len(), 3);
        for command in &path {
            assert!(command.points().iter().all(|p| p.y.abs() < 1e-9 && p.x.abs() <= 10.0));
        }
    }

    #[test]
    fn test_empty() {
        let path = parse("").unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = parse("M1,1 X2,2").unwrap_err();
        assert!(err.to_string().starts_with("Malformed path data: "));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let path = parse("M1,2 L3,4 T5,6 Z").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let path2: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, path2);

        let options = Options::new().arc_tolerance(0.5);
        let json = serde_json::to_string(&options).unwrap();
        let options2: Options = serde_json::from_str(&json).unwrap();
        assert_eq!(options, options2);
    }
}
