//! Approximate SVG elliptical arcs with quadratic Bézier curves.
//!
//! The arc is converted from its endpoint parameterization to a center
//! parameterization (SVG 1.1 implementation notes, F.6.5 and F.6.6), split
//! into sub-arcs of equal sweep, and each sub-arc is replaced by the
//! quadratic curve whose control point is the intersection of the ellipse
//! tangents at both ends of the sub-arc.

use std::f64::consts::{FRAC_PI_2, PI};

use log::trace;
use lyon_geom::{vector, Angle, Rotation, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::command::{Command, Point};
use crate::error::Error;

/// Upper bound for the number of curves a single arc is split into.
pub const MAX_SEGMENTS: u32 = 1024;

/// No sub-arc sweeps more than this, whatever the subdivision policy.
const MAX_SEGMENT_SWEEP: f64 = FRAC_PI_2;

const DEFAULT_STEPS: u32 = 8;

/// How finely arcs are subdivided.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ArcSubdivision {
    /// Split every arc into this many curves, from 1 to [`MAX_SEGMENTS`].
    /// Arcs sweeping more than a quarter turn per curve get more.
    Steps(u32),
    /// Use as few curves as needed to stay within this distance of the
    /// true ellipse.
    Tolerance(f64),
}

impl Default for ArcSubdivision {
    fn default() -> Self {
        ArcSubdivision::Steps(DEFAULT_STEPS)
    }
}

impl ArcSubdivision {
    pub fn validate(&self) -> Result<(), Error> {
        match *self {
            ArcSubdivision::Steps(0) => Err(Error::InvalidConfig(
                "arc step count must be at least 1".into(),
            )),
            ArcSubdivision::Steps(steps) if steps > MAX_SEGMENTS => {
                Err(Error::InvalidConfig(format!(
                    "arc step count must be at most {}, got {}",
                    MAX_SEGMENTS, steps
                )))
            }
            ArcSubdivision::Steps(_) => Ok(()),
            ArcSubdivision::Tolerance(tolerance) if tolerance.is_finite() && tolerance > 0.0 => {
                Ok(())
            }
            ArcSubdivision::Tolerance(tolerance) => Err(Error::InvalidConfig(format!(
                "arc tolerance must be a positive number, got {}",
                tolerance
            ))),
        }
    }

    /// Number of curves used for an arc with the given sweep (radians) on an
    /// ellipse whose larger radius is `max_radius`.
    ///
    /// The result is at least 1, large enough that no sub-arc sweeps more
    /// than a quarter turn, and at most [`MAX_SEGMENTS`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn segment_count(&self, sweep_angle: f64, max_radius: f64) -> Result<u32, Error> {
        self.validate()?;
        let sweep = sweep_angle.abs();
        // Slack so a sweep that is a rounding error above a whole number of
        // quarter turns does not need another curve.
        let min = (sweep / MAX_SEGMENT_SWEEP - 1e-9).ceil().max(1.0);
        let wanted = match *self {
            ArcSubdivision::Steps(steps) => f64::from(steps),
            ArcSubdivision::Tolerance(tolerance) => {
                // A circular sub-arc of half-sweep h and radius r deviates from
                // its tangent quadratic by r * (1 - cos h)^2 / (2 cos h), at
                // the curve's midpoint. Solve for the largest admissible h.
                let k = tolerance / max_radius;
                let cos_h = (1.0 + k) - (k * (k + 2.0)).sqrt();
                let half_sweep = cos_h.min(1.0).acos();
                (sweep / (2.0 * half_sweep)).ceil()
            }
        };
        Ok(wanted.max(min).min(f64::from(MAX_SEGMENTS)) as u32)
    }
}

/// Largest distance between a sub-arc of the given sweep and its quadratic
/// approximation, for an ellipse whose larger radius is `max_radius`.
pub fn deviation_bound(segment_sweep: f64, max_radius: f64) -> f64 {
    let cos_h = (segment_sweep.abs() / 2.0).cos();
    max_radius * (1.0 - cos_h) * (1.0 - cos_h) / (2.0 * cos_h)
}

/// An arc in endpoint parameterization, as written in path data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub from: Point,
    pub to: Point,
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
}

/// An arc in center parameterization.
///
/// Points along the arc are computed as offsets from `start`, which keeps
/// them accurate when the radii dwarf the chord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterArc {
    pub center: Point,
    /// The arc's start point.
    pub start: Point,
    /// Radii after out-of-range correction.
    pub rx: f64,
    pub ry: f64,
    /// Rotation of the ellipse's x axis, in degrees.
    pub x_axis_rotation: f64,
    /// Angles in radians, measured on the unrotated, unscaled ellipse.
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl EllipticalArc {
    fn validate(&self) -> Result<(), Error> {
        if !self.rx.is_finite() || !self.ry.is_finite() {
            return Err(Error::InvalidArc(format!(
                "radii must be finite, got ({}, {})",
                self.rx, self.ry
            )));
        }
        if !self.x_axis_rotation.is_finite() {
            return Err(Error::InvalidArc(format!(
                "x-axis rotation must be finite, got {}",
                self.x_axis_rotation
            )));
        }
        Ok(())
    }

    /// Whether the arc is drawn as a straight line (a zero radius).
    pub fn is_straight_line(&self) -> bool {
        self.rx == 0.0 || self.ry == 0.0
    }

    /// Compute the center parameterization.
    ///
    /// Returns `None` for arcs without an ellipse: zero length, a zero
    /// radius, or a chord too short to register against the radii.
    pub fn center_arc(&self) -> Result<Option<CenterArc>, Error> {
        self.validate()?;
        if self.from == self.to || self.is_straight_line() {
            return Ok(None);
        }

        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        let phi = Angle::degrees(self.x_axis_rotation);
        let from: lyon_geom::Point<f64> = self.from.into();
        let to: lyon_geom::Point<f64> = self.to.into();

        // Half chord in the ellipse's own frame, then on the unit circle.
        // Radii are never squared so huge values stay finite.
        let p = Rotation::new(-phi).transform_vector((from - to) / 2.0);
        let mut q = vector(p.x / rx, p.y / ry);
        let mut len = q.x.hypot(q.y);
        if len == 0.0 {
            trace!("arc: chord vanishes against radii ({}, {})", rx, ry);
            return Ok(None);
        }

        // Scale up radii that cannot span the chord
        if len > 1.0 {
            rx *= len;
            ry *= len;
            q /= len;
            len = 1.0;
            trace!("arc: radii scaled up to ({}, {})", rx, ry);
        }

        // Unit-circle center offset is `s` along the chord normal
        let n = q / len;
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let s = sign * ((1.0 - len) * (1.0 + len)).sqrt();
        let c = vector(rx * s * n.y, -ry * s * n.x);

        let center = from.lerp(to, 0.5) + Rotation::new(phi).transform_vector(c);

        // Start and end on the unit circle are q + s * m and -q + s * m with
        // m the normal of n; their cross product is 2 s len and their dot
        // product 1 - 2 len^2.
        let u: Vector<f64> = vector(q.x - s * n.y, q.y + s * n.x);
        let start_angle = u.y.atan2(u.x);
        let mut sweep_angle = (2.0 * s * len).atan2(1.0 - 2.0 * len * len);
        if self.sweep && sweep_angle < 0.0 {
            sweep_angle += 2.0 * PI;
        } else if !self.sweep && sweep_angle > 0.0 {
            sweep_angle -= 2.0 * PI;
        }

        Ok(Some(CenterArc {
            center: center.into(),
            start: self.from,
            rx,
            ry,
            x_axis_rotation: self.x_axis_rotation,
            start_angle,
            sweep_angle,
        }))
    }
}

impl CenterArc {
    /// Point on the ellipse `delta` radians past the start angle, pushed
    /// out from the center by a factor of `1 + stretch`.
    fn point_after(&self, delta: f64, stretch: f64) -> Point {
        // cos b - cos a = -2 sin((a + b) / 2) sin((b - a) / 2), likewise for sin
        let half = delta / 2.0;
        let mid = self.start_angle + half;
        let chord = 2.0 * half.sin();
        let angle = self.start_angle + delta;
        let local = vector(
            self.rx * (-mid.sin() * chord + stretch * angle.cos()),
            self.ry * (mid.cos() * chord + stretch * angle.sin()),
        );
        let offset = Rotation::new(Angle::degrees(self.x_axis_rotation)).transform_vector(local);
        self.start.offset(offset.x, offset.y)
    }

    /// Point on the ellipse `delta` radians past the start angle.
    pub fn point_at(&self, delta: f64) -> Point {
        self.point_after(delta, 0.0)
    }

    /// Sample the arc at `t` in `0..=1`.
    pub fn sample(&self, t: f64) -> Point {
        self.point_at(self.sweep_angle * t)
    }

    /// Intersection of the tangents at `d1` and `d2` radians past the start
    /// angle.
    ///
    /// On the unit circle it lies on the bisecting ray at distance
    /// `1 / cos(half sweep)`; the ellipse is an affine image of the circle
    /// and affine maps preserve tangency.
    pub fn control_point(&self, d1: f64, d2: f64) -> Point {
        let half_sweep = (d2 - d1) / 2.0;
        // 1 / cos h - 1, without cancellation for small h
        let stretch = 2.0 * (half_sweep / 2.0).sin().powi(2) / half_sweep.cos();
        self.point_after(d1 + half_sweep, stretch)
    }
}

/// Convert an arc into absolute commands, starting at `arc.from`.
///
/// A zero-length arc yields no commands and an arc without an ellipse (a
/// zero radius) yields a single `LineTo`. Otherwise the result is a non-empty list of
/// `Quadratic` commands whose last end point is exactly `arc.to`.
pub fn to_quadratics(
    arc: &EllipticalArc,
    subdivision: ArcSubdivision,
) -> Result<Vec<Command>, Error> {
    subdivision.validate()?;
    let center = match arc.center_arc()? {
        Some(center) => center,
        None if arc.from == arc.to => {
            trace!("arc: zero length, skipped");
            return Ok(Vec::new());
        }
        None => {
            trace!("arc: no ellipse, emitting line");
            return Ok(vec![Command::LineTo { to: arc.to }]);
        }
    };

    let n = subdivision.segment_count(center.sweep_angle, center.rx.max(center.ry))?;
    let step = center.sweep_angle / f64::from(n);
    trace!(
        "arc: center {:?}, start {}, sweep {}, {} segments",
        center.center,
        center.start_angle,
        center.sweep_angle,
        n
    );

    let mut commands = Vec::with_capacity(n as usize);
    for i in 0..n {
        let d1 = step * f64::from(i);
        let d2 = step * f64::from(i + 1);
        let to = if i + 1 == n {
            arc.to
        } else {
            center.point_at(d2)
        };
        commands.push(Command::Quadratic {
            ctrl: center.control_point(d1, d2),
            to,
        });
    }
    Ok(commands)
}
