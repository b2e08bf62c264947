//! Line and cubic Bezier segments with midpoint subdivision.

use std::fmt;

/// A point on the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate, growing downwards.
	pub y: f64,
}

impl Point {
	/// Point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Halfway between `self` and `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Linear blend, `self` at `t = 0` and `other` at `t = 1`.
	pub fn lerp(self, other: Point, t: f64) -> Point {
		Point::new(
			self.x + (other.x - self.x) * t,
			self.y + (other.y - self.y) * t,
		)
	}

	/// Euclidean distance.
	pub fn distance(self, other: Point) -> f64 {
		(self.x - other.x).hypot(self.y - other.y)
	}
}

impl fmt::Display for Point {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{},{}", self.x, self.y)
	}
}

/// A straight segment from `a` to `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
	/// Start point.
	pub a: Point,
	/// End point.
	pub b: Point,
}

impl Line {
	/// Line from `a` to `b`.
	pub const fn new(a: Point, b: Point) -> Self {
		Self { a, b }
	}

	/// Halves the line at its exact midpoint.
	pub fn split(&self) -> (Line, Line) {
		let m = self.a.midpoint(self.b);
		(Line::new(self.a, m), Line::new(m, self.b))
	}

	/// Point at parameter `t` in `[0, 1]`.
	pub fn point_at(&self, t: f64) -> Point {
		self.a.lerp(self.b, t)
	}
}

impl fmt::Display for Line {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "M{}L{}", self.a, self.b)
	}
}

// De Casteljau weights for a split at t = 0.5, in eighths.
const L1: [f64; 4] = [4.0 / 8.0, 4.0 / 8.0, 0.0 / 8.0, 0.0 / 8.0];
const L2: [f64; 4] = [2.0 / 8.0, 4.0 / 8.0, 2.0 / 8.0, 0.0 / 8.0];
const MID: [f64; 4] = [1.0 / 8.0, 3.0 / 8.0, 3.0 / 8.0, 1.0 / 8.0];
const R1: [f64; 4] = [0.0 / 8.0, 2.0 / 8.0, 4.0 / 8.0, 2.0 / 8.0];
const R2: [f64; 4] = [0.0 / 8.0, 0.0 / 8.0, 4.0 / 8.0, 4.0 / 8.0];

/// A cubic Bezier with anchors `a`, `d` and controls `b`, `c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierCurve {
	/// Start point.
	pub a: Point,
	/// First control point.
	pub b: Point,
	/// Second control point.
	pub c: Point,
	/// End point.
	pub d: Point,
}

impl BezierCurve {
	/// Curve from `a` to `d` with controls `b` and `c`.
	pub const fn new(a: Point, b: Point, c: Point, d: Point) -> Self {
		Self { a, b, c, d }
	}

	fn dot(&self, [ka, kb, kc, kd]: [f64; 4]) -> Point {
		Point::new(
			ka * self.a.x + kb * self.b.x + kc * self.c.x + kd * self.d.x,
			ka * self.a.y + kb * self.b.y + kc * self.c.y + kd * self.d.y,
		)
	}

	/// Subdivides at t = 0.5. The two halves trace the original curve exactly.
	pub fn split(&self) -> (BezierCurve, BezierCurve) {
		let m = self.dot(MID);
		(
			BezierCurve::new(self.a, self.dot(L1), self.dot(L2), m),
			BezierCurve::new(m, self.dot(R1), self.dot(R2), self.d),
		)
	}

	/// Bernstein form at parameter `t`.
	pub fn point_at(&self, t: f64) -> Point {
		let u = 1.0 - t;
		self.dot([u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t])
	}
}

impl fmt::Display for BezierCurve {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "M{}C{},{},{}", self.a, self.b, self.c, self.d)
	}
}

/// One piece of a bundled path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
	/// A straight run.
	Line(Line),
	/// A cubic curve.
	Bezier(BezierCurve),
}

impl Segment {
	/// Halves the segment at its parameter midpoint.
	pub fn split(&self) -> (Segment, Segment) {
		match self {
			Segment::Line(line) => {
				let (a, b) = line.split();
				(Segment::Line(a), Segment::Line(b))
			}
			Segment::Bezier(curve) => {
				let (a, b) = curve.split();
				(Segment::Bezier(a), Segment::Bezier(b))
			}
		}
	}

	/// Where the segment begins.
	pub fn start(&self) -> Point {
		match self {
			Segment::Line(line) => line.a,
			Segment::Bezier(curve) => curve.a,
		}
	}

	/// Where the segment ends.
	pub fn end(&self) -> Point {
		match self {
			Segment::Line(line) => line.b,
			Segment::Bezier(curve) => curve.d,
		}
	}

	/// Point at parameter `t` along whichever segment this is.
	pub fn point_at(&self, t: f64) -> Point {
		match self {
			Segment::Line(line) => line.point_at(t),
			Segment::Bezier(curve) => curve.point_at(t),
		}
	}

	/// Blends two segments of the same kind; `None` if the kinds differ.
	pub fn lerp(&self, other: &Segment, t: f64) -> Option<Segment> {
		match (self, other) {
			(Segment::Line(p), Segment::Line(q)) => {
				Some(Segment::Line(Line::new(p.a.lerp(q.a, t), p.b.lerp(q.b, t))))
			}
			(Segment::Bezier(p), Segment::Bezier(q)) => Some(Segment::Bezier(BezierCurve::new(
				p.a.lerp(q.a, t),
				p.b.lerp(q.b, t),
				p.c.lerp(q.c, t),
				p.d.lerp(q.d, t),
			))),
			_ => None,
		}
	}
}

impl fmt::Display for Segment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Segment::Line(line) => fmt::Display::fmt(line, f),
			Segment::Bezier(curve) => fmt::Display::fmt(curve, f),
		}
	}
}
