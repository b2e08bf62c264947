//! Radial line generator with bundle-style B-spline interpolation.

use super::curve::Point;
use super::path::PathContext;

/// Default bundling strength.
pub const DEFAULT_TENSION: f64 = 0.85;

/// A position around the diagram centre: degrees clockwise from twelve
/// o'clock and distance from the centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar {
	/// Degrees clockwise from twelve o'clock.
	pub angle: f64,
	/// Distance from the centre.
	pub radius: f64,
}

impl Polar {
	/// Position at `angle` degrees and `radius` pixels.
	pub const fn new(angle: f64, radius: f64) -> Self {
		Self { angle, radius }
	}

	/// Centre-origin Cartesian coordinates with y growing downwards.
	pub fn to_cartesian(self) -> Point {
		let a = self.angle.to_radians();
		Point::new(self.radius * a.sin(), -self.radius * a.cos())
	}
}

/// Feeds a polar point sequence through a bundled cubic B-spline.
#[derive(Clone, Copy, Debug)]
pub struct RadialLine {
	/// Bundle strength; 1 follows the tree, 0 draws the chord.
	pub beta: f64,
}

impl Default for RadialLine {
	fn default() -> Self {
		Self {
			beta: DEFAULT_TENSION,
		}
	}
}

impl RadialLine {
	/// A generator bundling with strength `beta`.
	pub fn new(beta: f64) -> Self {
		Self { beta }
	}

	/// Traces polar points into `ctx`. Fewer than two points draw nothing.
	pub fn interpolate_tree_path<C: PathContext>(&self, points: &[Polar], ctx: &mut C) {
		let cartesian: Vec<Point> = points.iter().map(|p| p.to_cartesian()).collect();
		let straightened = self.straighten(&cartesian);
		if straightened.is_empty() {
			return;
		}
		let mut basis = Basis::new(ctx);
		for p in straightened {
			basis.point(p);
		}
		basis.finish();
	}

	/// Pulls each point towards the chord between the first and last.
	fn straighten(&self, points: &[Point]) -> Vec<Point> {
		let j = points.len().saturating_sub(1);
		if j == 0 {
			return Vec::new();
		}
		let (first, last) = (points[0], points[j]);
		points
			.iter()
			.enumerate()
			.map(|(i, p)| {
				let chord = first.lerp(last, i as f64 / j as f64);
				Point::new(
					self.beta * p.x + (1.0 - self.beta) * chord.x,
					self.beta * p.y + (1.0 - self.beta) * chord.y,
				)
			})
			.collect()
	}
}

/// Uniform cubic B-spline emitter.
struct Basis<'a, C: PathContext> {
	ctx: &'a mut C,
	count: usize,
	p0: Point,
	p1: Point,
}

impl<'a, C: PathContext> Basis<'a, C> {
	fn new(ctx: &'a mut C) -> Self {
		Self {
			ctx,
			count: 0,
			p0: Point::default(),
			p1: Point::default(),
		}
	}

	fn curve(&mut self, p: Point) {
		let (p0, p1) = (self.p0, self.p1);
		self.ctx.bezier_curve_to(
			(2.0 * p0.x + p1.x) / 3.0,
			(2.0 * p0.y + p1.y) / 3.0,
			(p0.x + 2.0 * p1.x) / 3.0,
			(p0.y + 2.0 * p1.y) / 3.0,
			(p0.x + 4.0 * p1.x + p.x) / 6.0,
			(p0.y + 4.0 * p1.y + p.y) / 6.0,
		);
	}

	fn point(&mut self, p: Point) {
		match self.count {
			0 => {
				self.count = 1;
				self.ctx.move_to(p.x, p.y);
			}
			1 => self.count = 2,
			2 => {
				self.count = 3;
				let (p0, p1) = (self.p0, self.p1);
				self.ctx
					.line_to((5.0 * p0.x + p1.x) / 6.0, (5.0 * p0.y + p1.y) / 6.0);
				self.curve(p);
			}
			_ => self.curve(p),
		}
		self.p0 = self.p1;
		self.p1 = p;
	}

	fn finish(mut self) {
		match self.count {
			3 => {
				let p1 = self.p1;
				self.curve(p1);
				self.ctx.line_to(p1.x, p1.y);
			}
			2 => self.ctx.line_to(self.p1.x, self.p1.y),
			_ => {}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::curve::Segment;
	use crate::layout::path::Path;

	fn close(p: Point, q: Point) -> bool {
		p.distance(q) < 1e-9
	}

	#[test]
	fn polar_zero_points_up() {
		assert!(close(Polar::new(0.0, 10.0).to_cartesian(), Point::new(0.0, -10.0)));
		assert!(close(Polar::new(90.0, 10.0).to_cartesian(), Point::new(10.0, 0.0)));
		assert!(close(Polar::new(180.0, 10.0).to_cartesian(), Point::new(0.0, 10.0)));
	}

	#[test]
	fn three_point_tree_path_emits_line_curve_curve_line() {
		let mut path = Path::new();
		RadialLine::default().interpolate_tree_path(
			&[Polar::new(0.0, 100.0), Polar::new(0.0, 0.0), Polar::new(90.0, 100.0)],
			&mut path,
		);
		let kinds: Vec<&str> = path
			.segments()
			.iter()
			.map(|s| match s {
				Segment::Line(_) => "L",
				Segment::Bezier(_) => "C",
			})
			.collect();
		assert_eq!(kinds, ["L", "C", "C", "L"]);
		let segments = path.segments();
		assert!(close(segments[0].start(), Point::new(0.0, -100.0)));
		assert!(close(segments[3].end(), Point::new(100.0, 0.0)));
		for pair in segments.windows(2) {
			assert_eq!(pair[0].end(), pair[1].start());
		}
	}

	#[test]
	fn full_tension_passes_near_root() {
		let mut bundled = Path::new();
		RadialLine::new(1.0).interpolate_tree_path(
			&[Polar::new(0.0, 100.0), Polar::new(0.0, 0.0), Polar::new(180.0, 100.0)],
			&mut bundled,
		);
		// Opposite leaves through the root: the spline stays on the y axis.
		assert!(bundled
			.segments()
			.iter()
			.all(|s| s.start().x.abs() < 1e-9 && s.end().x.abs() < 1e-9));
	}

	#[test]
	fn zero_tension_is_a_straight_chord() {
		let mut path = Path::new();
		RadialLine::new(0.0).interpolate_tree_path(
			&[Polar::new(0.0, 100.0), Polar::new(0.0, 0.0), Polar::new(90.0, 100.0)],
			&mut path,
		);
		let (from, to) = (Point::new(0.0, -100.0), Point::new(100.0, 0.0));
		for segment in path.segments() {
			for t in [0.0, 0.25, 0.5, 0.75, 1.0] {
				let p = segment.point_at(t);
				// On the line x - y = 100.
				assert!((p.x - p.y - (to.x - to.y)).abs() < 1e-9);
				assert!(p.x >= from.x - 1e-9 && p.x <= to.x + 1e-9);
			}
		}
	}

	#[test]
	fn single_point_draws_nothing() {
		let mut path = Path::new();
		RadialLine::default().interpolate_tree_path(&[Polar::new(45.0, 100.0)], &mut path);
		assert!(path.is_empty());
	}

	#[test]
	fn two_points_draw_a_line() {
		let mut path = Path::new();
		RadialLine::default().interpolate_tree_path(&[Polar::new(0.0, 10.0), Polar::new(180.0, 10.0)], &mut path);
		assert_eq!(path.len(), 1);
		assert!(matches!(path.segments()[0], Segment::Line(_)));
	}
}
