//! Path accumulation and recursive bisection into equal pieces.

use std::fmt;

use super::config::MAX_BUNDLING_SEGMENTS;
use super::curve::{BezierCurve, Line, Point, Segment};

/// Drawing-context operations a path generator emits.
pub trait PathContext {
	/// Starts a new subpath at `(x, y)`.
	fn move_to(&mut self, x: f64, y: f64);
	/// Straight segment from the current point.
	fn line_to(&mut self, x: f64, y: f64);
	/// Cubic segment from the current point through two controls.
	fn bezier_curve_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64);
}

/// An ordered run of line and curve segments.
///
/// `move_to` restarts the path, so one builder traces exactly one edge.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
	segments: Vec<Segment>,
	cursor: Point,
}

impl Path {
	/// An empty path at the origin.
	pub fn new() -> Self {
		Self::default()
	}

	/// Segments in drawing order.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Number of segments.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Whether nothing has been drawn.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	fn from_segments(segments: Vec<Segment>) -> Self {
		let cursor = segments.last().map(Segment::end).unwrap_or_default();
		Self { segments, cursor }
	}

	/// Bisects the path into two halves of equal segment count.
	///
	/// With an odd count the middle segment is itself split so that each half
	/// keeps one side of it.
	pub fn bisect(&self) -> (Path, Path) {
		let n = self.segments.len();
		let (i, j) = (n / 2, n.div_ceil(2));
		let mut head = self.segments[..i].to_vec();
		let mut tail = Vec::with_capacity(n - j + 1);
		if i != j {
			let (left, right) = self.segments[i].split();
			head.push(left);
			tail.push(right);
		}
		tail.extend_from_slice(&self.segments[j..]);
		(Path::from_segments(head), Path::from_segments(tail))
	}

	/// Splits the path into `2^k` contiguous pieces, left to right.
	///
	/// `k` is clamped to `1..=MAX_BUNDLING_SEGMENTS`, so `k = 0` behaves like
	/// `k = 1`.
	pub fn split(&self, k: u32) -> Vec<Path> {
		let k = k.clamp(1, MAX_BUNDLING_SEGMENTS);
		let mut pieces = Vec::with_capacity(1 << k);
		self.split_into(k, &mut pieces);
		pieces
	}

	fn split_into(&self, k: u32, pieces: &mut Vec<Path>) {
		let (head, tail) = self.bisect();
		if k > 1 {
			head.split_into(k - 1, pieces);
			tail.split_into(k - 1, pieces);
		} else {
			pieces.push(head);
			pieces.push(tail);
		}
	}

	/// Interpolates towards `other`; `None` unless both paths have the same shape.
	pub fn lerp(&self, other: &Path, t: f64) -> Option<Path> {
		if self.segments.len() != other.segments.len() {
			return None;
		}
		let segments = self
			.segments
			.iter()
			.zip(&other.segments)
			.map(|(p, q)| p.lerp(q, t))
			.collect::<Option<Vec<_>>>()?;
		Some(Path::from_segments(segments))
	}
}

impl PathContext for Path {
	fn move_to(&mut self, x: f64, y: f64) {
		self.segments.clear();
		self.cursor = Point::new(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		let to = Point::new(x, y);
		self.segments.push(Segment::Line(Line::new(self.cursor, to)));
		self.cursor = to;
	}

	fn bezier_curve_to(&mut self, cx1: f64, cy1: f64, cx2: f64, cy2: f64, x: f64, y: f64) {
		let to = Point::new(x, y);
		self.segments.push(Segment::Bezier(BezierCurve::new(
			self.cursor,
			Point::new(cx1, cy1),
			Point::new(cx2, cy2),
			to,
		)));
		self.cursor = to;
	}
}

impl fmt::Display for Path {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for segment in &self.segments {
			write!(f, "{segment}")?;
		}
		Ok(())
	}
}
