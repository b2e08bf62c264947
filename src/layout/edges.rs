//! Undirected edge deduplication, weight aggregation, and bundled paths.

use std::collections::HashMap;
use std::fmt;

use log::warn;

use super::cluster::RadialLayout;
use super::dataset::Network;
use super::path::Path;
use super::radial_line::RadialLine;
use super::types::{Color, Entity};
use crate::error::{LayoutError, LayoutResult};

/// Canonical identity of an undirected edge: its endpoint names in order.
///
/// Compared as a pair, so names containing the `-` used by `Display` cannot
/// collide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
	low: String,
	high: String,
}

impl EdgeKey {
	/// Key for the pair, in either argument order.
	pub fn new(a: &str, b: &str) -> Self {
		let (low, high) = if a <= b { (a, b) } else { (b, a) };
		Self {
			low: low.to_owned(),
			high: high.to_owned(),
		}
	}

	/// Lexicographically smaller endpoint.
	pub fn low(&self) -> &str {
		&self.low
	}

	/// Lexicographically larger endpoint.
	pub fn high(&self) -> &str {
		&self.high
	}

	/// Whether `name` is an endpoint.
	pub fn touches(&self, name: &str) -> bool {
		self.low == name || self.high == name
	}

	/// Whether both endpoints are the same entity.
	pub fn is_loop(&self) -> bool {
		self.low == self.high
	}
}

impl fmt::Display for EdgeKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.low, self.high)
	}
}

/// Rendering treatment of an edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EdgeStyle {
	/// Both endpoints carry a category colour; drawn as one stroke in the
	/// colour of the lexicographically smaller endpoint.
	Custom(Color),
	/// Drawn as layered, blended pieces.
	Default,
}

/// A deduplicated undirected relationship.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// Endpoint names, lower first.
	pub key: EdgeKey,
	/// Summed weight of every raw link between the pair.
	pub weight: f64,
	/// Bundled path from `source` through the root to `target`.
	pub path: Path,
	/// How the edge is stroked.
	pub style: EdgeStyle,
	/// `2^k` sub-paths of `path`; empty for custom edges.
	pub pieces: Vec<Path>,
}

impl Edge {
	/// The lower-named endpoint, where the path starts.
	pub fn source(&self) -> &str {
		self.key.low()
	}

	/// The higher-named endpoint, where the path ends.
	pub fn target(&self) -> &str {
		self.key.high()
	}

	/// Whether both endpoints share a category colour.
	pub fn is_custom(&self) -> bool {
		matches!(self.style, EdgeStyle::Custom(_))
	}

	/// Stroke colour of a custom edge.
	pub fn color(&self) -> Option<&Color> {
		match &self.style {
			EdgeStyle::Custom(color) => Some(color),
			EdgeStyle::Default => None,
		}
	}

	/// SVG path data for the whole edge.
	pub fn path_string(&self) -> String {
		self.path.to_string()
	}

	/// SVG path data per piece.
	pub fn piece_strings(&self) -> Vec<String> {
		self.pieces.iter().map(ToString::to_string).collect()
	}
}

/// Collapses links into unique undirected pairs, summing weights, in order
/// of first appearance.
pub fn aggregate_links(network: &Network) -> Vec<(EdgeKey, f64)> {
	let mut seen: HashMap<EdgeKey, usize> = HashMap::new();
	let mut unique: Vec<(EdgeKey, f64)> = Vec::new();
	for link in &network.links {
		let key = EdgeKey::new(
			&network.entities[link.source].name,
			&network.entities[link.target].name,
		);
		match seen.get(&key) {
			Some(&i) => unique[i].1 += link.weight,
			None => {
				if key.is_loop() {
					warn!("self-loop on {:?} has no drawable path", key.low());
				}
				seen.insert(key.clone(), unique.len());
				unique.push((key, link.weight));
			}
		}
	}
	unique
}

/// Replaces each entity's weight with its number of unique incident edges.
pub fn apply_degree_weights(entities: &mut [Entity], edges: &[(EdgeKey, f64)]) {
	let mut degree: HashMap<&str, usize> = HashMap::new();
	for (key, _) in edges {
		*degree.entry(key.low()).or_default() += 1;
		if !key.is_loop() {
			*degree.entry(key.high()).or_default() += 1;
		}
	}
	for entity in entities.iter_mut() {
		entity.weight = degree.get(entity.name.as_str()).copied().unwrap_or(0) as f64;
	}
}

/// Turns aggregated pairs into bundled, classified edges over a layout.
pub struct EdgeBuilder<'a> {
	layout: &'a RadialLayout,
	line: RadialLine,
	segments: u32,
}

impl<'a> EdgeBuilder<'a> {
	/// Bundles with `tension` and splits default edges `segments` deep.
	pub fn new(layout: &'a RadialLayout, tension: f64, segments: u32) -> Self {
		Self {
			layout,
			line: RadialLine::new(tension),
			segments,
		}
	}

	/// Bundled path from `source` through the root to `target`.
	pub fn bundled_path(&self, source: &str, target: &str) -> LayoutResult<Path> {
		let points = self
			.layout
			.tree_path(source, target)
			.ok_or_else(|| missing(self.layout, source, target))?;
		let mut path = Path::new();
		self.line.interpolate_tree_path(&points, &mut path);
		Ok(path)
	}

	fn style(&self, key: &EdgeKey) -> EdgeStyle {
		let color_of = |name: &str| {
			self.layout
				.leaf(name)
				.and_then(|leaf| leaf.entity.color.clone())
		};
		match (color_of(key.low()), color_of(key.high())) {
			(Some(color), Some(_)) => EdgeStyle::Custom(color),
			_ => EdgeStyle::Default,
		}
	}

	/// Bundles and classifies one aggregated pair.
	pub fn build_edge(&self, key: EdgeKey, weight: f64) -> LayoutResult<Edge> {
		let path = self.bundled_path(key.low(), key.high())?;
		let style = self.style(&key);
		let pieces = match style {
			EdgeStyle::Default => path.split(self.segments),
			EdgeStyle::Custom(_) => Vec::new(),
		};
		Ok(Edge {
			key,
			weight,
			path,
			style,
			pieces,
		})
	}

	/// Builds every pair, stopping at the first failure.
	pub fn build(&self, aggregated: Vec<(EdgeKey, f64)>) -> LayoutResult<Vec<Edge>> {
		aggregated
			.into_iter()
			.map(|(key, weight)| self.build_edge(key, weight))
			.collect()
	}
}

fn missing(layout: &RadialLayout, source: &str, target: &str) -> LayoutError {
	let name = if layout.leaf(source).is_none() {
		source
	} else {
		target
	};
	LayoutError::UnknownNodeName(name.to_owned())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::curve::Segment;
	use crate::layout::dataset::ResolvedLink;
	use crate::layout::types::NodeOrder;

	fn entity(name: &str, color: Option<&str>) -> Entity {
		Entity {
			name: name.into(),
			weight: 1.0,
			color: color.map(Color::new),
		}
	}

	fn link(source: usize, target: usize, weight: f64) -> ResolvedLink {
		ResolvedLink {
			source,
			target,
			weight,
		}
	}

	#[test]
	fn key_orders_names() {
		let key = EdgeKey::new("Luke", "Han");
		assert_eq!(key, EdgeKey::new("Han", "Luke"));
		assert_eq!(key.low(), "Han");
		assert_eq!(key.to_string(), "Han-Luke");
		assert!(key.touches("Luke"));
		assert!(!key.touches("Leia"));
	}

	#[test]
	fn hyphenated_names_do_not_collide() {
		assert_ne!(EdgeKey::new("A-B", "C"), EdgeKey::new("A", "B-C"));
	}

	#[test]
	fn aggregates_both_directions() {
		let network = Network {
			entities: vec![entity("A", None), entity("B", None), entity("C", None)],
			links: vec![link(0, 1, 2.0), link(1, 0, 3.0), link(1, 2, 1.0), link(0, 1, 1.0)],
		};
		let unique = aggregate_links(&network);
		assert_eq!(
			unique,
			[(EdgeKey::new("A", "B"), 6.0), (EdgeKey::new("B", "C"), 1.0)]
		);
	}

	#[test]
	fn degree_counts_unique_edges() {
		let mut entities = vec![entity("A", None), entity("B", None), entity("C", None)];
		let network = Network {
			entities: entities.clone(),
			links: vec![link(0, 1, 2.0), link(1, 0, 3.0), link(1, 2, 1.0)],
		};
		apply_degree_weights(&mut entities, &aggregate_links(&network));
		let weights: Vec<f64> = entities.iter().map(|e| e.weight).collect();
		assert_eq!(weights, [1.0, 2.0, 1.0]);
	}

	#[test]
	fn classifies_by_both_endpoints() {
		let entities = [entity("A", Some("#f00")), entity("B", Some("#00f")), entity("C", None)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 100.0);
		let builder = EdgeBuilder::new(&layout, 0.85, 3);

		let ab = builder.build_edge(EdgeKey::new("B", "A"), 1.0).unwrap();
		assert_eq!(ab.style, EdgeStyle::Custom(Color::new("#f00")));
		assert!(ab.pieces.is_empty());

		let bc = builder.build_edge(EdgeKey::new("B", "C"), 1.0).unwrap();
		assert_eq!(bc.style, EdgeStyle::Default);
		assert_eq!(bc.pieces.len(), 8);
		assert!(!bc.piece_strings().concat().is_empty());
	}

	#[test]
	fn path_runs_from_low_to_high_endpoint() {
		let entities = [entity("A", None), entity("B", None)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 100.0);
		let builder = EdgeBuilder::new(&layout, 0.85, 6);
		let edge = builder.build_edge(EdgeKey::new("B", "A"), 1.0).unwrap();
		let segments = edge.path.segments();
		assert_eq!(segments.len(), 4);
		let start = segments[0].start();
		let end = segments[3].end();
		let a = layout.leaf("A").unwrap().cartesian();
		let b = layout.leaf("B").unwrap().cartesian();
		assert!(start.distance(a) < 1e-9);
		assert!(end.distance(b) < 1e-9);
		assert_eq!(edge.source(), "A");
		assert_eq!(edge.target(), "B");
	}

	#[test]
	fn bundled_pieces_retrace_the_curve() {
		let entities = ["A", "B", "C"].map(|name| entity(name, None));
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 200.0);
		let builder = EdgeBuilder::new(&layout, 0.85, 6);
		let edge = builder.build_edge(EdgeKey::new("A", "C"), 1.0).unwrap();

		// Line, two curves through the root, line: 16 pieces per segment.
		let segments = edge.path.segments();
		assert_eq!(segments.len(), 4);
		assert!(matches!(segments[1], Segment::Bezier(_)));
		assert_eq!(edge.pieces.len(), 64);
		assert!(edge.pieces.iter().all(|piece| piece.len() == 1));

		let rejoined: Vec<Segment> = edge.pieces.iter().flat_map(|p| p.segments().to_vec()).collect();
		for pair in rejoined.windows(2) {
			assert!(pair[0].end().distance(pair[1].start()) < 1e-9);
		}
		for (i, piece) in rejoined.iter().enumerate() {
			let (whole, slot) = (&segments[i / 16], (i % 16) as f64);
			assert_eq!(
				std::mem::discriminant(piece),
				std::mem::discriminant(whole)
			);
			for u in [0.0, 0.25, 0.5, 0.75, 1.0] {
				let expected = whole.point_at((slot + u) / 16.0);
				assert!(
					piece.point_at(u).distance(expected) < 1e-6,
					"piece {i} leaves the curve at u = {u}"
				);
			}
		}
	}

	#[test]
	fn unknown_leaf_is_an_error() {
		let layout = RadialLayout::compute(&[entity("A", None)], NodeOrder::Alphabetical, 1.0);
		let builder = EdgeBuilder::new(&layout, 0.85, 1);
		assert!(matches!(
			builder.bundled_path("A", "Q"),
			Err(LayoutError::UnknownNodeName(name)) if name == "Q"
		));
	}

	#[test]
	fn self_loop_has_empty_pieces() {
		let layout = RadialLayout::compute(&[entity("A", None)], NodeOrder::Alphabetical, 1.0);
		let builder = EdgeBuilder::new(&layout, 0.85, 2);
		let edge = builder.build_edge(EdgeKey::new("A", "A"), 1.0).unwrap();
		assert!(edge.path.is_empty());
		assert_eq!(edge.pieces.len(), 4);
		assert!(edge.pieces.iter().all(Path::is_empty));
	}
}
