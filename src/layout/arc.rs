//! Arc diagram: entities stacked on a vertical axis, links drawn as
//! semicircles to the right of it.

use std::collections::HashMap;

use log::debug;

use super::config::LayoutConfig;
use super::curve::Point;
use super::dataset::Dataset;
use super::edges::{EdgeKey, aggregate_links, apply_degree_weights};
use super::types::{Color, Entity, WeightMode};
use crate::error::LayoutResult;

/// Canvas width the arc diagram is laid out for.
pub const ARC_WIDTH: f64 = 600.0;
/// Nominal vertical spacing between entities before the 1.5 stretch.
pub const ARC_STEP: f64 = 12.0;
/// Space above the first entity.
pub const ARC_MARGIN_TOP: f64 = 20.0;
/// Space below the last entity.
pub const ARC_MARGIN_BOTTOM: f64 = 20.0;
/// X of the entity axis. Labels are right-aligned against it.
pub const ARC_AXIS_X: f64 = 130.0;

/// An entity with its position on the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcNode {
	/// The laid-out entity.
	pub entity: Entity,
	/// Distance from the top of the canvas.
	pub y: f64,
}

impl ArcNode {
	/// Entity name.
	pub fn name(&self) -> &str {
		&self.entity.name
	}
}

/// A deduplicated link between two entities on the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcLink {
	/// Endpoint names, lower first.
	pub key: EdgeKey,
	/// Summed weight of every raw link between the pair.
	pub weight: f64,
	/// Set when both endpoints share one category colour.
	pub color: Option<Color>,
}

/// The right half of a circle whose diameter lies on the axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Semicircle {
	/// Midpoint of the two endpoints.
	pub center: Point,
	/// Half the distance between the endpoints.
	pub radius: f64,
}

impl Semicircle {
	/// Semicircle joining two axis positions.
	pub fn between(y1: f64, y2: f64) -> Self {
		Self {
			center: Point::new(ARC_AXIS_X, (y1 + y2) / 2.0),
			radius: (y2 - y1).abs() / 2.0,
		}
	}

	/// Distance from `p` to the drawn arc.
	pub fn distance(&self, p: Point) -> f64 {
		if p.x >= self.center.x {
			return (p.distance(self.center) - self.radius).abs();
		}
		let top = Point::new(self.center.x, self.center.y - self.radius);
		let bottom = Point::new(self.center.x, self.center.y + self.radius);
		p.distance(top).min(p.distance(bottom))
	}
}

/// Canvas height for `n` entities; grows with the entity count.
pub fn arc_height(n: usize) -> f64 {
	(n.saturating_sub(1) as f64 * ARC_STEP + ARC_MARGIN_TOP + ARC_MARGIN_BOTTOM) * 1.5
}

/// Evenly spaced positions over `[start, end]`; a single position sits in
/// the middle.
fn point_scale(n: usize, start: f64, end: f64) -> impl Iterator<Item = f64> {
	let (first, step) = match n {
		0 | 1 => ((start + end) / 2.0, 0.0),
		_ => (start, (end - start) / (n - 1) as f64),
	};
	(0..n).map(move |i| first + i as f64 * step)
}

/// Entities ordered down the axis and the links between them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcDiagram {
	nodes: Vec<ArcNode>,
	links: Vec<ArcLink>,
	by_name: HashMap<String, usize>,
	height: f64,
}

impl ArcDiagram {
	/// Filters, deduplicates and orders `dataset` the same way [`Diagram`]
	/// does. Bundling settings in `config` do not apply here.
	///
	/// [`Diagram`]: super::Diagram
	pub fn build(dataset: &Dataset, config: &LayoutConfig) -> LayoutResult<Self> {
		config.validate()?;

		let network = dataset.filter(config.letter_range)?;
		let aggregated = aggregate_links(&network);
		let mut entities = network.entities;
		if config.weight_mode == WeightMode::Degree {
			apply_degree_weights(&mut entities, &aggregated);
		}
		entities.sort_by(|a, b| config.order.compare(a, b));

		let height = arc_height(entities.len());
		let ys = point_scale(entities.len(), ARC_MARGIN_TOP, height - ARC_MARGIN_BOTTOM);
		let nodes: Vec<ArcNode> = entities
			.into_iter()
			.zip(ys)
			.map(|(entity, y)| ArcNode { entity, y })
			.collect();
		let by_name: HashMap<String, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, node)| (node.entity.name.clone(), i))
			.collect();

		let color_of = |name: &str| {
			by_name
				.get(name)
				.and_then(|&i| nodes[i].entity.color.as_ref())
		};
		let links: Vec<ArcLink> = aggregated
			.into_iter()
			.map(|(key, weight)| {
				let color = match (color_of(key.low()), color_of(key.high())) {
					(Some(a), Some(b)) if a == b => Some(a.clone()),
					_ => None,
				};
				ArcLink { key, weight, color }
			})
			.collect();

		debug!(
			"arc diagram: {} nodes, {} links ({} ordering)",
			nodes.len(),
			links.len(),
			config.order.label()
		);

		Ok(Self {
			nodes,
			links,
			by_name,
			height,
		})
	}

	/// Entities top to bottom.
	pub fn nodes(&self) -> &[ArcNode] {
		&self.nodes
	}

	/// Links in order of first appearance in the dataset.
	pub fn links(&self) -> &[ArcLink] {
		&self.links
	}

	/// Looks up an entity by name.
	pub fn node(&self, name: &str) -> Option<&ArcNode> {
		self.by_name.get(name).map(|&i| &self.nodes[i])
	}

	/// Canvas height the layout was computed for.
	pub fn height(&self) -> f64 {
		self.height
	}

	/// Whether no entity survived filtering.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Whether `a` and `b` share a link.
	pub fn linked(&self, a: &str, b: &str) -> bool {
		self.links.iter().any(|link| link.key == EdgeKey::new(a, b))
	}

	/// Name to axis position snapshot.
	pub fn positions(&self) -> HashMap<String, f64> {
		self.nodes
			.iter()
			.map(|node| (node.entity.name.clone(), node.y))
			.collect()
	}

	/// Positions part-way from `previous` to this layout, `elapsed` seconds
	/// into a reorder. Entities start moving one after another, `stagger`
	/// apart in their previous top-to-bottom order, and each takes
	/// `duration`; `ease` shapes each entity's progress. Entities without a
	/// previous position sit at their new one.
	pub fn tween(
		&self,
		previous: &HashMap<String, f64>,
		elapsed: f64,
		duration: f64,
		stagger: f64,
		ease: impl Fn(f64) -> f64,
	) -> HashMap<String, f64> {
		let mut moving: Vec<(&ArcNode, f64)> = self
			.nodes
			.iter()
			.filter_map(|node| previous.get(node.name()).map(|&from| (node, from)))
			.collect();
		moving.sort_by(|a, b| a.1.total_cmp(&b.1));

		let mut ys = self.positions();
		for (rank, (node, from)) in moving.into_iter().enumerate() {
			let t = if duration > 0.0 {
				((elapsed - rank as f64 * stagger) / duration).clamp(0.0, 1.0)
			} else {
				1.0
			};
			ys.insert(node.entity.name.clone(), from + (node.y - from) * ease(t));
		}
		ys
	}

	/// Arc for `link` given the current axis positions.
	pub fn semicircle(&self, link: &ArcLink, ys: &HashMap<String, f64>) -> Option<Semicircle> {
		let y1 = ys.get(link.key.low())?;
		let y2 = ys.get(link.key.high())?;
		Some(Semicircle::between(*y1, *y2))
	}

	/// Entity whose label row contains `p`: the band left of the axis, one
	/// step tall around the entity.
	pub fn node_at(&self, ys: &HashMap<String, f64>, p: Point) -> Option<&ArcNode> {
		if p.x < 0.0 || p.x > ARC_AXIS_X + 2.0 {
			return None;
		}
		self.nodes
			.iter()
			.filter_map(|node| ys.get(node.name()).map(|y| (node, (p.y - y).abs())))
			.filter(|(_, dy)| *dy <= ARC_STEP / 2.0)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(node, _)| node)
	}

	/// Nearest link within `tolerance` of `p`. Self-loops have no arc.
	pub fn link_at(&self, ys: &HashMap<String, f64>, p: Point, tolerance: f64) -> Option<&ArcLink> {
		self.links
			.iter()
			.filter(|link| !link.key.is_loop())
			.filter_map(|link| {
				self.semicircle(link, ys)
					.map(|arc| (link, arc.distance(p)))
			})
			.filter(|(_, d)| *d < tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(link, _)| link)
	}
}
