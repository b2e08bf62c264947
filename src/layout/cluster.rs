//! Radial cluster layout over a flat root + leaves hierarchy.

use std::collections::HashMap;

use super::curve::Point;
use super::radial_line::Polar;
use super::types::{Entity, NodeOrder};

/// Which side of its dot a leaf label sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAnchor {
	/// Right half of the ring: label reads outward from the dot.
	Start,
	/// Left half: label is flipped to stay upright.
	End,
}

/// An entity with its position on the ring.
#[derive(Clone, Debug, PartialEq)]
pub struct LaidOutNode {
	/// The entity as filtered and weighted.
	pub entity: Entity,
	/// Angle and radius on the ring.
	pub position: Polar,
}

impl LaidOutNode {
	/// Entity name.
	pub fn name(&self) -> &str {
		&self.entity.name
	}

	/// Degrees clockwise from twelve o'clock.
	pub fn angle(&self) -> f64 {
		self.position.angle
	}

	/// Distance from the centre.
	pub fn radius(&self) -> f64 {
		self.position.radius
	}

	/// Centre-origin position on the canvas.
	pub fn cartesian(&self) -> Point {
		self.position.to_cartesian()
	}

	/// Which way the label extends from the leaf.
	pub fn label_anchor(&self) -> LabelAnchor {
		if self.position.angle < 180.0 {
			LabelAnchor::Start
		} else {
			LabelAnchor::End
		}
	}
}

/// Leaves sorted around a ring, all children of one synthetic root at the centre.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RadialLayout {
	leaves: Vec<LaidOutNode>,
	by_name: HashMap<String, usize>,
	root: Polar,
}

impl RadialLayout {
	/// Sorts `entities` by `order` and spaces them evenly around a ring of
	/// `ring_radius`, the first leaf at 0 degrees.
	pub fn compute(entities: &[Entity], order: NodeOrder, ring_radius: f64) -> Self {
		let mut sorted = entities.to_vec();
		sorted.sort_by(|a, b| order.compare(a, b));

		let n = sorted.len();
		let step = if n == 0 { 0.0 } else { 360.0 / n as f64 };
		let leaves: Vec<LaidOutNode> = sorted
			.into_iter()
			.enumerate()
			.map(|(i, entity)| LaidOutNode {
				entity,
				position: Polar::new(i as f64 * step, ring_radius),
			})
			.collect();

		let by_name = leaves
			.iter()
			.enumerate()
			.map(|(i, leaf)| (leaf.entity.name.clone(), i))
			.collect();

		let mean_angle = if n == 0 {
			0.0
		} else {
			leaves.iter().map(LaidOutNode::angle).sum::<f64>() / n as f64
		};

		Self {
			leaves,
			by_name,
			root: Polar::new(mean_angle, 0.0),
		}
	}

	/// Leaves in ring order.
	pub fn leaves(&self) -> &[LaidOutNode] {
		&self.leaves
	}

	/// Looks up a leaf by entity name.
	pub fn leaf(&self, name: &str) -> Option<&LaidOutNode> {
		self.by_name.get(name).map(|&i| &self.leaves[i])
	}

	/// The synthetic root every leaf hangs from.
	pub fn root(&self) -> Polar {
		self.root
	}

	/// Number of leaves.
	pub fn len(&self) -> usize {
		self.leaves.len()
	}

	/// Whether the ring has no leaves.
	pub fn is_empty(&self) -> bool {
		self.leaves.is_empty()
	}

	/// Tree path between two leaves: `[a, root, b]`, or just `[a]` from a leaf
	/// to itself. `None` if either name is not a leaf.
	pub fn tree_path(&self, a: &str, b: &str) -> Option<Vec<Polar>> {
		let from = self.leaf(a)?.position;
		let to = self.leaf(b)?.position;
		if a == b {
			return Some(vec![from]);
		}
		Some(vec![from, self.root, to])
	}

	/// A copy whose leaves sit part-way between `previous` positions (by name)
	/// and this layout's, for animated re-layout. Angles turn the short way
	/// round and stay in `[0, 360)`. Leaves new to this layout stay in place.
	pub fn tween(&self, previous: &HashMap<String, Polar>, t: f64) -> RadialLayout {
		let mut tweened = self.clone();
		for leaf in &mut tweened.leaves {
			if let Some(from) = previous.get(&leaf.entity.name) {
				let turn = (leaf.position.angle - from.angle + 180.0).rem_euclid(360.0) - 180.0;
				leaf.position = Polar::new(
					(from.angle + turn * t).rem_euclid(360.0),
					from.radius + (leaf.position.radius - from.radius) * t,
				);
			}
		}
		tweened
	}

	/// Name to position snapshot, the input `tween` expects.
	pub fn positions(&self) -> HashMap<String, Polar> {
		self.leaves
			.iter()
			.map(|leaf| (leaf.entity.name.clone(), leaf.position))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn entity(name: &str, weight: f64) -> Entity {
		Entity {
			name: name.into(),
			weight,
			color: None,
		}
	}

	fn names(layout: &RadialLayout) -> Vec<&str> {
		layout.leaves().iter().map(LaidOutNode::name).collect()
	}

	#[test]
	fn spaces_leaves_evenly_in_sorted_order() {
		let entities = [entity("Luke", 3.0), entity("Han", 5.0), entity("Leia", 3.0), entity("Ben", 1.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 100.0);
		assert_eq!(names(&layout), ["Ben", "Han", "Leia", "Luke"]);
		let angles: Vec<f64> = layout.leaves().iter().map(LaidOutNode::angle).collect();
		assert_eq!(angles, [0.0, 90.0, 180.0, 270.0]);
		assert!(layout.leaves().iter().all(|l| l.radius() == 100.0));
		assert_eq!(layout.root().radius, 0.0);
	}

	#[test]
	fn occurrences_order_drives_angles() {
		let entities = [entity("Leia", 3.0), entity("Han", 5.0), entity("Luke", 3.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Occurrences, 50.0);
		assert_eq!(names(&layout), ["Han", "Leia", "Luke"]);
		assert_eq!(layout.leaf("Leia").map(LaidOutNode::angle), Some(120.0));
	}

	#[test]
	fn layout_is_deterministic() {
		let entities = [entity("C", 1.0), entity("A", 1.0), entity("B", 2.0)];
		let first = RadialLayout::compute(&entities, NodeOrder::Occurrences, 80.0);
		let second = RadialLayout::compute(&entities, NodeOrder::Occurrences, 80.0);
		assert_eq!(first, second);
	}

	#[test]
	fn single_and_empty_layouts() {
		let single = RadialLayout::compute(&[entity("Yoda", 1.0)], NodeOrder::Alphabetical, 10.0);
		assert_eq!(single.len(), 1);
		assert_eq!(single.leaves()[0].angle(), 0.0);

		let empty = RadialLayout::compute(&[], NodeOrder::Alphabetical, 10.0);
		assert!(empty.is_empty());
		assert!(empty.tree_path("Yoda", "Yoda").is_none());
	}

	#[test]
	fn tree_path_runs_through_root() {
		let entities = [entity("A", 1.0), entity("B", 1.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 10.0);
		let path = layout.tree_path("A", "B").unwrap();
		assert_eq!(path, [Polar::new(0.0, 10.0), layout.root(), Polar::new(180.0, 10.0)]);
		assert_eq!(layout.tree_path("A", "A").unwrap().len(), 1);
		assert!(layout.tree_path("A", "Z").is_none());
	}

	#[test]
	fn labels_flip_on_left_half() {
		let entities = [entity("A", 1.0), entity("B", 1.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 10.0);
		assert_eq!(layout.leaves()[0].label_anchor(), LabelAnchor::Start);
		assert_eq!(layout.leaves()[1].label_anchor(), LabelAnchor::End);
	}

	#[test]
	fn tween_moves_known_leaves_only() {
		let entities = [entity("A", 1.0), entity("B", 1.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 10.0);
		let previous = HashMap::from([("B".to_string(), Polar::new(90.0, 10.0))]);
		let halfway = layout.tween(&previous, 0.5);
		assert_eq!(halfway.leaf("A").unwrap().angle(), 0.0);
		assert_eq!(halfway.leaf("B").unwrap().angle(), 135.0);
	}

	#[test]
	fn tween_turns_the_short_way_round() {
		let entities = [entity("A", 1.0), entity("B", 1.0), entity("C", 1.0), entity("D", 1.0)];
		let layout = RadialLayout::compute(&entities, NodeOrder::Alphabetical, 10.0);
		// A now sits at 0 and B at 90; they used to be at 340 and 30.
		let previous = HashMap::from([
			("A".to_string(), Polar::new(340.0, 10.0)),
			("B".to_string(), Polar::new(30.0, 10.0)),
		]);

		let halfway = layout.tween(&previous, 0.5);
		assert!((halfway.leaf("A").unwrap().angle() - 350.0).abs() < 1e-9);
		assert!((halfway.leaf("B").unwrap().angle() - 60.0).abs() < 1e-9);

		let crossing = layout.tween(&previous, 0.75);
		assert!((crossing.leaf("A").unwrap().angle() - 355.0).abs() < 1e-9);
		let done = layout.tween(&previous, 1.0);
		assert!(done.leaf("A").unwrap().angle().abs() < 1e-9);
	}
}
