use std::collections::{HashMap, HashSet};

use crate::components::tooltip::Tooltip;
use crate::layout::{ArcDiagram, ArcLink, Color, EdgeKey, Point};

pub const REORDER_SECS: f64 = 0.75;
pub const REORDER_STAGGER_SECS: f64 = 0.02;
pub const LINK_HIT_TOLERANCE: f64 = 3.0;
pub const LINK_STROKE: &str = "#aaa";
pub const FADED_LINK: &str = "#ccc";
pub const EMPHASIS: &str = "#242424";
pub const LABEL: &str = "#333";
pub const FADED_LABEL: &str = "#aaa";
pub const UNCOLORED_NODE: &str = "#808080";

/// Cubic ease-in-out, the default pacing of a d3 transition.
fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// What the pointer is over.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Hover {
	#[default]
	None,
	Node(String),
	Link(EdgeKey),
}

/// How a label is drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
	pub color: &'static str,
	pub bold: bool,
}

struct Reorder {
	from: HashMap<String, f64>,
	elapsed: f64,
}

pub struct ArcDiagramState {
	pub diagram: ArcDiagram,
	pub hover: Hover,
	pub brushed: HashSet<String>,
	pub needs_redraw: bool,
	reorder: Option<Reorder>,
}

impl Default for ArcDiagramState {
	fn default() -> Self {
		Self::new()
	}
}

impl ArcDiagramState {
	pub fn new() -> Self {
		Self {
			diagram: ArcDiagram::default(),
			hover: Hover::None,
			brushed: HashSet::new(),
			needs_redraw: true,
			reorder: None,
		}
	}

	/// Swaps in a new layout; entities present before slide to their new rows.
	pub fn set_diagram(&mut self, diagram: ArcDiagram) {
		let from = self.frame_positions();
		self.diagram = diagram;
		self.reorder = (!from.is_empty()).then_some(Reorder { from, elapsed: 0.0 });

		let stale = match &self.hover {
			Hover::None => false,
			Hover::Node(name) => self.diagram.node(name).is_none(),
			Hover::Link(key) => !self.diagram.links().iter().any(|l| &l.key == key),
		};
		if stale {
			self.hover = Hover::None;
		}
		self.needs_redraw = true;
	}

	fn reorder_secs(&self) -> f64 {
		REORDER_SECS + self.diagram.nodes().len() as f64 * REORDER_STAGGER_SECS
	}

	pub fn is_animating(&self) -> bool {
		self.reorder.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		let total = self.reorder_secs();
		if let Some(reorder) = &mut self.reorder {
			reorder.elapsed += dt;
			if reorder.elapsed >= total {
				self.reorder = None;
			}
			self.needs_redraw = true;
		}
	}

	/// Axis positions as drawn this frame.
	pub fn frame_positions(&self) -> HashMap<String, f64> {
		match &self.reorder {
			Some(reorder) => self.diagram.tween(
				&reorder.from,
				reorder.elapsed,
				REORDER_SECS,
				REORDER_STAGGER_SECS,
				ease_cubic_in_out,
			),
			None => self.diagram.positions(),
		}
	}

	pub fn hover_at(&mut self, p: Point) {
		let ys = self.frame_positions();
		let hover = if let Some(node) = self.diagram.node_at(&ys, p) {
			Hover::Node(node.name().to_owned())
		} else if let Some(link) = self.diagram.link_at(&ys, p, LINK_HIT_TOLERANCE) {
			Hover::Link(link.key.clone())
		} else {
			Hover::None
		};
		if hover != self.hover {
			self.hover = hover;
			self.needs_redraw = true;
		}
	}

	pub fn clear_hover(&mut self) {
		if self.hover != Hover::None {
			self.hover = Hover::None;
			self.needs_redraw = true;
		}
	}

	pub fn set_brushed(&mut self, names: HashSet<String>) {
		if self.brushed != names {
			self.brushed = names;
			self.needs_redraw = true;
		}
	}

	/// Stroke colour for `link`, and whether it is drawn above the rest.
	pub fn link_stroke<'a>(&'a self, link: &'a ArcLink) -> (&'a str, bool) {
		let own = link.color.as_ref().map_or(LINK_STROKE, Color::as_str);
		match &self.hover {
			Hover::None => (own, false),
			Hover::Node(name) if link.key.touches(name) => (EMPHASIS, true),
			Hover::Node(_) => (FADED_LINK, false),
			Hover::Link(key) if *key == link.key => (EMPHASIS, true),
			Hover::Link(_) => (own, false),
		}
	}

	/// Hovering a node bolds its label, keeps its neighbours dark and fades
	/// the others.
	pub fn label_style(&self, name: &str) -> LabelStyle {
		match &self.hover {
			Hover::Node(hovered) if hovered == name => LabelStyle {
				color: EMPHASIS,
				bold: true,
			},
			Hover::Node(hovered) if self.diagram.linked(hovered, name) => LabelStyle {
				color: EMPHASIS,
				bold: false,
			},
			Hover::Node(_) => LabelStyle {
				color: FADED_LABEL,
				bold: false,
			},
			_ => LabelStyle {
				color: LABEL,
				bold: false,
			},
		}
	}

	pub fn tooltip(&self) -> Option<Tooltip> {
		match &self.hover {
			Hover::None => None,
			Hover::Node(name) => {
				let node = self.diagram.node(name)?;
				Some(Tooltip {
					title: Some(node.name().to_owned()),
					lines: vec![format!("Number of occurrences: {}", node.entity.weight)],
				})
			}
			Hover::Link(key) => {
				let link = self.diagram.links().iter().find(|l| &l.key == key)?;
				Some(Tooltip {
					title: None,
					lines: vec![
						format!("Source: {}", key.low()),
						format!("Target: {}", key.high()),
						format!("Number of scenes together: {}", link.weight),
					],
				})
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::{ARC_AXIS_X, Dataset, LayoutConfig, NodeOrder};

	const DATA: &str = r##"{
		"nodes": [
			{"name": "Han", "value": 5, "colour": "#f00"},
			{"name": "Leia", "value": 3, "colour": "#f00"},
			{"name": "Luke", "value": 4, "colour": "#00f"},
			{"name": "Wedge", "value": 1}
		],
		"links": [
			{"source": 0, "target": 1, "value": 2},
			{"source": 0, "target": 2, "value": 4}
		]
	}"##;

	fn diagram(order: NodeOrder) -> ArcDiagram {
		let config = LayoutConfig {
			order,
			..LayoutConfig::default()
		};
		ArcDiagram::build(&Dataset::from_json(DATA).unwrap(), &config).unwrap()
	}

	fn ready() -> ArcDiagramState {
		let mut state = ArcDiagramState::new();
		state.set_diagram(diagram(NodeOrder::Alphabetical));
		state
	}

	#[test]
	fn easing_is_symmetric() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert!((ease_cubic_in_out(0.25) + ease_cubic_in_out(0.75) - 1.0).abs() < 1e-12);
	}

	#[test]
	fn first_layout_does_not_animate() {
		let state = ready();
		assert!(!state.is_animating());
		assert_eq!(state.frame_positions(), state.diagram.positions());
	}

	#[test]
	fn reorder_slides_then_settles() {
		let mut state = ready();
		let before = state.frame_positions();
		state.set_diagram(diagram(NodeOrder::Occurrences));
		assert!(state.is_animating());
		assert_eq!(state.frame_positions(), before);

		state.tick(0.4);
		let mid = state.frame_positions();
		assert!(mid["Leia"] > before["Leia"]);
		assert!(mid["Leia"] < state.diagram.node("Leia").unwrap().y);

		state.tick(1.0);
		assert!(!state.is_animating());
		assert_eq!(state.frame_positions(), state.diagram.positions());
	}

	#[test]
	fn hovering_a_label_emphasises_its_links() {
		let mut state = ready();
		let han_y = state.diagram.node("Han").unwrap().y;
		state.hover_at(Point::new(40.0, han_y));
		assert_eq!(state.hover, Hover::Node("Han".into()));

		let links = state.diagram.links().to_vec();
		assert!(links.iter().all(|l| state.link_stroke(l) == (EMPHASIS, true)));
		assert!(state.label_style("Han").bold);
		assert_eq!(state.label_style("Luke").color, EMPHASIS);
		assert_eq!(state.label_style("Wedge").color, FADED_LABEL);

		let tooltip = state.tooltip().unwrap();
		assert_eq!(tooltip.title.as_deref(), Some("Han"));
		assert_eq!(tooltip.lines, ["Number of occurrences: 5"]);
	}

	#[test]
	fn hovering_an_arc_shows_link_details() {
		let mut state = ready();
		let ys = state.diagram.positions();
		let link = state.diagram.links()[1].clone();
		let arc = state.diagram.semicircle(&link, &ys).unwrap();
		state.hover_at(Point::new(ARC_AXIS_X + arc.radius, arc.center.y));
		assert_eq!(state.hover, Hover::Link(EdgeKey::new("Han", "Luke")));

		let other = state.diagram.links()[0].clone();
		assert_eq!(state.link_stroke(&link), (EMPHASIS, true));
		assert_eq!(state.link_stroke(&other), ("#f00", false));
		assert_eq!(
			state.tooltip().unwrap().lines,
			["Source: Han", "Target: Luke", "Number of scenes together: 4"]
		);

		state.clear_hover();
		assert_eq!(state.tooltip(), None);
		assert_eq!(state.link_stroke(&link), (LINK_STROKE, false));
	}
}
