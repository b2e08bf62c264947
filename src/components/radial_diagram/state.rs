use std::collections::{HashMap, HashSet};

use crate::components::tooltip::Tooltip;
use crate::layout::{Diagram, Edge, EdgeKey, LaidOutNode, Path, Point, Polar, RadialLayout};

pub const NODE_RADIUS: f64 = 5.0;
pub const HIT_RADIUS: f64 = 8.0;
pub const EDGE_HIT_TOLERANCE: f64 = 3.0;
pub const TRANSITION_SECS: f64 = 0.75;
pub const FADED_ALPHA: f64 = 0.01;
pub const DEFAULT_EDGE_STROKE: &str = "#ccc";
pub const UNCOLORED_NODE: &str = "#808080";
pub const HOVER_FALLBACK: &str = "red";

// Samples per segment when measuring pointer distance to an edge.
const HIT_SAMPLES: usize = 8;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Hover and pin state of one diagram instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	pub hovered_node: Option<String>,
	pub hovered_edge: Option<EdgeKey>,
	pub pinned_node: Option<String>,
	pub pinned_edge: Option<EdgeKey>,
}

/// What the diagram currently emphasises.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Focus<'a> {
	None,
	Node(&'a str),
	Edge(&'a EdgeKey),
}

impl SelectionState {
	/// Pins win over hovers, nodes over edges.
	pub fn focus(&self) -> Focus<'_> {
		if let Some(name) = &self.pinned_node {
			Focus::Node(name)
		} else if let Some(key) = &self.pinned_edge {
			Focus::Edge(key)
		} else if let Some(name) = &self.hovered_node {
			Focus::Node(name)
		} else if let Some(key) = &self.hovered_edge {
			Focus::Edge(key)
		} else {
			Focus::None
		}
	}

	pub fn hover(&mut self, node: Option<String>, edge: Option<EdgeKey>) -> bool {
		let edge = if node.is_some() { None } else { edge };
		let changed = self.hovered_node != node || self.hovered_edge != edge;
		self.hovered_node = node;
		self.hovered_edge = edge;
		changed
	}

	pub fn toggle_node_pin(&mut self, name: &str) {
		if self.pinned_node.as_deref() == Some(name) {
			self.pinned_node = None;
		} else {
			self.pinned_node = Some(name.to_owned());
		}
	}

	pub fn toggle_edge_pin(&mut self, key: &EdgeKey) {
		if self.pinned_edge.as_ref() == Some(key) {
			self.pinned_edge = None;
		} else {
			self.pinned_edge = Some(key.clone());
		}
	}

	/// Drops hovers and pins that no longer exist in `diagram`.
	fn retain(&mut self, diagram: &Diagram) {
		let has_node = |n: &String| diagram.layout().leaf(n).is_some();
		let has_edge = |k: &EdgeKey| diagram.edge(k).is_some();
		self.hovered_node = self.hovered_node.take().filter(has_node);
		self.pinned_node = self.pinned_node.take().filter(has_node);
		self.hovered_edge = self.hovered_edge.take().filter(has_edge);
		self.pinned_edge = self.pinned_edge.take().filter(has_edge);
	}
}

/// Rectangular selection in centre-origin diagram coordinates.
#[derive(Clone, Debug, Default)]
pub struct BrushState {
	pub active: bool,
	pub start: Point,
	pub end: Point,
}

impl BrushState {
	/// `(min, max)` corners.
	pub fn extent(&self) -> (Point, Point) {
		(
			Point::new(self.start.x.min(self.end.x), self.start.y.min(self.end.y)),
			Point::new(self.start.x.max(self.end.x), self.start.y.max(self.end.y)),
		)
	}

	pub fn is_empty(&self) -> bool {
		let (min, max) = self.extent();
		max.x - min.x < 1.0 || max.y - min.y < 1.0
	}

	pub fn contains(&self, p: Point) -> bool {
		let (min, max) = self.extent();
		p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
	}
}

/// Snapshot of the previous diagram that the current one animates away from.
#[derive(Clone, Debug, Default)]
struct Transition {
	positions: HashMap<String, Polar>,
	edges: HashMap<EdgeKey, Edge>,
	t: f64,
}

/// Geometry drawn for one edge in the current frame.
pub struct EdgeFrame<'a> {
	pub edge: &'a Edge,
	pub path: Path,
	pub pieces: Vec<Path>,
}

pub struct RadialDiagramState {
	pub diagram: Diagram,
	pub selection: SelectionState,
	pub brush: BrushState,
	pub brushed: HashSet<String>,
	pub width: f64,
	pub height: f64,
	pub needs_redraw: bool,
	transition: Option<Transition>,
}

impl RadialDiagramState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			diagram: Diagram::default(),
			selection: SelectionState::default(),
			brush: BrushState::default(),
			brushed: HashSet::new(),
			width,
			height,
			needs_redraw: true,
			transition: None,
		}
	}

	/// Swaps in a freshly built diagram, animating from the old one.
	pub fn set_diagram(&mut self, diagram: Diagram) {
		let previous = std::mem::replace(&mut self.diagram, diagram);
		if !previous.is_empty() {
			self.transition = Some(Transition {
				positions: previous.layout().positions(),
				edges: previous
					.edges()
					.iter()
					.map(|edge| (edge.key.clone(), edge.clone()))
					.collect(),
				t: 0.0,
			});
		}
		self.selection.retain(&self.diagram);
		self.needs_redraw = true;
	}

	pub fn is_animating(&self) -> bool {
		self.transition.is_some()
	}

	pub fn tick(&mut self, dt: f64) {
		if let Some(transition) = &mut self.transition {
			transition.t += dt / TRANSITION_SECS;
			if transition.t >= 1.0 {
				self.transition = None;
			}
			self.needs_redraw = true;
		}
	}

	fn eased(&self) -> Option<(&Transition, f64)> {
		self.transition
			.as_ref()
			.map(|transition| (transition, ease_out_cubic(transition.t.min(1.0))))
	}

	/// Layout as drawn this frame.
	pub fn frame_layout(&self) -> RadialLayout {
		match self.eased() {
			Some((transition, e)) => self.diagram.layout().tween(&transition.positions, e),
			None => self.diagram.layout().clone(),
		}
	}

	/// Edge geometry as drawn this frame. An edge whose previous shape differs
	/// jumps straight to its new path.
	pub fn frame_edges(&self) -> Vec<EdgeFrame<'_>> {
		let eased = self.eased();
		self.diagram
			.edges()
			.iter()
			.map(|edge| {
				let old = eased.and_then(|(transition, e)| {
					transition.edges.get(&edge.key).map(|old| (old, e))
				});
				let (path, pieces) = match old {
					Some((old, e)) => (
						old.path.lerp(&edge.path, e).unwrap_or_else(|| edge.path.clone()),
						tween_pieces(&old.pieces, &edge.pieces, e),
					),
					None => (edge.path.clone(), edge.pieces.clone()),
				};
				EdgeFrame { edge, path, pieces }
			})
			.collect()
	}

	/// Pointer position relative to the diagram centre.
	pub fn to_diagram(&self, sx: f64, sy: f64) -> Point {
		Point::new(sx - self.width / 2.0, sy - self.height / 2.0)
	}

	pub fn node_at(&self, p: Point) -> Option<&LaidOutNode> {
		self.diagram
			.nodes()
			.iter()
			.map(|node| (node, node.cartesian().distance(p)))
			.filter(|(_, d)| *d < HIT_RADIUS)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(node, _)| node)
	}

	pub fn edge_at(&self, p: Point) -> Option<&Edge> {
		self.diagram
			.edges()
			.iter()
			.map(|edge| (edge, distance_to_path(&edge.path, p)))
			.filter(|(_, d)| *d < EDGE_HIT_TOLERANCE)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(edge, _)| edge)
	}

	pub fn hover_at(&mut self, p: Point) {
		let node = self.node_at(p).map(|n| n.name().to_owned());
		let edge = if node.is_none() {
			self.edge_at(p).map(|e| e.key.clone())
		} else {
			None
		};
		if self.selection.hover(node, edge) {
			self.needs_redraw = true;
		}
	}

	pub fn clear_hover(&mut self) {
		if self.selection.hover(None, None) {
			self.needs_redraw = true;
		}
	}

	/// Pins or unpins whatever lies under the pointer.
	pub fn click_at(&mut self, p: Point) {
		if let Some(name) = self.node_at(p).map(|n| n.name().to_owned()) {
			self.selection.toggle_node_pin(&name);
		} else if let Some(key) = self.edge_at(p).map(|e| e.key.clone()) {
			self.selection.toggle_edge_pin(&key);
		}
		self.needs_redraw = true;
	}

	pub fn start_brush(&mut self, p: Point) {
		self.brush = BrushState {
			active: true,
			start: p,
			end: p,
		};
		self.needs_redraw = true;
	}

	/// Extends the brush and returns the names now inside it.
	pub fn move_brush(&mut self, p: Point) -> HashSet<String> {
		self.brush.end = p;
		self.needs_redraw = true;
		self.diagram
			.nodes()
			.iter()
			.filter(|node| self.brush.contains(node.cartesian()))
			.map(|node| node.name().to_owned())
			.collect()
	}

	/// Ends the brush gesture; `false` if it never grew past a click.
	pub fn end_brush(&mut self) -> bool {
		let had_extent = self.brush.active && !self.brush.is_empty();
		self.brush.active = false;
		self.needs_redraw = true;
		had_extent
	}

	pub fn set_brushed(&mut self, names: HashSet<String>) {
		if self.brushed != names {
			self.brushed = names;
			self.needs_redraw = true;
		}
	}

	pub fn is_brushed_edge(&self, edge: &Edge) -> bool {
		self.brushed.contains(edge.source()) || self.brushed.contains(edge.target())
	}

	/// Opacity and stroke colour for an edge given the current focus.
	pub fn edge_style(&self, edge: &Edge) -> (f64, String) {
		let base = edge
			.color()
			.map_or(DEFAULT_EDGE_STROKE, |c| c.as_str())
			.to_owned();
		match self.selection.focus() {
			Focus::None => (1.0, base),
			Focus::Node(name) if edge.key.touches(name) => (1.0, self.highlight_color(name)),
			Focus::Edge(key) if *key == edge.key => (1.0, base),
			_ => (FADED_ALPHA, base),
		}
	}

	fn highlight_color(&self, name: &str) -> String {
		self.diagram
			.layout()
			.leaf(name)
			.and_then(|leaf| leaf.entity.color.as_ref())
			.map_or(HOVER_FALLBACK, |c| c.as_str())
			.to_owned()
	}

	pub fn tooltip(&self) -> Option<Tooltip> {
		match self.selection.focus() {
			Focus::None => None,
			Focus::Node(name) => {
				let leaf = self.diagram.layout().leaf(name)?;
				Some(Tooltip {
					title: Some(leaf.name().to_owned()),
					lines: vec![format!("Appeared in {} scenes", leaf.entity.weight)],
				})
			}
			Focus::Edge(key) => {
				let edge = self.diagram.edge(key)?;
				Some(Tooltip {
					title: None,
					lines: vec![
						format!("Source: {}", edge.source()),
						format!("Target: {}", edge.target()),
						format!("Number of scenes together: {}", edge.weight),
					],
				})
			}
		}
	}
}

fn tween_pieces(old: &[Path], new: &[Path], t: f64) -> Vec<Path> {
	if old.len() != new.len() {
		return new.to_vec();
	}
	old.iter()
		.zip(new)
		.map(|(o, n)| o.lerp(n, t).unwrap_or_else(|| n.clone()))
		.collect()
}

fn distance_to_path(path: &Path, p: Point) -> f64 {
	path.segments()
		.iter()
		.flat_map(|segment| {
			(0..=HIT_SAMPLES).map(move |i| segment.point_at(i as f64 / HIT_SAMPLES as f64))
		})
		.map(|q| q.distance(p))
		.fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layout::LayoutConfig;

	const DATA: &str = r##"{
		"nodes": [
			{"name": "Han", "value": 5, "colour": "#f00"},
			{"name": "Leia", "value": 3, "colour": "#808080"},
			{"name": "Luke", "value": 4, "colour": "#00f"}
		],
		"links": [
			{"source": 0, "target": 1, "value": 2},
			{"source": 0, "target": 2, "value": 4}
		]
	}"##;

	fn state() -> RadialDiagramState {
		let mut state = RadialDiagramState::new(600.0, 700.0);
		state.set_diagram(Diagram::from_json(DATA, &LayoutConfig::default()).unwrap());
		state
	}

	#[test]
	fn pinned_node_outranks_hover() {
		let mut selection = SelectionState::default();
		selection.toggle_node_pin("Han");
		selection.hover(Some("Leia".into()), None);
		assert_eq!(selection.focus(), Focus::Node("Han"));
		selection.toggle_node_pin("Han");
		assert_eq!(selection.focus(), Focus::Node("Leia"));
	}

	#[test]
	fn hovering_a_node_fades_unrelated_edges() {
		let mut state = state();
		let leia = state.diagram.layout().leaf("Leia").unwrap().cartesian();
		state.hover_at(leia);
		let han_leia = state.diagram.edge(&EdgeKey::new("Han", "Leia")).unwrap();
		let han_luke = state.diagram.edge(&EdgeKey::new("Han", "Luke")).unwrap();
		assert_eq!(state.edge_style(han_leia), (1.0, HOVER_FALLBACK.to_owned()));
		assert_eq!(state.edge_style(han_luke).0, FADED_ALPHA);
		let tooltip = state.tooltip().unwrap();
		assert_eq!(tooltip.title.as_deref(), Some("Leia"));
		assert_eq!(tooltip.lines, ["Appeared in 3 scenes"]);
	}

	#[test]
	fn clicking_an_edge_pins_it() {
		let mut state = state();
		let han_luke = state.diagram.edge(&EdgeKey::new("Han", "Luke")).unwrap();
		let on_edge = han_luke.path.segments()[1].point_at(0.5);
		let key = han_luke.key.clone();
		state.click_at(on_edge);
		assert_eq!(state.selection.pinned_edge, Some(key));
		let tooltip = state.tooltip().unwrap();
		assert_eq!(tooltip.lines[2], "Number of scenes together: 4");
	}

	#[test]
	fn brush_selects_nodes_inside_rectangle() {
		let mut state = state();
		let han = state.diagram.layout().leaf("Han").unwrap().cartesian();
		state.start_brush(Point::new(han.x - 10.0, han.y - 10.0));
		let names = state.move_brush(Point::new(han.x + 10.0, han.y + 10.0));
		assert_eq!(names, HashSet::from(["Han".to_owned()]));
		assert!(state.end_brush());
		state.set_brushed(names);
		assert!(state.diagram.edges().iter().all(|e| state.is_brushed_edge(e)));
	}

	#[test]
	fn rebuild_animates_from_previous_positions() {
		let mut state = state();
		let config = LayoutConfig {
			order: crate::layout::NodeOrder::Occurrences,
			..LayoutConfig::default()
		};
		state.set_diagram(Diagram::from_json(DATA, &config).unwrap());
		assert!(state.is_animating());
		let start = state.frame_layout();
		// Leia moves from 120 to 240 degrees.
		assert_eq!(start.leaf("Leia").unwrap().angle(), 120.0);
		state.tick(TRANSITION_SECS);
		assert!(!state.is_animating());
		assert_eq!(state.frame_layout().leaf("Leia").unwrap().angle(), 240.0);
		assert_eq!(state.frame_edges().len(), 2);
	}
}
