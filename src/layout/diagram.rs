//! One complete layout pass: filter, dedupe, lay out, bundle, classify.

use std::collections::HashMap;

use log::{debug, warn};

use super::cluster::{LaidOutNode, RadialLayout};
use super::config::LayoutConfig;
use super::dataset::Dataset;
use super::edges::{Edge, EdgeBuilder, EdgeKey, aggregate_links, apply_degree_weights};
use super::types::WeightMode;
use crate::error::LayoutResult;

/// Laid-out entities and their bundled edges. Rebuilt wholesale on every
/// dataset or configuration change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
	layout: RadialLayout,
	edges: Vec<Edge>,
	by_key: HashMap<EdgeKey, usize>,
}

impl Diagram {
	/// Validates `config`, filters by letter range, deduplicates links, lays
	/// out the ring and bundles every edge.
	pub fn build(dataset: &Dataset, config: &LayoutConfig) -> LayoutResult<Self> {
		config.validate()?;

		let network = dataset.filter(config.letter_range)?;
		if network.entities.is_empty() {
			warn!(
				"no nodes in letter range {:?}",
				<[u8; 2]>::from(config.letter_range)
			);
		}

		let aggregated = aggregate_links(&network);
		let mut entities = network.entities;
		if config.weight_mode == WeightMode::Degree {
			apply_degree_weights(&mut entities, &aggregated);
		}

		let layout = RadialLayout::compute(&entities, config.order, config.ring_radius);
		let edges = EdgeBuilder::new(&layout, config.curve_tension, config.bundling_segments)
			.build(aggregated)?;
		let by_key = edges
			.iter()
			.enumerate()
			.map(|(i, edge)| (edge.key.clone(), i))
			.collect();

		debug!(
			"diagram: {} nodes, {} links -> {} edges ({} ordering)",
			layout.len(),
			network.links.len(),
			edges.len(),
			config.order.label()
		);

		Ok(Self {
			layout,
			edges,
			by_key,
		})
	}

	/// Parses a dataset and builds it.
	pub fn from_json(json: &str, config: &LayoutConfig) -> LayoutResult<Self> {
		Self::build(&Dataset::from_json(json)?, config)
	}

	/// Leaf positions around the ring.
	pub fn layout(&self) -> &RadialLayout {
		&self.layout
	}

	/// Entities in ring order.
	pub fn nodes(&self) -> &[LaidOutNode] {
		self.layout.leaves()
	}

	/// Unique edges in order of first appearance.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Whether no entity survived filtering.
	pub fn is_empty(&self) -> bool {
		self.layout.is_empty()
	}

	/// Looks up the edge between a pair.
	pub fn edge(&self, key: &EdgeKey) -> Option<&Edge> {
		self.by_key.get(key).map(|&i| &self.edges[i])
	}

	/// Edges drawn as one stroke in a category colour.
	pub fn custom_edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter().filter(|e| e.is_custom())
	}

	/// Edges drawn as blended pieces.
	pub fn default_edges(&self) -> impl Iterator<Item = &Edge> {
		self.edges.iter().filter(|e| !e.is_custom())
	}

	/// Edges with `name` at either end.
	pub fn incident_edges<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
		self.edges.iter().filter(move |e| e.key.touches(name))
	}

	/// Names sharing an edge with `name`.
	pub fn neighbors<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
		self.incident_edges(name).filter_map(move |e| {
			if e.key.is_loop() {
				None
			} else if e.source() == name {
				Some(e.target())
			} else {
				Some(e.source())
			}
		})
	}
}
