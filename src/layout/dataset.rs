//! Input dataset shape and the letter-range pre-filter.

use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::types::{Color, Entity};
use crate::error::{LayoutError, LayoutResult};

/// A character as it appears in the dataset file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetNode {
	/// Unique, case-sensitive identity.
	pub name: String,
	/// Scene count.
	#[serde(default)]
	pub value: f64,
	/// CSS category colour; `null` or the legacy grey for none.
	#[serde(default)]
	pub colour: Option<String>,
}

/// A link endpoint: a position in `nodes` or a node name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
	/// Position in `nodes`.
	Index(usize),
	/// A node `name`.
	Name(String),
}

/// A weighted pair of nodes. Direction carries no meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetLink {
	/// One endpoint.
	pub source: NodeRef,
	/// The other endpoint.
	pub target: NodeRef,
	/// Scenes shared; one when absent.
	#[serde(default)]
	pub value: Option<f64>,
}

impl DatasetLink {
	/// Link weight, one when the dataset leaves it out.
	pub fn weight(&self) -> f64 {
		self.value.unwrap_or(1.0)
	}
}

/// A co-occurrence network.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
	/// Characters.
	#[serde(default)]
	pub nodes: Vec<DatasetNode>,
	/// Co-occurrences; duplicates and reversed pairs are summed later.
	#[serde(default)]
	pub links: Vec<DatasetLink>,
}

/// Inclusive range of allowed first letters, `0 = A` through `25 = Z`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct LetterRange {
	/// First admitted letter index.
	pub min: u8,
	/// Last admitted letter index.
	pub max: u8,
}

impl Default for LetterRange {
	fn default() -> Self {
		Self { min: 0, max: 25 }
	}
}

impl From<[u8; 2]> for LetterRange {
	fn from([min, max]: [u8; 2]) -> Self {
		Self { min, max }
	}
}

impl From<LetterRange> for [u8; 2] {
	fn from(range: LetterRange) -> Self {
		[range.min, range.max]
	}
}

impl LetterRange {
	/// Range by letter index, 0 for `A`; unchecked until [`LetterRange::validate`].
	pub fn new(min: u8, max: u8) -> Self {
		Self { min, max }
	}

	/// Rejects `min > max` and `max > 25`.
	pub fn validate(&self) -> LayoutResult<()> {
		if self.min > self.max || self.max > 25 {
			return Err(LayoutError::InvalidLetterRange {
				min: self.min,
				max: self.max,
			});
		}
		Ok(())
	}

	/// Whether the range admits every letter.
	pub fn is_full(&self) -> bool {
		self.min == 0 && self.max == 25
	}

	/// Whether a name's first letter, case-insensitively, falls in range.
	/// Names starting outside A-Z never match.
	pub fn admits(&self, name: &str) -> bool {
		match name.chars().next() {
			Some(c) if c.is_ascii_alphabetic() => {
				let idx = c.to_ascii_uppercase() as u8 - b'A';
				(self.min..=self.max).contains(&idx)
			}
			_ => false,
		}
	}

	/// Uppercase letter for an index, saturating at `Z`.
	pub fn letter(idx: u8) -> char {
		(b'A' + idx.min(25)) as char
	}
}

/// A link with both endpoints resolved to positions in an entity list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedLink {
	/// Position of one endpoint.
	pub source: usize,
	/// Position of the other endpoint.
	pub target: usize,
	/// Link weight.
	pub weight: f64,
}

/// Entities and links after validation and filtering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Network {
	/// Surviving entities in dataset order.
	pub entities: Vec<Entity>,
	/// Links between surviving entities.
	pub links: Vec<ResolvedLink>,
}

impl Dataset {
	/// Parses the `{ nodes, links }` JSON shape.
	pub fn from_json(json: &str) -> LayoutResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	fn resolve(&self, by_name: &HashMap<&str, usize>, node: &NodeRef) -> LayoutResult<usize> {
		match node {
			NodeRef::Index(index) if *index < self.nodes.len() => Ok(*index),
			NodeRef::Index(index) => Err(LayoutError::UnknownNodeIndex {
				index: *index,
				len: self.nodes.len(),
			}),
			NodeRef::Name(name) => by_name
				.get(name.as_str())
				.copied()
				.ok_or_else(|| LayoutError::UnknownNodeName(name.clone())),
		}
	}

	/// Resolves every link against the full node list, then keeps only the
	/// nodes `range` admits and the links between two kept nodes, renumbering
	/// link endpoints to the surviving positions.
	pub fn filter(&self, range: LetterRange) -> LayoutResult<Network> {
		range.validate()?;

		let mut by_name = HashMap::with_capacity(self.nodes.len());
		for (i, node) in self.nodes.iter().enumerate() {
			if by_name.insert(node.name.as_str(), i).is_some() {
				return Err(LayoutError::DuplicateNodeName(node.name.clone()));
			}
		}

		let resolved = self
			.links
			.iter()
			.map(|link| {
				Ok(ResolvedLink {
					source: self.resolve(&by_name, &link.source)?,
					target: self.resolve(&by_name, &link.target)?,
					weight: link.weight(),
				})
			})
			.collect::<LayoutResult<Vec<_>>>()?;

		let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
		let mut entities = Vec::new();
		for (i, node) in self.nodes.iter().enumerate() {
			if range.admits(&node.name) {
				remap[i] = Some(entities.len());
				entities.push(Entity {
					name: node.name.clone(),
					weight: node.value,
					color: Color::from_dataset(node.colour.as_deref()),
				});
			}
		}

		let links: Vec<ResolvedLink> = resolved
			.into_iter()
			.filter_map(|link| {
				Some(ResolvedLink {
					source: remap[link.source]?,
					target: remap[link.target]?,
					weight: link.weight,
				})
			})
			.collect();

		debug!(
			"letter range {}-{} kept {}/{} nodes and {}/{} links",
			LetterRange::letter(range.min),
			LetterRange::letter(range.max),
			entities.len(),
			self.nodes.len(),
			links.len(),
			self.links.len()
		);

		Ok(Network { entities, links })
	}
}
