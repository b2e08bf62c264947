use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Grey the datasets use to mark characters without a category colour.
pub const UNCOLORED_HEX: &str = "#808080";

/// A category colour as a CSS colour string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
	/// Wraps a CSS colour string as given.
	pub fn new(css: impl Into<String>) -> Self {
		Self(css.into())
	}

	/// Reads a dataset colour; `null`, blank, and the legacy grey mean "no category".
	pub fn from_dataset(colour: Option<&str>) -> Option<Color> {
		let css = colour?.trim();
		if css.is_empty() || css.eq_ignore_ascii_case(UNCOLORED_HEX) {
			None
		} else {
			Some(Color::new(css))
		}
	}

	/// The CSS colour string.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// A named participant in the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
	/// Unique, case-sensitive identity.
	pub name: String,
	/// Importance used by occurrence ordering.
	pub weight: f64,
	/// Category colour; `None` when uncategorised.
	pub color: Option<Color>,
}

/// Rule that decides the angular order of entities around the ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOrder {
	/// By name, ascending.
	#[default]
	Alphabetical,
	/// By weight, descending, ties broken by name.
	Occurrences,
}

impl NodeOrder {
	/// Total order over entities under this rule.
	pub fn compare(self, a: &Entity, b: &Entity) -> Ordering {
		match self {
			NodeOrder::Alphabetical => a.name.cmp(&b.name),
			NodeOrder::Occurrences => b
				.weight
				.total_cmp(&a.weight)
				.then_with(|| a.name.cmp(&b.name)),
		}
	}

	/// Name as used in configuration and logs.
	pub fn label(self) -> &'static str {
		match self {
			NodeOrder::Alphabetical => "alphabetical",
			NodeOrder::Occurrences => "occurrences",
		}
	}
}

/// Where an entity's weight comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
	/// The `value` the dataset supplies.
	#[default]
	Dataset,
	/// The number of unique edges touching the entity.
	Degree,
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

	#[test]
	fn occurrences_sorts_by_weight_then_name() {
		let mut entities = vec![entity("Leia", 3.0), entity("Han", 5.0), entity("Luke", 3.0)];
		entities.sort_by(|a, b| NodeOrder::Occurrences.compare(a, b));
		let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
		assert_eq!(names, ["Han", "Leia", "Luke"]);
	}

	#[test]
	fn alphabetical_is_case_sensitive_ascending() {
		let mut entities = vec![entity("luke", 1.0), entity("Leia", 9.0), entity("Han", 2.0)];
		entities.sort_by(|a, b| NodeOrder::Alphabetical.compare(a, b));
		let names: Vec<&str> = entities.iter().map(|e| e.name.as_str()).collect();
		assert_eq!(names, ["Han", "Leia", "luke"]);
	}

	#[test]
	fn grey_and_null_colours_are_uncolored() {
		assert_eq!(Color::from_dataset(None), None);
		assert_eq!(Color::from_dataset(Some("#808080")), None);
		assert_eq!(Color::from_dataset(Some(" #808080 ")), None);
		assert_eq!(Color::from_dataset(Some("")), None);
		assert_eq!(Color::from_dataset(Some("#f00")), Some(Color::new("#f00")));
	}

	#[test]
	fn order_parses_from_lowercase_names() {
		let order: NodeOrder = serde_json::from_str("\"occurrences\"").unwrap();
		assert_eq!(order, NodeOrder::Occurrences);
		assert_eq!(order.label(), "occurrences");
	}
}
