use serde::{Deserialize, Serialize};

use super::dataset::LetterRange;
use super::radial_line::DEFAULT_TENSION;
use super::types::{NodeOrder, WeightMode};
use crate::error::{LayoutError, LayoutResult};

/// Default split depth for default-coloured edges (64 pieces).
pub const DEFAULT_BUNDLING_SEGMENTS: u32 = 6;

/// Deepest split accepted; 4096 pieces per edge.
pub const MAX_BUNDLING_SEGMENTS: u32 = 12;

/// Leaf ring radius for a 600px wide diagram.
pub const DEFAULT_RING_RADIUS: f64 = 600.0 / 1.75 - 150.0;

/// Everything that shapes one layout pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
	/// Angular order of entities around the ring.
	pub order: NodeOrder,
	/// First letters an entity name may start with.
	pub letter_range: LetterRange,
	/// Default edges are split into `2^bundling_segments` pieces.
	pub bundling_segments: u32,
	/// Bundle strength in `[0, 1]`; 0 draws straight chords.
	pub curve_tension: f64,
	/// Radius of the leaf ring in pixels.
	pub ring_radius: f64,
	/// Where entity weights come from.
	pub weight_mode: WeightMode,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			order: NodeOrder::default(),
			letter_range: LetterRange::default(),
			bundling_segments: DEFAULT_BUNDLING_SEGMENTS,
			curve_tension: DEFAULT_TENSION,
			ring_radius: DEFAULT_RING_RADIUS,
			weight_mode: WeightMode::default(),
		}
	}
}

impl LayoutConfig {
	/// Rejects a reversed or out-of-range letter range, a split depth outside
	/// `1..=MAX_BUNDLING_SEGMENTS` and a tension outside `[0, 1]`.
	pub fn validate(&self) -> LayoutResult<()> {
		self.letter_range.validate()?;
		if !(1..=MAX_BUNDLING_SEGMENTS).contains(&self.bundling_segments) {
			return Err(LayoutError::InvalidBundlingSegments(self.bundling_segments));
		}
		if !(0.0..=1.0).contains(&self.curve_tension) {
			return Err(LayoutError::InvalidTension(self.curve_tension));
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_take_defaults() {
		let config: LayoutConfig =
			serde_json::from_str(r#"{"order": "occurrences", "letterRange": [0, 1]}"#).unwrap();
		assert_eq!(config.order, NodeOrder::Occurrences);
		assert_eq!(config.letter_range, LetterRange::new(0, 1));
		assert_eq!(config.bundling_segments, 6);
		assert_eq!(config.curve_tension, 0.85);
		assert!(config.validate().is_ok());
	}

	#[test]
	fn rejects_out_of_range_knobs() {
		let mut config = LayoutConfig {
			bundling_segments: 0,
			..LayoutConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(LayoutError::InvalidBundlingSegments(0))
		));
		config.bundling_segments = 6;
		config.curve_tension = f64::NAN;
		assert!(matches!(config.validate(), Err(LayoutError::InvalidTension(_))));
		config.curve_tension = 1.2;
		assert!(config.validate().is_err());
	}
}
