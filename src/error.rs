//! Error types for building a bundled diagram.

use thiserror::Error;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors that abort a diagram build.
#[derive(Debug, Error)]
pub enum LayoutError {
	/// A link refers to a node index past the end of the node list
	#[error("link references node index {index}, but the dataset has {len} nodes")]
	UnknownNodeIndex {
		/// The offending index.
		index: usize,
		/// Number of nodes in the dataset.
		len: usize,
	},

	/// A link refers to a node name that is not in the dataset
	#[error("link references unknown node {0:?}")]
	UnknownNodeName(String),

	/// Two nodes share a name
	#[error("node name {0:?} appears more than once")]
	DuplicateNodeName(String),

	/// Letter range bounds outside A..=Z or reversed
	#[error("invalid letter range [{min}, {max}], expected 0 <= min <= max <= 25")]
	InvalidLetterRange {
		/// First letter index.
		min: u8,
		/// Last letter index.
		max: u8,
	},

	/// Bundling split depth out of range
	#[error("invalid bundling segment count {0}, expected 1..=12")]
	InvalidBundlingSegments(u32),

	/// Bundling tension outside [0, 1]
	#[error("invalid curve tension {0}, expected a value in [0, 1]")]
	InvalidTension(f64),

	/// Dataset or configuration JSON failed to parse
	#[error("failed to parse dataset: {0}")]
	Parse(#[from] serde_json::Error),
}
