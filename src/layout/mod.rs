//! Radial hierarchical edge bundling.
//!
//! Entities become leaves of a one-level tree spread around a ring. Every
//! edge is routed leaf -> root -> leaf through a bundled B-spline, and
//! uncoloured edges are cut into `2^k` pieces so the canvas can blend them.
//! [`ArcDiagram`] stacks the same entities on one axis instead. Nothing here
//! touches the browser.

mod arc;
mod cluster;
mod config;
mod curve;
mod dataset;
mod diagram;
mod edges;
mod path;
mod radial_line;
mod types;

pub use arc::{
	ARC_AXIS_X, ARC_MARGIN_BOTTOM, ARC_MARGIN_TOP, ARC_STEP, ARC_WIDTH, ArcDiagram, ArcLink, ArcNode,
	Semicircle, arc_height,
};
pub use cluster::{LabelAnchor, LaidOutNode, RadialLayout};
pub use config::{DEFAULT_BUNDLING_SEGMENTS, DEFAULT_RING_RADIUS, LayoutConfig, MAX_BUNDLING_SEGMENTS};
pub use curve::{BezierCurve, Line, Point, Segment};
pub use dataset::{Dataset, DatasetLink, DatasetNode, LetterRange, Network, NodeRef, ResolvedLink};
pub use diagram::Diagram;
pub use edges::{Edge, EdgeBuilder, EdgeKey, EdgeStyle, aggregate_links, apply_degree_weights};
pub use path::{Path, PathContext};
pub use radial_line::{DEFAULT_TENSION, Polar, RadialLine};
pub use types::{Color, Entity, NodeOrder, UNCOLORED_HEX, WeightMode};
