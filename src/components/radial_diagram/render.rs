use std::f64::consts::PI;

use web_sys::{CanvasRenderingContext2d, Path2d};

use super::state::{NODE_RADIUS, RadialDiagramState, UNCOLORED_NODE};
use crate::layout::{LabelAnchor, Path, RadialLayout};

const EDGE_WIDTH: f64 = 2.0;
const LABEL_OFFSET: f64 = 6.0;

pub fn render(state: &RadialDiagramState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#fff");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_caption(state, ctx);
	if state.diagram.is_empty() {
		return;
	}

	ctx.save();
	let _ = ctx.translate(state.width / 2.0, state.height / 2.0);
	let layout = state.frame_layout();
	draw_edges(state, ctx);
	draw_nodes(state, &layout, ctx);
	draw_brush(state, ctx);
	ctx.restore();
}

fn draw_caption(state: &RadialDiagramState, ctx: &CanvasRenderingContext2d) {
	let text = if state.diagram.is_empty() {
		"No characters for selected range".to_owned()
	} else {
		format!("Characters in current selection: {}", state.diagram.nodes().len())
	};
	ctx.set_fill_style_str("#333");
	ctx.set_font("15px sans-serif");
	ctx.set_text_align("start");
	ctx.set_text_baseline("alphabetic");
	let _ = ctx.fill_text(&text, 10.0, 70.0);
}

fn stroke(ctx: &CanvasRenderingContext2d, d: &str) {
	if d.is_empty() {
		return;
	}
	if let Ok(path) = Path2d::new_with_path_string(d) {
		ctx.stroke_with_path(&path);
	}
}

fn joined(pieces: &[Path]) -> String {
	pieces.iter().map(ToString::to_string).collect()
}

fn draw_edges(state: &RadialDiagramState, ctx: &CanvasRenderingContext2d) {
	let frames = state.frame_edges();
	ctx.set_line_width(EDGE_WIDTH);

	// Uncoloured edges blend by darkening so bundles read as denser strokes.
	ctx.save();
	let _ = ctx.set_global_composite_operation("darken");
	for frame in frames.iter().filter(|f| !f.edge.is_custom()) {
		let (alpha, color) = state.edge_style(frame.edge);
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(if state.is_brushed_edge(frame.edge) {
			"#333"
		} else {
			color.as_str()
		});
		stroke(ctx, &joined(&frame.pieces));
	}
	ctx.restore();

	for frame in frames.iter().filter(|f| f.edge.is_custom()) {
		let (alpha, color) = state.edge_style(frame.edge);
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&color);
		ctx.set_line_width(if state.is_brushed_edge(frame.edge) {
			EDGE_WIDTH * 2.0
		} else {
			EDGE_WIDTH
		});
		stroke(ctx, &frame.path.to_string());
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &RadialDiagramState, layout: &RadialLayout, ctx: &CanvasRenderingContext2d) {
	ctx.set_font("bold 8px sans-serif");
	ctx.set_text_baseline("middle");

	for leaf in layout.leaves() {
		let color = leaf
			.entity
			.color
			.as_ref()
			.map_or(UNCOLORED_NODE, |c| c.as_str());

		ctx.save();
		let _ = ctx.rotate((leaf.angle() - 90.0).to_radians());
		let _ = ctx.translate(leaf.radius(), 0.0);

		ctx.begin_path();
		let _ = ctx.arc(0.0, 0.0, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(color);
		ctx.fill();
		if state.brushed.contains(leaf.name()) {
			ctx.set_stroke_style_str("#000");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		match leaf.label_anchor() {
			LabelAnchor::Start => {
				ctx.set_text_align("start");
				let _ = ctx.fill_text(leaf.name(), LABEL_OFFSET, 0.0);
			}
			LabelAnchor::End => {
				let _ = ctx.rotate(PI);
				ctx.set_text_align("end");
				let _ = ctx.fill_text(leaf.name(), -LABEL_OFFSET, 0.0);
			}
		}
		ctx.restore();
	}
}

fn draw_brush(state: &RadialDiagramState, ctx: &CanvasRenderingContext2d) {
	if !state.brush.active {
		return;
	}
	let (min, max) = state.brush.extent();
	ctx.set_fill_style_str("rgba(119, 119, 119, 0.3)");
	ctx.fill_rect(min.x, min.y, max.x - min.x, max.y - min.y);
	ctx.set_stroke_style_str("#fff");
	ctx.set_line_width(1.0);
	ctx.stroke_rect(min.x, min.y, max.x - min.x, max.y - min.y);
}
