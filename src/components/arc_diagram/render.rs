use std::collections::HashMap;
use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ArcDiagramState, UNCOLORED_NODE};
use crate::layout::{ARC_AXIS_X, ARC_WIDTH};

const LINK_WIDTH: f64 = 3.0;
const LINK_ALPHA: f64 = 0.6;
const NODE_RADIUS: f64 = 6.0;
const LABEL_OFFSET: f64 = 8.0;

pub fn render(state: &ArcDiagramState, ctx: &CanvasRenderingContext2d) {
	let height = state.diagram.height();
	ctx.set_fill_style_str("#fff");
	ctx.fill_rect(0.0, 0.0, ARC_WIDTH, height);
	if state.diagram.is_empty() {
		ctx.set_fill_style_str("#333");
		ctx.set_font("15px sans-serif");
		ctx.set_text_align("start");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text("No characters for selected range", 10.0, height / 2.0);
		return;
	}

	let ys = state.frame_positions();
	draw_links(state, &ys, ctx);
	draw_nodes(state, &ys, ctx);
}

fn draw_links(state: &ArcDiagramState, ys: &HashMap<String, f64>, ctx: &CanvasRenderingContext2d) {
	ctx.save();
	ctx.set_global_alpha(LINK_ALPHA);
	ctx.set_line_width(LINK_WIDTH);

	// Emphasised arcs go on top.
	for raised in [false, true] {
		for link in state.diagram.links() {
			let (color, emphasised) = state.link_stroke(link);
			if emphasised != raised || link.key.is_loop() {
				continue;
			}
			let Some(arc) = state.diagram.semicircle(link, ys) else {
				continue;
			};
			ctx.begin_path();
			let _ = ctx.arc(arc.center.x, arc.center.y, arc.radius, -PI / 2.0, PI / 2.0);
			ctx.set_stroke_style_str(color);
			ctx.stroke();
		}
	}
	ctx.restore();
}

fn draw_nodes(state: &ArcDiagramState, ys: &HashMap<String, f64>, ctx: &CanvasRenderingContext2d) {
	ctx.set_text_align("end");
	ctx.set_text_baseline("middle");

	for node in state.diagram.nodes() {
		let Some(&y) = ys.get(node.name()) else {
			continue;
		};

		ctx.begin_path();
		let _ = ctx.arc(ARC_AXIS_X, y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(
			node.entity
				.color
				.as_ref()
				.map_or(UNCOLORED_NODE, |c| c.as_str()),
		);
		ctx.fill();
		if state.brushed.contains(node.name()) {
			ctx.set_stroke_style_str("#000");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}

		let style = state.label_style(node.name());
		ctx.set_font(if style.bold {
			"bold 13px sans-serif"
		} else {
			"13px sans-serif"
		});
		ctx.set_fill_style_str(style.color);
		let _ = ctx.fill_text(node.name(), ARC_AXIS_X - LABEL_OFFSET, y);
	}
}
