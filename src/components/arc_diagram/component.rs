use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ArcDiagramState;
use crate::components::tooltip::{Tooltip, TooltipView};
use crate::components::{frame_delta, request_frame};
use crate::layout::{ARC_WIDTH, ArcDiagram, Dataset, LayoutConfig, Point};

/// Arc diagram of the same network; reordering slides the rows into place.
#[component]
pub fn ArcDiagramCanvas(
	#[prop(into)] data: Signal<Dataset>,
	#[prop(into)] config: Signal<LayoutConfig>,
	/// Names brushed in a radial diagram; drawn with a ring.
	#[prop(into)]
	brushed: Signal<HashSet<String>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(ArcDiagramState::new()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<(Tooltip, f64, f64)>);
	let build_error = RwSignal::new(None::<String>);

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(ARC_WIDTH as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("canvas has no 2d context");
			return;
		};

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let mut last = js_sys::Date::now();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let dt = frame_delta(&mut last);
			{
				let mut s = state_anim.borrow_mut();
				if s.is_animating() {
					s.tick(dt);
				}
				// Resizing clears the canvas.
				let height = s.diagram.height().ceil() as u32;
				if canvas.height() != height {
					canvas.set_height(height);
					s.needs_redraw = true;
				}
				if s.needs_redraw {
					render::render(&s, &ctx);
					s.needs_redraw = false;
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				request_frame(cb);
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			request_frame(cb);
		}
	});

	let state_build = state.clone();
	Effect::new(move |_| {
		let config = config.get();
		match data.with(|data| ArcDiagram::build(data, &config)) {
			Ok(diagram) => {
				info!(
					"built arc diagram: {} nodes, {} links",
					diagram.nodes().len(),
					diagram.links().len()
				);
				state_build.borrow_mut().set_diagram(diagram);
				build_error.set(None);
			}
			Err(err) => {
				error!("failed to build arc diagram: {err}");
				build_error.set(Some(err.to_string()));
			}
		}
		tooltip.set(None);
	});

	let state_brushed = state.clone();
	Effect::new(move |_| {
		let names = brushed.get();
		state_brushed.borrow_mut().set_brushed(names);
	});

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		let mut s = state_mm.borrow_mut();
		s.hover_at(Point::new(x, y));
		tooltip.set(s.tooltip().map(|t| (t, x + 10.0, y + 10.0)));
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		state_ml.borrow_mut().clear_hover();
		tooltip.set(None);
	};

	view! {
		<div class="arc-diagram" style="position: relative; display: inline-block;">
			<canvas
				node_ref=canvas_ref
				class="arc-diagram-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				style="display: block;"
			/>
			{move || {
				build_error
					.get()
					.map(|err| view! { <p class="diagram-error">{err}</p> })
			}}
			<TooltipView tip=tooltip />
		</div>
	}
}
