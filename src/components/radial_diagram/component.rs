use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::RadialDiagramState;
use crate::components::{frame_delta, request_frame};
use crate::components::tooltip::{Tooltip, TooltipView};
use crate::layout::{Dataset, Diagram, LayoutConfig, Point};

#[component]
pub fn RadialDiagramCanvas(
	#[prop(into)] data: Signal<Dataset>,
	#[prop(into)] config: Signal<LayoutConfig>,
	/// Names brushed in any diagram sharing this signal.
	brushed: RwSignal<HashSet<String>>,
	#[prop(into, default = Signal::stored(false))] brush_enabled: Signal<bool>,
	#[prop(default = 600.0)] width: f64,
	#[prop(default = 700.0)] height: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(RadialDiagramState::new(width, height)));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let tooltip = RwSignal::new(None::<(Tooltip, f64, f64)>);
	let build_error = RwSignal::new(None::<String>);

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(width as u32);
		canvas.set_height(height as u32);

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
		match data.with(|data| Diagram::build(data, &config)) {
			Ok(diagram) => {
				info!(
					"built radial diagram: {} nodes, {} edges",
					diagram.nodes().len(),
					diagram.edges().len()
				);
				state_build.borrow_mut().set_diagram(diagram);
				build_error.set(None);
			}
			Err(err) => {
				error!("failed to build diagram: {err}");
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

	let state_toggle = state.clone();
	Effect::new(move |_| {
		if !brush_enabled.get() {
			state_toggle.borrow_mut().end_brush();
			brushed.set(HashSet::new());
		}
	});

	let pointer = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};
	let show_tooltip = move |s: &RadialDiagramState, x: f64, y: f64| {
		tooltip.set(s.tooltip().map(|t| (t, x + 10.0, y + 10.0)));
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		let p = s.to_diagram(x, y);
		if brush_enabled.get_untracked() && s.node_at(p).is_none() && s.edge_at(p).is_none() {
			s.start_brush(p);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let mut s = state_mm.borrow_mut();
		let p = s.to_diagram(x, y);
		if s.brush.active {
			let names = s.move_brush(p);
			drop(s);
			brushed.set(names);
			return;
		}
		s.hover_at(p);
		show_tooltip(&*s, x, y);
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let had_extent = state_mu.borrow_mut().end_brush();
		if !had_extent && brush_enabled.get_untracked() {
			brushed.set(HashSet::new());
		}
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(&ev) else {
			return;
		};
		let mut s = state_click.borrow_mut();
		let p: Point = s.to_diagram(x, y);
		s.click_at(p);
		show_tooltip(&*s, x, y);
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.end_brush();
		s.clear_hover();
		if s.tooltip().is_none() {
			tooltip.set(None);
		}
	};

	view! {
		<div class="radial-diagram" style="position: relative; display: inline-block;">
			<canvas
				node_ref=canvas_ref
				class="radial-diagram-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:click=on_click
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
