use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

pub mod arc_diagram;
pub mod radial_diagram;
mod tooltip;

// Upper bound on one animation step, e.g. after a backgrounded tab resumes.
const MAX_FRAME_SECS: f64 = 0.1;

/// Schedules `cb` for the next animation frame.
fn request_frame(cb: &Closure<dyn FnMut()>) {
	if let Some(window) = web_sys::window() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

/// Seconds since `last`, which is advanced to now.
fn frame_delta(last: &mut f64) -> f64 {
	let now = js_sys::Date::now();
	let dt = ((now - *last) / 1000.0).clamp(0.0, MAX_FRAME_SECS);
	*last = now;
	dt
}
