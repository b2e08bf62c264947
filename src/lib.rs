//! Character co-occurrence networks drawn as radial edge-bundling diagrams.
//!
//! [`layout`] is the browser-independent engine; the Leptos app on top of it
//! renders two diagrams side by side on canvases.

use leptos::prelude::*;
use leptos_meta::{Html, Meta, Style, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use log::{Level, info};

mod components;
pub mod error;
pub mod layout;
mod pages;

use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

const PAGE_CSS: &str = "
body { font-family: sans-serif; color: #333; margin: 0 1rem; }
.diagrams { display: flex; flex-wrap: wrap; gap: 1rem; }
.diagram-panel .controls { display: flex; flex-wrap: wrap; align-items: center; gap: 0.5rem; }
.diagram-panel fieldset { border: none; padding: 0; margin: 0; }
.diagram-error { color: #b00; }
";

/// Route `log` output to the browser console and report panics there.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Comparison page at `/`, anything else is a 404.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Character interactions" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />
		<Style>{PAGE_CSS}</Style>

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
