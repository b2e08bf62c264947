use leptos::prelude::*;

/// Text shown next to the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	pub title: Option<String>,
	pub lines: Vec<String>,
}

/// Floating tooltip at a position relative to the diagram container.
#[component]
pub fn TooltipView(tip: RwSignal<Option<(Tooltip, f64, f64)>>) -> impl IntoView {
	move || {
		tip.get().map(|(tip, x, y)| {
			view! {
				<div
					class="tooltip"
					style=format!(
						"position: absolute; left: {x}px; top: {y}px; background: #fff; padding: 5px; border: 1px solid #ccc; border-radius: 4px; pointer-events: none; opacity: 0.9;",
					)
				>
					{tip.title.map(|title| view! { <u>{title}</u><br /> })}
					{tip.lines.into_iter().map(|line| view! { {line}<br /> }).collect_view()}
				</div>
			}
		})
	}
}
