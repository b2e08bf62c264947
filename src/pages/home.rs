use std::collections::HashSet;

use leptos::prelude::*;

use crate::components::arc_diagram::ArcDiagramCanvas;
use crate::components::radial_diagram::RadialDiagramCanvas;
use crate::layout::{Dataset, LayoutConfig, LetterRange, NodeOrder, WeightMode};

/// A bundled dataset the selectors can switch between.
struct DatasetSource {
	label: &'static str,
	json: &'static str,
}

const DATASETS: [DatasetSource; 2] = [
	DatasetSource {
		label: "Episode I",
		json: include_str!("../../assets/datasets/episode-1-interactions.json"),
	},
	DatasetSource {
		label: "Episode IV",
		json: include_str!("../../assets/datasets/episode-4-interactions.json"),
	},
];

fn parse_letter(ev: &leptos::ev::Event) -> Option<u8> {
	event_target_value(ev).parse::<u8>().ok().filter(|idx| *idx <= 25)
}

/// Letter `<option>`s A through Z.
fn letter_options(selected: impl Fn() -> u8 + Copy + Send + Sync + 'static) -> impl IntoView {
	(0u8..=25)
		.map(|idx| {
			view! {
				<option value=idx.to_string() selected=move || selected() == idx>
					{LetterRange::letter(idx).to_string()}
				</option>
			}
		})
		.collect_view()
}

/// Radial and arc views of one dataset, sharing its ordering and letter range.
#[component]
fn DiagramPanel(
	initial: usize,
	brushed: RwSignal<HashSet<String>>,
	#[prop(into)] brush_enabled: Signal<bool>,
) -> impl IntoView {
	let selected = RwSignal::new(initial.min(DATASETS.len() - 1));
	let config = RwSignal::new(LayoutConfig::default());

	// Parsed once per selection; both diagrams and the error line read it.
	let parsed = Memo::new(move |_| {
		Dataset::from_json(DATASETS[selected.get()].json).map_err(|err| err.to_string())
	});
	let data = Signal::derive(move || {
		parsed.with(|parsed| parsed.as_ref().ok().cloned().unwrap_or_default())
	});
	let parse_error = Signal::derive(move || parsed.with(|parsed| parsed.as_ref().err().cloned()));

	let order = move || config.with(|c| c.order);
	let letters = move || config.with(|c| c.letter_range);

	let on_dataset = move |ev: leptos::ev::Event| {
		if let Ok(idx) = event_target_value(&ev).parse::<usize>()
			&& idx < DATASETS.len()
		{
			brushed.set(HashSet::new());
			selected.set(idx);
		}
	};
	let on_min = move |ev: leptos::ev::Event| {
		if let Some(min) = parse_letter(&ev) {
			config.update(|c| {
				c.letter_range.min = min;
				c.letter_range.max = c.letter_range.max.max(min);
			});
		}
	};
	let on_max = move |ev: leptos::ev::Event| {
		if let Some(max) = parse_letter(&ev) {
			config.update(|c| {
				c.letter_range.max = max;
				c.letter_range.min = c.letter_range.min.min(max);
			});
		}
	};
	let radio_name = format!("order-{initial}");

	view! {
		<section class="diagram-panel">
			<div class="controls">
				<label>
					"Dataset "
					<select on:change=on_dataset>
						{DATASETS
							.iter()
							.enumerate()
							.map(|(idx, source)| {
								view! {
									<option value=idx.to_string() selected=move || selected.get() == idx>
										{source.label}
									</option>
								}
							})
							.collect_view()}
					</select>
				</label>
				<fieldset>
					<legend>"Order"</legend>
					{[NodeOrder::Alphabetical, NodeOrder::Occurrences]
						.into_iter()
						.map(|value| {
							view! {
								<label>
									<input
										type="radio"
										name=radio_name.clone()
										prop:checked=move || order() == value
										on:change=move |_| config.update(|c| c.order = value)
									/>
									{value.label()}
								</label>
							}
						})
						.collect_view()}
				</fieldset>
				<label>
					"From "
					<select on:change=on_min>{letter_options(move || letters().min)}</select>
				</label>
				<label>
					" to "
					<select on:change=on_max>{letter_options(move || letters().max)}</select>
				</label>
				<label>
					<input
						type="checkbox"
						prop:checked=move || config.with(|c| c.weight_mode == WeightMode::Degree)
						on:change=move |ev| {
							let degree = event_target_checked(&ev);
							config
								.update(|c| {
									c.weight_mode = if degree {
										WeightMode::Degree
									} else {
										WeightMode::Dataset
									};
								});
						}
					/>
					"Weight by connections"
				</label>
			</div>
			{move || parse_error.get().map(|err| view! { <p class="diagram-error">{err}</p> })}
			<RadialDiagramCanvas
				data=data
				config=config
				brushed=brushed
				brush_enabled=brush_enabled
			/>
			<ArcDiagramCanvas data=data config=config brushed=brushed />
		</section>
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	// Brushing in either diagram highlights the same names in both.
	let brushed = RwSignal::new(HashSet::<String>::new());
	let brush_enabled = RwSignal::new(false);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="page">
				<h1>"Character interactions"</h1>
				<p class="subtitle">
					"Hover a character or an edge to focus it. Click a radial diagram to pin. Enable brushing to select characters in every view."
				</p>
				<label class="brush-toggle">
					<input
						type="checkbox"
						prop:checked=move || brush_enabled.get()
						on:change=move |ev| brush_enabled.set(event_target_checked(&ev))
					/>
					"Brush"
				</label>
				<div class="diagrams">
					<DiagramPanel initial=0 brushed=brushed brush_enabled=brush_enabled />
					<DiagramPanel initial=1 brushed=brushed brush_enabled=brush_enabled />
				</div>
			</div>
		</ErrorBoundary>
	}
}
