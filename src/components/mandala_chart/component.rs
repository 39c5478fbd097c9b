use leptos::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::layout::{CellView, UnitView, unit_views};
use crate::actions;
use crate::components::viewport::{PanState, ViewTransform, wheel_factor};
use crate::generate::Generator;
use crate::store::MandalaStore;

/// Pointer travel (screen px) below which a press still counts as a click.
const CLICK_SLOP: f64 = 3.0;

/// Pointer position relative to the centre of `container`, where the chart
/// origin sits before any pan.
fn pointer(container: NodeRef<leptos::html::Div>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let rect = container.get()?.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left() - rect.width() / 2.0,
		ev.client_y() as f64 - rect.top() - rect.height() / 2.0,
	))
}

#[component]
fn MandalaCell(
	cell: CellView,
	unit_id: String,
	cell_size: f64,
	on_expand: Callback<(String, usize)>,
) -> impl IntoView {
	let CellView {
		index,
		label,
		is_center,
		expanded,
	} = cell;
	let class = match (is_center, expanded, label.is_some()) {
		(true, ..) => "mandala-cell center",
		(_, true, _) => "mandala-cell expanded",
		(_, _, true) => "mandala-cell",
		_ => "mandala-cell empty",
	};
	let on_click = move |_: MouseEvent| {
		if !is_center {
			on_expand.run((unit_id.clone(), index));
		}
	};
	view! {
		<div
			class=class
			style=format!("width: {cell_size}px; height: {cell_size}px;")
			on:click=on_click
		>
			{label.unwrap_or_else(|| "…".to_string())}
		</div>
	}
}

#[component]
fn MandalaUnit(unit: UnitView, cell_size: f64, on_expand: Callback<(String, usize)>) -> impl IntoView {
	let style = format!(
		"left: {}px; top: {}px; width: {}px;",
		unit.anchor.x,
		unit.anchor.y,
		cell_size * 3.0,
	);
	let cells = unit
		.cells
		.into_iter()
		.map(|cell| {
			view! { <MandalaCell cell=cell unit_id=unit.id.clone() cell_size=cell_size on_expand=on_expand /> }
		})
		.collect_view();
	view! { <div class="mandala-unit" style=style>{cells}</div> }
}

/// Pannable, zoomable rendering of the current chart. Clicking a filled leaf
/// cell of the current chart grows a new unit next to its parent.
#[component]
pub fn MandalaChart() -> impl IntoView {
	let store = expect_context::<MandalaStore>();
	let generator = expect_context::<Generator>();
	let config = store.with_untracked(|s| s.config);

	let container = NodeRef::<leptos::html::Div>::new();
	// anchors are top-left corners; start with the first unit centred
	let half = config.unit_size() / 2.0;
	let transform = RwSignal::new(ViewTransform {
		x: -half,
		y: -half,
		k: 1.0,
	});
	let pan = StoredValue::new(PanState::default());
	let dragged = StoredValue::new(false);

	let units = Memo::new(move |_| {
		store.with(|s| match &s.current_chart {
			Some(chart) => unit_views(&s.tree, chart),
			None => Vec::new(),
		})
	});

	let on_expand = Callback::new(move |(unit_id, cell): (String, usize)| {
		// a pan that ends over a cell is not a click
		if dragged.get_value() {
			return;
		}
		actions::expand_cell(store, generator.clone(), unit_id, cell);
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(container, &ev) else {
			return;
		};
		dragged.set_value(false);
		pan.update_value(|p| p.begin(x, y, &transform.get_untracked()));
	};

	let on_mousemove = move |ev: MouseEvent| {
		if !pan.with_value(|p| p.active) {
			return;
		}
		let Some((x, y)) = pointer(container, &ev) else {
			return;
		};
		let (dx, dy) = pan.with_value(|p| (x - p.start_x, y - p.start_y));
		if (dx * dx + dy * dy).sqrt() > CLICK_SLOP {
			dragged.set_value(true);
		}
		transform.update(|t| pan.with_value(|p| p.update(x, y, t)));
	};

	let on_release = move |_: MouseEvent| pan.update_value(PanState::end);

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(container, &ev) else {
			return;
		};
		transform.update(|t| t.zoom_at(x, y, wheel_factor(ev.delta_y()), config.min_zoom, config.max_zoom));
	};

	view! {
		<div
			node_ref=container
			class="mandala-chart"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_release
			on:mouseleave=on_release
			on:wheel=on_wheel
		>
			<Show
				when=move || units.with(|u| !u.is_empty())
				fallback=|| view! { <p class="mandala-empty">"目標を入力してください"</p> }
			>
				<div class="mandala-layer" style=move || format!("transform: {};", transform.get().css())>
					{move || {
						units
							.get()
							.into_iter()
							.map(|unit| view! { <MandalaUnit unit=unit cell_size=config.cell_size on_expand=on_expand /> })
							.collect_view()
					}}
				</div>
			</Show>
		</div>
	}
}
