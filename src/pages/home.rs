use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::components::force_graph::ForceGraphCanvas;
use crate::components::input_form::InputForm;
use crate::components::mandala_chart::MandalaChart;
use crate::components::node_detail::NodeDetail;
use crate::components::sidebar::Sidebar;
use crate::model::{Position, ViewMode};
use crate::store::{FlowCommand, FlowStore, MandalaStore};

/// Single page: sidebar, the active view and the input box.
#[component]
pub fn Home() -> impl IntoView {
	let flow = expect_context::<FlowStore>();
	let mandala = expect_context::<MandalaStore>();
	let query = use_query_map();
	let center = RwSignal::new(Position::new(400.0, 300.0));

	// runs on load and on every history navigation; unknown values keep the mode
	Effect::new(move |_| {
		let mode = query.with(|q| q.get("mode"));
		if let Some(mode) = mode.as_deref().and_then(ViewMode::parse) {
			flow.dispatch(FlowCommand::SetViewMode(mode));
		}
	});

	let view_mode = Memo::new(move |_| flow.with(|s| s.view_mode));
	// selection and loading changes must not restart the layout
	let graph = Memo::new(move |_| flow.with(|s| s.graph()));
	let is_loading = Memo::new(move |_| flow.with(|s| s.is_loading) || mandala.with(|s| s.is_loading));

	let on_node_click = Callback::new(move |id: String| {
		flow.dispatch(FlowCommand::Select(Some(id)));
	});
	let on_resize = Callback::new(move |(w, h): (f64, f64)| {
		center.set(Position::new(w / 2.0, h / 2.0));
	});

	view! {
		<div class="app">
			<Sidebar />
			<main class="workspace">
				{move || match view_mode.get() {
					ViewMode::Neural => {
						view! {
							<div class="fullscreen-graph">
								<ForceGraphCanvas graph=graph on_node_click=on_node_click on_resize=on_resize />
								<NodeDetail center=center />
							</div>
						}
							.into_any()
					}
					ViewMode::Mandala => view! { <MandalaChart /> }.into_any(),
				}}
				<InputForm center=center />
				<Show when=move || is_loading.get()>
					<div class="loading-overlay">"アイデアを生成中..."</div>
				</Show>
			</main>
		</div>
	}
}
