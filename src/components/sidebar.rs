use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use web_sys::MouseEvent;

use crate::model::ViewMode;
use crate::store::{FlowCommand, FlowStore, MandalaCommand, MandalaStore};

fn mode_label(mode: ViewMode) -> &'static str {
	match mode {
		ViewMode::Neural => "ニューロン型マインドマップ",
		ViewMode::Mandala => "マンダラチャート",
	}
}

fn mode_description(mode: ViewMode) -> &'static str {
	match mode {
		ViewMode::Neural => "やったことメッセージを投げると、次に取るべき行動を生成します。",
		ViewMode::Mandala => "目標メッセージを投げると、必要な要素を生成し、埋めてくれます。",
	}
}

/// View switcher plus, in mandala mode, the list of charts.
#[component]
pub fn Sidebar() -> impl IntoView {
	let flow = expect_context::<FlowStore>();
	let mandala = expect_context::<MandalaStore>();
	let navigate = use_navigate();
	let view_mode = Memo::new(move |_| flow.with(|s| s.view_mode));

	let charts = Memo::new(move |_| {
		mandala.with(|s| {
			s.tree
				.charts()
				.map(|c| (c.id.clone(), c.label.clone(), s.current_chart.as_deref() == Some(c.id.as_str())))
				.collect::<Vec<_>>()
		})
	});

	let mode_button = move |mode: ViewMode| {
		let navigate = navigate.clone();
		let on_click = move |_: MouseEvent| {
			flow.dispatch(FlowCommand::SetViewMode(mode));
			navigate(&format!("/?mode={}", mode.as_str()), NavigateOptions::default());
		};
		view! {
			<button
				class="mode-button"
				class:active=move || view_mode.get() == mode
				on:click=on_click
			>
				{mode_label(mode)}
			</button>
		}
	};

	view! {
		<aside class="sidebar">
			<h2>"表示形式"</h2>
			<div class="mode-buttons">
				{mode_button(ViewMode::Neural)}
				{mode_button(ViewMode::Mandala)}
			</div>
			<h3>"機能説明"</h3>
			<p class="description">{move || mode_description(view_mode.get())}</p>
			<Show when=move || view_mode.get() == ViewMode::Mandala>
				<h3>"チャート一覧"</h3>
				<ul class="chart-list">
					{move || {
						charts
							.get()
							.into_iter()
							.map(|(id, label, current)| {
								view! {
									<li
										class:current=current
										on:click=move |_| {
											mandala.dispatch(MandalaCommand::SelectChart(id.clone()));
										}
									>
										{label}
									</li>
								}
							})
							.collect_view()
					}}
				</ul>
			</Show>
		</aside>
	}
}
