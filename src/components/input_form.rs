use leptos::prelude::*;
use web_sys::SubmitEvent;

use crate::actions;
use crate::generate::Generator;
use crate::model::{Position, ViewMode};
use crate::store::{FlowStore, MandalaStore};

/// Bottom text box. In the neural view it adds an action under the selected
/// node; in the mandala view it starts a new chart.
#[component]
pub fn InputForm(#[prop(into)] center: Signal<Position>) -> impl IntoView {
	let flow = expect_context::<FlowStore>();
	let mandala = expect_context::<MandalaStore>();
	let generator = expect_context::<Generator>();
	let text = RwSignal::new(String::new());

	let view_mode = Memo::new(move |_| flow.with(|s| s.view_mode));
	let selected_label = Memo::new(move |_| {
		flow.with(|s| {
			s.selected_node()
				.filter(|_| s.view_mode == ViewMode::Neural)
				.map(|n| n.label.clone())
		})
	});
	let is_loading = Memo::new(move |_| match view_mode.get() {
		ViewMode::Neural => flow.with(|s| s.is_loading),
		ViewMode::Mandala => mandala.with(|s| s.is_loading),
	});

	let placeholder = move || match (view_mode.get(), selected_label.with(Option::is_some)) {
		(ViewMode::Mandala, _) => "目標を入力...",
		(ViewMode::Neural, true) => "選択したノードから新しい行動を入力...",
		(ViewMode::Neural, false) => "新しい行動を入力...",
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let input = text.get_untracked().trim().to_string();
		if input.is_empty() || is_loading.get_untracked() {
			return;
		}
		match view_mode.get_untracked() {
			ViewMode::Neural => actions::submit_action(flow, generator.clone(), input, center.get_untracked()),
			ViewMode::Mandala => actions::submit_topic(mandala, generator.clone(), input),
		}
		text.set(String::new());
	};

	view! {
		<form class="input-form" on:submit=on_submit>
			{move || {
				selected_label
					.get()
					.map(|label| view! { <div class="input-context">{format!("「{label}」から新しい行動を追加")}</div> })
			}}
			<div class="input-row">
				<input
					type="text"
					prop:value=move || text.get()
					on:input=move |ev| text.set(event_target_value(&ev))
					placeholder=placeholder
				/>
				<button type="submit" disabled=move || is_loading.get()>
					"送信"
				</button>
			</div>
		</form>
	}
}
