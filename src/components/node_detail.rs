use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::actions;
use crate::generate::Generator;
use crate::model::{NodeKind, Position};
use crate::store::{FlowCommand, FlowStore};

/// Panel for the selected neural node.
#[component]
pub fn NodeDetail(#[prop(into)] center: Signal<Position>) -> impl IntoView {
	let flow = expect_context::<FlowStore>();
	let generator = expect_context::<Generator>();
	let selected = Memo::new(move |_| flow.with(|s| s.selected_node().cloned()));

	let close = move |_: MouseEvent| {
		flow.dispatch(FlowCommand::Select(None));
	};

	move || {
		let node = selected.get()?;
		let generator = generator.clone();
		let id = node.id.clone();
		let add = move |_: MouseEvent| {
			actions::add_suggestions(flow, generator.clone(), id.clone(), center.get_untracked());
			flow.dispatch(FlowCommand::Select(None));
		};
		let kind = match node.kind {
			NodeKind::User => "あなたの行動",
			NodeKind::Suggestion => "次のステップ",
		};
		Some(view! {
			<div class="node-detail">
				<div class="node-detail-header">
					<h3>"ノード詳細"</h3>
					<button class="close" on:click=close>"×"</button>
				</div>
				<div class="node-kind">{kind}</div>
				<p>{node.label}</p>
				<button class="add-suggestion" on:click=add>"新しい提案を追加"</button>
			</div>
		})
	}
}
