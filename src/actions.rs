//! User-triggered workflows that wait on the generator.
//!
//! Each one raises the owning store's loading flag, awaits generation on the
//! local task queue and then dispatches the result. A workflow is skipped
//! while its store is already loading.

use leptos::task::spawn_local;
use log::debug;

use crate::generate::Generator;
use crate::model::Position;
use crate::store::{FlowCommand, FlowStore, MandalaCommand, MandalaStore};

fn begin_flow(flow: FlowStore) -> bool {
	if flow.with_untracked(|s| s.is_loading) {
		debug!("Generation already running, ignoring submission");
		return false;
	}
	flow.dispatch(FlowCommand::SetLoading(true))
}

fn begin_mandala(mandala: MandalaStore) -> bool {
	if mandala.with_untracked(|s| s.is_loading) {
		debug!("Generation already running, ignoring submission");
		return false;
	}
	mandala.dispatch(MandalaCommand::SetLoading(true))
}

/// Adds `label` as a new action under the selected node (or the root).
pub fn submit_action(flow: FlowStore, generator: Generator, label: String, center: Position) {
	let label = label.trim().to_string();
	if label.is_empty() || !begin_flow(flow) {
		return;
	}
	spawn_local(async move {
		let suggestions = generator.suggestions(&label).await;
		flow.dispatch(FlowCommand::AddAction {
			label,
			suggestions,
			center,
		});
		flow.dispatch(FlowCommand::SetLoading(false));
	});
}

/// Grows another round of suggestions from an existing node.
pub fn add_suggestions(flow: FlowStore, generator: Generator, source_id: String, center: Position) {
	let Some(label) = flow.with_untracked(|s| s.node(&source_id).map(|n| n.label.clone())) else {
		return;
	};
	if !begin_flow(flow) {
		return;
	}
	spawn_local(async move {
		let suggestions = generator.suggestions(&label).await;
		flow.dispatch(FlowCommand::AddSuggestions {
			source_id,
			suggestions,
			center,
		});
		flow.dispatch(FlowCommand::SetLoading(false));
	});
}

/// Starts a new mandala chart around `topic`.
pub fn submit_topic(mandala: MandalaStore, generator: Generator, topic: String) {
	let topic = topic.trim().to_string();
	if topic.is_empty() || !begin_mandala(mandala) {
		return;
	}
	spawn_local(async move {
		let elements = generator.elements(&topic).await;
		mandala.dispatch(MandalaCommand::CreateChart {
			label: topic,
			anchor: None,
			elements,
		});
		mandala.dispatch(MandalaCommand::SetLoading(false));
	});
}

/// Expands the leaf in `cell` of the unit centred on `center_id`. Cells that
/// cannot expand are dropped before anything is generated.
pub fn expand_cell(mandala: MandalaStore, generator: Generator, center_id: String, cell: usize) {
	let plan = mandala.with_untracked(|s| {
		s.tree
			.plan_expansion(&center_id, cell, s.current_chart.as_deref(), &s.config)
	});
	let plan = match plan {
		Ok(plan) => plan,
		Err(rejection) => {
			debug!("Cell {cell} of {center_id} cannot expand: {rejection:?}");
			return;
		}
	};
	if !begin_mandala(mandala) {
		return;
	}
	spawn_local(async move {
		let elements = generator.elements(&plan.label).await;
		mandala.dispatch(MandalaCommand::Expand {
			center_id,
			cell,
			elements,
		});
		mandala.dispatch(MandalaCommand::SetLoading(false));
	});
}
