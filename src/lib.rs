//! Leptos client-side app wiring and routes.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// only needed for its `js` feature
use getrandom as _;

// Modules
mod actions;
mod components;
mod config;
mod generate;
mod mandala;
mod model;
mod pages;
mod store;

use crate::config::AppConfig;
use crate::generate::Generator;
use crate::store::persist;
use crate::store::{FlowSnapshot, FlowState, FlowStore, MandalaSnapshot, MandalaState, MandalaStore};

// Top-Level pages
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// Restores both stores from local storage, provides them and the generator
/// as context, and writes a snapshot back whenever persisted state changes.
fn provide_state(config: &AppConfig) {
	let storage = persist::open_storage();

	let flow = FlowStore::new(
		persist::load::<FlowSnapshot>(&*storage, config.flow_storage_key)
			.map(FlowState::from_snapshot)
			.unwrap_or_default(),
	);
	let mandala = MandalaStore::new(
		persist::load::<MandalaSnapshot>(&*storage, config.mandala_storage_key)
			.map(MandalaState::from_snapshot)
			.unwrap_or_default(),
	);
	info!(
		"Restored {} nodes and {} mandala cells",
		flow.with_untracked(|s| s.nodes.len()),
		mandala.with_untracked(|s| s.tree.nodes().len()),
	);

	// selection and loading flags are not part of the snapshots
	let flow_snapshot = Memo::new(move |_| flow.with(FlowState::snapshot));
	let mandala_snapshot = Memo::new(move |_| mandala.with(MandalaState::snapshot));

	let (flow_storage, flow_key) = (storage.clone(), config.flow_storage_key);
	Effect::new(move |_| {
		flow_snapshot.with(|snapshot| persist::save(&*flow_storage, flow_key, snapshot));
	});
	let mandala_key = config.mandala_storage_key;
	Effect::new(move |_| {
		mandala_snapshot.with(|snapshot| persist::save(&*storage, mandala_key, snapshot));
	});

	provide_context(flow);
	provide_context(mandala);
	provide_context(Generator::from_config(config));
}

/// An app router which renders the homepage and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	provide_state(&AppConfig::from_build_env());

	view! {
		<Html attr:lang="ja" attr:dir="ltr" attr:data-theme="dark" />

		// sets the document title
		<Title text="Mirai Map" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
			</Routes>
		</Router>
	}
}
