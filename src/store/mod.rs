//! Reactive application state.
//!
//! Each store is a `Copy` handle around one signal. Every mutation is a
//! command applied by the state itself, so the state types stay plain data
//! and can be tested without a reactive runtime.

mod flow;
mod mandala;
pub mod persist;
mod seed;

use leptos::prelude::*;

pub use flow::{FlowCommand, FlowSnapshot, FlowState};
pub use mandala::{MandalaCommand, MandalaSnapshot, MandalaState};

/// State that changes only through commands.
pub trait Reducer {
	type Command;

	/// Applies `command`; `false` means it was rejected and nothing changed.
	fn apply(&mut self, command: Self::Command) -> bool;
}

pub struct Store<S: 'static> {
	state: RwSignal<S>,
}

impl<S: 'static> Clone for Store<S> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<S: 'static> Copy for Store<S> {}

impl<S> Store<S>
where
	S: Reducer + Send + Sync + 'static,
{
	pub fn new(initial: S) -> Self {
		Self {
			state: RwSignal::new(initial),
		}
	}

	/// Subscribers are only notified when the command changed something.
	pub fn dispatch(&self, command: S::Command) -> bool {
		self.state
			.try_maybe_update(|state| {
				let changed = state.apply(command);
				(changed, changed)
			})
			.unwrap_or(false)
	}

	/// Tracked read.
	pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
		self.state.with(f)
	}

	pub fn with_untracked<R>(&self, f: impl FnOnce(&S) -> R) -> R {
		self.state.with_untracked(f)
	}
}

pub type FlowStore = Store<FlowState>;
pub type MandalaStore = Store<MandalaState>;
