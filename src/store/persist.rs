//! Best-effort snapshots in browser-local key/value storage.
//!
//! A snapshot that is missing, unparsable or carries another version is
//! treated as absent. Write failures are logged and dropped.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const SNAPSHOT_VERSION: u32 = 1;

pub trait KeyValueStore {
	fn read(&self, key: &str) -> Option<String>;
	fn write(&self, key: &str, value: &str) -> Result<()>;
}

pub struct LocalStorage(web_sys::Storage);

impl LocalStorage {
	pub fn open() -> Option<Self> {
		web_sys::window()?.local_storage().ok().flatten().map(Self)
	}
}

impl KeyValueStore for LocalStorage {
	fn read(&self, key: &str) -> Option<String> {
		self.0.get_item(key).ok().flatten()
	}

	fn write(&self, key: &str, value: &str) -> Result<()> {
		self.0
			.set_item(key, value)
			.map_err(|e| anyhow!("localStorage rejected write: {e:?}"))
	}
}

/// Session-only storage used when the browser denies `localStorage`.
#[derive(Default)]
pub struct MemoryStorage(RefCell<HashMap<String, String>>);

impl KeyValueStore for MemoryStorage {
	fn read(&self, key: &str) -> Option<String> {
		self.0.borrow().get(key).cloned()
	}

	fn write(&self, key: &str, value: &str) -> Result<()> {
		self.0.borrow_mut().insert(key.to_string(), value.to_string());
		Ok(())
	}
}

pub fn open_storage() -> Rc<dyn KeyValueStore> {
	match LocalStorage::open() {
		Some(storage) => Rc::new(storage),
		None => {
			warn!("localStorage unavailable, state will not survive a reload");
			Rc::new(MemoryStorage::default())
		}
	}
}

pub trait Snapshot: Serialize + DeserializeOwned {
	fn version(&self) -> u32;
}

pub fn load<T: Snapshot>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
	let raw = store.read(key)?;
	match serde_json::from_str::<T>(&raw) {
		Ok(snapshot) if snapshot.version() == SNAPSHOT_VERSION => Some(snapshot),
		Ok(snapshot) => {
			warn!("Ignoring {key} snapshot with version {}", snapshot.version());
			None
		}
		Err(err) => {
			warn!("Ignoring unreadable {key} snapshot: {err}");
			None
		}
	}
}

pub fn save<T: Snapshot>(store: &dyn KeyValueStore, key: &str, snapshot: &T) {
	let result = serde_json::to_string(snapshot)
		.context("serializing snapshot")
		.and_then(|raw| store.write(key, &raw));
	if let Err(err) = result {
		warn!("Failed to persist {key}: {err:#}");
	}
}
