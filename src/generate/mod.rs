//! Follow-up text generation.
//!
//! Callers never see an error: the remote strategy masks every failure with
//! a templated fallback derived from the input label.

mod remote;
pub(crate) mod templates;

use log::{info, warn};

use crate::config::AppConfig;
use remote::ChatClient;

pub use templates::{
	ELEMENT_COUNT, SUGGESTION_CAP, fallback_elements, fallback_suggestions, lookup_elements,
	shuffled_suggestions,
};

#[derive(Clone, Debug, PartialEq)]
pub enum Generator {
	Local,
	Remote(ChatClient),
}

impl Generator {
	pub fn from_config(config: &AppConfig) -> Self {
		match &config.remote {
			Some(remote) => {
				info!("Using remote generation via {}", remote.endpoint);
				Self::Remote(ChatClient::new(remote.clone()))
			}
			None => {
				info!("No API key configured, using local templates");
				Self::Local
			}
		}
	}

	/// Up to five follow-up actions for `action`.
	pub async fn suggestions(&self, action: &str) -> Vec<String> {
		match self {
			Self::Local => shuffled_suggestions(action, &mut rand::thread_rng()),
			Self::Remote(client) => match client.suggestions(action).await {
				Ok(suggestions) => suggestions,
				Err(err) => {
					warn!("Remote suggestions for {action:?} failed, using fallback: {err:#}");
					fallback_suggestions(action)
				}
			},
		}
	}

	/// Eight supporting elements for a mandala centre labelled `topic`.
	pub async fn elements(&self, topic: &str) -> Vec<String> {
		match self {
			Self::Local => lookup_elements(topic),
			Self::Remote(client) => match client.elements(topic).await {
				Ok(elements) => elements,
				Err(err) => {
					warn!("Remote elements for {topic:?} failed, using fallback: {err:#}");
					fallback_elements(topic)
				}
			},
		}
	}
}
