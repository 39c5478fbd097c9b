//! Build-time configuration.
//!
//! There is no runtime config source in the browser, so values are baked in
//! from the environment of the `trunk build` that produced the bundle.

pub const FLOW_STORAGE_KEY: &str = "miraiNodeData";
pub const MANDALA_STORAGE_KEY: &str = "miraiMandalaData";

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

#[derive(Clone, Debug, PartialEq)]
pub struct RemoteConfig {
	pub endpoint: String,
	pub api_key: String,
	pub model: String,
	pub temperature: f64,
	pub max_tokens: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
	/// `None` keeps generation local.
	pub remote: Option<RemoteConfig>,
	pub flow_storage_key: &'static str,
	pub mandala_storage_key: &'static str,
}

impl AppConfig {
	pub fn from_build_env() -> Self {
		Self::from_values(
			option_env!("OPENAI_API_KEY"),
			option_env!("OPENAI_MODEL"),
			option_env!("OPENAI_ENDPOINT"),
		)
	}

	fn from_values(api_key: Option<&str>, model: Option<&str>, endpoint: Option<&str>) -> Self {
		let remote = api_key
			.map(str::trim)
			.filter(|key| !key.is_empty())
			.map(|key| RemoteConfig {
				endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
				api_key: key.to_string(),
				model: model.unwrap_or(DEFAULT_MODEL).to_string(),
				temperature: 0.7,
				max_tokens: 200,
			});
		Self {
			remote,
			flow_storage_key: FLOW_STORAGE_KEY,
			mandala_storage_key: MANDALA_STORAGE_KEY,
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self::from_values(None, None, None)
	}
}
