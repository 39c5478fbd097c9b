//! Chat-completion client used by the remote generation strategy.

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::templates::{ELEMENT_COUNT, SUGGESTION_CAP};
use crate::config::RemoteConfig;

const SUGGESTION_PROMPT: &str = r#"
あなたは未来の行動をサジェストするAIアシスタントです。
ユーザーの行動に対して、具体的で実行可能な次のアクションを5つ提案してください。
提案は以下の条件を満たす必要があります：

1. 具体的で実行可能であること
2. ポジティブな表現を使用すること
3. 短く簡潔な表現であること（30文字以内）
4. 必ず「！」で終わること

レスポンスは以下のようなJSON形式で返してください：
{
  "suggestions": ["提案1！", "提案2！", "提案3！", "提案4！", "提案5！"]
}
"#;

const ELEMENT_PROMPT: &str = r#"
あなたはマンダラチャートを生成するアシスタントです。
中心テーマに対して、それを実現するための8つの具体的な要素を提案してください。
以下の条件を満たすように生成してください：

1. 具体的で実行可能な内容
2. 中心テーマの目標達成に直接関連する内容
3. 相互に重複しない独立した内容
4. 簡潔な表現（1-3単語程度）

結果は以下のようなJSON形式で返してください：
{
  "elements": ["要素1", "要素2", "要素3", "要素4", "要素5", "要素6", "要素7", "要素8"]
}
"#;

#[derive(Deserialize)]
struct Completion {
	#[serde(default)]
	choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
	message: Message,
}

#[derive(Deserialize)]
struct Message {
	content: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionsPayload {
	suggestions: Vec<String>,
}

#[derive(Deserialize)]
struct ElementsPayload {
	elements: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChatClient {
	config: RemoteConfig,
}

impl ChatClient {
	pub fn new(config: RemoteConfig) -> Self {
		Self { config }
	}

	pub async fn suggestions(&self, action: &str) -> Result<Vec<String>> {
		let body = self.request_body(SUGGESTION_PROMPT, action, Some(self.config.max_tokens));
		let raw = self.post(&body).await?;
		parse_suggestions(&raw)
	}

	pub async fn elements(&self, topic: &str) -> Result<Vec<String>> {
		let prompt = format!("中心テーマ「{topic}」に関連する8つの要素を生成してください。");
		let body = self.request_body(ELEMENT_PROMPT, &prompt, None);
		let raw = self.post(&body).await?;
		parse_elements(&raw)
	}

	fn request_body(&self, system: &str, user: &str, max_tokens: Option<u32>) -> String {
		let mut body = json!({
			"model": self.config.model,
			"messages": [
				{ "role": "system", "content": system },
				{ "role": "user", "content": user },
			],
			"temperature": self.config.temperature,
			"response_format": { "type": "json_object" },
		});
		if let Some(max_tokens) = max_tokens {
			body["max_tokens"] = json!(max_tokens);
		}
		body.to_string()
	}

	async fn post(&self, body: &str) -> Result<String> {
		let window = web_sys::window().context("no window to fetch from")?;

		let init = RequestInit::new();
		init.set_method("POST");
		init.set_mode(RequestMode::Cors);
		init.set_body(&JsValue::from_str(body));

		let request = Request::new_with_str_and_init(&self.config.endpoint, &init).map_err(js_error)?;
		let headers = request.headers();
		headers.set("Content-Type", "application/json").map_err(js_error)?;
		headers
			.set("Authorization", &format!("Bearer {}", self.config.api_key))
			.map_err(js_error)?;

		let response: Response = JsFuture::from(window.fetch_with_request(&request))
			.await
			.map_err(js_error)?
			.dyn_into()
			.map_err(js_error)?;
		if !response.ok() {
			bail!("chat completion returned HTTP {}", response.status());
		}
		let text: js_sys::JsString = JsFuture::from(response.text().map_err(js_error)?)
			.await
			.map_err(js_error)?
			.dyn_into()
			.map_err(js_error)?;
		Ok(text.into())
	}
}

fn js_error(value: JsValue) -> anyhow::Error {
	anyhow!("{value:?}")
}

fn message_content(raw: &str) -> Result<String> {
	let completion: Completion = serde_json::from_str(raw).context("malformed completion envelope")?;
	completion
		.choices
		.into_iter()
		.next()
		.and_then(|choice| choice.message.content)
		.filter(|content| !content.trim().is_empty())
		.context("completion carried no content")
}

fn exactly(items: Vec<String>, expected: usize) -> Result<Vec<String>> {
	if items.len() != expected {
		bail!("expected {expected} entries, got {}", items.len());
	}
	let items: Vec<String> = items.into_iter().map(|s| s.trim().to_string()).collect();
	if items.iter().any(String::is_empty) {
		bail!("blank entry in response");
	}
	Ok(items)
}

pub fn parse_suggestions(raw: &str) -> Result<Vec<String>> {
	let payload: SuggestionsPayload =
		serde_json::from_str(&message_content(raw)?).context("content is not a suggestions object")?;
	exactly(payload.suggestions, SUGGESTION_CAP)
}

pub fn parse_elements(raw: &str) -> Result<Vec<String>> {
	let payload: ElementsPayload =
		serde_json::from_str(&message_content(raw)?).context("content is not an elements object")?;
	exactly(payload.elements, ELEMENT_COUNT)
}
