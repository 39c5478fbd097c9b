use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"ページが見つかりません"</h1>
			<a href="/">"トップへ戻る"</a>
		</div>
	}
}
