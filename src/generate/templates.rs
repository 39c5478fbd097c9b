use rand::Rng;
use rand::seq::SliceRandom;

pub const SUGGESTION_CAP: usize = 5;
pub const ELEMENT_COUNT: usize = 8;

/// Every template the local strategy can draw from for `action`.
pub fn suggestion_templates(action: &str) -> Vec<String> {
	vec![
		format!("{action}を毎日続けよう！"),
		format!("{action}の回数を5回増やそう！"),
		format!("{action}の質を高めてみよう！"),
		format!("友達と一緒に{action}してみよう！"),
		format!("{action}の記録をつけてみよう！"),
		format!("{action}のやり方を工夫してみよう！"),
		format!("{action}を習慣化しよう！"),
		format!("{action}の目標を設定しよう！"),
		format!("{action}を楽しむ方法を見つけよう！"),
		format!("{action}の効果を確認しよう！"),
	]
}

pub fn shuffled_suggestions<R: Rng + ?Sized>(action: &str, rng: &mut R) -> Vec<String> {
	let mut pool = suggestion_templates(action);
	pool.shuffle(rng);
	pool.truncate(SUGGESTION_CAP);
	pool
}

pub fn fallback_suggestions(action: &str) -> Vec<String> {
	vec![
		format!("{action}を継続的に実践しよう！"),
		format!("{action}の質を向上させよう！"),
		format!("{action}を記録していこう！"),
		format!("{action}を習慣化しよう！"),
		format!("{action}を楽しもう！"),
	]
}

const ELEMENT_TABLE: &[(&str, [&str; ELEMENT_COUNT])] = &[
	(
		"英会話を上達させたい",
		[
			"発音練習",
			"語彙強化",
			"リスニング力向上",
			"スピーキング練習",
			"文法の基礎固め",
			"オンライン英会話",
			"海外ドラマ視聴",
			"英語ニュース購読",
		],
	),
	(
		"発音練習",
		[
			"シャドーイング",
			"発音記号学習",
			"音声アプリ活用",
			"ネイティブ音声模倣",
			"録音して確認",
			"リピーティング",
			"口の形の練習",
			"アクセント練習",
		],
	),
	(
		"語彙強化",
		[
			"単語カード作成",
			"例文暗記",
			"単語帳アプリ",
			"関連語学習",
			"熟語・イディオム",
			"分野別単語",
			"語源学習",
			"使用頻度確認",
		],
	),
];

/// Local mandala elements: exact-label lookup, otherwise numbered placeholders.
pub fn lookup_elements(topic: &str) -> Vec<String> {
	match ELEMENT_TABLE.iter().find(|(key, _)| *key == topic) {
		Some((_, elements)) => elements.iter().map(|e| e.to_string()).collect(),
		None => (1..=ELEMENT_COUNT).map(|i| format!("要素{i}")).collect(),
	}
}

pub fn fallback_elements(topic: &str) -> Vec<String> {
	["計画", "準備", "実践", "評価", "改善", "継続", "発展", "共有"]
		.iter()
		.map(|suffix| format!("{topic}の{suffix}"))
		.collect()
}
