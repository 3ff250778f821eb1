//! トレンドキーワード抽出

use crate::models::Message;
use std::collections::HashMap;

/// 除外する一般語
pub const STOP_WORDS: [&str; 8] = [
    "that", "this", "with", "from", "have", "would", "about", "there",
];

/// この文字数以下の語は除外
pub const MIN_KEYWORD_CHARS: usize = 3;

/// キーワードクラウドの既定表示件数
pub const DEFAULT_KEYWORD_LIMIT: usize = 30;

/// 語がキーワード候補かどうか
pub fn is_keyword(token: &str) -> bool {
    token.chars().count() > MIN_KEYWORD_CHARS && !STOP_WORDS.contains(&token)
}

/// メッセージ群から小文字キーワードの出現回数を数える
///
/// 空白区切りのみで分割するため、前後の句読点は語に残る（"team!" と "team" は別語）。
pub fn extract_keywords<'a, I>(messages: I) -> HashMap<String, usize>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut keywords = HashMap::new();

    for message in messages {
        let lowered = message.text.to_lowercase();
        for token in lowered.split_whitespace().filter(|token| is_keyword(token)) {
            *keywords.entry(token.to_string()).or_insert(0) += 1;
        }
    }

    keywords
}

/// 出現回数の降順（同数は語の昇順）で上位を返す
pub fn top_keywords(keywords: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = keywords
        .iter()
        .map(|(token, count)| (token.clone(), *count))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
