//! ローリングウィンドウによる時間範囲フィルタ

use crate::models::{Message, TimeRange};
use chrono::{DateTime, Utc};

/// メッセージがウィンドウ内かどうか
///
/// `now - created_at < window` で判定する。境界ちょうどは範囲外、
/// 未来の時刻（時計ずれ）は範囲内として扱う。
pub fn is_in_range(created_at: DateTime<Utc>, now: DateTime<Utc>, range: TimeRange) -> bool {
    now.signed_duration_since(created_at) < range.window()
}

/// ウィンドウ内のメッセージを元の順序のまま抽出
pub fn filter_by_range<'a, I>(messages: I, now: DateTime<Utc>, range: TimeRange) -> Vec<Message>
where
    I: IntoIterator<Item = &'a Message>,
{
    messages
        .into_iter()
        .filter(|message| is_in_range(message.created_at, now, range))
        .cloned()
        .collect()
}
