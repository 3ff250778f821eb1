//! 時間バケット集計
//!
//! ウィンドウを固定幅のバケットに分割し、バケットごとに
//! comparativeの平均を求める。チャート描画用の時系列を返す。

use super::time_range::is_in_range;
use crate::models::{Message, MoodBucket, TimeRange};
use chrono::{DateTime, Duration, Utc};

/// メッセージ群をバケットに集計
///
/// バケット開始時刻は `now - window` から `interval` 刻みで `now` まで（`now` を含む）。
/// `now` 以降の時刻を持つメッセージや最後のバケットを超えるものは捨てる。
/// 入力が空の場合はバケットを一つも生成しない（「データなし」表示用）。
pub fn aggregate<'a, I>(messages: I, now: DateTime<Utc>, range: TimeRange) -> Vec<MoodBucket>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut messages = messages.into_iter().peekable();
    if messages.peek().is_none() {
        return Vec::new();
    }

    let window_start = now - range.window();
    let interval_ms = range.interval().num_milliseconds();
    let start_ms = window_start.timestamp_millis();
    let now_ms = now.timestamp_millis();

    let bucket_count = ((now_ms - start_ms) / interval_ms + 1) as usize;

    // (comparative合計, 件数)
    let mut totals = vec![(0.0_f64, 0_usize); bucket_count];

    for message in messages.filter(|m| is_in_range(m.created_at, now, range)) {
        let created_ms = message.created_at.timestamp_millis();
        if created_ms >= now_ms {
            continue;
        }

        let index = (created_ms - start_ms).div_euclid(interval_ms);
        let Some(slot) = usize::try_from(index)
            .ok()
            .and_then(|index| totals.get_mut(index))
        else {
            continue;
        };

        slot.0 += message.comparative();
        slot.1 += 1;
    }

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (sum, count))| MoodBucket {
            bucket_start: window_start + Duration::milliseconds(index as i64 * interval_ms),
            score: if count > 0 { sum / count as f64 } else { 0.0 },
            message_count: count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{message_with, reference_now};

    #[test]
    fn test_empty_input_yields_no_buckets() {
        for range in TimeRange::ALL {
            assert!(aggregate(&Vec::<Message>::new(), reference_now(), range).is_empty());
        }
    }

    #[test]
    fn test_bucket_layout_per_range() {
        let now = reference_now();
        let messages = vec![message_with("a", "1", 0.5, now - Duration::minutes(1))];

        for range in TimeRange::ALL {
            let buckets = aggregate(&messages, now, range);
            let nominal =
                (range.window().num_milliseconds() / range.interval().num_milliseconds()) as usize;

            assert!(buckets.len() == nominal || buckets.len() == nominal + 1);
            assert_eq!(buckets[0].bucket_start, now - range.window());
            assert!(buckets
                .windows(2)
                .all(|pair| pair[0].bucket_start < pair[1].bucket_start));
            assert!(buckets.last().unwrap().bucket_start <= now);
        }
    }

    #[test]
    fn test_bucket_scores_are_means() {
        let now = reference_now();
        let start = now - TimeRange::Hour.window();
        let messages = vec![
            message_with("a", "1", 1.0, start + Duration::minutes(1)),
            message_with("b", "2", 0.0, start + Duration::minutes(4)),
            message_with("c", "1", -0.5, start + Duration::minutes(7)),
        ];

        let buckets = aggregate(&messages, now, TimeRange::Hour);

        assert_eq!(buckets.len(), 13);
        assert!((buckets[0].score - 0.5).abs() < f64::EPSILON);
        assert_eq!(buckets[0].message_count, 2);
        assert!((buckets[1].score + 0.5).abs() < f64::EPSILON);
        assert_eq!(buckets[1].message_count, 1);
        assert!(buckets[2..].iter().all(|b| b.score == 0.0 && b.message_count == 0));
    }

    #[test]
    fn test_bucket_boundaries_are_half_open() {
        let now = reference_now();
        let start = now - TimeRange::Day.window();
        let messages = vec![message_with("a", "1", 0.8, start + Duration::hours(3))];

        let buckets = aggregate(&messages, now, TimeRange::Day);

        assert_eq!(buckets[3].message_count, 1);
        assert_eq!(buckets[3].bucket_start, start + Duration::hours(3));
        assert_eq!(buckets[2].message_count, 0);
    }

    #[test]
    fn test_out_of_window_messages_produce_zero_series() {
        let now = reference_now();
        let messages = vec![message_with("old", "1", 0.9, now - Duration::days(30))];

        let buckets = aggregate(&messages, now, TimeRange::Week);

        assert_eq!(buckets.len(), 29);
        assert!(buckets.iter().all(|b| b.score == 0.0));
    }

    #[test]
    fn test_messages_at_or_after_now_are_dropped() {
        let now = reference_now();
        let messages = vec![
            message_with("now", "1", 1.0, now),
            message_with("future", "1", 1.0, now + Duration::minutes(2)),
            message_with("ok", "1", -1.0, now - Duration::seconds(1)),
        ];

        let buckets = aggregate(&messages, now, TimeRange::Hour);
        let total: usize = buckets.iter().map(|b| b.message_count).sum();

        assert_eq!(total, 1);
        assert_eq!(buckets[11].message_count, 1);
        assert_eq!(buckets[12].message_count, 0);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let now = reference_now();
        let messages = vec![
            message_with("a", "1", 0.3, now - Duration::minutes(30)),
            message_with("b", "2", -0.2, now - Duration::minutes(12)),
        ];

        assert_eq!(
            aggregate(&messages, now, TimeRange::Hour),
            aggregate(&messages, now, TimeRange::Hour)
        );
    }
}
