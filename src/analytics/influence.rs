//! ムードインフルエンサーのランキング

use crate::models::Message;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// 返却するインフルエンサーの上限
pub const MAX_INFLUENCERS: usize = 3;

/// 投稿者ごとの影響度統計
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InfluencerStats {
    /// 投稿者ID
    pub author_id: String,
    /// comparativeの平均
    pub average_sentiment: f64,
    /// メッセージ数
    pub message_count: usize,
    /// 影響度（|平均| × 件数）
    pub influence: f64,
}

impl InfluencerStats {
    /// ポジティブな影響かどうか
    pub fn is_positive(&self) -> bool {
        self.average_sentiment > 0.0
    }
}

/// 全投稿者の影響度を降順で返す
///
/// 同点の場合、数値IDの投稿者が数値の昇順で先に並び、
/// それ以外のIDは最初に登場した順になる（安定ソート）。
pub fn influencer_stats<'a, I>(messages: I) -> Vec<InfluencerStats>
where
    I: IntoIterator<Item = &'a Message>,
{
    // 登場順を保つため Vec でグルーピング
    let mut groups: Vec<(&str, f64, usize)> = Vec::new();

    for message in messages {
        match groups
            .iter_mut()
            .find(|(author_id, _, _)| *author_id == message.author_id)
        {
            Some(group) => {
                group.1 += message.comparative();
                group.2 += 1;
            }
            None => groups.push((message.author_id.as_str(), message.comparative(), 1)),
        }
    }

    groups.sort_by(|a, b| match (numeric_id(a.0), numeric_id(b.0)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let mut stats: Vec<InfluencerStats> = groups
        .into_iter()
        .map(|(author_id, sum, count)| {
            let average_sentiment = sum / count as f64;
            InfluencerStats {
                author_id: author_id.to_string(),
                average_sentiment,
                message_count: count,
                influence: average_sentiment.abs() * count as f64,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.influence.total_cmp(&a.influence));
    stats
}

/// 正規形の非負整数ID（"01" や "-1" は対象外）
fn numeric_id(id: &str) -> Option<u32> {
    let value: u32 = id.parse().ok()?;
    (value != u32::MAX && value.to_string() == id).then_some(value)
}

/// 上位3名の投稿者IDを返す
pub fn rank_influencers<'a, I>(messages: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    influencer_stats(messages)
        .into_iter()
        .take(MAX_INFLUENCERS)
        .map(|stats| stats.author_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::test_support::{message_with, reference_now};

    #[test]
    fn test_empty_input() {
        assert!(rank_influencers(&Vec::<Message>::new()).is_empty());
        assert!(influencer_stats(&Vec::<Message>::new()).is_empty());
    }

    #[test]
    fn test_single_author() {
        let now = reference_now();
        let messages = vec![
            message_with("a", "7", 1.0, now),
            message_with("b", "7", -1.0, now),
            message_with("c", "7", 3.0, now),
        ];

        assert_eq!(rank_influencers(&messages), vec!["7"]);

        let stats = influencer_stats(&messages);
        assert_eq!(stats[0].message_count, 3);
        assert!((stats[0].average_sentiment - 1.0).abs() < f64::EPSILON);
        assert!((stats[0].influence - 3.0).abs() < f64::EPSILON);
        assert!(stats[0].is_positive());
    }

    #[test]
    fn test_volume_and_magnitude_both_count() {
        let now = reference_now();
        let messages = vec![
            // 1: |0.5| * 1 = 0.5
            message_with("a", "1", 0.5, now),
            // 2: |-0.4| * 3 = 1.2
            message_with("b", "2", -0.4, now),
            message_with("c", "2", -0.4, now),
            message_with("d", "2", -0.4, now),
            // 3: |0.9| * 1 = 0.9
            message_with("e", "3", 0.9, now),
            // 4: |0.1| * 2 = 0.2
            message_with("f", "4", 0.1, now),
            message_with("g", "4", 0.1, now),
        ];

        assert_eq!(rank_influencers(&messages), vec!["2", "3", "1"]);

        let stats = influencer_stats(&messages);
        assert_eq!(stats.len(), 4);
        assert!(!stats[0].is_positive());
        assert!(stats
            .windows(2)
            .all(|pair| pair[0].influence >= pair[1].influence));
    }

    #[test]
    fn test_ties_keep_first_appearance_order() {
        let now = reference_now();
        let messages = vec![
            message_with("a", "z", 0.5, now),
            message_with("b", "y", -0.5, now),
            message_with("c", "x", 0.5, now),
            message_with("d", "w", 0.5, now),
        ];

        assert_eq!(rank_influencers(&messages), vec!["z", "y", "x"]);
    }

    #[test]
    fn test_ties_order_numeric_ids_first() {
        let now = reference_now();
        let messages = vec![
            message_with("a", "bob", 0.5, now),
            message_with("b", "5", 0.5, now),
            message_with("c", "12", -0.5, now),
            message_with("d", "2", 0.5, now),
            message_with("e", "02", 0.5, now),
        ];

        let ids: Vec<String> = influencer_stats(&messages)
            .into_iter()
            .map(|stats| stats.author_id)
            .collect();
        assert_eq!(ids, vec!["2", "5", "12", "bob", "02"]);
    }

    #[test]
    fn test_neutral_author_is_not_positive() {
        let now = reference_now();
        let messages = vec![message_with("a", "1", 0.0, now)];

        let stats = influencer_stats(&messages);
        assert_eq!(stats[0].influence, 0.0);
        assert!(!stats[0].is_positive());
    }
}
