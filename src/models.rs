use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 感情分析結果
///
/// メッセージ作成時に一度だけ計算され、以後は読み取り専用。
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SentimentResult {
    /// マッチした語の重みの合計
    pub score: i32,
    /// トークン数で正規化したスコア（トークンが無ければ0）
    pub comparative: f64,
    /// 解析対象のトークン
    pub tokens: Vec<String>,
    /// 辞書にマッチした語
    pub words: Vec<String>,
    /// ポジティブに寄与した語
    pub positive: Vec<String>,
    /// ネガティブに寄与した語
    pub negative: Vec<String>,
}

impl SentimentResult {
    /// トークンを一つも含まない結果
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// チャットメッセージ
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub id: String,
    pub author_id: String,
    pub text: String,
    /// 投稿時刻（保存形式はエポックからのミリ秒）
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    pub sentiment: SentimentResult,
}

impl Message {
    /// 正規化済み感情スコア
    pub fn comparative(&self) -> f64 {
        self.sentiment.comparative
    }
}

/// チームメンバー
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamMember {
    pub id: String,
    pub display_name: String,
    pub avatar_ref: String,
    pub role: String,
    /// メッセージ履歴のコピー（派生キャッシュ、正はメッセージログ）
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl TeamMember {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        avatar_ref: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            avatar_ref: avatar_ref.into(),
            role: role.into(),
            messages: Vec::new(),
        }
    }
}

/// 集計対象の時間範囲
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// 直近1時間（5分刻み）
    Hour,
    /// 直近24時間（1時間刻み）
    #[default]
    Day,
    /// 直近7日間（6時間刻み）
    Week,
}

impl TimeRange {
    pub const ALL: [TimeRange; 3] = [TimeRange::Hour, TimeRange::Day, TimeRange::Week];

    /// ウィンドウ長
    pub fn window(self) -> Duration {
        match self {
            TimeRange::Hour => Duration::hours(1),
            TimeRange::Day => Duration::hours(24),
            TimeRange::Week => Duration::days(7),
        }
    }

    /// バケット幅
    pub fn interval(self) -> Duration {
        match self {
            TimeRange::Hour => Duration::minutes(5),
            TimeRange::Day => Duration::hours(1),
            TimeRange::Week => Duration::hours(6),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeRange::Hour),
            "day" => Ok(TimeRange::Day),
            "week" => Ok(TimeRange::Week),
            other => Err(format!(
                "unknown time range '{}', expected hour, day or week",
                other
            )),
        }
    }
}

/// チャート1点分の集計結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodBucket {
    /// バケット開始時刻
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub bucket_start: DateTime<Utc>,
    /// バケット内のcomparative平均（空なら0）
    pub score: f64,
    /// バケット内のメッセージ数
    pub message_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_time_range_durations() {
        assert_eq!(TimeRange::Hour.window(), Duration::minutes(60));
        assert_eq!(TimeRange::Day.window(), Duration::hours(24));
        assert_eq!(TimeRange::Week.window(), Duration::hours(168));

        assert_eq!(TimeRange::Hour.interval(), Duration::minutes(5));
        assert_eq!(TimeRange::Day.interval(), Duration::minutes(60));
        assert_eq!(TimeRange::Week.interval(), Duration::hours(6));
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!("hour".parse::<TimeRange>(), Ok(TimeRange::Hour));
        assert_eq!(" Week ".parse::<TimeRange>(), Ok(TimeRange::Week));
        assert!("month".parse::<TimeRange>().is_err());

        for range in TimeRange::ALL {
            assert_eq!(range.to_string().parse::<TimeRange>(), Ok(range));
        }
    }

    #[test]
    fn test_default_range_is_day() {
        assert_eq!(TimeRange::default(), TimeRange::Day);
    }

    #[test]
    fn test_message_timestamp_serialized_as_millis() {
        let message = Message {
            id: "m1".to_string(),
            author_id: "1".to_string(),
            text: "hello".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
            sentiment: SentimentResult::neutral(),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["created_at"], 1_700_000_000_123i64);

        let restored: Message = serde_json::from_value(json).unwrap();
        assert_eq!(restored, message);
    }

    #[test]
    fn test_team_member_without_history_deserializes() {
        let json = r#"{"id":"1","display_name":"Alex","avatar_ref":"a.png","role":"PM"}"#;
        let member: TeamMember = serde_json::from_str(json).unwrap();
        assert!(member.messages.is_empty());
        assert_eq!(member.display_name, "Alex");
    }
}
