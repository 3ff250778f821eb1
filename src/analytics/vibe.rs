//! バイブゾーン判定とバイブアラート

use crate::models::Message;
use serde::{Deserialize, Serialize};

/// アラートを出す平均スコアの閾値
pub const VIBE_ALERT_THRESHOLD: f64 = -0.3;

/// 「非常に低い」とみなす閾値
pub const SEVERE_VIBE_THRESHOLD: f64 = -0.5;

/// comparativeの平均（空なら0）
pub fn average_sentiment<'a, I>(messages: I) -> f64
where
    I: IntoIterator<Item = &'a Message>,
{
    let (sum, count) = messages
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), message| {
            (sum + message.comparative(), count + 1)
        });

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// チームの雰囲気
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VibeZone {
    Energized,
    Relaxed,
    Focused,
    Stressed,
}

impl VibeZone {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s > 0.5 => VibeZone::Energized,
            s if s > 0.1 => VibeZone::Relaxed,
            s if s > -0.3 => VibeZone::Focused,
            _ => VibeZone::Stressed,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            VibeZone::Energized => "Energized",
            VibeZone::Relaxed => "Relaxed",
            VibeZone::Focused => "Focused",
            VibeZone::Stressed => "Stressed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            VibeZone::Energized => "High energy and positivity",
            VibeZone::Relaxed => "Calm and positive mood",
            VibeZone::Focused => "Concentrating on tasks",
            VibeZone::Stressed => "Tension or pressure",
        }
    }
}

/// アラートの深刻度
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertSeverity {
    /// 平均 <= -0.5
    VeryLow,
    /// -0.5 < 平均 <= -0.3
    BelowAverage,
}

/// バイブアラート
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VibeAlert {
    pub average_sentiment: f64,
    pub severity: AlertSeverity,
    pub suggestions: Vec<String>,
}

/// スコアに応じた改善提案
pub fn alert_suggestions(score: f64) -> Vec<String> {
    let suggestions: &[&str] = if score <= SEVERE_VIBE_THRESHOLD {
        &[
            "Take a 15-minute team break",
            "Schedule a quick virtual coffee chat",
            "Share a funny GIF or meme",
            "Do a 5-minute stretching exercise together",
        ]
    } else if score <= VIBE_ALERT_THRESHOLD {
        &[
            "Check in with the team",
            "Acknowledge challenges and offer support",
            "Share a quick win to boost morale",
            "Consider rescheduling non-critical meetings",
        ]
    } else {
        &[]
    };

    suggestions.iter().map(|s| s.to_string()).collect()
}

/// 平均スコアが閾値以下ならアラートを返す
pub fn vibe_alert<'a, I>(messages: I) -> Option<VibeAlert>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut messages = messages.into_iter().peekable();
    messages.peek()?;

    let average = average_sentiment(messages);
    if average > VIBE_ALERT_THRESHOLD {
        return None;
    }

    let severity = if average <= SEVERE_VIBE_THRESHOLD {
        AlertSeverity::VeryLow
    } else {
        AlertSeverity::BelowAverage
    };

    Some(VibeAlert {
        average_sentiment: average,
        severity,
        suggestions: alert_suggestions(average),
    })
}

/// チャートのY軸ラベル（-1〜1を5段階）
///
/// 最も近い目盛り（-1, -0.5, 0, 0.5, 1）のラベルを返す。
pub fn mood_label(score: f64) -> &'static str {
    match score {
        s if s <= -0.75 => "Very Negative",
        s if s <= -0.25 => "Negative",
        s if s < 0.25 => "Neutral",
        s if s < 0.75 => "Positive",
        _ => "Very Positive",
    }
}
