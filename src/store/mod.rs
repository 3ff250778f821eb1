//! ムードストア
//!
//! メッセージログとチームメンバーを保持し、投稿時に感情分析を行い、
//! 分析モジュールを組み合わせた問い合わせをUI層に提供する。

pub mod clock;
pub mod repository;

pub use clock::*;
pub use repository::*;

use crate::analytics::{
    aggregate, average_sentiment, extract_keywords, filter_by_range, influencer_stats,
    vibe_alert, InfluencerStats, SentimentAnalyzer, VibeAlert, VibeZone,
};
use crate::error::{MoodError, MoodResult};
use crate::models::{Message, MoodBucket, TeamMember, TimeRange};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// インフルエンサー表示用の情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Influencer {
    pub member: TeamMember,
    pub stats: InfluencerStats,
}

/// バイブゾーン表示用の集計
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VibeSummary {
    pub average_sentiment: f64,
    pub zone: VibeZone,
    pub message_count: usize,
    pub alert: Option<VibeAlert>,
}

/// メッセージログとフィルタ状態を所有するストア
pub struct MoodStore {
    repository: Box<dyn MoodRepository>,
    clock: Box<dyn Clock>,
    analyzer: SentimentAnalyzer,
    messages: Vec<Message>,
    team_members: Vec<TeamMember>,
    active_range: TimeRange,
    active_author_filter: Option<String>,
    /// 保存済みログが読めなかった（上書き禁止）
    log_unreadable: bool,
}

impl MoodStore {
    /// 永続化層から状態を読み込んでストアを作成
    ///
    /// 読み込みに失敗した場合は空のログ・既定メンバーで続行する。
    pub fn new(repository: impl MoodRepository + 'static, clock: impl Clock + 'static) -> Self {
        let mut log_unreadable = false;
        let messages = repository.load_messages().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load messages, starting with an empty log");
            log_unreadable = true;
            Vec::new()
        });

        let team_members = repository.load_team_members().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load team members, using the default roster");
            default_team_members()
        });

        info!(
            messages = messages.len(),
            team_members = team_members.len(),
            "📂 Mood store loaded"
        );

        Self {
            repository: Box::new(repository),
            clock: Box::new(clock),
            analyzer: SentimentAnalyzer::new(),
            messages,
            team_members,
            active_range: TimeRange::default(),
            active_author_filter: None,
            log_unreadable,
        }
    }

    /// 感情分析エンジンを差し替え
    pub fn with_analyzer(mut self, analyzer: SentimentAnalyzer) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// 初期の時間範囲を指定
    pub fn with_range(mut self, range: TimeRange) -> Self {
        self.active_range = range;
        self
    }

    /// メッセージを投稿
    ///
    /// 本文は前後の空白を除いて保存する。
    /// ログの保存に失敗した場合は追加を取り消してエラーを返す。
    /// メンバー履歴（派生キャッシュ）の保存失敗は警告のみ。
    /// 読み込めなかったログは上書きせず、`reset` するまで投稿を拒否する。
    pub fn ingest(&mut self, author_id: &str, text: &str) -> MoodResult<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MoodError::EmptyMessage);
        }
        if self.team_member(author_id).is_none() {
            return Err(MoodError::unknown_author(author_id));
        }
        if self.log_unreadable {
            return Err(MoodError::persistence(
                "ingest",
                "stored message log could not be read; reset the store before posting",
            ));
        }

        let message = Message {
            id: Uuid::new_v4().to_string(),
            author_id: author_id.to_string(),
            text: text.to_string(),
            created_at: self.clock.now(),
            sentiment: self.analyzer.analyze(text),
        };

        self.messages.push(message.clone());
        if let Err(e) = self.repository.save_messages(&self.messages) {
            self.messages.pop();
            warn!(error = %e, author_id, "Failed to persist message, rolled back");
            return Err(e);
        }

        if let Some(member) = self.team_members.iter_mut().find(|m| m.id == author_id) {
            member.messages.push(message.clone());
        }
        if let Err(e) = self.repository.save_team_members(&self.team_members) {
            warn!(error = %e, "Failed to persist team member history");
        }

        info!(
            message_id = %message.id,
            author_id,
            score = message.sentiment.score,
            comparative = message.sentiment.comparative,
            "💬 Message ingested"
        );

        Ok(message)
    }

    /// 投稿者で絞り込み、現在の時間範囲でバケット集計
    pub fn query_mood_series(&self, author_id: Option<&str>) -> Vec<MoodBucket> {
        let now = self.clock.now();
        let buckets = aggregate(self.by_author(author_id), now, self.active_range);

        debug!(
            range = %self.active_range,
            author_id = author_id.unwrap_or("*"),
            buckets = buckets.len(),
            "Mood series computed"
        );
        buckets
    }

    /// 時間範囲内のメッセージを投稿順で返す
    pub fn query_messages(&self, author_id: Option<&str>) -> Vec<Message> {
        let mut messages = filter_by_range(&self.messages, self.clock.now(), self.active_range);
        if let Some(author_id) = author_id {
            messages.retain(|m| m.author_id == author_id);
        }
        messages
    }

    /// 時間範囲内の上位インフルエンサー（メンバー情報付き）
    ///
    /// 名簿に無い投稿者は除外される。
    pub fn query_influencers(&self) -> Vec<Influencer> {
        let messages = self.query_messages(None);

        influencer_stats(&messages)
            .into_iter()
            .take(crate::analytics::MAX_INFLUENCERS)
            .filter_map(|stats| {
                let member = self.team_member(&stats.author_id)?;
                Some(Influencer {
                    member: TeamMember::new(
                        member.id.clone(),
                        member.display_name.clone(),
                        member.avatar_ref.clone(),
                        member.role.clone(),
                    ),
                    stats,
                })
            })
            .collect()
    }

    /// 時間範囲内のキーワード出現回数
    pub fn query_keywords(&self, author_id: Option<&str>) -> HashMap<String, usize> {
        extract_keywords(&self.query_messages(author_id))
    }

    /// 時間範囲内の平均スコアとバイブゾーン
    pub fn query_vibe(&self, author_id: Option<&str>) -> VibeSummary {
        let messages = self.query_messages(author_id);
        let average = average_sentiment(&messages);

        VibeSummary {
            average_sentiment: average,
            zone: VibeZone::from_score(average),
            message_count: messages.len(),
            alert: vibe_alert(&messages),
        }
    }

    pub fn set_active_range(&mut self, range: TimeRange) {
        self.active_range = range;
    }

    pub fn active_range(&self) -> TimeRange {
        self.active_range
    }

    pub fn set_active_author_filter(&mut self, author_id: Option<String>) {
        self.active_author_filter = author_id;
    }

    pub fn active_author_filter(&self) -> Option<&str> {
        self.active_author_filter.as_deref()
    }

    /// 起動時に保存済みログを読めなかったか
    pub fn log_unreadable(&self) -> bool {
        self.log_unreadable
    }

    /// 全メッセージ（投稿順）
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn team_members(&self) -> &[TeamMember] {
        &self.team_members
    }

    pub fn team_member(&self, id: &str) -> Option<&TeamMember> {
        self.team_members.iter().find(|m| m.id == id)
    }

    /// 保存データを消去し、空のログと既定メンバーに戻す
    pub fn reset(&mut self) -> MoodResult<()> {
        self.repository.clear()?;
        self.messages.clear();
        self.team_members = default_team_members();
        self.log_unreadable = false;
        info!("🔄 Mood store reset");
        Ok(())
    }

    fn by_author<'a>(&'a self, author_id: Option<&'a str>) -> impl Iterator<Item = &'a Message> {
        self.messages
            .iter()
            .filter(move |m| author_id.map_or(true, |id| m.author_id == id))
    }
}
