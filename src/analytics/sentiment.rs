//! 辞書ベースの感情分析エンジン
//!
//! AFINN形式の重み付き語彙（-5〜+5の整数）でテキストを採点する。
//! 直前に否定語がある語は重みを反転させる。

use crate::models::SentimentResult;
use regex::Regex;
use std::collections::HashMap;

/// 基本語彙（語, 重み）
const BASE_LEXICON: &[(&str, i32)] = &[
    // ポジティブ
    ("amazing", 4),
    ("appreciate", 2),
    ("awesome", 4),
    ("beautiful", 3),
    ("best", 3),
    ("better", 2),
    ("brilliant", 4),
    ("calm", 2),
    ("celebrate", 3),
    ("cheers", 2),
    ("clean", 2),
    ("congrats", 2),
    ("congratulations", 2),
    ("cool", 1),
    ("creative", 2),
    ("delighted", 3),
    ("done", 1),
    ("easy", 1),
    ("effective", 2),
    ("energized", 2),
    ("enjoy", 2),
    ("enjoyed", 2),
    ("excellent", 3),
    ("excited", 3),
    ("exciting", 3),
    ("fantastic", 4),
    ("fine", 2),
    ("fixed", 2),
    ("focused", 2),
    ("fun", 4),
    ("glad", 3),
    ("good", 3),
    ("great", 3),
    ("happy", 3),
    ("help", 2),
    ("helpful", 2),
    ("hope", 2),
    ("impressive", 3),
    ("improved", 2),
    ("kudos", 3),
    ("like", 2),
    ("love", 3),
    ("lovely", 3),
    ("motivated", 2),
    ("nice", 3),
    ("outstanding", 5),
    ("perfect", 3),
    ("pleased", 3),
    ("productive", 2),
    ("proud", 2),
    ("ready", 1),
    ("relaxed", 2),
    ("relieved", 2),
    ("shipped", 2),
    ("smooth", 2),
    ("solid", 2),
    ("success", 2),
    ("successful", 3),
    ("super", 3),
    ("superb", 5),
    ("support", 2),
    ("thank", 2),
    ("thanks", 2),
    ("thrilled", 5),
    ("win", 4),
    ("wins", 4),
    ("wonderful", 4),
    ("wow", 4),
    ("yay", 2),
    ("yes", 1),
    // ネガティブ
    ("angry", -3),
    ("annoyed", -2),
    ("annoying", -2),
    ("anxious", -2),
    ("awful", -3),
    ("bad", -3),
    ("blocked", -1),
    ("blocker", -1),
    ("boring", -3),
    ("broken", -1),
    ("bug", -2),
    ("bugs", -2),
    ("burnout", -3),
    ("chaos", -2),
    ("confused", -2),
    ("crash", -2),
    ("crashed", -2),
    ("delay", -1),
    ("delayed", -1),
    ("difficult", -1),
    ("disappointed", -2),
    ("disaster", -2),
    ("exhausted", -2),
    ("fail", -2),
    ("failed", -2),
    ("failing", -2),
    ("failure", -2),
    ("fear", -2),
    ("frustrated", -2),
    ("frustrating", -2),
    ("hate", -3),
    ("horrible", -3),
    ("hurt", -2),
    ("impossible", -2),
    ("lost", -3),
    ("mess", -2),
    ("miss", -2),
    ("nervous", -2),
    ("overwhelmed", -2),
    ("pain", -2),
    ("panic", -3),
    ("problem", -2),
    ("problems", -2),
    ("sad", -2),
    ("scared", -2),
    ("sick", -2),
    ("sorry", -1),
    ("stress", -1),
    ("stressed", -2),
    ("stuck", -2),
    ("terrible", -3),
    ("tired", -2),
    ("ugh", -2),
    ("ugly", -3),
    ("unhappy", -2),
    ("upset", -2),
    ("worried", -3),
    ("worse", -3),
    ("worst", -3),
    ("wrong", -2),
];

/// 直後の語の重みを反転させる否定語
const NEGATORS: &[&str] = &[
    "not", "no", "never", "dont", "don't", "cant", "can't", "isnt", "isn't", "wasnt", "wasn't",
    "wont", "won't", "without",
];

/// 除去する句読点
const PUNCTUATION_PATTERN: &str = r#"[.,/#!$%^&*;:{}=_`"~()]"#;

/// 辞書ベースの感情分析エンジン
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    /// 語彙辞書（小文字の語 → 重み）
    lexicon: HashMap<String, i32>,
    /// 否定語
    negators: Vec<String>,
    /// 句読点除去用パターン
    punctuation: Regex,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// 基本語彙で初期化したエンジンを作成
    pub fn new() -> Self {
        Self {
            lexicon: BASE_LEXICON
                .iter()
                .map(|(word, weight)| (word.to_string(), *weight))
                .collect(),
            negators: NEGATORS.iter().map(|n| n.to_string()).collect(),
            punctuation: Regex::new(PUNCTUATION_PATTERN).expect("punctuation pattern is valid"),
        }
    }

    /// 語彙を追加・上書きしたエンジンを作成
    pub fn with_extra_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = (S, i32)>,
        S: Into<String>,
    {
        let mut analyzer = Self::new();
        for (word, weight) in terms {
            analyzer.lexicon.insert(word.into().to_lowercase(), weight);
        }
        analyzer
    }

    /// 語の重みを取得
    pub fn weight_of(&self, word: &str) -> Option<i32> {
        self.lexicon.get(&word.to_lowercase()).copied()
    }

    /// テキストをトークンに分割
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase().replace('\n', " ");
        self.punctuation
            .replace_all(&lowered, "")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// テキストの感情を分析
    pub fn analyze(&self, text: &str) -> SentimentResult {
        let tokens = self.tokenize(text);
        if tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let mut score = 0;
        let mut words = Vec::new();
        let mut positive = Vec::new();
        let mut negative = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            let Some(&weight) = self.lexicon.get(token) else {
                continue;
            };

            let negated = index > 0 && self.negators.contains(&tokens[index - 1]);
            let effective = if negated { -weight } else { weight };

            score += effective;
            words.push(token.clone());
            if effective > 0 {
                positive.push(token.clone());
            } else if effective < 0 {
                negative.push(token.clone());
            }
        }

        let comparative = f64::from(score) / tokens.len() as f64;

        SentimentResult {
            score,
            comparative,
            tokens,
            words,
            positive,
            negative,
        }
    }
}
