use anyhow::Context;
use clap::{Parser, Subcommand};
use moodring::{
    analytics::{mood_label, top_keywords},
    config::{AppConfig, ConfigManager},
    store::VibeSummary,
    utils, MoodDatabase, MoodStore, SystemClock, TimeRange,
};
use serde::Serialize;
use std::path::PathBuf;

/// チームのムードダッシュボード
#[derive(Parser, Debug)]
#[command(name = "moodring", version, about = "Team mood dashboard")]
struct Cli {
    /// データベースファイル（設定より優先）
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// 設定ファイル（省略時はXDG設定ディレクトリ）
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 時間範囲 (hour/day/week)
    #[arg(long, global = true)]
    range: Option<TimeRange>,

    /// JSONで出力
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// メッセージを投稿
    Post {
        /// 投稿者のメンバーID
        author: String,
        /// 本文
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// 時間範囲内のメッセージ一覧
    Messages {
        #[arg(long)]
        author: Option<String>,
    },
    /// ムードの時系列
    Series {
        #[arg(long)]
        author: Option<String>,
    },
    /// ムードインフルエンサー
    Influencers,
    /// トレンドキーワード
    Keywords {
        #[arg(long)]
        author: Option<String>,
        /// 表示件数（設定より優先）
        #[arg(long)]
        limit: Option<usize>,
    },
    /// バイブゾーンとアラート
    Vibe {
        #[arg(long)]
        author: Option<String>,
    },
    /// チームメンバー一覧
    Members,
    /// 保存データを消去
    Reset,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path)?,
        None => ConfigManager::new()?,
    };
    let config = config_manager.load_config().unwrap_or_else(|e| {
        eprintln!(
            "設定読み込みエラー、デフォルト設定を使用 ({}): {:#}",
            config_manager.get_config_file_path().display(),
            e
        );
        AppConfig::default()
    });

    let _log_guard = utils::init_logging(&config.log, &config.resolve_log_dir()?)?;
    if !utils::is_valid_log_level(&config.log.log_level) {
        tracing::warn!(level = %config.log.log_level, "Unknown log level in config, falling back");
    }

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => config.resolve_database_path()?,
    };
    let database = MoodDatabase::new(&db_path)
        .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

    let range = cli.range.unwrap_or(config.default_range);
    let mut store = MoodStore::new(database, SystemClock).with_range(range);

    tracing::debug!(db = %db_path.display(), %range, "🎬 Starting moodring");

    match cli.command {
        Command::Post { author, text } => {
            let message = match store.ingest(&author, &text.join(" ")) {
                Ok(message) => message,
                Err(e) if e.is_validation() => {
                    eprintln!("❌ {}", e);
                    std::process::exit(2);
                }
                Err(e) => return Err(e.into()),
            };
            if cli.json {
                print_json(&message)?;
            } else {
                println!(
                    "Posted {} (score {}, comparative {:.2})",
                    message.id, message.sentiment.score, message.sentiment.comparative
                );
            }
        }
        Command::Messages { author } => {
            let messages = store.query_messages(author.as_deref());
            if cli.json {
                print_json(&messages)?;
            } else if messages.is_empty() {
                println!("No messages in the last {}.", range);
            } else {
                for message in messages {
                    let name = store
                        .team_member(&message.author_id)
                        .map(|m| m.display_name.as_str())
                        .unwrap_or("Unknown");
                    println!(
                        "[{}] {:<14} {:+.2}  {}",
                        utils::format_time(message.created_at, range, &chrono::Local),
                        name,
                        message.sentiment.comparative,
                        message.text
                    );
                }
            }
        }
        Command::Series { author } => {
            let buckets = store.query_mood_series(author.as_deref());
            if cli.json {
                print_json(&buckets)?;
            } else if buckets.is_empty() {
                println!("No data yet. Post a message to see the mood chart.");
            } else {
                for bucket in buckets {
                    println!(
                        "{:>9}  {:+.2}  {:<13} ({} msgs)",
                        utils::format_time(bucket.bucket_start, range, &chrono::Local),
                        bucket.score,
                        mood_label(bucket.score),
                        bucket.message_count
                    );
                }
            }
        }
        Command::Influencers => {
            let influencers = store.query_influencers();
            if cli.json {
                print_json(&influencers)?;
            } else if influencers.is_empty() {
                println!("Not enough data to determine mood influencers.");
            } else {
                for (rank, influencer) in influencers.iter().enumerate() {
                    println!(
                        "{}. {:<14} {:>3} messages  {} Influence ({:+.2})",
                        rank + 1,
                        influencer.member.display_name,
                        influencer.stats.message_count,
                        if influencer.stats.is_positive() {
                            "Positive"
                        } else {
                            "Negative"
                        },
                        influencer.stats.average_sentiment
                    );
                }
            }
        }
        Command::Keywords { author, limit } => {
            let counts = store.query_keywords(author.as_deref());
            let keywords = top_keywords(&counts, limit.unwrap_or(config.keyword_limit));
            if cli.json {
                print_json(&keywords)?;
            } else if keywords.is_empty() {
                println!("No keywords available. Add more messages!");
            } else {
                for (keyword, count) in keywords {
                    println!("{:>4}  {}", count, keyword);
                }
            }
        }
        Command::Vibe { author } => {
            let summary = store.query_vibe(author.as_deref());
            if cli.json {
                print_json(&summary)?;
            } else {
                print_vibe(&summary);
            }
        }
        Command::Members => {
            let members: Vec<MemberRow> = store
                .team_members()
                .iter()
                .map(|member| MemberRow {
                    id: member.id.clone(),
                    display_name: member.display_name.clone(),
                    role: member.role.clone(),
                    message_count: store
                        .messages()
                        .iter()
                        .filter(|m| m.author_id == member.id)
                        .count(),
                })
                .collect();

            if cli.json {
                print_json(&members)?;
            } else {
                for member in members {
                    println!(
                        "{:>3}  {:<14} {:<20} {} messages",
                        member.id, member.display_name, member.role, member.message_count
                    );
                }
            }
        }
        Command::Reset => {
            store.reset()?;
            println!("Cleared stored messages and team members.");
        }
    }

    Ok(())
}

#[derive(Debug, Serialize)]
struct MemberRow {
    id: String,
    display_name: String,
    role: String,
    message_count: usize,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_vibe(summary: &VibeSummary) {
    println!("{}: {}", summary.zone.name(), summary.zone.description());
    if summary.message_count > 0 {
        println!("Score: {:.2}", summary.average_sentiment);
    } else {
        println!("No messages to analyze");
    }

    if let Some(alert) = &summary.alert {
        let level = match alert.severity {
            moodring::analytics::AlertSeverity::VeryLow => "very low",
            moodring::analytics::AlertSeverity::BelowAverage => "below average",
        };
        println!();
        println!("⚠️  Vibe Alert: the team mood is currently {}.", level);
        for suggestion in &alert.suggestions {
            println!("  - {}", suggestion);
        }
    }
}
