// ログ初期化などのユーティリティ関数

use crate::config::LogConfig;
use crate::models::TimeRange;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// ログ初期化
///
/// `RUST_LOG` が設定されていればそちらを優先する。ファイル出力を有効にした場合は
/// 返されたガードをプロセス終了まで保持すること。
pub fn init_logging(config: &LogConfig, log_dir: &Path) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let console_layer = if config.json_format {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_writer(std::io::stderr)
            .compact()
            .boxed()
    };

    let (file_layer, guard) = if config.enable_file_logging {
        std::fs::create_dir_all(log_dir)?;
        let file_appender = tracing_appender::rolling::daily(log_dir, "moodring.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let layer = fmt::layer()
            .with_ansi(false)
            .with_writer(non_blocking)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// 時間範囲に応じたチャート軸の時刻表記
pub fn format_time<Tz>(timestamp: DateTime<Utc>, range: TimeRange, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = timestamp.with_timezone(tz);
    match range {
        TimeRange::Hour | TimeRange::Day => local.format("%H:%M").to_string(),
        TimeRange::Week => local.format("%a %H:00").to_string(),
    }
}

/// ログレベル文字列の検証
pub fn is_valid_log_level(level: &str) -> bool {
    matches!(
        level.to_ascii_lowercase().as_str(),
        "off" | "error" | "warn" | "info" | "debug" | "trace"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 14, 35, 0).unwrap();

        assert_eq!(format_time(ts, TimeRange::Hour, &Utc), "14:35");
        assert_eq!(format_time(ts, TimeRange::Day, &Utc), "14:35");
        assert_eq!(format_time(ts, TimeRange::Week, &Utc), "Wed 14:00");
    }

    #[test]
    fn test_log_levels() {
        for level in ["off", "error", "WARN", "Info", "debug", "trace"] {
            assert!(is_valid_log_level(level), "level: {}", level);
        }
        assert!(!is_valid_log_level("verbose"));
        assert!(!is_valid_log_level(""));
    }
}
