//! アプリケーション設定管理モジュール
//!
//! XDGディレクトリを使用した設定ファイルの永続化と管理を提供します。

use crate::analytics::DEFAULT_KEYWORD_LIMIT;
use crate::error::{MoodError, MoodResult};
use crate::models::TimeRange;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// ログ設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// カスタムログディレクトリ（Noneの場合はXDGデフォルト使用）
    pub log_dir: Option<PathBuf>,
    /// ログレベル (trace/debug/info/warn/error)
    pub log_level: String,
    /// ファイル出力有効化
    pub enable_file_logging: bool,
    /// JSON形式で出力
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            log_level: "info".to_string(),
            enable_file_logging: false,
            json_format: false,
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// データベースファイル（Noneの場合はXDGデータディレクトリ）
    pub database_path: Option<PathBuf>,
    /// 起動時の時間範囲
    pub default_range: TimeRange,
    /// キーワードクラウドの表示件数
    pub keyword_limit: usize,
    /// ログ設定
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            default_range: TimeRange::Day,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            log: LogConfig::default(),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "moodring", "moodring").context("Failed to get project directories")
}

/// 設定管理マネージャー
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// XDG設定ディレクトリを使う設定マネージャーを作成
    pub fn new() -> Result<Self> {
        let config_path = project_dirs()?.config_dir().join("config.toml");
        debug!("Config file path: {}", config_path.display());
        Self::with_path(config_path)
    }

    /// 任意のパスを使う設定マネージャーを作成
    pub fn with_path(config_path: impl Into<PathBuf>) -> Result<Self> {
        let config_path = config_path.into();

        // 設定ディレクトリを作成（存在しない場合）
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        Ok(Self { config_path })
    }

    /// 設定を読み込み
    pub fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!(
                "Config file not found, using default settings: {}",
                self.config_path.display()
            );
            return Ok(AppConfig::default());
        }

        let config_content = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config: AppConfig = toml::from_str(&config_content).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })?;
        config.validate()?;

        info!(
            "✅ Configuration loaded from: {}",
            self.config_path.display()
        );

        Ok(config)
    }

    /// 設定を保存
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let config_content =
            toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, config_content).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        info!("💾 Configuration saved to: {}", self.config_path.display());

        Ok(())
    }

    /// 設定をリセット（デフォルト値に戻す）
    pub fn reset_config(&self) -> Result<()> {
        self.save_config(&AppConfig::default())?;
        info!("🔄 Configuration reset to defaults");
        Ok(())
    }

    /// 設定ファイルパスを取得（デバッグ用）
    pub fn get_config_file_path(&self) -> &Path {
        &self.config_path
    }

    /// 設定ファイルが存在するかチェック
    pub fn config_exists(&self) -> bool {
        self.config_path.exists()
    }
}

/// XDGデータディレクトリ配下のデフォルトデータベースパス
pub fn default_database_path() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let data_dir = project_dirs.data_dir();
    fs::create_dir_all(data_dir)?;

    Ok(data_dir.join("moodring.db"))
}

/// XDGデータディレクトリ配下のデフォルトログディレクトリ
pub fn default_log_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("logs"))
}

impl AppConfig {
    /// 値の範囲チェック
    pub fn validate(&self) -> MoodResult<()> {
        if self.keyword_limit == 0 {
            return Err(MoodError::config("keyword_limit must be at least 1"));
        }
        Ok(())
    }

    /// 使用するデータベースパス
    pub fn resolve_database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }

    /// 使用するログディレクトリ
    pub fn resolve_log_dir(&self) -> Result<PathBuf> {
        match &self.log.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_log_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml")).unwrap();

        assert!(!manager.config_exists());
        assert_eq!(
            manager.get_config_file_path(),
            dir.path().join("config.toml").as_path()
        );
        let config = manager.load_config().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.keyword_limit, 30);
        assert_eq!(config.default_range, TimeRange::Day);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("nested/config.toml")).unwrap();

        let config = AppConfig {
            database_path: Some(dir.path().join("mood.db")),
            default_range: TimeRange::Week,
            keyword_limit: 10,
            log: LogConfig {
                log_level: "debug".to_string(),
                ..LogConfig::default()
            },
        };

        manager.save_config(&config).unwrap();
        assert!(manager.config_exists());
        assert_eq!(manager.load_config().unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_range = \"hour\"\n\n[log]\nlog_level = \"warn\"\n").unwrap();

        let config = ConfigManager::with_path(&path)
            .unwrap()
            .load_config()
            .unwrap();

        assert_eq!(config.default_range, TimeRange::Hour);
        assert_eq!(config.keyword_limit, DEFAULT_KEYWORD_LIMIT);
        assert_eq!(config.log.log_level, "warn");
        assert!(!config.log.enable_file_logging);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_range = \"fortnight\"").unwrap();

        assert!(ConfigManager::with_path(&path)
            .unwrap()
            .load_config()
            .is_err());
    }

    #[test]
    fn test_zero_keyword_limit_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "keyword_limit = 0").unwrap();

        let err = ConfigManager::with_path(&path)
            .unwrap()
            .load_config()
            .unwrap_err();
        assert!(err.to_string().contains("keyword_limit"));
    }

    #[test]
    fn test_reset_config() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(dir.path().join("config.toml")).unwrap();

        let mut config = AppConfig::default();
        config.keyword_limit = 5;
        manager.save_config(&config).unwrap();

        manager.reset_config().unwrap();
        assert_eq!(manager.load_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/tmp/custom.db")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.resolve_database_path().unwrap(),
            PathBuf::from("/tmp/custom.db")
        );
    }
}
