pub mod crud;

use crate::error::MoodResult;
use std::path::Path;

/// SQLiteによるキー/値ストア
///
/// メッセージログとチームメンバーをJSONドキュメントとして保存する。
pub struct MoodDatabase {
    pub connection: rusqlite::Connection,
    pub schema_version: u32,
}

impl MoodDatabase {
    /// 新しいデータベース接続を作成
    pub fn new<P: AsRef<Path>>(db_path: P) -> MoodResult<Self> {
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let connection = rusqlite::Connection::open(db_path.as_ref())?;
        let db = Self {
            connection,
            schema_version: 1,
        };

        db.initialize_schema()?;
        tracing::debug!("Database connection opened: {:?}", db_path.as_ref());
        Ok(db)
    }

    /// インメモリデータベースを作成（テスト用）
    pub fn new_in_memory() -> MoodResult<Self> {
        let connection = rusqlite::Connection::open_in_memory()?;
        let db = Self {
            connection,
            schema_version: 1,
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// データベーススキーマを初期化
    fn initialize_schema(&self) -> MoodResult<()> {
        self.connection.execute_batch(include_str!("schema.sql"))?;
        tracing::info!("Database schema initialized successfully");
        Ok(())
    }
}
