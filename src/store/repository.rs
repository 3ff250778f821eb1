//! 永続化の抽象化
//!
//! 保存先は文字列キーのget/setストアで、値はJSONドキュメント。

use crate::error::{MoodError, MoodResult};
use crate::models::{Message, TeamMember};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// メッセージログの保存キー
pub const MESSAGES_KEY: &str = "slack-mood-ring-messages";
/// チームメンバーの保存キー
pub const TEAM_MEMBERS_KEY: &str = "slack-mood-ring-team-members";

/// 文字列キー/値ストア
pub trait KeyValueStore {
    fn get(&self, key: &str) -> MoodResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> MoodResult<()>;
    fn remove(&self, key: &str) -> MoodResult<()>;
}

/// ムードストアが依存する永続化インタフェース
pub trait MoodRepository {
    /// 保存済みメッセージ（未保存なら空）
    fn load_messages(&self) -> MoodResult<Vec<Message>>;

    fn save_messages(&self, messages: &[Message]) -> MoodResult<()>;

    /// 保存済みメンバー（未保存なら既定の5名）
    fn load_team_members(&self) -> MoodResult<Vec<TeamMember>>;

    fn save_team_members(&self, members: &[TeamMember]) -> MoodResult<()>;

    /// メッセージとメンバーを削除
    fn clear(&self) -> MoodResult<()>;
}

impl<S: KeyValueStore + ?Sized> MoodRepository for S {
    fn load_messages(&self) -> MoodResult<Vec<Message>> {
        match self.get(MESSAGES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save_messages(&self, messages: &[Message]) -> MoodResult<()> {
        let json = serde_json::to_string(messages)?;
        self.set(MESSAGES_KEY, &json)
    }

    fn load_team_members(&self) -> MoodResult<Vec<TeamMember>> {
        match self.get(TEAM_MEMBERS_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(default_team_members()),
        }
    }

    fn save_team_members(&self, members: &[TeamMember]) -> MoodResult<()> {
        let json = serde_json::to_string(members)?;
        self.set(TEAM_MEMBERS_KEY, &json)
    }

    fn clear(&self) -> MoodResult<()> {
        self.remove(MESSAGES_KEY)?;
        self.remove(TEAM_MEMBERS_KEY)
    }
}

/// 保存データが無いときの既定メンバー
pub fn default_team_members() -> Vec<TeamMember> {
    [
        ("1", "Alex Johnson", "Product Manager"),
        ("2", "Sam Rivera", "UX Designer"),
        ("3", "Jamie Chen", "Frontend Developer"),
        ("4", "Taylor Smith", "Backend Developer"),
        ("5", "Jordan Lee", "Project Manager"),
    ]
    .into_iter()
    .map(|(id, name, role)| {
        TeamMember::new(
            id,
            name,
            format!("https://i.pravatar.cc/150?img={}", id),
            role,
        )
    })
    .collect()
}

/// メモリ上のキー/値ストア
///
/// クローンは同じ中身を共有する。書き込み失敗を再現するスイッチ付き。
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_writes: Rc<Cell<bool>>,
    failing_key: Rc<RefCell<Option<String>>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// trueの間、set/removeを失敗させる
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// 指定したキーへの書き込みだけを失敗させる（Noneで解除）
    pub fn fail_key(&self, key: Option<&str>) {
        *self.failing_key.borrow_mut() = key.map(str::to_string);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    fn check_writable(&self, operation: &str, key: &str) -> MoodResult<()> {
        let key_rejected = self.failing_key.borrow().as_deref() == Some(key);
        if self.fail_writes.get() || key_rejected {
            return Err(MoodError::persistence(
                operation,
                format!("write to '{}' rejected", key),
            ));
        }
        Ok(())
    }
}

impl KeyValueStore for InMemoryRepository {
    fn get(&self, key: &str) -> MoodResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> MoodResult<()> {
        self.check_writable("set", key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> MoodResult<()> {
        self.check_writable("remove", key)?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
