//! 键索引：把本地化字典展平成点分键列表，便于排查 Localize 引用

use std::fmt;

use serde_json::Value;

use crate::model::localization::LocalizationStore;

/// 一个可被 `@Localize[...]` 引用的叶子键，以及它会插入的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEntry {
    pub key: String,
    /// 已转义，与 Localize 实际写入的内容一致
    pub text: String,
}

impl fmt::Display for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = \"{}\"", self.key, self.text)
    }
}

/// 深度优先收集所有叶子键，分组与无法解析的值（数组、null）跳过
pub fn leaf_entries(store: &LocalizationStore) -> Vec<KeyEntry> {
    fn walk(out: &mut Vec<String>, v: &Value, key: String) {
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    walk(out, child, format!("{}.{}", key, k));
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) => out.push(key),
            Value::Array(_) | Value::Null => {}
        }
    }

    let mut keys = Vec::new();
    for (k, child) in store.root() {
        walk(&mut keys, child, k.clone());
    }
    keys.into_iter()
        .filter_map(|key| {
            let text = store.resolve(&key).ok()?;
            Some(KeyEntry { key, text })
        })
        .collect()
}
