//! LocalizationStore：只读的本地化字典与点分键解析

use std::path::Path;

use serde_json::{Map, Value};

use crate::model::error::{LoadError, LookupError};
use crate::utils::fs::read_json_file;

/// 进程内只读字典，加载后不再修改，可在多个转换之间共享
#[derive(Debug, Clone, Default)]
pub struct LocalizationStore {
    root: Map<String, Value>,
}

impl LocalizationStore {
    /// 从磁盘加载本地化文档
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let dom = read_json_file(path)?;
        Self::from_value(dom)
    }

    /// 由已解析的 JSON 构建；根节点必须是对象
    pub fn from_value(dom: Value) -> Result<Self, LoadError> {
        match dom {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(LoadError::NotAnObject),
        }
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// 按点分路径逐层查找叶子值，并转义为可嵌入 JSON 字符串的文本
    pub fn resolve(&self, key: &str) -> Result<String, LookupError> {
        let mut level = &self.root;
        let mut segments = key.split('.').peekable();

        while let Some(segment) = segments.next() {
            let missing = || LookupError::Missing {
                key: key.to_string(),
                segment: segment.to_string(),
            };
            let value = level.get(segment).ok_or_else(missing)?;
            let is_last = segments.peek().is_none();

            match value {
                Value::Object(nested) if !is_last => level = nested,
                Value::Object(_) | Value::Array(_) if is_last => {
                    return Err(LookupError::NotALeaf {
                        key: key.to_string(),
                    })
                }
                Value::String(text) if is_last => return Ok(escape_leaf(text)),
                Value::Number(n) if is_last => return Ok(n.to_string()),
                Value::Bool(b) if is_last => return Ok(b.to_string()),
                // null 叶子与“穿过标量继续下钻”都视为缺失
                _ => return Err(missing()),
            }
        }

        // split 至少产出一个段，循环内必然返回
        Err(LookupError::Missing {
            key: key.to_string(),
            segment: String::new(),
        })
    }
}

/// 转义控制字符与引号，使结果可以直接放进 JSON 字符串值
pub fn escape_leaf(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}
