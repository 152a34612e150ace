//! 错误类型：加载失败、键查找失败、批处理失败

use std::path::PathBuf;

use thiserror::Error;

/// 本地化文档加载失败，对整次运行是致命的
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO失败: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("本地化文档根节点必须是对象")]
    NotAnObject,
}

/// 点分键无法解析到叶子值
///
/// 该错误的文本会直接写入输出文档，因此保持英文，并始终包含完整的键
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("key {key} not found (missing segment {segment})")]
    Missing { key: String, segment: String },
    #[error("key {key} is a group, not a text entry")]
    NotALeaf { key: String },
}

/// 批处理与配置层的错误
#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO失败 {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON解析失败: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("配置错误: {0}")]
    Config(String),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_error_text_contains_key() {
        let err = LookupError::Missing {
            key: "No.Such.Key".into(),
            segment: "No".into(),
        };
        assert_eq!(
            err.to_string(),
            "key No.Such.Key not found (missing segment No)"
        );

        let err = LookupError::NotALeaf { key: "PF2E".into() };
        assert!(err.to_string().contains("PF2E"));
    }

    #[test]
    fn test_app_error_io_mentions_path() {
        let err = AppError::io(
            "bestiaries/goblin.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("goblin.json"));
    }
}
