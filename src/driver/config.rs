//! 运行配置：默认值 < JSON 配置文件 < 命令行参数

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::model::error::AppError;
use crate::utils::fs::read_json_file;

// === 默认值（与原工具的目录约定一致） ===
pub const DEFAULT_LOCALIZATION: &str = "./pf2e/static/lang/en.json";
pub const DEFAULT_ROOTS: [&str; 2] = ["./bestiaries", "./conditions"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    /// 本地化文档路径
    pub localization: PathBuf,
    /// 需要扫描 `*.json` 的根目录
    pub roots: Vec<PathBuf>,
    /// 只转换不写回
    pub dry_run: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            localization: PathBuf::from(DEFAULT_LOCALIZATION),
            roots: DEFAULT_ROOTS.into_iter().map(PathBuf::from).collect(),
            dry_run: false,
        }
    }
}

impl DriverConfig {
    /// 读取 JSON 配置文件，缺省字段取默认值
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let dom = read_json_file(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        let config = serde_json::from_value(dom)?;
        Ok(config)
    }

    pub fn with_localization(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.localization = path;
        }
        self
    }

    /// 命令行给出的根目录整体替换配置中的列表
    pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
        if !roots.is_empty() {
            self.roots = roots;
        }
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run |= dry_run;
        self
    }
}
