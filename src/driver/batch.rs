//! BatchDriver：遍历根目录，逐个文件转换并原地回写
//!
//! 单个文件失败只记录日志并继续处理下一个

use std::path::Path;
use std::time::Instant;

use crate::driver::config::DriverConfig;
use crate::model::error::AppError;
use crate::model::localization::LocalizationStore;
use crate::model::pipeline::transform_with_report;
use crate::utils::fs::{collect_json_files, read_text_file, write_text_file};

/// 单个文件的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Rewritten { degraded: usize },
    /// dry-run：内容会变化，但没有写回
    WouldRewrite { degraded: usize },
    Unchanged,
}

/// 一次批处理的统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub scanned: usize,
    pub rewritten: usize,
    pub would_rewrite: usize,
    pub unchanged: usize,
    pub failed: usize,
    /// 所有文件中降级替换的总数
    pub degraded: usize,
}

impl BatchSummary {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

pub struct BatchDriver<'a> {
    store: &'a LocalizationStore,
    config: &'a DriverConfig,
}

impl<'a> BatchDriver<'a> {
    pub fn new(store: &'a LocalizationStore, config: &'a DriverConfig) -> Self {
        Self { store, config }
    }

    /// 依次处理配置中的所有根目录
    pub fn run(&self) -> BatchSummary {
        let start = Instant::now();
        let mut summary = BatchSummary::default();

        for root in &self.config.roots {
            let files = match collect_json_files(root) {
                Ok(files) => files,
                Err(e) => {
                    tracing::error!("目录处理失败: {}", e);
                    continue;
                }
            };
            tracing::info!("{}: 找到 {} 个JSON文件", root.display(), files.len());

            for path in files {
                summary.scanned += 1;
                tracing::info!("Processing file: {}", path.display());
                match self.process_file(&path) {
                    Ok(FileOutcome::Rewritten { degraded }) => {
                        summary.rewritten += 1;
                        summary.degraded += degraded;
                    }
                    Ok(FileOutcome::WouldRewrite { degraded }) => {
                        summary.would_rewrite += 1;
                        summary.degraded += degraded;
                    }
                    Ok(FileOutcome::Unchanged) => summary.unchanged += 1,
                    Err(e) => {
                        summary.failed += 1;
                        tracing::error!("文件处理失败: {}", e);
                    }
                }
            }
        }

        tracing::info!(
            "批处理完成: 扫描 {}，改写 {}，待改写(dry-run) {}，未变 {}，失败 {}，降级标签 {}，耗时: {}ms",
            summary.scanned,
            summary.rewritten,
            summary.would_rewrite,
            summary.unchanged,
            summary.failed,
            summary.degraded,
            start.elapsed().as_millis()
        );
        summary
    }

    /// 读取、转换并覆盖单个文件；内容未变化时不写回
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, AppError> {
        let text = read_text_file(path)?;
        let (result, report) = transform_with_report(&text, self.store);

        for (kind, reason) in &report.degraded {
            tracing::warn!("{}: {} 标签降级: {}", path.display(), kind, reason);
        }
        if result == text {
            return Ok(FileOutcome::Unchanged);
        }

        let degraded = report.degraded.len();
        tracing::debug!("{}: 替换 {} 个标签", path.display(), report.total());
        if self.config.dry_run {
            tracing::debug!("dry-run，跳过写回: {}", path.display());
            return Ok(FileOutcome::WouldRewrite { degraded });
        }
        write_text_file(path, &result)?;
        Ok(FileOutcome::Rewritten { degraded })
    }
}
