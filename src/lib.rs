//! 规则文本标签渲染库
//!
//! 将 JSON 字符串值中的内联标签（@Localize / @UUID / @Check / @Template / @Damage）
//! 改写为可读文本；本地化键从一次性加载的字典中解析

pub mod driver;
pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::error::{AppError, LoadError, LookupError};
pub use model::localization::LocalizationStore;
pub use model::pipeline::{transform, transform_with_report, TransformReport, PASS_ORDER};
pub use model::tags::{Rendered, TagKind, TagOccurrence};
