//! 标签替换流水线：按固定顺序每种标签扫描一遍
//!
//! Localize 必须最先执行，因为插入的本地化文本本身可能还带有
//! UUID/Check/Template/Damage 标签，需要由后续各遍继续处理。
//! 每一遍只执行一次；Damage 是最后一遍，它产出的文本不会再被解析。

use std::collections::HashMap;

use regex::Captures;

use crate::model::localization::LocalizationStore;
use crate::model::tags::{Rendered, TagKind, TagOccurrence};

/// 各遍的执行顺序
pub const PASS_ORDER: [TagKind; 5] = [
    TagKind::Localize,
    TagKind::Uuid,
    TagKind::Check,
    TagKind::Template,
    TagKind::Damage,
];

/// 一次转换中每种标签的替换次数与降级原因
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub replaced: HashMap<TagKind, usize>,
    pub degraded: Vec<(TagKind, String)>,
}

impl TransformReport {
    fn record(&mut self, kind: TagKind, rendered: &Rendered) {
        *self.replaced.entry(kind).or_insert(0) += 1;
        if let Rendered::Degraded { reason, .. } = rendered {
            self.degraded.push((kind, reason.clone()));
        }
    }

    pub fn count(&self, kind: TagKind) -> usize {
        self.replaced.get(&kind).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.replaced.values().sum()
    }

    pub fn is_clean(&self) -> bool {
        self.degraded.is_empty()
    }
}

/// 转换整篇文本；总是返回结果，解析失败降级为内联错误文本
pub fn transform(text: &str, store: &LocalizationStore) -> String {
    transform_with_report(text, store).0
}

/// 同 [`transform`]，并返回替换统计
pub fn transform_with_report(text: &str, store: &LocalizationStore) -> (String, TransformReport) {
    let mut report = TransformReport::default();
    let mut doc = text.to_string();
    for kind in PASS_ORDER {
        doc = run_pass(kind, &doc, store, &mut report);
    }
    (doc, report)
}

/// 单遍：线性扫描，替换所有不重叠的匹配
fn run_pass(
    kind: TagKind,
    doc: &str,
    store: &LocalizationStore,
    report: &mut TransformReport,
) -> String {
    kind.pattern()
        .replace_all(doc, |caps: &Captures| {
            let rendered = TagOccurrence::from_captures(kind, caps).render(store);
            report.record(kind, &rendered);
            rendered.into_text()
        })
        .into_owned()
}
