//! 性能自检模块
//!
//! 生成混合五种标签的合成文档，测量整篇转换的耗时

use std::time::Instant;

use serde_json::{json, Value};

use crate::model::localization::LocalizationStore;
use crate::model::pipeline::transform_with_report;

/// 性能测试结果
#[derive(Debug)]
pub struct PerformanceResult {
    pub operation: String,
    pub duration_ms: u128,
    pub success: bool,
    pub details: String,
}

impl PerformanceResult {
    pub fn new(operation: &str, duration_ms: u128, success: bool, details: &str) -> Self {
        Self {
            operation: operation.to_string(),
            duration_ms,
            success,
            details: details.to_string(),
        }
    }
}

/// 合成文档使用的本地化字典
pub fn sample_localization() -> Value {
    json!({
        "PF2E": {
            "Bench": {
                "Aura": "Creatures within @Template[emanation|distance:10] take @Damage[1d6[fire]].",
                "Note": "Multi-line\nnote"
            }
        }
    })
}

/// 生成包含 `entries` 条描述的 JSON 文本，每条都带五种标签
pub fn generate_tagged_document(entries: usize) -> String {
    let items: Vec<Value> = (0..entries)
        .map(|i| {
            json!({
                "_id": format!("bench{:06}", i),
                "name": format!("Creature {}", i),
                "description": format!(
                    "<p>@Localize[PF2E.Bench.Aura]</p>\
                     <p>@UUID[Compendium.pf2e.conditionitems.Item.Frightened]{{Frightened {}}} \
                     @Check[will|dc:{}|traits:emotion,fear] \
                     @Template[cone|distance:{}] \
                     @Damage[{}d6[{}]]</p>",
                    i % 4 + 1,
                    15 + i % 20,
                    15 + (i % 4) * 15,
                    i % 10 + 1,
                    if i % 3 == 0 { "untyped" } else { "cold" }
                )
            })
        })
        .collect();
    // to_string 对纯 JSON 值不会失败
    serde_json::to_string_pretty(&Value::Array(items)).unwrap_or_default()
}

/// 测量一次整篇转换
pub fn measure_transform(doc: &str, store: &LocalizationStore) -> PerformanceResult {
    let start = Instant::now();
    let (out, report) = transform_with_report(doc, store);
    let duration = start.elapsed();

    PerformanceResult::new(
        "整篇转换",
        duration.as_millis(),
        report.is_clean(),
        &format!(
            "输入 {} 字节，输出 {} 字节，替换 {} 个标签，降级 {} 个",
            doc.len(),
            out.len(),
            report.total(),
            report.degraded.len()
        ),
    )
}
