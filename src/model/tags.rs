//! 五种内联标签：语法、参数结构与格式化规则
//!
//! 每种标签有独立的正则与具名字段结构，格式化函数是纯函数，
//! 只有 Localize 需要读取本地化字典

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::error::LookupError;
use crate::model::localization::LocalizationStore;

/// 标签种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Localize,
    Uuid,
    Check,
    Template,
    Damage,
}

impl TagKind {
    /// 该种类标签的匹配模式（进程内只编译一次）
    pub fn pattern(self) -> &'static Regex {
        match self {
            TagKind::Localize => &*LOCALIZE_PATTERN,
            TagKind::Uuid => &*UUID_PATTERN,
            TagKind::Check => &*CHECK_PATTERN,
            TagKind::Template => &*TEMPLATE_PATTERN,
            TagKind::Damage => &*DAMAGE_PATTERN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TagKind::Localize => "Localize",
            TagKind::Uuid => "UUID",
            TagKind::Check => "Check",
            TagKind::Template => "Template",
            TagKind::Damage => "Damage",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// 捕获组统一命名：params 为方括号内原文，label 为花括号覆盖文本
static LOCALIZE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Localize\[(?P<params>.+?)\](?:\{(?P<label>.+?)\})?")
        .expect("Localize regex should compile")
});

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@UUID\[(?P<params>.+?)\](?:\{(?P<label>.+?)\})?")
        .expect("UUID regex should compile")
});

/// Check 没有覆盖文本，后随的 `{...}` 原样保留
static CHECK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Check\[(?P<params>.*?)\]").expect("Check regex should compile")
});

static TEMPLATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Template\[(?P<params>.*?)\](?:\{(?P<label>.+?)\})?")
        .expect("Template regex should compile")
});

/// 骰子表达式 XdY，可带一个方括号伤害类型
static DAMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@Damage\[(?P<params>\d+d\d+(?:\[.*?\])?)\]")
        .expect("Damage regex should compile")
});

/// 单次匹配的结果，仅在一次替换中存在
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagOccurrence<'t> {
    pub kind: TagKind,
    pub params: &'t str,
    pub label: Option<&'t str>,
}

impl<'t> TagOccurrence<'t> {
    pub fn from_captures(kind: TagKind, caps: &Captures<'t>) -> Self {
        Self {
            kind,
            params: caps.name("params").map_or("", |m| m.as_str()),
            label: caps.name("label").map(|m| m.as_str()),
        }
    }

    /// 按种类解析参数并格式化
    pub fn render(&self, store: &LocalizationStore) -> Rendered {
        match self.kind {
            TagKind::Localize => LocalizeTag::parse(self).render(store),
            TagKind::Uuid => UuidTag::parse(self).render(),
            TagKind::Check => CheckTag::parse(self).render(),
            TagKind::Template => TemplateTag::parse(self).render(),
            TagKind::Damage => DamageTag::parse(self).render(),
        }
    }
}

/// 替换文本：正常解析，或降级（文本仍会写入输出）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Resolved(String),
    Degraded { text: String, reason: String },
}

impl Rendered {
    pub fn text(&self) -> &str {
        match self {
            Rendered::Resolved(text) | Rendered::Degraded { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Rendered::Resolved(text) | Rendered::Degraded { text, .. } => text,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Rendered::Degraded { .. })
    }
}

/// `@Localize[key]{label}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalizeTag<'t> {
    pub key: &'t str,
    pub label: Option<&'t str>,
}

impl<'t> LocalizeTag<'t> {
    pub fn parse(occ: &TagOccurrence<'t>) -> Self {
        Self {
            key: occ.params,
            label: occ.label,
        }
    }

    /// 覆盖文本优先，否则查字典；查不到时把错误描述写进输出
    pub fn render(&self, store: &LocalizationStore) -> Rendered {
        if let Some(label) = self.label {
            return Rendered::Resolved(label.to_string());
        }
        match store.resolve(self.key) {
            Ok(text) => Rendered::Resolved(text),
            Err(err) => degraded_lookup(err),
        }
    }
}

fn degraded_lookup(err: LookupError) -> Rendered {
    let text = err.to_string();
    Rendered::Degraded {
        reason: text.clone(),
        text,
    }
}

/// `@UUID[Compendium.pf2e.conditionitems.Item.Frightened]{label}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UuidTag<'t> {
    pub id: &'t str,
    pub label: Option<&'t str>,
}

impl<'t> UuidTag<'t> {
    pub fn parse(occ: &TagOccurrence<'t>) -> Self {
        Self {
            id: occ.params,
            label: occ.label,
        }
    }

    /// 没有覆盖文本时取标识符最后一段
    pub fn render(&self) -> Rendered {
        let text = match self.label {
            Some(label) => label,
            None => self.id.rsplit('.').next().unwrap_or(self.id),
        };
        Rendered::Resolved(text.to_string())
    }
}

/// `@Check[reflex|dc:20|basic|traits:fire,magical]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckTag<'t> {
    /// 第一个选项加上所有未识别的自由文本选项
    pub ability: Vec<&'t str>,
    pub dc: Option<&'t str>,
    pub traits: Option<&'t str>,
    pub basic: bool,
}

impl<'t> CheckTag<'t> {
    pub fn parse(occ: &TagOccurrence<'t>) -> Self {
        let mut options = occ.params.split('|');
        let mut tag = Self::default();
        if let Some(first) = options.next() {
            tag.ability.push(first);
        }
        for option in options {
            if let Some(dc) = option.strip_prefix("dc:") {
                tag.dc = Some(dc);
            } else if let Some(traits) = option.strip_prefix("traits:") {
                tag.traits = Some(traits);
            } else if option == "basic" {
                tag.basic = true;
            } else {
                tag.ability.push(option);
            }
        }
        tag
    }

    /// 组合为 "DC 20 Basic Reflex (fire)"，缺省的片段整体省略
    pub fn render(&self) -> Rendered {
        let mut segments: Vec<String> = Vec::with_capacity(4);
        if let Some(dc) = self.dc.filter(|dc| !dc.is_empty()) {
            segments.push(format!("DC {}", dc));
        }
        if self.basic {
            segments.push("Basic".to_string());
        }
        let ability = title_case(&self.ability.join(" "));
        if !ability.trim().is_empty() {
            segments.push(ability);
        }
        if let Some(traits) = self.traits.filter(|t| !t.is_empty()) {
            segments.push(format!("({})", traits));
        }
        Rendered::Resolved(segments.join(" ").trim().to_string())
    }
}

/// 每个单词首字母大写；除字母数字与下划线外的字符都视为单词分隔（撇号也是）
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for ch in text.chars() {
        if at_word_start {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !(ch.is_alphanumeric() || ch == '_');
    }
    out
}

/// `@Template[cone|distance:30]{label}`，选项顺序不固定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTag<'t> {
    pub shape: &'t str,
    pub distance: Option<&'t str>,
    pub label: Option<&'t str>,
}

impl<'t> TemplateTag<'t> {
    pub fn parse(occ: &TagOccurrence<'t>) -> Self {
        let mut tag = Self {
            label: occ.label,
            ..Self::default()
        };
        for option in occ.params.split('|') {
            match option.strip_prefix("distance:") {
                Some(distance) => tag.distance = Some(distance),
                None => tag.shape = option,
            }
        }
        tag
    }

    /// 缺少 distance 时仍输出 "-foot cone"，并标记为降级
    pub fn render(&self) -> Rendered {
        if let Some(label) = self.label {
            return Rendered::Resolved(label.to_string());
        }
        let text = format!("{}-foot {}", self.distance.unwrap_or(""), self.shape);
        match self.distance {
            Some(_) => Rendered::Resolved(text),
            None => Rendered::Degraded {
                text,
                reason: "template has no distance".to_string(),
            },
        }
    }
}

/// `@Damage[2d6[fire]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageTag<'t> {
    pub dice: &'t str,
    pub damage_type: Option<&'t str>,
}

impl<'t> DamageTag<'t> {
    pub fn parse(occ: &TagOccurrence<'t>) -> Self {
        match occ.params.split_once('[') {
            Some((dice, rest)) => Self {
                dice,
                damage_type: Some(rest.trim_end_matches(']')),
            },
            None => Self {
                dice: occ.params,
                damage_type: None,
            },
        }
    }

    /// untyped 只输出骰子表达式
    pub fn render(&self) -> Rendered {
        let text = match self.damage_type {
            Some(kind) if kind != "untyped" && !kind.is_empty() => {
                format!("{} {}", self.dice, kind)
            }
            _ => self.dice.to_string(),
        };
        Rendered::Resolved(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn occ(kind: TagKind, params: &str, label: Option<&'static str>) -> Rendered {
        let store = LocalizationStore::default();
        TagOccurrence {
            kind,
            params,
            label,
        }
        .render(&store)
    }

    fn first_match(kind: TagKind, text: &str) -> (String, Option<String>) {
        let caps = kind.pattern().captures(text).expect("应该匹配");
        let o = TagOccurrence::from_captures(kind, &caps);
        (o.params.to_string(), o.label.map(str::to_string))
    }

    #[test]
    fn test_localize_prefers_label() {
        let store = LocalizationStore::from_value(json!({"PF2E": {"Foo": "Bar"}})).unwrap();
        let tag = LocalizeTag {
            key: "PF2E.Foo",
            label: Some("Custom"),
        };
        assert_eq!(tag.render(&store), Rendered::Resolved("Custom".into()));

        let tag = LocalizeTag {
            key: "PF2E.Foo",
            label: None,
        };
        assert_eq!(tag.render(&store), Rendered::Resolved("Bar".into()));
    }

    #[test]
    fn test_localize_label_skips_lookup() {
        // 覆盖文本存在时即使键不存在也不降级
        let r = occ(TagKind::Localize, "Missing.Key", Some("Shown"));
        assert_eq!(r, Rendered::Resolved("Shown".into()));
    }

    #[test]
    fn test_localize_missing_key_degrades() {
        let r = occ(TagKind::Localize, "No.Such.Key", None);
        assert!(r.is_degraded());
        assert!(r.text().contains("No.Such.Key"));
    }

    #[test]
    fn test_uuid_uses_last_segment() {
        let r = occ(TagKind::Uuid, "Compendium.pf2e.conditionitems.Item.Frightened", None);
        assert_eq!(r.text(), "Frightened");
        let r = occ(TagKind::Uuid, "NoDots", None);
        assert_eq!(r.text(), "NoDots");
        let r = occ(TagKind::Uuid, "Compendium.pf2e.x", Some("Grab"));
        assert_eq!(r.text(), "Grab");
    }

    #[test]
    fn test_check_full_phrase() {
        let r = occ(TagKind::Check, "reflex|dc:20|basic", None);
        assert_eq!(r.text(), "DC 20 Basic Reflex");

        let r = occ(TagKind::Check, "fortitude|dc:18|traits:poison,incapacitation", None);
        assert_eq!(r.text(), "DC 18 Fortitude (poison,incapacitation)");
    }

    #[test]
    fn test_check_optional_segments() {
        assert_eq!(occ(TagKind::Check, "will", None).text(), "Will");
        assert_eq!(occ(TagKind::Check, "athletics|basic", None).text(), "Basic Athletics");
        assert_eq!(occ(TagKind::Check, "", None).text(), "");
    }

    #[test]
    fn test_check_free_text_joins_ability() {
        let tag = CheckTag::parse(&TagOccurrence {
            kind: TagKind::Check,
            params: "flat|dc:5|secret",
            label: None,
        });
        assert_eq!(tag.ability, vec!["flat", "secret"]);
        assert_eq!(tag.dc, Some("5"));
        assert_eq!(tag.render().text(), "DC 5 Flat Secret");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("reflex"), "Reflex");
        assert_eq!(title_case("flat-footed"), "Flat-Footed");
        assert_eq!(title_case("lore: sailing"), "Lore: Sailing");
        assert_eq!(title_case("o'brien"), "O'Brien");
        assert_eq!(title_case("sailing_lore"), "Sailing_lore");
    }

    #[test]
    fn test_template_option_order() {
        assert_eq!(occ(TagKind::Template, "cone|distance:30", None).text(), "30-foot cone");
        assert_eq!(occ(TagKind::Template, "distance:30|cone", None).text(), "30-foot cone");
        assert_eq!(
            occ(TagKind::Template, "distance:30|cone", Some("Breath")).text(),
            "Breath"
        );
        assert_eq!(
            occ(TagKind::Template, "cone|distance:30", Some("Breath")).text(),
            "Breath"
        );
    }

    #[test]
    fn test_template_without_distance_degrades() {
        let r = occ(TagKind::Template, "burst", None);
        assert!(r.is_degraded());
        assert_eq!(r.text(), "-foot burst");
    }

    #[test]
    fn test_damage_types() {
        assert_eq!(occ(TagKind::Damage, "2d6[fire]", None).text(), "2d6 fire");
        assert_eq!(occ(TagKind::Damage, "1d8[untyped]", None).text(), "1d8");
        assert_eq!(occ(TagKind::Damage, "4d4", None).text(), "4d4");
    }

    #[test]
    fn test_patterns_capture_named_fields() {
        let (params, label) = first_match(TagKind::Localize, "x @Localize[PF2E.Foo]{Bar} y");
        assert_eq!(params, "PF2E.Foo");
        assert_eq!(label.as_deref(), Some("Bar"));

        let (params, label) = first_match(TagKind::Uuid, "@UUID[A.B] and @UUID[C.D]");
        assert_eq!(params, "A.B");
        assert_eq!(label, None);

        let (params, _) = first_match(TagKind::Damage, "@Damage[3d6[cold]] damage");
        assert_eq!(params, "3d6[cold]");

        let (params, label) = first_match(TagKind::Template, "@Template[line|distance:60]{Line}");
        assert_eq!(params, "line|distance:60");
        assert_eq!(label.as_deref(), Some("Line"));
    }

    #[test]
    fn test_damage_pattern_requires_dice() {
        assert!(TagKind::Damage.pattern().captures("@Damage[(2d6+4)[fire]]").is_none());
    }
}
