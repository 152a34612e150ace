//! 程序入口：解析命令行、初始化日志、加载本地化文档并批量改写

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracing_subscriber::fmt::SubscriberBuilder;

use rule_tag_render::driver::{BatchDriver, DriverConfig};
use rule_tag_render::model::key_index::leaf_entries;
use rule_tag_render::model::performance::{
    generate_tagged_document, measure_transform, sample_localization,
};
use rule_tag_render::LocalizationStore;

const HELP: &str = "\
rule-tags: 把规则文本中的 @Localize/@UUID/@Check/@Template/@Damage 标签改写为可读文本

USAGE:
  rule-tags [OPTIONS] [ROOT...]

OPTIONS:
  --config <FILE>   JSON 配置文件（localization / roots / dry_run）
  --lang <FILE>     本地化文档，默认 ./pf2e/static/lang/en.json
  --dry-run         只转换，不写回文件
  --list-keys       列出本地化文档中所有可用的键及其文本后退出
  --bench <N>       用 N 条合成数据测量转换耗时后退出
  -v, --verbose     输出调试日志
  -h, --help        显示帮助

ROOT 默认为 ./bestiaries 与 ./conditions
";

struct Args {
    config: Option<PathBuf>,
    lang: Option<PathBuf>,
    dry_run: bool,
    list_keys: bool,
    bench: Option<usize>,
    verbose: bool,
    roots: Vec<PathBuf>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", HELP);
        return Ok(None);
    }

    let parsed = Args {
        config: args.opt_value_from_str("--config")?,
        lang: args.opt_value_from_str("--lang")?,
        dry_run: args.contains("--dry-run"),
        list_keys: args.contains("--list-keys"),
        bench: args.opt_value_from_str("--bench")?,
        verbose: args.contains(["-v", "--verbose"]),
        roots: roots_from_free_args(args.finish())?,
    };
    Ok(Some(parsed))
}

/// 剩余参数都是根目录；以 `-` 开头的视为拼错的选项
fn roots_from_free_args(free: Vec<OsString>) -> Result<Vec<PathBuf>> {
    free.into_iter()
        .map(|arg| {
            if arg.to_string_lossy().starts_with('-') {
                bail!("未知选项: {}", arg.to_string_lossy());
            }
            Ok(PathBuf::from(arg))
        })
        .collect()
}

fn main() -> Result<ExitCode> {
    let Some(args) = parse_args().context("命令行参数错误")? else {
        return Ok(ExitCode::SUCCESS);
    };

    // 初始化日志输出
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = SubscriberBuilder::default().with_max_level(level).try_init();

    // 性能自检使用内置字典，不依赖本地化文档
    if let Some(entries) = args.bench {
        let store = LocalizationStore::from_value(sample_localization())?;
        let doc = generate_tagged_document(entries);
        let result = measure_transform(&doc, &store);
        tracing::info!(
            "{}: {}ms，{}",
            result.operation,
            result.duration_ms,
            result.details
        );
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &args.config {
        Some(path) => DriverConfig::load(path)
            .with_context(|| format!("配置文件加载失败: {}", path.display()))?,
        None => DriverConfig::default(),
    }
    .with_localization(args.lang)
    .with_roots(args.roots)
    .with_dry_run(args.dry_run);

    let store = LocalizationStore::load(&config.localization)
        .with_context(|| format!("Error loading file: {}", config.localization.display()))?;
    tracing::info!("本地化文档加载成功: {}", config.localization.display());

    if args.list_keys {
        for entry in leaf_entries(&store) {
            println!("{}", entry);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = BatchDriver::new(&store, &config).run();
    Ok(if summary.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
