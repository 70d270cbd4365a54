//! md2_export 命令行入口
//!
//! # 使用方法
//!
//! ```bash
//! md2_export model.obj out/model.md2
//!
//! # 缺失属性记 0，并合并相同的池条目
//! md2_export model.obj out/model.md2 --strict --dedup --log-level debug
//! ```
//!
//! 配置文件 `md2_export.toml` 存在时先读取，命令行参数再覆盖。

use anyhow::{bail, Context};
use md2_export::core::{log, Config};
use md2_export::export::{export_scene_md2, FileSystem};
use md2_export::geometry::loaders::load_scene;
use std::path::Path;
use tracing::info;

const CONFIG_FILE: &str = "md2_export.toml";

/// 带值的参数，其值不算作位置参数
const VALUE_FLAGS: &[&str] = &["--log-level"];

fn positional_args(args: &[String]) -> Vec<&str> {
    let mut positional = Vec::new();
    let mut skip_next = false;

    for arg in args.iter().skip(1) {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
            continue;
        }
        if !arg.starts_with("--") {
            positional.push(arg.as_str());
        }
    }

    positional
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let mut config = Config::from_file_or_default(CONFIG_FILE);

    // 2. 应用命令行参数
    config.apply_args(&args);

    // 3. 验证配置
    config.validate().context("Invalid configuration")?;

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    log::init_logger(config.logging.level, config.logging.file_output, log_file);
    info!(version = env!("CARGO_PKG_VERSION"), "md2_export starting");

    let (input, output) = match positional_args(&args).as_slice() {
        [input, output] => (input.to_string(), output.to_string()),
        _ => bail!("usage: md2_export <input.obj> <output.md2> [--strict] [--legacy] [--dedup] [--log-level <level>]"),
    };

    info!(
        index_policy = ?config.export.index_policy,
        deduplicate = config.export.deduplicate,
        "Export configuration"
    );

    // 5. 加载场景
    let scene = load_scene(Path::new(&input))
        .with_context(|| format!("Failed to load scene from '{}'", input))?;

    // 6. 导出
    export_scene_md2(&output, &mut FileSystem, &scene, &config.export)
        .with_context(|| format!("Failed to export '{}'", output))?;

    info!(input = %input, output = %output, "Done");
    Ok(())
}
