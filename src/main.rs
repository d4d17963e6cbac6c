//! dist_obj - OBJ 几何导入工具
//!
//! 加载配置中的模型文件，解码、去重，并输出网格摘要。
//!
//! # 使用方法
//!
//! ```bash
//! # 使用配置文件
//! cargo run
//!
//! # 指定模型文件，并以回调模式解析
//! cargo run -- --model assets/monkey.obj --stream
//! ```
//!
//! # 处理流程
//!
//! ```text
//! config.toml + 命令行参数
//!        │
//! ┌──────▼──────┐
//! │  MeshSlot   │  decode → dedup → 原子替换
//! └──────┬──────┘
//!        │
//!     网格摘要
//! ```

use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use dist_obj::core::{log, Config};
use dist_obj::geometry::obj::{self, Callbacks, DecodeOptions, ParseSummary};
use dist_obj::geometry::loaders::{MeshLoader, ObjLoader};
use dist_obj::geometry::MeshSlot;
use dist_obj::{engine_error, engine_info, engine_warn};
use tracing::info;

/// 应用程序入口点
///
/// # 命令行参数
///
/// - `--config <file>`: 配置文件路径（默认 config.toml）
/// - `--model <path>`: 模型文件路径
/// - `--stream`: 以回调模式解析，只统计元素数量
/// - `--quiet-unsupported`: 不支持的元素只以 debug 级别报告
/// - `--log-level <level>`: 日志级别
fn main() {
    let args: Vec<String> = std::env::args().collect();

    // 1. 加载配置（在初始化日志之前）
    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|idx| args.get(idx + 1))
        .map(String::as_str)
        .unwrap_or("config.toml");
    let mut config = Config::from_file_or_default(config_path);

    // 2. 应用命令行参数
    config.apply_args(&args);

    // 3. 验证配置
    if let Err(e) = config.validate(ObjLoader::supported_extensions()) {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    // 4. 初始化日志系统
    let log_file = if config.logging.file_output {
        Some(config.logging.log_file.as_str())
    } else {
        None
    };
    if let Err(e) = log::init_logger(config.logging.level, config.logging.file_output, log_file) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    engine_info!(version = env!("CARGO_PKG_VERSION"), "dist_obj starting...");

    // 5. 加载模型
    let stream_mode = args.iter().any(|a| a == "--stream");
    let outcome = if stream_mode {
        run_stream(&config)
    } else {
        run_load(&config)
    };

    if let Err(e) = outcome {
        engine_error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// 整文档加载：decode + dedup，结果放入 `MeshSlot`
fn run_load(config: &Config) -> Result<()> {
    let slot = MeshSlot::from_config(config);
    let mesh = slot
        .reload()
        .with_context(|| format!("failed to load model {}", config.model.path))?;

    info!(
        model = %config.model.path,
        vertices = mesh.vertex_count(),
        indices = mesh.index_count(),
        triangles = mesh.triangle_count(),
        texcoords = mesh.has_texcoords(),
        normals = mesh.has_normals(),
        "Mesh ready"
    );
    if !mesh.has_normals() {
        engine_warn!(model = %config.model.path, "Model has no normals, shading will need generated normals");
    }
    for layout in mesh.attribute_layouts() {
        info!(
            buffer = layout.name,
            components = layout.components,
            stride = layout.stride,
            "Buffer layout"
        );
    }

    Ok(())
}

/// 回调模式：只统计元素数量，不构建文档
fn run_stream(config: &Config) -> Result<()> {
    let file = File::open(&config.model.path)
        .with_context(|| format!("failed to open model {}", config.model.path))?;

    let mut positions = 0usize;
    let mut texcoords = 0usize;
    let mut normals = 0usize;
    let mut faces = 0usize;

    let summary: ParseSummary = {
        let callbacks = Callbacks::builder()
            .on_position(|_| positions += 1)
            .on_texcoord(|_| texcoords += 1)
            .on_normal(|_| normals += 1)
            .on_face(|_| faces += 1)
            .build()?;

        obj::stream(
            BufReader::new(file),
            callbacks,
            &DecodeOptions::from(&config.loader),
        )
        .with_context(|| format!("failed to parse model {}", config.model.path))?
    };

    info!(
        model = %config.model.path,
        lines = summary.lines,
        positions,
        texcoords,
        normals,
        faces,
        unsupported = summary.unsupported,
        "Stream parse finished"
    );
    if summary.unsupported > 0 {
        engine_warn!(
            unsupported = summary.unsupported,
            "Unsupported elements were skipped"
        );
    }

    Ok(())
}
