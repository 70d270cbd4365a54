//! md2_export - 场景图导出器
//!
//! 把内存中的场景图（节点层级、网格、材质）展平为世界空间的顶点池，
//! 生成 MD2 文件头 + 文本几何清单，以及配套的材质库。
//!
//! # 模块结构
//!
//! - `core`: 核心功能模块（数学、日志、配置、错误处理）
//! - `geometry`: 场景数据模型与场景加载器
//! - `export`: 文件头计算、场景展平和序列化
//!
//! # 使用示例
//!
//! ```no_run
//! use md2_export::core::ExportConfig;
//! use md2_export::export::{export_scene_md2, FileSystem};
//! use md2_export::geometry::loaders::load_scene;
//! use std::path::Path;
//!
//! let scene = load_scene(Path::new("model.obj"))?;
//! export_scene_md2("model.md2", &mut FileSystem, &scene, &ExportConfig::default())?;
//! # Ok::<(), md2_export::core::Md2Error>(())
//! ```

pub mod core;
pub mod geometry;
pub mod export;
