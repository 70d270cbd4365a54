//! MD2 导出模块
//!
//! 把只读的 [`Scene`] 转换成两个内存缓冲区：
//!
//! - 几何流：68 字节 MD2 文件头 + 文本几何清单
//! - 材质流：纯文本材质库（`<文件名>.mtl`）
//!
//! # 流程
//!
//! ```text
//! Scene
//!   ↓  Md2Header::for_scene（只读第一个网格）
//!   ↓  SceneFlattener → VertexPools + MeshInstance
//!   ↓  （可选）VertexPools::deduplicate
//!   ↓  obj_writer / mtl_writer
//! 两个缓冲区 → IoSystem
//! ```
//!
//! # 使用示例
//!
//! ```rust
//! use md2_export::core::{ExportConfig, Vector3};
//! use md2_export::export::{export_scene_md2, MemoryFileSystem};
//! use md2_export::geometry::{Material, Mesh, MeshFace, Node, Scene};
//!
//! let mut mesh = Mesh::new();
//! mesh.positions.push(Vector3::zeros());
//! mesh.faces.push(MeshFace::new([0]));
//!
//! let mut scene = Scene::new(Node::new("root").with_mesh(0));
//! scene.meshes.push(mesh);
//! scene.materials.push(Material::new());
//!
//! let mut fs = MemoryFileSystem::new();
//! export_scene_md2("out/model.md2", &mut fs, &scene, &ExportConfig::default())?;
//! assert!(fs.get("out/model.md2.mtl").is_some());
//! # Ok::<(), md2_export::core::Md2Error>(())
//! ```

pub mod format;
pub mod header;
pub mod pool;
pub mod flatten;
pub mod obj_writer;
pub mod mtl_writer;
pub mod io;

pub use header::Md2Header;
pub use pool::{Face, FaceKind, FaceVertex, MeshInstance, VertexPools};
pub use flatten::{FlattenedScene, SceneFlattener};
pub use io::{FileSystem, IoSystem, MemoryFileSystem};

use std::path::Path;

use crate::core::config::ExportConfig;
use crate::core::error::Result;
use crate::geometry::Scene;

/// 单次导出
///
/// 构造时完成全部工作；失败时不产生任何可见输出。
#[derive(Debug, Clone)]
pub struct Md2Exporter {
    filename: String,
    header: Md2Header,
    flattened: FlattenedScene,
    output: Vec<u8>,
    output_mat: Vec<u8>,
}

impl Md2Exporter {
    pub fn new(filename: impl Into<String>, scene: &Scene, options: &ExportConfig) -> Result<Self> {
        let filename = filename.into();
        let span = tracing::debug_span!("md2_export", file = %filename);
        let _enter = span.enter();

        let header = Md2Header::for_scene(scene)?;
        scene.validate()?;

        let mut flattened = SceneFlattener::new(scene, options.index_policy).flatten()?;
        if options.deduplicate {
            let before = flattened.pools.positions.len();
            flattened.pools.deduplicate(&mut flattened.instances);
            tracing::debug!(
                before,
                after = flattened.pools.positions.len(),
                "Deduplicated vertex positions"
            );
        }

        let mut exporter = Self {
            filename,
            header,
            flattened,
            output: Vec::new(),
            output_mat: Vec::new(),
        };

        exporter.write_geometry_file()?;
        exporter.write_material_file(scene)?;

        tracing::info!(
            instances = exporter.flattened.instances.len(),
            faces = exporter.flattened.face_count(),
            positions = exporter.flattened.pools.positions.len(),
            normals = exporter.flattened.pools.normals.len(),
            texcoords = exporter.flattened.pools.texcoords.len(),
            materials = scene.materials.len(),
            "Scene exported"
        );

        Ok(exporter)
    }

    fn write_geometry_file(&mut self) -> Result<()> {
        self.header.write_to(&mut self.output)?;
        let material_lib = self.material_lib_name();
        obj_writer::write_geometry(
            &mut self.output,
            &material_lib,
            &self.flattened.pools,
            &self.flattened.instances,
        )?;
        Ok(())
    }

    fn write_material_file(&mut self, scene: &Scene) -> Result<()> {
        mtl_writer::write_materials(&mut self.output_mat, &scene.materials)?;
        Ok(())
    }

    /// 几何流：文件头 + 文本
    pub fn geometry(&self) -> &[u8] {
        &self.output
    }

    /// 材质流
    pub fn materials(&self) -> &[u8] {
        &self.output_mat
    }

    pub fn header(&self) -> &Md2Header {
        &self.header
    }

    pub fn flattened(&self) -> &FlattenedScene {
        &self.flattened
    }

    /// 材质库的完整路径
    pub fn material_lib_file_name(&self) -> String {
        format!("{}.mtl", self.filename)
    }

    /// 几何流中引用的材质库名称（去掉目录）
    pub fn material_lib_name(&self) -> String {
        let path = self.material_lib_file_name();
        match path.rfind(|c: char| c == '/' || c == '\\') {
            Some(i) => path[i + 1..].to_string(),
            None => path,
        }
    }
}

/// 导出场景并通过 `io` 写出两个文件：`path` 与 `path.mtl`
pub fn export_scene_md2(
    path: &str,
    io: &mut dyn IoSystem,
    scene: &Scene,
    options: &ExportConfig,
) -> Result<()> {
    let exporter = Md2Exporter::new(path, scene, options)?;

    io.write_file(Path::new(path), exporter.geometry())?;
    io.write_file(Path::new(&exporter.material_lib_file_name()), exporter.materials())?;

    tracing::info!(path, "MD2 export finished");
    Ok(())
}
