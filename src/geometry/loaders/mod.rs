/// 场景加载器模块
///
/// 提供统一的场景加载接口，导出器本身不关心场景来自哪里。
///
/// # 支持的格式
///
/// - **OBJ**: Wavefront OBJ 格式（使用 tobj crate）
///
/// ```rust,no_run
/// use md2_export::geometry::loaders::load_scene;
/// use std::path::Path;
///
/// let scene = load_scene(Path::new("model.obj"))?;
/// # Ok::<(), md2_export::core::Md2Error>(())
/// ```
use crate::core::error::{MeshLoadError, Result};
use crate::geometry::scene::Scene;
use std::path::Path;

pub mod obj_loader;

pub use obj_loader::ObjLoader;

/// 场景加载器 trait
///
/// 所有格式的加载器都实现此 trait，加载器本身无状态。
pub trait SceneLoader {
    /// 从文件路径加载场景
    fn load_from_file(path: &Path) -> Result<Scene>;

    /// 从内存数据加载场景
    fn load_from_memory(data: &[u8]) -> Result<Scene>;

    /// 支持的文件扩展名列表（小写，不含点号）
    fn supported_extensions() -> &'static [&'static str];
}

/// 根据文件扩展名选择合适的加载器
pub fn load_scene(path: &Path) -> Result<Scene> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| MeshLoadError::UnsupportedFormat("无法确定文件扩展名".to_string()))?;

    if ObjLoader::supported_extensions().contains(&extension.as_str()) {
        return ObjLoader::load_from_file(path);
    }

    Err(MeshLoadError::UnsupportedFormat(format!("不支持的文件格式: .{}", extension)).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Md2Error;

    #[test]
    fn test_supported_extensions() {
        assert!(ObjLoader::supported_extensions().contains(&"obj"));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = load_scene(Path::new("model.fbx"));
        assert!(matches!(
            result,
            Err(Md2Error::MeshLoading(MeshLoadError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_missing_extension() {
        assert!(load_scene(Path::new("model")).is_err());
    }
}
