/// 场景数据模块
///
/// 导出器的输入数据模型：节点层级、网格和材质，以及把外部文件读成场景的加载器。
///
/// # 模块结构
///
/// - `node`: 场景节点（局部变换 + 网格引用 + 子节点）
/// - `mesh`: 网格数据（顶点属性 + 面）
/// - `material`: 稀疏的材质属性表
/// - `scene`: 场景容器与引用校验
/// - `loaders`: 各种格式的场景加载器
///
/// # 架构设计
///
/// ```text
/// 文件 (OBJ)
///     ↓
/// Loader (ObjLoader)
///     ↓
/// Scene (只读)
///     ↓
/// Md2Exporter
/// ```

pub mod node;
pub mod mesh;
pub mod material;
pub mod scene;
pub mod loaders;

// 重新导出常用类型
pub use node::Node;
pub use mesh::{Mesh, MeshFace};
pub use material::{Material, MaterialKey, MaterialValue, TextureSlot};
pub use scene::Scene;
