/// 场景模块
///
/// 导出器的只读输入：根节点、网格数组和材质数组，全部由调用方持有。

use crate::core::error::SceneError;

use super::material::Material;
use super::mesh::Mesh;
use super::node::Node;

/// 场景
#[derive(Debug, Clone, Default)]
pub struct Scene {
    /// 根节点
    pub root: Node,

    /// 网格数组
    pub meshes: Vec<Mesh>,

    /// 材质数组
    pub materials: Vec<Material>,
}

impl Scene {
    /// 创建只有根节点的空场景
    pub fn new(root: Node) -> Self {
        Self {
            root,
            meshes: Vec::new(),
            materials: Vec::new(),
        }
    }

    pub fn has_meshes(&self) -> bool {
        !self.meshes.is_empty()
    }

    /// 验证场景的引用关系
    ///
    /// 检查：
    /// - 每个网格自身的数据一致性
    /// - 每个网格的材质下标有效
    /// - 每个节点引用的网格下标有效
    pub fn validate(&self) -> Result<(), SceneError> {
        for (i, mesh) in self.meshes.iter().enumerate() {
            mesh.validate()
                .map_err(|e| SceneError::InvalidGeometry(format!("mesh {}: {}", i, e)))?;

            if mesh.material_index >= self.materials.len() {
                return Err(SceneError::InvalidMaterial(format!(
                    "mesh {} uses material {} but the scene has {} materials",
                    i,
                    mesh.material_index,
                    self.materials.len()
                )));
            }
        }

        self.validate_node(&self.root)
    }

    fn validate_node(&self, node: &Node) -> Result<(), SceneError> {
        if let Some(&index) = node.meshes.iter().find(|&&idx| idx >= self.meshes.len()) {
            return Err(SceneError::InvalidHierarchy(format!(
                "node '{}' references mesh {} but the scene has {} meshes",
                node.name,
                index,
                self.meshes.len()
            )));
        }

        node.children.iter().try_for_each(|child| self.validate_node(child))
    }
}
