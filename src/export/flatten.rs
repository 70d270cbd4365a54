//! 场景展平
//!
//! 从根节点开始深度优先、先序遍历，沿途累乘变换（父 × 局部），
//! 每遇到一个网格引用就生成一个 [`MeshInstance`]。
//! 同一网格被多次引用时，每次引用都独立变换、独立追加顶点。

use crate::core::config::IndexPolicy;
use crate::core::error::SceneError;
use crate::core::math::Matrix4;
use crate::geometry::{Node, Scene};

use super::mtl_writer::material_name;
use super::pool::{MeshInstance, VertexPools};

/// 展平结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlattenedScene {
    pub pools: VertexPools,
    pub instances: Vec<MeshInstance>,
}

impl FlattenedScene {
    pub fn face_count(&self) -> usize {
        self.instances.iter().map(|m| m.faces.len()).sum()
    }
}

/// 场景展平器
pub struct SceneFlattener<'a> {
    scene: &'a Scene,
    policy: IndexPolicy,
    result: FlattenedScene,
}

impl<'a> SceneFlattener<'a> {
    pub fn new(scene: &'a Scene, policy: IndexPolicy) -> Self {
        Self {
            scene,
            policy,
            result: FlattenedScene::default(),
        }
    }

    /// 遍历整棵节点树
    pub fn flatten(mut self) -> Result<FlattenedScene, SceneError> {
        let scene = self.scene;
        self.result.instances.reserve(scene.root.mesh_reference_count());
        self.add_node(&scene.root, &Matrix4::identity())?;
        Ok(self.result)
    }

    fn add_node(&mut self, node: &'a Node, parent: &Matrix4) -> Result<(), SceneError> {
        let world = parent * node.transform;

        for &mesh_index in &node.meshes {
            let mesh = self.scene.meshes.get(mesh_index).ok_or_else(|| {
                SceneError::InvalidHierarchy(format!(
                    "node '{}' references mesh {} but the scene has {} meshes",
                    node.name,
                    mesh_index,
                    self.scene.meshes.len()
                ))
            })?;

            let instance = self.result.pools.add_mesh(
                MeshInstance::instance_name(&node.name, &mesh.name),
                material_name(&self.scene.materials, mesh.material_index),
                mesh,
                &world,
                self.policy,
            )?;

            tracing::trace!(
                instance = %instance.name,
                faces = instance.faces.len(),
                "Flattened mesh instance"
            );

            self.result.instances.push(instance);
        }

        for child in &node.children {
            self.add_node(child, &world)?;
        }

        Ok(())
    }
}
