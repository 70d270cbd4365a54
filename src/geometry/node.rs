/// 场景节点模块
///
/// 节点持有其子节点，因此层级天然是一棵有限、无环的树。

use crate::core::math::Matrix4;

/// 场景节点
///
/// ```rust
/// use md2_export::geometry::Node;
/// use md2_export::core::math::matrix;
///
/// let root = Node::new("root")
///     .with_child(Node::new("ship").with_transform(matrix::translation(5.0, 0.0, 0.0)).with_mesh(0));
///
/// assert_eq!(root.node_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    /// 节点名称
    pub name: String,

    /// 相对父节点的局部变换
    pub transform: Matrix4,

    /// 场景网格数组中的下标
    pub meshes: Vec<usize>,

    /// 子节点
    pub children: Vec<Node>,
}

impl Node {
    /// 创建单位变换、无网格、无子节点的节点
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Matrix4::identity(),
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh_index: usize) -> Self {
        self.meshes.push(mesh_index);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    /// 子树中的节点总数（含自身）
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// 子树中的网格引用总数
    pub fn mesh_reference_count(&self) -> usize {
        self.meshes.len() + self.children.iter().map(Node::mesh_reference_count).sum::<usize>()
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("")
    }
}
