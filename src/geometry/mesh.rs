/// 网格数据结构模块
///
/// 定义场景中的网格：顶点位置、可选的法线和第一套纹理坐标，以及按索引引用顶点的面。
/// 面可以是点（1 个索引）、线（2 个索引）或多边形（3 个及以上）。

use crate::core::math::Vector3;

/// 网格面
///
/// 按顺序引用网格顶点数组中的下标（从 0 开始）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeshFace {
    pub indices: Vec<u32>,
}

impl MeshFace {
    #[inline]
    pub fn new(indices: impl Into<Vec<u32>>) -> Self {
        Self { indices: indices.into() }
    }

    /// 面引用的顶点数量
    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// 场景网格
///
/// # 示例
///
/// ```rust
/// use md2_export::geometry::{Mesh, MeshFace};
/// use md2_export::core::Vector3;
///
/// let mut mesh = Mesh::with_name("Triangle");
/// mesh.positions = vec![
///     Vector3::new(0.0, 0.0, 0.0),
///     Vector3::new(1.0, 0.0, 0.0),
///     Vector3::new(0.0, 1.0, 0.0),
/// ];
/// mesh.faces.push(MeshFace::new([0, 1, 2]));
/// assert!(mesh.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// 网格名称，可以为空
    pub name: String,

    /// 顶点位置（模型空间）
    pub positions: Vec<Vector3>,

    /// 顶点法线，存在时与 `positions` 等长
    pub normals: Option<Vec<Vector3>>,

    /// 第一套纹理坐标，存在时与 `positions` 等长
    ///
    /// 以三分量存储，通常只有前两个分量有意义。
    pub texcoords: Option<Vec<Vector3>>,

    /// 面列表
    pub faces: Vec<MeshFace>,

    /// 场景材质数组中的下标
    pub material_index: usize,
}

impl Mesh {
    /// 创建一个空网格
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建一个指定名称的空网格
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// 获取顶点数量
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// 获取面数量
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    #[inline]
    pub fn has_texcoords(&self) -> bool {
        self.texcoords.is_some()
    }

    /// 所有面引用的顶点总数
    pub fn face_vertex_count(&self) -> usize {
        self.faces.iter().map(MeshFace::len).sum()
    }

    /// 验证网格数据的有效性
    ///
    /// 检查：
    /// - 法线和纹理坐标数组与顶点数组等长
    /// - 所有面至少引用一个顶点（空面直接报错，而不是像旧导出器那样当作多边形写出空的 `f` 行）
    /// - 所有索引都在有效范围内
    pub fn validate(&self) -> Result<(), String> {
        let vertex_count = self.positions.len();

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(format!(
                    "normal count {} does not match vertex count {}",
                    normals.len(),
                    vertex_count
                ));
            }
        }

        if let Some(texcoords) = &self.texcoords {
            if texcoords.len() != vertex_count {
                return Err(format!(
                    "texcoord count {} does not match vertex count {}",
                    texcoords.len(),
                    vertex_count
                ));
            }
        }

        for (i, face) in self.faces.iter().enumerate() {
            if face.is_empty() {
                return Err(format!("face {} references no vertices", i));
            }
            if let Some(&index) = face.indices.iter().find(|&&idx| idx as usize >= vertex_count) {
                return Err(format!(
                    "face {} index {} out of range (vertex count {})",
                    i, index, vertex_count
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::with_name("Triangle");
        mesh.positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        mesh.faces.push(MeshFace::new([0, 1, 2]));
        mesh
    }

    #[test]
    fn test_mesh_creation() {
        let mesh = Mesh::new();

        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert!(mesh.name.is_empty());
        assert!(!mesh.has_normals());
        assert!(!mesh.has_texcoords());
    }

    #[test]
    fn test_mesh_counts() {
        let mut mesh = triangle();
        mesh.faces.push(MeshFace::new([0]));

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.face_vertex_count(), 4);
    }

    #[test]
    fn test_mesh_validation_valid() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn test_mesh_validation_invalid_index_range() {
        let mut mesh = triangle();
        mesh.faces.push(MeshFace::new([0, 1, 5]));

        let result = mesh.validate();
        assert!(result.unwrap_err().contains("out of range"));
    }

    #[test]
    fn test_mesh_validation_normal_length_mismatch() {
        let mut mesh = triangle();
        mesh.normals = Some(vec![Vector3::z()]);

        assert!(mesh.validate().unwrap_err().contains("normal count"));
    }

    #[test]
    fn test_mesh_validation_empty_face() {
        let mut mesh = triangle();
        mesh.faces.push(MeshFace::default());

        assert!(mesh.validate().is_err());
    }
}
