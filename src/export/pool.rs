//! 顶点池
//!
//! 位置、法线、纹理坐标三个全局池在整个场景遍历过程中只追加、不合并：
//! 每个面顶点引用都会产生一个新的池条目，即使与之前的条目完全相同。
//! 池下标从 1 开始，0 表示该面顶点没有对应属性。

use std::collections::HashMap;

use crate::core::config::IndexPolicy;
use crate::core::error::SceneError;
use crate::core::math::{matrix, Matrix4, Vector3};
use crate::geometry::Mesh;

/// 面顶点：三个池中的 1 起始下标，0 表示缺失
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceVertex {
    pub vp: usize,
    pub vn: usize,
    pub vt: usize,
}

impl FaceVertex {
    pub fn new(vp: usize, vt: usize, vn: usize) -> Self {
        Self { vp, vn, vt }
    }
}

/// 面的类型，由源面的顶点数决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    Point,
    Line,
    Polygon,
}

impl FaceKind {
    pub fn from_index_count(count: usize) -> Self {
        match count {
            1 => FaceKind::Point,
            2 => FaceKind::Line,
            _ => FaceKind::Polygon,
        }
    }

    /// 文本格式中的行首字符
    pub fn as_char(self) -> char {
        match self {
            FaceKind::Point => 'p',
            FaceKind::Line => 'l',
            FaceKind::Polygon => 'f',
        }
    }
}

/// 展平后的面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub kind: FaceKind,
    pub indices: Vec<FaceVertex>,
}

/// 一个 (节点, 网格) 组合展平后的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshInstance {
    /// 节点名，网格有名称时追加 `_网格名`
    pub name: String,
    pub material_name: String,
    pub faces: Vec<Face>,
}

impl MeshInstance {
    pub fn instance_name(node_name: &str, mesh_name: &str) -> String {
        if mesh_name.is_empty() {
            node_name.to_string()
        } else {
            format!("{}_{}", node_name, mesh_name)
        }
    }
}

/// 三个全局顶点属性池
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexPools {
    pub positions: Vec<Vector3>,
    pub normals: Vec<Vector3>,
    pub texcoords: Vec<Vector3>,
}

impl VertexPools {
    pub fn new() -> Self {
        Self::default()
    }

    /// 把一个网格按世界变换追加到池中，返回对应的 [`MeshInstance`]
    ///
    /// 位置经过 `world` 变换；法线原样复制，不使用逆转置矩阵。
    /// 网格缺少法线或纹理坐标时，记录的下标由 `policy` 决定：
    /// `Legacy` 记录池的当前长度，`Strict` 记录 0。
    pub fn add_mesh(
        &mut self,
        name: String,
        material_name: String,
        mesh: &Mesh,
        world: &Matrix4,
        policy: IndexPolicy,
    ) -> Result<MeshInstance, SceneError> {
        let mut faces = Vec::with_capacity(mesh.face_count());
        let references = mesh.face_vertex_count();
        self.positions.reserve(references);
        if mesh.has_normals() {
            self.normals.reserve(references);
        }
        if mesh.has_texcoords() {
            self.texcoords.reserve(references);
        }

        for (face_index, source) in mesh.faces.iter().enumerate() {
            let mut face = Face {
                kind: FaceKind::from_index_count(source.len()),
                indices: Vec::with_capacity(source.len()),
            };

            for &index in &source.indices {
                let idx = index as usize;
                let out_of_range = || {
                    SceneError::InvalidGeometry(format!(
                        "mesh '{}' face {} references vertex {} of {}",
                        name,
                        face_index,
                        index,
                        mesh.vertex_count()
                    ))
                };

                let position = mesh.positions.get(idx).ok_or_else(out_of_range)?;
                self.positions.push(matrix::transform_point(world, position));
                let vp = self.positions.len();

                let vn = match &mesh.normals {
                    Some(normals) => {
                        self.normals.push(*normals.get(idx).ok_or_else(out_of_range)?);
                        self.normals.len()
                    }
                    None => absent_index(policy, self.normals.len()),
                };

                let vt = match &mesh.texcoords {
                    Some(texcoords) => {
                        self.texcoords.push(*texcoords.get(idx).ok_or_else(out_of_range)?);
                        self.texcoords.len()
                    }
                    None => absent_index(policy, self.texcoords.len()),
                };

                face.indices.push(FaceVertex { vp, vn, vt });
            }

            faces.push(face);
        }

        Ok(MeshInstance {
            name,
            material_name,
            faces,
        })
    }

    /// 合并完全相同（按位比较）的池条目并重映射所有面顶点下标
    ///
    /// 不改变条目首次出现的相对顺序，0 仍表示缺失。
    pub fn deduplicate(&mut self, instances: &mut [MeshInstance]) {
        let positions = dedup_pool(&mut self.positions);
        let normals = dedup_pool(&mut self.normals);
        let texcoords = dedup_pool(&mut self.texcoords);

        let remap = |table: &[usize], index: usize| table.get(index).copied().unwrap_or(0);

        for fv in instances
            .iter_mut()
            .flat_map(|m| m.faces.iter_mut())
            .flat_map(|f| f.indices.iter_mut())
        {
            fv.vp = remap(&positions, fv.vp);
            fv.vn = remap(&normals, fv.vn);
            fv.vt = remap(&texcoords, fv.vt);
        }
    }
}

fn absent_index(policy: IndexPolicy, pool_len: usize) -> usize {
    match policy {
        IndexPolicy::Legacy => pool_len,
        IndexPolicy::Strict => 0,
    }
}

/// 返回旧下标到新下标的映射表，下标 0 映射到 0
fn dedup_pool(pool: &mut Vec<Vector3>) -> Vec<usize> {
    let mut seen: HashMap<[u32; 3], usize> = HashMap::with_capacity(pool.len());
    let mut unique = Vec::with_capacity(pool.len());
    let mut table = Vec::with_capacity(pool.len() + 1);
    table.push(0);

    for v in pool.iter() {
        let key = [v.x.to_bits(), v.y.to_bits(), v.z.to_bits()];
        let index = *seen.entry(key).or_insert_with(|| {
            unique.push(*v);
            unique.len()
        });
        table.push(index);
    }

    *pool = unique;
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshFace;

    fn quad(with_normals: bool, with_texcoords: bool) -> Mesh {
        let mut mesh = Mesh::with_name("Quad");
        mesh.positions = vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        if with_normals {
            mesh.normals = Some(vec![Vector3::z(); 4]);
        }
        if with_texcoords {
            mesh.texcoords = Some(mesh.positions.clone());
        }
        mesh.faces = vec![MeshFace::new([0, 1, 2]), MeshFace::new([0, 2, 3])];
        mesh
    }

    #[test]
    fn test_face_kind() {
        assert_eq!(FaceKind::from_index_count(1), FaceKind::Point);
        assert_eq!(FaceKind::from_index_count(2), FaceKind::Line);
        assert_eq!(FaceKind::from_index_count(3), FaceKind::Polygon);
        assert_eq!(FaceKind::from_index_count(7), FaceKind::Polygon);
        assert_eq!(FaceKind::Polygon.as_char(), 'f');
    }

    #[test]
    fn test_instance_name() {
        assert_eq!(MeshInstance::instance_name("Node", "Mesh"), "Node_Mesh");
        assert_eq!(MeshInstance::instance_name("Node", ""), "Node");
    }

    #[test]
    fn test_no_deduplication() {
        let mut pools = VertexPools::new();
        let mesh = quad(true, true);
        let instance = pools
            .add_mesh("q".into(), "m".into(), &mesh, &Matrix4::identity(), IndexPolicy::Legacy)
            .unwrap();

        // 共享的顶点 0 和 2 各被追加两次
        assert_eq!(pools.positions.len(), 6);
        assert_eq!(pools.normals.len(), 6);
        assert_eq!(pools.texcoords.len(), 6);
        assert_eq!(instance.faces[1].indices[0], FaceVertex::new(4, 4, 4));
    }

    #[test]
    fn test_positions_transformed_normals_copied() {
        let mut pools = VertexPools::new();
        let mesh = quad(true, false);
        let world = matrix::translation(5.0, 0.0, 0.0) * matrix::scaling(2.0, 2.0, 2.0);
        pools
            .add_mesh("q".into(), "m".into(), &mesh, &world, IndexPolicy::Legacy)
            .unwrap();

        assert_eq!(pools.positions[1], Vector3::new(7.0, 0.0, 0.0));
        assert!(pools.normals.iter().all(|n| *n == Vector3::z()));
    }

    #[test]
    fn test_legacy_policy_aliases_previous_entries() {
        let mut pools = VertexPools::new();
        pools
            .add_mesh("a".into(), "m".into(), &quad(true, true), &Matrix4::identity(), IndexPolicy::Legacy)
            .unwrap();
        let bare = pools
            .add_mesh("b".into(), "m".into(), &quad(false, false), &Matrix4::identity(), IndexPolicy::Legacy)
            .unwrap();

        let fv = bare.faces[0].indices[0];
        assert_eq!(fv.vp, 7);
        assert_eq!(fv.vn, 6);
        assert_eq!(fv.vt, 6);
        assert_eq!(pools.normals.len(), 6);
    }

    #[test]
    fn test_strict_policy_records_zero() {
        let mut pools = VertexPools::new();
        pools
            .add_mesh("a".into(), "m".into(), &quad(true, true), &Matrix4::identity(), IndexPolicy::Strict)
            .unwrap();
        let bare = pools
            .add_mesh("b".into(), "m".into(), &quad(false, false), &Matrix4::identity(), IndexPolicy::Strict)
            .unwrap();

        assert!(bare
            .faces
            .iter()
            .flat_map(|f| f.indices.iter())
            .all(|fv| fv.vn == 0 && fv.vt == 0));
    }

    #[test]
    fn test_out_of_range_index() {
        let mut mesh = quad(false, false);
        mesh.faces.push(MeshFace::new([9]));

        let mut pools = VertexPools::new();
        let result = pools.add_mesh("q".into(), "m".into(), &mesh, &Matrix4::identity(), IndexPolicy::Legacy);
        assert!(matches!(result, Err(SceneError::InvalidGeometry(_))));
    }

    #[test]
    fn test_deduplicate() {
        let mut pools = VertexPools::new();
        let instance = pools
            .add_mesh("q".into(), "m".into(), &quad(true, false), &Matrix4::identity(), IndexPolicy::Strict)
            .unwrap();
        let mut instances = vec![instance];

        pools.deduplicate(&mut instances);

        assert_eq!(pools.positions.len(), 4);
        assert_eq!(pools.normals.len(), 1);
        assert!(pools.texcoords.is_empty());

        let second = &instances[0].faces[1].indices;
        assert_eq!(second[0], FaceVertex::new(1, 0, 1));
        assert_eq!(second[1], FaceVertex::new(3, 0, 1));
        assert_eq!(second[2], FaceVertex::new(4, 0, 1));
    }
}
