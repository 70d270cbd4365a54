/// OBJ 场景加载器
///
/// 使用 tobj crate 把 Wavefront OBJ 文件读成 [`Scene`]：
/// 每个 OBJ 对象对应根节点下的一个子节点和一个网格，多边形保持原样不做三角化。
use super::SceneLoader;
use crate::core::error::{MeshLoadError, Result};
use crate::core::math::{Color, Vector3};
use crate::geometry::material::{Material, MaterialKey, TextureSlot};
use crate::geometry::mesh::{Mesh, MeshFace};
use crate::geometry::node::Node;
use crate::geometry::scene::Scene;
use std::path::Path;

/// 没有材质的网格会引用这个材质
const DEFAULT_MATERIAL_NAME: &str = "DefaultMaterial";

/// OBJ 格式加载器
///
/// # 特性
///
/// - 使用单一索引，法线和 UV 与顶点位置一一对应
/// - 保留点、线和多边形，不做三角化
/// - UV 保持文件中的原值（不翻转 V 轴）
/// - 缺失材质库时只记录警告
///
/// ```rust,no_run
/// use md2_export::geometry::loaders::{ObjLoader, SceneLoader};
/// use std::path::Path;
///
/// let scene = ObjLoader::load_from_file(Path::new("model.obj"))?;
/// println!("加载了 {} 个网格", scene.meshes.len());
/// # Ok::<(), md2_export::core::Md2Error>(())
/// ```
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            triangulate: false,
            single_index: true,
            ..Default::default()
        }
    }

    fn build_scene(
        root_name: &str,
        models: Vec<tobj::Model>,
        materials: std::result::Result<Vec<tobj::Material>, tobj::LoadError>,
    ) -> Result<Scene> {
        if models.is_empty() {
            return Err(MeshLoadError::InvalidGeometry("OBJ 文件不包含任何模型".to_string()).into());
        }

        let materials = materials.unwrap_or_else(|e| {
            tracing::warn!("Failed to load material library: {}", e);
            Vec::new()
        });

        let mut scene = Scene::new(Node::new(root_name));
        scene.materials = materials.iter().map(convert_material).collect();

        let mut default_material = None;

        for model in models {
            let mesh_index = scene.meshes.len();
            let mut mesh = convert_mesh(&model.mesh)?;

            mesh.material_index = match model.mesh.material_id {
                Some(id) if id < scene.materials.len() => id,
                _ => *default_material.get_or_insert_with(|| {
                    scene.materials.push(Material::new().with_name(DEFAULT_MATERIAL_NAME));
                    scene.materials.len() - 1
                }),
            };

            tracing::debug!(
                object = %model.name,
                vertices = mesh.vertex_count(),
                faces = mesh.face_count(),
                "Converted OBJ object"
            );

            scene.meshes.push(mesh);
            scene.root.children.push(Node::new(model.name).with_mesh(mesh_index));
        }

        tracing::info!(
            "成功加载 OBJ 场景: {} 个网格, {} 个材质",
            scene.meshes.len(),
            scene.materials.len()
        );

        Ok(scene)
    }
}

impl SceneLoader for ObjLoader {
    fn load_from_file(path: &Path) -> Result<Scene> {
        if !path.exists() {
            return Err(MeshLoadError::FileNotFound(path.to_path_buf()).into());
        }

        let (models, materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        let root_name = path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");

        Self::build_scene(root_name, models, materials)
    }

    fn load_from_memory(data: &[u8]) -> Result<Scene> {
        let mut reader = data;

        // 内存中没有相对路径可用，材质库一律视为缺失
        let (models, materials) = tobj::load_obj_buf(&mut reader, &Self::load_options(), |_| {
            Err(tobj::LoadError::OpenFileFailed)
        })
        .map_err(|e| MeshLoadError::ParseError(format!("tobj 解析失败: {}", e)))?;

        Self::build_scene("Unnamed", models, materials)
    }

    fn supported_extensions() -> &'static [&'static str] {
        &["obj"]
    }
}

fn convert_mesh(source: &tobj::Mesh) -> Result<Mesh> {
    if source.positions.len() % 3 != 0 {
        return Err(MeshLoadError::InvalidGeometry(
            format!("顶点位置数据不完整: {} 个浮点数", source.positions.len())
        ).into());
    }

    let mut mesh = Mesh::new();
    mesh.positions = source.positions
        .chunks_exact(3)
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();

    if !source.normals.is_empty() {
        mesh.normals = Some(source.normals
            .chunks_exact(3)
            .map(|n| Vector3::new(n[0], n[1], n[2]))
            .collect());
    }

    if !source.texcoords.is_empty() {
        mesh.texcoords = Some(source.texcoords
            .chunks_exact(2)
            .map(|t| Vector3::new(t[0], t[1], 0.0))
            .collect());
    }

    if source.face_arities.is_empty() {
        // 全部是三角形
        mesh.faces = source.indices.chunks(3).map(MeshFace::new).collect();
    } else {
        let mut start = 0usize;
        for &arity in &source.face_arities {
            let end = start + arity as usize;
            let indices = source.indices.get(start..end).ok_or_else(|| {
                MeshLoadError::InvalidGeometry(format!(
                    "面索引不足: 需要 {} 个, 实际 {} 个",
                    end,
                    source.indices.len()
                ))
            })?;
            mesh.faces.push(MeshFace::new(indices));
            start = end;
        }
    }

    Ok(mesh)
}

fn convert_material(source: &tobj::Material) -> Material {
    let mut material = Material::new();

    if !source.name.is_empty() {
        material = material.with_name(source.name.clone());
    }

    let colors = [
        (MaterialKey::ColorDiffuse, source.diffuse),
        (MaterialKey::ColorAmbient, source.ambient),
        (MaterialKey::ColorSpecular, source.specular),
    ];
    for (key, value) in colors {
        if let Some([r, g, b]) = value {
            material = material.with_color(key, Color::rgb(r, g, b));
        }
    }

    if let Some(dissolve) = source.dissolve {
        material = material.with_float(MaterialKey::Opacity, dissolve);
    }
    if let Some(shininess) = source.shininess {
        material = material.with_float(MaterialKey::Shininess, shininess);
    }

    let textures = [
        (TextureSlot::Diffuse, &source.diffuse_texture),
        (TextureSlot::Ambient, &source.ambient_texture),
        (TextureSlot::Specular, &source.specular_texture),
        (TextureSlot::Shininess, &source.shininess_texture),
        (TextureSlot::Height, &source.normal_texture),
    ];
    for (slot, path) in textures {
        if let Some(path) = path {
            material = material.with_texture(slot, path.clone());
        }
    }

    material
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD_OBJ: &str = "\
o Quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
f 1 2 3 4
f 1 2 3
";

    #[test]
    fn test_supported_extensions() {
        let exts = ObjLoader::supported_extensions();
        assert_eq!(exts, &["obj"]);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ObjLoader::load_from_file(Path::new("nonexistent.obj"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_memory_keeps_polygons() {
        let scene = ObjLoader::load_from_memory(QUAD_OBJ.as_bytes()).unwrap();

        assert_eq!(scene.meshes.len(), 1);
        let mesh = &scene.meshes[0];
        assert_eq!(mesh.face_count(), 2);
        assert_eq!(mesh.faces[0].len(), 4);
        assert_eq!(mesh.faces[1].len(), 3);
        assert!(!mesh.has_normals());
        assert!(!mesh.has_texcoords());

        assert_eq!(scene.root.children.len(), 1);
        assert_eq!(scene.root.children[0].name, "Quad");
        assert_eq!(scene.root.children[0].meshes, vec![0]);
    }

    #[test]
    fn test_missing_material_falls_back_to_default() {
        let scene = ObjLoader::load_from_memory(QUAD_OBJ.as_bytes()).unwrap();

        assert_eq!(scene.materials.len(), 1);
        assert_eq!(scene.materials[0].name(), Some(DEFAULT_MATERIAL_NAME));
        assert_eq!(scene.meshes[0].material_index, 0);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_convert_material() {
        let source = tobj::Material {
            name: "Steel".to_string(),
            diffuse: Some([0.5, 0.5, 0.5]),
            shininess: Some(32.0),
            normal_texture: Some("steel_n.png".to_string()),
            ..Default::default()
        };

        let material = convert_material(&source);
        assert_eq!(material.name(), Some("Steel"));
        assert_eq!(material.color(&MaterialKey::ColorDiffuse), Some(Color::rgb(0.5, 0.5, 0.5)));
        assert!(material.color(&MaterialKey::ColorAmbient).is_none());
        assert_eq!(material.float(&MaterialKey::Shininess), Some(32.0));
        assert_eq!(material.texture(TextureSlot::Height), Some("steel_n.png"));
    }
}
