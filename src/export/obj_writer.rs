//! 几何文本序列化
//!
//! 在文件头之后依次写出：材质库引用、位置池、UV 池、法线池，以及每个网格实例的分组和面。

use std::io::{self, Write};

use crate::core::math::Vector3;

use super::format::Real;
use super::pool::{Face, FaceKind, MeshInstance, VertexPools};

/// 写出文件头之后的全部文本内容
pub fn write_geometry<W: Write>(
    out: &mut W,
    material_lib: &str,
    pools: &VertexPools,
    instances: &[MeshInstance],
) -> io::Result<()> {
    writeln!(out, "mtllib {}", material_lib)?;
    writeln!(out)?;

    write_pool(out, "vertex positions", "v  ", &pools.positions)?;
    write_pool(out, "UV coordinates", "vt ", &pools.texcoords)?;
    write_pool(out, "vertex normals", "vn ", &pools.normals)?;

    for instance in instances {
        write_instance(out, instance)?;
    }

    Ok(())
}

fn write_pool<W: Write>(out: &mut W, title: &str, prefix: &str, pool: &[Vector3]) -> io::Result<()> {
    writeln!(out, "# {} {}", pool.len(), title)?;
    for v in pool {
        writeln!(out, "{}{} {} {}", prefix, Real(v.x), Real(v.y), Real(v.z))?;
    }
    writeln!(out)
}

fn write_instance<W: Write>(out: &mut W, instance: &MeshInstance) -> io::Result<()> {
    writeln!(out, "# Mesh '{}' with {} faces", instance.name, instance.faces.len())?;
    writeln!(out, "g {}", instance.name)?;
    writeln!(out, "usemtl {}", instance.material_name)?;

    for face in &instance.faces {
        write_face(out, face)?;
    }

    writeln!(out)
}

/// 写出一行面
///
/// 点只写位置下标；线在有 UV 时写 `vp/vt`；多边形总是写 `vp/[vt]/[vn]`。
pub fn write_face<W: Write>(out: &mut W, face: &Face) -> io::Result<()> {
    write!(out, "{} ", face.kind.as_char())?;

    for fv in &face.indices {
        write!(out, " {}", fv.vp)?;

        if face.kind == FaceKind::Point {
            continue;
        }

        if fv.vt != 0 || face.kind == FaceKind::Polygon {
            write!(out, "/")?;
        }
        if fv.vt != 0 {
            write!(out, "{}", fv.vt)?;
        }
        if face.kind == FaceKind::Polygon {
            write!(out, "/")?;
            if fv.vn != 0 {
                write!(out, "{}", fv.vn)?;
            }
        }
    }

    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::pool::FaceVertex;

    fn face_line(kind: FaceKind, indices: Vec<FaceVertex>) -> String {
        let mut out = Vec::new();
        write_face(&mut out, &Face { kind, indices }).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_polygon_without_texcoord() {
        assert_eq!(face_line(FaceKind::Polygon, vec![FaceVertex::new(3, 0, 5)]), "f  3//5\n");
    }

    #[test]
    fn test_polygon_full_and_empty() {
        let line = face_line(
            FaceKind::Polygon,
            vec![
                FaceVertex::new(1, 2, 3),
                FaceVertex::new(4, 5, 0),
                FaceVertex::new(6, 0, 0),
            ],
        );
        assert_eq!(line, "f  1/2/3 4/5/ 6//\n");
    }

    #[test]
    fn test_point_never_has_slash() {
        assert_eq!(face_line(FaceKind::Point, vec![FaceVertex::new(7, 8, 9)]), "p  7\n");
    }

    #[test]
    fn test_line_faces() {
        let with_uv = face_line(FaceKind::Line, vec![FaceVertex::new(1, 2, 9), FaceVertex::new(3, 4, 9)]);
        assert_eq!(with_uv, "l  1/2 3/4\n");

        let without_uv = face_line(FaceKind::Line, vec![FaceVertex::new(1, 0, 9), FaceVertex::new(3, 0, 9)]);
        assert_eq!(without_uv, "l  1 3\n");
    }

    #[test]
    fn test_full_listing() {
        let pools = VertexPools {
            positions: vec![Vector3::new(5.0, 0.0, 0.0), Vector3::new(0.5, 1.0, -2.0)],
            normals: vec![Vector3::z()],
            texcoords: vec![],
        };
        let instances = vec![MeshInstance {
            name: "node_mesh".to_string(),
            material_name: "Steel".to_string(),
            faces: vec![Face {
                kind: FaceKind::Line,
                indices: vec![FaceVertex::new(1, 0, 1), FaceVertex::new(2, 0, 1)],
            }],
        }];

        let mut out = Vec::new();
        write_geometry(&mut out, "model.md2.mtl", &pools, &instances).unwrap();

        let expected = "\
mtllib model.md2.mtl

# 2 vertex positions
v  5 0 0
v  0.5 1 -2

# 0 UV coordinates

# 1 vertex normals
vn 0 0 1

# Mesh 'node_mesh' with 1 faces
g node_mesh
usemtl Steel
l  1 2

";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }
}
