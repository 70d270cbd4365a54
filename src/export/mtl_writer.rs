//! 材质库序列化
//!
//! 每个材质按场景顺序写出一段，缺失的属性直接省略，段之间用空行分隔。

use std::io::{self, Write};

use crate::geometry::{Material, MaterialKey, TextureSlot};

use super::format::Real;

/// 材质的显示名称
///
/// 有名称属性时使用名称，否则为 `$Material_<下标>`。
pub fn material_name(materials: &[Material], index: usize) -> String {
    materials
        .get(index)
        .and_then(Material::name)
        .map(str::to_string)
        .unwrap_or_else(|| format!("$Material_{}", index))
}

/// 写出整个材质库
pub fn write_materials<W: Write>(out: &mut W, materials: &[Material]) -> io::Result<()> {
    for index in 0..materials.len() {
        write_material(out, materials, index)?;
    }
    Ok(())
}

fn write_material<W: Write>(out: &mut W, materials: &[Material], index: usize) -> io::Result<()> {
    let mat = &materials[index];
    let mut illum = 1;

    writeln!(out, "newmtl {}", material_name(materials, index))?;

    let colors = [
        ("kd", MaterialKey::ColorDiffuse),
        ("ka", MaterialKey::ColorAmbient),
        ("ks", MaterialKey::ColorSpecular),
    ];
    for (keyword, key) in &colors {
        if let Some(c) = mat.color(key) {
            writeln!(out, "{} {} {} {}", keyword, Real(c.r), Real(c.g), Real(c.b))?;
        }
    }

    if let Some(opacity) = mat.float(&MaterialKey::Opacity) {
        writeln!(out, "d {}", Real(opacity))?;
    }

    if let Some(shininess) = mat.float(&MaterialKey::Shininess).filter(|s| *s != 0.0) {
        writeln!(out, "Ns {}", Real(shininess))?;
        illum = 2;
    }

    writeln!(out, "illum {}", illum)?;

    let textures = [
        ("map_kd", TextureSlot::Diffuse),
        ("map_ka", TextureSlot::Ambient),
        ("map_ks", TextureSlot::Specular),
        ("map_ns", TextureSlot::Shininess),
    ];
    for (keyword, slot) in textures {
        if let Some(path) = mat.texture(slot) {
            writeln!(out, "{} {}", keyword, path)?;
        }
    }

    // 读取端对凹凸贴图的关键字不统一，两种都写
    if let Some(path) = mat.texture(TextureSlot::Height).or_else(|| mat.texture(TextureSlot::Normals)) {
        writeln!(out, "bump {}", path)?;
        writeln!(out, "map_bump {}", path)?;
    }

    writeln!(out)
}
