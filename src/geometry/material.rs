/// 材质数据结构模块
///
/// 材质是一个稀疏的属性表：只有出现过的键才会被导出。
/// 值的类型与键不匹配时按“未指定”处理。

use std::collections::BTreeMap;

use crate::core::math::Color;

/// 纹理槽位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureSlot {
    Diffuse,
    Ambient,
    Specular,
    Shininess,
    Height,
    Normals,
}

/// 材质属性键
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialKey {
    Name,
    ColorDiffuse,
    ColorAmbient,
    ColorSpecular,
    Opacity,
    Shininess,
    /// 第一层纹理路径
    Texture(TextureSlot),
    /// 未识别的属性，导出时忽略
    Other(String),
}

/// 材质属性值
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValue {
    String(String),
    Color(Color),
    Float(f32),
}

/// 场景材质
///
/// ```rust
/// use md2_export::geometry::{Material, MaterialKey};
/// use md2_export::core::Color;
///
/// let material = Material::new()
///     .with_name("Red")
///     .with_color(MaterialKey::ColorDiffuse, Color::rgb(1.0, 0.0, 0.0));
///
/// assert_eq!(material.name(), Some("Red"));
/// assert!(material.color(&MaterialKey::ColorAmbient).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    properties: BTreeMap<MaterialKey, MaterialValue>,
}

impl Material {
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置属性，返回旧值
    pub fn set(&mut self, key: MaterialKey, value: MaterialValue) -> Option<MaterialValue> {
        self.properties.insert(key, value)
    }

    pub fn get(&self, key: &MaterialKey) -> Option<&MaterialValue> {
        self.properties.get(key)
    }

    pub fn contains(&self, key: &MaterialKey) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set(MaterialKey::Name, MaterialValue::String(name.into()));
        self
    }

    pub fn with_color(mut self, key: MaterialKey, color: Color) -> Self {
        self.set(key, MaterialValue::Color(color));
        self
    }

    pub fn with_float(mut self, key: MaterialKey, value: f32) -> Self {
        self.set(key, MaterialValue::Float(value));
        self
    }

    pub fn with_texture(mut self, slot: TextureSlot, path: impl Into<String>) -> Self {
        self.set(MaterialKey::Texture(slot), MaterialValue::String(path.into()));
        self
    }

    /// 读取字符串属性
    pub fn string(&self, key: &MaterialKey) -> Option<&str> {
        match self.get(key)? {
            MaterialValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// 读取颜色属性
    pub fn color(&self, key: &MaterialKey) -> Option<Color> {
        match self.get(key)? {
            MaterialValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// 读取浮点属性
    pub fn float(&self, key: &MaterialKey) -> Option<f32> {
        match self.get(key)? {
            MaterialValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// 名称属性
    pub fn name(&self) -> Option<&str> {
        self.string(&MaterialKey::Name)
    }

    /// 纹理路径
    pub fn texture(&self, slot: TextureSlot) -> Option<&str> {
        self.string(&MaterialKey::Texture(slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_material() {
        let material = Material::new();
        assert!(material.is_empty());
        assert!(material.name().is_none());
    }

    #[test]
    fn test_typed_lookup() {
        let material = Material::new()
            .with_float(MaterialKey::Opacity, 0.5)
            .with_texture(TextureSlot::Diffuse, "wood.png");

        assert_eq!(material.float(&MaterialKey::Opacity), Some(0.5));
        assert_eq!(material.texture(TextureSlot::Diffuse), Some("wood.png"));
        assert_eq!(material.len(), 2);
    }

    #[test]
    fn test_type_mismatch_reads_as_absent() {
        let mut material = Material::new();
        material.set(MaterialKey::ColorDiffuse, MaterialValue::Float(1.0));
        material.set(MaterialKey::Name, MaterialValue::Float(3.0));

        assert!(material.contains(&MaterialKey::ColorDiffuse));
        assert!(material.color(&MaterialKey::ColorDiffuse).is_none());
        assert!(material.name().is_none());
    }

    #[test]
    fn test_set_replaces() {
        let mut material = Material::new().with_name("A");
        let old = material.set(MaterialKey::Name, MaterialValue::String("B".into()));

        assert_eq!(old, Some(MaterialValue::String("A".into())));
        assert_eq!(material.name(), Some("B"));
    }
}
