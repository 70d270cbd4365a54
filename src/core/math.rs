//! 数学库模块
//!
//! 基于 `nalgebra`，提供导出器用到的向量、矩阵和颜色类型。

pub use nalgebra::{Matrix4 as Mat4, Vector3 as Vec3, Vector4 as Vec4};

// 类型别名，使用更简洁的名称
pub type Vector3 = Vec3<f32>;
pub type Vector4 = Vec4<f32>;
pub type Matrix4 = Mat4<f32>;

/// 颜色类型（RGBA，范围 0.0-1.0）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// 创建新的颜色
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建 RGB 颜色（alpha = 1.0）
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

/// 矩阵辅助函数
pub mod matrix {
    use super::*;

    /// 创建平移矩阵
    pub fn translation(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// 创建缩放矩阵
    pub fn scaling(x: f32, y: f32, z: f32) -> Matrix4 {
        Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z))
    }

    /// 创建绕 Z 轴旋转的矩阵
    pub fn rotation_z(angle: f32) -> Matrix4 {
        Matrix4::from_axis_angle(&Vector3::z_axis(), angle)
    }

    /// 用仿射矩阵变换一个点
    ///
    /// 按 w = 1 相乘后直接取 xyz，不做透视除法。
    pub fn transform_point(m: &Matrix4, p: &Vector3) -> Vector3 {
        (m * Vector4::new(p.x, p.y, p.z, 1.0)).xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_creation() {
        let color = Color::rgb(1.0, 0.5, 0.0);
        assert_eq!(color.r, 1.0);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn test_matrix_translation() {
        let mat = matrix::translation(1.0, 2.0, 3.0);
        let result = matrix::transform_point(&mat, &Vector3::zeros());

        assert!((result.x - 1.0).abs() < 1e-6);
        assert!((result.y - 2.0).abs() < 1e-6);
        assert!((result.z - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_translate_then_scale_order() {
        // parent * local：先缩放再平移
        let m = matrix::translation(1.0, 0.0, 0.0) * matrix::scaling(2.0, 2.0, 2.0);
        let result = matrix::transform_point(&m, &Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(result, Vector3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_rotation_z() {
        let m = matrix::rotation_z(std::f32::consts::FRAC_PI_2);
        let result = matrix::transform_point(&m, &Vector3::new(1.0, 0.0, 0.0));
        assert!(result.x.abs() < 1e-6);
        assert!((result.y - 1.0).abs() < 1e-6);
    }
}
