//! MD2 文件头
//!
//! 固定 68 字节：17 个小端序 `u32`。计数字段只取自场景的**第一个网格**，
//! 偏移字段按 skins → texcoords → triangles → glCommands → frames 的顺序累加。
//!
//! # 字节布局
//!
//! | 偏移 | 字段 |
//! |------|------|
//! | 0  | magic |
//! | 4  | version |
//! | 8  | skin_width |
//! | 12 | skin_height |
//! | 16 | frame_size |
//! | 20 | num_skins |
//! | 24 | num_vertices |
//! | 28 | num_tex_coords |
//! | 32 | num_triangles |
//! | 36 | num_gl_commands |
//! | 40 | num_frames |
//! | 44 | offset_skins |
//! | 48 | offset_tex_coords |
//! | 52 | offset_triangles |
//! | 56 | offset_frames |
//! | 60 | offset_gl_commands |
//! | 64 | offset_end |
//!
//! 注意 `offset_frames` 写在 `offset_gl_commands` 之前，虽然计算顺序相反。

use bytemuck::{Pod, Zeroable};
use std::io::{self, Write};

use crate::core::error::SceneError;
use crate::geometry::Scene;

/// "IDP2"
pub const MD2_MAGIC: u32 = 844121161;

pub const MD2_VERSION: u32 = 8;

/// 文件头自身的字节数，也是第一个数据段的起始偏移
pub const HEADER_SIZE: u32 = 68;

/// 每个数据段元素的字节数
pub const SKIN_SIZE: u32 = 64;
pub const TEX_COORD_SIZE: u32 = 4;
pub const TRIANGLE_SIZE: u32 = 12;
pub const GL_COMMAND_SIZE: u32 = 0;
pub const FRAME_HEADER_SIZE: u32 = 30;
pub const FRAME_VERTEX_SIZE: u32 = 4;

/// MD2 文件头
///
/// 字段顺序即写出顺序，`#[repr(C)]` 保证与 `[u32; 17]` 布局一致。
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Md2Header {
    pub magic: u32,
    pub version: u32,
    pub skin_width: u32,
    pub skin_height: u32,
    pub frame_size: u32,
    pub num_skins: u32,
    pub num_vertices: u32,
    pub num_tex_coords: u32,
    pub num_triangles: u32,
    pub num_gl_commands: u32,
    pub num_frames: u32,
    pub offset_skins: u32,
    pub offset_tex_coords: u32,
    pub offset_triangles: u32,
    pub offset_frames: u32,
    pub offset_gl_commands: u32,
    pub offset_end: u32,
}

impl Md2Header {
    /// 由场景的第一个网格构造文件头
    ///
    /// 场景没有网格时返回 [`SceneError::MissingGeometry`]。
    pub fn for_scene(scene: &Scene) -> Result<Self, SceneError> {
        let mesh = scene.meshes.first().ok_or(SceneError::MissingGeometry)?;

        let num_vertices = u32::try_from(mesh.vertex_count()).map_err(|_| {
            SceneError::InvalidGeometry(format!("vertex count {} exceeds u32", mesh.vertex_count()))
        })?;
        let num_triangles = u32::try_from(mesh.face_count()).map_err(|_| {
            SceneError::InvalidGeometry(format!("face count {} exceeds u32", mesh.face_count()))
        })?;

        Ok(Self::from_counts(num_vertices, num_triangles))
    }

    /// 由顶点数和面数计算所有字段
    ///
    /// 纹理坐标数等于顶点数；帧数沿用 magic 作为占位值，
    /// 帧段大小因此会溢出，所有偏移按 `u32` 回绕计算。
    pub fn from_counts(num_vertices: u32, num_triangles: u32) -> Self {
        let mut header = Self {
            magic: MD2_MAGIC,
            version: MD2_VERSION,
            skin_width: 1,
            skin_height: 1,
            frame_size: 1,
            num_skins: 1,
            num_vertices,
            num_tex_coords: num_vertices,
            num_triangles,
            num_gl_commands: 0,
            num_frames: MD2_MAGIC,
            ..Self::zeroed()
        };

        let mut offset = HEADER_SIZE;

        header.offset_skins = offset;
        offset = offset.wrapping_add(header.num_skins.wrapping_mul(SKIN_SIZE));

        header.offset_tex_coords = offset;
        offset = offset.wrapping_add(header.num_tex_coords.wrapping_mul(TEX_COORD_SIZE));

        header.offset_triangles = offset;
        offset = offset.wrapping_add(header.num_triangles.wrapping_mul(TRIANGLE_SIZE));

        header.offset_gl_commands = offset;
        offset = offset.wrapping_add(header.num_gl_commands.wrapping_mul(GL_COMMAND_SIZE));

        header.offset_frames = offset;
        let frame_bytes = FRAME_HEADER_SIZE
            .wrapping_add(header.num_vertices.wrapping_mul(FRAME_VERTEX_SIZE));
        offset = offset.wrapping_add(header.num_frames.wrapping_mul(frame_bytes));

        header.offset_end = offset;

        tracing::debug!(
            offset_skins = header.offset_skins,
            offset_tex_coords = header.offset_tex_coords,
            offset_triangles = header.offset_triangles,
            offset_gl_commands = header.offset_gl_commands,
            offset_frames = header.offset_frames,
            offset_end = header.offset_end,
            "MD2 header offsets"
        );

        header
    }

    /// 按写出顺序排列的字段
    pub fn fields(&self) -> [u32; 17] {
        bytemuck::cast(*self)
    }

    /// 序列化为 68 字节小端序数据
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE as usize] {
        let mut bytes = [0u8; HEADER_SIZE as usize];
        for (chunk, field) in bytes.chunks_exact_mut(4).zip(self.fields()) {
            chunk.copy_from_slice(&field.to_le_bytes());
        }
        bytes
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(&self.to_bytes())
    }
}
