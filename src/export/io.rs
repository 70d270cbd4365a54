//! 输出目标
//!
//! 导出器只生成内存中的两个缓冲区，落盘交给 [`IoSystem`] 的实现。

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::core::error::Result;

/// 文件写入接口
pub trait IoSystem {
    /// 以二进制方式写出整个文件，已存在则覆盖
    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()>;
}

/// 本地文件系统
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystem;

impl IoSystem for FileSystem {
    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(data)?;
        writer.flush()?;

        tracing::debug!(path = %path.display(), bytes = data.len(), "File written");
        Ok(())
    }
}

/// 内存文件系统，主要用于测试和嵌入
#[derive(Debug, Default, Clone)]
pub struct MemoryFileSystem {
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl IoSystem for MemoryFileSystem {
    fn write_file(&mut self, path: &Path, data: &[u8]) -> Result<()> {
        self.files.insert(path.to_path_buf(), data.to_vec());
        Ok(())
    }
}
