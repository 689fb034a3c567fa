//! 打开文件表
//!
//! 当前存活的逻辑文件集合，按插入顺序保存。只负责存储与查找，
//! 何时插入、何时移除由 [`crate::Interposer`] 决定。

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::mem;

use crate::{FileId, LogicalFile, RawFd};

/// 打开文件表
#[derive(Debug, Default)]
pub struct OpenFileTable {
    files: Vec<Arc<LogicalFile>>,
}

impl OpenFileTable {
    /// 创建空表
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入到表尾
    pub fn insert(&mut self, file: Arc<LogicalFile>) {
        self.files.push(file);
    }

    /// 移除指定文件，保持其余文件的相对顺序
    pub fn remove(&mut self, file: &LogicalFile) -> Option<Arc<LogicalFile>> {
        self.remove_id(file.id())
    }

    /// 按标识移除
    pub fn remove_id(&mut self, id: FileId) -> Option<Arc<LogicalFile>> {
        let pos = self.files.iter().position(|f| f.id() == id)?;
        Some(self.files.remove(pos))
    }

    /// 按描述符查找（主描述符或任一别名），返回插入顺序中的第一个
    pub fn find_by_fd(&self, fd: RawFd) -> Option<&Arc<LogicalFile>> {
        self.files.iter().find(|f| f.refers_to(fd))
    }

    /// 按打开路径查找，返回插入顺序中的第一个
    pub fn find_by_path(&self, path: &str) -> Option<&Arc<LogicalFile>> {
        self.files.iter().find(|f| f.path() == path)
    }

    /// 按插入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Arc<LogicalFile>> {
        self.files.iter()
    }

    /// 文件数量
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// 取走并清空所有文件
    pub fn take_all(&mut self) -> Vec<Arc<LogicalFile>> {
        mem::take(&mut self.files)
    }
}
