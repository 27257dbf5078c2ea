//! 文件批次
//!
//! 单文件批次（拆分）与多文件批次（合并、转换）在类型上区分，
//! "最多一个文件"由结构保证而不是靠截断数组。

use crate::models::file_handle::FileHandle;

/// 批次类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatchKind {
    /// 多文件，按加入顺序提交
    Multi,
    /// 最多一个文件，新文件替换旧文件
    Single,
}

/// 文件批次
#[derive(Debug, Clone)]
pub enum FileBatch {
    Multi(Vec<FileHandle>),
    Single(Option<FileHandle>),
}

impl FileBatch {
    pub fn new(kind: BatchKind) -> Self {
        match kind {
            BatchKind::Multi => FileBatch::Multi(Vec::new()),
            BatchKind::Single => FileBatch::Single(None),
        }
    }

    pub fn kind(&self) -> BatchKind {
        match self {
            FileBatch::Multi(_) => BatchKind::Multi,
            FileBatch::Single(_) => BatchKind::Single,
        }
    }

    /// 加入文件
    ///
    /// 多文件批次追加全部文件；单文件批次只保留第一个文件并替换原有条目。
    /// 空输入不做任何修改。返回实际加入的文件数。
    pub fn add<I>(&mut self, files: I) -> usize
    where
        I: IntoIterator<Item = FileHandle>,
    {
        match self {
            FileBatch::Multi(list) => {
                let before = list.len();
                list.extend(files);
                list.len() - before
            }
            FileBatch::Single(slot) => match files.into_iter().next() {
                Some(first) => {
                    *slot = Some(first);
                    1
                }
                None => 0,
            },
        }
    }

    /// 移除指定位置的文件，越界时不做任何修改
    pub fn remove(&mut self, index: usize) -> Option<FileHandle> {
        match self {
            FileBatch::Multi(list) => {
                if index < list.len() {
                    Some(list.remove(index))
                } else {
                    None
                }
            }
            FileBatch::Single(slot) => {
                if index == 0 {
                    slot.take()
                } else {
                    None
                }
            }
        }
    }

    pub fn clear(&mut self) {
        match self {
            FileBatch::Multi(list) => list.clear(),
            FileBatch::Single(slot) => *slot = None,
        }
    }

    pub fn files(&self) -> &[FileHandle] {
        match self {
            FileBatch::Multi(list) => list.as_slice(),
            FileBatch::Single(Some(file)) => std::slice::from_ref(file),
            FileBatch::Single(None) => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files().iter().map(|f| f.name()).collect()
    }
}
