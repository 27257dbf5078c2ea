//! 批次存储 - 业务能力层
//!
//! 持有所有命名批次及其页码范围。所有修改操作都不会失败：
//! 越界删除、未知批次等情况只记录日志，不影响调用方。

use crate::models::{BatchKind, FileBatch, FileHandle, OperationKind, SplitParameters};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// 批次存储
#[derive(Debug, Default)]
pub struct BatchStore {
    batches: BTreeMap<String, FileBatch>,
    page_ranges: BTreeMap<String, SplitParameters>,
}

impl BatchStore {
    /// 创建空的存储
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建包含 merge / split / convert 三个默认批次的存储
    pub fn with_default_batches() -> Self {
        let mut store = Self::new();
        for kind in OperationKind::ALL {
            store.create(kind.default_batch_name(), kind.batch_kind());
        }
        store
    }

    /// 创建批次；同名批次已存在时保持原样
    pub fn create(&mut self, name: impl Into<String>, kind: BatchKind) -> bool {
        let name = name.into();
        if self.batches.contains_key(&name) {
            return false;
        }
        debug!("创建批次 {} ({:?})", name, kind);
        self.batches.insert(name, FileBatch::new(kind));
        true
    }

    /// 向批次加入文件，返回实际加入的数量
    pub fn add<I>(&mut self, batch_name: &str, files: I) -> usize
    where
        I: IntoIterator<Item = FileHandle>,
    {
        match self.batches.get_mut(batch_name) {
            Some(batch) => {
                let added = batch.add(files);
                debug!("批次 {} 加入 {} 个文件，当前 {} 个", batch_name, added, batch.len());
                added
            }
            None => {
                warn!("批次 {} 不存在，忽略加入操作", batch_name);
                0
            }
        }
    }

    /// 移除批次中指定位置的文件，越界时不做任何修改
    pub fn remove(&mut self, batch_name: &str, index: usize) -> Option<FileHandle> {
        let removed = self
            .batches
            .get_mut(batch_name)
            .and_then(|batch| batch.remove(index));
        if removed.is_none() {
            debug!("批次 {} 没有第 {} 个文件，忽略删除", batch_name, index);
        }
        removed
    }

    /// 清空批次
    pub fn clear(&mut self, batch_name: &str) {
        if let Some(batch) = self.batches.get_mut(batch_name) {
            batch.clear();
        }
    }

    /// 清空所有批次并恢复默认页码范围
    pub fn reset(&mut self) {
        for batch in self.batches.values_mut() {
            batch.clear();
        }
        self.page_ranges.clear();
    }

    pub fn get(&self, batch_name: &str) -> Option<&FileBatch> {
        self.batches.get(batch_name)
    }

    /// 复制批次当前的文件列表
    pub fn snapshot(&self, batch_name: &str) -> Option<Vec<FileHandle>> {
        self.batches.get(batch_name).map(|b| b.files().to_vec())
    }

    pub fn batch_names(&self) -> impl Iterator<Item = &str> {
        self.batches.keys().map(String::as_str)
    }

    /// 批次的页码范围，未设置时为 (1, 1)
    pub fn page_range(&self, batch_name: &str) -> SplitParameters {
        self.page_ranges
            .get(batch_name)
            .copied()
            .unwrap_or_default()
    }

    /// 单独修改起始页，不做校验
    pub fn set_start_page(&mut self, batch_name: &str, start_page: i64) {
        if let Some(range) = self.page_range_mut(batch_name) {
            range.start_page = start_page;
        }
    }

    /// 单独修改结束页，不做校验
    pub fn set_end_page(&mut self, batch_name: &str, end_page: i64) {
        if let Some(range) = self.page_range_mut(batch_name) {
            range.end_page = end_page;
        }
    }

    pub fn set_page_range(&mut self, batch_name: &str, range: SplitParameters) {
        if let Some(current) = self.page_range_mut(batch_name) {
            *current = range;
        }
    }

    /// 只有已存在的批次才有页码范围
    fn page_range_mut(&mut self, batch_name: &str) -> Option<&mut SplitParameters> {
        if !self.batches.contains_key(batch_name) {
            warn!("批次 {} 不存在，忽略页码修改", batch_name);
            return None;
        }
        Some(self.page_ranges.entry(batch_name.to_string()).or_default())
    }
}
