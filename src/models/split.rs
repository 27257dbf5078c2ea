use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// 拆分页码范围（页码从 1 开始，包含两端）
///
/// 输入控件只给出最小值提示，提交前必须重新调用 [`SplitParameters::validate`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitParameters {
    pub start_page: i64,
    pub end_page: i64,
}

impl Default for SplitParameters {
    fn default() -> Self {
        Self {
            start_page: 1,
            end_page: 1,
        }
    }
}

impl SplitParameters {
    pub fn new(start_page: i64, end_page: i64) -> Self {
        Self {
            start_page,
            end_page,
        }
    }

    /// 要求 `end_page >= start_page >= 1`
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_page >= 1 && self.end_page >= self.start_page {
            Ok(())
        } else {
            Err(ValidationError::InvalidPageRange {
                start: self.start_page,
                end: self.end_page,
            })
        }
    }

    pub fn page_count(&self) -> Option<u64> {
        self.validate()
            .ok()
            .map(|_| (self.end_page - self.start_page + 1) as u64)
    }
}
