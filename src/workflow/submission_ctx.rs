//! 提交上下文
//!
//! 封装"我正在对哪个批次执行哪种操作"这一信息

use crate::models::OperationKind;
use std::fmt::Display;

/// 提交上下文（仅用于日志）
#[derive(Debug, Clone)]
pub struct SubmissionCtx {
    /// 操作类型
    pub kind: OperationKind,

    /// 目标批次名称
    pub batch_name: String,
}

impl SubmissionCtx {
    pub fn new(kind: OperationKind, batch_name: impl Into<String>) -> Self {
        Self {
            kind,
            batch_name: batch_name.into(),
        }
    }
}

impl Display for SubmissionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} 批次#{}]", self.kind, self.batch_name)
    }
}
