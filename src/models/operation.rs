use crate::models::batch::BatchKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 远程操作类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// 合并多个 PDF
    Merge,
    /// 按页码范围拆分单个 PDF
    Split,
    /// 图片转 PDF
    Convert,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Merge,
        OperationKind::Split,
        OperationKind::Convert,
    ];

    /// 服务端接口路径
    pub fn endpoint(self) -> &'static str {
        match self {
            OperationKind::Merge => "merge",
            OperationKind::Split => "split",
            OperationKind::Convert => "convert",
        }
    }

    /// multipart 表单中文件字段名
    pub fn field_name(self) -> &'static str {
        match self {
            OperationKind::Merge => "files",
            OperationKind::Split => "file",
            OperationKind::Convert => "images",
        }
    }

    /// 结果文件的建议文件名
    pub fn suggested_file_name(self) -> &'static str {
        match self {
            OperationKind::Merge => "merged.pdf",
            OperationKind::Split => "split_output.pdf",
            OperationKind::Convert => "converted.pdf",
        }
    }

    /// 默认批次名称
    pub fn default_batch_name(self) -> &'static str {
        self.endpoint()
    }

    /// 该操作要求的批次类型
    pub fn batch_kind(self) -> BatchKind {
        match self {
            OperationKind::Split => BatchKind::Single,
            OperationKind::Merge | OperationKind::Convert => BatchKind::Multi,
        }
    }

    /// 中文名称（用于日志）
    pub fn label(self) -> &'static str {
        match self {
            OperationKind::Merge => "合并",
            OperationKind::Split => "拆分",
            OperationKind::Convert => "转换",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
