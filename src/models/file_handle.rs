//! 用户选择的文件
//!
//! 只保存名称和字节来源，真正读取推迟到提交时

use crate::error::{AppError, AppResult};
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// 文件内容来源
#[derive(Debug, Clone)]
pub enum FileSource {
    /// 本地磁盘路径
    Path(PathBuf),
    /// 内存中的字节
    Memory(Bytes),
}

/// 文件句柄
///
/// 加入批次后不可变；同一个文件可以加入多次，每次都是独立条目
#[derive(Debug, Clone)]
pub struct FileHandle {
    name: String,
    source: FileSource,
}

impl FileHandle {
    /// 从磁盘路径创建，显示名取文件名部分
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// 从内存字节创建
    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            FileSource::Path(p) => Some(p.as_path()),
            FileSource::Memory(_) => None,
        }
    }

    /// 读取文件内容
    pub async fn read(&self) -> AppResult<Bytes> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map(Bytes::from)
                .map_err(|e| AppError::file_read_failed(path.display().to_string(), e)),
        }
    }

    /// 根据扩展名推断 MIME 类型
    pub fn mime_type(&self) -> &'static str {
        let ext = Path::new(&self.name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        match ext.as_deref() {
            Some("pdf") => "application/pdf",
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("bmp") => "image/bmp",
            Some("webp") => "image/webp",
            Some("tif") | Some("tiff") => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_uses_file_name() {
        let handle = FileHandle::from_path("/tmp/docs/report.PDF");
        assert_eq!(handle.name(), "report.PDF");
        assert_eq!(handle.mime_type(), "application/pdf");
        assert!(handle.path().is_some());
    }

    #[test]
    fn test_mime_type_fallback() {
        assert_eq!(FileHandle::from_bytes("scan.JPEG", vec![1]).mime_type(), "image/jpeg");
        assert_eq!(
            FileHandle::from_bytes("notes", vec![1]).mime_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_read_memory_and_missing_path() {
        let handle = FileHandle::from_bytes("a.pdf", b"%PDF-1.4".to_vec());
        let bytes = tokio_test::block_on(handle.read()).unwrap();
        assert_eq!(bytes.as_ref(), b"%PDF-1.4");

        let missing = FileHandle::from_path("/definitely/not/here.pdf");
        assert!(tokio_test::block_on(missing.read()).is_err());
    }
}
