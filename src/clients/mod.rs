pub mod pdf_client;

pub use pdf_client::PdfServiceClient;

use crate::error::RemoteError;
use crate::models::{FileHandle, SplitParameters};
use async_trait::async_trait;
use bytes::Bytes;

/// 远程处理服务
///
/// 每个方法对应一次请求/响应，成功时返回生成的文档字节。
/// 实现方不做重试。
#[async_trait]
pub trait RemoteProcessor: Send + Sync {
    /// 按顺序合并多个 PDF
    async fn merge(&self, files: &[FileHandle]) -> Result<Bytes, RemoteError>;

    /// 提取单个 PDF 的页码范围
    async fn split(&self, file: &FileHandle, range: SplitParameters) -> Result<Bytes, RemoteError>;

    /// 按顺序把图片转换为一个 PDF
    async fn convert(&self, images: &[FileHandle]) -> Result<Bytes, RemoteError>;
}
