/// PDF 处理服务客户端
///
/// 通过 HTTP multipart 调用服务端的 merge / split / convert 接口
use crate::clients::RemoteProcessor;
use crate::config::Config;
use crate::error::{AppError, AppResult, RemoteError};
use crate::models::{FileHandle, OperationKind, SplitParameters};
use crate::utils::logging::truncate_text;
use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use reqwest::multipart::{Form, Part};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, warn};

/// 建立连接的超时（秒）
const CONNECT_TIMEOUT_SECS: u64 = 10;

static ATTACHMENT_NAME_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"filename\*?=(?:UTF-8'')?"?([^";]+)"?"#).ok());

/// PDF 处理服务客户端
#[derive(Debug, Clone)]
pub struct PdfServiceClient {
    http: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
    connect_timeout_secs: u64,
}

impl PdfServiceClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let connect_timeout_secs = CONNECT_TIMEOUT_SECS.min(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("无法创建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.service_base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.request_timeout_secs,
            connect_timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, kind: OperationKind) -> String {
        format!("{}/{}", self.base_url, kind.endpoint())
    }

    /// 把文件读入内存并构造表单字段
    async fn build_part(file: &FileHandle) -> Result<Part, RemoteError> {
        let bytes = file.read().await.map_err(|e| match e {
            AppError::File(crate::error::FileError::ReadFailed { source, .. }) => RemoteError::Input {
                name: file.name().to_string(),
                source,
            },
            other => RemoteError::Other(other.to_string()),
        })?;

        Part::bytes(bytes.to_vec())
            .file_name(file.name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| RemoteError::Other(format!("无效的 MIME 类型 {}: {}", file.mime_type(), e)))
    }

    async fn build_form(kind: OperationKind, files: &[FileHandle]) -> Result<Form, RemoteError> {
        let mut form = Form::new();
        for file in files {
            form = form.part(kind.field_name(), Self::build_part(file).await?);
        }
        Ok(form)
    }

    /// 发送表单并读取二进制结果
    async fn post_form(&self, kind: OperationKind, form: Form) -> Result<Bytes, RemoteError> {
        let url = self.endpoint_url(kind);
        let endpoint = kind.endpoint().to_string();
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body);
            warn!("{} 返回错误状态 {}: {:?}", url, status, message);
            return Err(RemoteError::BadResponse {
                endpoint,
                status: status.as_u16(),
                message,
            });
        }

        if let Some(name) = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
        {
            debug!("服务端返回文件名: {}", name);
        }

        let payload = response
            .bytes()
            .await
            .map_err(|e| self.map_transport_error(&endpoint, e))?;

        if payload.is_empty() {
            return Err(RemoteError::EmptyResponse { endpoint });
        }

        debug!("{} 返回 {} 字节", url, payload.len());
        Ok(payload)
    }

    fn map_transport_error(&self, endpoint: &str, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            self.timeout_error(endpoint, err.is_connect())
        } else {
            RemoteError::Request {
                endpoint: endpoint.to_string(),
                source: err,
            }
        }
    }

    /// 连接阶段超时使用连接超时秒数，其余使用请求超时
    fn timeout_error(&self, endpoint: &str, during_connect: bool) -> RemoteError {
        let secs = if during_connect {
            self.connect_timeout_secs
        } else {
            self.timeout_secs
        };
        RemoteError::Timeout {
            endpoint: endpoint.to_string(),
            secs,
        }
    }
}

#[async_trait]
impl RemoteProcessor for PdfServiceClient {
    async fn merge(&self, files: &[FileHandle]) -> Result<Bytes, RemoteError> {
        let form = Self::build_form(OperationKind::Merge, files).await?;
        self.post_form(OperationKind::Merge, form).await
    }

    async fn split(&self, file: &FileHandle, range: SplitParameters) -> Result<Bytes, RemoteError> {
        let form = Self::build_form(OperationKind::Split, std::slice::from_ref(file))
            .await?
            .text("start_page", range.start_page.to_string())
            .text("end_page", range.end_page.to_string());
        self.post_form(OperationKind::Split, form).await
    }

    async fn convert(&self, images: &[FileHandle]) -> Result<Bytes, RemoteError> {
        let form = Self::build_form(OperationKind::Convert, images).await?;
        self.post_form(OperationKind::Convert, form).await
    }
}

/// 从错误响应中提取错误信息
///
/// 服务端约定返回 `{"error": "..."}`；否则使用截断后的原始文本
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if let Some(msg) = value.get("error").and_then(|v| v.as_str()) {
            return Some(msg.to_string());
        }
    }

    Some(truncate_text(trimmed, 200))
}

/// 解析 `Content-Disposition` 中的文件名
fn attachment_file_name(header: &str) -> Option<String> {
    ATTACHMENT_NAME_RE
        .as_ref()?
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
