//! 结果输出服务 - 业务能力层
//!
//! 只负责"把结果交给用户"能力，不关心结果从哪里来

use crate::config::Config;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{error, info};

/// 结果接收方
///
/// 核心流程认为交付总是成功，实现方自行记录失败
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn deliver(&self, payload: Bytes, suggested_name: &str);

    /// 累计交付失败次数
    fn delivery_failures(&self) -> usize {
        0
    }
}

/// 把结果写入输出目录
#[derive(Debug)]
pub struct DirectorySink {
    output_dir: PathBuf,
    timestamp_subdir: bool,
    failures: AtomicUsize,
}

impl DirectorySink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            timestamp_subdir: false,
            failures: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: PathBuf::from(&config.output_dir),
            timestamp_subdir: config.timestamp_subdir,
            failures: AtomicUsize::new(0),
        }
    }

    /// 每次交付写入按时间命名的子目录
    pub fn with_timestamp_subdir(mut self, enabled: bool) -> Self {
        self.timestamp_subdir = enabled;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写入文件并返回最终路径；同名文件会被覆盖
    pub async fn save(&self, payload: &[u8], suggested_name: &str) -> AppResult<PathBuf> {
        let mut dir = self.output_dir.clone();
        if self.timestamp_subdir {
            dir.push(chrono::Local::now().format("%Y-%m-%d_%H-%M-%S").to_string());
        }

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;

        let target = dir.join(sanitize_file_name(suggested_name));
        tokio::fs::write(&target, payload)
            .await
            .map_err(|e| AppError::file_write_failed(target.display().to_string(), e))?;

        Ok(target)
    }
}

#[async_trait]
impl ResultSink for DirectorySink {
    async fn deliver(&self, payload: Bytes, suggested_name: &str) {
        match self.save(&payload, suggested_name).await {
            Ok(path) => info!("💾 结果已保存: {} ({} 字节)", path.display(), payload.len()),
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                error!("❌ 保存结果 {} 失败: {}", suggested_name, e);
            }
        }
    }

    fn delivery_failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

/// 去掉路径成分，只保留文件名
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(|c: char| c == '/' || c == '\\')
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base == "." || base == ".." {
        "output.pdf".to_string()
    } else {
        base.to_string()
    }
}
