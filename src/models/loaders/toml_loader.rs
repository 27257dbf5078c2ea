use crate::error::FileError;
use crate::models::file_handle::FileHandle;
use crate::models::split::SplitParameters;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 任务清单
///
/// ```toml
/// [merge]
/// files = ["a.pdf", "b.pdf"]
///
/// [split]
/// file = "x.pdf"
/// start_page = 1
/// end_page = 5
///
/// [convert]
/// images = ["1.png", "2.jpg"]
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobManifest {
    #[serde(default)]
    pub merge: Option<MergeJob>,
    #[serde(default)]
    pub split: Option<SplitJob>,
    #[serde(default)]
    pub convert: Option<ConvertJob>,
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MergeJob {
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SplitJob {
    pub file: PathBuf,
    #[serde(default = "first_page")]
    pub start_page: i64,
    #[serde(default = "first_page")]
    pub end_page: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertJob {
    pub images: Vec<PathBuf>,
}

fn first_page() -> i64 {
    1
}

impl SplitJob {
    pub fn page_range(&self) -> SplitParameters {
        SplitParameters::new(self.start_page, self.end_page)
    }
}

impl JobManifest {
    /// 清单显示名称（文件名）
    pub fn display_name(&self) -> String {
        self.file_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "<inline>".to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.merge.is_none() && self.split.is_none() && self.convert.is_none()
    }

    /// 相对路径按清单文件所在目录解析
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.file_path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    pub fn merge_files(&self) -> Vec<FileHandle> {
        self.merge
            .iter()
            .flat_map(|job| job.files.iter())
            .map(|p| FileHandle::from_path(self.resolve(p)))
            .collect()
    }

    pub fn split_file(&self) -> Option<FileHandle> {
        self.split
            .as_ref()
            .map(|job| FileHandle::from_path(self.resolve(&job.file)))
    }

    pub fn convert_images(&self) -> Vec<FileHandle> {
        self.convert
            .iter()
            .flat_map(|job| job.images.iter())
            .map(|p| FileHandle::from_path(self.resolve(p)))
            .collect()
    }
}

/// 从 TOML 文件加载任务清单
pub async fn load_manifest(toml_file_path: &Path) -> Result<JobManifest> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut manifest: JobManifest = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    manifest.file_path = Some(toml_file_path.to_path_buf());

    Ok(manifest)
}

/// 从文件夹中加载所有任务清单，按文件名排序
pub async fn load_all_manifests(folder_path: &str) -> Result<Vec<JobManifest>> {
    let folder = PathBuf::from(folder_path);

    if !folder.is_dir() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut manifests = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_manifest(&path).await {
            Ok(manifest) if manifest.is_empty() => {
                tracing::warn!("清单 {} 中没有任何任务，已跳过", path.display());
            }
            Ok(manifest) => manifests.push(manifest),
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(manifests)
}
