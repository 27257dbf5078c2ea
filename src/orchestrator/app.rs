//! 批量任务处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责任务清单的处理和资源管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、写日志文件头、创建服务客户端和结果输出
//! 2. **批量加载**：扫描并加载所有任务清单（`Vec<JobManifest>`）
//! 3. **依次提交**：把清单内容装入 BatchStore，逐个提交非空批次
//! 4. **资源管理**：唯一持有 BatchStore、ProcessingGate 和 SubmissionController
//! 5. **全局统计**：汇总所有提交的结果

use crate::clients::{PdfServiceClient, RemoteProcessor};
use crate::config::Config;
use crate::infrastructure::ProcessingGate;
use crate::models::{load_all_manifests, JobManifest, OperationKind};
use crate::services::{BatchStore, DirectorySink, ResultSink};
use crate::utils::logging::{
    init_log_file, log_manifest_complete, log_manifest_start, log_manifests_loaded,
    log_startup, print_final_stats,
};
use crate::workflow::SubmissionController;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    controller: SubmissionController,
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    /// 远程成功但结果未能交付
    pub undelivered: usize,
}

impl RunStats {
    fn merge(&mut self, other: RunStats) {
        self.success += other.success;
        self.failed += other.failed;
        self.total += other.total;
        self.undelivered += other.undelivered;
    }

    /// 存在失败的提交或未交付的结果
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.undelivered > 0
    }
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate().context("配置校验失败")?;

        // 初始化日志文件
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法写入日志文件: {}", config.output_log_file))?;

        log_startup(&config.service_base_url, config.request_timeout_secs);

        let remote = Arc::new(PdfServiceClient::new(&config)?);
        let sink = Arc::new(DirectorySink::from_config(&config));

        Ok(Self::with_components(config, remote, sink))
    }

    /// 使用指定的远程服务和结果输出组装应用
    pub fn with_components(
        config: Config,
        remote: Arc<dyn RemoteProcessor>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        let store = Arc::new(RwLock::new(BatchStore::with_default_batches()));
        let gate = Arc::new(ProcessingGate::new());
        let controller = SubmissionController::new(store, gate, remote, sink)
            .with_timeout(config.request_timeout());

        Self { config, controller }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunStats> {
        info!("\n📁 正在扫描待处理的任务清单...");
        let manifests = load_all_manifests(&self.config.manifest_folder).await?;

        if manifests.is_empty() {
            warn!("⚠️ 没有找到待处理的任务清单，程序结束");
            return Ok(RunStats::default());
        }

        let total = manifests.len();
        log_manifests_loaded(total);

        let mut stats = RunStats::default();
        for (idx, manifest) in manifests.iter().enumerate() {
            log_manifest_start(idx + 1, total, &manifest.display_name());

            let result = self.process_manifest(manifest).await;
            log_manifest_complete(idx + 1, result.success, result.total);

            stats.merge(result);
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            stats.undelivered,
            &self.config.output_log_file,
        );

        Ok(stats)
    }

    /// 处理单个清单：装入批次，依次提交所有非空批次
    pub async fn process_manifest(&self, manifest: &JobManifest) -> RunStats {
        self.load_into_store(manifest).await;

        let mut stats = RunStats::default();
        for kind in OperationKind::ALL {
            let has_files = self
                .controller
                .store()
                .read()
                .await
                .get(kind.default_batch_name())
                .map(|b| !b.is_empty())
                .unwrap_or(false);
            if !has_files {
                continue;
            }

            stats.total += 1;
            let failures_before = self.controller.sink().delivery_failures();
            if self.controller.submit(kind).await.is_success() {
                stats.success += 1;
                if self.controller.sink().delivery_failures() > failures_before {
                    stats.undelivered += 1;
                }
            } else {
                stats.failed += 1;
            }
        }

        stats
    }

    /// 用清单内容替换当前批次
    async fn load_into_store(&self, manifest: &JobManifest) {
        let mut store = self.controller.store().write().await;
        store.reset();

        store.add(OperationKind::Merge.default_batch_name(), manifest.merge_files());
        store.add(OperationKind::Convert.default_batch_name(), manifest.convert_images());

        let split_batch = OperationKind::Split.default_batch_name();
        store.add(split_batch, manifest.split_file());
        if let Some(job) = &manifest.split {
            store.set_page_range(split_batch, job.page_range());
        }
    }
}
