//! 提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整状态机
//!
//! ```text
//! Idle → Validating → InFlight → {Succeeded, Failed} → Idle
//! ```
//!
//! - 校验失败直接进入 Failed，不占用网关
//! - 网关被占用时进入 Failed(Busy)，不排队也不重试
//! - 远程调用无论成功、失败、超时，网关都会释放
//! - 批次内容在提交后保持不变，失败后可以直接重试

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::clients::RemoteProcessor;
use crate::error::{RemoteError, RemoteOperationError, SubmitError, ValidationError};
use crate::infrastructure::{GatePermit, ProcessingGate};
use crate::models::{FileHandle, OperationKind, RemoteResult, SplitParameters};
use crate::services::{BatchStore, ResultSink};
use crate::workflow::submission_ctx::SubmissionCtx;

/// 默认远程调用超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

/// 提交结果
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// 远程操作成功，结果已交给 ResultSink
    Succeeded(RemoteResult),
    /// 校验失败、忙或远程失败
    Failed(SubmitError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded(_))
    }

    pub fn error(&self) -> Option<&SubmitError> {
        match self {
            SubmissionOutcome::Succeeded(_) => None,
            SubmissionOutcome::Failed(e) => Some(e),
        }
    }

    pub fn into_result(self) -> Result<RemoteResult, SubmitError> {
        match self {
            SubmissionOutcome::Succeeded(r) => Ok(r),
            SubmissionOutcome::Failed(e) => Err(e),
        }
    }
}

/// 校验通过后的请求快照
struct ValidatedRequest {
    files: Vec<FileHandle>,
    range: SplitParameters,
}

/// 提交控制器
///
/// - 从 BatchStore 读取批次快照并校验
/// - 通过 ProcessingGate 保证全局只有一个远程调用
/// - 调用对应的远程操作，把结果交给 ResultSink
pub struct SubmissionController {
    store: Arc<RwLock<BatchStore>>,
    gate: Arc<ProcessingGate>,
    remote: Arc<dyn RemoteProcessor>,
    sink: Arc<dyn ResultSink>,
    timeout: Duration,
}

impl SubmissionController {
    /// 创建新的提交控制器
    pub fn new(
        store: Arc<RwLock<BatchStore>>,
        gate: Arc<ProcessingGate>,
        remote: Arc<dyn RemoteProcessor>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            store,
            gate,
            remote,
            sink,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// 设置单次远程调用的超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &Arc<RwLock<BatchStore>> {
        &self.store
    }

    pub fn gate(&self) -> &Arc<ProcessingGate> {
        &self.gate
    }

    pub fn sink(&self) -> &Arc<dyn ResultSink> {
        &self.sink
    }

    /// 当前没有任何远程操作在进行
    pub fn is_idle(&self) -> bool {
        !self.gate.is_busy()
    }

    /// 提交操作类型对应的默认批次
    pub async fn submit(&self, kind: OperationKind) -> SubmissionOutcome {
        self.submit_batch(kind, kind.default_batch_name()).await
    }

    /// 提交指定批次
    pub async fn submit_batch(&self, kind: OperationKind, batch_name: &str) -> SubmissionOutcome {
        let ctx = SubmissionCtx::new(kind, batch_name);
        let mut state = SubmissionState::Idle;

        // ========== 校验 ==========
        advance(&ctx, &mut state, SubmissionState::Validating);
        let request = match self.validate(kind, batch_name).await {
            Ok(request) => request,
            Err(e) => {
                advance(&ctx, &mut state, SubmissionState::Failed);
                warn!("{} ⚠️ 校验失败: {}", ctx, e);
                advance(&ctx, &mut state, SubmissionState::Idle);
                return SubmissionOutcome::Failed(e.into());
            }
        };

        // ========== 占用网关 ==========
        let Some(permit) = GatePermit::try_acquire(&self.gate) else {
            advance(&ctx, &mut state, SubmissionState::Failed);
            warn!("{} ⚠️ 已有操作正在处理中，本次提交被拒绝", ctx);
            advance(&ctx, &mut state, SubmissionState::Idle);
            return SubmissionOutcome::Failed(SubmitError::Busy { kind });
        };

        // ========== 远程调用 ==========
        advance(&ctx, &mut state, SubmissionState::InFlight);
        info!("{} 📤 正在提交 {} 个文件...", ctx, request.files.len());

        let outcome = match self.call_remote(kind, &request).await {
            Ok(payload) => {
                let result = RemoteResult::new(payload, kind.suggested_file_name());
                info!(
                    "{} ✓ 处理成功，收到 {} 字节，交付为 {}",
                    ctx,
                    result.len(),
                    result.suggested_name
                );
                self.sink
                    .deliver(result.payload.clone(), &result.suggested_name)
                    .await;
                advance(&ctx, &mut state, SubmissionState::Succeeded);
                SubmissionOutcome::Succeeded(result)
            }
            Err(source) => {
                let err = RemoteOperationError::new(kind, source);
                error!("{} ❌ {}", ctx, err);
                advance(&ctx, &mut state, SubmissionState::Failed);
                SubmissionOutcome::Failed(err.into())
            }
        };

        drop(permit);
        advance(&ctx, &mut state, SubmissionState::Idle);
        outcome
    }

    /// 读取批次快照并校验，不修改任何状态
    async fn validate(
        &self,
        kind: OperationKind,
        batch_name: &str,
    ) -> Result<ValidatedRequest, ValidationError> {
        let store = self.store.read().await;

        let batch = store
            .get(batch_name)
            .ok_or_else(|| ValidationError::UnknownBatch {
                batch: batch_name.to_string(),
            })?;

        if batch.kind() != kind.batch_kind() {
            return Err(ValidationError::BatchKindMismatch {
                batch: batch_name.to_string(),
                kind,
            });
        }

        if batch.is_empty() {
            return Err(ValidationError::EmptyBatch {
                batch: batch_name.to_string(),
            });
        }

        let range = store.page_range(batch_name);
        if kind == OperationKind::Split {
            range.validate()?;
        }

        Ok(ValidatedRequest {
            files: batch.files().to_vec(),
            range,
        })
    }

    /// 调用远程操作，超时视为远程失败
    async fn call_remote(
        &self,
        kind: OperationKind,
        request: &ValidatedRequest,
    ) -> Result<bytes::Bytes, RemoteError> {
        let call = async {
            match kind {
                OperationKind::Merge => self.remote.merge(&request.files).await,
                OperationKind::Convert => self.remote.convert(&request.files).await,
                OperationKind::Split => match request.files.first() {
                    Some(file) => self.remote.split(file, request.range).await,
                    None => Err(RemoteError::Other("拆分批次为空".to_string())),
                },
            }
        };

        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(RemoteError::Timeout {
                endpoint: kind.endpoint().to_string(),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

fn advance(ctx: &SubmissionCtx, state: &mut SubmissionState, next: SubmissionState) {
    debug!("{} 状态 {:?} → {:?}", ctx, state, next);
    *state = next;
}
