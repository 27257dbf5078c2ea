#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use pdf_batch_submit::error::RemoteError;
use pdf_batch_submit::models::{FileHandle, OperationKind, SplitParameters};
use pdf_batch_submit::{BatchStore, ProcessingGate, RemoteProcessor, ResultSink, SubmissionController};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, RwLock};

/// 一次远程调用的记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub kind: OperationKind,
    pub files: Vec<String>,
    pub range: Option<SplitParameters>,
}

/// 预设的远程响应
pub enum Scripted {
    Payload(&'static [u8]),
    Status(u16, &'static str),
    Stall(Duration),
}

/// 按脚本返回结果的远程服务，可在调用中途挂起
#[derive(Default)]
pub struct ScriptedRemote {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<RemoteCall>>,
    hold: Mutex<Option<Arc<Notify>>>,
    pub entered: Notify,
}

impl ScriptedRemote {
    pub fn new(script: Vec<Scripted>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            ..Default::default()
        })
    }

    /// 下一次调用进入后挂起，直到返回的 Notify 被触发
    pub fn hold_next_call(&self) -> Arc<Notify> {
        let release = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(release.clone());
        release
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn respond(
        &self,
        kind: OperationKind,
        files: &[FileHandle],
        range: Option<SplitParameters>,
    ) -> Result<Bytes, RemoteError> {
        self.calls.lock().unwrap().push(RemoteCall {
            kind,
            files: files.iter().map(|f| f.name().to_string()).collect(),
            range,
        });
        self.entered.notify_one();

        let hold = self.hold.lock().unwrap().take();
        if let Some(release) = hold {
            release.notified().await;
        }

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Payload(bytes)) => Ok(Bytes::from_static(bytes)),
            Some(Scripted::Status(status, message)) => Err(RemoteError::BadResponse {
                endpoint: kind.endpoint().to_string(),
                status,
                message: Some(message.to_string()),
            }),
            Some(Scripted::Stall(duration)) => {
                tokio::time::sleep(duration).await;
                Ok(Bytes::from_static(b"%PDF too late"))
            }
            None => Err(RemoteError::Other("no scripted response".to_string())),
        }
    }
}

#[async_trait]
impl RemoteProcessor for ScriptedRemote {
    async fn merge(&self, files: &[FileHandle]) -> Result<Bytes, RemoteError> {
        self.respond(OperationKind::Merge, files, None).await
    }

    async fn split(&self, file: &FileHandle, range: SplitParameters) -> Result<Bytes, RemoteError> {
        self.respond(OperationKind::Split, std::slice::from_ref(file), Some(range))
            .await
    }

    async fn convert(&self, images: &[FileHandle]) -> Result<Bytes, RemoteError> {
        self.respond(OperationKind::Convert, images, None).await
    }
}

/// 记录所有交付的结果
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<(Bytes, String)>>,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn deliveries(&self) -> Vec<(Bytes, String)> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultSink for RecordingSink {
    async fn deliver(&self, payload: Bytes, suggested_name: &str) {
        self.delivered
            .lock()
            .unwrap()
            .push((payload, suggested_name.to_string()));
    }
}

pub fn pdf(name: &str) -> FileHandle {
    FileHandle::from_bytes(name, format!("%PDF-1.4 {}", name).into_bytes())
}

pub fn controller(
    remote: Arc<ScriptedRemote>,
    sink: Arc<RecordingSink>,
) -> Arc<SubmissionController> {
    controller_with_timeout(remote, sink, Duration::from_secs(5))
}

pub fn controller_with_timeout(
    remote: Arc<ScriptedRemote>,
    sink: Arc<RecordingSink>,
    timeout: Duration,
) -> Arc<SubmissionController> {
    Arc::new(
        SubmissionController::new(
            Arc::new(RwLock::new(BatchStore::with_default_batches())),
            Arc::new(ProcessingGate::new()),
            remote,
            sink,
        )
        .with_timeout(timeout),
    )
}

pub async fn batch_names(controller: &SubmissionController, batch: &str) -> Vec<String> {
    controller
        .store()
        .read()
        .await
        .get(batch)
        .map(|b| b.names().into_iter().map(String::from).collect())
        .unwrap_or_default()
}
