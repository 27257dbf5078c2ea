//! # PDF Batch Submit
//!
//! 把本地文件组织成批次，提交给远程 PDF 处理服务（合并、拆分、图片转 PDF），
//! 并把返回的文档保存到本地。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有全局唯一的处理网关
//! - `ProcessingGate` - 保证同一时间最多一个远程操作
//!
//! ### ② 能力层（Services / Clients）
//! - `services/` - 描述"我能做什么"
//! - `BatchStore` - 批次的增删清空
//! - `ResultSink` - 把结果交给用户
//! - `clients/` - `RemoteProcessor` 与 HTTP 实现 `PdfServiceClient`
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的状态机
//! - `SubmissionController` - 校验 → 占用网关 → 远程调用 → 交付结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 加载任务清单并依次提交
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{PdfServiceClient, RemoteProcessor};
pub use config::Config;
pub use error::{AppError, AppResult, SubmitError, ValidationError};
pub use infrastructure::ProcessingGate;
pub use models::{FileBatch, FileHandle, OperationKind, RemoteResult, SplitParameters};
pub use orchestrator::App;
pub use services::{BatchStore, DirectorySink, ResultSink};
pub use workflow::{SubmissionController, SubmissionOutcome};
