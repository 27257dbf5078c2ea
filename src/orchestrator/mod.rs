//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责装配资源和调度提交，是整个系统的"指挥中心"。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理 Vec<JobManifest>)
//!     ↓
//! workflow::SubmissionController (处理单次提交)
//!     ↓
//! services (能力层：BatchStore / ResultSink)  clients (远程处理服务)
//!     ↓
//! infrastructure (基础设施：ProcessingGate)
//! ```
//!
//! ## 设计原则
//!
//! 1. **资源隔离**：只有编排层创建 BatchStore、ProcessingGate 和服务客户端
//! 2. **向下依赖**：编排层 → workflow → services / clients → infrastructure
//! 3. **无业务逻辑**：只做装配、调度和统计

pub mod app;

pub use app::{App, RunStats};
