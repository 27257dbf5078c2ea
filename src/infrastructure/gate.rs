//! 处理网关 - 基础设施层
//!
//! 全局唯一的"正在处理"标志，保证任意时刻最多只有一个远程操作在进行。
//! 不排队：获取失败即表示忙，由调用方决定如何处理。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// 处理网关
///
/// 由编排层创建并注入到提交控制器，所有批次共享同一个实例
#[derive(Debug, Default)]
pub struct ProcessingGate {
    busy: AtomicBool,
}

impl ProcessingGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// 空闲时占用网关并返回 true，否则返回 false 且不产生任何副作用
    pub fn try_acquire(&self) -> bool {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// 无条件释放
    pub fn release(&self) {
        self.busy.store(false, Ordering::Release);
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// 网关占用凭证，析构时释放网关
///
/// 成功、失败、超时以及 panic 展开都会经过 Drop
#[derive(Debug)]
pub struct GatePermit {
    gate: Arc<ProcessingGate>,
}

impl GatePermit {
    pub fn try_acquire(gate: &Arc<ProcessingGate>) -> Option<Self> {
        if gate.try_acquire() {
            debug!("网关已占用");
            Some(Self { gate: gate.clone() })
        } else {
            None
        }
    }
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.gate.release();
        debug!("网关已释放");
    }
}
