//! 测试支持 crate
//!
//! 提供处理程序与诊断输出的 Mock 实现，以及搭建拦截器的便捷函数。
//! 只作为 dev-dependency 被集成测试使用。

pub mod mock;

pub use mock::{MockCounters, MockFactory, MockFile, capture_sink};

use std::sync::Arc;

use diag::MemorySink;
use wrap::{Interposer, WrapConfig};

/// 创建一个记录全部诊断行的拦截器
pub fn capturing_interposer(config: WrapConfig) -> (Interposer, Arc<MemorySink>) {
    let sink = mock::capture_sink();
    let interposer = Interposer::with_sink(config, sink.clone());
    (interposer, sink)
}
