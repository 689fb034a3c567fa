//! Mock 实现模块

mod factory;
mod file;

pub use factory::MockFactory;
pub use file::{MockCounters, MockFile};

use std::sync::Arc;

use diag::MemorySink;

/// 足够大的内存诊断输出，测试中不会丢行
pub fn capture_sink() -> Arc<MemorySink> {
    Arc::new(MemorySink::new(4096))
}
