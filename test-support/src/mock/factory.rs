//! 构造 Mock 绑定

use std::sync::Arc;

use wrap::{FileOps, HandlerBinding, WrapError};

use super::{MockCounters, MockFile};

/// 产生共享同一组计数器的绑定
#[derive(Debug, Default, Clone)]
pub struct MockFactory {
    counters: Arc<MockCounters>,
}

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &Arc<MockCounters> {
        &self.counters
    }

    /// 打开总是成功的绑定
    pub fn binding(&self, path: &str) -> HandlerBinding {
        let counters = self.counters.clone();
        HandlerBinding::new(path, move |path, fd| {
            Ok(Box::new(MockFile::new(path, fd, counters.clone())) as Box<dyn FileOps>)
        })
    }

    /// 打开总是失败的绑定
    pub fn failing_binding(&self, path: &str, err: WrapError) -> HandlerBinding {
        HandlerBinding::new(path, move |_, _| Err(err))
    }

    pub fn opened(&self) -> usize {
        self.counters.opened()
    }

    pub fn released(&self) -> usize {
        self.counters.released()
    }
}
