//! Mock 处理程序状态

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wrap::{FileOps, RawFd, WrapError};

/// 多个 Mock 文件共享的计数器
#[derive(Debug, Default)]
pub struct MockCounters {
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
    pub ioctls: AtomicUsize,
    /// 按释放顺序记录 (路径, 打开时的描述符)
    pub release_log: Mutex<Vec<(String, RawFd)>>,
}

impl MockCounters {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    pub fn ioctls(&self) -> usize {
        self.ioctls.load(Ordering::SeqCst)
    }

    pub fn release_log(&self) -> Vec<(String, RawFd)> {
        self.release_log.lock().unwrap().clone()
    }
}

/// Mock 处理程序状态
///
/// `release` 时计数并记录；ioctl 返回 `request + arg`。
pub struct MockFile {
    pub path: String,
    pub fd: RawFd,
    counters: Arc<MockCounters>,
    on_release: Option<Box<dyn FnOnce() + Send>>,
}

impl MockFile {
    pub fn new(path: &str, fd: RawFd, counters: Arc<MockCounters>) -> Self {
        counters.opened.fetch_add(1, Ordering::SeqCst);
        Self {
            path: path.to_string(),
            fd,
            counters,
            on_release: None,
        }
    }

    /// 释放时额外执行 `hook`
    pub fn on_release(mut self, hook: impl FnOnce() + Send + 'static) -> Self {
        self.on_release = Some(Box::new(hook));
        self
    }
}

impl FileOps for MockFile {
    fn release(self: Box<Self>) {
        let this = *self;
        this.counters.released.fetch_add(1, Ordering::SeqCst);
        this.counters
            .release_log
            .lock()
            .unwrap()
            .push((this.path.clone(), this.fd));
        if let Some(hook) = this.on_release {
            hook();
        }
    }

    fn ioctl(&self, request: u32, arg: usize) -> Result<isize, WrapError> {
        self.counters.ioctls.fetch_add(1, Ordering::SeqCst);
        Ok(request as isize + arg as isize)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
