//! 常用诊断输出实现

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};
use sync::SpinLock;

use crate::{DiagSink, Level};

/// 转发到 [`log`] 门面的输出
///
/// 拦截层的默认输出；真正的写出位置由进程里安装的 logger 决定。
#[derive(Debug, Clone, Copy)]
pub struct LogSink {
    target: &'static str,
}

impl LogSink {
    /// 默认的日志 target
    pub const DEFAULT_TARGET: &'static str = "wrap";

    /// 使用指定 target 创建
    pub const fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}

impl DiagSink for LogSink {
    fn write_line(&self, level: Level, line: &str) {
        log::log!(target: self.target, log::Level::from(level), "{}", line);
    }
}

/// 丢弃所有输出
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagSink for NullSink {
    fn write_line(&self, _level: Level, _line: &str) {}
}

/// 写到标准错误，每行一条
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

#[cfg(feature = "std")]
impl DiagSink for StderrSink {
    fn write_line(&self, _level: Level, line: &str) {
        std::eprintln!("{}", line);
    }
}

/// 内存中的有界行缓冲
///
/// 缓冲满时丢弃最旧的一行并计数，便于事后检查或在测试中断言。
#[derive(Debug)]
pub struct MemorySink {
    lines: SpinLock<VecDeque<(Level, String)>>,
    capacity: usize,
    dropped: AtomicUsize,
}

impl MemorySink {
    /// 默认容量（行数）
    pub const DEFAULT_CAPACITY: usize = 256;

    /// 创建容量为 `capacity` 行的缓冲（0 视为 1）
    pub fn new(capacity: usize) -> Self {
        Self {
            lines: SpinLock::new(VecDeque::new()),
            capacity: capacity.max(1),
            dropped: AtomicUsize::new(0),
        }
    }

    /// 当前缓冲的行数
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// 缓冲是否为空
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// 因容量不足被丢弃的行数
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// 复制当前缓冲的全部行（按写入顺序）
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().iter().map(|(_, l)| l.clone()).collect()
    }

    /// 复制指定级别的行
    pub fn lines_at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// 包含 `needle` 的行数
    pub fn count_containing(&self, needle: &str) -> usize {
        self.lines
            .lock()
            .iter()
            .filter(|(_, line)| line.contains(needle))
            .count()
    }

    /// 取走全部行并清空缓冲
    pub fn take(&self) -> Vec<(Level, String)> {
        self.lines.lock().drain(..).collect()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl DiagSink for MemorySink {
    fn write_line(&self, level: Level, line: &str) {
        let mut lines = self.lines.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
        lines.push_back((level, line.to_string()));
    }
}
