//! 拦截层诊断输出
//!
//! 拦截层本身不决定日志写到哪里，而是把每一条诊断行交给调用方注入的
//! [`DiagSink`]。本 crate 提供：
//!
//! - [`Level`] - 诊断级别（Error 到 Debug）
//! - [`TraceFlags`] - 详细模式下需要报告的事件集合
//! - [`DiagSink`] - 面向行的诊断输出接口
//! - [`LogSink`] / [`NullSink`] / [`MemorySink`] / `StderrSink` - 常用实现
//! - [`HexDump`] - 十六进制转储格式化
//!
//! 错误类事件（处理程序构造失败、别名槽耗尽、注册内存不足）总是输出；
//! 其余事件只有在对应的 [`TraceFlags`] 位打开时才会输出。

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod flags;
mod hexdump;
mod level;
mod sink;

#[cfg(test)]
mod tests;

pub use flags::{ParseTraceError, TraceFlags};
pub use hexdump::{DumpPrefix, HexDump, DEFAULT_COLUMNS};
pub use level::Level;
pub use sink::{LogSink, MemorySink, NullSink};

#[cfg(feature = "std")]
pub use sink::StderrSink;

use alloc::string::String;
use core::fmt::{self, Write};

/// 诊断输出 trait
///
/// 每次调用写入一整行文本（不含换行符）。实现必须可以在线程间共享，
/// 拦截层可能在任意调用线程上报告事件。
pub trait DiagSink: Send + Sync {
    /// 写入一行诊断信息
    fn write_line(&self, level: Level, line: &str);

    /// 格式化并写入一行诊断信息
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        let mut line = String::new();
        if line.write_fmt(args).is_ok() {
            self.write_line(level, &line);
        }
    }

    /// 逐行写入一段十六进制转储
    fn dump(&self, level: Level, dump: &HexDump<'_>) {
        for line in dump.lines() {
            self.write_line(level, &line);
        }
    }
}
