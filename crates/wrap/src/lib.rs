//! 描述符拦截核心
//!
//! 把黑盒调用方对特定设备路径的 `open`/`dup`/`close` 重定向到按路径注册的
//! 处理程序，并在调用方任意复制、泄漏、乱序关闭描述符的情况下，
//! 保证处理程序状态在最后一个描述符关闭时被释放且只释放一次。
//!
//! - [`Registry`] / [`HandlerBinding`] - 路径到打开函数的绑定
//! - [`LogicalFile`] / [`FileOps`] - 被拦截的资源及其处理程序
//! - [`AliasState`] - 描述符别名状态机
//! - [`OpenFileTable`] - 存活逻辑文件表
//! - [`Interposer`] - 对外的拦截入口
//!
//! 真正的系统调用拦截（符号插桩）由协作方完成，协作方在真实调用前后把
//! 描述符转发给 [`Interposer::intercept_open`]、[`Interposer::intercept_dup`]、
//! [`Interposer::intercept_close`]。

#![no_std]

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod alias;
pub mod config;
mod error;
mod file;
mod global;
mod interposer;
mod open_table;
mod registry;

/// 描述符的原始数值
pub type RawFd = i32;

// Re-export alias
pub use alias::{AliasSet, AliasState, CloseOutcome, DupOutcome};

// Re-export config
pub use config::{AliasCapacity, WrapConfig};

// Re-export error
pub use error::WrapError;

// Re-export file
pub use file::{FileId, FileOps, LogicalFile};

// Re-export global
pub use global::{global, install_global};

// Re-export interposer
pub use interposer::Interposer;

// Re-export open_table
pub use open_table::OpenFileTable;

// Re-export registry
pub use registry::{HandlerBinding, Opener, RegisterOutcome, Registry};

// Re-export diag types for convenience
pub use diag::{DiagSink, DumpPrefix, HexDump, Level, LogSink, MemorySink, NullSink, TraceFlags};
