//! 拦截层错误类型
//!
//! 拦截层的错误全部在本地处理（见 [`crate::Interposer`]），不会中止调用方；
//! 需要把结果交还给系统调用的垫片可通过 [`WrapError::to_errno()`] 得到错误码。

use core::fmt;

/// 拦截层错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapError {
    /// 路径没有注册处理程序，调用透传 (-ENOENT)
    NoWrapper,
    /// 处理程序匹配但构造失败 (-EIO)
    OpenFailed,
    /// 处理程序找不到后端设备 (-ENODEV)
    NoDevice,
    /// 描述符无效或未被跟踪 (-EBADF)
    BadFileDescriptor,
    /// 别名槽已用尽 (-EMFILE)
    TooManyAliases,
    /// 内存不足 (-ENOMEM)
    OutOfMemory,
    /// 注册表达到配置的条目上限 (-ENOSPC)
    RegistryFull,
    /// 操作不支持 (-ENOTSUP)
    NotSupported,
    /// 进程级实例已经安装 (-EBUSY)
    AlreadyInstalled,
}

impl WrapError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            WrapError::NoWrapper => -2,
            WrapError::OpenFailed => -5,
            WrapError::BadFileDescriptor => -9,
            WrapError::OutOfMemory => -12,
            WrapError::AlreadyInstalled => -16,
            WrapError::NoDevice => -19,
            WrapError::TooManyAliases => -24,
            WrapError::RegistryFull => -28,
            WrapError::NotSupported => -95,
        }
    }

    /// 简短描述
    pub const fn as_str(&self) -> &'static str {
        match self {
            WrapError::NoWrapper => "no wrapper registered",
            WrapError::OpenFailed => "handler failed to open",
            WrapError::NoDevice => "no such device",
            WrapError::BadFileDescriptor => "bad file descriptor",
            WrapError::TooManyAliases => "out of descriptor slots",
            WrapError::OutOfMemory => "out of memory",
            WrapError::RegistryFull => "handler registry full",
            WrapError::NotSupported => "operation not supported",
            WrapError::AlreadyInstalled => "interposer already installed",
        }
    }
}

impl fmt::Display for WrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
