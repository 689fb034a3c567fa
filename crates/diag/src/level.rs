//! 诊断级别定义

use core::fmt;

/// 诊断级别
///
/// 数值沿用 syslog 的约定，越小越严重。
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// 错误：拦截失去了覆盖范围
    Error = 3,
    /// 警告：状态可疑但仍可继续
    Warning = 4,
    /// 一般信息
    Info = 6,
    /// 调试跟踪
    Debug = 7,
}

impl Level {
    /// 级别的短名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Error => "ERROR",
            Level::Warning => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Level> for log::Level {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => log::Level::Error,
            Level::Warning => log::Level::Warn,
            Level::Info => log::Level::Info,
            Level::Debug => log::Level::Debug,
        }
    }
}
