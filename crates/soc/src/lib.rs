//! SoC 型号探测
//!
//! 处理程序需要根据芯片型号选择寄存器布局。型号从 sysfs 中读取：按顺序
//! 尝试若干候选文件，使用第一个能打开的文件。结果在进程内只探测一次。

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::OnceCell;

/// 默认的候选文件，按优先级排列
pub const CHIP_ID_PATHS: [&str; 3] = [
    "/sys/module/tegra_fuse/parameters/tegra_chip_id",
    "/sys/module/fuse/parameters/tegra_chip_id",
    "/sys/devices/soc0/soc_id",
];

/// 芯片型号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipId {
    /// Tegra20 (0x20)
    Tegra20,
    /// Tegra30 (0x30)
    Tegra30,
    /// Tegra114 (0x35)
    Tegra114,
    /// 无法识别
    Unknown,
}

impl ChipId {
    /// 由原始芯片编号得到型号
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0x20 => ChipId::Tegra20,
            0x30 => ChipId::Tegra30,
            0x35 => ChipId::Tegra114,
            _ => ChipId::Unknown,
        }
    }

    /// 型号名称
    pub const fn as_str(&self) -> &'static str {
        match self {
            ChipId::Tegra20 => "Tegra20",
            ChipId::Tegra30 => "Tegra30",
            ChipId::Tegra114 => "Tegra114",
            ChipId::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ChipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 读取单个候选文件时的错误
#[derive(Debug)]
pub enum ProbeError {
    /// 文件无法读取，应尝试下一个候选 (-ENOENT/-EACCES 等)
    Unreadable(io::Error),
    /// 文件内容不是整数 (-EINVAL)
    Malformed(String),
}

impl ProbeError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        match self {
            ProbeError::Unreadable(err) => err.raw_os_error().map_or(-5, |e| -(e as isize)),
            ProbeError::Malformed(_) => -22,
        }
    }
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::Unreadable(err) => write!(f, "unreadable: {}", err),
            ProbeError::Malformed(text) => write!(f, "malformed chip id {:?}", text),
        }
    }
}

impl std::error::Error for ProbeError {}

/// 解析芯片编号文本：十进制，或带 `0x` 前缀的十六进制
pub fn parse_chip_id(text: &str) -> Result<u32, ProbeError> {
    let s = text.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| ProbeError::Malformed(s.to_string()))
}

/// 读取一个候选文件
///
/// 内容无法解析时记录警告并视为 [`ChipId::Unknown`]，不再尝试其它文件。
pub fn read_chip_id(path: &Path) -> Result<ChipId, ProbeError> {
    let text = fs::read_to_string(path).map_err(ProbeError::Unreadable)?;
    match parse_chip_id(&text) {
        Ok(raw) => Ok(ChipId::from_raw(raw)),
        Err(err) => {
            log::warn!("soc: {}: {}", path.display(), err);
            Ok(ChipId::Unknown)
        }
    }
}

/// 按顺序探测候选文件，返回第一个可读文件给出的型号
pub fn probe<P: AsRef<Path>>(paths: &[P]) -> ChipId {
    for path in paths {
        match read_chip_id(path.as_ref()) {
            Ok(id) => {
                log::debug!("soc: {} from {}", id, path.as_ref().display());
                return id;
            }
            Err(err) => log::trace!("soc: skipping {}: {}", path.as_ref().display(), err),
        }
    }

    log::warn!("soc: failed to identify SoC version");
    ChipId::Unknown
}

static CHIP_ID: OnceCell<ChipId> = OnceCell::new();

/// 当前系统的芯片型号（首次调用时探测，之后返回缓存值）
pub fn chip_id() -> ChipId {
    *CHIP_ID.get_or_init(|| probe(&CHIP_ID_PATHS))
}
