//! 跟踪事件开关
//!
//! 详细模式下可报告的事件用 [`TraceFlags`] 表示，可从环境变量风格的
//! 字符串解析，例如 `"1"`、`"all"` 或 `"dup,close"`。

use bitflags::bitflags;
use core::fmt;

bitflags! {
    /// 详细模式下报告的事件集合
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TraceFlags: u32 {
        /// 路径没有匹配的处理程序（透传）
        const NO_WRAPPER = 1 << 0;
        /// 成功拦截一次 open
        const OPEN = 1 << 1;
        /// 记录了一个 dup 别名
        const DUP = 1 << 2;
        /// 逻辑文件被释放
        const CLOSE = 1 << 3;
        /// 缓冲区十六进制转储
        const HEXDUMP = 1 << 4;
    }
}

/// 解析跟踪开关字符串失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseTraceError;

impl fmt::Display for ParseTraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown trace flag")
    }
}

impl TraceFlags {
    /// 解析开关字符串
    ///
    /// - 空串、`0`、`false`、`off`、`no` 表示全部关闭
    /// - `1`、`true`、`on`、`yes`、`all` 表示全部打开（详细模式）
    /// - 否则按 `,` 或 `|` 分隔的事件名列表解析：
    ///   `no-wrapper`、`open`、`dup`、`close`、`hexdump`
    pub fn parse(s: &str) -> Result<Self, ParseTraceError> {
        let s = s.trim();
        if s.is_empty() || ["0", "false", "off", "no"].iter().any(|v| s.eq_ignore_ascii_case(v)) {
            return Ok(TraceFlags::empty());
        }
        if ["1", "true", "on", "yes", "all"].iter().any(|v| s.eq_ignore_ascii_case(v)) {
            return Ok(TraceFlags::all());
        }

        let mut flags = TraceFlags::empty();
        for name in s.split([',', '|']).map(str::trim).filter(|n| !n.is_empty()) {
            flags |= Self::from_event_name(name).ok_or(ParseTraceError)?;
        }
        Ok(flags)
    }

    fn from_event_name(name: &str) -> Option<Self> {
        const NAMES: &[(&str, TraceFlags)] = &[
            ("no-wrapper", TraceFlags::NO_WRAPPER),
            ("no_wrapper", TraceFlags::NO_WRAPPER),
            ("open", TraceFlags::OPEN),
            ("dup", TraceFlags::DUP),
            ("close", TraceFlags::CLOSE),
            ("hexdump", TraceFlags::HEXDUMP),
        ];
        NAMES
            .iter()
            .find(|(n, _)| name.eq_ignore_ascii_case(n))
            .map(|(_, f)| *f)
    }

    /// 是否为完全详细模式
    pub fn is_verbose(&self) -> bool {
        self.is_all()
    }
}

impl Default for TraceFlags {
    fn default() -> Self {
        TraceFlags::empty()
    }
}
