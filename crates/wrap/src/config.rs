//! 拦截层配置
//!
//! 默认值与环境变量名定义在这里。配置在构造 [`crate::Interposer`] 时注入，
//! 之后不可修改。

use diag::TraceFlags;

/// 每个逻辑文件默认可跟踪的别名数
pub const DEFAULT_ALIAS_CAPACITY: usize = 8;

/// 控制详细输出的环境变量
pub const VERBOSE_ENV: &str = "WRAP_VERBOSE";

/// 控制别名容量的环境变量（数字或 `unbounded`）
pub const ALIAS_SLOTS_ENV: &str = "WRAP_ALIAS_SLOTS";

/// 每个逻辑文件的别名容量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasCapacity {
    /// 最多跟踪 n 个别名，超出的别名被报告并放弃跟踪
    Bounded(usize),
    /// 不设上限
    Unbounded,
}

impl AliasCapacity {
    /// 已有 `len` 个别名时能否再接纳一个
    pub fn admits(&self, len: usize) -> bool {
        match *self {
            AliasCapacity::Bounded(max) => len < max,
            AliasCapacity::Unbounded => true,
        }
    }

    /// 解析 `8`、`unbounded` 之类的字符串
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("unbounded") || s.eq_ignore_ascii_case("unlimited") {
            return Some(AliasCapacity::Unbounded);
        }
        s.parse().ok().map(AliasCapacity::Bounded)
    }
}

impl Default for AliasCapacity {
    fn default() -> Self {
        AliasCapacity::Bounded(DEFAULT_ALIAS_CAPACITY)
    }
}

/// 拦截层配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapConfig {
    /// 每个逻辑文件的别名容量
    pub alias_capacity: AliasCapacity,
    /// 详细模式下报告的事件
    pub trace: TraceFlags,
    /// 注册表条目上限；达到上限按内存耗尽处理（`None` 表示只受内存限制）
    pub max_bindings: Option<usize>,
}

impl WrapConfig {
    /// 设置别名容量
    pub fn with_alias_capacity(mut self, capacity: AliasCapacity) -> Self {
        self.alias_capacity = capacity;
        self
    }

    /// 设置跟踪事件
    pub fn with_trace(mut self, trace: TraceFlags) -> Self {
        self.trace = trace;
        self
    }

    /// 打开全部跟踪事件
    pub fn verbose(self) -> Self {
        self.with_trace(TraceFlags::all())
    }

    /// 设置注册表条目上限
    pub fn with_max_bindings(mut self, max: usize) -> Self {
        self.max_bindings = Some(max);
        self
    }

    /// 由两个环境变量的取值构造配置
    ///
    /// 无法解析的取值被忽略（保留默认值）并记录警告。
    pub fn from_vars(verbose: Option<&str>, alias_slots: Option<&str>) -> Self {
        let mut config = Self::default();

        if let Some(v) = verbose {
            match TraceFlags::parse(v) {
                Ok(trace) => config.trace = trace,
                Err(_) => log::warn!("wrap: ignoring invalid {}={:?}", VERBOSE_ENV, v),
            }
        }

        if let Some(v) = alias_slots {
            match AliasCapacity::parse(v) {
                Some(capacity) => config.alias_capacity = capacity,
                None => log::warn!("wrap: ignoring invalid {}={:?}", ALIAS_SLOTS_ENV, v),
            }
        }

        config
    }

    /// 从进程环境读取配置
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let verbose = std::env::var(VERBOSE_ENV).ok();
        let slots = std::env::var(ALIAS_SLOTS_ENV).ok();
        Self::from_vars(verbose.as_deref(), slots.as_deref())
    }
}
