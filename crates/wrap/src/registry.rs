//! 处理程序注册表
//!
//! 进程启动时由协作方注册 `(路径, 打开函数)` 绑定；注册表只追加，不删除。
//! 查找按注册顺序线性扫描，路径做精确字符串比较，第一个匹配者胜出，
//! 因此同一路径的重复注册是允许的，但只有最早的一个会被使用。

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::{FileOps, RawFd, WrapError};

/// 打开函数：为 `(路径, 真实描述符)` 构造处理程序状态
pub type Opener = Arc<dyn Fn(&str, RawFd) -> Result<Box<dyn FileOps>, WrapError> + Send + Sync>;

/// 路径到打开函数的绑定
#[derive(Clone)]
pub struct HandlerBinding {
    path: String,
    opener: Opener,
}

impl HandlerBinding {
    /// 创建绑定
    pub fn new<F>(path: impl Into<String>, opener: F) -> Self
    where
        F: Fn(&str, RawFd) -> Result<Box<dyn FileOps>, WrapError> + Send + Sync + 'static,
    {
        Self {
            path: path.into(),
            opener: Arc::new(opener),
        }
    }

    /// 绑定的路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 调用打开函数
    pub fn open(&self, path: &str, fd: RawFd) -> Result<Box<dyn FileOps>, WrapError> {
        (self.opener)(path, fd)
    }

    /// 两个绑定是否共享同一个打开函数
    pub fn same_opener(&self, other: &HandlerBinding) -> bool {
        Arc::ptr_eq(&self.opener, &other.opener)
    }
}

impl fmt::Debug for HandlerBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerBinding")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// 一次批量注册的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterOutcome {
    /// 成功追加的绑定数
    pub appended: usize,
    /// 因内存不足或达到上限被丢弃的绑定数
    pub dropped: usize,
    /// 导致丢弃的错误（[`WrapError::OutOfMemory`] 或 [`WrapError::RegistryFull`]）
    pub cause: Option<WrapError>,
}

/// 处理程序注册表
#[derive(Debug, Default)]
pub struct Registry {
    bindings: Vec<HandlerBinding>,
    max_bindings: Option<usize>,
}

impl Registry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建最多容纳 `max` 个绑定的注册表
    pub fn with_limit(max: usize) -> Self {
        Self {
            bindings: Vec::new(),
            max_bindings: Some(max),
        }
    }

    /// 追加一个绑定
    ///
    /// 达到上限时返回 [`WrapError::RegistryFull`]，分配失败时返回
    /// [`WrapError::OutOfMemory`]；两种情况下注册表都不变。
    pub fn try_push(&mut self, binding: HandlerBinding) -> Result<(), WrapError> {
        if self
            .max_bindings
            .is_some_and(|max| self.bindings.len() >= max)
        {
            return Err(WrapError::RegistryFull);
        }
        self.bindings
            .try_reserve(1)
            .map_err(|_| WrapError::OutOfMemory)?;
        self.bindings.push(binding);
        Ok(())
    }

    /// 按顺序追加一批绑定
    ///
    /// 第一次追加失败后，本批剩余的绑定全部丢弃；之前已注册的绑定不受影响。
    /// 达到上限与内存不足按同样的方式处理。
    pub fn register<I>(&mut self, bindings: I) -> RegisterOutcome
    where
        I: IntoIterator<Item = HandlerBinding>,
    {
        let mut outcome = RegisterOutcome::default();
        let mut iter = bindings.into_iter();
        for binding in iter.by_ref() {
            if let Err(err) = self.try_push(binding) {
                outcome.dropped = 1;
                outcome.cause = Some(err);
                break;
            }
            outcome.appended += 1;
        }
        outcome.dropped += iter.count();
        outcome
    }

    /// 查找路径对应的绑定（第一个精确匹配者）
    pub fn resolve(&self, path: &str) -> Option<&HandlerBinding> {
        self.bindings.iter().find(|b| b.path == path)
    }

    /// 按注册顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &HandlerBinding> {
        self.bindings.iter()
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
