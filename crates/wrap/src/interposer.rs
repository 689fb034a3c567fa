//! 拦截入口
//!
//! [`Interposer`] 持有注册表、打开文件表和诊断输出，是协作方唯一需要
//! 接触的对象。每个事件的处理都是同步完成的：
//!
//! - `open`：查注册表，调用打开函数，把新的逻辑文件插入表尾
//! - `dup`：给已跟踪的文件记录一个别名
//! - `close`：移除描述符；没有活动描述符时把文件移出表并释放
//!
//! 注册表和文件表各由一把自旋锁保护，两把锁从不嵌套持有。打开函数与
//! `release` 都在不持锁的情况下调用，处理程序可以在其中重新进入拦截器。
//! "状态转换 + 条件移除"在文件表锁内一次完成，因此释放只会发生一次。

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use diag::{DiagSink, DumpPrefix, HexDump, Level, LogSink, TraceFlags};
use sync::SpinLock;

use crate::alias::{CloseOutcome, DupOutcome};
use crate::{
    HandlerBinding, LogicalFile, OpenFileTable, RawFd, Registry, WrapConfig, WrapError,
};

/// 被关闭的描述符所属的文件，以及关闭后的状态
type Retired = Option<(Arc<LogicalFile>, CloseOutcome)>;

/// 描述符拦截器
pub struct Interposer {
    config: WrapConfig,
    sink: Arc<dyn DiagSink>,
    registry: SpinLock<Registry>,
    files: SpinLock<OpenFileTable>,
}

impl Interposer {
    /// 使用 [`LogSink`] 作为诊断输出创建拦截器
    pub fn new(config: WrapConfig) -> Self {
        Self::with_sink(config, Arc::new(LogSink::default()))
    }

    /// 使用指定诊断输出创建拦截器
    pub fn with_sink(config: WrapConfig, sink: Arc<dyn DiagSink>) -> Self {
        let registry = match config.max_bindings {
            Some(max) => Registry::with_limit(max),
            None => Registry::new(),
        };
        Self {
            config,
            sink,
            registry: SpinLock::new(registry),
            files: SpinLock::new(OpenFileTable::new()),
        }
    }

    /// 当前配置
    pub fn config(&self) -> &WrapConfig {
        &self.config
    }

    /// 诊断输出
    pub fn sink(&self) -> &dyn DiagSink {
        &*self.sink
    }

    // ========== 注册表 ==========

    /// 按顺序注册一批处理程序绑定，返回实际注册的数量
    ///
    /// 内存不足或达到注册表上限时报告错误并丢弃本批剩余的绑定，拦截覆盖范围
    /// 随之缩小。`bindings` 在加锁之前被完整迭代，迭代过程中可以访问本拦截器。
    pub fn register<I>(&self, bindings: I) -> usize
    where
        I: IntoIterator<Item = HandlerBinding>,
    {
        let bindings: Vec<HandlerBinding> = bindings.into_iter().collect();
        let outcome = self.registry.lock().register(bindings);
        match outcome.cause {
            Some(WrapError::RegistryFull) => self.sink.emit(
                Level::Error,
                format_args!(
                    "handler registry full, dropped {} handler binding(s)",
                    outcome.dropped
                ),
            ),
            Some(_) => self.sink.emit(
                Level::Error,
                format_args!(
                    "out of memory, dropped {} handler binding(s)",
                    outcome.dropped
                ),
            ),
            None => {}
        }
        outcome.appended
    }

    /// 查找路径对应的绑定
    pub fn resolve(&self, path: &str) -> Option<HandlerBinding> {
        self.registry.lock().resolve(path).cloned()
    }

    /// 已注册的绑定数量
    pub fn binding_count(&self) -> usize {
        self.registry.lock().len()
    }

    // ========== 拦截事件 ==========

    /// 拦截一次 open
    ///
    /// 路径未注册、处理程序构造失败或描述符无效时返回 `None`，
    /// 调用方的真实 I/O 不受影响。
    pub fn intercept_open(&self, path: &str, fd: RawFd) -> Option<Arc<LogicalFile>> {
        self.try_open(path, fd).ok()
    }

    /// 拦截一次 open，并区分失败原因
    ///
    /// - [`WrapError::NoWrapper`]：路径未注册（透传，不是错误）
    /// - [`WrapError::BadFileDescriptor`]：真实 open 失败，没有可跟踪的描述符
    /// - [`WrapError::OpenFailed`]：处理程序构造失败（已报告）
    pub fn try_open(&self, path: &str, fd: RawFd) -> Result<Arc<LogicalFile>, WrapError> {
        let Some(binding) = self.resolve(path) else {
            self.trace(
                TraceFlags::NO_WRAPPER,
                format_args!("no wrapper for file `{}'", path),
            );
            return Err(WrapError::NoWrapper);
        };

        if fd < 0 {
            return Err(WrapError::BadFileDescriptor);
        }

        let ops = match binding.open(path, fd) {
            Ok(ops) => ops,
            Err(err) => {
                self.sink.emit(
                    Level::Error,
                    format_args!("failed to wrap `{}': {}", path, err),
                );
                return Err(WrapError::OpenFailed);
            }
        };

        let file = Arc::new(LogicalFile::new(path, fd, ops, self.config.alias_capacity));
        let stale = {
            let mut files = self.files.lock();
            // 描述符被内核复用说明之前的 close 没有被转发过来
            let stale = Self::retire_locked(&mut files, fd);
            files.insert(file.clone());
            stale
        };

        if let Some((old, _)) = &stale {
            self.sink.emit(
                Level::Warning,
                format_args!(
                    "fd {} reopened while still tracked by `{}', retiring stale entry",
                    fd,
                    old.path()
                ),
            );
        }
        self.finish(stale);

        self.trace(
            TraceFlags::OPEN,
            format_args!("wrapping `{}' (fd {})", path, fd),
        );
        Ok(file)
    }

    /// 拦截一次 dup/dup2/dup3
    ///
    /// `old_fd` 未被跟踪时不做任何事。若 `new_fd` 原本属于另一个被跟踪的
    /// 文件，先按 dup2 语义隐式关闭它。
    pub fn intercept_dup(&self, old_fd: RawFd, new_fd: RawFd) {
        let _ = self.try_dup(old_fd, new_fd);
    }

    /// 拦截一次 dup/dup2/dup3，并区分结果
    ///
    /// - `Ok(())`：`new_fd` 已指向 `old_fd` 的文件（包括 `old_fd == new_fd`）
    /// - [`WrapError::BadFileDescriptor`]：`new_fd` 无效或 `old_fd` 未被跟踪
    /// - [`WrapError::TooManyAliases`]：别名槽已用尽，`new_fd` 不被跟踪（已报告）
    ///
    /// 即使 `old_fd` 未被跟踪，`new_fd` 上原有的跟踪也会被撤销。
    pub fn try_dup(&self, old_fd: RawFd, new_fd: RawFd) -> Result<(), WrapError> {
        if new_fd < 0 {
            return Err(WrapError::BadFileDescriptor);
        }
        if old_fd == new_fd {
            return Ok(());
        }

        let (source, outcome, replaced) = {
            let mut files = self.files.lock();
            let source = files.find_by_fd(old_fd).cloned();
            let source_id = source.as_ref().map(|f| f.id());

            let replaced = match files.find_by_fd(new_fd).map(|f| f.id()) {
                Some(owner) if Some(owner) != source_id => {
                    Self::retire_locked(&mut files, new_fd)
                }
                _ => None,
            };

            let outcome = source.as_ref().map(|f| f.add_alias(new_fd));
            (source, outcome, replaced)
        };

        let result = match (&source, outcome) {
            (Some(file), Some(DupOutcome::Tracked)) => {
                self.trace(
                    TraceFlags::DUP,
                    format_args!("duplicating {} (fd {} -> {})", file.path(), old_fd, new_fd),
                );
                Ok(())
            }
            (Some(_), Some(DupOutcome::AlreadyTracked)) => Ok(()),
            (Some(file), Some(DupOutcome::Exhausted)) => {
                self.sink.emit(
                    Level::Error,
                    format_args!(
                        "out of FD slots for {}, fd {} is not tracked",
                        file.path(),
                        new_fd
                    ),
                );
                Err(WrapError::TooManyAliases)
            }
            _ => Err(WrapError::BadFileDescriptor),
        };

        self.finish(replaced);
        result
    }

    /// 拦截一次 close
    ///
    /// 描述符未被跟踪时不做任何事；关闭的是最后一个活动描述符时，
    /// 文件被移出文件表并释放。
    pub fn intercept_close(&self, fd: RawFd) {
        let retired = Self::retire_locked(&mut self.files.lock(), fd);
        self.finish(retired);
    }

    // ========== 查询 ==========

    /// 按描述符查找逻辑文件
    pub fn find_by_fd(&self, fd: RawFd) -> Option<Arc<LogicalFile>> {
        self.files.lock().find_by_fd(fd).cloned()
    }

    /// 按打开路径查找逻辑文件（最早打开的一个）
    pub fn find_by_path(&self, path: &str) -> Option<Arc<LogicalFile>> {
        self.files.lock().find_by_path(path).cloned()
    }

    /// 当前存活的逻辑文件数量
    pub fn open_count(&self) -> usize {
        self.files.lock().len()
    }

    /// 当前存活的逻辑文件（按打开顺序）
    pub fn open_files(&self) -> Vec<Arc<LogicalFile>> {
        self.files.lock().iter().cloned().collect()
    }

    // ========== 诊断 ==========

    /// 在打开 [`TraceFlags::HEXDUMP`] 时转储一段缓冲区
    pub fn dump(&self, label: &str, data: &[u8]) {
        if self.config.trace.contains(TraceFlags::HEXDUMP) {
            let dump = HexDump::new(data)
                .prefix(label)
                .prefix_type(DumpPrefix::Offset);
            self.sink.dump(Level::Debug, &dump);
        }
    }

    // ========== 拆除 ==========

    /// 移除并释放所有仍然存活的逻辑文件，返回释放的数量
    pub fn shutdown(&self) -> usize {
        let files = self.files.lock().take_all();
        let mut released = 0;
        for file in files {
            if file.kill() {
                self.release(&file);
                released += 1;
            }
        }
        released
    }

    // ========== 内部实现 ==========

    fn trace(&self, event: TraceFlags, args: fmt::Arguments<'_>) {
        if self.config.trace.contains(event) {
            self.sink.emit(Level::Debug, args);
        }
    }

    /// 在文件表锁内关闭 `fd`；若是最后一个描述符则把文件移出表
    fn retire_locked(files: &mut OpenFileTable, fd: RawFd) -> Retired {
        let file = files.find_by_fd(fd)?.clone();
        let outcome = file.close_descriptor(fd);
        if outcome == CloseOutcome::LastReference {
            files.remove(&file);
        }
        Some((file, outcome))
    }

    /// 锁外收尾：释放已经死亡的文件
    fn finish(&self, retired: Retired) {
        if let Some((file, CloseOutcome::LastReference)) = retired {
            self.release(&file);
        }
    }

    fn release(&self, file: &LogicalFile) {
        self.trace(TraceFlags::CLOSE, format_args!("closing {}", file.path()));
        file.release();
    }
}

impl fmt::Debug for Interposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interposer")
            .field("config", &self.config)
            .field("bindings", &self.binding_count())
            .field("open_files", &self.open_count())
            .finish()
    }
}
