//! 逻辑文件 - 被拦截资源的记录
//!
//! 每次成功拦截的 open 产生一个 [`LogicalFile`]，不论调用方之后复制出多少个
//! 描述符，它们都指向同一个逻辑文件。逻辑文件持有：
//!
//! - 打开时使用的路径（用于按路径查找）
//! - 描述符状态（[`AliasState`]）
//! - 处理程序私有的状态（`Box<dyn FileOps>`），在最后一个描述符关闭时释放
//!
//! 逻辑文件以 `Arc<LogicalFile>` 的形式共享给协作方；释放后 `Arc` 仍可持有，
//! 但 [`LogicalFile::with_ops`] 将返回 `None`。

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use sync::SpinLock;

use crate::alias::{AliasState, CloseOutcome, DupOutcome};
use crate::config::AliasCapacity;
use crate::{RawFd, WrapError};

/// 处理程序为一个逻辑文件提供的操作
///
/// 由注册表中的打开函数构造，拦截层独占持有，直到文件的最后一个描述符关闭。
pub trait FileOps: Send {
    /// 释放处理程序状态
    ///
    /// 消耗 `self`，因此对同一个状态最多调用一次。
    fn release(self: Box<Self>);

    /// 带外控制操作（可选方法，用于 ioctl）
    fn ioctl(&self, _request: u32, _arg: usize) -> Result<isize, WrapError> {
        Err(WrapError::NotSupported)
    }

    /// 获取 Any trait 引用，用于安全的类型转换
    fn as_any(&self) -> &dyn Any;
}

static NEXT_FILE_ID: AtomicU64 = AtomicU64::new(1);

/// 逻辑文件的进程内唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FileId(u64);

impl FileId {
    fn next() -> Self {
        FileId(NEXT_FILE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// 数值形式
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// 一个被拦截的资源
pub struct LogicalFile {
    id: FileId,
    path: String,
    state: SpinLock<AliasState>,
    ops: SpinLock<Option<Box<dyn FileOps>>>,
}

impl LogicalFile {
    pub(crate) fn new(
        path: &str,
        fd: RawFd,
        ops: Box<dyn FileOps>,
        capacity: AliasCapacity,
    ) -> Self {
        Self {
            id: FileId::next(),
            path: String::from(path),
            state: SpinLock::new(AliasState::opened(fd, capacity)),
            ops: SpinLock::new(Some(ops)),
        }
    }

    /// 唯一标识
    pub fn id(&self) -> FileId {
        self.id
    }

    /// 打开时使用的路径
    pub fn path(&self) -> &str {
        &self.path
    }

    /// 主描述符（若仍打开）
    pub fn primary(&self) -> Option<RawFd> {
        self.state.lock().primary()
    }

    /// 当前被跟踪的别名
    pub fn aliases(&self) -> Vec<RawFd> {
        self.state.lock().aliases().to_vec()
    }

    /// 全部活动描述符，主描述符在前
    pub fn descriptors(&self) -> Vec<RawFd> {
        let state = self.state.lock();
        let mut fds: Vec<RawFd> = state.primary().into_iter().collect();
        fds.extend_from_slice(state.aliases());
        fds
    }

    /// `fd` 是否指向该文件
    pub fn refers_to(&self, fd: RawFd) -> bool {
        self.state.lock().refers_to(fd)
    }

    /// 是否还有活动描述符
    pub fn is_alive(&self) -> bool {
        self.state.lock().is_alive()
    }

    /// 处理程序状态是否已释放
    pub fn is_released(&self) -> bool {
        self.ops.lock().is_none()
    }

    /// 在处理程序状态上执行 `f`；已释放时返回 `None`
    ///
    /// `f` 执行期间持有处理程序状态锁，不要在其中关闭本文件的最后一个描述符。
    pub fn with_ops<R>(&self, f: impl FnOnce(&dyn FileOps) -> R) -> Option<R> {
        self.ops.lock().as_deref().map(|ops| f(ops))
    }

    /// 将处理程序状态向下转型为 `T` 后执行 `f`
    pub fn downcast_with<T: 'static, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.with_ops(|ops| ops.as_any().downcast_ref::<T>().map(f))
            .flatten()
    }

    /// 转发 ioctl 到处理程序
    ///
    /// 与 [`LogicalFile::with_ops`] 一样，处理程序的 `ioctl` 在持有处理程序状态锁
    /// 的情况下执行：其中可以关闭本文件的别名，但不能关闭最后一个描述符，
    /// 否则释放时会等待同一把锁。已释放时返回 [`WrapError::BadFileDescriptor`]。
    pub fn ioctl(&self, request: u32, arg: usize) -> Result<isize, WrapError> {
        self.with_ops(|ops| ops.ioctl(request, arg))
            .unwrap_or(Err(WrapError::BadFileDescriptor))
    }

    pub(crate) fn add_alias(&self, fd: RawFd) -> DupOutcome {
        self.state.lock().dup(fd)
    }

    pub(crate) fn close_descriptor(&self, fd: RawFd) -> CloseOutcome {
        self.state.lock().close(fd)
    }

    pub(crate) fn kill(&self) -> bool {
        self.state.lock().kill()
    }

    /// 取出并释放处理程序状态；返回是否真的执行了释放
    pub(crate) fn release(&self) -> bool {
        let ops = self.ops.lock().take();
        match ops {
            Some(ops) => {
                ops.release();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for LogicalFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogicalFile")
            .field("id", &self.id.0)
            .field("path", &self.path)
            .field("state", &*self.state.lock())
            .field("released", &self.is_released())
            .finish()
    }
}
