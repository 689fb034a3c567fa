//! 别名状态机
//!
//! 被拦截的文件可能被调用方任意 `dup`/`dup2`/`dup3`，拦截层看不到调用方的
//! 引用计数，只能根据"哪些描述符仍然打开"来重建它。每个逻辑文件的描述符
//! 集合用 [`AliasState`] 表示：
//!
//! - `Alive`：主描述符（open 返回的那个）和/或至少一个别名仍然打开
//! - `Dead`：所有被跟踪的描述符都已关闭，处理程序应被释放
//!
//! 状态转换只由 [`AliasState::dup`] 和 [`AliasState::close`] 完成，二者都不做
//! 任何 I/O；`close` 返回 [`CloseOutcome::LastReference`] 的那一次是该文件
//! 唯一一次从 `Alive` 进入 `Dead`。

use alloc::vec::Vec;

use crate::RawFd;
use crate::config::AliasCapacity;

/// 一组别名描述符（不含主描述符），按加入顺序排列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet {
    fds: Vec<RawFd>,
    capacity: AliasCapacity,
}

impl AliasSet {
    /// 创建空集合
    pub fn new(capacity: AliasCapacity) -> Self {
        Self {
            fds: Vec::new(),
            capacity,
        }
    }

    /// 集合中的描述符
    pub fn as_slice(&self) -> &[RawFd] {
        &self.fds
    }

    /// 别名数量
    pub fn len(&self) -> usize {
        self.fds.len()
    }

    /// 是否没有别名
    pub fn is_empty(&self) -> bool {
        self.fds.is_empty()
    }

    /// 是否包含 `fd`
    pub fn contains(&self, fd: RawFd) -> bool {
        self.fds.contains(&fd)
    }

    fn insert(&mut self, fd: RawFd) -> bool {
        if !self.capacity.admits(self.fds.len()) {
            return false;
        }
        self.fds.push(fd);
        true
    }

    fn remove(&mut self, fd: RawFd) -> bool {
        match self.fds.iter().position(|&f| f == fd) {
            Some(pos) => {
                self.fds.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// `dup` 事件的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DupOutcome {
    /// 新描述符已记录为别名
    Tracked,
    /// 新描述符本来就属于该文件，无变化
    AlreadyTracked,
    /// 别名容量已满，新描述符不被跟踪
    Exhausted,
    /// 文件已死亡，不接受新别名
    Dead,
}

/// `close` 事件的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// 描述符不属于该文件
    NotTracked,
    /// 描述符已移除，但仍有其它描述符打开
    StillAlive,
    /// 移除的是最后一个描述符，文件进入 `Dead`
    LastReference,
}

/// 逻辑文件的描述符状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasState {
    /// 至少一个被跟踪的描述符仍然打开
    Alive {
        /// open 返回的描述符；经由它关闭后为 `None`
        primary: Option<RawFd>,
        /// dup 产生的别名
        aliases: AliasSet,
    },
    /// 所有被跟踪的描述符都已关闭
    Dead,
}

impl AliasState {
    /// 新打开文件的初始状态：只有主描述符，没有别名
    pub fn opened(fd: RawFd, capacity: AliasCapacity) -> Self {
        AliasState::Alive {
            primary: Some(fd),
            aliases: AliasSet::new(capacity),
        }
    }

    /// 是否仍然存活
    pub fn is_alive(&self) -> bool {
        matches!(self, AliasState::Alive { .. })
    }

    /// 主描述符（若仍打开）
    pub fn primary(&self) -> Option<RawFd> {
        match self {
            AliasState::Alive { primary, .. } => *primary,
            AliasState::Dead => None,
        }
    }

    /// 当前别名
    pub fn aliases(&self) -> &[RawFd] {
        match self {
            AliasState::Alive { aliases, .. } => aliases.as_slice(),
            AliasState::Dead => &[],
        }
    }

    /// `fd` 是否是该文件的一个活动描述符
    pub fn refers_to(&self, fd: RawFd) -> bool {
        match self {
            AliasState::Alive { primary, aliases } => {
                *primary == Some(fd) || aliases.contains(fd)
            }
            AliasState::Dead => false,
        }
    }

    /// 记录一个 `dup` 产生的新描述符
    pub fn dup(&mut self, new_fd: RawFd) -> DupOutcome {
        if self.refers_to(new_fd) {
            return DupOutcome::AlreadyTracked;
        }
        match self {
            AliasState::Alive { aliases, .. } => {
                if aliases.insert(new_fd) {
                    DupOutcome::Tracked
                } else {
                    DupOutcome::Exhausted
                }
            }
            AliasState::Dead => DupOutcome::Dead,
        }
    }

    /// 关闭一个描述符
    pub fn close(&mut self, fd: RawFd) -> CloseOutcome {
        let AliasState::Alive { primary, aliases } = self else {
            return CloseOutcome::NotTracked;
        };

        if *primary == Some(fd) {
            *primary = None;
        } else if !aliases.remove(fd) {
            return CloseOutcome::NotTracked;
        }

        if primary.is_none() && aliases.is_empty() {
            *self = AliasState::Dead;
            CloseOutcome::LastReference
        } else {
            CloseOutcome::StillAlive
        }
    }

    /// 不论还有多少描述符，直接进入 `Dead`
    ///
    /// 返回调用前是否存活。
    pub fn kill(&mut self) -> bool {
        let was_alive = self.is_alive();
        *self = AliasState::Dead;
        was_alive
    }
}
