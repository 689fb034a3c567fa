//! 同步原语
//!
//! 向拦截层的其它 crate 提供基本的互斥锁。
//!
//! 拦截层运行在被插桩进程内部（可能早于 libc 的线程库初始化），
//! 因此这里不依赖操作系统互斥量，只使用原子自旋。
//! 锁的外层接口由 [`lock_api`] 提供，本 crate 只实现底层的 [`RawSpinLock`]。

#![no_std]

#[cfg(test)]
extern crate std;

mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::RawSpinLock;
pub use spin_lock::{SpinLock, SpinLockGuard};
