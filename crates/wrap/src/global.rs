//! 进程级拦截实例
//!
//! 符号插桩的垫片函数无法携带上下文，只能通过一个全局槽位找到拦截器。
//! 槽位只能安装一次，安装后在进程生命周期内有效。

use alloc::boxed::Box;
use once_cell::race::OnceBox;

use crate::{Interposer, WrapError};

static GLOBAL: OnceBox<Interposer> = OnceBox::new();

/// 安装进程级拦截器
///
/// 重复安装返回 [`WrapError::AlreadyInstalled`]，已安装的实例保持不变。
pub fn install_global(interposer: Interposer) -> Result<&'static Interposer, WrapError> {
    GLOBAL
        .set(Box::new(interposer))
        .map_err(|_| WrapError::AlreadyInstalled)?;
    GLOBAL.get().ok_or(WrapError::AlreadyInstalled)
}

/// 获取进程级拦截器（尚未安装时为 `None`）
pub fn global() -> Option<&'static Interposer> {
    GLOBAL.get()
}
