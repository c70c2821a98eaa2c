//! 定义了库中所有可能的错误类型。
//! Defines all possible error types in the library.

use thiserror::Error;

/// The primary error type for the timer scheduling library.
///
/// Contract violations (double registration, removing an unregistered slot)
/// are debug assertions, not errors, and callback panics are caught and
/// suppressed at the invocation boundary. What remains fallible is the
/// lifecycle of the countdown thread itself.
///
/// 定时器调度库的主要错误类型。
///
/// 契约违规（重复注册、移除未注册的槽位）是调试断言而非错误，回调中的
/// panic 会在调用边界被捕获并抑制。真正可能失败的只有倒计时线程自身的
/// 生命周期操作。
#[derive(Debug, Error)]
pub enum Error {
    /// Spawning the background countdown thread failed.
    /// 启动后台倒计时线程失败。
    #[error("failed to spawn countdown thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The scheduler has already been shut down.
    /// 调度器已经关闭。
    #[error("scheduler has been shut down")]
    Shutdown,
}

/// A specialized `Result` type for this library.
/// 本库专用的 `Result` 类型。
pub type Result<T> = std::result::Result<T, Error>;
