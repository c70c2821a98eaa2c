#![deny(clippy::expect_used, clippy::unwrap_used)]

//! 面向单线程事件循环应用的周期回调调度库的根。
//! The root of the periodic-callback scheduling library for applications
//! built around a single-threaded event loop.
//!
//! Clients register a firing period on a [`timer::TimerHandle`]; a dedicated
//! background thread keeps the countdowns current and, through the host's
//! [`bridge::EventLoop`], arranges for every due callback to run on the
//! event-loop thread — never concurrently with other event-loop work.
//!
//! 客户端在 [`timer::TimerHandle`] 上注册触发周期；一个专用后台线程维护
//! 倒计时，并通过宿主的 [`bridge::EventLoop`] 安排每个到期回调在事件循环
//! 线程上运行——绝不与其他事件循环工作并发。

pub mod bridge;
pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod sync;
pub mod testing;
pub mod timer;

pub use bridge::{EventLoop, Notification};
pub use config::Config;
pub use error::{Error, Result};
pub use scheduler::Scheduler;
pub use timer::TimerHandle;
