//! 单调毫秒计数器抽象。
//! Monotonic millisecond counter abstraction.
//!
//! The countdown loop measures elapsed time as the difference of two readings
//! of a `u32` millisecond counter. The counter wraps at `u32::MAX` (roughly
//! every 49.7 days of uptime), so the subtraction must be wrapping.
//!
//! 倒计时循环通过两次读取 `u32` 毫秒计数器之差来测量经过的时间。计数器在
//! `u32::MAX` 处回绕（约每 49.7 天运行时间一次），因此减法必须是回绕减法。

use std::time::Instant;

/// A monotonic, wrapping millisecond counter.
///
/// Injectable so tests can drive the countdown loop deterministically.
///
/// 单调、会回绕的毫秒计数器。
///
/// 可注入，以便测试确定性地驱动倒计时循环。
pub trait MillisecondClock: Send + Sync + 'static {
    /// The current reading, wrapping at `u32::MAX`.
    /// 当前读数，在 `u32::MAX` 处回绕。
    fn now_millis(&self) -> u32;
}

/// The default clock, counting milliseconds since its own creation.
/// 默认时钟，从自身创建起计数毫秒。
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MillisecondClock for SystemClock {
    fn now_millis(&self) -> u32 {
        // Truncation is the wrap: 2^32 ms after the origin the counter
        // restarts from zero.
        self.origin.elapsed().as_millis() as u32
    }
}

/// Milliseconds elapsed between two counter readings, wraparound-safe.
/// 两次计数器读数之间经过的毫秒数，对回绕安全。
pub(crate) fn elapsed_millis(last: u32, now: u32) -> u32 {
    now.wrapping_sub(last)
}
