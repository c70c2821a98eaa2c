//! 面向客户端的定时器句柄 API。
//! Client-facing timer handle API.
//!
//! A [`TimerHandle`] owns one callback registration inside a
//! [`Scheduler`]. The handle moves between two states: Stopped (no period,
//! absent from the queue) and Running (queued with a positive period).
//! All methods may be called from any thread, including from inside a
//! running timer callback.
//!
//! [`TimerHandle`] 拥有 [`Scheduler`] 内的一个回调注册。句柄在两个状态
//! 之间切换：已停止（无周期、不在队列中）与运行中（以正周期排队）。
//! 所有方法都可以从任意线程调用，包括在正在运行的定时器回调内部。

use crate::scheduler::{Scheduler, SlotId};
use std::time::Duration;

impl Scheduler {
    /// Register `callback` and return the handle that controls it.
    ///
    /// The timer starts out Stopped; call [`TimerHandle::start`] to run it.
    /// The callback always executes on the host's event-loop thread, never
    /// concurrently with other event-loop work.
    ///
    /// 注册 `callback` 并返回控制它的句柄。
    ///
    /// 定时器初始为已停止状态；调用 [`TimerHandle::start`] 使其运行。
    /// 回调总是在宿主的事件循环线程上执行，绝不会与其他事件循环工作并发。
    pub fn timer(&self, callback: impl FnMut() + Send + 'static) -> TimerHandle {
        let slot = self.register_slot(Box::new(callback));
        TimerHandle {
            scheduler: self.clone(),
            slot,
        }
    }
}

/// One registered periodic callback.
///
/// Holds a clone of its scheduler, so the countdown thread outlives every
/// handle. Dropping the handle stops the timer and frees its slot; no
/// "destroyed while registered" hazard exists.
///
/// 一个已注册的周期回调。
///
/// 持有其调度器的一个克隆，因此倒计时线程比所有句柄都活得久。丢弃句柄
/// 会停止定时器并回收其槽位；不存在"注册期间被销毁"的隐患。
pub struct TimerHandle {
    scheduler: Scheduler,
    slot: SlotId,
}

impl TimerHandle {
    /// Start, or restart, the timer with the given period.
    ///
    /// A zero period is equivalent to [`stop`](Self::stop); anything else is
    /// clamped to at least one millisecond. Restarting a running timer
    /// resets its countdown to the new period.
    ///
    /// 以给定周期启动（或重启）定时器。
    ///
    /// 零周期等价于 [`stop`](Self::stop)；其他值至少被钳制为 1 毫秒。
    /// 重启运行中的定时器会将其倒计时重置为新周期。
    pub fn start(&self, period: Duration) {
        if period.is_zero() {
            self.stop();
        } else {
            let period_ms = period.as_millis().min(u128::from(u32::MAX)) as u32;
            self.scheduler.start_slot(self.slot, period_ms);
        }
    }

    /// Start the timer at `hz` fires per second; `hz <= 0` stops it.
    /// 以每秒 `hz` 次的频率启动定时器；`hz <= 0` 则停止。
    pub fn start_at_frequency(&self, hz: i32) {
        if hz > 0 {
            self.start(Duration::from_millis(1000 / hz as u64));
        } else {
            self.stop();
        }
    }

    /// Stop the timer. No further callback invocation happens after this
    /// returns. No-op when already stopped.
    ///
    /// 停止定时器。此调用返回后不会再有回调发生。已停止时为空操作。
    pub fn stop(&self) {
        self.scheduler.stop_slot(self.slot);
    }

    /// Whether the timer is currently queued to fire.
    /// 定时器当前是否在队列中等待触发。
    pub fn is_running(&self) -> bool {
        self.scheduler.slot_period_ms(self.slot) > 0
    }

    /// The current period; zero when stopped.
    /// 当前周期；已停止时为零。
    pub fn period(&self) -> Duration {
        Duration::from_millis(u64::from(self.scheduler.slot_period_ms(self.slot)))
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.scheduler.release_slot(self.slot);
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("running", &self.is_running())
            .field("period", &self.period())
            .finish()
    }
}
