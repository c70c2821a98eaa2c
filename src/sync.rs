//! 跨线程二值信号原语。
//! Binary cross-thread signal primitive.

use parking_lot::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// An auto-reset binary event.
///
/// `signal` sets the flag and wakes one waiter; a successful wait consumes
/// the flag. Signalling an already-signalled event is idempotent, which is
/// exactly what the round-completion handshake needs when duplicate
/// notifications each acknowledge the same round.
///
/// 自动复位的二值事件。
///
/// `signal` 置位标志并唤醒一个等待者；等待成功会消费该标志。对已置位的
/// 事件再次 `signal` 是幂等的，这正是轮次完成握手在重复通知各自确认同一
/// 轮次时所需要的语义。
#[derive(Debug, Default)]
pub struct Signal {
    set: Mutex<bool>,
    cond: Condvar,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the event and wake one waiter.
    /// 置位事件并唤醒一个等待者。
    pub fn signal(&self) {
        let mut set = self.set.lock();
        *set = true;
        self.cond.notify_one();
    }

    /// Consume the event if it is currently set, without blocking.
    /// 若事件当前已置位则消费之，不阻塞。
    pub fn try_consume(&self) -> bool {
        let mut set = self.set.lock();
        std::mem::take(&mut *set)
    }

    /// Wait up to `timeout` for the event; returns whether it was consumed.
    /// 最多等待 `timeout` 以获取事件；返回是否成功消费。
    pub fn wait_for(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let mut set = self.set.lock();
        loop {
            if std::mem::take(&mut *set) {
                return true;
            }
            if self.cond.wait_until(&mut set, deadline).timed_out() {
                // One last check: the flag may have been set between the
                // timeout and reacquiring the lock.
                return std::mem::take(&mut *set);
            }
        }
    }
}
