//! 测试辅助工具模块。
//! Test utilities module.
//!
//! A minimal single-threaded event loop and a manually advanced clock, for
//! exercising the scheduler deterministically. Hosts embedding the scheduler
//! may also use [`TestEventLoop`] as a reference implementation of the
//! [`EventLoop`] contract.
//!
//! 最小化的单线程事件循环与可手动推进的时钟，用于确定性地驱动调度器。
//! 嵌入调度器的宿主也可将 [`TestEventLoop`] 作为 [`EventLoop`] 契约的
//! 参考实现。

use crate::bridge::{EventLoop, Notification};
use crate::clock::MillisecondClock;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::thread::ThreadId;
use std::time::{Duration, Instant};

/// A channel-backed event loop that executes notifications serially on
/// whichever thread pumps it.
///
/// Posting is non-blocking; a configurable number of upcoming posts can be
/// silently discarded to exercise the lossy-delivery recovery path.
///
/// 基于队列的事件循环，在执行泵循环的线程上串行执行通知。
///
/// 投递不阻塞；可配置丢弃接下来若干次投递，用于演练有损投递的恢复路径。
pub struct TestEventLoop {
    pending: Mutex<VecDeque<Notification>>,
    available: Condvar,
    loop_thread: Mutex<Option<ThreadId>>,
    shutting_down: AtomicBool,
    discard_budget: AtomicUsize,
    posted: AtomicUsize,
    discarded: AtomicUsize,
}

impl TestEventLoop {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            pending: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            loop_thread: Mutex::new(None),
            shutting_down: AtomicBool::new(false),
            discard_budget: AtomicUsize::new(0),
            posted: AtomicUsize::new(0),
            discarded: AtomicUsize::new(0),
        })
    }

    /// Declare the calling thread to be the event-loop thread without
    /// pumping. Used by tests that drain rounds synchronously.
    ///
    /// 将调用线程声明为事件循环线程而不启动泵循环。供同步排空轮次的测试
    /// 使用。
    pub fn adopt_current_thread(&self) {
        *self.loop_thread.lock() = Some(std::thread::current().id());
    }

    /// Silently drop the next `count` posted notifications, simulating a
    /// host that discards messages while running a modal loop.
    ///
    /// 静默丢弃接下来 `count` 次投递的通知，模拟宿主在运行模态循环期间
    /// 丢弃消息的情形。
    pub fn discard_next_posts(&self, count: usize) {
        self.discard_budget.store(count, Ordering::SeqCst);
    }

    /// Mark the loop as shutting down; rounds delivered afterwards no-op.
    /// 标记循环开始停机；此后送达的轮次均为空操作。
    pub fn begin_shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
    }

    /// Total notifications posted so far, including discarded ones.
    /// 迄今投递的通知总数，包含被丢弃的。
    pub fn posted(&self) -> usize {
        self.posted.load(Ordering::SeqCst)
    }

    /// Notifications silently discarded so far.
    /// 迄今被静默丢弃的通知数。
    pub fn discarded(&self) -> usize {
        self.discarded.load(Ordering::SeqCst)
    }

    /// Adopt the calling thread and deliver notifications until `duration`
    /// has elapsed.
    ///
    /// 接管调用线程并送达通知，直至经过 `duration`。
    pub fn pump_for(&self, duration: Duration) {
        self.adopt_current_thread();
        let deadline = Instant::now() + duration;

        loop {
            if Instant::now() >= deadline {
                break;
            }
            let next = {
                let mut pending = self.pending.lock();
                loop {
                    if let Some(notification) = pending.pop_front() {
                        break Some(notification);
                    }
                    if self.available.wait_until(&mut pending, deadline).timed_out() {
                        break None;
                    }
                }
            };
            match next {
                Some(notification) => notification.deliver(),
                None => break,
            }
        }
    }
}

impl EventLoop for TestEventLoop {
    fn post(&self, notification: Notification) {
        self.posted.fetch_add(1, Ordering::SeqCst);

        if self
            .discard_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |budget| {
                budget.checked_sub(1)
            })
            .is_ok()
        {
            // Lost in transit, from the scheduler's point of view.
            self.discarded.fetch_add(1, Ordering::SeqCst);
            return;
        }

        self.pending.lock().push_back(notification);
        self.available.notify_one();
    }

    fn is_loop_thread(&self) -> bool {
        *self.loop_thread.lock() == Some(std::thread::current().id())
    }

    fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }
}

/// A clock that only moves when told to, wrapping like the real counter.
/// 只在被要求时才前进的时钟，与真实计数器一样回绕。
#[derive(Debug, Default)]
pub struct ManualClock {
    millis: AtomicU32,
}

impl ManualClock {
    pub fn new(start: u32) -> Self {
        Self {
            millis: AtomicU32::new(start),
        }
    }

    pub fn advance(&self, millis: u32) {
        let _ = self
            .millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |now| {
                Some(now.wrapping_add(millis))
            });
    }

    pub fn set(&self, millis: u32) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl MillisecondClock for ManualClock {
    fn now_millis(&self) -> u32 {
        self.millis.load(Ordering::SeqCst)
    }
}
