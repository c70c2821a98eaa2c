//! 定时器调度核心：有序倒计时队列与后台倒计时线程。
//! Timer scheduling core: the ordered countdown queue and the background
//! countdown thread.
//!
//! The scheduler owns all timer state in slot storage guarded by one lock.
//! A dedicated background thread decrements countdowns and, when the front
//! of the queue comes due, posts a notification through the host event loop.
//! The round of due callbacks then executes on the event-loop thread, with
//! the queue lock released around every client callback so callbacks may
//! freely start and stop timers themselves.
//!
//! 调度器在单把锁保护的槽位存储中持有全部定时器状态。一个专用后台线程
//! 递减倒计时，当队首到期时通过宿主事件循环投递通知。随后到期回调的轮次
//! 在事件循环线程上执行，并在每次进入客户端回调前释放队列锁，因此回调
//! 内部可以自由地启动和停止定时器。

use crate::bridge::{EventLoop, Notification, RoundTarget};
use crate::clock::{MillisecondClock, SystemClock, elapsed_millis};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::sync::Signal;
use parking_lot::{Condvar, Mutex, MutexGuard};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace, warn};

/// A registered callback, shared between the slot storage and an in-flight
/// round invocation.
/// 已注册的回调，在槽位存储与执行中的轮次调用之间共享。
pub(crate) type Callback = Arc<Mutex<Box<dyn FnMut() + Send>>>;

/// Index of one scheduler-owned callback slot.
/// 调度器所有的回调槽位的索引。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

/// One registered timer: its period, its recorded queue position while
/// running, and its callback.
/// 一个已注册的定时器：周期、运行期间记录的队列位置、以及回调。
struct Slot {
    /// Zero means stopped and absent from the queue.
    /// 为零表示已停止且不在队列中。
    period_ms: u32,
    /// Valid only while `period_ms > 0`; kept equal to the slot's true index
    /// in the queue by every mutation.
    /// 仅在 `period_ms > 0` 时有效；每次修改都保持与其在队列中的真实下标
    /// 一致。
    position: usize,
    callback: Callback,
}

/// A queue entry: the slot it refers to and the remaining countdown.
/// 队列条目：所引用的槽位及剩余倒计时。
#[derive(Clone, Copy)]
struct QueueEntry {
    slot: SlotId,
    countdown_ms: i64,
}

/// Slot storage plus the ascending-by-countdown queue. Mutated only under
/// the scheduler's lock.
/// 槽位存储加按倒计时升序排列的队列。仅在调度器锁内被修改。
struct QueueState {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    queue: Vec<QueueEntry>,
}

impl QueueState {
    fn new() -> Self {
        Self {
            slots: Vec::with_capacity(32),
            free: Vec::new(),
            queue: Vec::with_capacity(32),
        }
    }

    fn slot(&self, id: SlotId) -> &Slot {
        match self.slots[id.0].as_ref() {
            Some(slot) => slot,
            None => unreachable!("slot {} not allocated", id.0),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> &mut Slot {
        match self.slots[id.0].as_mut() {
            Some(slot) => slot,
            None => unreachable!("slot {} not allocated", id.0),
        }
    }

    fn set_position(&mut self, id: SlotId, position: usize) {
        self.slot_mut(id).position = position;
    }

    fn alloc(&mut self, callback: Callback) -> SlotId {
        let slot = Slot {
            period_ms: 0,
            position: 0,
            callback,
        };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                SlotId(index)
            }
            None => {
                self.slots.push(Some(slot));
                SlotId(self.slots.len() - 1)
            }
        }
    }

    fn release(&mut self, id: SlotId) {
        debug_assert!(self.slots[id.0].is_some(), "releasing unallocated slot");
        self.slots[id.0] = None;
        self.free.push(id.0);
    }

    /// Insert a slot at the tail with a fresh countdown, then reposition it
    /// toward the front until ascending order holds again.
    /// 将槽位以全新倒计时插入队尾，随后向队首回移直至升序恢复。
    fn enqueue(&mut self, id: SlotId) {
        debug_assert!(
            self.queue.iter().all(|entry| entry.slot != id),
            "slot queued twice"
        );
        let countdown_ms = i64::from(self.slot(id).period_ms);
        let position = self.queue.len();
        self.queue.push(QueueEntry {
            slot: id,
            countdown_ms,
        });
        self.set_position(id, position);
        self.shuffle_forward(position);
    }

    /// Remove a slot at its recorded position, shifting later entries down.
    /// Relative order is preserved, so no reordering is needed.
    /// 按记录位置移除槽位，其后条目整体前移。相对顺序保持不变，故无需
    /// 重新排序。
    fn dequeue(&mut self, id: SlotId) {
        let position = self.slot(id).position;
        let last = self.queue.len() - 1;
        debug_assert!(position <= last, "recorded position out of range");
        debug_assert!(
            self.queue[position].slot == id,
            "recorded position does not match queue"
        );

        for i in position..last {
            self.queue[i] = self.queue[i + 1];
            self.set_position(self.queue[i].slot, i);
        }
        self.queue.pop();
    }

    /// Recompute a queued slot's countdown from its (possibly new) period
    /// and reposition it. Returns whether anything changed.
    /// 按（可能更新的）周期重算已排队槽位的倒计时并重新定位。返回是否有
    /// 变化。
    fn reset_countdown(&mut self, id: SlotId) -> bool {
        let position = self.slot(id).position;
        debug_assert!(position < self.queue.len(), "recorded position out of range");
        debug_assert!(
            self.queue[position].slot == id,
            "recorded position does not match queue"
        );

        let last_countdown = self.queue[position].countdown_ms;
        let new_countdown = i64::from(self.slot(id).period_ms);
        if new_countdown == last_countdown {
            return false;
        }

        self.queue[position].countdown_ms = new_countdown;
        if new_countdown > last_countdown {
            self.shuffle_back(position);
        } else {
            self.shuffle_forward(position);
        }
        true
    }

    /// Decrement every countdown by the elapsed milliseconds and report the
    /// front countdown, or `None` when the queue is empty.
    /// 将每个倒计时减去经过的毫秒数，并报告队首倒计时；队列为空时返回
    /// `None`。
    fn tick(&mut self, elapsed_ms: u32) -> Option<i64> {
        if self.queue.is_empty() {
            return None;
        }
        for entry in &mut self.queue {
            entry.countdown_ms -= i64::from(elapsed_ms);
        }
        Some(self.queue[0].countdown_ms)
    }

    /// Local adjacent swaps toward the tail. Queues stay small, so this is
    /// O(n) worst case but typically O(1).
    /// 向队尾方向做相邻交换。队列通常很小，最坏 O(n)，一般 O(1)。
    fn shuffle_back(&mut self, mut position: usize) {
        let len = self.queue.len();
        if position + 1 >= len {
            return;
        }
        let moving = self.queue[position];
        loop {
            let next = position + 1;
            if next == len || self.queue[next].countdown_ms >= moving.countdown_ms {
                break;
            }
            self.queue[position] = self.queue[next];
            let shifted = self.queue[position].slot;
            self.set_position(shifted, position);
            position = next;
        }
        self.queue[position] = moving;
        self.set_position(moving.slot, position);
    }

    /// Local adjacent swaps toward the front.
    /// 向队首方向做相邻交换。
    fn shuffle_forward(&mut self, mut position: usize) {
        if position == 0 {
            return;
        }
        let moving = self.queue[position];
        while position > 0 {
            let prev = self.queue[position - 1];
            if prev.countdown_ms <= moving.countdown_ms {
                break;
            }
            self.queue[position] = prev;
            self.set_position(prev.slot, position);
            position -= 1;
        }
        self.queue[position] = moving;
        self.set_position(moving.slot, position);
    }
}

/// Shared scheduler core. Strong references are held by `Scheduler` clones,
/// live `TimerHandle`s, and the countdown thread; posted notifications hold
/// only a weak reference.
/// 共享的调度器核心。强引用由 `Scheduler` 克隆、存活的 `TimerHandle`
/// 以及倒计时线程持有；已投递的通知只持有弱引用。
pub(crate) struct Core {
    state: Mutex<QueueState>,
    /// Wakes the countdown loop after queue mutations so it can recompute
    /// its next sleep interval.
    /// 在队列变化后唤醒倒计时循环，使其重新计算下一次休眠时长。
    wake: Condvar,
    /// The round-completion acknowledgment from the event-loop thread.
    /// 来自事件循环线程的轮次完成确认。
    ack: Signal,
    exit: AtomicBool,
    event_loop: Arc<dyn EventLoop>,
    clock: Arc<dyn MillisecondClock>,
    config: Config,
    worker: Mutex<Option<JoinHandle<()>>>,
    /// The single notification object reused for the whole scheduler
    /// lifetime.
    /// 在整个调度器生命周期内复用的唯一通知对象。
    notification: OnceLock<Notification>,
}

impl Core {
    /// Start the countdown thread, or do nothing if it is already running.
    /// 启动倒计时线程；若已在运行则不做任何事。
    fn spawn_worker(self: &Arc<Self>) -> Result<()> {
        let mut worker = self.worker.lock();
        if let Some(handle) = worker.as_ref() {
            if !handle.is_finished() {
                return Ok(());
            }
        }
        if self.exit.load(Ordering::Acquire) {
            return Err(Error::Shutdown);
        }

        let core = Arc::clone(self);
        let handle = std::thread::Builder::new()
            .name("pulse-timer-countdown".into())
            .spawn(move || core.countdown_loop())?;
        *worker = Some(handle);
        Ok(())
    }

    fn post_notification(&self) {
        if let Some(notification) = self.notification.get() {
            trace!("posting due-timers notification");
            self.event_loop.post(notification.clone());
        }
    }

    /// The background loop: keep countdowns current and hand due rounds to
    /// the event loop, one acknowledged notification at a time.
    /// 后台循环：维持倒计时的时效，并以"一次通知一次确认"的节奏把到期
    /// 轮次交给事件循环。
    fn countdown_loop(self: Arc<Self>) {
        info!("countdown thread started");
        let countdown = &self.config.countdown;
        let mut last = self.clock.now_millis();

        while !self.exit.load(Ordering::Acquire) {
            let now = self.clock.now_millis();
            let elapsed = elapsed_millis(last, now);
            last = now;

            let mut state = self.state.lock();
            let front_countdown = match state.tick(elapsed) {
                Some(countdown_ms) => countdown_ms,
                None => countdown.idle_wait.as_millis() as i64,
            };

            if front_countdown <= 0 {
                if !self.ack.try_consume() {
                    drop(state);
                    self.post_notification();
                    if !self.ack.wait_for(self.config.handshake.ack_timeout) {
                        // The host may discard posted messages (e.g. while
                        // running a modal loop). Assume this one was lost
                        // and post exactly one replacement.
                        warn!(
                            timeout_ms = self.config.handshake.ack_timeout.as_millis() as u64,
                            "due-timers notification not acknowledged, reposting"
                        );
                        self.post_notification();
                    }
                    continue;
                }
                // A leftover acknowledgment from a duplicate round was
                // pending; consume it and take a minimal pause before
                // deciding again.
                let _ = self.wake.wait_for(&mut state, countdown.min_wait);
                continue;
            }

            let wait = Duration::from_millis(front_countdown as u64)
                .clamp(countdown.min_wait, countdown.max_wait);
            let _ = self.wake.wait_for(&mut state, wait);
        }

        info!("countdown thread exiting");
    }

    /// Execute one round of due callbacks on the event-loop thread.
    /// 在事件循环线程上执行一轮到期回调。
    fn run_due_timers(&self) {
        // Never revive client state once teardown has begun.
        if self.exit.load(Ordering::Acquire) || self.event_loop.is_shutting_down() {
            return;
        }
        debug_assert!(
            self.event_loop.is_loop_thread(),
            "run_due_timers must run on the event-loop thread"
        );

        let deadline = Instant::now() + self.config.round.deadline;
        let mut invoked = 0usize;

        let mut state = self.state.lock();
        loop {
            let Some(front) = state.queue.first() else {
                break;
            };
            if front.countdown_ms > 0 {
                break;
            }
            let id = front.slot;

            // Reschedule before invoking: reset the countdown to the full
            // period and reposition, exactly as a fresh insertion would.
            state.queue[0].countdown_ms = i64::from(state.slot(id).period_ms);
            state.shuffle_back(0);
            self.wake.notify_one();

            let callback = Arc::clone(&state.slot(id).callback);
            MutexGuard::unlocked(&mut state, || {
                // try_lock: a nested round (a callback draining timers
                // synchronously) must not deadlock on a callback that is
                // already mid-invocation on this thread.
                if let Some(mut callback) = callback.try_lock() {
                    let outcome = catch_unwind(AssertUnwindSafe(|| (*callback)()));
                    if outcome.is_err() {
                        warn!("timer callback panicked, continuing the round");
                    }
                }
            });
            invoked += 1;

            if Instant::now() > deadline {
                // A backlog of slow callbacks must not stall the event loop;
                // whatever is still due waits for the next round.
                debug!(invoked, "round deadline exceeded, deferring remaining due timers");
                break;
            }
        }
        drop(state);

        self.ack.signal();
        trace!(invoked, "due-timer round complete");
    }

    // ----- slot operations, called from the client API -----

    fn register_slot(&self, callback: Box<dyn FnMut() + Send>) -> SlotId {
        let mut state = self.state.lock();
        let id = state.alloc(Arc::new(Mutex::new(callback)));
        trace!(slot = id.0, "timer slot registered");
        id
    }

    fn start_slot(&self, id: SlotId, period_ms: u32) {
        let mut state = self.state.lock();
        let was_stopped = state.slot(id).period_ms == 0;
        state.slot_mut(id).period_ms = period_ms.max(1);

        if was_stopped {
            state.enqueue(id);
            self.wake.notify_one();
        } else if state.reset_countdown(id) {
            self.wake.notify_one();
        }
    }

    fn stop_slot(&self, id: SlotId) {
        let mut state = self.state.lock();
        if state.slot(id).period_ms > 0 {
            state.dequeue(id);
            state.slot_mut(id).period_ms = 0;
        }
    }

    fn slot_period_ms(&self, id: SlotId) -> u32 {
        self.state.lock().slot(id).period_ms
    }

    fn release_slot(&self, id: SlotId) {
        let mut state = self.state.lock();
        if state.slot(id).period_ms > 0 {
            state.dequeue(id);
        }
        state.release(id);
        trace!(slot = id.0, "timer slot released");
    }

    /// Stop and free a one-shot slot after it has fired. Runs from inside
    /// the slot's own callback, with the queue lock released by the round.
    /// 在一次性槽位触发后停止并回收它。它在该槽位自身的回调内运行，此时
    /// 轮次已释放队列锁。
    fn finish_one_shot(&self, id: SlotId) {
        self.release_slot(id);
    }
}

impl RoundTarget for Core {
    fn run_round(&self) {
        self.run_due_timers();
    }
}

/// Requests shutdown and joins the countdown thread when the last strong
/// reference to the scheduler goes away.
/// 当调度器的最后一个强引用消失时请求停机并汇合倒计时线程。
struct Lifetime {
    core: Arc<Core>,
}

impl Drop for Lifetime {
    fn drop(&mut self) {
        self.core.exit.store(true, Ordering::Release);
        // Release both bounded waits the countdown thread may be blocked in.
        self.core.ack.signal();
        {
            let _state = self.core.state.lock();
            self.core.wake.notify_all();
        }
        let worker = self.core.worker.lock().take();
        if let Some(handle) = worker {
            let _ = handle.join();
        }
        info!("scheduler released, countdown thread joined");
    }
}

/// A reference-counted periodic-callback scheduler bound to one host event
/// loop.
///
/// Construct it explicitly and inject it into clients; cloning is cheap.
/// The countdown thread starts with the first instance and is joined when
/// the last clone (and the last [`crate::timer::TimerHandle`]) is released.
///
/// 绑定到单个宿主事件循环的引用计数周期回调调度器。
///
/// 应显式构造并注入到客户端；克隆是廉价的。倒计时线程随第一个实例启动，
/// 并在最后一个克隆（以及最后一个 [`crate::timer::TimerHandle`]）释放时
/// 被汇合。
#[derive(Clone)]
pub struct Scheduler {
    core: Arc<Core>,
    _lifetime: Arc<Lifetime>,
}

impl Scheduler {
    /// Create a scheduler with the default configuration and clock.
    /// 以默认配置与时钟创建调度器。
    pub fn new(event_loop: Arc<dyn EventLoop>) -> Result<Self> {
        Self::with_config(event_loop, Config::default())
    }

    /// Create a scheduler with an explicit configuration.
    /// 以显式配置创建调度器。
    pub fn with_config(event_loop: Arc<dyn EventLoop>, config: Config) -> Result<Self> {
        Self::with_parts(event_loop, Arc::new(SystemClock::new()), config)
    }

    /// Create a scheduler with an explicit clock, for deterministic tests.
    /// 以显式时钟创建调度器，用于确定性测试。
    pub fn with_parts(
        event_loop: Arc<dyn EventLoop>,
        clock: Arc<dyn MillisecondClock>,
        config: Config,
    ) -> Result<Self> {
        let core = Arc::new(Core {
            state: Mutex::new(QueueState::new()),
            wake: Condvar::new(),
            ack: Signal::new(),
            exit: AtomicBool::new(false),
            event_loop,
            clock,
            config,
            worker: Mutex::new(None),
            notification: OnceLock::new(),
        });

        let weak = Arc::downgrade(&core);
        let target: Weak<dyn RoundTarget> = weak;
        let _ = core.notification.set(Notification::new(target));

        core.spawn_worker()?;
        Ok(Self {
            core: Arc::clone(&core),
            _lifetime: Arc::new(Lifetime { core }),
        })
    }

    /// Drain all currently due timers on the calling thread, (re)starting
    /// the countdown thread first if it is not running. Intended for hosts
    /// that need deterministic flushing outside the normal loop cadence;
    /// must be called on the event-loop thread.
    ///
    /// 在调用线程上排空当前所有到期定时器；若倒计时线程未运行则先（重新）
    /// 启动它。供需要在常规循环节奏之外确定性冲刷定时器的宿主使用；必须
    /// 在事件循环线程上调用。
    pub fn run_pending_timers_now(&self) -> Result<()> {
        self.core.spawn_worker()?;
        self.core.run_due_timers();
        Ok(())
    }

    /// Fire `callback` once after `delay`, then forget the registration.
    /// 在 `delay` 之后触发一次 `callback`，随后自动注销。
    pub fn run_after_delay(&self, delay: Duration, callback: impl FnOnce() + Send + 'static) {
        let weak = Arc::downgrade(&self.core);
        let mut state = self.core.state.lock();

        let placeholder: Box<dyn FnMut() + Send> = Box::new(|| {});
        let id = state.alloc(Arc::new(Mutex::new(placeholder)));
        let mut callback = Some(callback);
        let one_shot: Box<dyn FnMut() + Send> = Box::new(move || {
            if let Some(callback) = callback.take() {
                callback();
            }
            if let Some(core) = weak.upgrade() {
                core.finish_one_shot(id);
            }
        });
        state.slot_mut(id).callback = Arc::new(Mutex::new(one_shot));
        state.slot_mut(id).period_ms = (delay.as_millis().min(u128::from(u32::MAX)) as u32).max(1);
        state.enqueue(id);
        drop(state);
        self.core.wake.notify_one();
    }

    /// The number of timers currently registered in the queue.
    /// 当前队列中已注册的定时器数量。
    pub fn active_timers(&self) -> usize {
        self.core.state.lock().queue.len()
    }

    // ----- crate-internal access for the client handle API -----

    pub(crate) fn register_slot(&self, callback: Box<dyn FnMut() + Send>) -> SlotId {
        self.core.register_slot(callback)
    }

    pub(crate) fn start_slot(&self, id: SlotId, period_ms: u32) {
        self.core.start_slot(id, period_ms);
    }

    pub(crate) fn stop_slot(&self, id: SlotId) {
        self.core.stop_slot(id);
    }

    pub(crate) fn slot_period_ms(&self, id: SlotId) -> u32 {
        self.core.slot_period_ms(id)
    }

    pub(crate) fn release_slot(&self, id: SlotId) {
        self.core.release_slot(id);
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_callback() -> Callback {
        let callback: Box<dyn FnMut() + Send> = Box::new(|| {});
        Arc::new(Mutex::new(callback))
    }

    fn queued_slot(state: &mut QueueState, period_ms: u32) -> SlotId {
        let id = state.alloc(noop_callback());
        state.slot_mut(id).period_ms = period_ms;
        state.enqueue(id);
        id
    }

    /// The two structural invariants: ascending countdown order, and every
    /// recorded position matching the true index.
    fn assert_invariants(state: &QueueState) {
        for window in state.queue.windows(2) {
            assert!(
                window[0].countdown_ms <= window[1].countdown_ms,
                "queue not ascending by countdown"
            );
        }
        for (index, entry) in state.queue.iter().enumerate() {
            assert_eq!(
                state.slot(entry.slot).position,
                index,
                "recorded position diverged from queue index"
            );
        }
    }

    #[test]
    fn enqueue_keeps_ascending_order() {
        let mut state = QueueState::new();
        queued_slot(&mut state, 50);
        queued_slot(&mut state, 10);
        queued_slot(&mut state, 30);
        queued_slot(&mut state, 10);

        assert_eq!(state.queue.len(), 4);
        assert_eq!(state.queue[0].countdown_ms, 10);
        assert_eq!(state.queue[3].countdown_ms, 50);
        assert_invariants(&state);
    }

    #[test]
    fn dequeue_shifts_and_fixes_positions() {
        let mut state = QueueState::new();
        let a = queued_slot(&mut state, 10);
        let b = queued_slot(&mut state, 20);
        let c = queued_slot(&mut state, 30);

        state.dequeue(b);
        state.slot_mut(b).period_ms = 0;
        assert_eq!(state.queue.len(), 2);
        assert_invariants(&state);
        assert_eq!(state.queue[0].slot, a);
        assert_eq!(state.queue[1].slot, c);

        state.dequeue(a);
        state.slot_mut(a).period_ms = 0;
        assert_eq!(state.queue.len(), 1);
        assert_invariants(&state);
    }

    #[test]
    fn reset_countdown_moves_in_both_directions() {
        let mut state = QueueState::new();
        let a = queued_slot(&mut state, 10);
        let b = queued_slot(&mut state, 20);
        let c = queued_slot(&mut state, 30);

        // Lengthen the front timer: it must shuffle back.
        state.slot_mut(a).period_ms = 100;
        assert!(state.reset_countdown(a));
        assert_eq!(state.queue[2].slot, a);
        assert_invariants(&state);

        // Shorten the back timer: it must shuffle forward.
        state.slot_mut(c).period_ms = 5;
        assert!(state.reset_countdown(c));
        assert_eq!(state.queue[0].slot, c);
        assert_invariants(&state);

        // Unchanged period reports no movement.
        assert!(!state.reset_countdown(b));
        assert_invariants(&state);
    }

    #[test]
    fn tick_decrements_all_and_reports_front() {
        let mut state = QueueState::new();
        queued_slot(&mut state, 10);
        queued_slot(&mut state, 25);

        assert_eq!(state.tick(7), Some(3));
        assert_eq!(state.queue[1].countdown_ms, 18);
        // Countdowns keep going negative while a backlog waits.
        assert_eq!(state.tick(8), Some(-5));
        assert_invariants(&state);
    }

    #[test]
    fn tick_on_empty_queue_is_none() {
        let mut state = QueueState::new();
        assert_eq!(state.tick(100), None);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut state = QueueState::new();
        let a = state.alloc(noop_callback());
        let b = state.alloc(noop_callback());
        assert_ne!(a, b);

        state.release(a);
        let c = state.alloc(noop_callback());
        assert_eq!(a, c);
    }

    #[test]
    fn random_mutation_sequence_preserves_invariants() {
        let mut state = QueueState::new();
        let mut ids = Vec::new();
        // A fixed pseudo-random walk over add/remove/reset.
        let mut seed = 0x2545_f491u32;
        for step in 0..200 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            match seed % 3 {
                0 => {
                    let id = queued_slot(&mut state, (seed >> 8) % 500 + 1);
                    ids.push(id);
                }
                1 if !ids.is_empty() => {
                    let id = ids.remove((step as usize) % ids.len());
                    state.dequeue(id);
                    state.slot_mut(id).period_ms = 0;
                    state.release(id);
                }
                2 if !ids.is_empty() => {
                    let id = ids[(step as usize) % ids.len()];
                    state.slot_mut(id).period_ms = (seed >> 4) % 300 + 1;
                    state.reset_countdown(id);
                }
                _ => {}
            }
            let _ = state.tick((seed >> 16) % 20);
            assert_invariants(&state);
        }
    }
}
