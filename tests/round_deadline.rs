//! 轮次硬截止时间测试：慢回调的积压必须被推迟而非拖垮事件循环。
//! Round hard-deadline tests: a backlog of slow callbacks must be deferred,
//! not allowed to stall the event loop.

mod common;

use common::init_tracing;
use pulse_timer::config::{Config, RoundConfig};
use pulse_timer::testing::TestEventLoop;
use pulse_timer::Scheduler;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

fn slow_callback(total: &Arc<AtomicUsize>, busy: Duration) -> impl FnMut() + Send + 'static {
    let total = total.clone();
    move || {
        total.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(busy);
    }
}

#[test]
fn backlog_of_slow_callbacks_is_split_across_rounds() {
    init_tracing();
    let event_loop = TestEventLoop::new();
    let scheduler = Scheduler::new(event_loop.clone()).expect("spawn countdown thread");

    // Three timers, all due, each burning 60ms against the default 100ms
    // round deadline: the first round must run exactly two of them.
    let total = Arc::new(AtomicUsize::new(0));
    let timers: Vec<_> = (0..3)
        .map(|_| {
            let timer = scheduler.timer(slow_callback(&total, Duration::from_millis(60)));
            timer.start(Duration::from_millis(1));
            timer
        })
        .collect();

    // Let the countdown thread drive everything due.
    std::thread::sleep(Duration::from_millis(50));

    event_loop.adopt_current_thread();
    scheduler.run_pending_timers_now().expect("drain");
    assert_eq!(
        total.load(Ordering::SeqCst),
        2,
        "first round should stop after the deadline passes mid-backlog"
    );

    // The deferred timer runs in a later round.
    scheduler.run_pending_timers_now().expect("drain");
    assert!(total.load(Ordering::SeqCst) >= 3, "deferred timer never ran");

    drop(timers);
}

#[test]
fn round_deadline_is_configurable() {
    init_tracing();
    let event_loop = TestEventLoop::new();
    let config = Config {
        round: RoundConfig {
            deadline: Duration::from_millis(10),
        },
        ..Config::default()
    };
    let scheduler = Scheduler::with_config(event_loop.clone(), config).expect("spawn");

    let total = Arc::new(AtomicUsize::new(0));
    let timers: Vec<_> = (0..3)
        .map(|_| {
            let timer = scheduler.timer(slow_callback(&total, Duration::from_millis(25)));
            timer.start(Duration::from_millis(1));
            timer
        })
        .collect();

    std::thread::sleep(Duration::from_millis(30));

    event_loop.adopt_current_thread();
    scheduler.run_pending_timers_now().expect("drain");
    assert_eq!(
        total.load(Ordering::SeqCst),
        1,
        "a 10ms deadline admits only one 25ms callback per round"
    );

    drop(timers);
}

#[test]
fn empty_queue_round_is_harmless() {
    init_tracing();
    let event_loop = TestEventLoop::new();
    let scheduler = Scheduler::new(event_loop.clone()).expect("spawn");

    event_loop.adopt_current_thread();
    // Nothing registered: the drain must return promptly and still complete
    // the handshake.
    scheduler.run_pending_timers_now().expect("drain");
    assert_eq!(scheduler.active_timers(), 0);
}
