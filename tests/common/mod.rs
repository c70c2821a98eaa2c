//! 测试辅助工具模块
//! Test utilities module

#![allow(dead_code)]

use pulse_timer::Scheduler;
use pulse_timer::testing::TestEventLoop;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Install a fmt subscriber once so `RUST_LOG` works in tests.
/// 安装一次 fmt 订阅器，使 `RUST_LOG` 在测试中生效。
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An event loop plus a scheduler bound to it, with default configuration.
/// 一个事件循环以及绑定到它的默认配置调度器。
pub fn scheduler_fixture() -> (Arc<TestEventLoop>, Scheduler) {
    init_tracing();
    let event_loop = TestEventLoop::new();
    let scheduler = Scheduler::new(event_loop.clone()).expect("spawn countdown thread");
    (event_loop, scheduler)
}

/// A shared fire counter for timer callbacks.
/// 供定时器回调使用的共享触发计数器。
pub fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let reader = {
        let count = count.clone();
        move || count.load(Ordering::SeqCst)
    };
    (count, reader)
}

/// A counting callback over `count`.
/// 基于 `count` 的计数回调。
pub fn counting_callback(count: &Arc<AtomicUsize>) -> impl FnMut() + Send + 'static {
    let count = count.clone();
    move || {
        count.fetch_add(1, Ordering::SeqCst);
    }
}
