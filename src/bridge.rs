//! 事件循环通知桥。
//! Event-loop notification bridge.
//!
//! The countdown thread never runs client callbacks itself. When timers come
//! due it posts a [`Notification`] through the host's [`EventLoop`]; the host
//! delivers it on the event-loop thread, which executes one round of due
//! callbacks. Delivery is fire-and-forget and allowed to be lossy: the
//! countdown loop's acknowledgment timeout (see `HandshakeConfig`) reposts
//! when a notification appears to have been discarded, giving at-least-once,
//! duplicate-suppressed semantics overall.
//!
//! 倒计时线程自身从不运行客户端回调。定时器到期时，它通过宿主的
//! [`EventLoop`] 投递一个 [`Notification`]；宿主在事件循环线程上送达它，
//! 由其执行一轮到期回调。投递是即发即忘的，并且允许丢失：当通知疑似被
//! 丢弃时，倒计时循环的确认超时（见 `HandshakeConfig`）会补发一次，
//! 整体上提供"至少一次、去重"的语义。

use std::sync::Weak;

/// The receiving side of a posted notification.
/// 已投递通知的接收端。
pub(crate) trait RoundTarget: Send + Sync {
    /// Execute one round of due callbacks on the calling thread.
    /// 在调用线程上执行一轮到期回调。
    fn run_round(&self);
}

/// The host event loop, as seen by the scheduler.
///
/// Everything here is an external collaborator contract: the scheduler posts
/// notifications into it, asks it which thread it runs on, and checks whether
/// teardown has begun.
///
/// 调度器眼中的宿主事件循环。
///
/// 这里的一切都是外部协作者契约：调度器向其投递通知、询问它运行在哪个
/// 线程上、并检查是否已开始停机。
pub trait EventLoop: Send + Sync + 'static {
    /// Post a notification for later delivery on the event-loop thread.
    ///
    /// Must not block. The host is permitted to silently drop the
    /// notification (e.g. while running a modal loop); the scheduler
    /// recovers by reposting after its acknowledgment timeout.
    ///
    /// 投递一个通知，稍后在事件循环线程上送达。
    ///
    /// 不得阻塞。宿主可以静默丢弃该通知（例如运行模态循环期间）；调度器
    /// 会在确认超时后通过补发来恢复。
    fn post(&self, notification: Notification);

    /// Whether the calling thread is the event-loop thread.
    /// 调用线程是否为事件循环线程。
    fn is_loop_thread(&self) -> bool;

    /// Whether the event loop has begun shutting down. Rounds delivered
    /// after this returns true are no-ops.
    ///
    /// 事件循环是否已开始停机。此后送达的轮次均为空操作。
    fn is_shutting_down(&self) -> bool;
}

/// The single, reusable "please run due timers" message.
///
/// Holds only a weak reference to the scheduler core, so a notification
/// still sitting in the host's queue after the scheduler was released
/// delivers as a no-op rather than reviving client state.
///
/// 单一、可复用的"请运行到期定时器"消息。
///
/// 仅持有调度器核心的弱引用，因此调度器释放后仍滞留在宿主队列中的通知
/// 送达时只是空操作，而不会复活客户端状态。
#[derive(Clone)]
pub struct Notification {
    target: Weak<dyn RoundTarget>,
}

impl Notification {
    pub(crate) fn new(target: Weak<dyn RoundTarget>) -> Self {
        Self { target }
    }

    /// Deliver the notification on the calling thread.
    ///
    /// The host must call this from its event-loop thread only. Safe to call
    /// when the queue happens to be empty or the scheduler is already gone.
    ///
    /// 在调用线程上送达该通知。
    ///
    /// 宿主只能从其事件循环线程调用。当队列恰好为空或调度器已不存在时，
    /// 调用也是安全的。
    pub fn deliver(&self) {
        if let Some(target) = self.target.upgrade() {
            target.run_round();
        }
    }
}

impl std::fmt::Debug for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notification")
            .field("live", &(self.target.strong_count() > 0))
            .finish()
    }
}
