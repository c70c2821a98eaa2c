//! 定义了调度器的可配置参数。
//! Defines configurable parameters for the scheduler.

use std::time::Duration;

/// A structure containing all configurable parameters for a scheduler.
///
/// The default values are empirically tuned; hosts with unusual load
/// patterns are expected to adjust them.
///
/// 包含调度器所有可配置参数的结构体。
///
/// 默认值经过经验调优；负载模式特殊的宿主应自行调整。
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Cross-thread notification handshake parameters.
    /// 跨线程通知握手相关参数。
    pub handshake: HandshakeConfig,

    /// Background countdown loop parameters.
    /// 后台倒计时循环相关参数。
    pub countdown: CountdownConfig,

    /// Due-timer round execution parameters.
    /// 到期定时器轮次执行相关参数。
    pub round: RoundConfig,
}

/// Cross-thread notification handshake parameters.
///
/// 跨线程通知握手相关参数。
#[derive(Debug, Clone)]
pub struct HandshakeConfig {
    /// How long the countdown thread waits for the event loop to acknowledge
    /// a posted notification before assuming the host discarded it and
    /// posting exactly one replacement.
    ///
    /// 倒计时线程在认定宿主丢弃了已投递的通知并补发一次之前，等待事件循环
    /// 确认的时长。
    pub ack_timeout: Duration,
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            ack_timeout: Duration::from_millis(300),
        }
    }
}

/// Background countdown loop parameters.
///
/// 后台倒计时循环相关参数。
#[derive(Debug, Clone)]
pub struct CountdownConfig {
    /// The minimum sleep between countdown ticks.
    /// 倒计时两次滴答之间的最短休眠时间。
    pub min_wait: Duration,

    /// The maximum sleep between countdown ticks. The loop never sleeps
    /// longer than this even when no timer is close to due, so its own
    /// timekeeping stays fresh.
    ///
    /// 倒计时两次滴答之间的最长休眠时间。即使没有即将到期的定时器，循环的
    /// 休眠也不会超过该值，以保证其自身计时保持新鲜。
    pub max_wait: Duration,

    /// The nominal wait used when the queue is empty, before clamping to
    /// `max_wait`.
    ///
    /// 队列为空时使用的名义等待时间，随后仍会被钳制到 `max_wait`。
    pub idle_wait: Duration,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            min_wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(100),
            idle_wait: Duration::from_millis(1000),
        }
    }
}

/// Due-timer round execution parameters.
///
/// 到期定时器轮次执行相关参数。
#[derive(Debug, Clone)]
pub struct RoundConfig {
    /// The hard deadline for one round of due-callback execution on the
    /// event-loop thread. Once a callback finishes past this deadline the
    /// remaining due timers are deferred to the next round, so a backlog
    /// cannot stall the event loop indefinitely.
    ///
    /// 事件循环线程上一轮到期回调执行的硬截止时间。某个回调结束时一旦超过
    /// 该截止时间，剩余的到期定时器将被推迟到下一轮，因此积压不会无限期
    /// 地拖住事件循环。
    pub deadline: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            deadline: Duration::from_millis(100),
        }
    }
}
