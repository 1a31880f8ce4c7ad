//! # 报告生成任务轮询
//!
//! 长时间的生成任务启动后返回任务 ID，调用方按固定间隔（2 秒）轮询状态，
//! 直到完成/失败或超时（10 分钟）：
//! - 看到终态立即停止
//! - 每次中间轮询都上报进度（0-100 + 消息）
//! - 没有取消信号，超时即放弃；也没有自动重试，失败或超时的任务由调用方显式重启

use crate::traits::{JobStatusSource, PollClock};
use crate::types::{JobState, JobStatus};

/// 默认轮询间隔（毫秒）
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;

/// 默认超时（毫秒）
pub const DEFAULT_POLL_TIMEOUT_MS: u64 = 10 * 60 * 1_000;

/// 轮询策略
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PollPolicy {
    pub interval_ms: u64,
    pub timeout_ms: u64,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self { interval_ms: DEFAULT_POLL_INTERVAL_MS, timeout_ms: DEFAULT_POLL_TIMEOUT_MS }
    }
}

/// 轮询结果
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum PollOutcome {
    Completed(JobStatus),
    Failed(JobStatus),
    /// 超时放弃，附带最后一次成功读取的状态
    TimedOut { last: Option<JobStatus> },
}

/// 轮询直到终态或超时
///
/// 单次状态读取失败视为暂时性问题，记录后继续轮询，直到超时。
pub fn poll_until_terminal<S, C, F>(
    source: &S,
    clock: &mut C,
    policy: PollPolicy,
    job_id: u64,
    mut on_progress: F,
) -> PollOutcome
where
    S: JobStatusSource,
    C: PollClock,
    F: FnMut(&JobStatus),
{
    let started = clock.now_ms();
    let mut last: Option<JobStatus> = None;

    loop {
        match source.job_status(job_id) {
            Ok(status) => match status.state {
                JobState::Completed => {
                    log::info!(target: crate::LOG_TARGET, "job {} completed", job_id);
                    return PollOutcome::Completed(status);
                },
                JobState::Failed => {
                    log::warn!(target: crate::LOG_TARGET, "job {} failed at {}%", job_id, status.progress);
                    return PollOutcome::Failed(status);
                },
                JobState::Pending | JobState::Running => {
                    on_progress(&status);
                    last = Some(status);
                },
            },
            Err(e) => {
                log::warn!(target: crate::LOG_TARGET, "job {} status unavailable: {:?}", job_id, e);
            },
        }

        clock.sleep_ms(policy.interval_ms);
        if clock.now_ms().saturating_sub(started) >= policy.timeout_ms {
            log::warn!(target: crate::LOG_TARGET, "job {} timed out after {} ms", job_id, policy.timeout_ms);
            return PollOutcome::TimedOut { last };
        }
    }
}

// ===== 单元测试 =====
