//! # 外部协作者接口
//!
//! 引擎本身是纯函数；以下接口描述调用方依赖的外部协作者：
//! - `SuggestionSource`: 批量查询审核通过的修正
//! - `JobStatusSource`: 查询报告生成任务的状态
//! - `PollClock`: 轮询使用的时钟（可注入，便于测试）
//!
//! ## 实现者
//! - `pallet-saju-report`: 链上修正登记表与任务登记表

use crate::types::{JobStatus, SuggestionKey, SuggestionOverride, SuggestionTriple};
use sp_std::prelude::*;

/// 修正建议的批量查询
pub trait SuggestionSource {
    type Error: core::fmt::Debug;

    /// 按格局名 + 若干 (类型, 目标字, 记录标识) 查询
    ///
    /// ## 返回
    /// - 只包含找到的条目，键为复合键 `type:pattern:target:code`
    fn batch_lookup(
        &self,
        pattern_name: &[u8],
        triples: &[SuggestionTriple],
    ) -> Result<Vec<(SuggestionKey, SuggestionOverride)>, Self::Error>;
}

/// 报告生成任务的状态查询
pub trait JobStatusSource {
    type Error: core::fmt::Debug;

    fn job_status(&self, job_id: u64) -> Result<JobStatus, Self::Error>;
}

/// 轮询时钟
pub trait PollClock {
    /// 单调递增的毫秒时间
    fn now_ms(&self) -> u64;

    fn sleep_ms(&mut self, ms: u64);
}

/// 基于系统时间的时钟
#[cfg(feature = "std")]
pub struct SystemClock {
    started: std::time::Instant,
}

#[cfg(feature = "std")]
impl Default for SystemClock {
    fn default() -> Self {
        Self { started: std::time::Instant::now() }
    }
}

#[cfg(feature = "std")]
impl PollClock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}
