//! # 四柱命理引擎 (Saju Classification & Outcome-Rating Engine)
//!
//! ## 概述
//!
//! 本 crate 是报告控制台与链上报告模块共享的纯规则引擎，包括：
//! - 六十甲子历法运算（干支索引、年柱推算、干支文本格式化/解析）
//! - 十神关系判定（日干 vs 天干/地支本气）
//! - 十二运星 / 十二神煞查表
//! - 大运/岁运成败记录的归并去重
//! - 评级级联（等级 → 结果文本 → 分数）
//! - 修正建议叠加（审核后的修正覆盖计算结果，仅用于展示）
//! - 报告生成任务的轮询协议
//!
//! ## 特点
//!
//! - ✅ 纯 Rust crate，无链上存储
//! - ✅ 全部为纯函数，可任意并发调用
//! - ✅ no_std 兼容
//!
//! ## 模块结构
//!
//! ```text
//! pallet-saju-common
//! ├── types.rs       # 共享类型定义
//! ├── traits.rs      # 外部协作者接口（建议查询、任务状态、时钟）
//! ├── constants.rs   # 字形表、本气表、十二运星/神煞表、评级标签
//! ├── error.rs       # 引擎错误
//! ├── calendar.rs    # 六十甲子历法
//! ├── ten_god.rs     # 十神
//! ├── life_cycle.rs  # 十二运星 / 十二神煞
//! ├── chart.rs       # 命盘与大运/岁运
//! ├── outcome.rs     # 成败记录归并
//! ├── rating.rs      # 评级级联
//! ├── suggestion.rs  # 修正建议叠加
//! └── job.rs         # 任务轮询
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod calendar;
pub mod chart;
pub mod constants;
pub mod error;
pub mod job;
pub mod life_cycle;
pub mod outcome;
pub mod rating;
pub mod suggestion;
pub mod ten_god;
pub mod traits;
pub mod types;

pub use error::EngineError;
pub use traits::*;
pub use types::*;

pub use calendar::{format_ganzhi, ganji_for_year, parse_ganzhi, pillar_index, sixty_cycle, year_ganzhi};
pub use chart::{decade_for_year, decade_lucks, luck_direction, year_lucks, PillarPosition, PillarSlot, SajuChart};
pub use job::{poll_until_terminal, PollOutcome, PollPolicy};
pub use life_cycle::{display_label, twelve_spirit, twelve_stage, TwelveSpirit, TwelveStage};
pub use outcome::{reconcile, reconcile_groups, OutcomeGroup};
pub use rating::{combined_rating, single_rating, PillarSignal};
pub use suggestion::{fetch_overrides, is_known_pattern, resolve, OverrideCache};
pub use ten_god::{classify_branch, classify_stem, classify_stem_index, Relation, ShiShen, TenGodCategory};

/// 日志目标
pub const LOG_TARGET: &str = "saju";
