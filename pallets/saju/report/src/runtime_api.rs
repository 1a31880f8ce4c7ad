//! Runtime API 定义：用于报告控制台查询修正建议与任务状态
//!
//! 提供以下接口：
//! - `batch_overrides`: 按格局名批量查询修正建议
//! - `job_status`: 查询报告生成任务的状态快照

use pallet_saju_common::{JobStatus, SuggestionKey, SuggestionOverride, SuggestionTriple};
use sp_std::vec::Vec;

sp_api::decl_runtime_apis! {
	/// 四柱报告模块 Runtime API
	pub trait SajuReportApi {
		/// 批量查询修正建议
		///
		/// ### 参数
		/// - `pattern_name`: 格局名（缺失或 "unknown" 时返回空表）
		/// - `triples`: (类型, 目标字, 记录标识) 列表
		///
		/// ### 返回
		/// - 只包含找到的条目，键为 `type:pattern:target:code`
		fn batch_overrides(pattern_name: Vec<u8>, triples: Vec<SuggestionTriple>) -> Vec<(SuggestionKey, SuggestionOverride)>;

		/// 查询任务状态，任务不存在时返回 None
		fn job_status(job_id: u64) -> Option<JobStatus>;
	}
}
