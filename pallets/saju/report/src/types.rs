//! # 报告模块存储类型
//!
//! 链上只保存有界形式；对外接口统一转换为 `pallet-saju-common` 的无界类型。

use codec::{Decode, Encode, MaxEncodedLen};
use frame_support::{traits::Get, BoundedVec};
use pallet_saju_common::{JobState, JobStatus, OutcomeResult, RoleTiers, SuggestionOverride};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;
use sp_std::prelude::*;

/// 角色层级数（first…fourth）
pub const ROLE_TIER_COUNT: usize = 4;

/// 链上保存的修正建议
#[derive(Encode, Decode, TypeInfo, MaxEncodedLen, Clone, PartialEq, Eq, RuntimeDebug)]
pub struct StoredOverride<Reason, Tier> {
	pub result: Option<OutcomeResult>,
	pub reason: Option<Reason>,
	/// 四个层级，顺序同 `RoleTiers`
	pub roles: Option<[Tier; ROLE_TIER_COUNT]>,
}

/// 有界化失败的原因
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum BoundError {
	ReasonTooLong,
	TooManyRoles,
	RoleTooLong,
}

impl<MaxReason, MaxRoles, MaxRoleLen>
	StoredOverride<BoundedVec<u8, MaxReason>, BoundedVec<BoundedVec<u8, MaxRoleLen>, MaxRoles>>
where
	MaxReason: Get<u32>,
	MaxRoles: Get<u32>,
	MaxRoleLen: Get<u32>,
{
	pub fn try_from_override(suggestion: SuggestionOverride) -> Result<Self, BoundError> {
		let reason = suggestion
			.suggested_reason
			.map(|r| BoundedVec::try_from(r).map_err(|_| BoundError::ReasonTooLong))
			.transpose()?;
		let roles = suggestion.suggested_roles.map(bound_roles).transpose()?;
		Ok(Self { result: suggestion.suggested_result, reason, roles })
	}

	pub fn into_override(self) -> SuggestionOverride {
		SuggestionOverride {
			suggested_result: self.result,
			suggested_reason: self.reason.map(|r| r.into_inner()),
			suggested_roles: self.roles.map(|tiers| {
				let [first, second, third, fourth] = tiers.map(|tier| tier.into_iter().map(|r| r.into_inner()).collect::<Vec<Vec<u8>>>());
				RoleTiers { first, second, third, fourth }
			}),
		}
	}
}

fn bound_roles<MaxRoles: Get<u32>, MaxRoleLen: Get<u32>>(
	roles: RoleTiers,
) -> Result<[BoundedVec<BoundedVec<u8, MaxRoleLen>, MaxRoles>; ROLE_TIER_COUNT], BoundError> {
	let bound_tier = |tier: Vec<Vec<u8>>| -> Result<BoundedVec<BoundedVec<u8, MaxRoleLen>, MaxRoles>, BoundError> {
		let roles = tier
			.into_iter()
			.map(|role| BoundedVec::try_from(role).map_err(|_| BoundError::RoleTooLong))
			.collect::<Result<Vec<_>, _>>()?;
		BoundedVec::try_from(roles).map_err(|_| BoundError::TooManyRoles)
	};
	Ok([bound_tier(roles.first)?, bound_tier(roles.second)?, bound_tier(roles.third)?, bound_tier(roles.fourth)?])
}

/// 报告生成任务
#[derive(Encode, Decode, TypeInfo, MaxEncodedLen, Clone, PartialEq, Eq, RuntimeDebug)]
pub struct ReportJob<AccountId, BlockNumber, Message> {
	pub owner: AccountId,
	/// 命盘 ID
	pub chart_id: u64,
	/// 章节（None 表示整份报告）
	pub chapter: Option<u8>,
	pub state: JobState,
	/// 0-100，单调不减
	pub progress: u8,
	pub message: Message,
	pub created_at: BlockNumber,
	pub updated_at: BlockNumber,
	/// 由哪个失败任务重启而来
	pub restarted_from: Option<u64>,
}

impl<AccountId, BlockNumber, Message: AsRef<[u8]>> ReportJob<AccountId, BlockNumber, Message> {
	pub fn status(&self) -> JobStatus {
		JobStatus { state: self.state, progress: self.progress, message: self.message.as_ref().to_vec() }
	}
}
