//! # 四柱报告 Pallet (Pallet Saju Report)
//!
//! ## 概述
//!
//! 本 Pallet 为四柱报告控制台提供两张链上登记表：
//! - 修正建议登记表：审核员提交/撤销对成败记录的修正，控制台按
//!   (格局名, 类型, 目标字, 记录标识) 批量查询并叠加展示
//! - 报告生成任务登记表：用户发起长时间的生成任务，工作节点上报进度，
//!   控制台每 2 秒轮询直到完成、失败或 10 分钟超时
//!
//! 规则计算（干支、十神、评级级联等）全部在 `pallet-saju-common` 中，本模块不做任何推算。
//!
//! ## 任务状态机
//!
//! ```text
//! Pending ──report_progress──► Running ──complete_generation──► Completed
//!    │                            │
//!    └──────fail_generation───────┴──────────────────────────► Failed
//!                                                                │
//!                          restart_generation（新任务 ID）◄──────┘
//! ```
//!
//! - 进度 0-100，单调不减
//! - 完成/失败后任何更新都被拒绝（`JobAlreadyFinished`）
//! - 没有自动重试，失败任务只能由所有者显式重启

#![cfg_attr(not(feature = "std"), no_std)]

pub use pallet::*;

pub mod weights;
pub use weights::WeightInfo;

pub mod runtime_api;
pub mod types;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

use pallet_saju_common::LOG_TARGET;

#[frame_support::pallet]
pub mod pallet {
	use super::*;
	use crate::types::{BoundError, ReportJob, StoredOverride};
	use frame_support::pallet_prelude::*;
	use frame_system::pallet_prelude::*;
	use pallet_saju_common::{
		is_known_pattern, JobState, JobStatus, JobStatusSource, SuggestionKey, SuggestionOverride, SuggestionSource,
		SuggestionTriple,
	};
	use sp_std::{collections::btree_set::BTreeSet, prelude::*};

	/// Pallet 配置 Trait
	#[pallet::config]
	pub trait Config: frame_system::Config<RuntimeEvent: From<Event<Self>>> {
		/// 权重信息
		type WeightInfo: WeightInfo;

		/// 审核员权限（提交/撤销修正建议）
		type ReviewerOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		/// 工作节点权限（上报任务进度与结果）
		type WorkerOrigin: EnsureOrigin<Self::RuntimeOrigin>;

		/// 修正建议复合键最大长度
		#[pallet::constant]
		type MaxKeyLen: Get<u32>;

		/// 修正理由最大长度
		#[pallet::constant]
		type MaxReasonLen: Get<u32>;

		/// 单个角色名最大长度
		#[pallet::constant]
		type MaxRoleLen: Get<u32>;

		/// 每个层级最多角色数
		#[pallet::constant]
		type MaxRolesPerTier: Get<u32>;

		/// 任务进度消息最大长度
		#[pallet::constant]
		type MaxMessageLen: Get<u32>;

		/// 每个账户最多保留的任务数
		#[pallet::constant]
		type MaxJobsPerAccount: Get<u32>;
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	// 类型别名
	pub type SuggestionKeyOf<T> = BoundedVec<u8, <T as Config>::MaxKeyLen>;
	pub type StoredOverrideOf<T> = StoredOverride<
		BoundedVec<u8, <T as Config>::MaxReasonLen>,
		BoundedVec<BoundedVec<u8, <T as Config>::MaxRoleLen>, <T as Config>::MaxRolesPerTier>,
	>;
	pub type MessageOf<T> = BoundedVec<u8, <T as Config>::MaxMessageLen>;
	pub type ReportJobOf<T> =
		ReportJob<<T as frame_system::Config>::AccountId, BlockNumberFor<T>, MessageOf<T>>;

	/// 存储映射: 复合键 `type:pattern:target:code` -> 修正建议
	#[pallet::storage]
	pub type Suggestions<T: Config> = StorageMap<_, Blake2_128Concat, SuggestionKeyOf<T>, StoredOverrideOf<T>>;

	/// 下一个任务ID计数器
	#[pallet::storage]
	pub type NextJobId<T: Config> = StorageValue<_, u64, ValueQuery>;

	/// 存储映射: 任务ID -> 任务详情
	#[pallet::storage]
	pub type Jobs<T: Config> = StorageMap<_, Blake2_128Concat, u64, ReportJobOf<T>>;

	/// 存储映射: 用户 -> 任务ID列表
	#[pallet::storage]
	pub type UserJobs<T: Config> =
		StorageMap<_, Blake2_128Concat, T::AccountId, BoundedVec<u64, T::MaxJobsPerAccount>, ValueQuery>;

	/// 创世修正建议
	#[pallet::genesis_config]
	#[derive(frame_support::DefaultNoBound)]
	pub struct GenesisConfig<T: Config> {
		/// (类型, 格局名, 目标字, 记录标识, 修正)
		pub suggestions: Vec<(Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>, SuggestionOverride)>,
		#[serde(skip)]
		pub _config: core::marker::PhantomData<T>,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			for (suggestion_type, pattern_name, target_char, code, suggestion) in &self.suggestions {
				let entry = Pallet::<T>::bounded_key(suggestion_type, pattern_name, target_char, code)
					.and_then(|key| Pallet::<T>::bound_override(suggestion.clone()).map(|stored| (key, stored)));
				match entry {
					Ok((key, stored)) => Suggestions::<T>::insert(key, stored),
					Err(e) => log::error!(target: LOG_TARGET, "genesis suggestion skipped: {:?}", e),
				}
			}
		}
	}

	/// Pallet 事件
	#[pallet::event]
	#[pallet::generate_deposit(pub(super) fn deposit_event)]
	pub enum Event<T: Config> {
		/// 修正建议已登记 [复合键]
		SuggestionSubmitted { key: SuggestionKeyOf<T> },
		/// 修正建议已撤销 [复合键]
		SuggestionRevoked { key: SuggestionKeyOf<T> },
		/// 生成任务已创建 [任务ID, 所有者, 命盘ID, 章节]
		GenerationStarted { job_id: u64, owner: T::AccountId, chart_id: u64, chapter: Option<u8> },
		/// 生成进度 [任务ID, 进度]
		GenerationProgress { job_id: u64, progress: u8 },
		/// 生成完成 [任务ID]
		GenerationCompleted { job_id: u64 },
		/// 生成失败 [任务ID]
		GenerationFailed { job_id: u64 },
		/// 失败任务已重启 [原任务ID, 新任务ID]
		GenerationRestarted { job_id: u64, new_job_id: u64 },
		/// 任务记录已清理 [任务ID]
		GenerationCleared { job_id: u64 },
	}

	/// Pallet 错误
	#[pallet::error]
	pub enum Error<T> {
		/// 格局名缺失或为 "unknown"
		MissingPatternName,
		/// 复合键有空段
		IncompleteKey,
		/// 复合键过长
		KeyTooLong,
		/// 修正建议没有任何字段
		EmptySuggestion,
		/// 修正理由过长
		ReasonTooLong,
		/// 某个层级角色过多
		TooManyRoles,
		/// 角色名过长
		RoleTooLong,
		/// 修正建议未找到
		SuggestionNotFound,
		/// 任务未找到
		JobNotFound,
		/// 非任务所有者
		NotJobOwner,
		/// 任务已完成或已失败
		JobAlreadyFinished,
		/// 任务尚未结束
		JobNotFinished,
		/// 只有失败的任务可以重启
		JobNotFailed,
		/// 进度超过 100
		InvalidProgress,
		/// 进度回退
		ProgressRegressed,
		/// 进度消息过长
		MessageTooLong,
		/// 任务数量过多
		TooManyJobs,
		/// 任务ID已达到最大值
		JobIdOverflow,
	}

	impl<T> From<BoundError> for Error<T> {
		fn from(e: BoundError) -> Self {
			match e {
				BoundError::ReasonTooLong => Error::<T>::ReasonTooLong,
				BoundError::TooManyRoles => Error::<T>::TooManyRoles,
				BoundError::RoleTooLong => Error::<T>::RoleTooLong,
			}
		}
	}

	/// Pallet 可调用函数
	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// 登记修正建议（同键覆盖）
		///
		/// # 参数
		///
		/// - `origin`: 审核员
		/// - `suggestion_type` / `pattern_name` / `target_char` / `code`: 复合键四段，均不可为空，
		///   格局名不可为 "unknown"
		/// - `suggestion`: 修正内容，至少包含一个字段
		#[pallet::call_index(0)]
		#[pallet::weight(T::WeightInfo::submit_suggestion())]
		pub fn submit_suggestion(
			origin: OriginFor<T>,
			suggestion_type: Vec<u8>,
			pattern_name: Vec<u8>,
			target_char: Vec<u8>,
			code: Vec<u8>,
			suggestion: SuggestionOverride,
		) -> DispatchResult {
			T::ReviewerOrigin::ensure_origin(origin)?;

			let key = Self::bounded_key(&suggestion_type, &pattern_name, &target_char, &code)?;
			let stored = Self::bound_override(suggestion)?;
			Suggestions::<T>::insert(&key, stored);

			log::info!(target: LOG_TARGET, "suggestion stored: {:?}", core::str::from_utf8(&key));
			Self::deposit_event(Event::SuggestionSubmitted { key });
			Ok(())
		}

		/// 撤销修正建议
		#[pallet::call_index(1)]
		#[pallet::weight(T::WeightInfo::revoke_suggestion())]
		pub fn revoke_suggestion(
			origin: OriginFor<T>,
			suggestion_type: Vec<u8>,
			pattern_name: Vec<u8>,
			target_char: Vec<u8>,
			code: Vec<u8>,
		) -> DispatchResult {
			T::ReviewerOrigin::ensure_origin(origin)?;

			let key = Self::bounded_key(&suggestion_type, &pattern_name, &target_char, &code)?;
			ensure!(Suggestions::<T>::contains_key(&key), Error::<T>::SuggestionNotFound);
			Suggestions::<T>::remove(&key);

			log::info!(target: LOG_TARGET, "suggestion revoked: {:?}", core::str::from_utf8(&key));
			Self::deposit_event(Event::SuggestionRevoked { key });
			Ok(())
		}

		/// 发起报告生成任务
		///
		/// - `chart_id`: 命盘 ID
		/// - `chapter`: 章节（None 表示整份报告）
		#[pallet::call_index(10)]
		#[pallet::weight(T::WeightInfo::start_generation())]
		pub fn start_generation(origin: OriginFor<T>, chart_id: u64, chapter: Option<u8>) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let job_id = Self::create_job(&who, chart_id, chapter, None)?;

			log::info!(target: LOG_TARGET, "job {} started for chart {}", job_id, chart_id);
			Self::deposit_event(Event::GenerationStarted { job_id, owner: who, chart_id, chapter });
			Ok(())
		}

		/// 上报进度（工作节点调用），任务进入 Running
		#[pallet::call_index(11)]
		#[pallet::weight(T::WeightInfo::report_progress())]
		pub fn report_progress(origin: OriginFor<T>, job_id: u64, progress: u8, message: Vec<u8>) -> DispatchResult {
			T::WorkerOrigin::ensure_origin(origin)?;
			ensure!(progress <= 100, Error::<T>::InvalidProgress);
			let message: MessageOf<T> = message.try_into().map_err(|_| Error::<T>::MessageTooLong)?;

			Self::update_job(job_id, |job| {
				ensure!(progress >= job.progress, Error::<T>::ProgressRegressed);
				job.state = JobState::Running;
				job.progress = progress;
				job.message = message;
				Ok(())
			})?;

			log::debug!(target: LOG_TARGET, "job {} at {}%", job_id, progress);
			Self::deposit_event(Event::GenerationProgress { job_id, progress });
			Ok(())
		}

		/// 标记完成（工作节点调用），进度置为 100
		#[pallet::call_index(12)]
		#[pallet::weight(T::WeightInfo::complete_generation())]
		pub fn complete_generation(origin: OriginFor<T>, job_id: u64, message: Vec<u8>) -> DispatchResult {
			T::WorkerOrigin::ensure_origin(origin)?;
			let message: MessageOf<T> = message.try_into().map_err(|_| Error::<T>::MessageTooLong)?;

			Self::update_job(job_id, |job| {
				job.state = JobState::Completed;
				job.progress = 100;
				job.message = message;
				Ok(())
			})?;

			log::info!(target: LOG_TARGET, "job {} completed", job_id);
			Self::deposit_event(Event::GenerationCompleted { job_id });
			Ok(())
		}

		/// 标记失败（工作节点调用），保留失败时的进度
		#[pallet::call_index(13)]
		#[pallet::weight(T::WeightInfo::fail_generation())]
		pub fn fail_generation(origin: OriginFor<T>, job_id: u64, reason: Vec<u8>) -> DispatchResult {
			T::WorkerOrigin::ensure_origin(origin)?;
			let reason: MessageOf<T> = reason.try_into().map_err(|_| Error::<T>::MessageTooLong)?;

			Self::update_job(job_id, |job| {
				job.state = JobState::Failed;
				job.message = reason;
				Ok(())
			})?;

			log::warn!(target: LOG_TARGET, "job {} failed", job_id);
			Self::deposit_event(Event::GenerationFailed { job_id });
			Ok(())
		}

		/// 重启失败的任务，生成新的任务 ID，原任务保持 Failed
		#[pallet::call_index(14)]
		#[pallet::weight(T::WeightInfo::restart_generation())]
		pub fn restart_generation(origin: OriginFor<T>, job_id: u64) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let job = Jobs::<T>::get(job_id).ok_or(Error::<T>::JobNotFound)?;
			ensure!(job.owner == who, Error::<T>::NotJobOwner);
			ensure!(job.state == JobState::Failed, Error::<T>::JobNotFailed);

			let new_job_id = Self::create_job(&who, job.chart_id, job.chapter, Some(job_id))?;

			log::info!(target: LOG_TARGET, "job {} restarted as {}", job_id, new_job_id);
			Self::deposit_event(Event::GenerationRestarted { job_id, new_job_id });
			Ok(())
		}

		/// 清理已结束的任务记录，释放账户的任务配额
		#[pallet::call_index(15)]
		#[pallet::weight(T::WeightInfo::clear_generation())]
		pub fn clear_generation(origin: OriginFor<T>, job_id: u64) -> DispatchResult {
			let who = ensure_signed(origin)?;

			let job = Jobs::<T>::get(job_id).ok_or(Error::<T>::JobNotFound)?;
			ensure!(job.owner == who, Error::<T>::NotJobOwner);
			ensure!(job.state.is_terminal(), Error::<T>::JobNotFinished);

			Jobs::<T>::remove(job_id);
			UserJobs::<T>::mutate(&who, |jobs| jobs.retain(|id| *id != job_id));

			Self::deposit_event(Event::GenerationCleared { job_id });
			Ok(())
		}
	}

	impl<T: Config> Pallet<T> {
		/// 批量查询修正建议，只返回找到的条目（重复的键只返回一次）
		///
		/// 格局名缺失或为 "unknown" 时不做查询。
		pub fn batch_overrides(
			pattern_name: &[u8],
			triples: &[SuggestionTriple],
		) -> Vec<(SuggestionKey, SuggestionOverride)> {
			if !is_known_pattern(pattern_name) {
				return Vec::new();
			}
			let mut seen: BTreeSet<SuggestionKey> = BTreeSet::new();
			let mut found: Vec<(SuggestionKey, SuggestionOverride)> = Vec::new();
			for triple in triples {
				let Some(key) = SuggestionKey::for_triple(Some(pattern_name), triple) else {
					continue;
				};
				if !seen.insert(key.clone()) {
					continue;
				}
				let Ok(bounded) = SuggestionKeyOf::<T>::try_from(key.0.clone()) else {
					continue;
				};
				if let Some(stored) = Suggestions::<T>::get(&bounded) {
					found.push((key, stored.into_override()));
				}
			}
			found
		}

		/// 任务状态快照
		pub fn job_status(job_id: u64) -> Option<JobStatus> {
			Jobs::<T>::get(job_id).map(|job| job.status())
		}

		fn bounded_key(
			suggestion_type: &[u8],
			pattern_name: &[u8],
			target_char: &[u8],
			code: &[u8],
		) -> Result<SuggestionKeyOf<T>, Error<T>> {
			ensure!(is_known_pattern(pattern_name), Error::<T>::MissingPatternName);
			let key = SuggestionKey::new(suggestion_type, Some(pattern_name), target_char, code)
				.ok_or(Error::<T>::IncompleteKey)?;
			key.0.try_into().map_err(|_| Error::<T>::KeyTooLong)
		}

		fn bound_override(suggestion: SuggestionOverride) -> Result<StoredOverrideOf<T>, Error<T>> {
			ensure!(
				suggestion.suggested_result.is_some() ||
					suggestion.suggested_reason.is_some() ||
					suggestion.suggested_roles.is_some(),
				Error::<T>::EmptySuggestion
			);
			Ok(StoredOverrideOf::<T>::try_from_override(suggestion)?)
		}

		fn create_job(
			owner: &T::AccountId,
			chart_id: u64,
			chapter: Option<u8>,
			restarted_from: Option<u64>,
		) -> Result<u64, DispatchError> {
			let job_id = NextJobId::<T>::get();
			let next = job_id.checked_add(1).ok_or(Error::<T>::JobIdOverflow)?;

			UserJobs::<T>::try_mutate(owner, |jobs| jobs.try_push(job_id).map_err(|_| Error::<T>::TooManyJobs))?;

			let now = frame_system::Pallet::<T>::block_number();
			Jobs::<T>::insert(
				job_id,
				ReportJob {
					owner: owner.clone(),
					chart_id,
					chapter,
					state: JobState::Pending,
					progress: 0,
					message: Default::default(),
					created_at: now,
					updated_at: now,
					restarted_from,
				},
			);
			NextJobId::<T>::put(next);
			Ok(job_id)
		}

		/// 修改未结束的任务，结束后的任务一律拒绝
		fn update_job(
			job_id: u64,
			f: impl FnOnce(&mut ReportJobOf<T>) -> Result<(), Error<T>>,
		) -> DispatchResult {
			Jobs::<T>::try_mutate(job_id, |maybe_job| -> DispatchResult {
				let job = maybe_job.as_mut().ok_or(Error::<T>::JobNotFound)?;
				ensure!(!job.state.is_terminal(), Error::<T>::JobAlreadyFinished);
				f(job)?;
				job.updated_at = frame_system::Pallet::<T>::block_number();
				Ok(())
			})
		}
	}

	/// 以本模块的登记表作为引擎的外部协作者
	pub struct RegistrySource<T>(core::marker::PhantomData<T>);

	impl<T> Default for RegistrySource<T> {
		fn default() -> Self {
			Self(core::marker::PhantomData)
		}
	}

	impl<T: Config> SuggestionSource for RegistrySource<T> {
		type Error = core::convert::Infallible;

		fn batch_lookup(
			&self,
			pattern_name: &[u8],
			triples: &[SuggestionTriple],
		) -> Result<Vec<(SuggestionKey, SuggestionOverride)>, Self::Error> {
			Ok(Pallet::<T>::batch_overrides(pattern_name, triples))
		}
	}

	impl<T: Config> JobStatusSource for RegistrySource<T> {
		type Error = Error<T>;

		fn job_status(&self, job_id: u64) -> Result<JobStatus, Self::Error> {
			Pallet::<T>::job_status(job_id).ok_or(Error::<T>::JobNotFound)
		}
	}
}
