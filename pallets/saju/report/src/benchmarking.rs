//! # Saju Report Pallet Benchmarking
//!
//! 报告模块基准测试

#![cfg(feature = "runtime-benchmarks")]

use super::*;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;
use pallet::*;
use pallet_saju_common::{OutcomeResult, RoleTiers, SuggestionOverride};
use sp_std::prelude::*;

fn sample_override() -> SuggestionOverride {
	SuggestionOverride {
		suggested_result: Some(OutcomeResult::Failure),
		suggested_reason: Some(b"reviewed".to_vec()),
		suggested_roles: Some(RoleTiers { first: vec![b"officer".to_vec()], ..Default::default() }),
	}
}

fn sample_key<T: Config>() -> Result<SuggestionKeyOf<T>, BenchmarkError> {
	b"outcome:pattern:T:code".to_vec().try_into().map_err(|_| BenchmarkError::Weightless)
}

fn start_job<T: Config>(owner: &T::AccountId) -> Result<u64, BenchmarkError> {
	let job_id = NextJobId::<T>::get();
	Pallet::<T>::start_generation(RawOrigin::Signed(owner.clone()).into(), 1, None)?;
	Ok(job_id)
}

#[benchmarks]
mod benchmarks {
	use super::*;

	#[benchmark]
	fn submit_suggestion() -> Result<(), BenchmarkError> {
		let origin = T::ReviewerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

		#[extrinsic_call]
		_(
			origin as T::RuntimeOrigin,
			b"outcome".to_vec(),
			b"pattern".to_vec(),
			b"T".to_vec(),
			b"code".to_vec(),
			sample_override(),
		);

		assert!(Suggestions::<T>::contains_key(sample_key::<T>()?));
		Ok(())
	}

	#[benchmark]
	fn revoke_suggestion() -> Result<(), BenchmarkError> {
		let origin = T::ReviewerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		Pallet::<T>::submit_suggestion(
			origin.clone(),
			b"outcome".to_vec(),
			b"pattern".to_vec(),
			b"T".to_vec(),
			b"code".to_vec(),
			sample_override(),
		)?;

		#[extrinsic_call]
		_(origin as T::RuntimeOrigin, b"outcome".to_vec(), b"pattern".to_vec(), b"T".to_vec(), b"code".to_vec());

		assert!(!Suggestions::<T>::contains_key(sample_key::<T>()?));
		Ok(())
	}

	#[benchmark]
	fn start_generation() {
		let caller: T::AccountId = whitelisted_caller();

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), 1, Some(1));
	}

	#[benchmark]
	fn report_progress() -> Result<(), BenchmarkError> {
		let caller: T::AccountId = whitelisted_caller();
		let job_id = start_job::<T>(&caller)?;
		let worker = T::WorkerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

		#[extrinsic_call]
		_(worker as T::RuntimeOrigin, job_id, 50, b"chapter".to_vec());

		Ok(())
	}

	#[benchmark]
	fn complete_generation() -> Result<(), BenchmarkError> {
		let caller: T::AccountId = whitelisted_caller();
		let job_id = start_job::<T>(&caller)?;
		let worker = T::WorkerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

		#[extrinsic_call]
		_(worker as T::RuntimeOrigin, job_id, b"done".to_vec());

		Ok(())
	}

	#[benchmark]
	fn fail_generation() -> Result<(), BenchmarkError> {
		let caller: T::AccountId = whitelisted_caller();
		let job_id = start_job::<T>(&caller)?;
		let worker = T::WorkerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;

		#[extrinsic_call]
		_(worker as T::RuntimeOrigin, job_id, b"failed".to_vec());

		Ok(())
	}

	#[benchmark]
	fn restart_generation() -> Result<(), BenchmarkError> {
		let caller: T::AccountId = whitelisted_caller();
		let job_id = start_job::<T>(&caller)?;
		let worker = T::WorkerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		Pallet::<T>::fail_generation(worker, job_id, Vec::new())?;

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), job_id);

		Ok(())
	}

	#[benchmark]
	fn clear_generation() -> Result<(), BenchmarkError> {
		let caller: T::AccountId = whitelisted_caller();
		let job_id = start_job::<T>(&caller)?;
		let worker = T::WorkerOrigin::try_successful_origin().map_err(|_| BenchmarkError::Weightless)?;
		Pallet::<T>::complete_generation(worker, job_id, Vec::new())?;

		#[extrinsic_call]
		_(RawOrigin::Signed(caller), job_id);

		assert!(Jobs::<T>::get(job_id).is_none());
		Ok(())
	}

	impl_benchmark_test_suite!(Pallet, crate::mock::new_test_ext(), crate::mock::Test);
}
