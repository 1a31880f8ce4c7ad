//! # Saju Report Pallet Weights
//!
//! 报告模块权重定义

use frame_support::{traits::Get, weights::Weight};

/// 权重信息 Trait
pub trait WeightInfo {
    fn submit_suggestion() -> Weight;
    fn revoke_suggestion() -> Weight;
    fn start_generation() -> Weight;
    fn report_progress() -> Weight;
    fn complete_generation() -> Weight;
    fn fail_generation() -> Weight;
    fn restart_generation() -> Weight;
    fn clear_generation() -> Weight;
}

/// Substrate 权重实现
pub struct SubstrateWeight<T>(core::marker::PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for SubstrateWeight<T> {
    fn submit_suggestion() -> Weight {
        Weight::from_parts(25_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn revoke_suggestion() -> Weight {
        Weight::from_parts(20_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn start_generation() -> Weight {
        Weight::from_parts(30_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(3))
    }
    fn report_progress() -> Weight {
        Weight::from_parts(20_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn complete_generation() -> Weight {
        Weight::from_parts(20_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn fail_generation() -> Weight {
        Weight::from_parts(20_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(1))
            .saturating_add(T::DbWeight::get().writes(1))
    }
    fn restart_generation() -> Weight {
        Weight::from_parts(35_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(3))
            .saturating_add(T::DbWeight::get().writes(3))
    }
    fn clear_generation() -> Weight {
        Weight::from_parts(25_000_000, 0)
            .saturating_add(T::DbWeight::get().reads(2))
            .saturating_add(T::DbWeight::get().writes(2))
    }
}

/// 默认权重实现（用于测试）
impl WeightInfo for () {
    fn submit_suggestion() -> Weight { Weight::from_parts(25_000_000, 0) }
    fn revoke_suggestion() -> Weight { Weight::from_parts(20_000_000, 0) }
    fn start_generation() -> Weight { Weight::from_parts(30_000_000, 0) }
    fn report_progress() -> Weight { Weight::from_parts(20_000_000, 0) }
    fn complete_generation() -> Weight { Weight::from_parts(20_000_000, 0) }
    fn fail_generation() -> Weight { Weight::from_parts(20_000_000, 0) }
    fn restart_generation() -> Weight { Weight::from_parts(35_000_000, 0) }
    fn clear_generation() -> Weight { Weight::from_parts(25_000_000, 0) }
}
