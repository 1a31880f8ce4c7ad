//! 报告模块测试 Mock

use crate as pallet_saju_report;
use frame_support::{derive_impl, ord_parameter_types, traits::ConstU32};
use frame_system::{EnsureRoot, EnsureSignedBy};
use pallet_saju_common::{OutcomeResult, SuggestionOverride};
use sp_runtime::BuildStorage;

type Block = frame_system::mocking::MockBlock<Test>;

// 配置测试运行时
frame_support::construct_runtime!(
	pub enum Test {
		System: frame_system,
		SajuReport: pallet_saju_report,
	}
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
	type Block = Block;
}

ord_parameter_types! {
	pub const Worker: u64 = 9;
}

impl pallet_saju_report::Config for Test {
	type WeightInfo = ();
	type ReviewerOrigin = EnsureRoot<u64>;
	type WorkerOrigin = EnsureSignedBy<Worker, u64>;
	type MaxKeyLen = ConstU32<64>;
	type MaxReasonLen = ConstU32<64>;
	type MaxRoleLen = ConstU32<16>;
	type MaxRolesPerTier = ConstU32<4>;
	type MaxMessageLen = ConstU32<32>;
	type MaxJobsPerAccount = ConstU32<3>;
}

/// 测试账户
pub const ALICE: u64 = 1;
pub const BOB: u64 = 2;
pub const WORKER: u64 = 9;

/// 创世修正：outcome:정관격:甲:GENESIS → 실패
pub fn genesis_suggestion() -> SuggestionOverride {
	SuggestionOverride {
		suggested_result: Some(OutcomeResult::Failure),
		suggested_reason: Some("창고 충".as_bytes().to_vec()),
		suggested_roles: None,
	}
}

/// 构建测试外部环境
pub fn new_test_ext() -> sp_io::TestExternalities {
	let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();
	pallet_saju_report::GenesisConfig::<Test> {
		suggestions: vec![
			(
				b"outcome".to_vec(),
				"정관격".as_bytes().to_vec(),
				"甲".as_bytes().to_vec(),
				b"GENESIS".to_vec(),
				genesis_suggestion(),
			),
			// 格局名为 unknown，创世时跳过
			(b"outcome".to_vec(), b"unknown".to_vec(), b"X".to_vec(), b"SKIPPED".to_vec(), genesis_suggestion()),
		],
		..Default::default()
	}
	.assimilate_storage(&mut t)
	.unwrap();
	let mut ext = sp_io::TestExternalities::new(t);
	ext.execute_with(|| System::set_block_number(1));
	ext
}
