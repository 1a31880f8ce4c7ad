//! # 十神
//!
//! 以日干为参照，按五行生克与阴阳异同判定目标天干/地支的十神。
//!
//! ```text
//! elem_diff = (目标五行 - 参照五行 + 5) % 5
//!   0 → 比劫（同我）
//!   1 → 食伤（我生）
//!   2 → 财星（我克）
//!   3 → 官杀（克我）
//!   4 → 印星（生我）
//! 阴阳相同取"偏"（比肩/食神/偏财/偏官/偏印），相异取"正"（劫财/伤官/正财/正官/正印）
//! ```

use crate::constants::DAY_MASTER_LABEL;
use crate::error::EngineError;
use crate::types::{DiZhi, TianGan};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 十神大类
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenGodCategory {
    /// 比劫
    Peer = 0,
    /// 食伤
    Output = 1,
    /// 财星
    Wealth = 2,
    /// 官杀
    Officer = 3,
    /// 印星
    Resource = 4,
}

/// 十神
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Hash, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShiShen {
    /// 比肩（同我、同阴阳）
    BiJian = 0,
    /// 劫财
    JieCai = 1,
    /// 食神（我生、同阴阳）
    ShiShen = 2,
    /// 伤官
    ShangGuan = 3,
    /// 偏财（我克、同阴阳）
    PianCai = 4,
    /// 正财
    ZhengCai = 5,
    /// 偏官（克我、同阴阳）
    PianGuan = 6,
    /// 正官
    ZhengGuan = 7,
    /// 偏印（生我、同阴阳）
    PianYin = 8,
    /// 正印
    ZhengYin = 9,
}

impl ShiShen {
    pub const ALL: [ShiShen; 10] = [
        ShiShen::BiJian,
        ShiShen::JieCai,
        ShiShen::ShiShen,
        ShiShen::ShangGuan,
        ShiShen::PianCai,
        ShiShen::ZhengCai,
        ShiShen::PianGuan,
        ShiShen::ZhengGuan,
        ShiShen::PianYin,
        ShiShen::ZhengYin,
    ];

    pub fn category(self) -> TenGodCategory {
        match (self as u8) / 2 {
            0 => TenGodCategory::Peer,
            1 => TenGodCategory::Output,
            2 => TenGodCategory::Wealth,
            3 => TenGodCategory::Officer,
            _ => TenGodCategory::Resource,
        }
    }

    /// 与参照阴阳相同
    pub fn is_same_polarity(self) -> bool {
        (self as u8) % 2 == 0
    }

    /// 韩文名称
    pub fn label(self) -> &'static str {
        match self {
            ShiShen::BiJian => "비견",
            ShiShen::JieCai => "겁재",
            ShiShen::ShiShen => "식신",
            ShiShen::ShangGuan => "상관",
            ShiShen::PianCai => "편재",
            ShiShen::ZhengCai => "정재",
            ShiShen::PianGuan => "편관",
            ShiShen::ZhengGuan => "정관",
            ShiShen::PianYin => "편인",
            ShiShen::ZhengYin => "정인",
        }
    }
}

/// 命盘内某个字相对日干的关系
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relation {
    /// 日干自身，是参照点而非十神
    DayMaster,
    TenGod(ShiShen),
}

impl Relation {
    pub fn label(self) -> &'static str {
        match self {
            Relation::DayMaster => DAY_MASTER_LABEL,
            Relation::TenGod(shishen) => shishen.label(),
        }
    }
}

/// 天干对天干的十神
pub fn classify_stem(reference: TianGan, target: TianGan) -> ShiShen {
    let elem_diff = (target.element().index() + 5 - reference.element().index()) % 5;
    let same = reference.polarity() == target.polarity();
    ShiShen::ALL[(elem_diff * 2 + if same { 0 } else { 1 }) as usize]
}

/// 按原始索引判定，越界返回 `UnknownStem`，不会静默给出默认值
pub fn classify_stem_index(reference: u8, target: u8) -> Result<ShiShen, EngineError> {
    Ok(classify_stem(TianGan::from_index(reference)?, TianGan::from_index(target)?))
}

/// 天干对地支：先取地支本气，再按天干判定
pub fn classify_branch(reference: TianGan, target: DiZhi) -> ShiShen {
    classify_stem(reference, target.root_stem())
}

// ===== 单元测试 =====
