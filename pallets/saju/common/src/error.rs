//! # 引擎错误
//!
//! 所有错误都只影响单个柱的构造，调用方以 "?" 占位柱替代，不会中断整盘渲染。

use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 引擎错误
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// 天干与地支阴阳不符（不构成六十甲子中的任何一柱）
    InvalidPillar { stem: u8, branch: u8 },
    /// 天干索引越界（有效范围 0-9）
    UnknownStem(u8),
    /// 地支索引越界（有效范围 0-11）
    UnknownBranch(u8),
    /// 干支文本不是"天干字 + 地支字"两个字符
    MalformedGanji,
    /// 命盘缺少日柱（日干是全盘的参照点）
    MissingDayPillar,
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::InvalidPillar { stem, branch } => {
                write!(f, "stem {} and branch {} differ in polarity", stem, branch)
            },
            EngineError::UnknownStem(index) => write!(f, "unknown stem index {}", index),
            EngineError::UnknownBranch(index) => write!(f, "unknown branch index {}", index),
            EngineError::MalformedGanji => f.write_str("ganji text must be one stem glyph followed by one branch glyph"),
            EngineError::MissingDayPillar => f.write_str("chart has no valid day pillar"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
