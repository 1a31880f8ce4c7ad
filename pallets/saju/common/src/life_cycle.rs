//! # 十二运星 / 十二神煞
//!
//! 两张固定查表。越界查询返回 `None`，由展示层显示 "—"。

use crate::constants::{MISSING_LABEL, TWELVE_SPIRIT_TABLE, TWELVE_STAGE_TABLE};
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;

/// 十二运星（12운성）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwelveStage {
    /// 长生
    ChangSheng = 0,
    /// 沐浴
    MuYu = 1,
    /// 冠带
    GuanDai = 2,
    /// 临官（建禄）
    LinGuan = 3,
    /// 帝旺
    DiWang = 4,
    /// 衰
    Shuai = 5,
    /// 病
    Bing = 6,
    /// 死
    Si = 7,
    /// 墓
    Mu = 8,
    /// 绝
    Jue = 9,
    /// 胎
    Tai = 10,
    /// 养
    Yang = 11,
}

impl TwelveStage {
    pub fn label(self) -> &'static str {
        match self {
            TwelveStage::ChangSheng => "장생",
            TwelveStage::MuYu => "목욕",
            TwelveStage::GuanDai => "관대",
            TwelveStage::LinGuan => "건록",
            TwelveStage::DiWang => "제왕",
            TwelveStage::Shuai => "쇠",
            TwelveStage::Bing => "병",
            TwelveStage::Si => "사",
            TwelveStage::Mu => "묘",
            TwelveStage::Jue => "절",
            TwelveStage::Tai => "태",
            TwelveStage::Yang => "양",
        }
    }
}

/// 十二神煞（12신살）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TwelveSpirit {
    /// 劫煞
    JieSha = 0,
    /// 灾煞
    ZaiSha = 1,
    /// 天煞
    TianSha = 2,
    /// 地煞
    DiSha = 3,
    /// 年煞（桃花）
    NianSha = 4,
    /// 月煞
    YueSha = 5,
    /// 亡神
    WangShen = 6,
    /// 将星
    JiangXing = 7,
    /// 攀鞍
    PanAn = 8,
    /// 驿马
    YiMa = 9,
    /// 六害
    LiuHai = 10,
    /// 华盖
    HuaGai = 11,
}

impl TwelveSpirit {
    pub fn label(self) -> &'static str {
        match self {
            TwelveSpirit::JieSha => "겁살",
            TwelveSpirit::ZaiSha => "재살",
            TwelveSpirit::TianSha => "천살",
            TwelveSpirit::DiSha => "지살",
            TwelveSpirit::NianSha => "연살",
            TwelveSpirit::YueSha => "월살",
            TwelveSpirit::WangShen => "망신살",
            TwelveSpirit::JiangXing => "장성살",
            TwelveSpirit::PanAn => "반안살",
            TwelveSpirit::YiMa => "역마살",
            TwelveSpirit::LiuHai => "육해살",
            TwelveSpirit::HuaGai => "화개살",
        }
    }
}

/// 天干在某地支上的十二运星
pub fn twelve_stage(stem_index: u8, branch_index: u8) -> Option<TwelveStage> {
    TWELVE_STAGE_TABLE
        .get(stem_index as usize)
        .and_then(|row| row.get(branch_index as usize))
        .copied()
}

/// 以参照地支（日支）看目标地支的十二神煞
pub fn twelve_spirit(reference_branch_index: u8, branch_index: u8) -> Option<TwelveSpirit> {
    TWELVE_SPIRIT_TABLE
        .get(reference_branch_index as usize)
        .and_then(|row| row.get(branch_index as usize))
        .copied()
}

/// 可带标签的查表结果
pub trait Labelled {
    fn text(&self) -> &'static str;
}

impl Labelled for TwelveStage {
    fn text(&self) -> &'static str {
        self.label()
    }
}

impl Labelled for TwelveSpirit {
    fn text(&self) -> &'static str {
        self.label()
    }
}

/// 查表缺失显示 "—"
pub fn display_label<L: Labelled>(entry: Option<L>) -> &'static str {
    entry.map(|e| e.text()).unwrap_or(MISSING_LABEL)
}

// ===== 单元测试 =====

#[cfg(test)]
mod tests {
    use super::*;

    /// 十二运星标准数据（行：甲…癸；列：子…亥）
    const CANONICAL_STAGES: [[&str; 12]; 10] = [
        ["목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양", "장생"],
        ["병", "쇠", "제왕", "건록", "관대", "목욕", "장생", "양", "태", "절", "묘", "사"],
        ["태", "양", "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절"],
        ["절", "묘", "사", "병", "쇠", "제왕", "건록", "관대", "목욕", "장생", "양", "태"],
        ["태", "양", "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절"],
        ["절", "묘", "사", "병", "쇠", "제왕", "건록", "관대", "목욕", "장생", "양", "태"],
        ["사", "묘", "절", "태", "양", "장생", "목욕", "관대", "건록", "제왕", "쇠", "병"],
        ["장생", "양", "태", "절", "묘", "사", "병", "쇠", "제왕", "건록", "관대", "목욕"],
        ["제왕", "쇠", "병", "사", "묘", "절", "태", "양", "장생", "목욕", "관대", "건록"],
        ["건록", "관대", "목욕", "장생", "양", "태", "절", "묘", "사", "병", "쇠", "제왕"],
    ];

    /// 十二神煞标准数据（行：参照地支子…亥；列：目标地支子…亥）
    const CANONICAL_SPIRITS: [[&str; 12]; 12] = [
        ["장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살"],
        ["육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살"],
        ["재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살"],
        ["연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살"],
        ["장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살"],
        ["육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살"],
        ["재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살"],
        ["연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살"],
        ["장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살"],
        ["육해살", "화개살", "겁살", "재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살"],
        ["재살", "천살", "지살", "연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살"],
        ["연살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살", "화개살", "겁살", "재살", "천살", "지살"],
    ];

    #[test]
    fn stage_table_matches_canonical_dataset() {
        for stem in 0..10u8 {
            for branch in 0..12u8 {
                let entry = twelve_stage(stem, branch).expect("in domain");
                assert_eq!(
                    entry.label(),
                    CANONICAL_STAGES[stem as usize][branch as usize],
                    "stem {} branch {}",
                    stem,
                    branch
                );
            }
        }
    }

    #[test]
    fn spirit_table_matches_canonical_dataset() {
        for reference in 0..12u8 {
            for branch in 0..12u8 {
                let entry = twelve_spirit(reference, branch).expect("in domain");
                assert_eq!(
                    entry.label(),
                    CANONICAL_SPIRITS[reference as usize][branch as usize],
                    "reference {} branch {}",
                    reference,
                    branch
                );
            }
        }
    }

    #[test]
    fn every_row_is_a_permutation() {
        for row in TWELVE_STAGE_TABLE.iter() {
            let mut seen = [false; 12];
            for stage in row {
                assert!(!seen[*stage as usize]);
                seen[*stage as usize] = true;
            }
        }
        for row in TWELVE_SPIRIT_TABLE.iter() {
            let mut seen = [false; 12];
            for spirit in row {
                assert!(!seen[*spirit as usize]);
                seen[*spirit as usize] = true;
            }
        }
    }

    #[test]
    fn out_of_domain_is_none_and_renders_dash() {
        assert_eq!(twelve_stage(10, 0), None);
        assert_eq!(twelve_stage(0, 12), None);
        assert_eq!(twelve_spirit(12, 0), None);
        assert_eq!(twelve_spirit(0, 255), None);
        assert_eq!(display_label(twelve_stage(10, 0)), "—");
        assert_eq!(display_label(twelve_spirit(0, 0)), "장성살");
        assert_eq!(display_label(twelve_stage(0, 2)), "건록");
    }
}
