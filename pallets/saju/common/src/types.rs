//! # 共享类型定义
//!
//! 命盘、成败记录、评级、修正建议与任务状态的核心数据结构。

use crate::constants::{DIZHI_GLYPHS, DIZHI_HANGUL, DIZHI_ROOT_STEM, TIANGAN_GLYPHS, TIANGAN_HANGUL};
use crate::error::EngineError;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_std::prelude::*;

// ============================================================================
// 五行 / 阴阳
// ============================================================================

/// 五行（按相生顺序排列：木→火→土→金→水→木）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Element {
    Wood = 0,
    Fire = 1,
    Earth = 2,
    Metal = 3,
    Water = 4,
}

impl Element {
    pub const ALL: [Element; 5] = [Element::Wood, Element::Fire, Element::Earth, Element::Metal, Element::Water];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// 生我者在前一位，我生者在后一位，我克者在后两位
    pub fn from_index(index: u8) -> Option<Element> {
        Self::ALL.get(index as usize).copied()
    }
}

/// 阴阳
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Polarity {
    Yang = 0,
    Yin = 1,
}

// ============================================================================
// 天干 / 地支
// ============================================================================

/// 天干（甲乙丙丁戊己庚辛壬癸，索引 0-9）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TianGan {
    Jia = 0,
    Yi = 1,
    Bing = 2,
    Ding = 3,
    Wu = 4,
    Ji = 5,
    Geng = 6,
    Xin = 7,
    Ren = 8,
    Gui = 9,
}

impl TianGan {
    pub const ALL: [TianGan; 10] = [
        TianGan::Jia,
        TianGan::Yi,
        TianGan::Bing,
        TianGan::Ding,
        TianGan::Wu,
        TianGan::Ji,
        TianGan::Geng,
        TianGan::Xin,
        TianGan::Ren,
        TianGan::Gui,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// 索引越界返回 `UnknownStem`
    pub fn from_index(index: u8) -> Result<TianGan, EngineError> {
        Self::ALL.get(index as usize).copied().ok_or(EngineError::UnknownStem(index))
    }

    /// 甲乙木、丙丁火、戊己土、庚辛金、壬癸水
    pub fn element(self) -> Element {
        Element::ALL[(self as usize) / 2]
    }

    pub fn polarity(self) -> Polarity {
        if (self as u8) % 2 == 0 { Polarity::Yang } else { Polarity::Yin }
    }

    pub fn glyph(self) -> char {
        TIANGAN_GLYPHS[self as usize]
    }

    pub fn from_glyph(glyph: char) -> Option<TianGan> {
        TIANGAN_GLYPHS.iter().position(|g| *g == glyph).map(|i| Self::ALL[i])
    }

    /// 韩文读音（갑을병정…）
    pub fn hangul(self) -> &'static str {
        TIANGAN_HANGUL[self as usize]
    }
}

/// 地支（子丑寅卯辰巳午未申酉戌亥，索引 0-11）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiZhi {
    Zi = 0,
    Chou = 1,
    Yin = 2,
    Mao = 3,
    Chen = 4,
    Si = 5,
    Wu = 6,
    Wei = 7,
    Shen = 8,
    You = 9,
    Xu = 10,
    Hai = 11,
}

impl DiZhi {
    pub const ALL: [DiZhi; 12] = [
        DiZhi::Zi,
        DiZhi::Chou,
        DiZhi::Yin,
        DiZhi::Mao,
        DiZhi::Chen,
        DiZhi::Si,
        DiZhi::Wu,
        DiZhi::Wei,
        DiZhi::Shen,
        DiZhi::You,
        DiZhi::Xu,
        DiZhi::Hai,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    /// 索引越界返回 `UnknownBranch`
    pub fn from_index(index: u8) -> Result<DiZhi, EngineError> {
        Self::ALL.get(index as usize).copied().ok_or(EngineError::UnknownBranch(index))
    }

    /// 地支五行（取本气）
    pub fn element(self) -> Element {
        self.root_stem().element()
    }

    /// 本气藏干，地支参与十神判定时使用
    pub fn root_stem(self) -> TianGan {
        DIZHI_ROOT_STEM[self as usize]
    }

    pub fn glyph(self) -> char {
        DIZHI_GLYPHS[self as usize]
    }

    pub fn from_glyph(glyph: char) -> Option<DiZhi> {
        DIZHI_GLYPHS.iter().position(|g| *g == glyph).map(|i| Self::ALL[i])
    }

    /// 韩文读音（자축인묘…）
    pub fn hangul(self) -> &'static str {
        DIZHI_HANGUL[self as usize]
    }
}

/// 干支（一柱）
///
/// 有效的柱满足 `gan % 2 == zhi % 2`，共 60 种组合。
/// 通过 `GanZhi::new` 构造的值总是有效的；解码得到的值需经 `pillar_index` 校验。
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GanZhi {
    pub gan: TianGan,
    pub zhi: DiZhi,
}

impl GanZhi {
    /// 阴阳不符返回 `InvalidPillar`
    pub fn new(gan: TianGan, zhi: DiZhi) -> Result<GanZhi, EngineError> {
        let pillar = GanZhi { gan, zhi };
        crate::calendar::pillar_index(&pillar)?;
        Ok(pillar)
    }

    /// 从原始索引构造，依次校验天干、地支、阴阳
    pub fn from_indices(gan: u8, zhi: u8) -> Result<GanZhi, EngineError> {
        Self::new(TianGan::from_index(gan)?, DiZhi::from_index(zhi)?)
    }

    /// 六十甲子中的第 `index % 60` 柱
    pub fn from_cycle_index(index: u8) -> GanZhi {
        let index = index % 60;
        GanZhi {
            gan: TianGan::ALL[(index % 10) as usize],
            zhi: DiZhi::ALL[(index % 12) as usize],
        }
    }

    pub fn index(&self) -> Result<u8, EngineError> {
        crate::calendar::pillar_index(self)
    }
}

impl core::fmt::Display for GanZhi {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.gan.glyph(), self.zhi.glyph())
    }
}

// ============================================================================
// 大运 / 岁运
// ============================================================================

/// 运的时间范围
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LuckSpan {
    /// 大运：十年，按年龄区间
    Decade { start_age: u8, end_age: u8 },
    /// 岁运：一年，`age` 为当年周岁
    Year { year: i32, age: u8 },
}

/// 大运或岁运
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LuckPeriod {
    pub ganzhi: GanZhi,
    pub span: LuckSpan,
    /// 当前时刻是否落在此运内
    pub is_current: bool,
}

// ============================================================================
// 成败记录
// ============================================================================

/// 比较的一侧：天干（天）或地支（地）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeSide {
    Sky = 0,
    Earth = 1,
}

/// 成败分析所比较的对象
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeComparison {
    /// 运柱自身
    SelfPillar = 0,
    YearMonth = 1,
    MonthTime = 2,
    Year = 3,
    Day = 4,
    Time = 5,
    /// 岁运对大运
    Decade = 6,
}

/// 成败记录的命名空间，归并去重从不跨越命名空间
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeNamespace {
    pub side: OutcomeSide,
    pub comparison: OutcomeComparison,
}

impl OutcomeNamespace {
    pub const fn new(side: OutcomeSide, comparison: OutcomeComparison) -> Self {
        Self { side, comparison }
    }
}

/// 成败结果
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutcomeResult {
    /// 成
    Success = 0,
    /// 败
    Failure = 1,
    /// 成中有败
    MixedSuccessLeaningFailure = 2,
    /// 败中有成
    MixedFailureLeaningSuccess = 3,
    /// 成败共存
    Coexistence = 4,
}

impl OutcomeResult {
    /// 规范文本（上游分析使用的标识）
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeResult::Success => "success",
            OutcomeResult::Failure => "failure",
            OutcomeResult::MixedSuccessLeaningFailure => "mixed-success-leaning-failure",
            OutcomeResult::MixedFailureLeaningSuccess => "mixed-failure-leaning-success",
            OutcomeResult::Coexistence => "coexistence",
        }
    }

    /// 从结果文本识别
    ///
    /// 原文逐字匹配，不做大小写或空白归一。成/败必须完全相等
    /// （避免 "mixed-success-…" 被误判为成），两种混合结果按子串匹配，
    /// 共存按显式文本匹配。
    pub fn from_text(text: &str) -> Option<OutcomeResult> {
        match text {
            "success" | "성공" | "성격" => return Some(OutcomeResult::Success),
            "failure" | "실패" | "파격" => return Some(OutcomeResult::Failure),
            _ => {},
        }
        if text.contains("success-leaning-failure") || text.contains("성중유패") || text.contains("성중패") {
            return Some(OutcomeResult::MixedSuccessLeaningFailure);
        }
        if text.contains("failure-leaning-success") || text.contains("패중유성") || text.contains("패중성") {
            return Some(OutcomeResult::MixedFailureLeaningSuccess);
        }
        match text {
            "coexistence" | "공존" | "성패공존" => Some(OutcomeResult::Coexistence),
            _ => None,
        }
    }
}

/// 按四个层级分组的作用角色（第一层最重要）
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoleTiers {
    pub first: Vec<Vec<u8>>,
    pub second: Vec<Vec<u8>>,
    pub third: Vec<Vec<u8>>,
    pub fourth: Vec<Vec<u8>>,
}

impl RoleTiers {
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.second.is_empty() && self.third.is_empty() && self.fourth.is_empty()
    }
}

/// 一条成败记录（某个运 + 命名空间下的一次判定）
///
/// 合并记录（MergedOutcome）与原始记录同形，共享同一个 `code` 空间。
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutcomeRecord {
    /// 上游给出的不透明标识，只做相等比较
    pub code: Option<Vec<u8>>,
    pub result: OutcomeResult,
    pub reason: Vec<u8>,
    /// 涉及的结构位置
    pub positions: Option<Vec<Vec<u8>>>,
    pub roles: Option<RoleTiers>,
    /// 严重程度
    pub deep_level: Option<u8>,
    /// 是否三合
    pub is_sanhe: Option<bool>,
}

impl OutcomeRecord {
    pub fn new(code: Option<&[u8]>, result: OutcomeResult, reason: &[u8]) -> Self {
        Self {
            code: code.map(|c| c.to_vec()),
            result,
            reason: reason.to_vec(),
            positions: None,
            roles: None,
            deep_level: None,
            is_sanhe: None,
        }
    }
}

/// 合并记录与原始记录同形
pub type MergedOutcome = OutcomeRecord;

// ============================================================================
// 评级
// ============================================================================

/// 评级（五档）
///
/// 单柱视图只会从结果文本/分数得到 吉/平/凶 三档，大吉/注意只来自显式等级。
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rating {
    Excellent = 0,
    Good = 1,
    #[default]
    Neutral = 2,
    Caution = 3,
    Difficult = 4,
}

impl Rating {
    /// 面向用户的固定标签
    pub fn label(self) -> &'static str {
        crate::constants::RATING_LABELS[self as usize]
    }
}

/// 定点分数，单位为千分之一（`Score(1000)` 即 1 分）
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, PartialOrd, Ord, Debug, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Score(pub i32);

impl Score {
    /// 1 分
    pub const UNIT: i32 = 1_000;

    pub const fn from_units(units: i32) -> Score {
        Score(units.saturating_mul(Self::UNIT))
    }

    pub const fn from_milli(milli: i32) -> Score {
        Score(milli)
    }

    pub fn saturating_add(self, other: Score) -> Score {
        Score(self.0.saturating_add(other.0))
    }
}

// ============================================================================
// 修正建议
// ============================================================================

/// 批量查询中的一项（建议类型、目标字、记录标识）
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuggestionTriple {
    pub suggestion_type: Vec<u8>,
    pub target_char: Vec<u8>,
    pub code: Vec<u8>,
}

/// 修正建议的复合键：`suggestion_type:pattern_name:target_char:code`
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuggestionKey(pub Vec<u8>);

/// 审核通过的修正（只读叠加层，从不回写原记录）
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SuggestionOverride {
    pub suggested_result: Option<OutcomeResult>,
    pub suggested_reason: Option<Vec<u8>>,
    pub suggested_roles: Option<RoleTiers>,
}

/// 修正前的原值，供"原始值"审计面板展示
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OriginalValues {
    pub result: OutcomeResult,
    pub reason: Vec<u8>,
    pub roles: Option<RoleTiers>,
}

/// 最终展示的成败记录
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayOutcome {
    pub outcome: OutcomeRecord,
    pub is_modified: bool,
    /// 仅当 `is_modified` 为真时存在
    pub original: Option<OriginalValues>,
}

// ============================================================================
// 报告生成任务
// ============================================================================

/// 任务状态
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug, Default,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobState {
    #[default]
    Pending = 0,
    Running = 1,
    Completed = 2,
    Failed = 3,
}

impl JobState {
    /// 完成或失败后不再轮询
    pub fn is_terminal(self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// 一次轮询看到的任务快照
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobStatus {
    pub state: JobState,
    /// 进度 0-100
    pub progress: u8,
    pub message: Vec<u8>,
}

// ===== 单元测试 =====

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ganzhi_display_and_cycle_index() {
        let pillar = GanZhi::from_cycle_index(40);
        assert_eq!(pillar, GanZhi { gan: TianGan::Jia, zhi: DiZhi::Chen });
        assert_eq!(alloc::format!("{}", pillar), "甲辰");
        assert_eq!(GanZhi::from_cycle_index(100), pillar);
        assert_eq!(GanZhi::from_indices(0, 1), Err(EngineError::InvalidPillar { stem: 0, branch: 1 }));
        assert_eq!(GanZhi::from_indices(10, 0), Err(EngineError::UnknownStem(10)));
        assert_eq!(GanZhi::from_indices(0, 12), Err(EngineError::UnknownBranch(12)));
    }

    #[test]
    fn outcome_result_text_forms() {
        assert_eq!(OutcomeResult::from_text("success"), Some(OutcomeResult::Success));
        assert_eq!(OutcomeResult::from_text(" Success "), None);
        assert_eq!(OutcomeResult::from_text("SUCCESS"), None);
        assert_eq!(OutcomeResult::from_text("failure "), None);
        assert_eq!(OutcomeResult::from_text("성중유패"), Some(OutcomeResult::MixedSuccessLeaningFailure));
        assert_eq!(
            OutcomeResult::from_text("mixed-failure-leaning-success"),
            Some(OutcomeResult::MixedFailureLeaningSuccess)
        );
        assert_eq!(OutcomeResult::from_text("성패공존"), Some(OutcomeResult::Coexistence));
        assert_eq!(OutcomeResult::from_text("mostly success"), None);
        for result in [
            OutcomeResult::Success,
            OutcomeResult::Failure,
            OutcomeResult::MixedSuccessLeaningFailure,
            OutcomeResult::MixedFailureLeaningSuccess,
            OutcomeResult::Coexistence,
        ] {
            assert_eq!(OutcomeResult::from_text(result.as_str()), Some(result));
        }
    }

    #[test]
    fn display_outcome_serializes_to_json() {
        let display = DisplayOutcome {
            outcome: OutcomeRecord::new(Some(&b"A"[..]), OutcomeResult::Failure, b"r"),
            is_modified: false,
            original: None,
        };
        let json = serde_json::to_value(&display).unwrap();
        assert_eq!(json["is_modified"], serde_json::json!(false));
        assert_eq!(json["outcome"]["result"], serde_json::json!("Failure"));
        assert!(json["original"].is_null());
    }
}
