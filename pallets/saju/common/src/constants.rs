//! # 常量表
//!
//! 字形、本气、十二运星、十二神煞与评级标签。
//!
//! 十二运星/神煞两张表是逐字抄录的领域数据，不做推导计算；
//! 任何抄录错误都是静默的正确性问题，测试中以独立数据集逐格比对。

use crate::life_cycle::{TwelveSpirit, TwelveStage};
use crate::types::TianGan;

// ============================================================================
// 字形
// ============================================================================

/// 天干字形
pub const TIANGAN_GLYPHS: [char; 10] = ['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

/// 地支字形
pub const DIZHI_GLYPHS: [char; 12] = ['子', '丑', '寅', '卯', '辰', '巳', '午', '未', '申', '酉', '戌', '亥'];

/// 天干韩文读音
pub const TIANGAN_HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

/// 地支韩文读音
pub const DIZHI_HANGUL: [&str; 12] = ["자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해"];

/// 地支本气（主藏干）
///
/// 子癸 丑己 寅甲 卯乙 辰戊 巳丙 午丁 未己 申庚 酉辛 戌戊 亥壬
pub const DIZHI_ROOT_STEM: [TianGan; 12] = [
    TianGan::Gui,
    TianGan::Ji,
    TianGan::Jia,
    TianGan::Yi,
    TianGan::Wu,
    TianGan::Bing,
    TianGan::Ding,
    TianGan::Ji,
    TianGan::Geng,
    TianGan::Xin,
    TianGan::Wu,
    TianGan::Ren,
];

/// 年柱推算的默认基准：1984 年为甲子年
pub const EPOCH_YEAR: i32 = 1984;

/// 六十甲子周期长度
pub const CYCLE_LEN: u8 = 60;

// ============================================================================
// 十二运星（按天干 × 地支）
// ============================================================================

use TwelveStage::{
    ChangSheng as CS, DiWang as DW, GuanDai as GD, Jue as JU, LinGuan as LG, Mu as MU, MuYu as MY, Shuai as SH,
    Si as SI, Tai as TA, Bing as BI, Yang as YA,
};

/// 十二运星表
///
/// 行：甲乙丙丁戊己庚辛壬癸；列：子丑寅卯辰巳午未申酉戌亥
pub const TWELVE_STAGE_TABLE: [[TwelveStage; 12]; 10] = [
    // 甲
    [MY, GD, LG, DW, SH, BI, SI, MU, JU, TA, YA, CS],
    // 乙
    [BI, SH, DW, LG, GD, MY, CS, YA, TA, JU, MU, SI],
    // 丙
    [TA, YA, CS, MY, GD, LG, DW, SH, BI, SI, MU, JU],
    // 丁
    [JU, MU, SI, BI, SH, DW, LG, GD, MY, CS, YA, TA],
    // 戊
    [TA, YA, CS, MY, GD, LG, DW, SH, BI, SI, MU, JU],
    // 己
    [JU, MU, SI, BI, SH, DW, LG, GD, MY, CS, YA, TA],
    // 庚
    [SI, MU, JU, TA, YA, CS, MY, GD, LG, DW, SH, BI],
    // 辛
    [CS, YA, TA, JU, MU, SI, BI, SH, DW, LG, GD, MY],
    // 壬
    [DW, SH, BI, SI, MU, JU, TA, YA, CS, MY, GD, LG],
    // 癸
    [LG, GD, MY, CS, YA, TA, JU, MU, SI, BI, SH, DW],
];

// ============================================================================
// 十二神煞（按参照地支 × 目标地支）
// ============================================================================

use TwelveSpirit::{
    DiSha as DS, HuaGai as HG, JiangXing as JX, JieSha as JS, LiuHai as LH, NianSha as NS, PanAn as PA,
    TianSha as TS, WangShen as WS, YiMa as YM, YueSha as YS, ZaiSha as ZS,
};

/// 申子辰水局
const SPIRIT_ROW_WATER: [TwelveSpirit; 12] = [JX, PA, YM, LH, HG, JS, ZS, TS, DS, NS, YS, WS];
/// 寅午戌火局
const SPIRIT_ROW_FIRE: [TwelveSpirit; 12] = [ZS, TS, DS, NS, YS, WS, JX, PA, YM, LH, HG, JS];
/// 巳酉丑金局
const SPIRIT_ROW_METAL: [TwelveSpirit; 12] = [LH, HG, JS, ZS, TS, DS, NS, YS, WS, JX, PA, YM];
/// 亥卯未木局
const SPIRIT_ROW_WOOD: [TwelveSpirit; 12] = [NS, YS, WS, JX, PA, YM, LH, HG, JS, ZS, TS, DS];

/// 十二神煞表
///
/// 行：参照地支（日支）子丑寅卯辰巳午未申酉戌亥，按所属三合局取行；
/// 列：目标地支子丑寅卯辰巳午未申酉戌亥
pub const TWELVE_SPIRIT_TABLE: [[TwelveSpirit; 12]; 12] = [
    SPIRIT_ROW_WATER, // 子
    SPIRIT_ROW_METAL, // 丑
    SPIRIT_ROW_FIRE,  // 寅
    SPIRIT_ROW_WOOD,  // 卯
    SPIRIT_ROW_WATER, // 辰
    SPIRIT_ROW_METAL, // 巳
    SPIRIT_ROW_FIRE,  // 午
    SPIRIT_ROW_WOOD,  // 未
    SPIRIT_ROW_WATER, // 申
    SPIRIT_ROW_METAL, // 酉
    SPIRIT_ROW_FIRE,  // 戌
    SPIRIT_ROW_WOOD,  // 亥
];

// ============================================================================
// 标签
// ============================================================================

/// 评级标签，顺序与 `Rating` 判别值一致
pub const RATING_LABELS: [&str; 5] = ["◎ 대길", "○ 길", "△ 보통", "▽ 주의", "✕ 흉"];

/// 查表缺失时的占位符
pub const MISSING_LABEL: &str = "—";

/// 构造失败的柱的占位符
pub const PLACEHOLDER_PILLAR: &str = "?";

/// 日干自身的标签（不是十神）
pub const DAY_MASTER_LABEL: &str = "일간";
