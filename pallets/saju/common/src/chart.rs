//! # 命盘与大运/岁运
//!
//! 四柱命盘以日干为全盘参照点。单柱数据异常只会让该柱变成 "?" 占位，
//! 不会中断整盘；只有日柱缺失时命盘无法成立。
//!
//! 大运从月柱出发在六十甲子中顺行或逆行，每运十年；岁运嵌套在大运之内，每年一柱。

use crate::calendar::{format_ganzhi, year_ganzhi};
use crate::constants::{CYCLE_LEN, PLACEHOLDER_PILLAR};
use crate::error::EngineError;
use crate::life_cycle::{twelve_spirit, twelve_stage, TwelveSpirit, TwelveStage};
use crate::ten_god::{classify_branch, classify_stem, Relation, ShiShen};
use crate::types::{GanZhi, LuckPeriod, LuckSpan, Polarity, TianGan};
use alloc::string::String;
use codec::{Decode, DecodeWithMemTracking, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_std::prelude::*;

/// 柱位
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PillarPosition {
    Year = 0,
    Month = 1,
    Day = 2,
    Time = 3,
}

impl PillarPosition {
    pub const ALL: [PillarPosition; 4] =
        [PillarPosition::Year, PillarPosition::Month, PillarPosition::Day, PillarPosition::Time];

    pub fn label(self) -> &'static str {
        match self {
            PillarPosition::Year => "년주",
            PillarPosition::Month => "월주",
            PillarPosition::Day => "일주",
            PillarPosition::Time => "시주",
        }
    }
}

/// 命盘中的一柱，数据异常时为占位
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PillarSlot {
    Filled(GanZhi),
    Placeholder,
}

impl PillarSlot {
    pub fn ganzhi(&self) -> Option<GanZhi> {
        match self {
            PillarSlot::Filled(pillar) => Some(*pillar),
            PillarSlot::Placeholder => None,
        }
    }

    /// 干支文本，占位显示 "?"
    pub fn label(&self) -> String {
        match self {
            PillarSlot::Filled(pillar) => format_ganzhi(pillar),
            PillarSlot::Placeholder => String::from(PLACEHOLDER_PILLAR),
        }
    }
}

/// 四柱命盘
#[derive(
    Clone, Copy, Encode, Decode, DecodeWithMemTracking, TypeInfo, MaxEncodedLen, PartialEq, Eq, Debug,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SajuChart {
    /// 年、月、日、时
    pub pillars: [PillarSlot; 4],
    /// 日干，全盘十神/十二运星的参照点
    pub day_stem: TianGan,
}

impl SajuChart {
    /// 从原始 (天干, 地支) 索引构造
    ///
    /// 每柱独立校验，失败的柱记录警告后以占位代替。
    pub fn from_indices(raw: [(u8, u8); 4]) -> Result<SajuChart, EngineError> {
        Self::assemble(raw.map(|(stem, branch)| GanZhi::from_indices(stem, branch)))
    }

    /// 从干支文本构造，规则同 `from_indices`
    pub fn from_text(texts: [&str; 4]) -> Result<SajuChart, EngineError> {
        Self::assemble(texts.map(crate::calendar::parse_ganzhi))
    }

    fn assemble(built: [Result<GanZhi, EngineError>; 4]) -> Result<SajuChart, EngineError> {
        let mut pillars = [PillarSlot::Placeholder; 4];
        for (position, result) in PillarPosition::ALL.iter().zip(built) {
            match result {
                Ok(pillar) => pillars[*position as usize] = PillarSlot::Filled(pillar),
                Err(e) => {
                    log::warn!(target: crate::LOG_TARGET, "{:?} pillar replaced by placeholder: {}", position, e);
                },
            }
        }
        let day = pillars[PillarPosition::Day as usize].ganzhi().ok_or(EngineError::MissingDayPillar)?;
        Ok(SajuChart { pillars, day_stem: day.gan })
    }

    pub fn pillar(&self, position: PillarPosition) -> PillarSlot {
        self.pillars[position as usize]
    }

    /// 某柱天干相对日干的关系，日柱天干为日干本身
    pub fn stem_relation(&self, position: PillarPosition) -> Option<Relation> {
        if position == PillarPosition::Day {
            return Some(Relation::DayMaster);
        }
        let pillar = self.pillar(position).ganzhi()?;
        Some(Relation::TenGod(classify_stem(self.day_stem, pillar.gan)))
    }

    /// 某柱地支（本气）相对日干的十神
    pub fn branch_relation(&self, position: PillarPosition) -> Option<ShiShen> {
        let pillar = self.pillar(position).ganzhi()?;
        Some(classify_branch(self.day_stem, pillar.zhi))
    }

    /// 日干在某柱地支上的十二运星
    pub fn twelve_stage(&self, position: PillarPosition) -> Option<TwelveStage> {
        let pillar = self.pillar(position).ganzhi()?;
        twelve_stage(self.day_stem.index(), pillar.zhi.index())
    }

    /// 以 `reference` 柱的地支为基准，某柱地支的十二神煞
    pub fn twelve_spirit(&self, reference: PillarPosition, position: PillarPosition) -> Option<TwelveSpirit> {
        let base = self.pillar(reference).ganzhi()?;
        let pillar = self.pillar(position).ganzhi()?;
        twelve_spirit(base.zhi.index(), pillar.zhi.index())
    }
}

/// 大运方向：阳年男、阴年女顺行，其余逆行
pub fn luck_direction(year_stem: TianGan, is_male: bool) -> bool {
    (year_stem.polarity() == Polarity::Yang) == is_male
}

/// 排大运
///
/// 从月柱起按 `forward` 逐柱推进 `steps` 步，第一运从 `start_age` 起，每运十年。
pub fn decade_lucks(
    month_pillar: &GanZhi,
    forward: bool,
    start_age: u8,
    steps: u8,
    current_age: u8,
) -> Result<Vec<LuckPeriod>, EngineError> {
    let month_index = month_pillar.index()? as i16;
    let cycle = CYCLE_LEN as i16;
    let lucks = (1..=steps)
        .map(|step| {
            let delta = if forward { step as i16 } else { -(step as i16) };
            let ganzhi = GanZhi::from_cycle_index((month_index + delta).rem_euclid(cycle) as u8);
            let start_age = start_age.saturating_add((step - 1).saturating_mul(10));
            let end_age = start_age.saturating_add(9);
            LuckPeriod {
                ganzhi,
                span: LuckSpan::Decade { start_age, end_age },
                is_current: (start_age..=end_age).contains(&current_age),
            }
        })
        .collect();
    Ok(lucks)
}

/// 某个大运内的十个岁运（按周岁，`year = birth_year + age`）
///
/// 传入的不是大运时返回空表；超出 `i32` 年份范围的岁运略去。
pub fn year_lucks(decade: &LuckPeriod, birth_year: i32, current_year: i32) -> Vec<LuckPeriod> {
    let LuckSpan::Decade { start_age, end_age } = decade.span else {
        return Vec::new();
    };
    (start_age..=end_age)
        .filter_map(|age| {
            let year = birth_year.checked_add(i32::from(age))?;
            Some(LuckPeriod {
                ganzhi: year_ganzhi(year),
                span: LuckSpan::Year { year, age },
                is_current: year == current_year,
            })
        })
        .collect()
}

/// 找出某一年所属的大运
pub fn decade_for_year(decades: &[LuckPeriod], birth_year: i32, year: i32) -> Option<&LuckPeriod> {
    let age = i64::from(year) - i64::from(birth_year);
    decades.iter().find(|luck| match luck.span {
        LuckSpan::Decade { start_age, end_age } => (i64::from(start_age)..=i64::from(end_age)).contains(&age),
        LuckSpan::Year { .. } => false,
    })
}

impl LuckPeriod {
    /// 运的选择键：干支文本 + 时间范围，如 `甲子:34-43`、`甲辰:2024`
    pub fn selector_key(&self) -> String {
        let mut key = format_ganzhi(&self.ganzhi);
        key.push(':');
        match self.span {
            LuckSpan::Decade { start_age, end_age } => key.push_str(&alloc::format!("{}-{}", start_age, end_age)),
            LuckSpan::Year { year, .. } => key.push_str(&alloc::format!("{}", year)),
        }
        key
    }
}

// ===== 单元测试 =====
