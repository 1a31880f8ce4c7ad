//! # 六十甲子历法
//!
//! 干支索引、年柱推算、干支文本的格式化与解析。全部为纯函数。

use crate::constants::{CYCLE_LEN, EPOCH_YEAR};
use crate::error::EngineError;
use crate::types::{DiZhi, GanZhi, TianGan};
use alloc::string::String;
use sp_std::prelude::*;

/// 干支在六十甲子中的序号
///
/// 求唯一的 `i ∈ [0, 60)` 使 `i % 10 == 干` 且 `i % 12 == 支`。
/// 干支阴阳不符时无解，返回 `InvalidPillar`。
pub fn pillar_index(pillar: &GanZhi) -> Result<u8, EngineError> {
    let stem = pillar.gan.index();
    let branch = pillar.zhi.index();
    if stem % 2 != branch % 2 {
        return Err(EngineError::InvalidPillar { stem, branch });
    }
    // 6 ≡ 1 (mod 10)、6 ≡ 0 (mod 12)；-5 ≡ 0 (mod 10)、-5 ≡ 1 (mod 12)
    let index = (6 * stem as i16 - 5 * branch as i16).rem_euclid(CYCLE_LEN as i16);
    Ok(index as u8)
}

/// 按基准年推算某年的年柱
///
/// `offset = ((year - epoch_year) % 60 + 60) % 60`，基准年之前的年份同样成立。
pub fn ganji_for_year(year: i32, epoch_year: i32, epoch_pillar: &GanZhi) -> Result<GanZhi, EngineError> {
    let cycle = CYCLE_LEN as i64;
    let offset = ((year as i64 - epoch_year as i64) % cycle + cycle) % cycle;
    let epoch_index = pillar_index(epoch_pillar)? as i64;
    Ok(GanZhi::from_cycle_index(((epoch_index + offset) % cycle) as u8))
}

/// 以 1984 甲子年为基准的年柱
pub fn year_ganzhi(year: i32) -> GanZhi {
    let cycle = CYCLE_LEN as i64;
    let offset = ((year as i64 - EPOCH_YEAR as i64) % cycle + cycle) % cycle;
    GanZhi::from_cycle_index(offset as u8)
}

/// 干支文本：天干字 + 地支字
pub fn format_ganzhi(pillar: &GanZhi) -> String {
    let mut text = String::with_capacity(6);
    text.push(pillar.gan.glyph());
    text.push(pillar.zhi.glyph());
    text
}

/// 解析干支文本，`parse_ganzhi(&format_ganzhi(p)) == Ok(p)`
///
/// 字数不为二或某字不是干支字时返回 `MalformedGanji`
/// （`UnknownStem`/`UnknownBranch` 只用于序号越界）；阴阳不配返回 `InvalidPillar`。
pub fn parse_ganzhi(text: &str) -> Result<GanZhi, EngineError> {
    let mut chars = text.trim().chars();
    let (Some(stem), Some(branch), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(EngineError::MalformedGanji);
    };
    let gan = TianGan::from_glyph(stem).ok_or(EngineError::MalformedGanji)?;
    let zhi = DiZhi::from_glyph(branch).ok_or(EngineError::MalformedGanji)?;
    GanZhi::new(gan, zhi)
}

/// 六十甲子全表（甲子 … 癸亥）
pub fn sixty_cycle() -> Vec<GanZhi> {
    (0..CYCLE_LEN).map(GanZhi::from_cycle_index).collect()
}

// ===== 单元测试 =====

#[cfg(test)]
mod tests {
    use super::*;

    /// 六十甲子标准顺序
    const CANONICAL_CYCLE: [&str; 60] = [
        "甲子", "乙丑", "丙寅", "丁卯", "戊辰", "己巳", "庚午", "辛未", "壬申", "癸酉",
        "甲戌", "乙亥", "丙子", "丁丑", "戊寅", "己卯", "庚辰", "辛巳", "壬午", "癸未",
        "甲申", "乙酉", "丙戌", "丁亥", "戊子", "己丑", "庚寅", "辛卯", "壬辰", "癸巳",
        "甲午", "乙未", "丙申", "丁酉", "戊戌", "己亥", "庚子", "辛丑", "壬寅", "癸卯",
        "甲辰", "乙巳", "丙午", "丁未", "戊申", "己酉", "庚戌", "辛亥", "壬子", "癸丑",
        "甲寅", "乙卯", "丙辰", "丁巳", "戊午", "己未", "庚申", "辛酉", "壬戌", "癸亥",
    ];

    fn gz(text: &str) -> GanZhi {
        parse_ganzhi(text).unwrap()
    }

    #[test]
    fn cycle_matches_canonical_table() {
        let cycle = sixty_cycle();
        assert_eq!(cycle.len(), 60);
        for (i, pillar) in cycle.iter().enumerate() {
            assert_eq!(format_ganzhi(pillar), CANONICAL_CYCLE[i]);
            assert_eq!(pillar_index(pillar), Ok(i as u8));
        }
    }

    #[test]
    fn every_parity_match_has_unique_index() {
        let mut seen = Vec::new();
        for stem in TianGan::ALL {
            for branch in DiZhi::ALL {
                let pillar = GanZhi { gan: stem, zhi: branch };
                if stem.index() % 2 == branch.index() % 2 {
                    let index = pillar_index(&pillar).unwrap();
                    assert_eq!(index % 10, stem.index());
                    assert_eq!(index % 12, branch.index());
                    let text = format_ganzhi(&pillar);
                    assert_eq!(text.chars().count(), 2);
                    assert!(!seen.contains(&text));
                    seen.push(text);
                } else {
                    assert_eq!(
                        pillar_index(&pillar),
                        Err(EngineError::InvalidPillar { stem: stem.index(), branch: branch.index() })
                    );
                }
            }
        }
        assert_eq!(seen.len(), 60);
    }

    #[test]
    fn new_rejects_parity_mismatch() {
        assert!(GanZhi::new(TianGan::Jia, DiZhi::Chou).is_err());
        assert_eq!(GanZhi::from_indices(10, 0), Err(EngineError::UnknownStem(10)));
        assert_eq!(GanZhi::from_indices(0, 12), Err(EngineError::UnknownBranch(12)));
        assert_eq!(GanZhi::from_indices(2, 4).map(|p| format_ganzhi(&p)), Ok("丙辰".into()));
    }

    #[test]
    fn parse_round_trips_and_rejects_garbage() {
        for pillar in sixty_cycle() {
            assert_eq!(parse_ganzhi(&format_ganzhi(&pillar)), Ok(pillar));
        }
        assert_eq!(parse_ganzhi("甲"), Err(EngineError::MalformedGanji));
        assert_eq!(parse_ganzhi("甲子丑"), Err(EngineError::MalformedGanji));
        assert_eq!(parse_ganzhi("子甲"), Err(EngineError::MalformedGanji));
        assert_eq!(parse_ganzhi("X子"), Err(EngineError::MalformedGanji));
        assert_eq!(parse_ganzhi("甲X"), Err(EngineError::MalformedGanji));
        assert_eq!(parse_ganzhi("甲丑"), Err(EngineError::InvalidPillar { stem: 0, branch: 1 }));
        assert_eq!(parse_ganzhi(" 庚午 "), Ok(gz("庚午")));
    }

    #[test]
    fn ganji_for_year_is_periodic() {
        let epoch = gz("甲子");
        for year in [-300, -61, -1, 0, 1, 1899, 1983, 1984, 2024, 2100] {
            assert_eq!(ganji_for_year(year, 1984, &epoch), ganji_for_year(year + 60, 1984, &epoch));
            assert_eq!(ganji_for_year(year, 1984, &epoch), Ok(year_ganzhi(year)));
        }
    }

    #[test]
    fn ganji_for_year_known_years() {
        let epoch = gz("甲子");
        // 2024 = 1984 + 40 → 第 40 柱
        assert_eq!(ganji_for_year(2024, 1984, &epoch), Ok(gz(CANONICAL_CYCLE[40])));
        assert_eq!(format_ganzhi(&year_ganzhi(2024)), "甲辰");
        assert_eq!(format_ganzhi(&year_ganzhi(1983)), "癸亥");
        assert_eq!(format_ganzhi(&year_ganzhi(1900)), "庚子");
        assert_eq!(format_ganzhi(&year_ganzhi(1)), "辛酉");
    }

    #[test]
    fn ganji_for_year_with_other_epoch() {
        // 以 2000 庚辰为基准
        let epoch = gz("庚辰");
        assert_eq!(ganji_for_year(2000, 2000, &epoch), Ok(epoch));
        assert_eq!(ganji_for_year(1999, 2000, &epoch), Ok(gz("己卯")));
        assert_eq!(ganji_for_year(2024, 2000, &epoch), Ok(gz("甲辰")));
        let bad_epoch = GanZhi { gan: TianGan::Jia, zhi: DiZhi::Chou };
        assert!(ganji_for_year(2024, 2000, &bad_epoch).is_err());
    }
}
