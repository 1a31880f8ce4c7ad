//! # 评级级联
//!
//! 把等级（degree）、结果文本（result）、分数（score）三种异构信号收敛为一个评级。
//! 级联顺序是硬性约定，两个实现对相同输入必须给出完全相同的评级：
//!
//! ```text
//! 单柱：等级 → 结果文本（吉/平/凶 三档） → 分数 → 平
//! 天地合参：合参等级 → 天/地等级 → 成败推导（五档） → 分数和 → 平
//! ```

use crate::types::{OutcomeResult, Rating, Score};
use alloc::string::String;
use codec::{Decode, DecodeWithMemTracking, Encode};
use scale_info::TypeInfo;
use sp_std::prelude::*;

/// 一柱（或一运的一侧）的原始评级信号
#[derive(Clone, Encode, Decode, DecodeWithMemTracking, TypeInfo, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PillarSignal {
    pub result: Option<Vec<u8>>,
    pub score: Option<Score>,
    pub degree: Option<Vec<u8>>,
}

impl PillarSignal {
    pub fn with_result(result: &str) -> Self {
        Self { result: Some(result.as_bytes().to_vec()), ..Default::default() }
    }

    pub fn with_score(score: Score) -> Self {
        Self { score: Some(score), ..Default::default() }
    }

    pub fn with_degree(degree: &str) -> Self {
        Self { degree: Some(degree.as_bytes().to_vec()), ..Default::default() }
    }
}

/// 单侧的成败倾向
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Lean {
    Good,
    Bad,
    Neither,
}

/// 去首尾空白并做大小写折叠
fn fold_text(text: &str) -> String {
    text.trim().to_lowercase()
}

fn as_text(bytes: &[u8]) -> Option<&str> {
    core::str::from_utf8(bytes).ok()
}

/// 等级文本 → 评级，同时接受英文与韩文同义词；无法识别时返回 `None`
pub fn degree_rating(degree: &str) -> Option<Rating> {
    match fold_text(degree).as_str() {
        "excellent" | "great" | "very good" | "very-good" | "대길" | "최상" | "아주좋음" => Some(Rating::Excellent),
        "good" | "길" | "양호" | "좋음" => Some(Rating::Good),
        "neutral" | "normal" | "보통" | "평" | "평범" => Some(Rating::Neutral),
        "caution" | "warning" | "주의" | "소흉" => Some(Rating::Caution),
        "difficult" | "bad" | "흉" | "대흉" | "나쁨" => Some(Rating::Difficult),
        _ => None,
    }
}

fn degree_of(degree: Option<&[u8]>) -> Option<Rating> {
    degree.and_then(as_text).and_then(degree_rating)
}

/// 单柱视图的结果文本档位：成 → 吉，败 → 凶，混合/共存 → 平
fn result_rating(result: Option<&[u8]>) -> Option<Rating> {
    let parsed = result.and_then(as_text).and_then(OutcomeResult::from_text)?;
    Some(match parsed {
        OutcomeResult::Success => Rating::Good,
        OutcomeResult::Failure => Rating::Difficult,
        OutcomeResult::MixedSuccessLeaningFailure
        | OutcomeResult::MixedFailureLeaningSuccess
        | OutcomeResult::Coexistence => Rating::Neutral,
    })
}

/// 单柱分数档位
///
/// `>= 1` 吉，`> 0` 平，`<= -1` 凶，其余平。`> 0` 与 `>= 1` 的不对称是既有行为。
fn single_score_rating(score: Score) -> Rating {
    if score.0 >= Score::UNIT {
        Rating::Good
    } else if score.0 > 0 {
        Rating::Neutral
    } else if score.0 <= -Score::UNIT {
        Rating::Difficult
    } else {
        Rating::Neutral
    }
}

/// 单柱评级（总是有结果）
pub fn single_rating(result: Option<&[u8]>, score: Option<Score>, degree: Option<&[u8]>) -> Rating {
    if let Some(rating) = degree_of(degree) {
        return rating;
    }
    if let Some(rating) = result_rating(result) {
        return rating;
    }
    match score {
        Some(score) => single_score_rating(score),
        None => Rating::Neutral,
    }
}

fn lean_of(result: Option<&[u8]>) -> Lean {
    match result.and_then(as_text).and_then(OutcomeResult::from_text) {
        Some(OutcomeResult::Success) => Lean::Good,
        Some(OutcomeResult::Failure) => Lean::Bad,
        _ => Lean::Neither,
    }
}

/// 成败推导档位，两侧都无成败倾向时返回 `None` 交给分数档
fn derived_rating(sky: Lean, earth: Lean) -> Option<Rating> {
    use Lean::*;
    if sky == Neither && earth == Neither {
        return None;
    }
    let rating = if sky == Good && earth == Good {
        Rating::Excellent
    } else if (sky == Good && earth != Bad) || (earth == Good && sky != Bad) {
        Rating::Good
    } else if sky == Bad && earth == Bad {
        Rating::Difficult
    } else if sky == Bad || earth == Bad {
        Rating::Caution
    } else {
        Rating::Neutral
    };
    Some(rating)
}

/// 合参分数档位：`>= 3` 大吉，`>= 1` 吉，`>= -1` 平，`>= -3` 注意，其余凶
fn combined_score_rating(total: Score) -> Rating {
    let total = total.0;
    if total >= 3 * Score::UNIT {
        Rating::Excellent
    } else if total >= Score::UNIT {
        Rating::Good
    } else if total >= -Score::UNIT {
        Rating::Neutral
    } else if total >= -3 * Score::UNIT {
        Rating::Caution
    } else {
        Rating::Difficult
    }
}

/// 天地合参评级（总是有结果）
///
/// 缺失一侧的分数按 0 计；两侧都没有分数时跳过分数档。
pub fn combined_rating(combined_degree: Option<&[u8]>, sky: &PillarSignal, earth: &PillarSignal) -> Rating {
    let degree = degree_of(combined_degree)
        .or_else(|| degree_of(sky.degree.as_deref()))
        .or_else(|| degree_of(earth.degree.as_deref()));
    if let Some(rating) = degree {
        return rating;
    }

    if let Some(rating) = derived_rating(lean_of(sky.result.as_deref()), lean_of(earth.result.as_deref())) {
        return rating;
    }

    match (sky.score, earth.score) {
        (None, None) => Rating::Neutral,
        (s, e) => combined_score_rating(s.unwrap_or_default().saturating_add(e.unwrap_or_default())),
    }
}

// ===== 单元测试 =====

#[cfg(test)]
mod tests {
    use super::*;

    fn single(result: Option<&str>, score: Option<Score>, degree: Option<&str>) -> Rating {
        single_rating(result.map(str::as_bytes), score, degree.map(str::as_bytes))
    }

    fn side(result: Option<&str>, score: Option<i32>) -> PillarSignal {
        PillarSignal {
            result: result.map(|r| r.as_bytes().to_vec()),
            score: score.map(Score::from_milli),
            degree: None,
        }
    }

    #[test]
    fn degree_always_wins() {
        assert_eq!(single(Some("failure"), Some(Score::from_units(-5)), Some("excellent")), Rating::Excellent);
        assert_eq!(single(Some("success"), Some(Score::from_units(5)), Some("  Difficult ")), Rating::Difficult);
        assert_eq!(single(None, None, Some("주의")), Rating::Caution);
        assert_eq!(single(None, None, Some("EXCELLENT")), Rating::Excellent);
    }

    #[test]
    fn unknown_degree_falls_through() {
        assert_eq!(single(Some("success"), None, Some("???")), Rating::Good);
    }

    #[test]
    fn result_text_tier() {
        assert_eq!(single(Some("success"), Some(Score::from_units(-9)), None), Rating::Good);
        assert_eq!(single(Some("failure"), Some(Score::from_units(9)), None), Rating::Difficult);
        assert_eq!(single(Some("mixed-success-leaning-failure"), None, None), Rating::Neutral);
        assert_eq!(single(Some("mixed-failure-leaning-success"), None, None), Rating::Neutral);
        assert_eq!(single(Some("coexistence"), Some(Score::from_units(9)), None), Rating::Neutral);
        assert_eq!(single(Some("성공"), None, None), Rating::Good);
        assert_eq!(single(Some("실패"), None, None), Rating::Difficult);
        // 无法识别的结果文本交给分数档
        assert_eq!(single(Some("pending"), Some(Score::from_units(2)), None), Rating::Good);
    }

    #[test]
    fn result_text_is_matched_verbatim() {
        assert_eq!(single(Some("SUCCESS"), Some(Score::from_units(-5)), None), Rating::Difficult);
        assert_eq!(single(Some(" success "), None, None), Rating::Neutral);
        assert_eq!(single(Some("Failure"), Some(Score::from_units(2)), None), Rating::Good);
        // 等级仍然归一
        assert_eq!(single(Some("SUCCESS"), None, Some(" Good ")), Rating::Good);
    }

    #[test]
    fn single_score_boundaries() {
        assert_eq!(single(None, Some(Score::from_milli(1_000)), None), Rating::Good);
        assert_eq!(single(None, Some(Score::from_milli(999)), None), Rating::Neutral);
        assert_eq!(single(None, Some(Score::from_milli(1)), None), Rating::Neutral);
        assert_eq!(single(None, Some(Score::from_milli(0)), None), Rating::Neutral);
        assert_eq!(single(None, Some(Score::from_milli(-999)), None), Rating::Neutral);
        assert_eq!(single(None, Some(Score::from_milli(-1_000)), None), Rating::Difficult);
        assert_eq!(single(None, None, None), Rating::Neutral);
    }

    #[test]
    fn combined_derived_tier() {
        let rate = |s: Option<&str>, e: Option<&str>| combined_rating(None, &side(s, None), &side(e, None));
        assert_eq!(rate(Some("success"), Some("success")), Rating::Excellent);
        assert_eq!(rate(Some("success"), None), Rating::Good);
        assert_eq!(rate(Some("coexistence"), Some("success")), Rating::Good);
        assert_eq!(rate(Some("failure"), Some("failure")), Rating::Difficult);
        assert_eq!(rate(Some("failure"), Some("success")), Rating::Caution);
        assert_eq!(rate(None, Some("failure")), Rating::Caution);
        assert_eq!(rate(None, None), Rating::Neutral);
        assert_eq!(rate(Some("coexistence"), Some("mixed-success-leaning-failure")), Rating::Neutral);
        // 大小写不同的结果文本不算成败倾向
        assert_eq!(rate(Some("success"), Some("Failure")), Rating::Good);
        assert_eq!(rate(Some("Failure"), Some("FAILURE")), Rating::Neutral);
    }

    #[test]
    fn combined_degree_precedence() {
        let sky = PillarSignal { degree: Some(b"good".to_vec()), ..side(Some("failure"), None) };
        let earth = side(Some("failure"), None);
        assert_eq!(combined_rating(Some("대길".as_bytes()), &sky, &earth), Rating::Excellent);
        assert_eq!(combined_rating(None, &sky, &earth), Rating::Good);
    }

    #[test]
    fn combined_score_tier() {
        let rate = |s: Option<i32>, e: Option<i32>| combined_rating(None, &side(None, s), &side(None, e));
        assert_eq!(rate(Some(2_000), Some(1_000)), Rating::Excellent);
        assert_eq!(rate(Some(2_000), Some(999)), Rating::Good);
        assert_eq!(rate(Some(1_000), None), Rating::Good);
        assert_eq!(rate(Some(999), None), Rating::Neutral);
        assert_eq!(rate(Some(-1_000), None), Rating::Neutral);
        assert_eq!(rate(Some(-1_001), None), Rating::Caution);
        assert_eq!(rate(Some(-2_000), Some(-1_000)), Rating::Caution);
        assert_eq!(rate(Some(-2_000), Some(-1_001)), Rating::Difficult);
        assert_eq!(rate(None, None), Rating::Neutral);
    }

    #[test]
    fn labels_are_fixed() {
        assert_eq!(Rating::Excellent.label(), "◎ 대길");
        assert_eq!(Rating::Good.label(), "○ 길");
        assert_eq!(Rating::Neutral.label(), "△ 보통");
        assert_eq!(Rating::Caution.label(), "▽ 주의");
        assert_eq!(Rating::Difficult.label(), "✕ 흉");
        assert_eq!(Rating::default(), Rating::Neutral);
    }
}
