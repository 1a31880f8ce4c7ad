//! # 成败记录归并
//!
//! 原始记录来自多个独立的子分析，彼此会合法地重叠；合并记录是分析层自己做过的
//! 归并。两者同时展示会把同一个结构事实显示两遍，因此原始记录中凡是 `code`
//! 已出现在合并记录里的都要隐去。
//!
//! 归并只在同一个（运, 命名空间）内进行，天干侧的 code 不会压掉地支侧的记录。

use crate::types::{MergedOutcome, OutcomeNamespace, OutcomeRecord};
use alloc::collections::BTreeSet;
use sp_std::prelude::*;

/// 同一个运、同一个命名空间下的一组记录
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct OutcomeGroup {
    /// 运的选择键（见 `LuckPeriod::selector_key`）
    pub period_key: Vec<u8>,
    pub namespace: OutcomeNamespace,
    pub raw: Vec<OutcomeRecord>,
    pub merged: Vec<MergedOutcome>,
}

/// 隐去已被合并记录覆盖的原始记录
///
/// - 没有 `code` 的原始记录视为唯一，从不隐去
/// - 保持原始顺序
/// - 幂等：对结果再次归并不会变化
pub fn reconcile(raw: &[OutcomeRecord], merged: &[MergedOutcome]) -> Vec<OutcomeRecord> {
    let merged_codes: BTreeSet<&[u8]> = merged.iter().filter_map(|m| m.code.as_deref()).collect();
    if merged_codes.is_empty() {
        return raw.to_vec();
    }
    raw.iter()
        .filter(|record| match record.code.as_deref() {
            Some(code) => !merged_codes.contains(code),
            None => true,
        })
        .cloned()
        .collect()
}

/// 逐组归并，每组只使用本组的合并记录
pub fn reconcile_groups(groups: &[OutcomeGroup]) -> Vec<(Vec<u8>, OutcomeNamespace, Vec<OutcomeRecord>)> {
    groups
        .iter()
        .map(|group| {
            let shown = reconcile(&group.raw, &group.merged);
            if shown.len() != group.raw.len() {
                log::debug!(
                    target: crate::LOG_TARGET,
                    "reconcile {:?}: {} of {} raw outcomes hidden by merged set",
                    group.namespace,
                    group.raw.len() - shown.len(),
                    group.raw.len()
                );
            }
            (group.period_key.clone(), group.namespace, shown)
        })
        .collect()
}

// ===== 单元测试 =====

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutcomeComparison, OutcomeResult, OutcomeSide};

    fn rec(code: Option<&str>, result: OutcomeResult) -> OutcomeRecord {
        OutcomeRecord::new(code.map(|c| c.as_bytes()), result, b"reason")
    }

    fn codes(records: &[OutcomeRecord]) -> Vec<Option<&[u8]>> {
        records.iter().map(|r| r.code.as_deref()).collect()
    }

    #[test]
    fn merged_codes_are_hidden_in_order() {
        let raw = vec![
            rec(Some("A"), OutcomeResult::Success),
            rec(Some("B"), OutcomeResult::Failure),
            rec(None, OutcomeResult::Coexistence),
            rec(Some("C"), OutcomeResult::Success),
        ];
        let merged = vec![rec(Some("B"), OutcomeResult::Failure), rec(Some("Z"), OutcomeResult::Success)];

        let shown = reconcile(&raw, &merged);
        assert_eq!(codes(&shown), vec![Some(&b"A"[..]), None, Some(&b"C"[..])]);
    }

    #[test]
    fn record_without_code_is_never_hidden() {
        let raw = vec![rec(None, OutcomeResult::Success), rec(None, OutcomeResult::Failure)];
        let merged = vec![rec(None, OutcomeResult::Success), rec(Some("A"), OutcomeResult::Success)];
        assert_eq!(reconcile(&raw, &merged), raw);
    }

    #[test]
    fn empty_merged_returns_raw_unchanged() {
        let raw = vec![rec(Some("A"), OutcomeResult::Success), rec(Some("A"), OutcomeResult::Failure)];
        assert_eq!(reconcile(&raw, &[]), raw);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let raw = vec![
            rec(Some("A"), OutcomeResult::Success),
            rec(Some("B"), OutcomeResult::Failure),
            rec(None, OutcomeResult::Success),
        ];
        let merged = vec![rec(Some("A"), OutcomeResult::Success)];
        let once = reconcile(&raw, &merged);
        assert_eq!(reconcile(&once, &merged), once);
    }

    #[test]
    fn groups_never_cross_namespaces() {
        let sky = OutcomeNamespace::new(OutcomeSide::Sky, OutcomeComparison::YearMonth);
        let earth = OutcomeNamespace::new(OutcomeSide::Earth, OutcomeComparison::YearMonth);
        let groups = vec![
            OutcomeGroup {
                period_key: b"\xE7\x94\xB2\xE5\xAD\x90:34-43".to_vec(),
                namespace: sky,
                raw: vec![rec(Some("X"), OutcomeResult::Success)],
                merged: vec![rec(Some("X"), OutcomeResult::Success)],
            },
            OutcomeGroup {
                period_key: b"\xE7\x94\xB2\xE5\xAD\x90:34-43".to_vec(),
                namespace: earth,
                raw: vec![rec(Some("X"), OutcomeResult::Failure)],
                merged: vec![],
            },
        ];

        let shown = reconcile_groups(&groups);
        assert_eq!(shown.len(), 2);
        assert_eq!(shown[0].1, sky);
        assert!(shown[0].2.is_empty());
        assert_eq!(shown[1].1, earth);
        assert_eq!(shown[1].2.len(), 1);
        assert_eq!(shown[1].2[0].result, OutcomeResult::Failure);
    }
}
