//! # 修正建议叠加
//!
//! 审核通过的修正只是展示层的叠加，从不回写原始成败记录；
//! 被修正时保留原值，供"原始值"审计面板展示。
//!
//! 建议的查询是尽力而为的：查询失败一律降级为"没有修正"，不阻塞渲染。

use crate::traits::SuggestionSource;
use crate::types::{DisplayOutcome, OriginalValues, OutcomeRecord, SuggestionKey, SuggestionOverride, SuggestionTriple};
use alloc::collections::BTreeMap;
use sp_std::prelude::*;

/// 未识别的格局名，不可用于查询
pub const UNKNOWN_PATTERN: &[u8] = b"unknown";

/// 复合键分隔符
pub const KEY_SEPARATOR: u8 = b':';

impl SuggestionKey {
    /// 构造 `type:pattern:target:code`
    ///
    /// 四段均为必填；格局名缺失或为 "unknown" 时返回 `None`，表示不做查询。
    pub fn new(suggestion_type: &[u8], pattern_name: Option<&[u8]>, target_char: &[u8], code: &[u8]) -> Option<Self> {
        let pattern_name = pattern_name.filter(|p| is_known_pattern(p))?;
        if suggestion_type.is_empty() || target_char.is_empty() || code.is_empty() {
            return None;
        }
        let mut key = Vec::with_capacity(
            suggestion_type.len() + pattern_name.len() + target_char.len() + code.len() + 3,
        );
        for (i, part) in [suggestion_type, pattern_name, target_char, code].iter().enumerate() {
            if i > 0 {
                key.push(KEY_SEPARATOR);
            }
            key.extend_from_slice(part);
        }
        Some(SuggestionKey(key))
    }

    pub fn for_triple(pattern_name: Option<&[u8]>, triple: &SuggestionTriple) -> Option<Self> {
        Self::new(&triple.suggestion_type, pattern_name, &triple.target_char, &triple.code)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// 格局名去空白后非空且不是 "unknown"
pub fn is_known_pattern(pattern: &[u8]) -> bool {
    let trimmed = pattern.trim_ascii();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(UNKNOWN_PATTERN)
}

/// 把修正叠加到计算结果上
///
/// 结果、理由、角色三个字段各自独立替换；只有确实发生变化时才标记 `is_modified`，
/// 与原值恰好相同的修正不算修改。
pub fn resolve(outcome: &OutcomeRecord, suggestion: Option<&SuggestionOverride>) -> DisplayOutcome {
    let Some(suggestion) = suggestion else {
        return DisplayOutcome { outcome: outcome.clone(), is_modified: false, original: None };
    };

    let mut shown = outcome.clone();
    let mut modified = false;

    if let Some(result) = suggestion.suggested_result {
        if result != outcome.result {
            shown.result = result;
            modified = true;
        }
    }
    if let Some(reason) = &suggestion.suggested_reason {
        if *reason != outcome.reason {
            shown.reason = reason.clone();
            modified = true;
        }
    }
    if let Some(roles) = &suggestion.suggested_roles {
        if outcome.roles.as_ref() != Some(roles) {
            shown.roles = Some(roles.clone());
            modified = true;
        }
    }

    let original = modified.then(|| OriginalValues {
        result: outcome.result,
        reason: outcome.reason.clone(),
        roles: outcome.roles.clone(),
    });
    DisplayOutcome { outcome: shown, is_modified: modified, original }
}

/// 批量查询修正（尽力而为）
///
/// 格局名缺失时不发起查询；查询失败记录告警并返回空表。
pub fn fetch_overrides<S: SuggestionSource>(
    source: &S,
    pattern_name: Option<&[u8]>,
    triples: &[SuggestionTriple],
) -> BTreeMap<SuggestionKey, SuggestionOverride> {
    let Some(pattern) = pattern_name.filter(|p| is_known_pattern(p)) else {
        log::debug!(target: crate::LOG_TARGET, "suggestion lookup skipped: pattern name unresolved");
        return BTreeMap::new();
    };
    if triples.is_empty() {
        return BTreeMap::new();
    }
    match source.batch_lookup(pattern, triples) {
        Ok(found) => found.into_iter().collect(),
        Err(e) => {
            log::warn!(
                target: crate::LOG_TARGET,
                "suggestion lookup failed for {} keys, rendering without overrides: {:?}",
                triples.len(),
                e
            );
            BTreeMap::new()
        },
    }
}

/// 单个命盘的修正缓存
///
/// 只为尚未见过的键发起查询；查到"没有修正"同样会缓存。
/// 查询失败不写缓存，下次渲染可以重试。
#[derive(Clone, Debug, Default)]
pub struct OverrideCache {
    chart_id: u64,
    entries: BTreeMap<SuggestionKey, Option<SuggestionOverride>>,
}

impl OverrideCache {
    pub fn new(chart_id: u64) -> Self {
        Self { chart_id, entries: BTreeMap::new() }
    }

    pub fn chart_id(&self) -> u64 {
        self.chart_id
    }

    /// 切换命盘时清空
    pub fn reset(&mut self, chart_id: u64) {
        if self.chart_id != chart_id {
            self.chart_id = chart_id;
            self.entries.clear();
        }
    }

    pub fn get(&self, key: &SuggestionKey) -> Option<&SuggestionOverride> {
        self.entries.get(key).and_then(Option::as_ref)
    }

    pub fn is_cached(&self, key: &SuggestionKey) -> bool {
        self.entries.contains_key(key)
    }

    /// 补齐当前画面引用到的键
    pub fn ensure<S: SuggestionSource>(&mut self, source: &S, pattern_name: Option<&[u8]>, triples: &[SuggestionTriple]) {
        let missing: Vec<SuggestionTriple> = triples
            .iter()
            .filter(|t| match SuggestionKey::for_triple(pattern_name, t) {
                Some(key) => !self.entries.contains_key(&key),
                None => false,
            })
            .cloned()
            .collect();
        if missing.is_empty() {
            return;
        }
        let Some(pattern) = pattern_name else { return };

        match source.batch_lookup(pattern, &missing) {
            Ok(found) => {
                let mut found: BTreeMap<SuggestionKey, SuggestionOverride> = found.into_iter().collect();
                for triple in &missing {
                    if let Some(key) = SuggestionKey::for_triple(pattern_name, triple) {
                        let entry = found.remove(&key);
                        self.entries.insert(key, entry);
                    }
                }
            },
            Err(e) => {
                log::warn!(
                    target: crate::LOG_TARGET,
                    "chart {}: suggestion lookup failed, continuing without overrides: {:?}",
                    self.chart_id,
                    e
                );
            },
        }
    }

    /// 按键叠加修正
    pub fn resolve(&self, key: Option<&SuggestionKey>, outcome: &OutcomeRecord) -> DisplayOutcome {
        resolve(outcome, key.and_then(|k| self.get(k)))
    }
}

// ===== 单元测试 =====
