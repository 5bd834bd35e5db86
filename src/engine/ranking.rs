// ==========================================
// 非洲关键矿产数据看板 - 排名引擎
// ==========================================
// 职责: 某矿种某年份的国家产量排名
// 排序键: 1) 产量降序  2) ISO 代码升序（确定性平局裁决）
// ==========================================

use crate::domain::Snapshot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ==========================================
// RankingEntry - 排名条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// 名次（1 起）
    pub rank: usize,
    pub country_iso: String,
    pub quantity: f64,
}

// ==========================================
// RankingEngine - 排名引擎
// ==========================================
pub struct RankingEngine {
    // 无状态引擎,不需要注入依赖
}

impl RankingEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 某矿种某年份的国家排名
    ///
    /// 仅包含有产量记录的国家；对不变快照重复执行输出完全一致。
    pub fn ranking(&self, snapshot: &Snapshot, mineral: &str, year: i32) -> Vec<RankingEntry> {
        let mut rows: Vec<(String, f64)> = snapshot
            .production
            .values()
            .filter(|stat| stat.mineral_code == mineral && stat.year == year)
            .map(|stat| (stat.country_iso.clone(), stat.quantity))
            .collect();

        rows.sort_by(|a, b| match b.1.total_cmp(&a.1) {
            // tie-break: ISO 代码升序，保证稳定可复现
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });

        rows.into_iter()
            .enumerate()
            .map(|(idx, (country_iso, quantity))| RankingEntry {
                rank: idx + 1,
                country_iso,
                quantity,
            })
            .collect()
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new()
    }
}
