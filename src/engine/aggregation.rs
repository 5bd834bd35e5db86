// ==========================================
// 非洲关键矿产数据看板 - 聚合引擎
// ==========================================
// 职责: 对快照做产量汇总
// 红线: 纯函数，无副作用，可被任意并发读者调用
// ==========================================

use crate::domain::{QueryFilter, Snapshot};
use serde::{Deserialize, Serialize};

// ==========================================
// TotalsRow - 聚合输出行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsRow {
    pub country_iso: String,
    pub mineral_code: String,
    pub year: i32,
    pub quantity: f64,
    /// 计量单位（来自矿种主数据）
    pub unit: String,
}

// ==========================================
// AggregationEngine - 聚合引擎
// ==========================================
pub struct AggregationEngine {
    // 无状态引擎,不需要注入依赖
}

impl AggregationEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 单键产量查询
    ///
    /// 复合键 (国家, 矿种, 年份) 唯一，因此这是查找而非求和。
    ///
    /// # 返回
    /// - Some(f64): 存在该条统计
    /// - None: 无记录（缺失年份不补零）
    pub fn total_for(
        &self,
        snapshot: &Snapshot,
        country: &str,
        mineral: &str,
        year: i32,
    ) -> Option<f64> {
        snapshot
            .production_stat(country, mineral, year)
            .map(|stat| stat.quantity)
    }

    /// 某矿种某年份的全国家合计
    ///
    /// 无记录的国家贡献为零。
    pub fn total_by_mineral_year(&self, snapshot: &Snapshot, mineral: &str, year: i32) -> f64 {
        snapshot
            .production
            .values()
            .filter(|stat| stat.mineral_code == mineral && stat.year == year)
            .map(|stat| stat.quantity)
            .sum()
    }

    /// 过滤后的产量行（按复合键字典序，输出确定）
    pub fn totals(&self, snapshot: &Snapshot, filter: &QueryFilter) -> Vec<TotalsRow> {
        snapshot
            .production
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(_, stat)| TotalsRow {
                country_iso: stat.country_iso.clone(),
                mineral_code: stat.mineral_code.clone(),
                year: stat.year,
                quantity: stat.quantity,
                unit: snapshot
                    .unit_of(&stat.mineral_code)
                    .unwrap_or(crate::domain::DEFAULT_UNIT)
                    .to_string(),
            })
            .collect()
    }

    /// 过滤后的总量
    pub fn grand_total(&self, snapshot: &Snapshot, filter: &QueryFilter) -> f64 {
        snapshot
            .production
            .iter()
            .filter(|(key, _)| filter.matches(key))
            .map(|(_, stat)| stat.quantity)
            .sum()
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}
