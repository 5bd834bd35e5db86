// ==========================================
// 非洲关键矿产数据看板 - 趋势引擎
// ==========================================
// 职责: (国家, 矿种) 的年度产量序列
// 缺失年份保持缺位，不补零、不插值
// ==========================================

use crate::domain::{Snapshot, StatKey};
use serde::{Deserialize, Serialize};

// ==========================================
// TrendPoint - 趋势点
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub quantity: f64,
}

// ==========================================
// TrendEngine - 趋势引擎
// ==========================================
pub struct TrendEngine {
    // 无状态引擎,不需要注入依赖
}

impl TrendEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// (国家, 矿种) 的产量趋势
    ///
    /// # 返回
    /// 按年份升序的 (年份, 产量) 序列；无记录年份缺位。
    ///
    /// 复合键按 (国家, 矿种, 年份) 排序，
    /// 因此区间扫描天然有序，无需再排序。
    pub fn trend(&self, snapshot: &Snapshot, country: &str, mineral: &str) -> Vec<TrendPoint> {
        let start = StatKey::new(country, mineral, i32::MIN);
        let end = StatKey::new(country, mineral, i32::MAX);

        snapshot
            .production
            .range(start..=end)
            .map(|(key, stat)| TrendPoint {
                year: key.year,
                quantity: stat.quantity,
            })
            .collect()
    }
}

impl Default for TrendEngine {
    fn default() -> Self {
        Self::new()
    }
}
